use core::fmt;

/// Card face. The thirteen ranks run high to low because that is the order
/// the deck is built in, which in turn fixes every card id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Face {
    Ace = 0,
    King = 1,
    Queen = 2,
    Jack = 3,
    Ten = 4,
    Nine = 5,
    Eight = 6,
    Seven = 7,
    Six = 8,
    Five = 9,
    Four = 10,
    Three = 11,
    Two = 12,
    Joker = 13,
}

impl Face {
    /// Ranks in deck-build order; the Joker is appended separately.
    pub const DECK_ORDER: [Face; 13] = [
        Face::Ace,
        Face::King,
        Face::Queen,
        Face::Jack,
        Face::Ten,
        Face::Nine,
        Face::Eight,
        Face::Seven,
        Face::Six,
        Face::Five,
        Face::Four,
        Face::Three,
        Face::Two,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Face::Ace => "A",
            Face::King => "K",
            Face::Queen => "Q",
            Face::Jack => "Ja",
            Face::Ten => "10",
            Face::Nine => "9",
            Face::Eight => "8",
            Face::Seven => "7",
            Face::Six => "6",
            Face::Five => "5",
            Face::Four => "4",
            Face::Three => "3",
            Face::Two => "2",
            Face::Joker => "Jo",
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
