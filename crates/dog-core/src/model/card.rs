use crate::model::face::Face;
use crate::model::suit::Suit;
use core::fmt;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unique within one deck build (0..110).
pub type CardId = u8;

/// One thing a card can be played as: a signed step count on the board, or
/// the symbolic switch that trades two marbles' positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardAction {
    Move(i8),
    Switch,
}

// Clients see actions as plain numbers mixed with the string "switch", so the
// serde impls are written by hand instead of derived.
impl Serialize for CardAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CardAction::Move(steps) => serializer.serialize_i8(*steps),
            CardAction::Switch => serializer.serialize_str("switch"),
        }
    }
}

struct CardActionVisitor;

impl Visitor<'_> for CardActionVisitor {
    type Value = CardAction;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a step count or the string \"switch\"")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<CardAction, E> {
        i8::try_from(value)
            .map(CardAction::Move)
            .map_err(|_| E::custom(format!("step count {value} out of range")))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<CardAction, E> {
        self.visit_i64(value.try_into().map_err(de::Error::custom)?)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<CardAction, E> {
        match value {
            "switch" => Ok(CardAction::Switch),
            other => Err(E::custom(format!("unknown action {other:?}"))),
        }
    }
}

impl<'de> Deserialize<'de> for CardAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CardActionVisitor)
    }
}

impl fmt::Display for CardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardAction::Move(steps) => write!(f, "{steps}"),
            CardAction::Switch => f.write_str("switch"),
        }
    }
}

const JOKER_ACTIONS: [CardAction; 16] = [
    CardAction::Move(0),
    CardAction::Move(1),
    CardAction::Move(2),
    CardAction::Move(3),
    CardAction::Move(4),
    CardAction::Move(5),
    CardAction::Move(6),
    CardAction::Move(7),
    CardAction::Move(8),
    CardAction::Move(9),
    CardAction::Move(10),
    CardAction::Move(11),
    CardAction::Move(12),
    CardAction::Move(13),
    CardAction::Switch,
    CardAction::Move(-4),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub id: CardId,
    pub face: Face,
    pub suit: Option<Suit>,
}

impl Card {
    pub const fn new(id: CardId, face: Face, suit: Suit) -> Self {
        Self {
            id,
            face,
            suit: Some(suit),
        }
    }

    pub const fn joker(id: CardId) -> Self {
        Self {
            id,
            face: Face::Joker,
            suit: None,
        }
    }

    /// The fixed action set for this card's face.
    pub fn actions(self) -> &'static [CardAction] {
        match self.face {
            Face::Two => &[CardAction::Move(2)],
            Face::Three => &[CardAction::Move(3)],
            Face::Four => &[CardAction::Move(-4), CardAction::Move(4)],
            Face::Five => &[CardAction::Move(5)],
            Face::Six => &[CardAction::Move(6)],
            Face::Seven => &[CardAction::Move(7)],
            Face::Eight => &[CardAction::Move(8)],
            Face::Nine => &[CardAction::Move(9)],
            Face::Ten => &[CardAction::Move(10)],
            Face::Jack => &[CardAction::Switch],
            Face::Queen => &[CardAction::Move(12)],
            Face::King => &[CardAction::Move(0), CardAction::Move(13)],
            Face::Ace => &[CardAction::Move(0), CardAction::Move(1), CardAction::Move(11)],
            Face::Joker => &JOKER_ACTIONS,
        }
    }

    /// Whether `action` may be played from this card. A seven additionally
    /// accepts any magnitude 1..=7 because its steps may be split across two
    /// marbles; the split bookkeeping itself lives in the game state.
    pub fn allows(self, action: CardAction) -> bool {
        if self.can_split() {
            if let CardAction::Move(steps) = action {
                return (1..=7).contains(&steps);
            }
        }
        self.actions().contains(&action)
    }

    pub const fn can_split(self) -> bool {
        matches!(self.face, Face::Seven)
    }

    /// The color label clients see; the Joker reports `Jo` instead of a suit.
    pub fn color_label(self) -> &'static str {
        match self.suit {
            Some(suit) => suit.as_str(),
            None => "Jo",
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.face, self.color_label())
    }
}
