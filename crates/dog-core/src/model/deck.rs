use crate::model::card::Card;
use crate::model::face::Face;
use crate::model::suit::Suit;
use core::fmt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;

pub const DECK_SIZE: usize = 110;
pub const JOKER_COUNT: usize = 6;

/// Raised when a draw outruns the 110 cards. The dealing schedule rebuilds
/// the deck every round, so the engine treats this as a fatal invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyDeckError;

impl fmt::Display for EmptyDeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the deck has no cards left")
    }
}

impl std::error::Error for EmptyDeckError {}

/// Two copies of every (face, suit) pair plus six Jokers. Ids are assigned
/// in build order, before any shuffle, so they identify the same card for
/// every deck instance: King-of-diamonds is always 10 or 11, the Jokers are
/// always 104..=109.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    fn full_set() -> VecDeque<Card> {
        let mut cards = VecDeque::with_capacity(DECK_SIZE);
        let mut id = 0u8;
        for face in Face::DECK_ORDER.iter().copied() {
            for suit in Suit::ALL.iter().copied() {
                for _ in 0..2 {
                    cards.push_back(Card::new(id, face, suit));
                    id += 1;
                }
            }
        }
        for _ in 0..JOKER_COUNT {
            cards.push_back(Card::joker(id));
            id += 1;
        }
        cards
    }

    /// Unshuffled deck in id order, used by debug games and scripted tests.
    pub fn ordered() -> Self {
        Self {
            cards: Self::full_set(),
        }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards = Vec::from(Self::full_set());
        cards.shuffle(rng);
        Self {
            cards: cards.into(),
        }
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// Removes and returns the next card.
    pub fn draw(&mut self) -> Result<Card, EmptyDeckError> {
        self.cards.pop_front().ok_or(EmptyDeckError)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
