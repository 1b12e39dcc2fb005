use crate::model::card::{Card, CardId};

/// A player's dealt cards, kept in arrival order (clients rely on it).
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn get(&self, id: CardId) -> Option<Card> {
        self.cards.iter().copied().find(|card| card.id == id)
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.cards.iter().any(|card| card.id == id)
    }

    /// Removes the card with the given id, returning it if present.
    pub fn remove(&mut self, id: CardId) -> Option<Card> {
        let index = self.cards.iter().position(|card| card.id == id)?;
        Some(self.cards.remove(index))
    }

    /// Discards everything, returning how many cards were thrown away.
    pub fn discard_all(&mut self) -> usize {
        let count = self.cards.len();
        self.cards.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
