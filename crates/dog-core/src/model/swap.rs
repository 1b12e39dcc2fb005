use crate::model::card::Card;
use crate::model::seat::Seat;
use std::array;

/// Tracks the one-card exchange that opens every round. Each seat puts in a
/// single card; nothing moves until all four are in, then every card goes to
/// the submitter's partner.
#[derive(Debug, Clone)]
pub struct SwapState {
    submissions: [Option<Card>; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapError {
    AlreadySubmitted(Seat),
    Incomplete,
}

impl SwapState {
    pub fn new() -> Self {
        Self {
            submissions: array::from_fn(|_| None),
        }
    }

    /// Parks `card` for `seat`. The caller removes it from the hand first;
    /// a rejection here means the hand was not touched either.
    pub fn submit(&mut self, seat: Seat, card: Card) -> Result<(), SwapError> {
        if self.submissions[seat.index()].is_some() {
            return Err(SwapError::AlreadySubmitted(seat));
        }
        self.submissions[seat.index()] = Some(card);
        Ok(())
    }

    pub fn has_submitted(&self, seat: Seat) -> bool {
        self.submissions[seat.index()].is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.submissions.iter().all(|entry| entry.is_some())
    }

    /// Consumes the state once complete, yielding each seat's card together
    /// with the partner seat it goes to.
    pub fn into_exchanges(self) -> Result<[(Seat, Card); 4], SwapError> {
        if !self.is_complete() {
            return Err(SwapError::Incomplete);
        }
        Ok(array::from_fn(|index| {
            let seat = Seat::from_index(index).expect("seat index in range");
            let card = self.submissions[index].expect("swap state is complete");
            (seat.partner(), card)
        }))
    }
}

impl Default for SwapState {
    fn default() -> Self {
        Self::new()
    }
}
