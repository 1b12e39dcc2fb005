use crate::model::hand::Hand;
use crate::model::marble::{Marble, MarbleId};
use crate::model::seat::Seat;
use serde::{Deserialize, Serialize};

/// Who a caller claims to be; supplied by the identity layer, never minted
/// by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub uid: String,
    pub name: String,
}

impl PlayerIdentity {
    pub fn new(uid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
        }
    }
}

/// One seated player. There is exactly one canonical aggregate; the public
/// and private wire shapes are projections built in `game::view`.
#[derive(Debug, Clone)]
pub struct Player {
    pub identity: PlayerIdentity,
    pub hand: Hand,
    pub marbles: Vec<Marble>,
}

impl Player {
    pub fn new(identity: PlayerIdentity) -> Self {
        Self {
            identity,
            hand: Hand::new(),
            marbles: Vec::new(),
        }
    }

    /// Called once at game start, when the seat becomes final.
    pub fn assign_marbles(&mut self, seat: Seat) {
        self.marbles = (0..4).map(|i| Marble::new(seat.marble_base() + i)).collect();
    }

    pub fn uid(&self) -> &str {
        &self.identity.uid
    }

    pub fn marble(&self, id: MarbleId) -> Option<&Marble> {
        self.marbles.iter().find(|marble| marble.id == id)
    }

    pub fn marble_mut(&mut self, id: MarbleId) -> Option<&mut Marble> {
        self.marbles.iter_mut().find(|marble| marble.id == id)
    }

    pub fn all_marbles_home(&self) -> bool {
        !self.marbles.is_empty() && self.marbles.iter().all(|marble| marble.is_home())
    }
}
