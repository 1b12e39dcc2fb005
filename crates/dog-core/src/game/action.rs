use crate::model::card::{CardAction, CardId};
use crate::model::marble::MarbleId;
use serde::{Deserialize, Serialize};

/// A player's move as the transport hands it over: which card, played as
/// what, on which marble. `second_marble` is only meaningful for a switch,
/// which trades the positions of two marbles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub card: CardId,
    pub action: CardAction,
    pub marble: MarbleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_marble: Option<MarbleId>,
}

impl ActionRequest {
    pub fn play(card: CardId, action: CardAction, marble: MarbleId) -> Self {
        Self {
            card,
            action,
            marble,
            second_marble: None,
        }
    }

    pub fn switch(card: CardId, marble: MarbleId, second_marble: MarbleId) -> Self {
        Self {
            card,
            action: CardAction::Switch,
            marble,
            second_marble: Some(second_marble),
        }
    }
}
