use crate::game::state::GameState;
use crate::model::card::{Card, CardAction, CardId};
use crate::model::marble::{Marble, MarbleId};
use crate::model::player::{Player, PlayerIdentity};
use crate::model::seat::{Seat, Team};
use std::collections::BTreeMap;

use serde::Serialize;

/// Wire shape of a card in a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub uid: CardId,
    pub value: &'static str,
    pub color: &'static str,
    pub actions: Vec<CardAction>,
}

impl CardView {
    fn capture(card: Card) -> Self {
        Self {
            uid: card.id,
            value: card.face.as_str(),
            color: card.color_label(),
            actions: card.actions().to_vec(),
        }
    }
}

/// Wire shape of a marble: the flat position integer plus the team color,
/// present once the game has started and seats are final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarbleView {
    pub mid: MarbleId,
    pub position: i32,
    pub color: Option<&'static str>,
}

impl MarbleView {
    fn capture(marble: &Marble, seat: Seat) -> Self {
        Self {
            mid: marble.id,
            position: marble.encoded_position(),
            color: Some(seat.color()),
        }
    }
}

/// What everyone may see about one seat. Never carries a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerPublicView {
    pub uid: String,
    pub name: String,
    pub marbles: Vec<MarbleView>,
    pub steps_of_seven: Option<u8>,
}

impl PlayerPublicView {
    fn capture(player: &Player, seat: Seat, steps_of_seven: Option<u8>) -> Self {
        Self {
            uid: player.identity.uid.clone(),
            name: player.identity.name.clone(),
            marbles: player
                .marbles
                .iter()
                .map(|marble| MarbleView::capture(marble, seat))
                .collect(),
            steps_of_seven,
        }
    }
}

/// The public seat view plus the requesting player's own hand. Built only
/// for the player it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerPrivateView {
    pub uid: String,
    pub name: String,
    pub marbles: Vec<MarbleView>,
    pub steps_of_seven: Option<u8>,
    pub hand: Vec<CardView>,
}

impl PlayerPrivateView {
    pub(crate) fn capture(player: &Player, seat: Seat, steps_of_seven: Option<u8>) -> Self {
        Self {
            uid: player.identity.uid.clone(),
            name: player.identity.name.clone(),
            marbles: player
                .marbles
                .iter()
                .map(|marble| MarbleView::capture(marble, seat))
                .collect(),
            steps_of_seven,
            hand: player.hand.iter().copied().map(CardView::capture).collect(),
        }
    }
}

/// The broadcastable snapshot of a whole game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GamePublic {
    pub game_id: String,
    pub game_name: String,
    pub host: PlayerIdentity,
    pub game_state: &'static str,
    pub round_state: Option<&'static str>,
    pub round_number: u32,
    pub order: Vec<String>,
    pub active_player_index: usize,
    pub winner: Option<Team>,
    pub players: BTreeMap<String, PlayerPublicView>,
}

impl GamePublic {
    pub fn capture(state: &GameState) -> Self {
        let mut players = BTreeMap::new();
        for (index, player) in state.players().iter().enumerate() {
            let seat = Seat::from_index(index).expect("at most four players are seated");
            players.insert(
                player.identity.uid.clone(),
                PlayerPublicView::capture(player, seat, state.pending_steps(seat)),
            );
        }
        Self {
            game_id: state.id().to_string(),
            game_name: state.name().to_string(),
            host: state.host().clone(),
            game_state: state.phase().as_str(),
            round_state: state.round_label(),
            round_number: state.round_number(),
            order: state
                .players()
                .iter()
                .map(|player| player.identity.uid.clone())
                .collect(),
            active_player_index: state.active().index(),
            winner: state.winner(),
            players,
        }
    }
}
