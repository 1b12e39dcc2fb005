use crate::model::card::{CardAction, CardId};
use crate::model::seat::Seat;
use core::fmt;

/// Every way a request can be turned down. All of these are recoverable
/// rejections surfaced to the caller; the engine never partially applies a
/// rejected action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    GameNotFound(String),
    PlayerNotInGame(String),
    DuplicateJoin(String),
    GameFull,
    DuplicateGameName(String),
    EmptyGameName,
    InvalidTeamRoster,
    WrongPlayerCount(usize),
    GameAlreadyStarted,
    /// The operation does not fit the current game or round state.
    WrongPhase { required: &'static str },
    AlreadySwapped(String),
    CardNotInHand(CardId),
    IllegalActionForCard { card: CardId, action: CardAction },
    IllegalTarget { note: String },
    NotYourTurn { active: Seat },
    InvalidSplitRemainder { remaining: u8 },
    SplitInProgress,
}

impl GameError {
    pub fn illegal_target(note: impl Into<String>) -> Self {
        GameError::IllegalTarget { note: note.into() }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::GameNotFound(id) => write!(f, "game {id} does not exist"),
            GameError::PlayerNotInGame(uid) => write!(f, "player {uid} is not in this game"),
            GameError::DuplicateJoin(uid) => write!(f, "player {uid} has already joined"),
            GameError::GameFull => {
                f.write_str("four players have already joined, there is no more room")
            }
            GameError::DuplicateGameName(name) => {
                write!(f, "a game named {name:?} already exists")
            }
            GameError::EmptyGameName => f.write_str("the game needs a non-empty name"),
            GameError::InvalidTeamRoster => {
                f.write_str("the proposed order is not a permutation of the seated players")
            }
            GameError::WrongPlayerCount(count) => {
                write!(f, "a game needs exactly 4 players, got {count}")
            }
            GameError::GameAlreadyStarted => f.write_str("the game has already started"),
            GameError::WrongPhase { required } => {
                write!(f, "this request needs {required}")
            }
            GameError::AlreadySwapped(uid) => {
                write!(f, "player {uid} has already swapped a card this round")
            }
            GameError::CardNotInHand(card) => write!(f, "card {card} is not in your hand"),
            GameError::IllegalActionForCard { card, action } => {
                write!(f, "card {card} cannot be played as {action}")
            }
            GameError::IllegalTarget { note } => f.write_str(note),
            GameError::NotYourTurn { active } => {
                write!(f, "it is the {active} player's turn")
            }
            GameError::InvalidSplitRemainder { remaining } => {
                write!(f, "only {remaining} of the seven's steps are left")
            }
            GameError::SplitInProgress => {
                f.write_str("finish the seven you started (or fold) before playing another card")
            }
        }
    }
}

impl std::error::Error for GameError {}
