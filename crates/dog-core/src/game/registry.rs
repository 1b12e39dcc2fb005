use crate::game::action::ActionRequest;
use crate::game::error::GameError;
use crate::game::state::GameState;
use crate::game::view::{GamePublic, PlayerPrivateView};
use crate::model::card::CardId;
use crate::model::player::PlayerIdentity;
use parking_lot::{Mutex, RwLock};
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// All running games, by id. The map lock is only held for lookups and
/// inserts; every game carries its own mutex, so two games never contend.
#[derive(Default)]
pub struct GameRegistry {
    games: RwLock<HashMap<String, Arc<Mutex<GameState>>>>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new game and returns its public snapshot (which carries the
    /// generated id). The host still has to join to take a seat.
    pub fn create_game(
        &self,
        name: &str,
        host: PlayerIdentity,
        seed: Option<u64>,
        debug: bool,
    ) -> Result<GamePublic, GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyGameName);
        }
        let mut games = self.games.write();
        let clashes = games.values().any(|entry| entry.lock().name() == name);
        if clashes {
            return Err(GameError::DuplicateGameName(name.to_string()));
        }
        let mut rng = rand::thread_rng();
        let id = loop {
            let candidate: String = (0..4)
                .map(|_| rng.gen_range(b'A'..=b'Z') as char)
                .collect();
            if !games.contains_key(&candidate) {
                break candidate;
            }
        };
        let state = GameState::new(id.clone(), name, host, seed, debug);
        let public = state.public_state();
        games.insert(id.clone(), Arc::new(Mutex::new(state)));
        info!(game = %id, total = games.len(), "game registered");
        Ok(public)
    }

    pub fn list_games(&self) -> Vec<GamePublic> {
        self.games
            .read()
            .values()
            .map(|entry| entry.lock().public_state())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.games.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.read().is_empty()
    }

    fn game(&self, game_id: &str) -> Result<Arc<Mutex<GameState>>, GameError> {
        self.games
            .read()
            .get(game_id)
            .cloned()
            .ok_or_else(|| GameError::GameNotFound(game_id.to_string()))
    }

    pub fn join_game(
        &self,
        game_id: &str,
        identity: PlayerIdentity,
    ) -> Result<GamePublic, GameError> {
        let game = self.game(game_id)?;
        let mut state = game.lock();
        state.join(identity)?;
        Ok(state.public_state())
    }

    pub fn set_teams(
        &self,
        game_id: &str,
        requester: &str,
        order: &[String],
    ) -> Result<GamePublic, GameError> {
        let game = self.game(game_id)?;
        let mut state = game.lock();
        state.set_teams(requester, order)?;
        Ok(state.public_state())
    }

    pub fn start_game(&self, game_id: &str, requester: &str) -> Result<GamePublic, GameError> {
        let game = self.game(game_id)?;
        let mut state = game.lock();
        state.start(requester)?;
        Ok(state.public_state())
    }

    /// The caller's own cards (and nothing anyone else holds).
    pub fn hand(&self, game_id: &str, uid: &str) -> Result<PlayerPrivateView, GameError> {
        self.private_state(game_id, uid)
    }

    pub fn swap_card(&self, game_id: &str, uid: &str, card: CardId) -> Result<bool, GameError> {
        self.game(game_id)?.lock().swap_card(uid, card)
    }

    pub fn play(
        &self,
        game_id: &str,
        uid: &str,
        request: &ActionRequest,
    ) -> Result<GamePublic, GameError> {
        self.game(game_id)?.lock().play(uid, request)
    }

    pub fn fold(&self, game_id: &str, uid: &str) -> Result<PlayerPrivateView, GameError> {
        self.game(game_id)?.lock().fold(uid)
    }

    pub fn public_state(&self, game_id: &str) -> Result<GamePublic, GameError> {
        Ok(self.game(game_id)?.lock().public_state())
    }

    pub fn private_state(&self, game_id: &str, uid: &str) -> Result<PlayerPrivateView, GameError> {
        self.game(game_id)?.lock().private_state(uid)
    }
}
