use crate::game::action::ActionRequest;
use crate::game::error::GameError;
use crate::game::view::{GamePublic, PlayerPrivateView};
use crate::model::board::{self, Landing};
use crate::model::card::{CardAction, CardId};
use crate::model::deck::Deck;
use crate::model::marble::{Marble, MarbleId, Position};
use crate::model::player::{Player, PlayerIdentity};
use crate::model::seat::{Seat, Team};
use crate::model::swap::SwapState;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    NotStarted,
    InProgress,
    Finished(Team),
}

impl GamePhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            GamePhase::NotStarted => "not_started",
            GamePhase::InProgress => "in_progress",
            GamePhase::Finished(_) => "finished",
        }
    }
}

/// Observable round states while the game runs. Dealing and round-end are
/// synchronous transitions inside whichever call triggers them.
#[derive(Debug, Clone)]
pub enum RoundPhase {
    Swap(SwapState),
    Playing,
}

/// A seven whose steps are partly consumed: the card stays in the hand and
/// the turn stays with its holder until the remainder is spent.
#[derive(Debug, Clone, Copy)]
struct PendingSeven {
    seat: Seat,
    card: CardId,
    remaining: u8,
}

/// What a resolved action will do to the board, computed in full before
/// anything is mutated so rejections never leave partial state behind.
enum Effect {
    Place {
        marble: MarbleId,
        to: Position,
        kick: Option<MarbleId>,
    },
    Trade {
        first: MarbleId,
        second: MarbleId,
    },
}

/// One game of four seats racing marbles around the shared ring. Every
/// operation is state-in/state-out: no I/O, no blocking, and the only
/// randomness is the deck RNG owned (and seeded) here.
#[derive(Debug)]
pub struct GameState {
    id: String,
    name: String,
    host: PlayerIdentity,
    players: Vec<Player>,
    phase: GamePhase,
    round: Option<RoundPhase>,
    round_number: u32,
    active: Seat,
    pending_seven: Option<PendingSeven>,
    rng: StdRng,
    seed: u64,
    debug: bool,
}

/// Hand sizes for consecutive rounds, repeating.
const DEAL_CYCLE: [usize; 4] = [6, 5, 4, 3];

impl GameState {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        host: PlayerIdentity,
        seed: Option<u64>,
        debug: bool,
    ) -> Self {
        let id = id.into();
        let name = name.into();
        let seed = seed.unwrap_or_else(rand::random);
        info!(game = %id, name = %name, seed, "created game");
        Self {
            id,
            name,
            host,
            players: Vec::new(),
            phase: GamePhase::NotStarted,
            round: None,
            round_number: 0,
            active: Seat::Red,
            pending_seven: None,
            rng: StdRng::seed_from_u64(seed),
            seed,
            debug,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn host(&self) -> &PlayerIdentity {
        &self.host
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    pub fn round(&self) -> Option<&RoundPhase> {
        self.round.as_ref()
    }

    pub fn round_label(&self) -> Option<&'static str> {
        self.round.as_ref().map(|round| match round {
            RoundPhase::Swap(_) => "swap",
            RoundPhase::Playing => "playing",
        })
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn active(&self) -> Seat {
        self.active
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn winner(&self) -> Option<Team> {
        match self.phase {
            GamePhase::Finished(team) => Some(team),
            _ => None,
        }
    }

    /// Steps a pending seven still owes for `seat`, if any.
    pub fn pending_steps(&self, seat: Seat) -> Option<u8> {
        self.pending_seven
            .as_ref()
            .filter(|pending| pending.seat == seat)
            .map(|pending| pending.remaining)
    }

    /// How many cards each seat receives in the given round (1-based).
    pub const fn deal_count(round_number: u32) -> usize {
        DEAL_CYCLE[((round_number - 1) % 4) as usize]
    }

    fn seat_of(&self, uid: &str) -> Result<Seat, GameError> {
        self.players
            .iter()
            .position(|player| player.uid() == uid)
            .and_then(Seat::from_index)
            .ok_or_else(|| GameError::PlayerNotInGame(uid.to_string()))
    }

    pub fn join(&mut self, identity: PlayerIdentity) -> Result<(), GameError> {
        if self.players.iter().any(|p| p.uid() == identity.uid) {
            return Err(GameError::DuplicateJoin(identity.uid));
        }
        if self.players.len() == 4 {
            return Err(GameError::GameFull);
        }
        debug!(game = %self.id, player = %identity.uid, "player joined");
        self.players.push(Player::new(identity));
        Ok(())
    }

    /// Reorders the seats before the game starts; the order also fixes the
    /// team pairing (seats 0/2 vs 1/3).
    pub fn set_teams(&mut self, requester: &str, order: &[String]) -> Result<(), GameError> {
        if !matches!(self.phase, GamePhase::NotStarted) {
            return Err(GameError::GameAlreadyStarted);
        }
        self.seat_of(requester)?;
        if order.len() != self.players.len() {
            return Err(GameError::InvalidTeamRoster);
        }
        let mut reordered = Vec::with_capacity(self.players.len());
        for uid in order {
            let player = self
                .players
                .iter()
                .find(|player| player.uid() == uid)
                .ok_or(GameError::InvalidTeamRoster)?;
            if reordered
                .iter()
                .any(|seated: &Player| seated.uid() == uid)
            {
                return Err(GameError::InvalidTeamRoster);
            }
            reordered.push(player.clone());
        }
        self.players = reordered;
        Ok(())
    }

    pub fn start(&mut self, requester: &str) -> Result<(), GameError> {
        self.seat_of(requester)?;
        if !matches!(self.phase, GamePhase::NotStarted) {
            return Err(GameError::GameAlreadyStarted);
        }
        if self.players.len() != 4 {
            return Err(GameError::WrongPlayerCount(self.players.len()));
        }
        for (index, player) in self.players.iter_mut().enumerate() {
            let seat = Seat::from_index(index).expect("exactly four players");
            player.assign_marbles(seat);
        }
        self.phase = GamePhase::InProgress;
        self.round_number = 1;
        info!(game = %self.id, seed = self.seed, "game started");
        self.deal_round();
        Ok(())
    }

    /// Deals the next round: fresh deck from the game RNG (or the ordered
    /// debug deck), hand sizes from the 6/5/4/3 cycle, first turn rotating
    /// one seat per round.
    fn deal_round(&mut self) {
        let count = Self::deal_count(self.round_number);
        let mut deck = if self.debug {
            Deck::ordered()
        } else {
            Deck::shuffled(&mut self.rng)
        };
        for player in &mut self.players {
            for _ in 0..count {
                let card = deck.draw().expect("a fresh deck covers a full deal");
                player.hand.add(card);
            }
        }
        self.active = Seat::from_index(((self.round_number - 1) % 4) as usize)
            .expect("rotation stays in range");
        self.pending_seven = None;
        self.round = Some(RoundPhase::Swap(SwapState::new()));
        debug!(game = %self.id, round = self.round_number, count, "dealt round");
    }

    /// Parks one card for the partner. Returns whether this submission
    /// completed the swap phase; cards only change hands once it did.
    pub fn swap_card(&mut self, uid: &str, card_id: CardId) -> Result<bool, GameError> {
        let seat = self.seat_of(uid)?;
        let Some(RoundPhase::Swap(swap)) = self.round.as_mut() else {
            return Err(GameError::WrongPhase {
                required: "the swap phase",
            });
        };
        if swap.has_submitted(seat) {
            return Err(GameError::AlreadySwapped(uid.to_string()));
        }
        let card = self.players[seat.index()]
            .hand
            .remove(card_id)
            .ok_or(GameError::CardNotInHand(card_id))?;
        swap.submit(seat, card)
            .expect("the seat was checked to be open above");
        if !swap.is_complete() {
            return Ok(false);
        }

        let Some(RoundPhase::Swap(swap)) = self.round.take() else {
            unreachable!("the swap phase was just borrowed")
        };
        for (target, card) in swap.into_exchanges().expect("swap state is complete") {
            self.players[target.index()].hand.add(card);
        }
        self.round = Some(RoundPhase::Playing);
        debug!(game = %self.id, round = self.round_number, "swap complete, round begins");
        Ok(true)
    }

    /// Validates and applies one card play. Everything is checked before
    /// anything moves; a rejection leaves the game untouched.
    pub fn play(&mut self, uid: &str, request: &ActionRequest) -> Result<GamePublic, GameError> {
        let seat = self.seat_of(uid)?;
        if !matches!(self.round, Some(RoundPhase::Playing)) {
            return Err(GameError::WrongPhase {
                required: "the play phase",
            });
        }
        if seat != self.active {
            return Err(GameError::NotYourTurn {
                active: self.active,
            });
        }

        let card = self.players[seat.index()]
            .hand
            .get(request.card)
            .ok_or(GameError::CardNotInHand(request.card))?;

        let mut split_remaining = None;
        if let Some(pending) = &self.pending_seven {
            if pending.card != request.card {
                return Err(GameError::SplitInProgress);
            }
            split_remaining = Some(pending.remaining);
        }

        if !card.allows(request.action) {
            return Err(GameError::IllegalActionForCard {
                card: card.id,
                action: request.action,
            });
        }

        let marble = *self.players[seat.index()]
            .marble(request.marble)
            .ok_or_else(|| {
                GameError::illegal_target(format!("marble {} is not yours to move", request.marble))
            })?;

        let effect = match request.action {
            CardAction::Switch => self.resolve_switch(marble, request.second_marble)?,
            CardAction::Move(0) => self.resolve_exit(seat, marble)?,
            CardAction::Move(steps) if steps > 0 => {
                let steps = steps as u8;
                if let Some(remaining) = split_remaining {
                    if steps > remaining {
                        return Err(GameError::InvalidSplitRemainder { remaining });
                    }
                }
                self.resolve_forward(seat, marble, steps)?
            }
            CardAction::Move(steps) => self.resolve_backward(seat, marble, steps.unsigned_abs())?,
        };

        self.apply(effect);

        let mut fully_consumed = true;
        if card.can_split() {
            if let CardAction::Move(steps) = request.action {
                let remaining = split_remaining.unwrap_or(7) - steps as u8;
                if remaining > 0 {
                    self.pending_seven = Some(PendingSeven {
                        seat,
                        card: card.id,
                        remaining,
                    });
                    fully_consumed = false;
                }
            }
        }
        if fully_consumed {
            self.players[seat.index()].hand.remove(card.id);
            self.pending_seven = None;
        }

        let team = seat.team();
        if self.team_finished(team) {
            self.phase = GamePhase::Finished(team);
            self.round = None;
            info!(game = %self.id, team = %team, "team wins");
        } else if fully_consumed {
            if self.players.iter().all(|player| player.hand.is_empty()) {
                self.round_number += 1;
                self.deal_round();
            } else {
                self.advance_turn();
            }
        }

        Ok(GamePublic::capture(self))
    }

    /// Throws away the caller's whole hand. Always accepted during play
    /// (the engine deliberately does not check whether legal moves remain),
    /// even from a seat that is not on turn.
    pub fn fold(&mut self, uid: &str) -> Result<PlayerPrivateView, GameError> {
        let seat = self.seat_of(uid)?;
        if !matches!(self.round, Some(RoundPhase::Playing)) {
            return Err(GameError::WrongPhase {
                required: "the play phase",
            });
        }
        let discarded = self.players[seat.index()].hand.discard_all();
        debug!(game = %self.id, player = uid, discarded, "player folded");
        if self.pending_steps(seat).is_some() {
            self.pending_seven = None;
        }
        if self.players.iter().all(|player| player.hand.is_empty()) {
            self.round_number += 1;
            self.deal_round();
        } else if seat == self.active {
            self.advance_turn();
        }
        self.private_state(uid)
    }

    pub fn public_state(&self) -> GamePublic {
        GamePublic::capture(self)
    }

    pub fn private_state(&self, uid: &str) -> Result<PlayerPrivateView, GameError> {
        let seat = self.seat_of(uid)?;
        Ok(PlayerPrivateView::capture(
            &self.players[seat.index()],
            seat,
            self.pending_steps(seat),
        ))
    }

    fn resolve_switch(
        &self,
        marble: Marble,
        second_id: Option<MarbleId>,
    ) -> Result<Effect, GameError> {
        let second_id =
            second_id.ok_or_else(|| GameError::illegal_target("a switch needs a second marble"))?;
        if second_id == marble.id {
            return Err(GameError::illegal_target(
                "a switch needs two different marbles",
            ));
        }
        let second = self.find_marble(second_id).ok_or_else(|| {
            GameError::illegal_target(format!("marble {second_id} does not exist"))
        })?;
        if marble.track_offset().is_none() || second.track_offset().is_none() {
            return Err(GameError::illegal_target(
                "only marbles on the track can be switched",
            ));
        }
        Ok(Effect::Trade {
            first: marble.id,
            second: second.id,
        })
    }

    fn resolve_exit(&self, seat: Seat, marble: Marble) -> Result<Effect, GameError> {
        if !marble.is_in_house() {
            return Err(GameError::illegal_target(
                "action 0 starts a marble from the house",
            ));
        }
        let entry = seat.entry_offset();
        let kick = self.landing_kick(seat, entry)?;
        Ok(Effect::Place {
            marble: marble.id,
            to: Position::Track(entry),
            kick,
        })
    }

    fn resolve_forward(&self, seat: Seat, marble: Marble, steps: u8) -> Result<Effect, GameError> {
        let landing = board::forward(seat, marble.position, steps)
            .map_err(|err| GameError::illegal_target(err.to_string()))?;
        match landing {
            Landing::Track(offset) => {
                let kick = self.landing_kick(seat, offset)?;
                Ok(Effect::Place {
                    marble: marble.id,
                    to: Position::Track(offset),
                    kick,
                })
            }
            Landing::Home(depth) => {
                let from_depth = match marble.position {
                    Position::Home(current) => current,
                    _ => 0,
                };
                let blocked = self.players[seat.index()].marbles.iter().any(|other| {
                    other.id != marble.id
                        && matches!(other.position, Position::Home(occupied)
                            if occupied > from_depth && occupied <= depth)
                });
                if blocked {
                    return Err(GameError::illegal_target(
                        "one of your marbles blocks the home stretch",
                    ));
                }
                Ok(Effect::Place {
                    marble: marble.id,
                    to: Position::Home(depth),
                    kick: None,
                })
            }
        }
    }

    fn resolve_backward(&self, seat: Seat, marble: Marble, steps: u8) -> Result<Effect, GameError> {
        let offset = board::backward(marble.position, steps)
            .map_err(|err| GameError::illegal_target(err.to_string()))?;
        let kick = self.landing_kick(seat, offset)?;
        Ok(Effect::Place {
            marble: marble.id,
            to: Position::Track(offset),
            kick,
        })
    }

    /// Whether landing on `offset` is clear, kicks an opponent, or is
    /// blocked by the mover's own marble.
    fn landing_kick(&self, seat: Seat, offset: u8) -> Result<Option<MarbleId>, GameError> {
        match self.occupant_of(offset) {
            Some(other) if other.owner() == seat => Err(GameError::illegal_target(format!(
                "slot {offset} holds one of your own marbles"
            ))),
            Some(other) => Ok(Some(other.id)),
            None => Ok(None),
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Place { marble, to, kick } => {
                if let Some(victim) = kick {
                    self.set_marble_position(victim, Position::House);
                    info!(game = %self.id, marble = victim, "marble kicked back to its house");
                }
                self.set_marble_position(marble, to);
            }
            Effect::Trade { first, second } => {
                let first_pos = self.marble_position(first);
                let second_pos = self.marble_position(second);
                self.set_marble_position(first, second_pos);
                self.set_marble_position(second, first_pos);
            }
        }
    }

    fn advance_turn(&mut self) {
        let mut next = self.active.next();
        for _ in 0..4 {
            if !self.players[next.index()].hand.is_empty() {
                break;
            }
            next = next.next();
        }
        self.active = next;
    }

    fn team_finished(&self, team: Team) -> bool {
        team.seats().iter().all(|seat| {
            self.players
                .get(seat.index())
                .is_some_and(Player::all_marbles_home)
        })
    }

    fn find_marble(&self, id: MarbleId) -> Option<Marble> {
        self.players
            .iter()
            .find_map(|player| player.marble(id).copied())
    }

    fn occupant_of(&self, offset: u8) -> Option<Marble> {
        self.players.iter().find_map(|player| {
            player
                .marbles
                .iter()
                .copied()
                .find(|marble| marble.track_offset() == Some(offset))
        })
    }

    fn marble_position(&self, id: MarbleId) -> Position {
        self.find_marble(id)
            .expect("marble ids are stable once assigned")
            .position
    }

    fn set_marble_position(&mut self, id: MarbleId, position: Position) {
        let owner = (id / 4) as usize;
        self.players[owner]
            .marble_mut(id)
            .expect("marble ids are stable once assigned")
            .position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::{GameState, RoundPhase};
    use crate::game::action::ActionRequest;
    use crate::game::error::GameError;
    use crate::model::card::{Card, CardAction, CardId};
    use crate::model::face::Face;
    use crate::model::marble::{MarbleId, Position};
    use crate::model::player::PlayerIdentity;
    use crate::model::seat::{Seat, Team};
    use crate::model::suit::Suit;

    const UIDS: [&str; 4] = ["AAAA", "BBBB", "CCCC", "DDDD"];

    fn full_game() -> GameState {
        let mut state = GameState::new(
            "MQLS",
            "test_game",
            PlayerIdentity::new("AAAA", "Thilo"),
            Some(7),
            false,
        );
        for (uid, name) in [
            ("AAAA", "Thilo"),
            ("BBBB", "Lara"),
            ("CCCC", "Bibi"),
            ("DDDD", "Bene"),
        ] {
            state.join(PlayerIdentity::new(uid, name)).unwrap();
        }
        state
    }

    fn started_game() -> GameState {
        let mut state = full_game();
        state.start("AAAA").unwrap();
        state
    }

    /// Replaces a seat's hand outright, bypassing the deal.
    fn rig_hand(state: &mut GameState, seat: Seat, cards: &[Card]) {
        state.players[seat.index()].hand.discard_all();
        for card in cards {
            state.players[seat.index()].hand.add(*card);
        }
    }

    fn begin_play(state: &mut GameState) {
        state.round = Some(RoundPhase::Playing);
    }

    fn place(state: &mut GameState, id: MarbleId, position: Position) {
        state.set_marble_position(id, position);
    }

    fn encoded(state: &GameState, id: MarbleId) -> i32 {
        state.find_marble(id).unwrap().encoded_position()
    }

    fn play(card: CardId, steps: i8, marble: MarbleId) -> ActionRequest {
        ActionRequest::play(card, CardAction::Move(steps), marble)
    }

    #[test]
    fn lobby_rejects_duplicates_and_overflow() {
        let mut state = full_game();
        assert_eq!(
            state.join(PlayerIdentity::new("AAAA", "Thilo")),
            Err(GameError::DuplicateJoin("AAAA".into()))
        );
        assert_eq!(
            state.join(PlayerIdentity::new("EEEE", "Eve")),
            Err(GameError::GameFull)
        );
    }

    #[test]
    fn starting_needs_four_seated_players() {
        let mut state = GameState::new(
            "XXXX",
            "short_table",
            PlayerIdentity::new("AAAA", "Thilo"),
            Some(1),
            false,
        );
        state.join(PlayerIdentity::new("AAAA", "Thilo")).unwrap();
        assert_eq!(state.start("AAAA"), Err(GameError::WrongPlayerCount(1)));
        assert!(matches!(
            state.start("ZZZZ"),
            Err(GameError::PlayerNotInGame(_))
        ));
    }

    #[test]
    fn starting_twice_is_rejected() {
        let mut state = started_game();
        assert_eq!(state.start("AAAA"), Err(GameError::GameAlreadyStarted));
    }

    #[test]
    fn set_teams_reorders_seats_before_start() {
        let mut state = full_game();
        let order: Vec<String> = ["AAAA", "CCCC", "BBBB", "DDDD"]
            .iter()
            .map(|uid| uid.to_string())
            .collect();
        state.set_teams("AAAA", &order).unwrap();
        let seated: Vec<String> = state
            .players()
            .iter()
            .map(|player| player.uid().to_string())
            .collect();
        assert_eq!(seated, order);

        let repeated: Vec<String> = ["AAAA", "AAAA", "BBBB", "DDDD"]
            .iter()
            .map(|uid| uid.to_string())
            .collect();
        assert_eq!(
            state.set_teams("AAAA", &repeated),
            Err(GameError::InvalidTeamRoster)
        );

        state.start("AAAA").unwrap();
        assert_eq!(
            state.set_teams("AAAA", &order),
            Err(GameError::GameAlreadyStarted)
        );
    }

    #[test]
    fn the_first_deal_hands_out_six_cards_each() {
        let state = started_game();
        assert_eq!(state.round_number(), 1);
        assert_eq!(state.active(), Seat::Red);
        assert!(matches!(state.round(), Some(RoundPhase::Swap(_))));
        for player in state.players() {
            assert_eq!(player.hand.len(), 6);
        }
    }

    #[test]
    fn the_deal_cycle_shrinks_and_wraps() {
        assert_eq!(GameState::deal_count(1), 6);
        assert_eq!(GameState::deal_count(2), 5);
        assert_eq!(GameState::deal_count(3), 4);
        assert_eq!(GameState::deal_count(4), 3);
        assert_eq!(GameState::deal_count(5), 6);
    }

    #[test]
    fn swap_moves_cards_to_the_partner() {
        let mut state = started_game();
        let picks: Vec<CardId> = (0..4)
            .map(|index| state.players[index].hand.cards()[0].id)
            .collect();
        for (index, uid) in UIDS.iter().enumerate() {
            let complete = state.swap_card(uid, picks[index]).unwrap();
            assert_eq!(complete, index == 3);
        }
        assert!(matches!(state.round(), Some(RoundPhase::Playing)));
        assert!(state.players[2].hand.contains(picks[0]));
        assert!(state.players[3].hand.contains(picks[1]));
        assert!(state.players[0].hand.contains(picks[2]));
        assert!(state.players[1].hand.contains(picks[3]));
        assert_eq!(
            state.swap_card("AAAA", picks[2]),
            Err(GameError::WrongPhase {
                required: "the swap phase"
            })
        );
    }

    #[test]
    fn swapping_twice_in_one_round_is_rejected() {
        let mut state = started_game();
        let first = state.players[0].hand.cards()[0].id;
        let second = state.players[0].hand.cards()[1].id;
        state.swap_card("AAAA", first).unwrap();
        assert_eq!(
            state.swap_card("AAAA", second),
            Err(GameError::AlreadySwapped("AAAA".into()))
        );
    }

    #[test]
    fn playing_during_the_swap_is_rejected() {
        let mut state = started_game();
        let card = state.players[0].hand.cards()[0].id;
        assert_eq!(
            state.play("AAAA", &play(card, 0, 0)),
            Err(GameError::WrongPhase {
                required: "the play phase"
            })
        );
    }

    #[test]
    fn turn_order_is_enforced() {
        let mut state = started_game();
        begin_play(&mut state);
        let card = state.players[1].hand.cards()[0].id;
        assert_eq!(
            state.play("BBBB", &play(card, 0, 4)),
            Err(GameError::NotYourTurn { active: Seat::Red })
        );
    }

    #[test]
    fn an_opening_sequence_of_exits_and_a_queen_kick() {
        let mut state = started_game();
        rig_hand(
            &mut state,
            Seat::Red,
            &[
                Card::new(10, Face::King, Suit::Diamonds),
                Card::new(84, Face::Four, Suit::Hearts),
                Card::new(68, Face::Six, Suit::Hearts),
            ],
        );
        rig_hand(
            &mut state,
            Seat::Yellow,
            &[
                Card::new(4, Face::Ace, Suit::Hearts),
                Card::new(92, Face::Three, Suit::Hearts),
            ],
        );
        rig_hand(
            &mut state,
            Seat::Green,
            &[Card::new(20, Face::Queen, Suit::Hearts)],
        );
        rig_hand(
            &mut state,
            Seat::Blue,
            &[
                Card::new(14, Face::King, Suit::Spades),
                Card::new(16, Face::Queen, Suit::Clubs),
            ],
        );
        begin_play(&mut state);

        state.play("AAAA", &play(10, 0, 0)).unwrap();
        assert_eq!(encoded(&state, 0), 0);

        state.play("BBBB", &play(4, 0, 4)).unwrap();
        assert_eq!(encoded(&state, 4), 16);

        state.fold("CCCC").unwrap();

        state.play("DDDD", &play(14, 0, 12)).unwrap();
        assert_eq!(encoded(&state, 12), 48);

        state.play("AAAA", &play(84, -4, 0)).unwrap();
        assert_eq!(encoded(&state, 0), 60);

        state.play("BBBB", &play(92, 3, 4)).unwrap();
        assert_eq!(encoded(&state, 4), 19);

        // Green's hand is empty, so the turn skips straight to Blue,
        // whose queen lands on Red's marble and kicks it home.
        let public = state.play("DDDD", &play(16, 12, 12)).unwrap();
        assert_eq!(encoded(&state, 12), 60);
        assert_eq!(encoded(&state, 0), -1);
        assert_eq!(public.active_player_index, 0);
    }

    #[test]
    fn exits_block_on_own_marbles_and_kick_opponents() {
        let mut state = started_game();
        rig_hand(
            &mut state,
            Seat::Red,
            &[
                Card::new(10, Face::King, Suit::Diamonds),
                Card::new(9, Face::King, Suit::Clubs),
            ],
        );
        begin_play(&mut state);
        place(&mut state, 4, Position::Track(0));

        state.play("AAAA", &play(10, 0, 0)).unwrap();
        assert_eq!(encoded(&state, 0), 0);
        assert_eq!(encoded(&state, 4), -5);

        state.active = Seat::Red;
        let err = state.play("AAAA", &play(9, 0, 1)).unwrap_err();
        assert!(matches!(err, GameError::IllegalTarget { .. }));
    }

    #[test]
    fn crossing_the_entry_diverts_into_home() {
        let mut state = started_game();
        rig_hand(&mut state, Seat::Red, &[Card::new(68, Face::Six, Suit::Hearts)]);
        begin_play(&mut state);
        place(&mut state, 0, Position::Track(60));

        state.play("AAAA", &play(68, 6, 0)).unwrap();
        assert_eq!(state.find_marble(0).unwrap().position, Position::Home(2));
    }

    #[test]
    fn the_home_stretch_rejects_overshoot() {
        let mut state = started_game();
        rig_hand(&mut state, Seat::Red, &[Card::new(68, Face::Six, Suit::Hearts)]);
        begin_play(&mut state);
        place(&mut state, 0, Position::Track(63));

        let err = state.play("AAAA", &play(68, 6, 0)).unwrap_err();
        assert!(matches!(err, GameError::IllegalTarget { .. }));
    }

    #[test]
    fn home_marbles_block_the_rungs_above_them() {
        let mut state = started_game();
        rig_hand(
            &mut state,
            Seat::Red,
            &[
                Card::new(68, Face::Six, Suit::Hearts),
                Card::new(72, Face::Five, Suit::Clubs),
            ],
        );
        begin_play(&mut state);
        place(&mut state, 0, Position::Track(60));
        place(&mut state, 1, Position::Home(2));

        // six steps would land on the occupied second rung
        let err = state.play("AAAA", &play(68, 6, 0)).unwrap_err();
        assert!(matches!(err, GameError::IllegalTarget { .. }));

        // five steps stop beneath it
        state.play("AAAA", &play(72, 5, 0)).unwrap();
        assert_eq!(state.find_marble(0).unwrap().position, Position::Home(1));
    }

    #[test]
    fn a_seven_can_be_split_across_moves() {
        let mut state = started_game();
        rig_hand(
            &mut state,
            Seat::Blue,
            &[
                Card::new(59, Face::Seven, Suit::Diamonds),
                Card::new(78, Face::Five, Suit::Spades),
            ],
        );
        begin_play(&mut state);
        state.active = Seat::Blue;
        place(&mut state, 12, Position::Track(48));

        let public = state.play("DDDD", &play(59, 5, 12)).unwrap();
        assert_eq!(encoded(&state, 12), 53);
        assert_eq!(public.active_player_index, 3);
        assert_eq!(public.players["DDDD"].steps_of_seven, Some(2));

        assert_eq!(
            state.play("DDDD", &play(59, 5, 12)),
            Err(GameError::InvalidSplitRemainder { remaining: 2 })
        );
        assert_eq!(
            state.play("DDDD", &play(78, 5, 12)),
            Err(GameError::SplitInProgress)
        );

        let public = state.play("DDDD", &play(59, 2, 12)).unwrap();
        assert_eq!(encoded(&state, 12), 55);
        assert!(!state.players[3].hand.contains(59));
        assert_eq!(public.active_player_index, 0);
        assert_eq!(public.players["DDDD"].steps_of_seven, None);
    }

    #[test]
    fn folding_abandons_a_pending_seven() {
        let mut state = started_game();
        rig_hand(
            &mut state,
            Seat::Blue,
            &[Card::new(59, Face::Seven, Suit::Diamonds)],
        );
        begin_play(&mut state);
        state.active = Seat::Blue;
        place(&mut state, 12, Position::Track(30));

        state.play("DDDD", &play(59, 3, 12)).unwrap();
        assert_eq!(state.pending_steps(Seat::Blue), Some(4));

        state.fold("DDDD").unwrap();
        assert_eq!(state.pending_steps(Seat::Blue), None);
        assert!(state.players[3].hand.is_empty());
        assert_eq!(state.active(), Seat::Red);
    }

    #[test]
    fn a_jack_trades_two_track_marbles() {
        let mut state = started_game();
        rig_hand(
            &mut state,
            Seat::Red,
            &[
                Card::new(24, Face::Jack, Suit::Clubs),
                Card::new(26, Face::Jack, Suit::Diamonds),
            ],
        );
        begin_play(&mut state);
        place(&mut state, 0, Position::Track(5));
        place(&mut state, 12, Position::Track(48));

        state
            .play("AAAA", &ActionRequest::switch(24, 0, 12))
            .unwrap();
        assert_eq!(encoded(&state, 0), 48);
        assert_eq!(encoded(&state, 12), 5);

        // a house marble cannot be traded
        state.active = Seat::Red;
        let err = state
            .play("AAAA", &ActionRequest::switch(26, 1, 12))
            .unwrap_err();
        assert!(matches!(err, GameError::IllegalTarget { .. }));

        // the first marble must belong to the player
        let err = state
            .play("AAAA", &ActionRequest::switch(26, 13, 0))
            .unwrap_err();
        assert!(matches!(err, GameError::IllegalTarget { .. }));

        // a switch without a second marble goes nowhere
        let err = state
            .play("AAAA", &ActionRequest::play(26, CardAction::Switch, 0))
            .unwrap_err();
        assert!(matches!(err, GameError::IllegalTarget { .. }));
    }

    #[test]
    fn a_joker_can_walk_backwards() {
        let mut state = started_game();
        rig_hand(&mut state, Seat::Red, &[Card::joker(105)]);
        begin_play(&mut state);
        place(&mut state, 0, Position::Track(2));

        state.play("AAAA", &play(105, -4, 0)).unwrap();
        assert_eq!(encoded(&state, 0), 62);
    }

    #[test]
    fn cards_only_play_their_printed_actions() {
        let mut state = started_game();
        rig_hand(
            &mut state,
            Seat::Red,
            &[Card::new(89, Face::Three, Suit::Clubs)],
        );
        begin_play(&mut state);
        place(&mut state, 0, Position::Track(10));

        assert_eq!(
            state.play("AAAA", &play(89, 4, 0)),
            Err(GameError::IllegalActionForCard {
                card: 89,
                action: CardAction::Move(4)
            })
        );
        assert_eq!(
            state.play("AAAA", &play(55, 3, 0)),
            Err(GameError::CardNotInHand(55))
        );
    }

    #[test]
    fn folding_out_of_turn_keeps_the_active_seat() {
        let mut state = started_game();
        begin_play(&mut state);

        state.fold("CCCC").unwrap();
        assert_eq!(state.active(), Seat::Red);
        assert!(state.players[2].hand.is_empty());
    }

    #[test]
    fn rounds_redeal_on_the_shrinking_cycle() {
        let mut state = started_game();
        for round in 1..=5u32 {
            assert_eq!(state.round_number(), round);
            assert_eq!(state.active().index(), ((round - 1) % 4) as usize);
            let expected = GameState::deal_count(round);
            for player in state.players() {
                assert_eq!(player.hand.len(), expected);
            }

            let picks: Vec<CardId> = (0..4)
                .map(|index| state.players[index].hand.cards()[0].id)
                .collect();
            for (index, uid) in UIDS.iter().enumerate() {
                state.swap_card(uid, picks[index]).unwrap();
            }
            for uid in UIDS {
                state.fold(uid).unwrap();
            }
        }
    }

    #[test]
    fn the_game_ends_when_both_team_hands_are_home() {
        let mut state = started_game();
        rig_hand(&mut state, Seat::Red, &[Card::new(72, Face::Five, Suit::Clubs)]);
        begin_play(&mut state);
        place(&mut state, 0, Position::Track(60));
        place(&mut state, 1, Position::Home(2));
        place(&mut state, 2, Position::Home(3));
        place(&mut state, 3, Position::Home(4));
        for (id, depth) in [(8, 1), (9, 2), (10, 3), (11, 4)] {
            place(&mut state, id, Position::Home(depth));
        }

        let public = state.play("AAAA", &play(72, 5, 0)).unwrap();
        assert_eq!(public.game_state, "finished");
        assert_eq!(public.winner, Some(Team::RedGreen));
        assert_eq!(public.round_state, None);

        assert_eq!(
            state.fold("BBBB"),
            Err(GameError::WrongPhase {
                required: "the play phase"
            })
        );
    }
}
