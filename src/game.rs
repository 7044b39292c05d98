//! Controller that owns one game.
//!
//! Every action runs a pure transition from the crate root against the
//! current aggregate and commits the result only if it succeeded, so a
//! rejected action leaves the game exactly as it was.

use log::{info, warn};

use crate::bot::{suggest_takes, BotLevel};
use crate::config::GameConfig;
use crate::error::EngineError;
use crate::model::{Event, EventType, PlayerId, Snapshot, State};
use crate::rng::{RandomSource, SeededRng};
use crate::Transition;

pub struct Game<R: RandomSource = SeededRng> {
    state: State,
    rng: R,
    stake_amount: u32,
    events: Vec<Event>,
}

impl Game<SeededRng> {
    /// Seeds from `config.seed`, or from entropy when none is set.
    pub fn new(config: &GameConfig) -> Result<Self, EngineError> {
        let rng = match config.seed {
            Some(seed) => SeededRng::from_seed(seed),
            None => SeededRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: RandomSource> Game<R> {
    pub fn with_rng(config: &GameConfig, rng: R) -> Result<Self, EngineError> {
        let state = crate::init_game(config)?;
        Ok(Self { state, rng, stake_amount: config.stake_amount, events: Vec::new() })
    }

    pub fn state(&self) -> &State { &self.state }

    pub fn snapshot(&self) -> Snapshot { self.state.snapshot() }

    pub fn events(&self) -> &[Event] { &self.events }

    pub fn stake_amount(&self) -> u32 { self.stake_amount }

    fn commit(&mut self, result: Result<Transition, EngineError>) -> Result<&[Event], EngineError> {
        match result {
            Ok(t) => {
                let from = self.events.len();
                self.state = t.state;
                self.events.extend(t.events);
                Ok(&self.events[from..])
            }
            Err(e) => {
                warn!("rejected: {e}");
                Err(e)
            }
        }
    }

    pub fn start_round(&mut self) -> Result<&[Event], EngineError> {
        let t = crate::start_round(&self.state, self.stake_amount);
        if t.is_ok() {
            info!("round {} starts, player {} first", self.state.rounds_played + 1, self.state.active_player_id());
        }
        self.commit(t)
    }

    pub fn request_roll(&mut self) -> Result<&[Event], EngineError> {
        let t = crate::roll(&self.state, &mut self.rng);
        self.commit(t)
    }

    pub fn take_die(&mut self, slot: usize, player_id: PlayerId) -> Result<&[Event], EngineError> {
        let t = crate::take_die(&self.state, slot, player_id, &mut self.rng);
        self.commit(t)
    }

    /// Plays the active player's whole turn with the autoplay policy.
    /// The turn runs on a working copy and is committed in one piece, so a
    /// failure part way leaves the game as it was (dice already drawn from
    /// the random source stay drawn). Returns the events of that turn, and of
    /// the round end if it ended.
    pub fn play_bot_turn(&mut self, level: BotLevel) -> Result<Vec<Event>, EngineError> {
        let result = self.bot_turn(level);
        self.commit(result).map(<[Event]>::to_vec)
    }

    fn bot_turn(&mut self, level: BotLevel) -> Result<Transition, EngineError> {
        if !self.state.round_in_progress {
            return Err(EngineError::RoundNotStarted);
        }
        let player_id = self.state.active_player_id();
        let mut work = Transition { state: self.state.clone(), events: Vec::new() };
        loop {
            if work.state.roll_available {
                let t = crate::roll(&work.state, &mut self.rng)?;
                work.state = t.state;
                work.events.extend(t.events);
            }
            let picks = suggest_takes(&work.state, level, &mut self.rng);
            if picks.is_empty() {
                // nothing on the table and no roll allowed
                return Err(EngineError::RollNotAvailable);
            }
            for slot in picks {
                let t = crate::take_die(&work.state, slot, player_id, &mut self.rng)?;
                work.state = t.state;
                work.events.extend(t.events);
            }
            if work.events.iter().any(|e| e.ty == EventType::EndTurn) {
                return Ok(work);
            }
        }
    }
}
