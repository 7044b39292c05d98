pub mod bot;
pub mod config;
pub mod error;
pub mod game;
pub mod model;
pub mod resolve;
pub mod rng;
pub mod rules;

pub use config::GameConfig;
pub use error::EngineError;
pub use game::Game;
pub use model::*;
pub use rng::{RandomSource, ScriptedRng, SeededRng};

use log::debug;
use serde_json::json;

/// Next aggregate plus the events that produced it.
#[derive(Clone, Debug)]
pub struct Transition {
    pub state: State,
    pub events: Vec<Event>,
}

fn state_digest(s: &State) -> String {
    let taken: usize = s.players.iter().map(|p| p.selections.len()).sum();
    format!("h:{}:{}:{}:{}:{}", s.events_seq, s.active_idx, s.pot, s.current_roll.len(), taken)
}

pub(crate) fn emit(state: &mut State, ty: EventType, payload: serde_json::Value) -> Event {
    state.events_seq += 1;
    Event { seq: state.events_seq, ty, payload, state_hash: state_digest(state) }
}

pub fn init_game(config: &GameConfig) -> Result<State, EngineError> {
    config.validate()?;
    let players: Vec<Player> = config.players.iter().map(|s| Player::new(s.id, s.display.clone())).collect();
    let active_idx = match config.starting_player {
        Some(id) => players.iter().position(|p| p.id == id).ok_or(EngineError::UnknownPlayer(id))?,
        None => 0,
    };
    Ok(State {
        players, active_idx, current_roll: State::empty_roll(), roll_available: true,
        round_in_progress: false, pot: 0, rounds_played: 0, last_round: None, events_seq: 0,
    })
}

/// Antes every player into the pot and opens a round.
pub fn start_round(state: &State, stake: u32) -> Result<Transition, EngineError> {
    if state.round_in_progress {
        return Err(EngineError::RoundAlreadyInProgress);
    }
    let ante_total = u64::from(stake).checked_mul(state.players.len() as u64).ok_or(EngineError::PotOverflow)?;
    // profits are i64, so a pot above i64::MAX could never be paid out
    let pot = state.pot.checked_add(ante_total)
        .filter(|&p| p <= i64::MAX as u64)
        .ok_or(EngineError::PotOverflow)?;

    let mut next = state.clone();
    for p in &mut next.players {
        p.profit -= i64::from(stake);
        p.reset_for_round();
    }
    next.pot = pot;
    next.round_in_progress = true;
    next.roll_available = true;
    next.current_roll = State::empty_roll();
    let payload = json!({ "stake": stake, "pot": next.pot, "startingPlayer": next.active_player_id() });
    let ev = emit(&mut next, EventType::RoundStart, payload);
    Ok(Transition { state: next, events: vec![ev] })
}

/// Full reroll of every remaining slot.
pub fn roll<R: RandomSource + ?Sized>(state: &State, rng: &mut R) -> Result<Transition, EngineError> {
    if !state.round_in_progress {
        return Err(EngineError::RoundNotStarted);
    }
    if !state.roll_available {
        return Err(EngineError::RollNotAvailable);
    }
    let mut next = state.clone();
    for slot in next.current_roll.iter_mut() {
        *slot = Some(rng.roll_die());
    }
    next.roll_available = false;
    debug!("player {} rolled {:?}", next.active_player_id(), next.current_roll);
    let faces: Vec<u8> = next.current_roll.iter().flatten().copied().collect();
    let payload = json!({ "playerId": next.active_player_id(), "faces": faces });
    let ev = emit(&mut next, EventType::Roll, payload);
    Ok(Transition { state: next, events: vec![ev] })
}

/// Moves the die at `slot` into the player's selections. Finishing the sixth
/// take resolves the turn, and the round if everyone has now played.
pub fn take_die<R: RandomSource + ?Sized>(
    state: &State,
    slot: usize,
    player_id: PlayerId,
    rng: &mut R,
) -> Result<Transition, EngineError> {
    let seat = state.seat_of(player_id).ok_or(EngineError::UnknownPlayer(player_id))?;
    if seat != state.active_idx {
        return Err(EngineError::NotPlayersTurn(player_id));
    }
    let value = match state.current_roll.get(slot) {
        Some(Some(v)) => *v,
        _ => return Err(EngineError::InvalidSelection { slot }),
    };

    let mut next = state.clone();
    next.current_roll.remove(slot);
    let player = &mut next.players[seat];
    player.selections.push(value);
    let taken = player.selections.len();
    next.roll_available = true;
    debug!("player {player_id} took {value} from slot {slot} ({taken}/{})", rules::DICE_PER_TURN);

    let mut events = vec![emit(&mut next, EventType::Take, json!({ "playerId": player_id, "slot": slot, "value": value }))];
    if taken >= rules::DICE_PER_TURN {
        events.extend(resolve::complete_turn(&mut next, rng));
    }
    Ok(Transition { state: next, events })
}
