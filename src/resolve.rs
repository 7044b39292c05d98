//! Turn and round resolution.
//!
//! A turn ends on the sixth take: the hand is scored and play moves to the
//! next seat. When every seat has played, the round is settled. A sole top
//! score takes the whole pot and starts the next round; a shared top score
//! (including nobody qualifying) carries the pot over and a random seat starts.

use log::{debug, info};
use serde_json::json;

use crate::model::{Event, EventType, PlayerId, RoundResult, RoundSummary, Standing, State};
use crate::rng::RandomSource;
use crate::rules;
use crate::emit;

pub fn complete_turn<R: RandomSource + ?Sized>(state: &mut State, rng: &mut R) -> Vec<Event> {
    let seat = state.active_idx;
    let outcome = rules::evaluate(&state.players[seat].selections);
    state.players[seat].outcome = Some(outcome);
    let player_id = state.players[seat].id;
    debug!("player {player_id} finished: qualified={} score={}", outcome.qualified, outcome.score_total);

    state.active_idx = (seat + 1) % state.players.len();
    state.current_roll = State::empty_roll();
    state.roll_available = true;

    // the starter of the next round is only known once the round settles,
    // and the RoundEnd event that follows names it
    let round_over = state.all_played();
    let next_player = if round_over { None } else { Some(state.active_player_id()) };
    let payload = json!({
        "playerId": player_id,
        "selections": state.players[seat].selections,
        "qualified": outcome.qualified,
        "total": outcome.score_total,
        "roundOver": round_over,
        "nextPlayer": next_player,
    });
    let mut events = vec![emit(state, EventType::EndTurn, payload)];

    if round_over {
        events.push(resolve_round(state, rng));
        state.round_in_progress = false;
    }
    events
}

/// Score-ordered standings with shared ranks for equal scores.
/// Players who have not played are left out.
pub fn rank_players(state: &State) -> Vec<Standing> {
    let mut scored: Vec<(PlayerId, bool, u32)> = state.players.iter()
        .filter_map(|p| p.outcome.map(|o| (p.id, o.qualified, o.score_total)))
        .collect();
    // stable: equal scores keep seat order
    scored.sort_by(|a, b| b.2.cmp(&a.2));

    let mut standings = Vec::with_capacity(scored.len());
    let mut rank = 0;
    for (i, &(player_id, qualified, score_total)) in scored.iter().enumerate() {
        if i == 0 || scored[i - 1].2 != score_total {
            rank = i + 1;
        }
        standings.push(Standing { player_id, rank, qualified, score_total });
    }
    standings
}

/// Settles a round in which every player has played.
pub fn resolve_round<R: RandomSource + ?Sized>(state: &mut State, rng: &mut R) -> Event {
    let standings = rank_players(state);
    let winners: Vec<PlayerId> = standings.iter().filter(|s| s.rank == 1).map(|s| s.player_id).collect();

    let result = if winners.len() == 1 {
        let winner = winners[0];
        let payout = state.pot;
        // winners come out of rank_players, so the seat exists
        let seat = state.seat_of(winner).unwrap_or(state.active_idx);
        let credit = i64::try_from(payout).unwrap_or(i64::MAX);
        state.players[seat].profit = state.players[seat].profit.saturating_add(credit);
        state.pot = 0;
        state.active_idx = seat;
        info!("round {} won by player {winner}, paid {payout}", state.rounds_played + 1);
        RoundResult::Winner { player_id: winner, payout }
    } else {
        let n = state.players.len() as u32;
        let draw = rng.next_in_range(1, n);
        state.active_idx = (draw.clamp(1, n) - 1) as usize;
        info!(
            "round {} tied between {:?}, pot of {} carries over, player {} starts",
            state.rounds_played + 1, winners, state.pot, state.active_player_id(),
        );
        RoundResult::Tie { player_ids: winners, carried_pot: state.pot }
    };

    for p in &mut state.players {
        p.reset_for_round();
    }
    state.rounds_played += 1;
    state.last_round = Some(RoundSummary { round: state.rounds_played, standings, result });

    let payload = json!({ "summary": state.last_round, "nextPlayer": state.active_player_id() });
    emit(state, EventType::RoundEnd, payload)
}
