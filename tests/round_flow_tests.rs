//! End-to-end round flow through the `Game` controller.
//!
//! Dice are scripted so every hand and every tie-break draw is known up front.

use midnight_engine::{
    EngineError, EventType, Game, GameConfig, PlayerId, RoundResult, ScriptedRng,
};
use pretty_assertions::assert_eq;

fn scripted(hands: &[[u8; 6]], draws: &[u32]) -> ScriptedRng {
    let mut values: Vec<u32> = hands.iter().flatten().map(|&f| f as u32).collect();
    values.extend_from_slice(draws);
    ScriptedRng::new(values)
}

fn three_player_game(rng: ScriptedRng) -> Game<ScriptedRng> {
    Game::with_rng(&GameConfig::with_players(3, 5), rng).unwrap()
}

/// One roll, then all six dice taken from the back so slots never shift.
fn play_hand(game: &mut Game<ScriptedRng>) {
    let id = game.state().active_player_id();
    game.request_roll().unwrap();
    for slot in (0..6).rev() {
        game.take_die(slot, id).unwrap();
    }
}

#[test]
fn start_round_antes_every_player() {
    let mut game = three_player_game(ScriptedRng::default());
    game.start_round().unwrap();

    let snap = game.snapshot();
    assert!(snap.round_in_progress);
    assert_eq!(snap.pot, 15);
    assert!(snap.players.iter().all(|p| p.profit == -5));
    assert_eq!(game.events().last().map(|e| e.ty), Some(EventType::RoundStart));
}

#[test]
fn second_start_is_rejected_without_changes() {
    let mut game = three_player_game(ScriptedRng::default());
    game.start_round().unwrap();
    let before = game.snapshot();

    let err = game.start_round().unwrap_err();
    assert!(matches!(err, EngineError::RoundAlreadyInProgress));
    assert_eq!(game.snapshot(), before);
}

#[test]
fn rolling_is_gated() {
    let mut game = three_player_game(ScriptedRng::faces(&[1, 2, 3, 4, 5, 6]));
    assert!(matches!(game.request_roll(), Err(EngineError::RoundNotStarted)));

    game.start_round().unwrap();
    game.request_roll().unwrap();
    let rolled = game.snapshot();
    assert!(!rolled.roll_available);
    assert!(matches!(game.request_roll(), Err(EngineError::RollNotAvailable)));
    assert_eq!(game.snapshot(), rolled);

    game.take_die(0, PlayerId(1)).unwrap();
    assert!(game.state().roll_available);
}

#[test]
fn roll_refreshes_only_remaining_dice() {
    let mut game = three_player_game(ScriptedRng::faces(&[1, 2, 3, 4, 5, 6, 6, 6, 6, 6, 6]));
    game.start_round().unwrap();
    game.request_roll().unwrap();
    assert_eq!(game.state().current_roll.len(), 6);
    assert!(game.state().current_roll.iter().all(|f| matches!(f, Some(1..=6))));

    game.take_die(3, PlayerId(1)).unwrap();
    assert_eq!(game.state().current_roll, vec![Some(1), Some(2), Some(3), Some(5), Some(6)]);
    assert_eq!(game.state().players[0].selections, vec![4]);

    game.request_roll().unwrap();
    assert_eq!(game.state().current_roll, vec![Some(6); 5]);
}

#[test]
fn taken_slot_cannot_be_taken_again() {
    let mut game = three_player_game(ScriptedRng::faces(&[2, 2, 2, 2, 2, 5]));
    game.start_round().unwrap();

    // nothing rolled yet: every slot is empty
    assert!(matches!(game.take_die(0, PlayerId(1)), Err(EngineError::InvalidSelection { slot: 0 })));

    game.request_roll().unwrap();
    game.take_die(5, PlayerId(1)).unwrap();
    let before = game.snapshot();
    assert!(matches!(game.take_die(5, PlayerId(1)), Err(EngineError::InvalidSelection { slot: 5 })));
    assert_eq!(game.snapshot(), before);
}

#[test]
fn only_the_active_player_may_take() {
    let mut game = three_player_game(ScriptedRng::faces(&[3; 6]));
    game.start_round().unwrap();
    game.request_roll().unwrap();
    assert!(matches!(game.take_die(0, PlayerId(2)), Err(EngineError::NotPlayersTurn(PlayerId(2)))));
    assert!(matches!(game.take_die(0, PlayerId(9)), Err(EngineError::UnknownPlayer(PlayerId(9)))));
    assert!(game.state().player(PlayerId(9)).is_none());
    assert_eq!(game.state().player(PlayerId(1)).map(|p| p.selections.len()), Some(0));
}

#[test]
fn finished_turn_scores_and_passes_play() {
    let mut game = three_player_game(scripted(&[[1, 4, 6, 6, 6, 6]], &[]));
    game.start_round().unwrap();
    play_hand(&mut game);

    let s = game.state();
    let p1 = &s.players[0];
    assert!(p1.played_turn());
    assert_eq!(p1.qualified(), Some(true));
    assert_eq!(p1.score_total(), Some(24));
    assert_eq!(p1.selections.len(), 6);
    assert_eq!(s.active_player_id(), PlayerId(2));
    assert_eq!(s.current_roll, vec![None; 6]);
    assert!(s.roll_available);
    assert!(s.round_in_progress);
    assert_eq!(s.players[1].score_total(), None);
}

#[test]
fn last_seat_wraps_to_first_mid_round() {
    let mut cfg = GameConfig::with_players(3, 1);
    cfg.starting_player = Some(PlayerId(3));
    let mut game = Game::with_rng(&cfg, scripted(&[[2, 2, 2, 2, 2, 2]], &[])).unwrap();
    game.start_round().unwrap();
    play_hand(&mut game);

    assert!(game.state().round_in_progress);
    assert_eq!(game.state().active_player_id(), PlayerId(1));
}

#[test]
fn sole_winner_collects_pot() {
    // scores 12, 7, 0
    let hands = [[1, 4, 3, 3, 3, 3], [1, 4, 2, 2, 2, 1], [2, 2, 2, 2, 2, 2]];
    let mut game = three_player_game(scripted(&hands, &[]));
    game.start_round().unwrap();
    for _ in 0..3 {
        play_hand(&mut game);
    }

    let s = game.state();
    assert!(!s.round_in_progress);
    assert_eq!(s.pot, 0);
    assert_eq!(s.active_player_id(), PlayerId(1));
    let profits: Vec<i64> = s.players.iter().map(|p| p.profit).collect();
    assert_eq!(profits, vec![10, -5, -5]);
    assert!(s.players.iter().all(|p| p.selections.is_empty() && !p.played_turn()));

    let summary = s.last_round.clone().unwrap();
    assert_eq!(summary.round, 1);
    assert_eq!(summary.result, RoundResult::Winner { player_id: PlayerId(1), payout: 15 });
    let scores: Vec<u32> = summary.standings.iter().map(|st| st.score_total).collect();
    assert_eq!(scores, vec![12, 7, 0]);
    assert_eq!(game.events().last().map(|e| e.ty), Some(EventType::RoundEnd));
}

#[test]
fn tie_carries_pot_and_random_seat_starts() {
    // scores 10, 10, 7; the draw of 3 hands the start to a seat outside the tie
    let hands = [[1, 4, 2, 2, 3, 3], [1, 4, 2, 2, 3, 3], [1, 4, 2, 2, 2, 1]];
    let mut game = three_player_game(scripted(&hands, &[3]));
    game.start_round().unwrap();
    for _ in 0..3 {
        play_hand(&mut game);
    }

    let s = game.state();
    assert!(!s.round_in_progress);
    assert_eq!(s.pot, 15);
    assert_eq!(s.active_player_id(), PlayerId(3));
    assert!(s.players.iter().all(|p| p.profit == -5 && p.selections.is_empty()));
    assert_eq!(
        s.last_round.as_ref().map(|r| r.result.clone()),
        Some(RoundResult::Tie { player_ids: vec![PlayerId(1), PlayerId(2)], carried_pot: 15 })
    );

    // carried pot grows with the next ante
    game.start_round().unwrap();
    assert_eq!(game.state().pot, 30);
}

#[test]
fn snapshot_serializes_camel_case() {
    let mut game = three_player_game(ScriptedRng::faces(&[5; 6]));
    game.start_round().unwrap();
    game.request_roll().unwrap();

    let v = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(v["activePlayerId"], 1);
    assert_eq!(v["rollAvailable"], false);
    assert_eq!(v["roundInProgress"], true);
    assert_eq!(v["currentRoll"].as_array().map(|a| a.len()), Some(6));
    assert_eq!(v["players"][0]["profit"], -5);
}

#[test]
fn event_sequence_is_monotonic() {
    let mut game = three_player_game(scripted(&[[1, 4, 6, 6, 6, 6]], &[]));
    game.start_round().unwrap();
    play_hand(&mut game);

    let seqs: Vec<u64> = game.events().iter().map(|e| e.seq).collect();
    let expected: Vec<u64> = (1..=seqs.len() as u64).collect();
    assert_eq!(seqs, expected);
    let kinds: Vec<EventType> = game.events().iter().map(|e| e.ty).collect();
    assert_eq!(kinds.first(), Some(&EventType::RoundStart));
    assert_eq!(kinds.iter().filter(|k| **k == EventType::Take).count(), 6);
    assert_eq!(kinds.last(), Some(&EventType::EndTurn));
}

#[test]
fn end_turn_names_next_player_only_mid_round() {
    // scores 0, 12, 7: seat 2 wins while seat 3 plays last
    let hands = [[2, 2, 2, 2, 2, 2], [1, 4, 3, 3, 3, 3], [1, 4, 2, 2, 2, 1]];
    let mut game = three_player_game(scripted(&hands, &[]));
    game.start_round().unwrap();
    for _ in 0..3 {
        play_hand(&mut game);
    }

    let ends: Vec<&serde_json::Value> = game.events().iter()
        .filter(|e| e.ty == EventType::EndTurn)
        .map(|e| &e.payload)
        .collect();
    assert_eq!(ends.len(), 3);
    assert_eq!(ends[0]["nextPlayer"], 2);
    assert_eq!(ends[0]["roundOver"], false);
    assert_eq!(ends[1]["nextPlayer"], 3);
    assert!(ends[2]["nextPlayer"].is_null());
    assert_eq!(ends[2]["roundOver"], true);

    let round_end = game.events().last().unwrap();
    assert_eq!(round_end.ty, EventType::RoundEnd);
    assert_eq!(game.state().active_player_id(), PlayerId(2));
    assert_eq!(round_end.payload["nextPlayer"], 2);
}

#[test]
fn pot_is_capped_at_payable_profit() {
    let mut state = midnight_engine::init_game(&GameConfig::with_players(3, 1)).unwrap();
    state.pot = i64::MAX as u64 - 1;
    let err = midnight_engine::start_round(&state, 1).unwrap_err();
    assert!(matches!(err, EngineError::PotOverflow));

    state.pot = i64::MAX as u64 - 3;
    let t = midnight_engine::start_round(&state, 1).unwrap();
    assert_eq!(t.state.pot, i64::MAX as u64);
}
