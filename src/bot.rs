use serde::{Deserialize, Serialize};

use crate::{model::State, rng::RandomSource, rules::DICE_PER_TURN};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BotLevel { Amateur, Pro }

/// Slots to take from the current roll, highest index first so that
/// taking them one after another never shifts a pending slot.
pub fn suggest_takes<R: RandomSource + ?Sized>(state: &State, level: BotLevel, rng: &mut R) -> Vec<usize> {
    let faces: Vec<(usize, u8)> = state.current_roll.iter().enumerate()
        .filter_map(|(i, f)| f.map(|v| (i, v)))
        .collect();
    if faces.is_empty() { return vec![]; }

    let held = &state.active_player().selections;
    let mut room = DICE_PER_TURN.saturating_sub(held.len());
    let mut picks: Vec<usize> = Vec::new();
    let mut missing = 0usize;
    for q in [1u8, 4] {
        if held.contains(&q) { continue; }
        match faces.iter().find(|(_, f)| *f == q) {
            Some(&(i, _)) if room > 0 => { picks.push(i); room -= 1; }
            _ => missing += 1,
        }
    }

    if level == BotLevel::Pro {
        for &(i, f) in &faces {
            if f == 6 && room > missing && !picks.contains(&i) { picks.push(i); room -= 1; }
        }
    }

    if picks.is_empty() {
        let pick = match level {
            BotLevel::Pro => faces.iter().max_by_key(|(i, f)| (*f, std::cmp::Reverse(*i))).map(|&(i, _)| i),
            BotLevel::Amateur => {
                let k = rng.next_in_range(1, faces.len() as u32) as usize;
                faces.get(k.saturating_sub(1)).map(|&(i, _)| i)
            }
        };
        picks.extend(pick);
    }
    picks.sort_unstable_by(|a, b| b.cmp(a));
    picks
}
