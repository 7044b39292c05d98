use crate::model::TurnOutcome;

pub const DICE_PER_TURN: usize = 6;
pub const FACE_MIN: u8 = 1;
pub const FACE_MAX: u8 = 6;
/// The qualifying 1 and 4 count for nothing: their face total is taken back off.
pub const QUALIFIER_DEDUCTION: u32 = 5;

#[inline]
pub fn is_face(v: u8) -> bool {
    (FACE_MIN..=FACE_MAX).contains(&v)
}

/// A hand qualifies when it holds at least one 1 and at least one 4.
pub fn qualifies(selections: &[u8]) -> bool {
    selections.contains(&1) && selections.contains(&4)
}

/// Raw score of a hand. Does not check qualification.
pub fn score(selections: &[u8]) -> u32 {
    let sum: u32 = selections.iter().map(|&f| f as u32).sum();
    sum.saturating_sub(QUALIFIER_DEDUCTION)
}

pub fn evaluate(selections: &[u8]) -> TurnOutcome {
    let qualified = qualifies(selections);
    TurnOutcome { qualified, score_total: if qualified { score(selections) } else { 0 } }
}
