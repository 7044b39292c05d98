use serde::{Deserialize, Serialize};

use crate::rules::DICE_PER_TURN;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One slot of the roll in front of the active player. `None` is an empty slot.
pub type DieSlot = Option<u8>;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventType {
    RoundStart,
    Roll,
    Take,
    EndTurn,
    RoundEnd,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub seq: u64,
    pub ty: EventType,
    pub payload: serde_json::Value,
    pub state_hash: String,
}

/// Result of a finished turn.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutcome {
    pub qualified: bool,
    pub score_total: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub display: String,
    pub selections: Vec<u8>, // take order
    pub outcome: Option<TurnOutcome>,
    pub profit: i64,
}

impl Player {
    pub fn new(id: PlayerId, display: impl Into<String>) -> Self {
        Self { id, display: display.into(), selections: Vec::with_capacity(DICE_PER_TURN), outcome: None, profit: 0 }
    }

    /// True once the player has taken all six dice this round.
    pub fn played_turn(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn qualified(&self) -> Option<bool> {
        self.outcome.map(|o| o.qualified)
    }

    pub fn score_total(&self) -> Option<u32> {
        self.outcome.map(|o| o.score_total)
    }

    pub(crate) fn reset_for_round(&mut self) {
        self.selections.clear();
        self.outcome = None;
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub player_id: PlayerId,
    pub rank: usize,
    pub qualified: bool,
    pub score_total: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RoundResult {
    #[serde(rename_all = "camelCase")]
    Winner { player_id: PlayerId, payout: u64 },
    #[serde(rename_all = "camelCase")]
    Tie { player_ids: Vec<PlayerId>, carried_pot: u64 },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub round: u32,
    pub standings: Vec<Standing>,
    pub result: RoundResult,
}

/// The whole game aggregate: round state plus the seated players.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub players: Vec<Player>,
    pub active_idx: usize,
    pub current_roll: Vec<DieSlot>,
    pub roll_available: bool,
    pub round_in_progress: bool,
    pub pot: u64,
    pub rounds_played: u32,
    pub last_round: Option<RoundSummary>,
    pub events_seq: u64,
}

impl State {
    pub fn empty_roll() -> Vec<DieSlot> {
        vec![None; DICE_PER_TURN]
    }

    pub fn active_player(&self) -> &Player {
        &self.players[self.active_idx]
    }

    pub fn active_player_id(&self) -> PlayerId {
        self.active_player().id
    }

    pub fn seat_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn all_played(&self) -> bool {
        self.players.iter().all(Player::played_turn)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_roll: self.current_roll.clone(),
            roll_available: self.roll_available,
            round_in_progress: self.round_in_progress,
            active_player_id: self.active_player_id(),
            pot: self.pot,
            players: self.players.clone(),
        }
    }
}

/// What a presentation layer reads after every action.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub current_roll: Vec<DieSlot>,
    pub roll_available: bool,
    pub round_in_progress: bool,
    pub active_player_id: PlayerId,
    pub pot: u64,
    pub players: Vec<Player>,
}
