use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::PlayerId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatConfig {
    pub id: PlayerId,
    #[serde(default)]
    pub display: String,
}

/// Game setup, usually read from JSON:
///
/// ```json
/// { "stakeAmount": 5, "players": [{ "id": 1, "display": "Ann" }, { "id": 2 }], "startingPlayer": 2 }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    #[serde(default = "default_stake")]
    pub stake_amount: u32,
    pub players: Vec<SeatConfig>,
    #[serde(default)]
    pub starting_player: Option<PlayerId>,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_stake() -> u32 {
    1
}

impl GameConfig {
    /// Seats `count` players with ids `1..=count`.
    pub fn with_players(count: u32, stake_amount: u32) -> Self {
        let players = (1..=count)
            .map(|i| SeatConfig { id: PlayerId(i), display: format!("Player {i}") })
            .collect();
        Self { stake_amount, players, starting_player: None, seed: None }
    }

    pub fn from_json_str(s: &str) -> Result<Self, EngineError> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.players.len() < 2 {
            return Err(EngineError::InvalidConfig("at least two players are required".into()));
        }
        if self.stake_amount == 0 {
            return Err(EngineError::InvalidConfig("stake amount must be positive".into()));
        }
        let mut seen = HashSet::with_capacity(self.players.len());
        for seat in &self.players {
            if seat.id.0 == 0 {
                return Err(EngineError::InvalidConfig("player ids must be positive".into()));
            }
            if !seen.insert(seat.id) {
                return Err(EngineError::InvalidConfig(format!("duplicate player id {}", seat.id)));
            }
        }
        if let Some(start) = self.starting_player {
            if !seen.contains(&start) {
                return Err(EngineError::InvalidConfig(format!("starting player {start} is not seated")));
            }
        }
        Ok(())
    }
}
