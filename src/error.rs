use thiserror::Error;

use crate::model::PlayerId;

/// Rejections from the rules engine. None of them leave the state modified.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("rolling is not allowed until a die is taken")]
    RollNotAvailable,

    #[error("the round has not begun yet")]
    RoundNotStarted,

    #[error("slot {slot} holds no die to take")]
    InvalidSelection { slot: usize },

    #[error("round is already in progress")]
    RoundAlreadyInProgress,

    #[error("it is not player {0}'s turn")]
    NotPlayersTurn(PlayerId),

    #[error("player {0} is not seated in this game")]
    UnknownPlayer(PlayerId),

    #[error("pot would overflow")]
    PotOverflow,

    #[error("invalid game config: {0}")]
    InvalidConfig(String),

    #[error("cannot parse game config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("cannot read game config: {0}")]
    ConfigIo(#[from] std::io::Error),
}
