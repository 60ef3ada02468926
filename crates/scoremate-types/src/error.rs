use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid match id: {0}")]
    InvalidMatchId(String),

    #[error("unknown ball type: {0}")]
    UnknownBallType(String),

    #[error("unknown wicket type: {0}")]
    UnknownWicketType(String),
}
