use scoremate_types::MatchId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("scoreboard not initialized for match {0}; set the opening players first")]
    ScoreboardNotInitialized(MatchId),

    #[error("match {0} is not active")]
    MatchNotActive(MatchId),

    #[error("invalid match: {0}")]
    InvalidMatch(String),

    #[error("invalid ball: {0}")]
    InvalidBall(String),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("store error: {0}")]
    Store(#[from] scoremate_store::StoreError),

    #[error("scoring error: {0}")]
    Scoring(#[from] scoremate_scoring::ScoringError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type SdkResult<T> = Result<T, SdkError>;
