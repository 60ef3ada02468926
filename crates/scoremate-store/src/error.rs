use scoremate_types::MatchId;

/// Errors from store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("match already exists: {0}")]
    DuplicateMatch(MatchId),

    /// The scoreboard changed since the writer read it.
    #[error("version conflict for {match_id}: expected {expected}, found {found}")]
    VersionConflict {
        match_id: MatchId,
        expected: u64,
        found: u64,
    },

    #[error("ball log integrity violation at seq {seq}: {reason}")]
    IntegrityViolation { seq: u64, reason: String },

    #[error("invalid sequence range: from={from}, to={to}")]
    InvalidRange { from: u64, to: u64 },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("{0} lock poisoned")]
    LockPoisoned(&'static str),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
