use crate::warning::ScoringWarning;

/// Errors produced by the scoring core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("opening {0} is missing")]
    MissingOpeningPlayer(&'static str),

    #[error("cannot resolve {0} team name from match metadata")]
    UnresolvedTeam(&'static str),

    #[error("striker and non-striker are both {0}")]
    DuplicateOpeningBatsman(String),

    #[error("rejected under strict actor rules: {0}")]
    StrictActor(ScoringWarning),

    #[error("no vacant batting slot for {0}")]
    NoVacancy(String),

    #[error("batsman {0} is already out")]
    AlreadyOut(String),

    #[error("batsman {0} is already at the crease")]
    AlreadyBatting(String),

    #[error("cannot change bowler to {name} mid-over ({balls} balls bowled)")]
    MidOverBowlerChange { name: String, balls: u32 },

    #[error("malformed scoreboard document: {0}")]
    MalformedDocument(String),

    #[error("configuration error: {0}")]
    Config(String),
}
