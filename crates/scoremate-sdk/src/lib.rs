//! High-level SDK for ScoreMate.
//!
//! [`MatchScorer`] ties the scoring core to the stores: it creates matches,
//! derives the opening scoreboard, and records balls and roster changes one
//! at a time under a per-match lock, appending each to the hash-chained log.
//! This is the main entry point for applications embedding ScoreMate.

pub mod error;
pub mod intake;
pub mod new_match;
pub mod scorer;

pub use error::{SdkError, SdkResult};
pub use new_match::NewMatch;
pub use scorer::{BallReceipt, InMemoryScorer, MatchAudit, MatchScorer};

// Re-export key types
pub use scoremate_scoring::{InningsSummary, Scoreboard, ScoringRules, ScoringWarning};
pub use scoremate_store::{BallRecord, StoreError};
pub use scoremate_types::{
    BallEvent, BallType, LogEntry, MatchId, MatchInfo, OpeningPlayers, RosterChange, WicketType,
};
