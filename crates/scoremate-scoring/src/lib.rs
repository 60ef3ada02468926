//! Scoring state machine for ScoreMate.
//!
//! This crate is the heart of ScoreMate. It provides:
//! - [`Scoreboard`], a single player arena with striker, non-striker and
//!   bowler held as indices into it
//! - [`ScoreboardInitializer`] deriving the opening scoreboard from match
//!   metadata
//! - [`BallProcessor`] mapping (scoreboard, ball) to the next scoreboard plus
//!   any [`ScoringWarning`]s
//! - Deterministic replay of a ball log ([`ReplayEngine`])
//! - Invariant checking ([`ScoreboardValidator`]) and read-only projections
//!
//! Everything here is pure and synchronous. Callers serialize updates per
//! match; see the SDK crate for the store-backed flow.

pub mod document;
pub mod error;
pub mod initializer;
pub mod processor;
pub mod projection;
pub mod replay;
pub mod rules;
pub mod scoreboard;
pub mod validation;
pub mod warning;

pub use document::ScoreboardDocument;
pub use error::ScoringError;
pub use initializer::ScoreboardInitializer;
pub use processor::{BallOutcome, BallProcessor};
pub use projection::InningsSummary;
pub use replay::{ReplayEngine, ReplayResult, Replayable};
pub use rules::ScoringRules;
pub use scoreboard::{Scoreboard, Slot};
pub use validation::{ScoreboardValidator, ValidationReport, Violation, ViolationKind};
pub use warning::ScoringWarning;
