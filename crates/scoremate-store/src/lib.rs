//! Storage for ScoreMate.
//!
//! Three boundaries, each a trait with an in-memory backend:
//!
//! - [`MatchStore`] -- match metadata keyed by [`MatchId`](scoremate_types::MatchId)
//! - [`ScoreboardStore`] -- the latest scoreboard per match, versioned so a
//!   writer holding a stale snapshot is refused
//! - [`BallLog`] -- append-only, hash-chained record of every ball and
//!   roster change accepted
//!
//! # Design Rules
//!
//! 1. Log records are immutable once appended.
//! 2. Each record links to its predecessor by BLAKE3 hash; `seq` is 1-based
//!    and gapless per match.
//! 3. Scoreboard writes name the version they were computed from.
//! 4. Lock poisoning surfaces as [`StoreError::LockPoisoned`], never a panic.

pub mod error;
pub mod memory;
pub mod record;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryBallLog, InMemoryMatchStore, InMemoryScoreboardStore};
pub use record::{BallPosition, BallRecord};
pub use traits::{verify_records, BallLog, MatchStore, ScoreboardStore, Versioned};
