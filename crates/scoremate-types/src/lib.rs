//! Foundation types for ScoreMate.
//!
//! This crate provides the identity, event, and statistics types shared by
//! every other ScoreMate crate. It holds no scoring logic beyond the small
//! per-player stat helpers and overs arithmetic the scoring core builds on.
//!
//! # Key Types
//!
//! - [`MatchId`] -- UUID v7 match identifier
//! - [`BallEvent`] -- one recorded delivery, immutable once logged
//! - [`LogEntry`] -- a ball or a [`RosterChange`] as held in the ball log
//! - [`BatsmanStats`] / [`BowlerStats`] -- per-player innings figures
//! - [`Extras`] / [`FallOfWicket`] -- team-level innings records
//! - [`MatchInfo`] -- match metadata as held by the match store

pub mod ball;
pub mod error;
pub mod ids;
pub mod match_info;
pub mod overs;
pub mod roster;
pub mod stats;

pub use ball::{BallEvent, BallType, WicketType};
pub use error::TypeError;
pub use ids::MatchId;
pub use match_info::{
    resolve_batting_order, ExtraRule, MatchInfo, MatchSettings, MatchStatus, OpeningPlayers,
    TeamInfo, TossDecision, TossSide,
};
pub use overs::BALLS_PER_OVER;
pub use roster::{LogEntry, RosterChange};
pub use stats::{BatsmanStats, BowlerStats, Extras, FallOfWicket};
