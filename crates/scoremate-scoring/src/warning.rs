use std::fmt;

use serde::{Deserialize, Serialize};

/// Soft failure raised while processing a ball.
///
/// The ball's other effects still apply; the caller decides whether to
/// persist, surface or reject.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScoringWarning {
    /// The named batsman is not at the crease; their stat update was skipped.
    UnknownBatsman { name: String },
    /// The batsman is already out. Nothing is credited to them and they
    /// cannot be dismissed again. With no batsman named and the striker's
    /// slot vacant, runs off the bat are not scored.
    BatsmanAlreadyOut { name: String },
    /// The named bowler is not bowling; their stat update was skipped.
    UnknownBowler { name: String },
    /// `isWicket` was set but there was no batsman at the crease to dismiss.
    WicketIgnored { name: String },
    /// `newBatsman` was given but nobody known was dismissed.
    ReplacementIgnored { name: String },
    /// Runs recorded against a wide are not scored.
    WideRunsIgnored { runs: u32 },
    /// Runs recorded against a `wicket` ball type are not scored.
    WicketBallRunsIgnored { runs: u32 },
}

impl ScoringWarning {
    /// Warnings caused by a name that does not match the current roster.
    pub fn is_unknown_actor(&self) -> bool {
        matches!(
            self,
            Self::UnknownBatsman { .. } | Self::BatsmanAlreadyOut { .. } | Self::UnknownBowler { .. }
        )
    }
}

impl fmt::Display for ScoringWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBatsman { name } => write!(f, "batsman {name} is not at the crease"),
            Self::BatsmanAlreadyOut { name } => {
                write!(f, "batsman {name} is already out and has not been replaced")
            }
            Self::UnknownBowler { name } => write!(f, "bowler {name} is not the current bowler"),
            Self::ReplacementIgnored { name } => {
                write!(f, "replacement {name} ignored: no known batsman dismissed")
            }
            Self::WicketIgnored { name } => write!(f, "wicket ignored: {name} is already out"),
            Self::WideRunsIgnored { runs } => write!(f, "{runs} run(s) on a wide ignored"),
            Self::WicketBallRunsIgnored { runs } => {
                write!(f, "{runs} run(s) on a wicket ball ignored")
            }
        }
    }
}
