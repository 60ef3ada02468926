use scoremate_types::{MatchInfo, MatchSettings};
use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// Configuration for the ball processor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// Penalty runs for a wide.
    pub wide_runs: u32,
    /// Penalty runs for a no-ball, on top of anything scored off it.
    pub no_ball_runs: u32,
    /// When `true`, a name that does not match the roster fails the ball
    /// instead of producing a warning.
    pub strict_actors: bool,
    /// When `true`, an unseen bowler named at the start of an over takes
    /// over, and an unseen batsman fills a slot whose occupant is out.
    pub infer_roster_changes: bool,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            wide_runs: 1,
            no_ball_runs: 1,
            strict_actors: false,
            infer_roster_changes: true,
        }
    }
}

impl ScoringRules {
    /// Rules that fail on unknown names and never infer roster changes.
    pub fn strict() -> Self {
        Self {
            strict_actors: true,
            infer_roster_changes: false,
            ..Default::default()
        }
    }

    /// Penalty runs taken from the match settings. A zero setting means
    /// "unset" and keeps the one-run default.
    pub fn from_settings(settings: &MatchSettings) -> Self {
        let defaults = Self::default();
        let penalty = |runs: u32, default: u32| if runs == 0 { default } else { runs };
        Self {
            wide_runs: penalty(settings.wide_ball.runs, defaults.wide_runs),
            no_ball_runs: penalty(settings.no_ball.runs, defaults.no_ball_runs),
            ..defaults
        }
    }

    /// Rules for a match: its settings when present, defaults otherwise.
    pub fn for_match(info: &MatchInfo) -> Self {
        info.settings
            .as_ref()
            .map(Self::from_settings)
            .unwrap_or_default()
    }

    /// Parse from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ScoringError> {
        toml::from_str(s).map_err(|e| ScoringError::Config(e.to_string()))
    }
}
