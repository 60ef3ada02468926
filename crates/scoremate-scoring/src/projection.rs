use scoremate_types::overs::{format_overs, round_to};
use scoremate_types::BALLS_PER_OVER;
use serde::Serialize;

use crate::scoreboard::Scoreboard;

/// Read-only view of an innings for display and chase arithmetic.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InningsSummary {
    pub innings: u32,
    pub batting_team: Option<String>,
    pub bowling_team: Option<String>,
    pub score: u32,
    pub wickets: u32,
    /// `"12"` or `"12.3"`.
    pub overs: String,
    pub legal_balls: u32,
    pub run_rate: f64,
    pub extras: u32,
    pub striker: String,
    pub non_striker: String,
    pub bowler: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balls_remaining: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chase: Option<Chase>,
}

/// Second-innings arithmetic against a target.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chase {
    pub target: u32,
    pub runs_required: u32,
    /// Runs per over needed from the balls left; absent once none remain.
    pub required_run_rate: Option<f64>,
}

impl InningsSummary {
    /// Project `board`. `overs_limit` is the match's scheduled overs, when
    /// known; without it no remaining-ball or chase figures are derived.
    pub fn from_scoreboard(board: &Scoreboard, overs_limit: Option<u32>) -> Self {
        let legal_balls = board.legal_balls();
        let balls_remaining =
            overs_limit.map(|limit| (limit * BALLS_PER_OVER).saturating_sub(legal_balls));
        let chase = match (board.target, balls_remaining) {
            (0, _) | (_, None) => None,
            (target, Some(remaining)) => {
                let runs_required = target.saturating_sub(board.score);
                Some(Chase {
                    target,
                    runs_required,
                    required_run_rate: (remaining > 0).then(|| {
                        round_to(
                            runs_required as f64 * BALLS_PER_OVER as f64 / remaining as f64,
                            2,
                        )
                    }),
                })
            }
        };

        Self {
            innings: board.current_innings,
            batting_team: board.batting_team.clone(),
            bowling_team: board.bowling_team.clone(),
            score: board.score,
            wickets: board.wickets,
            overs: format_overs(board.overs, board.balls),
            legal_balls,
            run_rate: run_rate(board.score, legal_balls),
            extras: board.extras.total,
            striker: board.striker().name.clone(),
            non_striker: board.non_striker().name.clone(),
            bowler: board.current_bowler().name.clone(),
            balls_remaining,
            chase,
        }
    }

    /// One line, e.g. `Hosts 45/2 (6.3 ov, RR 6.92)`.
    pub fn headline(&self) -> String {
        let team = self.batting_team.as_deref().unwrap_or("Batting side");
        let mut line = format!(
            "{team} {}/{} ({} ov, RR {:.2})",
            self.score, self.wickets, self.overs, self.run_rate
        );
        if let Some(chase) = &self.chase {
            line.push_str(&format!(", need {}", chase.runs_required));
            if let Some(remaining) = self.balls_remaining {
                line.push_str(&format!(" from {remaining}"));
            }
        }
        line
    }
}

/// Runs per six legal balls, two decimals.
fn run_rate(score: u32, legal_balls: u32) -> f64 {
    if legal_balls == 0 {
        return 0.0;
    }
    round_to(score as f64 * BALLS_PER_OVER as f64 / legal_balls as f64, 2)
}
