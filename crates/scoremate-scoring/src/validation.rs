use scoremate_types::BALLS_PER_OVER;

use crate::scoreboard::Scoreboard;

/// Result of checking a scoreboard's invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn has(&self, kind: ViolationKind) -> bool {
        self.violations.iter().any(|v| v.kind == kind)
    }
}

/// A specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    BallsOutOfRange,
    ExtrasTotalMismatch,
    ScoreMismatch,
    WicketCountMismatch,
    RepeatedDismissal,
    RosterIndexOutOfRange,
    SharedBattingSlot,
}

/// Scoreboard invariant checker.
pub struct ScoreboardValidator;

impl ScoreboardValidator {
    /// Check every invariant. Never panics, whatever the indices hold.
    pub fn validate(board: &Scoreboard) -> ValidationReport {
        let mut violations = Vec::new();

        if board.balls >= BALLS_PER_OVER {
            violations.push(Violation {
                kind: ViolationKind::BallsOutOfRange,
                description: format!("balls in over is {}, expected 0..=5", board.balls),
            });
        }

        let category_sum = board.extras.category_sum();
        if board.extras.total != category_sum {
            violations.push(Violation {
                kind: ViolationKind::ExtrasTotalMismatch,
                description: format!(
                    "extras total {} but categories sum to {category_sum}",
                    board.extras.total
                ),
            });
        }

        let bat_runs: u32 = board.batsmen.iter().map(|b| b.runs).sum();
        if board.score != bat_runs + board.extras.total {
            violations.push(Violation {
                kind: ViolationKind::ScoreMismatch,
                description: format!(
                    "score {} but batsmen {bat_runs} + extras {} = {}",
                    board.score,
                    board.extras.total,
                    bat_runs + board.extras.total
                ),
            });
        }

        if board.wickets as usize != board.fall_of_wickets.len() {
            violations.push(Violation {
                kind: ViolationKind::WicketCountMismatch,
                description: format!(
                    "{} wickets but {} fall-of-wicket records",
                    board.wickets,
                    board.fall_of_wickets.len()
                ),
            });
        }

        let mut seen = std::collections::HashSet::new();
        for fow in &board.fall_of_wickets {
            if !seen.insert(fow.batsman.as_str()) {
                violations.push(Violation {
                    kind: ViolationKind::RepeatedDismissal,
                    description: format!("{} dismissed more than once", fow.batsman),
                });
            }
        }

        for (role, index, len) in [
            ("striker", board.striker, board.batsmen.len()),
            ("non-striker", board.non_striker, board.batsmen.len()),
            ("bowler", board.bowler, board.bowlers.len()),
        ] {
            if index >= len {
                violations.push(Violation {
                    kind: ViolationKind::RosterIndexOutOfRange,
                    description: format!("{role} index {index} outside roster of {len}"),
                });
            }
        }

        if board.striker == board.non_striker {
            violations.push(Violation {
                kind: ViolationKind::SharedBattingSlot,
                description: format!("striker and non-striker both at index {}", board.striker),
            });
        }

        ValidationReport { violations }
    }
}
