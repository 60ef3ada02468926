use scoremate_types::overs::round_to;
use scoremate_types::{BallEvent, BallType, FallOfWicket, RosterChange, BALLS_PER_OVER};
use tracing::{debug, info, warn};

use crate::error::ScoringError;
use crate::rules::ScoringRules;
use crate::scoreboard::{Scoreboard, Slot};
use crate::warning::ScoringWarning;

/// Scoreboard after one ball, with any soft failures met along the way.
#[derive(Clone, Debug, PartialEq)]
pub struct BallOutcome {
    pub scoreboard: Scoreboard,
    pub warnings: Vec<ScoringWarning>,
}

impl BallOutcome {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// The scoring state machine.
///
/// Maps (scoreboard, ball) to the next scoreboard. Per ball, in order:
/// 1. runs and extras attributed by ball type, odd runs rotating strike
/// 2. wicket effects when `is_wicket` is set
/// 3. legal balls advance the over; the sixth resets it and rotates strike
/// 4. the bowler's economy rate is recomputed
#[derive(Clone, Debug, Default)]
pub struct BallProcessor {
    rules: ScoringRules,
}

enum BatsmanPlan {
    Known(usize),
    Incoming(Slot, String),
    Unknown,
    /// Named, but already out.
    Dismissed(String),
    /// No name given and the striker is out and not yet replaced.
    Vacant(String),
}

enum BowlerPlan {
    Current,
    Incoming(String),
    Unknown,
}

impl BallProcessor {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Compute the scoreboard after `event`. The input is not modified.
    pub fn process(
        &self,
        scoreboard: &Scoreboard,
        event: &BallEvent,
    ) -> Result<BallOutcome, ScoringError> {
        let mut next = scoreboard.clone();
        let warnings = self.apply(&mut next, event)?;
        Ok(BallOutcome {
            scoreboard: next,
            warnings,
        })
    }

    /// In-place form of [`Self::process`]. On error the scoreboard is left
    /// untouched.
    pub fn apply(
        &self,
        board: &mut Scoreboard,
        event: &BallEvent,
    ) -> Result<Vec<ScoringWarning>, ScoringError> {
        let mut warnings = Vec::new();
        let batsman_plan = self.plan_batsman(board, event.batsman.as_deref(), &mut warnings);
        let bowler_plan = self.plan_bowler(board, event.bowler.as_deref(), &mut warnings);

        if self.rules.strict_actors {
            if let Some(warning) = warnings.iter().find(|w| w.is_unknown_actor()) {
                return Err(ScoringError::StrictActor(warning.clone()));
            }
        }

        let mut dismissed_already = None;
        let mut crease_vacant = false;
        let batsman = match batsman_plan {
            BatsmanPlan::Known(index) => Some(index),
            BatsmanPlan::Incoming(slot, name) => {
                board.replace_in_slot(slot, &name);
                Some(board.slot_index(slot))
            }
            BatsmanPlan::Unknown => None,
            BatsmanPlan::Dismissed(name) => {
                dismissed_already = Some(name);
                None
            }
            BatsmanPlan::Vacant(name) => {
                dismissed_already = Some(name);
                crease_vacant = true;
                None
            }
        };
        let bowler_known = match bowler_plan {
            BowlerPlan::Current => true,
            BowlerPlan::Incoming(name) => {
                board.set_current_bowler(&name);
                true
            }
            BowlerPlan::Unknown => false,
        };

        self.attribute_runs(board, event, batsman, crease_vacant, bowler_known, &mut warnings);
        if event.is_wicket {
            match dismissed_already {
                Some(name) => refuse_wicket(event, name, &mut warnings),
                None => take_wicket(board, event, batsman, bowler_known, &mut warnings),
            }
        } else if let Some(name) = &event.new_batsman {
            warnings.push(ScoringWarning::ReplacementIgnored { name: name.clone() });
        }
        complete_delivery(board, event, bowler_known);
        if bowler_known {
            board.current_bowler_mut().refresh_economy();
        }

        debug!(
            ball_type = %event.ball_type,
            runs = event.runs,
            wicket = event.is_wicket,
            score = board.score,
            wickets = board.wickets,
            overs = board.overs,
            balls = board.balls,
            "ball processed"
        );
        for warning in &warnings {
            warn!(%warning, "scoring warning");
        }
        Ok(warnings)
    }

    /// Fill a slot whose occupant is out with a new batsman.
    pub fn bring_in_batsman(
        &self,
        scoreboard: &Scoreboard,
        name: &str,
    ) -> Result<Scoreboard, ScoringError> {
        if scoreboard.is_dismissed(name) {
            return Err(ScoringError::AlreadyOut(name.to_string()));
        }
        if scoreboard.find_at_crease(name).is_some() {
            return Err(ScoringError::AlreadyBatting(name.to_string()));
        }
        let slot = scoreboard
            .vacant_slot()
            .ok_or_else(|| ScoringError::NoVacancy(name.to_string()))?;
        let mut next = scoreboard.clone();
        next.replace_in_slot(slot, name);
        info!(batsman = name, ?slot, "batsman in");
        Ok(next)
    }

    /// Hand the ball to another bowler between overs.
    pub fn change_bowler(
        &self,
        scoreboard: &Scoreboard,
        name: &str,
    ) -> Result<Scoreboard, ScoringError> {
        if scoreboard.balls != 0 {
            return Err(ScoringError::MidOverBowlerChange {
                name: name.to_string(),
                balls: scoreboard.balls,
            });
        }
        let mut next = scoreboard.clone();
        next.set_current_bowler(name);
        info!(bowler = name, over = next.overs + 1, "bowler change");
        Ok(next)
    }

    /// Apply a roster change made between balls.
    pub fn apply_roster(
        &self,
        scoreboard: &Scoreboard,
        change: &RosterChange,
    ) -> Result<Scoreboard, ScoringError> {
        match change {
            RosterChange::BatsmanIn { name } => self.bring_in_batsman(scoreboard, name),
            RosterChange::BowlerChange { name } => self.change_bowler(scoreboard, name),
        }
    }

    fn plan_batsman(
        &self,
        board: &Scoreboard,
        name: Option<&str>,
        warnings: &mut Vec<ScoringWarning>,
    ) -> BatsmanPlan {
        let Some(name) = name else {
            let striker = board.striker();
            if striker.is_out {
                warnings.push(ScoringWarning::BatsmanAlreadyOut {
                    name: striker.name.clone(),
                });
                return BatsmanPlan::Vacant(striker.name.clone());
            }
            return BatsmanPlan::Known(board.striker_index());
        };
        if let Some(index) = board.find_at_crease(name) {
            return BatsmanPlan::Known(index);
        }
        if board.is_dismissed(name) {
            warnings.push(ScoringWarning::BatsmanAlreadyOut {
                name: name.to_string(),
            });
            return BatsmanPlan::Dismissed(name.to_string());
        }
        if self.rules.infer_roster_changes {
            if let Some(slot) = board.vacant_slot() {
                return BatsmanPlan::Incoming(slot, name.to_string());
            }
        }
        warnings.push(ScoringWarning::UnknownBatsman {
            name: name.to_string(),
        });
        BatsmanPlan::Unknown
    }

    fn plan_bowler(
        &self,
        board: &Scoreboard,
        name: Option<&str>,
        warnings: &mut Vec<ScoringWarning>,
    ) -> BowlerPlan {
        match name {
            None => BowlerPlan::Current,
            Some(name) if board.current_bowler().name == name => BowlerPlan::Current,
            Some(name) if self.rules.infer_roster_changes && board.balls == 0 => {
                BowlerPlan::Incoming(name.to_string())
            }
            Some(name) => {
                warnings.push(ScoringWarning::UnknownBowler {
                    name: name.to_string(),
                });
                BowlerPlan::Unknown
            }
        }
    }

    fn attribute_runs(
        &self,
        board: &mut Scoreboard,
        event: &BallEvent,
        batsman: Option<usize>,
        crease_vacant: bool,
        bowler_known: bool,
        warnings: &mut Vec<ScoringWarning>,
    ) {
        // Nobody can score off the bat while the striker's slot is vacant.
        let runs = if crease_vacant && event.ball_type.is_off_the_bat() {
            0
        } else {
            event.runs
        };
        match event.ball_type {
            BallType::Normal => {
                board.score += runs;
                credit(board, batsman, runs);
                charge(board, bowler_known, runs);
                rotate_on_odd(board, runs);
            }
            BallType::Wide => {
                if runs > 0 {
                    warnings.push(ScoringWarning::WideRunsIgnored { runs });
                }
                let penalty = self.rules.wide_runs;
                board.extras.add_wides(penalty);
                board.score += penalty;
                charge(board, bowler_known, penalty);
            }
            BallType::NoBall => {
                let penalty = self.rules.no_ball_runs;
                board.extras.add_no_balls(penalty);
                board.score += penalty;
                charge(board, bowler_known, penalty);
                if runs > 0 {
                    board.score += runs;
                    credit(board, batsman, runs);
                    charge(board, bowler_known, runs);
                    rotate_on_odd(board, runs);
                }
            }
            BallType::Bye => {
                board.extras.add_byes(runs);
                board.score += runs;
                rotate_on_odd(board, runs);
            }
            BallType::LegBye => {
                board.extras.add_leg_byes(runs);
                board.score += runs;
                rotate_on_odd(board, runs);
            }
            BallType::Wicket => {
                if runs > 0 {
                    warnings.push(ScoringWarning::WicketBallRunsIgnored { runs });
                }
            }
        }
    }
}

fn credit(board: &mut Scoreboard, batsman: Option<usize>, runs: u32) {
    if let Some(index) = batsman {
        board.batsman_mut(index).credit(runs);
    }
}

fn charge(board: &mut Scoreboard, bowler_known: bool, runs: u32) {
    if bowler_known {
        board.current_bowler_mut().concede(runs);
        board.over_runs += runs;
    }
}

fn rotate_on_odd(board: &mut Scoreboard, runs: u32) {
    if runs % 2 == 1 {
        board.rotate_strike();
    }
}

fn take_wicket(
    board: &mut Scoreboard,
    event: &BallEvent,
    batsman: Option<usize>,
    bowler_known: bool,
    warnings: &mut Vec<ScoringWarning>,
) {
    board.wickets += 1;
    let dismissed = match batsman {
        Some(index) => {
            let out = board.batsman_mut(index);
            out.dismiss(event.wicket_type);
            out.name.clone()
        }
        None => event.batsman.clone().unwrap_or_default(),
    };

    let over = board.overs as f64 + board.balls as f64 / BALLS_PER_OVER as f64;
    board.fall_of_wickets.push(FallOfWicket {
        wicket: board.wickets,
        runs: board.score,
        over: round_to(over, 2),
        batsman: dismissed,
    });

    // The replacement takes whichever slot the dismissed batsman is in now,
    // after any rotation from runs completed on this ball.
    if let Some(incoming) = event.new_batsman.as_deref() {
        match batsman.and_then(|index| board.slot_of_index(index)) {
            Some(slot) => board.replace_in_slot(slot, incoming),
            None => warnings.push(ScoringWarning::ReplacementIgnored {
                name: incoming.to_string(),
            }),
        }
    }

    if bowler_known {
        board.current_bowler_mut().wickets += 1;
    }
}

fn refuse_wicket(event: &BallEvent, name: String, warnings: &mut Vec<ScoringWarning>) {
    warnings.push(ScoringWarning::WicketIgnored { name });
    if let Some(incoming) = &event.new_batsman {
        warnings.push(ScoringWarning::ReplacementIgnored {
            name: incoming.clone(),
        });
    }
}

fn complete_delivery(board: &mut Scoreboard, event: &BallEvent, bowler_known: bool) {
    if !event.is_legal() {
        return;
    }
    board.balls += 1;
    if bowler_known {
        board.current_bowler_mut().add_legal_ball();
    }
    if board.balls == BALLS_PER_OVER {
        board.balls = 0;
        board.overs += 1;
        board.rotate_strike();
        if bowler_known && board.over_runs == 0 {
            board.current_bowler_mut().maidens += 1;
        }
        board.over_runs = 0;
    }
}

#[cfg(test)]
mod tests {
    use scoremate_types::{MatchInfo, OpeningPlayers, TeamInfo, TossDecision, TossSide, WicketType};

    use super::*;
    use crate::initializer::ScoreboardInitializer;

    fn board() -> Scoreboard {
        let info = MatchInfo::new(
            TeamInfo::new("Hosts"),
            TeamInfo::new("Visitors"),
            TossSide::Host,
            TossDecision::Bat,
            20,
        )
        .with_opening_players(OpeningPlayers::new("A", "B", "X"));
        ScoreboardInitializer::initialize(&info).unwrap()
    }

    fn play(board: &Scoreboard, event: BallEvent) -> BallOutcome {
        BallProcessor::default().process(board, &event).unwrap()
    }

    fn play_all(mut board: Scoreboard, events: &[BallEvent]) -> Scoreboard {
        let processor = BallProcessor::default();
        for event in events {
            board = processor.process(&board, event).unwrap().scoreboard;
        }
        board
    }

    #[test]
    fn single_run_rotates_strike() {
        let before = board();
        let outcome = play(&before, BallEvent::normal(1).by_batsman("A"));
        let after = &outcome.scoreboard;
        assert!(outcome.is_clean());
        assert_eq!(after.score, 1);
        assert_eq!(after.balls, 1);
        assert_eq!(after.striker().name, "B");
        assert_eq!(after.non_striker().name, "A");
        let a = &after.all_batsmen()[0];
        assert_eq!((a.runs, a.balls), (1, 1));
        assert_eq!(after.current_bowler().runs, 1);
        // input untouched
        assert_eq!(before.score, 0);
    }

    #[test]
    fn wide_is_an_extra_and_not_legal() {
        let after = play(&board(), BallEvent::wide()).scoreboard;
        assert_eq!(after.score, 1);
        assert_eq!(after.extras.wides, 1);
        assert_eq!(after.extras.total, 1);
        assert_eq!(after.balls, 0);
        assert_eq!(after.current_bowler().runs, 1);
        assert_eq!(after.current_bowler().overs, 0.0);
        assert_eq!(after.striker(), &scoremate_types::BatsmanStats::fresh("A"));
    }

    #[test]
    fn runs_on_a_wide_are_ignored_with_warning() {
        let outcome = play(&board(), BallEvent::new(BallType::Wide, 3));
        assert_eq!(outcome.scoreboard.score, 1);
        assert_eq!(outcome.scoreboard.striker().name, "A");
        assert_eq!(
            outcome.warnings,
            vec![ScoringWarning::WideRunsIgnored { runs: 3 }]
        );
    }

    #[test]
    fn no_ball_four() {
        let after = play(&board(), BallEvent::no_ball(4)).scoreboard;
        assert_eq!(after.extras.no_balls, 1);
        assert_eq!(after.extras.total, 1);
        assert_eq!(after.score, 5);
        assert_eq!(after.striker().name, "A");
        assert_eq!(after.striker().runs, 4);
        assert_eq!(after.striker().fours, 1);
        assert_eq!(after.current_bowler().runs, 5);
        assert_eq!(after.balls, 0);
    }

    #[test]
    fn no_ball_single_rotates() {
        let after = play(&board(), BallEvent::no_ball(1)).scoreboard;
        assert_eq!(after.score, 2);
        assert_eq!(after.striker().name, "B");
    }

    #[test]
    fn byes_and_leg_byes_are_legal_extras() {
        let after = play_all(board(), &[BallEvent::bye(2), BallEvent::leg_bye(1)]);
        assert_eq!(after.extras.byes, 2);
        assert_eq!(after.extras.leg_byes, 1);
        assert_eq!(after.extras.total, 3);
        assert_eq!(after.score, 3);
        assert_eq!(after.balls, 2);
        // the leg bye single rotated strike
        assert_eq!(after.striker().name, "B");
        assert_eq!(after.all_batsmen()[0].runs, 0);
        assert_eq!(after.all_batsmen()[0].balls, 0);
        assert_eq!(after.current_bowler().runs, 0);
        assert_eq!(after.current_bowler().overs, 0.2);
    }

    #[test]
    fn sixth_legal_ball_completes_the_over() {
        let five = play_all(board(), &vec![BallEvent::normal(0); 5]);
        assert_eq!(five.balls, 5);
        assert_eq!(five.striker().name, "A");

        let six = play(&five, BallEvent::normal(0)).scoreboard;
        assert_eq!(six.balls, 0);
        assert_eq!(six.overs, 1);
        assert_eq!(six.striker().name, "B");
        assert_eq!(six.current_bowler().overs, 1.0);
    }

    #[test]
    fn single_off_last_ball_keeps_strike() {
        let mut events = vec![BallEvent::normal(0); 5];
        events.push(BallEvent::normal(1));
        let after = play_all(board(), &events);
        assert_eq!(after.overs, 1);
        assert_eq!(after.striker().name, "A");
    }

    #[test]
    fn wides_do_not_complete_an_over() {
        let mut events = vec![BallEvent::normal(0); 5];
        events.push(BallEvent::wide());
        events.push(BallEvent::no_ball(0));
        let after = play_all(board(), &events);
        assert_eq!(after.overs, 0);
        assert_eq!(after.balls, 5);
    }

    #[test]
    fn bowled_with_replacement_keeps_slot() {
        let before = play(&board(), BallEvent::normal(2)).scoreboard;
        let outcome = play(
            &before,
            BallEvent::normal(0).with_wicket(WicketType::Bowled, Some("C")),
        );
        let after = outcome.scoreboard;
        assert!(outcome.warnings.is_empty());
        assert_eq!(after.wickets, 1);

        let a = &after.all_batsmen()[0];
        assert!(a.is_out);
        assert_eq!(a.dismissal, Some(WicketType::Bowled));
        assert_eq!((a.runs, a.balls), (2, 2));

        assert_eq!(after.fall_of_wickets.len(), 1);
        let fow = &after.fall_of_wickets[0];
        assert_eq!(fow.wicket, 1);
        assert_eq!(fow.runs, 2);
        assert_eq!(fow.over, round_to(1.0 / 6.0, 2));
        assert_eq!(fow.batsman, "A");

        assert_eq!(after.striker(), &scoremate_types::BatsmanStats::fresh("C"));
        assert_eq!(after.non_striker().name, "B");
        assert_eq!(after.current_bowler().wickets, 1);
        assert_eq!(after.balls, 2);
    }

    #[test]
    fn run_out_after_a_single_replaces_at_the_new_end() {
        let event = BallEvent::normal(1).with_wicket(WicketType::RunOut, Some("C"));
        let after = play(&board(), event).scoreboard;
        // A ran to the non-striker's end and was run out there.
        assert_eq!(after.striker().name, "B");
        assert_eq!(after.non_striker().name, "C");
        assert_eq!(after.fall_of_wickets[0].runs, 1);
    }

    #[test]
    fn wicket_without_replacement_leaves_vacancy() {
        let event = BallEvent::normal(0).with_wicket(WicketType::Lbw, None);
        let after = play(&board(), event).scoreboard;
        assert!(after.striker().is_out);
        assert_eq!(after.vacant_slot(), Some(Slot::Striker));

        let filled = BallProcessor::default()
            .bring_in_batsman(&after, "C")
            .unwrap();
        assert_eq!(filled.striker().name, "C");
        assert_eq!(filled.vacant_slot(), None);
    }

    #[test]
    fn dismissed_striker_is_frozen_until_replaced() {
        let out = play_all(
            board(),
            &[
                BallEvent::normal(2),
                BallEvent::normal(0).with_wicket(WicketType::Lbw, None),
            ],
        );
        let frozen = out.all_batsmen()[0].clone();
        assert_eq!((frozen.runs, frozen.balls), (2, 2));

        let outcome = play(&out, BallEvent::normal(4));
        assert_eq!(
            outcome.warnings,
            vec![ScoringWarning::BatsmanAlreadyOut { name: "A".into() }]
        );
        let after = outcome.scoreboard;
        assert_eq!(after.all_batsmen()[0], frozen);
        assert_eq!(after.score, 2);
        assert_eq!(after.balls, 3);
        assert_eq!(after.current_bowler().runs, 2);

        let outcome = play(
            &after,
            BallEvent::normal(0).with_wicket(WicketType::Bowled, Some("C")),
        );
        assert_eq!(
            outcome.warnings,
            vec![
                ScoringWarning::BatsmanAlreadyOut { name: "A".into() },
                ScoringWarning::WicketIgnored { name: "A".into() },
                ScoringWarning::ReplacementIgnored { name: "C".into() },
            ]
        );
        let after = outcome.scoreboard;
        assert_eq!(after.wickets, 1);
        assert_eq!(after.fall_of_wickets.len(), 1);
        assert_eq!(after.current_bowler().wickets, 1);
        assert_eq!(after.all_batsmen()[0], frozen);
        assert!(crate::validation::ScoreboardValidator::validate(&after).is_valid());
    }

    #[test]
    fn dismissed_batsman_named_again_does_not_return() {
        let out = play(
            &board(),
            BallEvent::normal(0).with_wicket(WicketType::Caught, None),
        )
        .scoreboard;
        let outcome = play(&out, BallEvent::normal(2).by_batsman("A"));
        assert_eq!(
            outcome.warnings,
            vec![ScoringWarning::BatsmanAlreadyOut { name: "A".into() }]
        );
        assert_eq!(outcome.scoreboard.all_batsmen().len(), 2);
        assert_eq!(outcome.scoreboard.vacant_slot(), Some(Slot::Striker));
    }

    #[test]
    fn strict_rules_reject_a_ball_with_no_striker() {
        let out = play(
            &board(),
            BallEvent::normal(0).with_wicket(WicketType::Stumped, None),
        )
        .scoreboard;
        let err = BallProcessor::new(ScoringRules::strict())
            .process(&out, &BallEvent::normal(2))
            .unwrap_err();
        assert_eq!(
            err,
            ScoringError::StrictActor(ScoringWarning::BatsmanAlreadyOut { name: "A".into() })
        );
    }

    #[test]
    fn non_striker_run_out_by_name_replaced_at_their_end() {
        let event = BallEvent::normal(0)
            .by_batsman("B")
            .with_wicket(WicketType::RunOut, Some("C"));
        let outcome = play(&board(), event);
        assert!(outcome.is_clean());
        let after = outcome.scoreboard;

        assert_eq!(after.striker().name, "A");
        assert_eq!(after.non_striker(), &scoremate_types::BatsmanStats::fresh("C"));
        assert_eq!(after.fall_of_wickets[0].batsman, "B");

        let a = &after.all_batsmen()[0];
        let b = &after.all_batsmen()[1];
        assert_eq!((a.balls, a.is_out), (0, false));
        assert_eq!(b.balls, 1);
        assert!(b.is_out);
        assert_eq!(b.dismissal, Some(WicketType::RunOut));
    }

    #[test]
    fn next_ball_naming_new_batsman_fills_vacancy() {
        let after = play_all(
            board(),
            &[
                BallEvent::normal(0).with_wicket(WicketType::Stumped, None),
                BallEvent::normal(4).by_batsman("C"),
            ],
        );
        assert_eq!(after.striker().name, "C");
        assert_eq!(after.striker().runs, 4);
        assert_eq!(after.all_batsmen().len(), 3);
    }

    #[test]
    fn bring_in_without_vacancy_fails() {
        let err = BallProcessor::default()
            .bring_in_batsman(&board(), "C")
            .unwrap_err();
        assert_eq!(err, ScoringError::NoVacancy("C".into()));
    }

    #[test]
    fn wicket_on_a_wide_is_structurally_allowed() {
        let event = BallEvent::wide().with_wicket(WicketType::Stumped, Some("C"));
        let after = play(&board(), event).scoreboard;
        assert_eq!(after.score, 1);
        assert_eq!(after.wickets, 1);
        assert_eq!(after.balls, 0);
        assert_eq!(after.striker().name, "C");
    }

    #[test]
    fn wicket_ball_type_without_flag_dismisses_nobody() {
        let after = play(&board(), BallEvent::new(BallType::Wicket, 0)).scoreboard;
        assert_eq!(after.wickets, 0);
        assert_eq!(after.balls, 1);
        assert!(after.fall_of_wickets.is_empty());
        assert_eq!(after.striker().balls, 0);
    }

    #[test]
    fn runs_on_a_wicket_ball_are_ignored_with_warning() {
        let outcome = play(&board(), BallEvent::new(BallType::Wicket, 3));
        assert_eq!(
            outcome.warnings,
            vec![ScoringWarning::WicketBallRunsIgnored { runs: 3 }]
        );
        assert_eq!(outcome.scoreboard.score, 0);
        assert_eq!(outcome.scoreboard.balls, 1);
    }

    #[test]
    fn normal_ball_with_flag_dismisses() {
        let event = BallEvent::normal(0).with_wicket(WicketType::Caught, Some("C"));
        let after = play(&board(), event).scoreboard;
        assert_eq!(after.wickets, 1);
        assert_eq!(after.all_batsmen()[0].balls, 1);
    }

    #[test]
    fn unknown_batsman_is_skipped_with_warning() {
        let outcome = play(&board(), BallEvent::normal(3).by_batsman("Z"));
        let after = outcome.scoreboard;
        assert_eq!(
            outcome.warnings,
            vec![ScoringWarning::UnknownBatsman { name: "Z".into() }]
        );
        assert_eq!(after.score, 3);
        assert_eq!(after.balls, 1);
        assert_eq!(after.all_batsmen()[0].runs, 0);
        assert_eq!(after.all_batsmen()[1].runs, 0);
        assert_eq!(after.current_bowler().runs, 3);
    }

    #[test]
    fn unknown_bowler_mid_over_is_skipped_with_warning() {
        let first = play(&board(), BallEvent::normal(0)).scoreboard;
        let outcome = play(&first, BallEvent::normal(2).by_bowler("Y"));
        assert_eq!(
            outcome.warnings,
            vec![ScoringWarning::UnknownBowler { name: "Y".into() }]
        );
        let after = outcome.scoreboard;
        assert_eq!(after.score, 2);
        assert_eq!(after.balls, 2);
        assert_eq!(after.current_bowler().name, "X");
        assert_eq!(after.current_bowler().runs, 0);
        assert_eq!(after.current_bowler().overs, 0.1);
        assert_eq!(after.striker().runs, 2);
    }

    #[test]
    fn new_bowler_at_start_of_over_takes_over() {
        let over = play_all(board(), &vec![BallEvent::normal(0); 6]);
        let after = play(&over, BallEvent::normal(1).by_bowler("Y")).scoreboard;
        assert_eq!(after.current_bowler().name, "Y");
        assert_eq!(after.current_bowler().runs, 1);
        assert_eq!(after.all_bowlers().len(), 2);
        assert_eq!(after.all_bowlers()[0].overs, 1.0);
        assert_eq!(after.all_bowlers()[0].maidens, 1);

        // X returns for the third over and keeps their figures.
        let after = play_all(after, &vec![BallEvent::normal(0); 5]);
        assert_eq!(after.balls, 0);
        let back = play(&after, BallEvent::normal(0).by_bowler("X")).scoreboard;
        assert_eq!(back.all_bowlers().len(), 2);
        assert_eq!(back.current_bowler().name, "X");
        assert_eq!(back.current_bowler().overs, 1.1);
    }

    #[test]
    fn strict_rules_reject_unknown_names_without_mutation() {
        let processor = BallProcessor::new(ScoringRules::strict());
        let mut board = board();
        let before = board.clone();
        let err = processor
            .apply(&mut board, &BallEvent::normal(4).by_batsman("Z"))
            .unwrap_err();
        assert_eq!(
            err,
            ScoringError::StrictActor(ScoringWarning::UnknownBatsman { name: "Z".into() })
        );
        assert_eq!(board, before);

        let err = processor
            .process(&board, &BallEvent::normal(0).by_bowler("Y"))
            .unwrap_err();
        assert!(matches!(err, ScoringError::StrictActor(_)));
    }

    #[test]
    fn replacement_without_wicket_is_ignored() {
        let mut event = BallEvent::normal(0);
        event.new_batsman = Some("C".into());
        let outcome = play(&board(), event);
        assert_eq!(
            outcome.warnings,
            vec![ScoringWarning::ReplacementIgnored { name: "C".into() }]
        );
        assert_eq!(outcome.scoreboard.all_batsmen().len(), 2);
    }

    #[test]
    fn maiden_only_when_bowler_concedes_nothing() {
        let mut events = vec![BallEvent::normal(0); 3];
        events.extend([BallEvent::bye(2), BallEvent::normal(0), BallEvent::leg_bye(0)]);
        let after = play_all(board(), &events);
        assert_eq!(after.current_bowler().maidens, 1);

        let mut events = vec![BallEvent::normal(0); 5];
        events.insert(2, BallEvent::wide());
        events.push(BallEvent::normal(0));
        let after = play_all(board(), &events);
        assert_eq!(after.overs, 1);
        assert_eq!(after.current_bowler().maidens, 0);
    }

    #[test]
    fn economy_rate_tracks_overs_notation() {
        let mut events = vec![BallEvent::normal(1); 6];
        events.extend([BallEvent::normal(4), BallEvent::normal(0)]);
        let after = play_all(board(), &events);
        let bowler = after.current_bowler();
        assert_eq!(bowler.overs, 1.2);
        assert_eq!(bowler.runs, 10);
        assert_eq!(bowler.economy_rate, 7.5);
    }

    #[test]
    fn configured_penalties_apply() {
        let rules = ScoringRules {
            wide_runs: 2,
            no_ball_runs: 2,
            ..Default::default()
        };
        let processor = BallProcessor::new(rules);
        let b = processor.process(&board(), &BallEvent::wide()).unwrap().scoreboard;
        let b = processor.process(&b, &BallEvent::no_ball(1)).unwrap().scoreboard;
        assert_eq!(b.extras.wides, 2);
        assert_eq!(b.extras.no_balls, 2);
        assert_eq!(b.extras.total, 4);
        assert_eq!(b.score, 5);
    }

    #[test]
    fn bring_in_refuses_players_already_in() {
        let processor = BallProcessor::default();
        let out = play(
            &board(),
            BallEvent::normal(0).with_wicket(WicketType::Bowled, None),
        )
        .scoreboard;
        assert_eq!(
            processor.bring_in_batsman(&out, "A").unwrap_err(),
            ScoringError::AlreadyOut("A".into())
        );
        assert_eq!(
            processor.bring_in_batsman(&out, "B").unwrap_err(),
            ScoringError::AlreadyBatting("B".into())
        );
    }

    #[test]
    fn roster_changes_dispatch_to_explicit_operations() {
        let processor = BallProcessor::default();
        let out = play(
            &board(),
            BallEvent::normal(0).with_wicket(WicketType::Bowled, None),
        )
        .scoreboard;
        let filled = processor
            .apply_roster(&out, &RosterChange::BatsmanIn { name: "C".into() })
            .unwrap();
        assert_eq!(filled.striker().name, "C");

        let err = processor
            .apply_roster(&filled, &RosterChange::BowlerChange { name: "Y".into() })
            .unwrap_err();
        assert!(matches!(err, ScoringError::MidOverBowlerChange { .. }));
    }

    #[test]
    fn change_bowler_only_between_overs() {
        let processor = BallProcessor::default();
        let mid = play(&board(), BallEvent::normal(0)).scoreboard;
        let err = processor.change_bowler(&mid, "Y").unwrap_err();
        assert_eq!(
            err,
            ScoringError::MidOverBowlerChange {
                name: "Y".into(),
                balls: 1
            }
        );

        let over = play_all(board(), &vec![BallEvent::normal(0); 6]);
        let changed = processor.change_bowler(&over, "Y").unwrap();
        assert_eq!(changed.current_bowler().name, "Y");
        assert_eq!(changed.all_bowlers().len(), 2);
    }
}
