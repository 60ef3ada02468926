use serde::{Deserialize, Serialize};

use crate::ball::WicketType;
use crate::overs;

/// A batsman's innings figures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatsmanStats {
    pub name: String,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub strike_rate: f64,
    pub is_out: bool,
    #[serde(default)]
    pub dismissal: Option<WicketType>,
}

impl BatsmanStats {
    /// Zeroed figures for a batsman walking out.
    pub fn fresh(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            runs: 0,
            balls: 0,
            fours: 0,
            sixes: 0,
            strike_rate: 0.0,
            is_out: false,
            dismissal: None,
        }
    }

    /// Credit one ball faced and the runs scored off it.
    ///
    /// Boundaries are counted on exact values only: 4 is a four, 6 a six.
    pub fn credit(&mut self, runs: u32) {
        self.balls += 1;
        self.runs += runs;
        match runs {
            4 => self.fours += 1,
            6 => self.sixes += 1,
            _ => {}
        }
        self.strike_rate = overs::strike_rate(self.runs, self.balls);
    }

    /// Record the dismissal; figures stay as they are.
    pub fn dismiss(&mut self, how: Option<WicketType>) {
        self.is_out = true;
        self.dismissal = how;
    }
}

/// A bowler's innings figures. `overs` is in cricket notation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BowlerStats {
    pub name: String,
    pub overs: f64,
    pub maidens: u32,
    pub runs: u32,
    pub wickets: u32,
    pub economy_rate: f64,
}

impl BowlerStats {
    pub fn fresh(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            overs: 0.0,
            maidens: 0,
            runs: 0,
            wickets: 0,
            economy_rate: 0.0,
        }
    }

    /// Legal deliveries bowled so far.
    pub fn legal_balls(&self) -> u32 {
        overs::balls_from_notation(self.overs)
    }

    /// Advance the overs figure by one legal delivery.
    pub fn add_legal_ball(&mut self) {
        self.overs = overs::notation_from_balls(self.legal_balls() + 1);
    }

    pub fn concede(&mut self, runs: u32) {
        self.runs += runs;
    }

    /// Recompute the economy rate from the current overs and runs.
    pub fn refresh_economy(&mut self) {
        self.economy_rate = overs::economy_rate(self.runs, self.overs);
    }
}

/// Team extras. `total` is kept equal to the sum of the other five.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extras {
    pub byes: u32,
    pub leg_byes: u32,
    pub wides: u32,
    pub no_balls: u32,
    pub penalties: u32,
    pub total: u32,
}

impl Extras {
    pub fn add_byes(&mut self, runs: u32) {
        self.byes += runs;
        self.total += runs;
    }

    pub fn add_leg_byes(&mut self, runs: u32) {
        self.leg_byes += runs;
        self.total += runs;
    }

    pub fn add_wides(&mut self, runs: u32) {
        self.wides += runs;
        self.total += runs;
    }

    pub fn add_no_balls(&mut self, runs: u32) {
        self.no_balls += runs;
        self.total += runs;
    }

    pub fn add_penalties(&mut self, runs: u32) {
        self.penalties += runs;
        self.total += runs;
    }

    /// Sum of the five categories, independent of `total`.
    pub fn category_sum(&self) -> u32 {
        self.byes + self.leg_byes + self.wides + self.no_balls + self.penalties
    }
}

/// Snapshot taken when a batsman is dismissed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallOfWicket {
    /// Cumulative wickets including this one.
    pub wicket: u32,
    /// Team score at the fall.
    pub runs: u32,
    /// `overs + balls / 6` at the moment of dismissal.
    pub over: f64,
    pub batsman: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_counts_boundaries_exactly() {
        let mut b = BatsmanStats::fresh("A");
        b.credit(4);
        b.credit(6);
        b.credit(5);
        b.credit(0);
        assert_eq!(b.runs, 15);
        assert_eq!(b.balls, 4);
        assert_eq!(b.fours, 1);
        assert_eq!(b.sixes, 1);
        assert_eq!(b.strike_rate, 375.0);
    }

    #[test]
    fn dismissal_freezes_figures() {
        let mut b = BatsmanStats::fresh("A");
        b.credit(2);
        b.dismiss(Some(WicketType::Caught));
        assert!(b.is_out);
        assert_eq!(b.dismissal, Some(WicketType::Caught));
        assert_eq!(b.runs, 2);
        assert_eq!(b.balls, 1);
    }

    #[test]
    fn bowler_overs_roll_over_after_six() {
        let mut b = BowlerStats::fresh("X");
        for _ in 0..5 {
            b.add_legal_ball();
        }
        assert_eq!(b.overs, 0.5);
        b.add_legal_ball();
        assert_eq!(b.overs, 1.0);
        b.add_legal_ball();
        b.add_legal_ball();
        assert_eq!(b.overs, 1.2);
        assert_eq!(b.legal_balls(), 8);
    }

    #[test]
    fn bowler_economy_recompute() {
        let mut b = BowlerStats::fresh("X");
        b.concede(3);
        b.refresh_economy();
        assert_eq!(b.economy_rate, 0.0);
        b.add_legal_ball();
        b.refresh_economy();
        assert_eq!(b.economy_rate, 18.0);
    }

    #[test]
    fn extras_total_tracks_categories() {
        let mut e = Extras::default();
        e.add_byes(2);
        e.add_leg_byes(1);
        e.add_wides(1);
        e.add_no_balls(1);
        e.add_penalties(5);
        assert_eq!(e.total, 10);
        assert_eq!(e.total, e.category_sum());
    }

    #[test]
    fn stats_use_camel_case_fields() {
        let json = serde_json::to_value(BatsmanStats::fresh("A")).unwrap();
        assert_eq!(json["strikeRate"], 0.0);
        assert_eq!(json["isOut"], false);
        let json = serde_json::to_value(Extras::default()).unwrap();
        assert_eq!(json["legByes"], 0);
        assert_eq!(json["noBalls"], 0);
    }
}
