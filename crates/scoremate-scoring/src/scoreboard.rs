use chrono::{DateTime, Utc};
use scoremate_types::{BatsmanStats, BowlerStats, Extras, FallOfWicket, MatchId};
use serde::{Deserialize, Serialize};

use crate::document::ScoreboardDocument;

/// Batting role at the crease.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Striker,
    NonStriker,
}

/// Innings scoreboard.
///
/// Every batsman and bowler who has taken part lives once in an arena;
/// striker, non-striker and current bowler are indices into it, so the
/// "current" and "all players" views cannot drift apart. The arena is
/// append-only.
///
/// Serializes through [`ScoreboardDocument`], the persisted shape with
/// `currentBatsmen` / `allBatsmen` lists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "ScoreboardDocument", try_from = "ScoreboardDocument")]
pub struct Scoreboard {
    pub match_id: Option<MatchId>,
    pub host_team: String,
    pub visitor_team: String,
    pub current_innings: u32,
    pub batting_team: Option<String>,
    pub bowling_team: Option<String>,
    pub score: u32,
    pub wickets: u32,
    /// Completed overs.
    pub overs: u32,
    /// Legal balls in the current over, 0 to 5.
    pub balls: u32,
    pub target: u32,
    pub extras: Extras,
    pub fall_of_wickets: Vec<FallOfWicket>,
    pub is_complete: bool,
    pub result: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub(crate) batsmen: Vec<BatsmanStats>,
    pub(crate) bowlers: Vec<BowlerStats>,
    pub(crate) striker: usize,
    pub(crate) non_striker: usize,
    pub(crate) bowler: usize,
    /// Runs charged to the current bowler in the current over.
    pub(crate) over_runs: u32,
}

impl Scoreboard {
    pub fn striker(&self) -> &BatsmanStats {
        &self.batsmen[self.striker]
    }

    pub fn non_striker(&self) -> &BatsmanStats {
        &self.batsmen[self.non_striker]
    }

    /// `[striker, non-striker]`.
    pub fn current_batsmen(&self) -> [&BatsmanStats; 2] {
        [self.striker(), self.non_striker()]
    }

    pub fn current_bowler(&self) -> &BowlerStats {
        &self.bowlers[self.bowler]
    }

    /// Every batsman who has come to the crease, in order of arrival.
    pub fn all_batsmen(&self) -> &[BatsmanStats] {
        &self.batsmen
    }

    /// Every bowler who has bowled, in order of first appearance.
    pub fn all_bowlers(&self) -> &[BowlerStats] {
        &self.bowlers
    }

    pub fn striker_index(&self) -> usize {
        self.striker
    }

    pub fn non_striker_index(&self) -> usize {
        self.non_striker
    }

    pub fn bowler_index(&self) -> usize {
        self.bowler
    }

    /// Runs charged to the current bowler so far in this over.
    pub fn over_runs(&self) -> u32 {
        self.over_runs
    }

    /// Legal deliveries in the innings so far.
    pub fn legal_balls(&self) -> u32 {
        self.overs * scoremate_types::BALLS_PER_OVER + self.balls
    }

    /// Swap striker and non-striker. The arena is untouched.
    pub fn rotate_strike(&mut self) {
        std::mem::swap(&mut self.striker, &mut self.non_striker);
    }

    pub fn slot_index(&self, slot: Slot) -> usize {
        match slot {
            Slot::Striker => self.striker,
            Slot::NonStriker => self.non_striker,
        }
    }

    /// Which slot, if any, holds the given arena entry.
    pub fn slot_of_index(&self, index: usize) -> Option<Slot> {
        if index == self.striker {
            Some(Slot::Striker)
        } else if index == self.non_striker {
            Some(Slot::NonStriker)
        } else {
            None
        }
    }

    /// Arena index of the not-out batsman at the crease with this name.
    pub fn find_at_crease(&self, name: &str) -> Option<usize> {
        [self.striker, self.non_striker]
            .into_iter()
            .find(|&i| !self.batsmen[i].is_out && self.batsmen[i].name == name)
    }

    /// Whether a batsman with this name has already been dismissed.
    pub fn is_dismissed(&self, name: &str) -> bool {
        self.batsmen.iter().any(|b| b.is_out && b.name == name)
    }

    /// First slot whose occupant is out and waiting to be replaced,
    /// striker's end first.
    pub fn vacant_slot(&self) -> Option<Slot> {
        [Slot::Striker, Slot::NonStriker]
            .into_iter()
            .find(|&slot| self.batsmen[self.slot_index(slot)].is_out)
    }

    pub(crate) fn batsman_mut(&mut self, index: usize) -> &mut BatsmanStats {
        &mut self.batsmen[index]
    }

    pub(crate) fn current_bowler_mut(&mut self) -> &mut BowlerStats {
        &mut self.bowlers[self.bowler]
    }

    /// Put a new batsman with zeroed figures into `slot`.
    pub(crate) fn replace_in_slot(&mut self, slot: Slot, name: &str) {
        self.batsmen.push(BatsmanStats::fresh(name));
        let index = self.batsmen.len() - 1;
        match slot {
            Slot::Striker => self.striker = index,
            Slot::NonStriker => self.non_striker = index,
        }
    }

    /// Make `name` the current bowler, reusing their arena entry if they
    /// have bowled before.
    pub(crate) fn set_current_bowler(&mut self, name: &str) {
        self.bowler = match self.bowlers.iter().position(|b| b.name == name) {
            Some(index) => index,
            None => {
                self.bowlers.push(BowlerStats::fresh(name));
                self.bowlers.len() - 1
            }
        };
        self.over_runs = 0;
    }
}
