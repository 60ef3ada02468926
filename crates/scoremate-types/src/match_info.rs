use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::MatchId;

/// A side and its squad.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInfo {
    pub name: String,
    #[serde(default)]
    pub players: Vec<String>,
}

impl TeamInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            players: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TossSide {
    Host,
    Visitor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TossDecision {
    Bat,
    Bowl,
}

/// Penalty configuration for a wide or a no-ball.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraRule {
    pub reball: bool,
    pub runs: u32,
}

impl Default for ExtraRule {
    fn default() -> Self {
        Self {
            reball: true,
            runs: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSettings {
    pub players_per_team: u32,
    pub no_ball: ExtraRule,
    pub wide_ball: ExtraRule,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            players_per_team: 11,
            no_ball: ExtraRule::default(),
            wide_ball: ExtraRule::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningPlayers {
    #[serde(default)]
    pub striker: Option<String>,
    #[serde(default)]
    pub non_striker: Option<String>,
    #[serde(default)]
    pub bowler: Option<String>,
}

impl OpeningPlayers {
    pub fn new(striker: &str, non_striker: &str, bowler: &str) -> Self {
        Self {
            striker: Some(striker.to_string()),
            non_striker: Some(non_striker.to_string()),
            bowler: Some(bowler.to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Active,
    Completed,
    Abandoned,
}

/// Match metadata as held by the match store.
///
/// The scoring core only reads this.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    pub id: MatchId,
    pub host_team: TeamInfo,
    pub visitor_team: TeamInfo,
    pub toss_won_by: TossSide,
    pub opted_to: TossDecision,
    /// Overs per innings.
    pub overs: u32,
    #[serde(default)]
    pub settings: Option<MatchSettings>,
    #[serde(default)]
    pub opening_players: OpeningPlayers,
    #[serde(default = "first_innings")]
    pub current_innings: u32,
    #[serde(default)]
    pub batting_team: Option<String>,
    #[serde(default)]
    pub bowling_team: Option<String>,
    #[serde(default)]
    pub target: Option<u32>,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn first_innings() -> u32 {
    1
}

impl MatchInfo {
    /// A fresh first-innings match with the batting order resolved from the
    /// toss.
    pub fn new(
        host_team: TeamInfo,
        visitor_team: TeamInfo,
        toss_won_by: TossSide,
        opted_to: TossDecision,
        overs: u32,
    ) -> Self {
        let (batting, bowling) =
            resolve_batting_order(&host_team.name, &visitor_team.name, toss_won_by, opted_to);
        Self {
            id: MatchId::new(),
            host_team,
            visitor_team,
            toss_won_by,
            opted_to,
            overs,
            settings: None,
            opening_players: OpeningPlayers::default(),
            current_innings: 1,
            batting_team: Some(batting),
            bowling_team: Some(bowling),
            target: None,
            status: MatchStatus::Active,
            created_at: Some(Utc::now()),
        }
    }

    pub fn with_settings(mut self, settings: MatchSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_opening_players(mut self, opening: OpeningPlayers) -> Self {
        self.opening_players = opening;
        self
    }
}

/// `(batting, bowling)` team names after the toss: the winner bats if they
/// chose to, otherwise the other side does.
pub fn resolve_batting_order(
    host: &str,
    visitor: &str,
    toss_won_by: TossSide,
    opted_to: TossDecision,
) -> (String, String) {
    let (winner, loser) = match toss_won_by {
        TossSide::Host => (host, visitor),
        TossSide::Visitor => (visitor, host),
    };
    match opted_to {
        TossDecision::Bat => (winner.to_string(), loser.to_string()),
        TossDecision::Bowl => (loser.to_string(), winner.to_string()),
    }
}
