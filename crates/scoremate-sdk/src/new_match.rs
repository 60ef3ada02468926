use scoremate_types::{
    MatchInfo, MatchSettings, OpeningPlayers, TeamInfo, TossDecision, TossSide,
};
use serde::{Deserialize, Serialize};

/// Request to create a match. The id, batting order and timestamps are
/// assigned on creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMatch {
    pub host_team: TeamInfo,
    pub visitor_team: TeamInfo,
    pub toss_won_by: TossSide,
    pub opted_to: TossDecision,
    pub overs: u32,
    #[serde(default)]
    pub settings: Option<MatchSettings>,
    #[serde(default)]
    pub opening_players: Option<OpeningPlayers>,
    /// Runs to chase, for a match scored from its second innings.
    #[serde(default)]
    pub target: Option<u32>,
}

impl NewMatch {
    pub fn new(
        host: impl Into<String>,
        visitor: impl Into<String>,
        toss_won_by: TossSide,
        opted_to: TossDecision,
        overs: u32,
    ) -> Self {
        Self {
            host_team: TeamInfo::new(host),
            visitor_team: TeamInfo::new(visitor),
            toss_won_by,
            opted_to,
            overs,
            settings: None,
            opening_players: None,
            target: None,
        }
    }

    pub fn with_settings(mut self, settings: MatchSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_opening_players(mut self, opening: OpeningPlayers) -> Self {
        self.opening_players = Some(opening);
        self
    }

    pub fn with_target(mut self, target: u32) -> Self {
        self.target = Some(target);
        self
    }

    /// Match metadata with a fresh id and the toss resolved.
    pub fn into_match_info(self) -> MatchInfo {
        let mut info = MatchInfo::new(
            self.host_team,
            self.visitor_team,
            self.toss_won_by,
            self.opted_to,
            self.overs,
        );
        info.settings = self.settings;
        info.opening_players = self.opening_players.unwrap_or_default();
        if let Some(target) = self.target {
            info.target = Some(target);
            info.current_innings = 2;
        }
        info
    }
}
