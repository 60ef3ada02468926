use chrono::{DateTime, Utc};
use scoremate_types::{BatsmanStats, BowlerStats, Extras, FallOfWicket, MatchId};
use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::scoreboard::Scoreboard;

/// Persisted scoreboard shape.
///
/// `currentBatsmen[0]` is the striker. `allBatsmen` / `allBowlers` repeat
/// the current players; on load the current entries win and are matched into
/// the rosters by name, so documents written with empty rosters still load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardDocument {
    #[serde(default)]
    pub match_id: Option<MatchId>,
    #[serde(default)]
    pub host_team: Option<String>,
    #[serde(default)]
    pub visitor_team: Option<String>,
    #[serde(default = "first_innings")]
    pub current_innings: u32,
    #[serde(default)]
    pub batting_team: Option<String>,
    #[serde(default)]
    pub bowling_team: Option<String>,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub wickets: u32,
    #[serde(default)]
    pub overs: u32,
    #[serde(default)]
    pub balls: u32,
    #[serde(default)]
    pub target: u32,
    #[serde(default)]
    pub extras: Extras,
    pub current_batsmen: Vec<BatsmanStats>,
    pub current_bowler: Option<BowlerStats>,
    #[serde(default)]
    pub all_batsmen: Vec<BatsmanStats>,
    #[serde(default)]
    pub all_bowlers: Vec<BowlerStats>,
    #[serde(default)]
    pub fall_of_wickets: Vec<FallOfWicket>,
    #[serde(default)]
    pub current_over_runs: u32,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

fn first_innings() -> u32 {
    1
}

impl From<Scoreboard> for ScoreboardDocument {
    fn from(board: Scoreboard) -> Self {
        let current_batsmen = vec![board.striker().clone(), board.non_striker().clone()];
        let current_bowler = Some(board.current_bowler().clone());
        Self {
            match_id: board.match_id,
            host_team: Some(board.host_team),
            visitor_team: Some(board.visitor_team),
            current_innings: board.current_innings,
            batting_team: board.batting_team,
            bowling_team: board.bowling_team,
            score: board.score,
            wickets: board.wickets,
            overs: board.overs,
            balls: board.balls,
            target: board.target,
            extras: board.extras,
            current_batsmen,
            current_bowler,
            all_batsmen: board.batsmen,
            all_bowlers: board.bowlers,
            fall_of_wickets: board.fall_of_wickets,
            current_over_runs: board.over_runs,
            is_complete: board.is_complete,
            result: board.result,
            last_updated: board.last_updated,
        }
    }
}

impl TryFrom<ScoreboardDocument> for Scoreboard {
    type Error = ScoringError;

    fn try_from(doc: ScoreboardDocument) -> Result<Self, Self::Error> {
        let [striker, non_striker]: [BatsmanStats; 2] =
            doc.current_batsmen.try_into().map_err(|v: Vec<BatsmanStats>| {
                ScoringError::MalformedDocument(format!(
                    "expected 2 current batsmen, found {}",
                    v.len()
                ))
            })?;
        let bowler = doc
            .current_bowler
            .ok_or_else(|| ScoringError::MalformedDocument("current bowler missing".into()))?;

        let mut batsmen = doc.all_batsmen;
        let striker_index = adopt(&mut batsmen, striker, |b| b.name.as_str());
        let non_striker_index = adopt(&mut batsmen, non_striker, |b| b.name.as_str());
        if striker_index == non_striker_index {
            return Err(ScoringError::MalformedDocument(format!(
                "striker and non-striker are both {}",
                batsmen[striker_index].name
            )));
        }

        let mut bowlers = doc.all_bowlers;
        let bowler_index = adopt(&mut bowlers, bowler, |b| b.name.as_str());

        Ok(Self {
            match_id: doc.match_id,
            host_team: doc.host_team.unwrap_or_default(),
            visitor_team: doc.visitor_team.unwrap_or_default(),
            current_innings: doc.current_innings,
            batting_team: doc.batting_team,
            bowling_team: doc.bowling_team,
            score: doc.score,
            wickets: doc.wickets,
            overs: doc.overs,
            balls: doc.balls,
            target: doc.target,
            extras: doc.extras,
            fall_of_wickets: doc.fall_of_wickets,
            is_complete: doc.is_complete,
            result: doc.result,
            last_updated: doc.last_updated,
            batsmen,
            bowlers,
            striker: striker_index,
            non_striker: non_striker_index,
            bowler: bowler_index,
            over_runs: doc.current_over_runs,
        })
    }
}

/// Overwrite the latest roster entry with `current`'s name, or append it.
fn adopt<T>(roster: &mut Vec<T>, current: T, name: impl Fn(&T) -> &str) -> usize {
    let wanted = name(&current).to_string();
    match roster.iter().rposition(|entry| name(entry) == wanted) {
        Some(index) => {
            roster[index] = current;
            index
        }
        None => {
            roster.push(current);
            roster.len() - 1
        }
    }
}

#[cfg(test)]
mod tests {
    use scoremate_types::{
        BallEvent, MatchInfo, OpeningPlayers, TeamInfo, TossDecision, TossSide, WicketType,
    };
    use serde_json::json;

    use super::*;
    use crate::initializer::ScoreboardInitializer;
    use crate::processor::BallProcessor;

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

    #[test]
    fn serializes_current_pair_with_striker_first() {
        let processor = BallProcessor::default();
        let board = processor
            .process(&board(), &BallEvent::normal(1))
            .unwrap()
            .scoreboard;
        let value = serde_json::to_value(&board).unwrap();
        assert_eq!(value["currentBatsmen"][0]["name"], "B");
        assert_eq!(value["currentBatsmen"][1]["name"], "A");
        assert_eq!(value["allBatsmen"][0]["name"], "A");
        assert_eq!(value["currentBowler"]["name"], "X");
        assert_eq!(value["score"], 1);
    }

    #[test]
    fn json_round_trip_preserves_roles() {
        let processor = BallProcessor::default();
        let mut b = board();
        for event in [
            BallEvent::normal(1),
            BallEvent::normal(0).with_wicket(WicketType::Caught, Some("C")),
            BallEvent::normal(4),
        ] {
            b = processor.process(&b, &event).unwrap().scoreboard;
        }
        let json = serde_json::to_string(&b).unwrap();
        let back: Scoreboard = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
        assert_eq!(back.striker().name, "C");
        assert_eq!(back.all_batsmen().len(), 3);
    }

    #[test]
    fn loads_document_with_empty_rosters() {
        let doc = json!({
            "hostTeam": "Hosts",
            "visitorTeam": "Visitors",
            "score": 0,
            "currentBatsmen": [
                {"name": "A", "runs": 0, "balls": 0, "fours": 0, "sixes": 0, "strikeRate": 0.0, "isOut": false},
                {"name": "B", "runs": 0, "balls": 0, "fours": 0, "sixes": 0, "strikeRate": 0.0, "isOut": false}
            ],
            "currentBowler": {"name": "X", "overs": 0.0, "maidens": 0, "runs": 0, "wickets": 0, "economyRate": 0.0},
            "allBatsmen": [],
            "allBowlers": []
        });
        let board: Scoreboard = serde_json::from_value(doc).unwrap();
        assert_eq!(board.all_batsmen().len(), 2);
        assert_eq!(board.striker().name, "A");
        assert_eq!(board.current_bowler().name, "X");
        assert_eq!(board.current_innings, 1);
    }

    #[test]
    fn rejects_wrong_number_of_current_batsmen() {
        let doc = json!({
            "currentBatsmen": [
                {"name": "A", "runs": 0, "balls": 0, "fours": 0, "sixes": 0, "strikeRate": 0.0, "isOut": false}
            ],
            "currentBowler": {"name": "X", "overs": 0.0, "maidens": 0, "runs": 0, "wickets": 0, "economyRate": 0.0}
        });
        let err = serde_json::from_value::<Scoreboard>(doc).unwrap_err();
        assert!(err.to_string().contains("expected 2 current batsmen"));
    }

    #[test]
    fn rejects_missing_bowler() {
        let doc = ScoreboardDocument::from(board());
        let mut doc = doc;
        doc.current_bowler = None;
        let err = Scoreboard::try_from(doc).unwrap_err();
        assert_eq!(
            err,
            ScoringError::MalformedDocument("current bowler missing".into())
        );
    }
}
