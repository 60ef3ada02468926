use scoremate_types::{resolve_batting_order, BatsmanStats, BowlerStats, Extras, MatchInfo};
use tracing::info;

use crate::error::ScoringError;
use crate::scoreboard::Scoreboard;

/// Builds the opening scoreboard of an innings from match metadata.
pub struct ScoreboardInitializer;

impl ScoreboardInitializer {
    /// Zeroed scoreboard with the opening pair and bowler in place.
    ///
    /// Fails without producing anything if a team name or an opening player
    /// is missing, or if both openers are the same player.
    pub fn initialize(info: &MatchInfo) -> Result<Scoreboard, ScoringError> {
        let host_team = required_team(&info.host_team.name, "host")?;
        let visitor_team = required_team(&info.visitor_team.name, "visitor")?;

        let opening = &info.opening_players;
        let striker = required_player(opening.striker.as_deref(), "striker")?;
        let non_striker = required_player(opening.non_striker.as_deref(), "non-striker")?;
        let bowler = required_player(opening.bowler.as_deref(), "bowler")?;
        if striker == non_striker {
            return Err(ScoringError::DuplicateOpeningBatsman(striker.to_string()));
        }

        let (batting_team, bowling_team) = match (&info.batting_team, &info.bowling_team) {
            (Some(batting), Some(bowling)) => (batting.clone(), bowling.clone()),
            _ => resolve_batting_order(
                host_team,
                visitor_team,
                info.toss_won_by,
                info.opted_to,
            ),
        };

        let scoreboard = Scoreboard {
            match_id: Some(info.id),
            host_team: host_team.to_string(),
            visitor_team: visitor_team.to_string(),
            current_innings: info.current_innings,
            batting_team: Some(batting_team),
            bowling_team: Some(bowling_team),
            score: 0,
            wickets: 0,
            overs: 0,
            balls: 0,
            target: info.target.unwrap_or(0),
            extras: Extras::default(),
            fall_of_wickets: Vec::new(),
            is_complete: false,
            result: None,
            last_updated: None,
            batsmen: vec![BatsmanStats::fresh(striker), BatsmanStats::fresh(non_striker)],
            bowlers: vec![BowlerStats::fresh(bowler)],
            striker: 0,
            non_striker: 1,
            bowler: 0,
            over_runs: 0,
        };

        info!(
            match_id = %info.id,
            innings = info.current_innings,
            striker,
            non_striker,
            bowler,
            "scoreboard initialized"
        );
        Ok(scoreboard)
    }
}

fn required_team<'a>(name: &'a str, side: &'static str) -> Result<&'a str, ScoringError> {
    let name = name.trim();
    if name.is_empty() {
        Err(ScoringError::UnresolvedTeam(side))
    } else {
        Ok(name)
    }
}

fn required_player<'a>(
    name: Option<&'a str>,
    role: &'static str,
) -> Result<&'a str, ScoringError> {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(ScoringError::MissingOpeningPlayer(role)),
    }
}
