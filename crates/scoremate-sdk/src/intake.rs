//! Structural checks applied before anything reaches the scoring core.

use scoremate_types::{BallEvent, RosterChange};

use crate::error::{SdkError, SdkResult};
use crate::new_match::NewMatch;

/// Most runs a single delivery can add off the bat or as byes.
pub const MAX_RUNS_PER_BALL: u32 = 6;

/// Reject a ball event the processor should never see.
pub fn check_ball(event: &BallEvent) -> SdkResult<()> {
    if event.runs > MAX_RUNS_PER_BALL {
        return Err(SdkError::InvalidBall(format!(
            "{} runs off one ball; at most {MAX_RUNS_PER_BALL}",
            event.runs
        )));
    }
    if event.is_wicket && event.wicket_type.is_none() {
        return Err(SdkError::InvalidBall("wicket without a wicket type".into()));
    }
    if !event.is_wicket && event.new_batsman.is_some() {
        return Err(SdkError::InvalidBall(
            "new batsman given but no wicket fell".into(),
        ));
    }
    for (field, name) in [
        ("batsman", &event.batsman),
        ("bowler", &event.bowler),
        ("newBatsman", &event.new_batsman),
    ] {
        if name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(SdkError::InvalidBall(format!("{field} must not be blank")));
        }
    }
    Ok(())
}

/// Reject a roster change with no usable name.
pub fn check_roster(change: &RosterChange) -> SdkResult<()> {
    if change.name().trim().is_empty() {
        return Err(SdkError::InvalidOperation(
            "roster change needs a name".into(),
        ));
    }
    Ok(())
}

/// Reject a match request that could never be scored.
pub fn check_match(request: &NewMatch) -> SdkResult<()> {
    let host = request.host_team.name.trim();
    let visitor = request.visitor_team.name.trim();
    if host.is_empty() || visitor.is_empty() {
        return Err(SdkError::InvalidMatch("team names must not be empty".into()));
    }
    if host == visitor {
        return Err(SdkError::InvalidMatch(format!(
            "host and visitor are both {host}"
        )));
    }
    if request.overs == 0 {
        return Err(SdkError::InvalidMatch("overs must be at least 1".into()));
    }
    if let Some(settings) = &request.settings {
        if settings.players_per_team < 2 {
            return Err(SdkError::InvalidMatch(format!(
                "{} players per team; need at least 2",
                settings.players_per_team
            )));
        }
    }
    Ok(())
}
