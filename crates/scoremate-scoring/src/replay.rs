use scoremate_types::{BallEvent, LogEntry, MatchInfo};

use crate::error::ScoringError;
use crate::initializer::ScoreboardInitializer;
use crate::processor::BallProcessor;
use crate::scoreboard::Scoreboard;
use crate::warning::ScoringWarning;

/// Something that can be folded over a scoreboard during replay.
pub trait Replayable {
    fn replay_onto(
        &self,
        processor: &BallProcessor,
        scoreboard: &mut Scoreboard,
    ) -> Result<Vec<ScoringWarning>, ScoringError>;
}

impl Replayable for BallEvent {
    fn replay_onto(
        &self,
        processor: &BallProcessor,
        scoreboard: &mut Scoreboard,
    ) -> Result<Vec<ScoringWarning>, ScoringError> {
        processor.apply(scoreboard, self)
    }
}

impl Replayable for LogEntry {
    fn replay_onto(
        &self,
        processor: &BallProcessor,
        scoreboard: &mut Scoreboard,
    ) -> Result<Vec<ScoringWarning>, ScoringError> {
        match self {
            Self::Ball(event) => processor.apply(scoreboard, event),
            Self::Roster(change) => {
                *scoreboard = processor.apply_roster(scoreboard, change)?;
                Ok(Vec::new())
            }
        }
    }
}

/// Result of replaying a ball log into a scoreboard.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplayResult {
    pub scoreboard: Scoreboard,
    pub applied_events: u64,
    /// Warnings tagged with the 1-based position of the entry that raised them.
    pub warnings: Vec<(u64, ScoringWarning)>,
}

/// Deterministic replay helpers.
pub struct ReplayEngine;

impl ReplayEngine {
    /// Fold `events` (balls or log entries) over `initial` in order.
    pub fn replay<'a, I, E>(
        processor: &BallProcessor,
        initial: Scoreboard,
        events: I,
    ) -> Result<ReplayResult, ScoringError>
    where
        I: IntoIterator<Item = &'a E>,
        E: Replayable + 'a,
    {
        let mut scoreboard = initial;
        let mut applied_events = 0u64;
        let mut warnings = Vec::new();

        for event in events {
            applied_events += 1;
            let raised = event.replay_onto(processor, &mut scoreboard)?;
            warnings.extend(raised.into_iter().map(|w| (applied_events, w)));
        }

        Ok(ReplayResult {
            scoreboard,
            applied_events,
            warnings,
        })
    }

    /// Replay from the opening scoreboard of the match's current innings.
    pub fn replay_from_match<'a, I, E>(
        processor: &BallProcessor,
        info: &MatchInfo,
        events: I,
    ) -> Result<ReplayResult, ScoringError>
    where
        I: IntoIterator<Item = &'a E>,
        E: Replayable + 'a,
    {
        let initial = ScoreboardInitializer::initialize(info)?;
        Self::replay(processor, initial, events)
    }

    /// Whether `persisted` matches a full replay of the log.
    ///
    /// Fields owned by other collaborators (`lastUpdated`, `isComplete`,
    /// `result`) are not compared.
    pub fn verify_convergence<'a, I, E>(
        processor: &BallProcessor,
        info: &MatchInfo,
        events: I,
        persisted: &Scoreboard,
    ) -> Result<bool, ScoringError>
    where
        I: IntoIterator<Item = &'a E>,
        E: Replayable + 'a,
    {
        let replayed = Self::replay_from_match(processor, info, events)?.scoreboard;
        Ok(scoring_state(replayed) == scoring_state(persisted.clone()))
    }
}

fn scoring_state(mut board: Scoreboard) -> Scoreboard {
    board.last_updated = None;
    board.is_complete = false;
    board.result = None;
    board
}
