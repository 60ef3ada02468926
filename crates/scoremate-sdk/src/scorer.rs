use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use scoremate_scoring::{
    BallProcessor, InningsSummary, ReplayEngine, Scoreboard, ScoreboardInitializer,
    ScoreboardValidator, ScoringRules, ScoringWarning, ValidationReport,
};
use scoremate_store::{
    BallLog, BallPosition, BallRecord, InMemoryBallLog, InMemoryMatchStore,
    InMemoryScoreboardStore, MatchStore, ScoreboardStore, Versioned,
};
use scoremate_types::{
    BallEvent, LogEntry, MatchId, MatchInfo, MatchStatus, OpeningPlayers, RosterChange,
};
use tracing::{error, info};

use crate::error::{SdkError, SdkResult};
use crate::intake;
use crate::new_match::NewMatch;

/// What recording one log entry (a ball or a roster change) produced.
#[derive(Clone, Debug)]
pub struct BallReceipt {
    pub record: BallRecord,
    pub scoreboard: Scoreboard,
    pub warnings: Vec<ScoringWarning>,
    /// Scoreboard version after the write.
    pub version: u64,
}

/// Result of auditing a match.
#[derive(Clone, Debug)]
pub struct MatchAudit {
    /// Log entries replayed.
    pub balls: u64,
    /// Why the ball log failed its chain check, if it did.
    pub chain_error: Option<String>,
    pub validation: ValidationReport,
    /// Whether replaying the log reproduces the stored scoreboard.
    pub replay_converges: bool,
}

impl MatchAudit {
    pub fn is_sound(&self) -> bool {
        self.chain_error.is_none() && self.validation.is_valid() && self.replay_converges
    }
}

pub type InMemoryScorer = MatchScorer<InMemoryMatchStore, InMemoryScoreboardStore, InMemoryBallLog>;

/// Match scoring over pluggable stores.
///
/// Every scoreboard update for a match runs read, compute, write under that
/// match's lock, and the write names the version it was computed from.
pub struct MatchScorer<M, S, L> {
    matches: M,
    boards: S,
    log: L,
    rules: Option<ScoringRules>,
    locks: Mutex<HashMap<MatchId, Arc<Mutex<()>>>>,
}

impl InMemoryScorer {
    /// A scorer over fresh in-memory stores.
    pub fn in_memory() -> Self {
        Self::new(
            InMemoryMatchStore::new(),
            InMemoryScoreboardStore::new(),
            InMemoryBallLog::new(),
        )
    }
}

impl<M: MatchStore, S: ScoreboardStore, L: BallLog> MatchScorer<M, S, L> {
    pub fn new(matches: M, boards: S, log: L) -> Self {
        Self {
            matches,
            boards,
            log,
            rules: None,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Use `rules` for every match instead of rules derived from each
    /// match's settings.
    pub fn with_rules(mut self, rules: ScoringRules) -> Self {
        self.rules = Some(rules);
        self
    }

    // ---- Match setup ----

    /// Create a match. If the request names opening players the scoreboard
    /// is initialized straight away.
    pub fn create_match(&self, request: NewMatch) -> SdkResult<MatchInfo> {
        intake::check_match(&request)?;
        let info = request.into_match_info();
        let opening_named = info.opening_players.striker.is_some()
            || info.opening_players.non_striker.is_some()
            || info.opening_players.bowler.is_some();

        // Initialize before storing so a bad opening trio stores nothing.
        let board = if opening_named {
            Some(self.opening_scoreboard(&info)?)
        } else {
            None
        };
        self.matches.create(&info)?;
        info!(
            match_id = %info.id,
            batting = info.batting_team.as_deref().unwrap_or_default(),
            bowling = info.bowling_team.as_deref().unwrap_or_default(),
            overs = info.overs,
            "match created"
        );
        if let Some(board) = board {
            self.boards.write(&info.id, &board, 0)?;
        }
        Ok(info)
    }

    /// Name the opening batsmen and bowler and derive the opening
    /// scoreboard. Refused once a ball has been recorded.
    pub fn set_opening_players(
        &self,
        id: &MatchId,
        opening: OpeningPlayers,
    ) -> SdkResult<Scoreboard> {
        let lock = self.lock_for(id)?;
        let _guard = lock
            .lock()
            .map_err(|_| SdkError::Internal("match lock poisoned".into()))?;

        let mut info = self.match_info(id)?;
        if self.log.len(id)? > 0 {
            return Err(SdkError::InvalidOperation(
                "opening players cannot change after play has started".into(),
            ));
        }
        info.opening_players = opening;
        let board = self.opening_scoreboard(&info)?;
        let expected = self.boards.read(id)?.map(|v| v.version).unwrap_or(0);

        self.matches.update(&info)?;
        self.boards.write(id, &board, expected)?;
        Ok(board)
    }

    fn opening_scoreboard(&self, info: &MatchInfo) -> SdkResult<Scoreboard> {
        let mut board = ScoreboardInitializer::initialize(info)?;
        board.last_updated = Some(Utc::now());
        Ok(board)
    }

    // ---- Scoring ----

    /// Validate, score and persist one ball.
    pub fn record_ball(&self, id: &MatchId, event: &BallEvent) -> SdkResult<BallReceipt> {
        intake::check_ball(event)?;

        let lock = self.lock_for(id)?;
        let _guard = lock
            .lock()
            .map_err(|_| SdkError::Internal("match lock poisoned".into()))?;

        let (info, current) = self.active_scoreboard(id)?;
        let outcome = self.processor_for(&info).process(&current.value, event)?;
        let mut scoreboard = outcome.scoreboard;
        scoreboard.last_updated = Some(Utc::now());

        let entry = LogEntry::Ball(event.clone());
        let (record, version) = self.commit(id, &current, &scoreboard, &entry)?;

        info!(
            match_id = %id,
            seq = record.seq,
            score = scoreboard.score,
            wickets = scoreboard.wickets,
            overs = scoreboard.overs,
            balls = scoreboard.balls,
            warnings = outcome.warnings.len(),
            "ball recorded"
        );
        Ok(BallReceipt {
            record,
            scoreboard,
            warnings: outcome.warnings,
            version,
        })
    }

    /// Record a ball or a roster change.
    pub fn record(&self, id: &MatchId, entry: &LogEntry) -> SdkResult<BallReceipt> {
        match entry {
            LogEntry::Ball(event) => self.record_ball(id, event),
            LogEntry::Roster(change) => self.record_roster(id, change.clone()),
        }
    }

    /// Send in a batsman to fill a slot whose occupant is out.
    pub fn bring_in_batsman(&self, id: &MatchId, name: &str) -> SdkResult<BallReceipt> {
        self.record_roster(
            id,
            RosterChange::BatsmanIn {
                name: name.to_string(),
            },
        )
    }

    /// Hand the ball to another bowler between overs.
    pub fn change_bowler(&self, id: &MatchId, name: &str) -> SdkResult<BallReceipt> {
        self.record_roster(
            id,
            RosterChange::BowlerChange {
                name: name.to_string(),
            },
        )
    }

    fn record_roster(&self, id: &MatchId, change: RosterChange) -> SdkResult<BallReceipt> {
        intake::check_roster(&change)?;

        let lock = self.lock_for(id)?;
        let _guard = lock
            .lock()
            .map_err(|_| SdkError::Internal("match lock poisoned".into()))?;

        let (info, current) = self.active_scoreboard(id)?;
        let mut scoreboard = self
            .processor_for(&info)
            .apply_roster(&current.value, &change)?;
        scoreboard.last_updated = Some(Utc::now());

        let (record, version) =
            self.commit(id, &current, &scoreboard, &LogEntry::Roster(change.clone()))?;
        info!(match_id = %id, seq = record.seq, %change, "roster change recorded");
        Ok(BallReceipt {
            record,
            scoreboard,
            warnings: Vec::new(),
            version,
        })
    }

    fn active_scoreboard(&self, id: &MatchId) -> SdkResult<(MatchInfo, Versioned<Scoreboard>)> {
        let info = self.match_info(id)?;
        if info.status != MatchStatus::Active {
            return Err(SdkError::MatchNotActive(*id));
        }
        let current = self
            .boards
            .read(id)?
            .ok_or(SdkError::ScoreboardNotInitialized(*id))?;
        Ok((info, current))
    }

    /// Write `next` over `current`, then append `entry` to the log.
    ///
    /// A refused scoreboard write leaves the log untouched. A failed append
    /// puts `current` back, so the log and the scoreboard never disagree
    /// about which entries were applied.
    fn commit(
        &self,
        id: &MatchId,
        current: &Versioned<Scoreboard>,
        next: &Scoreboard,
        entry: &LogEntry,
    ) -> SdkResult<(BallRecord, u64)> {
        let version = self.boards.write(id, next, current.version)?;
        let position = BallPosition {
            over: current.value.overs,
            ball: current.value.balls,
        };
        match self
            .log
            .append(id, current.value.current_innings, position, entry)
        {
            Ok(record) => Ok((record, version)),
            Err(err) => {
                if let Err(restore) = self.boards.write(id, &current.value, version) {
                    error!(match_id = %id, error = %restore, "scoreboard not restored after failed append");
                }
                Err(err.into())
            }
        }
    }

    /// Record balls in order, stopping at the first error.
    pub fn record_balls<'a, I>(&self, id: &MatchId, events: I) -> SdkResult<Vec<BallReceipt>>
    where
        I: IntoIterator<Item = &'a BallEvent>,
    {
        events
            .into_iter()
            .map(|event| self.record_ball(id, event))
            .collect()
    }

    fn processor_for(&self, info: &MatchInfo) -> BallProcessor {
        let rules = self
            .rules
            .clone()
            .unwrap_or_else(|| ScoringRules::for_match(info));
        BallProcessor::new(rules)
    }

    fn lock_for(&self, id: &MatchId) -> SdkResult<Arc<Mutex<()>>> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| SdkError::Internal("lock table poisoned".into()))?;
        Ok(locks.entry(*id).or_default().clone())
    }

    // ---- Queries ----

    pub fn match_info(&self, id: &MatchId) -> SdkResult<MatchInfo> {
        self.matches.get(id)?.ok_or(SdkError::MatchNotFound(*id))
    }

    pub fn matches(&self) -> SdkResult<Vec<MatchInfo>> {
        Ok(self.matches.list()?)
    }

    pub fn scoreboard(&self, id: &MatchId) -> SdkResult<Scoreboard> {
        self.boards
            .read(id)?
            .map(|v| v.value)
            .ok_or(SdkError::ScoreboardNotInitialized(*id))
    }

    pub fn balls(&self, id: &MatchId) -> SdkResult<Vec<BallRecord>> {
        Ok(self.log.read_all(id)?)
    }

    pub fn summary(&self, id: &MatchId) -> SdkResult<InningsSummary> {
        let info = self.match_info(id)?;
        let board = self.scoreboard(id)?;
        Ok(InningsSummary::from_scoreboard(&board, Some(info.overs)))
    }

    // ---- Audit ----

    /// Check the ball log chain, the scoreboard invariants, and that
    /// replaying the log reproduces the stored scoreboard.
    pub fn audit(&self, id: &MatchId) -> SdkResult<MatchAudit> {
        let info = self.match_info(id)?;
        let board = self.scoreboard(id)?;
        let records = self.log.read_all(id)?;

        let chain_error = self.log.verify_chain(id).err().map(|e| e.to_string());
        let validation = ScoreboardValidator::validate(&board);
        let replay_converges = ReplayEngine::verify_convergence(
            &self.processor_for(&info),
            &info,
            records.iter().map(|r| &r.entry),
            &board,
        )?;

        Ok(MatchAudit {
            balls: records.len() as u64,
            chain_error,
            validation,
            replay_converges,
        })
    }

    // ---- Accessors ----

    pub fn match_store(&self) -> &M {
        &self.matches
    }

    pub fn scoreboard_store(&self) -> &S {
        &self.boards
    }

    pub fn ball_log(&self) -> &L {
        &self.log
    }
}
