use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use scoremate_scoring::Scoreboard;
use scoremate_types::{LogEntry, MatchId, MatchInfo};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::record::{BallPosition, BallRecord};
use crate::traits::{BallLog, MatchStore, ScoreboardStore, Versioned};

/// In-memory match metadata, for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryMatchStore {
    matches: RwLock<HashMap<MatchId, MatchInfo>>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatchStore for InMemoryMatchStore {
    fn create(&self, info: &MatchInfo) -> StoreResult<()> {
        let mut map = self
            .matches
            .write()
            .map_err(|_| StoreError::LockPoisoned("match store"))?;
        if map.contains_key(&info.id) {
            return Err(StoreError::DuplicateMatch(info.id));
        }
        map.insert(info.id, info.clone());
        Ok(())
    }

    fn get(&self, id: &MatchId) -> StoreResult<Option<MatchInfo>> {
        let map = self
            .matches
            .read()
            .map_err(|_| StoreError::LockPoisoned("match store"))?;
        Ok(map.get(id).cloned())
    }

    fn update(&self, info: &MatchInfo) -> StoreResult<()> {
        let mut map = self
            .matches
            .write()
            .map_err(|_| StoreError::LockPoisoned("match store"))?;
        let slot = map
            .get_mut(&info.id)
            .ok_or(StoreError::MatchNotFound(info.id))?;
        *slot = info.clone();
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<MatchInfo>> {
        let map = self
            .matches
            .read()
            .map_err(|_| StoreError::LockPoisoned("match store"))?;
        let mut matches: Vec<MatchInfo> = map.values().cloned().collect();
        // v7 ids sort by creation time.
        matches.sort_by_key(|m| m.id);
        Ok(matches)
    }
}

/// In-memory versioned scoreboards.
#[derive(Debug, Default)]
pub struct InMemoryScoreboardStore {
    boards: RwLock<HashMap<MatchId, Versioned<Scoreboard>>>,
}

impl InMemoryScoreboardStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreboardStore for InMemoryScoreboardStore {
    fn read(&self, id: &MatchId) -> StoreResult<Option<Versioned<Scoreboard>>> {
        let map = self
            .boards
            .read()
            .map_err(|_| StoreError::LockPoisoned("scoreboard store"))?;
        Ok(map.get(id).cloned())
    }

    fn write(
        &self,
        id: &MatchId,
        scoreboard: &Scoreboard,
        expected_version: u64,
    ) -> StoreResult<u64> {
        let mut map = self
            .boards
            .write()
            .map_err(|_| StoreError::LockPoisoned("scoreboard store"))?;
        let found = map.get(id).map(|v| v.version).unwrap_or(0);
        if found != expected_version {
            return Err(StoreError::VersionConflict {
                match_id: *id,
                expected: expected_version,
                found,
            });
        }
        let version = found + 1;
        map.insert(
            *id,
            Versioned {
                version,
                value: scoreboard.clone(),
            },
        );
        debug!(match_id = %id, version, "scoreboard written");
        Ok(version)
    }
}

/// In-memory ball log, one chain per match.
#[derive(Debug, Default)]
pub struct InMemoryBallLog {
    streams: RwLock<HashMap<MatchId, Vec<BallRecord>>>,
}

impl InMemoryBallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches with at least one ball recorded.
    pub fn matches(&self) -> StoreResult<Vec<MatchId>> {
        let streams = self
            .streams
            .read()
            .map_err(|_| StoreError::LockPoisoned("ball log"))?;
        let mut ids: Vec<MatchId> = streams.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }
}

fn push_checked(stream: &mut Vec<BallRecord>, record: BallRecord) -> StoreResult<()> {
    let expected_seq = (stream.len() + 1) as u64;
    if record.seq != expected_seq {
        return Err(StoreError::IntegrityViolation {
            seq: record.seq,
            reason: format!("append attempted out of order; expected seq {expected_seq}"),
        });
    }
    let expected_prev = stream.last().map(|r| r.record_hash);
    if record.prev_hash != expected_prev {
        return Err(StoreError::IntegrityViolation {
            seq: record.seq,
            reason: "append attempted with mismatched previous hash".into(),
        });
    }
    if record.compute_hash()? != record.record_hash {
        return Err(StoreError::IntegrityViolation {
            seq: record.seq,
            reason: "record hash mismatch".into(),
        });
    }
    stream.push(record);
    Ok(())
}

impl BallLog for InMemoryBallLog {
    fn append(
        &self,
        id: &MatchId,
        innings: u32,
        position: BallPosition,
        entry: &LogEntry,
    ) -> StoreResult<BallRecord> {
        let mut streams = self
            .streams
            .write()
            .map_err(|_| StoreError::LockPoisoned("ball log"))?;
        let stream = streams.entry(*id).or_default();
        let last = stream.last();

        // Timestamps never run backwards within a chain.
        let now = Utc::now();
        let timestamp = match last {
            Some(prev) if prev.timestamp > now => prev.timestamp,
            _ => now,
        };
        let record = BallRecord::sealed(
            *id,
            (stream.len() + 1) as u64,
            innings,
            position,
            timestamp,
            entry.clone(),
            last.map(|r| r.record_hash),
        )?;

        push_checked(stream, record.clone())?;
        debug!(match_id = %id, seq = record.seq, hash = %record.short_hash(), "entry appended");
        Ok(record)
    }

    fn append_record(&self, record: BallRecord) -> StoreResult<()> {
        let mut streams = self
            .streams
            .write()
            .map_err(|_| StoreError::LockPoisoned("ball log"))?;
        push_checked(streams.entry(record.match_id).or_default(), record)
    }

    fn head(&self, id: &MatchId) -> StoreResult<Option<BallRecord>> {
        let streams = self
            .streams
            .read()
            .map_err(|_| StoreError::LockPoisoned("ball log"))?;
        Ok(streams.get(id).and_then(|s| s.last()).cloned())
    }

    fn read_range(&self, id: &MatchId, from_seq: u64, to_seq: u64) -> StoreResult<Vec<BallRecord>> {
        if from_seq == 0 || to_seq == 0 || from_seq > to_seq {
            return Err(StoreError::InvalidRange {
                from: from_seq,
                to: to_seq,
            });
        }
        let streams = self
            .streams
            .read()
            .map_err(|_| StoreError::LockPoisoned("ball log"))?;
        let Some(stream) = streams.get(id) else {
            return Ok(vec![]);
        };

        let start = (from_seq - 1) as usize;
        if start >= stream.len() {
            return Ok(vec![]);
        }
        let end_exclusive = to_seq.min(stream.len() as u64) as usize;
        Ok(stream[start..end_exclusive].to_vec())
    }

    fn read_all(&self, id: &MatchId) -> StoreResult<Vec<BallRecord>> {
        let streams = self
            .streams
            .read()
            .map_err(|_| StoreError::LockPoisoned("ball log"))?;
        Ok(streams.get(id).cloned().unwrap_or_default())
    }

    fn len(&self, id: &MatchId) -> StoreResult<u64> {
        let streams = self
            .streams
            .read()
            .map_err(|_| StoreError::LockPoisoned("ball log"))?;
        Ok(streams.get(id).map(|s| s.len() as u64).unwrap_or(0))
    }
}
