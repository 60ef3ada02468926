use scoremate_scoring::Scoreboard;
use scoremate_types::{LogEntry, MatchId, MatchInfo};

use crate::error::{StoreError, StoreResult};
use crate::record::{BallPosition, BallRecord};

/// A stored value with the version it was written at. Versions start at 1.
#[derive(Clone, Debug, PartialEq)]
pub struct Versioned<T> {
    pub version: u64,
    pub value: T,
}

/// Match metadata.
pub trait MatchStore: Send + Sync {
    /// Fails with `DuplicateMatch` if the id is taken.
    fn create(&self, info: &MatchInfo) -> StoreResult<()>;

    fn get(&self, id: &MatchId) -> StoreResult<Option<MatchInfo>>;

    /// Fails with `MatchNotFound` if the match was never created.
    fn update(&self, info: &MatchInfo) -> StoreResult<()>;

    /// All matches, oldest first.
    fn list(&self) -> StoreResult<Vec<MatchInfo>>;
}

/// Latest scoreboard per match.
pub trait ScoreboardStore: Send + Sync {
    fn read(&self, id: &MatchId) -> StoreResult<Option<Versioned<Scoreboard>>>;

    /// Replace the scoreboard if it is still at `expected_version` (0 for a
    /// match with no scoreboard yet). Returns the new version, or
    /// `VersionConflict` when another write got there first.
    fn write(&self, id: &MatchId, scoreboard: &Scoreboard, expected_version: u64)
        -> StoreResult<u64>;
}

/// Append-only, hash-chained ball log.
pub trait BallLog: Send + Sync {
    /// Seal and append the next entry for `id`, assigning seq, timestamp
    /// and the link to the previous record.
    fn append(
        &self,
        id: &MatchId,
        innings: u32,
        position: BallPosition,
        entry: &LogEntry,
    ) -> StoreResult<BallRecord>;

    /// Append an already-sealed record, e.g. when importing a log. It must
    /// be the next seq, link to the current head and carry a valid hash.
    fn append_record(&self, record: BallRecord) -> StoreResult<()>;

    fn head(&self, id: &MatchId) -> StoreResult<Option<BallRecord>>;

    /// Records `from_seq..=to_seq`, clipped to what exists.
    fn read_range(&self, id: &MatchId, from_seq: u64, to_seq: u64)
        -> StoreResult<Vec<BallRecord>>;

    fn read_all(&self, id: &MatchId) -> StoreResult<Vec<BallRecord>>;

    fn len(&self, id: &MatchId) -> StoreResult<u64>;

    /// Check seq continuity, hash links and every record hash.
    fn verify_chain(&self, id: &MatchId) -> StoreResult<()> {
        verify_records(&self.read_all(id)?)
    }
}

/// Chain check over a slice of records from one match, in log order.
pub fn verify_records(records: &[BallRecord]) -> StoreResult<()> {
    let mut prev: Option<[u8; 32]> = None;
    for (index, record) in records.iter().enumerate() {
        let expected_seq = (index + 1) as u64;
        if record.seq != expected_seq {
            return Err(StoreError::IntegrityViolation {
                seq: record.seq,
                reason: format!("expected seq {expected_seq}, found {}", record.seq),
            });
        }
        if record.prev_hash != prev {
            return Err(StoreError::IntegrityViolation {
                seq: record.seq,
                reason: "previous hash link mismatch".into(),
            });
        }
        if record.compute_hash()? != record.record_hash {
            return Err(StoreError::IntegrityViolation {
                seq: record.seq,
                reason: "record hash mismatch".into(),
            });
        }
        prev = Some(record.record_hash);
    }
    Ok(())
}
