use std::fmt;

use chrono::{DateTime, Utc};
use scoremate_types::{BallEvent, LogEntry, MatchId};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

const RECORD_DOMAIN: &[u8] = b"scoremate-ball-v1:";

/// Where in the innings an entry falls: completed overs and legal balls
/// already bowled in the current over, both taken before the entry applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallPosition {
    pub over: u32,
    pub ball: u32,
}

impl fmt::Display for BallPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.over, self.ball)
    }
}

/// One accepted entry in a match's log: a ball, or a roster change made
/// between balls.
///
/// `record_hash` is BLAKE3 over the canonical JSON of the record with the
/// hash field zeroed, so a record can be re-verified in isolation;
/// `prev_hash` links it to the record before.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallRecord {
    pub match_id: MatchId,
    /// 1-based, gapless per match.
    pub seq: u64,
    pub innings: u32,
    pub position: BallPosition,
    pub timestamp: DateTime<Utc>,
    pub entry: LogEntry,
    pub prev_hash: Option<[u8; 32]>,
    pub record_hash: [u8; 32],
}

impl BallRecord {
    /// Build a record and compute its hash.
    pub fn sealed(
        match_id: MatchId,
        seq: u64,
        innings: u32,
        position: BallPosition,
        timestamp: DateTime<Utc>,
        entry: LogEntry,
        prev_hash: Option<[u8; 32]>,
    ) -> StoreResult<Self> {
        let mut record = Self {
            match_id,
            seq,
            innings,
            position,
            timestamp,
            entry,
            prev_hash,
            record_hash: [0; 32],
        };
        record.record_hash = record.compute_hash()?;
        Ok(record)
    }

    /// Recompute the hash from the record's contents.
    pub fn compute_hash(&self) -> StoreResult<[u8; 32]> {
        let mut canonical = self.clone();
        canonical.record_hash = [0; 32];
        let encoded = serde_json::to_vec(&canonical)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut hasher = blake3::Hasher::new();
        hasher.update(RECORD_DOMAIN);
        hasher.update(&encoded);
        Ok(*hasher.finalize().as_bytes())
    }

    /// The ball, unless this record is a roster change.
    pub fn ball(&self) -> Option<&BallEvent> {
        self.entry.ball()
    }

    /// Whether the stored hash matches the contents.
    pub fn is_intact(&self) -> bool {
        self.compute_hash()
            .map(|hash| hash == self.record_hash)
            .unwrap_or(false)
    }

    pub fn record_hash_hex(&self) -> String {
        hex::encode(self.record_hash)
    }

    /// First 4 bytes of the hash as hex.
    pub fn short_hash(&self) -> String {
        hex::encode(&self.record_hash[..4])
    }
}
