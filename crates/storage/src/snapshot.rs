use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use teori_core::model::Question;

use crate::repository::{SnapshotStore, StorageError};

/// Fixed key the session snapshot lives under, shared with the original
/// web build of this app so a data file export stays recognizable.
pub const SNAPSHOT_KEY: &str = "quiz_timer_state_v1";

//
// ─── SNAPSHOT ─────────────────────────────────────────────────────────────────
//

/// The persisted subset of session state.
///
/// This mirrors the session fields the engine needs to survive a restart,
/// so the store can serialize/deserialize without leaking persistence
/// concerns into the engine. On the wire it is a JSON object:
///
/// ```json
/// { "started": true, "timeLeft": 2992, "current": 4, "score": 3, "shuffled": [ ... ] }
/// ```
///
/// Every field is optional on the way back in: decoding accepts each field
/// independently and only when it is well-typed, so schema drift in either
/// direction degrades one field, not the whole snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Whether the countdown was running when the snapshot was taken.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started: Option<bool>,
    #[serde(rename = "timeLeft", skip_serializing_if = "Option::is_none")]
    pub time_left: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shuffled: Option<Vec<Question>>,
}

impl SessionSnapshot {
    /// Snapshot a live session's persisted fields.
    #[must_use]
    pub fn capture(
        started: bool,
        time_left: u32,
        current: usize,
        score: u32,
        shuffled: &[Question],
    ) -> Self {
        Self {
            started: Some(started),
            time_left: Some(time_left),
            current: Some(current),
            score: Some(score),
            shuffled: Some(shuffled.to_vec()),
        }
    }

    /// Serialize to the wire shape. Absent fields are omitted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the snapshot cannot be
    /// serialized.
    pub fn encode(&self) -> Result<Vec<u8>, StorageError> {
        serde_json::to_vec(self).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Decode a snapshot leniently.
    ///
    /// Bytes that are not a JSON object decode to `None` ("no saved
    /// session"). Inside an object, each field is taken only when it is
    /// present and of the right type; anything else leaves that field
    /// unset. A `shuffled` array whose elements do not parse as questions
    /// counts as malformed and is dropped as a whole field.
    #[must_use]
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        let value: Value = serde_json::from_slice(bytes).ok()?;
        if !value.is_object() {
            return None;
        }

        let time_left = value
            .get("timeLeft")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok());
        let current = value
            .get("current")
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok());
        let score = value
            .get("score")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok());
        let shuffled = value
            .get("shuffled")
            .filter(|v| v.is_array())
            .and_then(|v| serde_json::from_value::<Vec<Question>>(v.clone()).ok());

        Some(Self {
            started: value.get("started").and_then(Value::as_bool),
            time_left,
            current,
            score,
            shuffled,
        })
    }
}

//
// ─── STORE FACADE ─────────────────────────────────────────────────────────────
//

/// Reads and writes the one session snapshot behind a `SnapshotStore`.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn SnapshotStore>,
}

impl SessionStore {
    #[must_use]
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self { store }
    }

    /// Overwrite the persisted snapshot (last write wins, single writer).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the backend write fails. The
    /// session engine treats this as non-fatal.
    pub fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StorageError> {
        let bytes = snapshot.encode()?;
        self.store.set(SNAPSHOT_KEY, &bytes)
    }

    /// Load the persisted snapshot, if one exists and parses.
    ///
    /// An absent key, a backend read failure, and unparseable bytes all
    /// read as "no saved session".
    #[must_use]
    pub fn load(&self) -> Option<SessionSnapshot> {
        let bytes = self.store.get(SNAPSHOT_KEY).ok().flatten()?;
        SessionSnapshot::decode(&bytes)
    }

    /// Delete the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend delete fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.delete(SNAPSHOT_KEY)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
