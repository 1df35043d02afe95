//! Progress tracking - per-entry attempt counters and mastery

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::{KeyValueStore, PROGRESS_KEY};
use crate::error::StorageError;
use crate::time::Clock;

/// Correct answers needed before an entry counts as mastered
pub const MASTERY_THRESHOLD: u32 = 3;

/// Progress for one catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub attempts: u32,
    pub correct: u32,
    pub last_studied: DateTime<Utc>,
    pub is_mastered: bool,
}

impl ProgressRecord {
    fn empty(now: DateTime<Utc>) -> Self {
        Self {
            attempts: 0,
            correct: 0,
            last_studied: now,
            is_mastered: false,
        }
    }

    pub fn incorrect(&self) -> u32 {
        self.attempts.saturating_sub(self.correct)
    }
}

/// Entry id -> progress. Absent ids have never been studied.
pub type ProgressStore = BTreeMap<String, ProgressRecord>;

/// Apply one answer to a copy of `progress`.
///
/// Only the record for `id` changes. `is_mastered` is recomputed from
/// `correct`, which never decreases, so mastery never reverts.
pub fn apply_answer(
    progress: &ProgressStore,
    id: &str,
    is_correct: bool,
    now: DateTime<Utc>,
) -> ProgressStore {
    let current = progress
        .get(id)
        .cloned()
        .unwrap_or_else(|| ProgressRecord::empty(now));

    let correct = current.correct.saturating_add(u32::from(is_correct));
    let updated = ProgressRecord {
        attempts: current.attempts.saturating_add(1),
        correct,
        last_studied: now,
        is_mastered: correct >= MASTERY_THRESHOLD,
    };

    let mut next = progress.clone();
    next.insert(id.to_string(), updated);
    next
}

/// Record an answer and persist the resulting mapping.
///
/// Call once per answer event. A failed save is logged; the returned
/// mapping is still the updated one.
pub fn record_answer<S: KeyValueStore + ?Sized>(
    kv: &mut S,
    clock: &Clock,
    id: &str,
    is_correct: bool,
    progress: &ProgressStore,
) -> ProgressStore {
    let updated = apply_answer(progress, id, is_correct, clock.now());
    save_progress(kv, &updated);
    updated
}

/// Load persisted progress. Missing or corrupt data yields an empty mapping.
pub fn load_progress<S: KeyValueStore + ?Sized>(kv: &S) -> ProgressStore {
    let stored = match kv.get(PROGRESS_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => return ProgressStore::new(),
        Err(e) => {
            log::warn!("Failed to read user progress: {}", e);
            return ProgressStore::new();
        }
    };

    let parsed: ProgressStore = match serde_json::from_str(&stored) {
        Ok(map) => map,
        Err(e) => {
            log::warn!("Discarding corrupt user progress: {}", e);
            return ProgressStore::new();
        }
    };

    parsed
        .into_iter()
        .filter_map(|(id, mut record)| {
            if record.correct > record.attempts {
                log::warn!(
                    "Dropping progress for {}: correct ({}) exceeds attempts ({})",
                    id,
                    record.correct,
                    record.attempts
                );
                return None;
            }
            record.is_mastered |= record.correct >= MASTERY_THRESHOLD;
            Some((id, record))
        })
        .collect()
}

/// Persist the full mapping, returning any storage error
pub fn try_save_progress<S: KeyValueStore + ?Sized>(
    kv: &mut S,
    progress: &ProgressStore,
) -> Result<(), StorageError> {
    let blob = serde_json::to_string(progress)?;
    kv.set(PROGRESS_KEY, &blob)
}

/// Persist the full mapping. Failures are logged, never raised.
pub fn save_progress<S: KeyValueStore + ?Sized>(kv: &mut S, progress: &ProgressStore) {
    if let Err(e) = try_save_progress(kv, progress) {
        log::error!("Failed to save user progress ({} entries): {}", progress.len(), e);
    }
}
