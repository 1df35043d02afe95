//! Review set - entries the learner most recently answered incorrectly
//!
//! The per-id operations read the persisted set, apply the change and write
//! it back before returning. Callers that keep their own copy (a study
//! session) change it in memory and persist it whole with `save_review_set`,
//! so a failed write never loses flags already held in memory.

use serde::{Deserialize, Serialize};

use crate::db::{KeyValueStore, REVIEW_KEY};
use crate::error::StorageError;

/// Ordered set of entry ids, in the order they were first added
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ReviewSet {
    ids: Vec<String>,
}

impl ReviewSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|x| x == id)
    }

    /// Returns false if `id` was already present.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    /// Returns false if `id` was absent.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|x| x != id);
        self.ids.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<Vec<String>> for ReviewSet {
    fn from(ids: Vec<String>) -> Self {
        let mut set = ReviewSet::new();
        for id in &ids {
            set.insert(id);
        }
        set
    }
}

impl From<ReviewSet> for Vec<String> {
    fn from(set: ReviewSet) -> Self {
        set.ids
    }
}

/// Load the persisted review set. Missing or corrupt data yields an empty set.
pub fn load_review_set<S: KeyValueStore + ?Sized>(kv: &S) -> ReviewSet {
    let stored = match kv.get(REVIEW_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => return ReviewSet::new(),
        Err(e) => {
            log::warn!("Failed to read review set: {}", e);
            return ReviewSet::new();
        }
    };

    serde_json::from_str(&stored).unwrap_or_else(|e| {
        log::warn!("Discarding corrupt review set: {}", e);
        ReviewSet::new()
    })
}

/// Persist the whole set. Failures are logged, never raised.
pub fn save_review_set<S: KeyValueStore + ?Sized>(kv: &mut S, set: &ReviewSet) {
    let result: Result<(), StorageError> = serde_json::to_string(set)
        .map_err(StorageError::from)
        .and_then(|blob| kv.set(REVIEW_KEY, &blob));
    if let Err(e) = result {
        log::error!("Failed to save review set ({} ids): {}", set.len(), e);
    }
}

/// Flag `id` for review. No write happens if it is already flagged.
pub fn add_to_review<S: KeyValueStore + ?Sized>(kv: &mut S, id: &str) -> ReviewSet {
    let mut set = load_review_set(&*kv);
    if set.insert(id) {
        save_review_set(kv, &set);
    }
    set
}

/// Unflag `id`. Removing an absent id is a no-op apart from the rewrite.
pub fn remove_from_review<S: KeyValueStore + ?Sized>(kv: &mut S, id: &str) -> ReviewSet {
    let mut set = load_review_set(&*kv);
    set.remove(id);
    save_review_set(kv, &set);
    set
}

/// Drop every flagged id
pub fn clear_review<S: KeyValueStore + ?Sized>(kv: &mut S) -> ReviewSet {
    if let Err(e) = kv.remove(REVIEW_KEY) {
        log::error!("Failed to clear review set: {}", e);
    }
    ReviewSet::new()
}
