//! Study session - the entry point a presentation layer talks to
//!
//! A session owns the storage backend plus the in-memory copies of progress
//! and the review set. Each answer runs the full progress update and the
//! review policy before returning, so the next question always sees both.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::catalog::{Catalog, CatalogEntry};
use crate::config::StudyConfig;
use crate::db::{KeyValueStore, MemoryStore, SqliteStore};
use crate::error::SessionError;
use crate::grading::{check_answer, MatchResult};
use crate::progress::{load_progress, record_answer, ProgressRecord, ProgressStore};
use crate::questions::{build_question, QuizQuestion};
use crate::review::{clear_review, load_review_set, save_review_set, ReviewSet};
use crate::stats::{summarize, Summary};
use crate::time::Clock;

/// Which entries the session draws from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StudyMode {
    #[default]
    All,
    Category(String),
    /// Entries in the review set; correct answers here clear the flag
    Review,
}

/// Result of submitting one answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub record: ProgressRecord,
    /// True only on the answer that first reached mastery
    pub newly_mastered: bool,
    pub in_review: bool,
}

pub struct StudySession<S: KeyValueStore> {
    catalog: Catalog,
    kv: S,
    progress: ProgressStore,
    review: ReviewSet,
    mode: StudyMode,
    queue: VecDeque<String>,
    shuffle_queue: bool,
    answer_threshold: f64,
    rng: StdRng,
    clock: Clock,
}

impl StudySession<Box<dyn KeyValueStore>> {
    /// Open a session on the backend named by `config.db_path`, or in memory.
    pub fn from_config(catalog: Catalog, config: &StudyConfig) -> Result<Self, SessionError> {
        let kv: Box<dyn KeyValueStore> = match &config.db_path {
            Some(path) => Box::new(SqliteStore::open(path)?),
            None => Box::new(MemoryStore::new()),
        };
        Ok(Self::open(catalog, kv, config))
    }
}

impl<S: KeyValueStore> StudySession<S> {
    /// Load persisted progress and review state from `kv`
    pub fn open(catalog: Catalog, kv: S, config: &StudyConfig) -> Self {
        let progress = load_progress(&kv);
        let review = load_review_set(&kv);
        let rng = match config.quiz_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        log::debug!(
            "Opened study session: {} entries, {} studied, {} in review",
            catalog.len(),
            progress.len(),
            review.len()
        );

        Self {
            catalog,
            kv,
            progress,
            review,
            mode: StudyMode::All,
            queue: VecDeque::new(),
            shuffle_queue: config.shuffle_queue,
            answer_threshold: config.answer_threshold,
            rng,
            clock: Clock::System,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn review_set(&self) -> &ReviewSet {
        &self.review
    }

    pub fn mode(&self) -> &StudyMode {
        &self.mode
    }

    /// Switch the entry source. The queue restarts from the beginning.
    pub fn set_mode(&mut self, mode: StudyMode) {
        self.mode = mode;
        self.queue.clear();
    }

    fn is_candidate(&self, entry: &CatalogEntry) -> bool {
        match &self.mode {
            StudyMode::All => true,
            StudyMode::Category(name) => entry.category == *name,
            StudyMode::Review => self.review.contains(&entry.id),
        }
    }

    fn refill_queue(&mut self) {
        let mut ids: Vec<String> = match &self.mode {
            // review order follows the order entries were missed
            StudyMode::Review => self
                .review
                .iter()
                .filter(|id| self.catalog.contains(id))
                .map(str::to_string)
                .collect(),
            _ => self
                .catalog
                .list()
                .iter()
                .filter(|e| self.is_candidate(e))
                .map(|e| e.id.clone())
                .collect(),
        };
        if self.shuffle_queue {
            ids.shuffle(&mut self.rng);
        }
        self.queue = ids.into();
    }

    /// Next entry to present, or `None` when the mode has nothing to offer.
    pub fn select_next_entry(&mut self) -> Option<CatalogEntry> {
        for _ in 0..2 {
            while let Some(id) = self.queue.pop_front() {
                match self.catalog.get(&id) {
                    // review entries may have been cleared since the queue was built
                    Some(entry) if self.is_candidate(entry) => return Some(entry.clone()),
                    _ => continue,
                }
            }
            self.refill_queue();
        }
        None
    }

    /// Record an answer for `entry_id` and apply the review policy.
    ///
    /// Incorrect answers flag the entry for review. Correct answers clear the
    /// flag only while the session is in review mode.
    pub fn submit_answer(
        &mut self,
        entry_id: &str,
        is_correct: bool,
    ) -> Result<AnswerOutcome, SessionError> {
        if !self.catalog.contains(entry_id) {
            return Err(SessionError::UnknownEntry(entry_id.to_string()));
        }

        let was_mastered = self
            .progress
            .get(entry_id)
            .is_some_and(|r| r.is_mastered);
        self.progress = record_answer(&mut self.kv, &self.clock, entry_id, is_correct, &self.progress);

        let review_changed = if !is_correct {
            self.review.insert(entry_id)
        } else if self.mode == StudyMode::Review {
            self.review.remove(entry_id)
        } else {
            false
        };
        if review_changed {
            save_review_set(&mut self.kv, &self.review);
        }

        let record = self
            .progress
            .get(entry_id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownEntry(entry_id.to_string()))?;
        if record.is_mastered && !was_mastered {
            log::info!("Entry {} mastered after {} attempts", entry_id, record.attempts);
        }

        Ok(AnswerOutcome {
            newly_mastered: record.is_mastered && !was_mastered,
            in_review: self.review.contains(entry_id),
            record,
        })
    }

    /// Grade a typed answer against the entry's target text, then submit it.
    ///
    /// Uses the configured `answer_threshold` for the fuzzy match.
    pub fn submit_typed_answer(
        &mut self,
        entry_id: &str,
        input: &str,
    ) -> Result<(MatchResult, AnswerOutcome), SessionError> {
        let entry = self
            .catalog
            .get(entry_id)
            .ok_or_else(|| SessionError::UnknownEntry(entry_id.to_string()))?;
        let result = check_answer(input, &entry.target_text, self.answer_threshold);
        let outcome = self.submit_answer(entry_id, result.is_correct)?;
        Ok((result, outcome))
    }

    /// Build a multiple-choice question for `entry` against the whole catalog
    pub fn request_quiz_question(&mut self, entry: &CatalogEntry) -> QuizQuestion {
        build_question(entry, self.catalog.list(), &mut self.rng)
    }

    pub fn request_summary(&self) -> Summary {
        summarize(self.catalog.list(), &self.progress)
    }

    /// Empty the review set, both persisted and in memory
    pub fn clear_review(&mut self) {
        self.review = clear_review(&mut self.kv);
        if self.mode == StudyMode::Review {
            self.queue.clear();
        }
    }

    /// Give back the storage backend
    pub fn into_store(self) -> S {
        self.kv
    }
}
