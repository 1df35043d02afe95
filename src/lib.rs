//! Flashcard Core - progress tracking and quiz generation for vocabulary study
//!
//! Provides the vocabulary catalog, persisted progress and review state,
//! category-matched MCQ generation and summary statistics. Build with the
//! `python` feature to expose a study session to Python.

mod catalog;
mod config;
mod db;
mod error;
mod grading;
mod import;
mod progress;
mod questions;
mod review;
mod session;
mod stats;
mod time;

#[cfg(feature = "python")]
mod python;

pub use catalog::{Catalog, CatalogEntry, CategoryInfo};
pub use config::StudyConfig;
pub use db::{init_database, KeyValueStore, MemoryStore, SqliteStore, PROGRESS_KEY, REVIEW_KEY};
pub use error::{CatalogError, ConfigError, ImportError, SessionError, StorageError};
pub use grading::{check_answer, MatchResult, DEFAULT_THRESHOLD};
pub use import::{parse_csv, parse_csv_reader, parse_excel, parse_file};
pub use progress::{
    apply_answer, load_progress, record_answer, save_progress, try_save_progress, ProgressRecord,
    ProgressStore, MASTERY_THRESHOLD,
};
pub use questions::{build_question, QuizQuestion, MAX_DISTRACTORS};
pub use review::{
    add_to_review, clear_review, load_review_set, remove_from_review, save_review_set, ReviewSet,
};
pub use session::{AnswerOutcome, StudyMode, StudySession};
pub use stats::{summarize, CategoryStats, Summary};
pub use time::{fixed_now, Clock, FIXED_TEST_TIMESTAMP};
