//! Python bindings, enabled with the `python` feature

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::catalog::{Catalog, CatalogEntry, CategoryInfo};
use crate::config::StudyConfig;
use crate::db::KeyValueStore;
use crate::grading::{self, MatchResult};
use crate::questions::QuizQuestion;
use crate::session::{StudyMode, StudySession};
use crate::stats::{CategoryStats, Summary};

/// Answer outcome flattened for Python
#[pyclass(name = "AnswerOutcome", get_all)]
#[derive(Debug, Clone)]
pub struct PyAnswerOutcome {
    pub attempts: u32,
    pub correct: u32,
    pub is_mastered: bool,
    pub newly_mastered: bool,
    pub in_review: bool,
}

#[pymethods]
impl PyAnswerOutcome {
    fn __repr__(&self) -> String {
        format!(
            "AnswerOutcome(attempts={}, correct={}, mastered={}, in_review={})",
            self.attempts, self.correct, self.is_mastered, self.in_review
        )
    }
}

#[pymethods]
impl CatalogEntry {
    fn __repr__(&self) -> String {
        format!(
            "CatalogEntry(id='{}', source='{}', category='{}')",
            self.id, self.source_text, self.category
        )
    }
}

#[pymethods]
impl QuizQuestion {
    fn __repr__(&self) -> String {
        format!(
            "QuizQuestion(prompt='{}', options={:?})",
            self.prompt.source_text, self.options
        )
    }

    #[pyo3(name = "is_correct")]
    fn py_is_correct(&self, selection: &str) -> bool {
        self.is_correct(selection)
    }
}

#[pymethods]
impl Summary {
    fn __repr__(&self) -> String {
        format!(
            "Summary(studied={}/{}, mastered={}, accuracy={:.1}%)",
            self.studied_cards, self.total_cards, self.mastered_cards, self.accuracy_pct
        )
    }
}

#[pymethods]
impl MatchResult {
    fn __repr__(&self) -> String {
        format!(
            "MatchResult(is_correct={}, score={:.2}, feedback='{}')",
            self.is_correct, self.similarity_score, self.feedback
        )
    }
}

/// Study session over the built-in vocabulary
#[pyclass(name = "StudySession", unsendable)]
pub struct PyStudySession {
    inner: StudySession<Box<dyn KeyValueStore>>,
}

fn runtime_err(e: impl std::fmt::Display) -> PyErr {
    PyRuntimeError::new_err(e.to_string())
}

#[pymethods]
impl PyStudySession {
    #[new]
    #[pyo3(signature = (db_path=None, seed=None, shuffle=false))]
    fn new(db_path: Option<String>, seed: Option<u64>, shuffle: bool) -> PyResult<Self> {
        let config = StudyConfig {
            db_path: db_path.map(Into::into),
            shuffle_queue: shuffle,
            quiz_seed: seed,
            ..StudyConfig::default()
        };
        let inner = StudySession::from_config(Catalog::builtin(), &config).map_err(runtime_err)?;
        Ok(Self { inner })
    }

    fn catalog(&self) -> Vec<CatalogEntry> {
        self.inner.catalog().list().to_vec()
    }

    fn categories(&self) -> Vec<CategoryInfo> {
        self.inner.catalog().categories()
    }

    /// "all", "review", or "category" together with a category name
    #[pyo3(signature = (mode, category=None))]
    fn set_mode(&mut self, mode: &str, category: Option<String>) -> PyResult<()> {
        let mode = match (mode, category) {
            ("all", _) => StudyMode::All,
            ("review", _) => StudyMode::Review,
            ("category", Some(name)) => StudyMode::Category(name),
            _ => return Err(PyValueError::new_err(format!("Invalid study mode: {}", mode))),
        };
        self.inner.set_mode(mode);
        Ok(())
    }

    fn select_next_entry(&mut self) -> Option<CatalogEntry> {
        self.inner.select_next_entry()
    }

    fn submit_answer(&mut self, entry_id: &str, is_correct: bool) -> PyResult<PyAnswerOutcome> {
        let outcome = self
            .inner
            .submit_answer(entry_id, is_correct)
            .map_err(runtime_err)?;
        Ok(PyAnswerOutcome {
            attempts: outcome.record.attempts,
            correct: outcome.record.correct,
            is_mastered: outcome.record.is_mastered,
            newly_mastered: outcome.newly_mastered,
            in_review: outcome.in_review,
        })
    }

    /// Grade typed text with the session threshold and record the result
    fn submit_typed_answer(
        &mut self,
        entry_id: &str,
        input: &str,
    ) -> PyResult<(MatchResult, PyAnswerOutcome)> {
        let (result, outcome) = self
            .inner
            .submit_typed_answer(entry_id, input)
            .map_err(runtime_err)?;
        Ok((
            result,
            PyAnswerOutcome {
                attempts: outcome.record.attempts,
                correct: outcome.record.correct,
                is_mastered: outcome.record.is_mastered,
                newly_mastered: outcome.newly_mastered,
                in_review: outcome.in_review,
            },
        ))
    }

    fn request_quiz_question(&mut self, entry_id: &str) -> PyResult<QuizQuestion> {
        let entry = self
            .inner
            .catalog()
            .get(entry_id)
            .cloned()
            .ok_or_else(|| PyValueError::new_err(format!("Unknown entry: {}", entry_id)))?;
        Ok(self.inner.request_quiz_question(&entry))
    }

    fn request_summary(&self) -> Summary {
        self.inner.request_summary()
    }

    fn review_ids(&self) -> Vec<String> {
        self.inner.review_set().iter().map(str::to_string).collect()
    }

    fn clear_review(&mut self) {
        self.inner.clear_review();
    }
}

#[pyfunction]
#[pyo3(name = "check_answer", signature = (user_input, expected, threshold=None))]
fn py_check_answer(user_input: &str, expected: &str, threshold: Option<f64>) -> MatchResult {
    grading::check_answer(user_input, expected, threshold.unwrap_or(grading::DEFAULT_THRESHOLD))
}

/// Flashcard core Python module
#[pymodule]
fn flashcard_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_check_answer, m)?)?;

    m.add_class::<PyStudySession>()?;
    m.add_class::<PyAnswerOutcome>()?;
    m.add_class::<CatalogEntry>()?;
    m.add_class::<CategoryInfo>()?;
    m.add_class::<QuizQuestion>()?;
    m.add_class::<Summary>()?;
    m.add_class::<CategoryStats>()?;
    m.add_class::<MatchResult>()?;

    Ok(())
}
