//! MCQ question generation with category-matched distractors

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::CatalogEntry;

/// Maximum number of distractors drawn per question
pub const MAX_DISTRACTORS: usize = 3;

/// Multiple-choice question with up to 4 options
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub prompt: CatalogEntry,
    pub options: Vec<String>,
    pub correct_option: String,
    pub correct_index: usize,
}

impl QuizQuestion {
    /// Exact comparison of a selected option against the answer
    pub fn is_correct(&self, selection: &str) -> bool {
        selection == self.correct_option
    }
}

/// Generate a question for `target` using distractors from its category.
///
/// Categories with fewer than 3 siblings produce fewer options; a category
/// of one produces a single option.
pub fn build_question<R: Rng + ?Sized>(
    target: &CatalogEntry,
    catalog: &[CatalogEntry],
    rng: &mut R,
) -> QuizQuestion {
    let mut pool: Vec<&CatalogEntry> = catalog
        .iter()
        .filter(|e| e.category == target.category && e.id != target.id)
        .collect();

    // Sample without replacement: each draw leaves the pool
    let mut distractors = Vec::with_capacity(MAX_DISTRACTORS);
    while distractors.len() < MAX_DISTRACTORS && !pool.is_empty() {
        let idx = rng.gen_range(0..pool.len());
        distractors.push(pool.remove(idx));
    }

    let correct_option = target.target_text.clone();
    let mut options: Vec<String> = Vec::with_capacity(distractors.len() + 1);
    options.push(correct_option.clone());
    for entry in distractors {
        // Two entries may share a translation; never show the same text twice
        if !options.contains(&entry.target_text) {
            options.push(entry.target_text.clone());
        }
    }

    options.shuffle(rng);
    let correct_index = options
        .iter()
        .position(|o| *o == correct_option)
        .unwrap_or_default();

    QuizQuestion {
        prompt: target.clone(),
        options,
        correct_option,
        correct_index,
    }
}
