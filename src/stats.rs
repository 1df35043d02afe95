//! Summary statistics over the catalog and recorded progress

use std::collections::BTreeMap;

use crate::catalog::CatalogEntry;
use crate::progress::ProgressStore;

/// Per-category figures
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryStats {
    pub total: usize,
    pub studied: usize,
    pub mastered: usize,
    pub attempts: u64,
    pub correct: u64,
    pub accuracy_pct: f64,
    pub mastery_pct: f64,
}

/// Overall study summary
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total_cards: usize,
    pub studied_cards: usize,
    pub mastered_cards: usize,
    pub total_attempts: u64,
    pub total_correct: u64,
    pub accuracy_pct: f64,
    pub mastery_pct: f64,
    pub studied_pct: f64,
    pub per_category: BTreeMap<String, CategoryStats>,
}

fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// Compute summary statistics. Progress for ids outside the catalog is ignored.
pub fn summarize(catalog: &[CatalogEntry], progress: &ProgressStore) -> Summary {
    let mut summary = Summary {
        total_cards: catalog.len(),
        ..Summary::default()
    };

    for entry in catalog {
        let cat = summary.per_category.entry(entry.category.clone()).or_default();
        cat.total += 1;

        let Some(record) = progress.get(&entry.id) else {
            continue;
        };

        cat.studied += 1;
        cat.attempts += u64::from(record.attempts);
        cat.correct += u64::from(record.correct);
        summary.studied_cards += 1;
        summary.total_attempts += u64::from(record.attempts);
        summary.total_correct += u64::from(record.correct);
        if record.is_mastered {
            cat.mastered += 1;
            summary.mastered_cards += 1;
        }
    }

    for cat in summary.per_category.values_mut() {
        cat.accuracy_pct = percent(cat.correct as f64, cat.attempts as f64);
        cat.mastery_pct = percent(cat.mastered as f64, cat.total as f64);
    }

    let total = summary.total_cards as f64;
    summary.accuracy_pct = percent(summary.total_correct as f64, summary.total_attempts as f64);
    summary.mastery_pct = percent(summary.mastered_cards as f64, total);
    summary.studied_pct = percent(summary.studied_cards as f64, total);
    summary
}
