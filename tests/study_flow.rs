use std::collections::HashSet;

use flashcard_core::{
    add_to_review, build_question, fixed_now, load_progress, load_review_set, record_answer,
    remove_from_review, summarize, Catalog, Clock, MemoryStore, ProgressStore, SqliteStore,
    StudyConfig, StudyMode, StudySession,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_session() -> StudySession<MemoryStore> {
    let config = StudyConfig {
        quiz_seed: Some(2024),
        ..StudyConfig::default()
    };
    StudySession::open(Catalog::builtin(), MemoryStore::new(), &config)
        .with_clock(Clock::fixed(fixed_now()))
}

#[test]
fn three_misses_then_review_correct() {
    let mut session = seeded_session();

    for _ in 0..3 {
        session.submit_answer("food-1", false).unwrap();
    }
    let record = &session.progress()["food-1"];
    assert_eq!(record.attempts, 3);
    assert_eq!(record.correct, 0);
    assert!(!record.is_mastered);
    assert!(session.review_set().contains("food-1"));

    session.set_mode(StudyMode::Review);
    let next = session.select_next_entry().unwrap();
    assert_eq!(next.id, "food-1");

    let outcome = session.submit_answer(&next.id, true).unwrap();
    assert_eq!(outcome.record.attempts, 4);
    assert_eq!(outcome.record.correct, 1);
    assert!(!outcome.record.is_mastered);
    assert!(!outcome.in_review);
    assert!(!session.review_set().contains("food-1"));
}

#[test]
fn three_correct_answers_master_an_entry() {
    let mut session = seeded_session();

    for _ in 0..3 {
        session.submit_answer("food-2", true).unwrap();
    }
    let record = &session.progress()["food-2"];
    assert_eq!((record.attempts, record.correct), (3, 3));
    assert!(record.is_mastered);

    let summary = session.request_summary();
    assert!(summary.mastered_cards >= 1);

    let food = &summary.per_category["Food"];
    assert_eq!(food.total, 10);
    assert_eq!(food.mastered, 1);
    let expected = 100.0 * food.mastered as f64 / 10.0;
    assert!((food.mastery_pct - expected).abs() < 1e-9);
}

#[test]
fn summary_of_fresh_session_is_zero() {
    let session = seeded_session();
    let summary = session.request_summary();
    assert_eq!(summary.studied_cards, 0);
    assert_eq!(summary.accuracy_pct, 0.0);
    assert_eq!(summary.mastery_pct, 0.0);
}

#[test]
fn only_target_key_changes_and_reload_matches() {
    let mut kv = MemoryStore::new();
    let clock = Clock::fixed(fixed_now());

    let mut progress = ProgressStore::new();
    for id in ["animal-1", "animal-2", "verb-5"] {
        progress = record_answer(&mut kv, &clock, id, true, &progress);
    }
    let before = progress.clone();

    let after = record_answer(&mut kv, &clock, "animal-2", false, &progress);
    for (id, record) in &before {
        if id != "animal-2" {
            assert_eq!(&after[id], record);
        }
    }
    assert_eq!(after["animal-2"].attempts, 2);
    assert_eq!(load_progress(&kv), after);
}

#[test]
fn review_operations_are_idempotent() {
    let mut kv = MemoryStore::new();
    add_to_review(&mut kv, "verb-1");
    let once = load_review_set(&kv);
    add_to_review(&mut kv, "verb-1");
    assert_eq!(load_review_set(&kv), once);

    remove_from_review(&mut kv, "verb-2");
    assert_eq!(load_review_set(&kv), once);
}

#[test]
fn quiz_properties_hold_across_catalog() {
    let catalog = Catalog::builtin();
    let mut rng = StdRng::seed_from_u64(99);

    for entry in catalog.list() {
        let q = build_question(entry, catalog.list(), &mut rng);
        assert!((1..=4).contains(&q.options.len()));
        assert!(q.options.contains(&q.correct_option));
        let unique: HashSet<&String> = q.options.iter().collect();
        assert_eq!(unique.len(), q.options.len());
    }
}

#[test]
fn sqlite_backed_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.db");
    let config = StudyConfig::default();

    {
        let kv = SqliteStore::open(&path).unwrap();
        let mut session = StudySession::open(Catalog::builtin(), kv, &config);
        session.submit_answer("verb-7", false).unwrap();
        session.submit_answer("verb-8", true).unwrap();
    }

    let kv = SqliteStore::open(&path).unwrap();
    let session = StudySession::open(Catalog::builtin(), kv, &config);
    assert_eq!(session.progress().len(), 2);
    assert!(session.review_set().contains("verb-7"));
    assert!(!session.review_set().contains("verb-8"));

    let summary = summarize(session.catalog().list(), session.progress());
    assert_eq!(summary.total_attempts, 2);
    assert!((summary.accuracy_pct - 50.0).abs() < 1e-9);
}
