use std::fs;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tempfile::TempDir;

use wordrill::catalog::{Catalog, CatalogSource};
use wordrill::engine::progress::{COMFORT_STREAK, ProgressStore};
use wordrill::engine::stats;
use wordrill::session::QuizMode;
use wordrill::session::quiz::{Quiz, QuizAction};
use wordrill::store::json_store::JsonStore;

fn disk_store(dir: &TempDir) -> ProgressStore {
    let backend = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    ProgressStore::load(Box::new(backend))
}

#[test]
fn typed_session_survives_restart() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::load(CatalogSource::Builtin).unwrap();
    let list = catalog.load_list_by_id("spanish-1-greetings").unwrap();

    let mut store = disk_store(&dir);
    let mut quiz = Quiz::start(&list, QuizMode::Typed, &store, SmallRng::seed_from_u64(3)).unwrap();
    let total = quiz.position().1;
    while !quiz.is_finished() {
        let answer = quiz.current_card().unwrap().answer().to_uppercase();
        quiz.handle(QuizAction::Submit(format!("  {answer} ")), &mut store, Instant::now());
        quiz.handle(QuizAction::Next, &mut store, Instant::now());
    }
    let summary = quiz.summary();
    assert_eq!(summary.total, total);
    assert_eq!(summary.accuracy_percent, 100);
    drop(store);

    let reloaded = disk_store(&dir);
    let recorded: u32 = reloaded
        .list(&list.id)
        .unwrap()
        .values()
        .map(|r| r.forward.correct + r.reverse.correct)
        .sum();
    assert_eq!(recorded as usize, total);
    assert!(dir.path().join("progress.json").exists());
    assert!(!dir.path().join("progress.json.tmp").exists());
}

#[test]
fn comfortable_words_drive_list_progress() {
    let dir = TempDir::new().unwrap();
    let catalog = Catalog::load(CatalogSource::Builtin).unwrap();
    let meta = catalog.find("french-1-basics").unwrap().clone();
    let list = catalog.load_list(&meta).unwrap();

    let mut store = disk_store(&dir);
    let word = &list.pairs[0].source;
    for _ in 0..COMFORT_STREAK {
        store.record(&list.id, word, wordrill::session::Direction::Forward, true);
    }

    let reloaded = disk_store(&dir);
    let expected = (100.0 / meta.word_count as f64).round() as u32;
    assert_eq!(
        stats::list_progress_percent(&reloaded, &list.id, meta.word_count),
        expected
    );
}

#[test]
fn legacy_progress_file_loads() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("progress.json"),
        r#"{"spanish-1-greetings": {"hola": {
            "es_en": {"correctCount": 4, "incorrectCount": 1, "streak": 3, "comfortable": true},
            "en_es": {"correctCount": 0, "incorrectCount": 2, "streak": 0, "comfortable": false}
        }}}"#,
    )
    .unwrap();

    let store = disk_store(&dir);
    let record = store.lookup("spanish-1-greetings", "hola").unwrap();
    assert_eq!(record.forward.correct, 4);
    assert!(record.forward.comfortable);
    assert_eq!(record.reverse.incorrect, 2);
}

#[test]
fn corrupt_progress_file_starts_fresh_and_is_replaced() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("progress.json"), "{not json").unwrap();

    let mut store = disk_store(&dir);
    assert!(store.list("spanish-1-greetings").is_none());
    store.record("spanish-1-greetings", "hola", wordrill::session::Direction::Forward, false);

    let reloaded = disk_store(&dir);
    assert_eq!(
        reloaded
            .lookup("spanish-1-greetings", "hola")
            .unwrap()
            .forward
            .incorrect,
        1
    );
}
