use std::sync::Arc;

use storage::file::FileStore;
use storage::repository::SnapshotStore;
use storage::snapshot::{SNAPSHOT_KEY, SessionSnapshot, SessionStore};
use teori_core::model::Question;

fn build_question(id: u64) -> Question {
    Question {
        id: Some(format!("q-{id}")),
        category: Some("Vägmärken".to_owned()),
        prompt: format!("Fråga {id}"),
        options: vec!["a".to_owned(), "b".to_owned(), "c".to_owned(), "d".to_owned()],
        answer_index: 2,
        explanation: Some("Se kapitel 3.".to_owned()),
        image: None,
    }
}

#[test]
fn file_backed_snapshot_survives_a_new_store_instance() {
    let dir = tempfile::tempdir().unwrap();
    let questions: Vec<Question> = (1..=3).map(build_question).collect();

    {
        let store = SessionStore::new(Arc::new(FileStore::new(dir.path())));
        let snapshot = SessionSnapshot::capture(true, 2500, 1, 1, &questions);
        store.save(&snapshot).unwrap();
    }

    // A fresh handle over the same directory models a process restart.
    let store = SessionStore::new(Arc::new(FileStore::new(dir.path())));
    let loaded = store.load().expect("snapshot should survive");
    assert_eq!(loaded.started, Some(true));
    assert_eq!(loaded.time_left, Some(2500));
    assert_eq!(loaded.current, Some(1));
    assert_eq!(loaded.score, Some(1));
    assert_eq!(loaded.shuffled.as_deref(), Some(&questions[..]));
}

#[test]
fn corrupted_file_reads_as_no_saved_session() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FileStore::new(dir.path());
    backend.set(SNAPSHOT_KEY, b"\xff\xfe not json").unwrap();

    let store = SessionStore::new(Arc::new(backend));
    assert!(store.load().is_none());
}

#[test]
fn clear_deletes_the_backing_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(Arc::new(FileStore::new(dir.path())));

    store
        .save(&SessionSnapshot::capture(false, 3000, 0, 0, &[]))
        .unwrap();
    assert!(dir.path().join(format!("{SNAPSHOT_KEY}.json")).exists());

    store.clear().unwrap();
    assert!(store.load().is_none());
    assert!(!dir.path().join(format!("{SNAPSHOT_KEY}.json")).exists());
}
