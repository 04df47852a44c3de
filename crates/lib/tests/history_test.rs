//! # Interaction Log Tests
//!
//! Validates schema initialization and the append/read-back cycle
//! against an in-memory store.

use knowledgebot::history::LogStore;

#[tokio::test]
async fn test_init_schema_is_idempotent() {
    let store = LogStore::new(":memory:").await.expect("in-memory store");

    store.init_schema().await.expect("first init");
    store.init_schema().await.expect("second init");
}

#[tokio::test]
async fn test_append_and_read_back() {
    let store = LogStore::new(":memory:").await.unwrap();
    store.init_schema().await.unwrap();

    store
        .append(
            "What is the top movie?",
            "concise",
            "[Concise Mock] What is the top movie?? → Short answer.",
        )
        .await
        .expect("append should succeed");

    let records = store.recent(10).await.expect("read back");
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.question, "What is the top movie?");
    assert_eq!(record.prompt_name, "concise");
    assert_eq!(
        record.answer,
        "[Concise Mock] What is the top movie?? → Short answer."
    );
    assert!(!record.timestamp.is_empty());
}

#[tokio::test]
async fn test_append_assigns_increasing_ids() {
    let store = LogStore::new(":memory:").await.unwrap();
    store.init_schema().await.unwrap();

    store.append("q1", "concise", "a1").await.unwrap();
    store.append("q2", "verbose", "a2").await.unwrap();

    let records = store.recent(10).await.unwrap();
    assert_eq!(records.len(), 2);
    // Newest first.
    assert_eq!(records[0].question, "q2");
    assert_eq!(records[1].question, "q1");
    assert!(records[0].id > records[1].id);
}

#[tokio::test]
async fn test_recent_respects_limit() {
    let store = LogStore::new(":memory:").await.unwrap();
    store.init_schema().await.unwrap();

    for i in 0..5 {
        store
            .append(&format!("q{i}"), "concise", &format!("a{i}"))
            .await
            .unwrap();
    }

    let records = store.recent(2).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].question, "q4");
    assert_eq!(records[1].question, "q3");
}
