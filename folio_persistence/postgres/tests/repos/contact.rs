use chrono::Utc;
use folio_models::contact::ContactSubmission;
use folio_persistence_contracts::{contact::ContactRepository, Database, Transaction};
use folio_persistence_postgres::contact::PostgresContactRepository;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::setup;

const REPO: PostgresContactRepository = PostgresContactRepository;

fn submission(name: &str) -> ContactSubmission {
    ContactSubmission::validate(&json!({
        "name": name,
        "email": "alice@example.com",
        "subject": "Hi",
        "message": "Hello there, nice site!",
    }))
    .unwrap()
}

#[tokio::test]
#[ignore = "requires a running postgres database"]
async fn create() {
    let db = setup().await;
    let mut txn = db.begin_transaction().await.unwrap();
    let result = REPO.create(&mut txn, &submission("Alice")).await.unwrap();
    txn.commit().await.unwrap();

    assert_eq!(result.submission, submission("Alice"));
    assert!(result.created_at <= Utc::now());
}

#[tokio::test]
#[ignore = "requires a running postgres database"]
async fn create_assigns_increasing_ids() {
    let db = setup().await;

    let mut txn = db.begin_transaction().await.unwrap();
    let first = REPO.create(&mut txn, &submission("Alice")).await.unwrap();
    let second = REPO.create(&mut txn, &submission("Bob")).await.unwrap();
    txn.commit().await.unwrap();

    assert!(*second.id > *first.id);
    assert_eq!(second.submission.name.as_str(), "Bob");
}

#[tokio::test]
#[ignore = "requires a running postgres database"]
async fn rollback_discards_message() {
    let db = setup().await;

    let mut txn = db.begin_transaction().await.unwrap();
    let discarded = REPO.create(&mut txn, &submission("Alice")).await.unwrap();
    txn.rollback().await.unwrap();

    let mut txn = db.begin_transaction().await.unwrap();
    let kept = REPO.create(&mut txn, &submission("Bob")).await.unwrap();
    txn.commit().await.unwrap();

    // sequences are not transactional, so the id is still consumed
    assert!(*kept.id > *discarded.id);
}

#[tokio::test]
#[ignore = "requires a running postgres database"]
async fn ping() {
    let db = setup().await;
    db.ping().await.unwrap();
}
