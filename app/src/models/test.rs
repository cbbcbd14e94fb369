use super::*;
use chrono::Duration;
use garden_core::{time, Garden};
use serde_json::json;

fn record(id: &str, body: Value, created_at: DateTime<Utc>) -> Record {
    let mut body = body;
    body["_id"] = json!(id);
    Record {
        id: id.to_owned(),
        created_at,
        updated_at: time::advance(created_at),
        body,
    }
}

/// Exercises every store operation, so both backends are held to the same behaviour
async fn check_store(store: &DocumentStore, collection: &str) {
    let t = time::now();
    let older = t - Duration::hours(2);

    // insert
    let a = record("a", json!({"sensor_id": "s1", "value": 1.0}), older);
    let b = record("b", json!({"sensor_id": "s2", "value": 2.0}), t);
    store.insert(collection, a.clone()).await.unwrap();
    store.insert(collection, b.clone()).await.unwrap();
    let dup = store.insert(collection, a.clone()).await;
    assert!(matches!(dup, Err(DBError::Duplicate(_, _))));

    // find_one
    assert_eq!(Some(a.body.clone()), store.find_one(collection, "a").await.unwrap());
    assert_eq!(None, store.find_one(collection, "missing").await.unwrap());

    // find, newest update first
    let all = store.find(collection, &FindQuery::all()).await.unwrap();
    assert_eq!(vec![b.body.clone(), a.body.clone()], all);
    let limited = store.find(collection, &FindQuery::all().limit(1)).await.unwrap();
    assert_eq!(vec![b.body.clone()], limited);
    let by_field = store
        .find(collection, &FindQuery::all().field("sensor_id", "s1"))
        .await
        .unwrap();
    assert_eq!(vec![a.body.clone()], by_field);

    // half open creation window
    let window = TimeWindow::new(older, t);
    let in_window = store
        .find(collection, &FindQuery::all().created_within(window))
        .await
        .unwrap();
    assert_eq!(vec![a.body.clone()], in_window);

    // replace
    let mut changed = a.clone();
    changed.body["value"] = json!(3.0);
    changed.updated_at = time::advance(b.updated_at);
    assert!(store.replace(collection, changed.clone()).await.unwrap());
    assert!(!store
        .replace(collection, record("missing", json!({}), t))
        .await
        .unwrap());
    let all = store.find(collection, &FindQuery::all()).await.unwrap();
    assert_eq!(changed.body, all[0]);

    // delete
    assert!(store.delete(collection, "a").await.unwrap());
    assert!(!store.delete(collection, "a").await.unwrap());
    assert_eq!(None, store.find_one(collection, "a").await.unwrap());

    store.ping().await.unwrap();
}

async fn check_find_containing(store: &DocumentStore, collection: &str) {
    let garden = record(
        "g",
        json!({"name": "G", "pods": [{"_id": "p1"}, {"_id": "p2"}]}),
        time::now(),
    );
    store.insert(collection, garden.clone()).await.unwrap();

    let found = store.find_containing(collection, "pods", "p2").await.unwrap();
    let missing = store.find_containing(collection, "pods", "p3").await.unwrap();

    assert_eq!(Some(garden.body), found);
    assert_eq!(None, missing);
}

#[tokio::test]
async fn test_memory_store() {
    let store = DocumentStore::Memory(MemoryStore::new());
    check_store(&store, "readings").await;
    check_find_containing(&store, "gardens").await;
    assert_eq!("memory", store.backend());
}

#[tokio::test]
async fn test_memory_collections_are_isolated() {
    let store = DocumentStore::Memory(MemoryStore::new());
    store
        .insert("gardens", record("x", json!({}), time::now()))
        .await
        .unwrap();

    assert!(store.find_one("sensors", "x").await.unwrap().is_none());
    assert!(store.insert("sensors", record("x", json!({}), time::now())).await.is_ok());
}

#[tokio::test]
async fn test_record_from_document() {
    let garden: Garden =
        serde_json::from_value(json!({"name": "Og Garden", "location": "Backyard"})).unwrap();

    let record = Record::from_document(&garden).unwrap();

    assert_eq!(garden.id, record.id);
    assert_eq!(garden.created_at, record.created_at);
    assert_eq!(json!(garden.id), record.body["_id"]);
    assert_eq!(json!("Og Garden"), record.body["name"]);
}

#[tokio::test]
async fn test_memory_fallback() {
    let config = Config::from_lookup(|_| None).unwrap();

    let store = establish_db_connection(&config).await.unwrap();

    assert_eq!("memory", store.backend());
    store.close().await;
}

/// Runs against a live database, only when `TEST_DATABASE_URL` is set
#[tokio::test]
async fn test_postgres_store() {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => return,
    };
    let store = DocumentStore::Postgres(PgStore::connect(&url, 2).await.unwrap());
    let collection = format!("test_{}", garden_core::new_id());
    let gardens = format!("{}_{}", Garden::COLLECTION, garden_core::new_id());

    check_store(&store, &collection).await;
    check_find_containing(&store, &gardens).await;
    assert_eq!("postgres", store.backend());

    store.delete(&collection, "b").await.unwrap();
    store.delete(&gardens, "g").await.unwrap();
    store.close().await;
}
