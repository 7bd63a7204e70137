//! Integration tests for the JSON document store
//!
//! Every test works against a REAL file in a temporary directory so the
//! full read-modify-write cycle is exercised.

use sociaty_core::{
    CreateListing, ListingFilter, ListingId, MarketError, MarketStore, NewUser, StudentId,
    UpdateListing,
};
use sociaty_storage::{Document, JsonStore};
use std::sync::Arc;
use tempfile::TempDir;

/// Test store wrapper that cleans up on drop
struct TestStore {
    store: JsonStore,
    _temp_dir: TempDir,
}

impl TestStore {
    async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = JsonStore::open(temp_dir.path().join("db.json"))
            .await
            .expect("Failed to open store");

        Self {
            store,
            _temp_dir: temp_dir,
        }
    }
}

fn new_user(student_id: &str, password: &str) -> NewUser {
    NewUser {
        name: format!("Student {}", student_id),
        student_id: StudentId::new(student_id),
        password: password.to_string(),
    }
}

fn new_listing(title: &str, price: f64, category: &str) -> CreateListing {
    CreateListing {
        title: title.to_string(),
        description: format!("{} in good condition", title),
        price,
        category: category.to_string(),
        student_id: StudentId::new("s1"),
        media: vec![],
    }
}

#[tokio::test]
async fn open_creates_empty_document() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("nested").join("db.json");

    JsonStore::open(&path).await.unwrap();

    let raw: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(raw, serde_json::json!({ "users": [], "listings": [] }));
}

#[tokio::test]
async fn open_reads_documents_in_the_original_format() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("db.json");
    std::fs::write(
        &path,
        r#"{
          "users": [{"id": "abc", "name": "Alice", "studentId": "s1", "password": "pw"}],
          "listings": [{
            "id": 1700000000000, "title": "Lamp", "desc": "Bright", "price": 12,
            "category": "furniture", "studentId": "s1",
            "media": ["/uploads/1700000000000-abc123.jpg"],
            "createdAt": "2023-11-14T22:13:20.000Z"
          }]
        }"#,
    )
    .unwrap();

    let store = JsonStore::open(&path).await.unwrap();

    let user = store.find_user(&StudentId::new("s1")).await.unwrap().unwrap();
    assert_eq!(user.name, "Alice");

    let listing = store
        .get_listing(ListingId::new(1_700_000_000_000))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(listing.description, "Bright");
    assert_eq!(listing.price, 12.0);
    assert_eq!(listing.media.len(), 1);
}

#[tokio::test]
async fn open_reads_original_documents_with_null_fields() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("db.json");
    std::fs::write(
        &path,
        r#"{
          "users": [],
          "listings": [
            {
              "id": 2, "title": "Desk", "desc": "Oak", "price": null,
              "category": "furniture", "studentId": "s1", "media": [],
              "createdAt": "2023-11-14T22:13:21.000Z"
            },
            {
              "id": 1, "title": "Lamp", "desc": null, "price": 5,
              "category": null, "studentId": "s1", "media": [],
              "createdAt": "2023-11-14T22:13:20.000Z"
            }
          ]
        }"#,
    )
    .unwrap();

    let store = JsonStore::open(&path).await.unwrap();

    let desk = store.get_listing(ListingId::new(2)).await.unwrap().unwrap();
    assert_eq!(desk.price, 0.0);

    let lamp = store.get_listing(ListingId::new(1)).await.unwrap().unwrap();
    assert_eq!(lamp.description, "");
    assert_eq!(lamp.category, "misc");

    let cheap = store
        .get_listings(&ListingFilter::from_query(None, None, Some("0-50")))
        .await
        .unwrap();
    assert_eq!(cheap.len(), 2);
}

#[tokio::test]
async fn open_rejects_corrupt_document() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("db.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    assert!(JsonStore::open(&path).await.is_err());
}

#[tokio::test]
async fn users_persist_across_reopen() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("db.json");

    {
        let store = JsonStore::open(&path).await.unwrap();
        store.create_user(new_user("s1", "pw")).await.unwrap();
    }

    let store = JsonStore::open(&path).await.unwrap();
    let users = store.get_all_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].student_id.as_str(), "s1");
}

#[tokio::test]
async fn duplicate_registration_always_fails() {
    let test = TestStore::new().await;

    test.store.create_user(new_user("s1", "a")).await.unwrap();
    let err = test.store.create_user(new_user("s1", "b")).await.unwrap_err();

    assert!(matches!(err, MarketError::Duplicate(_)));
    assert_eq!(test.store.get_all_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn failed_mutation_leaves_document_untouched() {
    let test = TestStore::new().await;
    test.store.create_user(new_user("s1", "a")).await.unwrap();
    let before: Document = test.store.snapshot().await.unwrap();

    let _ = test.store.create_user(new_user("s1", "b")).await;

    assert_eq!(test.store.snapshot().await.unwrap(), before);
}

#[tokio::test]
async fn listings_are_returned_newest_first() {
    let test = TestStore::new().await;

    test.store.create_listing(new_listing("Old", 10.0, "misc")).await.unwrap();
    test.store.create_listing(new_listing("New", 10.0, "misc")).await.unwrap();

    let all = test.store.get_all_listings().await.unwrap();
    let titles: Vec<&str> = all.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["New", "Old"]);
}

#[tokio::test]
async fn listing_ids_are_unique() {
    let test = TestStore::new().await;

    let mut ids = Vec::new();
    for i in 0..10 {
        let listing = test
            .store
            .create_listing(new_listing(&format!("Item {}", i), 1.0, "misc"))
            .await
            .unwrap();
        ids.push(listing.id);
    }

    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 10);
}

#[tokio::test]
async fn price_filters_split_at_boundaries() {
    let test = TestStore::new().await;
    for price in [0.0, 50.0, 50.5, 200.0, 200.5] {
        test.store
            .create_listing(new_listing(&format!("At {}", price), price, "misc"))
            .await
            .unwrap();
    }

    let prices = |bucket: &str| {
        let filter = ListingFilter::from_query(None, None, Some(bucket));
        let store = &test.store;
        async move {
            let mut prices: Vec<f64> = store
                .get_listings(&filter)
                .await
                .unwrap()
                .iter()
                .map(|l| l.price)
                .collect();
            prices.sort_by(|a, b| a.partial_cmp(b).unwrap());
            prices
        }
    };

    assert_eq!(prices("0-50").await, vec![0.0, 50.0]);
    assert_eq!(prices("50-200").await, vec![50.5, 200.0]);
    assert_eq!(prices("200+").await, vec![200.5]);
}

#[tokio::test]
async fn update_with_falsy_values_keeps_prior_fields() {
    let test = TestStore::new().await;
    let listing = test
        .store
        .create_listing(new_listing("Chair", 25.0, "furniture"))
        .await
        .unwrap();

    let updated = test
        .store
        .update_listing(
            listing.id,
            UpdateListing {
                title: Some(String::new()),
                description: None,
                price: Some(0.0),
                category: Some(String::new()),
                media: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated, listing);
    assert_eq!(test.store.get_listing(listing.id).await.unwrap(), Some(listing));
}

#[tokio::test]
async fn update_persists_changes() {
    let test = TestStore::new().await;
    let listing = test
        .store
        .create_listing(new_listing("Chair", 25.0, "furniture"))
        .await
        .unwrap();

    test.store
        .update_listing(
            listing.id,
            UpdateListing {
                price: Some(20.0),
                media: Some(vec!["/uploads/new.png".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let stored = test.store.get_listing(listing.id).await.unwrap().unwrap();
    assert_eq!(stored.price, 20.0);
    assert_eq!(stored.media, vec!["/uploads/new.png".to_string()]);
    assert_eq!(stored.title, "Chair");
}

#[tokio::test]
async fn update_missing_listing_is_not_found() {
    let test = TestStore::new().await;
    let err = test
        .store
        .update_listing(ListingId::new(42), UpdateListing::default())
        .await
        .unwrap_err();

    assert!(matches!(err, MarketError::NotFound { .. }));
}

#[tokio::test]
async fn delete_removes_exactly_the_matching_listing() {
    let test = TestStore::new().await;
    let a = test.store.create_listing(new_listing("A", 1.0, "misc")).await.unwrap();
    let b = test.store.create_listing(new_listing("B", 1.0, "misc")).await.unwrap();

    assert!(test.store.delete_listing(a.id).await.unwrap());
    assert!(!test.store.delete_listing(a.id).await.unwrap());

    let remaining = test.store.get_all_listings().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, b.id);
}

#[tokio::test]
async fn concurrent_writes_are_not_lost() {
    let test = TestStore::new().await;
    let store = Arc::new(test.store);

    let mut handles = Vec::new();
    for i in 0..20 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .create_user(new_user(&format!("s{}", i), "pw"))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.get_all_users().await.unwrap().len(), 20);
}
