//! Integration tests for the offline-first collection view.
//!
//! These tests verify that:
//! - Remote snapshots are mirrored into the SQLite cache
//! - A later session serves the cached snapshot while the backend is down
//! - Writes made offline are kept locally and marked as such
//! - Booking an already-booked slot leaves it untouched

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use placers_core::actions::{book_slot, new_referral};
use placers_core::{
    Collection, Document, DocumentStore, Drive, MentorshipSlot, ReferralForm, Referral,
    SnapshotCache, UserProfile, UserRole,
};
use placers_store::{
    CollectionCache, MemoryStore, SqliteSnapshotCache, WriteOutcome, cache::LOCAL_ID_PREFIX,
};
use serde_json::{Map, Value, json};

const TIMEOUT: Duration = Duration::from_secs(2);

fn fields(value: &Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

fn temp_db() -> PathBuf {
    std::env::temp_dir()
        .join("placers-tests")
        .join(format!("{}.db", uuid::Uuid::now_v7().simple()))
}

#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
async fn sqlite_cache(path: &PathBuf) -> Arc<SqliteSnapshotCache> {
    Arc::new(
        SqliteSnapshotCache::open(path)
            .await
            .expect("open sqlite cache"),
    )
}

#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
async fn seed_drives(store: &MemoryStore) {
    store
        .set(
            Collection::Drives,
            "drive_1",
            fields(&json!({
                "company": "Google", "role": "SDE-1", "package": "32 LPA",
                "minCgpa": 8.0, "maxBacklogs": 0, "branches": ["CSE", "IT"],
                "reqSkills": ["DSA", "System Design"], "date": "2025-08-15"
            })),
        )
        .await
        .expect("seed drive_1");
    store
        .set(
            Collection::Drives,
            "drive_2",
            fields(&json!({
                "company": "TCS Digital", "role": "Developer", "package": "7.5 LPA",
                "minCgpa": 6.0, "maxBacklogs": 1, "branches": ["All"]
            })),
        )
        .await
        .expect("seed drive_2");
}

#[tokio::test]
async fn snapshot_survives_backend_outage() {
    let path = temp_db();
    let remote = Arc::new(MemoryStore::new());
    seed_drives(&remote).await;

    let mut first: CollectionCache<Drive, _, _> =
        CollectionCache::open(remote.clone(), sqlite_cache(&path).await).await;
    assert!(first.sync(TIMEOUT).await);
    assert_eq!(first.records().len(), 2);
    drop(first);

    remote.set_offline(true);
    let mut second: CollectionCache<Drive, _, _> =
        CollectionCache::open(remote, sqlite_cache(&path).await).await;
    assert_eq!(second.records().len(), 2);

    assert!(!second.sync(TIMEOUT).await);
    assert!(second.error().is_some());
    assert_eq!(second.records().len(), 2);
    assert_eq!(
        second.get("drive_2").map(|d| d.company.as_str()),
        Some("TCS Digital")
    );
}

#[tokio::test]
async fn live_error_keeps_last_snapshot() {
    let remote = Arc::new(MemoryStore::new());
    seed_drives(&remote).await;
    let local = Arc::new(placers_store::MemorySnapshotCache::new());

    let mut cache: CollectionCache<Drive, _, _> = CollectionCache::open(remote.clone(), local).await;
    let Some(mut sub) = cache.subscribe().await else {
        panic!("subscribe should succeed while online");
    };
    let Some(event) = sub.next().await else {
        panic!("expected initial snapshot");
    };
    cache.apply(event).await;
    assert_eq!(cache.records().len(), 2);

    remote.set_offline(true);
    let Some(event) = sub.next().await else {
        panic!("expected error event");
    };
    cache.apply(event).await;
    assert!(cache.error().is_some());
    assert_eq!(cache.records().len(), 2);
    sub.unsubscribe();
}

#[tokio::test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
async fn offline_referral_is_kept_locally() {
    let path = temp_db();
    let remote = Arc::new(MemoryStore::offline());
    let poster = UserProfile {
        uid: "alum_1".to_string(),
        name: "Priya Sharma".to_string(),
        email: "priya@alumni.edu".to_string(),
        role: UserRole::Alumni,
        cgpa: None,
        branch: None,
        backlogs: None,
        phone: None,
        skills: vec![],
        applications: vec![],
        created_at: None,
    };
    let form = ReferralForm {
        company: "Amazon".to_string(),
        role: "SDE-1".to_string(),
        package: "28 LPA".to_string(),
        skills: "Java, AWS".to_string(),
    };
    let today = NaiveDate::from_ymd_opt(2025, 7, 20).expect("valid date");
    let referral = new_referral(&poster, &form, today, 30).expect("valid referral");

    let mut cache: CollectionCache<Referral, _, _> =
        CollectionCache::open(remote.clone(), sqlite_cache(&path).await).await;
    let receipt = cache.create_record(&referral).await.expect("create");
    assert_eq!(receipt.outcome, WriteOutcome::LocalOnly);
    assert!(receipt.id.starts_with(LOCAL_ID_PREFIX));
    drop(cache);

    let reopened: CollectionCache<Referral, _, _> =
        CollectionCache::open(remote, sqlite_cache(&path).await).await;
    let stored = reopened.get(&receipt.id).expect("referral cached");
    assert_eq!(stored.skills, vec!["Java", "AWS"]);
    assert_eq!(stored.deadline, NaiveDate::from_ymd_opt(2025, 8, 19).expect("valid date"));
    assert!(reopened.documents()[0].local_only);
}

#[tokio::test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
async fn second_booking_is_noop() {
    let remote = Arc::new(MemoryStore::new());
    remote
        .set(
            Collection::MentorshipSlots,
            "slot_1",
            fields(&json!({
                "alumniName": "Rahul Verma", "type": "Mock Interview",
                "date": "2025-08-02", "time": "6:00 PM", "duration": "45 min",
                "booked": false
            })),
        )
        .await
        .expect("seed slot");

    let local = Arc::new(placers_store::MemorySnapshotCache::new());
    let mut slots: CollectionCache<MentorshipSlot, _, _> =
        CollectionCache::open(remote.clone(), local).await;
    assert!(slots.sync(TIMEOUT).await);

    let slot = slots.get("slot_1").cloned().expect("slot present");
    let booking = book_slot(&slot, "first@college.edu").expect("open slot");
    let outcome = slots.update_with("slot_1", &booking).await.expect("update");
    assert_eq!(outcome, WriteOutcome::Synced);

    assert!(slots.sync(TIMEOUT).await);
    let slot = slots.get("slot_1").cloned().expect("slot present");
    assert!(slot.booked);
    assert!(book_slot(&slot, "second@college.edu").is_none());

    let remote_doc: Document = remote
        .get(Collection::MentorshipSlots, "slot_1")
        .await
        .expect("get")
        .expect("exists");
    assert_eq!(remote_doc.fields["bookedBy"], "first@college.edu");
}

#[tokio::test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
async fn sqlite_cache_overwrites_per_key() {
    let cache = sqlite_cache(&temp_db()).await;
    assert!(cache.load("drives").await.expect("load").is_none());
    cache.store("drives", &json!([{"id": "a"}])).await.expect("store");
    cache
        .store("drives", &json!([{"id": "a"}, {"id": "b"}]))
        .await
        .expect("overwrite");
    assert_eq!(
        cache.load("drives").await.expect("load"),
        Some(json!([{"id": "a"}, {"id": "b"}]))
    );
}
