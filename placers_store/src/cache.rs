//! Per-collection view that serves the last known snapshot.
//!
//! A [`CollectionCache`] starts from whatever the local cache holds, replaces
//! it with every remote snapshot it receives, and mirrors each snapshot back to
//! the local cache. Remote failures never clear what is already shown.

use std::sync::Arc;
use std::time::Duration;

use placers_core::store::to_fields;
use placers_core::{Document, DocumentStore, Record, SnapshotCache, SnapshotEvent, Subscription};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Prefix of ids minted locally when the remote create failed.
pub const LOCAL_ID_PREFIX: &str = "local_";

/// Where a write ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Synced,
    /// The remote write failed; the change lives only in the local cache.
    LocalOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReceipt {
    pub id: String,
    pub outcome: WriteOutcome,
}

pub struct CollectionCache<T, R = Arc<dyn DocumentStore>, C = Arc<dyn SnapshotCache>> {
    remote: R,
    local: C,
    documents: Vec<Document>,
    records: Vec<T>,
    loading: bool,
    error: Option<String>,
}

impl<T, R, C> CollectionCache<T, R, C>
where
    T: Record,
    R: DocumentStore,
    C: SnapshotCache,
{
    /// Create the view, seeded from the local snapshot when one exists.
    pub async fn open(remote: R, local: C) -> Self {
        let mut cache = Self {
            remote,
            local,
            documents: Vec::new(),
            records: Vec::new(),
            loading: true,
            error: None,
        };
        cache.load_local().await;
        cache
    }

    fn key() -> &'static str {
        T::COLLECTION.as_str()
    }

    async fn load_local(&mut self) {
        let value = match self.local.load(Self::key()).await {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("No local snapshot for {}", Self::key());
                return;
            }
            Err(e) => {
                warn!("Failed to read local snapshot for {}: {}", Self::key(), e);
                return;
            }
        };

        let Value::Array(items) = value else {
            warn!("Local snapshot for {} is not a list, ignoring", Self::key());
            return;
        };

        self.documents = items
            .into_iter()
            .filter_map(|item| match Document::from_value(item) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    warn!("Skipping cached {} entry: {}", Self::key(), e);
                    None
                }
            })
            .collect();
        self.rebuild();
        info!(
            "Loaded {} cached {} records",
            self.records.len(),
            Self::key()
        );
    }

    async fn persist(&self) {
        let snapshot = Value::Array(self.documents.iter().map(Document::to_value).collect());
        if let Err(e) = self.local.store(Self::key(), &snapshot).await {
            warn!("Failed to mirror {} to local cache: {}", Self::key(), e);
        }
    }

    fn rebuild(&mut self) {
        self.records = self
            .documents
            .iter()
            .filter_map(|doc| match doc.decode::<T>() {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping invalid {} record {}: {}", Self::key(), doc.id, e);
                    None
                }
            })
            .collect();
    }

    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// True until the first remote snapshot or error arrives.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last subscription error, cleared by the next good snapshot.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Open a live subscription. On failure the error is recorded and the
    /// cached data keeps being served.
    pub async fn subscribe(&mut self) -> Option<Subscription> {
        match self.remote.subscribe(T::COLLECTION).await {
            Ok(sub) => Some(sub),
            Err(e) => {
                warn!("Subscribe to {} failed: {}", Self::key(), e);
                self.loading = false;
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Fold one upstream event into the view.
    pub async fn apply(&mut self, event: SnapshotEvent) {
        self.loading = false;
        match event {
            SnapshotEvent::Snapshot(documents) => {
                debug!("Snapshot of {} with {} documents", Self::key(), documents.len());
                self.documents = documents;
                self.error = None;
                self.rebuild();
                self.persist().await;
            }
            SnapshotEvent::Error(message) => {
                warn!(
                    "Subscription to {} failed, serving cached data: {}",
                    Self::key(),
                    message
                );
                self.error = Some(message);
            }
        }
    }

    /// Consume events until the producer goes away.
    pub async fn run(&mut self, mut subscription: Subscription) {
        while let Some(event) = subscription.next().await {
            self.apply(event).await;
        }
        debug!("Subscription to {} ended", Self::key());
    }

    /// Take one snapshot from the remote and stop listening.
    ///
    /// Returns whether a fresh snapshot was applied.
    pub async fn sync(&mut self, timeout: Duration) -> bool {
        let Some(mut subscription) = self.subscribe().await else {
            return false;
        };

        let fresh = match tokio::time::timeout(timeout, subscription.next()).await {
            Ok(Some(event)) => {
                let fresh = matches!(event, SnapshotEvent::Snapshot(_));
                self.apply(event).await;
                fresh
            }
            Ok(None) => {
                warn!("Subscription to {} closed before first snapshot", Self::key());
                self.loading = false;
                false
            }
            Err(_) => {
                warn!("Timed out waiting for {} snapshot", Self::key());
                self.loading = false;
                self.error = Some(format!("timed out after {}s", timeout.as_secs()));
                false
            }
        };

        subscription.unsubscribe();
        fresh
    }

    /// Create a document. Falls back to a locally minted id when the remote
    /// write fails.
    pub async fn create(&mut self, mut fields: Map<String, Value>) -> WriteReceipt {
        fields
            .entry("createdAt")
            .or_insert_with(|| Value::String(chrono::Utc::now().to_rfc3339()));

        let (id, outcome) = match self.remote.add(T::COLLECTION, fields.clone()).await {
            Ok(id) => (id, WriteOutcome::Synced),
            Err(e) => {
                warn!("Remote create in {} failed, keeping local copy: {}", Self::key(), e);
                (
                    format!("{LOCAL_ID_PREFIX}{}", Uuid::now_v7().simple()),
                    WriteOutcome::LocalOnly,
                )
            }
        };

        if !self.documents.iter().any(|d| d.id == id) {
            let mut doc = Document::new(id.clone(), fields);
            doc.local_only = outcome == WriteOutcome::LocalOnly;
            self.documents.push(doc);
            self.rebuild();
        }
        self.persist().await;

        WriteReceipt { id, outcome }
    }

    pub async fn create_record(&mut self, record: &T) -> anyhow::Result<WriteReceipt> {
        Ok(self.create(to_fields(record)?).await)
    }

    /// Shallow-merge `updates` into document `id`, remotely first and then locally.
    /// An id missing from the cached view leaves the local copy untouched.
    pub async fn update(&mut self, id: &str, updates: Map<String, Value>) -> WriteOutcome {
        let outcome = match self.remote.update(T::COLLECTION, id, updates.clone()).await {
            Ok(()) => WriteOutcome::Synced,
            Err(e) => {
                warn!("Remote update of {}/{} failed: {}", Self::key(), id, e);
                WriteOutcome::LocalOnly
            }
        };

        match self.documents.iter_mut().find(|d| d.id == id) {
            Some(doc) => {
                doc.merge(&updates);
                if outcome == WriteOutcome::LocalOnly {
                    doc.local_only = true;
                }
            }
            None if outcome == WriteOutcome::LocalOnly => {
                warn!("No cached {} record {}, update dropped", Self::key(), id);
                return outcome;
            }
            None => {
                debug!("Updated {}/{} which is not in the cached view", Self::key(), id);
            }
        }
        self.rebuild();
        self.persist().await;
        outcome
    }

    /// Like [`Self::update`] with a typed payload.
    pub async fn update_with<P: Serialize + Sync>(
        &mut self,
        id: &str,
        payload: &P,
    ) -> anyhow::Result<WriteOutcome> {
        let updates = to_fields(payload)?;
        Ok(self.update(id, updates).await)
    }

    /// Create or replace document `id`.
    pub async fn upsert(&mut self, id: &str, fields: Map<String, Value>) -> WriteOutcome {
        let outcome = match self.remote.set(T::COLLECTION, id, fields.clone()).await {
            Ok(()) => WriteOutcome::Synced,
            Err(e) => {
                warn!("Remote set of {}/{} failed: {}", Self::key(), id, e);
                WriteOutcome::LocalOnly
            }
        };

        let mut doc = Document::new(id.to_string(), fields);
        doc.local_only = outcome == WriteOutcome::LocalOnly;
        match self.documents.iter_mut().find(|d| d.id == id) {
            Some(existing) => *existing = doc,
            None => self.documents.push(doc),
        }
        self.rebuild();
        self.persist().await;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::MemorySnapshotCache;
    use crate::memory::MemoryStore;
    use placers_core::{Alumnus, Collection};
    use serde_json::json;

    fn fields(value: &Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn invalid_documents_are_skipped() {
        let remote = Arc::new(MemoryStore::new());
        remote
            .set(
                Collection::Alumni,
                "a1",
                fields(&json!({"name": "Priya", "company": "Google", "role": "SDE"})),
            )
            .await
            .expect("set");
        remote
            .set(Collection::Alumni, "a2", fields(&json!({"name": 42})))
            .await
            .expect("set");

        let mut cache: CollectionCache<Alumnus, _, _> =
            CollectionCache::open(remote, Arc::new(MemorySnapshotCache::new())).await;
        assert!(cache.is_loading());
        assert!(cache.sync(Duration::from_secs(2)).await);
        assert!(!cache.is_loading());
        assert_eq!(cache.documents().len(), 2);
        assert_eq!(cache.records().len(), 1);
        assert_eq!(cache.get("a1").map(|a| a.company.as_str()), Some("Google"));
    }

    #[tokio::test]
    async fn offline_create_mints_local_id() {
        let remote = Arc::new(MemoryStore::offline());
        let mut cache: CollectionCache<Alumnus, _, _> =
            CollectionCache::open(remote, Arc::new(MemorySnapshotCache::new())).await;

        assert!(!cache.sync(Duration::from_secs(1)).await);
        assert!(cache.error().is_some());

        let receipt = cache
            .create(fields(
                &json!({"name": "Rahul", "company": "Amazon", "role": "SDE-2"}),
            ))
            .await;
        assert_eq!(receipt.outcome, WriteOutcome::LocalOnly);
        assert!(receipt.id.starts_with(LOCAL_ID_PREFIX));
        assert!(cache.documents()[0].local_only);
        assert!(cache.documents()[0].fields.contains_key("createdAt"));
        assert_eq!(cache.records().len(), 1);
    }

    #[tokio::test]
    async fn offline_update_of_uncached_record_is_dropped() {
        let remote = Arc::new(MemoryStore::offline());
        let local = Arc::new(MemorySnapshotCache::new());
        let mut cache: CollectionCache<Alumnus, _, _> =
            CollectionCache::open(remote, local.clone()).await;
        let outcome = cache.update("ghost", fields(&json!({"company": "x"}))).await;
        assert_eq!(outcome, WriteOutcome::LocalOnly);
        assert!(cache.documents().is_empty());
        assert!(matches!(local.load("alumni").await, Ok(None)));
    }
}
