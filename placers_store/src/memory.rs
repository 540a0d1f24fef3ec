//! In-process document store with live subscriptions.
//!
//! Behaves like the hosted backend: every write pushes a full snapshot to the
//! collection's subscribers. It can be switched offline, in which case every
//! call fails and live subscribers receive an error event.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use placers_core::{Collection, Document, DocumentStore, SnapshotEvent, Subscription};
use serde_json::{Map, Value};
use tokio::sync::{RwLock, broadcast, mpsc};
use tracing::{debug, info};
use uuid::Uuid;

const EVENT_BUFFER: usize = 16;

#[derive(Debug, Clone, Copy)]
enum Change {
    Updated(Collection),
    WentOffline,
}

struct Inner {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
    changes: broadcast::Sender<Change>,
    offline: AtomicBool,
}

#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            inner: Arc::new(Inner {
                collections: RwLock::new(HashMap::new()),
                changes,
                offline: AtomicBool::new(false),
            }),
        }
    }

    /// A store that is unreachable from the start. All reads and writes fall
    /// back to the local cache.
    #[must_use]
    pub fn offline() -> Self {
        let store = Self::new();
        store.inner.offline.store(true, Ordering::SeqCst);
        store
    }

    pub fn set_offline(&self, offline: bool) {
        let was = self.inner.offline.swap(offline, Ordering::SeqCst);
        if offline && !was {
            info!("Memory store going offline");
            let _ = self.inner.changes.send(Change::WentOffline);
        }
    }

    #[must_use]
    pub fn is_offline(&self) -> bool {
        self.inner.offline.load(Ordering::SeqCst)
    }

    fn ensure_online(&self) -> anyhow::Result<()> {
        if self.is_offline() {
            anyhow::bail!("document store unavailable");
        }
        Ok(())
    }

    /// Current contents of a collection.
    pub async fn snapshot(&self, collection: Collection) -> Vec<Document> {
        self.inner
            .collections
            .read()
            .await
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    fn notify(&self, collection: Collection) {
        // No receivers is fine; nobody is listening yet.
        let _ = self.inner.changes.send(Change::Updated(collection));
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn subscribe(&self, collection: Collection) -> anyhow::Result<Subscription> {
        self.ensure_online()?;

        // Subscribe to changes before reading the initial snapshot so no write
        // can slip in between.
        let mut changes = self.inner.changes.subscribe();
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let store = self.clone();

        let task = tokio::spawn(async move {
            let initial = store.snapshot(collection).await;
            if tx.send(SnapshotEvent::Snapshot(initial)).await.is_err() {
                return;
            }
            loop {
                let event = match changes.recv().await {
                    Ok(Change::Updated(c)) if c == collection => {
                        SnapshotEvent::Snapshot(store.snapshot(collection).await)
                    }
                    Ok(Change::Updated(_)) => continue,
                    Ok(Change::WentOffline) => {
                        SnapshotEvent::Error("document store unavailable".to_string())
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!("Subscriber for {collection} lagged by {skipped} changes");
                        SnapshotEvent::Snapshot(store.snapshot(collection).await)
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                if tx.send(event).await.is_err() {
                    break;
                }
            }
        });

        Ok(Subscription::new(collection, rx, Some(task)))
    }

    async fn get(&self, collection: Collection, id: &str) -> anyhow::Result<Option<Document>> {
        self.ensure_online()?;
        Ok(self
            .inner
            .collections
            .read()
            .await
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id).cloned()))
    }

    async fn add(
        &self,
        collection: Collection,
        fields: Map<String, Value>,
    ) -> anyhow::Result<String> {
        self.ensure_online()?;
        let id = Uuid::now_v7().simple().to_string();
        self.inner
            .collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(Document::new(id.clone(), fields));
        self.notify(collection);
        Ok(id)
    }

    async fn set(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> anyhow::Result<()> {
        self.ensure_online()?;
        {
            let mut collections = self.inner.collections.write().await;
            let docs = collections.entry(collection).or_default();
            let doc = Document::new(id.to_string(), fields);
            match docs.iter_mut().find(|d| d.id == id) {
                Some(existing) => *existing = doc,
                None => docs.push(doc),
            }
        }
        self.notify(collection);
        Ok(())
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        updates: Map<String, Value>,
    ) -> anyhow::Result<()> {
        self.ensure_online()?;
        {
            let mut collections = self.inner.collections.write().await;
            let doc = collections
                .get_mut(&collection)
                .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
                .ok_or_else(|| anyhow::anyhow!("no document to update: {collection}/{id}"))?;
            doc.merge(&updates);
        }
        self.notify(collection);
        Ok(())
    }
}
