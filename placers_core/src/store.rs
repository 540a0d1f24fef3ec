//! Seams to the hosted document database and the local durable cache.
//!
//! The remote side is a set of named collections of schemaless JSON documents.
//! Records are validated into typed structs on read through [`Record`].

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Field that marks a document as written only to the local cache.
pub const LOCAL_ONLY_FIELD: &str = "_offline";

/// Collections held by the backend, keyed by their wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Students,
    Drives,
    Alumni,
    Referrals,
    MentorshipSlots,
    Users,
}

impl Collection {
    pub const ALL: [Self; 6] = [
        Self::Students,
        Self::Drives,
        Self::Alumni,
        Self::Referrals,
        Self::MentorshipSlots,
        Self::Users,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Students => "students",
            Self::Drives => "drives",
            Self::Alumni => "alumni",
            Self::Referrals => "referrals",
            Self::MentorshipSlots => "mentorshipSlots",
            Self::Users => "users",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Collection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown collection: {s}"))
    }
}

/// A single schemaless document as stored remotely or in the local cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
    /// Written to the local cache only because the remote write failed.
    pub local_only: bool,
}

impl Document {
    #[must_use]
    pub const fn new(id: String, fields: Map<String, Value>) -> Self {
        Self {
            id,
            fields,
            local_only: false,
        }
    }

    /// Build a document from a JSON object that carries its own `id`.
    ///
    /// Numeric ids are accepted and stringified.
    pub fn from_value(value: Value) -> anyhow::Result<Self> {
        let Value::Object(mut fields) = value else {
            anyhow::bail!("document is not a JSON object");
        };
        let id = match fields.remove("id") {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => anyhow::bail!("document id has unsupported type: {other}"),
            None => anyhow::bail!("document has no id"),
        };
        let local_only = fields
            .remove(LOCAL_ONLY_FIELD)
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        Ok(Self {
            id,
            fields,
            local_only,
        })
    }

    /// Flatten back into a JSON object with `id` (and the local-only marker) inlined.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut fields = self.fields.clone();
        fields.insert("id".to_string(), Value::String(self.id.clone()));
        if self.local_only {
            fields.insert(LOCAL_ONLY_FIELD.to_string(), Value::Bool(true));
        }
        Value::Object(fields)
    }

    /// Shallow-merge `updates` over the current fields; last writer wins per key.
    pub fn merge(&mut self, updates: &Map<String, Value>) {
        for (key, value) in updates {
            self.fields.insert(key.clone(), value.clone());
        }
    }

    /// Validate this document into a typed record.
    pub fn decode<T: Record>(&self) -> anyhow::Result<T> {
        let mut fields = self.fields.clone();
        fields.insert("id".to_string(), Value::String(self.id.clone()));
        Ok(serde_json::from_value(Value::Object(fields))?)
    }
}

/// A typed record living in one backend collection.
pub trait Record: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
}

/// Serialise any value into a field map suitable for create/update calls.
///
/// The `id` key is dropped because identity lives on the document, not in its fields.
pub fn to_fields<T: Serialize>(value: &T) -> anyhow::Result<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(mut map) => {
            map.remove("id");
            Ok(map)
        }
        other => anyhow::bail!("expected a JSON object, got {other}"),
    }
}

/// Upstream notification delivered on a live subscription.
#[derive(Debug, Clone)]
pub enum SnapshotEvent {
    /// Full replacement of the collection contents.
    Snapshot(Vec<Document>),
    /// The subscription failed; consumers keep serving their last snapshot.
    Error(String),
}

/// Live subscription handle. Dropping it or calling [`Subscription::unsubscribe`]
/// stops delivery.
pub struct Subscription {
    pub collection: Collection,
    events: mpsc::Receiver<SnapshotEvent>,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    #[must_use]
    pub const fn new(
        collection: Collection,
        events: mpsc::Receiver<SnapshotEvent>,
        task: Option<JoinHandle<()>>,
    ) -> Self {
        Self {
            collection,
            events,
            task,
        }
    }

    /// Wait for the next upstream event; `None` once the producer has gone away.
    pub async fn next(&mut self) -> Option<SnapshotEvent> {
        self.events.recv().await
    }

    pub fn unsubscribe(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("Unsubscribing from {}", self.collection);
            task.abort();
        }
        self.events.close();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The hosted document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn subscribe(&self, collection: Collection) -> anyhow::Result<Subscription>;

    async fn get(&self, collection: Collection, id: &str) -> anyhow::Result<Option<Document>>;

    /// Create a document with a backend-assigned id.
    async fn add(&self, collection: Collection, fields: Map<String, Value>)
    -> anyhow::Result<String>;

    /// Create or replace the document with the given id.
    async fn set(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> anyhow::Result<()>;

    /// Shallow-merge `updates` into an existing document.
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        updates: Map<String, Value>,
    ) -> anyhow::Result<()>;
}

/// Local durable key-value cache holding one JSON value per key.
#[async_trait]
pub trait SnapshotCache: Send + Sync {
    async fn load(&self, key: &str) -> anyhow::Result<Option<Value>>;

    async fn store(&self, key: &str, value: &Value) -> anyhow::Result<()>;
}

#[async_trait]
impl<T: DocumentStore + ?Sized> DocumentStore for std::sync::Arc<T> {
    async fn subscribe(&self, collection: Collection) -> anyhow::Result<Subscription> {
        (**self).subscribe(collection).await
    }

    async fn get(&self, collection: Collection, id: &str) -> anyhow::Result<Option<Document>> {
        (**self).get(collection, id).await
    }

    async fn add(
        &self,
        collection: Collection,
        fields: Map<String, Value>,
    ) -> anyhow::Result<String> {
        (**self).add(collection, fields).await
    }

    async fn set(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> anyhow::Result<()> {
        (**self).set(collection, id, fields).await
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        updates: Map<String, Value>,
    ) -> anyhow::Result<()> {
        (**self).update(collection, id, updates).await
    }
}

#[async_trait]
impl<T: SnapshotCache + ?Sized> SnapshotCache for std::sync::Arc<T> {
    async fn load(&self, key: &str) -> anyhow::Result<Option<Value>> {
        (**self).load(key).await
    }

    async fn store(&self, key: &str, value: &Value) -> anyhow::Result<()> {
        (**self).store(key, value).await
    }
}
