//! Document store served over a small REST API.
//!
//! `GET    {base}/{collection}`       list, JSON array of documents with `id`
//! `POST   {base}/{collection}`       create, returns `{"id": ...}`
//! `GET    {base}/{collection}/{id}`  fetch one, 404 when absent
//! `PUT    {base}/{collection}/{id}`  create or replace
//! `PATCH  {base}/{collection}/{id}`  shallow merge
//!
//! Live subscriptions are emulated by polling the list endpoint.

use std::time::Duration;

use async_trait::async_trait;
use placers_core::{Collection, Document, DocumentStore, SnapshotEvent, Subscription};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use url::Url;

const EVENT_BUFFER: usize = 4;

#[derive(Clone)]
pub struct HttpStore {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    poll_interval: Duration,
}

impl HttpStore {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("backend url cannot be used as a base: {base_url}");
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        info!("Creating HttpStore for {}", base_url);
        Ok(Self {
            client: Client::new(),
            base_url,
            api_key: None,
            poll_interval: Duration::from_secs(5),
        })
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }

    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn url(&self, collection: Collection, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(collection.as_str());
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn list(&self, collection: Collection) -> anyhow::Result<Vec<Document>> {
        let items = self
            .authorized(self.client.get(self.url(collection, None)))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Value>>()
            .await?;

        Ok(items
            .into_iter()
            .filter_map(|item| match Document::from_value(item) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    warn!("Skipping malformed {} document: {}", collection, e);
                    None
                }
            })
            .collect())
    }
}

/// Turn one poll result into the event to forward, if any. `last` holds the
/// last delivered snapshot, or `None` after a reported failure.
fn poll_event(
    last: &mut Option<Vec<Document>>,
    polled: anyhow::Result<Vec<Document>>,
) -> Option<SnapshotEvent> {
    match polled {
        Ok(docs) if last.as_ref() == Some(&docs) => None,
        Ok(docs) => {
            *last = Some(docs.clone());
            Some(SnapshotEvent::Snapshot(docs))
        }
        // Report a failure once until the next good poll.
        Err(_) if last.is_none() => None,
        Err(e) => {
            *last = None;
            Some(SnapshotEvent::Error(e.to_string()))
        }
    }
}

#[async_trait]
impl DocumentStore for HttpStore {
    async fn subscribe(&self, collection: Collection) -> anyhow::Result<Subscription> {
        let initial = self.list(collection).await?;

        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let store = self.clone();
        let task = tokio::spawn(async move {
            if tx.send(SnapshotEvent::Snapshot(initial.clone())).await.is_err() {
                return;
            }
            let mut last = Some(initial);
            loop {
                tokio::time::sleep(store.poll_interval).await;
                let Some(event) = poll_event(&mut last, store.list(collection).await) else {
                    continue;
                };
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            debug!("Polling of {} stopped", collection);
        });

        Ok(Subscription::new(collection, rx, Some(task)))
    }

    async fn get(&self, collection: Collection, id: &str) -> anyhow::Result<Option<Document>> {
        let response = self
            .authorized(self.client.get(self.url(collection, Some(id))))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let value = response.error_for_status()?.json::<Value>().await?;
        let mut doc = match value {
            Value::Object(mut fields) => {
                fields
                    .entry("id")
                    .or_insert_with(|| Value::String(id.to_string()));
                Document::from_value(Value::Object(fields))?
            }
            other => anyhow::bail!("unexpected document body: {other}"),
        };
        doc.id = id.to_string();
        Ok(Some(doc))
    }

    async fn add(
        &self,
        collection: Collection,
        fields: Map<String, Value>,
    ) -> anyhow::Result<String> {
        let response = self
            .authorized(self.client.post(self.url(collection, None)))
            .json(&fields)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        match &response["id"] {
            Value::String(id) => Ok(id.clone()),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(anyhow::anyhow!("Invalid response format: missing id")),
        }
    }

    async fn set(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> anyhow::Result<()> {
        self.authorized(self.client.put(self.url(collection, Some(id))))
            .json(&fields)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        updates: Map<String, Value>,
    ) -> anyhow::Result<()> {
        self.authorized(self.client.patch(self.url(collection, Some(id))))
            .json(&updates)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
