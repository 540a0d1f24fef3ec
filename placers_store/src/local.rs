//! Local durable key-value caches used as the offline fallback.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use placers_core::SnapshotCache;
use placers_entities::snapshots;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
    Set,
};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

fn is_table_already_exists_error(err: &DbErr) -> bool {
    err.to_string().contains("table") && err.to_string().contains("already exists")
}

/// SQLite-backed snapshot cache, one row per key.
pub struct SqliteSnapshotCache {
    db: DatabaseConnection,
}

impl SqliteSnapshotCache {
    /// Open (creating if needed) the cache file at `path`.
    pub async fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::connect(&format!("sqlite:{}?mode=rwc", path.display())).await
    }

    /// Connect with an explicit URL, e.g. `sqlite::memory:`.
    pub async fn connect(db_url: &str) -> anyhow::Result<Self> {
        info!("Connecting to local cache: {}", db_url);
        let db = Database::connect(db_url).await?;

        let backend = db.get_database_backend();
        let schema = Schema::new(backend);
        let stmt = schema.create_table_from_entity(snapshots::Entity);
        match db
            .execute_unprepared(&backend.build(&stmt).to_string())
            .await
        {
            Ok(_) => {}
            Err(e) if is_table_already_exists_error(&e) => {
                debug!("Snapshot table already exists, skipping creation");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Self { db })
    }
}

#[async_trait]
impl SnapshotCache for SqliteSnapshotCache {
    async fn load(&self, key: &str) -> anyhow::Result<Option<Value>> {
        let row = snapshots::Entity::find_by_id(key.to_owned())
            .one(&self.db)
            .await?;

        match row {
            Some(model) => Ok(Some(serde_json::from_str(&model.payload)?)),
            None => Ok(None),
        }
    }

    async fn store(&self, key: &str, value: &Value) -> anyhow::Result<()> {
        let payload = serde_json::to_string(value)?;
        let now = chrono::Utc::now().naive_utc();

        let exists = snapshots::Entity::find_by_id(key.to_owned())
            .one(&self.db)
            .await?
            .is_some();

        let model = snapshots::ActiveModel {
            key: Set(key.to_owned()),
            payload: Set(payload),
            updated_at: Set(now),
        };

        if exists {
            snapshots::Entity::update(model).exec(&self.db).await?;
        } else {
            model.insert(&self.db).await?;
        }

        debug!("Stored local snapshot: {}", key);
        Ok(())
    }
}

/// Process-local snapshot cache, for tests and ephemeral runs.
#[derive(Default)]
pub struct MemorySnapshotCache {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemorySnapshotCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotCache for MemorySnapshotCache {
    async fn load(&self, key: &str) -> anyhow::Result<Option<Value>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn store(&self, key: &str, value: &Value) -> anyhow::Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn memory_cache_round_trip() {
        let cache = MemorySnapshotCache::new();
        assert!(cache.load("drives").await.expect("load").is_none());
        cache
            .store("drives", &json!([{"id": "d1"}]))
            .await
            .expect("store");
        assert_eq!(
            cache.load("drives").await.expect("load"),
            Some(json!([{"id": "d1"}]))
        );
    }
}
