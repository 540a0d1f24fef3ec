//! Seed a collection from a JSON file holding an array of records.

use std::path::PathBuf;

use placers_core::{
    Alumnus, Collection, Document, Drive, MentorshipSlot, Record, Referral, Student, UserProfile,
};
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::Context;

#[derive(Debug, Clone)]
pub struct ImportInput {
    pub collection: Collection,
    pub file: PathBuf,
}

#[derive(Debug, Clone, Copy)]
pub struct ImportStrategy;

impl super::CommandStrategy for ImportStrategy {
    type Input = ImportInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let content = std::fs::read_to_string(&input.file)?;
        let Value::Array(items) = serde_json::from_str(&content)? else {
            anyhow::bail!("{} must contain a JSON array", input.file.display());
        };
        info!("Importing {} items into {}", items.len(), input.collection);

        let ctx = Context::init().await?;
        let (imported, offline) = match input.collection {
            Collection::Students => import_into::<Student>(&ctx, items).await,
            Collection::Drives => import_into::<Drive>(&ctx, items).await,
            Collection::Alumni => import_into::<Alumnus>(&ctx, items).await,
            Collection::Referrals => import_into::<Referral>(&ctx, items).await,
            Collection::MentorshipSlots => import_into::<MentorshipSlot>(&ctx, items).await,
            Collection::Users => import_into::<UserProfile>(&ctx, items).await,
        };

        println!("Imported {imported} records into {}", input.collection);
        if offline > 0 {
            println!("{offline} of them are saved offline, not yet synced");
        }
        Ok(())
    }
}

/// Id carried by an import item: `uid` for users, `id` everywhere else.
fn item_id(collection: Collection, fields: &Map<String, Value>) -> Option<String> {
    let key = if collection == Collection::Users {
        "uid"
    } else {
        "id"
    };
    match fields.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Validate each item as `T` and write it through the collection cache.
/// Returns how many were written and how many of those stayed local.
async fn import_into<T: Record>(ctx: &Context, items: Vec<Value>) -> (usize, usize) {
    let mut cache = ctx.collection::<T>().await;
    let mut imported = 0;
    let mut offline = 0;

    for (index, item) in items.into_iter().enumerate() {
        let Value::Object(mut fields) = item else {
            warn!("Skipping item {}: not a JSON object", index);
            continue;
        };
        let id = item_id(T::COLLECTION, &fields);
        let candidate = Document::new(id.clone().unwrap_or_default(), fields.clone());
        if let Err(e) = candidate.decode::<T>() {
            warn!("Skipping item {}: {}", index, e);
            continue;
        }

        fields.remove("id");
        let outcome = match id {
            Some(id) => cache.upsert(&id, fields).await,
            None => cache.create(fields).await.outcome,
        };
        imported += 1;
        if outcome == placers_store::WriteOutcome::LocalOnly {
            offline += 1;
        }
    }
    (imported, offline)
}
