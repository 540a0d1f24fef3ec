#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Document store backends, local caches and the offline-first collection view.

pub mod account;
pub mod auth;
pub mod cache;
pub mod http;
pub mod local;
pub mod memory;

pub use account::{AccountError, AccountService};
pub use auth::MemoryAuth;
pub use cache::{CollectionCache, WriteOutcome, WriteReceipt};
pub use http::HttpStore;
pub use local::{MemorySnapshotCache, SqliteSnapshotCache};
pub use memory::MemoryStore;
