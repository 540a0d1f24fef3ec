//! sea-orm entities backing the local durable cache.

pub mod snapshots;
