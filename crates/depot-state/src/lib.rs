//! depot-state — embedded durable ledger for the depot placement core.
//!
//! Backed by [redb](https://docs.rs/redb), holds the authoritative record
//! of bin and truck occupancy plus a cargo event log (the audit trail of
//! assignments, loads, and rollbacks; events are appended at commit time,
//! and a truck-load rollback rewrites the matching event's status in
//! place).
//!
//! # Architecture
//!
//! All rows are JSON-serialized into redb's `&[u8]` value columns. The
//! placement protocol's conditional test-and-increment and its audit
//! append execute inside a single write transaction, so a rejected
//! reservation leaves no durable trace.
//!
//! The `DepotStore` is `Clone` + `Send` + `Sync` (backed by `Arc<Database>`)
//! and can be shared across async tasks.

pub mod error;
pub mod report;
pub mod store;
pub mod tables;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use report::{
    BucketUtilization, CapacityBucket, DestinationCount, default_buckets, destination_counts,
    parse_buckets,
};
pub use store::DepotStore;
pub use types::*;
