//! redb table definitions for the depot ledger.
//!
//! Bin and event tables use `u64` keys (the durable bin id, the monotonic
//! event sequence); trucks are keyed by their caller-assigned string id.
//! Values are JSON-serialized domain records.

use redb::TableDefinition;

/// Bin rows keyed by `bin_id`.
pub const BINS: TableDefinition<u64, &[u8]> = TableDefinition::new("bins");

/// Truck rows keyed by `truck_id`.
pub const TRUCKS: TableDefinition<&str, &[u8]> = TableDefinition::new("trucks");

/// Cargo audit events keyed by a monotonic sequence number. Appended at
/// commit time; a rollback rewrites the target event's status in place.
pub const CARGO_EVENTS: TableDefinition<u64, &[u8]> = TableDefinition::new("cargo_events");
