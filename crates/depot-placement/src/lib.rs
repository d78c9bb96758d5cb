//! depot-placement — the allocation authority for bins and trucks.
//!
//! Owns the capacity-sorted bin inventory and the truck registry, and
//! runs every placement through the optimistic-reserve → durable-commit
//! protocol: mutate the in-memory model synchronously, then suspend for
//! the durable ledger's conditional confirmation, unwinding the in-memory
//! change whenever the ledger rejects or fails.
//!
//! # Components
//!
//! - **`authority`** — `PlacementAuthority`: best-fit lookup, the
//!   reserve-then-commit protocol, truck-load rollback, reconciliation
//! - **`ledger`** — the `CargoLedger` boundary to the durable store
//! - **`convert`** — durable record → domain type conversions

pub mod authority;
pub mod convert;
pub mod error;
pub mod ledger;

pub use authority::{BinSummary, ManifestEntry, PlacementAuthority, TruckSummary};
pub use convert::{bin_from_record, truck_from_parts};
pub use error::{PlacementError, PlacementResult};
pub use ledger::CargoLedger;
