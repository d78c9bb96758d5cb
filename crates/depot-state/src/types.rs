//! Persisted row types for the depot ledger.
//!
//! These mirror the in-memory domain model: bin and truck occupancy rows
//! plus the cargo event log. All types are JSON-serializable for storage
//! in redb tables.

use serde::{Deserialize, Serialize};

/// Durable occupancy row for a storage bin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BinRecord {
    pub bin_id: u64,
    pub capacity: u64,
    pub used: u64,
    pub location_code: String,
}

/// Durable occupancy row for a truck.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TruckRecord {
    pub truck_id: String,
    pub capacity: u64,
    pub used: u64,
}

/// The container an event refers to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContainerRef {
    Bin { bin_id: u64 },
    Truck { truck_id: String },
}

/// Lifecycle status of a cargo event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Parcel assigned to a bin.
    Assigned,
    /// Parcel loaded onto a truck.
    Loaded,
    /// A previously loaded parcel was rolled back off its truck.
    RolledBack,
}

/// One audit record in the cargo event log.
///
/// Events are appended in the same transaction as the occupancy update
/// they describe; a truck-load rollback rewrites the matching `Loaded`
/// event's status in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CargoEvent {
    pub seq: u64,
    pub tracking_id: String,
    pub container: ContainerRef,
    /// Parcel size as recorded at commit time; rollbacks decrement the
    /// truck's durable counter by this value, not the caller's.
    pub size: u64,
    pub destination: Option<String>,
    pub status: EventStatus,
}

impl CargoEvent {
    /// True when this event is an active load on the given truck.
    pub fn is_active_load_on(&self, truck_id: &str) -> bool {
        self.status == EventStatus::Loaded
            && matches!(&self.container, ContainerRef::Truck { truck_id: t } if t == truck_id)
    }
}
