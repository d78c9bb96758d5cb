//! depot-core — domain types for the depot placement system.
//!
//! Provides the capacity-unit abstraction shared by storage bins and
//! trucks, the immutable `Parcel` cargo type, the LIFO truck manifest,
//! the conveyor intake queue, and `depot.toml` config parsing.

pub mod bin;
pub mod config;
pub mod parcel;
pub mod queue;
pub mod truck;
pub mod unit;

pub use bin::Bin;
pub use config::DepotConfig;
pub use parcel::Parcel;
pub use queue::ConveyorQueue;
pub use truck::Truck;
pub use unit::{Capacity, CapacityUnit};
