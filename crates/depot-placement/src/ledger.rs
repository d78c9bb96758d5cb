//! The durable-ledger boundary consumed by the placement authority.
//!
//! The authority needs exactly four things from durable storage: the
//! conditional test-and-increment confirmations, the audited truck-load
//! rollback, truck registration, and bulk row loading for startup
//! reconciliation. `DepotStore` is the production implementation; tests
//! substitute rejecting or failing ledgers to drive the undo paths.

use std::future::Future;

use depot_core::Parcel;
use depot_state::{BinRecord, CargoEvent, DepotStore, StoreResult, TruckRecord};

/// Async boundary to the authoritative store. Every method is a potential
/// suspension point in the reserve-then-commit protocol.
pub trait CargoLedger: Send + Sync {
    /// Conditionally confirm a bin assignment. `Ok(false)` is a durable
    /// rejection (no space on the durable row, or unknown bin).
    fn confirm_bin_assignment(
        &self,
        bin_id: u64,
        parcel: &Parcel,
    ) -> impl Future<Output = StoreResult<bool>> + Send;

    /// Conditionally confirm a truck load. Same contract as
    /// [`confirm_bin_assignment`](CargoLedger::confirm_bin_assignment).
    fn confirm_truck_load(
        &self,
        truck_id: &str,
        parcel: &Parcel,
    ) -> impl Future<Output = StoreResult<bool>> + Send;

    /// Roll back the most recent durable `loaded` record for a
    /// truck+parcel, returning the recorded size, or `None` when no such
    /// record exists.
    fn rollback_truck_load(
        &self,
        truck_id: &str,
        tracking_id: &str,
    ) -> impl Future<Output = StoreResult<Option<u64>>> + Send;

    /// Persist (or overwrite) a truck row.
    fn register_truck(
        &self,
        record: &TruckRecord,
    ) -> impl Future<Output = StoreResult<()>> + Send;

    /// All bin rows, for startup reconciliation.
    fn load_bins(&self) -> impl Future<Output = StoreResult<Vec<BinRecord>>> + Send;

    /// All truck rows, for startup reconciliation.
    fn load_trucks(&self) -> impl Future<Output = StoreResult<Vec<TruckRecord>>> + Send;

    /// Active `loaded` events for a truck in load order, for manifest
    /// reconstruction at startup.
    fn active_loads(
        &self,
        truck_id: &str,
    ) -> impl Future<Output = StoreResult<Vec<CargoEvent>>> + Send;
}

impl CargoLedger for DepotStore {
    async fn confirm_bin_assignment(&self, bin_id: u64, parcel: &Parcel) -> StoreResult<bool> {
        self.commit_bin_assignment(bin_id, parcel)
    }

    async fn confirm_truck_load(&self, truck_id: &str, parcel: &Parcel) -> StoreResult<bool> {
        self.commit_truck_load(truck_id, parcel)
    }

    async fn rollback_truck_load(
        &self,
        truck_id: &str,
        tracking_id: &str,
    ) -> StoreResult<Option<u64>> {
        DepotStore::rollback_truck_load(self, truck_id, tracking_id)
    }

    async fn register_truck(&self, record: &TruckRecord) -> StoreResult<()> {
        self.put_truck(record)
    }

    async fn load_bins(&self) -> StoreResult<Vec<BinRecord>> {
        self.list_bins()
    }

    async fn load_trucks(&self) -> StoreResult<Vec<TruckRecord>> {
        self.list_trucks()
    }

    async fn active_loads(&self, truck_id: &str) -> StoreResult<Vec<CargoEvent>> {
        DepotStore::active_loads(self, truck_id)
    }
}
