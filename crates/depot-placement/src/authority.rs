//! Placement authority — best-fit assignment and LIFO truck loading.
//!
//! The authority is the single owner of the in-memory capacity model:
//! a capacity-sorted bin inventory, a truck registry, and the conveyor
//! intake queue. Every placement follows the same protocol:
//!
//! 1. Locate the candidate container.
//! 2. Mutate the in-memory model optimistically — synchronously, before
//!    the first suspension point, so interleaved requests observe each
//!    other's provisional reservations.
//! 3. Suspend for the durable ledger's conditional confirmation. The
//!    ledger is the sole authority against over-commitment; its
//!    conditional update can reject a reservation the in-memory model
//!    accepted.
//! 4. On rejection or ledger failure, unwind the in-memory mutation and
//!    report failure; on confirmation, keep it.
//!
//! The unwind is an [`Unwind`] drop guard registered before the
//! suspension point: the success path disarms it, every other exit path
//! (including an early `?`/panic inside the ledger call) runs it.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};

use depot_core::{Bin, CapacityUnit, ConveyorQueue, Parcel, Truck};
use depot_state::TruckRecord;

use crate::convert;
use crate::error::PlacementResult;
use crate::ledger::CargoLedger;

/// Read-only occupancy snapshot of a bin.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BinSummary {
    pub bin_id: u64,
    pub capacity: u64,
    pub used: u64,
    pub free_space: u64,
    pub location_code: String,
}

/// One manifest row in a truck snapshot.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ManifestEntry {
    pub tracking_id: String,
    pub size: u64,
}

/// Read-only occupancy snapshot of a truck, manifest bottom-first.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TruckSummary {
    pub truck_id: String,
    pub capacity: u64,
    pub used: u64,
    pub free_space: u64,
    pub manifest: Vec<ManifestEntry>,
}

/// In-memory capacity model. Only the authority mutates it.
struct Inner {
    /// Inventory index, sorted ascending by capacity.
    bins: Vec<Bin>,
    trucks: HashMap<String, Truck>,
    conveyor: ConveyorQueue<Parcel>,
}

/// The process-wide allocation authority. Construct one per process and
/// hand references to request handlers; all placement mutation flows
/// through it.
pub struct PlacementAuthority<L> {
    ledger: L,
    /// Guards only the synchronous in-memory segments — never held
    /// across an await, so reservations from interleaved requests land
    /// between each other's suspension points.
    inner: Mutex<Inner>,
}

impl<L: CargoLedger> PlacementAuthority<L> {
    pub fn new(ledger: L) -> Self {
        Self {
            ledger,
            inner: Mutex::new(Inner {
                bins: Vec::new(),
                trucks: HashMap::new(),
                conveyor: ConveyorQueue::new(),
            }),
        }
    }

    // ── Inventory ──────────────────────────────────────────────────

    /// Replace the inventory index with the given bins, sorted ascending
    /// by capacity.
    pub fn load_bin_inventory(&self, mut bins: Vec<Bin>) {
        bins.sort_by(Bin::cmp_by_capacity);
        let count = bins.len();
        self.inner.lock().bins = bins;
        debug!(count, "bin inventory replaced");
    }

    /// Startup reconciliation: rebuild bins and trucks from the durable
    /// ledger, replacing the in-memory model wholesale. Bins adopt the
    /// durable `used` counters through the initialization-only setter;
    /// truck manifests are reconstructed from their active load events.
    /// Idempotent for unchanged durable data.
    pub async fn reload_from_ledger(&self) -> PlacementResult<()> {
        let bin_records = self.ledger.load_bins().await?;
        let mut bins: Vec<Bin> = bin_records.iter().map(convert::bin_from_record).collect();
        bins.sort_by(Bin::cmp_by_capacity);

        let truck_records = self.ledger.load_trucks().await?;
        let mut trucks = HashMap::new();
        for record in &truck_records {
            let loads = self.ledger.active_loads(&record.truck_id).await?;
            trucks.insert(
                record.truck_id.clone(),
                convert::truck_from_parts(record, &loads),
            );
        }

        let mut inner = self.inner.lock();
        info!(
            bins = bins.len(),
            trucks = trucks.len(),
            "in-memory state reconciled from ledger"
        );
        inner.bins = bins;
        inner.trucks = trucks;
        Ok(())
    }

    /// Smallest-capacity bin whose *capacity* can hold `size`.
    ///
    /// Ranks by total capacity, not current free space: the returned bin
    /// may already be too full, and a failed reservation does not retry
    /// the next candidate. Preserved for compatibility with the existing
    /// allocation behavior.
    pub fn find_best_fit_bin(&self, size: u64) -> Option<BinSummary> {
        let inner = self.inner.lock();
        best_fit_index(&inner.bins, size).map(|idx| bin_summary(&inner.bins[idx]))
    }

    // ── Bin assignment ─────────────────────────────────────────────

    /// Assign a parcel to the best-fit bin via reserve-then-commit.
    /// False on: no candidate bin, candidate full in memory, durable
    /// rejection, or ledger failure — in-memory state is restored in
    /// every failure case.
    pub async fn assign_parcel_to_bin(&self, parcel: &Parcel) -> bool {
        let bin_id = {
            let mut inner = self.inner.lock();
            let Some(idx) = best_fit_index(&inner.bins, parcel.size) else {
                debug!(tracking_id = %parcel.tracking_id, size = parcel.size, "no bin large enough");
                return false;
            };
            let bin = &mut inner.bins[idx];
            let bin_id = bin.bin_id();
            if !bin.occupy(parcel.size) {
                debug!(
                    tracking_id = %parcel.tracking_id,
                    bin_id,
                    "candidate bin lacks free space"
                );
                return false;
            }
            bin_id
        };

        let amount = parcel.size;
        let undo = Unwind::new(&self.inner, move |inner| {
            if let Some(bin) = inner.bins.iter_mut().find(|b| b.bin_id() == bin_id) {
                bin.release(amount);
            }
        });

        match self.ledger.confirm_bin_assignment(bin_id, parcel).await {
            Ok(true) => {
                undo.disarm();
                info!(tracking_id = %parcel.tracking_id, bin_id, "parcel assigned to bin");
                true
            }
            Ok(false) => {
                warn!(
                    tracking_id = %parcel.tracking_id,
                    bin_id,
                    "durable rejection, reservation unwound"
                );
                false
            }
            Err(e) => {
                warn!(
                    tracking_id = %parcel.tracking_id,
                    bin_id,
                    error = %e,
                    "ledger failure treated as rejection, reservation unwound"
                );
                false
            }
        }
    }

    // ── Trucks ─────────────────────────────────────────────────────

    /// Persist a truck row and add the truck to the registry. A ledger
    /// failure leaves the registry untouched.
    pub async fn register_truck(&self, truck: Truck) -> PlacementResult<()> {
        let record = TruckRecord {
            truck_id: truck.truck_id().to_string(),
            capacity: truck.capacity(),
            used: truck.used(),
        };
        self.ledger.register_truck(&record).await?;
        info!(truck_id = %record.truck_id, capacity = record.capacity, "truck registered");
        self.inner.lock().trucks.insert(record.truck_id, truck);
        Ok(())
    }

    /// Load a parcel onto a named truck via reserve-then-commit. False
    /// on: unknown truck, no free space in memory, durable rejection, or
    /// ledger failure — the manifest is restored in every failure case.
    pub async fn load_parcel_to_truck(&self, truck_id: &str, parcel: &Parcel) -> bool {
        {
            let mut inner = self.inner.lock();
            let Some(truck) = inner.trucks.get_mut(truck_id) else {
                debug!(truck_id, "unknown truck");
                return false;
            };
            if !truck.push(parcel.clone()) {
                debug!(
                    tracking_id = %parcel.tracking_id,
                    truck_id,
                    "truck lacks free space"
                );
                return false;
            }
        }

        let tracking_id = parcel.tracking_id.clone();
        let key = truck_id.to_string();
        let undo = Unwind::new(&self.inner, move |inner| {
            if let Some(truck) = inner.trucks.get_mut(&key) {
                truck.pop_until(&tracking_id);
            }
        });

        match self.ledger.confirm_truck_load(truck_id, parcel).await {
            Ok(true) => {
                undo.disarm();
                info!(tracking_id = %parcel.tracking_id, truck_id, "parcel loaded to truck");
                true
            }
            Ok(false) => {
                warn!(
                    tracking_id = %parcel.tracking_id,
                    truck_id,
                    "durable rejection, load unwound"
                );
                false
            }
            Err(e) => {
                warn!(
                    tracking_id = %parcel.tracking_id,
                    truck_id,
                    error = %e,
                    "ledger failure treated as rejection, load unwound"
                );
                false
            }
        }
    }

    /// Remove a previously loaded parcel from a truck, in memory and in
    /// the ledger. When the ledger has no matching `loaded` record (or
    /// fails), the popped parcel is pushed back best-effort and failure
    /// is reported; in-memory and durable state may briefly diverge in
    /// that case until the next full reconciliation.
    pub async fn rollback_truck_load(&self, truck_id: &str, tracking_id: &str) -> bool {
        let popped = {
            let mut inner = self.inner.lock();
            let Some(truck) = inner.trucks.get_mut(truck_id) else {
                debug!(truck_id, "unknown truck");
                return false;
            };
            match truck.pop_until(tracking_id) {
                Some(parcel) => parcel,
                None => {
                    debug!(tracking_id, truck_id, "parcel not on manifest");
                    return false;
                }
            }
        };

        match self.ledger.rollback_truck_load(truck_id, tracking_id).await {
            Ok(Some(size)) => {
                info!(tracking_id, truck_id, size, "truck load rolled back");
                true
            }
            Ok(None) => {
                warn!(
                    tracking_id,
                    truck_id, "no durable loaded record, restoring manifest"
                );
                self.restore_parcel(truck_id, popped);
                false
            }
            Err(e) => {
                warn!(
                    tracking_id,
                    truck_id,
                    error = %e,
                    "ledger failure during rollback, restoring manifest"
                );
                self.restore_parcel(truck_id, popped);
                false
            }
        }
    }

    /// Best-effort re-push after a failed durable rollback.
    fn restore_parcel(&self, truck_id: &str, parcel: Parcel) {
        let mut inner = self.inner.lock();
        if let Some(truck) = inner.trucks.get_mut(truck_id) {
            if !truck.push(parcel) {
                warn!(truck_id, "could not restore popped parcel, state diverged until reload");
            }
        }
    }

    // ── Conveyor ───────────────────────────────────────────────────

    pub fn enqueue_parcel(&self, parcel: Parcel) {
        self.inner.lock().conveyor.enqueue(parcel);
    }

    pub fn dequeue_parcel(&self) -> Option<Parcel> {
        self.inner.lock().conveyor.dequeue()
    }

    pub fn conveyor_len(&self) -> usize {
        self.inner.lock().conveyor.len()
    }

    // ── Summaries ──────────────────────────────────────────────────

    /// Occupancy snapshots of all bins, in inventory-index order.
    pub fn bin_summaries(&self) -> Vec<BinSummary> {
        self.inner.lock().bins.iter().map(bin_summary).collect()
    }

    /// Occupancy snapshot of one truck, manifest bottom-first.
    pub fn truck_summary(&self, truck_id: &str) -> Option<TruckSummary> {
        let inner = self.inner.lock();
        let truck = inner.trucks.get(truck_id)?;
        Some(TruckSummary {
            truck_id: truck.truck_id().to_string(),
            capacity: truck.capacity(),
            used: truck.used(),
            free_space: truck.free_space(),
            manifest: truck
                .manifest()
                .iter()
                .map(|p| ManifestEntry {
                    tracking_id: p.tracking_id.clone(),
                    size: p.size,
                })
                .collect(),
        })
    }
}

/// Binary search the capacity-sorted index for the smallest capacity
/// that can hold `size`. Free space is deliberately not consulted.
fn best_fit_index(bins: &[Bin], size: u64) -> Option<usize> {
    let idx = bins.partition_point(|b| b.capacity() < size);
    (idx < bins.len()).then_some(idx)
}

fn bin_summary(bin: &Bin) -> BinSummary {
    BinSummary {
        bin_id: bin.bin_id(),
        capacity: bin.capacity(),
        used: bin.used(),
        free_space: bin.free_space(),
        location_code: bin.location_code().to_string(),
    }
}

/// Compensating action armed before the protocol's suspension point.
/// Runs the undo against the in-memory model on drop unless disarmed by
/// the success path.
struct Unwind<'a, F: FnOnce(&mut Inner)> {
    inner: &'a Mutex<Inner>,
    undo: Option<F>,
}

impl<'a, F: FnOnce(&mut Inner)> Unwind<'a, F> {
    fn new(inner: &'a Mutex<Inner>, undo: F) -> Self {
        Self {
            inner,
            undo: Some(undo),
        }
    }

    fn disarm(mut self) {
        self.undo = None;
    }
}

impl<F: FnOnce(&mut Inner)> Drop for Unwind<'_, F> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            undo(&mut self.inner.lock());
        }
    }
}
