//! Truck — fixed-capacity mobile container with a LIFO manifest.

use crate::parcel::Parcel;
use crate::unit::{Capacity, CapacityUnit};

/// A truck stacks parcels physically: the last parcel loaded is the first
/// one out during normal unloading. The manifest mirrors that stack, so
/// removing a parcel from the middle means unstacking everything above it
/// and restacking in the same relative order ([`Truck::pop_until`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truck {
    truck_id: String,
    space: Capacity,
    manifest: Vec<Parcel>,
}

impl Truck {
    pub fn new(truck_id: impl Into<String>, capacity: u64) -> Self {
        Self {
            truck_id: truck_id.into(),
            space: Capacity::new(capacity),
            manifest: Vec::new(),
        }
    }

    pub fn truck_id(&self) -> &str {
        &self.truck_id
    }

    /// Parcels currently on board, bottom of the stack first.
    pub fn manifest(&self) -> &[Parcel] {
        &self.manifest
    }

    /// Load a parcel on top of the stack. Fails (no state change) when
    /// the parcel's size is zero or exceeds the free space.
    pub fn push(&mut self, parcel: Parcel) -> bool {
        if !self.space.occupy(parcel.size) {
            return false;
        }
        self.manifest.push(parcel);
        true
    }

    /// Unload the top parcel, releasing its size.
    pub fn pop(&mut self) -> Option<Parcel> {
        let parcel = self.manifest.pop()?;
        self.space.release(parcel.size);
        Some(parcel)
    }

    /// Remove the parcel with `tracking_id` from anywhere in the stack.
    ///
    /// Pops from the top into a holding buffer until the target surfaces,
    /// then restacks the buffer in its original relative order. When the
    /// target is not on board, the buffer is restored and `None` is
    /// returned — the manifest is unchanged in that case.
    pub fn pop_until(&mut self, tracking_id: &str) -> Option<Parcel> {
        let mut held = Vec::new();
        while let Some(parcel) = self.pop() {
            if parcel.tracking_id == tracking_id {
                while let Some(p) = held.pop() {
                    // Restacking what we just unstacked cannot overflow.
                    let _ = self.push(p);
                }
                return Some(parcel);
            }
            held.push(parcel);
        }
        while let Some(p) = held.pop() {
            let _ = self.push(p);
        }
        None
    }

    /// [`pop_until`](Truck::pop_until) reported as a plain confirmation.
    pub fn rollback_load(&mut self, tracking_id: &str) -> bool {
        self.pop_until(tracking_id).is_some()
    }

    /// Append a parcel without the occupy path. Startup reconciliation
    /// only — callers adopt the durable `used` counter via
    /// [`set_used`](Truck::set_used) afterwards.
    pub fn restore(&mut self, parcel: Parcel) {
        self.manifest.push(parcel);
    }

    /// Adopt the durable `used` counter. Startup reconciliation only.
    pub fn set_used(&mut self, value: u64) {
        self.space.set_used(value)
    }
}

impl CapacityUnit for Truck {
    fn capacity(&self) -> u64 {
        self.space.capacity()
    }

    fn used(&self) -> u64 {
        self.space.used()
    }
}
