//! Type conversions from durable ledger rows to domain types.
//!
//! Both conversions go through the initialization-only `set_used` path:
//! reconciliation adopts the durable counters verbatim (clamped to
//! capacity) instead of replaying occupy/release.

use depot_core::{Bin, Parcel, Truck};
use depot_state::{BinRecord, CargoEvent, TruckRecord};

/// Build an in-memory [`Bin`] from its durable row.
pub fn bin_from_record(record: &BinRecord) -> Bin {
    let mut bin = Bin::new(record.bin_id, record.capacity, record.location_code.clone());
    bin.set_used(record.used);
    bin
}

/// Build an in-memory [`Truck`] from its durable row plus its active
/// `loaded` events (in load order, so the manifest stacks the way the
/// parcels were loaded).
pub fn truck_from_parts(record: &TruckRecord, active_loads: &[CargoEvent]) -> Truck {
    let mut truck = Truck::new(record.truck_id.clone(), record.capacity);
    for event in active_loads {
        truck.restore(Parcel::new(
            event.tracking_id.clone(),
            event.size,
            event.destination.clone(),
        ));
    }
    truck.set_used(record.used);
    truck
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::CapacityUnit;
    use depot_state::{ContainerRef, EventStatus};

    fn load_event(seq: u64, truck_id: &str, tracking_id: &str, size: u64) -> CargoEvent {
        CargoEvent {
            seq,
            tracking_id: tracking_id.to_string(),
            container: ContainerRef::Truck {
                truck_id: truck_id.to_string(),
            },
            size,
            destination: None,
            status: EventStatus::Loaded,
        }
    }

    #[test]
    fn bin_adopts_durable_used() {
        let record = BinRecord {
            bin_id: 3,
            capacity: 100,
            used: 40,
            location_code: "R3-C9".to_string(),
        };
        let bin = bin_from_record(&record);

        assert_eq!(bin.bin_id(), 3);
        assert_eq!(bin.capacity(), 100);
        assert_eq!(bin.used(), 40);
        assert_eq!(bin.location_code(), "R3-C9");
    }

    #[test]
    fn bin_used_is_clamped_to_capacity() {
        let record = BinRecord {
            bin_id: 1,
            capacity: 10,
            used: 25,
            location_code: String::new(),
        };
        assert_eq!(bin_from_record(&record).used(), 10);
    }

    #[test]
    fn truck_rebuilds_manifest_in_load_order() {
        let record = TruckRecord {
            truck_id: "TR-1".to_string(),
            capacity: 100,
            used: 30,
        };
        let loads = vec![
            load_event(0, "TR-1", "a", 10),
            load_event(2, "TR-1", "b", 20),
        ];
        let truck = truck_from_parts(&record, &loads);

        assert_eq!(truck.used(), 30);
        let ids: Vec<&str> = truck.manifest().iter().map(|p| p.tracking_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn empty_manifest_for_truck_without_loads() {
        let record = TruckRecord {
            truck_id: "TR-2".to_string(),
            capacity: 50,
            used: 0,
        };
        let truck = truck_from_parts(&record, &[]);
        assert!(truck.manifest().is_empty());
        assert_eq!(truck.free_space(), 50);
    }
}
