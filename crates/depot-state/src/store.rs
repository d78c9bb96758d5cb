//! DepotStore — redb-backed durable ledger for depot placement.
//!
//! Holds the authoritative bin/truck occupancy rows and the cargo event
//! log. The reserve-then-commit primitives (`commit_bin_assignment`,
//! `commit_truck_load`, `rollback_truck_load`) each run as one write
//! transaction: the occupancy test-and-increment and the audit append
//! commit together or not at all. The store supports both on-disk and
//! in-memory backends (the latter for testing).

use std::path::Path;
use std::sync::Arc;

use depot_core::Parcel;
use redb::{Database, ReadableDatabase, ReadableTable};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::report::{self, BucketUtilization, CapacityBucket, DestinationCount};
use crate::tables::*;
use crate::types::*;

/// Convert any `Display` error into a `StoreError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StoreError::$variant(e.to_string())
    };
}

/// Thread-safe durable ledger backed by redb.
#[derive(Clone)]
pub struct DepotStore {
    db: Arc<Database>,
}

impl DepotStore {
    /// Open (or create) a persistent ledger at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!(?path, "depot store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory ledger (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!("in-memory depot store opened");
        Ok(store)
    }

    /// Create all tables if they don't exist yet.
    fn ensure_tables(&self) -> StoreResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(BINS).map_err(map_err!(Table))?;
        txn.open_table(TRUCKS).map_err(map_err!(Table))?;
        txn.open_table(CARGO_EVENTS).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    // ── Bins ───────────────────────────────────────────────────────

    /// Insert or update a bin row.
    pub fn put_bin(&self, record: &BinRecord) -> StoreResult<()> {
        let value = serde_json::to_vec(record).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(BINS).map_err(map_err!(Table))?;
            table
                .insert(record.bin_id, value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(bin_id = record.bin_id, "bin stored");
        Ok(())
    }

    /// Get a bin row by id.
    pub fn get_bin(&self, bin_id: u64) -> StoreResult<Option<BinRecord>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(BINS).map_err(map_err!(Table))?;
        match table.get(bin_id).map_err(map_err!(Read))? {
            Some(guard) => {
                let record: BinRecord =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// List all bin rows, ascending by capacity (the inventory-index order).
    pub fn list_bins(&self) -> StoreResult<Vec<BinRecord>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(BINS).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (_, value) = entry.map_err(map_err!(Read))?;
            let record: BinRecord =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            results.push(record);
        }
        results.sort_by(|a, b| a.capacity.cmp(&b.capacity));
        Ok(results)
    }

    // ── Trucks ─────────────────────────────────────────────────────

    /// Insert or update a truck row.
    pub fn put_truck(&self, record: &TruckRecord) -> StoreResult<()> {
        let value = serde_json::to_vec(record).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(TRUCKS).map_err(map_err!(Table))?;
            table
                .insert(record.truck_id.as_str(), value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(truck_id = %record.truck_id, "truck stored");
        Ok(())
    }

    /// Get a truck row by id.
    pub fn get_truck(&self, truck_id: &str) -> StoreResult<Option<TruckRecord>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(TRUCKS).map_err(map_err!(Table))?;
        match table.get(truck_id).map_err(map_err!(Read))? {
            Some(guard) => {
                let record: TruckRecord =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// List all truck rows.
    pub fn list_trucks(&self) -> StoreResult<Vec<TruckRecord>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(TRUCKS).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (_, value) = entry.map_err(map_err!(Read))?;
            let record: TruckRecord =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            results.push(record);
        }
        Ok(results)
    }

    // ── Reserve-then-commit primitives ─────────────────────────────

    /// Conditionally record a parcel assignment against a bin.
    ///
    /// In one transaction: if the durable row still has free space for
    /// the parcel, increment `used` and append an `assigned` audit event,
    /// then commit and return `true`. Otherwise abort and return `false`
    /// — the durable rejection that forces the caller's in-memory undo.
    pub fn commit_bin_assignment(&self, bin_id: u64, parcel: &Parcel) -> StoreResult<bool> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let accepted = {
            let mut bins = txn.open_table(BINS).map_err(map_err!(Table))?;
            let record = match bins.get(bin_id).map_err(map_err!(Read))? {
                Some(guard) => Some(
                    serde_json::from_slice::<BinRecord>(guard.value())
                        .map_err(map_err!(Deserialize))?,
                ),
                None => None,
            };
            match record {
                Some(mut record) if record.capacity.saturating_sub(record.used) >= parcel.size => {
                    record.used += parcel.size;
                    let value = serde_json::to_vec(&record).map_err(map_err!(Serialize))?;
                    bins.insert(bin_id, value.as_slice()).map_err(map_err!(Write))?;

                    let mut events =
                        txn.open_table(CARGO_EVENTS).map_err(map_err!(Table))?;
                    let event = CargoEvent {
                        seq: next_seq(&events)?,
                        tracking_id: parcel.tracking_id.clone(),
                        container: ContainerRef::Bin { bin_id },
                        size: parcel.size,
                        destination: parcel.destination.clone(),
                        status: EventStatus::Assigned,
                    };
                    append_event(&mut events, &event)?;
                    true
                }
                _ => false,
            }
        };
        if accepted {
            txn.commit().map_err(map_err!(Transaction))?;
            debug!(bin_id, tracking_id = %parcel.tracking_id, "bin assignment committed");
        } else {
            txn.abort().map_err(map_err!(Transaction))?;
            debug!(bin_id, tracking_id = %parcel.tracking_id, "bin assignment rejected");
        }
        Ok(accepted)
    }

    /// Conditionally record a parcel load against a truck.
    ///
    /// Same shape as [`commit_bin_assignment`](DepotStore::commit_bin_assignment),
    /// appending a `loaded` audit event that also records the destination.
    pub fn commit_truck_load(&self, truck_id: &str, parcel: &Parcel) -> StoreResult<bool> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let accepted = {
            let mut trucks = txn.open_table(TRUCKS).map_err(map_err!(Table))?;
            let record = match trucks.get(truck_id).map_err(map_err!(Read))? {
                Some(guard) => Some(
                    serde_json::from_slice::<TruckRecord>(guard.value())
                        .map_err(map_err!(Deserialize))?,
                ),
                None => None,
            };
            match record {
                Some(mut record) if record.capacity.saturating_sub(record.used) >= parcel.size => {
                    record.used += parcel.size;
                    let value = serde_json::to_vec(&record).map_err(map_err!(Serialize))?;
                    trucks
                        .insert(truck_id, value.as_slice())
                        .map_err(map_err!(Write))?;

                    let mut events =
                        txn.open_table(CARGO_EVENTS).map_err(map_err!(Table))?;
                    let event = CargoEvent {
                        seq: next_seq(&events)?,
                        tracking_id: parcel.tracking_id.clone(),
                        container: ContainerRef::Truck {
                            truck_id: truck_id.to_string(),
                        },
                        size: parcel.size,
                        destination: parcel.destination.clone(),
                        status: EventStatus::Loaded,
                    };
                    append_event(&mut events, &event)?;
                    true
                }
                _ => false,
            }
        };
        if accepted {
            txn.commit().map_err(map_err!(Transaction))?;
            debug!(truck_id, tracking_id = %parcel.tracking_id, "truck load committed");
        } else {
            txn.abort().map_err(map_err!(Transaction))?;
            debug!(truck_id, tracking_id = %parcel.tracking_id, "truck load rejected");
        }
        Ok(accepted)
    }

    /// Durably roll back the most recent `loaded` event for a truck+parcel.
    ///
    /// Marks the event `rolled_back` and decrements the truck's durable
    /// `used` by the event's recorded size (floored at zero), in one
    /// transaction. Returns the recorded size, or `None` when no matching
    /// `loaded` event exists (no durable change in that case).
    pub fn rollback_truck_load(
        &self,
        truck_id: &str,
        tracking_id: &str,
    ) -> StoreResult<Option<u64>> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let rolled_back = {
            let mut events = txn.open_table(CARGO_EVENTS).map_err(map_err!(Table))?;
            let target = latest_loaded(&events, truck_id, tracking_id)?;
            match target {
                None => None,
                Some(mut event) => {
                    event.status = EventStatus::RolledBack;
                    let value = serde_json::to_vec(&event).map_err(map_err!(Serialize))?;
                    events
                        .insert(event.seq, value.as_slice())
                        .map_err(map_err!(Write))?;

                    let mut trucks = txn.open_table(TRUCKS).map_err(map_err!(Table))?;
                    let mut record = match trucks.get(truck_id).map_err(map_err!(Read))? {
                        Some(guard) => serde_json::from_slice::<TruckRecord>(guard.value())
                            .map_err(map_err!(Deserialize))?,
                        None => {
                            return Err(StoreError::NotFound(format!("truck {truck_id}")));
                        }
                    };
                    record.used = record.used.saturating_sub(event.size);
                    let value = serde_json::to_vec(&record).map_err(map_err!(Serialize))?;
                    trucks
                        .insert(truck_id, value.as_slice())
                        .map_err(map_err!(Write))?;
                    Some(event.size)
                }
            }
        };
        match rolled_back {
            Some(size) => {
                txn.commit().map_err(map_err!(Transaction))?;
                debug!(truck_id, tracking_id, size, "truck load rolled back");
            }
            None => {
                txn.abort().map_err(map_err!(Transaction))?;
                debug!(truck_id, tracking_id, "no loaded event to roll back");
            }
        }
        Ok(rolled_back)
    }

    // ── Event queries ──────────────────────────────────────────────

    /// Most recent `loaded` event for a truck+parcel, if any.
    pub fn last_loaded_event(
        &self,
        truck_id: &str,
        tracking_id: &str,
    ) -> StoreResult<Option<CargoEvent>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let events = txn.open_table(CARGO_EVENTS).map_err(map_err!(Table))?;
        latest_loaded(&events, truck_id, tracking_id)
    }

    /// All `loaded` events still active on a truck, in load order.
    /// Used to reconstruct the manifest at startup.
    pub fn active_loads(&self, truck_id: &str) -> StoreResult<Vec<CargoEvent>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(CARGO_EVENTS).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (_, value) = entry.map_err(map_err!(Read))?;
            let event: CargoEvent =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            if event.is_active_load_on(truck_id) {
                results.push(event);
            }
        }
        Ok(results)
    }

    /// The full audit log in sequence order.
    pub fn list_events(&self) -> StoreResult<Vec<CargoEvent>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(CARGO_EVENTS).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (_, value) = entry.map_err(map_err!(Read))?;
            let event: CargoEvent =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            results.push(event);
        }
        Ok(results)
    }

    // ── Reporting ──────────────────────────────────────────────────

    /// Group bins into capacity buckets for the occupancy report.
    pub fn utilization(&self, buckets: &[CapacityBucket]) -> StoreResult<Vec<BucketUtilization>> {
        let bins = self.list_bins()?;
        Ok(report::bucket_utilization(&bins, buckets))
    }

    /// Top destinations by truck-load count, at most `limit` rows.
    pub fn destination_counts(&self, limit: usize) -> StoreResult<Vec<DestinationCount>> {
        let events = self.list_events()?;
        Ok(report::destination_counts(&events, limit))
    }
}

/// Next sequence number for the event log (keys are monotonic).
fn next_seq(events: &impl ReadableTable<u64, &'static [u8]>) -> StoreResult<u64> {
    Ok(events
        .last()
        .map_err(map_err!(Read))?
        .map(|(key, _)| key.value() + 1)
        .unwrap_or(0))
}

fn append_event(
    events: &mut redb::Table<'_, u64, &'static [u8]>,
    event: &CargoEvent,
) -> StoreResult<()> {
    let value = serde_json::to_vec(event).map_err(map_err!(Serialize))?;
    events
        .insert(event.seq, value.as_slice())
        .map_err(map_err!(Write))?;
    Ok(())
}

/// Scan for the most recent `loaded` event matching truck+parcel.
fn latest_loaded(
    events: &impl ReadableTable<u64, &'static [u8]>,
    truck_id: &str,
    tracking_id: &str,
) -> StoreResult<Option<CargoEvent>> {
    let mut target = None;
    for entry in events.iter().map_err(map_err!(Read))? {
        let (_, value) = entry.map_err(map_err!(Read))?;
        let event: CargoEvent =
            serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
        if event.is_active_load_on(truck_id) && event.tracking_id == tracking_id {
            target = Some(event);
        }
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_bin(bin_id: u64, capacity: u64, used: u64) -> BinRecord {
        BinRecord {
            bin_id,
            capacity,
            used,
            location_code: format!("R{bin_id}-C1"),
        }
    }

    fn test_truck(truck_id: &str, capacity: u64) -> TruckRecord {
        TruckRecord {
            truck_id: truck_id.to_string(),
            capacity,
            used: 0,
        }
    }

    fn parcel(id: &str, size: u64) -> Parcel {
        Parcel::new(id, size, Some("HUB".to_string()))
    }

    // ── Bin CRUD ───────────────────────────────────────────────────

    #[test]
    fn bin_put_and_get() {
        let store = DepotStore::open_in_memory().unwrap();
        let record = test_bin(1, 100, 0);

        store.put_bin(&record).unwrap();
        let retrieved = store.get_bin(1).unwrap();

        assert_eq!(retrieved, Some(record));
    }

    #[test]
    fn bin_get_nonexistent_returns_none() {
        let store = DepotStore::open_in_memory().unwrap();
        assert!(store.get_bin(42).unwrap().is_none());
    }

    #[test]
    fn bin_list_sorted_by_capacity() {
        let store = DepotStore::open_in_memory().unwrap();
        store.put_bin(&test_bin(1, 50, 0)).unwrap();
        store.put_bin(&test_bin(2, 5, 0)).unwrap();
        store.put_bin(&test_bin(3, 15, 0)).unwrap();

        let bins = store.list_bins().unwrap();
        let caps: Vec<u64> = bins.iter().map(|b| b.capacity).collect();
        assert_eq!(caps, vec![5, 15, 50]);
    }

    // ── Truck CRUD ─────────────────────────────────────────────────

    #[test]
    fn truck_put_and_get() {
        let store = DepotStore::open_in_memory().unwrap();
        let record = test_truck("TR-1", 500);

        store.put_truck(&record).unwrap();
        let retrieved = store.get_truck("TR-1").unwrap();

        assert_eq!(retrieved, Some(record));
    }

    #[test]
    fn truck_list_all() {
        let store = DepotStore::open_in_memory().unwrap();
        store.put_truck(&test_truck("TR-1", 500)).unwrap();
        store.put_truck(&test_truck("TR-2", 300)).unwrap();

        assert_eq!(store.list_trucks().unwrap().len(), 2);
    }

    // ── Bin assignment ─────────────────────────────────────────────

    #[test]
    fn bin_assignment_commits_and_appends_event() {
        let store = DepotStore::open_in_memory().unwrap();
        store.put_bin(&test_bin(1, 100, 0)).unwrap();

        let accepted = store.commit_bin_assignment(1, &parcel("P1", 20)).unwrap();
        assert!(accepted);

        let record = store.get_bin(1).unwrap().unwrap();
        assert_eq!(record.used, 20);

        let events = store.list_events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].status, EventStatus::Assigned);
        assert_eq!(events[0].tracking_id, "P1");
        assert_eq!(events[0].container, ContainerRef::Bin { bin_id: 1 });
    }

    #[test]
    fn bin_assignment_rejected_when_durable_row_is_full() {
        let store = DepotStore::open_in_memory().unwrap();
        // Durable row already 90/100 used, e.g. by a concurrent writer.
        store.put_bin(&test_bin(1, 100, 90)).unwrap();

        let accepted = store.commit_bin_assignment(1, &parcel("P1", 20)).unwrap();
        assert!(!accepted);

        // Rejection leaves no trace: row untouched, no audit event.
        assert_eq!(store.get_bin(1).unwrap().unwrap().used, 90);
        assert!(store.list_events().unwrap().is_empty());
    }

    #[test]
    fn bin_assignment_rejected_for_unknown_bin() {
        let store = DepotStore::open_in_memory().unwrap();
        let accepted = store.commit_bin_assignment(9, &parcel("P1", 1)).unwrap();
        assert!(!accepted);
    }

    #[test]
    fn bin_assignment_exact_fit_accepted() {
        let store = DepotStore::open_in_memory().unwrap();
        store.put_bin(&test_bin(1, 50, 20)).unwrap();

        assert!(store.commit_bin_assignment(1, &parcel("P1", 30)).unwrap());
        assert_eq!(store.get_bin(1).unwrap().unwrap().used, 50);
    }

    // ── Truck load + rollback ──────────────────────────────────────

    #[test]
    fn truck_load_commits_with_destination() {
        let store = DepotStore::open_in_memory().unwrap();
        store.put_truck(&test_truck("TR-1", 100)).unwrap();

        assert!(store.commit_truck_load("TR-1", &parcel("P1", 40)).unwrap());
        assert_eq!(store.get_truck("TR-1").unwrap().unwrap().used, 40);

        let events = store.list_events().unwrap();
        assert_eq!(events[0].status, EventStatus::Loaded);
        assert_eq!(events[0].destination.as_deref(), Some("HUB"));
    }

    #[test]
    fn truck_load_rejected_when_full() {
        let store = DepotStore::open_in_memory().unwrap();
        store.put_truck(&test_truck("TR-1", 50)).unwrap();

        assert!(store.commit_truck_load("TR-1", &parcel("P1", 40)).unwrap());
        assert!(!store.commit_truck_load("TR-1", &parcel("P2", 20)).unwrap());
        assert_eq!(store.get_truck("TR-1").unwrap().unwrap().used, 40);
    }

    #[test]
    fn rollback_marks_event_and_decrements_used() {
        let store = DepotStore::open_in_memory().unwrap();
        store.put_truck(&test_truck("TR-1", 100)).unwrap();
        store.commit_truck_load("TR-1", &parcel("P1", 40)).unwrap();

        let size = store.rollback_truck_load("TR-1", "P1").unwrap();
        assert_eq!(size, Some(40));
        assert_eq!(store.get_truck("TR-1").unwrap().unwrap().used, 0);

        let events = store.list_events().unwrap();
        assert_eq!(events[0].status, EventStatus::RolledBack);
    }

    #[test]
    fn rollback_without_loaded_event_is_none() {
        let store = DepotStore::open_in_memory().unwrap();
        store.put_truck(&test_truck("TR-1", 100)).unwrap();

        assert_eq!(store.rollback_truck_load("TR-1", "GHOST").unwrap(), None);
        assert_eq!(store.get_truck("TR-1").unwrap().unwrap().used, 0);
    }

    #[test]
    fn rollback_twice_only_applies_once() {
        let store = DepotStore::open_in_memory().unwrap();
        store.put_truck(&test_truck("TR-1", 100)).unwrap();
        store.commit_truck_load("TR-1", &parcel("P1", 30)).unwrap();

        assert_eq!(store.rollback_truck_load("TR-1", "P1").unwrap(), Some(30));
        // The event is already rolled_back; a second rollback finds nothing.
        assert_eq!(store.rollback_truck_load("TR-1", "P1").unwrap(), None);
        assert_eq!(store.get_truck("TR-1").unwrap().unwrap().used, 0);
    }

    #[test]
    fn rollback_targets_most_recent_loaded_event() {
        let store = DepotStore::open_in_memory().unwrap();
        store.put_truck(&test_truck("TR-1", 100)).unwrap();
        store.commit_truck_load("TR-1", &parcel("P1", 10)).unwrap();
        store.rollback_truck_load("TR-1", "P1").unwrap();
        store.commit_truck_load("TR-1", &parcel("P1", 25)).unwrap();

        // Second load of the same tracking id; rollback uses its size.
        assert_eq!(store.rollback_truck_load("TR-1", "P1").unwrap(), Some(25));
        assert_eq!(store.get_truck("TR-1").unwrap().unwrap().used, 0);
    }

    #[test]
    fn active_loads_in_load_order() {
        let store = DepotStore::open_in_memory().unwrap();
        store.put_truck(&test_truck("TR-1", 100)).unwrap();
        store.put_truck(&test_truck("TR-2", 100)).unwrap();
        store.commit_truck_load("TR-1", &parcel("a", 10)).unwrap();
        store.commit_truck_load("TR-2", &parcel("x", 5)).unwrap();
        store.commit_truck_load("TR-1", &parcel("b", 20)).unwrap();
        store.rollback_truck_load("TR-1", "a").unwrap();

        let loads = store.active_loads("TR-1").unwrap();
        let ids: Vec<&str> = loads.iter().map(|e| e.tracking_id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn last_loaded_event_ignores_rolled_back() {
        let store = DepotStore::open_in_memory().unwrap();
        store.put_truck(&test_truck("TR-1", 100)).unwrap();
        store.commit_truck_load("TR-1", &parcel("P1", 10)).unwrap();

        assert!(store.last_loaded_event("TR-1", "P1").unwrap().is_some());
        store.rollback_truck_load("TR-1", "P1").unwrap();
        assert!(store.last_loaded_event("TR-1", "P1").unwrap().is_none());
    }

    // ── Reporting ──────────────────────────────────────────────────

    #[test]
    fn destination_counts_from_committed_loads() {
        let store = DepotStore::open_in_memory().unwrap();
        store.put_truck(&test_truck("TR-1", 100)).unwrap();
        store.put_bin(&test_bin(1, 100, 0)).unwrap();

        let ber = |id: &str| Parcel::new(id, 10, Some("BER".to_string()));
        store.commit_truck_load("TR-1", &ber("P1")).unwrap();
        store.commit_truck_load("TR-1", &ber("P2")).unwrap();
        store
            .commit_truck_load("TR-1", &Parcel::new("P3", 10, Some("HAM".to_string())))
            .unwrap();
        store.rollback_truck_load("TR-1", "P2").unwrap();
        // Bin assignments carry a destination but are not truck loads.
        store.commit_bin_assignment(1, &ber("P4")).unwrap();

        let rows = store.destination_counts(10).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], DestinationCount { destination: "BER".to_string(), count: 2 });
        assert_eq!(rows[1], DestinationCount { destination: "HAM".to_string(), count: 1 });
    }

    // ── Persistence (on-disk) ──────────────────────────────────────

    #[test]
    fn persistence_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.redb");

        {
            let store = DepotStore::open(&db_path).unwrap();
            store.put_bin(&test_bin(7, 200, 0)).unwrap();
            store.commit_bin_assignment(7, &parcel("P1", 60)).unwrap();
        }

        // Reopen the same database file.
        let store = DepotStore::open(&db_path).unwrap();
        let record = store.get_bin(7).unwrap().unwrap();
        assert_eq!(record.used, 60);
        assert_eq!(store.list_events().unwrap().len(), 1);
    }

    // ── Edge cases ─────────────────────────────────────────────────

    #[test]
    fn empty_store_operations() {
        let store = DepotStore::open_in_memory().unwrap();

        assert!(store.list_bins().unwrap().is_empty());
        assert!(store.list_trucks().unwrap().is_empty());
        assert!(store.list_events().unwrap().is_empty());
        assert!(store.active_loads("any").unwrap().is_empty());
        assert!(store.last_loaded_event("any", "any").unwrap().is_none());
        assert_eq!(store.rollback_truck_load("any", "any").unwrap(), None);
    }
}
