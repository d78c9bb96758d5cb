//! Capacity tracking shared by bins and trucks.

/// Fixed-capacity space tracker. Invariant: `used <= capacity`.
///
/// `capacity` is set at construction and never changes. `used` moves only
/// through [`occupy`](Capacity::occupy) and [`release`](Capacity::release),
/// except for [`set_used`](Capacity::set_used) which exists solely so
/// startup reconciliation can adopt the durable counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capacity {
    capacity: u64,
    used: u64,
}

impl Capacity {
    pub fn new(capacity: u64) -> Self {
        Self { capacity, used: 0 }
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn used(&self) -> u64 {
        self.used
    }

    pub fn free_space(&self) -> u64 {
        self.capacity - self.used
    }

    /// Claim `amount` units. Fails (with no state change) when `amount`
    /// is zero or exceeds the free space.
    pub fn occupy(&mut self, amount: u64) -> bool {
        if amount == 0 || amount > self.free_space() {
            return false;
        }
        self.used += amount;
        true
    }

    /// Return `amount` units, flooring `used` at zero.
    pub fn release(&mut self, amount: u64) {
        self.used = self.used.saturating_sub(amount);
    }

    /// Force `used` to an externally supplied value, clamped to
    /// `[0, capacity]`. Startup reconciliation only — never call this
    /// after the in-memory model is live.
    pub fn set_used(&mut self, value: u64) {
        self.used = value.min(self.capacity);
    }
}

/// Read-only occupancy view shared by every container type.
pub trait CapacityUnit {
    fn capacity(&self) -> u64;
    fn used(&self) -> u64;

    fn free_space(&self) -> u64 {
        self.capacity() - self.used()
    }
}
