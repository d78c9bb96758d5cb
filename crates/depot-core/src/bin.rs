//! Storage bin — fixed-capacity container addressed by numeric id.

use std::cmp::Ordering;

use crate::unit::{Capacity, CapacityUnit};

/// A fixed-capacity storage bin with a stable numeric identity (assigned
/// by the durable store) and a free-text location tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bin {
    bin_id: u64,
    location_code: String,
    space: Capacity,
}

impl Bin {
    pub fn new(bin_id: u64, capacity: u64, location_code: impl Into<String>) -> Self {
        Self {
            bin_id,
            location_code: location_code.into(),
            space: Capacity::new(capacity),
        }
    }

    pub fn bin_id(&self) -> u64 {
        self.bin_id
    }

    pub fn location_code(&self) -> &str {
        &self.location_code
    }

    /// Claim `amount` units of this bin. See [`Capacity::occupy`].
    pub fn occupy(&mut self, amount: u64) -> bool {
        self.space.occupy(amount)
    }

    /// Return `amount` units, flooring `used` at zero.
    pub fn release(&mut self, amount: u64) {
        self.space.release(amount)
    }

    /// Adopt the durable `used` counter. Startup reconciliation only.
    pub fn set_used(&mut self, value: u64) {
        self.space.set_used(value)
    }

    /// Ascending-by-capacity ordering used to keep the inventory index
    /// sorted for the best-fit binary search.
    pub fn cmp_by_capacity(a: &Bin, b: &Bin) -> Ordering {
        a.capacity().cmp(&b.capacity())
    }
}

impl CapacityUnit for Bin {
    fn capacity(&self) -> u64 {
        self.space.capacity()
    }

    fn used(&self) -> u64 {
        self.space.used()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupy_and_release_track_free_space() {
        let mut bin = Bin::new(1, 100, "R1-C4");
        assert!(bin.occupy(20));
        assert_eq!(bin.free_space(), 80);
        bin.release(20);
        assert_eq!(bin.free_space(), 100);
    }

    #[test]
    fn capacity_comparator_sorts_ascending() {
        let mut bins = vec![
            Bin::new(3, 50, ""),
            Bin::new(1, 5, ""),
            Bin::new(2, 15, ""),
        ];
        bins.sort_by(Bin::cmp_by_capacity);
        let caps: Vec<u64> = bins.iter().map(|b| b.capacity()).collect();
        assert_eq!(caps, vec![5, 15, 50]);
    }
}
