//! depot-packing — subset-packing algorithms over parcel sets.
//!
//! Both entry points are pure functions over a slice of parcels and a
//! target capacity. Worst case is exponential (subset sum), bounded in
//! practice by descending-size ordering, optimistic pruning, and
//! memoization of visited search states.
//!
//! - **`exact`** — can some subset fill the capacity exactly?
//!   (fragile bundles that ship together or not at all)
//! - **`subset`** — the largest-total subset that still fits

pub mod exact;
pub mod subset;

pub use exact::can_pack_exact;
pub use subset::best_fit_subset;
