//! Placement error types.
//!
//! Placement outcomes (capacity exhaustion, unknown containers, durable
//! rejection) are booleans, not errors — they are expected results of
//! normal operation. These errors cover the non-placement surfaces:
//! registration and startup reconciliation.

use thiserror::Error;

/// Errors that can occur outside the boolean placement paths.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("ledger error: {0}")]
    Ledger(#[from] depot_state::StoreError),
}

pub type PlacementResult<T> = Result<T, PlacementError>;
