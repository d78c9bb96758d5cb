//! Parcel — a sized, identified unit of cargo.

use serde::{Deserialize, Serialize};

/// An immutable unit of cargo to be placed into a bin or truck.
///
/// Identity is the `tracking_id`; `size` is in abstract capacity units
/// and must be positive for any placement to succeed (a zero-size parcel
/// is rejected by every occupy path).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Parcel {
    pub tracking_id: String,
    pub size: u64,
    /// Optional destination label, recorded on truck-load audit events.
    pub destination: Option<String>,
}

impl Parcel {
    pub fn new(tracking_id: impl Into<String>, size: u64, destination: Option<String>) -> Self {
        Self {
            tracking_id: tracking_id.into(),
            size,
            destination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parcel_carries_identity_and_size() {
        let p = Parcel::new("PKG-001", 25, Some("BER".to_string()));
        assert_eq!(p.tracking_id, "PKG-001");
        assert_eq!(p.size, 25);
        assert_eq!(p.destination.as_deref(), Some("BER"));
    }

    #[test]
    fn destination_is_optional() {
        let p = Parcel::new("PKG-002", 5, None);
        assert!(p.destination.is_none());
    }
}
