//! Reporting — bins grouped into capacity buckets, top destinations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{BinRecord, CargoEvent, ContainerRef};

/// A capacity range for grouping bins. `hi == None` means open-ended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapacityBucket {
    pub lo: u64,
    pub hi: Option<u64>,
    pub label: String,
}

impl CapacityBucket {
    fn contains(&self, capacity: u64) -> bool {
        match self.hi {
            Some(hi) => (self.lo..=hi).contains(&capacity),
            None => capacity >= self.lo,
        }
    }
}

/// One row of the utilization report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BucketUtilization {
    pub bucket: String,
    pub bins: u64,
    pub free_space: u64,
    /// Mean of per-bin `used / capacity`, as a percentage.
    pub avg_utilization: f64,
}

/// The bucket layout used when no spec is given (or it fails to parse).
pub fn default_buckets() -> Vec<CapacityBucket> {
    vec![
        CapacityBucket {
            lo: 0,
            hi: Some(50),
            label: "0-50".to_string(),
        },
        CapacityBucket {
            lo: 51,
            hi: Some(150),
            label: "51-150".to_string(),
        },
        CapacityBucket {
            lo: 151,
            hi: None,
            label: "151+".to_string(),
        },
    ]
}

/// Parse a bucket spec like `"0-50,51-150,151-"`.
///
/// Each comma-separated part is `lo-hi` or `lo-` (open-ended). Parts that
/// fail to parse are skipped; an empty or fully invalid spec falls back to
/// [`default_buckets`].
pub fn parse_buckets(spec: &str) -> Vec<CapacityBucket> {
    let mut buckets = Vec::new();
    for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((lo, hi)) = part.split_once('-') else {
            continue;
        };
        let Ok(lo) = lo.parse::<u64>() else {
            continue;
        };
        let hi = if hi.is_empty() {
            None
        } else {
            match hi.parse::<u64>() {
                Ok(hi) => Some(hi),
                Err(_) => continue,
            }
        };
        let label = match hi {
            Some(hi) => format!("{lo}-{hi}"),
            None => format!("{lo}+"),
        };
        buckets.push(CapacityBucket { lo, hi, label });
    }

    if buckets.is_empty() {
        return default_buckets();
    }
    buckets
}

/// Group bins into buckets (first matching bucket wins), reporting bin
/// count, total free space, and mean utilization per bucket. Buckets keep
/// their requested order; bins matching no bucket land in a trailing
/// `other` row (emitted only when non-empty).
pub fn bucket_utilization(
    bins: &[BinRecord],
    buckets: &[CapacityBucket],
) -> Vec<BucketUtilization> {
    struct Acc {
        bins: u64,
        free_space: u64,
        util_sum: f64,
    }

    let mut accs: Vec<Acc> = (0..=buckets.len())
        .map(|_| Acc {
            bins: 0,
            free_space: 0,
            util_sum: 0.0,
        })
        .collect();

    for bin in bins {
        // The slot past the end is the `other` catch-all.
        let slot = buckets
            .iter()
            .position(|b| b.contains(bin.capacity))
            .unwrap_or(buckets.len());
        let acc = &mut accs[slot];
        acc.bins += 1;
        acc.free_space += bin.capacity.saturating_sub(bin.used);
        if bin.capacity > 0 {
            acc.util_sum += bin.used as f64 / bin.capacity as f64;
        }
    }

    let row = |label: &str, acc: &Acc| BucketUtilization {
        bucket: label.to_string(),
        bins: acc.bins,
        free_space: acc.free_space,
        avg_utilization: if acc.bins > 0 {
            acc.util_sum / acc.bins as f64 * 100.0
        } else {
            0.0
        },
    };

    let mut out: Vec<BucketUtilization> = buckets
        .iter()
        .zip(&accs)
        .map(|(bucket, acc)| row(&bucket.label, acc))
        .collect();
    let other = &accs[buckets.len()];
    if other.bins > 0 {
        out.push(row("other", other));
    }
    out
}

/// One row of the top-destinations report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DestinationCount {
    pub destination: String,
    pub count: u64,
}

/// Count truck-load events per destination, descending by count (ties
/// broken alphabetically), truncated to `limit` rows.
///
/// Every truck-load event with a destination counts, rolled-back ones
/// included — the load happened and shipped toward that destination
/// before it was undone. Bin assignments and events without a
/// destination are skipped.
pub fn destination_counts(events: &[CargoEvent], limit: usize) -> Vec<DestinationCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for event in events {
        if !matches!(event.container, ContainerRef::Truck { .. }) {
            continue;
        }
        if let Some(destination) = event.destination.as_deref() {
            *counts.entry(destination).or_insert(0) += 1;
        }
    }

    let mut rows: Vec<DestinationCount> = counts
        .into_iter()
        .map(|(destination, count)| DestinationCount {
            destination: destination.to_string(),
            count,
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then(a.destination.cmp(&b.destination)));
    rows.truncate(limit);
    rows
}
