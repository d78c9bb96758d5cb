//! Exact subset-sum feasibility.

use std::collections::HashMap;

use depot_core::Parcel;

/// True iff some subset of the parcel sizes sums exactly to `capacity`.
///
/// Fast paths: total equal to capacity ⇒ true, total below capacity ⇒
/// false. Otherwise an include/exclude search over sizes sorted
/// descending, memoized on `(index, remaining)` so each distinct
/// remaining-capacity value is explored once per position.
pub fn can_pack_exact(parcels: &[Parcel], capacity: u64) -> bool {
    let total: u64 = parcels.iter().map(|p| p.size).sum();
    if total == capacity {
        return true;
    }
    if total < capacity {
        return false;
    }

    let mut sizes: Vec<u64> = parcels.iter().map(|p| p.size).collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));

    let mut memo = HashMap::new();
    dfs(&sizes, 0, capacity, &mut memo)
}

fn dfs(sizes: &[u64], i: usize, remaining: u64, memo: &mut HashMap<(usize, u64), bool>) -> bool {
    if remaining == 0 {
        return true;
    }
    if i >= sizes.len() {
        return false;
    }
    if let Some(&hit) = memo.get(&(i, remaining)) {
        return hit;
    }

    let take = sizes[i] <= remaining && dfs(sizes, i + 1, remaining - sizes[i], memo);
    let found = take || dfs(sizes, i + 1, remaining, memo);
    memo.insert((i, remaining), found);
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parcels(sizes: &[u64]) -> Vec<Parcel> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &s)| Parcel::new(format!("p{i}"), s, None))
            .collect()
    }

    #[test]
    fn exact_match_across_subsets() {
        let pkgs = parcels(&[3, 4, 5, 7]);
        assert!(can_pack_exact(&pkgs, 14)); // 3+4+7
        assert!(can_pack_exact(&pkgs, 19)); // everything
        assert!(!can_pack_exact(&pkgs, 1));
        assert!(!can_pack_exact(&pkgs, 13));
    }

    #[test]
    fn total_below_capacity_is_infeasible() {
        let pkgs = parcels(&[2, 3]);
        assert!(!can_pack_exact(&pkgs, 10));
    }

    #[test]
    fn total_equal_to_capacity_fast_path() {
        let pkgs = parcels(&[6, 4]);
        assert!(can_pack_exact(&pkgs, 10));
    }

    #[test]
    fn zero_capacity_uses_empty_subset() {
        let pkgs = parcels(&[1, 2]);
        assert!(can_pack_exact(&pkgs, 0));
    }

    #[test]
    fn empty_input_only_packs_zero() {
        assert!(can_pack_exact(&[], 0));
        assert!(!can_pack_exact(&[], 5));
    }

    #[test]
    fn duplicate_sizes_are_distinct_parcels() {
        let pkgs = parcels(&[5, 5, 5]);
        assert!(can_pack_exact(&pkgs, 10));
        assert!(!can_pack_exact(&pkgs, 12));
    }
}
