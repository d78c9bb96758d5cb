//! Best-effort maximal subset under capacity.

use std::collections::HashSet;

use depot_core::Parcel;

/// Find a subset of `parcels` whose total size is maximal without
/// exceeding `capacity`. Ties go to whichever subset the search reaches
/// first. Returns references into the input slice; an empty input or
/// zero capacity yields an empty result.
///
/// Depth-first include/exclude over sizes sorted descending, with three
/// cuts: an immediate return once a subset hits the capacity exactly
/// (cannot be improved), an optimistic bound from suffix sums (current
/// sum plus everything remaining must beat the incumbent), and a visited
/// set on `(index, current_sum)` states.
pub fn best_fit_subset<'a>(parcels: &'a [Parcel], capacity: u64) -> Vec<&'a Parcel> {
    if capacity == 0 || parcels.is_empty() {
        return Vec::new();
    }

    // Sort indices descending by size so large parcels are tried first.
    let mut order: Vec<usize> = (0..parcels.len()).collect();
    order.sort_by(|&a, &b| parcels[b].size.cmp(&parcels[a].size));
    let sizes: Vec<u64> = order.iter().map(|&i| parcels[i].size).collect();

    // suffix[i] = best possible additional sum from position i onward.
    let mut suffix = vec![0u64; sizes.len() + 1];
    for i in (0..sizes.len()).rev() {
        suffix[i] = suffix[i + 1] + sizes[i];
    }

    let mut search = Search {
        sizes: &sizes,
        suffix: &suffix,
        capacity,
        best_sum: 0,
        best: Vec::new(),
        seen: HashSet::new(),
    };
    let mut picked = Vec::new();
    search.dfs(0, 0, &mut picked);

    search.best.iter().map(|&slot| &parcels[order[slot]]).collect()
}

struct Search<'s> {
    /// Parcel sizes in descending order.
    sizes: &'s [u64],
    suffix: &'s [u64],
    capacity: u64,
    best_sum: u64,
    /// Positions (into `sizes`) of the best subset found so far.
    best: Vec<usize>,
    seen: HashSet<(usize, u64)>,
}

impl Search<'_> {
    fn dfs(&mut self, i: usize, current_sum: u64, picked: &mut Vec<usize>) {
        if current_sum == self.capacity {
            self.best_sum = current_sum;
            self.best = picked.clone();
            return;
        }

        if i >= self.sizes.len() {
            if current_sum > self.best_sum {
                self.best_sum = current_sum;
                self.best = picked.clone();
            }
            return;
        }

        // Even taking everything left cannot beat the incumbent.
        if current_sum + self.suffix[i] <= self.best_sum {
            return;
        }

        if !self.seen.insert((i, current_sum)) {
            return;
        }

        let size = self.sizes[i];
        if current_sum + size <= self.capacity {
            picked.push(i);
            self.dfs(i + 1, current_sum + size, picked);
            picked.pop();

            if self.best_sum == self.capacity {
                return;
            }
        }
        self.dfs(i + 1, current_sum, picked);
    }
}
