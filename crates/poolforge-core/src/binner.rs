use crate::core_types::{Assignment, PoolIndex};

/// Tm-sorted snake distribution: sort by avg Tm ascending, then deal into
/// K pools reversing direction every lap so each pool samples the whole Tm
/// range evenly. Deterministic, O(N log N), needs no interaction matrix.
///
/// This is the interactive-preview path and the baseline the optimizer
/// must beat; it is not used to seed the search.
pub fn snake_assign(avg_tm: &[f64], n_pools: usize) -> Assignment {
    let n = avg_tm.len();
    let mut order: Vec<usize> = (0..n).collect();
    // Stable sort keeps equal-Tm primers in input order.
    order.sort_by(|&a, &b| avg_tm[a].total_cmp(&avg_tm[b]));

    let mut assignment = vec![0 as PoolIndex; n];
    for (rank, &idx) in order.iter().enumerate() {
        let lap = rank / n_pools;
        let pos = rank % n_pools;
        let pool = if lap % 2 == 0 {
            pos
        } else {
            n_pools - 1 - pos
        };
        assignment[idx] = pool as PoolIndex;
    }
    assignment
}
