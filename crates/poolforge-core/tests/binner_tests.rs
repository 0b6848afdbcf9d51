use poolforge_core::binner::snake_assign;

#[test]
fn snake_reverses_direction_every_lap() {
    // Already-sorted Tms, so rank order equals index order.
    let tms = [10.0, 11.0, 12.0, 13.0, 14.0, 15.0];
    let assignment = snake_assign(&tms, 3);
    // Lap 0 deals 0,1,2; lap 1 deals 2,1,0.
    assert_eq!(assignment, vec![0, 1, 2, 2, 1, 0]);
}

#[test]
fn snake_follows_tm_rank_not_input_order() {
    let tms = [15.0, 10.0, 13.0, 11.0, 14.0, 12.0];
    let assignment = snake_assign(&tms, 3);
    // Sorted ranks: indices 1,3,5,2,4,0 -> pools 0,1,2,2,1,0.
    assert_eq!(assignment, vec![0, 0, 2, 1, 1, 2]);
}

#[test]
fn snake_sizes_are_balanced() {
    let tms: Vec<f64> = (0..10).map(|i| 20.0 + i as f64).collect();
    let assignment = snake_assign(&tms, 3);
    let mut sizes = [0usize; 3];
    for &p in &assignment {
        sizes[p as usize] += 1;
    }
    sizes.sort();
    assert_eq!(sizes, [3, 3, 4]);
}

#[test]
fn snake_is_deterministic() {
    let tms: Vec<f64> = (0..200)
        .map(|i| 50.0 + ((i * 37) % 23) as f64 / 3.0)
        .collect();
    assert_eq!(snake_assign(&tms, 5), snake_assign(&tms, 5));
}

#[test]
fn snake_tm_means_are_tighter_than_contiguous_chunks() {
    let mut rng = fastrand::Rng::with_seed(99);
    let tms: Vec<f64> = (0..120).map(|_| 45.0 + rng.f64() * 25.0).collect();
    let k = 4;

    let pool_mean_spread = |assignment: &[u16]| {
        let mut sums = vec![0.0f64; k];
        let mut counts = vec![0usize; k];
        for (i, &p) in assignment.iter().enumerate() {
            sums[p as usize] += tms[i];
            counts[p as usize] += 1;
        }
        let means: Vec<f64> = sums
            .iter()
            .zip(&counts)
            .map(|(&s, &c)| s / c as f64)
            .collect();
        let min = means.iter().copied().fold(f64::INFINITY, f64::min);
        let max = means.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        max - min
    };

    // Naive comparison partition: sorted Tm order chopped into K
    // contiguous chunks.
    let mut order: Vec<usize> = (0..tms.len()).collect();
    order.sort_by(|&a, &b| tms[a].total_cmp(&tms[b]));
    let chunk = tms.len().div_ceil(k);
    let mut contiguous = vec![0u16; tms.len()];
    for (rank, &idx) in order.iter().enumerate() {
        contiguous[idx] = ((rank / chunk).min(k - 1)) as u16;
    }

    let snake = snake_assign(&tms, k);
    assert!(pool_mean_spread(&snake) <= pool_mean_spread(&contiguous));
}
