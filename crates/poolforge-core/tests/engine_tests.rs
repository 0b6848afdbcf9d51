mod common;

use common::{homopolymer, primer, random_primers};
use poolforge_core::core_types::CancelToken;
use poolforge_core::engine::{self, OptimizeOptions};
use poolforge_core::error::EngineError;
use poolforge_core::optimizer::NoProgress;
use poolforge_core::protocol::params::{PoolParams, SearchParams};
use poolforge_core::report::EngineWarning;

fn options(n_pools: usize, max_pool_size: usize, seed: u64) -> OptimizeOptions {
    OptimizeOptions {
        pool: PoolParams {
            n_pools,
            max_pool_size,
        },
        search: SearchParams {
            seed,
            max_generations: 200,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn run(
    primers: &[poolforge_core::protocol::primer::Primer],
    opts: &OptimizeOptions,
) -> poolforge_core::report::OptimizationReport {
    engine::optimize(primers, opts, &CancelToken::new(), &NoProgress).unwrap()
}

#[test]
fn identical_primers_split_evenly_and_deterministically() {
    // Four identical inert pairs, two pools of at most two. Every
    // capacity-respecting assignment costs the same, so both seeds must
    // land on the same (zero) score.
    let primers: Vec<_> = (0..4)
        .map(|i| {
            primer(&format!("P{}", i), &homopolymer('A', 10), &homopolymer('A', 10))
        })
        .collect();

    let a = run(&primers, &options(2, 2, 0));
    let b = run(&primers, &options(2, 2, 1));

    for report in [&a, &b] {
        let mut sizes = report.metrics.pool_sizes.clone();
        sizes.sort();
        assert_eq!(sizes, vec![2, 2]);
        assert_eq!(report.cost.constraint, 0.0);
        assert!(report.metrics.optimization_score.is_finite());
    }
    assert_eq!(
        a.metrics.optimization_score,
        b.metrics.optimization_score
    );
    // Nothing can beat the flat landscape, including the baseline.
    assert!(a.warnings.contains(&EngineWarning::NoImprovement));
}

#[test]
fn infeasible_capacity_is_rejected_before_any_search() {
    let primers = random_primers(1, 10);
    let result = engine::optimize(
        &primers,
        &options(2, 4, 0),
        &CancelToken::new(),
        &NoProgress,
    );

    match result {
        Err(EngineError::InfeasibleCapacity {
            n_primers,
            n_pools,
            max_pool_size,
        }) => {
            assert_eq!(n_primers, 10);
            assert_eq!(n_pools, 2);
            assert_eq!(max_pool_size, 4);
        }
        other => panic!("expected InfeasibleCapacity, got {:?}", other.err()),
    }
}

#[test]
fn tm_separated_panels_get_tm_homogeneous_pools() {
    // Four inert Tm-20 pairs and four inert Tm-40 pairs. Dimer scores are
    // all zero, so the search is driven purely by Tm variance and must
    // separate the two families.
    let mut primers = Vec::new();
    for i in 0..4 {
        primers.push(primer(
            &format!("AT{}", i),
            &homopolymer('A', 10),
            &homopolymer('A', 10),
        ));
    }
    for i in 0..4 {
        primers.push(primer(
            &format!("GC{}", i),
            &homopolymer('G', 10),
            &homopolymer('G', 10),
        ));
    }

    let mut opts = options(2, 4, 0);
    opts.search.max_generations = 600;
    let report = run(&primers, &opts);

    assert_eq!(report.cost.tm_variance, 0.0);
    assert_eq!(report.cost.constraint, 0.0);
    let mut sizes = report.metrics.pool_sizes.clone();
    sizes.sort();
    assert_eq!(sizes, vec![4, 4]);
    assert_eq!(report.metrics.tm_range_per_pool, vec![0.0, 0.0]);

    let mut means = report.metrics.avg_tm_per_pool.clone();
    means.sort_by(f64::total_cmp);
    assert_eq!(means, vec![20.0, 40.0]);
}

#[test]
fn reports_carry_members_sorted_by_compatibility() {
    let primers = random_primers(77, 20);
    let report = run(&primers, &options(2, 12, 0));

    assert_eq!(report.assignment.len(), 20);
    assert!(report.assignment.iter().all(|&p| p < 2));

    let reported: usize = report.pools.iter().map(|p| p.len()).sum();
    assert_eq!(reported, 20);

    for pool in &report.pools {
        for pair in pool.windows(2) {
            assert!(pair[0].compatibility_score <= pair[1].compatibility_score);
        }
        for member in pool {
            assert!(member.forward.chars().all(|c| "ACGT".contains(c)));
            assert!(member.avg_tm > 0.0);
            assert!(member.gc_content >= 0.0 && member.gc_content <= 100.0);
        }
    }

    assert_eq!(report.metrics.pool_sizes.len(), 2);
    assert_eq!(report.metrics.max_dimer_per_pool.len(), 2);
    assert!(report.duration_seconds >= 0.0);
}

#[test]
fn empty_input_is_rejected() {
    let err = engine::optimize(
        &[],
        &options(2, 4, 0),
        &CancelToken::new(),
        &NoProgress,
    )
    .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[test]
fn single_pool_requests_are_rejected() {
    let primers = random_primers(2, 6);
    let err = engine::optimize(
        &primers,
        &options(1, 10, 0),
        &CancelToken::new(),
        &NoProgress,
    )
    .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[test]
fn zero_capacity_is_rejected() {
    let primers = random_primers(2, 6);
    let err = engine::optimize(
        &primers,
        &options(3, 0, 0),
        &CancelToken::new(),
        &NoProgress,
    )
    .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[test]
fn malformed_sequences_name_the_offending_primer() {
    let primers = vec![
        primer("ok", "ACGTACGTAC", "TTGGCCAATT"),
        primer("bad", "ACGTNCGTAC", "TTGGCCAATT"),
    ];
    let err = engine::optimize(
        &primers,
        &options(2, 2, 0),
        &CancelToken::new(),
        &NoProgress,
    )
    .unwrap_err();
    match err {
        EngineError::InvalidSequence { id } => assert_eq!(id, "bad"),
        other => panic!("expected InvalidSequence, got {:?}", other),
    }
}

#[test]
fn short_sequences_are_rejected() {
    let primers = vec![primer("stub", "ACGTA", "TTGGCCAATT")];
    let err = engine::fast_preview(&primers, 2).unwrap_err();
    assert!(matches!(err, EngineError::InvalidSequence { .. }));
}

#[test]
fn duplicate_ids_are_rejected() {
    let primers = vec![
        primer("dup", "ACGTACGTAC", "TTGGCCAATT"),
        primer("dup", "ACGTACGTAC", "TTGGCCAATT"),
    ];
    let err = engine::fast_preview(&primers, 2).unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[test]
fn lowercase_and_whitespace_are_normalized() {
    let primers = vec![primer("mixed", "  acgtacgtac  ", "ttggccaatt")];
    let preview = engine::fast_preview(&primers, 2).unwrap();
    assert_eq!(preview.assignment.len(), 1);
}

#[test]
fn fast_preview_reports_sizes_and_tm_means() {
    let primers = vec![
        primer("low0", &homopolymer('A', 10), &homopolymer('A', 10)),
        primer("low1", &homopolymer('A', 10), &homopolymer('A', 10)),
        primer("high0", &homopolymer('G', 10), &homopolymer('G', 10)),
        primer("high1", &homopolymer('G', 10), &homopolymer('G', 10)),
    ];
    let preview = engine::fast_preview(&primers, 2).unwrap();

    assert_eq!(preview.assignment.len(), 4);
    assert_eq!(preview.pool_sizes, vec![2, 2]);
    // Snake order deals 20, 20, 40, 40 as pools 0, 1, 1, 0: both pools
    // end up with one of each family.
    assert_eq!(preview.avg_tm_per_pool, vec![30.0, 30.0]);
}
