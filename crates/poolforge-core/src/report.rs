use crate::core_types::Assignment;
use crate::encoder::{decode, EncodedPrimer};
use crate::optimizer::StopReason;
use crate::scorer::cost::CostBreakdown;
use crate::scorer::matrix::InteractionMatrix;
use serde::{Deserialize, Serialize};

/// One primer as reported inside a pool, with its derived scalars and its
/// compatibility against the rest of that pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolMember {
    pub id: String,
    pub gene: String,
    pub forward: String,
    pub reverse: String,
    pub forward_tm: f64,
    pub reverse_tm: f64,
    pub avg_tm: f64,
    pub gc_content: f64,
    /// Mean interaction score against the members of the same pool
    /// (itself included). Lower is more compatible.
    pub compatibility_score: f64,
}

/// Per-pool summary arrays, indexed by pool. Empty pools report 0.0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolMetrics {
    pub pool_sizes: Vec<usize>,
    pub avg_tm_per_pool: Vec<f64>,
    pub tm_range_per_pool: Vec<f64>,
    pub max_dimer_per_pool: Vec<f64>,
    pub optimization_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineWarning {
    /// The search never beat the fast-binner baseline.
    NoImprovement,
}

/// Result of the fast preview path: assignment plus the cheap per-pool
/// stats. No matrix is built, so no dimer figures appear here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewReport {
    pub assignment: Assignment,
    pub pool_sizes: Vec<usize>,
    pub avg_tm_per_pool: Vec<f64>,
}

/// Full result of an optimization job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub assignment: Assignment,
    pub pools: Vec<Vec<PoolMember>>,
    pub metrics: PoolMetrics,
    pub cost: CostBreakdown,
    pub generations_completed: usize,
    pub stop_reason: StopReason,
    pub warnings: Vec<EngineWarning>,
    pub duration_seconds: f64,
}

/// Materializes the per-pool member listings. Within each pool, members
/// are ordered by compatibility score ascending (most compatible first).
pub fn build_pools(
    encoded: &[EncodedPrimer],
    matrix: &InteractionMatrix,
    members_by_pool: &[Vec<usize>],
) -> Vec<Vec<PoolMember>> {
    members_by_pool
        .iter()
        .map(|members| {
            let mut pool: Vec<PoolMember> = members
                .iter()
                .map(|&i| {
                    let p = &encoded[i];
                    let compat = members
                        .iter()
                        .map(|&j| matrix.get(i, j) as f64)
                        .sum::<f64>()
                        / members.len() as f64;
                    PoolMember {
                        id: p.id.clone(),
                        gene: p.gene.clone(),
                        forward: decode(&p.fwd_codes),
                        reverse: decode(&p.rev_codes),
                        forward_tm: p.fwd_tm,
                        reverse_tm: p.rev_tm,
                        avg_tm: p.avg_tm,
                        gc_content: p.gc_content,
                        compatibility_score: compat,
                    }
                })
                .collect();
            pool.sort_by(|a, b| {
                a.compatibility_score.total_cmp(&b.compatibility_score)
            });
            pool
        })
        .collect()
}

/// Derives the per-pool metric arrays from a final assignment.
pub fn build_metrics(
    encoded: &[EncodedPrimer],
    matrix: &InteractionMatrix,
    members_by_pool: &[Vec<usize>],
    total_cost: f64,
) -> PoolMetrics {
    let mut metrics = PoolMetrics {
        optimization_score: total_cost,
        ..Default::default()
    };

    for members in members_by_pool {
        metrics.pool_sizes.push(members.len());

        if members.is_empty() {
            metrics.avg_tm_per_pool.push(0.0);
            metrics.tm_range_per_pool.push(0.0);
            metrics.max_dimer_per_pool.push(0.0);
            continue;
        }

        let tms: Vec<f64> = members.iter().map(|&i| encoded[i].avg_tm).collect();
        let mean = tms.iter().sum::<f64>() / tms.len() as f64;
        let min = tms.iter().copied().fold(f64::INFINITY, f64::min);
        let max = tms.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        metrics.avg_tm_per_pool.push(mean);
        metrics.tm_range_per_pool.push(max - min);

        let mut max_dimer = 0i32;
        for &i in members {
            for &j in members {
                max_dimer = max_dimer.max(matrix.get(i, j));
            }
        }
        metrics.max_dimer_per_pool.push(max_dimer as f64);
    }

    metrics
}
