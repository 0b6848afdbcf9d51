use crate::consts::PENALTY_LARGE;
use crate::core_types::PoolIndex;
use crate::scorer::matrix::InteractionMatrix;
use poolforge_protocol::params::ScoringWeights;
use serde::{Deserialize, Serialize};

/// Per-term view of one assignment's cost. All terms are non-negative and
/// `total` is their weighted sum; lower is better.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub dimer: f64,
    pub tm_variance: f64,
    pub balance: f64,
    pub constraint: f64,
    pub total: f64,
}

/// Scores assignments against a fixed matrix and Tm vector. Evaluation is
/// pure and shares only read-only state, so trials can be scored from any
/// number of worker threads.
pub struct CostEvaluator<'a> {
    matrix: &'a InteractionMatrix,
    avg_tm: &'a [f64],
    n_pools: usize,
    max_pool_size: usize,
    weights: ScoringWeights,
}

impl<'a> CostEvaluator<'a> {
    pub fn new(
        matrix: &'a InteractionMatrix,
        avg_tm: &'a [f64],
        n_pools: usize,
        max_pool_size: usize,
        weights: ScoringWeights,
    ) -> Self {
        Self {
            matrix,
            avg_tm,
            n_pools,
            max_pool_size,
            weights,
        }
    }

    pub fn n_pools(&self) -> usize {
        self.n_pools
    }

    pub fn max_pool_size(&self) -> usize {
        self.max_pool_size
    }

    /// Buckets members by pool in ascending index order. Keeping the
    /// iteration order fixed keeps float summation bitwise-reproducible
    /// across runs and worker counts.
    pub fn members_by_pool(&self, assignment: &[PoolIndex]) -> Vec<Vec<usize>> {
        let mut pools: Vec<Vec<usize>> = vec![Vec::new(); self.n_pools];
        for (i, &p) in assignment.iter().enumerate() {
            pools[p as usize].push(i);
        }
        pools
    }

    pub fn evaluate(&self, assignment: &[PoolIndex]) -> CostBreakdown {
        let pools = self.members_by_pool(assignment);

        let mut dimer_raw = 0i64;
        let mut tm_variance = 0.0;
        let mut constraint = 0.0;

        for members in &pools {
            // Intra-pool dimer load over unordered pairs i <= j. The
            // diagonal stays in: a self-dimerizing primer is a liability
            // wherever it lands.
            for (rank, &i) in members.iter().enumerate() {
                for &j in &members[rank..] {
                    dimer_raw += self.matrix.get(i, j) as i64;
                }
            }

            if !members.is_empty() {
                let len = members.len() as f64;
                let mean =
                    members.iter().map(|&i| self.avg_tm[i]).sum::<f64>() / len;
                tm_variance += members
                    .iter()
                    .map(|&i| {
                        let d = self.avg_tm[i] - mean;
                        d * d
                    })
                    .sum::<f64>()
                    / len;
            }

            let over = members.len().saturating_sub(self.max_pool_size);
            constraint += (over * over) as f64 * PENALTY_LARGE;
        }

        let sizes: Vec<f64> = pools.iter().map(|m| m.len() as f64).collect();
        let balance = population_variance(&sizes);

        let dimer = dimer_raw as f64;
        let total = self.weights.dimer * dimer
            + self.weights.tm_variance * tm_variance
            + self.weights.balance * balance
            + constraint;

        CostBreakdown {
            dimer,
            tm_variance,
            balance,
            constraint,
            total,
        }
    }
}

/// Population variance (divisor N, not N-1).
fn population_variance(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let len = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / len;
    xs.iter()
        .map(|x| {
            let d = x - mean;
            d * d
        })
        .sum::<f64>()
        / len
}
