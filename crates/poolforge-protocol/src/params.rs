use serde::{Deserialize, Serialize};

/// Shape of the requested partition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolParams {
    /// Number of pools K. Must be at least 2.
    pub n_pools: usize,
    /// Hard cap on primers per pool. Must be at least 1.
    pub max_pool_size: usize,
}

impl Default for PoolParams {
    fn default() -> Self {
        Self {
            n_pools: 4,
            max_pool_size: 50,
        }
    }
}

/// Differential-evolution search parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Generation limit.
    pub max_generations: usize,
    /// Mutation factor F applied to the partner difference vector.
    pub mutation_factor: f64,
    /// Binomial crossover rate CR.
    pub crossover_rate: f64,
    /// Generations to wait without meaningful improvement before stopping.
    pub patience: usize,
    /// Relative improvement below which a generation counts as stalled.
    pub patience_epsilon: f64,
    /// RNG seed. The same seed, inputs, and parameters reproduce the run
    /// bit for bit regardless of worker count.
    pub seed: u64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_generations: 1000,
            mutation_factor: 0.7,
            crossover_rate: 0.9,
            patience: 50,
            patience_epsilon: 1e-6,
            seed: 0,
        }
    }
}

/// Weights for the soft cost terms. The capacity term carries its own
/// fixed large weight and is not tunable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub dimer: f64,
    pub tm_variance: f64,
    pub balance: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            dimer: 1.0,
            tm_variance: 1.0,
            balance: 0.5,
        }
    }
}
