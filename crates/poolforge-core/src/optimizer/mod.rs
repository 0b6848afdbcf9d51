pub mod de;
pub mod runner;

pub use self::runner::{
    DeOptimizer, NoProgress, ProgressCallback, SearchOutcome, StopReason,
};

use crate::consts::{POP_MAX, POP_MIN, POP_PER_POOL};
use crate::core_types::{Assignment, PoolIndex};
use crate::scorer::cost::CostBreakdown;

/// One candidate: a continuous N x K affinity genome plus its cached
/// decoding and cost. The cache is refreshed whenever the genome is
/// replaced.
#[derive(Debug, Clone)]
pub struct PopulationMember {
    pub genome: Vec<f64>,
    pub assignment: Assignment,
    pub cost: CostBreakdown,
}

/// Row-argmax decoding of a flat row-major genome; ties go to the lowest
/// pool index. The genome stays continuous so the DE difference operators
/// keep their natural geometry; argmax is only a view onto it.
pub fn decode_assignment(genome: &[f64], n_pools: usize) -> Assignment {
    genome
        .chunks_exact(n_pools)
        .map(|row| {
            let mut best = 0usize;
            for (k, &w) in row.iter().enumerate().skip(1) {
                if w > row[best] {
                    best = k;
                }
            }
            best as PoolIndex
        })
        .collect()
}

/// 5 members per pool, clamped to [15, 60].
pub fn population_size(n_pools: usize) -> usize {
    (POP_PER_POOL * n_pools).clamp(POP_MIN, POP_MAX)
}
