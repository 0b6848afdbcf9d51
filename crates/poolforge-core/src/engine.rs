use crate::binner;
use crate::core_types::CancelToken;
use crate::encoder::{self, EncodedPrimer};
use crate::error::{EngineError, PfResult};
use crate::optimizer::{DeOptimizer, ProgressCallback, StopReason};
use crate::report::{
    self, EngineWarning, OptimizationReport, PreviewReport,
};
use crate::scorer::cost::CostEvaluator;
use crate::scorer::matrix;
use itertools::Itertools;
use poolforge_protocol::params::{PoolParams, ScoringWeights, SearchParams};
use poolforge_protocol::primer::Primer;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Everything an optimization job takes besides the primers themselves.
#[derive(Debug, Clone, Default)]
pub struct OptimizeOptions {
    pub pool: PoolParams,
    pub search: SearchParams,
    pub weights: ScoringWeights,
    /// Soft wall-clock ceiling; the search stops at the next generation
    /// boundary once exceeded. Hard timeouts belong to the caller.
    pub max_time: Option<Duration>,
}

fn validate(primers: &[Primer], n_pools: usize) -> PfResult<()> {
    if primers.is_empty() {
        return Err(EngineError::InvalidInput("primer list is empty".into()));
    }
    if n_pools < 2 {
        return Err(EngineError::InvalidInput(format!(
            "n_pools must be at least 2, got {}",
            n_pools
        )));
    }
    if let Some(dup) = primers.iter().map(|p| p.id.as_str()).duplicates().next()
    {
        return Err(EngineError::InvalidInput(format!(
            "duplicate primer id '{}'",
            dup
        )));
    }
    Ok(())
}

fn avg_tm_vector(encoded: &[EncodedPrimer]) -> Vec<f64> {
    encoded.iter().map(|p| p.avg_tm).collect()
}

/// Interactive preview: encode, snake-bin by Tm, summarize. No matrix, no
/// search; intended to return well under 50 ms for a few thousand primers.
pub fn fast_preview(
    primers: &[Primer],
    n_pools: usize,
) -> PfResult<PreviewReport> {
    validate(primers, n_pools)?;
    let encoded = encoder::encode_primers(primers)?;
    let avg_tm = avg_tm_vector(&encoded);

    let assignment = binner::snake_assign(&avg_tm, n_pools);

    let mut sizes = vec![0usize; n_pools];
    let mut tm_sums = vec![0.0f64; n_pools];
    for (i, &p) in assignment.iter().enumerate() {
        sizes[p as usize] += 1;
        tm_sums[p as usize] += avg_tm[i];
    }
    let avg_tm_per_pool = sizes
        .iter()
        .zip(&tm_sums)
        .map(|(&s, &sum)| if s > 0 { sum / s as f64 } else { 0.0 })
        .collect();

    Ok(PreviewReport {
        assignment,
        pool_sizes: sizes,
        avg_tm_per_pool,
    })
}

/// Full optimization: encode, build the interaction matrix, run the DE
/// search, and materialize the report.
///
/// Cancellation mid-matrix yields `EngineError::Cancelled` (nothing to
/// return yet); cancellation during the search returns the best-so-far
/// tagged `StopReason::Cancelled`.
pub fn optimize<CB: ProgressCallback>(
    primers: &[Primer],
    options: &OptimizeOptions,
    cancel: &CancelToken,
    progress: &CB,
) -> PfResult<OptimizationReport> {
    let started = Instant::now();
    let n_pools = options.pool.n_pools;
    let max_pool_size = options.pool.max_pool_size;

    validate(primers, n_pools)?;
    if max_pool_size < 1 {
        return Err(EngineError::InvalidInput(
            "max_pool_size must be at least 1".into(),
        ));
    }
    if max_pool_size * n_pools < primers.len() {
        return Err(EngineError::InfeasibleCapacity {
            n_primers: primers.len(),
            n_pools,
            max_pool_size,
        });
    }

    info!(
        n_primers = primers.len(),
        n_pools, max_pool_size, "starting optimization job"
    );

    let encoded = encoder::encode_primers(primers)?;
    let avg_tm = avg_tm_vector(&encoded);

    let matrix = matrix::build(&encoded, cancel)?;

    let evaluator = CostEvaluator::new(
        &matrix,
        &avg_tm,
        n_pools,
        max_pool_size,
        options.weights,
    );

    // The snake binner is the floor the search has to beat.
    let baseline = evaluator.evaluate(&binner::snake_assign(&avg_tm, n_pools));

    let optimizer = DeOptimizer::new(
        evaluator,
        encoded.len(),
        options.search,
        options.max_time,
    );
    let outcome = optimizer.run(cancel, progress);

    // Re-bucket the winner for reporting; the evaluator moved into the
    // optimizer, so rebuild the grouping here.
    let mut members_by_pool: Vec<Vec<usize>> = vec![Vec::new(); n_pools];
    for (i, &p) in outcome.assignment.iter().enumerate() {
        members_by_pool[p as usize].push(i);
    }

    if outcome.stop_reason != StopReason::Cancelled
        && members_by_pool.iter().any(|m| m.len() > max_pool_size)
    {
        return Err(EngineError::Infeasible);
    }

    let mut warnings = Vec::new();
    if outcome.cost.total >= baseline.total {
        warn!(
            best = outcome.cost.total,
            baseline = baseline.total,
            "search did not improve on the Tm-binned baseline"
        );
        warnings.push(EngineWarning::NoImprovement);
    }

    let pools = report::build_pools(&encoded, &matrix, &members_by_pool);
    let metrics = report::build_metrics(
        &encoded,
        &matrix,
        &members_by_pool,
        outcome.cost.total,
    );

    info!(
        generations = outcome.generations_completed,
        score = outcome.cost.total,
        "optimization job finished"
    );

    Ok(OptimizationReport {
        assignment: outcome.assignment,
        pools,
        metrics,
        cost: outcome.cost,
        generations_completed: outcome.generations_completed,
        stop_reason: outcome.stop_reason,
        warnings,
        duration_seconds: started.elapsed().as_secs_f64(),
    })
}
