use crate::consts::TRIAL_STREAM_OFFSET;
use crate::core_types::{Assignment, CancelToken, PoolIndex};
use crate::optimizer::{de, decode_assignment, population_size, PopulationMember};
use crate::scorer::cost::{CostBreakdown, CostEvaluator};
use poolforge_protocol::params::SearchParams;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Called once per generation. Return false to stop the search at the next
/// boundary; the best-so-far is still returned.
pub trait ProgressCallback: Send + Sync {
    fn on_progress(
        &self,
        generation: usize,
        best_cost: f64,
        best_assignment: &[PoolIndex],
    ) -> bool;
}

/// No-op callback for hosts that do not stream progress.
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_progress(&self, _: usize, _: f64, _: &[PoolIndex]) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Patience exhausted: no meaningful improvement for S generations.
    Converged,
    /// Ran the full generation budget.
    GenerationLimit,
    /// Cooperative cancellation observed.
    Cancelled,
    /// Soft wall-clock ceiling exceeded.
    TimeBudgetExhausted,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub assignment: Assignment,
    pub cost: CostBreakdown,
    pub generations_completed: usize,
    pub stop_reason: StopReason,
}

/// Classical DE/rand/1/bin over the continuous pool-affinity genome.
///
/// Trials are constructed serially from per-target seeded streams, scored
/// in parallel, then selected serially in target order. Selection order
/// and RNG streams are both fixed, so the search is bit-identical for any
/// worker count.
pub struct DeOptimizer<'a> {
    evaluator: CostEvaluator<'a>,
    n_primers: usize,
    params: SearchParams,
    max_time: Option<Duration>,
}

impl<'a> DeOptimizer<'a> {
    pub fn new(
        evaluator: CostEvaluator<'a>,
        n_primers: usize,
        params: SearchParams,
        max_time: Option<Duration>,
    ) -> Self {
        Self {
            evaluator,
            n_primers,
            params,
            max_time,
        }
    }

    fn member_from(&self, genome: Vec<f64>) -> PopulationMember {
        let assignment = decode_assignment(&genome, self.evaluator.n_pools());
        let cost = self.evaluator.evaluate(&assignment);
        PopulationMember {
            genome,
            assignment,
            cost,
        }
    }

    pub fn run<CB: ProgressCallback>(
        &self,
        cancel: &CancelToken,
        callback: &CB,
    ) -> SearchOutcome {
        let pop_size = population_size(self.evaluator.n_pools());
        let dim = self.n_primers * self.evaluator.n_pools();
        let seed = self.params.seed;
        let start = Instant::now();

        info!(
            pop_size,
            dim,
            max_generations = self.params.max_generations,
            "starting DE search"
        );

        // Uniform [0,1) init, one seeded stream per member.
        let mut population: Vec<PopulationMember> = (0..pop_size)
            .map(|m| {
                let mut rng = fastrand::Rng::with_seed(seed.wrapping_add(m as u64));
                let genome: Vec<f64> = (0..dim).map(|_| rng.f64()).collect();
                self.member_from(genome)
            })
            .collect();

        let mut best = population
            .iter()
            .min_by(|a, b| a.cost.total.total_cmp(&b.cost.total))
            .cloned()
            .unwrap_or_else(|| self.member_from(vec![0.0; dim]));

        let mut stall = 0usize;
        let mut generations_completed = 0usize;
        let mut stop_reason = StopReason::GenerationLimit;

        for generation in 0..self.params.max_generations {
            if cancel.is_cancelled() {
                stop_reason = StopReason::Cancelled;
                break;
            }
            if let Some(limit) = self.max_time {
                if start.elapsed() >= limit {
                    info!(generation, "time budget exhausted");
                    stop_reason = StopReason::TimeBudgetExhausted;
                    break;
                }
            }

            // Trial construction is serial so every draw comes from the
            // target's own stream, regardless of evaluation scheduling.
            let trials: Vec<Vec<f64>> = (0..pop_size)
                .map(|target| {
                    let stream = seed
                        .wrapping_add(TRIAL_STREAM_OFFSET)
                        .wrapping_add((generation * pop_size + target) as u64);
                    let mut rng = fastrand::Rng::with_seed(stream);
                    de::build_trial(
                        &mut rng,
                        &population,
                        target,
                        self.params.mutation_factor,
                        self.params.crossover_rate,
                    )
                })
                .collect();

            // Scoring is pure against read-only state; fan out.
            let evaluated: Vec<PopulationMember> = trials
                .into_par_iter()
                .map(|genome| self.member_from(genome))
                .collect();

            // Greedy selection, strictly sequential in target order. Ties
            // go to the trial so the population keeps moving on plateaus.
            let prev_best = best.cost.total;
            for (target, trial) in evaluated.into_iter().enumerate() {
                if trial.cost.total <= population[target].cost.total {
                    population[target] = trial;
                }
            }
            for member in &population {
                if member.cost.total < best.cost.total {
                    best = member.clone();
                }
            }
            generations_completed = generation + 1;

            let threshold =
                self.params.patience_epsilon * prev_best.abs().max(1.0);
            if prev_best - best.cost.total > threshold {
                stall = 0;
            } else {
                stall += 1;
            }
            if stall >= self.params.patience {
                info!(generation, best = best.cost.total, "converged");
                stop_reason = StopReason::Converged;
                break;
            }

            debug!(generation, best = best.cost.total, stall, "generation done");

            if !callback.on_progress(generation, best.cost.total, &best.assignment)
            {
                stop_reason = StopReason::Cancelled;
                break;
            }
        }

        SearchOutcome {
            assignment: best.assignment,
            cost: best.cost,
            generations_completed,
            stop_reason,
        }
    }
}
