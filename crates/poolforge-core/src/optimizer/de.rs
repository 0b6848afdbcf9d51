use crate::optimizer::PopulationMember;

/// Builds one DE/rand/1/bin trial genome for `target`.
///
/// Every draw comes from `rng`, which the runner seeds per (generation,
/// target); trial construction is therefore independent of evaluation
/// order and the run stays deterministic under parallel scoring.
pub fn build_trial(
    rng: &mut fastrand::Rng,
    population: &[PopulationMember],
    target: usize,
    mutation_factor: f64,
    crossover_rate: f64,
) -> Vec<f64> {
    let pop_size = population.len();
    let dim = population[target].genome.len();

    // Three distinct partners, none of them the target.
    let mut pick = |exclude: &[usize]| loop {
        let candidate = rng.usize(0..pop_size);
        if !exclude.contains(&candidate) {
            return candidate;
        }
    };
    let r1 = pick(&[target]);
    let r2 = pick(&[target, r1]);
    let r3 = pick(&[target, r1, r2]);

    let base = &population[r1].genome;
    let diff_a = &population[r2].genome;
    let diff_b = &population[r3].genome;
    let parent = &population[target].genome;

    // Binomial crossover with one coordinate forced from the mutant so the
    // trial always differs from its parent.
    let forced = rng.usize(0..dim);
    let mut trial = Vec::with_capacity(dim);
    for c in 0..dim {
        if c == forced || rng.f64() < crossover_rate {
            trial.push(base[c] + mutation_factor * (diff_a[c] - diff_b[c]));
        } else {
            trial.push(parent[c]);
        }
    }
    trial
}
