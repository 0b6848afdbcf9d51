#![allow(dead_code)]

use poolforge_core::protocol::primer::Primer;

pub fn primer(id: &str, forward: &str, reverse: &str) -> Primer {
    Primer::new(id, "", forward, reverse)
}

pub fn homopolymer(base: char, len: usize) -> String {
    std::iter::repeat(base).take(len).collect()
}

fn random_strand(rng: &mut fastrand::Rng, len: usize) -> String {
    const BASES: [char; 4] = ['A', 'C', 'G', 'T'];
    (0..len).map(|_| BASES[rng.usize(0..4)]).collect()
}

fn longest_run(seq: &str) -> usize {
    let mut max_run = 1;
    let mut run = 1;
    let bytes = seq.as_bytes();
    for w in bytes.windows(2) {
        if w[0] == w[1] {
            run += 1;
            max_run = max_run.max(run);
        } else {
            run = 1;
        }
    }
    max_run
}

fn wallace(seq: &str) -> f64 {
    let gc = seq.chars().filter(|&c| c == 'G' || c == 'C').count();
    let at = seq.len() - gc;
    (2 * at + 4 * gc) as f64
}

fn gc_percent(seq: &str) -> f64 {
    let gc = seq.chars().filter(|&c| c == 'G' || c == 'C').count();
    100.0 * gc as f64 / seq.len() as f64
}

/// Draws strands until one passes the panel-design sanity filters:
/// balanced GC, no long mononucleotide runs, mid-range Wallace Tm.
fn plausible_strand(rng: &mut fastrand::Rng) -> String {
    loop {
        let len = rng.usize(18..=25);
        let seq = random_strand(rng, len);
        let gc = gc_percent(&seq);
        let tm = wallace(&seq);
        if (40.0..=60.0).contains(&gc)
            && longest_run(&seq) <= 4
            && (50.0..=65.0).contains(&tm)
        {
            return seq;
        }
    }
}

/// Seeded set of realistic primer pairs for matrix and search tests.
pub fn random_primers(seed: u64, n: usize) -> Vec<Primer> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..n)
        .map(|i| {
            Primer::new(
                format!("P{}", i + 1),
                format!("Gene{}", i + 1),
                plausible_strand(&mut rng),
                plausible_strand(&mut rng),
            )
        })
        .collect()
}
