use crate::consts::MATRIX_CHUNK_MIN_CELLS;
use crate::core_types::CancelToken;
use crate::encoder::EncodedPrimer;
use crate::error::{EngineError, PfResult};
use crate::scorer::dimer;
use rayon::prelude::*;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use tracing::info;

/// Symmetric N x N pair-score matrix, row-major. The diagonal holds each
/// primer's self-score and is retained, not zeroed.
#[derive(Debug, Clone)]
pub struct InteractionMatrix {
    n: usize,
    cells: Vec<i32>,
}

impl InteractionMatrix {
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> i32 {
        self.cells[i * self.n + j]
    }

    pub fn row(&self, i: usize) -> &[i32] {
        &self.cells[i * self.n..(i + 1) * self.n]
    }
}

/// Upper-triangle scores for a band of consecutive rows: row i contributes
/// the cells j in i..n, flattened in order.
struct RowBand {
    rows: Range<usize>,
    scores: Vec<i32>,
}

/// Block-row striping: consecutive rows are grouped until a chunk holds at
/// least `min_cells` upper-triangle cells. Later rows are shorter, so tail
/// chunks span more rows.
fn stripe_rows(n: usize, min_cells: usize) -> Vec<Range<usize>> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut cells = 0;
    for i in 0..n {
        cells += n - i;
        if cells >= min_cells {
            chunks.push(start..i + 1);
            start = i + 1;
            cells = 0;
        }
    }
    if start < n {
        chunks.push(start..n);
    }
    chunks
}

fn compute_band(
    primers: &[EncodedPrimer],
    rows: Range<usize>,
) -> PfResult<RowBand> {
    let n = primers.len();
    let mut scores = Vec::new();
    for i in rows.clone() {
        for j in i..n {
            let score = panic::catch_unwind(AssertUnwindSafe(|| {
                dimer::pair_score(&primers[i], &primers[j])
            }))
            .map_err(|payload| EngineError::MatrixBuildFailed {
                pair: (i, j),
                cause: panic_message(&*payload),
            })?;
            scores.push(score);
        }
    }
    Ok(RowBand { rows, scores })
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

/// Builds the full symmetric matrix. Chunks of the upper triangle fan out
/// on the rayon pool; each chunk's scores land in both (i,j) and (j,i).
/// Pair scores are pure functions of the sequences, so the result is
/// bitwise identical for any worker count.
pub fn build(
    primers: &[EncodedPrimer],
    cancel: &CancelToken,
) -> PfResult<InteractionMatrix> {
    let n = primers.len();
    info!(n, cells = n * n, "building interaction matrix");

    let chunks = stripe_rows(n, MATRIX_CHUNK_MIN_CELLS);
    let bands: Vec<PfResult<RowBand>> = chunks
        .into_par_iter()
        .map(|rows| {
            if cancel.is_cancelled() {
                return Err(EngineError::Cancelled);
            }
            compute_band(primers, rows)
        })
        .collect();

    let mut cells = vec![0i32; n * n];
    for band in bands {
        let band = band?;
        let mut cursor = 0;
        for i in band.rows.clone() {
            for j in i..n {
                let score = band.scores[cursor];
                cursor += 1;
                cells[i * n + j] = score;
                cells[j * n + i] = score;
            }
        }
    }

    info!(n, "interaction matrix complete");
    Ok(InteractionMatrix { n, cells })
}
