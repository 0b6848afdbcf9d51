/// Shortest strand the encoder accepts. Anything below this cannot prime.
pub const MIN_PRIMER_LEN: usize = 6;

/// Weight of the quadratic over-capacity term. Large enough that a single
/// violated slot dwarfs every soft term on realistic inputs.
pub const PENALTY_LARGE: f64 = 1e6;

/// Population sizing for the DE search: 5 members per pool, clamped.
pub const POP_PER_POOL: usize = 5;
pub const POP_MIN: usize = 15;
pub const POP_MAX: usize = 60;

/// Lower bound on upper-triangle cells per matrix-build chunk, so chunk
/// dispatch overhead stays amortized.
pub const MATRIX_CHUNK_MIN_CELLS: usize = 512;

/// Seed offset separating per-generation trial streams from the
/// per-member initialization streams.
pub const TRIAL_STREAM_OFFSET: u64 = 9999;
