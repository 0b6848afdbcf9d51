use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Primer '{id}' has an invalid sequence")]
    InvalidSequence { id: String },

    #[error(
        "{n_primers} primers cannot fit into {n_pools} pools of at most {max_pool_size}"
    )]
    InfeasibleCapacity {
        n_primers: usize,
        n_pools: usize,
        max_pool_size: usize,
    },

    #[error("Interaction matrix build failed on pair ({}, {}): {cause}", pair.0, pair.1)]
    MatrixBuildFailed { pair: (usize, usize), cause: String },

    #[error("Job cancelled before any result was available")]
    Cancelled,

    #[error("Best assignment still violates pool capacity after search")]
    Infeasible,
}

pub type PfResult<T> = Result<T, EngineError>;
