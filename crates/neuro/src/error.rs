use compute::ComputeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NeuroError {
    #[error("invalid topology {0:?}: need at least two layers, all of positive width")]
    InvalidTopology(Vec<usize>),
    #[error("batch has {got} input vectors but the population has {expected} networks")]
    BatchSizeMismatch { expected: usize, got: usize },
    #[error("got {got} fitness scores for a population of {expected}")]
    FitnessSizeMismatch { expected: usize, got: usize },
    #[error("topology mismatch: expected {expected:?}, got {got:?}")]
    TopologyMismatch { expected: Vec<usize>, got: Vec<usize> },
    #[error("malformed genome: {0}")]
    MalformedGenome(String),
    #[error("input width {got} does not match network input width {expected}")]
    InputWidthMismatch { expected: usize, got: usize },
    #[error("tensor shape {rows}x{cols} cannot hold {len} values")]
    ShapeMismatch { rows: usize, cols: usize, len: usize },
    #[error("unknown agent index {index} (population size {population_size})")]
    UnknownAgent { index: usize, population_size: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("population must contain at least one network")]
    EmptyPopulation,
    #[error(transparent)]
    Compute(#[from] ComputeError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NeuroError>;
