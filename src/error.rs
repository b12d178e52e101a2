use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlaygroundError>;

/// Everything the engine, the dataset generators and the config loaders can
/// reject. Numeric boundary cases (`log(0)`, `sin(0)/0`) are absorbed with
/// fixed epsilons and never show up here.
#[derive(Debug, Error)]
pub enum PlaygroundError {
    /// Layer sizes that cannot describe a `[2, h1, …, hk, 1]` network.
    #[error("invalid architecture: {0}")]
    InvalidArchitecture(String),

    /// A gradient or step call received zero samples.
    #[error("empty batch: at least one sample is required")]
    EmptyBatch,

    #[error("batch length mismatch: {points} points but {targets} targets")]
    BatchLengthMismatch { points: usize, targets: usize },

    #[error("unknown activation '{0}' (expected 'tanh' or 'relu')")]
    UnknownActivation(String),

    #[error("unknown task '{0}' (expected 'classification' or 'regression')")]
    UnknownTask(String),

    #[error("unknown dataset '{0}'")]
    UnknownDataset(String),

    /// Learning rates must be finite and strictly positive.
    #[error("invalid learning rate {0}: must be finite and > 0")]
    InvalidLearningRate(f64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
