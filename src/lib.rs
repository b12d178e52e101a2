pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod data;
pub mod metrics;
pub mod train;

// Convenience re-exports
pub use error::{PlaygroundError, Result};
pub use math::matrix::Matrix;
pub use math::rng::{SeededUniform, gaussian_sample};
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::network::Network;
pub use network::{ForwardTrace, GradientSet, NetworkSpec, ParameterSnapshot};
pub use loss::task_kind::TaskKind;
pub use optim::sgd::Sgd;
pub use data::{DataPoint, Dataset, DatasetKind, DatasetParams};
pub use metrics::{DecisionField, accuracy, predict_grid};
pub use train::{StepStats, TrainConfig, train_loop, train_loop_with};
