pub mod matrix;
pub mod rng;

pub use matrix::Matrix;
pub use rng::{SeededUniform, UniformSource, gaussian_from, gaussian_sample};
