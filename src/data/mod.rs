pub mod dataset;
pub mod generators;

pub use dataset::{Bounds, DataPoint, Dataset};
pub use generators::{DatasetKind, DatasetParams, DEFAULT_SEED, circles, moons, plane, sinc, spirals, xor};
