pub mod network;
pub mod snapshot;
pub mod spec;
pub mod trace;

pub use network::{Network, INPUT_SIZE, OUTPUT_SIZE};
pub use snapshot::ParameterSnapshot;
pub use spec::NetworkSpec;
pub use trace::{ForwardTrace, GradientSet};
