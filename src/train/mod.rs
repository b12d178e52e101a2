pub mod loop_fn;
pub mod step_stats;
pub mod train_config;

pub use loop_fn::{StepOutcome, train_loop, train_loop_with};
pub use step_stats::StepStats;
pub use train_config::TrainConfig;
