use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use crate::train::step_stats::StepStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `steps`         — number of whole-batch gradient steps to take
/// - `learning_rate` — descent rate handed to every `Network::step`
/// - `progress_tx`   — optional channel sender; one `StepStats` is sent per
///                     completed step.  If the receiver is dropped the loop
///                     terminates early (clean shutdown).
/// - `stop_flag`     — optional atomic flag; when set to `true` from another
///                     thread the loop stops before starting the next step.
pub struct TrainConfig {
    pub steps: usize,
    pub learning_rate: f64,
    pub progress_tx: Option<mpsc::Sender<StepStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no progress channel and no stop flag.
    pub fn new(steps: usize, learning_rate: f64) -> Self {
        TrainConfig {
            steps,
            learning_rate,
            progress_tx: None,
            stop_flag: None,
        }
    }
}
