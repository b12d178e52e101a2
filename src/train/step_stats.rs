use serde::{Serialize, Deserialize};

/// Per-step training statistics emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the training
/// loop sends one `StepStats` value after every completed step. Receivers
/// (e.g. the studio SSE handler) use this to drive the loss chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepStats {
    /// 1-based step number within this run.
    pub step: usize,
    /// Total steps requested for this run.
    pub total_steps: usize,
    /// Batch loss measured by the step (before its update).
    pub loss: f64,
    /// Training accuracy after the update, as a fraction in [0, 1];
    /// classification runs only.
    pub accuracy: Option<f64>,
    /// Wall-clock duration of this single step in milliseconds.
    pub elapsed_ms: u64,
}
