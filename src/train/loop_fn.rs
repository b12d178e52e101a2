use std::sync::atomic::Ordering;
use std::time::Instant;

use log::{debug, info, trace};

use crate::data::Dataset;
use crate::error::Result;
use crate::loss::TaskKind;
use crate::metrics::accuracy_on;
use crate::network::Network;
use crate::train::step_stats::StepStats;
use crate::train::train_config::TrainConfig;

/// What one whole step reports back to the loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub loss: f64,
    pub accuracy: Option<f64>,
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` on the whole of `dataset` for up to `config.steps`
/// full-batch steps and returns the loss of the **last completed step**
/// (0.0 when no step ran).
///
/// Classification runs also report training accuracy after each step.
pub fn train_loop(network: &mut Network, dataset: &Dataset, config: &TrainConfig) -> Result<f64> {
    let inputs = dataset.inputs();
    let targets = dataset.targets();
    let classification = dataset.task == TaskKind::Classification;

    train_loop_with(config, |learning_rate| {
        let loss = network.step(&inputs, &targets, learning_rate)?;
        let accuracy = classification.then(|| accuracy_on(network, &inputs, &targets));
        Ok(StepOutcome { loss, accuracy })
    })
}

/// The cooperative loop itself, over any closure that performs exactly one
/// whole step. Use this when the network lives behind a lock: take the lock
/// inside `step` so readers can interleave between steps.
///
/// # Early termination
/// The loop stops before the next step if:
/// - `config.stop_flag` is set to `true`, **or**
/// - the `progress_tx` receiver has been dropped, **or**
/// - a step returns an error (propagated to the caller).
///
/// A step that has started always runs to completion.
pub fn train_loop_with<F>(config: &TrainConfig, mut step: F) -> Result<f64>
where
    F: FnMut(f64) -> Result<StepOutcome>,
{
    debug!("training for {} steps at lr={}", config.steps, config.learning_rate);

    let mut last_loss = 0.0;
    let mut completed = 0;

    for step_no in 1..=config.steps {
        if stop_requested(config) {
            info!("training stopped after {completed}/{} steps", config.steps);
            return Ok(last_loss);
        }

        let t_start = Instant::now();
        let outcome = step(config.learning_rate)?;
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        last_loss = outcome.loss;
        completed = step_no;
        trace!("step {step_no}/{}: loss={:.6}", config.steps, outcome.loss);

        let stats = StepStats {
            step: step_no,
            total_steps: config.steps,
            loss: outcome.loss,
            accuracy: outcome.accuracy,
            elapsed_ms,
        };

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                info!("progress receiver dropped after {completed} steps");
                return Ok(last_loss);
            }
        }
    }

    info!("training finished: {completed} steps, final loss {last_loss:.6}");
    Ok(last_loss)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn stop_requested(config: &TrainConfig) -> bool {
    config.stop_flag
        .as_ref()
        .map(|flag| flag.load(Ordering::Relaxed))
        .unwrap_or(false)
}
