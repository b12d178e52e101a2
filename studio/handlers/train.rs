use std::sync::{Arc, Mutex, atomic::{AtomicBool, Ordering}, mpsc};
use std::thread;
use std::time::Instant;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use tiny_http::Request;

use ferrite_playground::metrics::accuracy_on;
use ferrite_playground::train::StepOutcome;
use ferrite_playground::{Sgd, StepStats, TaskKind, TrainConfig, train_loop_with};

use crate::routes::{conflict, engine_error, json_response, read_json, JsonResponse};
use crate::state::{lock, SharedState, TrainingStatus};

/// Body of `POST /train/start`; missing fields use the studio config.
#[derive(Debug, Default, Deserialize)]
pub struct StartRequest {
    pub steps:         Option<usize>,
    pub learning_rate: Option<f64>,
}

#[derive(Debug, Serialize)]
struct StepResponse {
    step:     usize,
    loss:     f64,
    accuracy: Option<f64>,
}

// ---------------------------------------------------------------------------
// POST /train/start
// ---------------------------------------------------------------------------

pub fn handle_start(request: &mut Request, state: SharedState) -> JsonResponse {
    let body: StartRequest = match read_json(request) {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    let mut st = lock(&state);
    if st.training.is_running() {
        return conflict();
    }

    let steps = body.steps.unwrap_or(st.config.steps);
    let learning_rate = body.learning_rate.unwrap_or(st.config.learning_rate);
    if let Err(e) = Sgd::new(learning_rate) {
        return engine_error(&e);
    }

    // The dataset cannot change while the run holds `Running`, so the batch
    // is captured once.
    let inputs = st.dataset.inputs();
    let targets = st.dataset.targets();
    let classification = st.dataset.task == TaskKind::Classification;

    let (tx, rx) = mpsc::channel::<StepStats>();
    let stop_flag = Arc::new(AtomicBool::new(false));

    st.training = TrainingStatus::Running {
        stop_flag:   stop_flag.clone(),
        step_rx:     Arc::new(Mutex::new(rx)),
        total_steps: steps,
    };
    let summary = st.training.summary();
    drop(st);

    info!("training started: {steps} steps at lr={learning_rate}");

    let state_clone = state.clone();
    thread::spawn(move || {
        let mut config = TrainConfig::new(steps, learning_rate);
        config.progress_tx = Some(tx);
        config.stop_flag   = Some(stop_flag.clone());

        let t_start = Instant::now();
        let mut completed = 0;

        // One lock per step: readers (state, predict) interleave between steps.
        let result = train_loop_with(&config, |lr| {
            let mut st = lock(&state_clone);
            let loss = st.network.step(&inputs, &targets, lr)?;
            st.loss_history.push(loss);
            completed += 1;
            let accuracy = classification.then(|| accuracy_on(&st.network, &inputs, &targets));
            Ok(StepOutcome { loss, accuracy })
        });

        let elapsed_total_ms = t_start.elapsed().as_millis() as u64;

        // Final status goes in before the sender is dropped, so SSE readers
        // see it as soon as the channel disconnects.
        let mut st = lock(&state_clone);
        st.training = match result {
            Ok(_) => TrainingStatus::Done {
                steps_completed: completed,
                elapsed_total_ms,
                was_stopped: stop_flag.load(Ordering::Relaxed),
            },
            Err(e) => {
                warn!("training failed after {completed} steps: {e}");
                TrainingStatus::Failed { reason: e.to_string() }
            }
        };
        drop(st);
        drop(config);
    });

    json_response(&summary)
}

// ---------------------------------------------------------------------------
// POST /train/stop
// ---------------------------------------------------------------------------

/// Raises the stop flag; the loop exits before its next step.
pub fn handle_stop(state: SharedState) -> JsonResponse {
    let st = lock(&state);
    if let TrainingStatus::Running { stop_flag, .. } = &st.training {
        stop_flag.store(true, Ordering::Relaxed);
    }
    json_response(&st.training.summary())
}

// ---------------------------------------------------------------------------
// POST /step
// ---------------------------------------------------------------------------

/// Runs exactly one step synchronously at the configured learning rate.
pub fn handle_step(state: SharedState) -> JsonResponse {
    let mut st = lock(&state);
    if st.training.is_running() {
        return conflict();
    }

    let inputs = st.dataset.inputs();
    let targets = st.dataset.targets();
    let learning_rate = st.config.learning_rate;

    match st.network.step(&inputs, &targets, learning_rate) {
        Ok(loss) => {
            st.loss_history.push(loss);
            let accuracy = (st.dataset.task == TaskKind::Classification)
                .then(|| accuracy_on(&st.network, &inputs, &targets));
            json_response(&StepResponse { step: st.loss_history.len(), loss, accuracy })
        }
        Err(e) => engine_error(&e),
    }
}
