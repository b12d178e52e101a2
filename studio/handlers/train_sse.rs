use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use log::debug;
use serde::Serialize;
use tiny_http::Request;

use crate::state::{lock, SharedState, StatusSummary, TrainingStatus};
use crate::util::sse::{SSE_HEAD, format_sse_keepalive, sse_json_event, write_sse};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Losses recorded before the client connected, replayed once.
#[derive(Serialize)]
struct History<'a> {
    losses: &'a [f64],
}

/// `GET /train/events`: Server-Sent Events handler.
///
/// Takes ownership of `request` (for `into_writer`) and streams:
/// 1. one `history` event with the losses recorded so far,
/// 2. a `step` event per `StepStats` received from the training channel,
///    with a keep-alive ping after each quiet 500 ms,
/// 3. a final `done` event carrying the training status once the channel
///    disconnects (or immediately when nothing is running).
pub fn handle(request: Request, state: SharedState) {
    let mut writer = request.into_writer();
    if !write_sse(&mut *writer, SSE_HEAD) {
        return;
    }

    let (step_rx, history_msg) = {
        let st = lock(&state);
        let rx = match &st.training {
            TrainingStatus::Running { step_rx, .. } => Some(step_rx.clone()),
            _ => None,
        };
        (rx, sse_json_event("history", &History { losses: &st.loss_history }))
    };

    if let Some(msg) = history_msg {
        if !write_sse(&mut *writer, &msg) {
            return;
        }
    }

    let rx_arc = match step_rx {
        Some(rx) => rx,
        None => {
            send_done(&mut *writer, &state);
            return;
        }
    };

    loop {
        let result = {
            let rx = rx_arc.lock().unwrap_or_else(|e| e.into_inner());
            rx.recv_timeout(POLL_INTERVAL)
        };

        match result {
            Ok(stats) => {
                if let Some(msg) = sse_json_event("step", &stats) {
                    if !write_sse(&mut *writer, &msg) {
                        debug!("SSE client went away at step {}", stats.step);
                        return;
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if !write_sse(&mut *writer, format_sse_keepalive()) {
                    return;
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                send_done(&mut *writer, &state);
                return;
            }
        }
    }
}

fn send_done(writer: &mut dyn std::io::Write, state: &SharedState) {
    let summary: StatusSummary = lock(state).training.summary();
    if let Some(msg) = sse_json_event("done", &summary) {
        write_sse(writer, &msg);
    }
}
