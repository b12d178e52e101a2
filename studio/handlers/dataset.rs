use log::info;
use tiny_http::Request;

use ferrite_playground::DatasetParams;

use crate::handlers::snapshot::StateView;
use crate::routes::{conflict, engine_error, error_response, json_response, read_json, JsonResponse};
use crate::state::{lock, SharedState};

/// Per-class (or per-set) point cap for generated datasets.
const MAX_COUNT: usize = 5_000;

// ---------------------------------------------------------------------------
// POST /dataset
// ---------------------------------------------------------------------------

/// Replaces the dataset wholesale. When the new data has a different task
/// the network is rebuilt for it; otherwise parameters are kept.
pub fn handle_post(request: &mut Request, state: SharedState) -> JsonResponse {
    let params: DatasetParams = match read_json(request) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    if params.count > MAX_COUNT {
        return error_response(400, &format!("count must be at most {MAX_COUNT}"));
    }
    if !params.noise.is_finite() || params.noise < 0.0 {
        return error_response(400, "noise must be a non-negative number");
    }

    // Generated before locking; other requests keep flowing meanwhile.
    let dataset = params.generate();

    let mut st = lock(&state);
    if st.training.is_running() {
        return conflict();
    }

    if dataset.task != st.spec.task {
        let mut spec = st.spec.clone();
        spec.task = dataset.task;
        if let Err(e) = st.rebuild(spec) {
            return engine_error(&e);
        }
    }
    info!("dataset {} regenerated: {} points", dataset.name, dataset.len());
    st.dataset = dataset;
    st.dataset_params = params;

    json_response(&StateView::of(&st))
}
