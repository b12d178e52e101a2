use log::info;
use tiny_http::Request;

use ferrite_playground::NetworkSpec;

use crate::handlers::snapshot::StateView;
use crate::routes::{conflict, engine_error, json_response, read_json, JsonResponse};
use crate::state::{lock, SharedState};

// ---------------------------------------------------------------------------
// POST /network
// ---------------------------------------------------------------------------

/// Reinitializes the network from a `NetworkSpec`. The task field is
/// overridden by the dataset's task.
pub fn handle_post(request: &mut Request, state: SharedState) -> JsonResponse {
    let mut spec: NetworkSpec = match read_json(request) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let mut st = lock(&state);
    if st.training.is_running() {
        return conflict();
    }
    spec.task = st.dataset.task;
    if let Err(e) = st.rebuild(spec) {
        return engine_error(&e);
    }
    info!("network rebuilt: {:?} {}", st.spec.layer_sizes, st.spec.activation);

    json_response(&StateView::of(&st))
}
