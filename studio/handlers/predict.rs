use ferrite_playground::predict_grid;

use crate::routes::{json_response, JsonResponse};
use crate::state::{lock, SharedState};
use crate::util::query::{parse_query, query_get};

/// Upper bound on the grid side length.
const MAX_RESOLUTION: usize = 200;
/// Margin around the data when framing the field.
const PADDING: f64 = 0.5;

// ---------------------------------------------------------------------------
// GET /predict?resolution=N
// ---------------------------------------------------------------------------

/// Samples the decision field over the dataset's padded bounds. Allowed while
/// training runs; the lock is held across the whole grid so the field comes
/// from one parameter set.
pub fn handle_get(query: &str, state: SharedState) -> JsonResponse {
    let pairs = parse_query(query);
    let st = lock(&state);
    let resolution = query_get::<usize>(&pairs, "resolution")
        .unwrap_or(st.config.grid_resolution)
        .clamp(2, MAX_RESOLUTION);

    let field = predict_grid(&st.network, st.dataset.bounds(PADDING), resolution);
    drop(st);
    json_response(&field)
}
