use serde::Serialize;

use ferrite_playground::{DataPoint, DatasetParams, NetworkSpec, ParameterSnapshot, TaskKind};

use crate::routes::{json_response, JsonResponse};
use crate::state::{lock, SharedState, StatusSummary, StudioState};

/// Everything a front end needs to redraw: parameters, data and progress.
#[derive(Debug, Serialize)]
pub struct StateView {
    pub spec:         NetworkSpec,
    pub parameters:   ParameterSnapshot,
    pub dataset:      DatasetView,
    pub loss_history: Vec<f64>,
    pub training:     StatusSummary,
}

#[derive(Debug, Serialize)]
pub struct DatasetView {
    pub params: DatasetParams,
    pub name:   String,
    pub task:   TaskKind,
    pub len:    usize,
    pub points: Vec<DataPoint>,
}

impl StateView {
    pub fn of(st: &StudioState) -> StateView {
        StateView {
            spec:       st.spec.clone(),
            parameters: st.network.snapshot(),
            dataset: DatasetView {
                params: st.dataset_params.clone(),
                name:   st.dataset.name.clone(),
                task:   st.dataset.task,
                len:    st.dataset.len(),
                points: st.dataset.points.clone(),
            },
            loss_history: st.loss_history.clone(),
            training:     st.training.summary(),
        }
    }
}

// ---------------------------------------------------------------------------
// GET /state
// ---------------------------------------------------------------------------

pub fn handle_get(state: SharedState) -> JsonResponse {
    let view = StateView::of(&lock(&state));
    json_response(&view)
}
