use std::sync::{Arc, Mutex, MutexGuard, PoisonError, atomic::AtomicBool, mpsc};

use log::info;
use serde::Serialize;

use ferrite_playground::{Dataset, DatasetParams, Network, NetworkSpec, Result, StepStats};

use crate::config::StudioConfig;

// ---------------------------------------------------------------------------
// Training status
// ---------------------------------------------------------------------------

pub enum TrainingStatus {
    /// No run has been started since the last rebuild.
    Idle,
    /// A cooperative loop is running in a background thread.
    Running {
        stop_flag:   Arc<AtomicBool>,
        step_rx:     Arc<Mutex<mpsc::Receiver<StepStats>>>,
        total_steps: usize,
    },
    /// The run ended, either after all steps or because Stop was pressed.
    Done {
        steps_completed:  usize,
        elapsed_total_ms: u64,
        was_stopped:      bool,
    },
    /// A step returned an error.
    Failed {
        reason: String,
    },
}

impl TrainingStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, TrainingStatus::Running { .. })
    }

    pub fn summary(&self) -> StatusSummary {
        match self {
            TrainingStatus::Idle => StatusSummary::Idle,
            TrainingStatus::Running { total_steps, .. } => StatusSummary::Running { total_steps: *total_steps },
            TrainingStatus::Done { steps_completed, elapsed_total_ms, was_stopped } => StatusSummary::Done {
                steps_completed:  *steps_completed,
                elapsed_total_ms: *elapsed_total_ms,
                was_stopped:      *was_stopped,
            },
            TrainingStatus::Failed { reason } => StatusSummary::Failed { reason: reason.clone() },
        }
    }
}

/// Serializable view of `TrainingStatus` (without the channel handles).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StatusSummary {
    Idle,
    Running { total_steps: usize },
    Done { steps_completed: usize, elapsed_total_ms: u64, was_stopped: bool },
    Failed { reason: String },
}

// ---------------------------------------------------------------------------
// Main state struct
// ---------------------------------------------------------------------------

pub struct StudioState {
    /// Startup configuration; source of training defaults.
    pub config:         StudioConfig,
    /// Parameters the current dataset was generated from.
    pub dataset_params: DatasetParams,
    pub dataset:        Dataset,
    /// Architecture the current network was built from.
    pub spec:           NetworkSpec,
    pub network:        Network,
    /// Current training lifecycle state.
    pub training:       TrainingStatus,
    /// Per-step losses since the network was last (re)initialized.
    pub loss_history:   Vec<f64>,
}

impl StudioState {
    /// Builds the initial dataset and network from `config`. The network's
    /// task always follows the dataset's.
    pub fn new(config: StudioConfig) -> Result<StudioState> {
        let dataset_params = config.dataset.clone();
        let dataset = dataset_params.generate();
        let mut spec = config.network.clone();
        spec.task = dataset.task;
        let network = Network::from_spec(&spec)?;
        info!("studio state: {} ({} points), layers {:?}", dataset.name, dataset.len(), spec.layer_sizes);

        Ok(StudioState {
            config,
            dataset_params,
            dataset,
            spec,
            network,
            training: TrainingStatus::Idle,
            loss_history: Vec::new(),
        })
    }

    /// Reinitializes the network from `spec`. On error the previous network
    /// and spec are kept.
    pub fn rebuild(&mut self, spec: NetworkSpec) -> Result<()> {
        self.network.reinitialize(&spec)?;
        self.spec = spec;
        self.loss_history.clear();
        self.training = TrainingStatus::Idle;
        Ok(())
    }
}

/// Shared state type: an `Arc<Mutex<StudioState>>` passed to every handler.
pub type SharedState = Arc<Mutex<StudioState>>;

/// Locks the shared state. A panicked handler cannot leave the network
/// half-updated (steps replace parameters atomically), so poisoning is ignored.
pub fn lock(state: &SharedState) -> MutexGuard<'_, StudioState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrite_playground::{DatasetKind, TaskKind};

    #[test]
    fn initial_network_follows_dataset_task() {
        let mut config = StudioConfig::default();
        config.dataset.kind = DatasetKind::Plane;
        let st = StudioState::new(config).unwrap();
        assert_eq!(st.spec.task, TaskKind::Regression);
        assert_eq!(st.network.task(), TaskKind::Regression);
    }

    #[test]
    fn failed_rebuild_keeps_previous_network() {
        let mut st = StudioState::new(StudioConfig::default()).unwrap();
        st.loss_history.push(0.7);
        let before = st.network.snapshot();
        let bad = NetworkSpec::new(vec![2, 0, 1], "tanh", TaskKind::Classification);
        assert!(st.rebuild(bad).is_err());
        assert_eq!(st.network.snapshot(), before);
        assert_eq!(st.loss_history, vec![0.7]);
    }
}
