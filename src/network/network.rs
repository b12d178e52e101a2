use log::{debug, trace};

use crate::activation::ActivationFunction;
use crate::error::{PlaygroundError, Result};
use crate::layers::Layer;
use crate::loss::TaskKind;
use crate::math::Matrix;
use crate::network::snapshot::ParameterSnapshot;
use crate::network::spec::NetworkSpec;
use crate::network::trace::{ForwardTrace, GradientSet};
use crate::optim::Sgd;

/// Input dimension: every sample is an `(x, y)` point.
pub const INPUT_SIZE: usize = 2;
/// Output dimension: one score (probability or regression value).
pub const OUTPUT_SIZE: usize = 1;

/// The numeric engine: owns one parameter stack and nothing else.
///
/// Parameters change only through `initialize` / `reinitialize` (full
/// rebuild) and `step` (every entry replaced at once). Readers get shared
/// borrows or an owned `ParameterSnapshot`.
#[derive(Debug, Clone)]
pub struct Network {
    sizes: Vec<usize>,
    layers: Vec<Layer>,
    activation: ActivationFunction,
    task: TaskKind,
}

impl Network {
    /// Builds a network with freshly drawn parameters.
    pub fn new(sizes: &[usize], activation: ActivationFunction, task: TaskKind) -> Result<Network> {
        validate_sizes(sizes)?;
        Ok(Network {
            sizes: sizes.to_vec(),
            layers: build_layers(sizes),
            activation,
            task,
        })
    }

    /// Builds a network from a descriptor, resolving the activation by name.
    pub fn from_spec(spec: &NetworkSpec) -> Result<Network> {
        let activation = ActivationFunction::from_name(&spec.activation)?;
        Network::new(&spec.layer_sizes, activation, spec.task)
    }

    /// Builds a network around caller-chosen parameters, e.g. to reproduce a
    /// worked example. Shapes must chain `[2, …, 1]`.
    pub fn with_parameters(
        weights: Vec<Matrix>,
        biases: Vec<Vec<f64>>,
        activation: ActivationFunction,
        task: TaskKind,
    ) -> Result<Network> {
        if weights.len() != biases.len() {
            return Err(PlaygroundError::InvalidArchitecture(format!(
                "{} weight matrices but {} bias vectors",
                weights.len(),
                biases.len()
            )));
        }
        let mut sizes = vec![weights.first().map(|w| w.rows).unwrap_or(0)];
        for (l, (w, b)) in weights.iter().zip(&biases).enumerate() {
            if w.rows != sizes[l] || w.cols != b.len() || w.data.iter().any(|row| row.len() != w.cols) {
                return Err(PlaygroundError::InvalidArchitecture(format!(
                    "layer {l}: weights {}x{} do not chain with {} inputs and {} biases",
                    w.rows, w.cols, sizes[l], b.len()
                )));
            }
            sizes.push(w.cols);
        }
        validate_sizes(&sizes)?;
        let layers = weights.into_iter()
            .zip(biases)
            .map(|(weights, biases)| Layer { weights, biases })
            .collect();
        Ok(Network { sizes, layers, activation, task })
    }

    /// Discards every parameter and draws a new set for `sizes`. Validation
    /// happens before anything is allocated; on error the network is intact.
    pub fn initialize(&mut self, sizes: &[usize]) -> Result<()> {
        validate_sizes(sizes)?;
        self.layers = build_layers(sizes);
        self.sizes = sizes.to_vec();
        debug!("initialized network {:?} ({}, {})", self.sizes, self.activation, self.task);
        Ok(())
    }

    /// Rebuilds sizes, activation and task from a descriptor in one go.
    pub fn reinitialize(&mut self, spec: &NetworkSpec) -> Result<()> {
        *self = Network::from_spec(spec)?;
        debug!("reinitialized network {:?} ({}, {})", self.sizes, self.activation, self.task);
        Ok(())
    }

    /// Runs one `(x, y)` point through the stack. Reads parameters only.
    pub fn forward(&self, x: f64, y: f64) -> ForwardTrace {
        let mut activations = Vec::with_capacity(self.layers.len() + 1);
        let mut pre_activations = Vec::with_capacity(self.layers.len());
        activations.push(vec![x, y]);

        let last = self.layers.len() - 1;
        for (l, layer) in self.layers.iter().enumerate() {
            let z = layer.pre_activation(&activations[l]);
            let a = if l == last {
                z.iter().map(|&v| self.task.output(v)).collect()
            } else {
                z.iter().map(|&v| self.activation.function(v)).collect()
            };
            pre_activations.push(z);
            activations.push(a);
        }

        let yhat = activations[last + 1][0];
        ForwardTrace { activations, pre_activations, yhat }
    }

    pub fn predict(&self, x: f64, y: f64) -> f64 {
        self.forward(x, y).yhat
    }

    pub fn predict_batch(&self, points: &[(f64, f64)]) -> Vec<f64> {
        points.iter().map(|&(x, y)| self.predict(x, y)).collect()
    }

    /// Batch-averaged loss and gradients by backpropagation.
    ///
    /// The output error is `yhat - target` for both task kinds; hidden errors
    /// are `delta[l][i] = act'(z[l][i]) · Σ_j delta[l+1][j]·W[l+1][i][j]`.
    pub fn compute_batch_gradients(&self, points: &[(f64, f64)], targets: &[f64]) -> Result<GradientSet> {
        validate_batch(points, targets)?;

        let mut gradients = GradientSet::zeros_like(&self.layers);
        for (&(x, y), &target) in points.iter().zip(targets) {
            let trace = self.forward(x, y);
            gradients.loss += self.task.loss(trace.yhat, target);

            let mut delta = vec![trace.yhat - target];
            for l in (0..self.layers.len()).rev() {
                gradients.accumulate(l, &trace.activations[l], &delta);
                if l > 0 {
                    delta = self.layers[l].back_propagate(&delta)
                        .into_iter()
                        .zip(&trace.pre_activations[l - 1])
                        .map(|(back, &z)| back * self.activation.derivative(z))
                        .collect();
                }
            }
        }

        gradients.scale(1.0 / points.len() as f64);
        Ok(gradients)
    }

    /// One gradient-descent update over the whole batch; returns the batch
    /// loss measured before the update. Fails without touching parameters on
    /// an empty/mismatched batch or a bad learning rate.
    pub fn step(&mut self, points: &[(f64, f64)], targets: &[f64], learning_rate: f64) -> Result<f64> {
        let optimizer = Sgd::new(learning_rate)?;
        let gradients = self.compute_batch_gradients(points, targets)?;

        let updated: Vec<Layer> = self.layers.iter()
            .zip(gradients.weights.iter().zip(&gradients.biases))
            .map(|(layer, (w_grad, b_grad))| optimizer.step(layer, w_grad, b_grad))
            .collect();
        self.layers = updated;

        trace!("step lr={learning_rate} loss={:.6}", gradients.loss);
        Ok(gradients.loss)
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn weights(&self, layer: usize) -> Option<&Matrix> {
        self.layers.get(layer).map(|l| &l.weights)
    }

    pub fn biases(&self, layer: usize) -> Option<&[f64]> {
        self.layers.get(layer).map(|l| l.biases.as_slice())
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    pub fn task(&self) -> TaskKind {
        self.task
    }

    pub fn snapshot(&self) -> ParameterSnapshot {
        ParameterSnapshot {
            layer_sizes: self.sizes.clone(),
            weights: self.layers.iter().map(|l| l.weights.data.clone()).collect(),
            biases: self.layers.iter().map(|l| l.biases.clone()).collect(),
            activation: self.activation,
            task: self.task,
        }
    }
}

fn validate_sizes(sizes: &[usize]) -> Result<()> {
    if sizes.len() < 2 {
        return Err(PlaygroundError::InvalidArchitecture(format!(
            "need at least an input and an output layer, got {} size(s)",
            sizes.len()
        )));
    }
    if let Some(pos) = sizes.iter().position(|&s| s < 1) {
        return Err(PlaygroundError::InvalidArchitecture(format!(
            "layer {pos} has size 0"
        )));
    }
    if sizes[0] != INPUT_SIZE || sizes[sizes.len() - 1] != OUTPUT_SIZE {
        return Err(PlaygroundError::InvalidArchitecture(format!(
            "sizes must start with {INPUT_SIZE} and end with {OUTPUT_SIZE}, got {sizes:?}"
        )));
    }
    Ok(())
}

fn validate_batch(points: &[(f64, f64)], targets: &[f64]) -> Result<()> {
    if points.is_empty() {
        return Err(PlaygroundError::EmptyBatch);
    }
    if points.len() != targets.len() {
        return Err(PlaygroundError::BatchLengthMismatch {
            points: points.len(),
            targets: targets.len(),
        });
    }
    Ok(())
}

fn build_layers(sizes: &[usize]) -> Vec<Layer> {
    sizes.windows(2)
        .map(|pair| Layer::new(pair[1], pair[0]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Hidden weights stored (fan_in, fan_out): neuron 0 sees (1, -1), neuron 1
    // sees (0.5, 0.5).
    fn worked_example() -> Network {
        Network::with_parameters(
            vec![
                Matrix::from_data(vec![vec![1.0, 0.5], vec![-1.0, 0.5]]),
                Matrix::from_data(vec![vec![1.0], vec![1.0]]),
            ],
            vec![vec![0.0, 0.0], vec![0.0]],
            ActivationFunction::Tanh,
            TaskKind::Regression,
        )
        .unwrap()
    }

    #[test]
    fn shapes_follow_sizes() {
        let sizes = [2, 5, 3, 1];
        let net = Network::new(&sizes, ActivationFunction::ReLU, TaskKind::Classification).unwrap();
        assert_eq!(net.layers().len(), 3);
        for l in 0..3 {
            assert_eq!(net.weights(l).unwrap().shape(), (sizes[l], sizes[l + 1]));
            assert_eq!(net.biases(l).unwrap().len(), sizes[l + 1]);
        }
        assert!(net.weights(3).is_none());
    }

    #[test]
    fn invalid_architectures_are_rejected() {
        for sizes in [vec![], vec![2], vec![2, 0, 1], vec![3, 4, 1], vec![2, 4, 2]] {
            let err = Network::new(&sizes, ActivationFunction::Tanh, TaskKind::Regression).unwrap_err();
            assert!(matches!(err, PlaygroundError::InvalidArchitecture(_)), "{sizes:?}");
        }
        assert!(Network::new(&[2, 1], ActivationFunction::Tanh, TaskKind::Regression).is_ok());
    }

    #[test]
    fn failed_initialize_keeps_parameters() {
        let mut net = Network::new(&[2, 3, 1], ActivationFunction::Tanh, TaskKind::Regression).unwrap();
        let before = net.snapshot();
        assert!(net.initialize(&[2, 0, 1]).is_err());
        assert_eq!(net.snapshot(), before);
    }

    #[test]
    fn initialize_replaces_whole_stack() {
        let mut net = Network::new(&[2, 3, 1], ActivationFunction::Tanh, TaskKind::Regression).unwrap();
        net.initialize(&[2, 4, 4, 1]).unwrap();
        assert_eq!(net.sizes(), &[2, 4, 4, 1]);
        assert_eq!(net.layers().len(), 3);
        assert_eq!(net.weights(1).unwrap().shape(), (4, 4));
    }

    #[test]
    fn worked_forward_example() {
        let trace = worked_example().forward(1.0, 0.0);
        assert_eq!(trace.pre_activations[0], vec![1.0, 0.5]);
        assert_eq!(trace.activations[1], vec![1.0_f64.tanh(), 0.5_f64.tanh()]);
        assert_eq!(trace.yhat, 1.0_f64.tanh() + 0.5_f64.tanh());
        assert_eq!(trace.activations.len(), 3);
        assert_eq!(trace.pre_activations.len(), 2);
    }

    #[test]
    fn classification_output_is_a_probability() {
        let net = Network::new(&[2, 4, 1], ActivationFunction::ReLU, TaskKind::Classification).unwrap();
        for &(x, y) in &[(0.0, 0.0), (50.0, -50.0), (-1e3, 1e3)] {
            let p = net.predict(x, y);
            assert!((0.0..=1.0).contains(&p), "{p}");
        }
    }

    #[test]
    fn empty_batch_is_rejected_without_mutation() {
        let mut net = Network::new(&[2, 3, 1], ActivationFunction::Tanh, TaskKind::Classification).unwrap();
        let before = net.snapshot();
        assert!(matches!(net.compute_batch_gradients(&[], &[]), Err(PlaygroundError::EmptyBatch)));
        assert!(matches!(net.step(&[], &[], 0.1), Err(PlaygroundError::EmptyBatch)));
        assert_eq!(net.snapshot(), before);
    }

    #[test]
    fn mismatched_batch_and_bad_rate_are_rejected() {
        let mut net = worked_example();
        let before = net.snapshot();
        assert!(matches!(
            net.step(&[(0.0, 0.0)], &[1.0, 2.0], 0.1),
            Err(PlaygroundError::BatchLengthMismatch { points: 1, targets: 2 })
        ));
        assert!(matches!(
            net.step(&[(0.0, 0.0)], &[1.0], 0.0),
            Err(PlaygroundError::InvalidLearningRate(_))
        ));
        assert_eq!(net.snapshot(), before);
    }

    #[test]
    fn output_delta_is_prediction_error() {
        // With a single-layer regression net the bias gradient is exactly
        // the mean of (yhat - target).
        let net = Network::with_parameters(
            vec![Matrix::from_data(vec![vec![0.5], vec![-0.25]])],
            vec![vec![0.1]],
            ActivationFunction::Tanh,
            TaskKind::Regression,
        )
        .unwrap();
        let points = [(1.0, 2.0), (-1.0, 0.0)];
        let targets = [1.0, -1.0];
        let grads = net.compute_batch_gradients(&points, &targets).unwrap();
        let errors: Vec<f64> = points.iter().zip(&targets)
            .map(|(&(x, y), t)| net.predict(x, y) - t)
            .collect();
        let mean_error = errors.iter().sum::<f64>() / 2.0;
        assert!((grads.biases[0][0] - mean_error).abs() < 1e-12);
        let expected_loss = errors.iter().map(|e| 0.5 * e * e).sum::<f64>() / 2.0;
        assert!((grads.loss - expected_loss).abs() < 1e-12);
    }

    #[test]
    fn step_returns_pre_update_loss_and_moves_parameters() {
        let mut net = worked_example();
        let points = [(1.0, 0.0), (0.0, 1.0)];
        let targets = [0.0, 0.5];
        let expected = net.compute_batch_gradients(&points, &targets).unwrap().loss;
        let before = net.snapshot();
        let loss = net.step(&points, &targets, 0.1).unwrap();
        assert_eq!(loss, expected);
        assert_ne!(net.snapshot(), before);
        let after = net.compute_batch_gradients(&points, &targets).unwrap().loss;
        assert!(after < loss);
    }

    #[test]
    fn reinitialize_switches_task_and_activation() {
        let mut net = worked_example();
        net.reinitialize(&NetworkSpec::with_hidden(&[6], "relu", TaskKind::Classification)).unwrap();
        assert_eq!(net.sizes(), &[2, 6, 1]);
        assert_eq!(net.activation(), ActivationFunction::ReLU);
        assert_eq!(net.task(), TaskKind::Classification);

        let err = net.reinitialize(&NetworkSpec::with_hidden(&[6], "swish", TaskKind::Regression));
        assert!(matches!(err, Err(PlaygroundError::UnknownActivation(_))));
        assert_eq!(net.task(), TaskKind::Classification);
    }
}
