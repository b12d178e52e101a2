use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

use ferrite_playground::data::{plane, xor};
use ferrite_playground::metrics::mean_squared_error;
use ferrite_playground::{
    accuracy, train_loop, ActivationFunction, Dataset, Network, PlaygroundError, TaskKind, TrainConfig,
};

#[test]
fn learns_a_plane() {
    let dataset = plane(100, 0.0, Some(4));
    let mut network = Network::new(&[2, 6, 1], ActivationFunction::Tanh, TaskKind::Regression).unwrap();

    let config = TrainConfig::new(500, 0.2);
    train_loop(&mut network, &dataset, &config).unwrap();

    let mse = mean_squared_error(&network, &dataset);
    assert!(mse < 0.01, "plane MSE too high: {mse}");
}

#[test]
fn learns_xor() {
    let dataset = xor(200, 0.1, Some(7));
    let mut network = Network::new(&[2, 8, 8, 1], ActivationFunction::Tanh, TaskKind::Classification).unwrap();

    let config = TrainConfig::new(2000, 0.3);
    train_loop(&mut network, &dataset, &config).unwrap();

    let acc = accuracy(&network, &dataset);
    assert!(acc > 0.9, "xor accuracy too low: {acc}");
}

#[test]
fn progress_reports_every_step_with_accuracy() {
    let dataset = xor(20, 0.0, Some(2));
    let mut network = Network::new(&[2, 4, 1], ActivationFunction::ReLU, TaskKind::Classification).unwrap();

    let (tx, rx) = mpsc::channel();
    let mut config = TrainConfig::new(12, 0.1);
    config.progress_tx = Some(tx);
    let last = train_loop(&mut network, &dataset, &config).unwrap();
    drop(config);

    let stats: Vec<_> = rx.iter().collect();
    assert_eq!(stats.len(), 12);
    assert_eq!(stats.last().map(|s| s.loss), Some(last));
    assert!(stats.iter().all(|s| s.accuracy.is_some()));
}

#[test]
fn raised_stop_flag_runs_no_steps() {
    let dataset = plane(10, 0.0, Some(1));
    let mut network = Network::new(&[2, 3, 1], ActivationFunction::Tanh, TaskKind::Regression).unwrap();
    let before = network.snapshot();

    let flag = Arc::new(AtomicBool::new(true));
    let mut config = TrainConfig::new(50, 0.1);
    config.stop_flag = Some(flag.clone());
    assert_eq!(train_loop(&mut network, &dataset, &config).unwrap(), 0.0);
    assert_eq!(network.snapshot(), before);
    assert!(flag.load(Ordering::Relaxed));
}

#[test]
fn empty_dataset_fails_the_first_step() {
    let dataset = Dataset::new("empty", TaskKind::Regression, Vec::new());
    let mut network = Network::new(&[2, 3, 1], ActivationFunction::Tanh, TaskKind::Regression).unwrap();
    let before = network.snapshot();

    let err = train_loop(&mut network, &dataset, &TrainConfig::new(5, 0.1)).unwrap_err();
    assert!(matches!(err, PlaygroundError::EmptyBatch));
    assert_eq!(network.snapshot(), before);
}
