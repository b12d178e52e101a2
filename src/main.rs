// Console demo: generate a dataset, train on it, log the loss curve.
//
//   cargo run -- [dataset] [network-spec.json]
//
// `dataset` is one of moons, circles, xor, spirals, sinc, plane (default xor).
// The optional spec file overrides the default `[2, 8, 8, 1]` tanh network;
// its task is forced to match the dataset. Set RUST_LOG=debug for more.
use std::sync::mpsc;

use ferrite_playground::{
    accuracy, metrics::mean_squared_error, train_loop, DatasetKind, Network, NetworkSpec,
    Result, TaskKind, TrainConfig,
};

const STEPS: usize = 1000;
const LEARNING_RATE: f64 = 0.3;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let kind = match args.next() {
        Some(name) => DatasetKind::from_name(&name)?,
        None => DatasetKind::Xor,
    };
    let mut spec = match args.next() {
        Some(path) => NetworkSpec::load_json(&path)?,
        None => NetworkSpec::with_hidden(&[8, 8], "tanh", kind.task()),
    };
    spec.task = kind.task();

    let dataset = kind.generate(100, 0.1, None);
    let mut network = Network::from_spec(&spec)?;

    println!("ferrite-playground: {} ({} points), network {:?}", dataset.name, dataset.len(), spec.layer_sizes);

    let (tx, rx) = mpsc::channel();
    let mut config = TrainConfig::new(STEPS, LEARNING_RATE);
    config.progress_tx = Some(tx);

    let final_loss = train_loop(&mut network, &dataset, &config)?;
    drop(config);

    for stats in rx.iter().filter(|s| s.step % 100 == 0) {
        match stats.accuracy {
            Some(acc) => println!("Step {:>5}: loss = {:.6}, accuracy = {:.2}%", stats.step, stats.loss, acc * 100.0),
            None => println!("Step {:>5}: loss = {:.6}", stats.step, stats.loss),
        }
    }

    match dataset.task {
        TaskKind::Classification => println!("Final loss {:.6}, accuracy {:.2}%", final_loss, accuracy(&network, &dataset) * 100.0),
        TaskKind::Regression => println!("Final loss {:.6}, MSE {:.6}", final_loss, mean_squared_error(&network, &dataset)),
    }
    Ok(())
}
