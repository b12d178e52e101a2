use ferrite_playground::{accuracy, data::xor, ActivationFunction, Network, TaskKind};

fn main() {
    let dataset = xor(200, 0.1, Some(7));
    let mut network = Network::new(&[2, 8, 8, 1], ActivationFunction::Tanh, TaskKind::Classification)
        .expect("valid architecture");

    let inputs = dataset.inputs();
    let targets = dataset.targets();
    let steps = 2000;

    for step in 0..steps {
        let loss = network.step(&inputs, &targets, 0.3).expect("non-empty batch");
        if step % 200 == 0 {
            println!("Step {step}: loss = {loss:.6}");
        }
    }

    println!("Training accuracy: {:.2}%", accuracy(&network, &dataset) * 100.0);
    for &(x, y) in &[(1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)] {
        println!("Input: ({x:>4}, {y:>4}) -> Output: {:.4}", network.predict(x, y));
    }
}
