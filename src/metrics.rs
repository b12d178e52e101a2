//! Read-only evaluations of a network against data, and the decision-field
//! sampling renderers paint from.
use serde::{Serialize, Deserialize};

use crate::data::{Bounds, Dataset};
use crate::loss::MseLoss;
use crate::network::Network;

/// Classification threshold on the sigmoid output.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Fraction of points whose thresholded prediction matches the label.
pub fn accuracy(network: &Network, dataset: &Dataset) -> f64 {
    accuracy_on(network, &dataset.inputs(), &dataset.targets())
}

pub fn accuracy_on(network: &Network, inputs: &[(f64, f64)], targets: &[f64]) -> f64 {
    if inputs.is_empty() {
        return 0.0;
    }
    let correct = network.predict_batch(inputs)
        .iter()
        .zip(targets)
        .filter(|&(&p, &t)| (p >= DECISION_THRESHOLD) == (t >= DECISION_THRESHOLD))
        .count();
    correct as f64 / inputs.len() as f64
}

/// Plain MSE of the network's predictions (no 0.5 factor).
pub fn mean_squared_error(network: &Network, dataset: &Dataset) -> f64 {
    MseLoss::mean(&network.predict_batch(&dataset.inputs()), &dataset.targets())
}

/// Predictions over a `resolution × resolution` grid spanning `bounds`,
/// row-major from `(x_min, y_min)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionField {
    pub bounds: Bounds,
    pub resolution: usize,
    pub values: Vec<f64>,
}

impl DecisionField {
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.resolution + col]
    }
}

pub fn predict_grid(network: &Network, bounds: Bounds, resolution: usize) -> DecisionField {
    let resolution = resolution.max(2);
    let span = (resolution - 1) as f64;
    let mut points = Vec::with_capacity(resolution * resolution);
    for row in 0..resolution {
        let y = bounds.y_min + (bounds.y_max - bounds.y_min) * row as f64 / span;
        for col in 0..resolution {
            let x = bounds.x_min + (bounds.x_max - bounds.x_min) * col as f64 / span;
            points.push((x, y));
        }
    }
    DecisionField {
        bounds,
        resolution,
        values: network.predict_batch(&points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationFunction;
    use crate::data::DataPoint;
    use crate::loss::TaskKind;
    use crate::math::Matrix;

    // Logistic regression on x alone: predicts 1 for x > 0.
    fn x_positive() -> Network {
        Network::with_parameters(
            vec![Matrix::from_data(vec![vec![10.0], vec![0.0]])],
            vec![vec![0.0]],
            ActivationFunction::Tanh,
            TaskKind::Classification,
        )
        .unwrap()
    }

    #[test]
    fn accuracy_counts_thresholded_matches() {
        let ds = Dataset::new(
            "probe",
            TaskKind::Classification,
            vec![
                DataPoint::new(1.0, 0.0, 1.0),
                DataPoint::new(-1.0, 0.0, 0.0),
                DataPoint::new(2.0, 5.0, 0.0),
                DataPoint::new(-2.0, 5.0, 0.0),
            ],
        );
        assert_eq!(accuracy(&x_positive(), &ds), 0.75);
        assert_eq!(accuracy_on(&x_positive(), &[], &[]), 0.0);
    }

    #[test]
    fn grid_is_row_major_from_the_lower_corner() {
        let bounds = Bounds { x_min: -1.0, x_max: 1.0, y_min: -1.0, y_max: 1.0 };
        let field = predict_grid(&x_positive(), bounds, 3);
        assert_eq!(field.values.len(), 9);
        assert!(field.at(0, 0) < 0.5);
        assert_eq!(field.at(1, 1), 0.5);
        assert!(field.at(2, 2) > 0.5);
    }
}
