use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PlaygroundError;
use crate::loss::bce::BceLoss;
use crate::loss::mse::MseLoss;

/// Selects the output squashing and the loss the engine pairs with it.
///
/// - `Classification`: sigmoid output, binary cross-entropy.
/// - `Regression`    : identity output, half squared error.
///
/// Both pairings give `∂loss/∂z_out = yhat - target`, so the backward pass
/// starts from the same error signal either way; only `output()` and `loss()`
/// dispatch on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Classification,
    Regression,
}

impl TaskKind {
    pub fn from_name(name: &str) -> Result<TaskKind, PlaygroundError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "classification" => Ok(TaskKind::Classification),
            "regression" => Ok(TaskKind::Regression),
            _ => Err(PlaygroundError::UnknownTask(name.to_owned())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::Classification => "classification",
            TaskKind::Regression => "regression",
        }
    }

    /// Output-layer activation applied to the final pre-activation.
    pub fn output(&self, z: f64) -> f64 {
        match self {
            TaskKind::Classification => sigmoid(z),
            TaskKind::Regression => z,
        }
    }

    /// Per-sample loss of prediction `yhat` against `target`.
    pub fn loss(&self, yhat: f64, target: f64) -> f64 {
        match self {
            TaskKind::Classification => BceLoss::loss(yhat, target),
            TaskKind::Regression => MseLoss::loss(yhat, target),
        }
    }
}

impl FromStr for TaskKind {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskKind::from_name(s)
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Logistic function that never evaluates `exp` of a large positive number.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_stable_at_extremes() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(800.0) <= 1.0);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(sigmoid(-800.0).is_finite());
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn regression_output_is_identity() {
        assert_eq!(TaskKind::Regression.output(-3.25), -3.25);
    }

    #[test]
    fn names_parse_back() {
        assert_eq!(TaskKind::from_name("Regression").unwrap(), TaskKind::Regression);
        assert_eq!("classification".parse::<TaskKind>().unwrap(), TaskKind::Classification);
        assert!(matches!(
            TaskKind::from_name("ranking"),
            Err(PlaygroundError::UnknownTask(_))
        ));
    }
}
