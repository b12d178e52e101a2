use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PlaygroundError;

/// Hidden-layer activations. The output layer never goes through this
/// registry; its squashing is decided by the task kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationFunction {
    Tanh,
    ReLU,
}

impl ActivationFunction {
    /// Every registered activation, in display order.
    pub const ALL: [ActivationFunction; 2] = [ActivationFunction::Tanh, ActivationFunction::ReLU];

    /// Looks an activation up by its registry name.
    pub fn from_name(name: &str) -> Result<ActivationFunction, PlaygroundError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "tanh" => Ok(ActivationFunction::Tanh),
            "relu" => Ok(ActivationFunction::ReLU),
            _ => Err(PlaygroundError::UnknownActivation(name.to_owned())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActivationFunction::Tanh => "tanh",
            ActivationFunction::ReLU => "relu",
        }
    }

    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
        }
    }

    /// Derivative evaluated at the pre-activation `x`, not at `function(x)`.
    /// ReLU's subgradient at 0 is fixed to 0.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
        }
    }
}

impl FromStr for ActivationFunction {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivationFunction::from_name(s)
    }
}

impl fmt::Display for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
