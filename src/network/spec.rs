use serde::{Serialize, Deserialize};

use crate::activation::ActivationFunction;
use crate::error::Result;
use crate::loss::TaskKind;

/// Architecture descriptor: everything `initialize` needs to build a fresh
/// parameter set.
///
/// Fields:
/// - `layer_sizes`: `[2, h1, …, hk, 1]`
/// - `activation` : registry name of the hidden-layer activation; kept as a
///                   string so unknown names surface as `UnknownActivation`
///                   when the network is built
/// - `task`       : classification (sigmoid + BCE) or regression
///                   (identity + squared error)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub layer_sizes: Vec<usize>,
    #[serde(default = "default_activation")]
    pub activation: String,
    pub task: TaskKind,
}

fn default_activation() -> String {
    ActivationFunction::Tanh.name().to_owned()
}

impl NetworkSpec {
    pub fn new(layer_sizes: Vec<usize>, activation: &str, task: TaskKind) -> NetworkSpec {
        NetworkSpec {
            layer_sizes,
            activation: activation.to_owned(),
            task,
        }
    }

    /// `[2, hidden..., 1]`
    pub fn with_hidden(hidden: &[usize], activation: &str, task: TaskKind) -> NetworkSpec {
        let mut layer_sizes = Vec::with_capacity(hidden.len() + 2);
        layer_sizes.push(2);
        layer_sizes.extend_from_slice(hidden);
        layer_sizes.push(1);
        NetworkSpec::new(layer_sizes, activation, task)
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl Default for NetworkSpec {
    fn default() -> Self {
        NetworkSpec::with_hidden(&[4, 2], "tanh", TaskKind::Classification)
    }
}
