use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use ferrite_playground::{DatasetParams, NetworkSpec, Result};

/// Env var consulted when no config path is passed on the command line.
pub const CONFIG_ENV: &str = "PLAYGROUND_CONFIG";

/// Startup configuration for the studio. Every field is optional in the JSON
/// file; missing ones fall back to `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub addr: String,
    pub dataset: DatasetParams,
    pub network: NetworkSpec,
    pub learning_rate: f64,
    pub steps: usize,
    pub grid_resolution: usize,
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            addr: "127.0.0.1:7878".to_owned(),
            dataset: DatasetParams::default(),
            network: NetworkSpec::default(),
            learning_rate: 0.03,
            steps: 500,
            grid_resolution: 50,
        }
    }
}

impl StudioConfig {
    /// Reads the file named by the first CLI argument, else by
    /// `PLAYGROUND_CONFIG`, else returns the defaults.
    pub fn load() -> Result<StudioConfig> {
        let path = std::env::args()
            .nth(1)
            .or_else(|| std::env::var(CONFIG_ENV).ok());
        match path {
            Some(path) => StudioConfig::from_file(&path),
            None => Ok(StudioConfig::default()),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<StudioConfig> {
        let file = std::fs::File::open(path.as_ref())?;
        let config: StudioConfig = serde_json::from_reader(std::io::BufReader::new(file))?;
        info!("loaded studio config from {}", path.as_ref().display());
        Ok(config)
    }
}
