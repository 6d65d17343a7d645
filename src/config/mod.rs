use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::simulation::EngineParams;

pub mod signals;
pub mod traffic;

pub use signals::*;
pub use traffic::*;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SimulationConfig {
    pub signals: SignalsConfig,
    pub arrivals: ArrivalsConfig,
    pub run: RunConfig,
}

impl SimulationConfig {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading configuration file {}", path))?;
        Self::from_toml_str(&content).with_context(|| format!("loading configuration from {}", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;

        // Validate configurations
        config.run.validate()?;
        config.signals.validate()?;
        config.arrivals.validate()?;

        Ok(config)
    }

    /// Convert the user-facing units (seconds, 1-in-n arrivals) into engine ticks.
    pub fn engine_params(&self) -> EngineParams {
        let tps = self.run.ticks_per_second;
        let mut params = EngineParams::new(
            self.signals.green_ns_ticks(tps),
            self.signals.green_ew_ticks(tps),
            self.arrivals.probability(),
            self.run.duration_ticks,
        )
        .with_yellow_ticks(self.signals.yellow_ticks(tps))
        .with_lane_length(self.run.lane_length);

        if let Some(seed) = self.run.seed {
            params = params.with_seed(seed);
        }
        params
    }
}

pub trait Validate {
    fn validate(&self) -> Result<()>;
}
