use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use super::Validate;
use crate::simulation::{DEFAULT_LANE_LENGTH, DEFAULT_TICKS_PER_SECOND};

/// A vehicle arrives on each approach with probability `1 / denominator` per tick.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArrivalsConfig {
    pub denominator: i64,
}

impl Default for ArrivalsConfig {
    fn default() -> Self {
        Self { denominator: 6 }
    }
}

impl ArrivalsConfig {
    pub fn probability(&self) -> f64 {
        1.0 / self.denominator.max(1) as f64
    }
}

impl Validate for ArrivalsConfig {
    fn validate(&self) -> Result<()> {
        if self.denominator <= 0 {
            return Err(anyhow!("Arrival denominator must be positive, got {}", self.denominator));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunConfig {
    pub duration_ticks: u64,
    #[serde(default = "default_ticks_per_second")]
    pub ticks_per_second: u32,
    #[serde(default = "default_lane_length")]
    pub lane_length: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_ticks_per_second() -> u32 {
    DEFAULT_TICKS_PER_SECOND
}

fn default_lane_length() -> usize {
    DEFAULT_LANE_LENGTH
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            duration_ticks: 10_000,
            ticks_per_second: default_ticks_per_second(),
            lane_length: default_lane_length(),
            seed: None,
        }
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        if self.duration_ticks == 0 {
            return Err(anyhow!("Run duration must be positive"));
        }

        if self.ticks_per_second == 0 {
            return Err(anyhow!("Ticks per second must be positive"));
        }

        if self.lane_length == 0 {
            return Err(anyhow!("Lane length must be at least one cell"));
        }

        Ok(())
    }
}
