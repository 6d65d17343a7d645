use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use super::Validate;

/// Light timings as entered by the user, in seconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignalsConfig {
    pub green_ns_seconds: i64,
    pub green_ew_seconds: i64,
    #[serde(default = "default_yellow_seconds")]
    pub yellow_seconds: i64,
}

fn default_yellow_seconds() -> i64 {
    1
}

impl Default for SignalsConfig {
    fn default() -> Self {
        Self {
            green_ns_seconds: 30,
            green_ew_seconds: 30,
            yellow_seconds: default_yellow_seconds(),
        }
    }
}

impl SignalsConfig {
    pub fn green_ns_ticks(&self, ticks_per_second: u32) -> u32 {
        seconds_to_ticks(self.green_ns_seconds, ticks_per_second)
    }

    pub fn green_ew_ticks(&self, ticks_per_second: u32) -> u32 {
        seconds_to_ticks(self.green_ew_seconds, ticks_per_second)
    }

    pub fn yellow_ticks(&self, ticks_per_second: u32) -> u32 {
        seconds_to_ticks(self.yellow_seconds, ticks_per_second)
    }
}

/// Never less than one tick, saturating at `u32::MAX`.
pub fn seconds_to_ticks(seconds: i64, ticks_per_second: u32) -> u32 {
    let ticks = seconds.saturating_mul(ticks_per_second as i64).max(1);
    u32::try_from(ticks).unwrap_or(u32::MAX)
}

impl Validate for SignalsConfig {
    fn validate(&self) -> Result<()> {
        if self.green_ns_seconds <= 0 {
            return Err(anyhow!("North/south green time must be positive, got {}s", self.green_ns_seconds));
        }

        if self.green_ew_seconds <= 0 {
            return Err(anyhow!("East/west green time must be positive, got {}s", self.green_ew_seconds));
        }

        if self.yellow_seconds <= 0 {
            return Err(anyhow!("Yellow time must be positive, got {}s", self.yellow_seconds));
        }

        Ok(())
    }
}
