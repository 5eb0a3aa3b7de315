use super::traits::ConfigSection;
use crate::error::MemnavError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotConfig {
    pub host: String,
    pub port: u16,
    /// Settling delay around plain commands, seconds.
    pub command_delay_s: f64,
    /// Settling delay bracketing each sensor read, seconds.
    pub sensor_delay_s: f64,
    /// Settling delay after a motion window, seconds.
    pub movement_delay_s: f64,
    /// The original controller passed the configured right-wheel speed into
    /// the service's left-speed slot and vice versa. `true` preserves that
    /// observed behavior; `false` sends the speeds straight through.
    pub swap_wheel_order: bool,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 40404,
            command_delay_s: 0.5,
            sensor_delay_s: 0.7,
            movement_delay_s: 1.0,
            swap_wheel_order: true,
        }
    }
}

impl ConfigSection for RobotConfig {
    fn section_name() -> &'static str {
        "robot"
    }

    fn validate(&self) -> Result<(), MemnavError> {
        if self.host.is_empty() {
            return Err(MemnavError::Configuration(
                "Robot host must not be empty".to_string(),
            ));
        }
        if self.command_delay_s < 0.0 || self.sensor_delay_s < 0.0 || self.movement_delay_s < 0.0 {
            return Err(MemnavError::Configuration(
                "Settling delays must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}
