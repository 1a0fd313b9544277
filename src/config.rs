//! Runtime settings.
//!
//! Every field has a default, so an empty TOML document is valid:
//!
//! ```toml
//! battery_poll_interval_ms = 5000
//! axis_epsilon = 0.001
//! channel_name = "xyz.luan/gamepads"
//! ```

use crate::error::BridgeError;
use crate::normalizer::AXIS_EPSILON;
use crate::poller::BATTERY_POLL_INTERVAL;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default method channel name.
pub const DEFAULT_CHANNEL_NAME: &str = "xyz.luan/gamepads";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Period of the battery re-poll, in milliseconds.
    pub battery_poll_interval_ms: u64,
    /// Smallest axis change that is reported again.
    pub axis_epsilon: f64,
    /// Name of the method channel events are forwarded on.
    pub channel_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            battery_poll_interval_ms: BATTERY_POLL_INTERVAL.as_millis() as u64,
            axis_epsilon: AXIS_EPSILON,
            channel_name: DEFAULT_CHANNEL_NAME.to_string(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(s: &str) -> Result<Self, BridgeError> {
        let settings: Settings = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, BridgeError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.battery_poll_interval_ms == 0 {
            return Err(BridgeError::InvalidConfig(
                "battery_poll_interval_ms must be greater than zero".into(),
            ));
        }
        if !self.axis_epsilon.is_finite() || self.axis_epsilon < 0.0 {
            return Err(BridgeError::InvalidConfig(format!(
                "axis_epsilon must be a finite non-negative number, got {}",
                self.axis_epsilon
            )));
        }
        Ok(())
    }

    pub fn battery_poll_interval(&self) -> Duration {
        Duration::from_millis(self.battery_poll_interval_ms)
    }
}
