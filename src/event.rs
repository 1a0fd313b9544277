//! Normalized gamepad events.
//!
//! Every raw sample that survives filtering becomes one flat [`GamepadEvent`].
//! The record is the same for all three sources so the receiving runtime only
//! has to understand one shape:
//!
//! | field       | button                 | analog           | battery          |
//! |-------------|------------------------|------------------|------------------|
//! | `gamepadId` | device id as string    | same             | same             |
//! | `time`      | input timebase (ms)    | input timebase   | wall clock (ms)  |
//! | `type`      | `"button"`             | `"analog"`       | `"battery"`      |
//! | `key`       | key name               | axis name        | `""`             |
//! | `value`     | raw action code        | signed axis value| capacity         |
//!
//! ## Value conventions
//! - **Buttons:** the platform action code, unmodified (`0` down, `1` up).
//! - **Axes:** raw platform value with vertical axes negated. Sticks are
//!   roughly `[-1.0, 1.0]`, triggers `[0.0, 1.0]`.
//! - **Battery:** whatever the host reports; usually a `0.0..=1.0` fraction.

use crate::device::DeviceId;
use crate::error::SinkError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Method name used when forwarding events across the channel.
pub const ON_GAMEPAD_EVENT: &str = "onGamepadEvent";

/// Source category of an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Button,
    Analog,
    Battery,
}

impl EventType {
    pub const fn as_str(self) -> &'static str {
        match self {
            EventType::Button => "button",
            EventType::Analog => "analog",
            EventType::Battery => "battery",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamepadEvent {
    pub gamepad_id: String,
    pub time: i64,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub key: String,
    pub value: f64,
}

impl GamepadEvent {
    pub fn new(
        device_id: DeviceId,
        time: i64,
        event_type: EventType,
        key: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            gamepad_id: device_id.to_string(),
            time,
            event_type,
            key: key.into(),
            value,
        }
    }

    /// Argument map for an `onGamepadEvent` method invocation.
    pub fn to_arguments(&self) -> Result<Value, SinkError> {
        Ok(serde_json::to_value(self)?)
    }
}
