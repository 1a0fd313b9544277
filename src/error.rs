//! Error types.
//!
//! Nothing in the event path is fatal. A [`SampleError`] or [`SinkError`] spoils
//! exactly one emission; callers log it and move on. [`BridgeError`] is what the
//! fallible setup surface (settings, poller start) returns.

use crate::axis::Axis;
use crate::device::DeviceId;

/// Failure to read a raw sample from the host platform.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleError {
    /// The device went away between notification and read.
    #[error("device {0} is no longer available")]
    DeviceGone(DeviceId),

    /// The motion source could not report a value for this axis.
    #[error("axis {axis:?} unavailable on device {device_id}")]
    AxisUnavailable { device_id: DeviceId, axis: Axis },

    /// The device does not expose a battery state (or it could not be read).
    #[error("battery state unavailable on device {0}")]
    BatteryUnavailable(DeviceId),

    #[error("{0}")]
    Other(String),
}

/// The output collaborator refused an event.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The receiving side is gone (channel closed, engine detached).
    #[error("event sink closed")]
    Closed,

    #[error("event rejected: {0}")]
    Rejected(String),

    #[error("failed to encode event arguments: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Crate-level errors returned by setup and lifecycle calls.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("failed to parse settings: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings: {0}")]
    InvalidConfig(String),

    /// Battery polling needs a tokio runtime to schedule on.
    #[error("no tokio runtime available to run the battery poller")]
    NoRuntime,

    #[error(transparent)]
    Sample(#[from] SampleError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}
