//! Attached devices and the gamepad classification seam.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform-assigned device identifier, stable for one attachment session.
pub type DeviceId = i32;

/// A tracked gamepad.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    /// Display name reported by the host at attach time.
    pub name: String,
}

impl Device {
    pub fn new(id: DeviceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}

/// Decides whether an input device is a gamepad.
///
/// Supplied by the host application; the registry only tracks devices this
/// returns `true` for. Any `Fn(DeviceId) -> bool` closure works:
///
/// ```
/// use padlink::{DeviceRegistry, GamepadClassifier};
///
/// let is_pad = |id: i32| id >= 10;
/// assert!(is_pad.is_gamepad(12));
/// assert!(!is_pad.is_gamepad(3));
///
/// let registry = DeviceRegistry::new(is_pad);
/// assert!(registry.is_empty());
/// ```
pub trait GamepadClassifier: Send + Sync {
    fn is_gamepad(&self, device_id: DeviceId) -> bool;
}

impl<F> GamepadClassifier for F
where
    F: Fn(DeviceId) -> bool + Send + Sync,
{
    fn is_gamepad(&self, device_id: DeviceId) -> bool {
        self(device_id)
    }
}
