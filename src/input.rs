//! Raw samples delivered by the host.
//!
//! These are the input collaborators: the host wraps its platform objects in
//! [`KeyEvent`], a [`MotionSample`] implementation and a [`BatteryProbe`].
//! `time` values are in the platform input timebase (milliseconds).

use crate::axis::Axis;
use crate::device::{Device, DeviceId};
use crate::error::SampleError;
use std::collections::HashMap;
use std::sync::Arc;

/// A key press/release as delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub device_id: DeviceId,
    pub time: i64,
    pub key_code: i32,
    /// Platform action code, see [`crate::keycode::ACTION_DOWN`] and friends.
    pub action: i32,
}

impl KeyEvent {
    pub fn new(device_id: DeviceId, time: i64, key_code: i32, action: i32) -> Self {
        Self {
            device_id,
            time,
            key_code,
            action,
        }
    }
}

/// A motion sample that can be queried per axis.
pub trait MotionSample {
    fn device_id(&self) -> DeviceId;

    fn event_time(&self) -> i64;

    /// Current raw value of `axis`.
    ///
    /// An error spoils that axis for this sample only.
    fn axis_value(&self, axis: Axis) -> Result<f32, SampleError>;
}

/// Owned motion sample.
///
/// Axes never set read as `0.0`, which is what the platform reports for axes a
/// device does not have.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MotionEvent {
    pub device_id: DeviceId,
    pub time: i64,
    pub axes: HashMap<Axis, f32>,
}

impl MotionEvent {
    pub fn new(device_id: DeviceId, time: i64) -> Self {
        Self {
            device_id,
            time,
            axes: HashMap::new(),
        }
    }

    pub fn with_axis(mut self, axis: Axis, value: f32) -> Self {
        self.axes.insert(axis, value);
        self
    }
}

impl MotionSample for MotionEvent {
    fn device_id(&self) -> DeviceId {
        self.device_id
    }

    fn event_time(&self) -> i64 {
        self.time
    }

    fn axis_value(&self, axis: Axis) -> Result<f32, SampleError> {
        Ok(self.axes.get(&axis).copied().unwrap_or(0.0))
    }
}

/// Reads the current battery capacity of a device for the periodic poll.
///
/// The returned capacity is passed through untouched; on most hosts it is a
/// `0.0..=1.0` fraction.
pub trait BatteryProbe: Send + Sync {
    fn capacity(&self, device: &Device) -> Result<f32, SampleError>;
}

impl<T: BatteryProbe + ?Sized> BatteryProbe for Arc<T> {
    fn capacity(&self, device: &Device) -> Result<f32, SampleError> {
        (**self).capacity(device)
    }
}
