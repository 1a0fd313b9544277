//! In-memory stand-ins for the host platform.
//!
//! Useful in tests and demos: [`VirtualGamepad`] produces key and motion
//! samples, [`VirtualBattery`] answers battery polls, and [`RecordingSink`]
//! keeps every emitted event.

use crate::axis::Axis;
use crate::device::{Device, DeviceId};
use crate::error::{SampleError, SinkError};
use crate::event::GamepadEvent;
use crate::input::{BatteryProbe, KeyEvent, MotionEvent};
use crate::keycode::{ACTION_DOWN, ACTION_UP};
use crate::sink::EventSink;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

/// A scripted controller.
///
/// Axis state persists between samples, like on real hardware: every motion
/// sample carries the current value of every axis.
#[derive(Debug, Default)]
pub struct VirtualGamepad {
    id: DeviceId,
    name: String,
    clock: i64,
    axes: HashMap<Axis, f32>,
}

impl VirtualGamepad {
    pub fn new(id: DeviceId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn id(&self) -> DeviceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn device(&self) -> Device {
        Device::new(self.id, self.name.clone())
    }

    fn tick(&mut self) -> i64 {
        self.clock += 1;
        self.clock
    }

    pub fn press_button(&mut self, key_code: i32) -> KeyEvent {
        let time = self.tick();
        KeyEvent::new(self.id, time, key_code, ACTION_DOWN)
    }

    pub fn release_button(&mut self, key_code: i32) -> KeyEvent {
        let time = self.tick();
        KeyEvent::new(self.id, time, key_code, ACTION_UP)
    }

    /// Moves one axis and returns the resulting motion sample.
    pub fn set_axis(&mut self, axis: Axis, value: f32) -> MotionEvent {
        self.axes.insert(axis, value);
        self.motion()
    }

    /// Motion sample with the current axis state.
    pub fn motion(&mut self) -> MotionEvent {
        let time = self.tick();
        MotionEvent {
            device_id: self.id,
            time,
            axes: self.axes.clone(),
        }
    }
}

/// Battery readings keyed by device. Devices without a reading fail with
/// [`SampleError::BatteryUnavailable`].
#[derive(Debug, Default)]
pub struct VirtualBattery {
    levels: Mutex<HashMap<DeviceId, f32>>,
}

impl VirtualBattery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, device_id: DeviceId, capacity: f32) {
        self.levels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(device_id, capacity);
    }

    pub fn clear(&self, device_id: DeviceId) {
        self.levels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&device_id);
    }
}

impl BatteryProbe for VirtualBattery {
    fn capacity(&self, device: &Device) -> Result<f32, SampleError> {
        self.levels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&device.id)
            .copied()
            .ok_or(SampleError::BatteryUnavailable(device.id))
    }
}

/// Sink that stores everything it receives.
///
/// Can be switched into a failing mode to exercise error isolation.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<GamepadEvent>>,
    failing: AtomicBool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, `emit` rejects events without recording them.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn events(&self) -> Vec<GamepadEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&self) -> Vec<GamepadEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &GamepadEvent) -> Result<(), SinkError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SinkError::Rejected("recording sink set to fail".into()));
        }
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }
}
