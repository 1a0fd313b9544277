//! Raw sample → [`GamepadEvent`] conversion.
//!
//! Buttons and battery samples always produce exactly one event. Motion samples
//! go through the axis table: each axis is inverted if configured and compared
//! with the last value reported for it. Changes smaller than the epsilon are
//! dropped to keep analog jitter off the channel.
//!
//! The first sample for an axis is always reported, whatever its magnitude:
//! there is no previous value to compare against.
//!
//! The last-value cache is keyed by axis only, not by device. Two pads moving
//! the same axis share one cache entry.

use crate::axis::{Axis, AxisSpec, SUPPORTED_AXES};
use crate::device::DeviceId;
use crate::event::{EventType, GamepadEvent};
use crate::input::{KeyEvent, MotionSample};
use crate::keycode::key_code_name;
use std::collections::HashMap;
use tracing::{trace, warn};

/// Minimum change for an analog axis to be reported again.
pub const AXIS_EPSILON: f64 = 0.001;

pub struct EventNormalizer {
    axes: &'static [AxisSpec],
    epsilon: f64,
    last_axis_value: HashMap<Axis, f32>,
}

impl Default for EventNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EventNormalizer {
    pub fn new() -> Self {
        Self::with_epsilon(AXIS_EPSILON)
    }

    pub fn with_epsilon(epsilon: f64) -> Self {
        Self {
            axes: &SUPPORTED_AXES,
            epsilon,
            last_axis_value: HashMap::new(),
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Last value reported for `axis`, if any was reported yet.
    pub fn last_axis_value(&self, axis: Axis) -> Option<f32> {
        self.last_axis_value.get(&axis).copied()
    }

    /// Converts a key sample. Never filtered.
    pub fn handle_button(&self, key: &KeyEvent) -> GamepadEvent {
        GamepadEvent::new(
            key.device_id,
            key.time,
            EventType::Button,
            key_code_name(key.key_code),
            f64::from(key.action),
        )
    }

    /// Converts a motion sample into at most one event per table axis.
    ///
    /// An axis whose value cannot be read is skipped for this sample; the
    /// other axes are still reported.
    pub fn handle_axes(&mut self, sample: &dyn MotionSample) -> Vec<GamepadEvent> {
        let device_id = sample.device_id();
        let time = sample.event_time();
        let mut out = Vec::new();

        for spec in self.axes {
            let raw = match sample.axis_value(spec.axis) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("Skipping axis {} on device {}: {}", spec.axis, device_id, e);
                    continue;
                }
            };
            if let Some(value) = self.filter_axis(spec, raw) {
                out.push(GamepadEvent::new(
                    device_id,
                    time,
                    EventType::Analog,
                    spec.axis.name(),
                    f64::from(value),
                ));
            }
        }

        out
    }

    /// Converts a battery sample. Never filtered.
    pub fn handle_battery(&self, device_id: DeviceId, time: i64, capacity: f32) -> GamepadEvent {
        GamepadEvent::new(device_id, time, EventType::Battery, "", f64::from(capacity))
    }

    /// Applies inversion and the epsilon filter; returns the value to report.
    fn filter_axis(&mut self, spec: &AxisSpec, raw: f32) -> Option<f32> {
        let value = spec.apply(raw);

        if let Some(&last) = self.last_axis_value.get(&spec.axis) {
            if f64::from((value - last).abs()) < self.epsilon {
                trace!("Axis {} jitter {} -> {} suppressed", spec.axis, last, value);
                return None;
            }
        }

        self.last_axis_value.insert(spec.axis, value);
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SampleError;
    use crate::input::MotionEvent;
    use crate::keycode::{ACTION_DOWN, ACTION_UP};

    fn analog_keys(events: &[GamepadEvent]) -> Vec<&str> {
        events.iter().map(|e| e.key.as_str()).collect()
    }

    #[test]
    fn test_first_sample_reports_every_axis() {
        let mut norm = EventNormalizer::new();
        let events = norm.handle_axes(&MotionEvent::new(1, 10));

        // all zero, but nothing was reported before
        assert_eq!(
            analog_keys(&events),
            vec!["X", "Y", "Z", "RZ", "HAT_X", "HAT_Y", "LTRIGGER", "RTRIGGER"]
        );
        assert!(events.iter().all(|e| e.event_type == EventType::Analog));
        assert!(events.iter().all(|e| e.gamepad_id == "1" && e.time == 10));
    }

    #[test]
    fn test_trigger_epsilon_sequence() {
        let mut norm = EventNormalizer::new();
        norm.handle_axes(&MotionEvent::new(1, 0));

        let ev = norm.handle_axes(&MotionEvent::new(1, 1).with_axis(Axis::LTrigger, 0.5));
        assert_eq!(ev.len(), 1);
        assert_eq!(ev[0].key, "LTRIGGER");
        assert_eq!(ev[0].value, 0.5);

        let ev = norm.handle_axes(&MotionEvent::new(1, 2).with_axis(Axis::LTrigger, 0.5003));
        assert!(ev.is_empty());
        assert_eq!(norm.last_axis_value(Axis::LTrigger), Some(0.5));

        let ev = norm.handle_axes(&MotionEvent::new(1, 3).with_axis(Axis::LTrigger, 0.52));
        assert_eq!(ev.len(), 1);
        assert_eq!(ev[0].value, f64::from(0.52f32));
        assert_eq!(norm.last_axis_value(Axis::LTrigger), Some(0.52));
    }

    #[test]
    fn test_first_small_value_is_not_filtered() {
        let mut norm = EventNormalizer::new();
        let ev = norm.handle_axes(&MotionEvent::new(4, 0).with_axis(Axis::X, 0.0002));
        let x = ev.iter().find(|e| e.key == "X").unwrap();
        assert_eq!(x.value, f64::from(0.0002f32));
    }

    #[test]
    fn test_inverted_axes_report_negated_value() {
        let mut norm = EventNormalizer::new();
        let sample = MotionEvent::new(1, 0)
            .with_axis(Axis::X, 0.25)
            .with_axis(Axis::Y, 0.25)
            .with_axis(Axis::Rz, -0.75)
            .with_axis(Axis::HatY, 1.0);
        let ev = norm.handle_axes(&sample);
        let value = |key: &str| ev.iter().find(|e| e.key == key).map(|e| e.value);

        assert_eq!(value("X"), Some(0.25));
        assert_eq!(value("Y"), Some(-0.25));
        assert_eq!(value("RZ"), Some(0.75));
        assert_eq!(value("HAT_Y"), Some(-1.0));
    }

    #[test]
    fn test_change_at_epsilon_is_reported() {
        let mut norm = EventNormalizer::with_epsilon(0.25);
        norm.handle_axes(&MotionEvent::new(1, 0).with_axis(Axis::HatX, 0.0));

        let ev = norm.handle_axes(&MotionEvent::new(1, 1).with_axis(Axis::HatX, 0.25));
        assert_eq!(analog_keys(&ev), vec!["HAT_X"]);

        let ev = norm.handle_axes(&MotionEvent::new(1, 2).with_axis(Axis::HatX, 0.375));
        assert!(ev.is_empty());
    }

    struct FlakySample;

    impl MotionSample for FlakySample {
        fn device_id(&self) -> DeviceId {
            8
        }

        fn event_time(&self) -> i64 {
            77
        }

        fn axis_value(&self, axis: Axis) -> Result<f32, SampleError> {
            match axis {
                Axis::Z => Err(SampleError::AxisUnavailable { device_id: 8, axis }),
                _ => Ok(0.1),
            }
        }
    }

    #[test]
    fn test_unreadable_axis_is_skipped() {
        let mut norm = EventNormalizer::new();
        let ev = norm.handle_axes(&FlakySample);
        assert_eq!(ev.len(), 7);
        assert!(!analog_keys(&ev).contains(&"Z"));
        assert_eq!(norm.last_axis_value(Axis::Z), None);
    }

    #[test]
    fn test_buttons_always_emit_raw_action() {
        let norm = EventNormalizer::new();
        let down = norm.handle_button(&KeyEvent::new(2, 50, 96, ACTION_DOWN));
        let again = norm.handle_button(&KeyEvent::new(2, 51, 96, ACTION_DOWN));
        let up = norm.handle_button(&KeyEvent::new(2, 52, 96, ACTION_UP));

        assert_eq!(
            down,
            GamepadEvent::new(2, 50, EventType::Button, "KEYCODE_BUTTON_A", 0.0)
        );
        assert_eq!(again.value, 0.0);
        assert_eq!(up.value, 1.0);
        assert_eq!(up.time, 52);
    }

    #[test]
    fn test_battery_passthrough() {
        let norm = EventNormalizer::new();
        let ev = norm.handle_battery(3, 1_700_000_000_000, 0.75);
        assert_eq!(ev.event_type, EventType::Battery);
        assert_eq!(ev.key, "");
        assert_eq!(ev.value, 0.75);
        assert_eq!(ev.gamepad_id, "3");
    }
}
