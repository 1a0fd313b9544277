//! Host-facing entry point.
//!
//! [`Manager`] is what a platform integration talks to. It owns the
//! [`DeviceRegistry`], the [`EventNormalizer`] and the event sink, gates every
//! raw sample on registry membership, and runs the battery poller.
//!
//! # Locking
//! Registry and normalizer share one mutex. Attach/detach notifications, input
//! callbacks, queries and poll rounds all take it, so nobody observes a
//! half-applied change. Events are built under the lock and emitted after it
//! is released; a sink may call back into the manager.
//!
//! # Example
//! ```
//! use padlink::backends::virtual_input::RecordingSink;
//! use padlink::{KeyEvent, Manager, ACTION_DOWN};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(RecordingSink::new());
//! let mgr = Manager::new(|id: i32| id != 3, sink.clone());
//!
//! mgr.on_device_added(1, "Pad");
//! mgr.on_device_added(3, "Keyboard");
//!
//! assert!(mgr.on_key_event(&KeyEvent::new(1, 10, 96, ACTION_DOWN)));
//! assert!(!mgr.on_key_event(&KeyEvent::new(3, 11, 29, ACTION_DOWN)));
//! assert_eq!(sink.len(), 1);
//! ```

use crate::config::Settings;
use crate::device::{Device, DeviceId, GamepadClassifier};
use crate::error::BridgeError;
use crate::event::GamepadEvent;
use crate::input::{BatteryProbe, KeyEvent, MotionSample};
use crate::method::{GamepadInfo, MethodCall, MethodCallHandler, MethodResult, LIST_GAMEPADS};
use crate::normalizer::EventNormalizer;
use crate::poller::BatteryPoller;
use crate::registry::DeviceRegistry;
use crate::sink::EventSink;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

struct State {
    registry: DeviceRegistry,
    normalizer: EventNormalizer,
}

struct Shared {
    state: Mutex<State>,
    sink: Box<dyn EventSink>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: &GamepadEvent) {
        if let Err(e) = self.sink.emit(event) {
            warn!(
                "Dropping {} event for gamepad {}: {}",
                event.event_type, event.gamepad_id, e
            );
        }
    }

    fn battery(&self, device_id: DeviceId, capacity: f32) -> bool {
        let event = {
            let state = self.lock();
            if !state.registry.contains(device_id) {
                debug!("Battery sample for untracked device {} dropped", device_id);
                return false;
            }
            state
                .normalizer
                .handle_battery(device_id, wall_clock_millis(), capacity)
        };
        self.emit(&event);
        true
    }

    /// One poll round: every tracked device, one battery event each.
    fn poll_battery(&self, probe: &dyn BatteryProbe) {
        let devices = self.lock().registry.list_devices();
        for device in devices {
            match probe.capacity(&device) {
                Ok(capacity) => {
                    self.battery(device.id, capacity);
                }
                Err(e) => warn!("Battery read failed for {}: {}", device, e),
            }
        }
    }
}

fn wall_clock_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub struct Manager {
    shared: Arc<Shared>,
    settings: Settings,
    poller: Mutex<Option<BatteryPoller>>,
}

impl Manager {
    /// Creates a manager with default settings.
    pub fn new(
        classifier: impl GamepadClassifier + 'static,
        sink: impl EventSink + 'static,
    ) -> Self {
        Self::build(Settings::default(), classifier, sink)
    }

    pub fn with_settings(
        settings: Settings,
        classifier: impl GamepadClassifier + 'static,
        sink: impl EventSink + 'static,
    ) -> Result<Self, BridgeError> {
        settings.validate()?;
        Ok(Self::build(settings, classifier, sink))
    }

    fn build(
        settings: Settings,
        classifier: impl GamepadClassifier + 'static,
        sink: impl EventSink + 'static,
    ) -> Self {
        let state = State {
            registry: DeviceRegistry::new(classifier),
            normalizer: EventNormalizer::with_epsilon(settings.axis_epsilon),
        };
        debug!("Creating Manager with settings: {:?}", settings);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                sink: Box::new(sink),
            }),
            settings,
            poller: Mutex::new(None),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ---- device notifications ----

    pub fn on_device_added(&self, device_id: DeviceId, name: &str) -> bool {
        self.shared.lock().registry.on_device_added(device_id, name)
    }

    pub fn on_device_changed(&self, device_id: DeviceId, name: &str) -> bool {
        self.shared.lock().registry.on_device_changed(device_id, name)
    }

    pub fn on_device_removed(&self, device_id: DeviceId) {
        self.shared.lock().registry.on_device_removed(device_id);
    }

    // ---- queries ----

    pub fn contains(&self, device_id: DeviceId) -> bool {
        self.shared.lock().registry.contains(device_id)
    }

    pub fn list_devices(&self) -> Vec<Device> {
        self.shared.lock().registry.list_devices()
    }

    pub fn list_gamepads(&self) -> Vec<GamepadInfo> {
        self.list_devices().iter().map(GamepadInfo::from).collect()
    }

    // ---- raw input ----

    /// Forwards a key sample. Returns `false` if the device is not tracked.
    pub fn on_key_event(&self, key: &KeyEvent) -> bool {
        let event = {
            let state = self.shared.lock();
            if !state.registry.contains(key.device_id) {
                debug!("Key event for untracked device {} dropped", key.device_id);
                return false;
            }
            state.normalizer.handle_button(key)
        };
        self.shared.emit(&event);
        true
    }

    /// Forwards a motion sample. Returns `false` if the device is not tracked.
    pub fn on_motion_event(&self, sample: &dyn MotionSample) -> bool {
        let device_id = sample.device_id();
        let events = {
            let mut state = self.shared.lock();
            if !state.registry.contains(device_id) {
                debug!("Motion event for untracked device {} dropped", device_id);
                return false;
            }
            state.normalizer.handle_axes(sample)
        };
        for event in &events {
            self.shared.emit(event);
        }
        true
    }

    /// Forwards a host-delivered battery change. Returns `false` if the device
    /// is not tracked.
    pub fn on_battery_event(&self, device_id: DeviceId, capacity: f32) -> bool {
        self.shared.battery(device_id, capacity)
    }

    // ---- battery polling ----

    /// Starts re-polling battery state of every tracked device.
    ///
    /// Must be called from within a tokio runtime. A poller that is already
    /// running is stopped first.
    pub fn start_battery_polling(
        &self,
        probe: impl BatteryProbe + 'static,
    ) -> Result<(), BridgeError> {
        let shared = self.shared.clone();
        let probe: Box<dyn BatteryProbe> = Box::new(probe);
        let poller = BatteryPoller::spawn_current(self.settings.battery_poll_interval(), move || {
            shared.poll_battery(probe.as_ref())
        })?;

        let mut slot = self.poller.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.replace(poller) {
            info!("Replacing running battery poller");
            previous.stop();
        }
        Ok(())
    }

    /// Requests the poller to stop. At most one in-flight round may still emit.
    pub fn stop_battery_polling(&self) {
        let previous = self
            .poller
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(poller) = previous {
            poller.stop();
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poller
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|p| !p.is_stopped())
    }

    /// Host integration detached: stop background work.
    pub fn detach(&self) {
        info!("Detaching gamepad bridge");
        self.stop_battery_polling();
    }
}

impl MethodCallHandler for Manager {
    fn on_method_call(&self, call: &MethodCall) -> MethodResult {
        match call.method.as_str() {
            LIST_GAMEPADS => match serde_json::to_value(self.list_gamepads()) {
                Ok(list) => MethodResult::Success(list),
                Err(e) => MethodResult::error("encode", e.to_string()),
            },
            other => {
                debug!("Method {:?} not implemented", other);
                MethodResult::NotImplemented
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Axis;
    use crate::backends::virtual_input::{RecordingSink, VirtualBattery};
    use crate::event::EventType;
    use crate::input::MotionEvent;
    use crate::keycode::ACTION_UP;
    use serde_json::json;

    fn manager() -> (Manager, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        // id 3 is a keyboard
        let mgr = Manager::new(|id: DeviceId| id != 3, sink.clone());
        (mgr, sink)
    }

    #[test]
    fn test_non_gamepad_is_excluded_and_its_events_dropped() {
        let (mgr, sink) = manager();
        assert!(!mgr.on_device_added(3, "AT Keyboard"));
        assert!(mgr.list_devices().is_empty());

        assert!(!mgr.on_key_event(&KeyEvent::new(3, 0, 96, 0)));
        assert!(!mgr.on_motion_event(&MotionEvent::new(3, 0).with_axis(Axis::X, 1.0)));
        assert!(!mgr.on_battery_event(3, 0.5));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_tracked_device_events_flow_to_sink() {
        let (mgr, sink) = manager();
        mgr.on_device_added(1, "Pad");

        assert!(mgr.on_key_event(&KeyEvent::new(1, 5, 97, ACTION_UP)));
        assert!(mgr.on_motion_event(&MotionEvent::new(1, 6)));
        assert!(mgr.on_battery_event(1, 0.25));

        let events = sink.events();
        assert_eq!(events.len(), 1 + 8 + 1);
        assert_eq!(events[0].key, "KEYCODE_BUTTON_B");
        assert_eq!(events[0].value, 1.0);
        assert!(events[1..9].iter().all(|e| e.event_type == EventType::Analog));
        assert_eq!(events[9].event_type, EventType::Battery);
        assert_eq!(events[9].value, 0.25);
    }

    #[test]
    fn test_detached_device_is_dropped() {
        let (mgr, sink) = manager();
        mgr.on_device_added(1, "Pad");
        mgr.on_device_removed(1);
        assert!(!mgr.contains(1));
        assert!(!mgr.on_key_event(&KeyEvent::new(1, 0, 96, 0)));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_sink_failure_does_not_break_callbacks() {
        let (mgr, sink) = manager();
        mgr.on_device_added(1, "Pad");
        sink.set_failing(true);
        assert!(mgr.on_key_event(&KeyEvent::new(1, 0, 96, 0)));
        sink.set_failing(false);
        assert!(mgr.on_key_event(&KeyEvent::new(1, 1, 96, 1)));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_list_gamepads_method() {
        let (mgr, _sink) = manager();
        mgr.on_device_added(2, "Pad Two");
        mgr.on_device_added(1, "Pad One");

        let result = mgr.on_method_call(&MethodCall::new(LIST_GAMEPADS));
        assert_eq!(
            result,
            MethodResult::Success(json!([
                {"id": "1", "name": "Pad One"},
                {"id": "2", "name": "Pad Two"},
            ]))
        );
    }

    #[test]
    fn test_unknown_method_is_not_implemented() {
        let (mgr, _sink) = manager();
        assert_eq!(
            mgr.on_method_call(&MethodCall::new("vibrate")),
            MethodResult::NotImplemented
        );
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            battery_poll_interval_ms: 0,
            ..Settings::default()
        };
        let res = Manager::with_settings(settings, |_id: DeviceId| true, RecordingSink::new());
        assert!(matches!(res, Err(BridgeError::InvalidConfig(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_round_skips_unreadable_battery() {
        let (mgr, sink) = manager();
        mgr.on_device_added(1, "Pad One");
        mgr.on_device_added(2, "Pad Two");

        let battery = Arc::new(VirtualBattery::new());
        battery.set(1, 0.6);
        // device 2 has no reading -> BatteryUnavailable

        mgr.start_battery_polling(battery.clone()).unwrap();
        assert!(mgr.is_polling());
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].gamepad_id, "1");
        assert_eq!(events[0].value, f64::from(0.6f32));

        mgr.detach();
        assert!(!mgr.is_polling());
    }
}
