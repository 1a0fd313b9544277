use crate::event::{EventType, GamepadEvent};
use crate::eventbus::GamepadListener;
use tracing::{debug, info};

/// A listener that writes every event to the `tracing` log.
///
/// Analog events are chatty and go to `debug`; buttons and battery go to `info`.
#[derive(Debug, Default)]
pub struct LogListener;

impl LogListener {
    pub fn new() -> Self {
        LogListener
    }
}

impl GamepadListener for LogListener {
    fn on_event(&mut self, event: &GamepadEvent) {
        match event.event_type {
            EventType::Analog => debug!(
                gamepad = %event.gamepad_id,
                key = %event.key,
                value = event.value,
                "analog"
            ),
            EventType::Button | EventType::Battery => info!(
                gamepad = %event.gamepad_id,
                key = %event.key,
                value = event.value,
                time = event.time,
                "{}",
                event.event_type
            ),
        }
    }
}
