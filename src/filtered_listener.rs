//! Listener adapters that narrow what reaches a [`GamepadListener`].
//!
//! [`EventFilter`](crate::eventbus::EventFilter) selects by event type only.
//! These wrap a listener instead, so a consumer can follow a single pad or
//! ignore small stick movements without the bus knowing about it.

use crate::device::DeviceId;
use crate::event::{EventType, GamepadEvent};
use crate::eventbus::GamepadListener;

/// Forwards an event to the inner listener only if the predicate accepts it.
pub struct FilteredListener {
    predicate: Box<dyn Fn(&GamepadEvent) -> bool + Send + Sync>,
    inner: Box<dyn GamepadListener>,
}

impl FilteredListener {
    pub fn new(
        predicate: impl Fn(&GamepadEvent) -> bool + Send + Sync + 'static,
        inner: impl GamepadListener + 'static,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            inner: Box::new(inner),
        }
    }

    /// Only events from `device_id`.
    pub fn for_gamepad(device_id: DeviceId, inner: impl GamepadListener + 'static) -> Self {
        let wanted = device_id.to_string();
        Self::new(move |e| e.gamepad_id == wanted, inner)
    }

    /// Drops analog events whose magnitude is below `threshold`.
    ///
    /// Button and battery events always pass.
    pub fn min_magnitude(threshold: f64, inner: impl GamepadListener + 'static) -> Self {
        Self::new(
            move |e| e.event_type != EventType::Analog || e.value.abs() >= threshold,
            inner,
        )
    }
}

impl GamepadListener for FilteredListener {
    fn on_event(&mut self, event: &GamepadEvent) {
        if (self.predicate)(event) {
            self.inner.on_event(event);
        }
    }
}
