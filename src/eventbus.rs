use crate::error::SinkError;
use crate::event::{EventType, GamepadEvent};
use crate::sink::EventSink;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Trait for reacting to normalized gamepad events.
pub trait GamepadListener: Send {
    fn on_event(&mut self, event: &GamepadEvent);
}

/// Determines which kinds of events a listener wants to receive.
#[derive(Debug, Clone, Copy)]
pub enum EventFilter {
    All,
    AnalogOnly,
    ButtonsOnly,
    BatteryOnly,
    Custom(fn(&GamepadEvent) -> bool),
}

impl EventFilter {
    fn passes(&self, event: &GamepadEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::AnalogOnly => event.event_type == EventType::Analog,
            EventFilter::ButtonsOnly => event.event_type == EventType::Button,
            EventFilter::BatteryOnly => event.event_type == EventType::Battery,
            EventFilter::Custom(f) => f(event),
        }
    }
}

/// Metadata-wrapped listener with filters and control flags.
struct ListenerEntry {
    listener: Box<dyn GamepadListener>,
    enabled: bool,
    filter: EventFilter,
    tag: Option<String>, // gamepad id this listener is pinned to
}

struct BusState {
    next_id: u64,
    listeners: HashMap<u64, ListenerEntry>,
}

/// In-process fan-out of normalized events.
pub struct EventBus {
    state: Mutex<BusState>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BusState {
                next_id: 0,
                listeners: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BusState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a listener with optional filtering and gamepad tag.
    pub fn add_listener(
        &self,
        listener: impl GamepadListener + 'static,
        filter: EventFilter,
        tag: Option<String>,
    ) -> u64 {
        let mut state = self.lock();
        let id = state.next_id;
        state.listeners.insert(
            id,
            ListenerEntry {
                listener: Box::new(listener),
                enabled: true,
                filter,
                tag,
            },
        );
        state.next_id += 1;
        id
    }

    /// Enables a previously registered listener.
    pub fn enable(&self, id: u64) {
        if let Some(entry) = self.lock().listeners.get_mut(&id) {
            entry.enabled = true;
        }
    }

    /// Disables (mutes) a listener without removing it.
    pub fn disable(&self, id: u64) {
        if let Some(entry) = self.lock().listeners.get_mut(&id) {
            entry.enabled = false;
        }
    }

    /// Unregisters a listener entirely.
    pub fn remove_listener(&self, id: u64) {
        self.lock().listeners.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.lock().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delivers one event to all active and matching listeners.
    pub fn dispatch(&self, event: &GamepadEvent) {
        let mut state = self.lock();
        for entry in state.listeners.values_mut() {
            if !entry.enabled {
                continue;
            }

            if let Some(ref wanted_id) = entry.tag {
                if event.gamepad_id != *wanted_id {
                    continue;
                }
            }

            if entry.filter.passes(event) {
                entry.listener.on_event(event);
            }
        }
    }
}

impl EventSink for EventBus {
    fn emit(&self, event: &GamepadEvent) -> Result<(), SinkError> {
        self.dispatch(event);
        Ok(())
    }
}
