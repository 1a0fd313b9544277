//! Output side: where normalized events go.
//!
//! The core only knows [`EventSink`]. Hosts usually pick one of:
//! - [`ChannelSink`]: forwards each event as an `onGamepadEvent` method call
//!   over a [`MethodChannel`] (the cross-runtime bridge).
//! - [`QueueSink`]: pushes events onto a tokio channel so the host can drain
//!   them on the thread that is allowed to emit.
//! - [`EventBus`](crate::eventbus::EventBus): in-process fan-out to listeners.

use crate::config::Settings;
use crate::error::{BridgeError, SinkError};
use crate::event::{GamepadEvent, ON_GAMEPAD_EVENT};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Receives normalized events.
///
/// Called from the host callback context and from the battery poller, never
/// while the manager's lock is held.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &GamepadEvent) -> Result<(), SinkError>;
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn emit(&self, event: &GamepadEvent) -> Result<(), SinkError> {
        (**self).emit(event)
    }
}

impl<T: EventSink + ?Sized> EventSink for Box<T> {
    fn emit(&self, event: &GamepadEvent) -> Result<(), SinkError> {
        (**self).emit(event)
    }
}

/// A named method-call channel into another runtime.
pub trait MethodChannel: Send + Sync {
    /// Name the channel was registered under on the host.
    fn name(&self) -> &str;

    fn invoke_method(&self, method: &str, arguments: Value) -> Result<(), SinkError>;
}

/// Adapts a [`MethodChannel`] into an [`EventSink`].
pub struct ChannelSink<C> {
    channel: C,
}

impl<C: MethodChannel> ChannelSink<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    /// Wraps `channel` after checking it is the one `settings` names.
    pub fn bind(channel: C, settings: &Settings) -> Result<Self, BridgeError> {
        if channel.name() != settings.channel_name {
            return Err(BridgeError::InvalidConfig(format!(
                "method channel {:?} does not match configured channel_name {:?}",
                channel.name(),
                settings.channel_name
            )));
        }
        Ok(Self::new(channel))
    }

    pub fn channel_name(&self) -> &str {
        self.channel.name()
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }
}

impl<C: MethodChannel> EventSink for ChannelSink<C> {
    fn emit(&self, event: &GamepadEvent) -> Result<(), SinkError> {
        let arguments = event.to_arguments()?;
        self.channel.invoke_method(ON_GAMEPAD_EVENT, arguments)
    }
}

/// Queues events for a consumer running elsewhere.
#[derive(Clone, Debug)]
pub struct QueueSink {
    tx: mpsc::UnboundedSender<GamepadEvent>,
}

impl QueueSink {
    pub fn new(tx: mpsc::UnboundedSender<GamepadEvent>) -> Self {
        Self { tx }
    }

    /// Creates a sink together with the receiver that drains it.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<GamepadEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl EventSink for QueueSink {
    fn emit(&self, event: &GamepadEvent) -> Result<(), SinkError> {
        self.tx.send(event.clone()).map_err(|_| SinkError::Closed)
    }
}
