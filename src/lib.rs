//! padlink: gamepad event normalization core.
//!
//! Tracks attached gamepads, turns raw button, axis and battery samples into
//! one flat event shape, and forwards them to a sink (usually a method channel
//! into another runtime). A background poller re-reads battery state of every
//! tracked pad every five seconds.
//!
//! Platform glue (channel registration, activity lifecycle) stays in the host;
//! it talks to [`Manager`].

pub mod axis;
pub mod backends;
pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod eventbus;
pub mod filtered_listener;
pub mod input;
pub mod keycode;
pub mod logger;
pub mod manager;
pub mod method;
pub mod normalizer;
pub mod poller;
pub mod registry;
pub mod sink;

pub use axis::*;
pub use config::{Settings, DEFAULT_CHANNEL_NAME};
pub use device::*;
pub use error::*;
pub use event::*;
pub use eventbus::*;
pub use filtered_listener::FilteredListener;
pub use input::*;
pub use keycode::*;
pub use logger::LogListener;
pub use manager::Manager;
pub use method::*;
pub use normalizer::*;
pub use poller::*;
pub use registry::DeviceRegistry;
pub use sink::*;
