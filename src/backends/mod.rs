//! Host backends for `padlink`.
//!
//! Real integrations live in the host application and implement
//! [`MotionSample`](crate::input::MotionSample),
//! [`BatteryProbe`](crate::input::BatteryProbe) and
//! [`EventSink`](crate::sink::EventSink) over the platform's own objects.
//! This module only ships the in-memory backend.

pub mod virtual_input;
