//! Query surface of the method channel.
//!
//! The receiving runtime can call back into the bridge. Only `listGamepads` is
//! supported; any other method answers [`MethodResult::NotImplemented`], which
//! is distinct from a call that was understood but failed.

use crate::device::Device;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const LIST_GAMEPADS: &str = "listGamepads";

/// An incoming method invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: Value::Null,
        }
    }
}

/// Outcome of a method invocation.
#[derive(Clone, Debug, PartialEq)]
pub enum MethodResult {
    Success(Value),
    NotImplemented,
    Error {
        code: String,
        message: String,
        details: Option<Value>,
    },
}

impl MethodResult {
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        MethodResult::Error {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MethodResult::Success(_))
    }
}

/// Answers method calls coming from the other side of the channel.
pub trait MethodCallHandler {
    fn on_method_call(&self, call: &MethodCall) -> MethodResult;
}

/// Entry of the `listGamepads` answer. The id is a string on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamepadInfo {
    pub id: String,
    pub name: String,
}

impl From<&Device> for GamepadInfo {
    fn from(device: &Device) -> Self {
        Self {
            id: device.id.to_string(),
            name: device.name.clone(),
        }
    }
}
