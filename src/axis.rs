//! Recognized analog axes.
//!
//! The table is fixed: left stick (`X`/`Y`), right stick (`Z`/`RZ`), hat
//! (`HAT_X`/`HAT_Y`) and both triggers. Vertical axes are inverted so that
//! "up" reports positive values.
//!
//! Platform codes follow the Android `MotionEvent.AXIS_*` constants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One analog input channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Axis {
    X,
    Y,
    Z,
    Rz,
    HatX,
    HatY,
    #[serde(rename = "LTRIGGER")]
    LTrigger,
    #[serde(rename = "RTRIGGER")]
    RTrigger,
}

impl Axis {
    /// Platform axis code.
    pub const fn code(self) -> i32 {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 11,
            Axis::Rz => 14,
            Axis::HatX => 15,
            Axis::HatY => 16,
            Axis::LTrigger => 17,
            Axis::RTrigger => 18,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        SUPPORTED_AXES
            .iter()
            .map(|spec| spec.axis)
            .find(|axis| axis.code() == code)
    }

    /// Name used as the `key` of analog events.
    pub const fn name(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
            Axis::Rz => "RZ",
            Axis::HatX => "HAT_X",
            Axis::HatY => "HAT_Y",
            Axis::LTrigger => "LTRIGGER",
            Axis::RTrigger => "RTRIGGER",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An entry of the axis table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisSpec {
    pub axis: Axis,
    /// Report `-raw` instead of `raw`.
    pub invert: bool,
}

impl AxisSpec {
    pub const fn new(axis: Axis) -> Self {
        Self {
            axis,
            invert: false,
        }
    }

    pub const fn inverted(axis: Axis) -> Self {
        Self { axis, invert: true }
    }

    /// Applies the inversion to a raw sample.
    #[inline]
    pub fn apply(&self, raw: f32) -> f32 {
        if self.invert {
            raw * -1.0
        } else {
            raw
        }
    }
}

/// Every axis the normalizer reports, in emission order.
pub const SUPPORTED_AXES: [AxisSpec; 8] = [
    AxisSpec::new(Axis::X),
    AxisSpec::inverted(Axis::Y),
    AxisSpec::new(Axis::Z),
    AxisSpec::inverted(Axis::Rz),
    AxisSpec::new(Axis::HatX),
    AxisSpec::inverted(Axis::HatY),
    AxisSpec::new(Axis::LTrigger),
    AxisSpec::new(Axis::RTrigger),
];
