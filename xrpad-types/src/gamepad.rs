use serde::{Deserialize, Serialize};

/// One pressable control as exposed on the gamepad surface.
///
/// `value` is in `[0, 1]`; analog controls report intermediate values,
/// binary ones report `0.0` or `1.0`. A pressed control is always also
/// touched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GamepadButton {
    pub value: f32,
    pub pressed: bool,
    pub touched: bool,
}

impl GamepadButton {
    /// Filler for reserved indices whose control the device lacks.
    pub const NEUTRAL: Self = Self {
        value: 0.0,
        pressed: false,
        touched: false,
    };

    pub fn new(value: f32, pressed: bool, touched: bool) -> Self {
        Self {
            value,
            pressed,
            touched,
        }
    }

    /// Clamp `value` into range and make touch implied by press.
    pub fn normalized(self) -> Self {
        Self {
            value: self.value.clamp(0.0, 1.0),
            pressed: self.pressed,
            touched: self.touched || self.pressed,
        }
    }
}

impl Default for GamepadButton {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Named control layout of the exposed button/axis arrays.
///
/// Computed once when a source registers and fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mapping {
    #[serde(rename = "xr-standard")]
    XrStandard,
    #[default]
    #[serde(rename = "")]
    None,
}

impl Mapping {
    /// The wire form of the `mapping` attribute; unrecognized layouts
    /// report the empty string.
    pub fn as_str(self) -> &'static str {
        match self {
            Mapping::XrStandard => "xr-standard",
            Mapping::None => "",
        }
    }
}
