use mint::Vector2;

use crate::{gamepad::GamepadButton, SourceId, Time};

/// Raw physical-control sample a producer submits, before canonical
/// layout. Controls the device lacks stay `None`; the runtime reserves
/// their indices when the source carries a named mapping.
#[derive(Debug, Clone)]
pub struct SourceSample {
    pub source: SourceId,
    pub time: Time,
    pub trigger: Option<GamepadButton>,
    pub squeeze: Option<GamepadButton>,
    pub touchpad: Option<TouchpadSample>,
    pub thumbstick: Option<ThumbstickSample>,
    /// Device-specific controls, appended after the canonical indices.
    pub extra_buttons: Vec<GamepadButton>,
    pub extra_axes: Vec<f32>,
}

impl SourceSample {
    pub fn empty(source: SourceId, time: Time) -> Self {
        Self {
            source,
            time,
            trigger: None,
            squeeze: None,
            touchpad: None,
            thumbstick: None,
            extra_buttons: Vec::new(),
            extra_axes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TouchpadSample {
    /// Contact point, each component in [-1, 1].
    pub point: Vector2<f32>,
    pub pressed: bool,
    pub touched: bool,
}

impl TouchpadSample {
    /// Press component exposed at the touchpad's reserved button index.
    pub fn press_state(&self) -> GamepadButton {
        GamepadButton {
            value: if self.pressed { 1.0 } else { 0.0 },
            pressed: self.pressed,
            touched: self.touched || self.pressed,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ThumbstickSample {
    /// Stick deflection, each component in [-1, 1].
    pub deflection: Vector2<f32>,
    pub pressed: bool,
}

impl ThumbstickSample {
    /// Press component exposed at the thumbstick's reserved button index.
    pub fn press_state(&self) -> GamepadButton {
        GamepadButton {
            value: if self.pressed { 1.0 } else { 0.0 },
            pressed: self.pressed,
            touched: self.pressed,
        }
    }
}

/// Producer-to-runtime traffic. Applied only at frame boundaries, so
/// traffic sent mid-batch never splices into the running batch.
#[derive(Debug, Clone)]
pub enum SourceEvent {
    Sample(SourceSample),
    Disconnect(SourceId),
}
