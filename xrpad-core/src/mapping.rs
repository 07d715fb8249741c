use xrpad_types::{
    event::SourceSample,
    gamepad::{GamepadButton, Mapping},
    profile::{ProfileDescriptor, TargetingRayMode},
};

/// Canonical `xr-standard` button indices.
pub const BUTTON_TRIGGER: usize = 0;
pub const BUTTON_SQUEEZE: usize = 1;
pub const BUTTON_TOUCHPAD: usize = 2;
pub const BUTTON_THUMBSTICK: usize = 3;

/// Canonical `xr-standard` axis indices.
pub const AXIS_TOUCHPAD_X: usize = 0;
pub const AXIS_TOUCHPAD_Y: usize = 1;
pub const AXIS_THUMBSTICK_X: usize = 2;
pub const AXIS_THUMBSTICK_Y: usize = 3;

pub const XR_STANDARD_BUTTONS: usize = 4;
pub const XR_STANDARD_AXES: usize = 4;

/// Select the named layout for a capability profile.
///
/// Pure over its input: `xr-standard` requires a tracked pointer and a
/// trigger-like button, anything else gets no named mapping. Gaze and
/// screen sources never qualify.
pub fn resolve(descriptor: &ProfileDescriptor) -> Mapping {
    if descriptor.targeting != TargetingRayMode::TrackedPointer {
        return Mapping::None;
    }
    if !descriptor.has_trigger_like_button {
        return Mapping::None;
    }
    Mapping::XrStandard
}

/// The button/axis arrays a freshly registered source exposes before its
/// first sample: every canonical index reserved under `xr-standard`,
/// nothing otherwise.
pub fn reserved_layout(mapping: Mapping) -> (Vec<GamepadButton>, Vec<f32>) {
    match mapping {
        Mapping::XrStandard => (
            vec![GamepadButton::NEUTRAL; XR_STANDARD_BUTTONS],
            vec![0.0; XR_STANDARD_AXES],
        ),
        Mapping::None => (Vec::new(), Vec::new()),
    }
}

/// Lay a raw physical-control sample out into the exposed arrays.
///
/// Under `xr-standard` every canonical index is reserved even when the
/// device lacks that control, so consumers can rely on positional
/// semantics; device-specific extras are appended after index 3. Without
/// a named mapping the controls that exist are emitted in canonical order
/// with no reservation.
pub fn layout_sample(sample: &SourceSample, mapping: Mapping) -> (Vec<GamepadButton>, Vec<f32>) {
    match mapping {
        Mapping::XrStandard => layout_xr_standard(sample),
        Mapping::None => layout_unmapped(sample),
    }
}

fn layout_xr_standard(sample: &SourceSample) -> (Vec<GamepadButton>, Vec<f32>) {
    let (mut buttons, mut axes) = reserved_layout(Mapping::XrStandard);

    if let Some(trigger) = sample.trigger {
        buttons[BUTTON_TRIGGER] = trigger.normalized();
    }
    if let Some(squeeze) = sample.squeeze {
        buttons[BUTTON_SQUEEZE] = squeeze.normalized();
    }
    if let Some(touchpad) = sample.touchpad {
        buttons[BUTTON_TOUCHPAD] = touchpad.press_state();
        axes[AXIS_TOUCHPAD_X] = touchpad.point.x.clamp(-1.0, 1.0);
        axes[AXIS_TOUCHPAD_Y] = touchpad.point.y.clamp(-1.0, 1.0);
    }
    if let Some(thumbstick) = sample.thumbstick {
        buttons[BUTTON_THUMBSTICK] = thumbstick.press_state();
        axes[AXIS_THUMBSTICK_X] = thumbstick.deflection.x.clamp(-1.0, 1.0);
        axes[AXIS_THUMBSTICK_Y] = thumbstick.deflection.y.clamp(-1.0, 1.0);
    }

    buttons.extend(sample.extra_buttons.iter().map(|b| b.normalized()));
    axes.extend(sample.extra_axes.iter().map(|a| a.clamp(-1.0, 1.0)));

    (buttons, axes)
}

fn layout_unmapped(sample: &SourceSample) -> (Vec<GamepadButton>, Vec<f32>) {
    let mut buttons = Vec::new();
    let mut axes = Vec::new();

    if let Some(trigger) = sample.trigger {
        buttons.push(trigger.normalized());
    }
    if let Some(squeeze) = sample.squeeze {
        buttons.push(squeeze.normalized());
    }
    if let Some(touchpad) = sample.touchpad {
        buttons.push(touchpad.press_state());
        axes.push(touchpad.point.x.clamp(-1.0, 1.0));
        axes.push(touchpad.point.y.clamp(-1.0, 1.0));
    }
    if let Some(thumbstick) = sample.thumbstick {
        buttons.push(thumbstick.press_state());
        axes.push(thumbstick.deflection.x.clamp(-1.0, 1.0));
        axes.push(thumbstick.deflection.y.clamp(-1.0, 1.0));
    }

    buttons.extend(sample.extra_buttons.iter().map(|b| b.normalized()));
    axes.extend(sample.extra_axes.iter().map(|a| a.clamp(-1.0, 1.0)));

    (buttons, axes)
}
