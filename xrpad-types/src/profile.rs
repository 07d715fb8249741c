use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;
use thiserror::Error;

/// How the source aims at targets. Supplied by the host's input-source
/// model; only tracked pointers can qualify for a named mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetingRayMode {
    TrackedPointer,
    Gaze,
    Screen,
}

impl fmt::Display for TargetingRayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TargetingRayMode::TrackedPointer => "tracked-pointer",
            TargetingRayMode::Gaze => "gaze",
            TargetingRayMode::Screen => "screen",
        })
    }
}

/// The four canonical capability-based device categories a profile list
/// terminates in when exact device identity need not be exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum GenericProfile {
    #[serde(rename = "button-controller")]
    Button,
    #[serde(rename = "touchpad-controller")]
    Touchpad,
    #[serde(rename = "thumbstick-controller")]
    Thumbstick,
    #[serde(rename = "touchpad-thumbstick-controller")]
    TouchpadThumbstick,
}

impl GenericProfile {
    pub fn name(self) -> &'static str {
        match self {
            GenericProfile::Button => "button-controller",
            GenericProfile::Touchpad => "touchpad-controller",
            GenericProfile::Thumbstick => "thumbstick-controller",
            GenericProfile::TouchpadThumbstick => "touchpad-thumbstick-controller",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "button-controller" => Some(GenericProfile::Button),
            "touchpad-controller" => Some(GenericProfile::Touchpad),
            "thumbstick-controller" => Some(GenericProfile::Thumbstick),
            "touchpad-thumbstick-controller" => Some(GenericProfile::TouchpadThumbstick),
            _ => None,
        }
    }
}

impl fmt::Display for GenericProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Error)]
#[error("Malformed Profile Name `{0}`")]
pub struct ProfileFormatError(pub String);

/**
 * What a device model claims about itself at registration.
 *
 * `profiles` is ordered most-specific first and by convention terminates
 * in a generic profile name. Profiles are static per physical device
 * model, so the descriptor never changes after registration. `targeting`
 * is per input source, supplied by the host: two sources of the same
 * model may target differently.
 */
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileDescriptor {
    pub profiles: Vec<String>,
    pub targeting: TargetingRayMode,
    pub has_trigger_like_button: bool,
    pub has_touchpad: bool,
    pub has_thumbstick: bool,
}

impl ProfileDescriptor {
    /// The generic category the profile list terminates in, if any.
    pub fn generic_profile(&self) -> Option<GenericProfile> {
        self.profiles
            .last()
            .and_then(|name| GenericProfile::from_name(name))
    }

    /// Whether the device reports any button/axis data at all. A source
    /// without inputs gets no gamepad surface.
    pub fn reports_inputs(&self) -> bool {
        self.has_trigger_like_button || self.has_touchpad || self.has_thumbstick
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn generic_profile_names_round_trip() {
        for generic in GenericProfile::iter() {
            assert_eq!(GenericProfile::from_name(generic.name()), Some(generic));
        }
        assert_eq!(GenericProfile::from_name("oculus-touch"), None);
    }

    #[test]
    fn descriptor_terminal_profile_is_parsed() {
        let descriptor = ProfileDescriptor {
            profiles: vec![
                "acme-hyperwand".to_owned(),
                "touchpad-controller".to_owned(),
            ],
            targeting: TargetingRayMode::TrackedPointer,
            has_trigger_like_button: true,
            has_touchpad: true,
            has_thumbstick: false,
        };
        assert_eq!(
            descriptor.generic_profile(),
            Some(GenericProfile::Touchpad)
        );
    }

    #[test]
    fn descriptor_serde_round_trip() {
        let descriptor = ProfileDescriptor {
            profiles: vec!["acme-hyperwand".to_owned(), "button-controller".to_owned()],
            targeting: TargetingRayMode::TrackedPointer,
            has_trigger_like_button: true,
            has_touchpad: false,
            has_thumbstick: false,
        };

        let json = serde_json::to_string(&descriptor).unwrap();
        assert!(json.contains("tracked-pointer"));
        let back: ProfileDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, descriptor);
    }
}
