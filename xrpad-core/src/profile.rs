use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use xrpad_types::{
    gamepad::Mapping,
    profile::{GenericProfile, ProfileDescriptor, ProfileFormatError},
};

use crate::mapping;

static PROFILE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap());

/// Advisory inconsistency between a declared generic profile and the
/// device's actual capabilities. Never rejects the device: a physical
/// controller the user plugged in must keep working.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileViolation {
    #[error("`{0}` requires a trigger-like button")]
    MissingTrigger(GenericProfile),
    #[error("`{0}` requires a touchpad")]
    MissingTouchpad(GenericProfile),
    #[error("`{0}` requires a thumbstick")]
    MissingThumbstick(GenericProfile),
    #[error("`{0}` forbids a touchpad")]
    ForbiddenTouchpad(GenericProfile),
    #[error("`{0}` forbids a thumbstick")]
    ForbiddenThumbstick(GenericProfile),
    #[error("`{0}` requires the xr-standard mapping")]
    MappingNotResolved(GenericProfile),
    #[error("profile list is empty")]
    EmptyProfileList,
    #[error("profile list does not terminate in a generic profile: `{0}`")]
    NonGenericTerminal(String),
}

/// Check profile-name syntax: lowercase ASCII alphanumerics separated by
/// single hyphens. The only hard registration error; a name this check
/// rejects cannot identify a device model at all.
pub fn check_profile_names(descriptor: &ProfileDescriptor) -> Result<(), ProfileFormatError> {
    for name in &descriptor.profiles {
        if !PROFILE_NAME.is_match(name) {
            return Err(ProfileFormatError(name.clone()));
        }
    }
    Ok(())
}

/// Validate the declared generic profile against actual capabilities.
pub fn validate_generic(descriptor: &ProfileDescriptor, mapping: Mapping) -> Vec<ProfileViolation> {
    let mut violations = Vec::new();

    let terminal = match descriptor.profiles.last() {
        Some(name) => name,
        None => {
            violations.push(ProfileViolation::EmptyProfileList);
            return violations;
        }
    };

    let generic = match GenericProfile::from_name(terminal) {
        Some(generic) => generic,
        None => {
            violations.push(ProfileViolation::NonGenericTerminal(terminal.clone()));
            return violations;
        }
    };

    match generic {
        GenericProfile::Button => {
            if !descriptor.has_trigger_like_button {
                violations.push(ProfileViolation::MissingTrigger(generic));
            }
            if descriptor.has_touchpad {
                violations.push(ProfileViolation::ForbiddenTouchpad(generic));
            }
            if descriptor.has_thumbstick {
                violations.push(ProfileViolation::ForbiddenThumbstick(generic));
            }
            if mapping != Mapping::XrStandard {
                violations.push(ProfileViolation::MappingNotResolved(generic));
            }
        }
        GenericProfile::Touchpad => {
            if !descriptor.has_touchpad {
                violations.push(ProfileViolation::MissingTouchpad(generic));
            }
            if descriptor.has_thumbstick {
                violations.push(ProfileViolation::ForbiddenThumbstick(generic));
            }
            if descriptor.has_trigger_like_button && mapping != Mapping::XrStandard {
                violations.push(ProfileViolation::MappingNotResolved(generic));
            }
        }
        GenericProfile::Thumbstick => {
            if !descriptor.has_thumbstick {
                violations.push(ProfileViolation::MissingThumbstick(generic));
            }
            if descriptor.has_touchpad {
                violations.push(ProfileViolation::ForbiddenTouchpad(generic));
            }
            if descriptor.has_trigger_like_button && mapping != Mapping::XrStandard {
                violations.push(ProfileViolation::MappingNotResolved(generic));
            }
        }
        GenericProfile::TouchpadThumbstick => {
            if !descriptor.has_touchpad {
                violations.push(ProfileViolation::MissingTouchpad(generic));
            }
            if !descriptor.has_thumbstick {
                violations.push(ProfileViolation::MissingThumbstick(generic));
            }
            if descriptor.has_trigger_like_button && mapping != Mapping::XrStandard {
                violations.push(ProfileViolation::MappingNotResolved(generic));
            }
        }
    }

    violations
}

/// Registration-time resolution: mapping plus advisory violations.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub mapping: Mapping,
    pub violations: Vec<ProfileViolation>,
}

/**
 * Caches resolutions keyed by the whole descriptor. The profile list and
 * capability flags are static per device model, but `targeting` is per
 * input source, so the model name alone cannot key the cache: the same
 * model registered as gaze and as tracked-pointer resolves differently.
 */
#[derive(Debug, Default)]
pub struct ResolutionCache(DashMap<ProfileDescriptor, Resolution>);

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&self, descriptor: &ProfileDescriptor) -> Resolution {
        if let Some(found) = self.0.get(descriptor) {
            return found.clone();
        }

        let model = descriptor
            .profiles
            .first()
            .map(String::as_str)
            .unwrap_or("<unnamed>");
        let mapping = mapping::resolve(descriptor);
        let violations = validate_generic(descriptor, mapping);
        for violation in &violations {
            log::warn!("inconsistent profile for `{model}`: {violation}");
        }

        let resolution = Resolution {
            mapping,
            violations,
        };
        self.0.insert(descriptor.clone(), resolution.clone());
        resolution
    }
}

#[cfg(test)]
mod tests {
    use xrpad_types::profile::TargetingRayMode;

    use super::*;

    fn descriptor(profiles: &[&str], trigger: bool, touchpad: bool, thumbstick: bool) -> ProfileDescriptor {
        ProfileDescriptor {
            profiles: profiles.iter().map(|s| s.to_string()).collect(),
            targeting: TargetingRayMode::TrackedPointer,
            has_trigger_like_button: trigger,
            has_touchpad: touchpad,
            has_thumbstick: thumbstick,
        }
    }

    #[test]
    fn name_syntax_is_enforced() {
        assert!(check_profile_names(&descriptor(&["acme-hyperwand"], true, false, false)).is_ok());

        let bad = check_profile_names(&descriptor(&["Acme_Hyperwand"], true, false, false));
        assert!(matches!(bad, Err(ProfileFormatError(name)) if name == "Acme_Hyperwand"));

        assert!(check_profile_names(&descriptor(&["-leading"], true, false, false)).is_err());
        assert!(check_profile_names(&descriptor(&[""], true, false, false)).is_err());
    }

    #[test]
    fn button_controller_with_touchpad_is_flagged() {
        let descriptor = descriptor(&["acme-clicker", "button-controller"], true, true, false);
        let violations = validate_generic(&descriptor, mapping::resolve(&descriptor));
        assert!(violations.contains(&ProfileViolation::ForbiddenTouchpad(GenericProfile::Button)));
    }

    #[test]
    fn touchpad_controller_without_trigger_may_lack_a_mapping() {
        let descriptor = descriptor(&["acme-pad", "touchpad-controller"], false, true, false);
        let mapping = mapping::resolve(&descriptor);
        assert_eq!(mapping, Mapping::None);
        assert!(validate_generic(&descriptor, mapping).is_empty());
    }

    #[test]
    fn touchpad_controller_with_trigger_requires_the_mapping() {
        let descriptor = descriptor(&["acme-pad", "touchpad-controller"], true, true, false);
        // Resolution under a non-qualifying targeting mode yields no
        // mapping, which the generic profile then flags.
        let violations = validate_generic(&descriptor, Mapping::None);
        assert!(violations
            .contains(&ProfileViolation::MappingNotResolved(GenericProfile::Touchpad)));
    }

    #[test]
    fn thumbstick_controller_mirrors_touchpad_rules() {
        let descriptor = descriptor(&["acme-stick", "thumbstick-controller"], true, true, false);
        let violations = validate_generic(&descriptor, Mapping::XrStandard);
        assert!(violations.contains(&ProfileViolation::MissingThumbstick(GenericProfile::Thumbstick)));
        assert!(violations.contains(&ProfileViolation::ForbiddenTouchpad(GenericProfile::Thumbstick)));
    }

    #[test]
    fn dual_controller_requires_both_controls() {
        let descriptor = descriptor(
            &["acme-deluxe", "touchpad-thumbstick-controller"],
            true,
            true,
            false,
        );
        let violations = validate_generic(&descriptor, Mapping::XrStandard);
        assert_eq!(
            violations,
            vec![ProfileViolation::MissingThumbstick(
                GenericProfile::TouchpadThumbstick
            )]
        );
    }

    #[test]
    fn non_generic_terminal_and_empty_list_are_advisory() {
        let named = descriptor(&["acme-hyperwand"], true, false, false);
        let violations = validate_generic(&named, Mapping::XrStandard);
        assert_eq!(
            violations,
            vec![ProfileViolation::NonGenericTerminal("acme-hyperwand".to_owned())]
        );

        let unnamed = descriptor(&[], true, false, false);
        assert_eq!(
            validate_generic(&unnamed, Mapping::XrStandard),
            vec![ProfileViolation::EmptyProfileList]
        );
    }

    #[test]
    fn cache_distinguishes_targeting_modes_of_one_model() {
        let cache = ResolutionCache::new();
        let tracked = descriptor(&["acme-hyperwand", "button-controller"], true, false, false);
        let mut gaze = tracked.clone();
        gaze.targeting = TargetingRayMode::Gaze;

        // Same model name, different hosts' targeting: the gaze source
        // must not pin the tracked-pointer source to an empty mapping.
        assert_eq!(cache.resolve(&gaze).mapping, Mapping::None);
        assert_eq!(cache.resolve(&tracked).mapping, Mapping::XrStandard);
        assert_eq!(cache.resolve(&gaze).mapping, Mapping::None);
    }

    #[test]
    fn cache_returns_the_same_resolution_per_model() {
        let cache = ResolutionCache::new();
        let descriptor = descriptor(&["acme-clicker", "button-controller"], true, false, false);

        let first = cache.resolve(&descriptor);
        let second = cache.resolve(&descriptor);
        assert_eq!(first, second);
        assert_eq!(first.mapping, Mapping::XrStandard);
        assert!(first.violations.is_empty());
    }
}
