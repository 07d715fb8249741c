use std::sync::Arc;

use xrpad_types::{gamepad::Mapping, profile::ProfileDescriptor};

use crate::{
    frame::FrameClock,
    gamepad::Gamepad,
    mapping,
    profile::{ProfileViolation, Resolution},
    snapshot::{InputSnapshot, SnapshotStore},
};

/**
 * One controller or hand representation recognized by the runtime.
 *
 * The descriptor, resolved mapping, and advisory violations are fixed at
 * registration; only the snapshot store moves afterwards.
 */
#[derive(Debug)]
pub struct InputSource {
    descriptor: ProfileDescriptor,
    mapping: Mapping,
    violations: Vec<ProfileViolation>,
    pub(crate) store: SnapshotStore,
}

impl InputSource {
    pub(crate) fn new(
        descriptor: ProfileDescriptor,
        resolution: Resolution,
        clock: Arc<FrameClock>,
    ) -> Self {
        let (buttons, axes) = mapping::reserved_layout(resolution.mapping);
        Self {
            descriptor,
            mapping: resolution.mapping,
            violations: resolution.violations,
            store: SnapshotStore::new(clock, InputSnapshot::new(buttons, axes, true)),
        }
    }

    /// Ordered most-specific first; opaque beyond mapping resolution.
    pub fn profiles(&self) -> &[String] {
        &self.descriptor.profiles
    }

    pub fn descriptor(&self) -> &ProfileDescriptor {
        &self.descriptor
    }

    pub fn mapping(&self) -> Mapping {
        self.mapping
    }

    /// Advisory generic-profile inconsistencies recorded at registration.
    pub fn violations(&self) -> &[ProfileViolation] {
        &self.violations
    }

    pub fn snapshot(&self) -> Arc<InputSnapshot> {
        self.store.current()
    }

    pub fn connected(&self) -> bool {
        self.store.current().connected
    }

    /// The exposed gamepad surface. `None` when the device reports no
    /// button/axis data; stable identity otherwise.
    pub fn gamepad(self: &Arc<Self>) -> Option<Gamepad> {
        if !self.descriptor.reports_inputs() {
            return None;
        }
        Some(Gamepad::new(self.clone()))
    }
}
