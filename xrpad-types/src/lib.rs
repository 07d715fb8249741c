pub mod event;
pub mod gamepad;
pub mod profile;
pub mod source_interface;

/**
 * Identifies one input source for the lifetime of the runtime that
 * registered it. Ids are never reused, so a stale id after disconnect
 * simply stops resolving.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(pub u64);

/// Identifies one callback batch of the host animation-frame cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(pub u64);

impl FrameId {
    pub const ZERO: Self = Self(0);

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(pub u64);
