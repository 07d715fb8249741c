use std::sync::Arc;

use xrpad_types::gamepad::{GamepadButton, Mapping};

use crate::{input_source::InputSource, snapshot::InputSnapshot};

/// Entry in the host's global gamepad listing.
///
/// The listing assembler queries each candidate instead of maintaining a
/// shared exclusion list; entries that answer source-bound are skipped.
pub trait EnumerableGamepad: Send + Sync {
    fn id(&self) -> &str;
    fn is_source_bound(&self) -> bool;
}

/**
 * Gamepad-style attribute surface for one input source.
 *
 * `id` is forced to the empty string and `index` to -1 so the pad cannot
 * be correlated with entries of the host's global gamepad listing, which
 * never contains source-bound pads.
 */
#[derive(Debug, Clone)]
pub struct Gamepad {
    source: Arc<InputSource>,
}

impl Gamepad {
    pub(crate) fn new(source: Arc<InputSource>) -> Self {
        Self { source }
    }

    pub fn id(&self) -> &'static str {
        ""
    }

    pub fn index(&self) -> i64 {
        -1
    }

    pub fn mapping(&self) -> Mapping {
        self.source.mapping()
    }

    pub fn connected(&self) -> bool {
        self.source.connected()
    }

    /// The frame-stable snapshot backing `buttons`/`axes`.
    pub fn snapshot(&self) -> Arc<InputSnapshot> {
        self.source.snapshot()
    }

    pub fn buttons(&self) -> Vec<GamepadButton> {
        self.snapshot().buttons.clone()
    }

    pub fn axes(&self) -> Vec<f32> {
        self.snapshot().axes.clone()
    }

    /// Queried by the global listing assembler; pads produced here are
    /// always source-bound and therefore excluded.
    pub fn is_source_bound(&self) -> bool {
        true
    }
}

impl EnumerableGamepad for Gamepad {
    fn id(&self) -> &str {
        Gamepad::id(self)
    }

    fn is_source_bound(&self) -> bool {
        Gamepad::is_source_bound(self)
    }
}
