use std::sync::Arc;

use xrpad_core::runtime::Runtime;

pub use xrpad_core::gamepad::{EnumerableGamepad, Gamepad};
pub use xrpad_core::input_source::InputSource;
pub use xrpad_core::profile::ProfileViolation;
pub use xrpad_core::runtime::Frame;
pub use xrpad_core::snapshot::InputSnapshot;
pub use xrpad_types::event::{SourceSample, ThumbstickSample, TouchpadSample};
pub use xrpad_types::gamepad::{GamepadButton, Mapping};
pub use xrpad_types::profile::{GenericProfile, ProfileDescriptor, TargetingRayMode};
pub use xrpad_types::source_interface::{RuntimeInterface, RuntimeInterfaceError};
pub use xrpad_types::{FrameId, SourceId, Time};

pub fn load_runtime() -> XrPadRuntime {
    XrPadRuntime(Runtime::new())
}

/// Handle to an embedded runtime.
#[derive(Clone)]
pub struct XrPadRuntime(Arc<Runtime>);

impl XrPadRuntime {
    /// Connect a sample producer.
    pub fn create_interface(&self) -> RuntimeInterface {
        self.0.create_interface()
    }

    pub fn register_frame_callback(&self, callback: impl FnMut(&Frame) + Send + 'static) {
        self.0.register_frame_callback(callback)
    }

    /// Drive one animation frame: boundary work first, then the callback
    /// batch.
    pub fn run_frame(&self) {
        self.0.run_frame()
    }

    pub fn source(&self, id: SourceId) -> Option<Arc<InputSource>> {
        self.0.source(id)
    }

    pub fn sources(&self) -> Vec<Arc<InputSource>> {
        self.0.sources()
    }

    /// Merge a host-owned pad into the global listing.
    pub fn attach_system_gamepad(&self, pad: Arc<dyn EnumerableGamepad>) {
        self.0.attach_system_gamepad(pad)
    }

    /// The host's global gamepad listing; never contains source-bound
    /// pads.
    pub fn system_gamepads(&self) -> Vec<Arc<dyn EnumerableGamepad>> {
        self.0.system_gamepads()
    }
}
