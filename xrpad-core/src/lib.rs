pub mod frame;
pub mod gamepad;
pub mod input_source;
pub mod mapping;
pub mod profile;
pub mod runtime;
pub mod snapshot;
