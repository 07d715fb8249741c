use std::{fmt::Debug, ops::Deref, sync::Arc};

use thiserror::Error;

use crate::{
    event::SourceSample,
    profile::{ProfileDescriptor, ProfileFormatError},
    SourceId,
};

/**
 * The connection from a sample producer to the runtime
 */
#[derive(Debug, Clone)]
pub struct RuntimeInterface(pub Arc<dyn RuntimeInterfaceTrait>);

impl Deref for RuntimeInterface {
    type Target = dyn RuntimeInterfaceTrait;

    fn deref(&self) -> &Self::Target {
        self.0.deref()
    }
}

#[derive(Debug, Clone, Error)]
pub enum RuntimeInterfaceError {
    #[error("Runtime Shut Down")]
    RuntimeShutDown,
    #[error(transparent)]
    InvalidProfile(#[from] ProfileFormatError),
}

pub trait RuntimeInterfaceTrait: Debug + Send + Sync {
    /// Register a device model. Resolves and caches its mapping; generic
    /// profile inconsistencies are advisory and never reject the device.
    fn register_source(
        &self,
        descriptor: ProfileDescriptor,
    ) -> Result<SourceId, RuntimeInterfaceError>;

    /// Announce removal of the source. Takes effect at the next frame
    /// boundary; the batch in flight still observes the source connected.
    /// Never blocks, even when the event queue is saturated.
    fn disconnect_source(&self, id: SourceId) -> Result<(), RuntimeInterfaceError>;

    /// Fire-and-forget sample submission; never blocks. Samples for
    /// unknown or disconnected sources, and samples that overflow the
    /// event queue between frames, are dropped by the runtime.
    fn submit_sample(&self, sample: SourceSample) -> Result<(), RuntimeInterfaceError>;
}
