use std::sync::{Arc, Weak};

use flume::{Receiver, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use thunderdome::{Arena, Index};
use xrpad_types::{
    event::{SourceEvent, SourceSample},
    profile::ProfileDescriptor,
    source_interface::{RuntimeInterface, RuntimeInterfaceError, RuntimeInterfaceTrait},
    FrameId, SourceId,
};

use crate::{
    frame::FrameClock,
    gamepad::EnumerableGamepad,
    input_source::InputSource,
    mapping,
    profile::{self, ResolutionCache},
    snapshot::InputSnapshot,
};

type FrameCallback = Box<dyn FnMut(&Frame) + Send>;

/**
 * Owns the input-source registry and drives the per-frame input cycle.
 *
 * Producers reach the runtime only through `RuntimeInterface`. Their
 * traffic is queued and applied at frame boundaries, strictly before the
 * frame's callbacks run, so a batch never observes a half-applied update.
 */
pub struct Runtime {
    pub(crate) clock: Arc<FrameClock>,
    resolutions: ResolutionCache,
    sources: RwLock<Arena<Arc<InputSource>>>,
    source_events_send: Sender<SourceEvent>,
    source_events_rec: Receiver<SourceEvent>,
    callbacks: Mutex<Vec<FrameCallback>>,
    system_pads: RwLock<Vec<Arc<dyn EnumerableGamepad>>>,
}

impl Runtime {
    pub fn new() -> Arc<Self> {
        let (source_events_send, source_events_rec) = flume::bounded(100);

        Arc::new(Self {
            clock: Arc::new(FrameClock::new()),
            resolutions: ResolutionCache::new(),
            sources: RwLock::new(Arena::new()),
            source_events_send,
            source_events_rec,
            callbacks: Mutex::new(Vec::new()),
            system_pads: RwLock::new(Vec::new()),
        })
    }

    /// Connect a sample producer. The returned interface is the
    /// producer's only link to the runtime.
    pub fn create_interface(self: &Arc<Self>) -> RuntimeInterface {
        RuntimeInterface(Arc::new(EmbeddedRuntimeInterface {
            runtime: Arc::downgrade(self),
            sender: self.source_events_send.clone(),
        }))
    }

    pub fn source(&self, id: SourceId) -> Option<Arc<InputSource>> {
        let index = Index::from_bits(id.0)?;
        self.sources.read().get(index).cloned()
    }

    pub fn sources(&self) -> Vec<Arc<InputSource>> {
        self.sources
            .read()
            .iter()
            .map(|(_, source)| source.clone())
            .collect()
    }

    /// Register a frame callback. Callbacks run once per `run_frame`, in
    /// registration order.
    pub fn register_frame_callback(&self, callback: impl FnMut(&Frame) + Send + 'static) {
        self.callbacks.lock().push(Box::new(callback));
    }

    /// Merge a host-owned pad (a plain system gamepad) into the global
    /// listing assembled by `system_gamepads`.
    pub fn attach_system_gamepad(&self, pad: Arc<dyn EnumerableGamepad>) {
        self.system_pads.write().push(pad);
    }

    /// Assemble the host's global gamepad listing. Exclusion of
    /// source-bound pads is a query at assembly time, not a shared
    /// exclusion list: every candidate, host-owned or produced by this
    /// runtime, is asked; pads produced by this runtime always answer
    /// source-bound and never appear.
    pub fn system_gamepads(&self) -> Vec<Arc<dyn EnumerableGamepad>> {
        let sources = self.sources.read();
        let source_pads = sources
            .iter()
            .filter_map(|(_, source)| source.gamepad())
            .map(|pad| Arc::new(pad) as Arc<dyn EnumerableGamepad>);

        self.system_pads
            .read()
            .iter()
            .cloned()
            .chain(source_pads)
            .filter(|pad| !pad.is_source_bound())
            .collect()
    }

    /// Drive one animation frame: apply queued producer traffic, commit
    /// deferred publishes, then run the callbacks as one batch. Every
    /// snapshot read made by the batch observes the state as of the
    /// frame's start.
    pub fn run_frame(&self) {
        for event in self.source_events_rec.try_iter() {
            self.apply_event(event);
        }

        {
            let sources = self.sources.read();
            for (_, source) in sources.iter() {
                source.store.commit_pending();
            }
        }

        let frame = self.clock.begin_batch();
        let context = Frame {
            frame,
            runtime: self,
        };
        {
            let mut callbacks = self.callbacks.lock();
            for callback in callbacks.iter_mut() {
                callback(&context);
            }
        }
        self.clock.end_batch();
    }

    pub(crate) fn register_source(
        &self,
        descriptor: ProfileDescriptor,
    ) -> Result<SourceId, RuntimeInterfaceError> {
        profile::check_profile_names(&descriptor)?;
        let resolution = self.resolutions.resolve(&descriptor);

        let source = Arc::new(InputSource::new(descriptor, resolution, self.clock.clone()));
        let index = self.sources.write().insert(source);
        Ok(SourceId(index.to_bits()))
    }

    fn apply_event(&self, event: SourceEvent) {
        match event {
            SourceEvent::Sample(sample) => self.apply_sample(sample),
            SourceEvent::Disconnect(id) => self.apply_disconnect(id),
        }
    }

    fn apply_sample(&self, sample: SourceSample) {
        let source = match self.source(sample.source) {
            Some(source) => source,
            None => {
                log::debug!("dropping sample for unknown source {:?}", sample.source);
                return;
            }
        };

        let (buttons, axes) = mapping::layout_sample(&sample, source.mapping());
        source
            .store
            .publish(InputSnapshot::new(buttons, axes, true));
    }

    fn apply_disconnect(&self, id: SourceId) {
        let index = match Index::from_bits(id.0) {
            Some(index) => index,
            None => {
                log::debug!("dropping disconnect for malformed id {id:?}");
                return;
            }
        };

        // Removing the source from the registry makes later samples for
        // this id unresolvable, which is what drops them.
        match self.sources.write().remove(index) {
            Some(source) => source.store.publish_disconnect(),
            None => log::debug!("dropping disconnect for unknown source {id:?}"),
        }
    }
}

/// One callback batch. Hands callbacks a stable view of every source.
pub struct Frame<'a> {
    frame: FrameId,
    runtime: &'a Runtime,
}

impl Frame<'_> {
    pub fn id(&self) -> FrameId {
        self.frame
    }

    pub fn source(&self, id: SourceId) -> Option<Arc<InputSource>> {
        self.runtime.source(id)
    }

    pub fn sources(&self) -> Vec<Arc<InputSource>> {
        self.runtime.sources()
    }
}

/**
 * RuntimeInterface implementation for producers embedded in the same
 * process as the runtime
 */
#[derive(Debug)]
pub struct EmbeddedRuntimeInterface {
    runtime: Weak<Runtime>,
    sender: Sender<SourceEvent>,
}

impl RuntimeInterfaceTrait for EmbeddedRuntimeInterface {
    fn register_source(
        &self,
        descriptor: ProfileDescriptor,
    ) -> Result<SourceId, RuntimeInterfaceError> {
        let runtime = self
            .runtime
            .upgrade()
            .ok_or(RuntimeInterfaceError::RuntimeShutDown)?;
        runtime.register_source(descriptor)
    }

    fn disconnect_source(&self, id: SourceId) -> Result<(), RuntimeInterfaceError> {
        match self.sender.try_send(SourceEvent::Disconnect(id)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                log::warn!("event queue full, dropping disconnect for {id:?}");
                Ok(())
            }
            Err(TrySendError::Disconnected(_)) => Err(RuntimeInterfaceError::RuntimeShutDown),
        }
    }

    fn submit_sample(&self, sample: SourceSample) -> Result<(), RuntimeInterfaceError> {
        match self.sender.try_send(SourceEvent::Sample(sample)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(sample)) => {
                if let SourceEvent::Sample(sample) = sample {
                    log::debug!("event queue full, dropping sample for {:?}", sample.source);
                }
                Ok(())
            }
            Err(TrySendError::Disconnected(_)) => Err(RuntimeInterfaceError::RuntimeShutDown),
        }
    }
}
