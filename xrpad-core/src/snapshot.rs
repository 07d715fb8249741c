use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use xrpad_types::{gamepad::GamepadButton, FrameId};

use crate::frame::FrameClock;

/// Immutable, frame-scoped capture of one source's button/axis state.
///
/// `frame` is the batch that first observes the snapshot. `connected`
/// reflects state as of that frame's start; mid-frame removal is only
/// visible to the following frame.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSnapshot {
    pub buttons: Vec<GamepadButton>,
    pub axes: Vec<f32>,
    pub connected: bool,
    pub frame: FrameId,
}

impl InputSnapshot {
    /// `frame` is stamped by the store on publish.
    pub fn new(buttons: Vec<GamepadButton>, axes: Vec<f32>, connected: bool) -> Self {
        Self {
            buttons,
            axes,
            connected,
            frame: FrameId::ZERO,
        }
    }

    /// Removal snapshot: last-seen values are retained, only `connected`
    /// flips. Retention avoids snapshot churn for consumers that hold
    /// the previous frame's data.
    pub fn disconnected_from(prev: &InputSnapshot) -> Self {
        Self {
            buttons: prev.buttons.clone(),
            axes: prev.axes.clone(),
            connected: false,
            frame: FrameId::ZERO,
        }
    }
}

/**
 * Latest published sample for one input source.
 *
 * Single writer, many readers. Reads are non-blocking and every read made
 * while one callback batch executes returns the same Arc. A publish
 * attempted mid-batch is parked, not applied; later parked publishes
 * overwrite earlier ones (deferred, never merged) and the survivor is
 * committed at the next frame boundary.
 */
#[derive(Debug)]
pub struct SnapshotStore {
    clock: Arc<FrameClock>,
    current: RwLock<Arc<InputSnapshot>>,
    pending: Mutex<Option<InputSnapshot>>,
}

impl SnapshotStore {
    pub fn new(clock: Arc<FrameClock>, initial: InputSnapshot) -> Self {
        let mut initial = initial;
        initial.frame = clock.frame().next();
        Self {
            clock,
            current: RwLock::new(Arc::new(initial)),
            pending: Mutex::new(None),
        }
    }

    /// Replace the current snapshot. Outside a batch the swap is
    /// immediate; inside one it is parked until the next boundary.
    pub fn publish(&self, snapshot: InputSnapshot) {
        if self.clock.in_batch() {
            *self.pending.lock() = Some(snapshot);
        } else {
            let mut snapshot = snapshot;
            snapshot.frame = self.clock.frame().next();
            *self.current.write() = Arc::new(snapshot);
        }
    }

    /// Publish the removal transition for this source.
    pub fn publish_disconnect(&self) {
        let prev = self.current();
        self.publish(InputSnapshot::disconnected_from(&prev));
    }

    /// The latest published snapshot. Stable for the duration of a batch.
    pub fn current(&self) -> Arc<InputSnapshot> {
        self.current.read().clone()
    }

    /// Frame-boundary commit of a parked publish. Called by the runtime
    /// before it starts the next batch.
    pub(crate) fn commit_pending(&self) {
        if let Some(mut snapshot) = self.pending.lock().take() {
            snapshot.frame = self.clock.frame().next();
            *self.current.write() = Arc::new(snapshot);
        }
    }
}
