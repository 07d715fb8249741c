use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use xrpad_types::FrameId;

/**
 * Tracks the host animation-frame cycle.
 *
 * One logical writer (the runtime's frame driver) advances the clock;
 * snapshot stores consult it to gate publishes. While `in_batch` is
 * raised, frame callbacks are running and the current snapshots must not
 * move underneath them.
 */
#[derive(Debug, Default)]
pub struct FrameClock {
    frame: AtomicU64,
    in_batch: AtomicBool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the most recently started batch.
    pub fn frame(&self) -> FrameId {
        FrameId(self.frame.load(Ordering::Acquire))
    }

    /// Whether a callback batch is currently executing.
    pub fn in_batch(&self) -> bool {
        self.in_batch.load(Ordering::Acquire)
    }

    pub(crate) fn begin_batch(&self) -> FrameId {
        let frame = self.frame.fetch_add(1, Ordering::AcqRel) + 1;
        self.in_batch.store(true, Ordering::Release);
        FrameId(frame)
    }

    pub(crate) fn end_batch(&self) {
        self.in_batch.store(false, Ordering::Release);
    }
}
