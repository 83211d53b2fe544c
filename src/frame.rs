//! Per-frame sequencing with a bounded number of frames in flight.
//!
//! [`run_frame`] is the frame algorithm independent of any GPU API: acquire a
//! slot from the [`InFlightLimiter`], update the game state, ask for a drawable
//! and either submit (handing the slot to the completion callback) or abandon
//! the frame (returning the slot immediately).

use std::sync::Arc;

use instant::{Duration, Instant};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Counting limiter for frames whose GPU work is still pending.
#[derive(Clone, Debug)]
pub struct InFlightLimiter {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// A held slot; dropping it returns the slot to the limiter.
#[derive(Debug)]
pub struct FrameSlot(OwnedSemaphorePermit);

impl InFlightLimiter {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    pub fn try_acquire(&self) -> Option<FrameSlot> {
        self.semaphore.clone().try_acquire_owned().ok().map(FrameSlot)
    }

    /// Waits until a slot is returned. Blocks forever if the GPU never completes.
    ///
    /// `None` only if the limiter was closed, which this crate never does.
    pub async fn acquire(&self) -> Option<FrameSlot> {
        self.semaphore.clone().acquire_owned().await.ok().map(FrameSlot)
    }
}

/// One frame's worth of work as seen by [`run_frame`].
pub trait FrameHandler {
    type Drawable;

    /// Called when every slot is taken; should make the GPU report finished work.
    fn wait_for_gpu(&mut self);

    /// Advances game state. Runs once per frame, even when the frame is skipped.
    fn update(&mut self);

    /// `None` when the display cannot currently be drawn to.
    fn next_drawable(&mut self) -> Option<Self::Drawable>;

    /// Encodes, submits and presents; `on_complete` must run once the GPU is done.
    fn submit(&mut self, drawable: Self::Drawable, on_complete: Box<dyn FnOnce() + Send + 'static>);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    Skipped,
}

pub fn run_frame<H: FrameHandler>(limiter: &InFlightLimiter, handler: &mut H) -> FrameOutcome {
    let slot = match limiter.try_acquire() {
        Some(slot) => slot,
        None => {
            handler.wait_for_gpu();
            match futures::executor::block_on(limiter.acquire()) {
                Some(slot) => slot,
                None => {
                    log::error!("In-flight limiter closed, frame skipped");
                    return FrameOutcome::Skipped;
                }
            }
        }
    };

    handler.update();

    let Some(drawable) = handler.next_drawable() else {
        drop(slot);
        log::trace!("No drawable available, frame skipped");
        return FrameOutcome::Skipped;
    };

    handler.submit(drawable, Box::new(move || drop(slot)));
    FrameOutcome::Presented
}

/// Presented/skipped counters with a once-per-second debug report.
#[derive(Debug)]
pub struct FrameStats {
    pub presented: u64,
    pub skipped: u64,
    window_start: Instant,
    window_frames: u32,
}

impl FrameStats {
    const REPORT_INTERVAL: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self {
            presented: 0,
            skipped: 0,
            window_start: Instant::now(),
            window_frames: 0,
        }
    }

    pub fn record(&mut self, outcome: FrameOutcome) {
        match outcome {
            FrameOutcome::Presented => {
                self.presented += 1;
                self.window_frames += 1;
            }
            FrameOutcome::Skipped => self.skipped += 1,
        }
        let elapsed = self.window_start.elapsed();
        if elapsed >= Self::REPORT_INTERVAL {
            log::debug!(
                "{:.1} fps ({} presented, {} skipped in total)",
                self.window_frames as f64 / elapsed.as_secs_f64(),
                self.presented,
                self.skipped
            );
            self.window_start = Instant::now();
            self.window_frames = 0;
        }
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}
