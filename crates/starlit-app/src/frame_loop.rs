//! Display-paced frame loop.
//!
//! The scene advances exactly one step per displayed frame. The loop
//! accumulates wall-clock time and releases a frame whenever a full frame
//! interval has passed, dropping any backlog beyond one frame so a stall never
//! turns into a burst of catch-up frames.

use std::time::{Duration, Instant};

use tracing::warn;

/// Longest frame time accepted before clamping.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Seconds between frames at `target_fps`.
pub fn frame_interval(target_fps: u32) -> f64 {
    1.0 / target_fps.max(1) as f64
}

/// Time bookkeeping shared by the real and the test loop.
#[derive(Debug, Clone)]
struct Pacer {
    interval: f64,
    accumulator: f64,
    elapsed: f64,
    frame_count: u64,
}

impl Pacer {
    fn new(target_fps: u32) -> Self {
        Self {
            interval: frame_interval(target_fps),
            accumulator: 0.0,
            elapsed: 0.0,
            frame_count: 0,
        }
    }

    /// Feed `frame_time` seconds. Runs `frame_fn(frame, elapsed)` at most
    /// once and reports whether it ran.
    fn advance(&mut self, frame_time: f64, frame_fn: impl FnOnce(u64, f64)) -> bool {
        let clamped = frame_time.clamp(0.0, MAX_FRAME_TIME);
        self.accumulator += clamped;
        self.elapsed += clamped;

        if self.accumulator < self.interval {
            return false;
        }
        self.accumulator = (self.accumulator - self.interval).min(self.interval);
        frame_fn(self.frame_count, self.elapsed);
        self.frame_count += 1;
        true
    }

    fn until_next(&self) -> f64 {
        (self.interval - self.accumulator).max(0.0)
    }
}

/// Wall-clock driven frame loop.
///
/// Call [`tick`](Self::tick) repeatedly; sleep for
/// [`until_next_frame`](Self::until_next_frame) in between.
pub struct FrameLoop {
    previous_time: Instant,
    pacer: Pacer,
}

impl FrameLoop {
    pub fn new(target_fps: u32) -> Self {
        Self {
            previous_time: Instant::now(),
            pacer: Pacer::new(target_fps),
        }
    }

    /// Measure elapsed time and run `frame_fn(frame, elapsed_seconds)` if a
    /// frame is due. Returns whether a frame ran.
    pub fn tick(&mut self, frame_fn: impl FnOnce(u64, f64)) -> bool {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;

        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
        }
        self.pacer.advance(frame_time, frame_fn)
    }

    /// How long to wait before the next frame is due.
    pub fn until_next_frame(&self) -> Duration {
        Duration::from_secs_f64(self.pacer.until_next())
    }

    /// Frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.pacer.frame_count
    }

    /// Seconds since the loop started, clamped per frame.
    pub fn elapsed(&self) -> f64 {
        self.pacer.elapsed
    }
}
