//! Frame timing for hosts.
//!
//! The field itself advances in ticks, not seconds. Hosts still want to
//! know how fast ticks arrive, for the window title and for logging.
//! `web_time::Instant` is `std::time::Instant` on native targets and
//! `performance.now()` in the browser, so the same clock serves both.
//!
//! # Example
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//!
//! // once per tick:
//! if let Some(fps) = clock.update() {
//!     window.set_title(&format!("plexus - {:.0} fps", fps));
//! }
//! ```

use std::time::Duration;

use web_time::Instant;

/// Counts frames and measures their rate.
#[derive(Debug)]
pub struct FrameClock {
    /// When the clock was created.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Time since last frame in seconds.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
}

impl FrameClock {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        Self::with_interval(Duration::from_millis(500))
    }

    /// Create a clock that recomputes FPS every `interval`.
    pub fn with_interval(interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: interval,
        }
    }

    /// Record a frame. Returns the new FPS when it was just recomputed.
    pub fn update(&mut self) -> Option<f32> {
        let now = Instant::now();

        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32().max(f32::EPSILON);
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            return Some(self.fps);
        }
        None
    }

    /// Seconds since the clock was created.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Seconds between the last two frames.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames recorded.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Most recently computed frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
