//! Frame timing for the on-screen readout.
//!
//! # Example
//!
//! ```
//! use lorenz_wave::time::FrameTimer;
//!
//! let mut timer = FrameTimer::new();
//!
//! // In the render loop:
//! if timer.tick() {
//!     println!("{}", timer.summary());
//! }
//! ```

use std::time::{Duration, Instant};

/// Counts frames and measures frame time and FPS.
///
/// FPS is recomputed once per refresh interval (one second by default), the
/// same cadence the readout is updated at.
#[derive(Debug)]
pub struct FrameTimer {
    /// When the last frame occurred.
    last_frame: Instant,
    /// Duration of the most recent frame.
    frame_time: Duration,
    /// Total frames since start.
    frame_count: u64,
    /// FPS over the last completed interval.
    fps: f32,
    /// Frame count at last FPS update.
    interval_start_frame: u64,
    /// Time of last FPS update.
    interval_start: Instant,
    refresh_interval: Duration,
}

impl FrameTimer {
    /// Start timing from now with a one second refresh interval.
    pub fn new() -> Self {
        Self::with_refresh_interval(Duration::from_secs(1))
    }

    pub fn with_refresh_interval(refresh_interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            frame_time: Duration::ZERO,
            frame_count: 0,
            fps: 0.0,
            interval_start_frame: 0,
            interval_start: now,
            refresh_interval,
        }
    }

    /// Record a frame. Returns `true` when the FPS value was refreshed.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> bool {
        self.frame_time = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;

        let elapsed = now.saturating_duration_since(self.interval_start);
        if elapsed >= self.refresh_interval {
            let frames = self.frame_count - self.interval_start_frame;
            self.fps = frames as f32 / elapsed.as_secs_f32();
            self.interval_start_frame = self.frame_count;
            self.interval_start = now;
            true
        } else {
            false
        }
    }

    /// Total frames recorded.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Duration of the most recent frame.
    #[inline]
    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// `"<fps> fps | <ms> ms/frame"`.
    pub fn summary(&self) -> String {
        format!(
            "{:.0} fps | {} ms/frame",
            self.fps,
            self.frame_time.as_millis()
        )
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_new() {
        let timer = FrameTimer::new();
        assert_eq!(timer.frame(), 0);
        assert_eq!(timer.fps(), 0.0);
        assert_eq!(timer.frame_time(), Duration::ZERO);
    }

    #[test]
    fn test_fps_refreshes_once_per_interval() {
        let mut timer = FrameTimer::with_refresh_interval(Duration::from_secs(1));
        let start = timer.interval_start;

        for i in 1..30 {
            assert!(!timer.tick_at(start + Duration::from_millis(i * 20)));
        }
        assert_eq!(timer.fps(), 0.0);

        // 30th frame lands exactly on the interval boundary
        assert!(timer.tick_at(start + Duration::from_secs(1)));
        assert!((timer.fps() - 30.0).abs() < 1e-3);
        assert_eq!(timer.frame(), 30);
    }

    #[test]
    fn test_frame_time_tracks_last_frame() {
        let mut timer = FrameTimer::new();
        let start = timer.last_frame;
        timer.tick_at(start + Duration::from_millis(16));
        timer.tick_at(start + Duration::from_millis(50));
        assert_eq!(timer.frame_time(), Duration::from_millis(34));
        assert!(timer.summary().ends_with("34 ms/frame"));
    }
}
