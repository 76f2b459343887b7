//! Frame-rate accounting over host-supplied timestamps.

/// Rolling one-second FPS window.
///
/// The host reports its animation-frame timestamp once per frame;
/// after each full second the frame count is published as the current
/// rate and the window restarts. Until the first window completes the
/// rate reads as zero.
#[derive(Debug, Default)]
pub struct FrameClock {
    start: Option<f64>,
    frames: u32,
    fps: f32,
}

impl FrameClock {
    /// Records one frame at `now_ms`.
    pub fn frame(&mut self, now_ms: f64) {
        let Some(start) = self.start else {
            self.start = Some(now_ms);
            return;
        };

        self.frames += 1;
        let elapsed = now_ms - start;
        if elapsed > 1000.0 {
            self.fps = (f64::from(self.frames) / (elapsed / 1000.0)) as f32;
            self.start = Some(now_ms);
            self.frames = 0;
        }
    }

    /// Frames per second over the last completed window.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}
