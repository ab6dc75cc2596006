//! Frame timing and the workload feedback loop

use std::time::{Duration, Instant};

use tracing::info;

/// Measures frame times and logs throughput once per reporting interval.
pub struct PerformanceMonitor {
    interval: Duration,
    window_start: Instant,
    frame_start: Instant,
    frames: u32,
    work: u64,
}

impl PerformanceMonitor {
    pub fn new(report_interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            interval: report_interval,
            window_start: now,
            frame_start: now,
            frames: 0,
            work: 0,
        }
    }

    /// Marks the start of a timed frame.
    pub fn tick(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Marks the end of a frame and returns its length in seconds.
    pub fn tock(&mut self) -> f32 {
        let now = Instant::now();
        self.frames += 1;
        if now.duration_since(self.window_start) > self.interval {
            self.report(now);
        }
        now.duration_since(self.frame_start).as_secs_f32()
    }

    /// Counts units of work (shaded pixels) done in the current window.
    pub fn add_work(&mut self, units: u64) {
        self.work += units;
    }

    fn report(&mut self, now: Instant) {
        let elapsed = now.duration_since(self.window_start).as_secs_f32();
        let frames = self.frames.max(1) as f32;
        let ms_per_frame = elapsed * 1000.0 / frames;
        let units_per_ms = self.work as f32 / (elapsed * 1000.0);
        info!(
            fps = format_args!("{:.1}", frames / elapsed),
            ms_per_frame = format_args!("{ms_per_frame:.3}"),
            pixels_per_ms = format_args!("{units_per_ms:.1}"),
            "performance"
        );
        self.window_start = now;
        self.frames = 0;
        self.work = 0;
    }
}

/// Proportional controller that scales a per-frame workload so frames take
/// about `1 / target_fps` seconds.
pub struct FrameBudget {
    target_ms: f32,
    interval: Duration,
    window_start: Instant,
    frames: u32,
    min_workload: f32,
    max_workload: f32,
}

impl FrameBudget {
    pub fn new(target_fps: u32, report_interval: Duration) -> Self {
        Self {
            target_ms: 1000.0 / target_fps.max(1) as f32,
            interval: report_interval,
            window_start: Instant::now(),
            frames: 0,
            min_workload: 1.0,
            max_workload: f32::MAX,
        }
    }

    /// Bounds the workload the controller may hand out.
    #[must_use]
    pub fn with_limits(mut self, min: f32, max: f32) -> Self {
        self.min_workload = min.max(0.0);
        self.max_workload = max.max(self.min_workload);
        self
    }

    /// Call once per frame. Rescales `workload` by target over measured frame
    /// time, averaged over the current window, and returns the factor used.
    pub fn tick(&mut self, workload: &mut f32) -> f32 {
        self.tick_at(Instant::now(), workload, true)
    }

    /// Like [`FrameBudget::tick`], for a frame that may have run out of
    /// pixels to shade before using its whole workload. Such a frame leaves
    /// the workload alone and restarts the averaging window, so cheap frames
    /// over an already painted screen never inflate the next busy one.
    pub fn tick_with(&mut self, workload: &mut f32, filled: bool) -> f32 {
        self.tick_at(Instant::now(), workload, filled)
    }

    fn tick_at(&mut self, now: Instant, workload: &mut f32, filled: bool) -> f32 {
        if !filled {
            self.window_start = now;
            self.frames = 0;
            return 1.0;
        }
        self.frames += 1;
        let elapsed = now.duration_since(self.window_start);
        let ms_per_frame = elapsed.as_secs_f32() * 1000.0 / self.frames as f32;
        let adjustment = if ms_per_frame > 0.0 {
            self.target_ms / ms_per_frame
        } else {
            1.0
        };
        *workload = (*workload * adjustment).clamp(self.min_workload, self.max_workload);

        if elapsed > self.interval {
            info!(
                fps = format_args!("{:.1}", self.frames as f32 / elapsed.as_secs_f32()),
                ms_per_frame = format_args!("{ms_per_frame:.3}"),
                workload = format_args!("{:.1}", *workload),
                adjustment = format_args!("{adjustment:.3}"),
                "frame budget"
            );
            self.window_start = now;
            self.frames = 0;
        }
        adjustment
    }
}
