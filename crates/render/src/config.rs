//! Compile-time defaults
//!
//! Every tunable of the renderer lives here. [`RenderSettings::default`]
//! gathers the ones the binary lets the operator override.

use std::time::Duration;

use linalg::Vec3;

pub const SCREEN_WIDTH: u32 = 1280;
pub const SCREEN_HEIGHT: u32 = 720;
pub const FOV_DEGREES: f32 = 45.0;

pub const CAMERA_START: Vec3 = Vec3::new(0.0, 1.0, 4.5);
pub const CAMERA_YAW: f32 = 0.0;

/// Rays give up once `t` passes this distance.
pub const MAX_DIST: f32 = 10_000.0;
pub const MAX_ITS: u32 = 256;
/// A march hits once the field drops below `HIT_EPSILON * t`.
pub const HIT_EPSILON: f32 = 0.0005;

/// Soft shadow penumbra factor `k`.
pub const SHADOW_K: f32 = 32.0;
/// Hard cap on shadow march steps.
pub const SHADOW_MAX_STEPS: u32 = 256;

pub const TARGET_FPS: u32 = 20;
/// Scene time advanced per presented frame, in seconds.
pub const TIME_STEP: f32 = 0.1;
pub const WALK_SPEED: f32 = 0.2;
pub const TURN_SPEED: f32 = 0.05;

pub const THREADS: usize = 8;
/// Pixels a worker shades between checks of the quit flag and the camera
/// version. Batched workers shade this many pixels in groups of eight.
pub const WORKER_BATCH: usize = 512;

/// Initial pixels per frame when painting on the main thread.
pub const INITIAL_WORKLOAD: f32 = 1000.0;
pub const MIN_WORKLOAD: f32 = 64.0;
pub const MAX_WORKLOAD: f32 = 2_000_000.0;

pub const REPORT_INTERVAL: Duration = Duration::from_secs(2);

/// Operator-facing knobs, defaulting to the constants above.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub fov_degrees: f32,
    /// Worker threads; zero paints on the calling thread under the frame
    /// budget instead.
    pub threads: usize,
    pub simd: bool,
    pub write_cache: bool,
    pub target_fps: u32,
    pub walk_speed: f32,
    pub turn_speed: f32,
    pub report_interval: Duration,
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            fov_degrees: FOV_DEGREES,
            threads: THREADS,
            simd: true,
            write_cache: true,
            target_fps: TARGET_FPS,
            walk_speed: WALK_SPEED,
            turn_speed: TURN_SPEED,
            report_interval: REPORT_INTERVAL,
            seed: 0x5eed,
        }
    }
}
