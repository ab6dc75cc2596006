//! # Marcher Application Logic
//!
//! Parses the command line into [`render::RenderSettings`] and drives one of
//! two modes:
//!
//! - **Windowed**: the interactive loop. Each frame polls input, publishes a
//!   moved camera, lets the painters work, presents the framebuffer and does
//!   the performance accounting. With worker threads the pool paints in the
//!   background and the loop only paces itself to the target frame rate.
//!   With `--threads 0` the loop paints on its own thread and a
//!   [`render::FrameBudget`] sizes each frame's share of pixels.
//! - **Offline**: shades one full frame row by row and saves it.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use render::config::{
    CAMERA_START, CAMERA_YAW, INITIAL_WORKLOAD, MAX_WORKLOAD, MIN_WORKLOAD, SCREEN_HEIGHT,
    SCREEN_WIDTH, TARGET_FPS, THREADS, TIME_STEP,
};
use render::offline::{render_frame, render_frame_simd, save_image, snapshot_path};
use render::{
    Camera, Display, FrameBudget, Framebuffer, InputState, Painter, PartitionWriter,
    PerformanceMonitor, PoolOptions, RenderError, RenderPool, RenderSettings, Shader,
    ShaderConfig,
};
use scene::SceneKind;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "marcher", version, about = "CPU ray marcher for signed distance field scenes")]
pub struct Args {
    /// Scene to render.
    #[arg(long, default_value_t = SceneKind::default())]
    pub scene: SceneKind,

    #[arg(long, default_value_t = SCREEN_WIDTH)]
    pub width: u32,

    #[arg(long, default_value_t = SCREEN_HEIGHT)]
    pub height: u32,

    /// Painter threads; 0 paints on the main thread under a frame budget.
    #[arg(long, default_value_t = THREADS)]
    pub threads: usize,

    /// Shade one pixel at a time instead of eight.
    #[arg(long)]
    pub scalar: bool,

    /// Reshade pixels even when they were already painted for this camera.
    #[arg(long)]
    pub no_cache: bool,

    /// Target frame rate.
    #[arg(long, default_value_t = TARGET_FPS)]
    pub fps: u32,

    /// Render one frame to this file (`.png` or `.ppm`) and exit.
    #[arg(long, value_name = "PATH")]
    pub offline: Option<PathBuf>,

    /// Scene time in seconds for offline frames.
    #[arg(long, default_value_t = 0.0)]
    pub time: f32,

    /// Seed for the painters' pixel picks.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// What the process does after parsing its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionMode {
    /// Paint into a window until it is closed.
    Windowed,
    /// Write one frame to the given path.
    Offline(PathBuf),
}

impl Args {
    pub fn mode(&self) -> ExecutionMode {
        match &self.offline {
            Some(path) => ExecutionMode::Offline(path.clone()),
            None => ExecutionMode::Windowed,
        }
    }

    pub fn settings(&self) -> RenderSettings {
        let defaults = RenderSettings::default();
        RenderSettings {
            width: self.width,
            height: self.height,
            threads: self.threads,
            simd: !self.scalar,
            write_cache: !self.no_cache,
            target_fps: self.fps,
            seed: self.seed.unwrap_or(defaults.seed),
            ..defaults
        }
    }
}

/// Runs the mode selected by `args`.
///
/// # Errors
///
/// Returns invalid dimensions, window or GPU setup failures, image I/O errors
/// and panicked render workers.
pub fn run(args: &Args) -> Result<()> {
    let settings = args.settings();
    ensure!(
        settings.width > 0 && settings.height > 0,
        RenderError::InvalidDimensions {
            width: settings.width,
            height: settings.height,
        }
    );
    info!(scene = %args.scene, width = settings.width, height = settings.height, "starting");

    match args.mode() {
        ExecutionMode::Offline(path) => render_offline(args.scene, &settings, args.time, &path),
        ExecutionMode::Windowed => run_windowed(args.scene, &settings),
    }
}

fn start_camera(settings: &RenderSettings) -> Camera {
    Camera::new(
        settings.fov_degrees,
        settings.width,
        settings.height,
        CAMERA_START,
        CAMERA_YAW,
    )
}

fn render_offline(scene: SceneKind, settings: &RenderSettings, time: f32, path: &Path) -> Result<()> {
    let camera = start_camera(settings);
    let config = ShaderConfig {
        time,
        ..ShaderConfig::default()
    };
    let shader = Shader::new(&config, &camera, &scene);

    let started = Instant::now();
    let rgb = if settings.simd {
        render_frame_simd(&shader, settings.width, settings.height)
    } else {
        render_frame(&shader, settings.width, settings.height)
    };
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        simd = settings.simd,
        "offline frame shaded"
    );

    save_image(path, settings.width, settings.height, &rgb)
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Painting on the main thread, sized by the frame budget.
struct InlinePainter {
    painter: Painter,
    writer: PartitionWriter,
    budget: FrameBudget,
    workload: f32,
    /// Whether the last frame shaded everything it asked for.
    filled: bool,
    version: u64,
    simd: bool,
}

impl InlinePainter {
    fn paint(&mut self, scene: &SceneKind, camera: &Camera, config: &ShaderConfig) -> usize {
        self.painter.sync_epoch(self.version);
        let shader = Shader::new(config, camera, scene);
        let pixels = self.workload as usize;
        let (wanted, shaded) = if self.simd {
            let batches = (pixels / 8).max(1);
            let shaded = self.painter.paint_simd(&shader, &mut self.writer, batches);
            (batches * 8, shaded)
        } else {
            let wanted = pixels.max(1);
            (wanted, self.painter.paint(&shader, &mut self.writer, wanted))
        };
        self.filled = shaded >= wanted;
        shaded
    }
}

enum Painters {
    Inline(Box<InlinePainter>),
    Pool(RenderPool<SceneKind>),
}

impl Painters {
    fn start(
        scene: SceneKind,
        framebuffer: &Arc<Framebuffer>,
        camera: Camera,
        config: ShaderConfig,
        settings: &RenderSettings,
    ) -> Result<Self> {
        if settings.threads == 0 {
            let writer = framebuffer.writer();
            let painter = Painter::new(
                settings.width,
                settings.height,
                writer.range(),
                settings.write_cache,
                settings.seed,
            );
            let budget = FrameBudget::new(settings.target_fps, settings.report_interval)
                .with_limits(MIN_WORKLOAD, MAX_WORKLOAD);
            info!(simd = settings.simd, "painting on the main thread");
            return Ok(Self::Inline(Box::new(InlinePainter {
                painter,
                writer,
                budget,
                workload: INITIAL_WORKLOAD,
                filled: true,
                version: 0,
                simd: settings.simd,
            })));
        }

        let options = PoolOptions {
            threads: settings.threads,
            simd: settings.simd,
            cache: settings.write_cache,
            seed: settings.seed,
            ..PoolOptions::default()
        };
        let pool = RenderPool::spawn(scene, framebuffer, camera, config, options)
            .context("failed to start render workers")?;
        Ok(Self::Pool(pool))
    }

    fn move_camera(&mut self, camera: Camera) {
        match self {
            Self::Inline(inline) => inline.version += 1,
            Self::Pool(pool) => pool.update_camera(camera),
        }
    }

    fn update_config(&self, config: ShaderConfig) {
        if let Self::Pool(pool) = self {
            pool.update_config(config);
        }
    }

    /// Does this frame's painting and returns the pixels shaded.
    fn paint(&mut self, scene: &SceneKind, camera: &Camera, config: &ShaderConfig) -> u64 {
        match self {
            Self::Inline(inline) => inline.paint(scene, camera, config) as u64,
            Self::Pool(pool) => pool.take_painted(),
        }
    }

    /// Closes the frame: the inline painter rescales its workload, the pool
    /// sleeps off whatever is left of the frame period.
    fn end_frame(&mut self, frame_start: Instant, frame_period: Duration) {
        match self {
            Self::Inline(inline) => {
                inline
                    .budget
                    .tick_with(&mut inline.workload, inline.filled);
            }
            Self::Pool(_) => {
                let elapsed = frame_start.elapsed();
                if elapsed < frame_period {
                    std::thread::sleep(frame_period - elapsed);
                }
            }
        }
    }

    fn shutdown(self) -> Result<()> {
        match self {
            Self::Inline(_) => Ok(()),
            Self::Pool(pool) => pool.shutdown().context("render workers failed"),
        }
    }
}

fn run_windowed(scene: SceneKind, settings: &RenderSettings) -> Result<()> {
    let mut display = Display::new("marcher", settings.width, settings.height)?;
    let framebuffer = Arc::new(Framebuffer::new(settings.width, settings.height)?);
    let mut camera = start_camera(settings);
    let mut config = ShaderConfig::default();
    let mut input = InputState::default();
    let mut monitor = PerformanceMonitor::new(settings.report_interval);
    let frame_period = Duration::from_secs_f32(1.0 / settings.target_fps.max(1) as f32);

    let mut painters = Painters::start(scene, &framebuffer, camera, config, settings)?;

    let result = loop {
        let frame_start = Instant::now();
        monitor.tick();

        if !display.pump(&mut input) || input.quit {
            info!("window closed");
            break Ok(());
        }
        if input.apply(&mut camera, settings.turn_speed, settings.walk_speed) {
            painters.move_camera(camera);
        }

        monitor.add_work(painters.paint(&scene, &camera, &config));
        if let Err(err) = display.present(&framebuffer) {
            break Err(err);
        }
        if input.take_snapshot() {
            let path = snapshot_path(Path::new("."), "png");
            if let Err(err) = save_image(&path, settings.width, settings.height, &framebuffer.to_rgb()) {
                error!(error = %err, "snapshot failed");
            }
        }

        config.advance(TIME_STEP);
        painters.update_config(config);
        painters.end_frame(frame_start, frame_period);
        monitor.tock();
    };

    painters.shutdown()?;
    result
}
