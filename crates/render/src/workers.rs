//! Pool of painter threads over disjoint framebuffer partitions
//!
//! The render loop owns the camera and shader configuration and publishes
//! copies through read-write locks. Workers take a snapshot before every
//! batch. Moving the camera bumps a version counter; each worker compares it
//! with its painter's epoch and clears its write cache when it changed.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::RwLock;
use scene::Scene;
use tracing::{debug, error, info};

use crate::camera::Camera;
use crate::config::{THREADS, WORKER_BATCH};
use crate::error::RenderError;
use crate::framebuffer::{Framebuffer, PartitionWriter};
use crate::painter::Painter;
use crate::shader::{Shader, ShaderConfig};

/// Pause taken by a worker whose whole partition is already shaded.
const IDLE_BACKOFF: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolOptions {
    pub threads: usize,
    pub simd: bool,
    pub cache: bool,
    /// Pixels per painting call between checks of the shared state.
    pub batch: usize,
    pub seed: u64,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            threads: THREADS,
            simd: true,
            cache: true,
            batch: WORKER_BATCH,
            seed: 0,
        }
    }
}

struct Shared<S> {
    scene: S,
    camera: RwLock<Camera>,
    config: RwLock<ShaderConfig>,
    version: AtomicU64,
    quit: AtomicBool,
    painted: AtomicU64,
}

pub struct RenderPool<S: Scene + 'static> {
    shared: Arc<Shared<S>>,
    handles: Vec<JoinHandle<()>>,
}

impl<S: Scene + 'static> RenderPool<S> {
    pub fn spawn(
        scene: S,
        framebuffer: &Arc<Framebuffer>,
        camera: Camera,
        config: ShaderConfig,
        options: PoolOptions,
    ) -> Result<Self, RenderError> {
        let shared = Arc::new(Shared {
            scene,
            camera: RwLock::new(camera),
            config: RwLock::new(config),
            version: AtomicU64::new(0),
            quit: AtomicBool::new(false),
            painted: AtomicU64::new(0),
        });
        let mut pool = Self {
            shared,
            handles: Vec::new(),
        };

        let (width, height) = (framebuffer.width(), framebuffer.height());
        for (i, writer) in framebuffer.split(options.threads).into_iter().enumerate() {
            let painter = Painter::new(
                width,
                height,
                writer.range(),
                options.cache,
                options.seed.wrapping_add(i as u64),
            );
            let shared = Arc::clone(&pool.shared);
            // on failure the pool drops here and joins what already started
            let handle = thread::Builder::new()
                .name(format!("painter-{i}"))
                .spawn(move || worker_loop(&shared, painter, writer, options))
                .map_err(RenderError::Spawn)?;
            pool.handles.push(handle);
        }

        info!(
            threads = pool.handles.len(),
            simd = options.simd,
            cache = options.cache,
            "render pool started"
        );
        Ok(pool)
    }

    /// Publishes a moved camera and starts a new epoch.
    pub fn update_camera(&self, camera: Camera) {
        *self.shared.camera.write() = camera;
        self.shared.version.fetch_add(1, Ordering::Release);
    }

    /// Publishes per-frame shading parameters without touching the epoch.
    pub fn update_config(&self, config: ShaderConfig) {
        *self.shared.config.write() = config;
    }

    pub fn version(&self) -> u64 {
        self.shared.version.load(Ordering::Acquire)
    }

    /// Pixels shaded since the previous call.
    pub fn take_painted(&self) -> u64 {
        self.shared.painted.swap(0, Ordering::Relaxed)
    }

    pub fn threads(&self) -> usize {
        self.handles.len()
    }

    /// Stops every worker and waits for it to finish.
    pub fn shutdown(mut self) -> Result<(), RenderError> {
        self.stop()
    }

    fn stop(&mut self) -> Result<(), RenderError> {
        self.shared.quit.store(true, Ordering::Release);
        let mut result = Ok(());
        for handle in self.handles.drain(..) {
            let name = handle.thread().name().unwrap_or("painter").to_owned();
            if handle.join().is_err() {
                error!(worker = %name, "render worker panicked");
                result = Err(RenderError::WorkerPanicked(name));
            }
        }
        if result.is_ok() {
            debug!("render pool stopped");
        }
        result
    }
}

impl<S: Scene + 'static> Drop for RenderPool<S> {
    fn drop(&mut self) {
        // failures are logged inside stop
        let _ = self.stop();
    }
}

fn worker_loop<S: Scene>(
    shared: &Shared<S>,
    mut painter: Painter,
    mut writer: PartitionWriter,
    options: PoolOptions,
) {
    let batches = (options.batch / 8).max(1);
    while !shared.quit.load(Ordering::Acquire) {
        painter.sync_epoch(shared.version.load(Ordering::Acquire));
        let camera = *shared.camera.read();
        let config = *shared.config.read();
        let shader = Shader::new(&config, &camera, &shared.scene);

        let shaded = if options.simd {
            painter.paint_simd(&shader, &mut writer, batches)
        } else {
            painter.paint(&shader, &mut writer, options.batch.max(1))
        };

        if shaded == 0 {
            thread::sleep(IDLE_BACKOFF);
        } else {
            shared.painted.fetch_add(shaded as u64, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linalg::Vec3;
    use scene::SceneKind;
    use std::time::Instant;

    fn wait_for(pool: &RenderPool<SceneKind>, pixels: u64) -> u64 {
        let deadline = Instant::now() + Duration::from_secs(30);
        let mut total = 0;
        while total < pixels && Instant::now() < deadline {
            total += pool.take_painted();
            thread::sleep(Duration::from_millis(5));
        }
        total
    }

    #[test]
    fn workers_fill_the_screen_and_stop() {
        let fb = Arc::new(Framebuffer::new(24, 16).unwrap());
        let camera = Camera::new(45.0, 24, 16, Vec3::new(0.0, 1.0, 4.5), 0.0);
        let options = PoolOptions {
            threads: 3,
            batch: 32,
            ..PoolOptions::default()
        };
        let pool = RenderPool::spawn(
            SceneKind::Ground,
            &fb,
            camera,
            ShaderConfig::default(),
            options,
        )
        .unwrap();
        assert_eq!(pool.threads(), 3);
        assert!(wait_for(&pool, 24 * 16) >= 24 * 16);

        let mut moved = camera;
        moved.turn(0.1);
        pool.update_camera(moved);
        assert_eq!(pool.version(), 1);
        assert!(wait_for(&pool, 1) > 0);

        pool.shutdown().unwrap();
        // the top row looks into the sky
        for x in 0..24 {
            assert_ne!(fb.get(x, 0), Some([0, 0, 0]));
        }
    }
}
