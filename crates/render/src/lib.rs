//! # Render
//!
//! CPU ray marching of [`scene::Scene`] fields into a shared framebuffer.
//!
//! - [`camera`] turns pixels into rays.
//! - [`shader`] marches rays and shades hits, one at a time or eight at once.
//! - [`painter`] fills a screen region progressively at random.
//! - [`workers`] runs one painter per thread over disjoint partitions.
//! - [`perf`] times frames and steers the per-frame workload.
//! - [`offline`] renders whole frames deterministically to image files.
//! - [`display`] and [`controls`] show the frame in a window and read keys.

pub mod camera;
pub mod config;
pub mod controls;
pub mod display;
pub mod error;
pub mod framebuffer;
pub mod offline;
pub mod painter;
pub mod perf;
pub mod pipeline;
pub mod shader;
pub mod workers;

pub use camera::Camera;
pub use config::RenderSettings;
pub use controls::InputState;
pub use display::Display;
pub use error::RenderError;
pub use framebuffer::{Color, Framebuffer, PartitionWriter, PixelSink};
pub use painter::Painter;
pub use perf::{FrameBudget, PerformanceMonitor};
pub use shader::{Shader, ShaderConfig};
pub use workers::{PoolOptions, RenderPool};
