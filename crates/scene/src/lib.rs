#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]
//! # Scene Fields
//!
//! Signed distance fields the renderer marches through.
//!
//! A [`Scene`] answers two questions for any point: how far away the nearest
//! surface is (and which material it carries), and what base colour that
//! material has there. Both are generic over [`linalg::Lanes`], so one scene
//! definition serves the scalar marcher (`L = f32`) and the eight-wide
//! marcher (`L = F32x8`) with the same arithmetic.
//!
//! Scenes are assembled from [`primitives`] and the warps and blends in
//! [`ops`]. The built-in set is closed and selected through [`SceneKind`].

pub mod error;
pub mod ops;
pub mod palette;
pub mod primitives;
pub mod sample;
pub mod scenes;

use linalg::{Lanes, Vec3};

pub use error::SceneError;
pub use sample::{Sample, MISS_DISTANCE};
pub use scenes::{ColonnadeScene, GalleryScene, GroundScene, SceneKind, SimpleScene};

/// A stateless distance field with per-material colouring.
pub trait Scene: Send + Sync {
    /// Distance from `p` to the nearest surface at scene time `time`, never
    /// more than the true distance, plus the material id of that surface.
    fn field<L: Lanes>(&self, time: f32, p: Vec3<L>) -> Sample<L>;

    /// Base colour of `material` at surface point `p`.
    fn texture<L: Lanes>(&self, material: L, p: Vec3<L>) -> Vec3<L>;
}
