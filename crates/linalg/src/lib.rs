#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::excessive_precision,
    clippy::len_without_is_empty
)]
//! # Lane Kernel
//!
//! Small-vector arithmetic shared by the scalar and the eight-wide rendering
//! paths.
//!
//! -   [`Lanes`] is the numeric interface: `f32` (one lane), [`Vector<N>`]
//!     (portable loop over `N` lanes) and [`F32x8`] (hardware lanes through
//!     `wide`).
//! -   [`Vec2`], [`Vec3`] and [`Mat3`] are geometry types generic over the
//!     lane type, so a distance function written once evaluates either one
//!     point or eight points per call.
//!
//! Every operation, including `exp`, `pow` and `sin`, yields identical bits
//! whichever `Lanes` implementation runs it.

pub mod lanes;
pub mod mat3;
pub mod simd;
pub mod vec2;
pub mod vec3;
pub mod vector;

pub use lanes::Lanes;
pub use mat3::Mat3;
pub use simd::F32x8;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vector::Vector;
