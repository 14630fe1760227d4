//! Math re-exports.
//!
//! All CPU-side layout math uses the SIMD-friendly [`glam`] types.
//!
//! ```
//! use docklight_core::math::Vec2;
//!
//! let cursor = Vec2::new(120.0, 4.0);
//! assert_eq!(cursor.x, 120.0);
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::*;

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
