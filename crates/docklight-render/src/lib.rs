//! Docklight Render
//!
//! Software compositing for the dock: an off-screen [`Surface`] that shapes,
//! gradients and icons are rasterized into, and a single atomic hand-off of
//! the finished frame to a [`PresentTarget`].

mod blend;
mod color;
mod error;
mod image;
mod paint;
mod shape;
mod surface;

pub use blend::BlendMode;
pub use color::Color;
pub use error::{RenderError, RenderResult};
pub use image::{IconImage, ImageAdjust};
pub use paint::Paint;
pub use shape::CornerRadii;
pub use surface::{Surface, SurfaceBuilder};

pub use docklight_test_utils::{PixelFrame, PresentError, PresentTarget};
