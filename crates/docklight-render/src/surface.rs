//! Off-screen surface the compositor draws into.

use docklight_core::geometry::Rect;
use docklight_core::profiling::profile_function;
use docklight_test_utils::{PixelFrame, PresentTarget};

use crate::{BlendMode, Color, RenderError, RenderResult};

/// A CPU back buffer with premultiplied RGBA `f32` pixels.
///
/// Everything for a frame is drawn here first; [`Surface::present`] then
/// hands the finished pixels to the target in one call.
#[derive(Debug, Clone)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
    staging: Vec<u8>,
}

impl Surface {
    /// Create a new surface builder.
    pub fn builder(width: u32, height: u32) -> SurfaceBuilder {
        SurfaceBuilder::new(width, height)
    }

    /// Transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        SurfaceBuilder::new(width, height).build()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the surface size as (width, height).
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn bounds(&self) -> Rect<f32> {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    /// Resize the surface, discarding its contents.
    pub fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        if self.width == width && self.height == height {
            return Ok(());
        }
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        tracing::debug!("Resizing surface {}x{} -> {}x{}", self.width, self.height, width, height);
        self.width = width;
        self.height = height;
        self.pixels = vec![[0.0; 4]; width as usize * height as usize];
        Ok(())
    }

    /// Fill every pixel with `color`, ignoring what was there.
    pub fn clear(&mut self, color: Color) {
        profile_function!();
        let px = color.premultiplied();
        self.pixels.fill(px);
    }

    /// Straight-alpha color at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let px = self.pixels[self.index(x, y)];
        Some(Color::from_premultiplied(px))
    }

    /// Blend `color` at partial `coverage` into one pixel. Out-of-bounds
    /// coordinates are ignored.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: f32, mode: BlendMode) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let coverage = coverage.clamp(0.0, 1.0);
        if coverage <= 0.0 && mode != BlendMode::Replace {
            return;
        }
        let idx = self.index(x as u32, y as u32);
        let mut src = color.premultiplied();
        for c in &mut src {
            *c *= coverage;
        }
        self.pixels[idx] = mode.apply(src, self.pixels[idx]);
    }

    /// Pixel span `[x0, x1) x [y0, y1)` covering `rect`, clipped to the surface.
    pub(crate) fn clip_span(&self, rect: &Rect<f32>) -> Option<(i32, i32, i32, i32)> {
        let x0 = rect.x.floor().max(0.0) as i32;
        let y0 = rect.y.floor().max(0.0) as i32;
        let x1 = (rect.right().ceil() as i32).min(self.width as i32);
        let y1 = (rect.bottom().ceil() as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0, y0, x1, y1))
    }

    /// Copy of the surface as straight-alpha RGBA8.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        encode_rgba8(&self.pixels, &mut out);
        out
    }

    /// Hand the whole surface to `target` in a single present call.
    pub fn present(&mut self, target: &dyn PresentTarget) -> RenderResult<()> {
        profile_function!();
        self.staging.clear();
        encode_rgba8(&self.pixels, &mut self.staging);
        target.present(PixelFrame::new(self.width, self.height, &self.staging))?;
        Ok(())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

fn encode_rgba8(pixels: &[[f32; 4]], out: &mut Vec<u8>) {
    out.reserve(pixels.len() * 4);
    for px in pixels {
        out.extend_from_slice(&Color::from_premultiplied(*px).to_rgba_u8());
    }
}

/// Builder for creating surfaces.
pub struct SurfaceBuilder {
    width: u32,
    height: u32,
    clear_color: Color,
}

impl SurfaceBuilder {
    /// Create a new surface builder with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            clear_color: Color::TRANSPARENT,
        }
    }

    /// Initial fill color.
    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Build the surface.
    pub fn build(self) -> RenderResult<Surface> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let len = self.width as usize * self.height as usize;
        Ok(Surface {
            width: self.width,
            height: self.height,
            pixels: vec![self.clear_color.premultiplied(); len],
            staging: Vec::with_capacity(len * 4),
        })
    }
}
