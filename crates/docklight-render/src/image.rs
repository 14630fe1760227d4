//! Icon bitmaps and scaled drawing.

use docklight_core::geometry::Rect;
use docklight_core::math::Vec2;
use docklight_core::profiling::profile_function;

use crate::{BlendMode, Color, RenderError, RenderResult, Surface};

/// Pixels with alpha below this are ignored by [`IconImage::dominant_color`].
const DOMINANT_ALPHA_CUTOFF: u8 = 25;

/// A decoded icon in premultiplied RGBA `f32`.
#[derive(Debug, Clone, PartialEq)]
pub struct IconImage {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
}

impl IconImage {
    /// Build from straight-alpha RGBA8 rows.
    pub fn from_rgba8(width: u32, height: u32, data: &[u8]) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(RenderError::DataSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        let pixels = data
            .chunks_exact(4)
            .map(|px| Color::from_rgba_u8(px[0], px[1], px[2], px[3]).premultiplied())
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Uniformly colored icon.
    pub fn solid(width: u32, height: u32, color: Color) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![color.premultiplied(); width as usize * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Straight-alpha color of a texel.
    pub fn texel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Color::from_premultiplied(self.texel_raw(x as i32, y as i32)))
    }

    #[inline]
    fn texel_raw(&self, x: i32, y: i32) -> [f32; 4] {
        let x = x.clamp(0, self.width as i32 - 1) as usize;
        let y = y.clamp(0, self.height as i32 - 1) as usize;
        self.pixels[y * self.width as usize + x]
    }

    /// Bilinear sample at normalized `uv`, premultiplied.
    pub fn sample(&self, uv: Vec2) -> [f32; 4] {
        let fx = uv.x * self.width as f32 - 0.5;
        let fy = uv.y * self.height as f32 - 0.5;
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = fx - x0;
        let ty = fy - y0;
        let (x0, y0) = (x0 as i32, y0 as i32);

        let a = self.texel_raw(x0, y0);
        let b = self.texel_raw(x0 + 1, y0);
        let c = self.texel_raw(x0, y0 + 1);
        let d = self.texel_raw(x0 + 1, y0 + 1);

        let mut out = [0.0; 4];
        for i in 0..4 {
            let top = a[i] + (b[i] - a[i]) * tx;
            let bottom = c[i] + (d[i] - c[i]) * tx;
            out[i] = top + (bottom - top) * ty;
        }
        out
    }

    /// Saturation-weighted average color.
    ///
    /// Vivid pixels dominate and grays contribute nothing; nearly transparent
    /// pixels are skipped. Falls back to neutral gray for colorless icons.
    pub fn dominant_color(&self) -> Color {
        profile_function!();
        let (mut r, mut g, mut b, mut total) = (0.0f32, 0.0f32, 0.0f32, 0.0f32);
        for px in &self.pixels {
            let color = Color::from_premultiplied(*px);
            if color.to_rgba_u8()[3] < DOMINANT_ALPHA_CUTOFF {
                continue;
            }
            let score = color.saturation();
            r += color.r * score;
            g += color.g * score;
            b += color.b * score;
            total += score;
        }
        if total <= 0.0 {
            return Color::GRAY;
        }
        Color::rgb(r / total, g / total, b / total)
    }
}

/// Per-draw adjustments applied to icon pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageAdjust {
    pub opacity: f32,
    /// Fraction to move toward white.
    pub lighten: f32,
    /// Fraction to move toward black.
    pub darken: f32,
}

impl Default for ImageAdjust {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            lighten: 0.0,
            darken: 0.0,
        }
    }
}

impl Surface {
    /// Draw `image` scaled into `dest` with bilinear filtering.
    ///
    /// Pixels partially covered by `dest` are blended by their covered area.
    pub fn draw_image(&mut self, image: &IconImage, dest: Rect<f32>, adjust: ImageAdjust) {
        profile_function!();
        if dest.is_empty() || adjust.opacity <= 0.0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.clip_span(&dest) else {
            return;
        };
        for y in y0..y1 {
            let cover_y = (dest.bottom().min(y as f32 + 1.0) - dest.y.max(y as f32)).clamp(0.0, 1.0);
            let v = ((y as f32 + 0.5) - dest.y) / dest.height;
            for x in x0..x1 {
                let cover_x =
                    (dest.right().min(x as f32 + 1.0) - dest.x.max(x as f32)).clamp(0.0, 1.0);
                let coverage = cover_x * cover_y;
                if coverage <= 0.0 {
                    continue;
                }
                let u = ((x as f32 + 0.5) - dest.x) / dest.width;
                let texel = image.sample(Vec2::new(u, v));
                if texel[3] <= 0.0 {
                    continue;
                }
                let color = Color::from_premultiplied(texel)
                    .lighten(adjust.lighten)
                    .darken(adjust.darken)
                    .fade(adjust.opacity);
                self.blend_pixel(x, y, color, coverage, BlendMode::Alpha);
            }
        }
    }
}
