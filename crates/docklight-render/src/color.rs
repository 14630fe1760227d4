/// An RGBA color with `f32` components in the `0.0..=1.0` range.
///
/// Colors use straight (non-premultiplied) alpha and can be constructed from
/// floats, `u8` values, or hex codes:
///
/// ```
/// use docklight_render::Color;
///
/// let red = Color::rgb(1.0, 0.0, 0.0);
/// let semi_transparent = Color::rgba(1.0, 1.0, 1.0, 0.5);
/// let from_hex = Color::from_hex(0xFF8800);
/// let from_bytes = Color::from_rgba_u8(40, 40, 40, 220);
/// ```
///
/// The struct is `#[repr(C)]` and implements `bytemuck::Pod`, so a pixel
/// buffer of colors can be viewed as plain floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

static_assertions::assert_eq_size!(Color, [f32; 4]);

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Create a color from RGB components with full opacity (alpha = 1.0).
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA components.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit RGBA values (0–255 mapped to 0.0–1.0).
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create a color from 8-bit RGB values with full opacity.
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    /// Create a color from a 24-bit RGB hex value (e.g. `0xFF8800`).
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as u8;
        let g = ((hex >> 8) & 0xFF) as u8;
        let b = (hex & 0xFF) as u8;
        Self::from_rgb_u8(r, g, b)
    }

    /// Create a color from a 32-bit RGBA hex value (e.g. `0xFF880080`).
    pub fn from_hex_alpha(hex: u32) -> Self {
        let r = ((hex >> 24) & 0xFF) as u8;
        let g = ((hex >> 16) & 0xFF) as u8;
        let b = ((hex >> 8) & 0xFF) as u8;
        let a = (hex & 0xFF) as u8;
        Self::from_rgba_u8(r, g, b, a)
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Scale the alpha channel, e.g. to fade a layer.
    pub fn fade(self, opacity: f32) -> Self {
        Self {
            a: self.a * opacity.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Component-wise interpolation, `t` clamped to `0..=1`.
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Move the RGB channels toward white by `amount`.
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        Self {
            r: self.r + (1.0 - self.r) * amount,
            g: self.g + (1.0 - self.g) * amount,
            b: self.b + (1.0 - self.b) * amount,
            a: self.a,
        }
    }

    /// Move the RGB channels toward black by `amount`.
    pub fn darken(self, amount: f32) -> Self {
        let keep = 1.0 - amount.clamp(0.0, 1.0);
        Self {
            r: self.r * keep,
            g: self.g * keep,
            b: self.b * keep,
            a: self.a,
        }
    }

    /// HSV saturation: `(max - min) / max`, zero for black.
    pub fn saturation(self) -> f32 {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        if max <= 0.0 { 0.0 } else { (max - min) / max }
    }

    /// Premultiplied `[r, g, b, a]`.
    #[inline]
    pub fn premultiplied(self) -> [f32; 4] {
        [self.r * self.a, self.g * self.a, self.b * self.a, self.a]
    }

    /// Inverse of [`Color::premultiplied`].
    #[inline]
    pub fn from_premultiplied(px: [f32; 4]) -> Self {
        if px[3] <= 0.0 {
            return Self::TRANSPARENT;
        }
        Self {
            r: (px[0] / px[3]).min(1.0),
            g: (px[1] / px[3]).min(1.0),
            b: (px[2] / px[3]).min(1.0),
            a: px[3].min(1.0),
        }
    }

    /// Quantize to 8-bit RGBA.
    pub fn to_rgba_u8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Convert to an `[r, g, b, a]` array.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for Color {
    fn from(arr: [f32; 4]) -> Self {
        Self {
            r: arr[0],
            g: arr[1],
            b: arr[2],
            a: arr[3],
        }
    }
}

impl From<[f32; 3]> for Color {
    fn from(arr: [f32; 3]) -> Self {
        Self {
            r: arr[0],
            g: arr[1],
            b: arr[2],
            a: 1.0,
        }
    }
}

impl From<[u8; 4]> for Color {
    fn from(arr: [u8; 4]) -> Self {
        Self::from_rgba_u8(arr[0], arr[1], arr[2], arr[3])
    }
}

impl From<Color> for [f32; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighten_and_darken_keep_alpha() {
        let c = Color::rgba(0.5, 0.5, 0.5, 0.4);
        let light = c.lighten(0.5);
        assert!((light.r - 0.75).abs() < 1e-6);
        assert_eq!(light.a, 0.4);

        let dark = c.darken(0.5);
        assert!((dark.g - 0.25).abs() < 1e-6);
        assert_eq!(dark.a, 0.4);
    }

    #[test]
    fn saturation_of_gray_is_zero() {
        assert_eq!(Color::GRAY.saturation(), 0.0);
        assert_eq!(Color::BLACK.saturation(), 0.0);
        assert_eq!(Color::rgb(1.0, 0.0, 0.0).saturation(), 1.0);
    }

    #[test]
    fn premultiply_round_trips_opaque_colors() {
        let c = Color::from_rgba_u8(100, 180, 255, 255);
        assert_eq!(Color::from_premultiplied(c.premultiplied()), c);
        assert_eq!(Color::from_premultiplied([0.3, 0.3, 0.3, 0.0]), Color::TRANSPARENT);
    }

    #[test]
    fn quantizes_with_rounding() {
        assert_eq!(Color::from_rgba_u8(40, 40, 40, 220).to_rgba_u8(), [40, 40, 40, 220]);
        assert_eq!(Color::rgba(2.0, -1.0, 0.5, 1.0).to_rgba_u8(), [255, 0, 128, 255]);
    }
}
