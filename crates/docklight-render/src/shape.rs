//! Anti-aliased shape rasterization using signed distance fields.
//!
//! Each covered pixel is shaded at its center; coverage is the clamped
//! distance to the shape edge, which gives a one-pixel soft edge.

use docklight_core::geometry::Rect;
use docklight_core::math::Vec2;
use docklight_core::profiling::profile_function;

use crate::{BlendMode, Paint, Surface};

/// Per-corner radii, clockwise from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    pub const ZERO: CornerRadii = CornerRadii::uniform(0.0);

    pub const fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    pub const fn new(top_left: f32, top_right: f32, bottom_right: f32, bottom_left: f32) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Limit every radius to half the shorter side of `size`.
    fn clamped(self, size: Vec2) -> Self {
        let max = (size.x.min(size.y) * 0.5).max(0.0);
        Self {
            top_left: self.top_left.clamp(0.0, max),
            top_right: self.top_right.clamp(0.0, max),
            bottom_right: self.bottom_right.clamp(0.0, max),
            bottom_left: self.bottom_left.clamp(0.0, max),
        }
    }
}

/// Signed distance from `p` to a rounded box centered at the origin.
#[inline]
fn rounded_box_sdf(p: Vec2, half: Vec2, radii: &CornerRadii) -> f32 {
    let r = match (p.x > 0.0, p.y > 0.0) {
        (false, false) => radii.top_left,
        (true, false) => radii.top_right,
        (true, true) => radii.bottom_right,
        (false, true) => radii.bottom_left,
    };
    let q = p.abs() - half + Vec2::splat(r);
    q.max(Vec2::ZERO).length() + q.x.max(q.y).min(0.0) - r
}

#[inline]
fn coverage_from_distance(distance: f32) -> f32 {
    (0.5 - distance).clamp(0.0, 1.0)
}

impl Surface {
    /// Rasterize every pixel in `bounds` with coverage from `distance`.
    fn raster_sdf<F>(&mut self, bounds: Rect<f32>, paint: &Paint, mode: BlendMode, distance: F)
    where
        F: Fn(Vec2) -> f32,
    {
        let Some((x0, y0, x1, y1)) = self.clip_span(&bounds.inflate(1.0, 1.0)) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = coverage_from_distance(distance(p));
                if coverage > 0.0 {
                    self.blend_pixel(x, y, paint.color_at(p), coverage, mode);
                }
            }
        }
    }

    /// Fill an axis-aligned rectangle.
    pub fn fill_rect(&mut self, rect: Rect<f32>, paint: &Paint) {
        self.fill_rounded_rect(rect, CornerRadii::ZERO, paint);
    }

    /// Fill a rectangle with rounded corners.
    pub fn fill_rounded_rect(&mut self, rect: Rect<f32>, radii: CornerRadii, paint: &Paint) {
        profile_function!();
        if rect.is_empty() {
            return;
        }
        let center = rect.center();
        let half = rect.size() * 0.5;
        let radii = radii.clamped(rect.size());
        self.raster_sdf(rect, paint, BlendMode::Alpha, |p| {
            rounded_box_sdf(p - center, half, &radii)
        });
    }

    /// Stroke the inside edge of a rounded rectangle with `width` pixels.
    pub fn stroke_rounded_rect(
        &mut self,
        rect: Rect<f32>,
        radii: CornerRadii,
        width: f32,
        paint: &Paint,
    ) {
        profile_function!();
        if rect.is_empty() || width <= 0.0 {
            return;
        }
        let center = rect.center();
        let half = rect.size() * 0.5;
        let radii = radii.clamped(rect.size());
        let half_width = width * 0.5;
        self.raster_sdf(rect, paint, BlendMode::Alpha, |p| {
            let d = rounded_box_sdf(p - center, half, &radii);
            (d + half_width).abs() - half_width
        });
    }

    /// Fill a disc.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.fill_circle_with(center, radius, paint, BlendMode::Alpha);
    }

    /// Fill a disc using an explicit blend mode.
    pub fn fill_circle_with(&mut self, center: Vec2, radius: f32, paint: &Paint, mode: BlendMode) {
        if radius <= 0.0 {
            return;
        }
        let bounds = Rect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0);
        self.raster_sdf(bounds, paint, mode, |p| p.distance(center) - radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn filled_rect_covers_interior_exactly() {
        let mut surface = Surface::new(10, 10).unwrap();
        surface.fill_rect(Rect::new(2.0, 2.0, 4.0, 4.0), &Paint::Solid(Color::WHITE));
        assert_eq!(surface.pixel(3, 3), Some(Color::WHITE));
        assert_eq!(surface.pixel(1, 3).unwrap().a, 0.0);
        assert_eq!(surface.pixel(6, 3).unwrap().a, 0.0);
    }

    #[test]
    fn rounded_corner_is_transparent() {
        let mut surface = Surface::new(20, 20).unwrap();
        surface.fill_rounded_rect(
            Rect::new(0.0, 0.0, 20.0, 20.0),
            CornerRadii::new(8.0, 0.0, 0.0, 0.0),
            &Paint::Solid(Color::WHITE),
        );
        assert_eq!(surface.pixel(0, 0).unwrap().a, 0.0);
        assert_eq!(surface.pixel(19, 0), Some(Color::WHITE));
        assert_eq!(surface.pixel(10, 10), Some(Color::WHITE));
    }

    #[test]
    fn stroke_leaves_center_empty() {
        let mut surface = Surface::new(20, 20).unwrap();
        surface.stroke_rounded_rect(
            Rect::new(0.0, 0.0, 20.0, 20.0),
            CornerRadii::uniform(4.0),
            2.0,
            &Paint::Solid(Color::WHITE),
        );
        assert_eq!(surface.pixel(10, 0), Some(Color::WHITE));
        assert_eq!(surface.pixel(10, 10).unwrap().a, 0.0);
    }

    #[test]
    fn circle_is_round() {
        let mut surface = Surface::new(11, 11).unwrap();
        surface.fill_circle(Vec2::new(5.5, 5.5), 4.0, &Paint::Solid(Color::WHITE));
        assert_eq!(surface.pixel(5, 5), Some(Color::WHITE));
        assert_eq!(surface.pixel(0, 0).unwrap().a, 0.0);
        assert_eq!(surface.pixel(10, 5).unwrap().a, 0.0);
        let edge = surface.pixel(9, 5).unwrap().a;
        assert!(edge > 0.0 && edge < 1.0);
    }
}
