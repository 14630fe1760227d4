use docklight_core::math::Vec2;

use crate::Color;

/// What fills a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Gradient along the segment `start -> end`, clamped past both ends.
    Linear {
        start: Vec2,
        end: Vec2,
        from: Color,
        to: Color,
    },
    /// Gradient from `center` out to `radius`.
    Radial {
        center: Vec2,
        radius: f32,
        inner: Color,
        outer: Color,
    },
}

impl Paint {
    /// Color of the paint at a surface point.
    #[inline]
    pub fn color_at(&self, point: Vec2) -> Color {
        match *self {
            Paint::Solid(color) => color,
            Paint::Linear {
                start,
                end,
                from,
                to,
            } => {
                let axis = end - start;
                let len_sq = axis.length_squared();
                if len_sq <= f32::EPSILON {
                    return to;
                }
                let t = (point - start).dot(axis) / len_sq;
                from.lerp(to, t)
            }
            Paint::Radial {
                center,
                radius,
                inner,
                outer,
            } => {
                if radius <= 0.0 {
                    return outer;
                }
                inner.lerp(outer, point.distance(center) / radius)
            }
        }
    }

    /// Multiply the paint's alpha by `opacity`.
    pub fn fade(self, opacity: f32) -> Paint {
        match self {
            Paint::Solid(color) => Paint::Solid(color.fade(opacity)),
            Paint::Linear {
                start,
                end,
                from,
                to,
            } => Paint::Linear {
                start,
                end,
                from: from.fade(opacity),
                to: to.fade(opacity),
            },
            Paint::Radial {
                center,
                radius,
                inner,
                outer,
            } => Paint::Radial {
                center,
                radius,
                inner: inner.fade(opacity),
                outer: outer.fade(opacity),
            },
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_gradient_clamps_outside_segment() {
        let paint = Paint::Linear {
            start: Vec2::new(0.0, 0.0),
            end: Vec2::new(0.0, 10.0),
            from: Color::BLACK,
            to: Color::WHITE,
        };
        assert_eq!(paint.color_at(Vec2::new(3.0, -5.0)), Color::BLACK);
        assert_eq!(paint.color_at(Vec2::new(3.0, 50.0)), Color::WHITE);
        let mid = paint.color_at(Vec2::new(0.0, 5.0));
        assert!((mid.r - 0.5).abs() < 1e-6);
    }

    #[test]
    fn radial_gradient_reaches_outer_color_at_radius() {
        let paint = Paint::Radial {
            center: Vec2::ZERO,
            radius: 4.0,
            inner: Color::WHITE,
            outer: Color::TRANSPARENT,
        };
        assert_eq!(paint.color_at(Vec2::ZERO), Color::WHITE);
        assert_eq!(paint.color_at(Vec2::new(4.0, 0.0)), Color::TRANSPARENT);
    }
}
