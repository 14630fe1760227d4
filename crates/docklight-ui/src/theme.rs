//! Dock theme.
//!
//! A [`ThemeSpec`] stores sizes in scaled units, tenths of the icon size, so a
//! theme looks the same at every icon size. [`ThemeSpec::resolve`] turns it
//! into a pixel [`Theme`] for one icon size.

use std::time::Duration;

use docklight_core::config::{ConfigError, ConfigResult};
use docklight_render::Color;

/// Theme values as authored. Paddings and roundness are in scaled units
/// (`px = units * icon_size / 10`); bounce heights and glow size are
/// fractions of the icon size.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeSpec {
    /// Space between the shelf end and the outermost icons. Zero derives it
    /// from the stroke width.
    pub h_padding: f32,
    /// Shelf extent above the icons. Negative lets icons overhang the shelf.
    pub top_padding: f32,
    /// Space between the screen edge and the icons.
    pub bottom_padding: f32,
    pub item_padding: f32,
    /// Indicator dot diameter, in pixels.
    pub indicator_size: f32,
    /// Shelf stroke width, in pixels.
    pub stroke_width: f32,
    pub roundness: f32,

    pub fill_start: [u8; 4],
    pub fill_end: [u8; 4],
    pub outer_stroke: [u8; 4],
    pub inner_stroke: [u8; 4],
    pub indicator_color: [u8; 4],
    pub active_indicator_color: [u8; 4],

    pub urgent_bounce_height: f32,
    pub launch_bounce_height: f32,
    pub urgent_bounce_time_ms: u32,
    pub launch_bounce_time_ms: u32,
    pub click_time_ms: u32,
    /// Duration of hover fades and the zoom ease.
    pub active_time_ms: u32,
    /// How far a hovered icon is lightened, `0..=1`.
    pub hover_lighten: f32,
    pub max_indicator_dots: u32,
    /// Peak opacity of the active-item glow, `0..=1`.
    pub glow_opacity: f32,
    pub urgent_glow_time_ms: u32,
    pub urgent_glow_pulse_ms: u32,
    pub urgent_glow_size: f32,
}

impl Default for ThemeSpec {
    fn default() -> Self {
        Self {
            h_padding: 0.0,
            top_padding: -7.0,
            bottom_padding: 1.0,
            item_padding: 2.5,
            indicator_size: 5.0,
            stroke_width: 1.0,
            roundness: 4.0,

            fill_start: [40, 40, 40, 220],
            fill_end: [30, 30, 30, 220],
            outer_stroke: [41, 41, 41, 255],
            inner_stroke: [255, 255, 255, 255],
            indicator_color: [255, 255, 255, 200],
            active_indicator_color: [100, 180, 255, 255],

            urgent_bounce_height: 1.66,
            launch_bounce_height: 0.625,
            urgent_bounce_time_ms: 600,
            launch_bounce_time_ms: 600,
            click_time_ms: 300,
            active_time_ms: 150,
            hover_lighten: 0.2,
            max_indicator_dots: 3,
            glow_opacity: 0.6,
            urgent_glow_time_ms: 10_000,
            urgent_glow_pulse_ms: 2_000,
            urgent_glow_size: 1.0,
        }
    }
}

fn color(rgba: [u8; 4]) -> Color {
    Color::from_rgba_u8(rgba[0], rgba[1], rgba[2], rgba[3])
}

fn ms(ms: u32) -> Duration {
    Duration::from_millis(ms as u64)
}

impl ThemeSpec {
    /// Check ranges that do not depend on the icon size.
    pub fn validate(&self) -> ConfigResult<()> {
        let non_negative = [
            ("item_padding", self.item_padding),
            ("indicator_size", self.indicator_size),
            ("stroke_width", self.stroke_width),
            ("roundness", self.roundness),
            ("urgent_bounce_height", self.urgent_bounce_height),
            ("launch_bounce_height", self.launch_bounce_height),
            ("urgent_glow_size", self.urgent_glow_size),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTheme { field, value });
            }
        }

        let unit = [
            ("hover_lighten", self.hover_lighten),
            ("glow_opacity", self.glow_opacity),
        ];
        for (field, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidTheme { field, value });
            }
        }

        for (field, value) in [
            ("h_padding", self.h_padding),
            ("top_padding", self.top_padding),
            ("bottom_padding", self.bottom_padding),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidTheme { field, value });
            }
        }
        if self.urgent_glow_pulse_ms == 0 {
            return Err(ConfigError::InvalidTheme {
                field: "urgent_glow_pulse_ms",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// Pixel theme for `icon_size`.
    pub fn resolve(&self, icon_size: u32) -> ConfigResult<Theme> {
        if icon_size == 0 {
            return Err(ConfigError::InvalidIconSize(icon_size));
        }
        self.validate()?;

        let icon = icon_size as f32;
        let scaled = |units: f32| units * icon / 10.0;
        let h_padding = if self.h_padding == 0.0 {
            self.stroke_width * 2.0
        } else {
            scaled(self.h_padding)
        };

        Ok(Theme {
            icon_size: icon,
            h_padding,
            top_padding: scaled(self.top_padding),
            bottom_padding: scaled(self.bottom_padding),
            item_padding: scaled(self.item_padding),
            indicator_radius: self.indicator_size * 0.5,
            stroke_width: self.stroke_width,
            corner_radius: scaled(self.roundness),

            fill_start: color(self.fill_start),
            fill_end: color(self.fill_end),
            outer_stroke: color(self.outer_stroke),
            inner_stroke: color(self.inner_stroke),
            indicator_color: color(self.indicator_color),
            active_indicator_color: color(self.active_indicator_color),

            urgent_bounce_height: self.urgent_bounce_height * icon,
            launch_bounce_height: self.launch_bounce_height * icon,
            urgent_bounce_time: ms(self.urgent_bounce_time_ms),
            launch_bounce_time: ms(self.launch_bounce_time_ms),
            click_time: ms(self.click_time_ms),
            active_time: ms(self.active_time_ms),
            hover_lighten: self.hover_lighten,
            max_indicator_dots: self.max_indicator_dots,
            glow_opacity: self.glow_opacity,
            urgent_glow_time: ms(self.urgent_glow_time_ms),
            urgent_glow_pulse: ms(self.urgent_glow_pulse_ms),
            urgent_glow_radius: self.urgent_glow_size * icon,
        })
    }
}

/// A theme resolved to pixels for one icon size.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub icon_size: f32,
    pub h_padding: f32,
    pub top_padding: f32,
    pub bottom_padding: f32,
    pub item_padding: f32,
    pub indicator_radius: f32,
    pub stroke_width: f32,
    pub corner_radius: f32,

    pub fill_start: Color,
    pub fill_end: Color,
    pub outer_stroke: Color,
    pub inner_stroke: Color,
    pub indicator_color: Color,
    pub active_indicator_color: Color,

    pub urgent_bounce_height: f32,
    pub launch_bounce_height: f32,
    pub urgent_bounce_time: Duration,
    pub launch_bounce_time: Duration,
    pub click_time: Duration,
    pub active_time: Duration,
    pub hover_lighten: f32,
    pub max_indicator_dots: u32,
    pub glow_opacity: f32,
    pub urgent_glow_time: Duration,
    pub urgent_glow_pulse: Duration,
    pub urgent_glow_radius: f32,
}

impl Theme {
    /// Thickness of the shelf background, never negative.
    pub fn shelf_height(&self) -> f32 {
        (self.icon_size + self.stroke_width * 2.0 + self.top_padding + self.bottom_padding).max(0.0)
    }

    /// Distance from the screen edge to the indicator dots' centers.
    pub fn indicator_offset(&self) -> f32 {
        (self.bottom_padding * 0.5).max(self.indicator_radius)
    }

    /// Cross-axis extent of the dock when drawn at zoom `zoom`, bounce excluded.
    pub fn visible_cross(&self, zoom: f32) -> f32 {
        (self.bottom_padding + self.icon_size * zoom).max(self.shelf_height())
    }

    /// Cross-axis window size: the zoomed dock plus urgent bounce headroom.
    pub fn window_cross(&self, zoom: f32) -> f32 {
        (self.bottom_padding + self.icon_size * zoom + self.urgent_bounce_height)
            .max(self.shelf_height())
            .ceil()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_resolves_at_48px() {
        let theme = ThemeSpec::default().resolve(48).unwrap();
        assert!((theme.item_padding - 12.0).abs() < 1e-4);
        assert!((theme.bottom_padding - 4.8).abs() < 1e-4);
        assert_eq!(theme.h_padding, 2.0);
        assert_eq!(theme.indicator_radius, 2.5);
        assert!((theme.launch_bounce_height - 30.0).abs() < 1e-4);
        assert_eq!(theme.click_time, Duration::from_millis(300));
    }

    #[test]
    fn shelf_height_follows_paddings() {
        let theme = ThemeSpec::default().resolve(48).unwrap();
        // 48 + 2 - 33.6 + 4.8
        assert!((theme.shelf_height() - 21.2).abs() < 1e-3);

        let spec = ThemeSpec {
            top_padding: -20.0,
            ..Default::default()
        };
        assert_eq!(spec.resolve(48).unwrap().shelf_height(), 0.0);
    }

    #[test]
    fn window_leaves_room_for_zoom_and_bounce() {
        let theme = ThemeSpec::default().resolve(48).unwrap();
        let cross = theme.window_cross(1.5);
        assert!(cross >= theme.bottom_padding + 72.0 + theme.urgent_bounce_height);
        assert_eq!(cross, cross.ceil());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let spec = ThemeSpec {
            glow_opacity: 1.5,
            ..Default::default()
        };
        assert_eq!(
            spec.validate(),
            Err(ConfigError::InvalidTheme {
                field: "glow_opacity",
                value: 1.5
            })
        );

        let spec = ThemeSpec {
            item_padding: -1.0,
            ..Default::default()
        };
        assert!(spec.resolve(48).is_err());
        assert_eq!(
            ThemeSpec::default().resolve(0),
            Err(ConfigError::InvalidIconSize(0))
        );
    }
}
