//! Dock configuration.
//!
//! A [`DockConfig`] is plain data; reading it from disk is the host's job.
//! Values are checked once, at the boundary, with [`DockConfig::validate`] so
//! the per-frame math never has to deal with degenerate parameters.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Screen edge the dock is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DockEdge {
    #[default]
    Bottom,
    Top,
    Left,
    Right,
}

impl DockEdge {
    pub const ALL: [DockEdge; 4] = [DockEdge::Bottom, DockEdge::Top, DockEdge::Left, DockEdge::Right];

    /// Items are laid out along the x axis for top and bottom docks.
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, DockEdge::Bottom | DockEdge::Top)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DockEdge::Bottom => "bottom",
            DockEdge::Top => "top",
            DockEdge::Left => "left",
            DockEdge::Right => "right",
        }
    }
}

impl fmt::Display for DockEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DockEdge {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bottom" => Ok(DockEdge::Bottom),
            "top" => Ok(DockEdge::Top),
            "left" => Ok(DockEdge::Left),
            "right" => Ok(DockEdge::Right),
            _ => Err(ConfigError::UnknownEdge(s.to_string())),
        }
    }
}

/// Errors raised when validating configuration values.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Icon size must be a positive pixel count.
    InvalidIconSize(u32),
    /// Zoom multiplier must be finite and at least 1.
    InvalidZoomPercent(f32),
    /// Zoom influence range must be finite and strictly positive.
    InvalidZoomRange(f32),
    /// Edge name is not one of bottom, top, left, right.
    UnknownEdge(String),
    /// A theme value is out of range.
    InvalidTheme { field: &'static str, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidIconSize(size) => {
                write!(f, "Invalid icon size {}: must be greater than zero", size)
            }
            ConfigError::InvalidZoomPercent(zoom) => {
                write!(f, "Invalid zoom multiplier {}: must be at least 1.0", zoom)
            }
            ConfigError::InvalidZoomRange(range) => {
                write!(f, "Invalid zoom range {}: must be greater than zero", range)
            }
            ConfigError::UnknownEdge(name) => {
                write!(f, "Unknown dock position '{}'", name)
            }
            ConfigError::InvalidTheme { field, value } => {
                write!(f, "Invalid theme value for {}: {}", field, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Behavioural settings for a dock instance.
#[derive(Debug, Clone, PartialEq)]
pub struct DockConfig {
    /// Base icon edge length in logical pixels.
    pub icon_size: u32,
    pub zoom_enabled: bool,
    /// Maximum zoom multiplier at the pointer (`1.5` = 150%).
    pub zoom_percent: f32,
    /// Zoom influence radius, in item widths.
    pub zoom_range: f32,
    pub position: DockEdge,
    pub autohide: bool,
    pub hide_delay_ms: u32,
    pub unhide_delay_ms: u32,
    /// Duration of one hide or show run. Zero hides instantly.
    pub hide_time_ms: u32,
    pub previews_enabled: bool,
}

impl Default for DockConfig {
    fn default() -> Self {
        DockConfig {
            icon_size: 48,
            zoom_enabled: true,
            zoom_percent: 1.5,
            zoom_range: 3.0,
            position: DockEdge::Bottom,
            autohide: false,
            hide_delay_ms: 0,
            unhide_delay_ms: 0,
            hide_time_ms: 250,
            previews_enabled: true,
        }
    }
}

impl DockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_icon_size(mut self, icon_size: u32) -> Self {
        self.icon_size = icon_size;
        self
    }

    pub fn with_zoom(mut self, zoom_percent: f32, zoom_range: f32) -> Self {
        self.zoom_enabled = true;
        self.zoom_percent = zoom_percent;
        self.zoom_range = zoom_range;
        self
    }

    pub fn without_zoom(mut self) -> Self {
        self.zoom_enabled = false;
        self
    }

    pub fn with_position(mut self, position: DockEdge) -> Self {
        self.position = position;
        self
    }

    pub fn with_autohide(mut self, autohide: bool) -> Self {
        self.autohide = autohide;
        self
    }

    pub fn with_hide_timing(mut self, hide_delay_ms: u32, unhide_delay_ms: u32, hide_time_ms: u32) -> Self {
        self.hide_delay_ms = hide_delay_ms;
        self.unhide_delay_ms = unhide_delay_ms;
        self.hide_time_ms = hide_time_ms;
        self
    }

    pub fn with_previews(mut self, previews_enabled: bool) -> Self {
        self.previews_enabled = previews_enabled;
        self
    }

    /// Check every value against its allowed range.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.icon_size == 0 {
            return Err(ConfigError::InvalidIconSize(self.icon_size));
        }
        if !self.zoom_percent.is_finite() || self.zoom_percent < 1.0 {
            return Err(ConfigError::InvalidZoomPercent(self.zoom_percent));
        }
        if !self.zoom_range.is_finite() || self.zoom_range <= 0.0 {
            return Err(ConfigError::InvalidZoomRange(self.zoom_range));
        }
        Ok(())
    }

    /// Validate and hand the config back, for use at construction sites.
    pub fn validated(self) -> ConfigResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Zoom multiplier in effect, `1.0` when zoom is off.
    pub fn zoom_factor(&self) -> f32 {
        if self.zoom_enabled { self.zoom_percent } else { 1.0 }
    }

    pub fn icon_size_f32(&self) -> f32 {
        self.icon_size as f32
    }

    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms as u64)
    }

    pub fn unhide_delay(&self) -> Duration {
        Duration::from_millis(self.unhide_delay_ms as u64)
    }

    pub fn hide_time(&self) -> Duration {
        Duration::from_millis(self.hide_time_ms as u64)
    }
}
