//! Docklight - a zooming, autohiding dock engine
//!
//! Docklight lays out a row of dock items along a screen edge, zooms them
//! around the pointer, hides the dock when the pointer leaves, animates
//! launches and attention requests, and composites each frame off-screen
//! before presenting it in one step.
//!
//! - **Engine** ([`ui`]): zoom, layout, hit testing, autohide, animation pump,
//!   input region and struts, applets
//! - **Rendering** ([`render`]): CPU surface, shapes, gradients and icons
//! - **Windowing** ([`winit`]): pointer event translation and the frame clock
//! - **Workers** ([`TaskPool`]): background work for applets
//!
//! # Quick Start
//!
//! ```
//! # #[cfg(feature = "ui")]
//! # {
//! use std::time::Duration;
//! use docklight::prelude::*;
//!
//! let mut dock = Dock::new(DockConfig::default(), ThemeSpec::default(), MonitorInfo::single(1920, 1080))
//!     .unwrap();
//! dock.set_items(vec![ItemSnapshot::application(1)], Duration::ZERO);
//! let output = dock.tick(Duration::ZERO);
//! assert_eq!(output.next, PumpCommand::Idle);
//! # }
//! ```

pub mod task_pool;

// Re-export core types
pub use docklight_core as core;
pub use docklight_core::math;

#[cfg(feature = "render")]
pub use docklight_render as render;

#[cfg(feature = "ui")]
pub use docklight_ui as ui;

#[cfg(feature = "winit")]
pub use docklight_winit as winit;

pub use task_pool::{TaskPool, TaskPoolError, TaskPoolResult};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::task_pool::{TaskPool, TaskPoolError};

    pub use docklight_core::config::{ConfigError, DockConfig, DockEdge};
    pub use docklight_core::geometry::Rect;
    pub use docklight_core::math::Vec2;

    #[cfg(feature = "render")]
    pub use docklight_render::{Color, IconImage, PresentTarget, Surface};

    #[cfg(feature = "ui")]
    pub use docklight_ui::{
        Applet, AppletNotifier, AutohideState, Compositor, Dock, DockAction, FrameOutput, ItemId,
        ItemSnapshot, MonitorInfo, PointerButton, PointerEvent, PumpCommand, ThemeSpec,
    };

    #[cfg(feature = "winit")]
    pub use docklight_winit::{DockClock, PointerQueue, PointerTranslator};
}
