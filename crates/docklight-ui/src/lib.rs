//! Docklight UI - the dock engine
//!
//! Everything between the host's item list and the pixels on screen:
//! - Zoom and parting of items around the pointer ([`zoom`])
//! - One [`LayoutFrame`] per tick, shared by hit testing, the input region
//!   and the compositor ([`layout`])
//! - The autohide state machine ([`autohide`])
//! - Time-based transient effects and the frame pump ([`effects`], [`pump`])
//! - Input shape, struts and window placement ([`input_region`])
//! - Off-screen compositing with a single present ([`compositor`])
//! - Applets and the worker queue ([`applet`], [`worker`])
//!
//! [`Dock`] ties them together.
//!
//! ## Quick Start
//!
//! ```rust
//! # use std::time::Duration;
//! use docklight_ui::{Dock, DockConfig, ItemSnapshot, MonitorInfo, ThemeSpec};
//!
//! let mut dock = Dock::new(DockConfig::default(), ThemeSpec::default(), MonitorInfo::single(1920, 1080))
//!     .unwrap();
//! dock.set_items(
//!     vec![ItemSnapshot::application(1), ItemSnapshot::application(2).running(1)],
//!     Duration::ZERO,
//! );
//!
//! // In the event loop:
//! let output = dock.tick(Duration::ZERO);
//! assert_eq!(dock.frame().items.len(), 2);
//! // compositor.render(dock.frame(), dock.theme(), &target) when output.redraw
//! # let _ = output;
//! ```

pub mod animation;
pub mod applet;
pub mod autohide;
pub mod compositor;
pub mod dock;
pub mod draw_list;
pub mod effects;
pub mod event;
pub mod hit_test;
pub mod input_region;
pub mod item;
pub mod layout;
pub mod pump;
pub mod theme;
pub mod worker;
pub mod zoom;

pub use animation::{EasingFunction, Transient};
pub use applet::{Applet, AppletError, AppletHost, AppletResponse, AppletResult, MenuEntry, SeparatorApplet};
pub use autohide::{AutohideFsm, AutohideState, StateChange};
pub use compositor::Compositor;
pub use dock::{Dock, DockAction, FrameOutput};
pub use draw_list::{DrawCommand, DrawList};
pub use effects::{ItemAnimation, ItemVisuals, ZoomEase};
pub use event::{Modifiers, PointerButton, PointerEvent, ScrollDirection};
pub use hit_test::HitTarget;
pub use input_region::{InputRegion, MonitorInfo, ReservedSpace};
pub use item::{ItemFlags, ItemId, ItemKind, ItemSnapshot};
pub use layout::{ItemLayout, LayoutFrame, LayoutInputs, compute_frame};
pub use pump::{AnimationPump, PumpCommand};
pub use theme::{Theme, ThemeSpec};
pub use worker::{AppletNotifier, WorkerMessage, WorkerQueue, WorkerSender};

// Re-export common types from dependencies
pub use docklight_core::config::{ConfigError, ConfigResult, DockConfig, DockEdge};
pub use docklight_core::geometry::Rect;
pub use docklight_core::math::Vec2;
pub use docklight_render::{Color, IconImage};
