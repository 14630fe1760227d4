//! Docklight winit integration
//!
//! - [`PointerTranslator`]: winit window events to dock [`PointerEvent`](docklight_ui::PointerEvent)s
//! - [`PointerQueue`]: per-tick event buffer with motion coalescing
//! - [`DockClock`]: engine time, and pump commands as winit control flow
//! - [`DockWindowDescriptor`]: attributes of the dock window

pub mod event;
pub mod time;
pub mod window;

pub use event::{PointerQueue, PointerTranslator};
pub use time::{DockClock, FrameTime, FrameTracker};
pub use window::DockWindowDescriptor;

// Re-export WindowId for convenience
pub use winit::window::WindowId;
