use docklight_core::geometry::Rect;
pub use winit::window::Window as WinitWindow;
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::window::{WindowAttributes, WindowLevel};

/// Attributes of the dock's top-level window.
#[derive(Debug, Clone, PartialEq)]
pub struct DockWindowDescriptor {
    pub title: String,
    /// Screen rectangle in logical pixels.
    pub rect: Rect<i32>,
    pub visible: bool,
}

impl DockWindowDescriptor {
    pub fn new(rect: Rect<i32>) -> Self {
        Self {
            title: "Docklight".to_string(),
            rect,
            visible: true,
        }
    }

    /// Borderless, transparent, always-on-top window covering `rect`.
    pub fn attributes(&self) -> WindowAttributes {
        WinitWindow::default_attributes()
            .with_title(self.title.clone())
            .with_decorations(false)
            .with_transparent(true)
            .with_resizable(false)
            .with_visible(self.visible)
            .with_window_level(WindowLevel::AlwaysOnTop)
            .with_position(LogicalPosition::new(self.rect.x, self.rect.y))
            .with_inner_size(LogicalSize::new(
                self.rect.width.max(1) as u32,
                self.rect.height.max(1) as u32,
            ))
    }
}

/// Move and resize an existing dock window to `rect`.
pub fn apply_rect(window: &WinitWindow, rect: Rect<i32>) {
    window.set_outer_position(LogicalPosition::new(rect.x, rect.y));
    let _ = window.request_inner_size(LogicalSize::new(rect.width.max(1) as u32, rect.height.max(1) as u32));
}
