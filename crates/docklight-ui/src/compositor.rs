//! Off-screen compositing and presentation.
//!
//! A frame is drawn completely into the compositor's own [`Surface`] and only
//! then handed to the [`PresentTarget`] in one call, so no partially drawn
//! frame is ever visible.

use std::sync::Arc;

use docklight_core::alloc::HashMap;
use docklight_core::profiling::{profile_function, profile_scope};
use docklight_render::{Color, PresentTarget, RenderError, RenderResult, Surface};

use crate::draw_list::{DrawCommand, DrawList, build_draw_list};
use crate::item::ItemId;
use crate::layout::{ItemLayout, LayoutFrame};
use crate::theme::Theme;

/// Cached dominant color of an icon, tagged with the icon it came from.
#[derive(Debug, Clone, Copy)]
struct CachedColor {
    icon: usize,
    color: Color,
}

pub struct Compositor {
    surface: Option<Surface>,
    dominant: HashMap<ItemId, CachedColor>,
    clear_color: Color,
    presented: u64,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    pub fn new() -> Self {
        Self {
            surface: None,
            dominant: HashMap::new(),
            clear_color: Color::TRANSPARENT,
            presented: 0,
        }
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// The back buffer, once a frame has been drawn.
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Frames successfully presented.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Dominant color of an item's icon, recomputed only when the icon changes.
    pub fn dominant_color(&mut self, item: &ItemLayout) -> Color {
        let Some(icon) = &item.icon else {
            return Color::GRAY;
        };
        let key = Arc::as_ptr(icon) as usize;
        if let Some(cached) = self.dominant.get(&item.id)
            && cached.icon == key
        {
            return cached.color;
        }
        let color = icon.dominant_color();
        self.dominant.insert(item.id, CachedColor { icon: key, color });
        color
    }

    /// Drop cached colors of items no longer in `frame`.
    pub fn prune(&mut self, frame: &LayoutFrame) {
        self.dominant
            .retain(|id, _| frame.items.iter().any(|item| item.id == *id));
    }

    fn ensure_surface(&mut self, width: u32, height: u32) -> RenderResult<&mut Surface> {
        match &mut self.surface {
            Some(surface) => {
                surface.resize(width, height)?;
            }
            None => {
                self.surface = Some(Surface::builder(width, height).clear_color(self.clear_color).build()?);
            }
        }
        self.surface
            .as_mut()
            .ok_or(RenderError::InvalidDimensions { width, height })
    }

    /// Draw `frame` off-screen without presenting it.
    pub fn draw(&mut self, frame: &LayoutFrame, theme: &Theme) -> RenderResult<()> {
        profile_function!();
        let width = frame.window.width.ceil() as u32;
        let height = frame.window.height.ceil() as u32;

        let list = build_draw_list(frame, theme, |item| self.dominant_color(item));
        let clear = self.clear_color;
        let surface = self.ensure_surface(width, height)?;
        surface.clear(clear);
        rasterize(surface, &list);
        Ok(())
    }

    /// Draw `frame` and present it to `target` in a single call.
    ///
    /// On failure the previous frame stays on screen; the next frame
    /// simply tries again.
    pub fn render(&mut self, frame: &LayoutFrame, theme: &Theme, target: &dyn PresentTarget) -> RenderResult<()> {
        profile_function!();
        self.draw(frame, theme)?;
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        match surface.present(target) {
            Ok(()) => {
                self.presented += 1;
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Failed to present dock frame: {}", err);
                Err(err)
            }
        }
    }
}

/// Execute every command of `list` on `surface`, in order.
pub fn rasterize(surface: &mut Surface, list: &DrawList) {
    profile_scope!("rasterize");
    for command in list.iter() {
        match command {
            DrawCommand::Quad(quad) if quad.stroke_width > 0.0 => {
                surface.stroke_rounded_rect(quad.rect, quad.radii, quad.stroke_width, &quad.paint)
            }
            DrawCommand::Quad(quad) => surface.fill_rounded_rect(quad.rect, quad.radii, &quad.paint),
            DrawCommand::Image(image) => surface.draw_image(&image.image, image.rect, image.adjust),
            DrawCommand::Circle(circle) => {
                surface.fill_circle_with(circle.center, circle.radius, &circle.paint, circle.blend)
            }
        }
    }
}
