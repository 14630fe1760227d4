//! Draw list for one dock frame.
//!
//! [`build_draw_list`] turns a [`LayoutFrame`] into backend-agnostic draw
//! commands; the compositor then rasterizes them in z order. Nothing here
//! touches pixels, so the list can be inspected in tests.

use std::sync::Arc;

use docklight_core::config::DockEdge;
use docklight_core::geometry::Rect;
use docklight_core::math::Vec2;
use docklight_core::profiling::profile_function;
use docklight_render::{BlendMode, Color, CornerRadii, IconImage, ImageAdjust, Paint};

use crate::item::ItemFlags;
use crate::layout::{ItemLayout, LayoutFrame};
use crate::theme::Theme;

/// Draw order of the dock's layers.
pub mod z {
    pub const SHELF: u16 = 0;
    pub const SHELF_STROKE: u16 = 1;
    pub const ACTIVE_GLOW: u16 = 2;
    pub const ICON: u16 = 3;
    pub const INDICATOR: u16 = 4;
    pub const URGENT_GLOW: u16 = 5;
}

/// Horizontal padding of the active glow, as a fraction of the item size.
const ACTIVE_GLOW_PAD: f32 = 0.15;
const INNER_STROKE_FAR_OPACITY: f32 = 0.5;
const INNER_STROKE_NEAR_OPACITY: f32 = 0.19;

/// High-level draw command for one dock element.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Filled or stroked (rounded) rectangle
    Quad(QuadCommand),
    /// Icon scaled into a rectangle
    Image(ImageCommand),
    /// Filled disc
    Circle(CircleCommand),
}

impl DrawCommand {
    /// Get the z-index for sorting.
    pub fn z_index(&self) -> u16 {
        match self {
            DrawCommand::Quad(q) => q.z_index,
            DrawCommand::Image(i) => i.z_index,
            DrawCommand::Circle(c) => c.z_index,
        }
    }
}

/// Command to draw a quad (rectangle).
#[derive(Debug, Clone, PartialEq)]
pub struct QuadCommand {
    pub rect: Rect<f32>,
    pub radii: CornerRadii,
    pub paint: Paint,
    /// Stroke width (0 = filled, >0 = inside outline)
    pub stroke_width: f32,
    pub z_index: u16,
}

impl QuadCommand {
    /// Create a new filled quad command.
    pub fn filled(rect: Rect<f32>, paint: Paint, z_index: u16) -> Self {
        Self::rounded(rect, CornerRadii::ZERO, paint, z_index)
    }

    /// Create a new rounded quad command.
    pub fn rounded(rect: Rect<f32>, radii: CornerRadii, paint: Paint, z_index: u16) -> Self {
        Self {
            rect,
            radii,
            paint,
            stroke_width: 0.0,
            z_index,
        }
    }

    /// Create a new bordered quad command.
    pub fn bordered(
        rect: Rect<f32>,
        radii: CornerRadii,
        stroke_width: f32,
        paint: Paint,
        z_index: u16,
    ) -> Self {
        Self {
            rect,
            radii,
            paint,
            stroke_width,
            z_index,
        }
    }
}

/// Command to draw an icon.
#[derive(Debug, Clone)]
pub struct ImageCommand {
    pub image: Arc<IconImage>,
    pub rect: Rect<f32>,
    pub adjust: ImageAdjust,
    pub z_index: u16,
}

/// Command to draw a disc.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCommand {
    pub center: Vec2,
    pub radius: f32,
    pub paint: Paint,
    pub blend: BlendMode,
    pub z_index: u16,
}

/// Draw commands for one frame.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    needs_sort: bool,
}

impl DrawList {
    /// Create a new empty draw list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a draw list with initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
            needs_sort: false,
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        if let Some(last) = self.commands.last() {
            self.needs_sort |= last.z_index() > command.z_index();
        }
        self.commands.push(command);
    }

    /// Sort commands by z-index. Stable, so equal z keeps push order.
    pub fn sort_if_needed(&mut self) {
        if !self.needs_sort {
            return;
        }
        self.commands.sort_by_key(DrawCommand::z_index);
        self.needs_sort = false;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.needs_sort = false;
    }
}

// ---------------------------------------------------------------------------
// Frame -> commands
// ---------------------------------------------------------------------------

/// Point `from_edge` pixels out from the screen edge at main-axis `main`.
fn edge_point(edge: DockEdge, window: &Rect<f32>, main: f32, from_edge: f32) -> Vec2 {
    match edge {
        DockEdge::Bottom => Vec2::new(main, window.height - from_edge),
        DockEdge::Top => Vec2::new(main, from_edge),
        DockEdge::Left => Vec2::new(from_edge, main),
        DockEdge::Right => Vec2::new(window.width - from_edge, main),
    }
}

/// Far-side and edge-side midpoints of `rect` along the cross axis.
fn cross_span(edge: DockEdge, rect: &Rect<f32>) -> (Vec2, Vec2) {
    let c = rect.center();
    match edge {
        DockEdge::Bottom => (Vec2::new(c.x, rect.top()), Vec2::new(c.x, rect.bottom())),
        DockEdge::Top => (Vec2::new(c.x, rect.bottom()), Vec2::new(c.x, rect.top())),
        DockEdge::Left => (Vec2::new(rect.right(), c.y), Vec2::new(rect.left(), c.y)),
        DockEdge::Right => (Vec2::new(rect.left(), c.y), Vec2::new(rect.right(), c.y)),
    }
}

/// Round only the corners away from the screen edge.
fn shelf_radii(edge: DockEdge, radius: f32) -> CornerRadii {
    match edge {
        DockEdge::Bottom => CornerRadii::new(radius, radius, 0.0, 0.0),
        DockEdge::Top => CornerRadii::new(0.0, 0.0, radius, radius),
        DockEdge::Left => CornerRadii::new(0.0, radius, radius, 0.0),
        DockEdge::Right => CornerRadii::new(radius, 0.0, 0.0, radius),
    }
}

fn intersect(a: &Rect<f32>, b: &Rect<f32>) -> Rect<f32> {
    let x0 = a.x.max(b.x);
    let y0 = a.y.max(b.y);
    let x1 = a.right().min(b.right());
    let y1 = a.bottom().min(b.bottom());
    Rect::new(x0, y0, (x1 - x0).max(0.0), (y1 - y0).max(0.0))
}

fn push_shelf(list: &mut DrawList, frame: &LayoutFrame, theme: &Theme) {
    let rect = frame.shelf;
    if rect.is_empty() {
        return;
    }
    let edge = frame.edge;
    let radii = shelf_radii(edge, theme.corner_radius);
    let (far, near) = cross_span(edge, &rect);

    list.push(DrawCommand::Quad(QuadCommand::rounded(
        rect,
        radii,
        Paint::Linear {
            start: far,
            end: near,
            from: theme.fill_start,
            to: theme.fill_end,
        },
        z::SHELF,
    )));

    let stroke = theme.stroke_width;
    if stroke <= 0.0 {
        return;
    }
    list.push(DrawCommand::Quad(QuadCommand::bordered(
        rect,
        radii,
        stroke,
        Paint::Solid(theme.outer_stroke),
        z::SHELF_STROKE,
    )));

    let inner = rect.inflate(-stroke, -stroke);
    if inner.is_empty() {
        return;
    }
    let (far, near) = cross_span(edge, &inner);
    list.push(DrawCommand::Quad(QuadCommand::bordered(
        inner,
        shelf_radii(edge, (theme.corner_radius - stroke).max(0.0)),
        stroke,
        Paint::Linear {
            start: far,
            end: near,
            from: theme.inner_stroke.fade(INNER_STROKE_FAR_OPACITY),
            to: theme.inner_stroke.fade(INNER_STROKE_NEAR_OPACITY),
        },
        z::SHELF_STROKE,
    )));
}

fn push_active_glow(list: &mut DrawList, frame: &LayoutFrame, theme: &Theme, item: &ItemLayout, color: Color) {
    if frame.shelf.is_empty() || theme.glow_opacity <= 0.0 {
        return;
    }
    let pad = ACTIVE_GLOW_PAD * frame.icon_size * item.scale;
    let glow = if frame.edge.is_horizontal() {
        Rect::new(item.rect.x - pad, frame.shelf.y, item.rect.width + pad * 2.0, frame.shelf.height)
    } else {
        Rect::new(frame.shelf.x, item.rect.y - pad, frame.shelf.width, item.rect.height + pad * 2.0)
    };
    let glow = intersect(&glow, &frame.shelf);
    if glow.is_empty() {
        return;
    }
    let (far, near) = cross_span(frame.edge, &glow);
    list.push(DrawCommand::Quad(QuadCommand::filled(
        glow,
        Paint::Linear {
            start: far,
            end: near,
            from: Color::TRANSPARENT,
            to: color.fade(theme.glow_opacity),
        },
        z::ACTIVE_GLOW,
    )));
}

fn push_indicators(list: &mut DrawList, frame: &LayoutFrame, theme: &Theme, item: &ItemLayout) {
    if !item.flags.contains(ItemFlags::RUNNING) || theme.indicator_radius <= 0.0 {
        return;
    }
    let count = item.instance_count.clamp(1, theme.max_indicator_dots.max(1));
    let color = if item.flags.contains(ItemFlags::ACTIVE) {
        theme.active_indicator_color
    } else {
        theme.indicator_color
    };
    let spacing = theme.indicator_radius * 3.0;
    let main_center = frame.main_axis(item.center());
    let from_edge = theme.indicator_offset() - frame.hide_px;
    let first = main_center - spacing * (count - 1) as f32 * 0.5;
    for k in 0..count {
        let center = edge_point(frame.edge, &frame.window, first + spacing * k as f32, from_edge);
        list.push(DrawCommand::Circle(CircleCommand {
            center,
            radius: theme.indicator_radius,
            paint: Paint::Solid(color),
            blend: BlendMode::Alpha,
            z_index: z::INDICATOR,
        }));
    }
}

fn push_urgent_glow(list: &mut DrawList, frame: &LayoutFrame, theme: &Theme, item: &ItemLayout, color: Color) {
    let opacity = item.visuals.urgent_glow;
    if opacity <= 0.0 || frame.hide_offset < 1.0 || theme.urgent_glow_radius <= 0.0 {
        return;
    }
    let center = edge_point(frame.edge, &frame.window, frame.main_axis(item.center()), 0.0);
    list.push(DrawCommand::Circle(CircleCommand {
        center,
        radius: theme.urgent_glow_radius,
        paint: Paint::Radial {
            center,
            radius: theme.urgent_glow_radius,
            inner: color.with_alpha(opacity.clamp(0.0, 1.0)),
            outer: color.with_alpha(0.0),
        },
        blend: BlendMode::Additive,
        z_index: z::URGENT_GLOW,
    }));
}

/// Build the sorted draw list for `frame`.
///
/// `dominant` supplies an item's glow color.
pub fn build_draw_list<F>(frame: &LayoutFrame, theme: &Theme, mut dominant: F) -> DrawList
where
    F: FnMut(&ItemLayout) -> Color,
{
    profile_function!();
    let mut list = DrawList::with_capacity(4 + frame.items.len() * 3);
    push_shelf(&mut list, frame, theme);

    for item in &frame.items {
        let wants_glow = item.flags.contains(ItemFlags::ACTIVE)
            || (item.visuals.urgent_glow > 0.0 && frame.hide_offset >= 1.0);
        let color = if wants_glow { dominant(item) } else { Color::GRAY };

        if item.flags.contains(ItemFlags::ACTIVE) {
            push_active_glow(&mut list, frame, theme, item, color);
        }
        if let Some(icon) = &item.icon
            && !item.rect.is_empty()
        {
            list.push(DrawCommand::Image(ImageCommand {
                image: Arc::clone(icon),
                rect: item.rect,
                adjust: ImageAdjust {
                    opacity: 1.0,
                    lighten: item.visuals.lighten,
                    darken: item.visuals.darken,
                },
                z_index: z::ICON,
            }));
        }
        push_indicators(&mut list, frame, theme, item);
        push_urgent_glow(&mut list, frame, theme, item, color);
    }

    list.sort_if_needed();
    list
}
