//! Input shape, reserved screen space and window placement.
//!
//! Everything here is derived from the same [`LayoutFrame`] the compositor
//! draws, so the clickable area always matches what is on screen.

use docklight_core::config::{DockConfig, DockEdge};
use docklight_core::geometry::{Rect, Size};
use docklight_core::math::Vec2;

use crate::autohide::AutohideState;
use crate::layout::LayoutFrame;
use crate::theme::Theme;

/// Thickness of the reveal strip along the screen edge.
pub const TRIGGER_STRIP: i32 = 2;
/// Top docks get a thicker strip; the top edge is easy to overshoot.
pub const TRIGGER_STRIP_TOP: i32 = 8;

/// The part of the window that receives pointer input. Clicks elsewhere
/// pass through to whatever is behind the dock.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputRegion {
    rects: Vec<Rect<i32>>,
}

impl InputRegion {
    pub fn rects(&self) -> &[Rect<i32>] {
        &self.rects
    }

    pub fn is_empty(&self) -> bool {
        self.rects.iter().all(|r| r.is_empty())
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let (x, y) = (point.x.floor() as i32, point.y.floor() as i32);
        self.rects.iter().any(|rect| rect.contains(x, y))
    }

    /// Smallest rectangle covering the whole region.
    pub fn extents(&self) -> Rect<i32> {
        self.rects
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| r.to_f32())
            .reduce(|a, b| a.union(&b))
            .map(|r| r.round_out())
            .unwrap_or_default()
    }
}

/// Thin strip flush with the screen edge, spanning the whole window.
pub fn trigger_strip(edge: DockEdge, window: Size<i32>) -> Rect<i32> {
    let thickness = match edge {
        DockEdge::Top => TRIGGER_STRIP_TOP,
        _ => TRIGGER_STRIP,
    };
    match edge {
        DockEdge::Bottom => Rect::new(0, window.height - thickness, window.width, thickness),
        DockEdge::Top => Rect::new(0, 0, window.width, thickness),
        DockEdge::Left => Rect::new(0, 0, thickness, window.height),
        DockEdge::Right => Rect::new(window.width - thickness, 0, thickness, window.height),
    }
}

fn clip(rect: Rect<f32>, window: &Rect<f32>) -> Rect<f32> {
    let x0 = rect.x.max(window.x);
    let y0 = rect.y.max(window.y);
    let x1 = rect.right().min(window.right());
    let y1 = rect.bottom().min(window.bottom());
    Rect::new(x0, y0, (x1 - x0).max(0.0), (y1 - y0).max(0.0))
}

fn window_size(frame: &LayoutFrame) -> Size<i32> {
    Size::new(
        frame.window.width.ceil() as i32,
        frame.window.height.ceil() as i32,
    )
}

/// Input shape for `frame` in `state`.
///
/// The drawn dock, stretched to the screen edge, while visible; that plus
/// the trigger strip while a run is in flight; only the strip once hidden.
pub fn input_region(frame: &LayoutFrame, state: AutohideState) -> InputRegion {
    let strip = trigger_strip(frame.edge, window_size(frame));
    let visible = || {
        let anchored = frame.anchor_to_edge(&frame.bounds);
        clip(anchored, &frame.window).round_out()
    };
    let rects = match state {
        AutohideState::Visible => vec![visible()],
        AutohideState::Hiding | AutohideState::Showing => vec![visible(), strip],
        AutohideState::Hidden => vec![strip],
    };
    InputRegion { rects }
}

/// Screen space claimed along one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservedSpace {
    pub edge: DockEdge,
    /// Logical pixels from the monitor edge. Zero reserves nothing.
    pub thickness: u32,
}

/// An autohiding dock reserves nothing; otherwise it claims its visible
/// thickness at rest.
pub fn reserved_space(config: &DockConfig, theme: &Theme) -> ReservedSpace {
    let thickness = if config.autohide {
        0
    } else {
        theme.visible_cross(1.0).ceil() as u32
    };
    ReservedSpace {
        edge: config.position,
        thickness,
    }
}

/// Geometry of the monitor the dock lives on, in logical screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorInfo {
    pub geometry: Rect<i32>,
    /// Area not claimed by other panels.
    pub workarea: Rect<i32>,
    /// Size of the whole (multi-monitor) screen.
    pub screen: Size<i32>,
    /// Device pixels per logical pixel.
    pub scale: f32,
}

impl MonitorInfo {
    /// A single monitor at the origin covering the whole screen.
    pub fn single(width: i32, height: i32) -> Self {
        let geometry = Rect::new(0, 0, width, height);
        Self {
            geometry,
            workarea: geometry,
            screen: Size::new(width, height),
            scale: 1.0,
        }
    }
}

impl ReservedSpace {
    /// `_NET_WM_STRUT_PARTIAL` values in device pixels:
    /// `left, right, top, bottom`, then start/end pairs for each edge.
    ///
    /// Struts are measured from the screen edge, so the gap between the
    /// monitor and the screen edge is added to the thickness.
    pub fn to_strut_partial(&self, monitor: &MonitorInfo, window: &Rect<i32>) -> [u32; 12] {
        let mut strut = [0u32; 12];
        if self.thickness == 0 {
            return strut;
        }
        let m = &monitor.geometry;
        let (edge_index, start_index, gap, span_start, span_len) = match self.edge {
            DockEdge::Left => (0, 4, m.x, window.y, window.height),
            DockEdge::Right => (1, 6, monitor.screen.width - m.right(), window.y, window.height),
            DockEdge::Top => (2, 8, m.y, window.x, window.width),
            DockEdge::Bottom => (3, 10, monitor.screen.height - m.bottom(), window.x, window.width),
        };
        let device = |v: f32| (v * monitor.scale).round().max(0.0) as u32;
        strut[edge_index] = device(self.thickness as f32 + gap.max(0) as f32);
        let start = device(span_start as f32);
        strut[start_index] = start;
        strut[start_index + 1] = device((span_start + span_len) as f32).saturating_sub(1).max(start);
        strut
    }
}

/// Where the dock window sits on `monitor`, given its cross-axis size.
pub fn window_rect(edge: DockEdge, monitor: &MonitorInfo, cross: f32) -> Rect<i32> {
    let g = &monitor.geometry;
    let wa = &monitor.workarea;
    let cross = cross.ceil() as i32;
    match edge {
        DockEdge::Bottom => Rect::new(g.x, g.bottom() - cross, g.width, cross),
        DockEdge::Top => Rect::new(g.x, wa.y.max(g.y), g.width, cross),
        DockEdge::Left => Rect::new(g.x, wa.y, cross, wa.height),
        DockEdge::Right => Rect::new(g.right() - cross, wa.y, cross, wa.height),
    }
}
