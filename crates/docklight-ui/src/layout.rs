//! Per-frame dock layout.
//!
//! [`compute_frame`] is the one place geometry is produced. Its output, a
//! [`LayoutFrame`], is what hit testing, the input region and the compositor
//! all read, so they always agree on where things are.
//!
//! Coordinates are window-local logical pixels. The engine works along a
//! *main* axis (the one items are laid out on) and a *cross* axis measured
//! from the screen edge outward; [`DockEdge`] maps both back to x/y.

use std::sync::Arc;

use docklight_core::config::{DockConfig, DockEdge};
use docklight_core::geometry::Rect;
use docklight_core::math::Vec2;
use docklight_core::profiling::profile_function;
use docklight_render::IconImage;

use crate::effects::ItemVisuals;
use crate::item::{ItemFlags, ItemId, ItemKind, ItemSnapshot};
use crate::theme::Theme;
use crate::zoom::{ZoomParams, compute_zoom, content_bounds, rest_centers, rest_extent};

/// Everything a frame is computed from.
#[derive(Debug, Clone, Copy)]
pub struct LayoutInputs<'a> {
    pub config: &'a DockConfig,
    pub theme: &'a Theme,
    /// Window size in logical pixels.
    pub window: Vec2,
    pub items: &'a [ItemSnapshot],
    /// Effect values per item, parallel to `items`. Missing entries are at rest.
    pub visuals: &'a [ItemVisuals],
    /// Pointer position along the main axis, if zoom should follow it.
    pub cursor: Option<f32>,
    /// Zoom fade, `0..=1`.
    pub zoom_progress: f32,
    /// Autohide offset, `0` shown to `1` hidden.
    pub hide_offset: f32,
    /// Open a one-item gap before this index for a drag in progress.
    pub drop_gap: Option<usize>,
}

/// Final placement of one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemLayout {
    pub id: ItemId,
    pub index: usize,
    pub kind: ItemKind,
    /// Rendered rectangle, after zoom, bounce, slide and hide.
    pub rect: Rect<f32>,
    pub scale: f32,
    pub displacement: f32,
    pub flags: ItemFlags,
    pub instance_count: u32,
    pub icon: Option<Arc<IconImage>>,
    pub visuals: ItemVisuals,
}

impl ItemLayout {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}

/// One frame's worth of geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutFrame {
    pub edge: DockEdge,
    /// Window rectangle, always at the origin.
    pub window: Rect<f32>,
    pub icon_size: f32,
    pub hide_offset: f32,
    /// Cross-axis distance everything has slid toward the screen edge.
    pub hide_px: f32,
    /// The background shelf.
    pub shelf: Rect<f32>,
    pub items: Vec<ItemLayout>,
    /// Union of the shelf and every item.
    pub bounds: Rect<f32>,
}

/// Rectangle `main_len` long and `cross_len` thick whose near side is
/// `from_edge` pixels from the screen edge.
pub(crate) fn edge_rect(
    edge: DockEdge,
    window: Vec2,
    main_pos: f32,
    main_len: f32,
    from_edge: f32,
    cross_len: f32,
) -> Rect<f32> {
    match edge {
        DockEdge::Bottom => Rect::new(main_pos, window.y - from_edge - cross_len, main_len, cross_len),
        DockEdge::Top => Rect::new(main_pos, from_edge, main_len, cross_len),
        DockEdge::Left => Rect::new(from_edge, main_pos, cross_len, main_len),
        DockEdge::Right => Rect::new(window.x - from_edge - cross_len, main_pos, cross_len, main_len),
    }
}

/// Main-axis coordinate of a point.
#[inline]
pub fn main_axis(edge: DockEdge, point: Vec2) -> f32 {
    if edge.is_horizontal() { point.x } else { point.y }
}

#[inline]
fn main_len(edge: DockEdge, size: Vec2) -> f32 {
    if edge.is_horizontal() { size.x } else { size.y }
}

/// Zoom multiplier in effect for the given fade and hide state.
pub fn effective_zoom(config: &DockConfig, zoom_progress: f32, hide_offset: f32) -> f32 {
    let fade = zoom_progress.clamp(0.0, 1.0) * (1.0 - hide_offset.clamp(0.0, 1.0));
    1.0 + (config.zoom_factor() - 1.0) * fade
}

pub(crate) fn zoom_params(config: &DockConfig, theme: &Theme, zoom: f32) -> ZoomParams {
    ZoomParams {
        icon_size: theme.icon_size,
        zoom,
        range: config.zoom_range,
        item_padding: theme.item_padding,
        h_padding: theme.h_padding,
    }
}

/// Rest centers of `items` in content space, keyed by id.
pub fn rest_positions(items: &[ItemSnapshot], config: &DockConfig, theme: &Theme) -> Vec<(ItemId, f32)> {
    let sizes: Vec<f32> = items.iter().map(|item| item.main_size_or(theme.icon_size)).collect();
    let params = zoom_params(config, theme, 1.0);
    items
        .iter()
        .map(|item| item.id)
        .zip(rest_centers(&sizes, &params))
        .collect()
}

/// Compute the frame for `inputs`. Pure: equal inputs give equal frames.
pub fn compute_frame(inputs: &LayoutInputs<'_>) -> LayoutFrame {
    profile_function!();
    let LayoutInputs {
        config,
        theme,
        window,
        items,
        visuals,
        ..
    } = *inputs;
    let edge = config.position;
    let hide_offset = inputs.hide_offset.clamp(0.0, 1.0);
    let zoom = effective_zoom(config, inputs.zoom_progress, hide_offset);
    let params = zoom_params(config, theme, zoom);
    let hide_px = hide_offset * theme.visible_cross(config.zoom_factor());
    let window_main = main_len(edge, window);

    let sizes: Vec<f32> = items.iter().map(|item| item.main_size_or(theme.icon_size)).collect();
    let base_width = rest_extent(&sizes, &params);
    let base_offset = (window_main - base_width) * 0.5;
    let cursor = inputs.cursor.map(|c| c - base_offset);
    let slots = compute_zoom(&sizes, cursor, &params);

    let gap_index = inputs.drop_gap.map(|i| i.min(items.len()));
    let gap = if gap_index.is_some() { params.item_width() } else { 0.0 };
    let (lo, hi) = content_bounds(&slots, &sizes, &params);
    let (lo, hi) = (lo, hi + gap);
    let zoomed_width = hi - lo;
    let icon_offset = (window_main - zoomed_width) * 0.5 - lo;

    let shelf = edge_rect(
        edge,
        window,
        icon_offset + lo,
        zoomed_width,
        -hide_px,
        theme.shelf_height(),
    );

    let mut bounds = shelf;
    let mut laid_out = Vec::with_capacity(items.len());
    for (index, ((item, slot), &size)) in items.iter().zip(&slots).zip(&sizes).enumerate() {
        let fx = visuals.get(index).copied().unwrap_or_default();
        let drop_shift = match gap_index {
            Some(g) if index >= g => gap,
            _ => 0.0,
        };
        let main_size = size * slot.scale;
        let main_pos = slot.center - main_size * 0.5 + icon_offset + fx.slide + drop_shift;
        let from_edge = theme.bottom_padding - hide_px + fx.bounce;
        let rect = edge_rect(
            edge,
            window,
            main_pos,
            main_size,
            from_edge,
            theme.icon_size * slot.scale,
        );
        bounds = bounds.union(&rect);
        laid_out.push(ItemLayout {
            id: item.id,
            index,
            kind: item.kind,
            rect,
            scale: slot.scale,
            displacement: slot.displacement,
            flags: item.flags,
            instance_count: item.instance_count,
            icon: item.icon.clone(),
            visuals: fx,
        });
    }

    LayoutFrame {
        edge,
        window: Rect::new(0.0, 0.0, window.x, window.y),
        icon_size: theme.icon_size,
        hide_offset,
        hide_px,
        shelf,
        items: laid_out,
        bounds,
    }
}

impl LayoutFrame {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: ItemId) -> Option<&ItemLayout> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Main-axis coordinate of `point` for this frame's edge.
    #[inline]
    pub fn main_axis(&self, point: Vec2) -> f32 {
        main_axis(self.edge, point)
    }

    /// Where an item dropped at `point` would be inserted, in `0..=len`.
    pub fn insertion_index(&self, point: Vec2) -> usize {
        let pos = self.main_axis(point);
        self.items
            .iter()
            .take_while(|item| self.main_axis(item.center()) < pos)
            .count()
    }

    /// Main-axis length of the shelf.
    pub fn shelf_extent(&self) -> f32 {
        main_len(self.edge, self.shelf.size())
    }

    /// This frame with the shelf `extent` long along the main axis, centred
    /// in the window. Bounds follow the new shelf.
    pub fn with_shelf_extent(mut self, extent: f32) -> Self {
        let pos = (main_len(self.edge, self.window.size()) - extent) * 0.5;
        let shelf = self.shelf;
        self.shelf = if self.edge.is_horizontal() {
            Rect::new(pos, shelf.y, extent, shelf.height)
        } else {
            Rect::new(shelf.x, pos, shelf.width, extent)
        };
        self.bounds = self
            .items
            .iter()
            .fold(self.shelf, |bounds, item| bounds.union(&item.rect));
        self
    }

    /// Rectangle with the same main-axis span as `rect`, stretched across
    /// the cross axis from the screen edge to `rect`'s far side.
    pub fn anchor_to_edge(&self, rect: &Rect<f32>) -> Rect<f32> {
        let window = self.window.size();
        match self.edge {
            DockEdge::Bottom => Rect::new(rect.x, rect.y, rect.width, window.y - rect.y),
            DockEdge::Top => Rect::new(rect.x, 0.0, rect.width, rect.bottom()),
            DockEdge::Left => Rect::new(0.0, rect.y, rect.right(), rect.height),
            DockEdge::Right => Rect::new(rect.x, rect.y, window.x - rect.x, rect.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeSpec;

    fn items(n: u64) -> Vec<ItemSnapshot> {
        (0..n).map(ItemSnapshot::application).collect()
    }

    fn inputs<'a>(
        config: &'a DockConfig,
        theme: &'a Theme,
        items: &'a [ItemSnapshot],
        cursor: Option<f32>,
    ) -> LayoutInputs<'a> {
        LayoutInputs {
            config,
            theme,
            window: Vec2::new(800.0, theme.window_cross(config.zoom_factor())),
            items,
            visuals: &[],
            cursor,
            zoom_progress: 1.0,
            hide_offset: 0.0,
            drop_gap: None,
        }
    }

    #[test]
    fn rest_frame_is_centered_on_bottom_edge() {
        let config = DockConfig::default();
        let theme = ThemeSpec::default().resolve(48).unwrap();
        let items = items(3);
        let frame = compute_frame(&inputs(&config, &theme, &items, None));

        assert_eq!(frame.items.len(), 3);
        let window_h = frame.window.height;
        for item in &frame.items {
            assert_eq!(item.scale, 1.0);
            assert_eq!(item.rect.width, 48.0);
            assert!((item.rect.bottom() - (window_h - theme.bottom_padding)).abs() < 1e-3);
        }
        let mid = frame.shelf.center().x;
        assert!((mid - 400.0).abs() < 1e-3);
        assert!((frame.items[1].center().x - 400.0).abs() < 1e-3);
        assert!((frame.shelf.bottom() - window_h).abs() < 1e-3);
    }

    #[test]
    fn empty_dock_is_shelf_only() {
        let config = DockConfig::default();
        let theme = ThemeSpec::default().resolve(48).unwrap();
        let frame = compute_frame(&inputs(&config, &theme, &[], Some(400.0)));
        assert!(frame.is_empty());
        assert_eq!(frame.bounds, frame.shelf);
        assert!(frame.shelf.width > 0.0);
    }

    #[test]
    fn resized_shelf_stays_centred_and_bounds_follow() {
        let config = DockConfig::default().with_position(DockEdge::Left);
        let theme = ThemeSpec::default().resolve(48).unwrap();
        let items = items(2);
        let mut input = inputs(&config, &theme, &items, None);
        input.window = Vec2::new(theme.window_cross(1.5), 600.0);
        let frame = compute_frame(&input);
        let wide = frame.shelf_extent() + 100.0;

        let resized = frame.clone().with_shelf_extent(wide);
        assert_eq!(resized.shelf_extent(), wide);
        assert!((resized.shelf.center().y - 300.0).abs() < 1e-3);
        assert_eq!(resized.shelf.x, frame.shelf.x);
        assert_eq!(resized.shelf.width, frame.shelf.width);
        assert!(resized.bounds.height >= wide);
        assert_eq!(resized.items, frame.items);
    }

    #[test]
    fn left_dock_lays_out_vertically() {
        let config = DockConfig::default().with_position(DockEdge::Left);
        let theme = ThemeSpec::default().resolve(48).unwrap();
        let items = items(2);
        let mut input = inputs(&config, &theme, &items, None);
        input.window = Vec2::new(theme.window_cross(1.5), 600.0);
        let frame = compute_frame(&input);
        let (a, b) = (&frame.items[0].rect, &frame.items[1].rect);
        assert_eq!(a.x, b.x);
        assert!(b.y > a.y);
        assert!((a.x - theme.bottom_padding).abs() < 1e-3);
        assert_eq!(frame.shelf.x, 0.0);
    }

    #[test]
    fn hiding_slides_everything_off_the_edge() {
        let config = DockConfig::default();
        let theme = ThemeSpec::default().resolve(48).unwrap();
        let items = items(3);
        let mut input = inputs(&config, &theme, &items, None);
        input.hide_offset = 1.0;
        let frame = compute_frame(&input);
        let window_h = frame.window.height;
        assert!(frame.shelf.y >= window_h - 1e-3);
        for item in &frame.items {
            assert!(item.rect.y >= window_h - 1e-3, "{:?}", item.rect);
        }
    }

    #[test]
    fn drop_gap_makes_room_and_insertion_index_finds_it() {
        let config = DockConfig::default();
        let theme = ThemeSpec::default().resolve(48).unwrap();
        let items = items(3);
        let plain = compute_frame(&inputs(&config, &theme, &items, None));
        let mut input = inputs(&config, &theme, &items, None);
        input.drop_gap = Some(1);
        let gapped = compute_frame(&input);

        let spacing = |f: &LayoutFrame| f.items[1].rect.x - f.items[0].rect.x;
        assert!((spacing(&gapped) - spacing(&plain) - 60.0).abs() < 1e-3);

        let y = plain.items[0].center().y;
        assert_eq!(plain.insertion_index(Vec2::new(0.0, y)), 0);
        let between = (plain.items[0].center().x + plain.items[1].center().x) * 0.5;
        assert_eq!(plain.insertion_index(Vec2::new(between, y)), 1);
        assert_eq!(plain.insertion_index(Vec2::new(799.0, y)), 3);
    }
}
