//! Parabolic zoom and displacement along the dock's main axis.
//!
//! Everything here is a pure function of its arguments. Positions are in
//! "content space": `0.0` is the leading edge of the un-zoomed dock content,
//! before it is centered on the monitor.

use docklight_core::profiling::profile_function;

/// Inputs of the zoom model, in pixels except where noted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomParams {
    pub icon_size: f32,
    /// Effective multiplier at the pointer. `1.0` disables zoom.
    pub zoom: f32,
    /// Influence radius in item widths.
    pub range: f32,
    /// Gap between neighbouring items.
    pub item_padding: f32,
    /// Space between the shelf edge and the first/last item.
    pub h_padding: f32,
}

impl ZoomParams {
    /// Width of one item slot: an icon plus its share of padding.
    #[inline]
    pub fn item_width(&self) -> f32 {
        self.icon_size + self.item_padding
    }

    /// Distance from the content edge to the first item's leading edge.
    #[inline]
    pub fn edge_padding(&self) -> f32 {
        self.h_padding + self.item_padding * 0.5
    }

    /// Influence radius in pixels.
    #[inline]
    pub fn range_px(&self) -> f32 {
        self.range * self.item_width()
    }
}

/// Scale of an item `distance` item-widths away from the pointer.
///
/// `1 + (zoom - 1) * max(0, 1 - (distance / range)^2)`: `zoom` at the
/// pointer, falling off parabolically to exactly `1.0` at `range`.
#[inline]
pub fn zoom_scale(distance: f32, zoom: f32, range: f32) -> f32 {
    if range <= 0.0 || zoom <= 1.0 {
        return 1.0;
    }
    let t = distance.abs() / range;
    1.0 + (zoom - 1.0) * (1.0 - t * t).max(0.0)
}

/// How far an item `offset` pixels from the pointer is pushed outward.
///
/// This is the accumulated excess size of everything between the pointer and
/// the item: the integral of `scale - 1` over the pixel distance, which keeps
/// zoomed neighbours from overlapping. Saturates at `range_px`.
#[inline]
pub fn displacement(offset: f32, zoom: f32, range_px: f32) -> f32 {
    if range_px <= 0.0 || zoom <= 1.0 {
        return 0.0;
    }
    let t = offset.abs().min(range_px);
    let u = t / range_px;
    (zoom - 1.0) * t * (1.0 - u * u / 3.0)
}

/// Un-zoomed centers of items with the given main-axis sizes.
pub fn rest_centers(sizes: &[f32], params: &ZoomParams) -> Vec<f32> {
    let mut centers = Vec::with_capacity(sizes.len());
    let mut cursor = params.edge_padding();
    for &size in sizes {
        centers.push(cursor + size * 0.5);
        cursor += size + params.item_padding;
    }
    centers
}

/// Un-zoomed length of the whole content, edge padding included.
///
/// An empty dock still has its padding, so the shelf never collapses to zero.
pub fn rest_extent(sizes: &[f32], params: &ZoomParams) -> f32 {
    let gaps = sizes.len().saturating_sub(1) as f32 * params.item_padding;
    params.edge_padding() * 2.0 + sizes.iter().sum::<f32>() + gaps
}

/// Zoom result for one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomSlot {
    pub rest_center: f32,
    /// Center after displacement.
    pub center: f32,
    pub scale: f32,
    /// Signed shift applied to `rest_center`.
    pub displacement: f32,
}

/// Scale and displace every item around `cursor` (content space).
///
/// With no cursor every item rests at scale `1.0`.
pub fn compute_zoom(sizes: &[f32], cursor: Option<f32>, params: &ZoomParams) -> Vec<ZoomSlot> {
    profile_function!();
    let centers = rest_centers(sizes, params);
    let item_width = params.item_width();
    let range_px = params.range_px();

    centers
        .into_iter()
        .map(|rest_center| {
            let Some(cursor) = cursor else {
                return ZoomSlot {
                    rest_center,
                    center: rest_center,
                    scale: 1.0,
                    displacement: 0.0,
                };
            };
            let offset = rest_center - cursor;
            let scale = zoom_scale(offset / item_width, params.zoom, params.range);
            let shift = displacement(offset, params.zoom, range_px) * offset.signum();
            ZoomSlot {
                rest_center,
                center: rest_center + shift,
                scale,
                displacement: shift,
            }
        })
        .collect()
}

/// Leading and trailing edge of the zoomed content, padding included.
pub fn content_bounds(slots: &[ZoomSlot], sizes: &[f32], params: &ZoomParams) -> (f32, f32) {
    let pad = params.edge_padding();
    if slots.is_empty() {
        return (0.0, pad * 2.0);
    }
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for (slot, &size) in slots.iter().zip(sizes) {
        let half = size * slot.scale * 0.5;
        lo = lo.min(slot.center - half);
        hi = hi.max(slot.center + half);
    }
    (lo - pad, hi + pad)
}
