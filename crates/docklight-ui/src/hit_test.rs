//! Pointer hit testing against the rendered layout.

use docklight_core::math::Vec2;
use docklight_core::profiling::profile_function;

use crate::item::ItemId;
use crate::layout::{ItemLayout, LayoutFrame};

/// What lies under a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Item { index: usize, id: ItemId },
    /// The shelf, a gap between items, or empty window area.
    Background,
}

impl HitTarget {
    pub fn item(&self) -> Option<ItemId> {
        match self {
            HitTarget::Item { id, .. } => Some(*id),
            HitTarget::Background => None,
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            HitTarget::Item { index, .. } => Some(*index),
            HitTarget::Background => None,
        }
    }
}

impl LayoutFrame {
    /// The item whose rendered rectangle contains `point`.
    ///
    /// Rectangles can overlap while items bounce or slide; the item whose
    /// center is closest to `point` wins, then the lower index.
    pub fn hit_test(&self, point: Vec2) -> HitTarget {
        profile_function!();
        self.items
            .iter()
            .filter(|item| item.rect.contains(point))
            .map(|item| (item, item.center().distance_squared(point)))
            .fold(None::<(&ItemLayout, f32)>, |best, candidate| match best {
                Some((_, d)) if d <= candidate.1 => best,
                _ => Some(candidate),
            })
            .map(|(item, _)| HitTarget::Item {
                index: item.index,
                id: item.id,
            })
            .unwrap_or(HitTarget::Background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::ItemVisuals;
    use crate::item::{ItemFlags, ItemKind};
    use docklight_core::config::DockEdge;
    use docklight_core::geometry::Rect;

    fn layout(index: usize, rect: Rect<f32>) -> ItemLayout {
        ItemLayout {
            id: ItemId(index as u64 + 100),
            index,
            kind: ItemKind::Application,
            rect,
            scale: 1.0,
            displacement: 0.0,
            flags: ItemFlags::empty(),
            instance_count: 0,
            icon: None,
            visuals: ItemVisuals::default(),
        }
    }

    fn frame(items: Vec<ItemLayout>) -> LayoutFrame {
        LayoutFrame {
            edge: DockEdge::Bottom,
            window: Rect::new(0.0, 0.0, 200.0, 100.0),
            icon_size: 48.0,
            hide_offset: 0.0,
            hide_px: 0.0,
            shelf: Rect::new(0.0, 80.0, 200.0, 20.0),
            bounds: Rect::new(0.0, 0.0, 200.0, 100.0),
            items,
        }
    }

    #[test]
    fn point_inside_rect_hits_item() {
        let frame = frame(vec![
            layout(0, Rect::new(10.0, 40.0, 48.0, 48.0)),
            layout(1, Rect::new(70.0, 40.0, 48.0, 48.0)),
        ]);
        assert_eq!(
            frame.hit_test(Vec2::new(80.0, 50.0)),
            HitTarget::Item { index: 1, id: ItemId(101) }
        );
        assert_eq!(frame.hit_test(Vec2::new(63.0, 50.0)), HitTarget::Background);
        assert_eq!(frame.hit_test(Vec2::new(20.0, 10.0)), HitTarget::Background);
    }

    #[test]
    fn overlap_resolves_to_nearest_center() {
        let frame = frame(vec![
            layout(0, Rect::new(0.0, 0.0, 60.0, 60.0)),
            layout(1, Rect::new(40.0, 0.0, 60.0, 60.0)),
        ]);
        assert_eq!(frame.hit_test(Vec2::new(45.0, 30.0)).index(), Some(0));
        assert_eq!(frame.hit_test(Vec2::new(55.0, 30.0)).index(), Some(1));
        // Equidistant: lower index.
        assert_eq!(frame.hit_test(Vec2::new(50.0, 30.0)).index(), Some(0));
    }
}
