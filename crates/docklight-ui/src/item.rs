//! Items as supplied by the host.
//!
//! The dock does not own which items exist or in what order. Each tick it is
//! handed an ordered list of [`ItemSnapshot`]s and layers its own geometry and
//! animation state on top, keyed by [`ItemId`].

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use docklight_render::IconImage;

/// Stable identity of a dock item, assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItemKind {
    #[default]
    Application,
    /// Drawn and dispatched through an [`Applet`](crate::applet::Applet).
    Applet,
}

bitflags! {
    /// Window-manager state of an item.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ItemFlags: u8 {
        /// At least one window is open.
        const RUNNING = 1 << 0;
        /// Owns the focused window.
        const ACTIVE = 1 << 1;
        /// Demands attention.
        const URGENT = 1 << 2;
    }
}

/// One dock slot as seen by the engine for a single tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSnapshot {
    pub id: ItemId,
    pub kind: ItemKind,
    pub flags: ItemFlags,
    /// Number of open windows; drives the indicator dots.
    pub instance_count: u32,
    pub icon: Option<Arc<IconImage>>,
    /// Main-axis size override in pixels. `None` uses the icon size.
    pub main_size: Option<f32>,
}

impl ItemSnapshot {
    pub fn application(id: u64) -> Self {
        Self {
            id: ItemId(id),
            kind: ItemKind::Application,
            flags: ItemFlags::empty(),
            instance_count: 0,
            icon: None,
            main_size: None,
        }
    }

    pub fn applet(id: u64) -> Self {
        Self {
            kind: ItemKind::Applet,
            ..Self::application(id)
        }
    }

    /// Mark as running with `instances` open windows.
    pub fn running(mut self, instances: u32) -> Self {
        self.flags.set(ItemFlags::RUNNING, instances > 0);
        self.instance_count = instances;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.flags.set(ItemFlags::ACTIVE, active);
        self
    }

    pub fn urgent(mut self, urgent: bool) -> Self {
        self.flags.set(ItemFlags::URGENT, urgent);
        self
    }

    pub fn with_icon(mut self, icon: Arc<IconImage>) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_main_size(mut self, size: f32) -> Self {
        self.main_size = Some(size);
        self
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.flags.contains(ItemFlags::RUNNING)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.flags.contains(ItemFlags::ACTIVE)
    }

    #[inline]
    pub fn is_urgent(&self) -> bool {
        self.flags.contains(ItemFlags::URGENT)
    }

    #[inline]
    pub fn is_applet(&self) -> bool {
        self.kind == ItemKind::Applet
    }

    /// Main-axis size at rest.
    #[inline]
    pub fn main_size_or(&self, icon_size: f32) -> f32 {
        self.main_size.unwrap_or(icon_size).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_tracks_instance_count() {
        let item = ItemSnapshot::application(1).running(2);
        assert!(item.is_running());
        assert_eq!(item.instance_count, 2);

        let closed = item.running(0);
        assert!(!closed.is_running());
    }

    #[test]
    fn flags_combine() {
        let item = ItemSnapshot::application(7).running(1).active(true).urgent(true);
        assert_eq!(item.flags, ItemFlags::all());
        assert!(!item.active(false).is_active());
    }

    #[test]
    fn applet_size_override() {
        let applet = ItemSnapshot::applet(3).with_main_size(5.0);
        assert!(applet.is_applet());
        assert_eq!(applet.main_size_or(48.0), 5.0);
        assert_eq!(ItemSnapshot::application(4).main_size_or(48.0), 48.0);
    }
}
