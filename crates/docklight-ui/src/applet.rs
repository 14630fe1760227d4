//! Applets: dock items drawn and driven by code instead of an application.
//!
//! The dock only ever talks to an applet through the [`Applet`] trait. The
//! [`AppletHost`] owns the live instances, keyed by the item they occupy.

use std::fmt;

use docklight_render::IconImage;
use indexmap::IndexMap;

use crate::event::{PointerButton, ScrollDirection};
use crate::item::ItemId;
use crate::worker::AppletNotifier;

/// An entry of an item's context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Action { id: u32, label: String },
    Toggle { id: u32, label: String, checked: bool },
    Separator,
}

impl MenuEntry {
    pub fn action(id: u32, label: impl Into<String>) -> Self {
        MenuEntry::Action {
            id,
            label: label.into(),
        }
    }
}

/// How an applet reacted to input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppletResponse {
    #[default]
    Ignored,
    Handled,
    /// Handled, and the item's size or icon changed.
    Relayout,
}

/// Capability interface for applets.
///
/// All methods run on the dock's thread and must return quickly. Slow work
/// belongs on a worker that reports back through the [`AppletNotifier`]
/// handed to [`start`](Applet::start).
pub trait Applet: Send {
    fn name(&self) -> &str;

    /// Render the icon at `size` pixels.
    fn icon(&self, size: u32) -> Option<IconImage>;

    fn on_click(&mut self, _button: PointerButton) -> AppletResponse {
        AppletResponse::Ignored
    }

    fn on_scroll(&mut self, _direction: ScrollDirection) -> AppletResponse {
        AppletResponse::Ignored
    }

    fn menu_items(&self) -> Vec<MenuEntry> {
        Vec::new()
    }

    /// Main-axis size override in pixels.
    fn main_size(&self) -> Option<f32> {
        None
    }

    fn start(&mut self, _notifier: AppletNotifier) {}

    fn stop(&mut self) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppletError {
    /// An applet is already registered for the item.
    Duplicate(ItemId),
    /// No applet is registered for the item.
    Unknown(ItemId),
}

impl fmt::Display for AppletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppletError::Duplicate(id) => write!(f, "An applet is already registered for {}", id),
            AppletError::Unknown(id) => write!(f, "No applet registered for {}", id),
        }
    }
}

impl std::error::Error for AppletError {}

pub type AppletResult<T> = Result<T, AppletError>;

/// Registry of running applets, in registration order.
#[derive(Default)]
pub struct AppletHost {
    applets: IndexMap<ItemId, Box<dyn Applet>>,
}

impl fmt::Debug for AppletHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.applets.iter().map(|(id, applet)| (id, applet.name())))
            .finish()
    }
}

impl AppletHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register and start `applet` for `item`.
    pub fn register(
        &mut self,
        item: ItemId,
        mut applet: Box<dyn Applet>,
        notifier: AppletNotifier,
    ) -> AppletResult<()> {
        if self.applets.contains_key(&item) {
            return Err(AppletError::Duplicate(item));
        }
        tracing::debug!("Starting applet '{}' for {}", applet.name(), item);
        applet.start(notifier);
        self.applets.insert(item, applet);
        Ok(())
    }

    /// Stop and remove the applet for `item`.
    pub fn remove(&mut self, item: ItemId) -> AppletResult<Box<dyn Applet>> {
        let mut applet = self
            .applets
            .shift_remove(&item)
            .ok_or(AppletError::Unknown(item))?;
        tracing::debug!("Stopping applet '{}' for {}", applet.name(), item);
        applet.stop();
        Ok(applet)
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.applets.contains_key(&item)
    }

    pub fn len(&self) -> usize {
        self.applets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applets.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.applets.keys().copied()
    }

    fn get_mut(&mut self, item: ItemId) -> AppletResult<&mut Box<dyn Applet>> {
        self.applets.get_mut(&item).ok_or(AppletError::Unknown(item))
    }

    pub fn click(&mut self, item: ItemId, button: PointerButton) -> AppletResult<AppletResponse> {
        Ok(self.get_mut(item)?.on_click(button))
    }

    pub fn scroll(&mut self, item: ItemId, direction: ScrollDirection) -> AppletResult<AppletResponse> {
        Ok(self.get_mut(item)?.on_scroll(direction))
    }

    pub fn menu_items(&self, item: ItemId) -> AppletResult<Vec<MenuEntry>> {
        self.applets
            .get(&item)
            .map(|applet| applet.menu_items())
            .ok_or(AppletError::Unknown(item))
    }

    pub fn icon(&self, item: ItemId, size: u32) -> AppletResult<Option<IconImage>> {
        self.applets
            .get(&item)
            .map(|applet| applet.icon(size))
            .ok_or(AppletError::Unknown(item))
    }

    pub fn main_size(&self, item: ItemId) -> Option<f32> {
        self.applets.get(&item).and_then(|applet| applet.main_size())
    }

    /// Stop every applet, newest first.
    pub fn stop_all(&mut self) {
        while let Some((item, mut applet)) = self.applets.pop() {
            tracing::debug!("Stopping applet '{}' for {}", applet.name(), item);
            applet.stop();
        }
    }
}

impl Drop for AppletHost {
    fn drop(&mut self) {
        self.stop_all();
    }
}

// ---------------------------------------------------------------------------
// Separator
// ---------------------------------------------------------------------------

/// A blank gap between items. Scrolling over it changes its width.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparatorApplet {
    gap: f32,
}

impl SeparatorApplet {
    pub const DEFAULT_GAP: f32 = 5.0;
    pub const MIN_GAP: f32 = 2.0;
    pub const MAX_GAP: f32 = 48.0;
    pub const STEP: f32 = 2.0;

    pub fn new() -> Self {
        Self::with_gap(Self::DEFAULT_GAP)
    }

    pub fn with_gap(gap: f32) -> Self {
        Self {
            gap: gap.clamp(Self::MIN_GAP, Self::MAX_GAP),
        }
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }
}

impl Default for SeparatorApplet {
    fn default() -> Self {
        Self::new()
    }
}

impl Applet for SeparatorApplet {
    fn name(&self) -> &str {
        "separator"
    }

    fn icon(&self, _size: u32) -> Option<IconImage> {
        None
    }

    fn on_scroll(&mut self, direction: ScrollDirection) -> AppletResponse {
        let step = match direction {
            ScrollDirection::Up => Self::STEP,
            ScrollDirection::Down => -Self::STEP,
        };
        let gap = (self.gap + step).clamp(Self::MIN_GAP, Self::MAX_GAP);
        if gap == self.gap {
            return AppletResponse::Ignored;
        }
        self.gap = gap;
        AppletResponse::Relayout
    }

    fn main_size(&self) -> Option<f32> {
        Some(self.gap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::WorkerQueue;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter {
        started: Arc<AtomicUsize>,
        stopped: Arc<AtomicUsize>,
        clicks: usize,
    }

    impl Applet for Counter {
        fn name(&self) -> &str {
            "counter"
        }

        fn icon(&self, size: u32) -> Option<IconImage> {
            IconImage::solid(size, size, docklight_render::Color::WHITE).ok()
        }

        fn on_click(&mut self, _button: PointerButton) -> AppletResponse {
            self.clicks += 1;
            AppletResponse::Handled
        }

        fn menu_items(&self) -> Vec<MenuEntry> {
            vec![MenuEntry::action(1, format!("Clicked {} times", self.clicks))]
        }

        fn start(&mut self, _notifier: AppletNotifier) {
            self.started.fetch_add(1, Ordering::SeqCst);
        }

        fn stop(&mut self) {
            self.stopped.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn counter() -> (Box<Counter>, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let started = Arc::new(AtomicUsize::new(0));
        let stopped = Arc::new(AtomicUsize::new(0));
        let applet = Box::new(Counter {
            started: started.clone(),
            stopped: stopped.clone(),
            clicks: 0,
        });
        (applet, started, stopped)
    }

    #[test]
    fn lifecycle_starts_and_stops() {
        let queue = WorkerQueue::new();
        let mut host = AppletHost::new();
        let (applet, started, stopped) = counter();
        let id = ItemId(1);
        host.register(id, applet, AppletNotifier::new(id, queue.sender())).unwrap();
        assert_eq!(started.load(Ordering::SeqCst), 1);

        assert_eq!(host.click(id, PointerButton::Left), Ok(AppletResponse::Handled));
        assert_eq!(
            host.menu_items(id).unwrap(),
            vec![MenuEntry::action(1, "Clicked 1 times")]
        );
        assert_eq!(host.icon(id, 16).unwrap().map(|i| i.width()), Some(16));

        host.remove(id).unwrap();
        assert_eq!(stopped.load(Ordering::SeqCst), 1);
        assert_eq!(host.click(id, PointerButton::Left), Err(AppletError::Unknown(id)));
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let queue = WorkerQueue::new();
        let mut host = AppletHost::new();
        let id = ItemId(2);
        host.register(id, Box::new(SeparatorApplet::new()), AppletNotifier::new(id, queue.sender()))
            .unwrap();
        let err = host
            .register(id, Box::new(SeparatorApplet::new()), AppletNotifier::new(id, queue.sender()))
            .unwrap_err();
        assert_eq!(err, AppletError::Duplicate(id));
    }

    #[test]
    fn dropping_host_stops_applets() {
        let queue = WorkerQueue::new();
        let (applet, _, stopped) = counter();
        {
            let mut host = AppletHost::new();
            host.register(ItemId(3), applet, AppletNotifier::new(ItemId(3), queue.sender()))
                .unwrap();
        }
        assert_eq!(stopped.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn separator_scroll_resizes_within_bounds() {
        let mut sep = SeparatorApplet::new();
        assert_eq!(sep.main_size(), Some(5.0));
        assert_eq!(sep.on_scroll(ScrollDirection::Up), AppletResponse::Relayout);
        assert_eq!(sep.gap(), 7.0);
        for _ in 0..10 {
            sep.on_scroll(ScrollDirection::Down);
        }
        assert_eq!(sep.gap(), SeparatorApplet::MIN_GAP);
        assert_eq!(sep.on_scroll(ScrollDirection::Down), AppletResponse::Ignored);
    }
}
