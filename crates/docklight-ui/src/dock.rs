//! The dock engine.
//!
//! [`Dock`] owns every piece of per-dock state and is driven by the host's
//! event loop: pointer events go to [`Dock::handle_pointer`], item list
//! updates to [`Dock::set_items`], and [`Dock::tick`] is called whenever the
//! previous tick's [`PumpCommand`] asks for it. Each tick produces exactly one
//! [`LayoutFrame`]; hit testing, the input region and the compositor all read
//! that same frame.

use std::sync::Arc;
use std::time::Duration;

use docklight_core::alloc::{HashMap, HashSet};
use docklight_core::config::{ConfigResult, DockConfig};
use docklight_core::geometry::Rect;
use docklight_core::math::Vec2;
use docklight_core::profiling::{profile_function, profile_scope};
use docklight_render::IconImage;

use crate::animation::Transient;
use crate::applet::{Applet, AppletError, AppletHost, AppletResponse, AppletResult, MenuEntry};
use crate::autohide::{AutohideFsm, AutohideState, StateChange};
use crate::effects::{ItemAnimation, ItemVisuals, ShelfWidth, ZoomEase};
use crate::event::{Modifiers, PointerButton, PointerEvent, ScrollDirection};
use crate::hit_test::HitTarget;
use crate::input_region::{InputRegion, MonitorInfo, ReservedSpace, input_region, reserved_space, window_rect};
use crate::item::{ItemId, ItemSnapshot};
use crate::layout::{LayoutFrame, LayoutInputs, compute_frame, main_axis, rest_positions, zoom_params};
use crate::pump::{AnimationPump, PumpCommand};
use crate::theme::{Theme, ThemeSpec};
use crate::worker::{AppletNotifier, WorkerMessage, WorkerQueue, WorkerSender};
use crate::zoom::rest_extent;

/// How long the pointer has to rest on a running item before a preview opens.
pub const PREVIEW_DELAY: Duration = Duration::from_millis(400);
/// Press and release further apart than this along the main axis is a drag.
pub const CLICK_SLOP: f32 = 10.0;

/// Something the host has to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum DockAction {
    /// Start a new instance of the item's application.
    Launch(ItemId),
    /// Focus the item's windows, or minimize them if already focused.
    ToggleFocus(ItemId),
    /// Scroll over an application item.
    Scroll { item: ItemId, direction: ScrollDirection },
    /// Open the item's context menu next to `anchor`.
    ShowMenu {
        item: ItemId,
        anchor: Rect<f32>,
        entries: Vec<MenuEntry>,
    },
    ShowPreview { item: ItemId, anchor: Rect<f32> },
    HidePreview,
    /// The pointer moved onto another item, or off all of them.
    HoverChanged {
        item: Option<ItemId>,
        anchor: Option<Rect<f32>>,
    },
}

/// Result of one [`Dock::tick`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub actions: Vec<DockAction>,
    /// Autohide transitions since the previous tick, oldest first.
    pub state_changes: Vec<StateChange>,
    /// The new input region, if it changed.
    pub input_region: Option<InputRegion>,
    /// The new reserved-space request, if it changed.
    pub reserved_space: Option<ReservedSpace>,
    /// The frame differs from the one before and should be presented.
    pub redraw: bool,
    pub next: PumpCommand,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Press {
    button: PointerButton,
    position: Vec2,
    target: HitTarget,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Hover {
    item: ItemId,
    since: Duration,
    preview_shown: bool,
}

pub struct Dock {
    config: DockConfig,
    theme_spec: ThemeSpec,
    theme: Theme,
    monitor: MonitorInfo,

    items: Vec<ItemSnapshot>,
    animations: HashMap<ItemId, ItemAnimation>,
    /// Rest centers relative to the dock's middle, for slides.
    rest: HashMap<ItemId, f32>,
    applets: AppletHost,
    worker: WorkerQueue,

    autohide: AutohideFsm,
    zoom: ZoomEase,
    /// Main-axis point zoom is centered on; kept while zoom fades out.
    zoom_cursor: Option<f32>,
    shelf: ShelfWidth,
    pump: AnimationPump,

    pointer: Option<Vec2>,
    press: Option<Press>,
    hover: Option<Hover>,
    drop_gap: Option<usize>,

    frame: LayoutFrame,
    region: InputRegion,
    reserved: ReservedSpace,
    next: PumpCommand,
    dirty: bool,
    last_now: Duration,
}

impl std::fmt::Debug for Dock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dock")
            .field("config", &self.config)
            .field("items", &self.items.len())
            .field("autohide", &self.autohide.state())
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}

impl Dock {
    pub fn new(config: DockConfig, theme_spec: ThemeSpec, monitor: MonitorInfo) -> ConfigResult<Self> {
        config.validate()?;
        let theme = theme_spec.resolve(config.icon_size)?;
        let autohide = AutohideFsm::new(&config);
        let zoom = ZoomEase::new(theme.active_time);
        let reserved = reserved_space(&config, &theme);
        let edge = config.position;

        let mut dock = Self {
            config,
            theme_spec,
            theme,
            monitor,
            items: Vec::new(),
            animations: HashMap::new(),
            rest: HashMap::new(),
            applets: AppletHost::new(),
            worker: WorkerQueue::new(),
            autohide,
            zoom,
            zoom_cursor: None,
            shelf: ShelfWidth::new(),
            pump: AnimationPump::default(),
            pointer: None,
            press: None,
            hover: None,
            drop_gap: None,
            frame: LayoutFrame {
                edge,
                window: Rect::ZERO,
                icon_size: 0.0,
                hide_offset: 0.0,
                hide_px: 0.0,
                shelf: Rect::ZERO,
                items: Vec::new(),
                bounds: Rect::ZERO,
            },
            region: InputRegion::default(),
            reserved,
            next: PumpCommand::Idle,
            dirty: true,
            last_now: Duration::ZERO,
        };
        dock.frame = dock.layout(Duration::ZERO);
        dock.region = input_region(&dock.frame, dock.autohide.state());
        tracing::debug!(
            "Dock created on {} edge, {}px icons",
            dock.config.position.as_str(),
            dock.config.icon_size
        );
        Ok(dock)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn items(&self) -> &[ItemSnapshot] {
        &self.items
    }

    /// The frame computed by the last tick.
    pub fn frame(&self) -> &LayoutFrame {
        &self.frame
    }

    pub fn hit_test(&self, point: Vec2) -> HitTarget {
        self.frame.hit_test(point)
    }

    pub fn input_region(&self) -> &InputRegion {
        &self.region
    }

    pub fn reserved_space(&self) -> ReservedSpace {
        self.reserved
    }

    /// The reservation as a `_NET_WM_STRUT_PARTIAL` value.
    pub fn strut_partial(&self) -> [u32; 12] {
        self.reserved.to_strut_partial(&self.monitor, &self.window_rect())
    }

    pub fn autohide_state(&self) -> AutohideState {
        self.autohide.state()
    }

    /// What the event loop was last told to do.
    pub fn next_tick(&self) -> PumpCommand {
        self.next
    }

    /// The dock window in screen coordinates.
    pub fn window_rect(&self) -> Rect<i32> {
        window_rect(
            self.config.position,
            &self.monitor,
            self.theme.window_cross(self.config.zoom_factor()),
        )
    }

    pub fn worker_sender(&self) -> WorkerSender {
        self.worker.sender()
    }

    pub fn applets(&self) -> &AppletHost {
        &self.applets
    }

    pub fn applets_mut(&mut self) -> &mut AppletHost {
        &mut self.applets
    }

    fn now(&mut self, now: Duration) -> Duration {
        // A clock that runs backwards is treated as standing still.
        let now = now.max(self.last_now);
        self.last_now = now;
        now
    }

    // ------------------------------------------------------------------
    // External updates
    // ------------------------------------------------------------------

    /// Replace the item list. Items keep their animation state by id; new
    /// items start at rest and removed ones are forgotten.
    pub fn set_items(&mut self, items: Vec<ItemSnapshot>, now: Duration) {
        let now = self.now(now);
        let before = self.items.len();
        self.items = items;

        let live: HashSet<ItemId> = self.items.iter().map(|item| item.id).collect();
        self.animations.retain(|id, _| live.contains(id));
        let gone: Vec<ItemId> = self.applets.ids().filter(|id| !live.contains(id)).collect();
        for id in gone {
            match self.applets.remove(id) {
                Ok(applet) => tracing::debug!("Removed applet '{}' with its item {}", applet.name(), id),
                Err(err) => tracing::debug!("Applet removal skipped: {}", err),
            }
        }

        for item in &self.items {
            let anim = self
                .animations
                .entry(item.id)
                .or_insert_with(|| ItemAnimation::new(&self.theme));
            anim.set_urgent(item.is_urgent(), now);
        }

        self.apply_applet_sizes();
        self.update_rest(now);
        if before != self.items.len() {
            tracing::debug!("Dock items changed: {} -> {}", before, self.items.len());
        }
        self.dirty = true;
    }

    /// Register `applet` for an applet item already in the list, or about
    /// to be. Its icon is requested on the next tick.
    pub fn register_applet(&mut self, item: ItemId, applet: Box<dyn Applet>) -> AppletResult<()> {
        let notifier = AppletNotifier::new(item, self.worker.sender());
        self.applets.register(item, applet, notifier.clone())?;
        notifier.refresh_icon();
        self.apply_applet_sizes();
        self.update_rest(self.last_now);
        self.dirty = true;
        Ok(())
    }

    /// Apply a new configuration. Invalid values are rejected and the old
    /// configuration stays.
    pub fn set_config(&mut self, config: DockConfig, now: Duration) -> ConfigResult<()> {
        let now = self.now(now);
        config.validate()?;
        if config.icon_size != self.config.icon_size {
            self.theme = self.theme_spec.resolve(config.icon_size)?;
            self.reset_animations();
        }
        if !config.zoom_enabled {
            self.zoom.set_active(false, now);
        }
        if config.position != self.config.position {
            self.shelf.reset();
        }
        self.autohide.apply_config(&config, now);
        self.config = config;
        self.update_rest(now);
        self.dirty = true;
        Ok(())
    }

    pub fn set_theme(&mut self, spec: ThemeSpec) -> ConfigResult<()> {
        self.theme = spec.resolve(self.config.icon_size)?;
        self.theme_spec = spec;
        self.zoom = ZoomEase::new(self.theme.active_time);
        self.reset_animations();
        self.dirty = true;
        Ok(())
    }

    pub fn set_autohide(&mut self, enabled: bool, now: Duration) {
        let now = self.now(now);
        self.config.autohide = enabled;
        self.autohide.set_enabled(enabled, now);
        self.dirty = true;
    }

    pub fn set_monitor(&mut self, monitor: MonitorInfo) {
        self.monitor = monitor;
        self.dirty = true;
    }

    /// Open a gap where an item dragged to `point` would land. Returns the
    /// insertion index; `None` closes the gap.
    pub fn drag_over(&mut self, point: Option<Vec2>) -> Option<usize> {
        let index = point.map(|p| self.frame.insertion_index(p));
        if index != self.drop_gap {
            self.drop_gap = index;
            self.dirty = true;
        }
        index
    }

    fn reset_animations(&mut self) {
        for item in &self.items {
            let mut anim = ItemAnimation::new(&self.theme);
            anim.set_urgent(item.is_urgent(), self.last_now);
            self.animations.insert(item.id, anim);
        }
    }

    fn apply_applet_sizes(&mut self) {
        for item in self.items.iter_mut().filter(|item| item.is_applet()) {
            if let Some(size) = self.applets.main_size(item.id) {
                item.main_size = Some(size);
            }
        }
    }

    /// Recompute rest positions and slide items whose position moved.
    fn update_rest(&mut self, now: Duration) {
        let params = zoom_params(&self.config, &self.theme, 1.0);
        let sizes: Vec<f32> = self
            .items
            .iter()
            .map(|item| item.main_size_or(self.theme.icon_size))
            .collect();
        let half = rest_extent(&sizes, &params) * 0.5;

        let mut rest = HashMap::with_capacity(self.items.len());
        for (id, center) in rest_positions(&self.items, &self.config, &self.theme) {
            let center = center - half;
            if let Some(old) = self.rest.get(&id)
                && let Some(anim) = self.animations.get_mut(&id)
            {
                anim.shift_rest(center - old, now);
            }
            rest.insert(id, center);
        }
        self.rest = rest;
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Feed one pointer event. Click-type actions are returned at once;
    /// hover and preview changes come out of the next [`tick`](Self::tick).
    pub fn handle_pointer(&mut self, event: PointerEvent, now: Duration) -> Vec<DockAction> {
        let now = self.now(now);
        self.dirty = true;
        match event {
            PointerEvent::Enter { position } | PointerEvent::Motion { position } => {
                self.pointer_moved(position, now);
                Vec::new()
            }
            PointerEvent::Leave => {
                self.pointer_gone(now);
                Vec::new()
            }
            PointerEvent::Press { button, position, .. } => {
                self.pointer_moved(position, now);
                self.press = Some(Press {
                    button,
                    position,
                    target: self.frame.hit_test(position),
                });
                Vec::new()
            }
            PointerEvent::Release {
                button,
                position,
                modifiers,
            } => {
                self.pointer_moved(position, now);
                self.release(button, position, modifiers, now)
            }
            PointerEvent::Scroll { direction, position } => {
                self.pointer_moved(position, now);
                self.scroll(direction, position)
            }
        }
    }

    /// Whether `position` is inside the input region as of `now`. While a
    /// hide or show run is in flight the last tick's region is already
    /// stale, so it is recomputed at the current offset.
    fn region_contains(&self, position: Vec2, now: Duration) -> bool {
        let state = self.autohide.state();
        if state.is_transitioning() {
            input_region(&self.smoothed(self.layout(now), now), state).contains(position)
        } else {
            self.region.contains(position)
        }
    }

    fn pointer_moved(&mut self, position: Vec2, now: Duration) {
        if !self.region_contains(position, now) {
            self.pointer_gone(now);
            return;
        }
        if self.pointer.is_none() {
            tracing::trace!("Pointer entered dock at {:?}", position);
            self.autohide.pointer_entered(now);
            if self.config.zoom_enabled {
                self.zoom.set_active(true, now);
            }
        }
        self.pointer = Some(position);
        if self.autohide.state() != AutohideState::Hidden {
            self.zoom_cursor = Some(main_axis(self.config.position, position));
        }
    }

    fn pointer_gone(&mut self, now: Duration) {
        if self.pointer.take().is_none() {
            return;
        }
        tracing::trace!("Pointer left dock");
        self.press = None;
        self.autohide.pointer_left(now);
        self.zoom.set_active(false, now);
    }

    fn release(
        &mut self,
        button: PointerButton,
        position: Vec2,
        modifiers: Modifiers,
        now: Duration,
    ) -> Vec<DockAction> {
        let Some(press) = self.press.take() else {
            return Vec::new();
        };
        if press.button != button {
            return Vec::new();
        }
        let moved = (main_axis(self.config.position, position) - main_axis(self.config.position, press.position)).abs();
        if moved > CLICK_SLOP {
            tracing::trace!("Ignoring release after {:.1}px drag", moved);
            return Vec::new();
        }
        let HitTarget::Item { id, .. } = press.target else {
            return Vec::new();
        };
        let Some(item) = self.items.iter().find(|item| item.id == id).cloned() else {
            return Vec::new();
        };
        let anchor = self.frame.item(id).map(|layout| layout.rect).unwrap_or_default();

        match button {
            PointerButton::Right => {
                let entries = if item.is_applet() {
                    self.applets.menu_items(id).unwrap_or_default()
                } else {
                    Vec::new()
                };
                vec![DockAction::ShowMenu {
                    item: id,
                    anchor,
                    entries,
                }]
            }
            PointerButton::Left | PointerButton::Middle => {
                if let Some(anim) = self.animations.get_mut(&id) {
                    anim.click(now);
                }
                if item.is_applet() {
                    let response = self.applets.click(id, button);
                    self.applet_responded(id, response, now);
                    return Vec::new();
                }
                let force = button == PointerButton::Middle || modifiers.contains(Modifiers::CTRL);
                if force || !item.is_running() {
                    if let Some(anim) = self.animations.get_mut(&id) {
                        anim.launch(now);
                    }
                    vec![DockAction::Launch(id)]
                } else {
                    vec![DockAction::ToggleFocus(id)]
                }
            }
            PointerButton::Other(_) => Vec::new(),
        }
    }

    fn scroll(&mut self, direction: ScrollDirection, position: Vec2) -> Vec<DockAction> {
        let Some(id) = self.frame.hit_test(position).item() else {
            return Vec::new();
        };
        let is_applet = self.items.iter().any(|item| item.id == id && item.is_applet());
        if is_applet {
            let response = self.applets.scroll(id, direction);
            self.applet_responded(id, response, self.last_now);
            Vec::new()
        } else {
            vec![DockAction::Scroll { item: id, direction }]
        }
    }

    fn applet_responded(&mut self, id: ItemId, response: AppletResult<AppletResponse>, now: Duration) {
        match response {
            Ok(AppletResponse::Relayout) => {
                self.apply_applet_sizes();
                self.update_rest(now);
                self.worker.sender().send(WorkerMessage::RefreshIcon(id));
            }
            Ok(_) => {}
            Err(AppletError::Unknown(_)) => {
                tracing::debug!("No applet registered for {}", id);
            }
            Err(err) => tracing::warn!("Applet dispatch failed: {}", err),
        }
    }

    // ------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------

    fn drain_worker(&mut self) -> bool {
        let mut changed = false;
        for message in self.worker.drain() {
            changed = true;
            match message {
                WorkerMessage::IconReady { item, icon } => self.set_icon(item, icon),
                WorkerMessage::RefreshIcon(item) => {
                    match self.applets.icon(item, self.config.icon_size) {
                        Ok(Some(icon)) => self.set_icon(item, Arc::new(icon)),
                        Ok(None) => {}
                        Err(err) => tracing::debug!("Icon refresh skipped: {}", err),
                    }
                }
                WorkerMessage::Redraw => {}
            }
        }
        changed
    }

    fn set_icon(&mut self, id: ItemId, icon: Arc<IconImage>) {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => item.icon = Some(icon),
            None => tracing::trace!("Dropping icon for missing {}", id),
        }
    }

    fn visuals(&self, now: Duration) -> Vec<ItemVisuals> {
        self.items
            .iter()
            .map(|item| {
                self.animations
                    .get(&item.id)
                    .map(|anim| anim.visuals(now, &self.theme))
                    .unwrap_or_default()
            })
            .collect()
    }

    fn layout(&self, now: Duration) -> LayoutFrame {
        let window = self.window_rect();
        let visuals = self.visuals(now);
        let zoom_progress = if self.config.zoom_enabled {
            self.zoom.value(now)
        } else {
            0.0
        };
        compute_frame(&LayoutInputs {
            config: &self.config,
            theme: &self.theme,
            window: Vec2::new(window.width as f32, window.height as f32),
            items: &self.items,
            visuals: &visuals,
            cursor: self.zoom_cursor,
            zoom_progress,
            hide_offset: self.autohide.hide_offset(now),
            drop_gap: self.drop_gap,
        })
    }

    /// `frame` with the eased shelf width applied.
    fn smoothed(&self, frame: LayoutFrame, now: Duration) -> LayoutFrame {
        match self.shelf.value(now) {
            Some(extent) => frame.with_shelf_extent(extent),
            None => frame,
        }
    }

    /// Advance everything to `now` and compute this instant's frame.
    pub fn tick(&mut self, now: Duration) -> FrameOutput {
        docklight_core::profiling::new_frame();
        profile_function!();
        let now = self.now(now);
        let mut redraw = self.drain_worker() || self.dirty;
        self.dirty = false;

        self.autohide.update(now);
        let state_changes: Vec<StateChange> = self.autohide.drain_changes().collect();
        let state = self.autohide.state();
        if state == AutohideState::Hidden && self.pointer.is_none() {
            self.zoom_cursor = None;
        }

        let frame = {
            profile_scope!("layout");
            self.layout(now)
        };
        let snap = frame.hide_offset > 0.0 || self.drop_gap.is_some();
        self.shelf.track(frame.shelf_extent(), snap, now);
        let frame = self.smoothed(frame, now);
        redraw |= frame != self.frame;
        self.frame = frame;

        let mut actions = Vec::new();
        self.update_hover(now, &mut actions);

        let region = input_region(&self.frame, state);
        let input_region = (region != self.region).then(|| {
            tracing::trace!("Input region changed: {:?}", region.extents());
            self.region = region.clone();
            region
        });
        let reserved = reserved_space(&self.config, &self.theme);
        let reserved_space = (reserved != self.reserved).then(|| {
            tracing::debug!("Reserved space changed: {} px", reserved.thickness);
            self.reserved = reserved;
            reserved
        });

        let animating = self.is_animating(now);
        let timer = match (self.autohide.next_deadline(), self.preview_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.next = self.pump.schedule(now, animating, timer);
        tracing::trace!("Tick at {:?}: {:?}", now, self.next);

        FrameOutput {
            actions,
            state_changes,
            input_region,
            reserved_space,
            redraw,
            next: self.next,
        }
    }

    fn update_hover(&mut self, now: Duration, actions: &mut Vec<DockAction>) {
        let target = match self.pointer {
            Some(p) if self.autohide.state() != AutohideState::Hidden => self.frame.hit_test(p).item(),
            _ => None,
        };

        if self.hover.map(|h| h.item) != target {
            if let Some(old) = self.hover.take() {
                if let Some(anim) = self.animations.get_mut(&old.item) {
                    anim.set_hovered(false, now);
                }
                if old.preview_shown {
                    actions.push(DockAction::HidePreview);
                }
            }
            if let Some(id) = target {
                if let Some(anim) = self.animations.get_mut(&id) {
                    anim.set_hovered(true, now);
                }
                self.hover = Some(Hover {
                    item: id,
                    since: now,
                    preview_shown: false,
                });
            }
            actions.push(DockAction::HoverChanged {
                item: target,
                anchor: target.and_then(|id| self.frame.item(id)).map(|layout| layout.rect),
            });
        }

        if let Some(deadline) = self.preview_deadline()
            && deadline <= now
            && let Some(hover) = self.hover.as_mut()
            && let Some(layout) = self.frame.item(hover.item)
        {
            hover.preview_shown = true;
            actions.push(DockAction::ShowPreview {
                item: hover.item,
                anchor: layout.rect,
            });
        }
    }

    /// When the hovered item's preview is due, if one will be.
    fn preview_deadline(&self) -> Option<Duration> {
        if !self.config.previews_enabled || self.press.is_some() {
            return None;
        }
        let hover = self.hover.filter(|h| !h.preview_shown)?;
        let running = self
            .items
            .iter()
            .any(|item| item.id == hover.item && item.is_running());
        running.then_some(hover.since + PREVIEW_DELAY)
    }

    fn is_animating(&self, now: Duration) -> bool {
        let glow_visible = self.autohide.state() == AutohideState::Hidden;
        !self.autohide.is_settled(now)
            || !self.zoom.is_settled(now)
            || !self.shelf.is_settled(now)
            || self
                .animations
                .values()
                .any(|anim| !anim.is_settled(now, &self.theme, glow_visible))
    }
}
