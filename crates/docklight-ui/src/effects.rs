//! Per-item and per-dock transient effects.
//!
//! Each effect remembers only when it was triggered; its value at any instant
//! is computed from the elapsed time. [`ItemAnimation::visuals`] samples all
//! of an item's effects into an [`ItemVisuals`] for one frame.

use std::f32::consts::PI;
use std::time::Duration;

use crate::animation::{
    EasingFunction, ExpApproach, Transient, Tween, damped_bounce, elapsed_secs, half_sine,
};
use crate::theme::Theme;

/// Fraction of a slide offset left after one 16 ms frame.
const SLIDE_RETAIN_PER_FRAME: f32 = 0.75;
const SLIDE_FRAME_SECS: f32 = 0.016;
/// Slides smaller than this are dropped.
pub const SLIDE_EPSILON: f32 = 0.5;
/// Rest-position changes below this do not start a slide.
pub const SLIDE_THRESHOLD: f32 = 2.0;

/// Fraction of the shelf's distance to its target width closed per frame.
const SHELF_CLOSE_PER_FRAME: f32 = 0.3;
/// Shelf widths this close to the target count as settled.
const SHELF_EPSILON: f32 = 0.25;

const HOVER_EPSILON: f32 = 0.001;
const LAUNCH_BOUNCES: u32 = 2;
const URGENT_BOUNCES: u32 = 1;

/// Effect values of one item for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemVisuals {
    /// Amount to lighten the icon, `0..=1`.
    pub lighten: f32,
    /// Amount to darken the icon, `0..=1`.
    pub darken: f32,
    /// Lift away from the screen edge, in pixels.
    pub bounce: f32,
    /// Main-axis offset from the rest position, in pixels.
    pub slide: f32,
    /// Opacity of the urgent glow, zero when not glowing.
    pub urgent_glow: f32,
}

fn slide_rate() -> f32 {
    -SLIDE_RETAIN_PER_FRAME.ln() / SLIDE_FRAME_SECS
}

fn shelf_rate() -> f32 {
    -(1.0 - SHELF_CLOSE_PER_FRAME).ln() / SLIDE_FRAME_SECS
}

/// Trigger times and running fades for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemAnimation {
    hover: ExpApproach,
    slide: ExpApproach,
    clicked_at: Option<Duration>,
    launched_at: Option<Duration>,
    urgent_at: Option<Duration>,
}

impl ItemAnimation {
    pub fn new(theme: &Theme) -> Self {
        let active_secs = theme.active_time.as_secs_f32().max(f32::EPSILON);
        Self {
            hover: ExpApproach::new(0.0, 3.0 / active_secs, HOVER_EPSILON),
            slide: ExpApproach::new(0.0, slide_rate(), SLIDE_EPSILON),
            clicked_at: None,
            launched_at: None,
            urgent_at: None,
        }
    }

    pub fn set_hovered(&mut self, hovered: bool, now: Duration) {
        self.hover.set_target(if hovered { 1.0 } else { 0.0 }, now);
    }

    pub fn click(&mut self, now: Duration) {
        self.clicked_at = Some(now);
    }

    pub fn launch(&mut self, now: Duration) {
        self.launched_at = Some(now);
    }

    /// Start the urgent bounce and glow. Ignored if already urgent.
    pub fn set_urgent(&mut self, urgent: bool, now: Duration) {
        match (urgent, self.urgent_at) {
            (true, None) => self.urgent_at = Some(now),
            (false, Some(_)) => self.urgent_at = None,
            _ => {}
        }
    }

    /// The rest position moved by `delta`; slide in from the old position.
    pub fn shift_rest(&mut self, delta: f32, now: Duration) {
        if delta.abs() > SLIDE_THRESHOLD {
            self.slide.kick(-delta, now);
        }
    }

    pub fn is_urgent(&self) -> bool {
        self.urgent_at.is_some()
    }

    fn bounce(&self, now: Duration, theme: &Theme) -> f32 {
        let progress = |at: Option<Duration>, time: Duration| {
            at.filter(|_| !time.is_zero())
                .map(|at| elapsed_secs(at, now) / time.as_secs_f32())
        };
        let launch = progress(self.launched_at, theme.launch_bounce_time)
            .map(|p| damped_bounce(p, LAUNCH_BOUNCES) * theme.launch_bounce_height)
            .unwrap_or(0.0);
        let urgent = progress(self.urgent_at, theme.urgent_bounce_time)
            .map(|p| damped_bounce(p, URGENT_BOUNCES) * theme.urgent_bounce_height)
            .unwrap_or(0.0);
        launch.max(urgent)
    }

    fn darken(&self, now: Duration, theme: &Theme) -> f32 {
        match self.clicked_at {
            Some(at) if !theme.click_time.is_zero() => {
                half_sine(elapsed_secs(at, now) / theme.click_time.as_secs_f32()) * 0.5
            }
            _ => 0.0,
        }
    }

    fn urgent_glow(&self, now: Duration, theme: &Theme) -> f32 {
        let Some(at) = self.urgent_at else {
            return 0.0;
        };
        let t = elapsed_secs(at, now);
        if t >= theme.urgent_glow_time.as_secs_f32() {
            return 0.0;
        }
        let pulse = theme.urgent_glow_pulse.as_secs_f32().max(f32::EPSILON);
        0.2 + 0.75 * ((2.0 * PI * t / pulse).sin() + 1.0) * 0.5
    }

    /// Sample every effect at `now`.
    pub fn visuals(&self, now: Duration, theme: &Theme) -> ItemVisuals {
        ItemVisuals {
            lighten: self.hover.value(now) * theme.hover_lighten,
            darken: self.darken(now, theme),
            bounce: self.bounce(now, theme),
            slide: self.slide.value(now),
            urgent_glow: self.urgent_glow(now, theme),
        }
    }

    /// Whether every effect is at rest. The urgent glow only counts while
    /// `glow_visible`, since it is not drawn otherwise.
    pub fn is_settled(&self, now: Duration, theme: &Theme, glow_visible: bool) -> bool {
        let done = |at: Option<Duration>, time: Duration| at.is_none_or(|at| now >= at + time);
        self.hover.is_settled(now)
            && self.slide.is_settled(now)
            && done(self.clicked_at, theme.click_time)
            && done(self.launched_at, theme.launch_bounce_time)
            && done(self.urgent_at, theme.urgent_bounce_time)
            && (!glow_visible || done(self.urgent_at, theme.urgent_glow_time))
    }
}

// ---------------------------------------------------------------------------
// Shelf width
// ---------------------------------------------------------------------------

/// Main-axis length of the shelf, eased toward the width the icons need.
///
/// The first width seen is taken as is. While the dock is hiding or
/// showing, or a drop gap is open, the shelf snaps so it keeps tracking
/// the icons exactly.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShelfWidth {
    approach: Option<ExpApproach>,
}

impl ShelfWidth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, target: f32, snap: bool, now: Duration) {
        match self.approach.as_mut() {
            Some(approach) if !snap => approach.set_target(target, now),
            _ => self.approach = Some(ExpApproach::new(target, shelf_rate(), SHELF_EPSILON)),
        }
    }

    /// The width to draw at `now`, once anything has been tracked.
    pub fn value(&self, now: Duration) -> Option<f32> {
        self.approach.map(|approach| approach.value(now))
    }

    /// Forget the current width; the next tracked width is taken as is.
    pub fn reset(&mut self) {
        self.approach = None;
    }
}

impl Transient for ShelfWidth {
    fn is_settled(&self, now: Duration) -> bool {
        self.approach.is_none_or(|approach| approach.is_settled(now))
    }
}

// ---------------------------------------------------------------------------
// Zoom ease
// ---------------------------------------------------------------------------

/// Fades the zoom in when the pointer arrives and out when it leaves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomEase {
    tween: Tween,
    duration: Duration,
}

impl ZoomEase {
    pub fn new(duration: Duration) -> Self {
        Self {
            tween: Tween::settled(0.0).easing(EasingFunction::QuadOut),
            duration,
        }
    }

    pub fn set_active(&mut self, active: bool, now: Duration) {
        self.tween
            .retarget(if active { 1.0 } else { 0.0 }, now, self.duration);
    }

    /// `0` at rest, `1` fully zoomed.
    pub fn value(&self, now: Duration) -> f32 {
        self.tween.value(now)
    }

    /// Zoom progress once the dock is `hide_offset` of the way hidden.
    pub fn effective(&self, now: Duration, hide_offset: f32) -> f32 {
        self.value(now) * (1.0 - hide_offset.clamp(0.0, 1.0))
    }
}

impl Transient for ZoomEase {
    fn is_settled(&self, now: Duration) -> bool {
        self.tween.is_settled(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeSpec;

    fn theme() -> Theme {
        ThemeSpec::default().resolve(48).unwrap()
    }

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn fresh_item_is_settled() {
        let theme = theme();
        let anim = ItemAnimation::new(&theme);
        assert!(anim.is_settled(ms(0), &theme, true));
        assert_eq!(anim.visuals(ms(0), &theme), ItemVisuals::default());
    }

    #[test]
    fn click_pulse_darkens_then_recovers() {
        let theme = theme();
        let mut anim = ItemAnimation::new(&theme);
        anim.click(ms(1_000));
        assert!((anim.visuals(ms(1_150), &theme).darken - 0.5).abs() < 1e-3);
        assert!(!anim.is_settled(ms(1_150), &theme, false));
        assert_eq!(anim.visuals(ms(1_300), &theme).darken, 0.0);
        assert!(anim.is_settled(ms(1_300), &theme, false));
    }

    #[test]
    fn launch_bounce_rises_and_lands() {
        let theme = theme();
        let mut anim = ItemAnimation::new(&theme);
        anim.launch(ms(0));
        // First arc peaks at a quarter of the duration.
        let peak = anim.visuals(ms(150), &theme).bounce;
        assert!((peak - theme.launch_bounce_height).abs() < 1e-2);
        assert_eq!(anim.visuals(ms(600), &theme).bounce, 0.0);
    }

    #[test]
    fn hover_fades_toward_target() {
        let theme = theme();
        let mut anim = ItemAnimation::new(&theme);
        anim.set_hovered(true, ms(0));
        let mid = anim.visuals(ms(50), &theme).lighten;
        assert!(mid > 0.0 && mid < theme.hover_lighten);
        assert_eq!(anim.visuals(ms(5_000), &theme).lighten, theme.hover_lighten);
        assert!(anim.is_settled(ms(5_000), &theme, false));
    }

    #[test]
    fn slide_decays_from_old_position() {
        let theme = theme();
        let mut anim = ItemAnimation::new(&theme);
        anim.shift_rest(60.0, ms(0));
        assert_eq!(anim.visuals(ms(0), &theme).slide, -60.0);
        let after_frame = anim.visuals(ms(16), &theme).slide;
        assert!((after_frame + 45.0).abs() < 1e-2);
        assert_eq!(anim.visuals(ms(1_000), &theme).slide, 0.0);

        let mut small = ItemAnimation::new(&theme);
        small.shift_rest(1.0, ms(0));
        assert_eq!(small.visuals(ms(0), &theme).slide, 0.0);
    }

    #[test]
    fn urgent_glow_only_keeps_pump_alive_when_visible() {
        let theme = theme();
        let mut anim = ItemAnimation::new(&theme);
        anim.set_urgent(true, ms(0));
        let t = ms(2_000);
        assert!(anim.visuals(t, &theme).urgent_glow > 0.0);
        assert!(anim.is_settled(t, &theme, false));
        assert!(!anim.is_settled(t, &theme, true));
        assert_eq!(anim.visuals(ms(10_000), &theme).urgent_glow, 0.0);

        anim.set_urgent(false, t);
        assert_eq!(anim.visuals(t, &theme).urgent_glow, 0.0);
    }

    #[test]
    fn shelf_width_eases_toward_a_new_target() {
        let mut shelf = ShelfWidth::new();
        assert_eq!(shelf.value(ms(0)), None);
        shelf.track(200.0, false, ms(0));
        assert_eq!(shelf.value(ms(0)), Some(200.0));
        assert!(shelf.is_settled(ms(0)));

        shelf.track(300.0, false, ms(100));
        assert_eq!(shelf.value(ms(100)), Some(200.0));
        // 30% of the way after one 16 ms frame.
        let one_frame = shelf.value(ms(116)).unwrap();
        assert!((one_frame - 230.0).abs() < 0.5);
        assert!(!shelf.is_settled(ms(116)));

        assert_eq!(shelf.value(ms(1_100)), Some(300.0));
        assert!(shelf.is_settled(ms(1_100)));
    }

    #[test]
    fn shelf_width_snaps_when_asked() {
        let mut shelf = ShelfWidth::new();
        shelf.track(200.0, false, ms(0));
        shelf.track(350.0, true, ms(10));
        assert_eq!(shelf.value(ms(10)), Some(350.0));
        assert!(shelf.is_settled(ms(10)));
    }

    #[test]
    fn zoom_ease_fades_and_is_suppressed_by_hide() {
        let mut ease = ZoomEase::new(ms(150));
        ease.set_active(true, ms(0));
        assert!(ease.value(ms(75)) > 0.5);
        assert_eq!(ease.value(ms(150)), 1.0);
        assert_eq!(ease.effective(ms(150), 0.5), 0.5);
        ease.set_active(false, ms(200));
        assert_eq!(ease.value(ms(200)), 1.0);
        assert_eq!(ease.value(ms(350)), 0.0);
        assert!(ease.is_settled(ms(350)));
    }
}
