//! Autohide state machine.
//!
//! ```text
//!            leave (+hide delay)               progress = 1
//!  Visible ─────────────────────▶ Hiding ─────────────────────▶ Hidden
//!     ▲                            │  ▲                            │
//!     │ progress = 1        enter  │  │ leave (+hide delay)        │ enter (+unhide delay)
//!     │                            ▼  │                            │
//!     └───────────────────────── Showing ◀─────────────────────────┘
//! ```
//!
//! A run's progress grows linearly with time; the visible offset is eased
//! from wherever the previous run left it, so reversing mid-run never jumps.

use std::fmt;
use std::time::Duration;

use docklight_core::config::DockConfig;

use crate::animation::{EasingFunction, Transient, elapsed_secs};

/// Runs within this much of the end count as complete.
const PROGRESS_EPSILON: f32 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AutohideState {
    #[default]
    Visible,
    Hiding,
    Hidden,
    Showing,
}

impl AutohideState {
    /// Whether a hide or show run is in flight.
    pub fn is_transitioning(self) -> bool {
        matches!(self, AutohideState::Hiding | AutohideState::Showing)
    }
}

impl fmt::Display for AutohideState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AutohideState::Visible => "visible",
            AutohideState::Hiding => "hiding",
            AutohideState::Hidden => "hidden",
            AutohideState::Showing => "showing",
        };
        f.write_str(name)
    }
}

/// A state change, reported once per transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub from: AutohideState,
    pub to: AutohideState,
    pub at: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Hide,
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Run {
    start: Duration,
    /// How long the run takes to reach progress 1.
    duration: Duration,
    /// Progress the run started at.
    from_progress: f32,
    /// Offset the run started at.
    from_offset: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    direction: Direction,
    at: Duration,
}

/// Visibility of the dock under autohide.
#[derive(Debug, Clone, PartialEq)]
pub struct AutohideFsm {
    enabled: bool,
    hide_delay: Duration,
    unhide_delay: Duration,
    hide_time: Duration,

    state: AutohideState,
    run: Run,
    pending: Option<Pending>,
    pointer_inside: bool,
    last_transition: Duration,
    changes: Vec<StateChange>,
}

impl AutohideFsm {
    /// Starts `Visible` with the pointer outside.
    ///
    /// With autohide enabled the first [`update`](Self::update) schedules a
    /// hide even if the pointer never entered, so a dock that starts under
    /// autohide gets out of the way without waiting for a leave event.
    pub fn new(config: &DockConfig) -> Self {
        Self {
            enabled: config.autohide,
            hide_delay: config.hide_delay(),
            unhide_delay: config.unhide_delay(),
            hide_time: config.hide_time(),
            state: AutohideState::Visible,
            run: Run {
                start: Duration::ZERO,
                duration: Duration::ZERO,
                from_progress: 0.0,
                from_offset: 0.0,
            },
            pending: None,
            pointer_inside: false,
            last_transition: Duration::ZERO,
            changes: Vec::new(),
        }
    }

    pub fn state(&self) -> AutohideState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    /// Time of the last state change.
    pub fn last_transition(&self) -> Duration {
        self.last_transition
    }

    /// Pick up new delays and duration. An in-flight run keeps its start.
    pub fn apply_config(&mut self, config: &DockConfig, now: Duration) {
        self.hide_delay = config.hide_delay();
        self.unhide_delay = config.unhide_delay();
        self.hide_time = config.hide_time();
        self.set_enabled(config.autohide, now);
    }

    /// Turn autohide on or off. Turning it off shows the dock at once.
    pub fn set_enabled(&mut self, enabled: bool, now: Duration) {
        if self.enabled == enabled {
            return;
        }
        self.resolve(now);
        self.enabled = enabled;
        self.pending = None;
        if enabled {
            tracing::debug!("Autohide enabled");
            self.schedule(now);
        } else {
            tracing::debug!("Autohide disabled");
            self.transition(AutohideState::Visible, now);
        }
        self.resolve(now);
    }

    pub fn pointer_entered(&mut self, now: Duration) {
        if self.pointer_inside {
            return;
        }
        // Finish a run that completed since the last update first, so the
        // delay is picked for the state the dock is really in.
        self.resolve(now);
        self.pointer_inside = true;
        self.schedule(now);
        self.resolve(now);
    }

    pub fn pointer_left(&mut self, now: Duration) {
        if !self.pointer_inside {
            return;
        }
        self.resolve(now);
        self.pointer_inside = false;
        self.schedule(now);
        self.resolve(now);
    }

    /// Fire due timers and finish completed runs.
    pub fn update(&mut self, now: Duration) {
        self.resolve(now);
        if self.enabled && self.pending.is_none() && self.wants_change() {
            self.schedule(now);
        }
        self.resolve(now);
    }

    /// State changes since the last call, oldest first.
    pub fn drain_changes(&mut self) -> std::vec::Drain<'_, StateChange> {
        self.changes.drain(..)
    }

    /// Next time a delayed transition fires.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.map(|p| p.at)
    }

    /// Linear progress of the current run. Completed states report `1`.
    pub fn progress(&self, now: Duration) -> f32 {
        match self.state {
            AutohideState::Visible | AutohideState::Hidden => 1.0,
            AutohideState::Hiding | AutohideState::Showing => self.run_progress(now),
        }
    }

    /// How far the dock is hidden: `0` fully shown, `1` fully hidden.
    pub fn hide_offset(&self, now: Duration) -> f32 {
        match self.state {
            AutohideState::Visible => 0.0,
            AutohideState::Hidden => 1.0,
            AutohideState::Hiding => {
                let t = EasingFunction::CubicIn.apply(self.run_fraction(now));
                self.run.from_offset + (1.0 - self.run.from_offset) * t
            }
            AutohideState::Showing => {
                let t = EasingFunction::CubicOut.apply(self.run_fraction(now));
                self.run.from_offset * (1.0 - t)
            }
        }
    }

    fn run_progress(&self, now: Duration) -> f32 {
        let from = self.run.from_progress;
        (from + (1.0 - from) * self.run_fraction(now)).clamp(0.0, 1.0)
    }

    /// Fraction of this run's own duration elapsed, for easing.
    fn run_fraction(&self, now: Duration) -> f32 {
        if self.run.duration.is_zero() {
            return 1.0;
        }
        (elapsed_secs(self.run.start, now) / self.run.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    fn desired(&self) -> Direction {
        if !self.enabled || self.pointer_inside {
            Direction::Show
        } else {
            Direction::Hide
        }
    }

    /// Whether the current state is heading the wrong way.
    fn wants_change(&self) -> bool {
        match self.desired() {
            Direction::Hide => matches!(self.state, AutohideState::Visible | AutohideState::Showing),
            Direction::Show => matches!(self.state, AutohideState::Hidden | AutohideState::Hiding),
        }
    }

    fn schedule(&mut self, now: Duration) {
        if !self.wants_change() {
            self.pending = None;
            return;
        }
        let direction = self.desired();
        let delay = match (direction, self.state) {
            (Direction::Hide, _) => self.hide_delay,
            (Direction::Show, AutohideState::Hidden) => self.unhide_delay,
            // Re-entering mid-hide reverses immediately.
            (Direction::Show, _) => Duration::ZERO,
        };
        if self.pending.is_some_and(|p| p.direction == direction) {
            return;
        }
        self.pending = Some(Pending {
            direction,
            at: now + delay,
        });
    }

    fn resolve(&mut self, now: Duration) {
        if let Some(pending) = self.pending
            && pending.at <= now
        {
            self.pending = None;
            match pending.direction {
                Direction::Hide => self.begin_run(AutohideState::Hiding, pending.at),
                Direction::Show => self.begin_run(AutohideState::Showing, pending.at),
            }
        }

        if self.state.is_transitioning() && self.run_progress(now) >= 1.0 - PROGRESS_EPSILON {
            let end = self.run_end();
            let done = match self.state {
                AutohideState::Hiding => AutohideState::Hidden,
                _ => AutohideState::Visible,
            };
            self.transition(done, end.min(now).max(self.run.start));
        }
    }

    /// When the current run reaches progress 1.
    fn run_end(&self) -> Duration {
        self.run.start + self.run.duration
    }

    /// Start a run toward `state`. Progress carries over from a reversed
    /// run; the duration follows the offset still to travel, so a late
    /// reversal moves the dock at the usual speed.
    fn begin_run(&mut self, state: AutohideState, at: Duration) {
        let from_offset = self.hide_offset(at);
        let from_progress = if self.state.is_transitioning() {
            self.run_progress(at)
        } else {
            0.0
        };
        let distance = match state {
            AutohideState::Showing => from_offset,
            _ => 1.0 - from_offset,
        };
        self.run = Run {
            start: at,
            duration: self.hide_time.mul_f32(distance.clamp(0.0, 1.0)),
            from_progress,
            from_offset,
        };
        self.transition(state, at);
    }

    fn transition(&mut self, to: AutohideState, at: Duration) {
        if self.state == to {
            return;
        }
        tracing::debug!("Autohide {} -> {}", self.state, to);
        self.changes.push(StateChange {
            from: self.state,
            to,
            at,
        });
        self.state = to;
        self.last_transition = at;
    }
}

impl Transient for AutohideFsm {
    fn is_settled(&self, _now: Duration) -> bool {
        !self.state.is_transitioning()
    }
}
