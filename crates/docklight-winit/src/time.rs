use std::time::{Duration, Instant};

use docklight_ui::PumpCommand;
use winit::event_loop::ControlFlow;

/// Monotonic clock the dock is ticked with.
///
/// The engine measures time as a [`Duration`] since the dock started; this
/// converts between that and wall-clock [`Instant`]s for the event loop.
///
/// # Example
///
/// ```
/// use docklight_winit::DockClock;
///
/// let clock = DockClock::new();
/// let a = clock.now();
/// let b = clock.now();
/// assert!(b >= a);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DockClock {
    start: Instant,
}

impl DockClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self { start }
    }

    /// Time since the clock started.
    #[inline]
    pub fn now(&self) -> Duration {
        self.since(Instant::now())
    }

    /// Engine time of `instant`. Instants before the start read as zero.
    #[inline]
    pub fn since(&self, instant: Instant) -> Duration {
        instant.saturating_duration_since(self.start)
    }

    /// Wall-clock instant of engine time `at`.
    pub fn instant_at(&self, at: Duration) -> Instant {
        self.start + at
    }

    /// How the event loop should wait for `command`.
    pub fn control_flow(&self, command: PumpCommand) -> ControlFlow {
        match command.deadline() {
            Some(at) => ControlFlow::WaitUntil(self.instant_at(at)),
            None => ControlFlow::Wait,
        }
    }
}

impl Default for DockClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Frame timing, for hosts that want per-frame statistics.
#[derive(Debug, Clone, Default)]
pub struct FrameTime {
    /// Time since the previous frame
    pub delta: Duration,
    /// Engine time of this frame
    pub elapsed: Duration,
    pub frame_count: u64,
}

impl FrameTime {
    #[inline]
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

/// Produces a [`FrameTime`] per presented frame.
#[derive(Debug, Default)]
pub struct FrameTracker {
    last: Option<Duration>,
    frame_count: u64,
}

impl FrameTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, now: Duration) -> FrameTime {
        let delta = self.last.map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last = Some(now.max(self.last.unwrap_or_default()));
        self.frame_count += 1;
        FrameTime {
            delta,
            elapsed: now,
            frame_count: self.frame_count,
        }
    }
}
