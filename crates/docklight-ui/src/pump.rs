//! Frame scheduling.
//!
//! The pump does not know what is animating. Each tick the dock reports
//! whether anything is unsettled and when the next timer is due; the pump
//! answers with what the event loop should do next.

use std::time::Duration;

/// Default frame cadence, about 60 Hz.
pub const DEFAULT_CADENCE: Duration = Duration::from_millis(16);

/// What the event loop should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpCommand {
    /// Something is animating: tick again at `at`.
    Tick { at: Duration },
    /// Nothing is animating, but a timer fires at `until`.
    Sleep { until: Duration },
    /// Wait for the next input event.
    Idle,
}

impl PumpCommand {
    /// When to wake up, if at all.
    pub fn deadline(&self) -> Option<Duration> {
        match *self {
            PumpCommand::Tick { at } => Some(at),
            PumpCommand::Sleep { until } => Some(until),
            PumpCommand::Idle => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationPump {
    cadence: Duration,
    running: bool,
    frames: u64,
}

impl Default for AnimationPump {
    fn default() -> Self {
        Self::new(DEFAULT_CADENCE)
    }
}

impl AnimationPump {
    pub fn new(cadence: Duration) -> Self {
        Self {
            cadence: cadence.max(Duration::from_millis(1)),
            running: false,
            frames: 0,
        }
    }

    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames scheduled since the pump last started.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Decide the next wake-up.
    pub fn schedule(&mut self, now: Duration, animating: bool, timer: Option<Duration>) -> PumpCommand {
        if animating {
            if !self.running {
                tracing::debug!("Animation pump started");
                self.running = true;
                self.frames = 0;
            }
            self.frames += 1;
            let next = now + self.cadence;
            return PumpCommand::Tick {
                at: timer.map_or(next, |t| next.min(t.max(now))),
            };
        }

        if self.running {
            tracing::debug!("Animation pump stopped after {} frames", self.frames);
            self.running = false;
        }
        match timer {
            Some(until) => PumpCommand::Sleep {
                until: until.max(now),
            },
            None => PumpCommand::Idle,
        }
    }
}
