//! Translation of winit window events into dock pointer events.

use std::collections::VecDeque;

use docklight_core::math::Vec2;
use docklight_ui::{Modifiers, PointerButton, PointerEvent, ScrollDirection};
pub use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent as WinitEvent};
use winit::dpi::PhysicalPosition;
use winit::keyboard::ModifiersState;

/// Stateful translator. winit reports buttons and wheel steps without a
/// position and cursor positions in physical pixels; the dock wants logical
/// positions on every event.
#[derive(Debug, Clone)]
pub struct PointerTranslator {
    scale_factor: f64,
    cursor: Option<Vec2>,
    modifiers: Modifiers,
}

impl Default for PointerTranslator {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl PointerTranslator {
    pub fn new(scale_factor: f64) -> Self {
        Self {
            scale_factor,
            cursor: None,
            modifiers: Modifiers::empty(),
        }
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Last known cursor position in logical pixels.
    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Translate one window event. Events that carry no pointer meaning
    /// update internal state and return `None`.
    pub fn translate(&mut self, event: &WinitEvent) -> Option<PointerEvent> {
        match event {
            WinitEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.set_scale_factor(*scale_factor);
                None
            }
            WinitEvent::ModifiersChanged(modifiers) => {
                self.set_modifiers(modifiers.state());
                None
            }
            WinitEvent::CursorEntered { .. } => self.cursor_entered(),
            WinitEvent::CursorMoved { position, .. } => Some(self.cursor_moved(*position)),
            WinitEvent::CursorLeft { .. } => Some(self.cursor_left()),
            WinitEvent::MouseInput { state, button, .. } => self.mouse_input(*state, *button),
            WinitEvent::MouseWheel { delta, .. } => self.mouse_wheel(*delta),
            _ => None,
        }
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    pub fn set_modifiers(&mut self, state: ModifiersState) {
        let mut modifiers = Modifiers::empty();
        modifiers.set(Modifiers::SHIFT, state.shift_key());
        modifiers.set(Modifiers::CTRL, state.control_key());
        modifiers.set(Modifiers::ALT, state.alt_key());
        modifiers.set(Modifiers::SUPER, state.super_key());
        self.modifiers = modifiers;
    }

    /// winit sends the position in a following `CursorMoved`, so the enter
    /// is only reported once a position is known.
    pub fn cursor_entered(&mut self) -> Option<PointerEvent> {
        self.cursor.map(|position| PointerEvent::Enter { position })
    }

    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) -> PointerEvent {
        let logical = Vec2::new(
            (position.x / self.scale_factor) as f32,
            (position.y / self.scale_factor) as f32,
        );
        let entered = self.cursor.is_none();
        self.cursor = Some(logical);
        if entered {
            PointerEvent::Enter { position: logical }
        } else {
            PointerEvent::Motion { position: logical }
        }
    }

    pub fn cursor_left(&mut self) -> PointerEvent {
        self.cursor = None;
        PointerEvent::Leave
    }

    pub fn mouse_input(&mut self, state: ElementState, button: MouseButton) -> Option<PointerEvent> {
        let position = self.cursor?;
        let button = match button {
            MouseButton::Left => PointerButton::Left,
            MouseButton::Middle => PointerButton::Middle,
            MouseButton::Right => PointerButton::Right,
            MouseButton::Back => PointerButton::Other(8),
            MouseButton::Forward => PointerButton::Other(9),
            MouseButton::Other(code) => PointerButton::Other(code),
        };
        let modifiers = self.modifiers;
        Some(match state {
            ElementState::Pressed => PointerEvent::Press {
                button,
                position,
                modifiers,
            },
            ElementState::Released => PointerEvent::Release {
                button,
                position,
                modifiers,
            },
        })
    }

    pub fn mouse_wheel(&mut self, delta: MouseScrollDelta) -> Option<PointerEvent> {
        let position = self.cursor?;
        let dy = match delta {
            MouseScrollDelta::LineDelta(_, y) => y as f64,
            MouseScrollDelta::PixelDelta(p) => p.y,
        };
        let direction = if dy > 0.0 {
            ScrollDirection::Up
        } else if dy < 0.0 {
            ScrollDirection::Down
        } else {
            return None;
        };
        Some(PointerEvent::Scroll { direction, position })
    }
}

/// Pointer events waiting for the next tick.
///
/// Consecutive motion events are coalesced into the latest one; everything
/// else keeps its order.
#[derive(Debug, Default)]
pub struct PointerQueue {
    pending: VecDeque<PointerEvent>,
    stats: QueueStats,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueStats {
    pub events_received: usize,
    pub events_coalesced: usize,
}

impl PointerQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(16),
            stats: QueueStats::default(),
        }
    }

    pub fn push(&mut self, event: PointerEvent) {
        self.stats.events_received += 1;
        if let PointerEvent::Motion { .. } = event
            && let Some(PointerEvent::Motion { .. }) = self.pending.back()
        {
            self.pending.pop_back();
            self.stats.events_coalesced += 1;
        }
        self.pending.push_back(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = PointerEvent> + '_ {
        self.pending.drain(..)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn stats(&self) -> QueueStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = QueueStats::default();
    }
}
