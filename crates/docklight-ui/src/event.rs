//! Pointer input, independent of the windowing backend.

use bitflags::bitflags;
use docklight_core::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
    Other(u16),
}

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const SUPER = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Pointer events in window-local logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Enter {
        position: Vec2,
    },
    Motion {
        position: Vec2,
    },
    Leave,
    Press {
        button: PointerButton,
        position: Vec2,
        modifiers: Modifiers,
    },
    Release {
        button: PointerButton,
        position: Vec2,
        modifiers: Modifiers,
    },
    Scroll {
        direction: ScrollDirection,
        position: Vec2,
    },
}

impl PointerEvent {
    /// Where the event happened, if it carries a position.
    pub fn position(&self) -> Option<Vec2> {
        match *self {
            PointerEvent::Enter { position }
            | PointerEvent::Motion { position }
            | PointerEvent::Press { position, .. }
            | PointerEvent::Release { position, .. }
            | PointerEvent::Scroll { position, .. } => Some(position),
            PointerEvent::Leave => None,
        }
    }
}
