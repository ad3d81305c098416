//! Per-frame input snapshot supplied by the host.
//!
//! The engine never polls the host directly. Each frame the host builds one
//! [`FrameInput`] and hands it to both the update and the draw pass.

use crate::types::{Point, Size};

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Usually the left button.
    Primary,
    /// Usually the right button.
    Secondary,
    /// The wheel button.
    Middle,
}

impl MouseButton {
    /// All buttons, in index order.
    pub const ALL: [MouseButton; 3] = [Self::Primary, Self::Secondary, Self::Middle];

    /// Zero-based index: primary 0, secondary 1, middle 2.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
            Self::Middle => 2,
        }
    }
}

/// Pointer position and button state for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    /// Pointer position in screen coordinates.
    pub position: Point,
    /// Buttons currently held down.
    pub down: [bool; 3],
    /// Buttons that went down during this frame.
    pub pressed: [bool; 3],
}

impl PointerState {
    /// A pointer at `position` with no buttons held.
    pub fn at(position: Point) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Whether `button` is held this frame.
    #[inline]
    pub fn is_down(&self, button: MouseButton) -> bool {
        self.down[button.index()]
    }

    /// Whether `button` went down this frame.
    #[inline]
    pub fn was_pressed(&self, button: MouseButton) -> bool {
        self.pressed[button.index()]
    }

    /// Whether any button went down this frame.
    #[inline]
    pub fn any_pressed(&self) -> bool {
        self.pressed.iter().any(|p| *p)
    }
}

/// Everything the engine needs to know about the host for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Pointer state.
    pub pointer: PointerState,
    /// Screen size in pixels.
    pub screen: Size,
    /// Monotonic host clock in milliseconds.
    pub now_ms: u64,
    /// A modal dialog is open; toolbar interactions are suspended.
    pub modal_open: bool,
    /// The host is paused; interactions are suspended and menus close.
    pub paused: bool,
}

impl FrameInput {
    /// A frame with the pointer at `position` and no buttons held.
    pub fn new(screen: Size, position: Point, now_ms: u64) -> Self {
        Self {
            pointer: PointerState::at(position),
            screen,
            now_ms,
            modal_open: false,
            paused: false,
        }
    }

    /// Hold `button` down during this frame.
    pub fn holding(mut self, button: MouseButton) -> Self {
        self.pointer.down[button.index()] = true;
        self
    }

    /// Press `button` during this frame (it is also held).
    pub fn pressing(mut self, button: MouseButton) -> Self {
        self.pointer.down[button.index()] = true;
        self.pointer.pressed[button.index()] = true;
        self
    }

    /// Whether toolbar interactions are suspended this frame.
    #[inline]
    pub fn suspended(&self) -> bool {
        self.modal_open || self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressing_implies_down() {
        let input = FrameInput::new(Size::new(800.0, 600.0), Point::ZERO, 0)
            .pressing(MouseButton::Secondary);
        assert!(input.pointer.is_down(MouseButton::Secondary));
        assert!(input.pointer.was_pressed(MouseButton::Secondary));
        assert!(!input.pointer.is_down(MouseButton::Primary));
        assert!(input.pointer.any_pressed());
    }

    #[test]
    fn test_suspended() {
        let mut input = FrameInput::new(Size::new(800.0, 600.0), Point::ZERO, 0);
        assert!(!input.suspended());
        input.paused = true;
        assert!(input.suspended());
    }
}
