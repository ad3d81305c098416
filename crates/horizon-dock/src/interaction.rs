//! Pointer-driven rectangle interactions.
//!
//! [`PointerInteraction`] is the one state machine behind toolbar dragging,
//! toolbar resizing and button reordering. An [`InteractionKind`] decides
//! which part of the rectangle is the handle and whether the pointer delta
//! moves the origin or grows the size.
//!
//! ```text
//!          primary press in handle
//!   Idle ───────────────────────────▶ Active ──┐ pointer held: Moved
//!    ▲                                  │  ◀───┘
//!    └──────── pointer up / disabled ───┘ Released
//! ```

use horizon_dock_core::logging::targets;
use horizon_dock_render::{FrameInput, MouseButton, Point, Rect, Size};

use crate::cursor::{CursorArbiter, CursorShape};

/// Side length of the resize handle in the bottom-right corner.
pub const RESIZE_HANDLE_SIZE: f32 = 10.0;

/// What an interaction does with the pointer delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// The whole rectangle is the handle; the delta moves the origin.
    Drag,
    /// A corner square is the handle; the delta grows the size.
    Resize,
}

impl InteractionKind {
    /// The handle region of `rect`.
    pub fn handle_rect(self, rect: Rect) -> Rect {
        match self {
            Self::Drag => rect,
            Self::Resize => Rect::new(
                rect.right() - RESIZE_HANDLE_SIZE,
                rect.bottom() - RESIZE_HANDLE_SIZE,
                RESIZE_HANDLE_SIZE,
                RESIZE_HANDLE_SIZE,
            ),
        }
    }

    /// Apply a pointer delta to the rectangle captured at the start.
    pub fn apply(self, start: Rect, delta: Point, min_size: Size) -> Rect {
        match self {
            Self::Drag => start.shift(delta),
            Self::Resize => Rect::new(
                start.left(),
                start.top(),
                (start.width() + delta.x).max(min_size.width),
                (start.height() + delta.y).max(min_size.height),
            ),
        }
    }

    fn cursor(self) -> CursorShape {
        match self {
            Self::Drag => CursorShape::Move,
            Self::Resize => CursorShape::Resize,
        }
    }
}

/// Reported by [`PointerInteraction::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    /// The pointer grabbed the handle this tick.
    Started,
    /// The interaction is active; the rectangle may have changed.
    Moved,
    /// The pointer let go, or the interaction was disabled.
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum InteractionState {
    Idle,
    Active { start_rect: Rect, start_pointer: Point },
}

/// A drag or resize of one rectangle.
#[derive(Debug, Clone)]
pub struct PointerInteraction {
    kind: InteractionKind,
    rect: Rect,
    clamp: Option<Size>,
    min_size: Size,
    enabled: bool,
    state: InteractionState,
}

impl PointerInteraction {
    /// Create an idle interaction.
    ///
    /// With `clamp` set, every step keeps the rectangle on screen, allowing
    /// it to stick out by the given overscan.
    pub fn new(kind: InteractionKind, rect: Rect, clamp: Option<Size>) -> Self {
        Self {
            kind,
            rect,
            clamp,
            min_size: Size::ZERO,
            enabled: true,
            state: InteractionState::Idle,
        }
    }

    /// The interaction's kind.
    pub fn kind(&self) -> InteractionKind {
        self.kind
    }

    /// The controlled rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Replace the controlled rectangle. Ignored while active.
    pub fn set_rect(&mut self, rect: Rect) {
        if !self.is_active() {
            self.rect = rect;
        }
    }

    /// Smallest size a resize may produce.
    pub fn set_min_size(&mut self, min_size: Size) {
        self.min_size = min_size;
    }

    /// Whether the pointer currently holds the handle.
    pub fn is_active(&self) -> bool {
        matches!(self.state, InteractionState::Active { .. })
    }

    /// Whether the interaction may start.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the interaction. Disabling an active interaction
    /// releases it.
    pub fn set_enabled(&mut self, enabled: bool) -> Option<InteractionEvent> {
        self.enabled = enabled;
        if !enabled && self.is_active() {
            self.state = InteractionState::Idle;
            tracing::debug!(target: targets::INTERACTION, kind = ?self.kind, "released by disable");
            return Some(InteractionEvent::Released);
        }
        None
    }

    /// Whether `point` is on the handle and not excluded.
    pub fn is_on_handle(&self, point: Point, allow: impl Fn(Point) -> bool) -> bool {
        self.kind.handle_rect(self.rect).contains(point) && allow(point)
    }

    /// Advance one frame.
    ///
    /// `allow` excludes handle points that belong to other controls.
    pub fn update(
        &mut self,
        input: &FrameInput,
        allow: impl Fn(Point) -> bool,
    ) -> Option<InteractionEvent> {
        let pointer = input.pointer.position;
        match self.state {
            InteractionState::Idle => {
                if self.enabled
                    && input.pointer.was_pressed(MouseButton::Primary)
                    && self.is_on_handle(pointer, allow)
                {
                    self.state = InteractionState::Active {
                        start_rect: self.rect,
                        start_pointer: pointer,
                    };
                    tracing::debug!(target: targets::INTERACTION, kind = ?self.kind, x = pointer.x, y = pointer.y, "started");
                    return Some(InteractionEvent::Started);
                }
                None
            }
            InteractionState::Active {
                start_rect,
                start_pointer,
            } => {
                if !input.pointer.is_down(MouseButton::Primary) {
                    // The rectangle stays where the last held frame put it.
                    self.state = InteractionState::Idle;
                    tracing::debug!(target: targets::INTERACTION, kind = ?self.kind, "released");
                    return Some(InteractionEvent::Released);
                }

                let delta = Point::from_vec2(pointer.delta_from(start_pointer));
                let mut rect = self.kind.apply(start_rect, delta, self.min_size);
                if let Some(overscan) = self.clamp {
                    rect = rect.clamp_to_screen(input.screen, overscan);
                }
                self.rect = rect;
                Some(InteractionEvent::Moved)
            }
        }
    }

    /// Offer this interaction's cursor if it is active or hovered.
    pub fn offer_cursor(
        &self,
        arbiter: &mut CursorArbiter,
        pointer: Point,
        allow: impl Fn(Point) -> bool,
    ) -> bool {
        let wants = self.is_active() || (self.enabled && self.is_on_handle(pointer, allow));
        wants && arbiter.offer(self.kind.cursor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Size = Size::new(800.0, 600.0);

    fn frame(x: f32, y: f32) -> FrameInput {
        FrameInput::new(SCREEN, Point::new(x, y), 0)
    }

    #[test]
    fn test_drag_moves_origin() {
        let mut drag = PointerInteraction::new(
            InteractionKind::Drag,
            Rect::new(100.0, 100.0, 50.0, 30.0),
            Some(Size::ZERO),
        );
        let start = frame(110.0, 110.0).pressing(MouseButton::Primary);
        assert_eq!(drag.update(&start, |_| true), Some(InteractionEvent::Started));

        let moved = frame(130.0, 90.0).holding(MouseButton::Primary);
        assert_eq!(drag.update(&moved, |_| true), Some(InteractionEvent::Moved));
        let last = drag.rect();
        assert_eq!(last, Rect::new(120.0, 80.0, 50.0, 30.0));

        // Letting go elsewhere keeps the last dragged rectangle.
        let released = frame(140.0, 90.0);
        assert_eq!(drag.update(&released, |_| true), Some(InteractionEvent::Released));
        assert_eq!(drag.rect(), last);
        assert!(!drag.is_active());
    }

    #[test]
    fn test_drag_clamped_with_overscan() {
        let mut drag = PointerInteraction::new(
            InteractionKind::Drag,
            Rect::new(10.0, 10.0, 50.0, 30.0),
            Some(Size::new(3.0, 3.0)),
        );
        drag.update(&frame(20.0, 20.0).pressing(MouseButton::Primary), |_| true);
        drag.update(&frame(-200.0, -200.0).holding(MouseButton::Primary), |_| true);
        assert_eq!(drag.rect().origin, Point::new(-3.0, -3.0));
    }

    #[test]
    fn test_excluded_point_does_not_start() {
        let mut drag = PointerInteraction::new(
            InteractionKind::Drag,
            Rect::new(0.0, 0.0, 50.0, 50.0),
            None,
        );
        let input = frame(10.0, 10.0).pressing(MouseButton::Primary);
        assert_eq!(drag.update(&input, |p| p.x > 20.0), None);
        assert!(!drag.is_active());
    }

    #[test]
    fn test_resize_uses_corner_and_respects_min_size() {
        let mut resize = PointerInteraction::new(
            InteractionKind::Resize,
            Rect::new(100.0, 100.0, 100.0, 50.0),
            Some(Size::ZERO),
        );
        resize.set_min_size(Size::new(40.0, 20.0));
        assert_eq!(
            resize.update(&frame(150.0, 120.0).pressing(MouseButton::Primary), |_| true),
            None
        );
        resize.update(&frame(195.0, 145.0).pressing(MouseButton::Primary), |_| true);
        assert!(resize.is_active());
        resize.update(&frame(95.0, 95.0).holding(MouseButton::Primary), |_| true);
        assert_eq!(resize.rect(), Rect::new(100.0, 100.0, 40.0, 20.0));
    }

    #[test]
    fn test_disable_releases() {
        let mut drag = PointerInteraction::new(
            InteractionKind::Drag,
            Rect::new(0.0, 0.0, 50.0, 50.0),
            None,
        );
        drag.update(&frame(10.0, 10.0).pressing(MouseButton::Primary), |_| true);
        assert_eq!(drag.set_enabled(false), Some(InteractionEvent::Released));
        assert_eq!(drag.set_enabled(false), None);
        assert_eq!(
            drag.update(&frame(10.0, 10.0).pressing(MouseButton::Primary), |_| true),
            None
        );
    }

    #[test]
    fn test_set_rect_ignored_while_active() {
        let mut drag = PointerInteraction::new(
            InteractionKind::Drag,
            Rect::new(0.0, 0.0, 50.0, 50.0),
            None,
        );
        drag.update(&frame(10.0, 10.0).pressing(MouseButton::Primary), |_| true);
        drag.set_rect(Rect::new(300.0, 300.0, 1.0, 1.0));
        assert_eq!(drag.rect(), Rect::new(0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn test_cursor_offer() {
        let drag = PointerInteraction::new(
            InteractionKind::Drag,
            Rect::new(0.0, 0.0, 50.0, 50.0),
            None,
        );
        let mut arbiter = CursorArbiter::new();
        assert!(!drag.offer_cursor(&mut arbiter, Point::new(60.0, 10.0), |_| true));
        assert!(drag.offer_cursor(&mut arbiter, Point::new(10.0, 10.0), |_| true));
        assert_eq!(arbiter.cursor(), CursorShape::Move);
    }
}
