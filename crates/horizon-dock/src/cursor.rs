//! Cursor arbitration.
//!
//! Several interactions may want to change the pointer glyph in the same
//! frame. They make offers in priority order; the first offer of the frame
//! wins and the host reads the result once after drawing.

use cursor_icon::CursorIcon;

/// Cursor glyphs the engine asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorShape {
    /// The default arrow.
    #[default]
    Arrow,
    /// Dragging a toolbar or a button.
    Move,
    /// Resizing a toolbar from its bottom-right corner.
    Resize,
}

impl CursorShape {
    /// The matching platform cursor.
    pub fn to_cursor_icon(self) -> CursorIcon {
        match self {
            Self::Arrow => CursorIcon::Default,
            Self::Move => CursorIcon::Move,
            Self::Resize => CursorIcon::NwseResize,
        }
    }
}

impl From<CursorShape> for CursorIcon {
    fn from(shape: CursorShape) -> Self {
        shape.to_cursor_icon()
    }
}

/// Single-winner cursor arbiter, reset every frame.
#[derive(Debug, Default)]
pub struct CursorArbiter {
    current: Option<CursorShape>,
}

impl CursorArbiter {
    /// Create an arbiter showing the default cursor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all offers. Called at the start of every frame.
    pub fn begin_frame(&mut self) {
        self.current = None;
    }

    /// Ask for `shape`. Returns whether this offer won.
    pub fn offer(&mut self, shape: CursorShape) -> bool {
        if self.current.is_some() {
            return false;
        }
        self.current = Some(shape);
        true
    }

    /// Whether some interaction already claimed the cursor this frame.
    pub fn is_claimed(&self) -> bool {
        self.current.is_some()
    }

    /// The winning cursor of this frame, or the arrow.
    pub fn cursor(&self) -> CursorShape {
        self.current.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_offer_wins() {
        let mut arbiter = CursorArbiter::new();
        arbiter.begin_frame();
        assert!(arbiter.offer(CursorShape::Resize));
        assert!(!arbiter.offer(CursorShape::Move));
        assert_eq!(arbiter.cursor(), CursorShape::Resize);
    }

    #[test]
    fn test_default_is_arrow() {
        let mut arbiter = CursorArbiter::new();
        arbiter.offer(CursorShape::Move);
        arbiter.begin_frame();
        assert!(!arbiter.is_claimed());
        assert_eq!(arbiter.cursor(), CursorShape::Arrow);
    }

    #[test]
    fn test_maps_to_cursor_icon() {
        assert_eq!(CursorIcon::from(CursorShape::Move), CursorIcon::Move);
        assert_eq!(CursorShape::Resize.to_cursor_icon(), CursorIcon::NwseResize);
        assert_eq!(CursorShape::Arrow.to_cursor_icon(), CursorIcon::Default);
    }
}
