//! Preview of where a dragged button will land.

use horizon_dock_render::{Color, Painter, Rect};

/// Width of the insertion line.
pub const MARKER_LINE_WIDTH: f32 = 2.0;

/// An orange line beside the hovered button, or a box over a folder button.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DropMarker {
    rect: Option<Rect>,
}

impl DropMarker {
    /// Show the insertion line left of `hovered`.
    pub fn before(hovered: Rect) -> Self {
        Self {
            rect: Some(Rect::new(
                hovered.left() - MARKER_LINE_WIDTH,
                hovered.top(),
                MARKER_LINE_WIDTH,
                hovered.height(),
            )),
        }
    }

    /// Show the insertion line right of `hovered`.
    pub fn after(hovered: Rect) -> Self {
        Self {
            rect: Some(Rect::new(hovered.right(), hovered.top(), MARKER_LINE_WIDTH, hovered.height())),
        }
    }

    /// Highlight the whole folder button.
    pub fn into_folder(folder_button: Rect) -> Self {
        Self {
            rect: Some(folder_button),
        }
    }

    /// Where the marker is drawn, if anywhere.
    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    pub fn draw(&self, painter: &mut dyn Painter) {
        if let Some(rect) = self.rect {
            painter.fill_rect(rect, Color::DARK_ORANGE);
        }
    }
}
