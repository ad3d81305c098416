//! Side-preference placement of panels next to a toolbar.
//!
//! Folders and attached drawables open beside their owning toolbar. A tall
//! single-column toolbar prefers its left and right sides, anything else
//! prefers above and below. The side used last is kept while it still fits
//! so that a panel does not jump around while the toolbar moves.

use horizon_dock_render::{Point, Rect, Size};

use crate::toolbar::layout::BUTTON_SPACING;

/// Which side of the parent a panel sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Right,
    Left,
    Above,
    Below,
}

impl Side {
    /// Preference order for a parent of the given shape.
    pub fn preferences(single_column: bool) -> [Side; 4] {
        if single_column {
            [Side::Right, Side::Left, Side::Above, Side::Below]
        } else {
            [Side::Above, Side::Below, Side::Right, Side::Left]
        }
    }

    fn is_horizontal(self) -> bool {
        matches!(self, Side::Right | Side::Left)
    }

    /// Unclamped candidate rectangle on this side, centered on the parent.
    pub fn candidate(self, parent: Rect, size: Size) -> Rect {
        let center_x = parent.left() + (parent.width() - size.width) / 2.0;
        let center_y = parent.top() + (parent.height() - size.height) / 2.0;
        let origin = match self {
            Side::Right => Point::new(parent.right() + BUTTON_SPACING, center_y),
            Side::Left => Point::new(parent.left() - size.width - BUTTON_SPACING, center_y),
            Side::Above => Point::new(center_x, parent.top() - size.height - BUTTON_SPACING),
            Side::Below => Point::new(center_x, parent.bottom() + BUTTON_SPACING),
        };
        Rect::from_origin_size(origin, size)
    }
}

/// Result of [`place_beside`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// On-screen rectangle of the panel.
    pub rect: Rect,
    /// The side that was chosen.
    pub side: Side,
}

/// Place a panel of `size` beside `parent`.
pub fn place_beside(
    parent: Rect,
    size: Size,
    screen: Size,
    single_column: bool,
    last_side: Option<Side>,
) -> Placement {
    let preferences = Side::preferences(single_column);
    let order = last_side
        .into_iter()
        .chain(preferences.into_iter().filter(|side| Some(*side) != last_side));

    for side in order {
        let candidate = side.candidate(parent, size);
        let clamped = candidate.clamp_to_screen(screen, Size::ZERO);
        let axis_kept = if side.is_horizontal() {
            clamped.left() == candidate.left()
        } else {
            clamped.top() == candidate.top()
        };
        if axis_kept && !clamped.overlaps(&parent) {
            return Placement {
                rect: clamped,
                side,
            };
        }
    }

    let side = preferences[0];
    Placement {
        rect: side.candidate(parent, size).clamp_to_screen(screen, Size::ZERO),
        side,
    }
}
