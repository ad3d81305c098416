//! Flow layout of buttons inside a toolbar.
//!
//! Buttons flow left to right and wrap into rows. Positions are relative to
//! the toolbar's top-left corner. The dropdown button is not part of the
//! flow: it goes at the end of a single row, or centered below several.

use horizon_dock_render::{Point, Size};

/// Gap between neighbouring buttons and rows.
pub const BUTTON_SPACING: f32 = 1.0;
/// Inner margin of a toolbar.
pub const PADDING: f32 = 3.0;
pub const DEFAULT_X: f32 = 300.0;
pub const DEFAULT_Y: f32 = 300.0;
pub const DEFAULT_WIDTH: f32 = 250.0;
/// Height of a folder that has no buttons yet.
pub const DEFAULT_HEIGHT_FOLDER: f32 = 100.0;

// Gap between the last button of a row and the dropdown button.
const DROPDOWN_GAP: f32 = 2.0;

/// Button positions computed by [`flow`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlowLayout {
    /// One position per flowed button, in input order.
    pub positions: Vec<Point>,
    /// Position of the dropdown button, if there is one.
    pub dropdown: Option<Point>,
    /// Number of rows used by the flowed buttons.
    pub rows: usize,
}

/// Flow buttons of the given sizes into a toolbar `width` wide.
///
/// A row wraps once the next button would cross `width - PADDING`, unless
/// the row is still empty, so a button wider than the toolbar gets a row of
/// its own instead of being dropped.
pub fn flow(sizes: &[Size], dropdown: Option<Size>, width: f32) -> FlowLayout {
    let mut positions = Vec::with_capacity(sizes.len());
    let mut x = PADDING;
    let mut y = PADDING;
    let mut line_height: f32 = 0.0;
    let mut line_width: f32 = 0.0;
    let mut widest_line: f32 = 0.0;
    let mut rows = 0;

    for size in sizes {
        if x + size.width > width - PADDING && line_height > 0.0 {
            x = PADDING;
            y += line_height + BUTTON_SPACING;
            line_height = 0.0;
            widest_line = widest_line.max(line_width);
            line_width = 0.0;
        }
        if x == PADDING {
            rows += 1;
        }
        line_height = line_height.max(size.height);
        positions.push(Point::new(x, y));

        x += size.width + BUTTON_SPACING;
        if line_width > 0.0 {
            line_width += BUTTON_SPACING;
        }
        line_width += size.width;
    }
    widest_line = widest_line.max(line_width);

    let dropdown = dropdown.map(|size| {
        if y == PADDING {
            Point::new(x + DROPDOWN_GAP, (line_height - size.height) / 2.0 + PADDING)
        } else {
            Point::new(
                (widest_line - size.width) / 2.0 + PADDING,
                y + line_height + BUTTON_SPACING + DROPDOWN_GAP,
            )
        }
    });

    FlowLayout {
        positions,
        dropdown,
        rows,
    }
}

impl FlowLayout {
    /// Smallest width that holds this layout: the right-most button edge
    /// plus padding.
    pub fn min_width(&self, sizes: &[Size], dropdown: Option<Size>) -> f32 {
        self.extent(sizes, dropdown, |p, s| p.x + s.width) + PADDING
    }

    /// Smallest height that holds this layout.
    pub fn min_height(&self, sizes: &[Size], dropdown: Option<Size>) -> f32 {
        self.extent(sizes, dropdown, |p, s| p.y + s.height) + PADDING
    }

    fn extent(&self, sizes: &[Size], dropdown: Option<Size>, edge: impl Fn(Point, Size) -> f32) -> f32 {
        let flowed = self
            .positions
            .iter()
            .zip(sizes)
            .map(|(p, s)| edge(*p, *s));
        let dropdown = self.dropdown.zip(dropdown).map(|(p, s)| edge(p, s));
        flowed.chain(dropdown).fold(0.0, f32::max)
    }
}

/// Width of a folder holding `count` buttons of `button_width` in a roughly
/// square grid.
pub fn folder_grid_width(count: usize, button_width: f32) -> f32 {
    if count == 0 {
        return DEFAULT_WIDTH;
    }
    let columns = (count as f32).sqrt().ceil();
    button_width * columns + BUTTON_SPACING * (columns - 1.0) + PADDING * 2.0
}
