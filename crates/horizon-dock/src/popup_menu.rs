//! A vertical popup menu of text options and separators.
//!
//! The menu is generic over the value an option yields when chosen. The
//! toolbar's dropdown uses a [`MenuAction`](crate::toolbar::MenuAction);
//! [`PopupMenuDrawable`](crate::PopupMenuDrawable) uses option indices.

use horizon_dock_render::{Color, MouseButton, Painter, Point, Rect, Size, Skin};

const OPTION_PADDING_X: f32 = 8.0;
const OPTION_PADDING_Y: f32 = 3.0;
const OPTION_MARGIN: f32 = 1.0;
const SEPARATOR_HEIGHT: f32 = 1.0;
const SEPARATOR_MARGIN: f32 = 2.0;
const BOX_PADDING: f32 = 4.0;

#[derive(Debug, Clone)]
enum Entry<A> {
    Option { text: String, enabled: bool, value: A },
    Separator,
}

/// A popup menu anchored at a screen position.
#[derive(Debug, Clone)]
pub struct PopupMenu<A> {
    position: Point,
    entries: Vec<Entry<A>>,
    rect: Rect,
}

impl<A: Clone> PopupMenu<A> {
    /// Create an empty menu whose top-left corner is at `position`.
    pub fn new(position: Point) -> Self {
        Self {
            position,
            entries: Vec::new(),
            rect: Rect::from_origin_size(position, Size::ZERO),
        }
    }

    /// Append an option.
    pub fn add_option(&mut self, text: impl Into<String>, enabled: bool, value: A) {
        self.entries.push(Entry::Option {
            text: text.into(),
            enabled,
            value,
        });
    }

    /// Append a separator line.
    pub fn add_separator(&mut self) {
        self.entries.push(Entry::Separator);
    }

    /// Move the menu's top-left corner.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Number of options, separators excluded.
    pub fn option_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, Entry::Option { .. }))
            .count()
    }

    /// Text and enabled state of every option, in order.
    pub fn options(&self) -> impl Iterator<Item = (&str, bool, &A)> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Option {
                text,
                enabled,
                value,
            } => Some((text.as_str(), *enabled, value)),
            Entry::Separator => None,
        })
    }

    /// Size of the whole menu box as `painter` would draw it.
    pub fn measure(&self, painter: &dyn Painter) -> Size {
        let mut width: f32 = 0.0;
        let mut height = 0.0;
        for entry in &self.entries {
            match entry {
                Entry::Option { text, .. } => {
                    let text_size = painter.measure_text(text);
                    width = width.max(text_size.width + 2.0 * OPTION_PADDING_X);
                    height += text_size.height + 2.0 * OPTION_PADDING_Y + 2.0 * OPTION_MARGIN;
                }
                Entry::Separator => height += SEPARATOR_HEIGHT + 2.0 * SEPARATOR_MARGIN,
            }
        }
        Size::new(width + 2.0 * BOX_PADDING, height + 2.0 * BOX_PADDING)
    }

    /// Compute the menu rectangle, keeping it on `screen` when given.
    pub fn layout(&mut self, painter: &dyn Painter, screen: Option<Size>) -> Rect {
        let rect = Rect::from_origin_size(self.position, self.measure(painter));
        self.rect = match screen {
            Some(screen) => rect.clamp_to_screen(screen, Size::ZERO),
            None => rect,
        };
        self.rect
    }

    /// The rectangle of the last layout.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Whether `point` is inside the last laid-out rectangle.
    pub fn contains(&self, point: Point) -> bool {
        self.rect.contains(point)
    }

    /// Lay out and draw the menu. Returns the chosen option, if any.
    pub fn draw(&mut self, painter: &mut dyn Painter, screen: Option<Size>) -> Option<(A, MouseButton)> {
        let rect = self.layout(painter, screen);
        painter.draw_box(rect, Color::WHITE, Skin::Default);

        let inner_width = rect.width() - 2.0 * BOX_PADDING;
        let x = rect.left() + BOX_PADDING;
        let mut y = rect.top() + BOX_PADDING;
        let mut chosen = None;

        for entry in &self.entries {
            match entry {
                Entry::Option {
                    text,
                    enabled,
                    value,
                } => {
                    let height = painter.measure_text(text).height + 2.0 * OPTION_PADDING_Y;
                    let option_rect = Rect::new(x, y + OPTION_MARGIN, inner_width, height);
                    if let Some(button) = painter.menu_option(option_rect, text, *enabled)
                        && chosen.is_none()
                    {
                        chosen = Some((value.clone(), button));
                    }
                    y += height + 2.0 * OPTION_MARGIN;
                }
                Entry::Separator => {
                    painter.fill_rect(
                        Rect::new(x, y + SEPARATOR_MARGIN, inner_width, SEPARATOR_HEIGHT),
                        Color::GRAY,
                    );
                    y += SEPARATOR_HEIGHT + 2.0 * SEPARATOR_MARGIN;
                }
            }
        }
        chosen
    }
}
