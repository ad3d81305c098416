//! The immediate-mode drawing interface the host implements.
//!
//! The engine owns no render state. Every frame it walks its toolbars and
//! issues calls on a [`Painter`]; interactive calls (buttons, menu options)
//! report clicks back in the same call, the way immediate-mode toolkits do.
//!
//! # Frame Lifecycle
//!
//! ```ignore
//! let input = host.frame_input();
//! manager.update(&input);
//! manager.draw(&input, &mut host_painter);
//! ```
//!
//! Calls arrive back to front: toolbar boxes first, then drop markers,
//! buttons, folders, menus and finally tooltips.

use crate::icon::Icon;
use crate::input::MouseButton;
use crate::types::{Color, Point, Rect, Size};

/// Which visual theme a toolbar uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Skin {
    /// The engine's neutral look.
    #[default]
    Default,
    /// The host application's own skin.
    Host,
}

/// How a button should be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonStyle {
    /// Tint applied to the whole button. Alpha below 1 fades it.
    pub tint: Color,
    /// Color for any text on the button.
    pub text_color: Color,
    /// Disabled buttons are drawn greyed out and never report clicks.
    pub enabled: bool,
    /// Skin to draw the button frame with.
    pub skin: Skin,
    /// Draw the icon only, without a button frame.
    pub frameless: bool,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            tint: Color::WHITE,
            text_color: Color::WHITE,
            enabled: true,
            skin: Skin::Default,
            frameless: false,
        }
    }
}

/// Immediate-mode drawing surface.
///
/// Implementations must be cheap to call many times per frame. The engine
/// never holds on to a painter between frames.
pub trait Painter {
    /// Draw a boxed background panel, used for toolbar borders and menus.
    fn draw_box(&mut self, rect: Rect, tint: Color, skin: Skin);

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a clickable icon button.
    ///
    /// Returns the mouse button that clicked it this frame, if any. Disabled
    /// buttons must return `None`.
    fn icon_button(&mut self, rect: Rect, icon: &Icon, style: &ButtonStyle) -> Option<MouseButton>;

    /// Draw a single line of text.
    fn label(&mut self, rect: Rect, text: &str, color: Color);

    /// Draw a tooltip box containing `text`.
    fn tooltip(&mut self, rect: Rect, text: &str);

    /// Draw a popup menu entry.
    ///
    /// Returns the mouse button that chose it this frame, if any. Disabled
    /// entries must return `None`.
    fn menu_option(&mut self, rect: Rect, text: &str, enabled: bool) -> Option<MouseButton>;

    /// Size of `text` as the painter would draw it in a label.
    fn measure_text(&self, text: &str) -> Size;
}

/// Place a tooltip of `size` near the pointer.
///
/// The tooltip goes 20 px below the pointer. If the screen edge would push
/// it up, it flips above the pointer instead.
pub fn tooltip_rect(pointer: Point, size: Size, screen: Size) -> Rect {
    let below = Rect::from_origin_size(Point::new(pointer.x, pointer.y + 20.0), size);
    let clamped = below.clamp_to_screen(screen, Size::ZERO);
    if clamped.top() < below.top() {
        Rect::from_origin_size(Point::new(pointer.x, pointer.y - size.height - 5.0), size)
            .clamp_to_screen(screen, Size::ZERO)
    } else {
        clamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooltip_below_pointer() {
        let rect = tooltip_rect(Point::new(100.0, 100.0), Size::new(50.0, 20.0), Size::new(800.0, 600.0));
        assert_eq!(rect, Rect::new(100.0, 120.0, 50.0, 20.0));
    }

    #[test]
    fn test_tooltip_flips_above_at_bottom_edge() {
        let rect = tooltip_rect(Point::new(100.0, 590.0), Size::new(50.0, 20.0), Size::new(800.0, 600.0));
        assert_eq!(rect, Rect::new(100.0, 565.0, 50.0, 20.0));
    }

    #[test]
    fn test_default_style_is_enabled_and_opaque() {
        let style = ButtonStyle::default();
        assert!(style.enabled);
        assert_eq!(style.tint.a, 1.0);
    }
}
