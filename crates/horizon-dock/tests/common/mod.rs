//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use horizon_dock::render::{
    ButtonStyle, Color, FrameInput, Icon, IconError, IconLoader, IconResult, MouseButton, Painter,
    Point, Rect, Size, Skin,
};
use horizon_dock::{Command, DockConfig, ToolbarManager};

pub const SCREEN: Size = Size::new(800.0, 600.0);

/// One recorded painter call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Box { rect: Rect, tint: Color, skin: Skin },
    Fill { rect: Rect },
    Button { rect: Rect, icon: String, style: ButtonStyle },
    Label { text: String },
    Tooltip { rect: Rect, text: String },
    MenuOption { rect: Rect, text: String, enabled: bool },
}

/// A painter that records calls and reports scripted clicks.
#[derive(Debug, Default)]
pub struct MockPainter {
    pub calls: Vec<Call>,
    click: Option<(Point, MouseButton)>,
    choice: Option<String>,
}

impl MockPainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report one click on the enabled button under `point` during the next
    /// draw.
    pub fn click_at(&mut self, point: Point, button: MouseButton) {
        self.click = Some((point, button));
    }

    /// Report one click on the menu option labelled `text`.
    pub fn choose(&mut self, text: &str) {
        self.choice = Some(text.to_string());
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Icon paths and rectangles of every drawn button.
    pub fn buttons(&self) -> Vec<(String, Rect, ButtonStyle)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Button { rect, icon, style } => Some((icon.clone(), *rect, *style)),
                _ => None,
            })
            .collect()
    }

    pub fn button(&self, icon: &str) -> Option<(Rect, ButtonStyle)> {
        self.buttons()
            .into_iter()
            .find(|(path, _, _)| path == icon)
            .map(|(_, rect, style)| (rect, style))
    }

    pub fn tooltips(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Tooltip { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Menu options drawn, with their enabled flag.
    pub fn menu_options(&self) -> Vec<(String, bool)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::MenuOption { text, enabled, .. } => Some((text.clone(), *enabled)),
                _ => None,
            })
            .collect()
    }

    pub fn boxes(&self) -> Vec<(Rect, Color)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Box { rect, tint, .. } => Some((*rect, *tint)),
                _ => None,
            })
            .collect()
    }
}

impl Painter for MockPainter {
    fn draw_box(&mut self, rect: Rect, tint: Color, skin: Skin) {
        self.calls.push(Call::Box { rect, tint, skin });
    }

    fn fill_rect(&mut self, rect: Rect, _color: Color) {
        self.calls.push(Call::Fill { rect });
    }

    fn icon_button(&mut self, rect: Rect, icon: &Icon, style: &ButtonStyle) -> Option<MouseButton> {
        self.calls.push(Call::Button {
            rect,
            icon: icon.path().to_string(),
            style: *style,
        });
        match self.click {
            Some((point, button)) if style.enabled && rect.contains(point) => {
                self.click = None;
                Some(button)
            }
            _ => None,
        }
    }

    fn label(&mut self, _rect: Rect, text: &str, _color: Color) {
        self.calls.push(Call::Label {
            text: text.to_string(),
        });
    }

    fn tooltip(&mut self, rect: Rect, text: &str) {
        self.calls.push(Call::Tooltip {
            rect,
            text: text.to_string(),
        });
    }

    fn menu_option(&mut self, rect: Rect, text: &str, enabled: bool) -> Option<MouseButton> {
        self.calls.push(Call::MenuOption {
            rect,
            text: text.to_string(),
            enabled,
        });
        if enabled && self.choice.as_deref() == Some(text) {
            self.choice = None;
            return Some(MouseButton::Primary);
        }
        None
    }

    fn measure_text(&self, text: &str) -> Size {
        Size::new(7.0 * text.chars().count() as f32, 12.0)
    }
}

/// Icons under `missing/` do not exist and icons under `huge/` are 64x64.
/// Everything else is 24x24.
#[derive(Debug, Default)]
pub struct MockIconLoader;

impl IconLoader for MockIconLoader {
    fn load(&self, path: &str) -> IconResult<Icon> {
        if path.starts_with("missing/") {
            return Err(IconError::NotFound {
                path: path.to_string(),
            });
        }
        let side = if path.starts_with("huge/") { 64 } else { 24 };
        Ok(Icon::new(path, side, side, 7))
    }
}

// ============================================================================
// Sessions and frames
// ============================================================================

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A manager whose settings live in `dir`.
pub fn manager(dir: &tempfile::TempDir) -> ToolbarManager {
    init_tracing();
    ToolbarManager::new(config(dir), Arc::new(MockIconLoader))
}

pub fn config(dir: &tempfile::TempDir) -> DockConfig {
    DockConfig::default().with_settings_path(dir.path().join("settings.toml"))
}

/// Register a command with an icon named after its id.
pub fn button(manager: &ToolbarManager, namespace: &str, id: &str) -> Arc<Command> {
    let command = manager.add(namespace, id).expect("valid id");
    command
        .set_icon_path(Some(&format!("{namespace}/{id}")))
        .expect("valid icon path");
    command.set_tooltip(Some(id));
    command
}

pub fn frame_at(point: Point, now_ms: u64) -> FrameInput {
    FrameInput::new(SCREEN, point, now_ms)
}

pub fn idle(now_ms: u64) -> FrameInput {
    frame_at(Point::new(1.0, 1.0), now_ms)
}

/// Run `update` then `draw` for one frame.
pub fn step(manager: &mut ToolbarManager, painter: &mut MockPainter, input: &FrameInput) {
    manager.update(input);
    manager.draw(input, painter);
}

pub fn center(rect: Rect) -> Point {
    Point::new(rect.left() + rect.width() / 2.0, rect.top() + rect.height() / 2.0)
}
