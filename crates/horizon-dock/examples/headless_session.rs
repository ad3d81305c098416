//! Headless session example.
//!
//! Drives a toolbar for a few scripted frames with a painter that prints
//! what it is asked to draw, then prints the requests the host would
//! answer with dialogs.
//!
//! Run with: cargo run -p horizon-dock --example headless_session

use std::sync::Arc;

use horizon_dock::button::icons;
use horizon_dock::render::{
    ButtonStyle, Color, FrameInput, Icon, IconLoader, IconResult, MouseButton, Painter, Point,
    Rect, Size, Skin,
};
use horizon_dock::{DEFAULT_TOOLBAR_ID, DockConfig, DockRequest, ToolbarManager};

const SCREEN: Size = Size::new(1280.0, 720.0);

/// Every icon exists and is 24x24.
struct SquareIcons;

impl IconLoader for SquareIcons {
    fn load(&self, path: &str) -> IconResult<Icon> {
        Ok(Icon::new(path, 24, 24, 0))
    }
}

/// Prints draw calls and clicks whatever is under a scripted point.
struct ConsolePainter {
    click: Option<Point>,
    option: Option<&'static str>,
    dropdown: Option<Rect>,
}

impl Painter for ConsolePainter {
    fn draw_box(&mut self, rect: Rect, _tint: Color, skin: Skin) {
        println!("  box     {rect:?} ({skin:?})");
    }

    fn fill_rect(&mut self, rect: Rect, _color: Color) {
        println!("  fill    {rect:?}");
    }

    fn icon_button(&mut self, rect: Rect, icon: &Icon, style: &ButtonStyle) -> Option<MouseButton> {
        println!("  button  {:<32} at ({}, {})", icon.path(), rect.left(), rect.top());
        if icon.path() == icons::DROPDOWN {
            self.dropdown = Some(rect);
        }
        let hit = style.enabled && self.click.is_some_and(|p| rect.contains(p));
        if hit {
            self.click = None;
        }
        hit.then_some(MouseButton::Primary)
    }

    fn label(&mut self, _rect: Rect, text: &str, _color: Color) {
        println!("  label   {text}");
    }

    fn tooltip(&mut self, _rect: Rect, text: &str) {
        println!("  tooltip {text}");
    }

    fn menu_option(&mut self, _rect: Rect, text: &str, enabled: bool) -> Option<MouseButton> {
        println!("  option  {text}{}", if enabled { "" } else { " (disabled)" });
        if enabled && self.option == Some(text) {
            self.option = None;
            return Some(MouseButton::Primary);
        }
        None
    }

    fn measure_text(&self, text: &str) -> Size {
        Size::new(7.0 * text.chars().count() as f32, 14.0)
    }
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let settings = std::env::temp_dir().join("horizon-dock-headless.toml");
    let config = DockConfig::default().with_settings_path(&settings);
    let mut manager = ToolbarManager::new(config, Arc::new(SquareIcons));

    for (id, tooltip) in [("launch", "Launch"), ("abort", "Abort"), ("map", "Map")] {
        let command = match manager.add("demo", id) {
            Ok(command) => command,
            Err(err) => {
                eprintln!("cannot register {id}: {err}");
                return;
            }
        };
        if let Err(err) = command.set_icon_path(Some(&format!("Demo/{id}"))) {
            eprintln!("bad icon for {id}: {err}");
        }
        command.set_tooltip(Some(tooltip));
        command
            .clicked()
            .connect(|event| println!("  >> {} clicked with {:?}", event.full_id, event.mouse_button));
    }

    manager.load_scene("flight");
    manager.set_visible_buttons(
        DEFAULT_TOOLBAR_ID,
        ["demo.launch", "demo.abort", "demo.map"].map(String::from),
    );

    let mut painter = ConsolePainter {
        click: None,
        option: None,
        dropdown: None,
    };
    let run = |manager: &mut ToolbarManager, painter: &mut ConsolePainter, frame: u64, pointer: Point| {
        println!("frame {frame}");
        let input = FrameInput::new(SCREEN, pointer, frame * 16);
        manager.update(&input);
        manager.draw(&input, painter);
    };

    run(&mut manager, &mut painter, 0, Point::ZERO);
    let Some(rect) = manager.toolbar(DEFAULT_TOOLBAR_ID).map(|t| t.rect()) else {
        return;
    };
    println!("toolbar at {rect:?}");

    // Click the first button.
    let first = Point::new(rect.left() + 10.0, rect.top() + 10.0);
    painter.click = Some(first);
    run(&mut manager, &mut painter, 1, first);

    // Open the dropdown and ask for the visible buttons selector.
    painter.click = painter
        .dropdown
        .map(|r| Point::new(r.left() + r.width() / 2.0, r.top() + r.height() / 2.0));
    run(&mut manager, &mut painter, 2, Point::ZERO);
    painter.option = Some("Configure Visible Buttons...");
    run(&mut manager, &mut painter, 3, Point::ZERO);

    for request in manager.take_requests() {
        match request {
            DockRequest::ConfigureVisibleButtons { toolbar, candidates, .. } => {
                println!("host: show selector for {toolbar} with {} candidates", candidates.len());
                manager.close_visible_buttons_selector(&toolbar);
            }
            other => println!("host: {other:?}"),
        }
    }
    println!("cursor: {:?}", manager.cursor());
}
