//! Per-frame drawing of a toolbar, its folders, drawables, menu and tooltip.

use std::collections::HashSet;
use std::sync::Arc;

use horizon_dock_core::{invoke_guarded, logging::targets};
use horizon_dock_render::{Color, FrameInput, MouseButton, Painter, Point, Rect, Size, tooltip_rect};

use super::auto_hide::FADED_ALPHA;
use super::layout::BUTTON_SPACING;
use super::menu::folder_menu;
use super::{DisplayMode, Toolbar, ToolbarMode};
use crate::button::{Button, ButtonKind};
use crate::command::Command;
use crate::placement::{Side, place_beside};

/// Space between tooltip text and its box.
const TOOLTIP_PADDING: Size = Size::new(8.0, 4.0);

/// Where a command's drawable went last frame.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DrawableSlot {
    size: Size,
    last_side: Option<Side>,
}

struct Click {
    button: Button,
    rect: Rect,
    mouse_button: MouseButton,
}

impl Toolbar {
    /// Draw one frame and act on the clicks the painter reports.
    pub fn draw(&mut self, input: &FrameInput, painter: &mut dyn Painter) {
        self.sync();
        if !self.is_shown() {
            self.set_hovered(None);
            return;
        }

        let pointer = input.pointer.position;
        let layout = self.layout();
        let fading = self.should_slide_out(pointer, input.screen)
            && self.display.mode() == DisplayMode::Visible
            && self.menu.is_none();

        let empty_folder = self.mode == ToolbarMode::Folder && layout.buttons.is_empty();
        if self.show_border || !self.rect_locked || !self.order_locked || empty_folder {
            let tint = if fading {
                Color::WHITE.with_alpha(FADED_ALPHA)
            } else {
                Color::WHITE
            };
            painter.draw_box(self.rect, tint, self.skin);
        }

        if let Some(reorder) = &self.reorder {
            reorder.marker().draw(painter);
        }

        // The dragged button follows the pointer and goes on top.
        let dragged = self
            .reorder
            .as_ref()
            .and_then(|r| r.dragged())
            .map(|(id, rect)| (id.to_string(), rect));
        let mut entries: Vec<(Button, Rect)> = layout
            .buttons
            .iter()
            .map(|&(index, rect)| (self.buttons[index].clone(), rect))
            .collect();
        if let Some((id, rect)) = &dragged
            && let Some(index) = entries.iter().position(|(b, _)| b.full_id() == id)
        {
            let (button, _) = entries.remove(index);
            entries.push((button, *rect));
        }
        if let (Some(dropdown), Some(rect)) = (&self.dropdown, layout.dropdown) {
            entries.push((dropdown.clone(), rect));
        }

        let interactive = self.enabled && self.rect_locked && self.order_locked;
        let mut clicks = Vec::new();
        let mut hovered = None;
        for (button, rect) in &entries {
            let mut style = button.style();
            style.skin = self.skin;
            style.enabled &= (interactive || button.is_dropdown()) && !input.suspended();

            let open_folder = button
                .folder_id()
                .and_then(|id| self.folders.get(id))
                .is_some_and(|folder| folder.toolbar.visible);
            if fading && !button.command().is_important() && !open_folder {
                style.tint = style.tint.with_alpha(FADED_ALPHA);
            }

            if let Some(mouse_button) = button.draw(painter, *rect, &style) {
                clicks.push(Click {
                    button: button.clone(),
                    rect: *rect,
                    mouse_button,
                });
            }
            if !button.is_dropdown() && rect.contains(pointer) {
                hovered = Some(button.command().clone());
            }
        }
        self.set_hovered(if interactive { hovered } else { None });

        for folder in self.folders.values_mut() {
            folder.toolbar.draw(input, painter);
        }

        self.draw_drawables(input, painter);

        let chosen = self
            .menu
            .as_mut()
            .and_then(|menu| menu.draw(painter, Some(input.screen)));

        self.draw_tooltip(input, painter, &entries);

        for click in clicks {
            self.handle_click(click, painter, input.screen);
        }
        if let Some((action, _)) = chosen {
            self.menu = None;
            self.apply_menu_action(action);
        }
    }

    pub(super) fn set_hovered(&mut self, hovered: Option<Arc<Command>>) {
        let same = match (&self.hovered, &hovered) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if same {
            return;
        }
        if let Some(previous) = self.hovered.take() {
            previous.mouse_leave();
        }
        if let Some(current) = &hovered {
            current.mouse_enter();
        }
        self.hovered = hovered;
    }

    fn draw_drawables(&mut self, input: &FrameInput, painter: &mut dyn Painter) {
        let parent = self.rect;
        let single_column = self.is_single_column();
        let shown: Vec<Arc<Command>> = self
            .buttons
            .iter()
            .filter(|b| self.is_user_visible(b))
            .map(|b| b.command().clone())
            .collect();

        let mut live = HashSet::new();
        for command in shown {
            let Some(drawable) = command.drawable() else {
                continue;
            };
            let full_id = command.full_id().to_string();
            let slot = self.drawables.entry(full_id.clone()).or_default();
            let placement = place_beside(parent, slot.size, input.screen, single_column, slot.last_side);
            slot.last_side = Some(placement.side);

            let position = placement.rect.origin;
            let drawn = invoke_guarded(&full_id, "drawable draw", || {
                drawable.lock().draw(position, &mut *painter)
            });
            if let Some(size) = drawn {
                slot.size = size;
            }
            live.insert(full_id);
        }
        self.drawables.retain(|id, _| live.contains(id));
    }

    fn draw_tooltip(&self, input: &FrameInput, painter: &mut dyn Painter, entries: &[(Button, Rect)]) {
        let dragging = self.reorder.as_ref().is_some_and(|r| r.is_dragging());
        let allowed = self.enabled
            && self.rect_locked
            && (self.order_locked || !dragging)
            && self.menu.is_none()
            && self.display.mode() == DisplayMode::Visible;
        if !allowed {
            return;
        }

        let pointer = input.pointer.position;
        let text = entries
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(pointer))
            .and_then(|(button, _)| button.command().tooltip());
        if let Some(text) = text {
            let measured = painter.measure_text(&text);
            let size = Size::new(
                measured.width + TOOLTIP_PADDING.width * 2.0,
                measured.height + TOOLTIP_PADDING.height * 2.0,
            );
            painter.tooltip(tooltip_rect(pointer, size, input.screen), &text);
        }
    }

    fn handle_click(&mut self, click: Click, painter: &dyn Painter, screen: Size) {
        tracing::debug!(target: targets::TOOLBAR, toolbar = %self.id, button = click.button.full_id(), mouse_button = ?click.mouse_button, "button clicked");
        match click.button.kind() {
            ButtonKind::Dropdown => self.toggle_dropdown_menu(painter, screen),
            ButtonKind::Folder(folder_id) => match click.mouse_button {
                MouseButton::Primary => self.toggle_folder(folder_id),
                MouseButton::Secondary => {
                    let position = Point::new(click.rect.left(), click.rect.bottom() + BUTTON_SPACING);
                    let mut menu = folder_menu(position, folder_id);
                    menu.layout(painter, Some(screen));
                    self.menu = Some(menu);
                }
                MouseButton::Middle => {}
            },
            ButtonKind::ConfigureVisibleButtons => self.toggle_visible_buttons_selector(),
            ButtonKind::Regular => click.button.command().click(click.mouse_button),
        }
    }
}
