//! Drag-and-drop reordering of toolbar buttons.
//!
//! While a toolbar's button order is unlocked, every button except the
//! dropdown gets its own drag handle. Dropping a button beside another one
//! moves it there; dropping it on the middle of a folder button moves it
//! into the folder.

use horizon_dock_core::logging::targets;
use horizon_dock_render::{FrameInput, Point, Rect, Size};

use crate::cursor::{CursorArbiter, CursorShape};
use crate::drop_marker::DropMarker;
use crate::interaction::{InteractionEvent, InteractionKind, PointerInteraction};

/// A laid-out button as seen by the reorder logic.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSlot {
    pub full_id: String,
    /// On-screen rectangle at its layout position.
    pub rect: Rect,
    pub is_folder: bool,
    pub is_dropdown: bool,
}

/// Where a dragged button lands relative to the hovered one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPosition {
    Before,
    After,
    IntoFolder,
}

impl DropPosition {
    /// Classify `pointer` within `hovered`.
    ///
    /// With `thirds`, the middle third of the rectangle means "into folder";
    /// otherwise the left and right halves mean before and after.
    pub fn from_pointer(hovered: Rect, pointer: Point, thirds: bool) -> Self {
        if thirds {
            let third = hovered.width() / 3.0;
            let left = Rect::new(hovered.left(), hovered.top(), third, hovered.height());
            let middle = Rect::new(hovered.left() + third, hovered.top(), third, hovered.height());
            if middle.contains(pointer) {
                DropPosition::IntoFolder
            } else if left.contains(pointer) {
                DropPosition::Before
            } else {
                DropPosition::After
            }
        } else {
            let left = Rect::new(hovered.left(), hovered.top(), hovered.width() / 2.0, hovered.height());
            if left.contains(pointer) {
                DropPosition::Before
            } else {
                DropPosition::After
            }
        }
    }

    fn marker(self, hovered: Rect) -> DropMarker {
        match self {
            DropPosition::Before => DropMarker::before(hovered),
            DropPosition::After => DropMarker::after(hovered),
            DropPosition::IntoFolder => DropMarker::into_folder(hovered),
        }
    }
}

/// A finished drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropOutcome {
    /// The dragged button.
    pub dragged: String,
    /// The hovered button and where the dragged one goes, if the pointer
    /// was over another button on release.
    pub target: Option<(String, DropPosition)>,
}

/// Move `items[dragged]` before or after `items[hovered]`.
pub fn splice<T>(items: &mut Vec<T>, dragged: usize, hovered: usize, after: bool) {
    let mut target = if after { hovered + 1 } else { hovered };
    let item = items.remove(dragged);
    if target > dragged {
        target -= 1;
    }
    items.insert(target.min(items.len()), item);
}

/// Drag handles and drop preview of one toolbar.
#[derive(Debug, Default)]
pub struct Reorder {
    handles: Vec<(String, PointerInteraction)>,
    dragged: Option<(String, Rect)>,
    marker: DropMarker,
}

impl Reorder {
    /// Create one drag handle per non-dropdown slot.
    pub fn new(slots: &[ButtonSlot]) -> Self {
        let handles = slots
            .iter()
            .filter(|slot| !slot.is_dropdown)
            .map(|slot| {
                (
                    slot.full_id.clone(),
                    PointerInteraction::new(InteractionKind::Drag, slot.rect, Some(Size::ZERO)),
                )
            })
            .collect();
        Self {
            handles,
            dragged: None,
            marker: DropMarker::default(),
        }
    }

    /// The button being dragged and its current rectangle.
    pub fn dragged(&self) -> Option<(&str, Rect)> {
        self.dragged.as_ref().map(|(id, rect)| (id.as_str(), *rect))
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    pub fn marker(&self) -> &DropMarker {
        &self.marker
    }

    /// Advance all handles one frame. Returns the drop when a drag ends.
    pub fn update(&mut self, input: &FrameInput, slots: &[ButtonSlot]) -> Option<DropOutcome> {
        let pointer = input.pointer.position;
        let mut finished = None;

        for (id, handle) in &mut self.handles {
            match handle.update(input, |_| true) {
                Some(InteractionEvent::Started | InteractionEvent::Moved) => {
                    self.dragged = Some((id.clone(), handle.rect()));
                }
                Some(InteractionEvent::Released) => {
                    finished = Some(id.clone());
                }
                None => {}
            }
        }

        if let Some(dragged) = finished {
            let target = hovered_target(slots, &dragged, pointer);
            tracing::debug!(target: targets::INTERACTION, button = %dragged, ?target, "button dropped");
            self.dragged = None;
            self.marker = DropMarker::default();
            return Some(DropOutcome { dragged, target });
        }

        if let Some((dragged, _)) = &self.dragged {
            self.marker = hovered_target(slots, dragged, pointer)
                .and_then(|(id, position)| {
                    let slot = slots.iter().find(|slot| slot.full_id == id)?;
                    Some(position.marker(slot.rect))
                })
                .unwrap_or_default();
        }
        None
    }

    /// Offer the move cursor while dragging or over a draggable button.
    pub fn offer_cursor(&self, arbiter: &mut CursorArbiter, pointer: Point, slots: &[ButtonSlot]) -> bool {
        let over_button = slots
            .iter()
            .any(|slot| !slot.is_dropdown && slot.rect.contains(pointer));
        (over_button || self.is_dragging()) && arbiter.offer(CursorShape::Move)
    }
}

fn hovered_target(slots: &[ButtonSlot], dragged: &str, pointer: Point) -> Option<(String, DropPosition)> {
    let dragged_is_folder = slots
        .iter()
        .any(|slot| slot.full_id == dragged && slot.is_folder);
    slots
        .iter()
        .find(|slot| slot.full_id != dragged && !slot.is_dropdown && slot.rect.contains(pointer))
        .map(|slot| {
            let thirds = slot.is_folder && !dragged_is_folder;
            (
                slot.full_id.clone(),
                DropPosition::from_pointer(slot.rect, pointer, thirds),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_dock_render::MouseButton;

    const SCREEN: Size = Size::new(800.0, 600.0);

    fn slot(id: &str, x: f32, is_folder: bool) -> ButtonSlot {
        ButtonSlot {
            full_id: id.to_string(),
            rect: Rect::new(x, 10.0, 32.0, 32.0),
            is_folder,
            is_dropdown: false,
        }
    }

    fn row() -> Vec<ButtonSlot> {
        vec![
            slot("m.a", 3.0, false),
            slot("m.b", 36.0, false),
            slot("m.c", 69.0, false),
            slot("__TOOLBAR_INTERNAL.folder_1", 102.0, true),
        ]
    }

    #[test]
    fn test_splice() {
        let mut items = vec!["A", "B", "C", "D"];
        splice(&mut items, 0, 2, true);
        assert_eq!(items, ["B", "C", "A", "D"]);

        let mut items = vec!["A", "B", "C", "D"];
        splice(&mut items, 3, 1, false);
        assert_eq!(items, ["A", "D", "B", "C"]);

        let mut items = vec!["A", "B", "C", "D"];
        splice(&mut items, 1, 3, true);
        assert_eq!(items, ["A", "C", "D", "B"]);
    }

    #[test]
    fn test_drop_position_halves_and_thirds() {
        let rect = Rect::new(0.0, 0.0, 30.0, 30.0);
        assert_eq!(DropPosition::from_pointer(rect, Point::new(5.0, 5.0), false), DropPosition::Before);
        assert_eq!(DropPosition::from_pointer(rect, Point::new(20.0, 5.0), false), DropPosition::After);
        assert_eq!(DropPosition::from_pointer(rect, Point::new(5.0, 5.0), true), DropPosition::Before);
        assert_eq!(DropPosition::from_pointer(rect, Point::new(15.0, 5.0), true), DropPosition::IntoFolder);
        assert_eq!(DropPosition::from_pointer(rect, Point::new(25.0, 5.0), true), DropPosition::After);
    }

    #[test]
    fn test_drag_onto_right_half_of_neighbour() {
        let slots = row();
        let mut reorder = Reorder::new(&slots);

        let press = FrameInput::new(SCREEN, Point::new(10.0, 20.0), 0).pressing(MouseButton::Primary);
        assert_eq!(reorder.update(&press, &slots), None);
        assert_eq!(reorder.dragged().map(|(id, _)| id.to_string()), Some("m.a".to_string()));

        let hold = FrameInput::new(SCREEN, Point::new(95.0, 20.0), 16).holding(MouseButton::Primary);
        assert_eq!(reorder.update(&hold, &slots), None);
        assert_eq!(reorder.dragged().map(|(_, rect)| rect.left()), Some(88.0));
        assert_eq!(reorder.marker().rect(), Some(Rect::new(101.0, 10.0, 2.0, 32.0)));

        let release = FrameInput::new(SCREEN, Point::new(95.0, 20.0), 32);
        let drop = reorder.update(&release, &slots).unwrap();
        assert_eq!(drop.dragged, "m.a");
        assert_eq!(drop.target, Some(("m.c".to_string(), DropPosition::After)));
        assert!(!reorder.is_dragging());
        assert_eq!(reorder.marker().rect(), None);
    }

    #[test]
    fn test_drag_into_folder_and_folder_never_nests() {
        let slots = row();
        let folder = slots[3].rect;
        let middle = Point::new(folder.left() + 16.0, 20.0);

        let mut reorder = Reorder::new(&slots);
        reorder.update(&FrameInput::new(SCREEN, Point::new(40.0, 20.0), 0).pressing(MouseButton::Primary), &slots);
        reorder.update(&FrameInput::new(SCREEN, middle, 16).holding(MouseButton::Primary), &slots);
        assert_eq!(reorder.marker().rect(), Some(folder));
        let drop = reorder.update(&FrameInput::new(SCREEN, middle, 32), &slots).unwrap();
        assert_eq!(drop.target.map(|(_, p)| p), Some(DropPosition::IntoFolder));

        // A folder button dropped on another folder button uses halves.
        let mut slots = row();
        slots[0].is_folder = true;
        let left_of_middle = Point::new(folder.left() + 13.0, 20.0);
        let mut reorder = Reorder::new(&slots);
        reorder.update(&FrameInput::new(SCREEN, Point::new(10.0, 20.0), 0).pressing(MouseButton::Primary), &slots);
        let drop = reorder.update(&FrameInput::new(SCREEN, left_of_middle, 16), &slots).unwrap();
        assert_eq!(drop.target.map(|(_, p)| p), Some(DropPosition::Before));
    }

    #[test]
    fn test_release_outside_buttons_has_no_target() {
        let slots = row();
        let mut reorder = Reorder::new(&slots);
        reorder.update(&FrameInput::new(SCREEN, Point::new(10.0, 20.0), 0).pressing(MouseButton::Primary), &slots);
        let drop = reorder.update(&FrameInput::new(SCREEN, Point::new(400.0, 300.0), 16), &slots).unwrap();
        assert_eq!(drop.target, None);
    }

    #[test]
    fn test_cursor_over_buttons_only() {
        let slots = row();
        let reorder = Reorder::new(&slots);
        let mut arbiter = CursorArbiter::new();
        assert!(!reorder.offer_cursor(&mut arbiter, Point::new(400.0, 300.0), &slots));
        assert!(reorder.offer_cursor(&mut arbiter, Point::new(10.0, 20.0), &slots));
        assert_eq!(arbiter.cursor(), CursorShape::Move);
    }
}
