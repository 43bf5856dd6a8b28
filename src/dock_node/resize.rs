use egui::{CursorIcon, Pos2, Rect, Vec2, pos2};

use crate::geometry::{Insets, pointer_delta};

use super::types::{PointerEvent, PointerEventKind};
use super::DockNode;

/// Which border bands of a floating window the pointer is over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResizeEdges {
    pub west: bool,
    pub east: bool,
    pub north: bool,
    pub south: bool,
}

impl ResizeEdges {
    /// Hit-test a window-local position against the border padding of a window of `size`.
    pub fn hit_test(local: Pos2, size: Vec2, padding: Insets) -> Self {
        Self {
            west: local.x < padding.left,
            east: local.x > size.x - padding.right,
            north: local.y < padding.top,
            south: local.y > size.y - padding.bottom,
        }
    }

    pub fn any(self) -> bool {
        self.west || self.east || self.north || self.south
    }

    /// Cursor affordance for this zone.
    pub fn cursor(self) -> CursorIcon {
        match (self.west, self.east, self.north, self.south) {
            (true, _, true, _) => CursorIcon::ResizeNorthWest,
            (true, _, _, true) => CursorIcon::ResizeSouthWest,
            (true, _, _, _) => CursorIcon::ResizeWest,
            (_, true, true, _) => CursorIcon::ResizeNorthEast,
            (_, true, _, true) => CursorIcon::ResizeSouthEast,
            (_, true, _, _) => CursorIcon::ResizeEast,
            (_, _, true, _) => CursorIcon::ResizeNorth,
            (_, _, _, true) => CursorIcon::ResizeSouth,
            _ => CursorIcon::Default,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResizePhase {
    /// No button held.
    #[default]
    Idle,

    /// Button down, origin recorded.
    Pressed,

    /// Button down and the pointer is moving.
    Dragging,
}

#[derive(Clone, Copy, Debug, Default)]
pub(super) struct ResizeDrag {
    pub(super) phase: ResizePhase,
    pub(super) edges: ResizeEdges,
    pub(super) last_pointer: Option<Pos2>,
}

/// Result of one drag step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct ResizeStep {
    pub(super) rect: Rect,

    /// Where the next delta is measured from. An axis only advances if its update was applied,
    /// so a clamped edge does not drift away from the pointer.
    pub(super) last_pointer: Pos2,
}

/// Move the dragged edges of `rect` by the pointer delta, rejecting any axis that would end up
/// below `min_size`.
pub(super) fn resize_step(
    rect: Rect,
    min_size: Vec2,
    edges: ResizeEdges,
    last: Pos2,
    current: Pos2,
) -> ResizeStep {
    let delta = pointer_delta(last, current);
    let (mut x, mut y) = (rect.min.x, rect.min.y);
    let (mut width, mut height) = (rect.width(), rect.height());

    if edges.north {
        height -= delta.y;
        y += delta.y;
    } else if edges.south {
        height += delta.y;
    }

    if edges.west {
        width -= delta.x;
        x += delta.x;
    } else if edges.east {
        width += delta.x;
    }

    let (x, width, last_x) = if width >= min_size.x {
        (x, width, current.x)
    } else {
        (rect.min.x, rect.width(), last.x)
    };
    let (y, height, last_y) = if height >= min_size.y {
        (y, height, current.y)
    } else {
        (rect.min.y, rect.height(), last.y)
    };

    ResizeStep {
        rect: Rect::from_min_size(pos2(x, y), Vec2::new(width, height)),
        last_pointer: pos2(last_x, last_y),
    }
}

impl<Pane> DockNode<Pane> {
    /// Feed a pointer event from the floating window.
    ///
    /// Does nothing unless the node is floating and resizable. Drag events that resize the window
    /// are consumed so the caption bar does not also start a move.
    pub fn handle_pointer_event(&mut self, event: &mut PointerEvent) {
        if !self.floating || !self.resizable {
            return;
        }
        let Some(window) = &mut self.window else {
            return;
        };
        if !window.is_subscribed(event.kind) {
            return;
        }

        match event.kind {
            PointerEventKind::Pressed => {
                self.resize.last_pointer = Some(event.screen_pos);
                self.resize.phase = ResizePhase::Pressed;
            }
            PointerEventKind::Moved => {
                let edges = ResizeEdges::hit_test(
                    event.local_pos,
                    window.rect().size(),
                    window.border().padding(),
                );
                self.resize.edges = edges;
                window.set_cursor(edges.cursor());
            }
            PointerEventKind::Dragged => {
                let edges = self.resize.edges;
                if !edges.any() {
                    return;
                }
                let Some(last) = self.resize.last_pointer else {
                    // Missed the press; start measuring from here.
                    self.resize.last_pointer = Some(event.screen_pos);
                    event.consume();
                    return;
                };
                self.resize.phase = ResizePhase::Dragging;

                let before = window.rect();
                let step = resize_step(before, window.min_size(), edges, last, event.screen_pos);
                if step.rect.min != before.min {
                    window.set_position(step.rect.min);
                }
                if step.rect.size() != before.size() {
                    window.set_size(step.rect.size());
                }
                self.resize.last_pointer = Some(step.last_pointer);

                log::trace!(
                    "dock node {:?} resize {edges:?} {before:?} -> {:?}",
                    self.id,
                    step.rect
                );
                event.consume();
            }
            PointerEventKind::Released => {
                self.resize.phase = ResizePhase::Idle;
            }
        }
    }

    /// Whether the pointer was last seen over a resize band.
    pub fn is_mouse_resize_zone(&self) -> bool {
        self.resize.edges.any()
    }

    pub fn resize_edges(&self) -> ResizeEdges {
        self.resize.edges
    }

    pub fn resize_phase(&self) -> ResizePhase {
        self.resize.phase
    }
}
