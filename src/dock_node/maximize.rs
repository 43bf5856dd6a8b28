use egui::{Rect, Vec2, ViewportId};

use crate::geometry;
use crate::host::Desktop;

use super::types::DockFlag;
use super::DockNode;

/// Owner chains deeper than this are treated as cyclic.
const MAX_OWNER_DEPTH: usize = 64;

impl<Pane> DockNode<Pane> {
    /// Fill the screen with the floating window, or leave the maximized state.
    ///
    /// Ignored unless the node is floating.
    pub fn set_maximized(&mut self, maximized: bool) {
        if !self.floating {
            return;
        }
        self.set_flag(DockFlag::Maximized, maximized);
    }

    pub(super) fn apply_maximized(&mut self, maximized: bool) {
        let Some(window) = &mut self.window else {
            return;
        };
        let desktop = &*self.desktop;

        if maximized
            && let Some(root_rect) =
                root_owner(desktop, window.owner()).and_then(|root| desktop.outer_rect(root))
        {
            window.set_rect(root_rect);
        }

        window.set_native_maximized(maximized);

        // Native maximize of an undecorated window can cover the task bar, so snap to the usable
        // area of the screen we ended up on. The size we send is the inner size, so known
        // decorations come off it.
        if maximized
            && let Some(visual) = geometry::visual_bounds_for_rect(&desktop.screens(), window.rect())
        {
            let decorations = if window.style().is_decorated() {
                decoration_size(desktop, window.id())
            } else {
                Vec2::ZERO
            };
            let size = (visual.size() - decorations).max(Vec2::ZERO);
            window.set_rect(Rect::from_min_size(visual.min, size));
        }

        log::debug!(
            "dock node {:?} maximized={maximized} rect={:?}",
            self.id,
            window.rect()
        );
    }
}

/// Title bar and borders the OS adds around `window`, if the desktop reports both rects.
fn decoration_size(desktop: &dyn Desktop, window: ViewportId) -> Vec2 {
    match (desktop.outer_rect(window), desktop.inner_rect(window)) {
        (Some(outer), Some(inner)) => (outer.size() - inner.size()).max(Vec2::ZERO),
        _ => Vec2::ZERO,
    }
}

/// Follow the owner chain from `owner` up to the top-most window.
pub(super) fn root_owner(desktop: &dyn Desktop, owner: Option<ViewportId>) -> Option<ViewportId> {
    let mut root = owner?;
    for _ in 0..MAX_OWNER_DEPTH {
        match desktop.owner_of(root) {
            Some(next) if next != root => root = next,
            _ => break,
        }
    }
    Some(root)
}
