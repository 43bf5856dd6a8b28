use egui::{Vec2, ViewportId};

use crate::geometry;

use super::options::WindowStyle;
use super::resize::ResizeDrag;
use super::types::{DockFlag, PointerEventKind};
use super::window::FloatingWindow;
use super::DockNode;

impl<Pane> DockNode<Pane> {
    /// Float the node into its own window, or bring it back.
    ///
    /// `offset` shifts the new window relative to where the node was docked, e.g. to keep it under
    /// the pointer that tore it off. Floating while already floating (and the reverse) does nothing.
    pub fn set_floating(&mut self, floating: bool, offset: Option<Vec2>) {
        if floating && !self.floating {
            self.enter_floating(offset);
        } else if !floating && self.floating {
            self.exit_floating();
        }
    }

    fn enter_floating(&mut self, offset: Option<Vec2>) {
        let scene_origin = self.bounds.scene_origin;
        let screen_origin = self.bounds.screen_origin;

        self.show_caption_bar(self.custom_caption_bar);

        // Switches the border padding on, so the insets read below include the shadow.
        self.set_flag(DockFlag::Floating, true);

        if self.docked {
            self.undock();
        }

        let owner = self.host_owner_window();
        let style = self.options.window_style;
        let window_id = self.allocate_window_id();
        let mut window = FloatingWindow::new(window_id, owner, style, &self.title);

        let origin = if style.is_decorated() {
            match owner.and_then(|owner| self.desktop.outer_rect(owner)) {
                Some(owner_rect) => scene_origin + owner_rect.min.to_vec2(),
                None => screen_origin,
            }
        } else {
            screen_origin
        };
        let origin = geometry::offset_by(origin, offset);

        {
            let border = window.border_mut();
            border.set_states(self.border_states());
            border.apply_style(&self.options.border_style);
        }

        match self.with_host(|host| {
            host.ensure_default_stylesheet();
            host.default_stylesheet()
        }) {
            Ok(stylesheet) => window.defer_stylesheet(stylesheet),
            Err(err) => log::warn!("dock node {:?}: {err}", self.id),
        }

        // Best effort: the deferred stylesheet may still change the padding.
        let insets = window.border().padding();
        window.set_position(geometry::outer_origin_for_content(origin, insets));
        window.set_min_size(geometry::inset_adjusted_size(self.bounds.min_size, insets));
        window
            .border_mut()
            .set_pref_size(geometry::inset_adjusted_size(self.bounds.size, insets));

        if style == WindowStyle::Transparent {
            window.clear_background();
        }

        window.set_resizable(self.resizable);
        if self.resizable {
            for kind in PointerEventKind::ALL {
                window.subscribe_pointer(kind);
            }
        }

        window.size_to_scene();
        window.show();

        log::debug!(
            "dock node {:?} floating in {:?} at {:?}",
            self.id,
            window.id(),
            window.rect()
        );
        self.resize = ResizeDrag::default();
        self.window = Some(window);
    }

    fn exit_floating(&mut self) {
        self.set_flag(DockFlag::Maximized, false);
        self.set_flag(DockFlag::Floating, false);

        if let Some(mut window) = self.window.take() {
            window.close();
            self.retired_requests.extend(window.take_requests());
            log::debug!("dock node {:?} closed {:?}", self.id, window.id());
        }
        self.resize = ResizeDrag::default();
    }

    /// Keep the open window in step with the resizable flag.
    pub(super) fn apply_resizable(&mut self, resizable: bool) {
        let Some(window) = &mut self.window else {
            return;
        };
        window.set_resizable(resizable);
        for kind in PointerEventKind::ALL {
            if resizable {
                window.subscribe_pointer(kind);
            } else {
                window.unsubscribe_pointer(kind);
            }
        }
        if !resizable {
            self.resize = ResizeDrag::default();
        }
    }

    fn allocate_window_id(&mut self) -> ViewportId {
        let serial = self.next_window_serial;
        self.next_window_serial = self.next_window_serial.saturating_add(1);
        ViewportId::from_hash_of(("egui_dock_node_floating", self.id.value(), serial))
    }
}
