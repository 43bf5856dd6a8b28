use egui::{CursorIcon, Pos2, Rect, Vec2, ViewportBuilder, ViewportCommand, ViewportId};

use crate::geometry::Insets;

use super::options::{BorderStyle, WindowStyle};
use super::types::{PointerEventKind, StyleStates};

/// Something the embedder must do to the native window backing a floating node.
///
/// Drained with [`super::DockNode::take_window_requests`] and replayed in order, typically via
/// `ctx.show_viewport_immediate` for [`Self::Open`] and `ctx.send_viewport_cmd_to` for
/// [`Self::Command`].
#[derive(Clone, Debug)]
pub enum WindowRequest {
    Open {
        window: ViewportId,
        owner: Option<ViewportId>,
        builder: ViewportBuilder,
    },
    Command {
        window: ViewportId,
        command: ViewportCommand,
    },

    /// Start forwarding pointer events of this kind to [`super::DockNode::handle_pointer_event`].
    SubscribePointer {
        window: ViewportId,
        kind: PointerEventKind,
    },

    /// Stop forwarding pointer events of this kind.
    UnsubscribePointer {
        window: ViewportId,
        kind: PointerEventKind,
    },
}

/// The styled wrapper a floating node sits in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BorderPane {
    states: StyleStates,
    padding: Insets,
    pref_size: Vec2,
}

impl BorderPane {
    pub const STYLE_CLASS: &'static str = "dock-node-border";

    pub fn states(&self) -> StyleStates {
        self.states
    }

    /// Padding resolved by the last style pass.
    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn pref_size(&self) -> Vec2 {
        self.pref_size
    }

    pub(super) fn set_states(&mut self, states: StyleStates) {
        self.states = states;
    }

    pub(super) fn set_pref_size(&mut self, size: Vec2) {
        self.pref_size = size;
    }

    /// Resolve padding from the current pseudo-class states.
    pub(super) fn apply_style(&mut self, style: &BorderStyle) {
        self.padding = style.insets_for(self.states);
    }
}

/// The top-level window hosting a floating node.
///
/// Exists only while the node floats. Geometry lives here as the source of truth; every change made
/// after the window is shown is also queued as a [`WindowRequest`].
#[derive(Debug)]
pub struct FloatingWindow {
    id: ViewportId,
    owner: Option<ViewportId>,
    style: WindowStyle,
    title: String,
    rect: Rect,
    min_size: Vec2,
    border: BorderPane,
    background_cleared: bool,
    resizable: bool,
    native_maximized: bool,
    shown: bool,
    cursor: CursorIcon,
    stylesheets: Vec<String>,
    deferred_stylesheet: Option<String>,
    pointer_filters: ahash::HashSet<PointerEventKind>,
    outbox: Vec<WindowRequest>,
}

impl FloatingWindow {
    pub(super) fn new(
        id: ViewportId,
        owner: Option<ViewportId>,
        style: WindowStyle,
        title: &str,
    ) -> Self {
        Self {
            id,
            owner,
            style,
            title: title.to_owned(),
            rect: Rect::ZERO,
            min_size: Vec2::ZERO,
            border: BorderPane::default(),
            background_cleared: false,
            resizable: true,
            native_maximized: false,
            shown: false,
            cursor: CursorIcon::Default,
            stylesheets: Vec::new(),
            deferred_stylesheet: None,
            pointer_filters: Default::default(),
            outbox: Vec::new(),
        }
    }

    pub fn id(&self) -> ViewportId {
        self.id
    }

    pub fn owner(&self) -> Option<ViewportId> {
        self.owner
    }

    pub fn style(&self) -> WindowStyle {
        self.style
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Outer position (global coordinates) and inner size of the window.
    ///
    /// `min` is what [`ViewportCommand::OuterPosition`] receives and `size()` what
    /// [`ViewportCommand::InnerSize`] receives. For decorated styles the native window is larger
    /// than this by its title bar and borders.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn min_size(&self) -> Vec2 {
        self.min_size
    }

    pub fn border(&self) -> &BorderPane {
        &self.border
    }

    pub fn is_background_cleared(&self) -> bool {
        self.background_cleared
    }

    pub fn is_resizable(&self) -> bool {
        self.resizable
    }

    /// The OS-level maximized flag.
    pub fn is_native_maximized(&self) -> bool {
        self.native_maximized
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Resize affordance to show while the pointer is over this window.
    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    pub fn has_pending_stylesheet(&self) -> bool {
        self.deferred_stylesheet.is_some()
    }

    pub fn is_subscribed(&self, kind: PointerEventKind) -> bool {
        self.pointer_filters.contains(&kind)
    }

    fn command(&mut self, command: ViewportCommand) {
        if self.shown {
            self.outbox.push(WindowRequest::Command {
                window: self.id,
                command,
            });
        }
    }

    pub(super) fn border_mut(&mut self) -> &mut BorderPane {
        &mut self.border
    }

    pub(super) fn set_title(&mut self, title: &str) {
        if self.title != title {
            title.clone_into(&mut self.title);
            self.command(ViewportCommand::Title(self.title.clone()));
        }
    }

    pub(super) fn set_position(&mut self, pos: Pos2) {
        self.rect = Rect::from_min_size(pos, self.rect.size());
        self.command(ViewportCommand::OuterPosition(pos));
    }

    pub(super) fn set_size(&mut self, size: Vec2) {
        self.rect = Rect::from_min_size(self.rect.min, size);
        self.command(ViewportCommand::InnerSize(size));
    }

    pub(super) fn set_rect(&mut self, rect: Rect) {
        self.set_position(rect.min);
        self.set_size(rect.size());
    }

    pub(super) fn set_min_size(&mut self, size: Vec2) {
        self.min_size = size;
        self.command(ViewportCommand::MinInnerSize(size));
    }

    pub(super) fn set_resizable(&mut self, resizable: bool) {
        self.resizable = resizable;
        self.command(ViewportCommand::Resizable(resizable));
    }

    pub(super) fn clear_background(&mut self) {
        self.background_cleared = true;
        self.command(ViewportCommand::Transparent(true));
    }

    pub(super) fn set_native_maximized(&mut self, maximized: bool) {
        self.native_maximized = maximized;
        self.command(ViewportCommand::Maximized(maximized));
    }

    pub(super) fn set_cursor(&mut self, cursor: CursorIcon) {
        self.cursor = cursor;
    }

    pub(super) fn subscribe_pointer(&mut self, kind: PointerEventKind) {
        if self.pointer_filters.insert(kind) {
            self.outbox.push(WindowRequest::SubscribePointer {
                window: self.id,
                kind,
            });
        }
    }

    pub(super) fn unsubscribe_pointer(&mut self, kind: PointerEventKind) {
        if self.pointer_filters.remove(&kind) {
            self.outbox.push(WindowRequest::UnsubscribePointer {
                window: self.id,
                kind,
            });
        }
    }

    /// Queue the default stylesheet; applied by [`Self::run_deferred`].
    pub(super) fn defer_stylesheet(&mut self, stylesheet: Option<String>) {
        self.deferred_stylesheet = stylesheet;
    }

    /// Install the deferred stylesheet (once) and redo the border style pass.
    pub(super) fn run_deferred(&mut self, style: &BorderStyle) {
        if let Some(sheet) = self.deferred_stylesheet.take()
            && !self.stylesheets.contains(&sheet)
        {
            self.stylesheets.push(sheet);
        }
        self.border.apply_style(style);
    }

    /// Fit the window to the border wrapper's preferred size, without OS border padding.
    pub(super) fn size_to_scene(&mut self) {
        let size = self.border.pref_size();
        self.set_size(size);
    }

    pub(super) fn show(&mut self) {
        if self.shown {
            return;
        }
        let builder = ViewportBuilder::default()
            .with_title(self.title.clone())
            .with_position(self.rect.min)
            .with_inner_size(self.rect.size())
            .with_min_inner_size(self.min_size)
            .with_decorations(self.style.is_decorated())
            .with_transparent(self.background_cleared)
            .with_resizable(self.resizable);
        self.outbox.push(WindowRequest::Open {
            window: self.id,
            owner: self.owner,
            builder,
        });
        self.shown = true;
    }

    /// Drop pointer filters first, then close.
    pub(super) fn close(&mut self) {
        for kind in PointerEventKind::ALL {
            self.unsubscribe_pointer(kind);
        }
        if self.shown {
            self.outbox.push(WindowRequest::Command {
                window: self.id,
                command: ViewportCommand::Close,
            });
            self.shown = false;
        }
    }

    pub(super) fn take_requests(&mut self) -> Vec<WindowRequest> {
        std::mem::take(&mut self.outbox)
    }
}
