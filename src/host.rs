use egui::{Rect, ViewportId};

use crate::dock_node::{DockNodeId, DockPosition, Icon};
use crate::geometry::Screen;

/// The container that arranges docked nodes relative to each other.
///
/// A [`crate::DockNode`] never inspects the host; it only asks it to place or remove a node by id.
/// Nodes keep a weak reference, so a host may be dropped or replaced at any time.
pub trait LayoutHost {
    /// Place `node` at `position`, relative to `sibling` if given.
    fn dock(&mut self, node: DockNodeId, position: DockPosition, sibling: Option<DockNodeId>);

    /// Place `node` at `position` relative to the whole layout.
    fn dock_at(&mut self, node: DockNodeId, position: DockPosition) {
        self.dock(node, position, None);
    }

    /// Remove `node` from the layout. Must tolerate nodes that are not docked.
    fn undock(&mut self, node: DockNodeId);

    /// The native window showing this host, if it is on screen.
    fn owner_window(&self) -> Option<ViewportId>;

    /// Location of the stylesheet every window of this layout should share.
    fn default_stylesheet(&self) -> Option<String>;

    /// Make sure the default stylesheet is installed on the host's own scene.
    fn ensure_default_stylesheet(&mut self);
}

/// Read-only view of the native windowing environment.
pub trait Desktop {
    /// Outer rectangle of a native window, in global (desktop) coordinates.
    fn outer_rect(&self, window: ViewportId) -> Option<Rect>;

    /// Content rectangle of a native window, without OS decorations. Unknown by default.
    fn inner_rect(&self, _window: ViewportId) -> Option<Rect> {
        None
    }

    /// The window that owns `window` (its parent), if any.
    fn owner_of(&self, window: ViewportId) -> Option<ViewportId>;

    /// All monitors.
    fn screens(&self) -> Vec<Screen>;
}

/// A desktop with no windows and no screens.
///
/// Nodes built with this still dock and float; maximize only toggles the native flag.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDesktop;

impl Desktop for NoDesktop {
    fn outer_rect(&self, _window: ViewportId) -> Option<Rect> {
        None
    }

    fn owner_of(&self, _window: ViewportId) -> Option<ViewportId> {
        None
    }

    fn screens(&self) -> Vec<Screen> {
        Vec::new()
    }
}

/// Supplies bundled assets so the node itself never loads resources.
pub trait AssetProvider {
    fn default_icon(&self) -> Icon;
}

/// The assets shipped with this crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinAssets;

impl BuiltinAssets {
    pub const DOCK_NODE_ICON_URI: &'static str = "bytes://egui_dock_node/dock_node.png";
}

impl AssetProvider for BuiltinAssets {
    fn default_icon(&self) -> Icon {
        Icon::from_uri(Self::DOCK_NODE_ICON_URI)
    }
}
