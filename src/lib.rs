//! A single dockable panel for egui applications: dock it into a layout, tear it off into its own
//! native window, resize that window from its border and maximize it.
//!
//! The layout itself (splits, tabs, drop zones) belongs to a [`LayoutHost`]. This crate owns the
//! per-panel state machine and the window geometry math.
#![forbid(unsafe_code)]

pub mod backend_hints;
pub mod dock_node;
pub mod geometry;
pub mod host;

pub use backend_hints::{
    BACKEND_MONITORS_OUTER_RECTS_POINTS_KEY, BACKEND_MONITORS_WORK_AREAS_POINTS_KEY,
    backend_screens, clear_backend_monitors_points, set_backend_monitors_outer_rects_points,
    set_backend_monitors_work_areas_points,
};
pub use dock_node::{
    BorderPane, BorderStyle, CaptionBar, DEFAULT_TITLE, DockError, DockFlag, DockNode, DockNodeId,
    DockNodeOptions, DockPosition, FloatingWindow, Icon, ListenerId, NodeBounds, NodeChild, PointerEvent,
    PointerEventKind, PropertyChange, ResizeEdges, ResizePhase, SharedLayoutHost, StyleStates,
    WindowRequest, WindowStyle,
};
pub use geometry::{Insets, Screen};
pub use host::{AssetProvider, BuiltinAssets, Desktop, LayoutHost, NoDesktop};
