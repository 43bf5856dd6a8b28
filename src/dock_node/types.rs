use std::sync::atomic::{AtomicU64, Ordering};

use egui::{Pos2, Vec2};
use itertools::Itertools as _;

/// Process-unique identity of a [`super::DockNode`].
///
/// Layout hosts refer to nodes by this id only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DockNodeId(u64);

impl DockNodeId {
    pub(super) fn allocate() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Where a node goes relative to its sibling (or to the whole layout).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DockPosition {
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

/// A small decorative image shown next to the caption title.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Icon {
    uri: String,
}

impl Icon {
    pub fn from_uri(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    /// Suitable for `egui::Image::from_uri`.
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// The boolean state of a node. Every flag is observable through [`PropertyChange`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DockFlag {
    Floating,
    Docked,
    Maximized,
    Floatable,
    Closable,
    Resizable,
    CustomCaptionBar,
    Initialized,
}

/// A property of a node changed value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyChange {
    Flag { flag: DockFlag, value: bool },
    Title(String),
    Icon(Icon),
}

/// Handle returned by [`super::DockNode::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(super) u64);

/// The node's layout as last reported by the embedding UI.
///
/// The float engine reads this to open the floating window exactly where the node was docked.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeBounds {
    /// Top-left corner relative to the owning window's content area.
    pub scene_origin: Pos2,

    /// Top-left corner in global (desktop) coordinates.
    pub screen_origin: Pos2,

    /// Current size.
    pub size: Vec2,

    /// Natural minimum size of the content.
    pub min_size: Vec2,
}

/// Layout children of a node, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeChild {
    CaptionBar,
    Contents,
}

/// CSS-like pseudo-class states, applied to the node and its floating border.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StyleStates {
    pub floating: bool,
    pub docked: bool,
    pub maximized: bool,
}

impl StyleStates {
    pub const FLOATING: &'static str = "floating";
    pub const DOCKED: &'static str = "docked";
    pub const MAXIMIZED: &'static str = "maximized";

    pub fn active(&self) -> impl Iterator<Item = &'static str> + '_ {
        [
            (self.floating, Self::FLOATING),
            (self.docked, Self::DOCKED),
            (self.maximized, Self::MAXIMIZED),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
    }

    /// Active states as `:floating:maximized`, for logs.
    pub fn describe(&self) -> String {
        let s = self.active().map(|name| format!(":{name}")).join("");
        if s.is_empty() { "(none)".to_owned() } else { s }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Pressed,
    Moved,
    Dragged,
    Released,
}

impl PointerEventKind {
    pub const ALL: [Self; 4] = [Self::Pressed, Self::Moved, Self::Dragged, Self::Released];
}

/// A pointer event delivered to a floating window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,

    /// Global (desktop) position.
    pub screen_pos: Pos2,

    /// Position relative to the window's content area.
    pub local_pos: Pos2,

    consumed: bool,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, screen_pos: Pos2, local_pos: Pos2) -> Self {
        Self {
            kind,
            screen_pos,
            local_pos,
            consumed: false,
        }
    }

    /// Stop other handlers (e.g. the caption bar) from reacting to this event.
    pub fn consume(&mut self) {
        self.consumed = true;
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}
