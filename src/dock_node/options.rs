use crate::geometry::Insets;

use super::types::StyleStates;

/// Native decoration mode of a floating window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum WindowStyle {
    /// OS title bar and borders.
    Decorated,

    /// No OS chrome, opaque background.
    Undecorated,

    /// No OS chrome and no background: only the styled border and the node are painted.
    #[default]
    Transparent,

    /// OS chrome in the platform's tool-window flavor.
    Utility,

    /// OS chrome merged with the client area where the platform supports it.
    Unified,
}

impl WindowStyle {
    /// Whether the OS draws a title bar and borders around the window.
    pub fn is_decorated(self) -> bool {
        !matches!(self, Self::Transparent | Self::Undecorated)
    }
}

/// Padding of the border wrapper that hosts a floating node.
///
/// The padding leaves room for a drop shadow. The float engine subtracts it when placing the
/// window so the node appears exactly where it was docked.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BorderStyle {
    /// Padding while floating.
    pub floating: Insets,

    /// Padding while floating and maximized. Usually zero: a maximized window has no shadow.
    pub maximized: Insets,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            floating: Insets::same(3.0),
            maximized: Insets::ZERO,
        }
    }
}

impl BorderStyle {
    /// Resolve the padding for the given pseudo-class states.
    pub fn insets_for(&self, states: StyleStates) -> Insets {
        if states.maximized {
            self.maximized
        } else if states.floating {
            self.floating
        } else {
            Insets::ZERO
        }
    }
}

/// Options for [`super::DockNode`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DockNodeOptions {
    /// Chrome of the window created when the node floats.
    ///
    /// Read when the window is created, so changing it has no effect on a node that is already
    /// floating.
    pub window_style: WindowStyle,

    /// Border wrapper padding.
    pub border_style: BorderStyle,
}
