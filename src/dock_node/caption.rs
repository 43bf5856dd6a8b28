use super::types::{DockNodeId, Icon};

/// The draggable header of a node.
///
/// Rendering and the drag-to-undock gesture live with the embedding UI. The node only drives
/// visibility and keeps the displayed title and icon in sync.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionBar {
    owner: DockNodeId,
    title: String,
    icon: Icon,
    visible: bool,
    managed: bool,
}

impl CaptionBar {
    pub fn new(owner: DockNodeId, title: impl Into<String>, icon: Icon) -> Self {
        Self {
            owner,
            title: title.into(),
            icon,
            visible: true,
            managed: true,
        }
    }

    /// The node this bar belongs to.
    pub fn owner(&self) -> DockNodeId {
        self.owner
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn icon(&self) -> &Icon {
        &self.icon
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the bar takes part in layout (takes up space).
    pub fn is_managed(&self) -> bool {
        self.managed
    }

    /// Show and lay out, or hide and collapse.
    pub(super) fn set_shown(&mut self, shown: bool) {
        self.visible = shown;
        self.managed = shown;
    }

    pub(super) fn set_title(&mut self, title: &str) {
        title.clone_into(&mut self.title);
    }

    pub(super) fn set_icon(&mut self, icon: &Icon) {
        self.icon = icon.clone();
    }
}
