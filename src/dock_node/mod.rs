use std::cell::RefCell;
use std::rc::{Rc, Weak};

use egui::ViewportId;

use crate::host::{AssetProvider, Desktop, LayoutHost};

mod caption;
mod error;
mod floating;
mod maximize;
mod options;
mod resize;
mod types;
mod window;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod floating_tests;

pub use caption::CaptionBar;
pub use error::DockError;
pub use options::{BorderStyle, DockNodeOptions, WindowStyle};
pub use resize::{ResizeEdges, ResizePhase};
pub use types::{
    DockFlag, DockNodeId, DockPosition, Icon, ListenerId, NodeBounds, NodeChild, PointerEvent,
    PointerEventKind, PropertyChange, StyleStates,
};
pub use window::{BorderPane, FloatingWindow, WindowRequest};

use resize::ResizeDrag;

/// Title every node starts with.
///
/// A node that keeps this title is taken to be the application's central panel and never gets a
/// caption bar.
pub const DEFAULT_TITLE: &str = "Dock";

/// Style class added to a node once it is initialized.
pub const DOCK_NODE_STYLE_CLASS: &str = "dock-node";

/// Message handed to the placeholder builder when loading contents fails.
pub const CONTENT_LOAD_FAILED: &str = "Could not load contents";

/// How nodes hold on to their layout host.
pub type SharedLayoutHost = Rc<RefCell<dyn LayoutHost>>;

type Listener = Box<dyn FnMut(&PropertyChange)>;

/// A panel that can be docked into a [`LayoutHost`], floated into its own native window, resized
/// from its border and maximized.
///
/// The node owns its `Pane` but never disposes of it: [`Self::close`] only undocks or un-floats, and
/// the pane can be taken back with [`Self::take_contents`].
///
/// Everything is driven from the UI thread: property setters, [`Self::handle_pointer_event`] and
/// [`Self::run_deferred`]. Native window changes are queued as [`WindowRequest`]s for the embedder.
pub struct DockNode<Pane> {
    id: DockNodeId,
    options: DockNodeOptions,
    desktop: Rc<dyn Desktop>,

    contents: Option<Pane>,
    title: String,
    icon: Icon,
    dock_position: Option<DockPosition>,
    layout_host: Option<Weak<RefCell<dyn LayoutHost>>>,
    caption_bar: Option<CaptionBar>,
    children: Vec<NodeChild>,
    style_classes: Vec<&'static str>,
    style_states: StyleStates,
    bounds: NodeBounds,

    floating: bool,
    docked: bool,
    maximized: bool,
    floatable: bool,
    closable: bool,
    resizable: bool,
    custom_caption_bar: bool,
    initialized: bool,

    window: Option<FloatingWindow>,
    next_window_serial: u64,
    resize: ResizeDrag,
    retired_requests: Vec<WindowRequest>,

    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
}

impl<Pane> std::fmt::Debug for DockNode<Pane> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockNode")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("dock_position", &self.dock_position)
            .field("floating", &self.floating)
            .field("docked", &self.docked)
            .field("maximized", &self.maximized)
            .field("initialized", &self.initialized)
            .field("window", &self.window.as_ref().map(FloatingWindow::id))
            .finish_non_exhaustive()
    }
}

impl<Pane> DockNode<Pane> {
    pub fn new(desktop: Rc<dyn Desktop>, assets: &dyn AssetProvider) -> Self {
        Self::new_with_options(desktop, assets, DockNodeOptions::default())
    }

    pub fn new_with_options(
        desktop: Rc<dyn Desktop>,
        assets: &dyn AssetProvider,
        options: DockNodeOptions,
    ) -> Self {
        Self {
            id: DockNodeId::allocate(),
            options,
            desktop,
            contents: None,
            title: DEFAULT_TITLE.to_owned(),
            icon: assets.default_icon(),
            dock_position: None,
            layout_host: None,
            caption_bar: None,
            children: Vec::new(),
            style_classes: Vec::new(),
            style_states: StyleStates::default(),
            bounds: NodeBounds::default(),
            floating: false,
            docked: false,
            maximized: false,
            floatable: true,
            closable: true,
            resizable: true,
            custom_caption_bar: true,
            initialized: false,
            window: None,
            next_window_serial: 1,
            resize: ResizeDrag::default(),
            retired_requests: Vec::new(),
            listeners: Vec::new(),
            next_listener_id: 1,
        }
    }

    pub fn id(&self) -> DockNodeId {
        self.id
    }

    pub fn options(&self) -> &DockNodeOptions {
        &self.options
    }

    // ------------------------------------------------------------------------
    // Content and caption

    pub fn contents(&self) -> Option<&Pane> {
        self.contents.as_ref()
    }

    pub fn contents_mut(&mut self) -> Option<&mut Pane> {
        self.contents.as_mut()
    }

    /// Replace the hosted content, returning the previous one to the caller.
    pub fn set_contents(&mut self, contents: Pane) -> Option<Pane> {
        let previous = self.contents.replace(contents);
        self.initialize_if_ready();
        previous
    }

    /// Hand the content back to the caller. The node stays in its current state.
    pub fn take_contents(&mut self) -> Option<Pane> {
        self.children.retain(|child| *child != NodeChild::Contents);
        self.contents.take()
    }

    /// Install contents produced by a fallible loader (e.g. a template).
    ///
    /// On failure the error is logged and `placeholder` builds a stand-in pane from
    /// [`CONTENT_LOAD_FAILED`]. Returns the previous contents.
    pub fn load_contents<E: std::fmt::Display>(
        &mut self,
        load: impl FnOnce() -> Result<Pane, E>,
        placeholder: impl FnOnce(&str) -> Pane,
    ) -> Option<Pane> {
        let pane = match load() {
            Ok(pane) => pane,
            Err(err) => {
                log::error!(
                    "dock node {:?}: {}",
                    self.id,
                    DockError::ContentLoad(err.to_string())
                );
                placeholder(CONTENT_LOAD_FAILED)
            }
        };
        self.set_contents(pane)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        if self.title != title {
            self.title.clone_from(&title);
            self.dispatch(PropertyChange::Title(title));
        }
        self.initialize_if_ready();
    }

    pub fn icon(&self) -> &Icon {
        &self.icon
    }

    pub fn set_icon(&mut self, icon: Icon) {
        if self.icon != icon {
            self.icon = icon.clone();
            self.dispatch(PropertyChange::Icon(icon));
        }
        self.initialize_if_ready();
    }

    pub fn caption_bar(&self) -> Option<&CaptionBar> {
        self.caption_bar.as_ref()
    }

    /// Swap the caption bar in place, add it as the first child, or remove it with `None`.
    pub fn set_caption_bar(&mut self, caption_bar: Option<CaptionBar>) {
        let had_bar = self.children.contains(&NodeChild::CaptionBar);
        match (&caption_bar, had_bar) {
            (Some(_), true) => {}
            (Some(_), false) => self.children.insert(0, NodeChild::CaptionBar),
            (None, _) => self.children.retain(|child| *child != NodeChild::CaptionBar),
        }
        self.caption_bar = caption_bar;
    }

    /// Layout children, top to bottom.
    pub fn children(&self) -> &[NodeChild] {
        &self.children
    }

    pub fn style_classes(&self) -> &[&'static str] {
        &self.style_classes
    }

    pub fn style_states(&self) -> StyleStates {
        self.style_states
    }

    // ------------------------------------------------------------------------
    // Layout bookkeeping

    /// Where the node currently sits on screen, as measured by the embedding UI.
    pub fn bounds(&self) -> NodeBounds {
        self.bounds
    }

    /// Call after each layout pass while docked, so floating opens at the right place.
    pub fn set_bounds(&mut self, bounds: NodeBounds) {
        self.bounds = bounds;
    }

    pub fn dock_position(&self) -> Option<DockPosition> {
        self.dock_position
    }

    pub fn set_dock_position(&mut self, position: DockPosition) {
        self.dock_position = Some(position);
        self.initialize_if_ready();
    }

    /// The host this node was last docked into or undocked from, if it is still alive.
    pub fn layout_host(&self) -> Option<SharedLayoutHost> {
        self.layout_host.as_ref()?.upgrade()
    }

    /// Attach to `host` without asking it to place the node. Un-floats first.
    pub fn set_layout_host(&mut self, host: &SharedLayoutHost) {
        if self.floating {
            self.set_floating(false, None);
        }
        self.layout_host = Some(Rc::downgrade(host));
        self.set_flag(DockFlag::Docked, true);
        self.initialize_if_ready();
    }

    // ------------------------------------------------------------------------
    // Flags

    pub fn flag(&self, flag: DockFlag) -> bool {
        match flag {
            DockFlag::Floating => self.floating,
            DockFlag::Docked => self.docked,
            DockFlag::Maximized => self.maximized,
            DockFlag::Floatable => self.floatable,
            DockFlag::Closable => self.closable,
            DockFlag::Resizable => self.resizable,
            DockFlag::CustomCaptionBar => self.custom_caption_bar,
            DockFlag::Initialized => self.initialized,
        }
    }

    pub fn is_floating(&self) -> bool {
        self.floating
    }

    pub fn is_docked(&self) -> bool {
        self.docked
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    pub fn is_floatable(&self) -> bool {
        self.floatable
    }

    pub fn is_closable(&self) -> bool {
        self.closable
    }

    pub fn is_resizable(&self) -> bool {
        self.resizable
    }

    pub fn uses_custom_caption_bar(&self) -> bool {
        self.custom_caption_bar
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Turning this off while floating docks the node back first.
    pub fn set_floatable(&mut self, floatable: bool) {
        if !floatable && self.floating {
            self.set_floating(false, None);
        }
        self.set_flag(DockFlag::Floatable, floatable);
    }

    pub fn set_closable(&mut self, closable: bool) {
        self.set_flag(DockFlag::Closable, closable);
    }

    pub fn set_resizable(&mut self, resizable: bool) {
        self.set_flag(DockFlag::Resizable, resizable);
    }

    /// Show our own caption bar while floating, instead of relying on native chrome.
    ///
    /// Docked nodes always show their caption bar, so this only has a visible effect while
    /// floating.
    pub fn set_use_custom_caption_bar(&mut self, enabled: bool) {
        if self.floating {
            self.show_caption_bar(enabled);
        }
        self.set_flag(DockFlag::CustomCaptionBar, enabled);
    }

    /// Chrome for the next floating window. Has no effect on a window that is already open.
    pub fn set_window_style(&mut self, style: WindowStyle) {
        self.options.window_style = style;
    }

    pub fn is_decorated(&self) -> bool {
        self.options.window_style.is_decorated()
    }

    // ------------------------------------------------------------------------
    // Docking

    /// Record `host` and `position`, then ask the host to place this node next to `sibling`.
    pub fn dock(
        &mut self,
        host: &SharedLayoutHost,
        position: DockPosition,
        sibling: Option<DockNodeId>,
    ) {
        self.set_layout_host(host);
        self.set_dock_position(position);
        if !self.initialized
            && let Err(err) = self.init_preconditions()
        {
            log::warn!("dock node {:?}: {err}", self.id);
        }

        let id = self.id;
        if let Err(err) = self.with_host(|host| host.dock(id, position, sibling)) {
            log::warn!("dock node {:?}: {err}", self.id);
        }
    }

    /// Ask `host` to place this node at its *stored* dock position.
    ///
    /// `_position` is not consulted and `host` is not recorded; use [`Self::dock`] to move a node
    /// somewhere new.
    pub fn dock_at(&mut self, host: &SharedLayoutHost, _position: DockPosition) {
        let Some(position) = self.dock_position else {
            log::warn!("dock node {:?}: {}", self.id, DockError::MissingDockPosition);
            return;
        };
        match host.try_borrow_mut() {
            Ok(mut host) => host.dock_at(self.id, position),
            Err(_busy) => log::warn!("dock node {:?}: {}", self.id, DockError::LayoutHostBusy),
        }
    }

    /// Detach from the layout host, if any. Always clears the docked flag.
    pub fn undock(&mut self) {
        if self.layout_host.is_some() {
            let id = self.id;
            if let Err(err) = self.with_host(|host| host.undock(id)) {
                log::warn!("dock node {:?}: {err}", self.id);
            }
        }
        self.set_flag(DockFlag::Docked, false);
    }

    /// Un-float if floating, otherwise undock if docked. Contents are kept.
    pub fn close(&mut self) {
        if self.floating {
            self.set_floating(false, None);
        } else if self.docked {
            self.undock();
        }
    }

    // ------------------------------------------------------------------------
    // Embedder plumbing

    /// The native window while floating.
    pub fn floating_window(&self) -> Option<&FloatingWindow> {
        self.window.as_ref()
    }

    /// Drain queued native window work, oldest first.
    pub fn take_window_requests(&mut self) -> Vec<WindowRequest> {
        let mut requests = std::mem::take(&mut self.retired_requests);
        if let Some(window) = &mut self.window {
            requests.extend(window.take_requests());
        }
        requests
    }

    /// Run work deferred until after the embedder's layout/style pass.
    pub fn run_deferred(&mut self) {
        if let Some(window) = &mut self.window {
            window.run_deferred(&self.options.border_style);
        }
    }

    /// Observe every property change. Listeners run after the node's own side effects.
    pub fn subscribe(&mut self, listener: impl FnMut(&PropertyChange) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id = self.next_listener_id.saturating_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    // ------------------------------------------------------------------------
    // Internals

    fn with_host<R>(&self, f: impl FnOnce(&mut dyn LayoutHost) -> R) -> Result<R, DockError> {
        let host = self
            .layout_host
            .as_ref()
            .ok_or(DockError::MissingLayoutHost)?
            .upgrade()
            .ok_or(DockError::LayoutHostDropped)?;
        let mut guard = host.try_borrow_mut().map_err(|_busy| DockError::LayoutHostBusy)?;
        Ok(f(&mut *guard))
    }

    fn host_owner_window(&self) -> Option<ViewportId> {
        let host = self.layout_host.as_ref()?.upgrade()?;
        let guard = host.try_borrow().ok()?;
        guard.owner_window()
    }

    fn init_preconditions(&self) -> Result<(), DockError> {
        if self.contents.is_none() {
            return Err(DockError::MissingContents);
        }
        if self.dock_position.is_none() {
            return Err(DockError::MissingDockPosition);
        }
        let host = self.layout_host.as_ref().ok_or(DockError::MissingLayoutHost)?;
        if host.strong_count() == 0 {
            return Err(DockError::LayoutHostDropped);
        }
        Ok(())
    }

    /// One-time initialization, once contents, dock position and a live host have all been
    /// supplied. Stays armed until the host has actually placed the node.
    fn initialize_if_ready(&mut self) {
        if self.initialized {
            return;
        }
        if let Err(err) = self.init_preconditions() {
            log::trace!("dock node {:?} not ready: {err}", self.id);
            return;
        }
        match self.initialize() {
            Ok(()) => self.set_flag(DockFlag::Initialized, true),
            Err(err) => log::warn!("dock node {:?}: {err}", self.id),
        }
    }

    fn initialize(&mut self) -> Result<(), DockError> {
        let position = self.dock_position.ok_or(DockError::MissingDockPosition)?;

        if self.title == DEFAULT_TITLE {
            log::warn!(
                "dock node {:?} keeps the default title {DEFAULT_TITLE:?}; treating it as the central panel, no caption bar",
                self.id
            );
        } else if self.caption_bar.is_none() {
            self.caption_bar = Some(CaptionBar::new(self.id, &self.title, self.icon.clone()));
        }

        self.children.clear();
        if self.caption_bar.is_some() {
            self.children.push(NodeChild::CaptionBar);
        }
        self.children.push(NodeChild::Contents);
        if !self.style_classes.contains(&DOCK_NODE_STYLE_CLASS) {
            self.style_classes.push(DOCK_NODE_STYLE_CLASS);
        }

        let id = self.id;
        self.with_host(|host| {
            host.dock_at(id, position);
            host.ensure_default_stylesheet();
        })?;
        log::debug!("dock node {id:?} initialized at {position:?}");
        Ok(())
    }

    fn show_caption_bar(&mut self, shown: bool) {
        match &mut self.caption_bar {
            Some(bar) => bar.set_shown(shown),
            None => log::warn!(
                "dock node {:?}: {}",
                self.id,
                DockError::MissingCaptionBar {
                    title: self.title.clone()
                }
            ),
        }
    }

    fn border_states(&self) -> StyleStates {
        StyleStates {
            floating: self.floating,
            docked: false,
            maximized: self.maximized,
        }
    }

    pub(super) fn set_flag(&mut self, flag: DockFlag, value: bool) {
        let slot = match flag {
            DockFlag::Floating => &mut self.floating,
            DockFlag::Docked => &mut self.docked,
            DockFlag::Maximized => &mut self.maximized,
            DockFlag::Floatable => &mut self.floatable,
            DockFlag::Closable => &mut self.closable,
            DockFlag::Resizable => &mut self.resizable,
            DockFlag::CustomCaptionBar => &mut self.custom_caption_bar,
            DockFlag::Initialized => &mut self.initialized,
        };
        if *slot == value {
            return;
        }
        *slot = value;
        self.dispatch(PropertyChange::Flag { flag, value });
    }

    /// Side effects of a property change, always in this order.
    fn dispatch(&mut self, change: PropertyChange) {
        self.sync_style_states(&change);
        self.sync_caption_bar(&change);
        self.sync_window(&change);
        for (_, listener) in &mut self.listeners {
            listener(&change);
        }
    }

    fn sync_style_states(&mut self, change: &PropertyChange) {
        let PropertyChange::Flag { flag, value } = *change else {
            return;
        };
        match flag {
            DockFlag::Floating => self.style_states.floating = value,
            DockFlag::Docked => self.style_states.docked = value,
            DockFlag::Maximized => self.style_states.maximized = value,
            _ => return,
        }

        let border_states = self.border_states();
        if let Some(window) = &mut self.window {
            let border = window.border_mut();
            border.set_states(border_states);
            border.apply_style(&self.options.border_style);
        }
        log::debug!(
            "dock node {:?} style {}",
            self.id,
            self.style_states.describe()
        );
    }

    fn sync_caption_bar(&mut self, change: &PropertyChange) {
        let Some(bar) = &mut self.caption_bar else {
            return;
        };
        match change {
            PropertyChange::Flag {
                flag: DockFlag::Docked,
                value: true,
            } => bar.set_shown(true),
            PropertyChange::Title(title) => bar.set_title(title),
            PropertyChange::Icon(icon) => bar.set_icon(icon),
            PropertyChange::Flag { .. } => {}
        }
    }

    fn sync_window(&mut self, change: &PropertyChange) {
        match change {
            PropertyChange::Flag {
                flag: DockFlag::Maximized,
                value,
            } => self.apply_maximized(*value),
            PropertyChange::Flag {
                flag: DockFlag::Resizable,
                value,
            } => self.apply_resizable(*value),
            PropertyChange::Title(title) => {
                if let Some(window) = &mut self.window {
                    window.set_title(title);
                }
            }
            PropertyChange::Flag { .. } | PropertyChange::Icon(_) => {}
        }
    }
}
