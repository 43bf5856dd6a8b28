use std::cell::RefCell;
use std::rc::Rc;

use egui::{Pos2, Rect, Vec2, ViewportCommand, ViewportId, pos2, vec2};

use crate::geometry::{Insets, Screen};
use crate::host::{BuiltinAssets, Desktop, LayoutHost};

use super::{
    BorderStyle, DockNode, DockNodeId, DockNodeOptions, DockPosition, NodeBounds, SharedLayoutHost,
    WindowRequest, WindowStyle,
};

pub(super) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum HostCall {
    Dock(DockNodeId, DockPosition, Option<DockNodeId>),
    DockAt(DockNodeId, DockPosition),
    Undock(DockNodeId),
}

#[derive(Debug, Default)]
pub(super) struct FakeHost {
    pub(super) calls: Vec<HostCall>,
    pub(super) owner: Option<ViewportId>,
    pub(super) stylesheet: Option<String>,
    pub(super) stylesheet_ensured: usize,
}

impl FakeHost {
    pub(super) fn shared() -> (Rc<RefCell<Self>>, SharedLayoutHost) {
        Self::shared_with(Self::default())
    }

    pub(super) fn shared_with(host: Self) -> (Rc<RefCell<Self>>, SharedLayoutHost) {
        let host = Rc::new(RefCell::new(host));
        let shared: SharedLayoutHost = host.clone();
        (host, shared)
    }
}

impl LayoutHost for FakeHost {
    fn dock(&mut self, node: DockNodeId, position: DockPosition, sibling: Option<DockNodeId>) {
        self.calls.push(HostCall::Dock(node, position, sibling));
    }

    fn dock_at(&mut self, node: DockNodeId, position: DockPosition) {
        self.calls.push(HostCall::DockAt(node, position));
    }

    fn undock(&mut self, node: DockNodeId) {
        self.calls.push(HostCall::Undock(node));
    }

    fn owner_window(&self) -> Option<ViewportId> {
        self.owner
    }

    fn default_stylesheet(&self) -> Option<String> {
        self.stylesheet.clone()
    }

    fn ensure_default_stylesheet(&mut self) {
        self.stylesheet_ensured += 1;
    }
}

#[derive(Debug, Default)]
pub(super) struct FakeDesktop {
    pub(super) windows: egui::ViewportIdMap<(Rect, Option<ViewportId>)>,
    pub(super) screens: Vec<Screen>,

    /// Outer and inner rects the backend reported for windows opened by a node.
    pub(super) frames: RefCell<egui::ViewportIdMap<(Rect, Rect)>>,
}

impl FakeDesktop {
    pub(super) fn with_window(mut self, id: ViewportId, rect: Rect, owner: Option<ViewportId>) -> Self {
        self.windows.insert(id, (rect, owner));
        self
    }

    pub(super) fn with_screen(mut self, screen: Screen) -> Self {
        self.screens.push(screen);
        self
    }

    pub(super) fn report_frame(&self, id: ViewportId, outer: Rect, inner: Rect) {
        self.frames.borrow_mut().insert(id, (outer, inner));
    }
}

impl Desktop for FakeDesktop {
    fn outer_rect(&self, window: ViewportId) -> Option<Rect> {
        self.windows
            .get(&window)
            .map(|(rect, _)| *rect)
            .or_else(|| self.frames.borrow().get(&window).map(|(outer, _)| *outer))
    }

    fn inner_rect(&self, window: ViewportId) -> Option<Rect> {
        self.frames.borrow().get(&window).map(|(_, inner)| *inner)
    }

    fn owner_of(&self, window: ViewportId) -> Option<ViewportId> {
        self.windows.get(&window).and_then(|(_, owner)| *owner)
    }

    fn screens(&self) -> Vec<Screen> {
        self.screens.clone()
    }
}

/// The main window of the fake application.
pub(super) fn main_window_rect() -> Rect {
    Rect::from_min_size(pos2(100.0, 80.0), vec2(1200.0, 800.0))
}

pub(super) fn desktop() -> FakeDesktop {
    FakeDesktop::default()
        .with_window(ViewportId::ROOT, main_window_rect(), None)
        .with_screen(
            Screen::new(Rect::from_min_size(Pos2::ZERO, vec2(1920.0, 1080.0)))
                .with_visual_bounds(Rect::from_min_size(Pos2::ZERO, vec2(1920.0, 1040.0))),
        )
}

pub(super) fn options(window_style: WindowStyle, padding: f32) -> DockNodeOptions {
    DockNodeOptions {
        window_style,
        border_style: BorderStyle {
            floating: Insets::same(padding),
            maximized: Insets::ZERO,
        },
    }
}

pub(super) fn node_with(desktop: FakeDesktop, options: DockNodeOptions) -> DockNode<String> {
    node_on(&Rc::new(desktop), options)
}

/// Like [`node_with`], keeping a handle on the desktop to report window frames later.
pub(super) fn node_on(desktop: &Rc<FakeDesktop>, options: DockNodeOptions) -> DockNode<String> {
    DockNode::new_with_options(desktop.clone(), &BuiltinAssets, options)
}

pub(super) fn bare_node() -> DockNode<String> {
    node_with(desktop(), DockNodeOptions::default())
}

/// A titled node, docked into a fresh host owned by the root window.
pub(super) fn docked_node(
    desktop: FakeDesktop,
    options: DockNodeOptions,
) -> (DockNode<String>, Rc<RefCell<FakeHost>>, SharedLayoutHost) {
    let (host, shared) = FakeHost::shared_with(FakeHost {
        owner: Some(ViewportId::ROOT),
        stylesheet: Some("dock.css".to_owned()),
        ..Default::default()
    });
    let mut node = node_with(desktop, options);
    node.set_title("Console");
    node.set_contents("console".to_owned());
    node.dock(&shared, DockPosition::Bottom, None);
    host.borrow_mut().calls.clear();
    (node, host, shared)
}

pub(super) fn bounds(screen_origin: Pos2, size: Vec2, min_size: Vec2) -> NodeBounds {
    NodeBounds {
        scene_origin: pos2(10.0, 20.0),
        screen_origin,
        size,
        min_size,
    }
}

pub(super) fn commands(requests: &[WindowRequest]) -> Vec<&ViewportCommand> {
    requests
        .iter()
        .filter_map(|request| match request {
            WindowRequest::Command { command, .. } => Some(command),
            _ => None,
        })
        .collect()
}
