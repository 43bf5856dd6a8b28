use std::cell::RefCell;
use std::rc::Rc;

use egui::{Pos2, ViewportCommand, pos2, vec2};

use super::test_support::{
    FakeHost, HostCall, bounds, commands, desktop, docked_node, init_logger, node_with, options,
};
use super::{
    DockFlag, DockNode, DockPosition, PointerEventKind, PropertyChange, WindowRequest, WindowStyle,
};
use crate::geometry::Insets;

/// Content at (203, 53), 294x194 (min 244x94).
fn floatable_node(style: WindowStyle) -> (DockNode<String>, Rc<RefCell<FakeHost>>) {
    init_logger();
    let (mut node, host, _shared) = docked_node(desktop(), options(style, 3.0));
    node.set_bounds(bounds(
        pos2(203.0, 53.0),
        vec2(294.0, 194.0),
        vec2(244.0, 94.0),
    ));
    (node, host)
}

fn open_position(requests: &[WindowRequest]) -> Option<Pos2> {
    requests.iter().find_map(|request| match request {
        WindowRequest::Open { builder, .. } => builder.position,
        _ => None,
    })
}

#[test]
fn floating_from_docked_places_content_where_it_was() {
    let (mut node, host) = floatable_node(WindowStyle::Transparent);

    node.set_floating(true, None);

    assert!(node.is_floating());
    assert!(!node.is_docked());
    assert_eq!(host.borrow().calls, vec![HostCall::Undock(node.id())]);

    let window = node.floating_window().unwrap();
    assert_eq!(window.border().padding(), Insets::same(3.0));
    assert_eq!(window.rect().min, pos2(200.0, 50.0));
    assert_eq!(window.rect().size(), vec2(300.0, 200.0));
    assert_eq!(window.min_size(), vec2(250.0, 100.0));
    assert!(window.is_background_cleared());
    assert!(window.is_resizable());
    assert!(window.is_shown());
    for kind in PointerEventKind::ALL {
        assert!(window.is_subscribed(kind), "{kind:?}");
    }

    let requests = node.take_window_requests();
    let subscribed = requests
        .iter()
        .filter(|request| matches!(request, WindowRequest::SubscribePointer { .. }))
        .count();
    assert_eq!(subscribed, 4);

    let Some(WindowRequest::Open {
        owner, builder, ..
    }) = requests.last()
    else {
        panic!("expected the window to open last, got {requests:?}");
    };
    assert_eq!(*owner, Some(egui::ViewportId::ROOT));
    assert_eq!(builder.position, Some(pos2(200.0, 50.0)));
    assert_eq!(builder.inner_size, Some(vec2(300.0, 200.0)));
    assert_eq!(builder.min_inner_size, Some(vec2(250.0, 100.0)));
    assert_eq!(builder.decorations, Some(false));
    assert_eq!(builder.transparent, Some(true));
    assert_eq!(builder.title.as_deref(), Some("Console"));

    // Geometry set before the window opened is carried by the builder, not by commands.
    assert!(commands(&requests).is_empty());
}

#[test]
fn floating_updates_style_states() {
    let (mut node, _host) = floatable_node(WindowStyle::Transparent);
    node.set_floating(true, None);

    let states = node.style_states();
    assert!(states.floating && !states.docked && !states.maximized);
    assert_eq!(states.describe(), ":floating");
}

#[test]
fn decorated_window_follows_the_owner_window() {
    let (mut node, _host) = floatable_node(WindowStyle::Decorated);

    node.set_floating(true, Some(vec2(5.0, 5.0)));

    // Owner at (100, 80) + scene origin (10, 20) + offset (5, 5) - padding 3.
    let window = node.floating_window().unwrap();
    assert_eq!(window.rect().min, pos2(112.0, 102.0));
    assert!(!window.is_background_cleared());
    assert_eq!(
        open_position(&node.take_window_requests()),
        Some(pos2(112.0, 102.0))
    );
}

#[test]
fn decorated_window_without_owner_uses_screen_origin() {
    let (host, shared) = FakeHost::shared();
    let mut node = node_with(desktop(), options(WindowStyle::Utility, 3.0));
    node.set_title("Console");
    node.set_contents("console".to_owned());
    node.dock(&shared, DockPosition::Bottom, None);
    node.set_bounds(bounds(
        pos2(203.0, 53.0),
        vec2(294.0, 194.0),
        vec2(244.0, 94.0),
    ));
    assert!(host.borrow().owner.is_none());

    node.set_floating(true, None);

    let window = node.floating_window().unwrap();
    assert_eq!(window.owner(), None);
    assert_eq!(window.rect().min, pos2(200.0, 50.0));
}

#[test]
fn undecorated_window_applies_offset_to_screen_origin() {
    let (mut node, _host) = floatable_node(WindowStyle::Undecorated);

    node.set_floating(true, Some(vec2(-20.0, 7.0)));

    let window = node.floating_window().unwrap();
    assert_eq!(window.rect().min, pos2(180.0, 57.0));
    assert!(!window.is_background_cleared());
}

#[test]
fn unfloating_unsubscribes_before_closing() {
    let (mut node, _host) = floatable_node(WindowStyle::Transparent);
    node.set_floating(true, None);
    let window_id = node.floating_window().unwrap().id();
    node.take_window_requests();

    node.set_floating(false, None);

    assert!(!node.is_floating());
    assert!(node.floating_window().is_none());
    assert_eq!(node.contents().map(String::as_str), Some("console"));

    let requests = node.take_window_requests();
    assert_eq!(requests.len(), 5, "{requests:?}");
    for request in &requests[..4] {
        assert!(
            matches!(request, WindowRequest::UnsubscribePointer { window, .. } if *window == window_id),
            "{request:?}"
        );
    }
    assert!(matches!(
        &requests[4],
        WindowRequest::Command { window, command: ViewportCommand::Close } if *window == window_id
    ));
    assert!(node.take_window_requests().is_empty());
}

#[test]
fn floating_twice_or_unfloating_twice_does_nothing() {
    let (mut node, host) = floatable_node(WindowStyle::Transparent);

    node.set_floating(false, None);
    assert!(node.take_window_requests().is_empty());
    assert!(host.borrow().calls.is_empty());

    node.set_floating(true, None);
    let window_id = node.floating_window().unwrap().id();
    node.take_window_requests();
    let calls = host.borrow().calls.len();

    node.set_floating(true, Some(vec2(100.0, 100.0)));
    assert_eq!(node.floating_window().unwrap().id(), window_id);
    assert_eq!(node.floating_window().unwrap().rect().min, pos2(200.0, 50.0));
    assert!(node.take_window_requests().is_empty());
    assert_eq!(host.borrow().calls.len(), calls);
}

#[test]
fn every_float_gets_a_fresh_window() {
    let (mut node, _host) = floatable_node(WindowStyle::Transparent);

    node.set_floating(true, None);
    let first = node.floating_window().unwrap().id();
    node.set_floating(false, None);
    node.set_floating(true, None);
    let second = node.floating_window().unwrap().id();

    assert_ne!(first, second);
}

#[test]
fn clearing_floatable_brings_the_node_back() {
    let (mut node, _host) = floatable_node(WindowStyle::Transparent);
    node.set_floating(true, None);

    node.set_floatable(false);

    assert!(!node.is_floatable());
    assert!(!node.is_floating());
    assert!(node.floating_window().is_none());
}

#[test]
fn custom_caption_bar_visibility_while_floating() {
    let (mut node, _host) = floatable_node(WindowStyle::Decorated);

    node.set_use_custom_caption_bar(false);
    assert!(node.caption_bar().unwrap().is_visible(), "docked nodes keep their caption bar");

    node.set_floating(true, None);
    let bar = node.caption_bar().unwrap();
    assert!(!bar.is_visible() && !bar.is_managed());

    node.set_use_custom_caption_bar(true);
    assert!(node.caption_bar().unwrap().is_visible());

    node.set_use_custom_caption_bar(false);
    assert!(!node.caption_bar().unwrap().is_visible());
}

#[test]
fn redocking_shows_the_caption_bar_again() {
    let (mut node, host) = floatable_node(WindowStyle::Decorated);
    node.set_use_custom_caption_bar(false);
    node.set_floating(true, None);
    assert!(!node.caption_bar().unwrap().is_visible());

    let shared = node.layout_host().unwrap();
    node.dock(&shared, DockPosition::Left, None);

    assert!(!node.is_floating());
    assert!(node.is_docked());
    assert!(node.caption_bar().unwrap().is_visible());
    assert_eq!(
        host.borrow().calls.last(),
        Some(&HostCall::Dock(node.id(), DockPosition::Left, None))
    );
}

#[test]
fn window_title_follows_node_title() {
    let (mut node, _host) = floatable_node(WindowStyle::Decorated);
    node.set_floating(true, None);
    node.take_window_requests();

    node.set_title("Logs");

    assert_eq!(node.floating_window().unwrap().title(), "Logs");
    assert_eq!(node.caption_bar().unwrap().title(), "Logs");
    let requests = node.take_window_requests();
    let commands = commands(&requests);
    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], ViewportCommand::Title(title) if title == "Logs"));
}

#[test]
fn default_stylesheet_is_applied_once_after_layout() {
    let (mut node, host) = floatable_node(WindowStyle::Transparent);
    let ensured_before = host.borrow().stylesheet_ensured;

    node.set_floating(true, None);

    assert_eq!(host.borrow().stylesheet_ensured, ensured_before + 1);
    let window = node.floating_window().unwrap();
    assert!(window.has_pending_stylesheet());
    assert!(window.stylesheets().is_empty());

    node.run_deferred();
    node.run_deferred();

    let window = node.floating_window().unwrap();
    assert!(!window.has_pending_stylesheet());
    assert_eq!(window.stylesheets(), ["dock.css".to_owned()]);
    assert_eq!(window.border().padding(), Insets::same(3.0));
}

#[test]
fn fixed_size_node_does_not_listen_for_resizes() {
    let (mut node, _host) = floatable_node(WindowStyle::Transparent);
    node.set_resizable(false);

    node.set_floating(true, None);

    let window = node.floating_window().unwrap();
    assert!(!window.is_resizable());
    assert!(PointerEventKind::ALL.iter().all(|kind| !window.is_subscribed(*kind)));

    let requests = node.take_window_requests();
    assert_eq!(requests.len(), 1, "{requests:?}");
    let WindowRequest::Open { builder, .. } = &requests[0] else {
        panic!("expected open, got {requests:?}");
    };
    assert_eq!(builder.resizable, Some(false));
}

#[test]
fn toggling_resizable_while_floating_updates_the_window() {
    let (mut node, _host) = floatable_node(WindowStyle::Transparent);
    node.set_floating(true, None);
    node.take_window_requests();

    node.set_resizable(false);

    let requests = node.take_window_requests();
    assert!(matches!(
        commands(&requests)[..],
        [ViewportCommand::Resizable(false)]
    ));
    let unsubscribed = requests
        .iter()
        .filter(|request| matches!(request, WindowRequest::UnsubscribePointer { .. }))
        .count();
    assert_eq!(unsubscribed, 4);

    node.set_resizable(true);
    let window = node.floating_window().unwrap();
    assert!(window.is_resizable());
    assert!(window.is_subscribed(PointerEventKind::Dragged));
}

#[test]
fn listeners_observe_float_transitions() {
    let (mut node, _host) = floatable_node(WindowStyle::Transparent);
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = changes.clone();
    node.subscribe(move |change| sink.borrow_mut().push(change.clone()));

    node.set_floating(true, None);
    node.close();

    let flag = |flag, value| PropertyChange::Flag { flag, value };
    assert_eq!(
        *changes.borrow(),
        vec![
            flag(DockFlag::Floating, true),
            flag(DockFlag::Docked, false),
            flag(DockFlag::Floating, false),
        ]
    );
}

#[test]
fn floating_without_a_host_still_opens_a_window() {
    init_logger();
    let mut node = node_with(desktop(), options(WindowStyle::Transparent, 3.0));
    node.set_contents("loose".to_owned());
    node.set_bounds(bounds(pos2(13.0, 13.0), vec2(94.0, 94.0), vec2(10.0, 10.0)));

    node.set_floating(true, None);

    let window = node.floating_window().unwrap();
    assert_eq!(window.owner(), None);
    assert_eq!(window.rect().min, pos2(10.0, 10.0));
    assert!(!window.has_pending_stylesheet());
}
