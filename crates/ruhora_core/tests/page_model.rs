use ruhora_core::events::event_types;
use ruhora_core::{
    Event, EventDispatcher, KeyCode, MediaQuery, Modifiers, Rect, Scene, Viewport, VisualState,
};

#[test]
fn overlay_like_subtree_traps_nothing_once_removed() {
    let mut scene = Scene::new();
    let cta = scene.insert("cta", Rect::new(500.0, 40.0));
    let overlay = scene.insert("overlay", Rect::new(0.0, 900.0));
    let close = scene.insert_child(overlay, "overlay-close", Rect::new(20.0, 32.0));
    for id in [cta, close] {
        scene.set_focusable(id, true);
    }

    assert_eq!(scene.focusables(), vec![cta, close]);
    scene.remove(overlay);
    assert_eq!(scene.focusables(), vec![cta]);
}

#[test]
fn key_handlers_see_modifiers() {
    let mut scene = Scene::new();
    let button = scene.insert("button", Rect::new(0.0, 40.0));
    scene.set_focusable(button, true);
    scene.focus(button);

    let mut dispatcher: EventDispatcher<Vec<bool>> = EventDispatcher::new();
    dispatcher.register(None, event_types::KEY_DOWN, |event, shifts| {
        if let Some((KeyCode::TAB, mods)) = event.key() {
            shifts.push(mods.shift());
        }
    });

    let mut shifts = Vec::new();
    for mods in [Modifiers::NONE, Modifiers::shift_only()] {
        let mut event = Event::key_down(scene.focused(), KeyCode::TAB, mods);
        dispatcher.dispatch(&mut event, &mut shifts);
    }
    assert_eq!(shifts, vec![false, true]);
}

#[test]
fn desktop_breakpoint_is_inclusive() {
    assert!(MediaQuery::desktop().matches(&Viewport::new(1024.0, 768.0)));
    assert!(!MediaQuery::desktop().matches(&Viewport::new(1023.0, 768.0)));
}

#[test]
fn concealed_state_is_not_revealed() {
    let hidden = VisualState::concealed(8.0);
    assert!(!hidden.is_revealed());
    assert_eq!(hidden.scale, 1.0);
    assert!(VisualState::default().is_revealed());
}
