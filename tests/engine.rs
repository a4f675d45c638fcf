//! End-to-end tests driving the engine tick by tick

use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use spatial_events::app::AppConfig;
use spatial_events::event::{
    Dispatcher, DispatchPolicy, Event, EventComponent, EventSystem, MouseAction, Rect, Screen,
    handler,
};
use spatial_events::input::{Key, KeyAction, Modifiers, MouseButton};
use spatial_events::sim::{Camera, CameraSystem, Engine, EntityId};

const TIMEOUT: Duration = Duration::from_secs(2);
const QUIET: Duration = Duration::from_millis(300);

/// Engine with an 800x800 screen, a camera and an event system
fn engine() -> Engine {
    let mut engine = Engine::new(Screen::new(800.0, 800.0));
    engine.world_mut().add_system(Box::new(CameraSystem::new(Camera::default())));
    let dispatcher = Dispatcher::new(DispatchPolicy::Unbounded).unwrap();
    engine.world_mut().add_system(Box::new(EventSystem::new(dispatcher)));
    engine
}

fn add_box(engine: &mut Engine) -> EntityId {
    let id = EntityId::next();
    engine
        .events_mut()
        .unwrap()
        .add(id, EventComponent::new(), Rect::centered([0.0, 0.0], 50.0, 50.0));
    id
}

fn drain(rx: &Receiver<&'static str>) -> Vec<&'static str> {
    let mut seen = Vec::new();
    while let Ok(tag) = rx.recv_timeout(QUIET) {
        seen.push(tag);
    }
    seen
}

fn move_cursor(engine: &mut Engine, x: f32, y: f32) {
    engine.input().set_mouse_position(x, y);
    engine.tick(0.016);
}

#[test]
fn test_same_handle_accumulates_handlers() {
    let mut engine = engine();
    let id = add_box(&mut engine);
    let (tx, rx) = mpsc::channel();

    let component = engine.events_mut().unwrap().component_mut(id).unwrap();
    let hover = component
        .on(Event::hover(MouseAction::JustHovered), {
            let tx = tx.clone();
            move |_| tx.send("first").unwrap()
        })
        .unwrap();
    component
        .bind_to(hover, [handler(move |_| tx.send("second").unwrap())])
        .unwrap();
    assert_eq!(component.len(), 1);

    move_cursor(&mut engine, 400.0, 400.0);
    let mut seen = drain(&rx);
    seen.sort_unstable();
    assert_eq!(seen, vec!["first", "second"]);

    // Still hovering: JustHovered does not fire again
    move_cursor(&mut engine, 401.0, 401.0);
    assert!(drain(&rx).is_empty());
}

#[test]
fn test_distinct_instances_track_independently() {
    let mut engine = engine();
    let id = add_box(&mut engine);
    let (tx, rx) = mpsc::channel();

    let event = Event::hover(MouseAction::JustHovered);
    let early = engine
        .events_mut()
        .unwrap()
        .component_mut(id)
        .unwrap()
        .on(event, {
            let tx = tx.clone();
            move |_| tx.send("early").unwrap()
        })
        .unwrap();

    move_cursor(&mut engine, 400.0, 400.0);
    assert_eq!(drain(&rx), vec!["early"]);

    // A structurally identical event bound later starts out not hovering
    let late = engine
        .events_mut()
        .unwrap()
        .component_mut(id)
        .unwrap()
        .on(event, move |_| tx.send("late").unwrap())
        .unwrap();
    assert_ne!(early, late);

    move_cursor(&mut engine, 402.0, 402.0);
    assert_eq!(drain(&rx), vec!["late"]);
}

#[test]
fn test_drag_lifecycle() {
    let mut engine = engine();
    let id = add_box(&mut engine);
    let (tx, rx) = mpsc::channel();

    let component = engine.events_mut().unwrap().component_mut(id).unwrap();
    for (action, tag) in [
        (MouseAction::JustDragged, "start"),
        (MouseAction::JustReleased, "end"),
    ] {
        let tx = tx.clone();
        component
            .on(Event::drag(action), move |_| tx.send(tag).unwrap())
            .unwrap();
    }

    // Hovering without the button never starts a drag
    move_cursor(&mut engine, 400.0, 400.0);
    move_cursor(&mut engine, 400.0, 400.0);
    assert!(drain(&rx).is_empty());

    engine
        .input()
        .set_mouse_button(MouseButton::Left, Modifiers::empty(), true);
    engine.tick(0.016);
    assert_eq!(drain(&rx), vec!["start"]);

    engine.tick(0.016);
    assert!(drain(&rx).is_empty());

    engine
        .input()
        .set_mouse_button(MouseButton::Left, Modifiers::empty(), false);
    engine.tick(0.016);
    assert_eq!(drain(&rx), vec!["end"]);
}

#[test]
fn test_remove_does_not_cancel_running_handlers() {
    let mut engine = engine();
    let id = add_box(&mut engine);
    let (done_tx, done_rx) = mpsc::channel();
    let (started_tx, started_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let release_rx = Arc::new(Mutex::new(release_rx));

    engine
        .events_mut()
        .unwrap()
        .component_mut(id)
        .unwrap()
        .on(Event::key(Key::Enter, KeyAction::Down), move |_| {
            started_tx.send(()).unwrap();
            let _ = release_rx.lock().unwrap().recv_timeout(TIMEOUT);
            done_tx.send(()).unwrap();
        })
        .unwrap();

    engine.input().set_key(Key::Enter, true);
    engine.tick(0.016);
    engine.tick(0.016);
    started_rx.recv_timeout(TIMEOUT).unwrap();

    assert!(engine.events_mut().unwrap().remove(id).is_some());
    engine.tick(0.016);
    assert!(started_rx.recv_timeout(QUIET).is_err());

    release_tx.send(()).unwrap();
    done_rx.recv_timeout(TIMEOUT).unwrap();
}

#[test]
fn test_camera_pan_moves_hit_area() {
    let mut engine = engine();
    let id = add_box(&mut engine);
    let (tx, rx) = mpsc::channel();
    engine
        .events_mut()
        .unwrap()
        .component_mut(id)
        .unwrap()
        .on(Event::hover(MouseAction::Hovering), move |_| tx.send("hover").unwrap())
        .unwrap();

    let camera = engine.camera().unwrap().camera();
    camera.update(|camera| camera.pan([300.0, 0.0]));

    // Canvas center now maps to (300, 0), outside the box
    move_cursor(&mut engine, 400.0, 400.0);
    move_cursor(&mut engine, 400.0, 400.0);
    assert!(drain(&rx).is_empty());

    // Canvas (100, 400) maps back to the origin
    move_cursor(&mut engine, 100.0, 400.0);
    move_cursor(&mut engine, 100.0, 400.0);
    assert_eq!(drain(&rx), vec!["hover"]);
}

#[test]
fn test_configured_buttons_are_registered() {
    let mut config = AppConfig::defaults();
    config.input.buttons.insert(
        "confirm".to_string(),
        vec![Key::Enter.into(), MouseButton::Right.into()],
    );

    let mut engine = Engine::from_config(&config).unwrap();
    engine
        .input()
        .set_mouse_button(MouseButton::Right, Modifiers::CONTROL, true);
    engine.tick(0.016);

    let confirm = engine.input().button("confirm");
    assert!(confirm.just_pressed(engine.input()));
    assert!(engine.input().mouse_modifier(Modifiers::CONTROL));
    assert!(!engine.input().button("cancel").just_pressed(engine.input()));
}
