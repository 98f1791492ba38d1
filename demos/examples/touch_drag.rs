// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-finger touch drag with grabs, localization, and a window move mid-gesture.
//!
//! This example shows how to combine:
//! - `DeviceRegistry` and `PointTracker` to turn raw samples into touch events,
//! - `PointerEvent::localized` to express each event in a receiver's frame,
//! - exclusive and passive grabs that lapse when their owner is dropped.
//!
//! Run:
//! - `cargo run -p understory_demos --example touch_drag`

use std::collections::HashMap;

use kurbo::{Point, Rect, Vec2};
use understory_pointer::grab::GrabToken;
use understory_pointer::tracker::{PointTracker, RawSample};
use understory_pointer::{
    Capabilities, DeviceRegistry, DeviceType, EventKind, Modifiers, PointId, PointerEvent,
    PointerType, PointingDevice, State,
};

/// A receiver in scene coordinates.
#[derive(Debug)]
struct Widget {
    name: &'static str,
    bounds: Rect,
}

impl Widget {
    fn to_local(&self, scene: Point) -> Point {
        scene - self.bounds.origin().to_vec2()
    }
}

/// The window's position on screen; samples come in global coordinates.
fn sample(id: i32, state: State, global: Point, window: Vec2) -> RawSample {
    RawSample {
        scene_position: global - window,
        position: global - window,
        ..RawSample::new(PointId(id), state, global)
    }
}

fn describe(label: &str, ev: &PointerEvent<&'static str>) {
    let EventKind::Touch(touch) = ev.kind() else {
        return;
    };
    println!(
        "{label}: {:?} states={:?} accepted={}",
        touch.kind(),
        ev.touch_point_states(),
        ev.is_accepted()
    );
    for p in ev.points() {
        println!(
            "  {} {:?} local={:?} press={:?} grab={:?} last={:?} exclusive={:?} passive={:?}",
            p.id(),
            p.state(),
            p.position(),
            p.press_position(),
            p.grab_position(),
            p.last_position(),
            p.exclusive_grabber(),
            p.live_passive_grabbers().collect::<Vec<_>>(),
        );
    }
}

fn main() {
    let mut devices = DeviceRegistry::new();
    let panel = devices.register(
        PointingDevice::new("panel", 10, DeviceType::TouchScreen, PointerType::Finger)
            .with_maximum_points(10)
            .with_capabilities(Capabilities::POSITION | Capabilities::AREA),
    );
    let mut tracker: PointTracker<&'static str> = PointTracker::for_device(panel);

    let widgets: HashMap<&'static str, Widget> = [
        Widget {
            name: "slider",
            bounds: Rect::new(20.0, 20.0, 220.0, 60.0),
        },
        Widget {
            name: "canvas",
            bounds: Rect::new(20.0, 100.0, 420.0, 400.0),
        },
    ]
    .into_iter()
    .map(|w| (w.name, w))
    .collect();

    let slider = GrabToken::new("slider");
    let pinch_recognizer = GrabToken::new("pinch");
    let mut window = Vec2::new(100.0, 100.0);

    // Frame 1: finger 0 on the slider, finger 1 on the canvas.
    let down = [
        sample(0, State::Pressed, Point::new(150.0, 140.0), window),
        sample(1, State::Pressed, Point::new(300.0, 300.0), window),
    ];
    let mut ev = match tracker.touch_event(Modifiers::empty(), 0, &down) {
        Ok(ev) => ev,
        Err(e) => {
            eprintln!("frame rejected: {e}");
            return;
        }
    };
    {
        let mut d = ev.deliver();
        d.accept();
        for mut p in d.points_mut() {
            p.add_passive_grabber(pinch_recognizer.grab_ref());
        }
        d.point_mut(0).set_exclusive_grabber(slider.grab_ref());
        d.point_mut(1).set_accepted(false);
    }
    tracker.finish_delivery(&ev);
    describe("down", &ev);

    // The window moves left by 30 while finger 0 moves right by 10 on screen, so the finger
    // moves right by 40 in the scene.
    window += Vec2::new(-30.0, 0.0);
    let drag = [sample(0, State::Updated, Point::new(160.0, 140.0), window)];
    let ev = match tracker.touch_event(Modifiers::empty(), 16, &drag) {
        Ok(ev) => ev,
        Err(e) => {
            eprintln!("frame rejected: {e}");
            return;
        }
    };
    describe("drag (scene)", &ev);
    if let Some(w) = widgets.get("slider") {
        let local = ev.localized(|scene| w.to_local(scene));
        describe("drag (slider)", &local);
        let p = local.point(0);
        println!(
            "  slider dragged by {:?} on screen since press",
            p.position() - p.press_position()
        );
    }

    // The slider goes away mid-gesture; its grab lapses everywhere.
    drop(slider);
    describe("after slider dropped", &ev);

    // A repeated press without release is rejected.
    let bad = [sample(1, State::Pressed, Point::new(300.0, 300.0), window)];
    if let Err(e) = tracker.touch_event(Modifiers::empty(), 20, &bad) {
        println!("rejected: {e}");
    }

    // The system cancels the sequence.
    let cancel = tracker.cancel(Modifiers::empty(), 32);
    describe("cancel", &cancel);
    println!("live contacts after cancel: {}", tracker.live_count());
}
