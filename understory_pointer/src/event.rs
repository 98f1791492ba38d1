// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer event snapshots and the delivery handle.
//!
//! ## Overview
//!
//! A [`PointerEvent`] is an immutable snapshot of one or more contacts at one instant. The
//! envelope carries what every kind shares (device, modifiers, timestamp, points, acceptance);
//! [`EventKind`] carries what a kind adds.
//!
//! ## Delivery
//!
//! The only way to change a snapshot is [`PointerEvent::deliver`], which returns a
//! [`Delivery`] handle for the duration of one synchronous dispatch pass. Through it a consumer
//! may accept or ignore the event, and set per-point acceptance and grabs. Positions, states,
//! and kind payloads stay read-only.
//!
//! Event acceptance and point acceptance are independent. A consumer of a touch event may
//! accept the event while leaving some points unaccepted; the dispatcher is expected to keep
//! offering [`PointerEvent::unaccepted_points`] to further consumers.
//!
//! ```
//! use kurbo::Point;
//! use understory_pointer::grab::GrabToken;
//! use understory_pointer::{EventPoint, Modifiers, PointId, PointerEvent, State, TouchEventType};
//!
//! let points = (0..3).map(|i| {
//!     let at = Point::new(f64::from(i) * 10.0, 0.0);
//!     EventPoint::with_state(PointId(i), State::Pressed, at, at)
//! });
//! let mut ev: PointerEvent<u32> =
//!     PointerEvent::touch(None, Modifiers::empty(), 16, TouchEventType::Begin, points);
//!
//! let slider = GrabToken::new(1_u32);
//! {
//!     let mut d = ev.deliver();
//!     d.accept();
//!     d.point_mut(0).set_exclusive_grabber(slider.grab_ref());
//!     d.point_mut(1).set_accepted(false);
//! }
//!
//! assert_eq!(ev.point(0).exclusive_grabber(), Some(1));
//! assert_eq!(ev.unaccepted_points().count(), 1);
//! ```

use alloc::rc::Rc;
use core::ops::Deref;

use kurbo::Point;
use smallvec::SmallVec;

use crate::device::{DeviceType, PointerType, PointingDevice};
use crate::grab::GrabRef;
use crate::kinds::{
    EventKind, HoverEvent, MouseButton, MouseButtons, MouseEvent, MouseEventType,
    NativeGestureEvent, NativeGestureType, ScrollPhase, TabletEvent, TabletEventType, TouchEvent,
    TouchEventType, WheelEvent,
};
use crate::point::{EventPoint, PointId, States};

bitflags::bitflags! {
    /// Keyboard modifiers active when the event was generated.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT        = 1 << 0;
        /// Control (Command on macOS keyboards is reported as `META`).
        const CONTROL      = 1 << 1;
        /// Alt or Option.
        const ALT          = 1 << 2;
        /// Meta, Super, Windows, or Command.
        const META         = 1 << 3;
        /// The key came from the keypad.
        const KEYPAD       = 1 << 4;
        /// Mode switch (X11 group switch).
        const GROUP_SWITCH = 1 << 5;
    }
}

/// Point storage: one inline slot covers every single-point kind without allocating.
pub type Points<K> = SmallVec<[EventPoint<K>; 1]>;

/// Snapshot of one or more contacts at one instant.
#[derive(Clone, Debug)]
pub struct PointerEvent<K> {
    device: Option<Rc<PointingDevice>>,
    modifiers: Modifiers,
    timestamp: u64,
    points: Points<K>,
    accepted: bool,
    kind: EventKind,
}

impl<K> PointerEvent<K> {
    fn single(
        device: Option<Rc<PointingDevice>>,
        modifiers: Modifiers,
        timestamp: u64,
        point: EventPoint<K>,
        kind: EventKind,
    ) -> Self {
        let mut points = Points::new();
        points.push(point);
        Self {
            device,
            modifiers,
            timestamp,
            points,
            accepted: true,
            kind,
        }
    }

    /// A mouse press, release, move, or double click.
    pub fn mouse(
        device: Option<Rc<PointingDevice>>,
        modifiers: Modifiers,
        timestamp: u64,
        point: EventPoint<K>,
        payload: MouseEvent,
    ) -> Self {
        Self::single(device, modifiers, timestamp, point, EventKind::Mouse(payload))
    }

    /// The cursor entered a receiver.
    pub fn enter(
        device: Option<Rc<PointingDevice>>,
        modifiers: Modifiers,
        timestamp: u64,
        point: EventPoint<K>,
    ) -> Self {
        Self::single(device, modifiers, timestamp, point, EventKind::Enter)
    }

    /// A hover enter, move, or leave.
    pub fn hover(
        device: Option<Rc<PointingDevice>>,
        modifiers: Modifiers,
        timestamp: u64,
        point: EventPoint<K>,
        payload: HoverEvent,
    ) -> Self {
        Self::single(device, modifiers, timestamp, point, EventKind::Hover(payload))
    }

    /// A wheel or scroll gesture.
    pub fn wheel(
        device: Option<Rc<PointingDevice>>,
        modifiers: Modifiers,
        timestamp: u64,
        point: EventPoint<K>,
        payload: WheelEvent,
    ) -> Self {
        Self::single(device, modifiers, timestamp, point, EventKind::Wheel(payload))
    }

    /// Tablet tool input.
    pub fn tablet(
        device: Option<Rc<PointingDevice>>,
        modifiers: Modifiers,
        timestamp: u64,
        point: EventPoint<K>,
        payload: TabletEvent,
    ) -> Self {
        Self::single(device, modifiers, timestamp, point, EventKind::Tablet(payload))
    }

    /// A gesture recognized by the platform.
    pub fn native_gesture(
        device: Option<Rc<PointingDevice>>,
        modifiers: Modifiers,
        timestamp: u64,
        point: EventPoint<K>,
        payload: NativeGestureEvent,
    ) -> Self {
        Self::single(
            device,
            modifiers,
            timestamp,
            point,
            EventKind::NativeGesture(payload),
        )
    }

    /// A touch event over any number of points.
    ///
    /// The aggregate [`touch_point_states`](Self::touch_point_states) is computed here from the
    /// points' states.
    pub fn touch(
        device: Option<Rc<PointingDevice>>,
        modifiers: Modifiers,
        timestamp: u64,
        kind: TouchEventType,
        points: impl IntoIterator<Item = EventPoint<K>>,
    ) -> Self {
        let points: Points<K> = points.into_iter().collect();
        let states = points
            .iter()
            .fold(States::empty(), |acc, p| acc | p.state().bit());
        Self {
            device,
            modifiers,
            timestamp,
            points,
            accepted: true,
            kind: EventKind::Touch(TouchEvent::new(kind, states)),
        }
    }

    // --- envelope ---

    /// The device that produced the event, if known.
    pub fn device(&self) -> Option<&Rc<PointingDevice>> {
        self.device.as_ref()
    }

    /// Hardware kind of the device, `Unknown` without a device.
    pub fn device_type(&self) -> DeviceType {
        self.device
            .as_ref()
            .map_or(DeviceType::Unknown, |d| d.device_type)
    }

    /// Tool kind of the device, `Unknown` without a device.
    pub fn pointer_type(&self) -> PointerType {
        self.device
            .as_ref()
            .map_or(PointerType::Unknown, |d| d.pointer_type)
    }

    /// Keyboard modifiers at event time.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Event timestamp in milliseconds.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Kind-specific payload.
    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Event-level acceptance flag.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    // --- points ---

    /// Number of points.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// The point at index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.point_count()`.
    pub fn point(&self, i: usize) -> &EventPoint<K> {
        assert!(
            i < self.points.len(),
            "point index {i} out of range for an event with {} points",
            self.points.len()
        );
        &self.points[i]
    }

    /// The point at index `i`, or `None` if out of range.
    pub fn try_point(&self, i: usize) -> Option<&EventPoint<K>> {
        self.points.get(i)
    }

    /// All points in order.
    pub fn points(&self) -> &[EventPoint<K>] {
        &self.points
    }

    /// The point with contact id `id`.
    pub fn point_by_id(&self, id: PointId) -> Option<&EventPoint<K>> {
        self.points.iter().find(|p| p.id() == id)
    }

    /// Points whose acceptance flag is not set.
    pub fn unaccepted_points(&self) -> impl Iterator<Item = &EventPoint<K>> {
        self.points.iter().filter(|p| !p.is_accepted())
    }

    /// Returns true if every point is accepted.
    pub fn all_points_accepted(&self) -> bool {
        self.points.iter().all(EventPoint::is_accepted)
    }

    /// Returns true if every point has a live exclusive grabber.
    pub fn all_points_grabbed(&self) -> bool {
        self.points
            .iter()
            .all(|p| p.grabs().exclusive_ref().is_live())
    }

    // --- single-point conveniences ---

    /// Returns true for kinds that always carry exactly one point.
    pub fn is_single_point(&self) -> bool {
        self.kind.is_single_point()
    }

    /// The point of a single-point event.
    pub fn single_point(&self) -> Option<&EventPoint<K>> {
        if self.is_single_point() {
            self.points.first()
        } else {
            None
        }
    }

    /// Local position of a single-point event.
    pub fn position(&self) -> Option<Point> {
        self.single_point().map(EventPoint::position)
    }

    /// Scene position of a single-point event.
    pub fn scene_position(&self) -> Option<Point> {
        self.single_point().map(EventPoint::scene_position)
    }

    /// Global position of a single-point event.
    pub fn global_position(&self) -> Option<Point> {
        self.single_point().map(EventPoint::global_position)
    }

    /// Pressure of a single-point event.
    pub fn pressure(&self) -> Option<f64> {
        self.single_point().map(EventPoint::pressure)
    }

    /// Rotation of a single-point event.
    pub fn rotation(&self) -> Option<f64> {
        self.single_point().map(EventPoint::rotation)
    }

    /// Button that caused a mouse or tablet event; [`MouseButton::None`] otherwise.
    pub fn button(&self) -> MouseButton {
        match &self.kind {
            EventKind::Mouse(m) => m.button,
            EventKind::Tablet(t) => t.button,
            _ => MouseButton::None,
        }
    }

    /// Buttons held during a mouse, wheel, or tablet event; empty otherwise.
    pub fn buttons(&self) -> MouseButtons {
        match &self.kind {
            EventKind::Mouse(m) => m.buttons,
            EventKind::Wheel(w) => w.buttons,
            EventKind::Tablet(t) => t.buttons,
            _ => MouseButtons::empty(),
        }
    }

    /// Union of point states for touch events; empty for other kinds.
    pub fn touch_point_states(&self) -> States {
        match &self.kind {
            EventKind::Touch(t) => t.touch_point_states(),
            _ => States::empty(),
        }
    }

    // --- sequence position ---

    /// Returns true if the event starts an interaction (press, touch begin, gesture or scroll
    /// begin).
    pub fn is_begin_event(&self) -> bool {
        match &self.kind {
            EventKind::Mouse(m) => {
                matches!(m.kind, MouseEventType::Press | MouseEventType::DoubleClick)
            }
            EventKind::Tablet(t) => t.kind == TabletEventType::Press,
            EventKind::NativeGesture(g) => g.gesture_type == NativeGestureType::Begin,
            EventKind::Wheel(w) => w.phase == ScrollPhase::Begin,
            EventKind::Touch(t) => {
                t.kind() == TouchEventType::Begin
                    || t.touch_point_states().contains(States::PRESSED)
            }
            EventKind::Enter | EventKind::Hover(_) => false,
        }
    }

    /// Returns true if the event continues an interaction.
    pub fn is_update_event(&self) -> bool {
        match &self.kind {
            EventKind::Mouse(m) => m.kind == MouseEventType::Move,
            EventKind::Tablet(t) => t.kind == TabletEventType::Move,
            EventKind::NativeGesture(g) => !matches!(
                g.gesture_type,
                NativeGestureType::Begin | NativeGestureType::End
            ),
            EventKind::Wheel(w) => {
                matches!(w.phase, ScrollPhase::Update | ScrollPhase::Momentum)
            }
            EventKind::Touch(t) => t.kind() == TouchEventType::Update,
            EventKind::Enter | EventKind::Hover(_) => false,
        }
    }

    /// Returns true if the event ends an interaction (release, touch end or cancel, scroll end).
    pub fn is_end_event(&self) -> bool {
        match &self.kind {
            EventKind::Mouse(m) => m.kind == MouseEventType::Release,
            EventKind::Tablet(t) => t.kind == TabletEventType::Release,
            EventKind::NativeGesture(g) => g.gesture_type == NativeGestureType::End,
            EventKind::Wheel(w) => w.phase == ScrollPhase::End,
            EventKind::Touch(t) => {
                matches!(t.kind(), TouchEventType::End | TouchEventType::Cancel)
                    || t.touch_point_states().contains(States::RELEASED)
            }
            EventKind::Enter | EventKind::Hover(_) => false,
        }
    }

    // --- localization and delivery ---

    /// A copy of this event for a receiver whose local frame is given by `scene_to_local`.
    ///
    /// Each point's local position becomes `scene_to_local(scene_position)`; anchors, grabs,
    /// acceptance, and the payload are carried over unchanged.
    pub fn localized(&self, scene_to_local: impl Fn(Point) -> Point) -> Self
    where
        K: Clone,
    {
        Self {
            device: self.device.clone(),
            modifiers: self.modifiers,
            timestamp: self.timestamp,
            points: self
                .points
                .iter()
                .map(|p| p.localized(scene_to_local(p.scene_position())))
                .collect(),
            accepted: self.accepted,
            kind: self.kind,
        }
    }

    /// Open the delivery window for one synchronous dispatch pass.
    pub fn deliver(&mut self) -> Delivery<'_, K> {
        Delivery { event: self }
    }
}

/// Mutable access to a [`PointerEvent`] while it is being dispatched.
///
/// Only acceptance flags and point grabs can be changed through this handle.
#[derive(Debug)]
pub struct Delivery<'a, K> {
    event: &'a mut PointerEvent<K>,
}

impl<K> Delivery<'_, K> {
    /// Read access to the event being delivered.
    pub fn event(&self) -> &PointerEvent<K> {
        self.event
    }

    /// Mark the event accepted.
    pub fn accept(&mut self) {
        self.event.accepted = true;
    }

    /// Mark the event ignored.
    pub fn ignore(&mut self) {
        self.event.accepted = false;
    }

    /// Set the event-level acceptance. Point acceptance is not touched.
    pub fn set_accepted(&mut self, accepted: bool) {
        self.event.accepted = accepted;
    }

    /// The point at index `i`, for setting acceptance or grabs.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn point_mut(&mut self, i: usize) -> PointDelivery<'_, K> {
        let count = self.event.points.len();
        assert!(
            i < count,
            "point index {i} out of range for an event with {count} points"
        );
        PointDelivery {
            point: &mut self.event.points[i],
        }
    }

    /// The point with contact id `id`, for setting acceptance or grabs.
    pub fn point_by_id_mut(&mut self, id: PointId) -> Option<PointDelivery<'_, K>> {
        self.event
            .points
            .iter_mut()
            .find(|p| p.id() == id)
            .map(|point| PointDelivery { point })
    }

    /// Points in order, for setting acceptance or grabs.
    pub fn points_mut(&mut self) -> impl Iterator<Item = PointDelivery<'_, K>> {
        self.event
            .points
            .iter_mut()
            .map(|point| PointDelivery { point })
    }
}

/// One point of an event being dispatched.
///
/// Reads go through to the [`EventPoint`]. Writes are limited to the acceptance flag and the
/// grabs; the point cannot be replaced, so its id, state, and positions stay those of the
/// snapshot.
///
/// ```compile_fail
/// use kurbo::Point;
/// use understory_pointer::{EventPoint, Modifiers, PointId, PointerEvent, State, TouchEventType};
///
/// let p = EventPoint::with_state(PointId(0), State::Pressed, Point::ZERO, Point::ZERO);
/// let mut ev: PointerEvent<u32> =
///     PointerEvent::touch(None, Modifiers::empty(), 0, TouchEventType::Begin, [p]);
/// *ev.deliver().point_mut(0) = EventPoint::new(PointId(7));
/// ```
#[derive(Debug)]
pub struct PointDelivery<'a, K> {
    point: &'a mut EventPoint<K>,
}

impl<K> PointDelivery<'_, K> {
    /// Set the acceptance of this point only.
    pub fn set_accepted(&mut self, accepted: bool) {
        self.point.set_accepted(accepted);
    }

    /// Replace the exclusive grabber; an empty handle clears it.
    pub fn set_exclusive_grabber(&mut self, grabber: GrabRef<K>) {
        self.point.set_exclusive_grabber(grabber);
    }

    /// Clear the exclusive grabber.
    pub fn clear_exclusive_grabber(&mut self) {
        self.point.clear_exclusive_grabber();
    }

    /// Replace the passive grabbers. Duplicates are kept.
    pub fn set_passive_grabbers(&mut self, grabbers: impl IntoIterator<Item = GrabRef<K>>) {
        self.point.set_passive_grabbers(grabbers);
    }

    /// Append one passive grabber.
    pub fn add_passive_grabber(&mut self, grabber: GrabRef<K>) {
        self.point.add_passive_grabber(grabber);
    }

    /// Remove the first passive entry equal to `grabber`.
    pub fn remove_passive_grabber(&mut self, grabber: &GrabRef<K>) -> bool {
        self.point.remove_passive_grabber(grabber)
    }

    /// Drop every passive grabber.
    pub fn clear_passive_grabbers(&mut self) {
        self.point.clear_passive_grabbers();
    }
}

impl<K> Deref for PointDelivery<'_, K> {
    type Target = EventPoint<K>;

    fn deref(&self) -> &EventPoint<K> {
        self.point
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Capabilities;
    use crate::grab::GrabToken;
    use crate::kinds::{HoverEventType, MouseEventSource};
    use crate::point::State;
    use alloc::vec::Vec;
    use kurbo::Vec2;

    fn touch_point(id: i32, state: State) -> EventPoint<u32> {
        let at = Point::new(f64::from(id) * 10.0, 5.0);
        EventPoint::with_state(PointId(id), state, at, at)
    }

    fn touch3() -> PointerEvent<u32> {
        PointerEvent::touch(
            None,
            Modifiers::empty(),
            100,
            TouchEventType::Update,
            [
                touch_point(0, State::Pressed),
                touch_point(1, State::Stationary),
                touch_point(2, State::Released),
            ],
        )
    }

    fn mouse_press() -> PointerEvent<u32> {
        let device = Rc::new(
            PointingDevice::new("mouse", 1, DeviceType::Mouse, PointerType::Generic)
                .with_capabilities(Capabilities::POSITION | Capabilities::SCROLL),
        );
        let p = EventPoint::with_state(
            PointId(0),
            State::Pressed,
            Point::new(20.0, 30.0),
            Point::new(220.0, 130.0),
        )
        .with_position(Point::new(2.0, 3.0));
        PointerEvent::mouse(
            Some(device),
            Modifiers::SHIFT,
            7,
            p,
            MouseEvent {
                kind: MouseEventType::Press,
                button: MouseButton::Primary,
                buttons: MouseButtons::PRIMARY,
                source: MouseEventSource::NotSynthesized,
            },
        )
    }

    #[test]
    fn aggregate_state_is_union_of_points() {
        let ev = touch3();
        assert_eq!(
            ev.touch_point_states(),
            States::PRESSED | States::STATIONARY | States::RELEASED
        );
        assert_eq!(ev.point_count(), 3);
        assert!(!ev.is_single_point());
        assert!(ev.single_point().is_none());
        assert!(ev.position().is_none());
    }

    #[test]
    fn point_acceptance_is_independent() {
        let mut ev = touch3();
        ev.deliver().point_mut(1).set_accepted(false);
        assert!(ev.point(0).is_accepted());
        assert!(!ev.point(1).is_accepted());
        assert!(ev.point(2).is_accepted());
        assert!(!ev.all_points_accepted());
        let pending: Vec<PointId> = ev.unaccepted_points().map(EventPoint::id).collect();
        assert_eq!(pending, [PointId(1)]);
    }

    #[test]
    fn event_acceptance_does_not_touch_points() {
        let mut ev = touch3();
        {
            let mut d = ev.deliver();
            d.point_mut(2).set_accepted(false);
            d.ignore();
            d.accept();
        }
        assert!(ev.is_accepted());
        assert!(!ev.point(2).is_accepted());

        ev.deliver().set_accepted(false);
        assert!(!ev.is_accepted());
        assert!(ev.point(0).is_accepted());
    }

    #[test]
    #[should_panic(expected = "point index 3 out of range")]
    fn point_index_out_of_range_panics() {
        let ev = touch3();
        let _ = ev.point(3);
    }

    #[test]
    #[should_panic(expected = "point index 1 out of range")]
    fn point_mut_index_out_of_range_panics() {
        let mut ev = mouse_press();
        let _ = ev.deliver().point_mut(1);
    }

    #[test]
    fn try_point_and_lookup_by_id() {
        let ev = touch3();
        assert!(ev.try_point(3).is_none());
        assert_eq!(ev.point_by_id(PointId(2)).unwrap().state(), State::Released);
        assert!(ev.point_by_id(PointId(9)).is_none());
    }

    #[test]
    fn single_point_forwarders() {
        let ev = mouse_press();
        assert!(ev.is_single_point());
        assert_eq!(ev.point_count(), 1);
        assert_eq!(ev.position(), Some(Point::new(2.0, 3.0)));
        assert_eq!(ev.scene_position(), Some(Point::new(20.0, 30.0)));
        assert_eq!(ev.global_position(), Some(Point::new(220.0, 130.0)));
        assert_eq!(ev.pressure(), Some(1.0));
        assert_eq!(ev.button(), MouseButton::Primary);
        assert_eq!(ev.buttons(), MouseButtons::PRIMARY);
        assert_eq!(ev.modifiers(), Modifiers::SHIFT);
        assert_eq!(ev.timestamp(), 7);
        assert_eq!(ev.device_type(), DeviceType::Mouse);
        assert_eq!(ev.pointer_type(), PointerType::Generic);
        assert_eq!(ev.touch_point_states(), States::empty());
        assert!(ev.is_begin_event());
        assert!(!ev.is_update_event());
        assert!(!ev.is_end_event());
    }

    #[test]
    fn missing_device_reports_unknown() {
        let ev = touch3();
        assert!(ev.device().is_none());
        assert_eq!(ev.device_type(), DeviceType::Unknown);
        assert_eq!(ev.pointer_type(), PointerType::Unknown);
    }

    #[test]
    fn wheel_and_tablet_payloads() {
        let p = || EventPoint::with_state(PointId(0), State::Updated, Point::ZERO, Point::ZERO);
        let wheel: PointerEvent<u32> = PointerEvent::wheel(
            None,
            Modifiers::CONTROL,
            1,
            p(),
            WheelEvent {
                pixel_delta: Vec2::new(0.0, 12.0),
                angle_delta: Vec2::new(0.0, 120.0),
                buttons: MouseButtons::MIDDLE,
                phase: ScrollPhase::Update,
                inverted: true,
                source: MouseEventSource::NotSynthesized,
            },
        );
        assert_eq!(wheel.buttons(), MouseButtons::MIDDLE);
        assert_eq!(wheel.button(), MouseButton::None);
        let EventKind::Wheel(w) = wheel.kind() else {
            panic!("expected a wheel payload");
        };
        assert_eq!(w.angle_steps(), Vec2::new(0.0, 1.0));
        assert!(w.inverted);

        let tablet: PointerEvent<u32> = PointerEvent::tablet(
            None,
            Modifiers::empty(),
            2,
            p().with_pressure(0.25).with_rotation(30.0),
            TabletEvent {
                kind: TabletEventType::Move,
                x_tilt: 10.0,
                y_tilt: -5.0,
                z: 0.0,
                tangential_pressure: 0.0,
                button: MouseButton::None,
                buttons: MouseButtons::PRIMARY,
            },
        );
        assert_eq!(tablet.pressure(), Some(0.25));
        assert_eq!(tablet.rotation(), Some(30.0));
        assert!(tablet.is_update_event());
        let EventKind::Tablet(t) = tablet.kind() else {
            panic!("expected a tablet payload");
        };
        assert_eq!((t.x_tilt, t.y_tilt), (10.0, -5.0));
    }

    #[test]
    fn gesture_payload_and_sequence_position() {
        let p = EventPoint::with_state(PointId(0), State::Updated, Point::ZERO, Point::ZERO);
        let ev: PointerEvent<u32> = PointerEvent::native_gesture(
            None,
            Modifiers::empty(),
            3,
            p,
            NativeGestureEvent {
                gesture_type: NativeGestureType::Zoom,
                value: 0.1,
                sequence_id: 42,
                int_argument: 0,
            },
        );
        assert!(ev.is_update_event());
        assert!(!ev.is_begin_event());
        let EventKind::NativeGesture(g) = ev.kind() else {
            panic!("expected a gesture payload");
        };
        assert_eq!(g.sequence_id, 42);
        assert_eq!(g.value, 0.1);
    }

    #[test]
    fn hover_and_enter_are_single_point() {
        let p = || EventPoint::with_state(PointId(0), State::Updated, Point::ZERO, Point::ZERO);
        let enter: PointerEvent<u32> = PointerEvent::enter(None, Modifiers::empty(), 0, p());
        assert!(enter.is_single_point());
        assert_eq!(enter.position(), Some(Point::ZERO));

        let hover: PointerEvent<u32> = PointerEvent::hover(
            None,
            Modifiers::empty(),
            0,
            p(),
            HoverEvent {
                kind: HoverEventType::Move,
                old_position: Point::new(-1.0, 0.0),
            },
        );
        assert!(!hover.is_begin_event() && !hover.is_update_event() && !hover.is_end_event());
    }

    #[test]
    fn touch_sequence_position() {
        let ev = touch3();
        assert!(ev.is_begin_event());
        assert!(ev.is_update_event());
        assert!(ev.is_end_event());

        let end: PointerEvent<u32> = PointerEvent::touch(
            None,
            Modifiers::empty(),
            0,
            TouchEventType::Cancel,
            [touch_point(0, State::Released)],
        );
        assert!(end.is_end_event());
        assert!(!end.is_begin_event());
    }

    #[test]
    fn grabs_set_during_delivery_are_visible_afterwards() {
        let a = GrabToken::new(10_u32);
        let b = GrabToken::new(20_u32);
        let mut ev = touch3();
        {
            let mut d = ev.deliver();
            for mut p in d.points_mut() {
                p.set_exclusive_grabber(a.grab_ref());
            }
            d.point_by_id_mut(PointId(1))
                .unwrap()
                .set_passive_grabbers([b.grab_ref(), b.grab_ref()]);
        }
        assert!(ev.all_points_grabbed());
        assert_eq!(ev.point(1).live_passive_grabbers().count(), 2);

        drop(a);
        assert!(!ev.all_points_grabbed());
        assert_eq!(ev.point(0).exclusive_grabber(), None);
    }

    #[test]
    fn localized_copy_keeps_anchors_and_grabs() {
        let token = GrabToken::new(5_u32);
        let mut ev = mouse_press();
        ev.deliver().point_mut(0).set_exclusive_grabber(token.grab_ref());

        // Receiver origin at (15, 25) in the scene.
        let local = ev.localized(|p| Point::new(p.x - 15.0, p.y - 25.0));
        assert_eq!(local.position(), Some(Point::new(5.0, 5.0)));
        assert_eq!(local.point(0).press_position(), Point::new(5.0, 5.0));
        assert_eq!(local.point(0).exclusive_grabber(), Some(5));
        assert_eq!(local.modifiers(), ev.modifiers());
        assert_eq!(local.kind(), ev.kind());
    }

    #[test]
    fn delivery_cannot_change_point_data() {
        let token = GrabToken::new(3_u32);
        let mut ev = touch3();
        let before: Vec<(PointId, State, Point)> = ev
            .points()
            .iter()
            .map(|p| (p.id(), p.state(), p.global_position()))
            .collect();
        {
            let mut d = ev.deliver();
            for mut p in d.points_mut() {
                // Reads go through to the snapshot.
                let id = p.id();
                p.set_accepted(id != PointId(2));
                p.set_exclusive_grabber(token.grab_ref());
                p.add_passive_grabber(token.grab_ref());
                assert!(p.remove_passive_grabber(&token.grab_ref()));
            }
            let mut p = d.point_mut(1);
            assert_eq!(p.state(), State::Stationary);
            p.clear_exclusive_grabber();
        }

        let after: Vec<(PointId, State, Point)> = ev
            .points()
            .iter()
            .map(|p| (p.id(), p.state(), p.global_position()))
            .collect();
        assert_eq!(before, after);
        let union = ev
            .points()
            .iter()
            .fold(States::empty(), |acc, p| acc | p.state().bit());
        assert_eq!(ev.touch_point_states(), union, "aggregate mask must match the points");
        assert!(!ev.point(2).is_accepted());
        assert_eq!(ev.point(0).exclusive_grabber(), Some(3));
        assert_eq!(ev.point(1).exclusive_grabber(), None);
        assert!(ev.point(0).passive_grabbers().is_empty());
    }

    #[test]
    fn wheel_phase_sets_sequence_position() {
        let wheel = |phase| -> PointerEvent<u32> {
            PointerEvent::wheel(
                None,
                Modifiers::empty(),
                0,
                EventPoint::with_state(PointId(0), State::Updated, Point::ZERO, Point::ZERO),
                WheelEvent {
                    pixel_delta: Vec2::ZERO,
                    angle_delta: Vec2::new(0.0, 120.0),
                    buttons: MouseButtons::empty(),
                    phase,
                    inverted: false,
                    source: MouseEventSource::NotSynthesized,
                },
            )
        };
        let position = |ev: &PointerEvent<u32>| {
            (ev.is_begin_event(), ev.is_update_event(), ev.is_end_event())
        };
        assert_eq!(position(&wheel(ScrollPhase::Begin)), (true, false, false));
        assert_eq!(position(&wheel(ScrollPhase::Update)), (false, true, false));
        assert_eq!(position(&wheel(ScrollPhase::Momentum)), (false, true, false));
        assert_eq!(position(&wheel(ScrollPhase::End)), (false, false, true));
        assert_eq!(
            position(&wheel(ScrollPhase::NoScrollPhase)),
            (false, false, false)
        );
    }
}
