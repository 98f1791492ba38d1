// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contact points: one finger, stylus tip, or mouse cursor at one instant.
//!
//! ## Stored versus derived positions
//!
//! An [`EventPoint`] stores its current position in the local, scene, and global frames, and
//! three global anchors: where it was pressed, where it was last grabbed, and where it was in the
//! previous frame. Every other anchor/frame combination is computed by
//! [`coords::derive`](crate::coords::derive) on each read and is never cached.
//!
//! ## Mutability
//!
//! Position data is written once by the frame builder (see [`crate::tracker`] or the `with_*`
//! builders). The only public `&mut self` methods are the acceptance flag and the grab
//! registry, which a dispatcher reaches through [`Delivery`](crate::Delivery).

use core::fmt;

use kurbo::{Point, Size, Vec2};

use crate::coords::{Anchor, Frame, derive};
use crate::grab::{GrabRef, Grabs};
use crate::tracker::RawSample;

/// Identifier of a contact within one device stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(pub i32);

impl PointId {
    /// The id of a point that has not been assigned one yet.
    pub const UNASSIGNED: Self = Self(-1);

    /// Returns true unless this is [`PointId::UNASSIGNED`].
    pub const fn is_assigned(self) -> bool {
        self.0 != Self::UNASSIGNED.0
    }
}

impl Default for PointId {
    fn default() -> Self {
        Self::UNASSIGNED
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stable hardware identity of a tool, such as a stylus serial number.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UniqueId(pub u64);

/// Lifecycle state of a contact in one snapshot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum State {
    /// Not known; the point has not been through a frame builder.
    #[default]
    Unknown,
    /// Still down, not moved since the previous frame.
    Stationary,
    /// Went down in this frame.
    Pressed,
    /// Still down (or hovering) and moved or changed.
    Updated,
    /// Lifted in this frame. The contact is retired afterwards.
    Released,
}

impl State {
    /// The flag for this state in a [`States`] mask. `Unknown` maps to the empty set.
    pub const fn bit(self) -> States {
        match self {
            Self::Unknown => States::empty(),
            Self::Stationary => States::STATIONARY,
            Self::Pressed => States::PRESSED,
            Self::Updated => States::UPDATED,
            Self::Released => States::RELEASED,
        }
    }
}

bitflags::bitflags! {
    /// Set of point states, used for the aggregate state of a touch event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct States: u8 {
        /// At least one point went down.
        const PRESSED    = 0b0000_0001;
        /// At least one point moved.
        const UPDATED    = 0b0000_0010;
        /// At least one point stayed put.
        const STATIONARY = 0b0000_0100;
        /// At least one point was lifted.
        const RELEASED   = 0b0000_1000;
    }
}

impl From<State> for States {
    fn from(state: State) -> Self {
        state.bit()
    }
}

/// State of one contact at one instant.
///
/// `K` is the key type of the external object graph that grabbers belong to.
///
/// ```
/// use kurbo::Point;
/// use understory_pointer::{EventPoint, PointId, State};
///
/// let p: EventPoint<u32> = EventPoint::with_state(
///     PointId(0),
///     State::Pressed,
///     Point::new(4.0, 4.0),
///     Point::new(104.0, 54.0),
/// )
/// .with_position(Point::new(1.0, 2.0));
///
/// assert_eq!(p.press_position(), Point::new(1.0, 2.0));
/// assert_eq!(p.scene_press_position(), Point::new(4.0, 4.0));
/// assert!(p.is_accepted());
/// ```
#[derive(Clone, Debug)]
pub struct EventPoint<K> {
    id: PointId,
    state: State,
    position: Point,
    scene_position: Point,
    global_position: Point,
    global_press_position: Point,
    global_grab_position: Point,
    global_last_position: Point,
    velocity: Vec2,
    pressure: f64,
    rotation: f64,
    ellipse_diameters: Size,
    timestamp: u64,
    press_timestamp: u64,
    unique_id: Option<UniqueId>,
    accepted: bool,
    grabs: Grabs<K>,
    // Sequence number of the tracker frame that produced this snapshot; 0 when built by hand.
    sequence: u64,
}

impl<K> EventPoint<K> {
    /// A point with the given id, unknown state, and every position at the origin.
    pub fn new(id: PointId) -> Self {
        Self {
            id,
            state: State::Unknown,
            position: Point::ZERO,
            scene_position: Point::ZERO,
            global_position: Point::ZERO,
            global_press_position: Point::ZERO,
            global_grab_position: Point::ZERO,
            global_last_position: Point::ZERO,
            velocity: Vec2::ZERO,
            pressure: 1.0,
            rotation: 0.0,
            ellipse_diameters: Size::ZERO,
            timestamp: 0,
            press_timestamp: 0,
            unique_id: None,
            accepted: true,
            grabs: Grabs::new(),
            sequence: 0,
        }
    }

    /// A point in `state` at the given scene and global positions.
    ///
    /// The local position starts out equal to the scene position. All global anchors are set to
    /// `global_position`. A released point reports zero pressure.
    pub fn with_state(
        id: PointId,
        state: State,
        scene_position: Point,
        global_position: Point,
    ) -> Self {
        let mut p = Self::new(id);
        p.state = state;
        p.position = scene_position;
        p.scene_position = scene_position;
        p.global_position = global_position;
        p.global_press_position = global_position;
        p.global_grab_position = global_position;
        p.global_last_position = global_position;
        if state == State::Released {
            p.pressure = 0.0;
        }
        p
    }

    // --- builders ---

    /// Set the state.
    pub fn with_point_state(mut self, state: State) -> Self {
        self.state = state;
        self
    }

    /// Set the local (receiver-relative) position.
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Set the scene position.
    pub fn with_scene_position(mut self, position: Point) -> Self {
        self.scene_position = position;
        self
    }

    /// Set the global position. Anchors are left untouched.
    pub fn with_global_position(mut self, position: Point) -> Self {
        self.global_position = position;
        self
    }

    /// Set the global press anchor.
    pub fn with_global_press_position(mut self, position: Point) -> Self {
        self.global_press_position = position;
        self
    }

    /// Set the global grab anchor.
    pub fn with_global_grab_position(mut self, position: Point) -> Self {
        self.global_grab_position = position;
        self
    }

    /// Set the global position of the previous frame.
    pub fn with_global_last_position(mut self, position: Point) -> Self {
        self.global_last_position = position;
        self
    }

    /// Set the velocity reported by the device.
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the pressure, nominally in `0.0..=1.0`.
    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = pressure;
        self
    }

    /// Set the rotation in degrees.
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the diameters of the contact ellipse.
    pub fn with_ellipse_diameters(mut self, diameters: Size) -> Self {
        self.ellipse_diameters = diameters;
        self
    }

    /// Set the timestamp of this sample, in milliseconds.
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Set the timestamp at which the contact was pressed, in milliseconds.
    pub fn with_press_timestamp(mut self, timestamp: u64) -> Self {
        self.press_timestamp = timestamp;
        self
    }

    /// Set the hardware identity.
    pub fn with_unique_id(mut self, unique_id: Option<UniqueId>) -> Self {
        self.unique_id = unique_id;
        self
    }

    /// A copy of this point as seen by a receiver whose local frame puts it at `position`.
    ///
    /// Anchors and grabs are shared with `self`, so derived local anchors follow the new origin.
    pub fn localized(&self, position: Point) -> Self
    where
        K: Clone,
    {
        self.clone().with_position(position)
    }

    // --- identity and state ---

    /// Contact id.
    pub fn id(&self) -> PointId {
        self.id
    }

    /// Lifecycle state in this snapshot.
    pub fn state(&self) -> State {
        self.state
    }

    /// Hardware identity, if the device reports one.
    pub fn unique_id(&self) -> Option<UniqueId> {
        self.unique_id
    }

    // --- stored positions ---

    /// Current position relative to the receiver.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current position in the scene.
    pub fn scene_position(&self) -> Point {
        self.scene_position
    }

    /// Current position on screen.
    pub fn global_position(&self) -> Point {
        self.global_position
    }

    /// Screen position at press time.
    pub fn global_press_position(&self) -> Point {
        self.global_press_position
    }

    /// Screen position when the exclusive grabber last changed.
    pub fn global_grab_position(&self) -> Point {
        self.global_grab_position
    }

    /// Screen position in the previous frame.
    pub fn global_last_position(&self) -> Point {
        self.global_last_position
    }

    // --- derived positions ---

    /// Press position relative to the receiver.
    pub fn press_position(&self) -> Point {
        self.anchor_position(Anchor::Press, Frame::Local)
    }

    /// Grab position relative to the receiver.
    pub fn grab_position(&self) -> Point {
        self.anchor_position(Anchor::Grab, Frame::Local)
    }

    /// Previous-frame position relative to the receiver.
    pub fn last_position(&self) -> Point {
        self.anchor_position(Anchor::Last, Frame::Local)
    }

    /// Press position in the scene.
    pub fn scene_press_position(&self) -> Point {
        self.anchor_position(Anchor::Press, Frame::Scene)
    }

    /// Grab position in the scene.
    pub fn scene_grab_position(&self) -> Point {
        self.anchor_position(Anchor::Grab, Frame::Scene)
    }

    /// Previous-frame position in the scene.
    pub fn scene_last_position(&self) -> Point {
        self.anchor_position(Anchor::Last, Frame::Scene)
    }

    /// Position of `anchor` expressed in `frame`.
    pub fn anchor_position(&self, anchor: Anchor, frame: Frame) -> Point {
        let global_anchor = match anchor {
            Anchor::Press => self.global_press_position,
            Anchor::Grab => self.global_grab_position,
            Anchor::Last => self.global_last_position,
        };
        match frame {
            Frame::Global => global_anchor,
            Frame::Scene => derive(global_anchor, self.global_position, self.scene_position),
            Frame::Local => derive(global_anchor, self.global_position, self.position),
        }
    }

    // --- device data ---

    /// Velocity reported by the device.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Pressure, nominally in `0.0..=1.0`.
    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    /// Rotation in degrees.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Diameters of the contact ellipse.
    pub fn ellipse_diameters(&self) -> Size {
        self.ellipse_diameters
    }

    /// Timestamp of this sample in milliseconds.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Timestamp of the press in milliseconds.
    pub fn press_timestamp(&self) -> u64 {
        self.press_timestamp
    }

    /// Seconds since the press.
    pub fn time_held(&self) -> f64 {
        self.timestamp.saturating_sub(self.press_timestamp) as f64 / 1000.0
    }

    // --- acceptance and grabs ---

    /// Per-point acceptance flag.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Set the acceptance of this point only.
    pub fn set_accepted(&mut self, accepted: bool) {
        self.accepted = accepted;
    }

    /// Current exclusive grabber, `None` if unset or destroyed.
    pub fn exclusive_grabber(&self) -> Option<K>
    where
        K: Clone,
    {
        self.grabs.exclusive()
    }

    /// Replace the exclusive grabber; an empty handle clears it.
    ///
    /// When the grabber changes to a live object, the grab anchor moves to the current global
    /// position.
    pub fn set_exclusive_grabber(&mut self, grabber: GrabRef<K>) {
        let live = grabber.is_live();
        if !self.grabs.set_exclusive(grabber) {
            return;
        }
        if live {
            self.global_grab_position = self.global_position;
        }
        log::debug!(
            "point {}: exclusive grabber {} at {:?}",
            self.id,
            if live { "set" } else { "cleared" },
            self.global_position
        );
    }

    /// Clear the exclusive grabber.
    pub fn clear_exclusive_grabber(&mut self) {
        self.set_exclusive_grabber(GrabRef::empty());
    }

    /// Passive grabbers in insertion order; entries read empty once their object is gone.
    pub fn passive_grabbers(&self) -> &[GrabRef<K>] {
        self.grabs.passive()
    }

    /// Keys of the passive grabbers still alive.
    pub fn live_passive_grabbers(&self) -> impl Iterator<Item = K> + '_
    where
        K: Clone,
    {
        self.grabs.live_passive()
    }

    /// Replace the passive grabbers. Duplicates are kept.
    pub fn set_passive_grabbers(&mut self, grabbers: impl IntoIterator<Item = GrabRef<K>>) {
        self.grabs.set_passive(grabbers);
    }

    /// Append one passive grabber. Duplicates are kept.
    pub fn add_passive_grabber(&mut self, grabber: GrabRef<K>) {
        self.grabs.add_passive(grabber);
    }

    /// Remove the first passive entry equal to `grabber`.
    pub fn remove_passive_grabber(&mut self, grabber: &GrabRef<K>) -> bool {
        self.grabs.remove_passive(grabber)
    }

    /// Drop every passive grabber.
    pub fn clear_passive_grabbers(&mut self) {
        self.grabs.clear_passive();
    }

    /// The grab registry.
    pub fn grabs(&self) -> &Grabs<K> {
        &self.grabs
    }

    // --- frame builder hooks ---

    /// Start a new press at the current positions.
    pub(crate) fn begin_press(&mut self, timestamp: u64) {
        self.state = State::Pressed;
        self.global_press_position = self.global_position;
        self.global_grab_position = self.global_position;
        self.global_last_position = self.global_position;
        self.press_timestamp = timestamp;
        self.timestamp = timestamp;
    }

    /// Carry this point into tracker frame `sequence` without movement.
    pub(crate) fn hold(&mut self, timestamp: u64, sequence: u64) {
        self.state = State::Stationary;
        self.global_last_position = self.global_position;
        self.timestamp = timestamp;
        self.sequence = sequence;
    }

    /// Sequence number of the tracker frame that produced this snapshot.
    pub(crate) fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Take over grab state from another snapshot of the same contact.
    pub(crate) fn adopt_grabs(&mut self, other: &Self) {
        self.grabs = other.grabs.clone();
        self.global_grab_position = other.global_grab_position;
    }

    /// Overwrite the current sample fields for tracker frame `sequence`, rolling the last
    /// anchor forward.
    pub(crate) fn apply_sample(&mut self, sample: &RawSample, timestamp: u64, sequence: u64) {
        self.state = sample.state;
        self.global_last_position = self.global_position;
        self.position = sample.position;
        self.scene_position = sample.scene_position;
        self.global_position = sample.global_position;
        self.velocity = sample.velocity;
        self.pressure = sample.pressure;
        self.rotation = sample.rotation;
        self.ellipse_diameters = sample.ellipse_diameters;
        self.unique_id = sample.unique_id;
        self.timestamp = timestamp;
        self.sequence = sequence;
    }
}
