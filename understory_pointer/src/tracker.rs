// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame builder: turns raw platform samples into coherent point snapshots.
//!
//! ## Overview
//!
//! A platform integration reports, per frame, the contacts it knows about as [`RawSample`]s.
//! [`PointTracker`] keeps the live contacts of one device between frames and, for each frame:
//!
//! - validates the whole frame first, so a rejected frame leaves the tracker untouched;
//! - captures the press anchor when a contact goes down;
//! - rolls the last anchor forward (`global_last = previous global`) on every other sample;
//! - retires contacts after the frame that reports them released.
//!
//! Grabs made by consumers during delivery live on the delivered snapshot. Hand that snapshot
//! back with [`PointTracker::finish_delivery`] so the next frame carries them.
//!
//! ```
//! use kurbo::Point;
//! use understory_pointer::grab::GrabToken;
//! use understory_pointer::tracker::{PointTracker, RawSample, TrackerConfig};
//! use understory_pointer::{Modifiers, PointId, State};
//!
//! let mut tracker: PointTracker<u32> = PointTracker::new(None, TrackerConfig::default());
//! let at = |x: f64, y: f64| RawSample::new(PointId(0), State::Pressed, Point::new(x, y));
//!
//! let mut down = tracker.touch_event(Modifiers::empty(), 0, &[at(10.0, 10.0)]).unwrap();
//! let knob = GrabToken::new(7_u32);
//! down.deliver().point_mut(0).set_exclusive_grabber(knob.grab_ref());
//! tracker.finish_delivery(&down);
//!
//! let moved = RawSample { state: State::Updated, ..at(14.0, 9.0) };
//! let ev = tracker.touch_event(Modifiers::empty(), 16, &[moved]).unwrap();
//! assert_eq!(ev.point(0).exclusive_grabber(), Some(7));
//! assert_eq!(ev.point(0).press_position(), Point::new(10.0, 10.0));
//! assert_eq!(ev.point(0).last_position(), Point::new(10.0, 10.0));
//! ```

use alloc::rc::Rc;
use core::fmt;

use hashbrown::{HashMap, HashSet};
use kurbo::{Point, Size, Vec2};
use smallvec::SmallVec;

use crate::device::{Capabilities, DeviceType, PointingDevice};
use crate::event::{Modifiers, PointerEvent};
use crate::kinds::TouchEventType;
use crate::point::{EventPoint, PointId, State, States, UniqueId};

/// One contact as reported by the platform for one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RawSample {
    /// Contact id, stable while the contact is down.
    pub id: PointId,
    /// Reported state. `Unknown` is rejected.
    pub state: State,
    /// Position relative to the receiver.
    pub position: Point,
    /// Position in the scene.
    pub scene_position: Point,
    /// Position on screen.
    pub global_position: Point,
    /// Velocity, if reported.
    pub velocity: Vec2,
    /// Pressure in `0.0..=1.0`.
    pub pressure: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Contact ellipse diameters.
    pub ellipse_diameters: Size,
    /// Hardware identity of the tool.
    pub unique_id: Option<UniqueId>,
}

impl RawSample {
    /// A sample at `position` in every frame, with full pressure (zero when released).
    pub fn new(id: PointId, state: State, position: Point) -> Self {
        Self {
            id,
            state,
            position,
            scene_position: position,
            global_position: position,
            velocity: Vec2::ZERO,
            pressure: if state == State::Released { 0.0 } else { 1.0 },
            rotation: 0.0,
            ellipse_diameters: Size::ZERO,
            unique_id: None,
        }
    }
}

/// Behavior switches for a [`PointTracker`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Accept `Updated`/`Stationary` samples for contacts that are not down, starting a
    /// hovering contact.
    pub hover: bool,
    /// Report live contacts missing from a frame as `Stationary`.
    pub carry_stationary: bool,
}

impl TrackerConfig {
    /// Defaults suited to `device`.
    pub fn for_device(device: &PointingDevice) -> Self {
        let hover = device.has_capability(Capabilities::HOVER)
            || matches!(
                device.device_type,
                DeviceType::Mouse | DeviceType::Stylus | DeviceType::Airbrush | DeviceType::Puck
            );
        let carry_stationary = matches!(
            device.device_type,
            DeviceType::TouchScreen | DeviceType::TouchPad
        );
        Self {
            hover,
            carry_stationary,
        }
    }
}

/// Why a frame was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrackError {
    /// The frame is older than the previous one.
    TimestampRegression {
        /// Timestamp of the previous frame.
        previous: u64,
        /// Timestamp of the rejected frame.
        timestamp: u64,
    },
    /// The same id appears twice in one frame.
    DuplicateId(PointId),
    /// A sample carries [`PointId::UNASSIGNED`].
    UnassignedId,
    /// A sample carries [`State::Unknown`].
    UnknownState(PointId),
    /// A contact that is still down was reported pressed again.
    PressedWhileActive(PointId),
    /// A sample refers to a contact that was never pressed.
    UnknownContact(PointId),
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimestampRegression {
                previous,
                timestamp,
            } => write!(
                f,
                "frame timestamp {timestamp} is earlier than the previous frame at {previous}"
            ),
            Self::DuplicateId(id) => write!(f, "point {id} appears more than once in the frame"),
            Self::UnassignedId => f.write_str("sample has no point id"),
            Self::UnknownState(id) => write!(f, "point {id} has an unknown state"),
            Self::PressedWhileActive(id) => {
                write!(f, "point {id} was pressed again before being released")
            }
            Self::UnknownContact(id) => write!(f, "point {id} is not a live contact"),
        }
    }
}

impl core::error::Error for TrackError {}

/// Frame output: touch frames rarely carry more than a handful of contacts.
pub type FramePoints<K> = SmallVec<[EventPoint<K>; 4]>;

#[derive(Debug)]
struct Contact<K> {
    point: EventPoint<K>,
    pressed: bool,
}

/// Live contacts of one device, carried from frame to frame.
#[derive(Debug)]
pub struct PointTracker<K> {
    device: Option<Rc<PointingDevice>>,
    config: TrackerConfig,
    contacts: HashMap<PointId, Contact<K>>,
    last_timestamp: Option<u64>,
    sequence: u64,
}

impl<K: Clone> PointTracker<K> {
    /// A tracker with no live contacts.
    pub fn new(device: Option<Rc<PointingDevice>>, config: TrackerConfig) -> Self {
        Self {
            device,
            config,
            contacts: HashMap::new(),
            last_timestamp: None,
            sequence: 0,
        }
    }

    /// A tracker for `device` using [`TrackerConfig::for_device`].
    pub fn for_device(device: Rc<PointingDevice>) -> Self {
        let config = TrackerConfig::for_device(&device);
        Self::new(Some(device), config)
    }

    /// The device whose contacts are tracked.
    pub fn device(&self) -> Option<&Rc<PointingDevice>> {
        self.device.as_ref()
    }

    /// Behavior switches.
    pub fn config(&self) -> TrackerConfig {
        self.config
    }

    /// Number of live contacts (pressed or hovering).
    pub fn live_count(&self) -> usize {
        self.contacts.len()
    }

    /// Returns true if `id` is a live contact.
    pub fn is_live(&self, id: PointId) -> bool {
        self.contacts.contains_key(&id)
    }

    /// The latest snapshot of the live contact `id`.
    pub fn live_point(&self, id: PointId) -> Option<&EventPoint<K>> {
        self.contacts.get(&id).map(|c| &c.point)
    }

    /// Latest snapshots of every live contact, in no particular order.
    pub fn live_points(&self) -> impl Iterator<Item = &EventPoint<K>> {
        self.contacts.values().map(|c| &c.point)
    }

    fn validate(&self, timestamp: u64, samples: &[RawSample]) -> Result<(), TrackError> {
        if let Some(previous) = self.last_timestamp
            && timestamp < previous
        {
            return Err(TrackError::TimestampRegression {
                previous,
                timestamp,
            });
        }
        let mut seen = HashSet::with_capacity(samples.len());
        for s in samples {
            if !s.id.is_assigned() {
                return Err(TrackError::UnassignedId);
            }
            if !seen.insert(s.id) {
                return Err(TrackError::DuplicateId(s.id));
            }
            let contact = self.contacts.get(&s.id);
            match s.state {
                State::Unknown => return Err(TrackError::UnknownState(s.id)),
                State::Pressed => {
                    if contact.is_some_and(|c| c.pressed) {
                        return Err(TrackError::PressedWhileActive(s.id));
                    }
                }
                State::Updated | State::Stationary => {
                    if contact.is_none() && !self.config.hover {
                        return Err(TrackError::UnknownContact(s.id));
                    }
                }
                State::Released => {
                    if contact.is_none() {
                        return Err(TrackError::UnknownContact(s.id));
                    }
                }
            }
        }
        Ok(())
    }

    /// Build the snapshots for one frame.
    ///
    /// Points come out in sample order, followed (with `carry_stationary`) by live contacts
    /// absent from the frame, in id order. On error nothing is changed.
    pub fn frame(
        &mut self,
        timestamp: u64,
        samples: &[RawSample],
    ) -> Result<FramePoints<K>, TrackError> {
        if let Err(e) = self.validate(timestamp, samples) {
            log::warn!("rejected pointer frame at {timestamp}: {e}");
            return Err(e);
        }
        self.last_timestamp = Some(timestamp);
        self.sequence += 1;
        let sequence = self.sequence;

        let mut out = FramePoints::new();
        for s in samples {
            let point = match s.state {
                State::Pressed => {
                    let mut point = match self.contacts.remove(&s.id) {
                        // A hovering contact keeps its grabs when it goes down.
                        Some(hovering) => hovering.point,
                        None => EventPoint::new(s.id),
                    };
                    point.apply_sample(s, timestamp, sequence);
                    point.begin_press(timestamp);
                    self.contacts.insert(
                        s.id,
                        Contact {
                            point: point.clone(),
                            pressed: true,
                        },
                    );
                    point
                }
                State::Released => match self.contacts.remove(&s.id) {
                    Some(mut contact) => {
                        contact.point.apply_sample(s, timestamp, sequence);
                        log::debug!("point {} released and retired", s.id);
                        contact.point
                    }
                    None => continue,
                },
                State::Updated | State::Stationary => {
                    let contact = self.contacts.entry(s.id).or_insert_with(|| {
                        let mut point =
                            EventPoint::new(s.id).with_global_position(s.global_position);
                        point.begin_press(timestamp);
                        Contact {
                            point,
                            pressed: false,
                        }
                    });
                    contact.point.apply_sample(s, timestamp, sequence);
                    contact.point.clone()
                }
                State::Unknown => continue,
            };
            out.push(point);
        }

        if self.config.carry_stationary {
            let mut absent: SmallVec<[PointId; 4]> = self
                .contacts
                .keys()
                .filter(|id| !samples.iter().any(|s| s.id == **id))
                .copied()
                .collect();
            absent.sort_unstable();
            for id in absent {
                if let Some(contact) = self.contacts.get_mut(&id) {
                    contact.point.hold(timestamp, sequence);
                    out.push(contact.point.clone());
                }
            }
        }
        Ok(out)
    }

    /// Build a touch event for one frame.
    pub fn touch_event(
        &mut self,
        modifiers: Modifiers,
        timestamp: u64,
        samples: &[RawSample],
    ) -> Result<PointerEvent<K>, TrackError> {
        let points = self.frame(timestamp, samples)?;
        let states = points
            .iter()
            .fold(States::empty(), |acc, p| acc | p.state().bit());
        Ok(PointerEvent::touch(
            self.device.clone(),
            modifiers,
            timestamp,
            TouchEventType::from_states(states),
            points,
        ))
    }

    /// Report every live contact released in a cancel event and retire them all.
    pub fn cancel(&mut self, modifiers: Modifiers, timestamp: u64) -> PointerEvent<K> {
        let timestamp = self.last_timestamp.map_or(timestamp, |t| t.max(timestamp));
        self.last_timestamp = Some(timestamp);
        self.sequence += 1;
        let sequence = self.sequence;

        let mut contacts: SmallVec<[Contact<K>; 4]> =
            self.contacts.drain().map(|(_, c)| c).collect();
        contacts.sort_unstable_by_key(|c| c.point.id());
        log::debug!("cancelling {} live contacts", contacts.len());

        let points = contacts.into_iter().map(|c| {
            let mut point = c.point;
            let sample = RawSample {
                id: point.id(),
                state: State::Released,
                position: point.position(),
                scene_position: point.scene_position(),
                global_position: point.global_position(),
                velocity: Vec2::ZERO,
                pressure: 0.0,
                rotation: point.rotation(),
                ellipse_diameters: point.ellipse_diameters(),
                unique_id: point.unique_id(),
            };
            point.apply_sample(&sample, timestamp, sequence);
            point
        });
        PointerEvent::touch(
            self.device.clone(),
            modifiers,
            timestamp,
            TouchEventType::Cancel,
            points,
        )
    }

    /// Carry grabs made during delivery of `event` back into the live contacts.
    ///
    /// Points whose contact has been retired are skipped, as are points from a frame older than
    /// the contact's latest one, so a late hand-back never overwrites newer grabs.
    pub fn finish_delivery(&mut self, event: &PointerEvent<K>) {
        for p in event.points() {
            let Some(contact) = self.contacts.get_mut(&p.id()) else {
                continue;
            };
            if p.sequence() < contact.point.sequence() {
                log::debug!(
                    "point {}: ignoring grabs from frame {}, contact is at frame {}",
                    p.id(),
                    p.sequence(),
                    contact.point.sequence()
                );
                continue;
            }
            contact.point.adopt_grabs(p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::PointerType;
    use crate::grab::GrabToken;
    use crate::kinds::EventKind;
    use alloc::vec::Vec;

    fn sample(id: i32, state: State, global: Point, local: Point) -> RawSample {
        RawSample {
            position: local,
            ..RawSample::new(PointId(id), state, global)
        }
    }

    fn touch_tracker() -> PointTracker<u32> {
        PointTracker::new(
            None,
            TrackerConfig {
                hover: false,
                carry_stationary: true,
            },
        )
    }

    #[test]
    fn press_anchor_follows_receiver_origin() {
        let mut t: PointTracker<u32> = PointTracker::new(None, TrackerConfig::default());
        // Pressed at global (10, 10) over a receiver at origin (0, 0).
        let down = t
            .frame(
                0,
                &[sample(1, State::Pressed, Point::new(10.0, 10.0), Point::new(10.0, 10.0))],
            )
            .unwrap();
        assert_eq!(down[0].state(), State::Pressed);
        assert_eq!(down[0].press_timestamp(), 0);

        // Receiver has moved to origin (5, 5); contact now at global (12, 10).
        let moved = t
            .frame(
                16,
                &[sample(1, State::Updated, Point::new(12.0, 10.0), Point::new(7.0, 5.0))],
            )
            .unwrap();
        let p = &moved[0];
        assert_eq!(p.press_position(), Point::new(5.0, 5.0));
        assert_eq!(p.global_last_position(), Point::new(10.0, 10.0));
        assert_eq!(p.last_position(), Point::new(5.0, 5.0));
        assert_eq!(p.time_held(), 0.016);
    }

    #[test]
    fn reuse_without_release_is_rejected() {
        let mut t = touch_tracker();
        let a = Point::new(1.0, 1.0);
        t.frame(0, &[sample(3, State::Pressed, a, a)]).unwrap();
        assert_eq!(
            t.frame(1, &[sample(3, State::Pressed, a, a)]).unwrap_err(),
            TrackError::PressedWhileActive(PointId(3))
        );
        // The rejected frame did not advance anything.
        assert_eq!(t.live_point(PointId(3)).unwrap().timestamp(), 0);

        t.frame(2, &[sample(3, State::Released, a, a)]).unwrap();
        assert!(!t.is_live(PointId(3)));
        let again = t.frame(3, &[sample(3, State::Pressed, a, a)]).unwrap();
        assert_eq!(again[0].press_timestamp(), 3);
    }

    #[test]
    fn invalid_frames_are_rejected_before_mutation() {
        let mut t = touch_tracker();
        let a = Point::new(1.0, 1.0);
        t.frame(10, &[sample(1, State::Pressed, a, a)]).unwrap();

        let cases = [
            (
                Vec::from([sample(1, State::Updated, a, a)]),
                5,
                TrackError::TimestampRegression {
                    previous: 10,
                    timestamp: 5,
                },
            ),
            (
                Vec::from([
                    sample(1, State::Updated, a, a),
                    sample(1, State::Updated, a, a),
                ]),
                11,
                TrackError::DuplicateId(PointId(1)),
            ),
            (
                Vec::from([sample(-1, State::Pressed, a, a)]),
                11,
                TrackError::UnassignedId,
            ),
            (
                Vec::from([sample(2, State::Unknown, a, a)]),
                11,
                TrackError::UnknownState(PointId(2)),
            ),
            (
                Vec::from([
                    sample(2, State::Pressed, a, a),
                    sample(9, State::Updated, a, a),
                ]),
                11,
                TrackError::UnknownContact(PointId(9)),
            ),
        ];
        for (samples, ts, expected) in cases {
            assert_eq!(t.frame(ts, &samples).unwrap_err(), expected);
        }
        assert_eq!(t.live_count(), 1, "no rejected frame may add contacts");
        assert!(!t.is_live(PointId(2)));
    }

    #[test]
    fn absent_contacts_are_carried_as_stationary() {
        let mut t = touch_tracker();
        let a = Point::new(1.0, 1.0);
        let b = Point::new(50.0, 50.0);
        t.frame(0, &[sample(2, State::Pressed, b, b), sample(1, State::Pressed, a, a)])
            .unwrap();

        let ev = t
            .touch_event(
                Modifiers::empty(),
                8,
                &[sample(1, State::Updated, Point::new(2.0, 1.0), Point::new(2.0, 1.0))],
            )
            .unwrap();
        let ids: Vec<PointId> = ev.points().iter().map(EventPoint::id).collect();
        assert_eq!(ids, [PointId(1), PointId(2)]);
        assert_eq!(ev.point(1).state(), State::Stationary);
        assert_eq!(ev.point(1).global_last_position(), b);
        assert_eq!(ev.touch_point_states(), States::UPDATED | States::STATIONARY);
        assert!(matches!(
            ev.kind(),
            EventKind::Touch(k) if k.kind() == TouchEventType::Update
        ));
    }

    #[test]
    fn grabs_survive_across_frames_until_owner_drops() {
        let mut t = touch_tracker();
        let a = Point::new(3.0, 3.0);
        let mut down = t
            .touch_event(Modifiers::empty(), 0, &[sample(1, State::Pressed, a, a)])
            .unwrap();
        let owner = GrabToken::new(99_u32);
        let watcher = GrabToken::new(5_u32);
        {
            let mut d = down.deliver();
            let mut p = d.point_mut(0);
            p.set_exclusive_grabber(owner.grab_ref());
            p.add_passive_grabber(watcher.grab_ref());
        }
        t.finish_delivery(&down);

        let moved = t
            .touch_event(
                Modifiers::empty(),
                1,
                &[sample(1, State::Updated, Point::new(9.0, 3.0), Point::new(9.0, 3.0))],
            )
            .unwrap();
        assert_eq!(moved.point(0).exclusive_grabber(), Some(99));
        assert_eq!(moved.point(0).grab_position(), Point::new(3.0, 3.0));
        assert_eq!(
            moved.point(0).live_passive_grabbers().collect::<Vec<_>>(),
            [5]
        );

        drop(owner);
        assert_eq!(moved.point(0).exclusive_grabber(), None);
        assert_eq!(t.live_point(PointId(1)).unwrap().exclusive_grabber(), None);
    }

    #[test]
    fn late_hand_back_does_not_overwrite_newer_grabs() {
        let mut t = touch_tracker();
        let a = Point::new(3.0, 3.0);
        let older = t
            .touch_event(Modifiers::empty(), 0, &[sample(1, State::Pressed, a, a)])
            .unwrap();
        let mut newer = t
            .touch_event(
                Modifiers::empty(),
                1,
                &[sample(1, State::Updated, Point::new(5.0, 3.0), Point::new(5.0, 3.0))],
            )
            .unwrap();
        let b = GrabToken::new(2_u32);
        newer
            .deliver()
            .point_mut(0)
            .set_exclusive_grabber(b.grab_ref());
        t.finish_delivery(&newer);
        t.finish_delivery(&older);

        let live = t.live_point(PointId(1)).unwrap();
        assert_eq!(live.exclusive_grabber(), Some(2));
        assert_eq!(live.global_grab_position(), Point::new(5.0, 3.0));
    }

    #[test]
    fn late_hand_back_is_ignored_within_one_timestamp() {
        let mut t = touch_tracker();
        let a = Point::new(3.0, 3.0);
        let mut older = t
            .touch_event(Modifiers::empty(), 4, &[sample(1, State::Pressed, a, a)])
            .unwrap();
        let mut newer = t
            .touch_event(Modifiers::empty(), 4, &[sample(1, State::Stationary, a, a)])
            .unwrap();
        let stale = GrabToken::new(8_u32);
        older
            .deliver()
            .point_mut(0)
            .set_exclusive_grabber(stale.grab_ref());
        t.finish_delivery(&older);
        assert_eq!(t.live_point(PointId(1)).unwrap().exclusive_grabber(), None);

        // The current frame still hands back normally.
        newer
            .deliver()
            .point_mut(0)
            .set_exclusive_grabber(stale.grab_ref());
        t.finish_delivery(&newer);
        assert_eq!(t.live_point(PointId(1)).unwrap().exclusive_grabber(), Some(8));
    }

    #[test]
    fn finish_delivery_skips_retired_contacts() {
        let mut t = touch_tracker();
        let a = Point::new(3.0, 3.0);
        t.frame(0, &[sample(1, State::Pressed, a, a)]).unwrap();
        let mut up = t
            .touch_event(Modifiers::empty(), 1, &[sample(1, State::Released, a, a)])
            .unwrap();
        assert!(matches!(
            up.kind(),
            EventKind::Touch(k) if k.kind() == TouchEventType::End
        ));
        let token = GrabToken::new(1_u32);
        up.deliver()
            .point_mut(0)
            .set_exclusive_grabber(token.grab_ref());
        t.finish_delivery(&up);
        assert_eq!(t.live_count(), 0);
    }

    #[test]
    fn cancel_releases_everything() {
        let mut t = touch_tracker();
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, 4.0);
        t.frame(5, &[sample(4, State::Pressed, b, b), sample(2, State::Pressed, a, a)])
            .unwrap();

        let ev = t.cancel(Modifiers::ALT, 9);
        assert!(ev.is_end_event());
        assert_eq!(ev.point_count(), 2);
        assert_eq!(ev.point(0).id(), PointId(2));
        assert_eq!(ev.touch_point_states(), States::RELEASED);
        assert!(ev.points().iter().all(|p| p.pressure() == 0.0));
        assert_eq!(ev.point(1).global_position(), b);
        assert_eq!(t.live_count(), 0);

        // The same ids can be pressed again.
        t.frame(10, &[sample(2, State::Pressed, a, a)]).unwrap();
    }

    #[test]
    fn hover_starts_unpressed_contacts() {
        let mouse = Rc::new(PointingDevice::new(
            "mouse",
            1,
            DeviceType::Mouse,
            PointerType::Generic,
        ));
        let mut t: PointTracker<u32> = PointTracker::for_device(mouse);
        assert!(t.config().hover);
        assert!(!t.config().carry_stationary);

        let a = Point::new(4.0, 4.0);
        let hovering = t.frame(0, &[sample(0, State::Updated, a, a)]).unwrap();
        assert_eq!(hovering[0].state(), State::Updated);
        assert!(t.is_live(PointId(0)));

        // Going down from hover is a fresh press at the current position.
        let b = Point::new(6.0, 4.0);
        let down = t.frame(4, &[sample(0, State::Pressed, b, b)]).unwrap();
        assert_eq!(down[0].global_press_position(), b);
        assert_eq!(down[0].press_timestamp(), 4);
        assert_eq!(
            t.frame(5, &[sample(0, State::Pressed, b, b)]).unwrap_err(),
            TrackError::PressedWhileActive(PointId(0))
        );
    }

    #[test]
    fn config_for_touch_devices() {
        let screen = PointingDevice::new(
            "panel",
            2,
            DeviceType::TouchScreen,
            PointerType::Finger,
        );
        assert_eq!(
            TrackerConfig::for_device(&screen),
            TrackerConfig {
                hover: false,
                carry_stationary: true,
            }
        );
    }

    #[test]
    fn error_messages_name_the_point() {
        let msg = alloc::format!("{}", TrackError::PressedWhileActive(PointId(3)));
        assert_eq!(msg, "point #3 was pressed again before being released");
    }
}
