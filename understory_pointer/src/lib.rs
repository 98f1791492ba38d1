// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pointer --heading-base-level=0

//! Understory Pointer: a `no_std` model of multi-pointer input events.
//!
//! ## Overview
//!
//! This crate describes what a pointer event *is*: which contacts it carries, where they are in
//! each coordinate frame, and who currently owns them. It does not decide which receiver gets an
//! event; pair it with a router such as `understory_responder` for that.
//!
//! - [`EventPoint`] is one contact (a finger, a stylus tip, the mouse cursor) at one instant.
//! - [`PointerEvent`] is an immutable snapshot of one or more points plus kind-specific data in
//!   [`EventKind`].
//! - [`Delivery`] is the scoped handle through which consumers accept events and grab points.
//! - [`PointTracker`](tracker::PointTracker) builds coherent snapshots from raw platform samples.
//!
//! ## Coordinate frames
//!
//! Each point stores its current position in the local (receiver), scene, and global (screen)
//! frames, plus three global anchors: press, grab, and last. Anchors in other frames are derived
//! on every read, so they stay consistent when the receiver moves mid-gesture. See [`coords`].
//!
//! ## Grabs
//!
//! A point may have one exclusive grabber and any number of passive grabbers. Grabbers are
//! weak: the owner keeps a [`GrabToken`](grab::GrabToken), hands out
//! [`GrabRef`](grab::GrabRef)s, and every handle reads `None` once the token is dropped. There
//! is no arbitration: the last write wins.
//!
//! ## Example
//!
//! ```
//! use kurbo::Point;
//! use understory_pointer::grab::GrabToken;
//! use understory_pointer::tracker::{PointTracker, RawSample, TrackerConfig};
//! use understory_pointer::{Modifiers, PointId, State, States};
//!
//! let mut tracker: PointTracker<&'static str> = PointTracker::new(
//!     None,
//!     TrackerConfig { hover: false, carry_stationary: true },
//! );
//! let finger = |id, state, x, y| RawSample::new(PointId(id), state, Point::new(x, y));
//!
//! // Two fingers go down; a slider grabs the first.
//! let mut ev = tracker
//!     .touch_event(
//!         Modifiers::empty(),
//!         0,
//!         &[finger(0, State::Pressed, 10.0, 10.0), finger(1, State::Pressed, 80.0, 10.0)],
//!     )
//!     .unwrap();
//! let slider = GrabToken::new("slider");
//! {
//!     let mut d = ev.deliver();
//!     d.accept();
//!     d.point_mut(0).set_exclusive_grabber(slider.grab_ref());
//!     d.point_mut(1).set_accepted(false);
//! }
//! tracker.finish_delivery(&ev);
//!
//! // Only the first finger moves; the second is carried as stationary.
//! let ev = tracker
//!     .touch_event(Modifiers::empty(), 16, &[finger(0, State::Updated, 25.0, 10.0)])
//!     .unwrap();
//! assert_eq!(ev.touch_point_states(), States::UPDATED | States::STATIONARY);
//! assert_eq!(ev.point(0).exclusive_grabber(), Some("slider"));
//! assert_eq!(ev.point(0).press_position(), Point::new(10.0, 10.0));
//!
//! // Destroying the slider releases the grab everywhere.
//! drop(slider);
//! assert_eq!(ev.point(0).exclusive_grabber(), None);
//! ```
//!
//! ## Threading
//!
//! Events, points, and grab handles use `Rc` and are `!Send`. They are meant to be created,
//! delivered, and dropped on the thread that owns the input stream.
//!
//! ## Features
//!
//! - `std` *(default)*: enables `std` support in `kurbo`.
//! - `libm`: `no_std` float support for `kurbo`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod coords;
pub mod device;
pub mod event;
pub mod grab;
pub mod kinds;
pub mod point;
pub mod tracker;

pub use device::{Capabilities, DeviceRegistry, DeviceType, PointerType, PointingDevice};
pub use event::{Delivery, Modifiers, PointDelivery, PointerEvent};
pub use kinds::{
    EventKind, HoverEvent, HoverEventType, MouseButton, MouseButtons, MouseEvent,
    MouseEventSource, MouseEventType, NativeGestureEvent, NativeGestureType, ScrollPhase,
    TabletEvent, TabletEventType, TouchEvent, TouchEventType, WheelEvent,
};
pub use point::{EventPoint, PointId, State, States, UniqueId};
