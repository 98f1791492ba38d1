// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor derivation across coordinate frames.
//!
//! A contact stores its current position in three frames (local, scene, global) but only the
//! global copy of each anchor (press, grab, last). The anchor in any other frame is derived on
//! demand:
//!
//! ```text
//! X_A = global_A - global + X
//! ```
//!
//! The receiver's origin may move between frames (a window dragged mid-gesture), so storing
//! local anchors would drift out of sync with the current local position. Deriving from the
//! global anchor keeps every frame a pure translation of the others.
//!
//! ```
//! use kurbo::Point;
//! use understory_pointer::coords::derive;
//!
//! // Pressed at global (10, 10). The receiver has since moved to origin (5, 5)
//! // and the contact is now at global (12, 10), local (7, 5).
//! let local_press = derive(Point::new(10.0, 10.0), Point::new(12.0, 10.0), Point::new(7.0, 5.0));
//! assert_eq!(local_press, Point::new(5.0, 5.0));
//! ```

use kurbo::Point;

/// Remembered positions of a contact.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Where the contact was pressed.
    Press,
    /// Where the contact was when its exclusive grabber last changed.
    Grab,
    /// Where the contact was in the previous frame.
    Last,
}

/// Coordinate frames a position can be expressed in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Frame {
    /// Relative to the receiver of the event.
    Local,
    /// Relative to the scene or window.
    Scene,
    /// Screen coordinates.
    Global,
}

/// Express a global anchor in the frame of `current`.
///
/// `current_global` and `current` must describe the same instant. Computes
/// `(anchor_global - current_global) + current` with no intermediate rounding beyond `f64`.
#[inline]
pub fn derive(anchor_global: Point, current_global: Point, current: Point) -> Point {
    current + (anchor_global - current_global)
}
