// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kind-specific payloads carried by a [`PointerEvent`](crate::PointerEvent).
//!
//! Shared data (device, modifiers, timestamp, points) lives on the event envelope; each
//! payload holds only what its kind adds.

use kurbo::{Point, Vec2};

use crate::point::States;

/// A mouse button.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// No button is involved.
    #[default]
    None,
    /// Usually the left button.
    Primary,
    /// Usually the right button.
    Secondary,
    /// Usually the wheel button.
    Middle,
    /// Browser back.
    Back,
    /// Browser forward.
    Forward,
}

impl MouseButton {
    /// The flag for this button in a [`MouseButtons`] set. `None` maps to the empty set.
    pub const fn bit(self) -> MouseButtons {
        match self {
            Self::None => MouseButtons::empty(),
            Self::Primary => MouseButtons::PRIMARY,
            Self::Secondary => MouseButtons::SECONDARY,
            Self::Middle => MouseButtons::MIDDLE,
            Self::Back => MouseButtons::BACK,
            Self::Forward => MouseButtons::FORWARD,
        }
    }
}

bitflags::bitflags! {
    /// Set of buttons held down.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MouseButtons: u8 {
        /// Primary button.
        const PRIMARY   = 1 << 0;
        /// Secondary button.
        const SECONDARY = 1 << 1;
        /// Middle button.
        const MIDDLE    = 1 << 2;
        /// Back button.
        const BACK      = 1 << 3;
        /// Forward button.
        const FORWARD   = 1 << 4;
    }
}

/// Where a mouse-style event came from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MouseEventSource {
    /// Real mouse input.
    #[default]
    NotSynthesized,
    /// Synthesized by the platform from touch or tablet input.
    SynthesizedBySystem,
    /// Synthesized by the toolkit from touch or tablet input.
    SynthesizedByApplication,
}

/// What a mouse event reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseEventType {
    /// A button went down.
    Press,
    /// A button went up.
    Release,
    /// The cursor moved.
    Move,
    /// A second press in quick succession.
    DoubleClick,
}

/// Payload of a mouse event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MouseEvent {
    /// What happened.
    pub kind: MouseEventType,
    /// The button that changed, or [`MouseButton::None`] for moves.
    pub button: MouseButton,
    /// Buttons held after this event.
    pub buttons: MouseButtons,
    /// Origin of the event.
    pub source: MouseEventSource,
}

/// What a hover event reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HoverEventType {
    /// The cursor entered the receiver.
    Enter,
    /// The cursor moved within the receiver.
    Move,
    /// The cursor left the receiver.
    Leave,
}

/// Payload of a hover event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HoverEvent {
    /// What happened.
    pub kind: HoverEventType,
    /// Local position before this event.
    pub old_position: Point,
}

/// Phase of a scroll sequence.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollPhase {
    /// Discrete wheel input outside any sequence.
    #[default]
    NoScrollPhase,
    /// A scroll sequence started.
    Begin,
    /// Scrolling continues.
    Update,
    /// The user stopped scrolling.
    End,
    /// Inertial scrolling after the user let go.
    Momentum,
}

/// Payload of a wheel event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WheelEvent {
    /// Scroll distance in pixels, zero when the device does not report it.
    pub pixel_delta: Vec2,
    /// Wheel rotation in eighths of a degree.
    pub angle_delta: Vec2,
    /// Buttons held.
    pub buttons: MouseButtons,
    /// Phase of the scroll sequence.
    pub phase: ScrollPhase,
    /// The platform inverted the deltas ("natural" scrolling).
    pub inverted: bool,
    /// Origin of the event.
    pub source: MouseEventSource,
}

impl WheelEvent {
    /// Angle delta of one notch on a typical wheel: 15 degrees.
    pub const DEFAULT_DELTAS_PER_STEP: f64 = 120.0;

    /// Angle delta expressed in wheel notches.
    pub fn angle_steps(&self) -> Vec2 {
        self.angle_delta / Self::DEFAULT_DELTAS_PER_STEP
    }
}

/// What a tablet event reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TabletEventType {
    /// The tool touched the surface.
    Press,
    /// The tool moved.
    Move,
    /// The tool left the surface.
    Release,
    /// The tool came into detection range.
    EnterProximity,
    /// The tool went out of detection range.
    LeaveProximity,
}

/// Payload of a tablet event. Pressure and rotation live on the point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TabletEvent {
    /// What happened.
    pub kind: TabletEventType,
    /// Tilt along x in degrees, positive toward the right.
    pub x_tilt: f64,
    /// Tilt along y in degrees, positive toward the user.
    pub y_tilt: f64,
    /// Height above the surface, for devices reporting it.
    pub z: f64,
    /// Barrel wheel pressure in `-1.0..=1.0`.
    pub tangential_pressure: f64,
    /// The button that changed.
    pub button: MouseButton,
    /// Buttons held.
    pub buttons: MouseButtons,
}

/// Gestures recognized by the platform.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NativeGestureType {
    /// A gesture sequence started.
    Begin,
    /// The gesture sequence ended.
    End,
    /// Two-finger pan.
    Pan,
    /// Pinch zoom; the value is the scale delta.
    Zoom,
    /// Smart zoom (double tap); the value is unused.
    SmartZoom,
    /// Rotation; the value is in degrees.
    Rotate,
    /// Swipe; the value is the direction in degrees.
    Swipe,
}

/// Payload of a native gesture event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NativeGestureEvent {
    /// Which gesture.
    pub gesture_type: NativeGestureType,
    /// Gesture-specific value.
    pub value: f64,
    /// Identifies events belonging to one gesture sequence.
    pub sequence_id: u64,
    /// Platform-specific extra argument.
    pub int_argument: u64,
}

/// Phase of a touch sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TouchEventType {
    /// Every point went down in this frame.
    Begin,
    /// Points moved, stayed, or some went down or up.
    Update,
    /// Every point was lifted.
    End,
    /// The system took the sequence away; all points are reported released.
    Cancel,
}

impl TouchEventType {
    /// Phase implied by the aggregate state of a frame.
    pub fn from_states(states: States) -> Self {
        if states == States::PRESSED {
            Self::Begin
        } else if states == States::RELEASED {
            Self::End
        } else {
            Self::Update
        }
    }
}

/// Payload of a touch event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TouchEvent {
    kind: TouchEventType,
    touch_point_states: States,
}

impl TouchEvent {
    pub(crate) fn new(kind: TouchEventType, touch_point_states: States) -> Self {
        Self {
            kind,
            touch_point_states,
        }
    }

    /// Phase of the touch sequence.
    pub fn kind(&self) -> TouchEventType {
        self.kind
    }

    /// Union of the states of every point in the event.
    pub fn touch_point_states(&self) -> States {
        self.touch_point_states
    }
}

/// Closed set of pointer event kinds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EventKind {
    /// Mouse press, release, move, or double click.
    Mouse(MouseEvent),
    /// The cursor entered a receiver.
    Enter,
    /// Hover enter, move, or leave.
    Hover(HoverEvent),
    /// Wheel or scroll gesture.
    Wheel(WheelEvent),
    /// Tablet tool input.
    Tablet(TabletEvent),
    /// Platform-recognized gesture.
    NativeGesture(NativeGestureEvent),
    /// Multi-point touch input.
    Touch(TouchEvent),
}

impl EventKind {
    /// Returns true for every kind that carries exactly one point.
    pub fn is_single_point(&self) -> bool {
        !matches!(self, Self::Touch(_))
    }
}
