// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointing device descriptors and primary-device lookup.
//!
//! Devices are owned by a [`DeviceRegistry`] and shared with events as `Rc<PointingDevice>`;
//! an event never owns the device it came from.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::point::UniqueId;

/// Kind of hardware producing the events.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeviceType {
    /// Not known.
    #[default]
    Unknown,
    /// A mouse or trackball.
    Mouse,
    /// A touch screen: contacts map directly onto the display.
    TouchScreen,
    /// A touch pad: contacts drive a cursor.
    TouchPad,
    /// A tablet puck.
    Puck,
    /// A stylus on a tablet or screen.
    Stylus,
    /// An airbrush on a tablet.
    Airbrush,
    /// A keyboard.
    Keyboard,
}

/// Kind of tool touching the device.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerType {
    /// Not known.
    #[default]
    Unknown,
    /// A mouse-like pointer.
    Generic,
    /// A finger.
    Finger,
    /// The tip of a pen.
    Pen,
    /// The eraser end of a pen.
    Eraser,
    /// A lens cursor on a tablet.
    Cursor,
}

bitflags::bitflags! {
    /// What a device reports beyond a position.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        /// Reports positions.
        const POSITION            = 1 << 0;
        /// Reports contact ellipse diameters.
        const AREA                = 1 << 1;
        /// Reports pressure.
        const PRESSURE            = 1 << 2;
        /// Reports velocity.
        const VELOCITY            = 1 << 3;
        /// Reports positions normalized to the device surface.
        const NORMALIZED_POSITION = 1 << 4;
        /// Events are synthesized into mouse events by the platform.
        const MOUSE_EMULATION     = 1 << 5;
        /// Has a scroll wheel or scroll gesture.
        const SCROLL              = 1 << 6;
        /// Reports motion while not in contact.
        const HOVER               = 1 << 7;
        /// Reports rotation.
        const ROTATION            = 1 << 8;
        /// Reports tilt along x.
        const X_TILT              = 1 << 9;
        /// Reports tilt along y.
        const Y_TILT              = 1 << 10;
        /// Reports tangential (barrel wheel) pressure.
        const TANGENTIAL_PRESSURE = 1 << 11;
        /// Reports height above the surface.
        const Z_POSITION          = 1 << 12;
        /// Scrolls in pixels rather than steps.
        const PIXEL_SCROLL        = 1 << 13;
    }
}

/// Descriptor of one pointing device.
#[derive(Clone, Debug, PartialEq)]
pub struct PointingDevice {
    /// Human-readable name.
    pub name: String,
    /// Platform identifier, unique within a registry.
    pub system_id: i64,
    /// Hardware kind.
    pub device_type: DeviceType,
    /// Tool kind.
    pub pointer_type: PointerType,
    /// Reported extras.
    pub capabilities: Capabilities,
    /// Maximum number of simultaneous contacts.
    pub maximum_points: u8,
    /// Number of buttons.
    pub button_count: u8,
    /// Seat this device belongs to; empty for the default seat.
    pub seat_name: String,
    /// Hardware identity of the tool, if known.
    pub unique_id: Option<UniqueId>,
}

impl PointingDevice {
    /// A device with the given identity and no extra capabilities.
    pub fn new(
        name: impl Into<String>,
        system_id: i64,
        device_type: DeviceType,
        pointer_type: PointerType,
    ) -> Self {
        Self {
            name: name.into(),
            system_id,
            device_type,
            pointer_type,
            capabilities: Capabilities::POSITION,
            maximum_points: 1,
            button_count: 0,
            seat_name: String::new(),
            unique_id: None,
        }
    }

    /// Set the capabilities.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Set the maximum number of simultaneous contacts.
    pub fn with_maximum_points(mut self, maximum_points: u8) -> Self {
        self.maximum_points = maximum_points;
        self
    }

    /// Set the number of buttons.
    pub fn with_button_count(mut self, button_count: u8) -> Self {
        self.button_count = button_count;
        self
    }

    /// Set the seat name.
    pub fn with_seat(mut self, seat_name: impl Into<String>) -> Self {
        self.seat_name = seat_name.into();
        self
    }

    /// Returns true if every flag in `capability` is reported.
    pub fn has_capability(&self, capability: Capabilities) -> bool {
        self.capabilities.contains(capability)
    }

    /// Returns true if the device can track more than one contact at once.
    pub fn is_multi_point(&self) -> bool {
        self.maximum_points > 1
    }
}

/// Registry of the devices known to a platform integration.
#[derive(Clone, Debug, Default)]
pub struct DeviceRegistry {
    devices: Vec<Rc<PointingDevice>>,
}

impl DeviceRegistry {
    /// Name of the mouse registered when a seat has none.
    pub const CORE_POINTER_NAME: &'static str = "core pointer";

    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a device, replacing any device with the same `system_id`.
    pub fn register(&mut self, device: PointingDevice) -> Rc<PointingDevice> {
        let device = Rc::new(device);
        match self
            .devices
            .iter_mut()
            .find(|d| d.system_id == device.system_id)
        {
            Some(slot) => *slot = device.clone(),
            None => self.devices.push(device.clone()),
        }
        log::debug!(
            "registered pointing device {:?} ({:?}, id {})",
            device.name,
            device.device_type,
            device.system_id
        );
        device
    }

    /// Remove the device with `system_id`. Events that already hold it keep their copy.
    pub fn unregister(&mut self, system_id: i64) -> Option<Rc<PointingDevice>> {
        let i = self.devices.iter().position(|d| d.system_id == system_id)?;
        Some(self.devices.remove(i))
    }

    /// Look up a device by platform id.
    pub fn by_system_id(&self, system_id: i64) -> Option<&Rc<PointingDevice>> {
        self.devices.iter().find(|d| d.system_id == system_id)
    }

    /// All registered devices in registration order.
    pub fn devices(&self) -> &[Rc<PointingDevice>] {
        &self.devices
    }

    /// The first registered device of `device_type` on `seat` (any seat if `seat` is empty).
    pub fn find(&self, device_type: DeviceType, seat: &str) -> Option<&Rc<PointingDevice>> {
        self.devices
            .iter()
            .find(|d| d.device_type == device_type && (seat.is_empty() || d.seat_name == seat))
    }

    /// The primary mouse of `seat` (any seat if `seat` is empty).
    ///
    /// If no mouse is registered, a fallback core pointer is registered and returned.
    pub fn primary_pointing_device(&mut self, seat: &str) -> Rc<PointingDevice> {
        if let Some(d) = self.find(DeviceType::Mouse, seat) {
            return d.clone();
        }
        let system_id = self.unused_system_id();
        let core = PointingDevice::new(
            Self::CORE_POINTER_NAME,
            system_id,
            DeviceType::Mouse,
            PointerType::Generic,
        )
        .with_capabilities(Capabilities::POSITION | Capabilities::SCROLL | Capabilities::HOVER)
        .with_button_count(3)
        .with_seat(seat);
        log::debug!("no mouse on seat {seat:?}; falling back to a core pointer");
        self.register(core)
    }

    fn unused_system_id(&self) -> i64 {
        let max = self.devices.iter().map(|d| d.system_id).max();
        match max {
            None => 1,
            Some(m) if m < i64::MAX => m + 1,
            // The registry holds fewer than `i64::MAX` devices, so a gap exists.
            Some(_) => (1..=i64::MAX)
                .find(|id| self.by_system_id(*id).is_none())
                .unwrap_or(0),
        }
    }
}
