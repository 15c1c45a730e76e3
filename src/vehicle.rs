use crate::math::{unit_from_degrees, Point2d};
use cgmath::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The simulated vehicle.
#[derive(Clone, Debug)]
pub struct Vehicle {
    /// The fixed physical attributes.
    attr: VehicleAttributes,
    /// The world position, in screen coordinates.
    pos: Point2d,
    /// The heading in degrees. Unnormalized; trigonometry wraps it implicitly.
    heading: f64,
    /// The signed speed in units per frame. Positive is forward along the heading.
    speed: f64,
    /// The cumulative distance traveled in units. Never decreases.
    distance: f64,
    /// The position recorded at the end of the previous frame,
    /// used only to accumulate the distance traveled.
    last_pos: Point2d,
}

/// The fixed attributes of a simulated vehicle, set at creation.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VehicleAttributes {
    /// Speed gained per frame of full acceleration, in units/frame.
    pub acceleration: f64,
    /// The maximum speed magnitude, in units/frame.
    pub max_speed: f64,
    /// Speed lost to friction each frame, in units/frame.
    pub friction: f64,
    /// Heading change per frame of full steering, in degrees.
    pub turn_rate: f64,
}

impl Default for VehicleAttributes {
    fn default() -> Self {
        Self {
            acceleration: 0.15,
            max_speed: 3.0,
            friction: 0.05,
            turn_rate: 2.5,
        }
    }
}

impl Vehicle {
    /// Creates a new vehicle at the given position and heading.
    pub(crate) fn new(pos: Point2d, heading: f64, attr: VehicleAttributes) -> Self {
        Self {
            attr,
            pos,
            heading,
            speed: 0.0,
            distance: 0.0,
            last_pos: pos,
        }
    }

    /// The vehicle's fixed attributes.
    pub fn attributes(&self) -> &VehicleAttributes {
        &self.attr
    }

    /// The world coordinates of the vehicle.
    pub fn position(&self) -> Point2d {
        self.pos
    }

    /// The vehicle's heading in degrees. May exceed +/-360 without wraparound.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// The vehicle's signed speed in units per frame.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// The total distance traveled in units.
    pub fn distance_traveled(&self) -> f64 {
        self.distance
    }

    /// Whether the vehicle is stopped.
    pub fn has_stopped(&self) -> bool {
        self.speed == 0.0
    }

    /// Writes back the controller's speed and heading decision.
    pub(crate) fn set_motion(&mut self, speed: f64, heading: f64) {
        self.speed = speed;
        self.heading = heading;
    }

    /// Integrates one fixed frame.
    ///
    /// Accumulates the displacement since the previous frame into the
    /// distance traveled, applies friction toward zero speed, then advances
    /// the position along the heading. Friction runs every frame regardless
    /// of the controller's same-frame adjustment; the two act sequentially
    /// on the same scalar.
    pub(crate) fn integrate(&mut self) {
        self.distance += self.pos.distance(self.last_pos);
        self.last_pos = self.pos;

        if self.speed > 0.0 {
            self.speed = f64::max(self.speed - self.attr.friction, 0.0);
        } else if self.speed < 0.0 {
            self.speed = f64::min(self.speed + self.attr.friction, 0.0);
        }

        self.pos += self.speed * unit_from_degrees(self.heading);
    }
}
