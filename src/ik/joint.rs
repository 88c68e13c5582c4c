use crate::math::{from_angle, DVec2};
use std::f64::consts::FRAC_PI_2;

/// One vertebra of the chain. The solver owns position and heading; radius
/// is carried for renderers and never read by the resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub position: DVec2,
    pub heading: f64,
    pub radius: f64,
}

impl Joint {
    pub fn new(position: DVec2, radius: f64) -> Self {
        Self {
            position,
            heading: 0.0,
            radius,
        }
    }

    pub fn with_heading(mut self, heading: f64) -> Self {
        self.heading = heading;
        self
    }

    /// Point on (or beyond) the joint's rim, `angle_offset` radians from its heading.
    pub fn point_at(&self, angle_offset: f64, length_offset: f64) -> DVec2 {
        self.position + from_angle(self.heading + angle_offset) * (self.radius + length_offset)
    }

    pub fn left(&self) -> DVec2 {
        self.point_at(-FRAC_PI_2, 0.0)
    }

    pub fn right(&self) -> DVec2 {
        self.point_at(FRAC_PI_2, 0.0)
    }
}
