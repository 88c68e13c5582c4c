use crate::error::ChainError;
use crate::math::{relative_angle_diff, wrap_tau};
use std::f64::consts::TAU;
use std::fmt::Debug;

pub trait Constraint: Send + Sync + Debug {
    /// Returns the constrained heading for a joint whose raw heading is
    /// `angle` and whose parent faces `reference`. Output is in `[0, 2π)`.
    fn apply(&self, angle: f64, reference: f64) -> f64;
    fn clone_box(&self) -> Box<dyn Constraint>;

    /// Checked once when a chain is built.
    fn validate(&self) -> Result<(), ChainError> {
        Ok(())
    }
}

impl Clone for Box<dyn Constraint> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Limits how far a joint may bend away from its parent's heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleConstraint {
    pub max_deviation: f64,
}

impl AngleConstraint {
    pub const UNCONSTRAINED: Self = Self { max_deviation: TAU };

    pub fn new(max_deviation_degrees: f64) -> Self {
        Self {
            max_deviation: max_deviation_degrees.to_radians(),
        }
    }

    pub fn from_radians(max_deviation: f64) -> Self {
        Self { max_deviation }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.max_deviation >= TAU
    }

    /// True when `apply` would move `angle` off its raw value.
    pub fn would_clamp(&self, angle: f64, reference: f64) -> bool {
        relative_angle_diff(angle, reference).abs() > self.max_deviation
    }
}

impl Default for AngleConstraint {
    fn default() -> Self {
        Self::UNCONSTRAINED
    }
}

impl Constraint for AngleConstraint {
    fn apply(&self, angle: f64, reference: f64) -> f64 {
        let rel = relative_angle_diff(angle, reference);

        if rel.abs() <= self.max_deviation {
            wrap_tau(angle)
        } else if rel > self.max_deviation {
            wrap_tau(reference - self.max_deviation)
        } else {
            wrap_tau(reference + self.max_deviation)
        }
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(*self)
    }

    fn validate(&self) -> Result<(), ChainError> {
        if self.max_deviation.is_nan() || self.max_deviation < 0.0 {
            return Err(ChainError::InvalidConfiguration(format!(
                "max angle deviation must be non-negative, got {}",
                self.max_deviation
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NoConstraint;

impl Constraint for NoConstraint {
    fn apply(&self, angle: f64, _reference: f64) -> f64 {
        wrap_tau(angle)
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(*self)
    }
}
