//! Math utilities module
//!
//! 2D vector helpers over glam's `DVec2` and angle wrapping used by the resolver.

pub mod angle;
pub mod vector;

pub use angle::{clamp_turn, relative_angle_diff, wrap_pi, wrap_tau};
pub use vector::{diff_heading, distance, from_angle, heading, normalize, set_magnitude};

// Re-export the vector type used throughout the crate
pub use glam::DVec2;
