use std::f64::consts::{PI, TAU};

/// Wraps `angle` into `[0, 2π)`.
pub fn wrap_tau(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Wraps `angle` into `(-π, π]`.
pub fn wrap_pi(angle: f64) -> f64 {
    PI - wrap_tau(PI - angle)
}

/// Signed offset of `angle` from `anchor` in `(-π, π]`.
///
/// Positive when `angle` sits clockwise of `anchor` (smaller heading),
/// negative when it sits counter-clockwise.
pub fn relative_angle_diff(angle: f64, anchor: f64) -> f64 {
    wrap_pi(anchor - angle)
}

/// Rotates `current` toward `desired` along the shorter arc by at most `max_rate`.
pub fn clamp_turn(current: f64, desired: f64, max_rate: f64) -> f64 {
    let delta = wrap_pi(desired - current);
    current + delta.signum() * delta.abs().min(max_rate)
}
