use glam::DVec2;

use crate::error::MathError;

/// Angle of `v` measured from the +x axis, in `(-π, π]`.
pub fn heading(v: DVec2) -> f64 {
    v.y.atan2(v.x)
}

/// Heading of the vector pointing from `b` to `a`.
pub fn diff_heading(a: DVec2, b: DVec2) -> f64 {
    (a.y - b.y).atan2(a.x - b.x)
}

pub fn from_angle(angle: f64) -> DVec2 {
    DVec2::new(angle.cos(), angle.sin())
}

pub fn distance(a: DVec2, b: DVec2) -> f64 {
    (a - b).length()
}

pub fn normalize(v: DVec2) -> Result<DVec2, MathError> {
    let len = v.length();
    if len == 0.0 {
        return Err(MathError::ZeroLength);
    }
    Ok(v / len)
}

pub fn set_magnitude(v: DVec2, magnitude: f64) -> Result<DVec2, MathError> {
    let len = v.length();
    if len == 0.0 {
        return Err(MathError::ZeroLength);
    }
    Ok(v * (magnitude / len))
}
