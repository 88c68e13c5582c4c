use crate::math::{distance, DVec2};
use rand::Rng;

/// Resampling cap for [`pick_new_target`] before it settles for the farthest candidate.
pub const MAX_TARGET_ATTEMPTS: usize = 32;

/// Axis-aligned region targets are drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    pub fn new(a: DVec2, b: DVec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Bounds of a `width` x `height` viewport anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(DVec2::ZERO, DVec2::new(width, height))
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: DVec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> DVec2 {
        DVec2::new(
            rng.gen_range(self.min.x..=self.max.x),
            rng.gen_range(self.min.y..=self.max.y),
        )
    }
}

/// Draws a uniform point in `bounds` at least `min_distance` away from `avoid`.
///
/// Gives up after [`MAX_TARGET_ATTEMPTS`] draws and returns the farthest one,
/// so a region too small for `min_distance` still yields a target.
pub fn pick_new_target<R: Rng + ?Sized>(
    bounds: &Bounds,
    rng: &mut R,
    avoid: DVec2,
    min_distance: f64,
) -> DVec2 {
    let mut best = bounds.sample(rng);
    let mut best_distance = distance(best, avoid);

    for _ in 1..MAX_TARGET_ATTEMPTS {
        if best_distance >= min_distance {
            return best;
        }
        let candidate = bounds.sample(rng);
        let d = distance(candidate, avoid);
        if d > best_distance {
            best = candidate;
            best_distance = d;
        }
    }

    if best_distance < min_distance {
        log::debug!(
            "no target {min_distance} away from {avoid} after {MAX_TARGET_ATTEMPTS} draws, using {best}"
        );
    }
    best
}
