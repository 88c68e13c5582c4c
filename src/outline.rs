//! Body outline geometry for renderers.
//!
//! Nothing here draws: these functions turn a resolved [`Chain`] into the
//! polygon and bezier segments a canvas or GPU backend would stroke.

use crate::error::OutlineError;
use crate::ik::{Chain, Joint};
use crate::math::DVec2;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6, FRAC_PI_8, PI};

pub const DEFAULT_TENSION: f64 = 0.1;

const HEAD_OFFSETS: [f64; 9] = [
    FRAC_PI_2,
    FRAC_PI_4,
    FRAC_PI_6,
    FRAC_PI_8,
    0.0,
    -FRAC_PI_8,
    -FRAC_PI_6,
    -FRAC_PI_4,
    -FRAC_PI_2,
];

const TAIL_OFFSETS: [f64; 3] = [PI + FRAC_PI_6, PI, PI - FRAC_PI_6];

/// One cubic bezier piece from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub start: DVec2,
    pub control1: DVec2,
    pub control2: DVec2,
    pub end: DVec2,
}

/// Rounded snout: rim points sweeping from the right side over the nose to the left.
pub fn head_vertices(joint: &Joint) -> Vec<DVec2> {
    HEAD_OFFSETS
        .iter()
        .map(|&offset| joint.point_at(offset, 0.0))
        .collect()
}

pub fn tail_vertices(joint: &Joint) -> Vec<DVec2> {
    TAIL_OFFSETS
        .iter()
        .map(|&offset| joint.point_at(offset, 0.0))
        .collect()
}

/// Closed outline around the chain's joint circles, starting at the head's
/// left side and running down the left flank, around the tail, up the right
/// flank and over the snout.
pub fn body_outline(chain: &Chain) -> Vec<DVec2> {
    let joints = chain.joints();
    let n = joints.len();
    let mut points = Vec::with_capacity(4 * n + HEAD_OFFSETS.len() + TAIL_OFFSETS.len());

    for i in 0..n {
        let left = joints[i].left();
        if i > 0 {
            points.push((left + joints[i - 1].left()) * 0.5);
        }
        points.push(left);
    }

    points.extend(tail_vertices(&joints[n - 1]));

    for i in (0..n).rev() {
        let right = joints[i].right();
        if i + 1 < n {
            points.push((right + joints[i + 1].right()) * 0.5);
        }
        points.push(right);
    }

    points.extend(head_vertices(&joints[0]));
    points.push(joints[0].left());
    points
}

/// [`body_outline`] smoothed into cubic segments at [`DEFAULT_TENSION`].
pub fn body_curve(chain: &Chain) -> Result<Vec<CubicSegment>, OutlineError> {
    smooth_path(&body_outline(chain), DEFAULT_TENSION)
}

/// Smooth cubic path through `points`, one segment per consecutive pair.
///
/// Ends are handled by mirroring a phantom point past each end, and control
/// points sit `tension` of the neighbour span away from each knot.
pub fn smooth_path(points: &[DVec2], tension: f64) -> Result<Vec<CubicSegment>, OutlineError> {
    if points.len() < 2 {
        return Err(OutlineError::TooFewPoints(points.len()));
    }

    let n = points.len();
    let first = points[0] - (points[1] - points[0]);
    let last = points[n - 1] + (points[n - 1] - points[n - 2]);

    let extended: Vec<DVec2> = std::iter::once(first)
        .chain(points.iter().copied())
        .chain(std::iter::once(last))
        .collect();

    let segments = extended
        .windows(4)
        .map(|w| {
            let (p0, p1, p2, p3) = (w[0], w[1], w[2], w[3]);
            CubicSegment {
                start: p1,
                control1: p1 + (p2 - p0) * tension,
                control2: p2 - (p3 - p1) * tension,
                end: p2,
            }
        })
        .collect();

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_outline_point_count() {
        let chain = Chain::builder()
            .radii(crate::driver::FISH_RADII)
            .build()
            .unwrap();
        let n = chain.joint_count();
        let outline = body_outline(&chain);
        assert_eq!(outline.len(), 2 * (2 * n - 1) + 3 + 9 + 1);
        assert_eq!(outline.first(), outline.last());
    }

    #[test]
    fn test_head_vertices_span_half_circle() {
        let joint = Joint::new(DVec2::ZERO, 10.0);
        let head = head_vertices(&joint);
        assert_eq!(head.len(), 9);
        assert_abs_diff_eq!(head[0].y, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(head[4].x, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(head[8].y, -10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tail_points_backwards() {
        let joint = Joint::new(DVec2::ZERO, 4.0);
        let tail = tail_vertices(&joint);
        assert_abs_diff_eq!(tail[1].x, -4.0, epsilon = 1e-12);
        assert!(tail.iter().all(|p| p.x < 0.0));
    }

    #[test]
    fn test_smooth_path_joins_knots() {
        let points = [
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 5.0),
            DVec2::new(20.0, 0.0),
            DVec2::new(30.0, 5.0),
        ];
        let segments = smooth_path(&points, DEFAULT_TENSION).unwrap();
        assert_eq!(segments.len(), points.len() - 1);
        for (segment, pair) in segments.iter().zip(points.windows(2)) {
            assert_eq!(segment.start, pair[0]);
            assert_eq!(segment.end, pair[1]);
        }
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn test_straight_line_controls_stay_on_line() {
        let points = [DVec2::ZERO, DVec2::new(10.0, 0.0), DVec2::new(20.0, 0.0)];
        for segment in smooth_path(&points, 0.25).unwrap() {
            assert_eq!(segment.control1.y, 0.0);
            assert_eq!(segment.control2.y, 0.0);
        }
    }

    #[test]
    fn test_body_curve_follows_outline() {
        let chain = Chain::new(DVec2::new(50.0, 50.0), 5, 20.0, FRAC_PI_6).unwrap();
        let outline = body_outline(&chain);
        let curve = body_curve(&chain).unwrap();

        assert_eq!(curve.len(), outline.len() - 1);
        assert_eq!(curve[0].start, outline[0]);
        assert_eq!(curve[curve.len() - 1].end, outline[outline.len() - 1]);
    }

    #[test]
    fn test_smooth_path_needs_two_points() {
        assert_eq!(
            smooth_path(&[DVec2::ZERO], DEFAULT_TENSION),
            Err(OutlineError::TooFewPoints(1))
        );
    }
}
