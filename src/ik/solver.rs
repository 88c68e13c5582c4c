use super::chain::{Chain, HeadPolicy};
use super::constraint::Constraint;
use super::joint::Joint;
use crate::error::{MathError, ResolveError};
use crate::math::{
    clamp_turn, diff_heading, distance, from_angle, heading, normalize, set_magnitude, wrap_pi,
    wrap_tau, DVec2,
};

const CLAMP_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResolveReport {
    /// Signed rotation applied to the head this tick, in radians.
    pub head_turn: f64,
    /// Joints whose raw heading was pulled back onto the angle limit.
    pub clamped_joints: usize,
}

/// Follow-the-leader resolver. Both entry points work on a scratch copy of
/// the joints and only write back when every joint resolved, so an error
/// leaves the chain exactly as it was.
pub struct ChainSolver;

impl ChainSolver {
    /// Advances the head toward `target`, then drags every following joint
    /// behind its parent at exactly the link length while keeping its heading
    /// within the chain's constraint of the parent's heading.
    pub fn resolve(chain: &mut Chain, target: DVec2) -> Result<ResolveReport, ResolveError> {
        let mut joints = chain.joints.clone();
        let head_turn = Self::advance_head(&mut joints[0], chain.head, target)?;

        let link_length = chain.link_length;
        let constraint = chain.constraint.as_ref();
        let mut clamped_joints = 0;

        for i in 1..joints.len() {
            let prev = joints[i - 1];
            if Self::follow_constrained(prev, &mut joints[i], link_length, constraint)
                .map_err(ResolveError::at(i))?
            {
                clamped_joints += 1;
            }
        }

        chain.joints_mut().copy_from_slice(&joints);

        let report = ResolveReport {
            head_turn,
            clamped_joints,
        };
        log::trace!("resolve toward {target}: {report:?}");
        Ok(report)
    }

    /// Distance-only variant: same head update, then every joint is placed
    /// at exactly the link length from its parent along the current
    /// separation, with no heading limit.
    pub fn relax(chain: &mut Chain, target: DVec2) -> Result<ResolveReport, ResolveError> {
        let mut joints = chain.joints.clone();
        let head_turn = Self::advance_head(&mut joints[0], chain.head, target)?;

        let link_length = chain.link_length;
        for i in 1..joints.len() {
            let prev = joints[i - 1];
            let curr = &mut joints[i];

            let offset = set_magnitude(curr.position - prev.position, link_length)
                .map_err(ResolveError::at(i))?;
            curr.position = prev.position + offset;
            curr.heading = wrap_tau(diff_heading(prev.position, curr.position));
        }

        chain.joints_mut().copy_from_slice(&joints);

        let report = ResolveReport {
            head_turn,
            clamped_joints: 0,
        };
        log::trace!("relax toward {target}: {report:?}");
        Ok(report)
    }

    fn advance_head(
        head: &mut Joint,
        policy: HeadPolicy,
        target: DVec2,
    ) -> Result<f64, ResolveError> {
        if !target.is_finite() {
            return Err(ResolveError::DegenerateInput { index: 0 });
        }
        let to_target = target - head.position;

        match policy {
            HeadPolicy::Steered {
                max_turn_rate,
                speed,
            } => {
                if to_target == DVec2::ZERO {
                    return Err(ResolveError::DegenerateInput { index: 0 });
                }

                let turned = clamp_turn(head.heading, heading(to_target), max_turn_rate);
                let turn = turned - head.heading;

                head.heading = wrap_tau(turned);
                head.position += from_angle(head.heading) * speed;
                Ok(turn)
            }
            HeadPolicy::Direct { speed } => {
                let remaining = to_target.length();
                if remaining == 0.0 {
                    return Ok(0.0);
                }

                let direction = normalize(to_target).map_err(ResolveError::at(0))?;
                let new_heading = wrap_tau(heading(to_target));
                let turn = wrap_pi(new_heading - head.heading);

                head.heading = new_heading;
                head.position = if speed >= remaining {
                    target
                } else {
                    head.position + direction * speed
                };
                Ok(turn)
            }
        }
    }

    /// Returns whether the constraint clamped the joint's heading.
    fn follow_constrained(
        prev: Joint,
        curr: &mut Joint,
        link_length: f64,
        constraint: &dyn Constraint,
    ) -> Result<bool, MathError> {
        let d = distance(prev.position, curr.position);
        if d == 0.0 {
            return Err(MathError::ZeroLength);
        }

        // pull only: a slack link keeps its position here
        if d > link_length {
            curr.position = prev.position - (prev.position - curr.position) * (link_length / d);
        }

        let raw = diff_heading(prev.position, curr.position);
        let constrained = constraint.apply(raw, prev.heading);

        curr.heading = constrained;
        curr.position = prev.position - from_angle(constrained) * link_length;

        Ok(wrap_pi(constrained - raw).abs() > CLAMP_EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ik::constraint::AngleConstraint;
    use crate::math::relative_angle_diff;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_6, PI, TAU};

    fn assert_links(chain: &Chain) {
        for w in chain.joints().windows(2) {
            assert_abs_diff_eq!(
                distance(w[0].position, w[1].position),
                chain.link_length(),
                epsilon = 1e-9
            );
        }
    }

    fn assert_bends(chain: &Chain, max: f64) {
        for w in chain.joints().windows(2) {
            let bend = relative_angle_diff(w[1].heading, w[0].heading).abs();
            assert!(bend <= max + 1e-9, "bend {bend} exceeds {max}");
        }
    }

    #[test]
    fn test_three_joint_scenario() {
        let mut chain = Chain::new(DVec2::ZERO, 3, 10.0, FRAC_PI_6).unwrap();
        let report = chain.resolve(DVec2::new(100.0, 0.0)).unwrap();

        // already facing the target: the head swims straight at default speed
        let head = chain.head();
        assert_abs_diff_eq!(head.heading, 0.0);
        assert_abs_diff_eq!(head.position.x, HeadPolicy::DEFAULT_SPEED, epsilon = 1e-12);
        assert_abs_diff_eq!(head.position.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(report.head_turn, 0.0);

        assert_links(&chain);
        assert_bends(&chain, FRAC_PI_6);

        // raw pull on joint 1 is about 68 degrees off the head: clamped
        assert!(report.clamped_joints >= 1);
        let joint1 = chain.joints()[1];
        assert_abs_diff_eq!(joint1.heading, TAU - FRAC_PI_6, epsilon = 1e-9);
        assert_abs_diff_eq!(joint1.position.x, 4.0 - 10.0 * FRAC_PI_6.cos(), epsilon = 1e-9);
        assert_abs_diff_eq!(joint1.position.y, 10.0 * FRAC_PI_6.sin(), epsilon = 1e-9);
    }

    #[test]
    fn test_head_turn_is_rate_limited() {
        let mut chain = Chain::new(DVec2::ZERO, 4, 10.0, PI).unwrap();
        let report = chain.resolve(DVec2::new(0.0, -100.0)).unwrap();
        assert_abs_diff_eq!(report.head_turn, -HeadPolicy::DEFAULT_TURN_RATE, epsilon = 1e-12);
        assert_abs_diff_eq!(
            chain.head().heading,
            TAU - HeadPolicy::DEFAULT_TURN_RATE,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_direct_policy_stops_on_target() {
        let mut chain = Chain::builder()
            .joint_count(3)
            .link_length(10.0)
            .head(HeadPolicy::Direct { speed: 5.0 })
            .build()
            .unwrap();

        chain.resolve(DVec2::new(3.0, 0.0)).unwrap();
        assert_eq!(chain.head().position, DVec2::new(3.0, 0.0));

        // sitting on the target is not degenerate under the direct policy
        let before: Vec<Joint> = chain.joints().to_vec();
        let report = chain.resolve(DVec2::new(3.0, 0.0)).unwrap();
        assert_eq!(report.head_turn, 0.0);
        assert_eq!(chain.head().position, before[0].position);
    }

    #[test]
    fn test_invariants_hold_over_many_ticks() {
        let max = FRAC_PI_6;
        let mut chain = Chain::builder()
            .radii([34.0, 40.0, 42.0, 41.0, 38.0, 32.0, 25.0, 19.0, 16.0, 10.0])
            .link_length(32.0)
            .max_angle_deviation(max)
            .build()
            .unwrap();

        let targets = [
            DVec2::new(400.0, 0.0),
            DVec2::new(-300.0, 200.0),
            DVec2::new(0.0, -500.0),
        ];
        for target in targets {
            for _ in 0..200 {
                chain.resolve(target).unwrap();
                assert_links(&chain);
                assert_bends(&chain, max);
            }
        }
    }

    #[test]
    fn test_steered_target_on_head_is_atomic() {
        let mut chain = Chain::new(DVec2::new(2.0, 2.0), 3, 10.0, PI).unwrap();
        let before = chain.joints().to_vec();

        let err = chain.resolve(DVec2::new(2.0, 2.0)).unwrap_err();
        assert_eq!(err, ResolveError::DegenerateInput { index: 0 });
        assert_eq!(chain.joints(), before.as_slice());
    }

    #[test]
    fn test_non_finite_target_is_rejected() {
        for head in [HeadPolicy::default(), HeadPolicy::Direct { speed: 4.0 }] {
            let mut chain = Chain::builder().joint_count(4).head(head).build().unwrap();
            let before = chain.joints().to_vec();

            for target in [
                DVec2::new(f64::NAN, 0.0),
                DVec2::new(0.0, f64::INFINITY),
            ] {
                let err = chain.resolve(target).unwrap_err();
                assert_eq!(err, ResolveError::DegenerateInput { index: 0 });
                let err = chain.relax(target).unwrap_err();
                assert_eq!(err, ResolveError::DegenerateInput { index: 0 });
                assert_eq!(chain.joints(), before.as_slice());
            }
        }
    }

    #[test]
    fn test_coincident_joint_is_atomic() {
        let mut chain = Chain::builder()
            .joint_count(4)
            .link_length(10.0)
            .head(HeadPolicy::Direct { speed: 0.0 })
            .build()
            .unwrap();
        let head = chain.head().position;
        chain.joints_mut()[1].position = head;
        let before = chain.joints().to_vec();

        let err = chain.resolve(DVec2::new(50.0, 50.0)).unwrap_err();
        assert_eq!(err, ResolveError::DegenerateInput { index: 1 });
        assert_eq!(chain.joints(), before.as_slice());

        let err = chain.relax(DVec2::new(50.0, 50.0)).unwrap_err();
        assert_eq!(err, ResolveError::DegenerateInput { index: 1 });
        assert_eq!(chain.joints(), before.as_slice());
    }

    #[test]
    fn test_relax_keeps_exact_links() {
        let mut chain = Chain::new(DVec2::ZERO, 5, 8.0, PI).unwrap();
        for _ in 0..50 {
            chain.relax(DVec2::new(60.0, -40.0)).unwrap();
            assert_links(&chain);
        }
    }

    #[test]
    fn test_zero_deviation_keeps_chain_straight() {
        let mut chain = Chain::builder()
            .joint_count(5)
            .link_length(10.0)
            .constraint(AngleConstraint::from_radians(0.0))
            .build()
            .unwrap();

        for _ in 0..30 {
            chain.resolve(DVec2::new(-80.0, 30.0)).unwrap();
        }
        let head_heading = chain.head().heading;
        for joint in chain.joints() {
            assert_abs_diff_eq!(
                relative_angle_diff(joint.heading, head_heading),
                0.0,
                epsilon = 1e-9
            );
        }
    }
}
