use super::constraint::{AngleConstraint, Constraint};
use super::joint::Joint;
use super::solver::{ChainSolver, ResolveReport};
use crate::error::{ChainError, ResolveError};
use crate::math::DVec2;

pub const MIN_JOINTS: usize = 3;
pub const DEFAULT_JOINT_RADIUS: f64 = 16.0;

/// How joint 0 advances toward the target each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeadPolicy {
    /// Rotate by at most `max_turn_rate` radians, then swim `speed` units forward.
    Steered { max_turn_rate: f64, speed: f64 },
    /// Step straight at the target by `speed` units, stopping on it.
    Direct { speed: f64 },
}

impl HeadPolicy {
    pub const DEFAULT_TURN_RATE: f64 = 0.05;
    pub const DEFAULT_SPEED: f64 = 4.0;

    pub fn speed(&self) -> f64 {
        match *self {
            HeadPolicy::Steered { speed, .. } | HeadPolicy::Direct { speed } => speed,
        }
    }

    fn validate(&self) -> Result<(), ChainError> {
        let speed = self.speed();
        if !speed.is_finite() || speed < 0.0 {
            return Err(ChainError::InvalidConfiguration(format!(
                "head speed must be finite and non-negative, got {speed}"
            )));
        }
        if let HeadPolicy::Steered { max_turn_rate, .. } = *self {
            if max_turn_rate.is_nan() || max_turn_rate < 0.0 {
                return Err(ChainError::InvalidConfiguration(format!(
                    "max turn rate must be non-negative, got {max_turn_rate}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for HeadPolicy {
    fn default() -> Self {
        HeadPolicy::Steered {
            max_turn_rate: Self::DEFAULT_TURN_RATE,
            speed: Self::DEFAULT_SPEED,
        }
    }
}

/// Where the initial straight chain is laid relative to its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// `origin + (0, i * link_length)`
    #[default]
    Below,
    /// `origin - (i * link_length, 0)`
    Behind,
}

impl Layout {
    fn offset(self, index: usize, link_length: f64) -> DVec2 {
        let step = index as f64 * link_length;
        match self {
            Layout::Below => DVec2::new(0.0, step),
            Layout::Behind => DVec2::new(-step, 0.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Chain {
    pub(crate) joints: Vec<Joint>,
    pub(crate) link_length: f64,
    pub(crate) constraint: Box<dyn Constraint>,
    pub(crate) head: HeadPolicy,
    origin: DVec2,
    layout: Layout,
}

impl Chain {
    pub fn builder() -> ChainBuilder {
        ChainBuilder::new()
    }

    /// Straight chain of `joint_count` joints hanging below `origin`.
    pub fn new(
        origin: DVec2,
        joint_count: usize,
        link_length: f64,
        max_angle_deviation: f64,
    ) -> Result<Self, ChainError> {
        Self::builder()
            .origin(origin)
            .joint_count(joint_count)
            .link_length(link_length)
            .max_angle_deviation(max_angle_deviation)
            .build()
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub(crate) fn joints_mut(&mut self) -> &mut [Joint] {
        &mut self.joints
    }

    pub fn link_length(&self) -> f64 {
        self.link_length
    }

    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    pub fn constraint(&self) -> &dyn Constraint {
        self.constraint.as_ref()
    }

    pub fn head_policy(&self) -> HeadPolicy {
        self.head
    }

    pub fn set_head_policy(&mut self, head: HeadPolicy) -> Result<(), ChainError> {
        head.validate()?;
        self.head = head;
        Ok(())
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn total_length(&self) -> f64 {
        self.link_length * (self.joints.len() - 1) as f64
    }

    pub fn head(&self) -> &Joint {
        &self.joints[0]
    }

    pub fn tail(&self) -> &Joint {
        &self.joints[self.joints.len() - 1]
    }

    pub fn positions(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.joints.iter().map(|j| j.position)
    }

    pub fn headings(&self) -> impl Iterator<Item = f64> + '_ {
        self.joints.iter().map(|j| j.heading)
    }

    /// Angle-constrained resolve toward `target`. See [`ChainSolver::resolve`].
    pub fn resolve(&mut self, target: DVec2) -> Result<ResolveReport, ResolveError> {
        ChainSolver::resolve(self, target)
    }

    /// Distance-only resolve toward `target`. See [`ChainSolver::relax`].
    pub fn relax(&mut self, target: DVec2) -> Result<ResolveReport, ResolveError> {
        ChainSolver::relax(self, target)
    }

    /// Lays the joints out again from `origin`, dropping all resolved headings.
    pub fn reset(&mut self, origin: DVec2) {
        self.origin = origin;
        let (layout, link_length) = (self.layout, self.link_length);
        for (i, joint) in self.joints.iter_mut().enumerate() {
            joint.position = origin + layout.offset(i, link_length);
            joint.heading = 0.0;
        }
    }
}

pub struct ChainBuilder {
    origin: DVec2,
    radii: Vec<f64>,
    link_length: f64,
    constraint: Box<dyn Constraint>,
    head: HeadPolicy,
    layout: Layout,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self {
            origin: DVec2::ZERO,
            radii: Vec::new(),
            link_length: 32.0,
            constraint: Box::new(AngleConstraint::UNCONSTRAINED),
            head: HeadPolicy::default(),
            layout: Layout::default(),
        }
    }

    pub fn origin(mut self, origin: DVec2) -> Self {
        self.origin = origin;
        self
    }

    /// One joint per radius, head first.
    pub fn radii(mut self, radii: impl IntoIterator<Item = f64>) -> Self {
        self.radii = radii.into_iter().collect();
        self
    }

    pub fn joint_count(mut self, count: usize) -> Self {
        self.radii = vec![DEFAULT_JOINT_RADIUS; count];
        self
    }

    pub fn link_length(mut self, link_length: f64) -> Self {
        self.link_length = link_length;
        self
    }

    /// Shorthand for an [`AngleConstraint`]; `2π` or more leaves joints unconstrained.
    pub fn max_angle_deviation(mut self, radians: f64) -> Self {
        self.constraint = Box::new(AngleConstraint::from_radians(radians));
        self
    }

    pub fn constraint<C: Constraint + 'static>(mut self, constraint: C) -> Self {
        self.constraint = Box::new(constraint);
        self
    }

    pub fn head(mut self, head: HeadPolicy) -> Self {
        self.head = head;
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn build(self) -> Result<Chain, ChainError> {
        self.validate()?;

        let joints = self
            .radii
            .iter()
            .enumerate()
            .map(|(i, &radius)| {
                Joint::new(self.origin + self.layout.offset(i, self.link_length), radius)
            })
            .collect();

        Ok(Chain {
            joints,
            link_length: self.link_length,
            constraint: self.constraint,
            head: self.head,
            origin: self.origin,
            layout: self.layout,
        })
    }

    fn validate(&self) -> Result<(), ChainError> {
        if self.radii.len() < MIN_JOINTS {
            return Err(ChainError::InvalidConfiguration(format!(
                "chain needs at least {MIN_JOINTS} joints, got {}",
                self.radii.len()
            )));
        }
        if !self.link_length.is_finite() || self.link_length <= 0.0 {
            return Err(ChainError::InvalidConfiguration(format!(
                "link length must be positive, got {}",
                self.link_length
            )));
        }
        self.constraint.validate()?;
        if !self.origin.is_finite() {
            return Err(ChainError::InvalidConfiguration(
                "origin must be finite".to_string(),
            ));
        }
        self.head.validate()
    }
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}
