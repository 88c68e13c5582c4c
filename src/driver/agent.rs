use super::target::{pick_new_target, Bounds};
use crate::error::{ChainError, ResolveError};
use crate::ik::{Chain, HeadPolicy, Layout, ResolveReport};
use crate::math::{distance, DVec2};
use rand::Rng;
use std::f64::consts::FRAC_PI_6;

pub const FISH_RADII: [f64; 10] = [34.0, 40.0, 42.0, 41.0, 38.0, 32.0, 25.0, 19.0, 16.0, 10.0];

#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    pub radii: Vec<f64>,
    pub link_length: f64,
    pub max_angle_deviation: f64,
    pub head: HeadPolicy,
    pub layout: Layout,
    /// Head-to-target distance under which a new target is picked.
    pub arrive_threshold: f64,
    /// Minimum distance between the head and a freshly picked target.
    pub min_target_distance: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            radii: FISH_RADII.to_vec(),
            link_length: 32.0,
            max_angle_deviation: FRAC_PI_6,
            head: HeadPolicy::default(),
            layout: Layout::Behind,
            arrive_threshold: 40.0,
            min_target_distance: 400.0,
        }
    }
}

impl AgentConfig {
    pub fn new(radii: impl IntoIterator<Item = f64>) -> Self {
        Self {
            radii: radii.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn with_link_length(mut self, link_length: f64) -> Self {
        self.link_length = link_length;
        self
    }

    pub fn with_max_angle_deviation(mut self, radians: f64) -> Self {
        self.max_angle_deviation = radians;
        self
    }

    pub fn with_head(mut self, head: HeadPolicy) -> Self {
        self.head = head;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_arrive_threshold(mut self, threshold: f64) -> Self {
        self.arrive_threshold = threshold;
        self
    }

    pub fn with_min_target_distance(mut self, min_distance: f64) -> Self {
        self.min_target_distance = min_distance;
        self
    }

    pub fn build_chain(&self, origin: DVec2) -> Result<Chain, ChainError> {
        Chain::builder()
            .origin(origin)
            .radii(self.radii.iter().copied())
            .link_length(self.link_length)
            .max_angle_deviation(self.max_angle_deviation)
            .head(self.head)
            .layout(self.layout)
            .build()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Moved(ResolveReport),
    /// The resolver rejected the tick; the chain was left untouched.
    Skipped(ResolveError),
}

/// A chain wandering between randomly picked targets.
#[derive(Debug, Clone)]
pub struct Agent {
    chain: Chain,
    target: DVec2,
    arrive_threshold: f64,
    min_target_distance: f64,
}

impl Agent {
    pub fn new<R: Rng + ?Sized>(
        config: &AgentConfig,
        origin: DVec2,
        bounds: &Bounds,
        rng: &mut R,
    ) -> Result<Self, ChainError> {
        if config.arrive_threshold.is_nan() || config.arrive_threshold < 0.0 {
            return Err(ChainError::InvalidConfiguration(format!(
                "arrive threshold must be non-negative, got {}",
                config.arrive_threshold
            )));
        }

        let chain = config.build_chain(origin)?;
        let target = pick_new_target(bounds, rng, origin, config.min_target_distance);

        Ok(Self {
            chain,
            target,
            arrive_threshold: config.arrive_threshold,
            min_target_distance: config.min_target_distance,
        })
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn target(&self) -> DVec2 {
        self.target
    }

    pub fn set_target(&mut self, target: DVec2) {
        self.target = target;
    }

    pub fn has_arrived(&self) -> bool {
        distance(self.chain.head().position, self.target) < self.arrive_threshold
    }

    pub fn retarget<R: Rng + ?Sized>(&mut self, bounds: &Bounds, rng: &mut R) -> DVec2 {
        let head = self.chain.head().position;
        self.target = pick_new_target(bounds, rng, head, self.min_target_distance);
        log::debug!("new target {} for head at {head}", self.target);
        self.target
    }

    /// One wander step: pick a new target on arrival, then resolve toward it.
    pub fn tick<R: Rng + ?Sized>(&mut self, bounds: &Bounds, rng: &mut R) -> TickOutcome {
        if self.has_arrived() {
            self.retarget(bounds, rng);
        }

        match self.chain.resolve(self.target) {
            Ok(report) => TickOutcome::Moved(report),
            Err(err) => {
                log::debug!("skipping tick: {err}");
                self.retarget(bounds, rng);
                TickOutcome::Skipped(err)
            }
        }
    }

    /// One step toward an externally driven target; no reselection.
    pub fn follow(&mut self, target: DVec2) -> TickOutcome {
        self.target = target;
        match self.chain.resolve(target) {
            Ok(report) => TickOutcome::Moved(report),
            Err(err) => {
                log::debug!("skipping tick: {err}");
                TickOutcome::Skipped(err)
            }
        }
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, origin: DVec2, bounds: &Bounds, rng: &mut R) {
        self.chain.reset(origin);
        self.retarget(bounds, rng);
    }
}
