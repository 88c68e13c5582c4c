use super::agent::{Agent, AgentConfig, TickOutcome};
use super::target::Bounds;
use crate::error::ChainError;
use crate::math::DVec2;
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub bounds: Bounds,
    pub agent_count: usize,
    pub agent: AgentConfig,
    /// Where every agent spawns; the bounds' center when unset.
    pub spawn: Option<DVec2>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::from_size(1280.0, 720.0),
            agent_count: 3,
            agent: AgentConfig::default(),
            spawn: None,
        }
    }
}

impl SceneConfig {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            ..Default::default()
        }
    }

    pub fn with_agent_count(mut self, count: usize) -> Self {
        self.agent_count = count;
        self
    }

    pub fn with_agent(mut self, agent: AgentConfig) -> Self {
        self.agent = agent;
        self
    }

    pub fn with_spawn(mut self, spawn: DVec2) -> Self {
        self.spawn = Some(spawn);
        self
    }

    pub fn spawn_point(&self) -> DVec2 {
        self.spawn.unwrap_or_else(|| self.bounds.center())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub moved: usize,
    pub skipped: usize,
    pub clamped_joints: usize,
}

/// Owns every agent in view plus the shared pause state and target region.
#[derive(Debug, Clone)]
pub struct Scene {
    config: SceneConfig,
    agents: Vec<Agent>,
    pointer: Option<DVec2>,
    paused: bool,
    ticks: u64,
}

impl Scene {
    pub fn new<R: Rng + ?Sized>(config: SceneConfig, rng: &mut R) -> Result<Self, ChainError> {
        let agents = Self::spawn_agents(&config, rng)?;
        log::info!(
            "scene created with {} agents in {:?}",
            agents.len(),
            config.bounds
        );

        Ok(Self {
            config,
            agents,
            pointer: None,
            paused: false,
            ticks: 0,
        })
    }

    fn spawn_agents<R: Rng + ?Sized>(
        config: &SceneConfig,
        rng: &mut R,
    ) -> Result<Vec<Agent>, ChainError> {
        let spawn = config.spawn_point();
        (0..config.agent_count)
            .map(|_| Agent::new(&config.agent, spawn, &config.bounds, rng))
            .collect()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn bounds(&self) -> &Bounds {
        &self.config.bounds
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// When set, every agent chases this point instead of wandering.
    pub fn set_pointer(&mut self, pointer: Option<DVec2>) {
        self.pointer = pointer;
    }

    pub fn pointer(&self) -> Option<DVec2> {
        self.pointer
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickSummary {
        let mut summary = TickSummary::default();
        if self.paused {
            return summary;
        }

        for agent in &mut self.agents {
            let outcome = match self.pointer {
                Some(pointer) => agent.follow(pointer),
                None => agent.tick(&self.config.bounds, rng),
            };
            match outcome {
                TickOutcome::Moved(report) => {
                    summary.moved += 1;
                    summary.clamped_joints += report.clamped_joints;
                }
                TickOutcome::Skipped(_) => summary.skipped += 1,
            }
        }

        self.ticks += 1;
        summary
    }

    /// Respawns every agent at the spawn point with fresh targets.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let spawn = self.config.spawn_point();
        for agent in &mut self.agents {
            agent.reset(spawn, &self.config.bounds, rng);
        }
        self.ticks = 0;
        self.paused = false;
        log::info!("scene reset, {} agents at {spawn}", self.agents.len());
    }

    /// Swaps in a new configuration and rebuilds all agents from it.
    pub fn reconfigure<R: Rng + ?Sized>(
        &mut self,
        config: SceneConfig,
        rng: &mut R,
    ) -> Result<(), ChainError> {
        self.agents = Self::spawn_agents(&config, rng)?;
        self.config = config;
        self.ticks = 0;
        log::info!("scene reconfigured with {} agents", self.agents.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scene(seed: u64) -> (Scene, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let scene = Scene::new(SceneConfig::default(), &mut rng).unwrap();
        (scene, rng)
    }

    #[test]
    fn test_tick_moves_every_agent() {
        let (mut scene, mut rng) = scene(11);
        let summary = scene.tick(&mut rng);
        assert_eq!(summary.moved, 3);
        assert_eq!(summary.skipped, 0);
        assert_eq!(scene.ticks(), 1);
    }

    #[test]
    fn test_paused_scene_is_frozen() {
        let (mut scene, mut rng) = scene(5);
        scene.tick(&mut rng);
        assert!(scene.toggle_pause());

        let heads: Vec<DVec2> = scene.agents().iter().map(|a| a.chain().head().position).collect();
        assert_eq!(scene.tick(&mut rng), TickSummary::default());
        let after: Vec<DVec2> = scene.agents().iter().map(|a| a.chain().head().position).collect();
        assert_eq!(heads, after);
        assert_eq!(scene.ticks(), 1);
    }

    #[test]
    fn test_reset_returns_agents_to_spawn() {
        let (mut scene, mut rng) = scene(9);
        for _ in 0..50 {
            scene.tick(&mut rng);
        }
        scene.reset(&mut rng);

        let spawn = scene.config().spawn_point();
        for agent in scene.agents() {
            assert_eq!(agent.chain().head().position, spawn);
        }
        assert_eq!(scene.ticks(), 0);
    }

    #[test]
    fn test_pointer_overrides_wandering() {
        let (mut scene, mut rng) = scene(2);
        let pointer = DVec2::new(10.0, 10.0);
        scene.set_pointer(Some(pointer));
        assert_eq!(scene.pointer(), Some(pointer));
        scene.tick(&mut rng);
        assert!(scene.agents().iter().all(|a| a.target() == pointer));

        scene.set_pointer(None);
        assert_eq!(scene.pointer(), None);
    }

    #[test]
    fn test_agents_spawn_at_configured_point() {
        let mut rng = StdRng::seed_from_u64(4);
        let spawn = DVec2::new(200.0, 150.0);
        let config = SceneConfig::default().with_agent_count(2).with_spawn(spawn);
        let scene = Scene::new(config, &mut rng).unwrap();

        assert_eq!(scene.agents().len(), 2);
        for agent in scene.agents() {
            assert_eq!(agent.chain().head().position, spawn);
        }
    }

    #[test]
    fn test_seeded_scenes_are_deterministic() {
        let (mut a, mut rng_a) = scene(77);
        let (mut b, mut rng_b) = scene(77);
        for _ in 0..100 {
            a.tick(&mut rng_a);
            b.tick(&mut rng_b);
        }
        for (x, y) in a.agents().iter().zip(b.agents()) {
            assert_eq!(x.chain().joints(), y.chain().joints());
            assert_eq!(x.target(), y.target());
        }
    }

    #[test]
    fn test_reconfigure_rejects_bad_agent() {
        let (mut scene, mut rng) = scene(1);
        let bad = SceneConfig::default().with_agent(AgentConfig::new([1.0, 2.0]));
        assert!(scene.reconfigure(bad, &mut rng).is_err());
        assert_eq!(scene.agents().len(), 3);
    }
}
