//! WASM entry point - a wandering scene the page draws onto its own canvas

use crate::driver::{Bounds, Scene, SceneConfig};
use crate::math::DVec2;
use crate::outline;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

/// Scene handle exported to JavaScript. Joint data is handed out as flat
/// `[x, y, heading, radius, ...]` arrays, one agent at a time.
#[wasm_bindgen]
pub struct WebScene {
    scene: Scene,
    rng: StdRng,
}

#[wasm_bindgen]
impl WebScene {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, agent_count: usize, seed: u32) -> Result<WebScene, JsError> {
        let config = SceneConfig::new(Bounds::from_size(width, height)).with_agent_count(agent_count);
        let mut rng = StdRng::seed_from_u64(u64::from(seed));
        let scene = Scene::new(config, &mut rng)?;
        Ok(WebScene { scene, rng })
    }

    pub fn tick(&mut self) -> usize {
        self.scene.tick(&mut self.rng).moved
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.scene.toggle_pause()
    }

    pub fn reset(&mut self) {
        self.scene.reset(&mut self.rng);
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.scene.set_pointer(Some(DVec2::new(x, y)));
    }

    pub fn clear_pointer(&mut self) {
        self.scene.set_pointer(None);
    }

    pub fn agent_count(&self) -> usize {
        self.scene.agents().len()
    }

    pub fn joints(&self, agent: usize) -> Vec<f64> {
        self.scene
            .agents()
            .get(agent)
            .map(|a| {
                a.chain()
                    .joints()
                    .iter()
                    .flat_map(|j| [j.position.x, j.position.y, j.heading, j.radius])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Flat `[x, y, ...]` body outline of one agent.
    pub fn outline(&self, agent: usize) -> Vec<f64> {
        self.scene
            .agents()
            .get(agent)
            .map(|a| {
                outline::body_outline(a.chain())
                    .into_iter()
                    .flat_map(|p| [p.x, p.y])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Flat `[start, control1, control2, end]` xy quadruples of one agent's
    /// smoothed outline, eight numbers per segment.
    pub fn outline_curve(&self, agent: usize) -> Result<Vec<f64>, JsError> {
        let Some(agent) = self.scene.agents().get(agent) else {
            return Ok(Vec::new());
        };
        let segments = outline::body_curve(agent.chain())?;
        Ok(segments
            .iter()
            .flat_map(|s| {
                [
                    s.start.x,
                    s.start.y,
                    s.control1.x,
                    s.control1.y,
                    s.control2.x,
                    s.control2.y,
                    s.end.x,
                    s.end.y,
                ]
            })
            .collect())
    }

    pub fn is_following_pointer(&self) -> bool {
        self.scene.pointer().is_some()
    }

    pub fn target(&self, agent: usize) -> Vec<f64> {
        self.scene
            .agents()
            .get(agent)
            .map(|a| vec![a.target().x, a.target().y])
            .unwrap_or_default()
    }
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Warn).expect("Failed to init logger");
}
