//! Driver layer: agents that pick targets and tick their chains, and the
//! scene that owns them.

mod agent;
mod scene;
mod target;

pub use agent::{Agent, AgentConfig, TickOutcome, FISH_RADII};
pub use scene::{Scene, SceneConfig, TickSummary};
pub use target::{pick_new_target, Bounds, MAX_TARGET_ATTEMPTS};
