//! # spine-ik
//!
//! An angle-constrained follow-the-leader chain resolver for procedural
//! fish/snake locomotion in the plane.
//!
//! ## Features
//! - Turn-rate limited head steering toward an arbitrary target
//! - Fixed link lengths between consecutive joints
//! - Per-link bend limit propagated from head to tail (extensible via traits)
//! - Target-wandering agents and a multi-agent scene driver
//! - Body outline geometry for renderers
//! - Cross-platform: Native + WASM support
//!
//! ## Example
//! ```rust
//! use spine_ik::ik::Chain;
//! use glam::DVec2;
//! use std::f64::consts::FRAC_PI_6;
//!
//! let mut chain = Chain::new(DVec2::ZERO, 3, 10.0, FRAC_PI_6).unwrap();
//! chain.resolve(DVec2::new(100.0, 0.0)).unwrap();
//!
//! for joint in chain.joints() {
//!     println!("{} facing {:.3}", joint.position, joint.heading);
//! }
//! ```

pub mod driver;
pub mod error;
pub mod ik;
pub mod math;
pub mod outline;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use driver::{pick_new_target, Agent, AgentConfig, Bounds, Scene, SceneConfig, TickOutcome};
pub use error::{ChainError, MathError, OutlineError, ResolveError};
pub use ik::{
    AngleConstraint, Chain, ChainBuilder, ChainSolver, Constraint, HeadPolicy, Joint, Layout,
    NoConstraint, ResolveReport,
};
