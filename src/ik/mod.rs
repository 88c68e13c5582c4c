//! Chain module
//!
//! Joints, heading constraints, and the follow-the-leader resolver.

pub mod chain;
pub mod constraint;
pub mod joint;
pub mod solver;

pub use chain::{Chain, ChainBuilder, HeadPolicy, Layout};
pub use constraint::{AngleConstraint, Constraint, NoConstraint};
pub use joint::Joint;
pub use solver::{ChainSolver, ResolveReport};
