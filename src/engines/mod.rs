//! Engine layer
//!
//! Reusable compute and parallel primitives that the motif modules are
//! built on. Nothing in here knows about motif selection rules.

pub mod compute;
pub mod core;

pub use compute::{ComputeError, ComputeResult};
