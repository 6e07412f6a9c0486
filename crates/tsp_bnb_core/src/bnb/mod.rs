//! Reduced-cost-matrix branch and bound.
//!
//! Each [`node::SearchNode`] owns its matrix, so sibling branches never observe
//! each other's reductions. The incumbent is the only state shared across
//! branches and is updated under a single lock.

pub mod cancel;
pub mod cost;
pub mod incumbent;
pub mod matrix;
pub mod node;
pub mod solver;
mod stats;

pub use stats::SearchReport;
