//! Segment chains: instances, the position solver and template bounds.

mod bounds;
mod instance;
mod solve;
mod store;

pub use bounds::{compute_bounds, TemplateBounds};
pub use instance::{InstanceId, SegmentInstance, SolvedChain, SolvedSegment};
pub use solve::solve_chain;
pub use store::HoleChain;
