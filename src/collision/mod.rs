//! Oriented-bounding-box collision on the ground plane.

mod mtv;
mod obb;
mod placement;

pub use mtv::min_translation;
pub use obb::{any_collision, obb_overlap, separating_axes, within_container, Footprint, Obb};
pub use placement::{check_placement, Container, Placement};
