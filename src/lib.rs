pub mod catalog;
pub mod chain;
pub mod collision;
pub mod error;
pub mod math;
pub mod mesh;
pub mod walkthrough;

pub use catalog::{SegmentSpec, SpecRegistry};
pub use chain::{compute_bounds, solve_chain, HoleChain, SegmentInstance, SolvedChain, TemplateBounds};
pub use collision::{
    any_collision, check_placement, min_translation, obb_overlap, within_container, Container,
    Footprint, Obb, Placement,
};
pub use error::{FairwayError, Result};
pub use mesh::{
    build_bumper_extrusion, build_corner_fillet, build_hole_meshes, build_segment_meshes,
    MeshParams, SegmentMeshes, TriangleMesh,
};
pub use walkthrough::{resolve_walkthrough, DoorZone, Wall, Walkthrough, WalkthroughConfig};
