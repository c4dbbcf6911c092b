//! Catalog of reusable path segments.

mod registry;
mod spec;

pub use registry::{ids, SpecRegistry};
pub use spec::{ArcDescriptor, PlacedPiece, Primitive, SegmentShape, SegmentSpec};
