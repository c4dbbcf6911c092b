use std::sync::Arc;

use crate::catalog::SegmentSpec;
use crate::math::{Point2, Pose, Port};

slotmap::new_key_type! {
    /// Stable identifier of a segment instance within a hole.
    pub struct InstanceId;
}

/// One placed segment of a hole.
///
/// `position` and `rotation` are outputs of the solver; `prev`/`next` link
/// the neighbours in chain order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentInstance {
    /// Stable identity, preserved across re-solves.
    pub id: InstanceId,
    /// Catalog id of the segment kind.
    pub spec_id: String,
    /// World position of the entry point.
    pub position: Point2,
    /// World rotation in degrees, in `[0, 360)`.
    pub rotation: f64,
    /// Previous instance in the chain.
    pub prev: Option<InstanceId>,
    /// Next instance in the chain.
    pub next: Option<InstanceId>,
}

impl SegmentInstance {
    /// Creates an unsolved, unlinked instance at the origin.
    #[must_use]
    pub fn new(id: InstanceId, spec_id: impl Into<String>) -> Self {
        Self {
            id,
            spec_id: spec_id.into(),
            position: Point2::origin(),
            rotation: 0.0,
            prev: None,
            next: None,
        }
    }

    /// World placement of the instance's local frame.
    #[must_use]
    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            rotation: self.rotation,
        }
    }
}

/// A solved instance together with the spec it was solved against.
#[derive(Debug, Clone)]
pub struct SolvedSegment {
    instance: SegmentInstance,
    spec: Arc<SegmentSpec>,
}

impl SolvedSegment {
    pub(super) fn new(instance: SegmentInstance, spec: Arc<SegmentSpec>) -> Self {
        Self { instance, spec }
    }

    /// The solved instance.
    #[must_use]
    pub fn instance(&self) -> &SegmentInstance {
        &self.instance
    }

    /// The spec this instance was solved with.
    #[must_use]
    pub fn spec(&self) -> &SegmentSpec {
        &self.spec
    }

    /// World placement of the segment.
    #[must_use]
    pub fn pose(&self) -> Pose {
        self.instance.pose()
    }

    /// World-space exit port of the segment.
    #[must_use]
    pub fn exit_port(&self) -> Port {
        self.pose().exit_port(self.spec.exit())
    }
}

/// Output of the chain solver.
///
/// Bounds and mesh building take a `SolvedChain`, so they can never see raw,
/// unsolved instances.
#[derive(Debug, Clone, Default)]
pub struct SolvedChain {
    segments: Vec<SolvedSegment>,
}

impl SolvedChain {
    pub(super) fn new(segments: Vec<SolvedSegment>) -> Self {
        Self { segments }
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns whether the chain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Solved segments in chain order.
    #[must_use]
    pub fn segments(&self) -> &[SolvedSegment] {
        &self.segments
    }

    /// Iterates the solved segments in chain order.
    pub fn iter(&self) -> std::slice::Iter<'_, SolvedSegment> {
        self.segments.iter()
    }

    /// Iterates the solved instances in chain order.
    pub fn instances(&self) -> impl Iterator<Item = &SegmentInstance> {
        self.segments.iter().map(SolvedSegment::instance)
    }

    /// Consumes the chain, returning the solved instances.
    #[must_use]
    pub fn into_instances(self) -> Vec<SegmentInstance> {
        self.segments.into_iter().map(|s| s.instance).collect()
    }

    /// Finds a solved segment by instance id.
    #[must_use]
    pub fn get(&self, id: InstanceId) -> Option<&SolvedSegment> {
        self.segments.iter().find(|s| s.instance.id == id)
    }

    /// The open end of the chain, where the cup sits or the next segment
    /// would attach. `None` for an empty chain.
    #[must_use]
    pub fn exit_port(&self) -> Option<Port> {
        self.segments.last().map(SolvedSegment::exit_port)
    }
}

impl<'a> IntoIterator for &'a SolvedChain {
    type Item = &'a SolvedSegment;
    type IntoIter = std::slice::Iter<'a, SolvedSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
