use std::sync::Arc;

use crate::catalog::{SegmentSpec, SpecRegistry};
use crate::error::Result;
use crate::math::Pose;

use super::instance::{SegmentInstance, SolvedChain, SolvedSegment};

/// Places every instance so its entry port meets the previous instance's exit
/// port.
///
/// The first instance is pinned at the origin with rotation 0. The result is
/// a pure function of the ordered spec ids: ids are preserved, positions,
/// rotations and `prev`/`next` links are recomputed, and the input is left
/// untouched.
///
/// # Errors
///
/// Returns [`ChainError::UnknownSegment`](crate::error::ChainError::UnknownSegment)
/// if an instance names a spec the registry does not contain.
pub fn solve_chain(instances: &[SegmentInstance], registry: &SpecRegistry) -> Result<SolvedChain> {
    let mut segments = Vec::with_capacity(instances.len());
    let mut prev: Option<(Pose, &Arc<SegmentSpec>)> = None;

    for (i, instance) in instances.iter().enumerate() {
        let spec = registry.get(&instance.spec_id)?;
        let pose = match prev {
            None => Pose::identity(),
            Some((prev_pose, prev_spec)) => prev_pose.advance(prev_spec.exit(), spec.entry()),
        };

        let solved = SegmentInstance {
            id: instance.id,
            spec_id: instance.spec_id.clone(),
            position: pose.position,
            rotation: pose.rotation,
            prev: i.checked_sub(1).map(|j| instances[j].id),
            next: instances.get(i + 1).map(|next| next.id),
        };
        segments.push(SolvedSegment::new(solved, Arc::clone(spec)));
        prev = Some((pose, spec));
    }

    tracing::debug!(segments = segments.len(), "solved segment chain");
    Ok(SolvedChain::new(segments))
}
