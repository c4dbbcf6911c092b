use slotmap::SlotMap;

use crate::catalog::SpecRegistry;
use crate::error::{ChainError, Result};
use crate::math::{Port, Pose};

use super::instance::{InstanceId, SegmentInstance, SolvedChain};
use super::solve::solve_chain;

/// Owns the segment instances of one hole and keeps them solved.
///
/// Instances live in a slot map so their ids stay valid while neighbours are
/// inserted or removed. Every change of membership or order re-solves the
/// whole chain from the ordered spec ids.
#[derive(Debug, Clone)]
pub struct HoleChain<'r> {
    registry: &'r SpecRegistry,
    instances: SlotMap<InstanceId, SegmentInstance>,
    order: Vec<InstanceId>,
    solved: SolvedChain,
}

impl<'r> HoleChain<'r> {
    /// Creates an empty hole using specs from `registry`.
    #[must_use]
    pub fn new(registry: &'r SpecRegistry) -> Self {
        Self {
            registry,
            instances: SlotMap::with_key(),
            order: Vec::new(),
            solved: SolvedChain::default(),
        }
    }

    /// Creates a hole from an ordered list of spec ids.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::UnknownSegment`] for the first unknown id.
    pub fn from_spec_ids<'a>(
        registry: &'r SpecRegistry,
        spec_ids: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self> {
        let mut hole = Self::new(registry);
        for id in spec_ids {
            hole.check_spec(id)?;
            let key = hole.instances.insert_with_key(|key| SegmentInstance::new(key, id));
            hole.order.push(key);
        }
        hole.resolve()?;
        Ok(hole)
    }

    /// Appends a segment at the open end of the chain.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::UnknownSegment`] if the spec id is unknown; the
    /// chain is left unchanged.
    pub fn append(&mut self, spec_id: &str) -> Result<InstanceId> {
        self.insert_at(self.order.len(), spec_id)
    }

    /// Inserts a segment directly after `after`.
    ///
    /// # Errors
    ///
    /// Returns an error if `after` is not part of the chain or the spec id is
    /// unknown.
    pub fn insert_after(&mut self, after: InstanceId, spec_id: &str) -> Result<InstanceId> {
        let index = self.index_of(after)?;
        self.insert_at(index + 1, spec_id)
    }

    /// Swaps the segment kind of an existing instance, keeping its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the instance does not exist or the spec id is
    /// unknown.
    pub fn replace(&mut self, id: InstanceId, spec_id: &str) -> Result<()> {
        self.check_spec(spec_id)?;
        let instance = self
            .instances
            .get_mut(id)
            .ok_or(ChainError::InstanceNotFound)?;
        spec_id.clone_into(&mut instance.spec_id);
        self.resolve()
    }

    /// Moves an instance to a new position in the chain order.
    ///
    /// `index` is clamped to the chain length.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InstanceNotFound`] if the instance does not exist.
    pub fn move_to(&mut self, id: InstanceId, index: usize) -> Result<()> {
        let from = self.index_of(id)?;
        self.order.remove(from);
        let index = index.min(self.order.len());
        self.order.insert(index, id);
        self.resolve()
    }

    /// Removes an instance, returning its last solved state.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InstanceNotFound`] if the instance does not exist.
    pub fn remove(&mut self, id: InstanceId) -> Result<SegmentInstance> {
        let index = self.index_of(id)?;
        self.order.remove(index);
        let removed = self
            .instances
            .remove(id)
            .ok_or(ChainError::InstanceNotFound)?;
        self.resolve()?;
        Ok(removed)
    }

    /// Removes every instance.
    pub fn clear(&mut self) {
        self.instances.clear();
        self.order.clear();
        self.solved = SolvedChain::default();
    }

    /// Returns the instance with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InstanceNotFound`] if the instance does not exist.
    pub fn instance(&self, id: InstanceId) -> std::result::Result<&SegmentInstance, ChainError> {
        self.instances.get(id).ok_or(ChainError::InstanceNotFound)
    }

    /// Instance ids in chain order.
    #[must_use]
    pub fn order(&self) -> &[InstanceId] {
        &self.order
    }

    /// Spec ids in chain order.
    #[must_use]
    pub fn spec_ids(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter_map(|id| self.instances.get(*id))
            .map(|instance| instance.spec_id.as_str())
            .collect()
    }

    /// The current solved chain.
    #[must_use]
    pub fn solved(&self) -> &SolvedChain {
        &self.solved
    }

    /// Where the next appended segment would be placed: the cup end of the
    /// hole, or the origin for an empty hole.
    #[must_use]
    pub fn end_pose(&self) -> Pose {
        self.solved
            .segments()
            .last()
            .map_or_else(Pose::identity, |last| {
                last.pose().advance(last.spec().exit(), &Port::entry())
            })
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns whether the hole has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn insert_at(&mut self, index: usize, spec_id: &str) -> Result<InstanceId> {
        self.check_spec(spec_id)?;
        let id = self
            .instances
            .insert_with_key(|key| SegmentInstance::new(key, spec_id));
        self.order.insert(index.min(self.order.len()), id);
        self.resolve()?;
        Ok(id)
    }

    fn check_spec(&self, spec_id: &str) -> std::result::Result<(), ChainError> {
        self.registry.get(spec_id).map(|_| ())
    }

    fn index_of(&self, id: InstanceId) -> std::result::Result<usize, ChainError> {
        self.order
            .iter()
            .position(|&other| other == id)
            .ok_or(ChainError::InstanceNotFound)
    }

    fn resolve(&mut self) -> Result<()> {
        let ordered: Vec<SegmentInstance> = self
            .order
            .iter()
            .filter_map(|id| self.instances.get(*id).cloned())
            .collect();
        let solved = solve_chain(&ordered, self.registry)?;
        for instance in solved.instances() {
            if let Some(slot) = self.instances.get_mut(instance.id) {
                slot.clone_from(instance);
            }
        }
        self.solved = solved;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::catalog::ids;
    use crate::error::FairwayError;

    fn registry() -> &'static SpecRegistry {
        SpecRegistry::standard()
    }

    #[test]
    fn append_links_and_solves() {
        let mut hole = HoleChain::new(registry());
        let a = hole.append(ids::STRAIGHT_1M).unwrap();
        let b = hole.append(ids::CURVE_90_LEFT).unwrap();
        let c = hole.append(ids::STRAIGHT_1M).unwrap();

        assert_eq!(hole.len(), 3);
        assert_eq!(hole.instance(a).unwrap().next, Some(b));
        assert_eq!(hole.instance(c).unwrap().prev, Some(b));
        let third = hole.instance(c).unwrap();
        assert!((third.position.x + 0.8).abs() < 1e-12);
        assert_eq!(third.rotation, 90.0);
    }

    #[test]
    fn unknown_spec_leaves_chain_untouched() {
        let mut hole = HoleChain::from_spec_ids(registry(), [ids::STRAIGHT_1M]).unwrap();
        let err = hole.append("trampoline").unwrap_err();
        assert!(matches!(err, FairwayError::Chain(ChainError::UnknownSegment(_))));
        assert_eq!(hole.len(), 1);
        assert_eq!(hole.solved().len(), 1);
    }

    #[test]
    fn insert_after_re_solves_downstream() {
        let mut hole = HoleChain::new(registry());
        let a = hole.append(ids::STRAIGHT_1M).unwrap();
        let b = hole.append(ids::STRAIGHT_1M).unwrap();
        assert!((hole.instance(b).unwrap().position.y - 1.0).abs() < 1e-12);

        hole.insert_after(a, ids::STRAIGHT_2M).unwrap();
        assert!((hole.instance(b).unwrap().position.y - 3.0).abs() < 1e-12);
        assert_eq!(hole.spec_ids(), vec![ids::STRAIGHT_1M, ids::STRAIGHT_2M, ids::STRAIGHT_1M]);
    }

    #[test]
    fn remove_relinks_neighbours() {
        let mut hole = HoleChain::new(registry());
        let a = hole.append(ids::STRAIGHT_1M).unwrap();
        let b = hole.append(ids::CURVE_90_RIGHT).unwrap();
        let c = hole.append(ids::STRAIGHT_1M).unwrap();

        let removed = hole.remove(b).unwrap();
        assert_eq!(removed.id, b);
        assert_eq!(hole.instance(a).unwrap().next, Some(c));
        assert_eq!(hole.instance(c).unwrap().prev, Some(a));
        assert_eq!(hole.instance(c).unwrap().rotation, 0.0);
        assert!(matches!(hole.instance(b), Err(ChainError::InstanceNotFound)));
        assert!(hole.remove(b).is_err());
    }

    #[test]
    fn replace_keeps_identity() {
        let mut hole =
            HoleChain::from_spec_ids(registry(), [ids::STRAIGHT_1M, ids::STRAIGHT_1M]).unwrap();
        let first = hole.order()[0];
        hole.replace(first, ids::CURVE_90_LEFT).unwrap();
        assert_eq!(hole.order()[0], first);
        assert_eq!(hole.solved().segments()[1].instance().rotation, 90.0);
    }

    #[test]
    fn move_to_reorders() {
        let mut hole =
            HoleChain::from_spec_ids(registry(), [ids::CURVE_90_LEFT, ids::STRAIGHT_1M]).unwrap();
        let curve = hole.order()[0];
        hole.move_to(curve, 99).unwrap();
        assert_eq!(hole.order()[1], curve);
        let moved = hole.instance(curve).unwrap();
        assert!((moved.position.y - 1.0).abs() < 1e-12);
        assert_eq!(moved.rotation, 0.0);
    }

    #[test]
    fn end_pose_predicts_next_placement() {
        let mut hole = HoleChain::new(registry());
        assert_eq!(hole.end_pose(), Pose::identity());

        hole.append(ids::STRAIGHT_1M).unwrap();
        hole.append(ids::CURVE_90_LEFT).unwrap();
        let predicted = hole.end_pose();
        let next = hole.append(ids::STRAIGHT_05M).unwrap();
        let placed = hole.instance(next).unwrap().pose();
        assert!((predicted.position - placed.position).norm() < 1e-12);
        assert_eq!(predicted.rotation, placed.rotation);
    }

    #[test]
    fn clear_empties_everything() {
        let mut hole = HoleChain::from_spec_ids(registry(), [ids::U_TURN_LEFT]).unwrap();
        hole.clear();
        assert!(hole.is_empty());
        assert!(hole.solved().is_empty());
    }
}
