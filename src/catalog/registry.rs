use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use crate::error::ChainError;
use crate::math::Turn;

use super::spec::{Primitive, SegmentSpec};

/// Identifiers of the standard catalog.
pub mod ids {
    pub const STRAIGHT_05M: &str = "straight_05m";
    pub const STRAIGHT_1M: &str = "straight_1m";
    pub const STRAIGHT_2M: &str = "straight_2m";
    pub const STRAIGHT_3M: &str = "straight_3m";
    pub const CURVE_45_LEFT: &str = "curve_45_left";
    pub const CURVE_45_RIGHT: &str = "curve_45_right";
    pub const CURVE_90_LEFT: &str = "curve_90_left";
    pub const CURVE_90_RIGHT: &str = "curve_90_right";
    pub const S_CURVE_LEFT: &str = "s_curve_left";
    pub const S_CURVE_RIGHT: &str = "s_curve_right";
    pub const U_TURN_LEFT: &str = "u_turn_left";
    pub const U_TURN_RIGHT: &str = "u_turn_right";
    pub const CHICANE_LEFT: &str = "chicane_left";
    pub const CHICANE_RIGHT: &str = "chicane_right";
}

static STANDARD: LazyLock<SpecRegistry> = LazyLock::new(SpecRegistry::with_standard_catalog);

/// Read-only lookup table of segment specs keyed by id.
///
/// Specs are shared through [`Arc`] so solved chains can keep them without
/// borrowing the registry.
#[derive(Debug, Clone, Default)]
pub struct SpecRegistry {
    specs: HashMap<String, Arc<SegmentSpec>>,
}

impl SpecRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared standard catalog, built on first use.
    #[must_use]
    pub fn standard() -> &'static SpecRegistry {
        &STANDARD
    }

    /// Builds a fresh registry holding the standard catalog.
    #[must_use]
    pub fn with_standard_catalog() -> Self {
        let mut registry = Self::new();

        for (id, length) in [
            (ids::STRAIGHT_05M, 0.5),
            (ids::STRAIGHT_1M, 1.0),
            (ids::STRAIGHT_2M, 2.0),
            (ids::STRAIGHT_3M, 3.0),
        ] {
            registry.register(SegmentSpec::straight(id, length));
        }

        let curve_45 = SegmentSpec::curve(ids::CURVE_45_LEFT, Turn::Left, 1.6, 45.0);
        let curve_90 = SegmentSpec::curve(ids::CURVE_90_LEFT, Turn::Left, 0.8, 90.0);
        let s_curve = SegmentSpec::compound(
            ids::S_CURVE_LEFT,
            vec![
                Primitive::Arc { radius: 1.6, sweep: 45.0, turn: Turn::Left },
                Primitive::Arc { radius: 1.6, sweep: 45.0, turn: Turn::Right },
            ],
        );
        let u_turn = SegmentSpec::compound(
            ids::U_TURN_LEFT,
            vec![
                Primitive::Straight { length: 0.25 },
                Primitive::Arc { radius: 0.6, sweep: 180.0, turn: Turn::Left },
                Primitive::Straight { length: 0.25 },
            ],
        );
        let chicane = SegmentSpec::compound(
            ids::CHICANE_LEFT,
            vec![
                Primitive::Arc { radius: 1.2, sweep: 30.0, turn: Turn::Left },
                Primitive::Straight { length: 0.6 },
                Primitive::Arc { radius: 1.2, sweep: 30.0, turn: Turn::Right },
            ],
        );

        for (left, right_id) in [
            (curve_45, ids::CURVE_45_RIGHT),
            (curve_90, ids::CURVE_90_RIGHT),
            (s_curve, ids::S_CURVE_RIGHT),
            (u_turn, ids::U_TURN_RIGHT),
            (chicane, ids::CHICANE_RIGHT),
        ] {
            let right = left.mirrored(right_id);
            registry.register(left);
            registry.register(right);
        }

        registry
    }

    /// Adds or replaces a spec, returning the one it replaced.
    pub fn register(&mut self, spec: SegmentSpec) -> Option<Arc<SegmentSpec>> {
        self.specs.insert(spec.id().to_owned(), Arc::new(spec))
    }

    /// Looks up a spec by id.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::UnknownSegment`] if no spec has this id.
    pub fn get(&self, id: &str) -> Result<&Arc<SegmentSpec>, ChainError> {
        self.specs
            .get(id)
            .ok_or_else(|| ChainError::UnknownSegment(id.to_owned()))
    }

    /// Returns whether a spec with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.specs.contains_key(id)
    }

    /// All registered ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.specs.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered specs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
