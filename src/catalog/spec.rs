use crate::math::arc_2d::{arc_length, arc_point_at, polar_angle};
use crate::math::{normalize_angle, sin_cos_deg, Point2, Pose, Port, Turn, MIN_EXTENT};

/// A single circular arc in a segment's local frame.
///
/// The arc always starts at the local origin heading toward `+z`; the center
/// lies on the `x` axis, on the side the arc turns toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcDescriptor {
    /// Arc center in the local frame.
    pub center: Point2,
    /// Centerline radius.
    pub radius: f64,
    /// Unsigned sweep in degrees.
    pub sweep: f64,
}

impl ArcDescriptor {
    /// Creates an arc turning toward `turn`.
    ///
    /// Radius clamps to [`MIN_EXTENT`]; sweep clamps into `(0, 360]`.
    #[must_use]
    pub fn new(turn: Turn, radius: f64, sweep: f64) -> Self {
        let radius = clamp_extent("arc radius", radius);
        let sweep = if sweep.is_finite() && sweep > 0.0 {
            sweep.min(360.0)
        } else {
            tracing::warn!(sweep, "arc sweep clamped to 1 degree");
            1.0
        };
        Self {
            center: Point2::new(-turn.sign() * radius, 0.0),
            radius,
            sweep,
        }
    }

    /// Which way the arc turns, derived from the side the center is on.
    #[must_use]
    pub fn turn(&self) -> Turn {
        Turn::from_center(&self.center)
    }

    /// Polar angle of the local origin around the center: `0` for left arcs,
    /// `180` for right arcs.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        normalize_angle(polar_angle(&self.center, &Point2::origin()))
    }

    /// Sweep signed by turn direction (counter-clockwise positive).
    #[must_use]
    pub fn signed_sweep(&self) -> f64 {
        self.turn().sign() * self.sweep
    }

    /// Point at parameter `t` in `[0, 1]` along the centerline.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        arc_point_at(&self.center, self.radius, self.start_angle(), self.signed_sweep(), t)
    }

    /// Centerline point at half the sweep.
    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        self.point_at(0.5)
    }

    /// Exit port. Mirrored arcs produce exactly mirrored ports.
    #[must_use]
    pub fn exit_port(&self) -> Port {
        let (sin, cos) = sin_cos_deg(self.sweep);
        let sign = self.turn().sign();
        Port::new(
            -sign * (self.radius - self.radius * cos),
            self.radius * sin,
            normalize_angle(-self.signed_sweep()),
        )
    }

    /// Centerline length.
    #[must_use]
    pub fn length(&self) -> f64 {
        arc_length(self.radius, self.sweep)
    }
}

/// One straight or arc piece of a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Straight { length: f64 },
    Arc { radius: f64, sweep: f64, turn: Turn },
}

impl Primitive {
    /// The arc descriptor, for arc pieces.
    #[must_use]
    pub fn arc(&self) -> Option<ArcDescriptor> {
        match *self {
            Self::Straight { .. } => None,
            Self::Arc { radius, sweep, turn } => Some(ArcDescriptor::new(turn, radius, sweep)),
        }
    }

    /// Local exit port of the piece.
    #[must_use]
    pub fn exit_port(&self) -> Port {
        match *self {
            Self::Straight { length } => Port::new(0.0, clamp_extent("straight length", length), 0.0),
            Self::Arc { radius, sweep, turn } => ArcDescriptor::new(turn, radius, sweep).exit_port(),
        }
    }

    /// Centerline length.
    #[must_use]
    pub fn length(&self) -> f64 {
        match *self {
            Self::Straight { length } => clamp_extent("straight length", length),
            Self::Arc { radius, sweep, turn } => ArcDescriptor::new(turn, radius, sweep).length(),
        }
    }

    /// The same piece turning the other way.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        match *self {
            Self::Straight { length } => Self::Straight { length },
            Self::Arc { radius, sweep, turn } => Self::Arc {
                radius,
                sweep,
                turn: turn.mirrored(),
            },
        }
    }
}

/// A piece together with its placement inside the segment's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedPiece {
    /// Where the piece's entry sits, relative to the segment entry.
    pub pose: Pose,
    /// The piece itself.
    pub primitive: Primitive,
}

/// Segment geometry, one variant per category.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentShape {
    Straight { length: f64 },
    Curve(ArcDescriptor),
    /// Ordered pieces, chained entry-to-exit.
    Compound(Vec<Primitive>),
}

/// An immutable catalog entry describing one kind of path segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSpec {
    id: String,
    shape: SegmentShape,
    entry: Port,
    exit: Port,
    length: f64,
    pieces: Vec<PlacedPiece>,
    bound_samples: Vec<Point2>,
}

impl SegmentSpec {
    /// A straight segment of the given length.
    #[must_use]
    pub fn straight(id: impl Into<String>, length: f64) -> Self {
        let length = clamp_extent("straight length", length);
        Self::from_shape(id.into(), SegmentShape::Straight { length })
    }

    /// A single-arc curve.
    #[must_use]
    pub fn curve(id: impl Into<String>, turn: Turn, radius: f64, sweep: f64) -> Self {
        Self::from_shape(id.into(), SegmentShape::Curve(ArcDescriptor::new(turn, radius, sweep)))
    }

    /// A compound segment built from ordered pieces.
    ///
    /// An empty piece list degenerates to the shortest allowed straight.
    #[must_use]
    pub fn compound(id: impl Into<String>, pieces: Vec<Primitive>) -> Self {
        let id = id.into();
        if pieces.is_empty() {
            tracing::warn!(id = %id, "compound segment without pieces clamped to a short straight");
            return Self::from_shape(id, SegmentShape::Straight { length: MIN_EXTENT });
        }
        Self::from_shape(id, SegmentShape::Compound(pieces))
    }

    /// The mirror image of this spec under a new id.
    #[must_use]
    pub fn mirrored(&self, id: impl Into<String>) -> Self {
        let shape = match &self.shape {
            SegmentShape::Straight { length } => SegmentShape::Straight { length: *length },
            SegmentShape::Curve(arc) => {
                SegmentShape::Curve(ArcDescriptor::new(arc.turn().mirrored(), arc.radius, arc.sweep))
            }
            SegmentShape::Compound(pieces) => {
                SegmentShape::Compound(pieces.iter().map(Primitive::mirrored).collect())
            }
        };
        Self::from_shape(id.into(), shape)
    }

    fn from_shape(id: String, shape: SegmentShape) -> Self {
        let primitives = match &shape {
            SegmentShape::Straight { length } => vec![Primitive::Straight { length: *length }],
            SegmentShape::Curve(arc) => vec![Primitive::Arc {
                radius: arc.radius,
                sweep: arc.sweep,
                turn: arc.turn(),
            }],
            SegmentShape::Compound(pieces) => pieces.clone(),
        };

        let entry = Port::entry();
        let mut pieces = Vec::with_capacity(primitives.len());
        let mut pose = Pose::identity();
        for (i, primitive) in primitives.iter().enumerate() {
            if i > 0 {
                let prev: &PlacedPiece = &pieces[i - 1];
                pose = prev.pose.advance(&prev.primitive.exit_port(), &entry);
            }
            pieces.push(PlacedPiece {
                pose,
                primitive: *primitive,
            });
        }

        let exit = match (&shape, pieces.last()) {
            (SegmentShape::Straight { length }, _) => Port::new(0.0, *length, 0.0),
            (SegmentShape::Curve(arc), _) => arc.exit_port(),
            (SegmentShape::Compound(_), Some(last)) => last.pose.exit_port(&last.primitive.exit_port()),
            (SegmentShape::Compound(_), None) => entry,
        };

        let mut bound_samples = vec![entry.position];
        for piece in &pieces {
            if let Some(arc) = piece.primitive.arc() {
                bound_samples.push(piece.pose.transform_point(&arc.midpoint()));
            }
            bound_samples.push(piece.pose.transform_point(&piece.primitive.exit_port().position));
        }

        let length = primitives.iter().map(Primitive::length).sum();

        Self {
            id,
            shape,
            entry,
            exit,
            length,
            pieces,
            bound_samples,
        }
    }

    /// Catalog identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Category-specific geometry.
    #[must_use]
    pub fn shape(&self) -> &SegmentShape {
        &self.shape
    }

    /// Entry port (always the origin, facing `−z`).
    #[must_use]
    pub fn entry(&self) -> &Port {
        &self.entry
    }

    /// Exit port in the local frame.
    #[must_use]
    pub fn exit(&self) -> &Port {
        &self.exit
    }

    /// Approximate centerline length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// The arc descriptor of a single-arc curve.
    #[must_use]
    pub fn arc(&self) -> Option<&ArcDescriptor> {
        match &self.shape {
            SegmentShape::Curve(arc) => Some(arc),
            _ => None,
        }
    }

    /// Pieces with their local placements. Single-piece specs have one entry
    /// at the identity pose.
    #[must_use]
    pub fn pieces(&self) -> &[PlacedPiece] {
        &self.pieces
    }

    /// Local points the bounds calculator must cover: entry, every piece exit
    /// and every arc midpoint.
    #[must_use]
    pub fn bound_samples(&self) -> &[Point2] {
        &self.bound_samples
    }

    /// Smallest inner radius over all arcs once the lane and one bumper are
    /// laid beside the centerline. `None` for specs without arcs.
    #[must_use]
    pub fn min_inner_radius(&self, lane_width: f64, bumper_thickness: f64) -> Option<f64> {
        let inset = lane_width.max(0.0) * 0.5 + bumper_thickness.max(0.0);
        self.pieces
            .iter()
            .filter_map(|p| p.primitive.arc())
            .map(|arc| arc.radius - inset)
            .reduce(f64::min)
    }

    /// Whether the lane and bumpers fit inside every arc without clamping.
    #[must_use]
    pub fn accepts_lane_width(&self, lane_width: f64, bumper_thickness: f64) -> bool {
        self.min_inner_radius(lane_width, bumper_thickness)
            .is_none_or(|r| r >= 0.0)
    }
}

fn clamp_extent(what: &'static str, value: f64) -> f64 {
    if value.is_finite() && value >= MIN_EXTENT {
        value
    } else {
        tracing::warn!(what, value, "degenerate extent clamped");
        MIN_EXTENT
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn every_spec_enters_at_origin_facing_back() {
        let specs = [
            SegmentSpec::straight("s", 1.0),
            SegmentSpec::curve("c", Turn::Right, 1.0, 45.0),
            SegmentSpec::compound(
                "x",
                vec![
                    Primitive::Straight { length: 1.0 },
                    Primitive::Arc { radius: 1.0, sweep: 90.0, turn: Turn::Left },
                ],
            ),
        ];
        for spec in &specs {
            assert_eq!(spec.entry().position, Point2::origin());
            assert_eq!(spec.entry().angle, 180.0);
        }
    }

    #[test]
    fn left_quarter_curve_exit() {
        let spec = SegmentSpec::curve("c", Turn::Left, 0.8, 90.0);
        assert_eq!(spec.exit().position, Point2::new(-0.8, 0.8));
        assert_eq!(spec.exit().angle, 270.0);
        let arc = spec.arc().unwrap();
        assert_eq!(arc.start_angle(), 0.0);
        assert_eq!(arc.turn(), Turn::Left);
    }

    #[test]
    fn right_quarter_curve_exit() {
        let spec = SegmentSpec::curve("c", Turn::Right, 0.8, 90.0);
        assert_eq!(spec.exit().position, Point2::new(0.8, 0.8));
        assert_eq!(spec.exit().angle, 90.0);
        assert!((spec.arc().unwrap().start_angle() - 180.0).abs() < TOL);
    }

    #[test]
    fn arc_point_at_end_matches_exit_port() {
        for turn in [Turn::Left, Turn::Right] {
            for sweep in [30.0, 45.0, 90.0, 135.0, 180.0] {
                let arc = ArcDescriptor::new(turn, 1.3, sweep);
                let end = arc.point_at(1.0);
                let exit = arc.exit_port().position;
                assert!((end - exit).norm() < 1e-9, "{turn:?} {sweep}: {end} vs {exit}");
            }
        }
    }

    #[test]
    fn mirrored_curve_reflects_exit() {
        let left = SegmentSpec::curve("l", Turn::Left, 1.6, 45.0);
        let right = left.mirrored("r");
        assert_eq!(left.exit().position.x, -right.exit().position.x);
        assert_eq!(left.exit().position.y, right.exit().position.y);
        assert_eq!(left.exit().angle + right.exit().angle, 360.0);
    }

    #[test]
    fn compound_exit_composes_pieces() {
        let spec = SegmentSpec::compound(
            "u",
            vec![
                Primitive::Straight { length: 0.25 },
                Primitive::Arc { radius: 0.6, sweep: 180.0, turn: Turn::Left },
                Primitive::Straight { length: 0.25 },
            ],
        );
        assert!((spec.exit().position.x + 1.2).abs() < TOL);
        assert!(spec.exit().position.y.abs() < TOL);
        assert_eq!(spec.exit().angle, 180.0);
        assert!((spec.length() - (0.5 + 0.6 * std::f64::consts::PI)).abs() < TOL);
        assert_eq!(spec.pieces().len(), 3);
        assert_eq!(spec.pieces()[2].pose.rotation, 180.0);
    }

    #[test]
    fn bound_samples_include_arc_midpoint() {
        let spec = SegmentSpec::curve("c", Turn::Left, 1.0, 90.0);
        let mid = spec.arc().unwrap().midpoint();
        assert!(spec.bound_samples().iter().any(|p| (p - mid).norm() < TOL));
        assert_eq!(spec.bound_samples().len(), 3);
    }

    #[test]
    fn degenerate_inputs_are_clamped() {
        let spec = SegmentSpec::straight("z", 0.0);
        assert_eq!(spec.length(), MIN_EXTENT);
        let spec = SegmentSpec::curve("n", Turn::Left, f64::NAN, -5.0);
        let arc = spec.arc().unwrap();
        assert_eq!(arc.radius, MIN_EXTENT);
        assert!(arc.sweep > 0.0);
        assert!(spec.exit().position.x.is_finite());
        let empty = SegmentSpec::compound("e", vec![]);
        assert!(matches!(empty.shape(), SegmentShape::Straight { .. }));
    }

    #[test]
    fn inner_radius_validity() {
        let spec = SegmentSpec::curve("c", Turn::Left, 0.8, 90.0);
        assert!(spec.accepts_lane_width(1.0, 0.05));
        assert!(!spec.accepts_lane_width(1.6, 0.05));
        assert!(SegmentSpec::straight("s", 1.0).accepts_lane_width(100.0, 1.0));
        let r = spec.min_inner_radius(1.0, 0.1).unwrap();
        assert!((r - 0.2).abs() < TOL);
    }
}
