use crate::math::Vector2;

use super::obb::{separating_axes, Obb};

/// Minimum translation that moves `moving` out of `fixed`.
///
/// Picks the separating-axis candidate with the smallest positive overlap
/// `ra + rb − |d·axis|` and signs it toward the side `moving`'s center lies
/// on. Ties keep the first axis (`moving`'s own axes come first). Returns
/// `None` when the boxes do not overlap, i.e. some axis has no positive
/// overlap.
#[must_use]
pub fn min_translation(moving: &Obb, fixed: &Obb) -> Option<Vector2> {
    let offset = moving.center - fixed.center;
    let mut best: Option<(f64, Vector2)> = None;

    for axis in separating_axes(moving, fixed) {
        let distance = offset.dot(&axis);
        let overlap =
            moving.projected_radius(&axis) + fixed.projected_radius(&axis) - distance.abs();
        if overlap <= 0.0 {
            return None;
        }
        if best.is_none_or(|(smallest, _)| overlap < smallest) {
            let direction = if distance < 0.0 { -axis } else { axis };
            best = Some((overlap, direction));
        }
    }

    best.map(|(overlap, direction)| direction * overlap)
}
