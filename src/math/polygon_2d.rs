use super::{Point2, TOLERANCE};

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Drops consecutive coincident points from a closed ring, including the
/// wrap-around pair.
#[must_use]
pub fn dedup_ring(points: &[Point2]) -> Vec<Point2> {
    let mut ring: Vec<Point2> = Vec::with_capacity(points.len());
    for &p in points {
        if ring.last().is_none_or(|last| (p - last).norm() > TOLERANCE) {
            ring.push(p);
        }
    }
    while ring.len() > 1 && (ring[0] - ring[ring.len() - 1]).norm() <= TOLERANCE {
        ring.pop();
    }
    ring
}

/// Returns the ring in counter-clockwise order.
#[must_use]
pub fn counter_clockwise(mut points: Vec<Point2>) -> Vec<Point2> {
    if signed_area(&points) < 0.0 {
        points.reverse();
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn ccw_square_has_positive_area() {
        let sq = [p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)];
        assert!((signed_area(&sq) - 4.0).abs() < TOLERANCE);
    }

    #[test]
    fn cw_square_is_reversed() {
        let sq = vec![p(0.0, 0.0), p(0.0, 2.0), p(2.0, 2.0), p(2.0, 0.0)];
        assert!(signed_area(&sq) < 0.0);
        let ccw = counter_clockwise(sq);
        assert!(signed_area(&ccw) > 0.0);
    }

    #[test]
    fn dedup_removes_repeats_and_closing_point() {
        let ring = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 0.0)];
        let out = dedup_ring(&ring);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn degenerate_polygon_has_zero_area() {
        assert!(signed_area(&[p(0.0, 0.0), p(1.0, 1.0)]).abs() < TOLERANCE);
    }
}
