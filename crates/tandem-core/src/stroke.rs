//! Freehand stroke capture and simplification.

use kurbo::{Point, Vec2};

/// Point-capture filter for an in-progress pencil stroke.
///
/// Returns the offset to append (relative to the stroke origin), or
/// `None` when the sample should be dropped: either it is closer than
/// `min_distance` to the last captured point, or the stroke already holds
/// `max_points`. Dropping on the cap is silent; the stroke simply stops
/// densifying. This bounds point density independent of how often the
/// host delivers pointer-move events.
pub fn capture(
    points: &[Vec2],
    origin: Point,
    sample: Point,
    min_distance: f64,
    max_points: usize,
) -> Option<Vec2> {
    if points.len() >= max_points {
        return None;
    }
    let offset = sample - origin;
    let last = points.last().copied().unwrap_or(Vec2::ZERO);
    if (offset - last).hypot() > min_distance {
        Some(offset)
    } else {
        None
    }
}

/// One-pass stroke simplification.
///
/// Walks the sequence once: the first point is always kept, and each
/// subsequent point is kept only if its distance from the last kept point
/// exceeds `epsilon`, except the final point, which is always kept. This
/// is deliberately a cheap inter-point-distance pass, not
/// perpendicular-distance (Douglas-Peucker) simplification. Endpoints are
/// preserved exactly and order is never changed.
pub fn simplify(points: &[Vec2], epsilon: f64) -> Vec<Vec2> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut kept = Vec::with_capacity(points.len());
    kept.push(points[0]);
    let mut last = points[0];

    for (i, &point) in points.iter().enumerate().skip(1) {
        let is_final = i == points.len() - 1;
        if is_final || (point - last).hypot() > epsilon {
            kept.push(point);
            last = point;
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_requires_minimum_distance() {
        let origin = Point::new(100.0, 100.0);
        let mut points = vec![Vec2::ZERO];

        // Eight one-unit moves: nothing captured until the cumulative
        // distance from the last captured point exceeds the threshold.
        for step in 1..=8 {
            let sample = Point::new(100.0 + step as f64, 100.0);
            assert_eq!(capture(&points, origin, sample, 8.0, 300), None);
        }

        let sample = Point::new(108.5, 100.0);
        let offset = capture(&points, origin, sample, 8.0, 300).unwrap();
        assert!((offset.x - 8.5).abs() < f64::EPSILON);
        points.push(offset);

        // The next sample measures against the newly captured point.
        let sample = Point::new(110.0, 100.0);
        assert_eq!(capture(&points, origin, sample, 8.0, 300), None);
    }

    #[test]
    fn test_capture_stops_at_cap() {
        let origin = Point::ZERO;
        let points: Vec<Vec2> = (0..300).map(|i| Vec2::new(i as f64 * 10.0, 0.0)).collect();
        let sample = Point::new(5000.0, 0.0);
        assert_eq!(capture(&points, origin, sample, 8.0, 300), None);
    }

    #[test]
    fn test_simplify_preserves_endpoints() {
        let points: Vec<Vec2> = (0..50).map(|i| Vec2::new(i as f64, 0.0)).collect();
        let simplified = simplify(&points, 4.0);

        assert!(simplified.len() < points.len());
        assert_eq!(simplified.first(), points.first());
        assert_eq!(simplified.last(), points.last());
    }

    #[test]
    fn test_simplify_keeps_distant_points() {
        let points = vec![
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        assert_eq!(simplify(&points, 4.0), points);
    }

    #[test]
    fn test_simplify_never_reorders() {
        let points: Vec<Vec2> = (0..40)
            .map(|i| Vec2::new((i as f64 * 0.7).sin() * 20.0, i as f64))
            .collect();
        let simplified = simplify(&points, 4.0);

        // Every kept point appears in the original, in the same order.
        let mut cursor = 0;
        for point in &simplified {
            let pos = points[cursor..]
                .iter()
                .position(|p| p == point)
                .expect("kept point missing from input");
            cursor += pos + 1;
        }
    }

    #[test]
    fn test_simplify_short_input_unchanged() {
        let points = vec![Vec2::ZERO, Vec2::new(1.0, 1.0)];
        assert_eq!(simplify(&points, 4.0), points);
    }
}
