//! Freehand pencil stroke.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Color, ShapeId};
use crate::geometry::Frame;

/// A freehand stroke. Points are offsets from the frame origin in world
/// units; the first entry is always `(0,0)` (the stroke start) and the
/// list is never empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pencil {
    pub(crate) id: ShapeId,
    pub frame: Frame,
    pub stroke: Color,
    pub points: Vec<Vec2>,
}

impl Pencil {
    /// Start a stroke at the given origin, with the single point `(0,0)`.
    pub fn new(origin: Point, stroke: Color) -> Self {
        Self {
            id: Uuid::new_v4(),
            frame: Frame::at(origin),
            stroke,
            points: vec![Vec2::ZERO],
        }
    }

    /// World position of the most recently captured point.
    pub fn last_point(&self) -> Point {
        let last = self.points.last().copied().unwrap_or(Vec2::ZERO);
        Point::new(self.frame.x + last.x, self.frame.y + last.y)
    }

    /// Coarse extent of a point list: the maximum positive offsets.
    ///
    /// The origin is pinned to the stroke start (the first offset is
    /// `(0,0)` by invariant), so offsets left/above it cannot widen the
    /// stored frame; they fall outside the coarse hit box.
    pub fn extent(points: &[Vec2]) -> (f64, f64) {
        points.iter().fold((0.0_f64, 0.0_f64), |(w, h), p| {
            (w.max(p.x), h.max(p.y))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_origin_point() {
        let pencil = Pencil::new(Point::new(10.0, 20.0), Color::WHITE);
        assert_eq!(pencil.points, vec![Vec2::ZERO]);
        assert_eq!(pencil.last_point(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_extent_ignores_negative_offsets() {
        let points = vec![
            Vec2::ZERO,
            Vec2::new(30.0, -5.0),
            Vec2::new(-10.0, 12.0),
        ];
        let (w, h) = Pencil::extent(&points);
        assert!((w - 30.0).abs() < f64::EPSILON);
        assert!((h - 12.0).abs() < f64::EPSILON);
    }
}
