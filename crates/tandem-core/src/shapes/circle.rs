//! Circle (ellipse-in-frame) shape.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Color, ShapeId};
use crate::geometry::Frame;

/// A circle, stored by its bounding frame. Hit testing and handle layout
/// use the frame like every other shape; only the renderer draws it round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    pub frame: Frame,
    pub stroke: Color,
    pub fill: Color,
}

impl Circle {
    /// Create a zero-size circle at the given origin.
    pub fn new(origin: Point, stroke: Color, fill: Color) -> Self {
        Self {
            id: Uuid::new_v4(),
            frame: Frame::at(origin),
            stroke,
            fill,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_zero_size() {
        let circle = Circle::new(Point::new(-5.0, 5.0), Color::WHITE, Color::TRANSPARENT);
        assert_eq!(circle.frame, Frame::new(-5.0, 5.0, 0.0, 0.0));
    }
}
