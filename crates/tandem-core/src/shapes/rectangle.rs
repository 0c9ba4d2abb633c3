//! Axis-aligned rectangle shape.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Color, ShapeId};
use crate::geometry::Frame;

/// A rectangle, stored as its frame plus stroke and fill colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    pub frame: Frame,
    pub stroke: Color,
    pub fill: Color,
}

impl Rectangle {
    /// Create a zero-size rectangle at the given origin; draw gestures
    /// grow it from there.
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
        let rect = Rectangle::new(Point::new(10.0, 20.0), Color::WHITE, Color::TRANSPARENT);
        assert_eq!(rect.frame, Frame::new(10.0, 20.0, 0.0, 0.0));
    }
}
