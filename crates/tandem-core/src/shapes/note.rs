//! Sticky-note shape.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Color, ShapeId};
use crate::geometry::Frame;

/// Side length of a freshly placed note.
pub const DEFAULT_SIZE: f64 = 200.0;

/// Sticky-note yellow used when no fill is chosen.
pub const DEFAULT_FILL: Color = Color::new(0xfe, 0xf0, 0x8a, 255);

/// A sticky note: a fixed-size filled square with editable content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub(crate) id: ShapeId,
    pub frame: Frame,
    pub fill: Color,
    pub content: String,
}

impl Note {
    /// Create an empty note at the given origin with its default size.
    pub fn new(origin: Point, fill: Color) -> Self {
        Self {
            id: Uuid::new_v4(),
            frame: Frame::new(origin.x, origin.y, DEFAULT_SIZE, DEFAULT_SIZE),
            fill,
            content: String::new(),
        }
    }
}
