//! Text label shape.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Color, ShapeId};
use crate::geometry::Frame;

/// Default width of a freshly placed text label.
pub const DEFAULT_WIDTH: f64 = 150.0;
/// Default height of a freshly placed text label.
pub const DEFAULT_HEIGHT: f64 = 40.0;
/// Content used when a label is placed without any.
pub const PLACEHOLDER: &str = "Text";

/// A text label placed with a single click.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ShapeId,
    pub frame: Frame,
    pub stroke: Color,
    pub content: String,
}

impl Text {
    /// Create a text label at the given origin with its default size.
    /// Empty or whitespace content falls back to the placeholder.
    pub fn new(origin: Point, stroke: Color, content: Option<String>) -> Self {
        let content = match content {
            Some(text) if !text.trim().is_empty() => text,
            _ => PLACEHOLDER.to_string(),
        };
        Self {
            id: Uuid::new_v4(),
            frame: Frame::new(origin.x, origin.y, DEFAULT_WIDTH, DEFAULT_HEIGHT),
            stroke,
            content,
        }
    }
}
