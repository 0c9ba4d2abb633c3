//! Shape definitions for the board.

pub mod circle;
pub mod image;
pub mod note;
pub mod pencil;
pub mod rectangle;
pub mod text;

pub use circle::Circle;
pub use image::Image;
pub use note::Note;
pub use pencil::Pencil;
pub use rectangle::Rectangle;
pub use text::Text;

use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Frame;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// RGBA8 color with hex-string parsing and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa` or `transparent`.
    /// Anything unparseable comes back black.
    pub fn from_hex(hex: &str) -> Self {
        if hex == "transparent" {
            return Self::TRANSPARENT;
        }
        let Some(hex) = hex.strip_prefix('#') else {
            return Self::BLACK;
        };
        let hex = hex.trim();
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).unwrap_or(0) * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).unwrap_or(0) * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).unwrap_or(0) * 17;
                Self::new(r, g, b, 255)
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                Self::new(r, g, b, 255)
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                let a = u8::from_str_radix(&hex[6..8], 16).unwrap_or(255);
                Self::new(r, g, b, a)
            }
            _ => Self::BLACK,
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// One drawable object on the board.
///
/// Each variant carries only the fields that exist for it, so there is no
/// "field present for the wrong type" state to defend against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
    Text(Text),
    Note(Note),
    Image(Image),
    Pencil(Pencil),
}

impl Shape {
    /// Create a zero-size rectangle at `origin` (see [`Rectangle::new`]).
    pub fn rectangle(origin: kurbo::Point, stroke: Color, fill: Color) -> Self {
        Shape::Rectangle(Rectangle::new(origin, stroke, fill))
    }

    /// Create a zero-size circle at `origin`.
    pub fn circle(origin: kurbo::Point, stroke: Color, fill: Color) -> Self {
        Shape::Circle(Circle::new(origin, stroke, fill))
    }

    /// Create a default-sized text label at `origin`.
    pub fn text(origin: kurbo::Point, stroke: Color, content: Option<String>) -> Self {
        Shape::Text(Text::new(origin, stroke, content))
    }

    /// Create a default-sized note at `origin`.
    pub fn note(origin: kurbo::Point, fill: Color) -> Self {
        Shape::Note(Note::new(origin, fill))
    }

    /// Create an image with an already-encoded payload.
    pub fn image(frame: Frame, content: String) -> Self {
        Shape::Image(Image::new(frame, content))
    }

    /// Start a pencil stroke at `origin`.
    pub fn pencil(origin: kurbo::Point, stroke: Color) -> Self {
        Shape::Pencil(Pencil::new(origin, stroke))
    }

    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Rectangle(s) => s.id,
            Shape::Circle(s) => s.id,
            Shape::Text(s) => s.id,
            Shape::Note(s) => s.id,
            Shape::Image(s) => s.id,
            Shape::Pencil(s) => s.id,
        }
    }

    pub fn frame(&self) -> &Frame {
        match self {
            Shape::Rectangle(s) => &s.frame,
            Shape::Circle(s) => &s.frame,
            Shape::Text(s) => &s.frame,
            Shape::Note(s) => &s.frame,
            Shape::Image(s) => &s.frame,
            Shape::Pencil(s) => &s.frame,
        }
    }

    pub fn frame_mut(&mut self) -> &mut Frame {
        match self {
            Shape::Rectangle(s) => &mut s.frame,
            Shape::Circle(s) => &mut s.frame,
            Shape::Text(s) => &mut s.frame,
            Shape::Note(s) => &mut s.frame,
            Shape::Image(s) => &mut s.frame,
            Shape::Pencil(s) => &mut s.frame,
        }
    }

    /// Stroke color, for the variants that have one.
    pub fn stroke(&self) -> Option<Color> {
        match self {
            Shape::Rectangle(s) => Some(s.stroke),
            Shape::Circle(s) => Some(s.stroke),
            Shape::Text(s) => Some(s.stroke),
            Shape::Pencil(s) => Some(s.stroke),
            Shape::Note(_) | Shape::Image(_) => None,
        }
    }

    /// Fill color, for the variants that have one.
    pub fn fill(&self) -> Option<Color> {
        match self {
            Shape::Rectangle(s) => Some(s.fill),
            Shape::Circle(s) => Some(s.fill),
            Shape::Note(s) => Some(s.fill),
            Shape::Text(_) | Shape::Image(_) | Shape::Pencil(_) => None,
        }
    }

    /// Textual or encoded content, for the variants that carry it.
    pub fn content(&self) -> Option<&str> {
        match self {
            Shape::Text(s) => Some(&s.content),
            Shape::Note(s) => Some(&s.content),
            Shape::Image(s) => Some(&s.content),
            Shape::Rectangle(_) | Shape::Circle(_) | Shape::Pencil(_) => None,
        }
    }

    /// Merge a partial update into this shape, returning the result.
    ///
    /// Fields the variant does not have are ignored, so a patch produced
    /// for one shape cannot corrupt a concurrently retyped entry.
    pub fn merge(&self, patch: &ShapePatch) -> Shape {
        let mut out = self.clone();

        {
            let frame = out.frame_mut();
            if let Some(x) = patch.x {
                frame.x = x;
            }
            if let Some(y) = patch.y {
                frame.y = y;
            }
            if let Some(width) = patch.width {
                frame.width = width;
            }
            if let Some(height) = patch.height {
                frame.height = height;
            }
        }

        match &mut out {
            Shape::Rectangle(s) => {
                if let Some(stroke) = patch.stroke {
                    s.stroke = stroke;
                }
                if let Some(fill) = patch.fill {
                    s.fill = fill;
                }
            }
            Shape::Circle(s) => {
                if let Some(stroke) = patch.stroke {
                    s.stroke = stroke;
                }
                if let Some(fill) = patch.fill {
                    s.fill = fill;
                }
            }
            Shape::Text(s) => {
                if let Some(stroke) = patch.stroke {
                    s.stroke = stroke;
                }
                if let Some(content) = &patch.content {
                    s.content = content.clone();
                }
            }
            Shape::Note(s) => {
                if let Some(fill) = patch.fill {
                    s.fill = fill;
                }
                if let Some(content) = &patch.content {
                    s.content = content.clone();
                }
            }
            Shape::Image(s) => {
                if let Some(content) = &patch.content {
                    s.content = content.clone();
                }
            }
            Shape::Pencil(s) => {
                if let Some(stroke) = patch.stroke {
                    s.stroke = stroke;
                }
                if let Some(points) = &patch.points {
                    s.points = points.clone();
                }
            }
        }

        out
    }
}

/// A partial shape update: every field optional, merged field-wise by
/// [`Shape::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapePatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub stroke: Option<Color>,
    pub fill: Option<Color>,
    pub content: Option<String>,
    pub points: Option<Vec<Vec2>>,
}

impl ShapePatch {
    /// Patch that moves a shape's origin.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Patch that sets a shape's extent.
    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Patch that sets the whole frame.
    pub fn frame(frame: Frame) -> Self {
        Self {
            x: Some(frame.x),
            y: Some(frame.y),
            width: Some(frame.width),
            height: Some(frame.height),
            ..Self::default()
        }
    }

    /// Whether this patch can change a shape's serialized size enough to
    /// matter for quota purposes.
    pub fn carries_payload(&self) -> bool {
        self.content.is_some() || self.points.is_some()
    }
}

/// Serialized-size estimate of one shape, in bytes.
///
/// Used only for quota comparison, never as a wire format.
pub fn shape_size(shape: &Shape) -> usize {
    serde_json::to_vec(shape).map_or(0, |bytes| bytes.len())
}

/// Serialized-size estimate of a whole board.
pub fn estimate_size(shapes: &[Shape]) -> usize {
    shapes.iter().map(shape_size).sum()
}

/// Serialize a board snapshot to JSON, e.g. for a persistence hand-off.
pub fn to_json(shapes: &[Shape]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(shapes)
}

/// Deserialize a board snapshot from JSON.
pub fn from_json(json: &str) -> Result<Vec<Shape>, serde_json::Error> {
    serde_json::from_str(json)
}
