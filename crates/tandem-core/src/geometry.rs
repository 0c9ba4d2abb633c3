//! Pure geometry: frame normalization, hit testing, resize handles.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

use crate::shapes::{Shape, ShapeId};

/// Position and size of a shape, in world units.
///
/// `width`/`height` may be negative while a draw gesture is active (the
/// pointer was dragged up or left of the origin); every consumer goes
/// through [`Frame::normalized`] before hit testing or painting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    /// Create a new frame.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A zero-size frame at the given origin (draw gestures start here).
    pub fn at(origin: Point) -> Self {
        Self::new(origin.x, origin.y, 0.0, 0.0)
    }

    /// Top-left corner as stored (may not be the visual top-left while
    /// width or height is negative).
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The canonical non-negative form: negative extents fold back into
    /// the origin. Idempotent.
    pub fn normalized(&self) -> Frame {
        Frame {
            x: if self.width < 0.0 {
                self.x + self.width
            } else {
                self.x
            },
            y: if self.height < 0.0 {
                self.y + self.height
            } else {
                self.y
            },
            width: self.width.abs(),
            height: self.height.abs(),
        }
    }

    /// Whether a world point lies inside the normalized bounds, edges
    /// inclusive.
    pub fn contains(&self, point: Point) -> bool {
        let n = self.normalized();
        point.x >= n.x && point.x <= n.x + n.width && point.y >= n.y && point.y <= n.y + n.height
    }
}

/// Find the topmost shape under a world point.
///
/// Shapes paint in insertion order (later entries on top), so the scan
/// runs in reverse and returns the first normalized bounding box that
/// contains the point. Every shape type shares this coarse bbox test;
/// there is no per-type fine hit region.
pub fn hit_test(point: Point, shapes: &[Shape]) -> Option<ShapeId> {
    shapes
        .iter()
        .rev()
        .find(|shape| shape.frame().contains(point))
        .map(|shape| shape.id())
}

/// The eight resize handles of a selected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl HandleKind {
    /// Handles that move the left edge.
    fn edits_left(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    /// Handles that move the right edge.
    fn edits_right(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    /// Handles that move the top edge.
    fn edits_top(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    /// Handles that move the bottom edge.
    fn edits_bottom(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }
}

/// A resize handle: its kind and its offset from the normalized frame's
/// top-left corner, in world units.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    pub kind: HandleKind,
    pub offset: Vec2,
}

impl Handle {
    /// World-space position of this handle on the given normalized frame.
    pub fn position(&self, frame: &Frame) -> Point {
        Point::new(frame.x + self.offset.x, frame.y + self.offset.y)
    }

    /// Whether a world point hits this handle.
    ///
    /// `tolerance` is in world units; callers divide the screen-pixel hit
    /// size by the current zoom so handles keep a constant screen size.
    pub fn hit_test(&self, frame: &Frame, point: Point, tolerance: f64) -> bool {
        let pos = self.position(frame);
        let dx = point.x - pos.x;
        let dy = point.y - pos.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// The eight handles (corners plus edge midpoints) of a normalized frame.
pub fn resize_handles(frame: &Frame) -> [Handle; 8] {
    let n = frame.normalized();
    let (w, h) = (n.width, n.height);
    let handle = |kind, x, y| Handle {
        kind,
        offset: Vec2::new(x, y),
    };
    [
        handle(HandleKind::TopLeft, 0.0, 0.0),
        handle(HandleKind::Top, w / 2.0, 0.0),
        handle(HandleKind::TopRight, w, 0.0),
        handle(HandleKind::Right, w, h / 2.0),
        handle(HandleKind::BottomRight, w, h),
        handle(HandleKind::Bottom, w / 2.0, h),
        handle(HandleKind::BottomLeft, 0.0, h),
        handle(HandleKind::Left, 0.0, h / 2.0),
    ]
}

/// Find which handle (if any) of a frame is hit at the given world point.
pub fn handle_at(frame: &Frame, point: Point, tolerance: f64) -> Option<HandleKind> {
    let n = frame.normalized();
    resize_handles(&n)
        .iter()
        .find(|handle| handle.hit_test(&n, point, tolerance))
        .map(|handle| handle.kind)
}

/// Resize a frame by dragging one handle.
///
/// `anchor` is the frame at gesture start; `delta` is the pointer movement
/// since then, in world units. Width and height are clamped to `min_size`;
/// when the clamp engages on a left/top handle the opposite edge stays
/// anchored instead of tracking the pointer, so the shape cannot flip
/// through zero size. The unaffected axis passes through unchanged.
pub fn apply_resize(handle: HandleKind, anchor: &Frame, delta: Vec2, min_size: f64) -> Frame {
    let mut out = *anchor;

    if handle.edits_left() {
        let width = anchor.width - delta.x;
        if width < min_size {
            out.width = min_size;
            out.x = anchor.x + anchor.width - min_size;
        } else {
            out.width = width;
            out.x = anchor.x + delta.x;
        }
    } else if handle.edits_right() {
        out.width = (anchor.width + delta.x).max(min_size);
    }

    if handle.edits_top() {
        let height = anchor.height - delta.y;
        if height < min_size {
            out.height = min_size;
            out.y = anchor.y + anchor.height - min_size;
        } else {
            out.height = height;
            out.y = anchor.y + delta.y;
        }
    } else if handle.edits_bottom() {
        out.height = (anchor.height + delta.y).max(min_size);
    }

    out
}
