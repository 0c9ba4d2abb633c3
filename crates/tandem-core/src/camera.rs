//! Camera module for pan/zoom transforms.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum allowed zoom level.
pub const MIN_ZOOM: f64 = 0.1;
/// Maximum allowed zoom level.
pub const MAX_ZOOM: f64 = 5.0;

/// Camera manages the view transform for one participant.
///
/// It handles panning (translation) and zooming (scaling), converting
/// between screen coordinates and world coordinates. The camera is local
/// to each participant and is never shared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in screen pixels.
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%).
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        Point::new(
            (screen_point.x - self.offset.x) / self.zoom,
            (screen_point.y - self.offset.y) / self.zoom,
        )
    }

    /// Convert a world point to screen coordinates.
    ///
    /// Exact inverse of [`Camera::screen_to_world`], and the transform the
    /// renderer applies when painting shapes.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        Point::new(
            world_point.x * self.zoom + self.offset.x,
            world_point.y * self.zoom + self.offset.y,
        )
    }

    /// Pan the camera by a delta in screen coordinates.
    ///
    /// The delta is applied raw: panning speed does not depend on zoom.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Apply a wheel event to the zoom level.
    ///
    /// Zoom changes multiplicatively by `1 - delta_y * sensitivity` and is
    /// clamped to [[`MIN_ZOOM`], [`MAX_ZOOM`]]. The pan offset is left
    /// untouched: zoom is anchored at the viewport origin, not the cursor.
    pub fn apply_wheel(&mut self, delta_y: f64, sensitivity: f64) {
        let scale = 1.0 - delta_y * sensitivity;
        self.zoom = (self.zoom * scale).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Reset camera to default position and zoom.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
