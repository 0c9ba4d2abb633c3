//! Board limits and interaction tuning.

use serde::{Deserialize, Serialize};

/// Maximum number of shapes on a board.
pub const DEFAULT_MAX_SHAPES: usize = 1000;
/// Total serialized-size budget for all shapes, in bytes.
pub const DEFAULT_STORAGE_BUDGET: usize = 5 * 1024 * 1024;
/// Budget for a single image payload (already compressed), in bytes.
pub const DEFAULT_IMAGE_BUDGET: usize = 150 * 1024;
/// Maximum number of points captured for one pencil stroke.
pub const DEFAULT_MAX_STROKE_POINTS: usize = 300;

fn default_max_shapes() -> usize {
    DEFAULT_MAX_SHAPES
}

fn default_storage_budget() -> usize {
    DEFAULT_STORAGE_BUDGET
}

fn default_image_budget() -> usize {
    DEFAULT_IMAGE_BUDGET
}

fn default_max_stroke_points() -> usize {
    DEFAULT_MAX_STROKE_POINTS
}

fn default_capture_distance() -> f64 {
    8.0
}

fn default_simplify_epsilon() -> f64 {
    4.0
}

fn default_simplify_threshold() -> usize {
    20
}

fn default_min_shape_size() -> f64 {
    10.0
}

fn default_zoom_sensitivity() -> f64 {
    0.001
}

fn default_handle_hit_size() -> f64 {
    10.0
}

/// Configuration for one board: quota limits enforced by the mutation
/// gateway plus the tuning knobs of the gesture machinery.
///
/// Every field has a serde default so partial configs deserialize cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Maximum shape count; inserts beyond it are rejected.
    #[serde(default = "default_max_shapes")]
    pub max_shapes: usize,
    /// Total serialized-size budget for all shapes, in bytes.
    #[serde(default = "default_storage_budget")]
    pub storage_budget: usize,
    /// Per-image payload budget, in bytes.
    #[serde(default = "default_image_budget")]
    pub image_budget: usize,
    /// Point cap for one pencil stroke.
    #[serde(default = "default_max_stroke_points")]
    pub max_stroke_points: usize,
    /// Minimum distance (world units) between captured pencil points.
    #[serde(default = "default_capture_distance")]
    pub capture_distance: f64,
    /// Distance epsilon (world units) for the end-of-stroke simplification.
    #[serde(default = "default_simplify_epsilon")]
    pub simplify_epsilon: f64,
    /// Strokes with at most this many points skip simplification.
    #[serde(default = "default_simplify_threshold")]
    pub simplify_threshold: usize,
    /// Minimum width/height (world units) a resize can shrink a shape to.
    #[serde(default = "default_min_shape_size")]
    pub min_shape_size: f64,
    /// Multiplier applied to wheel delta when zooming.
    #[serde(default = "default_zoom_sensitivity")]
    pub zoom_sensitivity: f64,
    /// Resize-handle hit radius in screen pixels (divided by zoom when
    /// testing in world space, so handles keep a constant screen size).
    #[serde(default = "default_handle_hit_size")]
    pub handle_hit_size: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            max_shapes: default_max_shapes(),
            storage_budget: default_storage_budget(),
            image_budget: default_image_budget(),
            max_stroke_points: default_max_stroke_points(),
            capture_distance: default_capture_distance(),
            simplify_epsilon: default_simplify_epsilon(),
            simplify_threshold: default_simplify_threshold(),
            min_shape_size: default_min_shape_size(),
            zoom_sensitivity: default_zoom_sensitivity(),
            handle_hit_size: default_handle_hit_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BoardConfig::default();
        assert_eq!(config.max_shapes, 1000);
        assert_eq!(config.storage_budget, 5 * 1024 * 1024);
        assert_eq!(config.image_budget, 150 * 1024);
        assert_eq!(config.max_stroke_points, 300);
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: BoardConfig = serde_json::from_str(r#"{"max_shapes": 10}"#).unwrap();
        assert_eq!(config.max_shapes, 10);
        assert_eq!(config.storage_budget, DEFAULT_STORAGE_BUDGET);
        assert!((config.capture_distance - 8.0).abs() < f64::EPSILON);
    }
}
