//! Bitmap image shape.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ShapeId;
use crate::geometry::Frame;

/// A placed bitmap. `content` holds the encoded image as a data URI;
/// compressing it under the per-image budget is the host's job, the
/// mutation gateway only verifies the result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub(crate) id: ShapeId,
    pub frame: Frame,
    pub content: String,
}

impl Image {
    /// Create an image with an already-encoded payload.
    pub fn new(frame: Frame, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            frame,
            content,
        }
    }

    /// Size of the encoded payload in bytes.
    pub fn payload_len(&self) -> usize {
        self.content.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_len() {
        let image = Image::new(Frame::new(0.0, 0.0, 64.0, 64.0), "data:image/png;base64,AAAA".to_string());
        assert_eq!(image.payload_len(), 26);
    }
}
