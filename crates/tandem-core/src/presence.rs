//! Presence payloads: the ephemeral, non-persisted state a participant
//! broadcasts to the room.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::palette::color_for_connection;
use crate::shapes::{Color, ShapeId};

/// The local participant's broadcast state: cursor position in world
/// coordinates (never screen space) plus the current selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Presence {
    pub cursor: Option<Point>,
    pub selection: Vec<ShapeId>,
}

/// Map the tracked pointer onto the presence payload.
///
/// Called with `Some(world_point)` on every pointer move and with `None`
/// when the pointer leaves the canvas.
pub fn to_presence(cursor: Option<Point>, selection: &[ShapeId]) -> Presence {
    Presence {
        cursor,
        selection: selection.to_vec(),
    }
}

/// Another participant as observed through the presence channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemotePeer {
    pub connection_id: u64,
    pub presence: Presence,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
}

impl RemotePeer {
    /// The color this peer's cursor paints in, stable per connection.
    pub fn cursor_color(&self) -> Color {
        color_for_connection(self.connection_id)
    }
}
