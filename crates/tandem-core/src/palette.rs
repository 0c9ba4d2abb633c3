//! Fixed participant palette and deterministic color assignment.

use crate::shapes::Color;

/// The five participant colors. Chat entries and remote cursors both draw
/// from this palette so a user keeps one color across surfaces.
pub const PALETTE: [Color; 5] = [
    Color::new(0xdc, 0x26, 0x26, 255),
    Color::new(0xd9, 0x77, 0x06, 255),
    Color::new(0x05, 0x96, 0x69, 255),
    Color::new(0x7c, 0x3a, 0xed, 255),
    Color::new(0xdb, 0x27, 0x77, 255),
];

/// Deterministic color for a user name: palette indexed by name length.
pub fn color_for_name(name: &str) -> Color {
    PALETTE[name.len() % PALETTE.len()]
}

/// Deterministic color for a presence connection id.
pub fn color_for_connection(connection_id: u64) -> Color {
    PALETTE[(connection_id as usize) % PALETTE.len()]
}
