//! Chat-log entries.

use serde::{Deserialize, Serialize};

use crate::palette::color_for_name;
use crate::shapes::Color;

/// One message in the board's chat log. Append-only; entries are never
/// edited after the fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub user: String,
    pub text: String,
    pub color: Color,
}

impl ChatEntry {
    /// Build an entry, deriving the color from the user name.
    pub fn new(user: impl Into<String>, text: impl Into<String>) -> Self {
        let user = user.into();
        let color = color_for_name(&user);
        Self {
            user,
            text: text.into(),
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PALETTE;

    #[test]
    fn test_color_derived_from_name_length() {
        let entry = ChatEntry::new("ada", "hello");
        assert_eq!(entry.color, PALETTE[3]);

        let entry = ChatEntry::new("grace", "hi");
        assert_eq!(entry.color, PALETTE[0]);
    }
}
