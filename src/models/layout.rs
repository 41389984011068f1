//! The static layout table: which rows of keys each layout mode shows.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::key::{ActionKind, KeyDescriptor};

/// Which key grid is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardLayoutMode {
    /// Letters
    #[default]
    Alphabetic,
    /// Digits and punctuation
    Symbolic,
}

impl KeyboardLayoutMode {
    /// The other mode. `ModeChange` is the only transition and it is symmetric.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Alphabetic => Self::Symbolic,
            Self::Symbolic => Self::Alphabetic,
        }
    }

    /// Rows of key descriptors for this mode, top to bottom.
    #[must_use]
    pub fn rows(self) -> Vec<Vec<KeyDescriptor>> {
        match self {
            Self::Alphabetic => alphabetic_rows(),
            Self::Symbolic => symbolic_rows(),
        }
    }
}

impl fmt::Display for KeyboardLayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alphabetic => f.write_str("alphabetic"),
            Self::Symbolic => f.write_str("symbolic"),
        }
    }
}

/// Width of the Shift / Backspace / leading punctuation keys
const EDGE_KEY_WEIGHT: f32 = 1.2;
/// Width of the mode switch key
const MODE_KEY_WEIGHT: f32 = 1.5;
/// Width of the space bar
const SPACE_KEY_WEIGHT: f32 = 5.0;
/// Width of the Enter key
const ENTER_KEY_WEIGHT: f32 = 2.0;

fn characters(glyphs: &str) -> impl Iterator<Item = KeyDescriptor> + '_ {
    glyphs.chars().map(|c| KeyDescriptor::character(c.to_string()))
}

fn bottom_row(mode_label: &str) -> Vec<KeyDescriptor> {
    vec![
        KeyDescriptor::weighted(ActionKind::ModeChange, mode_label, MODE_KEY_WEIGHT),
        KeyDescriptor::weighted(ActionKind::Space, "SPACE", SPACE_KEY_WEIGHT),
        KeyDescriptor::weighted(ActionKind::Enter, "ENTER", ENTER_KEY_WEIGHT),
    ]
}

fn backspace() -> KeyDescriptor {
    KeyDescriptor::weighted(ActionKind::Backspace, "BS", EDGE_KEY_WEIGHT)
}

fn alphabetic_rows() -> Vec<Vec<KeyDescriptor>> {
    let mut third = vec![KeyDescriptor::weighted(
        ActionKind::Shift,
        "SFT",
        EDGE_KEY_WEIGHT,
    )];
    third.extend(characters("ZXCVBNM"));
    third.push(backspace());

    vec![
        characters("QWERTYUIOP").collect(),
        characters("ASDFGHJKL").collect(),
        third,
        bottom_row("?123"),
    ]
}

fn symbolic_rows() -> Vec<Vec<KeyDescriptor>> {
    let mut third = vec![KeyDescriptor::weighted(
        ActionKind::Character,
        "!",
        EDGE_KEY_WEIGHT,
    )];
    third.extend(characters("\"':;/?"));
    third.push(backspace());

    vec![
        characters("1234567890").collect(),
        characters("@#$%&*-+()").collect(),
        third,
        bottom_row("ABC"),
    ]
}
