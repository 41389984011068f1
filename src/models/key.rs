//! Key descriptors: what a key does, what it shows, how wide it is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The function of a key. Dispatch is total over this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Commits the glyph, cased by the shift state
    Character,
    /// Deletes one character before the cursor; repeats while held
    Backspace,
    /// Commits a single space
    Space,
    /// Toggles one-shot shift
    Shift,
    /// Sends a hardware Enter press/release pair
    Enter,
    /// Switches between the alphabetic and symbolic layouts
    ModeChange,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Character => "character",
            Self::Backspace => "backspace",
            Self::Space => "space",
            Self::Shift => "shift",
            Self::Enter => "enter",
            Self::ModeChange => "mode_change",
        };
        f.write_str(name)
    }
}

/// A single key in a layout row.
///
/// Immutable once constructed. `weight` is the key's share of its row's
/// width relative to its siblings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyDescriptor {
    action: ActionKind,
    glyph: String,
    weight: f32,
}

impl KeyDescriptor {
    /// Creates a descriptor with weight 1.
    #[must_use]
    pub fn new(action: ActionKind, glyph: impl Into<String>) -> Self {
        Self {
            action,
            glyph: glyph.into(),
            weight: 1.0,
        }
    }

    /// Creates a descriptor with an explicit weight.
    ///
    /// Non-positive or non-finite weights fall back to 1 so every row keeps
    /// a strictly positive weight sum.
    #[must_use]
    pub fn weighted(action: ActionKind, glyph: impl Into<String>, weight: f32) -> Self {
        let weight = if weight.is_finite() && weight > 0.0 {
            weight
        } else {
            1.0
        };
        Self {
            action,
            glyph: glyph.into(),
            weight,
        }
    }

    /// Shorthand for a weight-1 character key.
    #[must_use]
    pub fn character(glyph: impl Into<String>) -> Self {
        Self::new(ActionKind::Character, glyph)
    }

    /// The key's function.
    #[must_use]
    pub const fn action(&self) -> ActionKind {
        self.action
    }

    /// The glyph as authored in the layout table.
    #[must_use]
    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    /// Relative width within the row.
    #[must_use]
    pub const fn weight(&self) -> f32 {
        self.weight
    }

    /// The text drawn on the key face.
    ///
    /// Character keys follow the shift state; everything else shows its
    /// glyph verbatim.
    #[must_use]
    pub fn label(&self, shifted: bool) -> String {
        match self.action {
            ActionKind::Character => apply_case(&self.glyph, shifted),
            _ => self.glyph.clone(),
        }
    }
}

/// Upper-cases when shifted, lower-cases otherwise.
#[must_use]
pub fn apply_case(glyph: &str, shifted: bool) -> String {
    if shifted {
        glyph.to_uppercase()
    } else {
        glyph.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weight_is_one() {
        let key = KeyDescriptor::character("Q");
        assert_eq!(key.weight(), 1.0);
        assert_eq!(key.action(), ActionKind::Character);
        assert_eq!(key.glyph(), "Q");
    }

    #[test]
    fn test_invalid_weight_falls_back() {
        assert_eq!(KeyDescriptor::weighted(ActionKind::Space, "SPACE", 0.0).weight(), 1.0);
        assert_eq!(KeyDescriptor::weighted(ActionKind::Space, "SPACE", -2.0).weight(), 1.0);
        assert_eq!(
            KeyDescriptor::weighted(ActionKind::Space, "SPACE", f32::NAN).weight(),
            1.0
        );
        assert_eq!(KeyDescriptor::weighted(ActionKind::Space, "SPACE", 5.0).weight(), 5.0);
    }

    #[test]
    fn test_character_label_follows_shift() {
        let key = KeyDescriptor::character("Q");
        assert_eq!(key.label(false), "q");
        assert_eq!(key.label(true), "Q");
    }

    #[test]
    fn test_function_key_label_is_verbatim() {
        let key = KeyDescriptor::weighted(ActionKind::ModeChange, "?123", 1.5);
        assert_eq!(key.label(false), "?123");
        assert_eq!(key.label(true), "?123");
    }

    #[test]
    fn test_action_kind_display() {
        assert_eq!(ActionKind::ModeChange.to_string(), "mode_change");
        assert_eq!(ActionKind::Backspace.to_string(), "backspace");
    }
}
