//! Theme store: named presets of colors and key animation constants.
//!
//! A theme bundles its palette and its animation constants in one static
//! value, and the store hands out a reference to exactly one of them. A
//! renderer that reads `store.active()` once per frame therefore can never
//! mix two themes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::animation::curve::{damping, stiffness, AnimationCurve};
use crate::models::Argb;

/// Colors used by a keyboard theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyboardColors {
    /// Key surface at rest
    pub key_background: Argb,
    /// Key surface while pressed (and the body layer tint)
    pub key_background_pressed: Argb,
    /// Key label
    pub key_text: Argb,
    /// Whole-keyboard background layer
    pub keyboard_background: Argb,
}

/// Animation constants for key presses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeyAnimation {
    /// Horizontal scale of a fully pressed key
    pub press_scale_x: f32,
    /// Vertical scale of a fully pressed key
    pub press_scale_y: f32,
    /// Curve for the scale animation
    pub scale_curve: AnimationCurve,
    /// Curve for the sink (press progress) animation
    pub press_curve: AnimationCurve,
}

impl KeyAnimation {
    /// No squash, soft springs.
    pub const PLAIN: Self = Self {
        press_scale_x: 1.0,
        press_scale_y: 1.0,
        scale_curve: AnimationCurve::spring(damping::NO_BOUNCY, stiffness::MEDIUM_LOW),
        press_curve: AnimationCurve::spring(damping::NO_BOUNCY, stiffness::MEDIUM_LOW),
    };
}

impl Default for KeyAnimation {
    fn default() -> Self {
        Self::PLAIN
    }
}

/// Identifier of a built-in theme, in cycling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThemeId {
    /// Warm wood keys on dark grain
    #[default]
    Wood,
    /// Translucent ice on a pale blue wall
    FrozenSerenity,
    /// Squishy pastel keys that squash on press
    SlimePop,
    /// Charcoal keys with ember-orange labels
    CozyEmber,
}

impl ThemeId {
    /// All themes in the order the selector cycles through them.
    pub const ALL: [Self; 4] = [
        Self::Wood,
        Self::FrozenSerenity,
        Self::SlimePop,
        Self::CozyEmber,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::FrozenSerenity => "FrozenSerenity",
            Self::SlimePop => "SlimePop",
            Self::CozyEmber => "CozyEmber",
        }
    }

    /// The theme after this one, wrapping to the first after the last.
    #[must_use]
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|id| *id == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// The full preset for this identifier.
    #[must_use]
    pub fn theme(self) -> &'static KeyboardTheme {
        match self {
            Self::Wood => &WOOD,
            Self::FrozenSerenity => &FROZEN_SERENITY,
            Self::SlimePop => &SLIME_POP,
            Self::CozyEmber => &COZY_EMBER,
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThemeId {
    type Err = anyhow::Error;

    /// Case-insensitive; `-`, `_` and spaces are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.name().to_lowercase() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|id| id.name()).collect();
                anyhow::anyhow!("Unknown theme '{s}'. Available themes: {}", names.join(", "))
            })
    }
}

/// A complete visual preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeyboardTheme {
    /// Identifier
    pub id: ThemeId,
    /// Palette
    pub colors: KeyboardColors,
    /// Key animation constants
    pub animation: KeyAnimation,
}

static WOOD: KeyboardTheme = KeyboardTheme {
    id: ThemeId::Wood,
    colors: KeyboardColors {
        key_background: Argb::from_argb(0xFF8D_6E63),
        key_background_pressed: Argb::from_argb(0xFF79_5548),
        key_text: Argb::WHITE,
        keyboard_background: Argb::from_argb(0xFF5D_4037),
    },
    animation: KeyAnimation::PLAIN,
};

static FROZEN_SERENITY: KeyboardTheme = KeyboardTheme {
    id: ThemeId::FrozenSerenity,
    colors: KeyboardColors {
        key_background: Argb::from_argb(0x99FF_FFFF),
        key_background_pressed: Argb::from_argb(0xCCFF_FFFF),
        key_text: Argb::from_argb(0xFF0D_47A1),
        keyboard_background: Argb::from_argb(0xFFE3_F2FD),
    },
    animation: KeyAnimation::PLAIN,
};

static SLIME_POP: KeyboardTheme = KeyboardTheme {
    id: ThemeId::SlimePop,
    colors: KeyboardColors {
        key_background: Argb::from_argb(0xFFE0_F7FA),
        key_background_pressed: Argb::from_argb(0xFFB2_EBF2),
        key_text: Argb::from_argb(0xFF00_6064),
        keyboard_background: Argb::from_argb(0xFFF1_F8E9),
    },
    animation: KeyAnimation {
        press_scale_x: 1.1,
        press_scale_y: 0.9,
        scale_curve: AnimationCurve::spring(damping::MEDIUM_BOUNCY, stiffness::MEDIUM),
        press_curve: AnimationCurve::spring(damping::NO_BOUNCY, stiffness::MEDIUM_LOW),
    },
};

static COZY_EMBER: KeyboardTheme = KeyboardTheme {
    id: ThemeId::CozyEmber,
    colors: KeyboardColors {
        key_background: Argb::from_argb(0xFF42_4242),
        key_background_pressed: Argb::from_argb(0xFF61_6161),
        key_text: Argb::from_argb(0xFFFF_9800),
        keyboard_background: Argb::from_argb(0xFF21_2121),
    },
    animation: KeyAnimation::PLAIN,
};

/// Holds the active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeStore {
    active: ThemeId,
}

impl ThemeStore {
    /// A store starting at `initial`.
    #[must_use]
    pub const fn new(initial: ThemeId) -> Self {
        Self { active: initial }
    }

    /// The active preset. Colors and animation always come from the same theme.
    #[must_use]
    pub fn active(&self) -> &'static KeyboardTheme {
        self.active.theme()
    }

    /// Identifier of the active preset.
    #[must_use]
    pub const fn active_id(&self) -> ThemeId {
        self.active
    }

    /// Moves to the next theme and returns it.
    pub fn advance(&mut self) -> &'static KeyboardTheme {
        self.active = self.active.next();
        tracing::info!(theme = %self.active, "Theme changed");
        self.active()
    }

    /// Selects a specific theme.
    pub fn select(&mut self, id: ThemeId) {
        if self.active != id {
            self.active = id;
            tracing::info!(theme = %self.active, "Theme changed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logged(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_every_theme_change_is_logged() {
        let mut store = ThemeStore::new(ThemeId::Wood);
        let log = logged(|| {
            store.advance();
        });
        assert!(log.contains("Theme changed"), "{log}");

        let log = logged(|| store.select(ThemeId::CozyEmber));
        assert!(log.contains("Theme changed"), "{log}");
        assert!(log.contains("CozyEmber"), "{log}");

        let log = logged(|| store.select(ThemeId::CozyEmber));
        assert!(log.is_empty(), "{log}");
    }

    #[test]
    fn test_cycle_is_four_and_wraps() {
        let mut store = ThemeStore::new(ThemeId::Wood);
        let visited: Vec<ThemeId> = (0..4).map(|_| store.advance().id).collect();
        assert_eq!(
            visited,
            vec![
                ThemeId::FrozenSerenity,
                ThemeId::SlimePop,
                ThemeId::CozyEmber,
                ThemeId::Wood
            ]
        );
        assert_eq!(store.active_id(), ThemeId::Wood);
    }

    #[test]
    fn test_cycle_from_any_start_returns_after_four() {
        for start in ThemeId::ALL {
            let mut store = ThemeStore::new(start);
            for _ in 0..4 {
                store.advance();
            }
            assert_eq!(store.active_id(), start);
        }
    }

    #[test]
    fn test_active_theme_matches_id() {
        for id in ThemeId::ALL {
            let store = ThemeStore::new(id);
            assert_eq!(store.active().id, id);
        }
    }

    #[test]
    fn test_palettes_are_distinct() {
        for (i, a) in ThemeId::ALL.iter().enumerate() {
            for b in &ThemeId::ALL[i + 1..] {
                assert_ne!(a.theme().colors, b.theme().colors, "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_slime_pop_squashes() {
        let anim = ThemeId::SlimePop.theme().animation;
        assert_eq!(anim.press_scale_x, 1.1);
        assert_eq!(anim.press_scale_y, 0.9);
        assert!(matches!(
            anim.scale_curve,
            AnimationCurve::Spring { damping_ratio, .. } if damping_ratio < 1.0
        ));

        let wood = ThemeId::Wood.theme().animation;
        assert_eq!(wood, KeyAnimation::PLAIN);
    }

    #[test]
    fn test_wood_palette() {
        let colors = ThemeId::Wood.theme().colors;
        assert_eq!(colors.key_background.to_hex(), "#FF8D6E63");
        assert_eq!(colors.key_background_pressed.to_hex(), "#FF795548");
        assert_eq!(colors.key_text, Argb::WHITE);
        assert_eq!(colors.keyboard_background.to_hex(), "#FF5D4037");
    }

    #[test]
    fn test_parse_theme_names() {
        assert_eq!("wood".parse::<ThemeId>().unwrap(), ThemeId::Wood);
        assert_eq!(
            "frozen-serenity".parse::<ThemeId>().unwrap(),
            ThemeId::FrozenSerenity
        );
        assert_eq!("Slime Pop".parse::<ThemeId>().unwrap(), ThemeId::SlimePop);
        assert_eq!("cozy_ember".parse::<ThemeId>().unwrap(), ThemeId::CozyEmber);
        let err = "neon".parse::<ThemeId>().unwrap_err().to_string();
        assert!(err.contains("Unknown theme"));
        assert!(err.contains("CozyEmber"));
    }
}
