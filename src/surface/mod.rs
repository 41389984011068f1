//! Keyboard surface: layout × animation × dispatch.
//!
//! The surface owns every piece of mutable keyboard state (layout mode,
//! shift, theme, per-key animation and repeat records) and exposes it as a
//! small set of events: press, release, tick and theme cycling. Rendering
//! reads a [`SurfaceFrame`], which is a pure function of that state plus
//! the current tilt sample.

pub mod geometry;
pub mod paint;

use std::time::Duration;

use crate::animation::{
    backdrop_transforms, BackdropSensitivities, KeyAnimationState, LayerSensitivities,
    DEFAULT_IDLE_ELEVATION,
};
use crate::input::{dispatch, InputConnection, KeyAction, RepeatFire, RepeatTiming};
use crate::models::{ActionKind, KeyDescriptor, KeyboardLayoutMode, Tilt, TiltSignal, Vec2};
use crate::theme::{KeyboardTheme, ThemeId, ThemeStore};

pub use geometry::{hit_test, layout_rects, row_widths, KeyId, KeyRect};
pub use paint::{
    BackgroundPaint, KeyPaint, LayerColors, OverlayPaint, PaintOp, SurfaceFrame,
};

/// Tunables for a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSettings {
    /// Per-key layer multipliers
    pub layers: LayerSensitivities,
    /// Backdrop multipliers and scale
    pub backdrop: BackdropSensitivities,
    /// Height of a key at rest
    pub idle_elevation: f32,
    /// Backspace hold schedule
    pub repeat: RepeatTiming,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            layers: LayerSensitivities::default(),
            backdrop: BackdropSensitivities::default(),
            idle_elevation: DEFAULT_IDLE_ELEVATION,
            repeat: RepeatTiming::default(),
        }
    }
}

/// Live state of one key on screen.
///
/// Dropping an instance drops its repeat timer with it, which is how a
/// layout switch cancels a held Backspace.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyInstance {
    animation: KeyAnimationState,
    repeat: Option<RepeatFire>,
}

impl KeyInstance {
    fn new(theme: &KeyboardTheme, idle_elevation: f32) -> Self {
        Self {
            animation: KeyAnimationState::new(&theme.animation, idle_elevation),
            repeat: None,
        }
    }

    /// Animation records.
    #[must_use]
    pub const fn animation(&self) -> &KeyAnimationState {
        &self.animation
    }

    /// Whether the key is held.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.animation.is_pressed()
    }

    /// Whether a repeat timer is armed.
    #[must_use]
    pub const fn is_repeating(&self) -> bool {
        self.repeat.is_some()
    }
}

/// The on-screen keyboard.
#[derive(Debug)]
pub struct KeyboardSurface {
    mode: KeyboardLayoutMode,
    shift: bool,
    themes: ThemeStore,
    tilt: TiltSignal,
    settings: SurfaceSettings,
    layout: Vec<Vec<KeyDescriptor>>,
    keys: Vec<Vec<KeyInstance>>,
    pointer: Option<KeyId>,
    last_tick: Option<Duration>,
}

impl KeyboardSurface {
    /// A surface showing the alphabetic layout, shift off.
    #[must_use]
    pub fn new(tilt: TiltSignal, theme: ThemeId, settings: SurfaceSettings) -> Self {
        let mut surface = Self {
            mode: KeyboardLayoutMode::Alphabetic,
            shift: false,
            themes: ThemeStore::new(theme),
            tilt,
            settings,
            layout: Vec::new(),
            keys: Vec::new(),
            pointer: None,
            last_tick: None,
        };
        surface.rebuild();
        surface
    }

    /// Active layout mode.
    #[must_use]
    pub const fn mode(&self) -> KeyboardLayoutMode {
        self.mode
    }

    /// Whether the next character will be upper-cased.
    #[must_use]
    pub const fn is_shifted(&self) -> bool {
        self.shift
    }

    /// Active theme.
    #[must_use]
    pub fn theme(&self) -> &'static KeyboardTheme {
        self.themes.active()
    }

    /// The shared tilt handle this surface reads from.
    #[must_use]
    pub const fn tilt_signal(&self) -> &TiltSignal {
        &self.tilt
    }

    /// Latest tilt sample.
    #[must_use]
    pub fn tilt(&self) -> Tilt {
        self.tilt.get()
    }

    /// Tunables in effect.
    #[must_use]
    pub const fn settings(&self) -> &SurfaceSettings {
        &self.settings
    }

    /// Key rows of the active layout.
    #[must_use]
    pub fn layout(&self) -> &[Vec<KeyDescriptor>] {
        &self.layout
    }

    /// Descriptor of the key at `id`.
    #[must_use]
    pub fn descriptor(&self, id: KeyId) -> Option<&KeyDescriptor> {
        self.layout.get(id.row)?.get(id.col)
    }

    /// Live state of the key at `id`.
    #[must_use]
    pub fn key(&self, id: KeyId) -> Option<&KeyInstance> {
        self.keys.get(id.row)?.get(id.col)
    }

    /// First key whose action is `action`, scanning row-major.
    #[must_use]
    pub fn find_key(&self, action: ActionKind) -> Option<KeyId> {
        self.layout.iter().enumerate().find_map(|(row, keys)| {
            keys.iter()
                .position(|key| key.action() == action)
                .map(|col| KeyId::new(row, col))
        })
    }

    /// First key showing `glyph` (case-insensitive), scanning row-major.
    #[must_use]
    pub fn find_glyph(&self, glyph: &str) -> Option<KeyId> {
        self.layout.iter().enumerate().find_map(|(row, keys)| {
            keys.iter()
                .position(|key| key.glyph().eq_ignore_ascii_case(glyph))
                .map(|col| KeyId::new(row, col))
        })
    }

    /// Ids of every held key.
    #[must_use]
    pub fn pressed_keys(&self) -> Vec<KeyId> {
        self.keys
            .iter()
            .enumerate()
            .flat_map(|(row, keys)| {
                keys.iter()
                    .enumerate()
                    .filter(|(_, key)| key.is_pressed())
                    .map(move |(col, _)| KeyId::new(row, col))
            })
            .collect()
    }

    /// True when no key is animating.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.keys
            .iter()
            .flatten()
            .all(|key| key.animation.is_settled())
    }

    /// Key cells for a `width` × `height` area.
    #[must_use]
    pub fn key_rects(&self, width: f32, height: f32) -> Vec<(KeyId, KeyRect)> {
        layout_rects(&self.layout, width, height)
    }

    /// A key went down at `now`.
    ///
    /// The key's action is dispatched immediately. Backspace also arms its
    /// repeat timer. Without an input target the key still animates but the
    /// action is dropped and no keyboard state changes. Returns the action
    /// that was applied.
    pub fn press(
        &mut self,
        id: KeyId,
        now: Duration,
        connection: Option<&mut dyn InputConnection>,
    ) -> Option<KeyAction> {
        let theme = self.themes.active();
        let repeat = self.settings.repeat;
        let descriptor = self.descriptor(id)?.clone();
        let key = self.keys.get_mut(id.row)?.get_mut(id.col)?;
        if key.is_pressed() {
            return None;
        }

        key.animation.set_pressed(true, &theme.animation);
        if descriptor.action() == ActionKind::Backspace {
            key.repeat = Some(RepeatFire::arm(now, repeat));
        }

        let Some(connection) = connection else {
            tracing::debug!(key = %id, glyph = descriptor.glyph(), "No input target, dropping key action");
            return None;
        };

        let (action, shift) = dispatch(&descriptor, self.shift);
        action.apply(connection);
        self.shift = shift;
        if action == KeyAction::ToggleLayout {
            self.set_mode(self.mode.toggled());
        }
        tracing::debug!(key = %id, ?action, shift = self.shift, "Key dispatched");
        Some(action)
    }

    /// A key came up at `now`.
    ///
    /// Repeats that fell due between the last frame and the release are
    /// delivered first, then the repeat timer is dropped. Returns the number
    /// of those late repeats.
    pub fn release(
        &mut self,
        id: KeyId,
        now: Duration,
        connection: Option<&mut dyn InputConnection>,
    ) -> u64 {
        let theme = self.themes.active();
        let Some(key) = self.keys.get_mut(id.row).and_then(|row| row.get_mut(id.col)) else {
            return 0;
        };
        let fires = key
            .repeat
            .take()
            .map_or(0, |mut repeat| repeat.poll_before(now));
        if key.is_pressed() {
            key.animation.set_pressed(false, &theme.animation);
        }
        deliver_repeats(fires, connection);
        fires
    }

    /// Pointer down at `point` inside a `width` × `height` surface.
    ///
    /// The key hit receives the matching [`pointer_up`](Self::pointer_up)
    /// even if the pointer moves off it.
    pub fn pointer_down(
        &mut self,
        point: Vec2,
        width: f32,
        height: f32,
        now: Duration,
        mut connection: Option<&mut dyn InputConnection>,
    ) -> Option<KeyAction> {
        if let Some(previous) = self.pointer.take() {
            self.release(previous, now, connection.as_mut().map(|c| &mut **c as &mut dyn InputConnection));
        }
        let id = hit_test(&self.key_rects(width, height), point)?;
        self.pointer = Some(id);
        self.press(id, now, connection)
    }

    /// Pointer up at `now`: releases whichever key the pointer went down on.
    pub fn pointer_up(&mut self, now: Duration, connection: Option<&mut dyn InputConnection>) -> u64 {
        self.pointer
            .take()
            .map_or(0, |id| self.release(id, now, connection))
    }

    /// Advances animations to `now` and delivers any due repeats.
    ///
    /// Returns the number of repeat deletes that became due.
    pub fn tick(&mut self, now: Duration, connection: Option<&mut dyn InputConnection>) -> u64 {
        let dt = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_tick = Some(now);

        let mut fires = 0;
        for key in self.keys.iter_mut().flatten() {
            key.animation.step(dt);
            if let Some(repeat) = key.repeat.as_mut() {
                fires += repeat.poll(now);
            }
        }

        deliver_repeats(fires, connection);
        fires
    }

    /// Moves to the next theme. Held keys retarget to its press scale.
    pub fn cycle_theme(&mut self) -> &'static KeyboardTheme {
        let theme = self.themes.advance();
        self.retarget(theme);
        theme
    }

    /// Switches to a specific theme.
    pub fn select_theme(&mut self, id: ThemeId) {
        self.themes.select(id);
        self.retarget(id.theme());
    }

    /// Releases every key and cancels every repeat.
    pub fn release_all(&mut self) {
        let theme = self.themes.active();
        self.pointer = None;
        for key in self.keys.iter_mut().flatten() {
            key.repeat = None;
            if key.is_pressed() {
                key.animation.set_pressed(false, &theme.animation);
            }
        }
    }

    /// Back to alphabetic with shift off, for a new input session.
    pub fn reset_session(&mut self) {
        self.shift = false;
        self.mode = KeyboardLayoutMode::Alphabetic;
        self.rebuild();
    }

    /// The frame for a `width` × `height` surface at the current tilt.
    ///
    /// The theme and the tilt are each read once, so every color and every
    /// offset in the result is mutually consistent.
    #[must_use]
    pub fn frame(&self, width: f32, height: f32) -> SurfaceFrame {
        let theme = self.themes.active();
        let tilt = self.tilt.get();
        let (background, overlay) = SurfaceFrame::backdrop(
            &theme.colors,
            backdrop_transforms(tilt, &self.settings.backdrop),
        );

        let keys = self
            .key_rects(width, height)
            .into_iter()
            .filter_map(|(id, rect)| {
                let descriptor = self.descriptor(id)?;
                let key = self.key(id)?;
                let latched_shift = self.shift && descriptor.action() == ActionKind::Shift;
                Some(KeyPaint {
                    id,
                    rect,
                    label: descriptor.label(self.shift),
                    pressed: key.is_pressed(),
                    frame: key.animation.frame(tilt, &self.settings.layers),
                    colors: LayerColors::for_key(&theme.colors, key.is_pressed(), latched_shift),
                })
            })
            .collect();

        SurfaceFrame {
            theme: theme.id,
            tilt,
            background,
            keys,
            overlay,
        }
    }

    fn set_mode(&mut self, mode: KeyboardLayoutMode) {
        tracing::info!(from = %self.mode, to = %mode, "Layout mode changed");
        self.mode = mode;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let theme = self.themes.active();
        let idle_elevation = self.settings.idle_elevation;
        self.layout = self.mode.rows();
        self.keys = self
            .layout
            .iter()
            .map(|row| {
                row.iter()
                    .map(|_| KeyInstance::new(theme, idle_elevation))
                    .collect()
            })
            .collect();
        self.pointer = None;
    }

    fn retarget(&mut self, theme: &KeyboardTheme) {
        for key in self.keys.iter_mut().flatten() {
            key.animation.retarget(&theme.animation);
        }
    }
}

/// Sends one backward delete per repeat.
fn deliver_repeats(fires: u64, connection: Option<&mut dyn InputConnection>) {
    if fires == 0 {
        return;
    }
    match connection {
        Some(connection) => {
            for _ in 0..fires {
                KeyAction::DeleteBackward(1).apply(connection);
            }
        }
        None => tracing::debug!(fires, "No input target, dropping repeats"),
    }
}
