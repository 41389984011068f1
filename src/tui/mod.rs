//! Terminal user interface: the keyboard in a terminal window.
//!
//! This module contains the main TUI loop, `AppState`, event handling and
//! the widgets, using Ratatui. Typed text goes to an in-memory
//! [`ScratchPad`] that stands in for the focused text field.

// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

pub mod keyboard;
pub mod status_bar;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::input::{KeyAction, ScratchPad};
use crate::models::{ActionKind, Tilt, TiltSignal, Vec2};
use crate::sensor::{AnySensor, ManualSensor};
use crate::session::KeyboardSession;
use crate::surface::{KeyId, KeyboardSurface};

pub use keyboard::{CellCanvas, KeyboardWidget};
pub use status_bar::StatusBar;

/// How long a key typed on the physical keyboard stays down on screen
const TAP_HOLD: Duration = Duration::from_millis(90);

/// Application state
pub struct AppState {
    /// Keyboard surface plus the sensor feeding it
    pub session: KeyboardSession<AnySensor>,
    /// Text typed so far
    pub pad: ScratchPad,
    /// Settings in effect
    pub config: Config,
    started: Instant,
    pending_releases: Vec<(KeyId, Duration)>,
    keyboard_area: Rect,
    /// Set when the user asks to quit
    pub should_quit: bool,
}

impl AppState {
    /// Builds the session described by `config`. The window starts hidden.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let surface = KeyboardSurface::new(
            TiltSignal::new(),
            config.theme.initial,
            config.surface_settings(),
        );
        let sensor = AnySensor::from_source(config.sensor.source);
        Self {
            session: KeyboardSession::new(surface, sensor),
            pad: ScratchPad::new(),
            config,
            started: Instant::now(),
            pending_releases: Vec::new(),
            keyboard_area: Rect::default(),
            should_quit: false,
        }
    }

    /// Time since the application started; the clock for every surface event.
    pub fn now(&self) -> Duration {
        self.started.elapsed()
    }

    /// Advances the surface to `now`: expired taps come up, animations step
    /// and held Backspace repeats are delivered.
    pub fn tick(&mut self, now: Duration) {
        let surface = self.session.surface_mut();
        let pad = &mut self.pad;
        self.pending_releases.retain(|&(id, release_at)| {
            if release_at <= now {
                surface.release(id, release_at, Some(&mut *pad));
                false
            } else {
                true
            }
        });
        surface.tick(now, Some(pad));
    }

    /// Presses `id` now and schedules its release.
    ///
    /// A key still held from an earlier tap comes up first, so repeated
    /// characters typed faster than the tap hold are not lost.
    pub fn tap(&mut self, id: KeyId, now: Duration) -> Option<KeyAction> {
        if !self.session.is_visible() {
            return None;
        }
        if let Some(index) = self.pending_releases.iter().position(|&(held, _)| held == id) {
            self.pending_releases.remove(index);
            self.session
                .surface_mut()
                .release(id, now, Some(&mut self.pad));
        }
        let action = self
            .session
            .surface_mut()
            .press(id, now, Some(&mut self.pad));
        if action == Some(KeyAction::ToggleLayout) {
            // The old layout's key ids no longer mean anything
            self.pending_releases.clear();
        } else {
            self.pending_releases.push((id, now + TAP_HOLD));
        }
        action
    }

    /// Taps the on-screen key matching a typed character.
    ///
    /// Upper-case letters latch shift first when it is not already on.
    pub fn tap_char(&mut self, c: char, now: Duration) -> Option<KeyAction> {
        if c == ' ' {
            return self.tap_action(ActionKind::Space, now);
        }
        let surface = self.session.surface();
        let id = surface.find_glyph(&c.to_string())?;
        if c.is_uppercase() && !surface.is_shifted() {
            self.tap_action(ActionKind::Shift, now);
        }
        self.tap(id, now)
    }

    /// Taps the first key with `action` in the current layout.
    pub fn tap_action(&mut self, action: ActionKind, now: Duration) -> Option<KeyAction> {
        let id = self.session.surface().find_key(action)?;
        self.tap(id, now)
    }

    /// Mouse button went down at terminal cell (`column`, `row`).
    pub fn mouse_down(&mut self, column: u16, row: u16, now: Duration) -> Option<KeyAction> {
        if !self.session.is_visible() {
            return None;
        }
        let point = self.cell_to_surface(column, row)?;
        let (width, height) = self.surface_size();
        self.session
            .surface_mut()
            .pointer_down(point, width, height, now, Some(&mut self.pad))
    }

    /// Mouse button came up.
    pub fn mouse_up(&mut self, now: Duration) {
        self.session
            .surface_mut()
            .pointer_up(now, Some(&mut self.pad));
    }

    /// Shows or hides the keyboard window.
    pub fn toggle_visibility(&mut self) {
        if self.session.is_visible() {
            self.pending_releases.clear();
            self.session.on_window_hidden();
        } else {
            self.session.on_window_shown();
        }
    }

    /// Nudges the manual sensor, if that is the active source.
    pub fn nudge_tilt(&mut self, direction: Tilt) {
        if let Some(sensor) = self.session.sensor_mut().as_manual_mut() {
            sensor.nudge(direction * ManualSensor::STEP);
        }
    }

    /// Levels the manual sensor, if that is the active source.
    pub fn level_tilt(&mut self) {
        if let Some(sensor) = self.session.sensor_mut().as_manual_mut() {
            sensor.level();
        }
    }

    /// Records where the keys were last drawn, for mouse hit testing.
    pub fn set_keyboard_area(&mut self, area: Rect) {
        self.keyboard_area = area;
    }

    fn surface_size(&self) -> (f32, f32) {
        (
            f32::from(self.keyboard_area.width) * self.config.ui.units_per_column,
            f32::from(self.keyboard_area.height) * self.config.ui.units_per_row,
        )
    }

    /// Center of a terminal cell in surface units, if it is on the keyboard.
    fn cell_to_surface(&self, column: u16, row: u16) -> Option<Vec2> {
        let area = self.keyboard_area;
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        inside.then(|| {
            Vec2::new(
                (f32::from(column - area.x) + 0.5) * self.config.ui.units_per_column,
                (f32::from(row - area.y) + 0.5) * self.config.ui.units_per_row,
            )
        })
    }
}

/// Setup terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    let tick = state.config.tick_interval();
    state.session.on_window_shown();
    state.session.on_start_input();

    while !state.should_quit {
        state.tick(state.now());
        terminal.draw(|f| render(f, state))?;

        if event::poll(tick)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key_event(state, key);
                }
                Event::Mouse(mouse) => handle_mouse_event(state, mouse),
                _ => {}
            }
        }
    }

    state.session.on_window_hidden();
    Ok(())
}

/// Handles one key press from the physical keyboard.
pub fn handle_key_event(state: &mut AppState, key: KeyEvent) {
    let now = state.now();
    match key.code {
        KeyCode::Esc => state.should_quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.should_quit = true;
        }
        KeyCode::Tab => {
            let theme = state.session.surface_mut().cycle_theme();
            tracing::debug!(theme = %theme.id, "Theme button pressed");
        }
        KeyCode::Left => state.nudge_tilt(Tilt::new(-1.0, 0.0)),
        KeyCode::Right => state.nudge_tilt(Tilt::new(1.0, 0.0)),
        KeyCode::Up => state.nudge_tilt(Tilt::new(0.0, -1.0)),
        KeyCode::Down => state.nudge_tilt(Tilt::new(0.0, 1.0)),
        KeyCode::F(2) => state.level_tilt(),
        KeyCode::F(3) => state.pad.clear(),
        KeyCode::F(4) => state.toggle_visibility(),
        KeyCode::Backspace => {
            state.tap_action(ActionKind::Backspace, now);
        }
        KeyCode::Enter => {
            state.tap_action(ActionKind::Enter, now);
        }
        KeyCode::Char(c) => {
            if state.tap_char(c, now).is_none() {
                tracing::debug!(%c, "No key for typed character in this layout");
            }
        }
        _ => {}
    }
}

fn handle_mouse_event(state: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let now = state.now();
            state.mouse_down(mouse.column, mouse.row, now);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let now = state.now();
            state.mouse_up(now);
        }
        _ => {}
    }
}

fn render(f: &mut Frame, state: &mut AppState) {
    let background = state
        .session
        .surface()
        .theme()
        .colors
        .keyboard_background
        .to_ratatui_color();
    f.render_widget(Block::default().style(Style::default().bg(background)), f.area());

    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Status bar
            Constraint::Min(8),    // Keyboard
        ])
        .split(f.area());

    StatusBar::render(f, chunks[0], state);

    if state.session.is_visible() {
        let inner = KeyboardWidget::render(f, chunks[1], state);
        state.set_keyboard_area(inner);
    } else {
        let hidden = Paragraph::new("Keyboard hidden. Press F4 to show it.")
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(hidden, chunks[1]);
        state.set_keyboard_area(Rect::default());
    }
}
