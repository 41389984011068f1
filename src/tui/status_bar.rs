//! Status bar widget for the theme button, typed text and help

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::AppState;
use crate::sensor::OrientationSensor;

/// Characters of typed text shown before the line is cut from the left
const TEXT_TAIL: usize = 60;

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Caption of the theme button: the theme a press would switch to.
    #[must_use]
    pub fn theme_button_caption(state: &AppState) -> String {
        format!("Next Theme: {}", state.session.surface().theme().id.next())
    }

    /// Render the status bar
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let surface = state.session.surface();
        let theme = surface.theme();
        let accent = theme.colors.key_text.to_ratatui_color();
        let muted = Style::default().fg(Color::DarkGray);

        let tilt = surface.tilt();
        let shift = if surface.is_shifted() { "on" } else { "off" };
        let sensor = if state.session.sensor().is_registered() {
            state.config.sensor.source.to_string()
        } else {
            "off".to_string()
        };

        let button = Line::from(vec![
            Span::styled(
                format!("[ {} ]", Self::theme_button_caption(state)),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Tab", muted),
        ]);

        let info = Line::from(vec![
            Span::raw(format!("Layout: {}", surface.mode())),
            Span::styled(" | ", muted),
            Span::raw(format!("Shift: {shift}")),
            Span::styled(" | ", muted),
            Span::raw(format!("Tilt: ({:+.2}, {:+.2})", tilt.x, tilt.y)),
            Span::styled(" | ", muted),
            Span::raw(format!("Sensor: {sensor}")),
        ]);

        let text = state.pad.text().replace('\n', "⏎");
        let skip = text.chars().count().saturating_sub(TEXT_TAIL);
        let tail: String = text.chars().skip(skip).collect();
        let typed = Line::from(vec![
            Span::styled("Text: ", Style::default().fg(accent)),
            Span::raw(tail),
            Span::styled("▏", muted),
        ]);

        let help = Line::from(Span::styled(
            "Click or type · ←↑↓→ tilt (manual) · F2 level · F3 clear · F4 hide/show · Esc quit",
            muted,
        ));

        let paragraph = Paragraph::new(vec![button, info, typed, help])
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}
