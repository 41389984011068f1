//! Keyboard widget: rasterizes a [`SurfaceFrame`] into terminal cells.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Borders},
    Frame,
};

use crate::models::{Argb, Vec2};
use crate::surface::{KeyRect, OverlayPaint, PaintOp, SurfaceFrame};

use super::AppState;

/// Drop shadow under a raised key surface
const SHADOW: Argb = Argb::new(0x59, 0, 0, 0);

/// Shadows shorter than this are not drawn
const MIN_SHADOW: f32 = 0.5;

/// Off-screen color grid the paint ops are composited into.
///
/// One surface unit is `1 / units_per_column` of a cell horizontally and
/// `1 / units_per_row` vertically.
#[derive(Debug, Clone, PartialEq)]
pub struct CellCanvas {
    width: u16,
    height: u16,
    units_per_column: f32,
    units_per_row: f32,
    colors: Vec<Argb>,
    glyphs: Vec<Option<(char, Argb)>>,
}

impl CellCanvas {
    /// A black canvas of `width` × `height` cells.
    #[must_use]
    pub fn new(width: u16, height: u16, units_per_column: f32, units_per_row: f32) -> Self {
        let len = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            units_per_column,
            units_per_row,
            colors: vec![Argb::BLACK; len],
            glyphs: vec![None; len],
        }
    }

    /// Canvas size in surface units.
    #[must_use]
    pub fn surface_size(&self) -> (f32, f32) {
        (
            f32::from(self.width) * self.units_per_column,
            f32::from(self.height) * self.units_per_row,
        )
    }

    /// Composited color of a cell.
    #[must_use]
    pub fn color_at(&self, x: u16, y: u16) -> Option<Argb> {
        self.index(x, y).map(|i| self.colors[i])
    }

    /// Character drawn in a cell, if any.
    #[must_use]
    pub fn glyph_at(&self, x: u16, y: u16) -> Option<char> {
        self.index(x, y).and_then(|i| self.glyphs[i]).map(|(c, _)| c)
    }

    /// Composites every layer of `frame`, back to front.
    pub fn paint(&mut self, frame: &SurfaceFrame) {
        let (width, height) = self.surface_size();
        let gap = Vec2::new(self.units_per_column * 0.5, self.units_per_row * 0.5);

        for op in frame.paint_ops() {
            match op {
                PaintOp::Background(background) => {
                    let rect = KeyRect::new(0.0, 0.0, width, height)
                        .translated(background.offset)
                        .scaled(Vec2::splat(background.scale));
                    self.fill(rect, background.color);
                }
                PaintOp::KeyBase { rect, color, .. } | PaintOp::KeyBody { rect, color, .. } => {
                    self.fill(inset(rect, gap), color);
                }
                PaintOp::KeySurface {
                    rect,
                    elevation,
                    color,
                    label,
                    text_color,
                    ..
                } => {
                    let rect = inset(rect, gap);
                    if elevation > MIN_SHADOW {
                        self.fill(rect.translated(Vec2::new(0.0, elevation)), SHADOW);
                    }
                    self.fill(rect, color);
                    self.label(rect, &label, text_color);
                }
                PaintOp::Overlay(overlay) => self.vignette(&overlay, width, height),
            }
        }
    }

    /// Copies the canvas into `buf` at `area`.
    pub fn render_to(&self, area: Rect, buf: &mut Buffer) {
        for y in 0..self.height.min(area.height) {
            for x in 0..self.width.min(area.width) {
                let Some(i) = self.index(x, y) else { continue };
                let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) else {
                    continue;
                };
                let bg = self.colors[i];
                cell.set_bg(bg.to_ratatui_color());
                match self.glyphs[i] {
                    Some((c, fg)) => {
                        cell.set_char(c);
                        cell.set_fg(fg.over(bg).to_ratatui_color());
                    }
                    None => {
                        cell.set_char(' ');
                    }
                }
            }
        }
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    fn columns(&self, start: f32, end: f32) -> std::ops::Range<u16> {
        span(start, end, self.units_per_column, self.width)
    }

    fn rows(&self, start: f32, end: f32) -> std::ops::Range<u16> {
        span(start, end, self.units_per_row, self.height)
    }

    fn fill(&mut self, rect: KeyRect, color: Argb) {
        let opaque = color.a == u8::MAX;
        for y in self.rows(rect.y, rect.bottom()) {
            for x in self.columns(rect.x, rect.right()) {
                if let Some(i) = self.index(x, y) {
                    self.colors[i] = color.over(self.colors[i]);
                    if opaque {
                        self.glyphs[i] = None;
                    }
                }
            }
        }
    }

    fn label(&mut self, rect: KeyRect, text: &str, color: Argb) {
        let center = rect.center();
        let len = text.chars().count() as f32;
        let row = (center.y / self.units_per_row).floor();
        let first = (center.x / self.units_per_column - len / 2.0).floor();
        if row < 0.0 || row >= f32::from(self.height) {
            return;
        }
        for (offset, c) in text.chars().enumerate() {
            let column = first + offset as f32;
            if column < 0.0 || column >= f32::from(self.width) {
                continue;
            }
            if let Some(i) = self.index(column as u16, row as u16) {
                self.glyphs[i] = Some((c, color));
            }
        }
    }

    fn vignette(&mut self, overlay: &OverlayPaint, width: f32, height: f32) {
        let center = Vec2::new(width / 2.0, height / 2.0) + overlay.offset;
        let radius = Vec2::new(width / 2.0, height / 2.0) * overlay.scale;
        if radius.x <= 0.0 || radius.y <= 0.0 {
            return;
        }
        let inner = f32::from(overlay.center.a) / 255.0;
        let outer = f32::from(overlay.edge.a) / 255.0;

        for y in 0..self.height {
            for x in 0..self.width {
                let point = Vec2::new(
                    (f32::from(x) + 0.5) * self.units_per_column,
                    (f32::from(y) + 0.5) * self.units_per_row,
                );
                let dx = (point.x - center.x) / radius.x;
                let dy = (point.y - center.y) / radius.y;
                let t = (dx * dx + dy * dy).min(1.0);
                let alpha = inner + (outer - inner) * t;
                if let Some(i) = self.index(x, y) {
                    self.colors[i] = overlay.edge.with_alpha(alpha).over(self.colors[i]);
                }
            }
        }
    }
}

/// Cells covered by `[start, end)` in surface units, clipped to `limit`.
fn span(start: f32, end: f32, unit: f32, limit: u16) -> std::ops::Range<u16> {
    let max = f32::from(limit);
    let first = (start / unit).round().clamp(0.0, max);
    let last = (end / unit).round().clamp(0.0, max);
    first as u16..last as u16
}

fn inset(rect: KeyRect, by: Vec2) -> KeyRect {
    KeyRect::new(
        rect.x + by.x,
        rect.y + by.y,
        (rect.width - 2.0 * by.x).max(0.0),
        (rect.height - 2.0 * by.y).max(0.0),
    )
}

/// Keyboard widget
pub struct KeyboardWidget;

impl KeyboardWidget {
    /// Render the keyboard and return the inner area the keys occupy
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) -> Rect {
        let surface = state.session.surface();
        let block = Block::default()
            .title(format!(" {} · {} ", surface.theme().id, surface.mode()))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut canvas = CellCanvas::new(
            inner.width,
            inner.height,
            state.config.ui.units_per_column,
            state.config.ui.units_per_row,
        );
        let (width, height) = canvas.surface_size();
        canvas.paint(&surface.frame(width, height));
        canvas.render_to(inner, f.buffer_mut());
        inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Tilt, TiltSignal};
    use crate::surface::{KeyboardSurface, SurfaceSettings};
    use crate::theme::ThemeId;
    use std::time::Duration;

    fn painted(surface: &KeyboardSurface) -> CellCanvas {
        let mut canvas = CellCanvas::new(50, 12, 2.0, 4.0);
        let (width, height) = canvas.surface_size();
        canvas.paint(&surface.frame(width, height));
        canvas
    }

    fn surface() -> KeyboardSurface {
        KeyboardSurface::new(TiltSignal::new(), ThemeId::Wood, SurfaceSettings::default())
    }

    #[test]
    fn test_surface_size() {
        let canvas = CellCanvas::new(50, 12, 2.0, 4.0);
        assert_eq!(canvas.surface_size(), (100.0, 48.0));
        assert_eq!(canvas.color_at(0, 0), Some(Argb::BLACK));
        assert_eq!(canvas.color_at(50, 0), None);
    }

    #[test]
    fn test_labels_are_drawn() {
        let canvas = painted(&surface());
        assert_eq!(canvas.glyph_at(2, 1), Some('q'));
    }

    #[test]
    fn test_press_changes_surface_color() {
        let mut surface = surface();
        let idle = painted(&surface).color_at(2, 2);

        let q = surface.find_glyph("q").unwrap();
        surface.press(q, Duration::ZERO, None);
        let pressed = painted(&surface).color_at(2, 2);
        assert_ne!(idle, pressed);
    }

    #[test]
    fn test_theme_change_repaints() {
        let mut surface = surface();
        let before = painted(&surface).color_at(2, 2);
        surface.cycle_theme();
        assert_ne!(painted(&surface).color_at(2, 2), before);
    }

    #[test]
    fn test_large_offsets_are_clipped() {
        let surface = surface();
        surface.tilt_signal().set(Tilt::new(40.0, -40.0));
        let canvas = painted(&surface);
        assert!(canvas.color_at(49, 11).is_some());
    }

    #[test]
    fn test_span_clips() {
        assert_eq!(span(-10.0, 5.0, 2.0, 10), 0..3);
        assert_eq!(span(15.0, 100.0, 2.0, 10), 8..10);
        assert_eq!(span(30.0, 40.0, 2.0, 10), 10..10);
    }
}
