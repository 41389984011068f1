//! Proportional key geometry and hit testing.

use serde::Serialize;
use std::fmt;

use crate::models::{KeyDescriptor, Vec2};

/// Position of a key in the active grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct KeyId {
    /// Row index, top to bottom
    pub row: usize,
    /// Index within the row, left to right
    pub col: usize,
}

impl KeyId {
    /// Creates a key id.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Axis-aligned rectangle in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct KeyRect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl KeyRect {
    /// Creates a rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `point` lies inside. Left/top edges are inclusive.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// The rectangle moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// The rectangle scaled about its center.
    #[must_use]
    pub fn scaled(&self, scale: Vec2) -> Self {
        let center = self.center();
        let width = self.width * scale.x;
        let height = self.height * scale.y;
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }
}

/// Widths of the keys in one row, in order.
///
/// Each key gets `row_width * weight / sum(weights)`, so a row always spans
/// exactly `row_width`.
///
/// # Examples
///
/// ```
/// use asmr_keyboard::models::{ActionKind, KeyDescriptor};
/// use asmr_keyboard::surface::row_widths;
///
/// let row = vec![
///     KeyDescriptor::weighted(ActionKind::ModeChange, "?123", 1.5),
///     KeyDescriptor::weighted(ActionKind::Space, "SPACE", 5.0),
///     KeyDescriptor::weighted(ActionKind::Enter, "ENTER", 2.0),
/// ];
/// assert_eq!(row_widths(&row, 85.0), vec![15.0, 50.0, 20.0]);
/// ```
#[must_use]
pub fn row_widths(row: &[KeyDescriptor], row_width: f32) -> Vec<f32> {
    let total: f32 = row.iter().map(KeyDescriptor::weight).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    row.iter()
        .map(|key| row_width * key.weight() / total)
        .collect()
}

/// Lays out every key of `rows` into a `width` × `height` area.
///
/// Rows share the height equally.
#[must_use]
pub fn layout_rects(rows: &[Vec<KeyDescriptor>], width: f32, height: f32) -> Vec<(KeyId, KeyRect)> {
    if rows.is_empty() {
        return Vec::new();
    }
    let row_height = height / rows.len() as f32;
    let mut rects = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        let y = row_index as f32 * row_height;
        let mut x = 0.0;
        for (col, key_width) in row_widths(row, width).into_iter().enumerate() {
            rects.push((
                KeyId::new(row_index, col),
                KeyRect::new(x, y, key_width, row_height),
            ));
            x += key_width;
        }
    }
    rects
}

/// The key under `point`, if any.
#[must_use]
pub fn hit_test(rects: &[(KeyId, KeyRect)], point: Vec2) -> Option<KeyId> {
    rects
        .iter()
        .find(|(_, rect)| rect.contains(point))
        .map(|(id, _)| *id)
}
