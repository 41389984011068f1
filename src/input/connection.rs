//! The text-commit channel to the focused application.

use serde::Serialize;

/// Direction of a synthesized hardware key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HostKeyAction {
    /// Key went down
    Down,
    /// Key came up
    Up,
}

/// Hardware keys the keyboard can synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HostKeyCode {
    /// Enter / Return
    Enter,
}

/// A synthesized hardware key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HostKeyEvent {
    /// Down or up
    pub action: HostKeyAction,
    /// Which key
    pub code: HostKeyCode,
}

impl HostKeyEvent {
    /// A key-down event.
    #[must_use]
    pub const fn down(code: HostKeyCode) -> Self {
        Self {
            action: HostKeyAction::Down,
            code,
        }
    }

    /// A key-up event.
    #[must_use]
    pub const fn up(code: HostKeyCode) -> Self {
        Self {
            action: HostKeyAction::Up,
            code,
        }
    }
}

/// Operations the keyboard performs on the focused text field.
///
/// When no field is focused the host hands the keyboard `None` instead of a
/// connection and every action is dropped.
pub trait InputConnection {
    /// Inserts `text` at the cursor, replacing nothing.
    fn commit_text(&mut self, text: &str);

    /// Deletes `before` characters before the cursor and `after` after it.
    fn delete_surrounding_text(&mut self, before: usize, after: usize);

    /// Delivers a synthesized hardware key event.
    fn send_key_event(&mut self, event: HostKeyEvent);
}

/// An in-memory text field.
///
/// Used by the terminal front end as its focused application and by tests
/// as a recording channel. Enter inserts a newline on key-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScratchPad {
    text: String,
    key_events: Vec<HostKeyEvent>,
}

impl ScratchPad {
    /// An empty field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Every key event received, in order.
    #[must_use]
    pub fn key_events(&self) -> &[HostKeyEvent] {
        &self.key_events
    }

    /// Empties the field.
    pub fn clear(&mut self) {
        self.text.clear();
        self.key_events.clear();
    }
}

impl InputConnection for ScratchPad {
    fn commit_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn delete_surrounding_text(&mut self, before: usize, _after: usize) {
        // Cursor is always at the end, so there is nothing after it
        for _ in 0..before {
            if self.text.pop().is_none() {
                break;
            }
        }
    }

    fn send_key_event(&mut self, event: HostKeyEvent) {
        self.key_events.push(event);
        if event == HostKeyEvent::up(HostKeyCode::Enter) {
            self.text.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_appends() {
        let mut pad = ScratchPad::new();
        pad.commit_text("h");
        pad.commit_text("i");
        assert_eq!(pad.text(), "hi");
    }

    #[test]
    fn test_delete_before_cursor() {
        let mut pad = ScratchPad::new();
        pad.commit_text("héllo");
        pad.delete_surrounding_text(1, 0);
        assert_eq!(pad.text(), "héll");
        pad.delete_surrounding_text(3, 0);
        assert_eq!(pad.text(), "h");
    }

    #[test]
    fn test_delete_on_empty_is_harmless() {
        let mut pad = ScratchPad::new();
        pad.delete_surrounding_text(1, 0);
        assert_eq!(pad.text(), "");
    }

    #[test]
    fn test_enter_pair_inserts_newline_once() {
        let mut pad = ScratchPad::new();
        pad.send_key_event(HostKeyEvent::down(HostKeyCode::Enter));
        assert_eq!(pad.text(), "");
        pad.send_key_event(HostKeyEvent::up(HostKeyCode::Enter));
        assert_eq!(pad.text(), "\n");
        assert_eq!(pad.key_events().len(), 2);
    }
}
