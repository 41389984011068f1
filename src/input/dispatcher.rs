//! Key dispatcher: turns a key press into a semantic action.

use serde::Serialize;

use super::connection::{HostKeyCode, HostKeyEvent, InputConnection};
use crate::models::{apply_case, ActionKind, KeyDescriptor};

/// What a key press does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum KeyAction {
    /// Insert text at the cursor
    Commit(String),
    /// Delete this many characters before the cursor
    DeleteBackward(usize),
    /// Send an Enter down/up pair
    CommitLine,
    /// Shift state changed; nothing is sent to the application
    ShiftToggled,
    /// Switch the layout mode; nothing is sent to the application
    ToggleLayout,
}

impl KeyAction {
    /// Applies the action to the text channel.
    ///
    /// Keyboard-internal actions (shift, layout) leave the channel untouched.
    pub fn apply(&self, connection: &mut dyn InputConnection) {
        match self {
            Self::Commit(text) => connection.commit_text(text),
            Self::DeleteBackward(count) => connection.delete_surrounding_text(*count, 0),
            Self::CommitLine => {
                connection.send_key_event(HostKeyEvent::down(HostKeyCode::Enter));
                connection.send_key_event(HostKeyEvent::up(HostKeyCode::Enter));
            }
            Self::ShiftToggled | Self::ToggleLayout => {}
        }
    }
}

/// Maps a key and the current shift state to an action and the next shift state.
///
/// Shift is one-shot: a character commit always clears it.
///
/// # Examples
///
/// ```
/// use asmr_keyboard::input::{dispatch, KeyAction};
/// use asmr_keyboard::models::KeyDescriptor;
///
/// let (action, shift) = dispatch(&KeyDescriptor::character("Q"), true);
/// assert_eq!(action, KeyAction::Commit("Q".to_string()));
/// assert!(!shift);
/// ```
#[must_use]
pub fn dispatch(descriptor: &KeyDescriptor, shift: bool) -> (KeyAction, bool) {
    match descriptor.action() {
        ActionKind::Character => (
            KeyAction::Commit(apply_case(descriptor.glyph(), shift)),
            false,
        ),
        ActionKind::Backspace => (KeyAction::DeleteBackward(1), shift),
        ActionKind::Space => (KeyAction::Commit(" ".to_string()), shift),
        ActionKind::Shift => (KeyAction::ShiftToggled, !shift),
        ActionKind::Enter => (KeyAction::CommitLine, shift),
        ActionKind::ModeChange => (KeyAction::ToggleLayout, shift),
    }
}
