//! Input handling: key dispatch, the text-commit channel and held-key repeat.

pub mod connection;
pub mod dispatcher;
pub mod repeat;

pub use connection::{HostKeyAction, HostKeyCode, HostKeyEvent, InputConnection, ScratchPad};
pub use dispatcher::{dispatch, KeyAction};
pub use repeat::{RepeatFire, RepeatTiming};
