//! CLI command handlers for the ASMR keyboard.
//!
//! Headless, scriptable access to the layout tables, the theme set, the
//! per-key layer transforms and the backspace repeat schedule.

pub mod common;
pub mod frame;
pub mod layout;
pub mod repeat;
pub mod themes;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use frame::FrameArgs;
pub use layout::{LayoutArgs, ModeArg};
pub use repeat::{simulate as simulate_repeat, Fire, RepeatArgs, RepeatTimeline};
pub use themes::ThemesArgs;
