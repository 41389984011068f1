//! Data models for keys, layouts, colors and tilt.
//!
//! This module contains the plain data the rest of the crate computes over.
//! Models are independent of rendering and of the host platform.

pub mod color;
pub mod key;
pub mod layout;
pub mod tilt;
pub mod vec2;

// Re-export all model types
pub use color::Argb;
pub use key::{apply_case, ActionKind, KeyDescriptor};
pub use layout::KeyboardLayoutMode;
pub use tilt::{Tilt, TiltSignal};
pub use vec2::Vec2;
