//! ASMR Keyboard Library
//!
//! Core of a tactile on-screen keyboard: a tilt-driven parallax and
//! key-sinking animation engine, a key dispatcher with one-shot shift and
//! backspace repeat, a keyboard surface that composes layout, animation
//! and dispatch, four visual themes, and a sensor lifecycle adapter.
//!
//! The terminal front end lives behind the `ratatui` feature.

// Module declarations
pub mod animation;
pub mod cli;
pub mod config;
pub mod constants;
pub mod input;
pub mod models;
pub mod sensor;
pub mod session;
pub mod surface;
pub mod theme;
#[cfg(feature = "ratatui")]
pub mod tui;
