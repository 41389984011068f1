//! Key animation engine.
//!
//! Maps tilt and press state to per-layer offsets, scale and elevation for
//! every key, plus the two whole-keyboard backdrop layers. The engine owns
//! no clock: callers advance the per-key records with elapsed time and ask
//! for a frame, which is a pure function of the current values.

pub mod animated;
pub mod curve;
pub mod key_state;
pub mod parallax;

pub use animated::Animated;
pub use curve::{AnimationCurve, Easing};
pub use key_state::{
    compose_frame, AnimationFrame, KeyAnimationState, DEFAULT_IDLE_ELEVATION, ELEVATION_CURVE,
};
pub use parallax::{
    backdrop_transforms, compute_layer_offsets, idle_offset, BackdropSensitivities,
    BackdropTransforms, LayerOffsets, LayerSensitivities,
};
