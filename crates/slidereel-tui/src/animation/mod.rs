//! Eased movement of the displayed strip.
//!
//! The projector moves the strip in one step; the terminal host follows that
//! target over a few frames so switches read as motion.
//!
//! - `easing` - progress curves
//! - `timing` - progress and interpolation helpers
//! - `config` - duration / frame rate helpers over [`AnimationConfig`]
//! - `animator` - [`OffsetAnimator`], the per-frame controller

pub mod config;
pub mod easing;
pub mod timing;

pub mod animator;

pub use animator::OffsetAnimator;
pub use config::{AnimationConfig, AnimationConfigExt};
pub use easing::{EasingType, EasingTypeExt};
