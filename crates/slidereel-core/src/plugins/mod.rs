//! Collaborators that drive a [`Projector`](crate::projector::Projector)
//! from the outside.
//!
//! None of these compute positions themselves. Each keeps a little state of
//! its own and reacts to host input (layout changes, drags, time) or to
//! [`SliderEvent`](crate::event::SliderEvent)s forwarded by the host.

pub mod autoplay;
pub mod refresh;
pub mod state;
pub mod swipe;

pub use autoplay::Autoplay;
pub use refresh::Refresh;
pub use state::{SlideState, StateLabels};
pub use swipe::Swipe;
