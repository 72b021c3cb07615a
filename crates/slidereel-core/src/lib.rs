pub mod config;
pub mod error;
pub mod event;
pub mod frame;
pub mod host;
pub mod modulo;
pub mod plugins;
pub mod projector;
pub mod runtime;
pub mod slide;
pub mod slider;
pub mod strategy;
pub mod target;

pub use config::{AnimationConfig, AppConfig, EasingType, HoverStrategy, ReplayStrategy};
pub use error::{Error, Result};
pub use event::{EventSink, SliderEvent};
pub use host::{Axis, Container, SlideElement, SlideKey, Viewport};
pub use projector::Projector;
pub use runtime::Runtime;
pub use slide::Slide;
pub use slider::Slider;
pub use target::SwitchTarget;
