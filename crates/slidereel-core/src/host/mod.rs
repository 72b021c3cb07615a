//! Capability interfaces through which the engine reaches its host environment.
//!
//! A host (a terminal front-end, a test double, a web binding) owns the actual
//! visual elements. The engine only ever measures the container, reads slide
//! visibility, and writes lengths and offsets back through these traits.

pub mod memory;

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

pub use memory::{MemoryContainer, MemorySlide, MemoryViewport};

/// Axis along which slides are laid out and offsets are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    #[inline]
    pub fn is_horizontal(self) -> bool {
        self == Axis::Horizontal
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("horizontal"),
            Axis::Vertical => f.write_str("vertical"),
        }
    }
}

/// Stable identity of a slide element across refreshes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlideKey(pub u64);

impl fmt::Display for SlideKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single content pane owned by the host
pub trait SlideElement {
    /// Identity used to re-associate bookkeeping on every rescan
    fn key(&self) -> SlideKey;

    /// Whether the pane is currently eligible for display
    fn is_visible(&self) -> bool;

    /// Write the pane's length on `axis`; `None` clears it
    fn apply_length(&self, axis: Axis, length: Option<f64>);

    /// Write the pane's own displacement on `axis`
    fn apply_offset(&self, axis: Axis, offset: f64);
}

/// The strip that gets displaced to bring slides into view
pub trait Viewport {
    fn apply_offset(&self, axis: Axis, offset: f64);
}

/// The outer element hosting the viewport and its slides
pub trait Container {
    /// The projection viewport, if the host provides one
    fn viewport(&self) -> Option<Rc<dyn Viewport>>;

    /// Bounding length of the container along `axis`
    fn length(&self, axis: Axis) -> f64;

    /// Current slide elements, in display order
    fn slide_elements(&self) -> Vec<Rc<dyn SlideElement>>;

    /// Text direction reported by the host at startup
    fn is_rtl(&self) -> bool {
        false
    }
}
