use std::fmt;
use std::rc::Rc;

use crate::host::{Axis, Container};

/// Layout mode, text direction and container of a slider
///
/// Orientation is fixed for the lifetime of the runtime; only the text
/// direction can change.
#[derive(Clone)]
pub struct Runtime {
    container: Rc<dyn Container>,
    is_rtl: bool,
    is_horizontal: bool,
}

impl Runtime {
    pub fn new(container: Rc<dyn Container>, is_rtl: bool, is_horizontal: bool) -> Self {
        Self {
            container,
            is_rtl,
            is_horizontal,
        }
    }

    /// Sign normalizing offset arithmetic across layout combinations
    ///
    /// Horizontal RTL strips move towards positive offsets, every other layout
    /// towards negative ones. Vertical motion ignores the text direction.
    pub fn direction_coefficient(&self) -> i32 {
        if self.is_horizontal && self.is_rtl {
            1
        } else {
            -1
        }
    }

    pub fn is_horizontal(&self) -> bool {
        self.is_horizontal
    }

    pub fn is_rtl(&self) -> bool {
        self.is_rtl
    }

    pub fn axis(&self) -> Axis {
        if self.is_horizontal {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    pub fn container(&self) -> &Rc<dyn Container> {
        &self.container
    }

    pub fn set_is_rtl(&mut self, is_rtl: bool) {
        self.is_rtl = is_rtl;
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("is_rtl", &self.is_rtl)
            .field("is_horizontal", &self.is_horizontal)
            .finish_non_exhaustive()
    }
}
