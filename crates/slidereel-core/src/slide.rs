use std::fmt;
use std::rc::Rc;

use crate::host::{Axis, SlideElement, SlideKey};

/// Bookkeeping record for one content pane
pub struct Slide {
    element: Rc<dyn SlideElement>,
    /// Distance from the current slide; `None` while inactive
    current_position: Option<i64>,
    is_active: bool,
    width: f64,
    height: f64,
    /// Last offset written to the element
    offset: f64,
}

impl Slide {
    pub fn new(element: Rc<dyn SlideElement>) -> Self {
        Self {
            element,
            current_position: None,
            is_active: false,
            width: 0.0,
            height: 0.0,
            offset: 0.0,
        }
    }

    pub fn element(&self) -> &Rc<dyn SlideElement> {
        &self.element
    }

    pub fn key(&self) -> SlideKey {
        self.element.key()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Active and positioned at the current slot
    pub fn is_current(&self) -> bool {
        self.is_active && self.current_position == Some(0)
    }

    pub fn current_position(&self) -> Option<i64> {
        self.current_position
    }

    pub fn length(&self) -> f64 {
        self.width.max(self.height)
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn set_current_position(&mut self, position: i64) {
        self.current_position = Some(position);
    }

    /// Re-read visibility from the element
    pub fn refresh_active(&mut self) {
        let is_active = self.element.is_visible();

        if !is_active {
            self.current_position = None;
        }

        self.is_active = is_active;
    }

    /// Set the length along `axis`, clearing the other one
    pub fn set_length(&mut self, amount: f64, axis: Axis) {
        let is_width = axis.is_horizontal();
        self.width = if is_width { amount } else { 0.0 };
        self.height = if is_width { 0.0 } else { amount };

        self.element
            .apply_length(Axis::Horizontal, (self.width > 0.0).then_some(amount));
        self.element
            .apply_length(Axis::Vertical, (self.height > 0.0).then_some(amount));
    }

    /// Displace the slide along `axis`; repeated values are not rewritten
    pub fn set_offset(&mut self, offset: f64, axis: Axis) {
        if offset != self.offset {
            self.element.apply_offset(axis, offset);
            self.offset = offset;
        }
    }
}

impl fmt::Debug for Slide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slide")
            .field("key", &self.key())
            .field("is_active", &self.is_active)
            .field("current_position", &self.current_position)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("offset", &self.offset)
            .finish()
    }
}
