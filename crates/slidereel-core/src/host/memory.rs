//! In-memory host that records every write made by the engine.
//!
//! Backs the headless `simulate` command and the test suites.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{Axis, Container, SlideElement, SlideKey, Viewport};

/// Slide element with observable state
#[derive(Debug)]
pub struct MemorySlide {
    key: SlideKey,
    visible: Cell<bool>,
    width: Cell<Option<f64>>,
    height: Cell<Option<f64>>,
    offset: Cell<f64>,
    offset_writes: Cell<usize>,
}

impl MemorySlide {
    pub fn new(key: u64) -> Rc<Self> {
        Rc::new(Self {
            key: SlideKey(key),
            visible: Cell::new(true),
            width: Cell::new(None),
            height: Cell::new(None),
            offset: Cell::new(0.0),
            offset_writes: Cell::new(0),
        })
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    /// Last offset written by the engine
    pub fn offset(&self) -> f64 {
        self.offset.get()
    }

    /// Number of offset writes received
    pub fn offset_writes(&self) -> usize {
        self.offset_writes.get()
    }

    pub fn length(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Horizontal => self.width.get(),
            Axis::Vertical => self.height.get(),
        }
    }
}

impl SlideElement for MemorySlide {
    fn key(&self) -> SlideKey {
        self.key
    }

    fn is_visible(&self) -> bool {
        self.visible.get()
    }

    fn apply_length(&self, axis: Axis, length: Option<f64>) {
        match axis {
            Axis::Horizontal => self.width.set(length),
            Axis::Vertical => self.height.set(length),
        }
    }

    fn apply_offset(&self, _axis: Axis, offset: f64) {
        self.offset.set(offset);
        self.offset_writes.set(self.offset_writes.get() + 1);
    }
}

/// Viewport that remembers the last strip offset
#[derive(Debug, Default)]
pub struct MemoryViewport {
    offset: Cell<f64>,
    axis: Cell<Option<Axis>>,
    writes: Cell<usize>,
}

impl MemoryViewport {
    pub fn offset(&self) -> f64 {
        self.offset.get()
    }

    pub fn axis(&self) -> Option<Axis> {
        self.axis.get()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl Viewport for MemoryViewport {
    fn apply_offset(&self, axis: Axis, offset: f64) {
        self.offset.set(offset);
        self.axis.set(Some(axis));
        self.writes.set(self.writes.get() + 1);
    }
}

/// Container with a fixed size and a mutable list of slides
#[derive(Debug)]
pub struct MemoryContainer {
    width: Cell<f64>,
    height: Cell<f64>,
    rtl: Cell<bool>,
    viewport: Option<Rc<MemoryViewport>>,
    slides: RefCell<Vec<Rc<MemorySlide>>>,
    next_key: Cell<u64>,
}

impl MemoryContainer {
    pub fn new(width: f64, height: f64) -> Rc<Self> {
        Rc::new(Self::build(width, height, Some(Rc::new(MemoryViewport::default()))))
    }

    /// A container lacking the viewport, used to exercise construction failures
    pub fn without_viewport(width: f64, height: f64) -> Rc<Self> {
        Rc::new(Self::build(width, height, None))
    }

    /// Container pre-filled with `count` visible slides
    pub fn with_slides(count: usize, width: f64, height: f64) -> Rc<Self> {
        let container = Self::new(width, height);
        for _ in 0..count {
            container.push_slide();
        }
        container
    }

    fn build(width: f64, height: f64, viewport: Option<Rc<MemoryViewport>>) -> Self {
        Self {
            width: Cell::new(width),
            height: Cell::new(height),
            rtl: Cell::new(false),
            viewport,
            slides: RefCell::new(Vec::new()),
            next_key: Cell::new(0),
        }
    }

    /// Append a new visible slide and return its handle
    pub fn push_slide(&self) -> Rc<MemorySlide> {
        let key = self.next_key.get();
        self.next_key.set(key + 1);
        let slide = MemorySlide::new(key);
        self.slides.borrow_mut().push(Rc::clone(&slide));
        slide
    }

    /// Remove the slide at `index`, returning it if present
    pub fn remove_slide(&self, index: usize) -> Option<Rc<MemorySlide>> {
        let mut slides = self.slides.borrow_mut();
        (index < slides.len()).then(|| slides.remove(index))
    }

    pub fn slide(&self, index: usize) -> Option<Rc<MemorySlide>> {
        self.slides.borrow().get(index).cloned()
    }

    pub fn slide_count(&self) -> usize {
        self.slides.borrow().len()
    }

    pub fn memory_viewport(&self) -> Option<Rc<MemoryViewport>> {
        self.viewport.clone()
    }

    pub fn resize(&self, width: f64, height: f64) {
        self.width.set(width);
        self.height.set(height);
    }

    pub fn set_rtl(&self, rtl: bool) {
        self.rtl.set(rtl);
    }
}

impl Container for MemoryContainer {
    fn viewport(&self) -> Option<Rc<dyn Viewport>> {
        self.viewport
            .as_ref()
            .map(|viewport| Rc::clone(viewport) as Rc<dyn Viewport>)
    }

    fn length(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width.get(),
            Axis::Vertical => self.height.get(),
        }
    }

    fn slide_elements(&self) -> Vec<Rc<dyn SlideElement>> {
        self.slides
            .borrow()
            .iter()
            .map(|slide| Rc::clone(slide) as Rc<dyn SlideElement>)
            .collect()
    }

    fn is_rtl(&self) -> bool {
        self.rtl.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_remove_slides() {
        let container = MemoryContainer::with_slides(3, 100.0, 50.0);
        assert_eq!(container.slide_count(), 3);

        let removed = container.remove_slide(1).unwrap();
        assert_eq!(removed.key(), SlideKey(1));
        assert_eq!(container.slide_count(), 2);
        assert!(container.remove_slide(5).is_none());

        // Keys are never reused
        let added = container.push_slide();
        assert_eq!(added.key(), SlideKey(3));
    }

    #[test]
    fn test_length_per_axis() {
        let container = MemoryContainer::new(120.0, 40.0);
        assert_eq!(container.length(Axis::Horizontal), 120.0);
        assert_eq!(container.length(Axis::Vertical), 40.0);

        container.resize(80.0, 20.0);
        assert_eq!(container.length(Axis::Horizontal), 80.0);
    }

    #[test]
    fn test_without_viewport() {
        let container = MemoryContainer::without_viewport(100.0, 100.0);
        assert!(container.viewport().is_none());
    }
}
