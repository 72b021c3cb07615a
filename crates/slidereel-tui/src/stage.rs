//! Host elements backed by terminal cells.
//!
//! Lengths and offsets are measured in columns (horizontal) or rows
//! (vertical). The engine writes them here; the carousel widget reads them
//! back when drawing.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use slidereel_core::{Axis, Container, SlideElement, SlideKey, Viewport};

use crate::deck::{Deck, SlideContent};

/// One deck slide placed on the stage
#[derive(Debug)]
pub struct TerminalSlide {
    key: SlideKey,
    content: SlideContent,
    hidden: Cell<bool>,
    width: Cell<Option<f64>>,
    height: Cell<Option<f64>>,
    offset: Cell<f64>,
}

impl TerminalSlide {
    fn new(key: SlideKey, content: SlideContent) -> Self {
        Self {
            key,
            content,
            hidden: Cell::new(false),
            width: Cell::new(None),
            height: Cell::new(None),
            offset: Cell::new(0.0),
        }
    }

    pub fn content(&self) -> &SlideContent {
        &self.content
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.get()
    }

    /// Length written by the engine along `axis`, if any
    pub fn length(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Horizontal => self.width.get(),
            Axis::Vertical => self.height.get(),
        }
    }

    /// Displacement written by the engine (non-zero only for loop corrections)
    pub fn offset(&self) -> f64 {
        self.offset.get()
    }
}

impl SlideElement for TerminalSlide {
    fn key(&self) -> SlideKey {
        self.key
    }

    fn is_visible(&self) -> bool {
        !self.hidden.get()
    }

    fn apply_length(&self, axis: Axis, length: Option<f64>) {
        match axis {
            Axis::Horizontal => self.width.set(length),
            Axis::Vertical => self.height.set(length),
        }
    }

    fn apply_offset(&self, _axis: Axis, offset: f64) {
        self.offset.set(offset);
    }
}

/// The strip holding every slide
#[derive(Debug, Default)]
pub struct StripViewport {
    offset: Cell<f64>,
}

impl StripViewport {
    pub fn offset(&self) -> f64 {
        self.offset.get()
    }
}

impl Viewport for StripViewport {
    fn apply_offset(&self, _axis: Axis, offset: f64) {
        self.offset.set(offset);
    }
}

/// Carousel area of the terminal
#[derive(Debug)]
pub struct TerminalStage {
    width: Cell<u16>,
    height: Cell<u16>,
    rtl: Cell<bool>,
    viewport: Rc<StripViewport>,
    slides: RefCell<Vec<Rc<TerminalSlide>>>,
    next_key: Cell<u64>,
}

impl TerminalStage {
    pub fn new(width: u16, height: u16) -> Rc<Self> {
        Rc::new(Self {
            width: Cell::new(width),
            height: Cell::new(height),
            rtl: Cell::new(false),
            viewport: Rc::new(StripViewport::default()),
            slides: RefCell::new(Vec::new()),
            next_key: Cell::new(0),
        })
    }

    pub fn with_deck(deck: &Deck, width: u16, height: u16) -> Rc<Self> {
        let stage = Self::new(width, height);
        stage.load_deck(deck);
        stage
    }

    /// Replace every slide with the deck's content
    ///
    /// New slides get fresh keys, so nothing carries over from the old ones.
    pub fn load_deck(&self, deck: &Deck) {
        let slides = deck
            .slides()
            .iter()
            .map(|content| {
                let key = SlideKey(self.next_key.get());
                self.next_key.set(key.0 + 1);
                Rc::new(TerminalSlide::new(key, content.clone()))
            })
            .collect();
        *self.slides.borrow_mut() = slides;
    }

    pub fn width(&self) -> u16 {
        self.width.get()
    }

    pub fn height(&self) -> u16 {
        self.height.get()
    }

    /// Returns whether the size actually changed
    pub fn resize(&self, width: u16, height: u16) -> bool {
        let changed = self.width.replace(width) != width;
        self.height.replace(height) != height || changed
    }

    pub fn set_rtl(&self, rtl: bool) {
        self.rtl.set(rtl);
    }

    pub fn strip(&self) -> &StripViewport {
        &self.viewport
    }

    pub fn slides(&self) -> Vec<Rc<TerminalSlide>> {
        self.slides.borrow().clone()
    }

    pub fn slide(&self, key: SlideKey) -> Option<Rc<TerminalSlide>> {
        self.slides
            .borrow()
            .iter()
            .find(|slide| slide.key == key)
            .cloned()
    }

    /// Returns whether the slide exists
    pub fn set_hidden(&self, key: SlideKey, hidden: bool) -> bool {
        match self.slide(key) {
            Some(slide) => {
                slide.hidden.set(hidden);
                true
            }
            None => false,
        }
    }

    /// Unhide every slide; returns how many were hidden
    pub fn show_all(&self) -> usize {
        self.slides
            .borrow()
            .iter()
            .filter(|slide| slide.hidden.replace(false))
            .count()
    }

    pub fn hidden_count(&self) -> usize {
        self.slides
            .borrow()
            .iter()
            .filter(|slide| slide.hidden.get())
            .count()
    }
}

impl Container for TerminalStage {
    fn viewport(&self) -> Option<Rc<dyn Viewport>> {
        Some(self.viewport.clone())
    }

    fn length(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => f64::from(self.width.get()),
            Axis::Vertical => f64::from(self.height.get()),
        }
    }

    fn slide_elements(&self) -> Vec<Rc<dyn SlideElement>> {
        self.slides
            .borrow()
            .iter()
            .map(|slide| slide.clone() as Rc<dyn SlideElement>)
            .collect()
    }

    fn is_rtl(&self) -> bool {
        self.rtl.get()
    }
}
