//! Slide collection bookkeeping and offset projection.
//!
//! The [`Projector`] owns every [`Slide`], the strip offset and the logical
//! current index. Where requests land is decided by the installed strategies;
//! the projector only measures, records and writes.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::event::{EventSink, SliderEvent};
use crate::frame::FrameQueue;
use crate::host::{SlideKey, Viewport};
use crate::modulo::modulo;
use crate::runtime::Runtime;
use crate::slide::Slide;
use crate::strategy::{ProjectionStrategy, ProjectorOps, SwitchingStrategy};
use crate::target::SwitchTarget;
use crate::{Error, Result};

/// Step of a switch sequence; each runs on its own frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwitchPhase {
    NotifyStarted,
    Execute,
    NotifyFinished,
}

/// A scheduled switch to an already resolved index
#[derive(Debug, Clone, Copy)]
struct SwitchSequence {
    target: i64,
    phase: SwitchPhase,
}

impl SwitchSequence {
    fn new(target: i64) -> Self {
        Self {
            target,
            phase: SwitchPhase::NotifyStarted,
        }
    }

    fn advance(self) -> Option<Self> {
        let phase = match self.phase {
            SwitchPhase::NotifyStarted => SwitchPhase::Execute,
            SwitchPhase::Execute => SwitchPhase::NotifyFinished,
            SwitchPhase::NotifyFinished => return None,
        };
        Some(Self { phase, ..self })
    }
}

pub struct Projector {
    runtime: Runtime,
    viewport: Rc<dyn Viewport>,
    sink: Box<dyn EventSink>,
    slides: IndexMap<SlideKey, Slide>,
    current_offset: f64,
    current_slide_index: i64,
    slide_length: f64,
    offset_interval: f64,
    switching: Option<Box<dyn SwitchingStrategy>>,
    projection: Option<Box<dyn ProjectionStrategy>>,
    queue: FrameQueue<SwitchSequence>,
}

impl Projector {
    /// Attach to the runtime's container and take the first measurements
    ///
    /// Fails when the container provides no viewport. Strategies must be
    /// installed before the first switch or projection.
    pub fn new(runtime: Runtime, sink: impl EventSink + 'static) -> Result<Self> {
        let viewport = runtime
            .container()
            .viewport()
            .ok_or_else(|| Error::Structural("A projection viewport is required".to_string()))?;

        let mut projector = Self {
            runtime,
            viewport,
            sink: Box::new(sink),
            slides: IndexMap::new(),
            current_offset: 0.0,
            current_slide_index: 0,
            slide_length: 0.0,
            offset_interval: 0.0,
            switching: None,
            projection: None,
            queue: FrameQueue::new(),
        };

        projector.set_slides();
        projector.set_dimensions();

        info!(
            slides = projector.slides.len(),
            axis = %projector.runtime.axis(),
            rtl = projector.runtime.is_rtl(),
            "Projector attached"
        );

        Ok(projector)
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut Runtime {
        &mut self.runtime
    }

    pub fn current_offset(&self) -> f64 {
        self.current_offset
    }

    pub fn current_slide_index(&self) -> i64 {
        self.current_slide_index
    }

    pub fn slide_length(&self) -> f64 {
        self.slide_length
    }

    pub fn offset_interval(&self) -> f64 {
        self.offset_interval
    }

    /// All slides, or only the active ones, in container order
    pub fn slides(&self, active_only: bool) -> Vec<&Slide> {
        self.slides
            .values()
            .filter(|slide| !active_only || slide.is_active())
            .collect()
    }

    pub fn slide(&self, key: SlideKey) -> Option<&Slide> {
        self.slides.get(&key)
    }

    /// The active slide positioned at the current slot
    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.values().find(|slide| slide.is_current())
    }

    /// Position of the current slide among active slides
    pub fn current_active_position(&self) -> Option<usize> {
        self.slides(true).iter().position(|slide| slide.is_current())
    }

    pub fn switching_strategy_name(&self) -> Option<&'static str> {
        self.switching.as_ref().map(|strategy| strategy.name())
    }

    pub fn projection_strategy_name(&self) -> Option<&'static str> {
        self.projection.as_ref().map(|strategy| strategy.name())
    }

    pub fn set_switching_strategy(&mut self, strategy: Box<dyn SwitchingStrategy>) {
        debug!(strategy = strategy.name(), "Switching strategy set");
        self.switching = Some(strategy);
    }

    pub fn set_projection_strategy(&mut self, strategy: Box<dyn ProjectionStrategy>) {
        debug!(strategy = strategy.name(), "Projection strategy set");
        self.projection = Some(strategy);
    }

    /// Forward an event to the sink
    pub fn notify(&mut self, event: SliderEvent) {
        self.sink.notify(event);
    }

    /// Rescan the container's slide elements
    ///
    /// Elements seen before keep their [`Slide`] (and thus its offset and
    /// position); elements no longer listed are dropped.
    pub fn set_slides(&mut self) {
        let mut previous = std::mem::take(&mut self.slides);
        let elements = self.runtime.container().slide_elements();
        let mut slides = IndexMap::with_capacity(elements.len());

        for element in elements {
            let key = element.key();
            let slide = previous
                .swap_remove(&key)
                .unwrap_or_else(|| Slide::new(element));
            slides.insert(key, slide);
        }

        for slide in slides.values_mut() {
            slide.refresh_active();
        }

        debug!(
            total = slides.len(),
            dropped = previous.len(),
            "Slides rescanned"
        );

        self.slides = slides;
    }

    /// Measure the container and propagate the slide length
    pub fn set_dimensions(&mut self) {
        let axis = self.runtime.axis();
        let length = self.runtime.container().length(axis);
        let active_count = self.slides.values().filter(|slide| slide.is_active()).count();

        self.slide_length = length;
        self.offset_interval = length * (active_count as f64 - 1.0);

        for slide in self.slides.values_mut() {
            slide.set_length(length, axis);
        }

        debug!(
            slide_length = self.slide_length,
            offset_interval = self.offset_interval,
            "Dimensions set"
        );
    }

    /// Re-derive every active slide's position around `index` (wrapped)
    pub fn set_current_slide(&mut self, index: i64) {
        let active_count = self.slides.values().filter(|slide| slide.is_active()).count();

        if let Some(target) = modulo(index, active_count as i64) {
            for (position, slide) in self
                .slides
                .values_mut()
                .filter(|slide| slide.is_active())
                .enumerate()
            {
                slide.set_current_position(position as i64 - target);
            }
        }

        self.sink.notify(SliderEvent::CurrentSlideSet);
    }

    pub fn set_current_slide_index(&mut self, index: i64) {
        self.current_slide_index = index;
    }

    /// Hand an offset to the projection strategy
    ///
    /// With `shift`, `offset` is relative to the current offset.
    pub fn project(&mut self, offset: f64, shift: bool) {
        let target = if shift {
            offset + self.current_offset
        } else {
            offset
        };

        let Some(mut strategy) = self.projection.take() else {
            warn!(offset = target, "No projection strategy set");
            return;
        };

        strategy.project(self, target);
        self.projection = Some(strategy);
    }

    /// Record and apply the strip offset
    pub fn set_offset(&mut self, offset: f64) {
        self.current_offset = offset;
        self.viewport.apply_offset(self.runtime.axis(), offset);
    }

    /// Parse and schedule a switch such as `"3"`, `"+1"` or `"-2"`
    ///
    /// Malformed input is ignored.
    pub fn switch(&mut self, target: &str) {
        match target.parse::<SwitchTarget>() {
            Ok(target) => self.switch_to(target),
            Err(e) => debug!("Switch ignored: {}", e),
        }
    }

    /// Schedule a switch; relative targets resolve against the index right now
    pub fn switch_to(&mut self, target: SwitchTarget) {
        let index = target.resolve(self.current_slide_index);
        debug!(%target, index, "Switch scheduled");
        self.queue.schedule(SwitchSequence::new(index));
    }

    /// Run the tasks due in one repaint frame; returns how many ran
    pub fn run_frame(&mut self) -> usize {
        let due = self.queue.begin_frame();
        let count = due.len();

        for sequence in due {
            match sequence.phase {
                SwitchPhase::NotifyStarted => self.sink.notify(SliderEvent::TransitioningStarted),
                SwitchPhase::Execute => self.execute_switch(sequence.target),
                SwitchPhase::NotifyFinished => {
                    self.sink.notify(SliderEvent::TransitioningFinished)
                }
            }

            if let Some(next) = sequence.advance() {
                self.queue.schedule(next);
            }
        }

        count
    }

    /// Run frames until nothing is scheduled; returns the number of frames
    pub fn flush(&mut self) -> usize {
        let mut frames = 0;
        while !self.queue.is_empty() {
            self.run_frame();
            frames += 1;
        }
        frames
    }

    pub fn has_pending_frames(&self) -> bool {
        !self.queue.is_empty()
    }

    fn execute_switch(&mut self, target: i64) {
        let Some(mut strategy) = self.switching.take() else {
            warn!(target, "No switching strategy set");
            return;
        };

        strategy.switch(self, target);
        self.switching = Some(strategy);
    }
}

impl ProjectorOps for Projector {
    fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    fn slides(&self, active_only: bool) -> Vec<&Slide> {
        Projector::slides(self, active_only)
    }

    fn slides_mut(&mut self) -> Vec<&mut Slide> {
        self.slides.values_mut().collect()
    }

    fn slide_length(&self) -> f64 {
        self.slide_length
    }

    fn offset_interval(&self) -> f64 {
        self.offset_interval
    }

    fn current_offset(&self) -> f64 {
        self.current_offset
    }

    fn current_slide_index(&self) -> i64 {
        self.current_slide_index
    }

    fn project(&mut self, offset: f64, shift: bool) {
        Projector::project(self, offset, shift);
    }

    fn set_offset(&mut self, offset: f64) {
        Projector::set_offset(self, offset);
    }

    fn set_current_slide(&mut self, index: i64) {
        Projector::set_current_slide(self, index);
    }

    fn set_current_slide_index(&mut self, index: i64) {
        Projector::set_current_slide_index(self, index);
    }
}

impl fmt::Debug for Projector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Projector")
            .field("runtime", &self.runtime)
            .field("slides", &self.slides.len())
            .field("current_offset", &self.current_offset)
            .field("current_slide_index", &self.current_slide_index)
            .field("slide_length", &self.slide_length)
            .field("offset_interval", &self.offset_interval)
            .field("switching", &self.switching_strategy_name())
            .field("projection", &self.projection_strategy_name())
            .field("pending", &self.queue.len())
            .field("frames_run", &self.queue.frames_run())
            .finish()
    }
}
