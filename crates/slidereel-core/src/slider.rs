//! A projector wired up with its collaborators.

use std::rc::Rc;
use std::time::Instant;

use tracing::info;

use crate::config::{AppConfig, ReplayStrategy};
use crate::event::{EventLog, EventSink, SliderEvent};
use crate::host::Container;
use crate::plugins::{Autoplay, Refresh, SlideState, StateLabels, Swipe};
use crate::projector::Projector;
use crate::runtime::Runtime;
use crate::strategy::{for_replay, ProjectorOps};
use crate::target::SwitchTarget;
use crate::Result;

/// Sink that keeps a copy of every event for the slider's own collaborators
struct Tap {
    log: EventLog,
    inner: Box<dyn EventSink>,
}

impl EventSink for Tap {
    fn notify(&mut self, event: SliderEvent) {
        self.log.notify(event);
        self.inner.notify(event);
    }
}

pub struct Slider {
    projector: Projector,
    events: EventLog,
    replay: ReplayStrategy,
    refresh: Refresh,
    swipe: Swipe,
    autoplay: Autoplay,
    labels: StateLabels,
}

impl Slider {
    /// Build a slider over `container` and schedule the initial switch
    ///
    /// Every event is also passed on to `sink`.
    pub fn new(
        container: Rc<dyn Container>,
        config: &AppConfig,
        sink: impl EventSink + 'static,
    ) -> Result<Self> {
        let is_rtl = config.slider.rtl.unwrap_or_else(|| container.is_rtl());
        let runtime = Runtime::new(container, is_rtl, config.slider.orientation.is_horizontal());

        let events = EventLog::new();
        let tap = Tap {
            log: events.clone(),
            inner: Box::new(sink),
        };

        let mut projector = Projector::new(runtime, tap)?;
        let replay = config.slider.replay_strategy;
        let (switching, projection) = for_replay(replay);
        projector.set_switching_strategy(switching);
        projector.set_projection_strategy(projection);

        let mut slider = Self {
            projector,
            events,
            replay,
            refresh: Refresh::new(is_rtl),
            swipe: Swipe::new(config.swipe.clone()),
            autoplay: Autoplay::new(&config.autoplay),
            labels: StateLabels::new(),
        };

        slider
            .projector
            .switch_to(SwitchTarget::from(config.slider.initial_slide_index));
        slider.projector.notify(SliderEvent::SliderReady);
        slider.dispatch();

        info!(
            replay = %replay,
            slides = slider.projector.slides(false).len(),
            "Slider ready"
        );

        Ok(slider)
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn projector_mut(&mut self) -> &mut Projector {
        &mut self.projector
    }

    pub fn state(&self) -> &SlideState {
        self.labels.state()
    }

    pub fn replay(&self) -> ReplayStrategy {
        self.replay
    }

    pub fn autoplay(&self) -> &Autoplay {
        &self.autoplay
    }

    pub fn is_swiping(&self) -> bool {
        self.swipe.is_swiping()
    }

    pub fn is_transitioning(&self) -> bool {
        self.refresh.is_transitioning()
    }

    /// Swap the strategy pair and settle on the current slide
    ///
    /// Loop corrections are cleared, and the logical index is brought back
    /// to the current slide's position.
    pub fn set_replay(&mut self, replay: ReplayStrategy) {
        if replay == self.replay {
            return;
        }

        let axis = self.projector.runtime().axis();
        for slide in self.projector.slides_mut() {
            slide.set_offset(0.0, axis);
        }

        let (switching, projection) = for_replay(replay);
        self.projector.set_switching_strategy(switching);
        self.projector.set_projection_strategy(projection);

        let index = self.projector.current_active_position().unwrap_or(0) as i64;
        self.projector.set_current_slide_index(index);
        self.projector.switch_to(SwitchTarget::Absolute(index));

        info!(from = %self.replay, to = %replay, "Replay strategy changed");
        self.replay = replay;
    }

    pub fn switch(&mut self, target: &str) {
        self.projector.switch(target);
    }

    pub fn switch_to(&mut self, target: SwitchTarget) {
        self.projector.switch_to(target);
    }

    /// Run one repaint frame and let collaborators see its events
    pub fn run_frame(&mut self) -> usize {
        let count = self.projector.run_frame();
        self.dispatch();
        count
    }

    pub fn flush(&mut self) -> usize {
        let mut frames = 0;
        while self.projector.has_pending_frames() {
            self.run_frame();
            frames += 1;
        }
        frames
    }

    pub fn refresh_slides(&mut self) -> bool {
        let refreshed = self.refresh.refresh_slides(&mut self.projector);
        self.dispatch();
        refreshed
    }

    pub fn refresh_dimensions(&mut self) {
        self.refresh.refresh_dimensions(&mut self.projector);
        self.dispatch();
    }

    pub fn refresh_direction(&mut self, is_rtl: bool) -> bool {
        let changed = self.refresh.refresh_direction(&mut self.projector, is_rtl);
        self.dispatch();
        changed
    }

    pub fn swipe_start(&mut self, position: f64) {
        self.swipe.start(&mut self.projector, position);
        self.labels.set_swiping(self.swipe.is_swiping());
        self.dispatch();
    }

    pub fn swipe_progress(&mut self, position: f64) {
        self.swipe.progress(&mut self.projector, position);
        self.labels.set_swiping(self.swipe.is_swiping());
        self.dispatch();
    }

    pub fn swipe_end(&mut self) {
        self.swipe.end(&mut self.projector);
        self.labels.set_swiping(self.swipe.is_swiping());
        self.dispatch();
    }

    /// Advance automatically if an interval elapsed
    pub fn poll_autoplay(&mut self, now: Instant, hovered: bool) -> bool {
        self.autoplay.poll(&mut self.projector, now, hovered)
    }

    pub fn toggle_autoplay(&mut self) -> bool {
        let paused = !self.autoplay.is_paused();
        self.autoplay.set_paused(paused);
        !paused
    }

    fn dispatch(&mut self) {
        for event in self.events.take() {
            self.refresh.handle_event(event);
            self.labels.handle_event(event, &self.projector);
            self.autoplay.handle_event(event);
        }
    }
}
