use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::{AutoplayConfig, HoverStrategy};
use crate::event::SliderEvent;
use crate::projector::Projector;
use crate::target::SwitchTarget;

/// Advances to the next slide on a fixed interval
///
/// A tick is skipped while the pointer hovers the slider (with the `pause`
/// hover strategy) and whenever something else moved the slider since the
/// previous automatic switch, so a manually chosen slide gets a full interval
/// on screen.
#[derive(Debug, Clone)]
pub struct Autoplay {
    interval: Option<Duration>,
    pause_on_hover: bool,
    paused: bool,
    next_due: Option<Instant>,
    /// Index requested by the last automatic switch
    last_set_index: Option<i64>,
    /// An automatic switch was scheduled and has not finished yet
    awaiting_result: bool,
}

impl Autoplay {
    pub fn new(config: &AutoplayConfig) -> Self {
        let interval = if config.interval_secs > 0.0 {
            Duration::try_from_secs_f64(config.interval_secs).ok()
        } else {
            None
        };

        Self {
            interval,
            pause_on_hover: config.hover_strategy == HoverStrategy::Pause,
            paused: false,
            next_due: None,
            last_set_index: None,
            awaiting_result: false,
        }
    }

    /// Configured interval, `None` when disabled
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    pub fn is_enabled(&self) -> bool {
        self.interval.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        self.next_due = None;
    }

    /// Our own switch is over once a transition finishes
    pub fn handle_event(&mut self, event: SliderEvent) {
        if event == SliderEvent::TransitioningFinished {
            self.awaiting_result = false;
        }
    }

    /// Run a tick if one is due at `now`; returns whether a switch was scheduled
    pub fn poll(&mut self, projector: &mut Projector, now: Instant, hovered: bool) -> bool {
        let Some(interval) = self.interval else {
            return false;
        };

        if self.paused {
            return false;
        }

        let due = *self.next_due.get_or_insert(now + interval);
        if now < due {
            return false;
        }

        self.next_due = Some(now + interval);
        self.tick(projector, hovered)
    }

    /// One interval elapsed
    pub fn tick(&mut self, projector: &mut Projector, hovered: bool) -> bool {
        if self.pause_on_hover && hovered {
            debug!("Autoplay tick skipped: hovered");
            return false;
        }

        let current = projector.current_slide_index();
        if let Some(last) = self.last_set_index {
            if !self.awaiting_result && last != current {
                debug!(last, current, "Autoplay tick skipped: slide changed externally");
                self.last_set_index = Some(current);
                return false;
            }
        }

        let target = SwitchTarget::Relative(1);
        self.last_set_index = Some(target.resolve(current));
        projector.switch_to(target);
        self.awaiting_result = true;
        true
    }
}
