use tracing::debug;

use crate::config::SwipeConfig;
use crate::event::SliderEvent;
use crate::projector::Projector;
use crate::target::SwitchTarget;

/// Turns pointer drags along the layout axis into strip movement
///
/// While dragging, movement is projected relative to the current offset. Once
/// the drag covers more than the transition threshold the gesture ends and
/// becomes a switch to the neighbouring slide.
#[derive(Debug, Clone)]
pub struct Swipe {
    config: SwipeConfig,
    start_position: Option<f64>,
    last_position: Option<f64>,
    /// Sign that makes "towards the next slide" negative
    rtl_coefficient: f64,
}

impl Swipe {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            start_position: None,
            last_position: None,
            rtl_coefficient: 0.0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn is_swiping(&self) -> bool {
        self.start_position.is_some()
    }

    /// Pointer pressed at `position` (along the layout axis)
    pub fn start(&mut self, projector: &mut Projector, position: f64) {
        if !self.config.enabled {
            return;
        }

        self.start_position = Some(position);
        self.last_position = Some(position);
        self.rtl_coefficient = -f64::from(projector.runtime().direction_coefficient());
        projector.notify(SliderEvent::TransitioningStarted);
    }

    /// Pointer moved to `position`
    pub fn progress(&mut self, projector: &mut Projector, position: f64) {
        let (Some(start), Some(last)) = (self.start_position, self.last_position) else {
            return;
        };

        let movement = position - last;
        let distance = position - start;
        let threshold = self.config.transition_threshold;

        if threshold > 0.0 && distance.abs() > threshold {
            self.end(projector);

            let is_next_slide = distance * self.rtl_coefficient < 0.0;
            debug!(distance, is_next_slide, "Swipe completed");
            projector.switch_to(SwitchTarget::Relative(if is_next_slide { 1 } else { -1 }));
            return;
        }

        self.last_position = Some(position);
        projector.project(movement * self.config.distance_multiplier, true);
    }

    /// Pointer released or left the slider
    pub fn end(&mut self, projector: &mut Projector) {
        if self.start_position.take().is_none() {
            return;
        }

        self.last_position = None;
        projector.notify(SliderEvent::TransitioningFinished);
    }
}
