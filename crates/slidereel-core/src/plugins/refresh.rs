use tracing::{debug, info};

use crate::event::SliderEvent;
use crate::projector::Projector;
use crate::target::SwitchTarget;

/// Brings the projector up to date after the host layout changed
///
/// Slide membership, container size and text direction are all re-read on
/// request. Slide rescans are refused while a transition is running, since
/// the transition itself is what changes slide state.
#[derive(Debug, Default)]
pub struct Refresh {
    transitioning: bool,
    last_is_rtl: bool,
}

impl Refresh {
    pub fn new(is_rtl: bool) -> Self {
        Self {
            transitioning: false,
            last_is_rtl: is_rtl,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Track transition boundaries
    pub fn handle_event(&mut self, event: SliderEvent) {
        match event {
            SliderEvent::TransitioningStarted => self.transitioning = true,
            SliderEvent::TransitioningFinished => self.transitioning = false,
            _ => {}
        }
    }

    /// Re-read slide membership and visibility
    ///
    /// Returns `false` when skipped because of a running transition.
    pub fn refresh_slides(&mut self, projector: &mut Projector) -> bool {
        if self.transitioning {
            debug!("Slide refresh skipped: transition in progress");
            return false;
        }

        projector.set_slides();

        if !projector.slides(true).is_empty() {
            projector.set_dimensions();

            // No current slide yet (e.g. everything was hidden): fall back to the first
            let index = projector.current_active_position().unwrap_or(0);
            projector.switch_to(SwitchTarget::Absolute(index as i64));
        }

        projector.notify(SliderEvent::SlidesUpdated);
        true
    }

    /// Re-measure after the container was resized
    pub fn refresh_dimensions(&mut self, projector: &mut Projector) {
        projector.set_dimensions();
        projector.switch_to(SwitchTarget::Relative(0));
    }

    /// Apply a new text direction; returns whether it differed
    pub fn refresh_direction(&mut self, projector: &mut Projector, is_rtl: bool) -> bool {
        if self.last_is_rtl == is_rtl {
            return false;
        }

        info!(is_rtl, "Text direction changed");
        self.last_is_rtl = is_rtl;
        projector.runtime_mut().set_is_rtl(is_rtl);
        projector.switch_to(SwitchTarget::Relative(0));
        true
    }
}
