use std::fmt;

use indexmap::IndexMap;

use crate::event::SliderEvent;
use crate::host::SlideKey;
use crate::projector::Projector;

/// Label of an active slide relative to the current one
///
/// `current`, `current-p2` (two before), `current-n1` (one after).
pub fn position_label(position: i64) -> String {
    let distance = position.unsigned_abs();
    match position.signum() {
        -1 => format!("current-p{}", distance),
        1 => format!("current-n{}", distance),
        _ => "current".to_string(),
    }
}

/// Presentation state of a slider, ready to be rendered by a host
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideState {
    pub ready: bool,
    pub transitioning: bool,
    /// A drag gesture is moving the strip
    pub swiping: bool,
    /// Current slide is the first active one
    pub at_start: bool,
    /// Current slide is the last active one (and not also the first)
    pub at_end: bool,
    pub first: Option<SlideKey>,
    pub last: Option<SlideKey>,
    /// Position label per active slide
    pub positions: IndexMap<SlideKey, String>,
}

impl SlideState {
    pub fn label(&self, key: SlideKey) -> Option<&str> {
        self.positions.get(&key).map(String::as_str)
    }
}

impl fmt::Display for SlideState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.ready {
            flags.push("ready");
        }
        if self.transitioning {
            flags.push("transitioning");
        }
        if self.swiping {
            flags.push("swiping");
        }
        if self.at_start {
            flags.push("start");
        }
        if self.at_end {
            flags.push("end");
        }
        write!(f, "[{}]", flags.join(" "))
    }
}

/// Keeps [`SlideState`] in sync with slider events
///
/// Position labels are only recomputed when the current slide or the number
/// of active slides actually changed.
#[derive(Debug, Default)]
pub struct StateLabels {
    state: SlideState,
    last_current_position: Option<usize>,
    last_slide_count: usize,
}

impl StateLabels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SlideState {
        &self.state
    }

    /// Set by the slider when a drag starts or ends
    pub fn set_swiping(&mut self, swiping: bool) {
        self.state.swiping = swiping;
    }

    /// Returns whether position labels were recomputed
    pub fn handle_event(&mut self, event: SliderEvent, projector: &Projector) -> bool {
        match event {
            SliderEvent::SliderReady => self.state.ready = true,
            SliderEvent::TransitioningStarted => self.state.transitioning = true,
            SliderEvent::TransitioningFinished => self.state.transitioning = false,
            SliderEvent::CurrentSlideSet => return self.update_positions(projector),
            SliderEvent::SlidesUpdated => {}
        }
        false
    }

    fn update_positions(&mut self, projector: &Projector) -> bool {
        let slides = projector.slides(true);
        let Some(current) = slides.iter().position(|slide| slide.is_current()) else {
            return false;
        };

        if self.last_current_position == Some(current) && self.last_slide_count == slides.len() {
            return false;
        }

        self.last_current_position = Some(current);
        self.last_slide_count = slides.len();

        self.state.positions = slides
            .iter()
            .enumerate()
            .map(|(index, slide)| (slide.key(), position_label(index as i64 - current as i64)))
            .collect();

        self.state.at_start = current == 0;
        self.state.at_end = current != 0 && current == slides.len() - 1;
        self.state.first = slides.first().map(|slide| slide.key());
        self.state.last = slides.last().map(|slide| slide.key());

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::NullSink;
    use crate::host::MemoryContainer;
    use crate::runtime::Runtime;

    fn projector(count: usize) -> Projector {
        let container = MemoryContainer::with_slides(count, 100.0, 100.0);
        let runtime = Runtime::new(container, false, true);
        Projector::new(runtime, NullSink).unwrap()
    }

    #[test]
    fn test_position_labels() {
        assert_eq!(position_label(0), "current");
        assert_eq!(position_label(-2), "current-p2");
        assert_eq!(position_label(3), "current-n3");
    }

    #[test]
    fn test_labels_follow_current_slide() {
        let mut projector = projector(4);
        let mut labels = StateLabels::new();

        projector.set_current_slide(1);
        assert!(labels.handle_event(SliderEvent::CurrentSlideSet, &projector));

        let state = labels.state();
        assert_eq!(state.label(SlideKey(0)), Some("current-p1"));
        assert_eq!(state.label(SlideKey(1)), Some("current"));
        assert_eq!(state.label(SlideKey(3)), Some("current-n2"));
        assert!(!state.at_start);
        assert!(!state.at_end);
        assert_eq!(state.first, Some(SlideKey(0)));
        assert_eq!(state.last, Some(SlideKey(3)));
    }

    #[test]
    fn test_unchanged_current_is_not_recomputed() {
        let mut projector = projector(3);
        let mut labels = StateLabels::new();

        projector.set_current_slide(0);
        assert!(labels.handle_event(SliderEvent::CurrentSlideSet, &projector));
        assert!(labels.state().at_start);

        projector.set_current_slide(3);
        assert!(!labels.handle_event(SliderEvent::CurrentSlideSet, &projector));

        projector.set_current_slide(2);
        assert!(labels.handle_event(SliderEvent::CurrentSlideSet, &projector));
        assert!(labels.state().at_end);
        assert!(!labels.state().at_start);
    }

    #[test]
    fn test_single_slide_is_start_only() {
        let mut projector = projector(1);
        let mut labels = StateLabels::new();

        projector.set_current_slide(0);
        labels.handle_event(SliderEvent::CurrentSlideSet, &projector);

        assert!(labels.state().at_start);
        assert!(!labels.state().at_end);
    }

    #[test]
    fn test_no_current_slide_keeps_state() {
        let projector = projector(2);
        let mut labels = StateLabels::new();

        assert!(!labels.handle_event(SliderEvent::CurrentSlideSet, &projector));
        assert!(labels.state().positions.is_empty());
    }

    #[test]
    fn test_swiping_flag() {
        let mut labels = StateLabels::new();

        labels.set_swiping(true);
        assert_eq!(labels.state().to_string(), "[swiping]");

        labels.set_swiping(false);
        assert!(!labels.state().swiping);
        assert_eq!(labels.state().to_string(), "[]");
    }

    #[test]
    fn test_lifecycle_flags() {
        let projector = projector(2);
        let mut labels = StateLabels::new();

        labels.handle_event(SliderEvent::SliderReady, &projector);
        labels.handle_event(SliderEvent::TransitioningStarted, &projector);
        assert_eq!(labels.state().to_string(), "[ready transitioning]");

        labels.handle_event(SliderEvent::TransitioningFinished, &projector);
        assert!(labels.state().ready);
        assert!(!labels.state().transitioning);
    }
}
