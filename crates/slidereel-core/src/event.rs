//! Notifications emitted by a slider, and the sinks that receive them.
//!
//! Every projector owns exactly one sink for its whole lifetime; nothing is
//! registered globally.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tokio::sync::mpsc;
use tracing::warn;

/// Events used by the slider to inform other components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliderEvent {
    /// Initial switch has been scheduled
    SliderReady,
    /// The slide collection was rescanned
    SlidesUpdated,
    /// Slide positions were re-derived around a new current slide
    CurrentSlideSet,
    /// A switch sequence started
    TransitioningStarted,
    /// A switch sequence finished
    TransitioningFinished,
}

impl fmt::Display for SliderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SliderEvent::SliderReady => "SLIDER_READY",
            SliderEvent::SlidesUpdated => "SLIDES_UPDATED",
            SliderEvent::CurrentSlideSet => "CURRENT_SLIDE_SET",
            SliderEvent::TransitioningStarted => "TRANSITIONING_STARTED",
            SliderEvent::TransitioningFinished => "TRANSITIONING_FINISHED",
        };
        f.write_str(name)
    }
}

/// Receiver of slider notifications
pub trait EventSink {
    fn notify(&mut self, event: SliderEvent);
}

/// Forward events to an async consumer (e.g. the UI loop)
impl EventSink for mpsc::UnboundedSender<SliderEvent> {
    fn notify(&mut self, event: SliderEvent) {
        if self.send(event).is_err() {
            warn!("Failed to send slider event {}: receiver dropped", event);
        }
    }
}

/// Sink that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&mut self, _event: SliderEvent) {}
}

/// Shared, append-only event record
///
/// Clones share the same log, so one handle can be given to the projector while
/// another is kept for inspection.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Rc<RefCell<Vec<SliderEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events
    pub fn events(&self) -> Vec<SliderEvent> {
        self.events.borrow().clone()
    }

    /// Remove and return recorded events
    pub fn take(&self) -> Vec<SliderEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn count(&self, event: SliderEvent) -> usize {
        self.events.borrow().iter().filter(|e| **e == event).count()
    }
}

impl EventSink for EventLog {
    fn notify(&mut self, event: SliderEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log_shares_state() {
        let log = EventLog::new();
        let mut sink = log.clone();

        sink.notify(SliderEvent::CurrentSlideSet);
        sink.notify(SliderEvent::CurrentSlideSet);

        assert_eq!(log.count(SliderEvent::CurrentSlideSet), 2);
        assert_eq!(log.take().len(), 2);
        assert!(log.events().is_empty());
    }

    #[tokio::test]
    async fn test_channel_sink() {
        let (mut tx, mut rx) = mpsc::unbounded_channel();

        tx.notify(SliderEvent::SliderReady);
        assert_eq!(rx.recv().await, Some(SliderEvent::SliderReady));

        drop(rx);
        // Receiver gone: must not panic
        tx.notify(SliderEvent::SlidesUpdated);
    }
}
