//! Pluggable index and offset resolvers.
//!
//! A projector always runs with one [`SwitchingStrategy`] (which slide does a
//! request land on) and one [`ProjectionStrategy`] (which offset actually gets
//! applied). Both only see the projector through [`ProjectorOps`].

pub mod projection;
pub mod switching;

use crate::config::ReplayStrategy;
use crate::runtime::Runtime;
use crate::slide::Slide;

pub use projection::{BoundedProjection, LoopProjection};
pub use switching::{ClampSwitching, LoopSwitching, ResetSwitching};

/// The part of the projector that strategies are allowed to drive
pub trait ProjectorOps {
    fn runtime(&self) -> &Runtime;

    /// All slides, or active ones only, in display order
    fn slides(&self, active_only: bool) -> Vec<&Slide>;

    /// Every slide, active or not, in display order
    fn slides_mut(&mut self) -> Vec<&mut Slide>;

    fn active_slide_count(&self) -> usize {
        self.slides(true).len()
    }

    fn slide_length(&self) -> f64;

    fn offset_interval(&self) -> f64;

    fn current_offset(&self) -> f64;

    fn current_slide_index(&self) -> i64;

    /// Project `offset`, or the current offset shifted by it
    fn project(&mut self, offset: f64, shift: bool);

    /// Record and apply the strip offset
    fn set_offset(&mut self, offset: f64);

    /// Reposition slides around the active slide at `index` (wrapped)
    fn set_current_slide(&mut self, index: i64);

    fn set_current_slide_index(&mut self, index: i64);
}

/// Resolves a requested logical index into the slide to show
pub trait SwitchingStrategy {
    fn name(&self) -> &'static str;

    fn switch(&mut self, projector: &mut dyn ProjectorOps, target: i64);
}

/// Resolves a requested pixel offset into what actually gets applied
pub trait ProjectionStrategy {
    fn name(&self) -> &'static str;

    fn project(&mut self, projector: &mut dyn ProjectorOps, offset: f64);
}

/// Strategy pair implementing a replay policy
pub fn for_replay(
    replay: ReplayStrategy,
) -> (Box<dyn SwitchingStrategy>, Box<dyn ProjectionStrategy>) {
    match replay {
        ReplayStrategy::None => (Box::new(ClampSwitching), Box::new(BoundedProjection)),
        ReplayStrategy::Loop => (Box::new(LoopSwitching), Box::new(LoopProjection::default())),
        ReplayStrategy::Rewind => (Box::new(ResetSwitching), Box::new(BoundedProjection)),
    }
}
