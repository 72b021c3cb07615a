use tracing::debug;

use super::{ProjectionStrategy, ProjectorOps};
use crate::modulo::modulo;

/// Projects only offsets where real slides exist
///
/// Requests outside `[0, interval]` (horizontal RTL) or `[-interval, 0]`
/// (everything else) are rejected outright, not clamped.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoundedProjection;

impl ProjectionStrategy for BoundedProjection {
    fn name(&self) -> &'static str {
        "bounded"
    }

    fn project(&mut self, projector: &mut dyn ProjectorOps, offset: f64) {
        let runtime = projector.runtime();
        let is_positive = runtime.is_rtl() && runtime.is_horizontal();
        let interval = projector.offset_interval();
        let (min, max) = if is_positive {
            (0.0, interval)
        } else {
            (-interval, 0.0)
        };

        if offset < min || offset > max {
            debug!(offset, min, max, "Projection rejected: out of bounds");
            return;
        }

        projector.set_offset(offset);
    }
}

/// Projects virtual offsets beyond the real slides
///
/// The strip is allowed to move without bounds. Whichever real slide should be
/// visible at the requested offset gets its own corrective displacement, so a
/// fixed set of slides appears to repeat forever.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoopProjection {
    /// Offset applied by the previous call
    last_offset: f64,
}

impl LoopProjection {
    pub fn last_offset(&self) -> f64 {
        self.last_offset
    }
}

impl ProjectionStrategy for LoopProjection {
    fn name(&self) -> &'static str {
        "loop"
    }

    fn project(&mut self, projector: &mut dyn ProjectorOps, offset: f64) {
        let axis = projector.runtime().axis();
        let coefficient = f64::from(projector.runtime().direction_coefficient());

        // Prime hidden slides so they sit in their natural place once shown again
        for slide in projector.slides_mut() {
            if !slide.is_active() {
                slide.set_offset(0.0, axis);
            }
        }

        let count = projector.active_slide_count() as i64;
        if count == 0 {
            return;
        }

        let slide_length = projector.slide_length();
        let is_forward = offset * coefficient > self.last_offset * coefficient;
        let covered_slide_count = offset * coefficient / slide_length;

        if !covered_slide_count.is_finite() {
            debug!(offset, slide_length, "Loop projection abandoned: no slide length");
            return;
        }

        // Rounding towards the movement avoids flicker right at slide boundaries
        let virtual_index = if is_forward {
            covered_slide_count.ceil()
        } else {
            covered_slide_count.floor()
        } as i64;

        let Some(real_index) = modulo(virtual_index, count) else {
            return;
        };

        let correction = (real_index - virtual_index) as f64 * slide_length * coefficient;

        if let Some(slide) = projector
            .slides_mut()
            .into_iter()
            .filter(|slide| slide.is_active())
            .nth(real_index as usize)
        {
            slide.set_offset(correction, axis);
        }

        debug!(offset, virtual_index, real_index, correction, "Loop projection");

        projector.set_offset(offset);
        self.last_offset = offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::testing::RecordingProjector;

    #[test]
    fn test_bounded_accepts_in_range() {
        let mut projector = RecordingProjector::ltr(2, 100.0);
        BoundedProjection.project(&mut projector, 0.0);
        BoundedProjection.project(&mut projector, -100.0);
        assert_eq!(projector.offsets_set(), vec![0.0, -100.0]);
    }

    #[test]
    fn test_bounded_rejects_out_of_range() {
        let mut projector = RecordingProjector::ltr(2, 100.0);
        BoundedProjection.project(&mut projector, 200.0);
        BoundedProjection.project(&mut projector, -200.0);
        BoundedProjection.project(&mut projector, 0.5);
        assert!(projector.offsets_set().is_empty());
    }

    #[test]
    fn test_bounded_rtl_range_is_positive() {
        let mut projector = RecordingProjector::new(2, 100.0, true, true);
        BoundedProjection.project(&mut projector, 100.0);
        BoundedProjection.project(&mut projector, -100.0);
        assert_eq!(projector.offsets_set(), vec![100.0]);
    }

    #[test]
    fn test_bounded_vertical_ignores_rtl() {
        let mut projector = RecordingProjector::new(2, 100.0, true, false);
        BoundedProjection.project(&mut projector, -100.0);
        BoundedProjection.project(&mut projector, 100.0);
        assert_eq!(projector.offsets_set(), vec![-100.0]);
    }

    #[test]
    fn test_loop_corrects_real_slide() {
        let mut projector = RecordingProjector::ltr(3, 100.0);
        let mut strategy = LoopProjection::default();

        strategy.project(&mut projector, -800.0);

        assert_eq!(projector.offsets_set(), vec![-800.0]);
        assert_eq!(projector.slides[2].offset(), 600.0);
        assert_eq!(projector.elements[2].offset(), 600.0);
        assert_eq!(projector.elements[0].offset_writes(), 0);
        assert_eq!(projector.elements[1].offset_writes(), 0);
        assert_eq!(strategy.last_offset(), -800.0);
    }

    #[test]
    fn test_loop_backward_rounds_down() {
        let mut projector = RecordingProjector::ltr(3, 100.0);
        let mut strategy = LoopProjection::default();

        // One slide before the first: slide 2 is placed at virtual index -1
        strategy.project(&mut projector, 100.0);

        assert_eq!(projector.offsets_set(), vec![100.0]);
        assert_eq!(projector.slides[2].offset(), -300.0);
    }

    #[test]
    fn test_loop_direction_dependent_rounding() {
        let mut projector = RecordingProjector::ltr(3, 100.0);
        let mut strategy = LoopProjection::default();

        // Moving forward half-way into virtual slide 3 shows real slide 0 there
        strategy.project(&mut projector, -250.0);
        assert_eq!(projector.slides[0].offset(), 300.0);

        // Moving back from there rounds down to virtual slide 2, which is real
        strategy.project(&mut projector, -240.0);
        assert_eq!(projector.slides[2].offset(), 0.0);
    }

    #[test]
    fn test_loop_resets_inactive_slides() {
        let mut projector = RecordingProjector::ltr(3, 100.0);
        let mut strategy = LoopProjection::default();

        strategy.project(&mut projector, -300.0);
        assert_eq!(projector.slides[0].offset(), 300.0);

        projector.hide(0);
        strategy.project(&mut projector, -100.0);

        assert_eq!(projector.slides[0].offset(), 0.0);
    }

    #[test]
    fn test_loop_without_active_slides() {
        let mut projector = RecordingProjector::ltr(2, 100.0);
        projector.hide(0);
        projector.hide(1);

        let mut strategy = LoopProjection::default();
        strategy.project(&mut projector, -100.0);

        assert!(projector.offsets_set().is_empty());
        assert_eq!(strategy.last_offset(), 0.0);
    }

    #[test]
    fn test_loop_zero_length_abandons() {
        let mut projector = RecordingProjector::ltr(3, 0.0);
        let mut strategy = LoopProjection::default();
        strategy.project(&mut projector, -100.0);
        assert!(projector.offsets_set().is_empty());
    }

    #[test]
    fn test_loop_rtl() {
        let mut projector = RecordingProjector::new(3, 100.0, true, true);
        let mut strategy = LoopProjection::default();

        strategy.project(&mut projector, 400.0);

        // Virtual index 4 maps to real slide 1, pulled back by 3 slide lengths
        assert_eq!(projector.slides[1].offset(), -300.0);
        assert_eq!(projector.offsets_set(), vec![400.0]);
    }
}
