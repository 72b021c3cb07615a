use tracing::debug;

use super::{ProjectorOps, SwitchingStrategy};
use crate::modulo::modulo;

/// Project the slide at `index` and make it current
fn commit(projector: &mut dyn ProjectorOps, index: i64, project: bool) {
    if project {
        let coefficient = f64::from(projector.runtime().direction_coefficient());
        let offset = index as f64 * projector.slide_length() * coefficient;
        projector.project(offset, false);
    }

    // Always re-derive positions: the active set may have changed since the
    // previous switch even when the index did not.
    projector.set_current_slide(index);
    projector.set_current_slide_index(index);
}

fn clamp_index(target: i64, count: i64) -> i64 {
    if target < 0 {
        0
    } else if target >= count {
        count - 1
    } else {
        target
    }
}

/// Saturates at the first and last slide
#[derive(Debug, Default, Clone, Copy)]
pub struct ClampSwitching;

impl SwitchingStrategy for ClampSwitching {
    fn name(&self) -> &'static str {
        "clamp"
    }

    fn switch(&mut self, projector: &mut dyn ProjectorOps, target: i64) {
        let count = projector.active_slide_count() as i64;
        let index = clamp_index(target, count);

        debug!(target, index, count, "Clamp switch");
        commit(projector, index, true);
    }
}

/// Keeps the logical index unbounded; wraparound is left to the projection
#[derive(Debug, Default, Clone, Copy)]
pub struct LoopSwitching;

impl SwitchingStrategy for LoopSwitching {
    fn name(&self) -> &'static str {
        "loop"
    }

    fn switch(&mut self, projector: &mut dyn ProjectorOps, target: i64) {
        // A single slide has nowhere to move to
        let can_project = projector.active_slide_count() > 1;

        debug!(target, can_project, "Loop switch");
        commit(projector, target, can_project);
    }
}

/// Wraps out-of-range requests back into range with a jump
#[derive(Debug, Default, Clone, Copy)]
pub struct ResetSwitching;

impl SwitchingStrategy for ResetSwitching {
    fn name(&self) -> &'static str {
        "reset"
    }

    fn switch(&mut self, projector: &mut dyn ProjectorOps, target: i64) {
        let count = projector.active_slide_count() as i64;

        let Some(wrapped) = modulo(target, count) else {
            debug!(target, "Reset switch abandoned: no active slides");
            return;
        };

        let index = clamp_index(wrapped, count);

        debug!(target, index, count, "Reset switch");
        commit(projector, index, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::testing::{Call, RecordingProjector};

    fn expected(offset: f64, index: i64) -> Vec<Call> {
        vec![
            Call::Project(offset, false),
            Call::SetCurrentSlide(index),
            Call::SetCurrentSlideIndex(index),
        ]
    }

    #[test]
    fn test_clamp_saturates_at_edges() {
        let mut projector = RecordingProjector::ltr(3, 100.0);
        ClampSwitching.switch(&mut projector, -5);
        assert_eq!(projector.calls, expected(0.0, 0));

        let mut projector = RecordingProjector::ltr(3, 100.0);
        ClampSwitching.switch(&mut projector, 10);
        assert_eq!(projector.calls, expected(-200.0, 2));
    }

    #[test]
    fn test_clamp_in_range() {
        let mut projector = RecordingProjector::ltr(3, 100.0);
        ClampSwitching.switch(&mut projector, 1);
        assert_eq!(projector.calls, expected(-100.0, 1));
    }

    #[test]
    fn test_clamp_rtl_offsets_are_positive() {
        let mut projector = RecordingProjector::new(3, 100.0, true, true);
        ClampSwitching.switch(&mut projector, 2);
        assert_eq!(projector.calls, expected(200.0, 2));
    }

    #[test]
    fn test_clamp_counts_active_slides_only() {
        let mut projector = RecordingProjector::ltr(4, 100.0);
        projector.hide(3);
        ClampSwitching.switch(&mut projector, 7);
        assert_eq!(projector.calls, expected(-200.0, 2));
    }

    #[test]
    fn test_loop_keeps_index_unbounded() {
        let mut projector = RecordingProjector::ltr(3, 100.0);
        LoopSwitching.switch(&mut projector, -1);
        assert_eq!(projector.calls, expected(100.0, -1));

        let mut projector = RecordingProjector::ltr(3, 100.0);
        LoopSwitching.switch(&mut projector, 4);
        assert_eq!(projector.calls, expected(-400.0, 4));
    }

    #[test]
    fn test_loop_single_slide_skips_projection() {
        let mut projector = RecordingProjector::ltr(1, 100.0);
        LoopSwitching.switch(&mut projector, 3);
        assert_eq!(
            projector.calls,
            vec![Call::SetCurrentSlide(3), Call::SetCurrentSlideIndex(3)]
        );
    }

    #[test]
    fn test_reset_wraps_with_jump() {
        let mut projector = RecordingProjector::ltr(3, 100.0);
        ResetSwitching.switch(&mut projector, -1);
        assert_eq!(projector.calls, expected(-200.0, 2));

        let mut projector = RecordingProjector::ltr(3, 100.0);
        ResetSwitching.switch(&mut projector, 4);
        assert_eq!(projector.calls, expected(-100.0, 1));
    }

    #[test]
    fn test_reset_without_slides_does_nothing() {
        let mut projector = RecordingProjector::ltr(0, 100.0);
        ResetSwitching.switch(&mut projector, 4);
        assert!(projector.calls.is_empty());
    }

    #[test]
    fn test_vertical_ignores_rtl() {
        let mut projector = RecordingProjector::new(3, 50.0, true, false);
        ClampSwitching.switch(&mut projector, 1);
        assert_eq!(projector.calls, expected(-50.0, 1));
    }
}
