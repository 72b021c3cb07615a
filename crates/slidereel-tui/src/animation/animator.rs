use std::time::{Duration, Instant};

use super::config::{AnimationConfig, AnimationConfigExt};
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};

#[derive(Debug, Clone)]
struct Tween {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

impl Tween {
    fn value_at(&self, now: Instant) -> f64 {
        let t = progress(self.start, now, self.duration);
        lerp(self.from, self.to, self.easing.apply(t))
    }
}

/// Follows the projector's strip offset with an eased transition
///
/// Feed it the latest target with [`OffsetAnimator::animate_to`] (or
/// [`OffsetAnimator::jump_to`] while the strip is dragged), then call
/// [`OffsetAnimator::update`] once per frame and draw at the returned offset.
/// Retargeting mid-flight starts the next transition from the currently
/// displayed offset.
#[derive(Debug, Clone)]
pub struct OffsetAnimator {
    tween: Option<Tween>,
    config: AnimationConfig,
    current: f64,
}

impl OffsetAnimator {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            tween: None,
            config,
            current: 0.0,
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Offset the animator is heading to
    pub fn target(&self) -> f64 {
        self.tween.as_ref().map_or(self.current, |tween| tween.to)
    }

    /// Offset to draw right now
    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Show `offset` immediately
    pub fn jump_to(&mut self, offset: f64) {
        self.tween = None;
        self.current = offset;
    }

    /// Head towards `offset`, starting at `now`
    ///
    /// A target equal to the one already pursued is a no-op, so calling this
    /// every frame with an unchanged offset does not restart the transition.
    pub fn animate_to(&mut self, offset: f64, now: Instant) {
        if offset == self.target() {
            return;
        }

        if !self.config.is_smooth() || !offset.is_finite() {
            self.jump_to(offset);
            return;
        }

        self.tween = Some(Tween {
            start: now,
            from: self.current,
            to: offset,
            duration: self.config.transition_duration(),
            easing: self.config.easing,
        });
    }

    /// Advance to `now` and return the offset to draw
    pub fn update(&mut self, now: Instant) -> f64 {
        if let Some(tween) = &self.tween {
            if is_complete(tween.start, now, tween.duration) {
                self.current = tween.to;
                self.tween = None;
            } else {
                self.current = tween.value_at(now);
            }
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(duration_ms: u64) -> OffsetAnimator {
        OffsetAnimator::new(AnimationConfig {
            animation_duration_ms: duration_ms,
            easing: EasingType::Linear,
            ..Default::default()
        })
    }

    #[test]
    fn test_jump_when_not_smooth() {
        let mut animator = OffsetAnimator::new(AnimationConfig {
            smooth_enabled: false,
            ..Default::default()
        });

        animator.animate_to(-200.0, Instant::now());
        assert!(!animator.is_animating());
        assert_eq!(animator.current(), -200.0);
    }

    #[test]
    fn test_linear_transition() {
        let mut animator = linear(100);
        let start = Instant::now();

        animator.animate_to(-100.0, start);
        assert!(animator.is_animating());
        assert_eq!(animator.target(), -100.0);

        let half = animator.update(start + Duration::from_millis(50));
        assert!((half + 50.0).abs() < 1e-6);

        assert_eq!(animator.update(start + Duration::from_millis(100)), -100.0);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_same_target_does_not_restart() {
        let mut animator = linear(100);
        let start = Instant::now();

        animator.animate_to(-100.0, start);
        animator.animate_to(-100.0, start + Duration::from_millis(90));

        assert_eq!(animator.update(start + Duration::from_millis(100)), -100.0);
    }

    #[test]
    fn test_retarget_starts_from_displayed_offset() {
        let mut animator = linear(100);
        let start = Instant::now();

        animator.animate_to(-100.0, start);
        animator.update(start + Duration::from_millis(50));

        let later = start + Duration::from_millis(50);
        animator.animate_to(100.0, later);
        let offset = animator.update(later + Duration::from_millis(50));
        assert!((offset - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_jump_cancels_transition() {
        let mut animator = linear(100);
        animator.animate_to(-100.0, Instant::now());
        animator.jump_to(-30.0);

        assert!(!animator.is_animating());
        assert_eq!(animator.target(), -30.0);
    }
}
