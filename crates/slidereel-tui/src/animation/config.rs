use std::time::Duration;

pub use slidereel_core::AnimationConfig;

/// Time-based views of [`AnimationConfig`]
pub trait AnimationConfigExt {
    /// Length of one strip transition
    fn transition_duration(&self) -> Duration;

    /// Redraw interval while a transition runs
    fn frame_interval(&self) -> Duration;

    /// Whether strip movement is animated at all
    fn is_smooth(&self) -> bool;
}

impl AnimationConfigExt for AnimationConfig {
    #[inline]
    fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    fn frame_interval(&self) -> Duration {
        match self.animation_fps {
            0 => Duration::from_millis(16),
            fps => Duration::from_millis(1000 / u64::from(fps)).max(Duration::from_millis(1)),
        }
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_interval() {
        let mut config = AnimationConfig::default();
        assert_eq!(config.frame_interval(), Duration::from_millis(16));

        config.animation_fps = 0;
        assert_eq!(config.frame_interval(), Duration::from_millis(16));

        config.animation_fps = 5000;
        assert_eq!(config.frame_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_zero_duration_is_not_smooth() {
        let mut config = AnimationConfig::default();
        assert!(config.is_smooth());
        assert_eq!(config.transition_duration(), Duration::from_millis(250));

        config.animation_duration_ms = 0;
        assert!(!config.is_smooth());

        config.animation_duration_ms = 100;
        config.smooth_enabled = false;
        assert!(!config.is_smooth());
    }
}
