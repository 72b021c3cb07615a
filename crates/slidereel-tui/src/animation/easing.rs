pub use slidereel_core::EasingType;

/// Map linear progress onto an easing curve
pub trait EasingTypeExt {
    /// `t` is clamped to `[0, 1]`; the result is in the same range
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => {
                if t >= 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
            EasingType::Linear => t,
            EasingType::Cubic => 1.0 - (1.0 - t).powi(3),
            EasingType::Quintic => 1.0 - (1.0 - t).powi(5),
            // 2^(-10t) never quite reaches zero
            EasingType::EaseOut if t >= 1.0 => 1.0,
            EasingType::EaseOut => 1.0 - 2.0_f64.powf(-10.0 * t),
        }
    }
}
