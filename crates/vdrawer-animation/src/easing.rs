/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

/// Settle curves. Every curve maps `[0, 1]` onto `[0, 1]` monotonically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    LinearEasing,
    /// `1 - (1 - t)^2`, a gentle deceleration.
    QuadraticOut,
    /// `1 + (t - 1)^5`, the curve platform drawers settle with.
    QuinticOut,
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        let fraction = fraction.clamp(0.0, 1.0);
        match self {
            Easing::LinearEasing => fraction,
            Easing::QuadraticOut => {
                let t = 1.0 - fraction;
                1.0 - t * t
            }
            Easing::QuinticOut => {
                let t = fraction - 1.0;
                t * t * t * t * t + 1.0
            }
        }
    }
}
