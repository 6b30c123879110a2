/// Easing curves used to map normalized animation progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Linear interpolation (flat velocity).
    Linear,
    /// Cubic Hermite `x^2 (3 - 2x)`.
    Smoothstep,
    /// Quintic `x^3 (x (6x - 15) + 10)`; zero first and second derivative at both ends.
    #[default]
    Smootherstep,
}

impl Ease {
    /// Apply this easing function to normalized progress `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let x = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => x,
            Self::Smoothstep => x * x * (3.0 - 2.0 * x),
            Self::Smootherstep => x * x * x * (x * (x * 6.0 - 15.0) + 10.0),
        }
    }

    /// Eased progress of `value` through the interval `[a, b]`.
    pub fn between(self, a: f64, b: f64, value: f64) -> f64 {
        self.apply(progress(a, b, value))
    }
}

/// Eased progress of `value` through `[a, b]` using the quintic curve.
pub fn smootherstep(a: f64, b: f64, value: f64) -> f64 {
    Ease::Smootherstep.between(a, b, value)
}

// A zero-width interval degenerates to a step at `b`.
fn progress(a: f64, b: f64, value: f64) -> f64 {
    if b == a {
        return if value >= b { 1.0 } else { 0.0 };
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
