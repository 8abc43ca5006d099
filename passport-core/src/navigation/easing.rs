//! Easing curves for the settle animation.

use std::fmt;

/// Easing function type for animations
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EasingKind {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// `1 - (1 - t)^(2 * factor)`; factor 1.0 equals [`EasingKind::EaseOut`].
    Decelerate(f32),
}

impl Default for EasingKind {
    fn default() -> Self {
        Self::decelerate()
    }
}

impl EasingKind {
    /// Decelerate curve with the stock factor.
    pub const fn decelerate() -> Self {
        Self::Decelerate(crate::constants::navigation::DECELERATE_FACTOR)
    }

    /// Map linear progress `t` in `[0, 1]` onto the curve. Endpoints are
    /// fixed: `apply(0) == 0`, `apply(1) == 1`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
            Self::Decelerate(factor) => decelerate(t, factor),
        }
    }

    /// Parse a config name: `linear`, `ease-in`, `ease-out`, `ease-in-out`,
    /// `decelerate`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "linear" => Some(Self::Linear),
            "ease-in" | "ease_in" => Some(Self::EaseIn),
            "ease-out" | "ease_out" => Some(Self::EaseOut),
            "ease-in-out" | "ease_in_out" => Some(Self::EaseInOut),
            "decelerate" => Some(Self::decelerate()),
            _ => None,
        }
    }
}

fn decelerate(t: f32, factor: f32) -> f32 {
    if factor == 1.0 {
        1.0 - (1.0 - t) * (1.0 - t)
    } else {
        1.0 - (1.0 - t).powf(2.0 * factor)
    }
}

impl fmt::Display for EasingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::EaseIn => write!(f, "Ease In"),
            Self::EaseOut => write!(f, "Ease Out"),
            Self::EaseInOut => write!(f, "Ease In/Out"),
            Self::Decelerate(factor) => write!(f, "Decelerate({factor})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        for kind in [
            EasingKind::Linear,
            EasingKind::EaseIn,
            EasingKind::EaseOut,
            EasingKind::EaseInOut,
            EasingKind::Decelerate(2.0),
            EasingKind::Decelerate(1.0),
        ] {
            assert_eq!(kind.apply(0.0), 0.0, "{kind}");
            assert_eq!(kind.apply(1.0), 1.0, "{kind}");
        }
    }

    #[test]
    fn decelerate_front_loads_motion() {
        let halfway = EasingKind::Decelerate(2.0).apply(0.5);
        assert!((halfway - 0.9375).abs() < 1e-6);
        assert!(halfway > EasingKind::EaseOut.apply(0.5));
        assert_eq!(EasingKind::Decelerate(1.0).apply(0.5), 0.75);
    }

    #[test]
    fn names() {
        assert_eq!(EasingKind::from_name("Ease-Out"), Some(EasingKind::EaseOut));
        assert_eq!(
            EasingKind::from_name("decelerate"),
            Some(EasingKind::Decelerate(2.0))
        );
        assert_eq!(EasingKind::default(), EasingKind::Decelerate(2.0));
        assert_eq!(EasingKind::from_name("bounce"), None);
    }
}
