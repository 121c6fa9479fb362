//! Motion palette
//!
//! Every choreography draws its curves and timings from these small fixed
//! palettes so the page moves with one consistent rhythm.

use crate::easing::Easing;
use crate::scroll::{Edge, TriggerPoint};

/// Named easing families
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EasePreset {
    /// Light deceleration (ease-out-quad)
    Soft,
    /// Deeper deceleration (ease-out-cubic)
    Gentle,
    /// Sinusoidal in-out for breathing loops
    Breath,
}

impl EasePreset {
    pub const fn easing(self) -> Easing {
        match self {
            EasePreset::Soft => Easing::EaseOutQuad,
            EasePreset::Gentle => Easing::EaseOutCubic,
            EasePreset::Breath => Easing::EaseInOutSine,
        }
    }
}

impl From<EasePreset> for Easing {
    fn from(preset: EasePreset) -> Self {
        preset.easing()
    }
}

/// Named durations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DurationPreset {
    Quick,
    Normal,
    Slow,
}

impl DurationPreset {
    pub const fn ms(self) -> u32 {
        match self {
            DurationPreset::Quick => 800,
            DurationPreset::Normal => 1200,
            DurationPreset::Slow => 1500,
        }
    }
}

/// Defaults shared by one-shot scroll reveals
pub struct ScrollDefaults;

impl ScrollDefaults {
    /// Element top crossing 75% of the viewport height
    pub const START: TriggerPoint = TriggerPoint::new_unchecked(Edge::Top, 0.75);
    pub const ONCE: bool = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_values() {
        assert_eq!(DurationPreset::Quick.ms(), 800);
        assert_eq!(DurationPreset::Normal.ms(), 1200);
        assert_eq!(DurationPreset::Slow.ms(), 1500);
        assert_eq!(Easing::from(EasePreset::Breath), Easing::EaseInOutSine);
    }

    #[test]
    fn test_scroll_defaults() {
        assert_eq!(ScrollDefaults::START.edge, Edge::Top);
        assert_eq!(ScrollDefaults::START.fraction, 0.75);
        assert!(ScrollDefaults::ONCE);
    }
}
