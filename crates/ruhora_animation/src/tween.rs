//! Property tweens
//!
//! A tween drives a subset of an element's [`VisualState`] from a start value
//! to an end value over time. `to` tweens read their start values from the
//! scene when their delay elapses; `from_to` tweens carry explicit start values
//! that are painted as soon as the tween is scheduled.

use crate::easing::Easing;
use ruhora_core::{ElementId, Height, Scene, VisualState};

/// Properties a tween can animate. `None` leaves the property untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Props {
    pub opacity: Option<f32>,
    pub translate_y: Option<f32>,
    pub scale: Option<f32>,
    pub elevation: Option<f32>,
    /// Pixel height
    pub height: Option<f32>,
}

impl Props {
    pub fn opacity(value: f32) -> Self {
        Self::default().with_opacity(value)
    }

    pub fn translate_y(value: f32) -> Self {
        Self::default().with_translate_y(value)
    }

    pub fn scale(value: f32) -> Self {
        Self::default().with_scale(value)
    }

    pub fn elevation(value: f32) -> Self {
        Self::default().with_elevation(value)
    }

    pub fn height(value: f32) -> Self {
        Self::default().with_height(value)
    }

    /// Fully visible at rest
    pub fn revealed() -> Self {
        Self::opacity(1.0).with_translate_y(0.0)
    }

    /// Transparent and offset downward
    pub fn concealed(offset: f32) -> Self {
        Self::opacity(0.0).with_translate_y(offset)
    }

    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn with_translate_y(mut self, value: f32) -> Self {
        self.translate_y = Some(value);
        self
    }

    pub fn with_scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn with_elevation(mut self, value: f32) -> Self {
        self.elevation = Some(value);
        self
    }

    pub fn with_height(mut self, value: f32) -> Self {
        self.height = Some(value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.opacity.is_none()
            && self.translate_y.is_none()
            && self.scale.is_none()
            && self.elevation.is_none()
            && self.height.is_none()
    }

    /// Whether both sets animate at least one common property
    pub fn overlaps(&self, other: &Props) -> bool {
        (self.opacity.is_some() && other.opacity.is_some())
            || (self.translate_y.is_some() && other.translate_y.is_some())
            || (self.scale.is_some() && other.scale.is_some())
            || (self.elevation.is_some() && other.elevation.is_some())
            || (self.height.is_some() && other.height.is_some())
    }

    /// Current values of `style` for every property set in `keys`
    pub fn capture(style: &VisualState, natural_height: f32, keys: &Props) -> Props {
        Props {
            opacity: keys.opacity.map(|_| style.opacity),
            translate_y: keys.translate_y.map(|_| style.translate_y),
            scale: keys.scale.map(|_| style.scale),
            elevation: keys.elevation.map(|_| style.elevation),
            height: keys.height.map(|_| style.height.resolve(natural_height)),
        }
    }

    /// Interpolate toward `other`. Properties missing on either side keep this side's value.
    pub fn lerp(&self, other: &Props, t: f32) -> Props {
        Props {
            opacity: lerp_opt(self.opacity, other.opacity, t),
            translate_y: lerp_opt(self.translate_y, other.translate_y, t),
            scale: lerp_opt(self.scale, other.scale, t),
            elevation: lerp_opt(self.elevation, other.elevation, t),
            height: lerp_opt(self.height, other.height, t),
        }
    }

    /// Write every set property into `style`
    pub fn apply_to(&self, style: &mut VisualState) {
        if let Some(v) = self.opacity {
            style.opacity = v;
        }
        if let Some(v) = self.translate_y {
            style.translate_y = v;
        }
        if let Some(v) = self.scale {
            style.scale = v;
        }
        if let Some(v) = self.elevation {
            style.elevation = v;
        }
        if let Some(v) = self.height {
            style.height = Height::Px(v);
        }
    }
}

fn lerp_opt(a: Option<f32>, b: Option<f32>, t: f32) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// How many times a tween plays
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Repeat {
    #[default]
    Once,
    /// Extra iterations after the first
    Times(u32),
    Infinite,
}

/// Callback run once when a finite tween completes
pub type CompletionHook = Box<dyn FnOnce(&mut Scene)>;

/// Description of a tween before it is scheduled
pub struct TweenSpec {
    pub target: ElementId,
    pub from: Option<Props>,
    pub to: Props,
    pub duration_ms: u32,
    pub delay_ms: u32,
    pub easing: Easing,
    pub repeat: Repeat,
    /// Alternate direction on every repeat
    pub yoyo: bool,
    /// Kill running tweens on the same target that animate the same properties
    pub overwrite: bool,
    pub on_complete: Option<CompletionHook>,
}

impl TweenSpec {
    /// Animate from the element's current values to `to`
    pub fn to(target: ElementId, to: Props) -> Self {
        Self {
            target,
            from: None,
            to,
            duration_ms: 500,
            delay_ms: 0,
            easing: Easing::EaseOutQuad,
            repeat: Repeat::Once,
            yoyo: false,
            overwrite: false,
            on_complete: None,
        }
    }

    /// Animate between explicit start and end values
    pub fn from_to(target: ElementId, from: Props, to: Props) -> Self {
        Self {
            from: Some(from),
            ..Self::to(target, to)
        }
    }

    pub fn duration(mut self, ms: u32) -> Self {
        self.duration_ms = ms;
        self
    }

    pub fn delay(mut self, ms: u32) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn ease(mut self, easing: impl Into<Easing>) -> Self {
        self.easing = easing.into();
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    pub fn overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }

    pub fn on_complete<F: FnOnce(&mut Scene) + 'static>(mut self, hook: F) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    /// Total running time including delay, `None` for infinite tweens
    pub fn total_ms(&self) -> Option<u32> {
        let iterations = match self.repeat {
            Repeat::Once => 1,
            Repeat::Times(n) => n + 1,
            Repeat::Infinite => return None,
        };
        Some(self.delay_ms + self.duration_ms * iterations)
    }
}

impl std::fmt::Debug for TweenSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenSpec")
            .field("target", &self.target)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration_ms", &self.duration_ms)
            .field("delay_ms", &self.delay_ms)
            .field("easing", &self.easing)
            .field("repeat", &self.repeat)
            .field("yoyo", &self.yoyo)
            .finish_non_exhaustive()
    }
}

/// A scheduled tween
pub(crate) struct Tween {
    pub(crate) spec: TweenSpec,
    /// Time into the current iteration; negative while the delay runs
    elapsed_ms: f32,
    start: Option<Props>,
    iteration: u32,
    reversed: bool,
    pub(crate) playing: bool,
    pub(crate) finished: bool,
}

impl Tween {
    pub(crate) fn new(spec: TweenSpec, playing: bool) -> Self {
        Self {
            elapsed_ms: -(spec.delay_ms as f32),
            start: spec.from,
            spec,
            iteration: 0,
            reversed: false,
            playing,
            finished: false,
        }
    }

    pub(crate) fn target(&self) -> ElementId {
        self.spec.target
    }

    /// Advance by `dt_ms` and paint the result. Returns `true` when the tween just finished.
    pub(crate) fn step(&mut self, dt_ms: f32, scene: &mut Scene) -> bool {
        if !self.playing || self.finished {
            return false;
        }

        self.elapsed_ms += dt_ms;
        if self.elapsed_ms < 0.0 {
            return false;
        }

        let target = self.spec.target;
        let start = match self.start {
            Some(start) => start,
            None => {
                let Some(el) = scene.get(target) else {
                    self.finished = true;
                    return true;
                };
                let captured = Props::capture(&el.style, el.natural_height, &self.spec.to);
                self.start = Some(captured);
                captured
            }
        };

        let duration = self.spec.duration_ms as f32;
        let progress = if duration <= 0.0 {
            self.finished = true;
            1.0
        } else {
            while self.elapsed_ms >= duration && !self.finished {
                if self.advance_iteration() {
                    self.elapsed_ms -= duration;
                } else {
                    self.elapsed_ms = duration;
                    self.finished = true;
                }
            }
            self.elapsed_ms / duration
        };

        let t = if self.reversed { 1.0 - progress } else { progress };
        let values = start.lerp(&self.spec.to, self.spec.easing.apply(t));
        if !scene.update_style(target, |style| values.apply_to(style)) {
            self.finished = true;
        }
        self.finished
    }

    /// Move to the next iteration if the repeat budget allows it
    fn advance_iteration(&mut self) -> bool {
        let more = match self.spec.repeat {
            Repeat::Once => false,
            Repeat::Times(n) => self.iteration < n,
            Repeat::Infinite => true,
        };
        if more {
            self.iteration += 1;
            if self.spec.yoyo {
                self.reversed = !self.reversed;
            }
        }
        more
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruhora_core::Rect;

    #[test]
    fn test_props_lerp_and_apply() {
        let from = Props::concealed(8.0);
        let to = Props::revealed();
        let mid = from.lerp(&to, 0.5);
        assert_eq!(mid.opacity, Some(0.5));
        assert_eq!(mid.translate_y, Some(4.0));
        assert_eq!(mid.scale, None);

        let mut style = VisualState::revealed();
        Props::height(120.0).apply_to(&mut style);
        assert_eq!(style.height, Height::Px(120.0));
    }

    #[test]
    fn test_capture_only_requested_keys() {
        let style = VisualState::concealed(12.0);
        let captured = Props::capture(&style, 300.0, &Props::translate_y(0.0).with_height(0.0));
        assert_eq!(captured.translate_y, Some(12.0));
        assert_eq!(captured.height, Some(300.0));
        assert_eq!(captured.opacity, None);
    }

    #[test]
    fn test_overlaps() {
        assert!(Props::opacity(1.0).overlaps(&Props::revealed()));
        assert!(!Props::scale(1.05).overlaps(&Props::elevation(1.0)));
    }

    #[test]
    fn test_tween_waits_for_delay_then_captures_start() {
        let mut scene = Scene::new();
        let el = scene.insert("eyebrow", Rect::new(0.0, 20.0));
        scene.set_style(el, VisualState::concealed(8.0));

        let spec = TweenSpec::to(el, Props::revealed())
            .duration(100)
            .delay(50)
            .ease(Easing::Linear);
        let mut tween = Tween::new(spec, true);

        assert!(!tween.step(40.0, &mut scene));
        assert_eq!(scene.style(el).map(|s| s.opacity), Some(0.0));

        assert!(!tween.step(20.0, &mut scene));
        let style = scene.style(el).copied().unwrap();
        assert!((style.opacity - 0.1).abs() < 1e-4);

        assert!(tween.step(100.0, &mut scene));
        assert!(scene.style(el).unwrap().is_revealed());
    }

    #[test]
    fn test_yoyo_returns_to_start() {
        let mut scene = Scene::new();
        let cta = scene.insert("cta", Rect::new(0.0, 40.0));
        let spec = TweenSpec::to(cta, Props::opacity(0.85))
            .duration(100)
            .ease(Easing::Linear)
            .repeat(Repeat::Times(1))
            .yoyo();
        let mut tween = Tween::new(spec, true);

        tween.step(100.0, &mut scene);
        assert!((scene.style(cta).unwrap().opacity - 0.85).abs() < 1e-4);
        assert!(tween.step(100.0, &mut scene));
        assert!((scene.style(cta).unwrap().opacity - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_removed_target_finishes_tween() {
        let mut scene = Scene::new();
        let el = scene.insert("gone", Rect::new(0.0, 20.0));
        scene.remove(el);
        let mut tween = Tween::new(TweenSpec::to(el, Props::opacity(1.0)), true);
        assert!(tween.step(16.0, &mut scene));
    }

    #[test]
    fn test_total_ms() {
        let el = Scene::new().insert("x", Rect::default());
        let spec = TweenSpec::to(el, Props::opacity(1.0)).duration(400).delay(100);
        assert_eq!(spec.total_ms(), Some(500));
        let looping = TweenSpec::to(el, Props::opacity(0.12)).repeat(Repeat::Infinite);
        assert_eq!(looping.total_ms(), None);
    }
}
