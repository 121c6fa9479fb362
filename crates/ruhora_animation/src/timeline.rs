//! Timeline orchestration for multiple tweens
//!
//! Steps are appended in declared order. Each step starts relative to the end
//! of everything before it, optionally pulled earlier by an overlap, so a
//! later step may begin before an earlier one finishes.
//!
//! ```ignore
//! let tl = Timeline::new()
//!     .step(TimelineStep::to([eyebrow], Props::revealed()).duration(800))
//!     .step_at(
//!         TimelineStep::to(lines, Props::revealed()).duration(1000).stagger(Stagger::new(120)),
//!         Position::Overlap(400),
//!     );
//! let specs = tl.build();
//! ```

use crate::easing::Easing;
use crate::stagger::Stagger;
use crate::tween::{Props, TweenSpec};
use ruhora_core::ElementId;
use smallvec::SmallVec;

/// Where a step starts relative to the timeline built so far
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Position {
    /// After everything before it has finished
    #[default]
    Sequential,
    /// That many ms before everything before it has finished (clamped at 0)
    Overlap(u32),
    /// Absolute offset from the timeline start
    At(u32),
}

/// One step of a timeline, possibly covering several elements
#[derive(Clone, Debug)]
pub struct TimelineStep {
    targets: SmallVec<[ElementId; 4]>,
    from: Option<Props>,
    to: Props,
    duration_ms: u32,
    easing: Easing,
    stagger: Option<Stagger>,
}

impl TimelineStep {
    pub fn to(targets: impl IntoIterator<Item = ElementId>, to: Props) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            from: None,
            to,
            duration_ms: 500,
            easing: Easing::EaseOutQuad,
            stagger: None,
        }
    }

    pub fn from_to(targets: impl IntoIterator<Item = ElementId>, from: Props, to: Props) -> Self {
        Self {
            from: Some(from),
            ..Self::to(targets, to)
        }
    }

    pub fn duration(mut self, ms: u32) -> Self {
        self.duration_ms = ms;
        self
    }

    pub fn ease(mut self, easing: impl Into<Easing>) -> Self {
        self.easing = easing.into();
        self
    }

    pub fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = Some(stagger);
        self
    }

    /// Time from the step's start until its last member finishes
    pub fn span_ms(&self) -> u32 {
        let lead = self
            .stagger
            .map(|s| s.span(self.targets.len()))
            .unwrap_or(0);
        lead + self.duration_ms
    }
}

/// A declared sequence of steps
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    delay_ms: u32,
    steps: Vec<(TimelineStep, u32)>,
    /// End of the latest-finishing step so far
    end_ms: u32,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay before the first step
    pub fn delay(mut self, ms: u32) -> Self {
        self.delay_ms = ms;
        self
    }

    /// Append a step after everything declared so far
    pub fn step(self, step: TimelineStep) -> Self {
        self.step_at(step, Position::Sequential)
    }

    /// Append a step at an explicit position
    pub fn step_at(mut self, step: TimelineStep, position: Position) -> Self {
        let start = match position {
            Position::Sequential => self.end_ms,
            Position::Overlap(ms) => self.end_ms.saturating_sub(ms),
            Position::At(ms) => ms,
        };
        self.end_ms = self.end_ms.max(start + step.span_ms());
        self.steps.push((step, start));
        self
    }

    /// Total running time including the timeline delay
    pub fn duration_ms(&self) -> u32 {
        self.delay_ms + self.end_ms
    }

    pub fn is_empty(&self) -> bool {
        self.steps.iter().all(|(step, _)| step.targets.is_empty())
    }

    /// Start offset of each step, in declared order
    pub fn offsets(&self) -> impl Iterator<Item = u32> + '_ {
        self.steps.iter().map(move |(_, start)| self.delay_ms + start)
    }

    /// Flatten into tween specs with absolute delays
    pub fn build(self) -> Vec<TweenSpec> {
        let delay = self.delay_ms;
        let mut specs = Vec::new();
        for (step, start) in self.steps {
            let total = step.targets.len();
            for (index, &target) in step.targets.iter().enumerate() {
                let offset = step
                    .stagger
                    .map(|s| s.delay_for_index(index, total))
                    .unwrap_or(0);
                let spec = match step.from {
                    Some(from) => TweenSpec::from_to(target, from, step.to),
                    None => TweenSpec::to(target, step.to),
                };
                specs.push(
                    spec.duration(step.duration_ms)
                        .ease(step.easing)
                        .delay(delay + start + offset),
                );
            }
        }
        specs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruhora_core::{Rect, Scene};

    fn ids(n: usize) -> Vec<ElementId> {
        let mut scene = Scene::new();
        (0..n)
            .map(|i| scene.insert(format!("el-{i}"), Rect::default()))
            .collect()
    }

    #[test]
    fn test_sequential_and_overlap() {
        let els = ids(3);
        let tl = Timeline::new()
            .step(TimelineStep::to([els[0]], Props::revealed()).duration(800))
            .step_at(
                TimelineStep::to([els[1]], Props::revealed()).duration(1000),
                Position::Overlap(400),
            )
            .step(TimelineStep::to([els[2]], Props::revealed()).duration(800));

        assert_eq!(tl.offsets().collect::<Vec<_>>(), vec![0, 400, 1400]);
        assert_eq!(tl.duration_ms(), 2200);

        let delays: Vec<u32> = tl.build().iter().map(|s| s.delay_ms).collect();
        assert_eq!(delays, vec![0, 400, 1400]);
    }

    #[test]
    fn test_stagger_extends_step() {
        let els = ids(3);
        let tl = Timeline::new().delay(100).step(
            TimelineStep::to(els.clone(), Props::revealed())
                .duration(1000)
                .stagger(Stagger::new(120)),
        );
        assert_eq!(tl.duration_ms(), 100 + 240 + 1000);

        let delays: Vec<u32> = tl.build().iter().map(|s| s.delay_ms).collect();
        assert_eq!(delays, vec![100, 220, 340]);
    }

    #[test]
    fn test_overlap_clamps_at_zero() {
        let els = ids(1);
        let tl = Timeline::new().step_at(
            TimelineStep::to([els[0]], Props::revealed()).duration(300),
            Position::Overlap(500),
        );
        assert_eq!(tl.offsets().next(), Some(0));
    }

    #[test]
    fn test_absolute_position_does_not_shrink_end() {
        let els = ids(2);
        let tl = Timeline::new()
            .step(TimelineStep::to([els[0]], Props::revealed()).duration(1000))
            .step_at(
                TimelineStep::to([els[1]], Props::revealed()).duration(200),
                Position::At(100),
            );
        assert_eq!(tl.duration_ms(), 1000);
    }

    #[test]
    fn test_empty_targets() {
        let tl = Timeline::new().step(TimelineStep::to([], Props::revealed()).duration(800));
        assert!(tl.is_empty());
        assert!(tl.build().is_empty());
    }
}
