//! Brand essence: eyebrow, core lines, supporting copy and essence words

use super::{settle, Column, Section};
use crate::error::{Result, SiteError};
use ruhora_animation::{
    DurationPreset, EasePreset, Edge, MotionRuntime, Position, Props, Stagger, Teardown, Timeline,
    TimelineStep, TriggerPoint,
};
use ruhora_core::{ElementId, Scene};

pub struct Essence {
    root: ElementId,
    eyebrow: ElementId,
    core_lines: [ElementId; 2],
    supporting: ElementId,
    words: ElementId,
}

impl Essence {
    pub fn mount(scene: &mut Scene, top: f32) -> Self {
        let mut column = Column::new(scene, "philosophy", top, 160.0);
        let eyebrow = column.push("essence-eyebrow", 20.0);
        let core_lines = [
            column.push("essence-core-line-1", 64.0),
            column.push("essence-core-line-2", 64.0),
        ];
        let supporting = column.push("essence-supporting", 90.0);
        let words = column.push("essence-words", 32.0);
        let root = column.finish(160.0);

        Self {
            root,
            eyebrow,
            core_lines,
            supporting,
            words,
        }
    }

    fn timeline(&self) -> Timeline {
        Timeline::new()
            .step(reveal(&[self.eyebrow], 8.0, DurationPreset::Quick.ms()))
            .step_at(
                reveal(&self.core_lines, 8.0, 1000).stagger(Stagger::new(120)),
                Position::Overlap(400),
            )
            .step_at(
                reveal(&[self.supporting], 6.0, DurationPreset::Quick.ms()),
                Position::Overlap(300),
            )
            .step_at(
                reveal(&[self.words], 6.0, DurationPreset::Quick.ms()),
                Position::Overlap(300),
            )
    }
}

fn reveal(targets: &[ElementId], offset: f32, ms: u32) -> TimelineStep {
    TimelineStep::from_to(
        targets.iter().copied(),
        Props::concealed(offset),
        Props::revealed(),
    )
    .duration(ms)
    .ease(EasePreset::Gentle)
}

impl Section for Essence {
    fn root(&self) -> ElementId {
        self.root
    }

    fn controlled(&self) -> Vec<ElementId> {
        let mut ids = vec![self.eyebrow];
        ids.extend(self.core_lines);
        ids.extend([self.supporting, self.words]);
        ids
    }

    fn animate(&self, rt: &mut MotionRuntime) -> Result<Teardown> {
        if rt.reduced_motion() {
            return Ok(settle(rt, &self.controlled()));
        }
        rt.scope(|scope| {
            let start = TriggerPoint::new(Edge::Top, 0.8)?;
            scope.reveal_on_scroll(self.root, start, self.timeline());
            Ok::<_, SiteError>(())
        })
    }
}
