//! About the brand

use super::{settle, Column, Section};
use crate::error::{Result, SiteError};
use ruhora_animation::{
    DurationPreset, EasePreset, Edge, MotionRuntime, Position, Props, Stagger, Teardown, Timeline,
    TimelineStep, TriggerPoint,
};
use ruhora_core::{ElementId, Scene};

pub struct About {
    root: ElementId,
    eyebrow: ElementId,
    heading: ElementId,
    vision_lines: [ElementId; 2],
    gap_statement: ElementId,
    manifesto: ElementId,
}

impl About {
    pub fn mount(scene: &mut Scene, top: f32) -> Self {
        let mut column = Column::new(scene, "about", top, 140.0);
        let eyebrow = column.push("about-eyebrow", 20.0);
        let heading = column.push("about-heading", 56.0);
        let vision_lines = [
            column.push("about-vision-1", 120.0),
            column.push("about-vision-2", 120.0),
        ];
        let gap_statement = column.push("about-gap-statement", 80.0);
        let manifesto = column.push("about-manifesto", 48.0);
        let root = column.finish(140.0);

        Self {
            root,
            eyebrow,
            heading,
            vision_lines,
            gap_statement,
            manifesto,
        }
    }

    fn timeline(&self) -> Timeline {
        let trailing = |target: ElementId| {
            TimelineStep::from_to([target], Props::concealed(8.0), Props::revealed())
                .duration(DurationPreset::Quick.ms())
                .ease(EasePreset::Gentle)
        };

        Timeline::new()
            .step(trailing(self.eyebrow))
            .step_at(
                TimelineStep::from_to([self.heading], Props::concealed(12.0), Props::revealed())
                    .duration(1000)
                    .ease(EasePreset::Gentle),
                Position::Overlap(400),
            )
            .step_at(
                TimelineStep::from_to(self.vision_lines, Props::concealed(12.0), Props::revealed())
                    .duration(1000)
                    .ease(EasePreset::Gentle)
                    .stagger(Stagger::new(150)),
                Position::Overlap(300),
            )
            .step_at(trailing(self.gap_statement), Position::Overlap(200))
            .step_at(trailing(self.manifesto), Position::Overlap(200))
    }
}

impl Section for About {
    fn root(&self) -> ElementId {
        self.root
    }

    fn controlled(&self) -> Vec<ElementId> {
        let mut ids = vec![self.eyebrow, self.heading];
        ids.extend(self.vision_lines);
        ids.extend([self.gap_statement, self.manifesto]);
        ids
    }

    fn animate(&self, rt: &mut MotionRuntime) -> Result<Teardown> {
        if rt.reduced_motion() {
            return Ok(settle(rt, &self.controlled()));
        }
        rt.scope(|scope| {
            let start = TriggerPoint::new(Edge::Top, 0.75)?;
            scope.reveal_on_scroll(self.root, start, self.timeline());
            Ok::<_, SiteError>(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_overlaps_accumulate() {
        let mut scene = Scene::new();
        let about = About::mount(&mut scene, 2000.0);
        let offsets: Vec<u32> = about.timeline().offsets().collect();
        assert_eq!(offsets, vec![0, 400, 1100, 2050, 2650]);
    }
}
