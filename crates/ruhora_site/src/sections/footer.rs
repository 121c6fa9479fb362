use super::{settle, Column, Section};
use crate::error::{Result, SiteError};
use crate::links::{social_links, SocialLink};
use ruhora_animation::{
    DurationPreset, EasePreset, Edge, MotionRuntime, Position, Props, ScrollTrigger, Teardown,
    Timeline, TimelineStep, TriggerPoint, TweenSpec,
};
use ruhora_core::events::event_types;
use ruhora_core::{ElementId, Scene};

pub const COPYRIGHT: &str = "© 2026 RUHORA. All rights reserved.";

/// Resting opacity of the tagline once revealed
const TAGLINE_OPACITY: f32 = 0.85;
/// Resting opacity of the copyright line once revealed
const COPYRIGHT_OPACITY: f32 = 0.7;
const SOCIAL_HOVER_SCALE: f32 = 1.05;

pub struct Footer {
    root: ElementId,
    tagline: ElementId,
    divider: ElementId,
    note_label: ElementId,
    note_text: ElementId,
    social: ElementId,
    social_links: Vec<(ElementId, &'static SocialLink)>,
    copyright: ElementId,
}

impl Footer {
    pub fn mount(scene: &mut Scene, top: f32) -> Self {
        let mut column = Column::new(scene, "footer", top, 96.0);
        let tagline = column.push("footer-tagline", 32.0);
        let divider = column.push("footer-divider", 1.0);
        let note_label = column.push("footer-note-label", 18.0);
        let note_text = column.push("footer-note-text", 96.0);

        let social = column.open(column.root(), "footer-social", 40.0);
        let social_links = social_links()
            .iter()
            .map(|link| {
                let id = column.open(social, format!("footer-social-{}", link.kind), 40.0);
                column.scene().set_focusable(id, true);
                (id, link)
            })
            .collect();
        column.skip(64.0);

        let copyright = column.push("footer-copyright", 20.0);
        let root = column.finish(64.0);

        Self {
            root,
            tagline,
            divider,
            note_label,
            note_text,
            social,
            social_links,
            copyright,
        }
    }

    /// Social profile behind a footer link element
    pub fn link_for(&self, id: ElementId) -> Option<&'static SocialLink> {
        self.social_links
            .iter()
            .find(|(el, _)| *el == id)
            .map(|(_, link)| *link)
    }

    pub fn social_elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.social_links.iter().map(|(id, _)| *id)
    }

    fn timeline(&self) -> Timeline {
        let fade_up = |target: ElementId, opacity: f32, ms: u32, ease: EasePreset| {
            TimelineStep::from_to(
                [target],
                Props::concealed(8.0),
                Props::revealed().with_opacity(opacity),
            )
            .duration(ms)
            .ease(ease)
        };
        let quick = DurationPreset::Quick.ms();
        let normal = DurationPreset::Normal.ms();

        Timeline::new()
            .step(fade_up(self.tagline, TAGLINE_OPACITY, normal, EasePreset::Gentle))
            .step_at(
                TimelineStep::from_to([self.divider], Props::opacity(0.0), Props::opacity(1.0))
                    .duration(quick)
                    .ease(EasePreset::Soft),
                Position::Overlap(600),
            )
            .step_at(
                fade_up(self.note_label, 1.0, quick, EasePreset::Gentle),
                Position::Overlap(400),
            )
            .step_at(
                fade_up(self.note_text, 1.0, normal, EasePreset::Gentle),
                Position::Overlap(500),
            )
            .step_at(
                fade_up(self.social, 1.0, quick, EasePreset::Soft),
                Position::Overlap(600),
            )
            .step_at(
                fade_up(self.copyright, COPYRIGHT_OPACITY, quick, EasePreset::Soft),
                Position::Overlap(400),
            )
    }
}

impl Section for Footer {
    fn root(&self) -> ElementId {
        self.root
    }

    fn controlled(&self) -> Vec<ElementId> {
        vec![
            self.tagline,
            self.divider,
            self.note_label,
            self.note_text,
            self.social,
            self.copyright,
        ]
    }

    fn animate(&self, rt: &mut MotionRuntime) -> Result<Teardown> {
        if rt.reduced_motion() {
            return Ok(settle(rt, &self.controlled()));
        }

        rt.scope(|scope| {
            let tweens = scope.timeline_paused(self.timeline());
            scope.observe(
                ScrollTrigger::play(self.root, TriggerPoint::new(Edge::Top, 0.75)?, tweens)
                    .end(TriggerPoint::new(Edge::Top, 0.25)?)
                    .once(),
            );

            for link in self.social_elements() {
                let scale = move |value: f32| {
                    TweenSpec::to(link, Props::scale(value))
                        .duration(300)
                        .ease(EasePreset::Soft)
                };
                scope.listen(link, event_types::POINTER_ENTER, move |_, stage| {
                    stage.tween(scale(SOCIAL_HOVER_SCALE));
                });
                scope.listen(link, event_types::POINTER_LEAVE, move |_, stage| {
                    stage.tween(scale(1.0));
                });
            }
            Ok::<_, SiteError>(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruhora_core::{Event, Rect, Viewport};

    fn page() -> (MotionRuntime, Footer) {
        let mut rt = MotionRuntime::new(Viewport::new(1440.0, 900.0), false);
        rt.scene_mut().insert("above", Rect::new(0.0, 3000.0));
        let footer = Footer::mount(rt.scene_mut(), 3000.0);
        rt.refresh();
        (rt, footer)
    }

    #[test]
    fn test_reveal_settles_on_resting_opacities() {
        let (mut rt, footer) = page();
        let mut teardown = footer.animate(&mut rt).unwrap();
        assert_eq!(rt.scene().style(footer.tagline).map(|s| s.opacity), Some(0.0));

        rt.scroll_to(3000.0 - 900.0 * 0.75 + 10.0);
        for _ in 0..250 {
            rt.tick(16.0);
        }
        let opacity = |id| rt.scene().style(id).map(|s| s.opacity);
        assert_eq!(opacity(footer.tagline), Some(TAGLINE_OPACITY));
        assert_eq!(opacity(footer.copyright), Some(COPYRIGHT_OPACITY));
        assert_eq!(opacity(footer.note_text), Some(1.0));
        assert!(rt.observers().is_empty());

        teardown.dispose(&mut rt);
    }

    #[test]
    fn test_social_links_scale_on_hover() {
        let (mut rt, footer) = page();
        let mut teardown = footer.animate(&mut rt).unwrap();
        let instagram = rt.scene().find("footer-social-instagram").unwrap();
        assert_eq!(footer.link_for(instagram).map(|l| l.kind), Some("instagram"));

        rt.dispatch(Event::pointer_enter(instagram));
        rt.tick(300.0);
        let scale = rt.scene().style(instagram).map(|s| s.scale).unwrap();
        assert!((scale - SOCIAL_HOVER_SCALE).abs() < 1e-5);

        teardown.dispose(&mut rt);
        assert_eq!(rt.scene().style(instagram).map(|s| s.scale), Some(1.0));
    }
}
