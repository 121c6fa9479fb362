//! Hero: intro fade-up, breathing CTA, shimmer loop and background parallax

use super::{settle, Section};
use crate::error::{Result, SiteError};
use ruhora_animation::{
    DurationPreset, EasePreset, MotionRuntime, Position, Props, Repeat, ScrollTrigger, Scrub,
    Stage, Stagger, Teardown, Timeline, TimelineStep, TriggerPoint, TweenSpec,
};
use ruhora_core::events::event_types;
use ruhora_core::{ElementId, Event, MediaQuery, Rect, Scene};
use tracing::debug;

pub const HERO_HEIGHT: f32 = 900.0;

/// Opacity the CTA breathes down to
const PULSE_FLOOR: f32 = 0.85;
const PULSE_MS: u32 = 2800;
const SHIMMER_PEAK: f32 = 0.12;
const SHIMMER_MS: u32 = 6000;
const PARALLAX_PX: f32 = 20.0;

pub struct Hero {
    root: ElementId,
    background: ElementId,
    shimmer: ElementId,
    headline: ElementId,
    subheadline: ElementId,
    cta: ElementId,
}

impl Hero {
    pub fn mount(scene: &mut Scene, top: f32) -> Self {
        let root = scene.insert("hero", Rect::new(top, HERO_HEIGHT));
        let background = scene.insert_child(root, "hero-background", Rect::new(top, HERO_HEIGHT));
        let shimmer = scene.insert_child(root, "shimmer-overlay", Rect::new(top, HERO_HEIGHT));
        scene.update_style(shimmer, |s| s.opacity = 0.0);

        let headline = scene.insert_child(root, "hero-headline", Rect::new(top + 300.0, 120.0));
        let subheadline =
            scene.insert_child(root, "hero-subheadline", Rect::new(top + 440.0, 60.0));
        let cta = scene.insert_child(root, "hero-cta", Rect::new(top + 540.0, 56.0));
        scene.set_focusable(cta, true);

        Self {
            root,
            background,
            shimmer,
            headline,
            subheadline,
            cta,
        }
    }

    pub fn cta(&self) -> ElementId {
        self.cta
    }

    pub fn shimmer(&self) -> ElementId {
        self.shimmer
    }

    pub fn background(&self) -> ElementId {
        self.background
    }

    fn intro(&self) -> Timeline {
        Timeline::new()
            .step(
                TimelineStep::from_to(
                    [self.headline, self.subheadline],
                    Props::concealed(8.0),
                    Props::revealed(),
                )
                .duration(DurationPreset::Normal.ms())
                .ease(EasePreset::Gentle)
                .stagger(Stagger::new(120)),
            )
            .step_at(
                TimelineStep::from_to([self.cta], Props::opacity(0.0), Props::opacity(1.0))
                    .duration(DurationPreset::Quick.ms())
                    .ease(EasePreset::Soft),
                Position::At(400),
            )
    }
}

impl Section for Hero {
    fn root(&self) -> ElementId {
        self.root
    }

    fn controlled(&self) -> Vec<ElementId> {
        vec![self.headline, self.subheadline, self.cta]
    }

    fn animate(&self, rt: &mut MotionRuntime) -> Result<Teardown> {
        if rt.reduced_motion() {
            return Ok(settle(rt, &self.controlled()));
        }

        let cta = self.cta;
        let teardown = rt.scope(|scope| {
            let intro = self.intro();
            let intro_ms = intro.duration_ms();
            scope.timeline(intro);

            // Breathing starts once the intro has settled
            let pulse = scope.tween(
                TweenSpec::to(cta, Props::opacity(PULSE_FLOOR))
                    .duration(PULSE_MS)
                    .delay(intro_ms)
                    .ease(EasePreset::Breath)
                    .repeat(Repeat::Infinite)
                    .yoyo(),
            );
            let hold = move |_: &mut Event, stage: &mut Stage| {
                stage.scheduler.pause(pulse);
                stage.set(cta, Props::opacity(1.0));
            };
            let release = move |_: &mut Event, stage: &mut Stage| {
                stage.scheduler.resume(pulse);
            };
            scope.listen(cta, event_types::POINTER_ENTER, hold);
            scope.listen(cta, event_types::FOCUS, hold);
            scope.listen(cta, event_types::POINTER_LEAVE, release);
            scope.listen(cta, event_types::BLUR, release);

            scope.tween(
                TweenSpec::to(self.shimmer, Props::opacity(SHIMMER_PEAK))
                    .duration(SHIMMER_MS)
                    .ease(EasePreset::Breath)
                    .repeat(Repeat::Infinite)
                    .yoyo(),
            );

            scope.observe(
                ScrollTrigger::scrub(
                    self.root,
                    TriggerPoint::top(0.0),
                    TriggerPoint::bottom(0.0),
                    Scrub::new(
                        self.background,
                        Props::translate_y(0.0),
                        Props::translate_y(PARALLAX_PX),
                    )
                    .lag(800),
                )
                .media(MediaQuery::desktop()),
            );
            Ok::<_, SiteError>(())
        })?;

        debug!("hero choreography attached");
        Ok(teardown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruhora_core::Viewport;

    fn runtime(width: f32, reduced: bool) -> (MotionRuntime, Hero) {
        let mut rt = MotionRuntime::new(Viewport::new(width, 900.0), reduced);
        let hero = Hero::mount(rt.scene_mut(), 0.0);
        rt.scene_mut().insert("below", Rect::new(900.0, 3000.0));
        rt.refresh();
        (rt, hero)
    }

    fn opacity(rt: &MotionRuntime, id: ElementId) -> f32 {
        rt.scene().style(id).map(|s| s.opacity).unwrap_or(-1.0)
    }

    #[test]
    fn test_intro_plays_on_load() {
        let (mut rt, hero) = runtime(1440.0, false);
        let mut teardown = hero.animate(&mut rt).unwrap();

        assert_eq!(opacity(&rt, hero.headline), 0.0);
        for _ in 0..100 {
            rt.tick(16.0);
        }
        assert!(rt.scene().style(hero.headline).unwrap().is_revealed());
        assert!(rt.scene().style(hero.subheadline).unwrap().is_revealed());

        teardown.dispose(&mut rt);
    }

    #[test]
    fn test_pulse_pauses_while_hovered() {
        let (mut rt, hero) = runtime(1440.0, false);
        let mut teardown = hero.animate(&mut rt).unwrap();

        for _ in 0..150 {
            rt.tick(16.0);
        }
        assert!(opacity(&rt, hero.cta) < 1.0);

        rt.dispatch(Event::pointer_enter(hero.cta));
        assert_eq!(opacity(&rt, hero.cta), 1.0);
        for _ in 0..60 {
            rt.tick(16.0);
        }
        assert_eq!(opacity(&rt, hero.cta), 1.0);

        rt.dispatch(Event::pointer_leave(hero.cta));
        for _ in 0..60 {
            rt.tick(16.0);
        }
        assert!(opacity(&rt, hero.cta) < 1.0);

        teardown.dispose(&mut rt);
        assert_eq!(rt.listener_count(), 0);
    }

    #[test]
    fn test_parallax_is_desktop_only() {
        let (mut rt, hero) = runtime(390.0, false);
        let mut teardown = hero.animate(&mut rt).unwrap();

        rt.scroll_to(450.0);
        for _ in 0..120 {
            rt.tick(16.0);
        }
        assert_eq!(
            rt.scene().style(hero.background).map(|s| s.translate_y),
            Some(0.0)
        );

        rt.resize(1440.0, 900.0);
        rt.scroll_to(450.0);
        for _ in 0..300 {
            rt.tick(16.0);
        }
        let offset = rt.scene().style(hero.background).map(|s| s.translate_y).unwrap();
        assert!((offset - 10.0).abs() < 0.5);

        teardown.dispose(&mut rt);
    }

    #[test]
    fn test_reduced_motion_settles_immediately() {
        let (mut rt, hero) = runtime(1440.0, true);
        let teardown = hero.animate(&mut rt).unwrap();

        assert!(teardown.is_empty());
        assert!(hero
            .controlled()
            .iter()
            .all(|&id| rt.scene().style(id).unwrap().is_revealed()));
        assert!(rt.observers().is_empty());
        assert!(!rt.scheduler().has_active_animations());
    }
}
