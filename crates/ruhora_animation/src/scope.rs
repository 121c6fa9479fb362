//! Scoped animation context
//!
//! [`MotionRuntime::scope`] runs a setup closure against a [`Scope`] that
//! records every tween, scroll observer and listener the closure creates,
//! along with the style each touched element had before the scope first
//! painted it. The returned [`Teardown`] releases all of it. If setup fails
//! part-way, whatever was created is released before the error is returned.
//!
//! ```ignore
//! let mut teardown = rt.scope(|scope| {
//!     let tweens = scope.timeline_paused(timeline);
//!     scope.observe(ScrollTrigger::play(section, ScrollDefaults::START, tweens).once());
//!     Ok::<_, SiteError>(())
//! })?;
//! // ...
//! teardown.dispose(&mut rt);
//! teardown.dispose(&mut rt); // no-op
//! ```

use crate::runtime::{MotionRuntime, Stage};
use crate::scheduler::TweenId;
use crate::scroll::{ScrollTrigger, TriggerId, TriggerPoint};
use crate::timeline::Timeline;
use crate::tween::{Props, TweenSpec};
use ruhora_core::{ElementId, Event, EventType, ListenerId, MediaQuery, Scene, VisualState, Viewport};
use rustc_hash::FxHashSet;
use tracing::debug;

/// Everything one scope created
#[derive(Default)]
struct ScopeRecord {
    tweens: Vec<TweenId>,
    triggers: Vec<TriggerId>,
    listeners: Vec<ListenerId>,
    snapshots: Vec<(ElementId, VisualState)>,
    touched: FxHashSet<ElementId>,
}

impl ScopeRecord {
    fn touch(&mut self, scene: &Scene, id: ElementId) {
        if self.touched.insert(id) {
            if let Some(style) = scene.style(id) {
                self.snapshots.push((id, *style));
            }
        }
    }

    fn release(self, rt: &mut MotionRuntime) {
        for id in &self.listeners {
            rt.dispatcher.remove(*id);
        }

        let stage = &mut rt.stage;
        for id in &self.triggers {
            stage.observers.kill(*id);
        }
        for id in &self.tweens {
            stage.scheduler.kill(*id);
        }
        for id in &self.touched {
            stage.scheduler.kill_target(*id);
        }
        for (id, style) in &self.snapshots {
            if stage.scene.contains(*id) {
                stage.scene.set_style(*id, *style);
            }
        }

        debug!(
            tweens = self.tweens.len(),
            observers = self.triggers.len(),
            listeners = self.listeners.len(),
            restored = self.snapshots.len(),
            "scope released"
        );
    }
}

/// Recording handle passed to scope setup closures
pub struct Scope<'a> {
    rt: &'a mut MotionRuntime,
    record: ScopeRecord,
}

impl Scope<'_> {
    pub fn reduced_motion(&self) -> bool {
        self.rt.reduced_motion()
    }

    pub fn scene(&self) -> &Scene {
        self.rt.scene()
    }

    pub fn viewport(&self) -> &Viewport {
        self.rt.viewport()
    }

    pub fn matches(&self, query: MediaQuery) -> bool {
        query.matches(self.rt.viewport())
    }

    /// Paint `props` onto every present target
    pub fn set(&mut self, targets: &[ElementId], props: Props) {
        for &target in targets {
            let stage = &mut self.rt.stage;
            self.record.touch(&stage.scene, target);
            stage.set(target, props);
        }
    }

    /// Schedule and start a tween
    pub fn tween(&mut self, spec: TweenSpec) -> TweenId {
        self.schedule(spec, true)
    }

    /// Schedule a tween that a scroll observer will start
    pub fn tween_paused(&mut self, spec: TweenSpec) -> TweenId {
        self.schedule(spec, false)
    }

    fn schedule(&mut self, spec: TweenSpec, playing: bool) -> TweenId {
        let stage = &mut self.rt.stage;
        self.record.touch(&stage.scene, spec.target);
        let id = if playing {
            stage.scheduler.add(spec, &mut stage.scene)
        } else {
            stage.scheduler.add_paused(spec, &mut stage.scene)
        };
        self.record.tweens.push(id);
        id
    }

    /// Schedule and start every step of a timeline
    pub fn timeline(&mut self, timeline: Timeline) -> Vec<TweenId> {
        timeline
            .build()
            .into_iter()
            .map(|spec| self.schedule(spec, true))
            .collect()
    }

    /// Schedule a timeline that a scroll observer will start
    pub fn timeline_paused(&mut self, timeline: Timeline) -> Vec<TweenId> {
        timeline
            .build()
            .into_iter()
            .map(|spec| self.schedule(spec, false))
            .collect()
    }

    /// Attach a scroll observer
    pub fn observe(&mut self, trigger: ScrollTrigger) -> TriggerId {
        let stage = &mut self.rt.stage;
        if let Some(target) = trigger.animated_target() {
            self.record.touch(&stage.scene, target);
        }
        let id = stage.observers.observe(trigger, &stage.viewport);
        self.record.triggers.push(id);
        id
    }

    /// Play `timeline` once when `trigger` passes `start`
    pub fn reveal_on_scroll(
        &mut self,
        trigger: ElementId,
        start: TriggerPoint,
        timeline: Timeline,
    ) -> TriggerId {
        let tweens = self.timeline_paused(timeline);
        self.observe(ScrollTrigger::play(trigger, start, tweens).once())
    }

    /// Attach a listener to `target`. Tweens the listener later starts on
    /// `target` are killed by the teardown as well.
    pub fn listen<F>(&mut self, target: ElementId, event_type: EventType, handler: F) -> ListenerId
    where
        F: FnMut(&mut Event, &mut Stage) + 'static,
    {
        self.record.touch(&self.rt.stage.scene, target);
        let id = self.rt.dispatcher.register(Some(target), event_type, handler);
        self.record.listeners.push(id);
        id
    }
}

/// Releases everything a scope created
#[must_use = "a teardown that is never disposed leaves its tweens and observers running"]
#[derive(Default)]
pub struct Teardown {
    records: Vec<ScopeRecord>,
}

impl Teardown {
    /// A teardown with nothing to release
    pub fn noop() -> Self {
        Self::default()
    }

    /// Combine two teardowns into one
    pub fn merge(mut self, mut other: Teardown) -> Self {
        self.records.append(&mut other.records);
        self
    }

    /// Nothing left to release
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Kill tweens and observers, detach listeners and restore styles.
    /// Calling it again does nothing.
    pub fn dispose(&mut self, rt: &mut MotionRuntime) {
        for record in self.records.drain(..) {
            record.release(rt);
        }
    }
}

impl std::fmt::Debug for Teardown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Teardown")
            .field("scopes", &self.records.len())
            .finish()
    }
}

impl MotionRuntime {
    /// Run `setup` in a recording scope and return its teardown
    pub fn scope<F, E>(&mut self, setup: F) -> Result<Teardown, E>
    where
        F: FnOnce(&mut Scope<'_>) -> Result<(), E>,
    {
        let mut scope = Scope {
            rt: self,
            record: ScopeRecord::default(),
        };
        let outcome = setup(&mut scope);
        let Scope { rt, record } = scope;

        match outcome {
            Ok(()) => Ok(Teardown {
                records: vec![record],
            }),
            Err(err) => {
                debug!("scope setup failed, releasing partial state");
                record.release(rt);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::Scrub;
    use ruhora_core::events::event_types;
    use ruhora_core::Rect;

    fn runtime() -> MotionRuntime {
        let mut rt = MotionRuntime::new(Viewport::new(1440.0, 900.0), false);
        rt.scene_mut().insert("page", Rect::new(0.0, 6000.0));
        rt
    }

    #[test]
    fn test_dispose_releases_everything_and_is_idempotent() {
        let mut rt = runtime();
        let card = rt.scene_mut().insert("card", Rect::new(3000.0, 400.0));

        let mut teardown = rt
            .scope(|scope| {
                let tween = scope.tween_paused(
                    TweenSpec::from_to(card, Props::concealed(8.0), Props::revealed()).duration(800),
                );
                scope.observe(ScrollTrigger::play(card, TriggerPoint::top(0.75), [tween]).once());
                scope.tween(TweenSpec::to(card, Props::elevation(0.5)).duration(300));
                scope.listen(card, event_types::POINTER_ENTER, move |_, stage| {
                    stage.tween(TweenSpec::to(card, Props::elevation(1.0)).duration(300));
                });
                Ok::<_, ()>(())
            })
            .unwrap();

        rt.dispatch(Event::pointer_enter(card));
        assert_eq!(rt.scene().style(card).map(|s| s.opacity), Some(0.0));
        assert_eq!(rt.observers().len(), 1);
        assert_eq!(rt.listener_count(), 1);
        assert_eq!(rt.scheduler().active_count(), 3);

        teardown.dispose(&mut rt);
        assert!(rt.observers().is_empty());
        assert_eq!(rt.listener_count(), 0);
        assert_eq!(rt.scheduler().active_count(), 0);
        assert!(rt.scene().style(card).unwrap().is_revealed());

        teardown.dispose(&mut rt);
        assert!(teardown.is_empty());
    }

    #[test]
    fn test_failed_setup_releases_partial_state() {
        let mut rt = runtime();
        let hero = rt.scene_mut().insert("hero", Rect::new(0.0, 900.0));

        let result = rt.scope(|scope| {
            scope.observe(ScrollTrigger::scrub(
                hero,
                TriggerPoint::top(0.0),
                TriggerPoint::bottom(0.0),
                Scrub::new(hero, Props::translate_y(0.0), Props::translate_y(20.0)),
            ));
            scope.tween(TweenSpec::to(hero, Props::opacity(0.12)));
            Err("missing subheadline")
        });

        assert_eq!(result.unwrap_err(), "missing subheadline");
        assert!(rt.observers().is_empty());
        assert_eq!(rt.scheduler().active_count(), 0);
    }

    #[test]
    fn test_reinitialization_does_not_stack_observers() {
        let mut rt = runtime();
        let section = rt.scene_mut().insert("section", Rect::new(2000.0, 600.0));

        let init = |rt: &mut MotionRuntime| {
            rt.scope(|scope| {
                let tl = Timeline::new().step(
                    crate::timeline::TimelineStep::from_to(
                        [section],
                        Props::concealed(8.0),
                        Props::revealed(),
                    )
                    .duration(800),
                );
                scope.reveal_on_scroll(section, TriggerPoint::top(0.8), tl);
                Ok::<_, ()>(())
            })
        };

        for _ in 0..3 {
            let mut teardown = init(&mut rt).unwrap();
            assert_eq!(rt.observers().len(), 1);
            teardown.dispose(&mut rt);
        }
        assert!(rt.observers().is_empty());
        assert_eq!(rt.scheduler().active_count(), 0);
    }

    #[test]
    fn test_merge_and_dispose_removed_elements() {
        let mut rt = runtime();
        let a = rt.scene_mut().insert("a", Rect::new(100.0, 50.0));
        let b = rt.scene_mut().insert("b", Rect::new(200.0, 50.0));

        let first = rt
            .scope(|scope| {
                scope.set(&[a], Props::concealed(8.0));
                Ok::<_, ()>(())
            })
            .unwrap();
        let second = rt
            .scope(|scope| {
                scope.set(&[b], Props::concealed(8.0));
                Ok::<_, ()>(())
            })
            .unwrap();

        let mut all = first.merge(second);
        rt.scene_mut().remove(b);
        all.dispose(&mut rt);

        assert!(rt.scene().style(a).unwrap().is_revealed());
        assert!(!rt.scene().contains(b));
    }
}
