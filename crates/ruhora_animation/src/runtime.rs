//! Motion runtime
//!
//! Owns the page stage (scene, viewport, tweens, scroll observers) and the
//! listener table, and drives them from frame ticks, scroll and resize input.
//! Scroll observation is built into the runtime, so there is nothing to
//! register before sections initialize.

use crate::easing::Easing;
use crate::scheduler::{AnimationScheduler, TweenId};
use crate::scroll::ScrollObserverRegistry;
use crate::tween::{Props, TweenSpec};
use ruhora_core::events::event_types;
use ruhora_core::{
    platform, ElementId, Event, EventData, EventDispatcher, EventType, ListenerId, Scene, Viewport,
};
use tracing::{debug, trace};

/// Everything listeners and choreographies act on
pub struct Stage {
    pub scene: Scene,
    pub viewport: Viewport,
    pub scheduler: AnimationScheduler,
    pub observers: ScrollObserverRegistry,
}

impl Stage {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            scene: Scene::new(),
            viewport,
            scheduler: AnimationScheduler::new(),
            observers: ScrollObserverRegistry::new(),
        }
    }

    /// Schedule and start a tween
    pub fn tween(&mut self, spec: TweenSpec) -> TweenId {
        self.scheduler.add(spec, &mut self.scene)
    }

    /// Paint `props` onto `target` without animating
    pub fn set(&mut self, target: ElementId, props: Props) -> bool {
        self.scene.update_style(target, |style| props.apply_to(style))
    }
}

/// Programmatic scroll in progress
#[derive(Clone, Copy, Debug)]
struct ScrollTween {
    from: f32,
    to: f32,
    duration_ms: f32,
    elapsed_ms: f32,
    easing: Easing,
}

/// Drives the page
pub struct MotionRuntime {
    pub(crate) stage: Stage,
    pub(crate) dispatcher: EventDispatcher<Stage>,
    reduced_motion: bool,
    scroll_tween: Option<ScrollTween>,
    elapsed_ms: f64,
}

impl MotionRuntime {
    /// Runtime with an explicit reduced-motion preference
    pub fn new(viewport: Viewport, reduced_motion: bool) -> Self {
        debug!(
            width = viewport.width,
            height = viewport.height,
            reduced_motion,
            "motion runtime created"
        );
        Self {
            stage: Stage::new(viewport),
            dispatcher: EventDispatcher::new(),
            reduced_motion,
            scroll_tween: None,
            elapsed_ms: 0.0,
        }
    }

    /// Runtime that samples the host reduced-motion preference once
    pub fn with_host_preference(viewport: Viewport) -> Self {
        Self::new(viewport, platform::detect_reduced_motion())
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn scene(&self) -> &Scene {
        &self.stage.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.stage.scene
    }

    pub fn viewport(&self) -> &Viewport {
        &self.stage.viewport
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.stage.scheduler
    }

    pub fn observers(&self) -> &ScrollObserverRegistry {
        &self.stage.observers
    }

    /// Attached listeners
    pub fn listener_count(&self) -> usize {
        self.dispatcher.len()
    }

    /// Total simulated time
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Attach a listener outside any scope
    pub fn listen<F>(
        &mut self,
        target: Option<ElementId>,
        event_type: EventType,
        handler: F,
    ) -> ListenerId
    where
        F: FnMut(&mut Event, &mut Stage) + 'static,
    {
        self.dispatcher.register(target, event_type, handler)
    }

    pub fn unlisten(&mut self, id: ListenerId) -> bool {
        self.dispatcher.remove(id)
    }

    /// Deliver an event to its listeners. Returns the event after dispatch.
    pub fn dispatch(&mut self, mut event: Event) -> Event {
        self.dispatcher.dispatch(&mut event, &mut self.stage);
        event
    }

    /// Move focus to `id`, delivering blur and focus events. Returns whether
    /// `id` holds focus afterwards.
    pub fn focus(&mut self, id: ElementId) -> bool {
        let previous = self.stage.scene.focused();
        if previous == Some(id) {
            return true;
        }
        if !self.stage.scene.focus(id) {
            return false;
        }
        if let Some(previous) = previous {
            self.dispatch(Event::blur(previous));
        }
        self.dispatch(Event::focus(id));
        true
    }

    /// Default Tab navigation, delivering blur and focus events
    pub fn tab(&mut self, backwards: bool) -> Option<ElementId> {
        let previous = self.stage.scene.focused();
        let next = if backwards {
            self.stage.scene.focus_previous()
        } else {
            self.stage.scene.focus_next()
        }?;
        if previous != Some(next) {
            if let Some(previous) = previous {
                self.dispatch(Event::blur(previous));
            }
            self.dispatch(Event::focus(next));
        }
        Some(next)
    }

    /// Advance time by one frame
    pub fn tick(&mut self, dt_ms: f32) {
        self.elapsed_ms += dt_ms as f64;

        if self.stage.scene.is_scroll_locked() {
            self.scroll_tween = None;
        }
        if let Some(mut scroll) = self.scroll_tween.take() {
            scroll.elapsed_ms += dt_ms;
            let t = (scroll.elapsed_ms / scroll.duration_ms).min(1.0);
            let y = scroll.from + (scroll.to - scroll.from) * scroll.easing.apply(t);
            self.apply_scroll(y);
            if t < 1.0 {
                self.scroll_tween = Some(scroll);
            }
        }

        let stage = &mut self.stage;
        stage.scheduler.tick(dt_ms, &mut stage.scene);
        stage.observers.tick(dt_ms, &mut stage.scene);
    }

    /// Jump to a scroll position. Ignored while body scroll is locked.
    pub fn scroll_to(&mut self, y: f32) -> bool {
        if self.stage.scene.is_scroll_locked() {
            trace!(y, "scroll ignored, body scroll locked");
            return false;
        }
        self.scroll_tween = None;
        self.apply_scroll(y);
        true
    }

    /// Animate the scroll position; instant under reduced motion
    pub fn smooth_scroll_to(&mut self, y: f32, duration_ms: u32, easing: impl Into<Easing>) -> bool {
        if self.reduced_motion || duration_ms == 0 {
            return self.scroll_to(y);
        }
        if self.stage.scene.is_scroll_locked() {
            return false;
        }
        let to = self.stage.viewport.clamp_scroll(y);
        self.scroll_tween = Some(ScrollTween {
            from: self.stage.viewport.scroll_y,
            to,
            duration_ms: duration_ms as f32,
            elapsed_ms: 0.0,
            easing: easing.into(),
        });
        true
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll_tween.is_some()
    }

    /// Stop a programmatic scroll where it is
    pub fn cancel_scroll(&mut self) -> bool {
        self.scroll_tween.take().is_some()
    }

    /// Suspend page scrolling, including any smooth scroll in flight
    pub fn lock_scroll(&mut self) {
        if self.cancel_scroll() {
            debug!(scroll_y = self.stage.viewport.scroll_y, "smooth scroll cancelled by scroll lock");
        }
        self.stage.scene.lock_scroll();
    }

    pub fn unlock_scroll(&mut self) {
        self.stage.scene.unlock_scroll();
    }

    fn apply_scroll(&mut self, y: f32) {
        let stage = &mut self.stage;
        stage.viewport.scroll_y = stage.viewport.clamp_scroll(y);
        let plays = stage.observers.on_scroll(&stage.viewport, &mut stage.scene);
        for id in plays {
            stage.scheduler.play(id);
        }

        let scroll_y = stage.viewport.scroll_y;
        self.dispatch(Event::new(
            event_types::SCROLL,
            None,
            EventData::Scroll { scroll_y },
        ));
    }

    /// Re-measure the document and re-evaluate observers at the current position
    pub fn refresh(&mut self) {
        let viewport = &mut self.stage.viewport;
        viewport.document_height = self.stage.scene.document_height().max(viewport.height);
        let y = viewport.scroll_y;
        self.apply_scroll(y);
    }

    /// Change the viewport size; media-gated observers are re-evaluated
    pub fn resize(&mut self, width: f32, height: f32) {
        {
            let stage = &mut self.stage;
            stage.viewport.width = width;
            stage.viewport.height = height;
            stage.observers.on_resize(&stage.viewport, &mut stage.scene);
        }
        self.refresh();
        self.dispatch(Event::new(
            event_types::RESIZE,
            None,
            EventData::Resize { width, height },
        ));
    }

    /// Stop animating `targets` and paint them fully visible
    pub fn reveal_now(&mut self, targets: &[ElementId]) {
        for &target in targets {
            self.stage.scheduler.kill_target(target);
            self.stage.set(target, Props::revealed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::{ScrollTrigger, TriggerPoint};
    use ruhora_core::{Rect, VisualState};

    fn runtime() -> MotionRuntime {
        MotionRuntime::new(Viewport::new(1440.0, 900.0), false)
    }

    #[test]
    fn test_scroll_plays_observed_tweens() {
        let mut rt = runtime();
        let section = rt.scene_mut().insert("section", Rect::new(2000.0, 800.0));
        rt.scene_mut().set_style(section, VisualState::concealed(8.0));

        let stage = rt.stage_mut();
        let tween = stage
            .scheduler
            .add_paused(TweenSpec::to(section, Props::revealed()).duration(100), &mut stage.scene);
        let trigger = ScrollTrigger::play(section, TriggerPoint::top(0.75), [tween]).once();
        stage.observers.observe(trigger, &stage.viewport);
        rt.refresh();

        rt.tick(200.0);
        assert!(!rt.scene().style(section).unwrap().is_revealed());

        assert!(rt.scroll_to(1400.0));
        rt.tick(200.0);
        assert!(rt.scene().style(section).unwrap().is_revealed());
        assert!(rt.observers().is_empty());
    }

    #[test]
    fn test_scroll_lock_blocks_scrolling() {
        let mut rt = runtime();
        rt.scene_mut().insert("page", Rect::new(0.0, 5000.0));
        rt.refresh();
        rt.scene_mut().lock_scroll();
        assert!(!rt.scroll_to(800.0));
        assert_eq!(rt.viewport().scroll_y, 0.0);
    }

    #[test]
    fn test_smooth_scroll_reaches_target() {
        let mut rt = runtime();
        rt.scene_mut().insert("page", Rect::new(0.0, 5000.0));
        rt.refresh();

        rt.smooth_scroll_to(1200.0, 500, Easing::EaseOutCubic);
        rt.tick(250.0);
        let halfway = rt.viewport().scroll_y;
        assert!(halfway > 600.0 && halfway < 1200.0);

        rt.tick(250.0);
        assert_eq!(rt.viewport().scroll_y, 1200.0);
        assert!(!rt.is_scrolling());
    }

    #[test]
    fn test_scroll_lock_stops_smooth_scroll_in_flight() {
        let mut rt = runtime();
        rt.scene_mut().insert("page", Rect::new(0.0, 5000.0));
        rt.refresh();

        rt.smooth_scroll_to(3000.0, 500, Easing::EaseOutCubic);
        rt.tick(16.0);
        rt.lock_scroll();
        let frozen = rt.viewport().scroll_y;
        assert!(!rt.is_scrolling());

        rt.tick(500.0);
        assert_eq!(rt.viewport().scroll_y, frozen);

        rt.unlock_scroll();
        assert!(rt.scroll_to(100.0));
    }

    #[test]
    fn test_locked_scene_drops_pending_scroll_on_tick() {
        let mut rt = runtime();
        rt.scene_mut().insert("page", Rect::new(0.0, 5000.0));
        rt.refresh();

        rt.smooth_scroll_to(3000.0, 500, Easing::EaseOutCubic);
        rt.scene_mut().lock_scroll();
        rt.tick(250.0);
        assert_eq!(rt.viewport().scroll_y, 0.0);
        assert!(!rt.is_scrolling());
    }

    #[test]
    fn test_smooth_scroll_is_instant_under_reduced_motion() {
        let mut rt = MotionRuntime::new(Viewport::new(1440.0, 900.0), true);
        rt.scene_mut().insert("page", Rect::new(0.0, 5000.0));
        rt.refresh();

        rt.smooth_scroll_to(1200.0, 500, Easing::EaseOutCubic);
        assert_eq!(rt.viewport().scroll_y, 1200.0);
        assert!(!rt.is_scrolling());
    }

    #[test]
    fn test_focus_delivers_blur_then_focus() {
        let mut rt = runtime();
        let a = rt.scene_mut().insert("a", Rect::new(0.0, 10.0));
        let b = rt.scene_mut().insert("b", Rect::new(20.0, 10.0));
        rt.scene_mut().set_focusable(a, true);
        rt.scene_mut().set_focusable(b, true);
        rt.listen(Some(a), event_types::BLUR, move |_, stage| {
            stage.set(a, Props::opacity(0.5));
        });

        assert!(rt.focus(a));
        assert!(rt.focus(b));
        assert_eq!(rt.scene().focused(), Some(b));
        assert_eq!(rt.scene().style(a).map(|s| s.opacity), Some(0.5));

        let missing = rt.scene_mut().insert("gone", Rect::new(40.0, 10.0));
        rt.scene_mut().remove(missing);
        assert!(!rt.focus(missing));
        assert_eq!(rt.scene().focused(), Some(b));
    }

    #[test]
    fn test_scroll_events_reach_document_listeners() {
        let mut rt = runtime();
        rt.scene_mut().insert("page", Rect::new(0.0, 5000.0));
        rt.refresh();
        let marker = rt.scene_mut().insert("marker", Rect::new(0.0, 10.0));
        rt.listen(None, event_types::SCROLL, move |event, stage| {
            if let EventData::Scroll { scroll_y } = event.data {
                stage.set(marker, Props::translate_y(scroll_y));
            }
        });

        rt.scroll_to(300.0);
        assert_eq!(rt.scene().style(marker).map(|s| s.translate_y), Some(300.0));
    }
}
