//! Scroll observers
//!
//! A [`ScrollTrigger`] watches one element against the viewport. Its start
//! (and optional end) is written the way designers say it: "when the top of
//! the element reaches 75% down the viewport". Three kinds of reaction:
//!
//! - **Play**: start a set of paused tweens when the start line is passed
//! - **Scrub**: couple a property directly to scroll progress between start and end
//! - **Notify**: report enter / leave / enter-back / leave-back crossings
//!
//! Observers with a media query go dormant while the query does not match.

use crate::scheduler::TweenId;
use crate::tween::Props;
use ruhora_core::{CoreError, ElementId, MediaQuery, Rect, Scene, Viewport};
use slotmap::{new_key_type, SlotMap};
use smallvec::{smallvec, SmallVec};
use tracing::{debug, trace};

new_key_type! {
    pub struct TriggerId;
}

/// Edge of the observed element
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

impl Edge {
    fn of(self, rect: Rect) -> f32 {
        match self {
            Edge::Top => rect.top,
            Edge::Center => rect.center(),
            Edge::Bottom => rect.bottom(),
        }
    }
}

/// "`edge` of the element meets the line `fraction` down the viewport"
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerPoint {
    pub edge: Edge,
    pub fraction: f32,
}

impl TriggerPoint {
    pub fn new(edge: Edge, fraction: f32) -> Result<Self, CoreError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(CoreError::InvalidThreshold(fraction));
        }
        Ok(Self { edge, fraction })
    }

    /// For compile-time constants whose fraction is known to lie in `0..=1`
    pub const fn new_unchecked(edge: Edge, fraction: f32) -> Self {
        Self { edge, fraction }
    }

    /// `top <fraction>`
    pub const fn top(fraction: f32) -> Self {
        Self::new_unchecked(Edge::Top, fraction)
    }

    /// `bottom <fraction>`
    pub const fn bottom(fraction: f32) -> Self {
        Self::new_unchecked(Edge::Bottom, fraction)
    }

    /// Scroll position at which the edge meets the viewport line
    pub fn scroll_position(&self, rect: Rect, viewport_height: f32) -> f32 {
        self.edge.of(rect) - viewport_height * self.fraction
    }
}

/// Crossing reported to notify observers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerEvent {
    /// Scrolled forward past the start
    Enter,
    /// Scrolled forward past the end
    Leave,
    /// Scrolled backward past the end, back into range
    EnterBack,
    /// Scrolled backward past the start, out of range
    LeaveBack,
}

/// Scroll-coupled property animation
#[derive(Clone, Debug)]
pub struct Scrub {
    pub target: ElementId,
    pub from: Props,
    pub to: Props,
    /// Time to catch up with the scroll position (0 = locked to scroll)
    pub lag_ms: u32,
    progress: f32,
    goal: f32,
}

impl Scrub {
    pub fn new(target: ElementId, from: Props, to: Props) -> Self {
        Self {
            target,
            from,
            to,
            lag_ms: 0,
            progress: 0.0,
            goal: 0.0,
        }
    }

    pub fn lag(mut self, ms: u32) -> Self {
        self.lag_ms = ms;
        self
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    fn paint(&self, scene: &mut Scene) {
        let values = self.from.lerp(&self.to, self.progress);
        scene.update_style(self.target, |style| values.apply_to(style));
    }

    fn advance(&mut self, dt_ms: f32, scene: &mut Scene) {
        if self.progress == self.goal {
            return;
        }
        if self.lag_ms == 0 {
            self.progress = self.goal;
        } else {
            let k = (dt_ms / self.lag_ms as f32).min(1.0);
            self.progress += (self.goal - self.progress) * k;
            if (self.goal - self.progress).abs() < 1e-3 {
                self.progress = self.goal;
            }
        }
        self.paint(scene);
    }

    fn revert(&mut self, scene: &mut Scene) {
        self.progress = 0.0;
        self.goal = 0.0;
        scene.update_style(self.target, |style| self.from.apply_to(style));
    }
}

/// Callback for crossing notifications
pub type NotifyFn = Box<dyn FnMut(TriggerEvent)>;

/// What an observer does when its range is crossed
pub enum TriggerAction {
    Play(SmallVec<[TweenId; 8]>),
    Scrub(Scrub),
    Notify(NotifyFn),
}

/// One scroll observer
pub struct ScrollTrigger {
    trigger: ElementId,
    start: TriggerPoint,
    end: Option<TriggerPoint>,
    once: bool,
    media: Option<MediaQuery>,
    action: TriggerAction,
    active: bool,
    fired: bool,
    dormant: bool,
}

impl ScrollTrigger {
    fn new(trigger: ElementId, start: TriggerPoint, action: TriggerAction) -> Self {
        Self {
            trigger,
            start,
            end: None,
            once: false,
            media: None,
            action,
            active: false,
            fired: false,
            dormant: false,
        }
    }

    /// Play `tweens` when `trigger` passes `start`
    pub fn play(
        trigger: ElementId,
        start: TriggerPoint,
        tweens: impl IntoIterator<Item = TweenId>,
    ) -> Self {
        Self::new(trigger, start, TriggerAction::Play(tweens.into_iter().collect()))
    }

    /// Drive `scrub` by scroll progress between `start` and `end`
    pub fn scrub(trigger: ElementId, start: TriggerPoint, end: TriggerPoint, scrub: Scrub) -> Self {
        Self::new(trigger, start, TriggerAction::Scrub(scrub)).end(end)
    }

    /// Report crossings of the `start`..`end` range
    pub fn notify<F>(trigger: ElementId, start: TriggerPoint, end: TriggerPoint, callback: F) -> Self
    where
        F: FnMut(TriggerEvent) + 'static,
    {
        Self::new(trigger, start, TriggerAction::Notify(Box::new(callback))).end(end)
    }

    pub fn end(mut self, end: TriggerPoint) -> Self {
        self.end = Some(end);
        self
    }

    /// Fire at most once, then remove the observer
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    /// Only observe while `query` matches
    pub fn media(mut self, query: MediaQuery) -> Self {
        self.media = Some(query);
        self
    }

    pub fn trigger(&self) -> ElementId {
        self.trigger
    }

    /// Element whose style a scrub observer paints
    pub fn animated_target(&self) -> Option<ElementId> {
        match &self.action {
            TriggerAction::Scrub(scrub) => Some(scrub.target),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_dormant(&self) -> bool {
        self.dormant
    }

    /// Scroll progress for scrub observers
    pub fn scrub_progress(&self) -> Option<f32> {
        match &self.action {
            TriggerAction::Scrub(scrub) => Some(scrub.progress),
            _ => None,
        }
    }

    /// Evaluate against the current scroll position. Returns whether the observer fired.
    fn update(
        &mut self,
        viewport: &Viewport,
        previous_scroll: Option<f32>,
        scene: &mut Scene,
        plays: &mut Vec<TweenId>,
    ) -> bool {
        let Some(rect) = scene.rect(self.trigger) else {
            return false;
        };
        let y = viewport.scroll_y;
        let start = self.start.scroll_position(rect, viewport.height);
        let end = self
            .end
            .map(|e| e.scroll_position(rect, viewport.height))
            .unwrap_or(f32::INFINITY);

        let was_active = self.active;
        self.active = y >= start && y <= end;

        match &mut self.action {
            TriggerAction::Play(tweens) => {
                if y >= start && !self.fired {
                    self.fired = true;
                    plays.extend(tweens.iter().copied());
                    return true;
                }
                false
            }
            TriggerAction::Scrub(scrub) => {
                scrub.goal = if end > start {
                    ((y - start) / (end - start)).clamp(0.0, 1.0)
                } else if y >= start {
                    1.0
                } else {
                    0.0
                };
                if scrub.lag_ms == 0 {
                    scrub.advance(0.0, scene);
                }
                false
            }
            TriggerAction::Notify(callback) => {
                let events: SmallVec<[TriggerEvent; 2]> = match (was_active, self.active) {
                    (false, true) if previous_scroll.is_some_and(|p| p > y) => {
                        smallvec![TriggerEvent::EnterBack]
                    }
                    (false, true) => smallvec![TriggerEvent::Enter],
                    (true, false) if y > end => smallvec![TriggerEvent::Leave],
                    (true, false) => smallvec![TriggerEvent::LeaveBack],
                    // A single jump across the whole range still enters and leaves
                    (false, false) => match previous_scroll {
                        Some(p) if p < start && y > end => {
                            smallvec![TriggerEvent::Enter, TriggerEvent::Leave]
                        }
                        Some(p) if p > end && y < start => {
                            smallvec![TriggerEvent::EnterBack, TriggerEvent::LeaveBack]
                        }
                        _ => SmallVec::new(),
                    },
                    (true, true) => SmallVec::new(),
                };
                for &event in &events {
                    trace!(?event, trigger = ?self.trigger, "scroll crossing");
                    callback(event);
                }
                !events.is_empty()
            }
        }
    }
}

/// Every live scroll observer
#[derive(Default)]
pub struct ScrollObserverRegistry {
    triggers: SlotMap<TriggerId, ScrollTrigger>,
    /// Registration order
    order: Vec<TriggerId>,
    last_scroll: Option<f32>,
}

impl ScrollObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. It is evaluated on the next scroll update.
    pub fn observe(&mut self, mut trigger: ScrollTrigger, viewport: &Viewport) -> TriggerId {
        trigger.dormant = trigger.media.is_some_and(|q| !q.matches(viewport));
        let id = self.triggers.insert(trigger);
        self.order.push(id);
        id
    }

    /// Detach an observer. Killing an unknown observer is a no-op.
    pub fn kill(&mut self, id: TriggerId) -> bool {
        self.order.retain(|&t| t != id);
        self.triggers.remove(id).is_some()
    }

    pub fn contains(&self, id: TriggerId) -> bool {
        self.triggers.contains_key(id)
    }

    pub fn get(&self, id: TriggerId) -> Option<&ScrollTrigger> {
        self.triggers.get(id)
    }

    /// Re-evaluate every observer. Returns the tweens that should start playing.
    pub fn on_scroll(&mut self, viewport: &Viewport, scene: &mut Scene) -> Vec<TweenId> {
        let previous = self.last_scroll.replace(viewport.scroll_y);
        let mut plays = Vec::new();
        let mut spent = Vec::new();

        // Backward scrolls visit observers last-registered first, so the
        // crossing nearest the new position is reported last
        let backward = previous.is_some_and(|p| viewport.scroll_y < p);
        let ids: Vec<TriggerId> = if backward {
            self.order.iter().rev().copied().collect()
        } else {
            self.order.clone()
        };

        for id in ids {
            let Some(trigger) = self.triggers.get_mut(id) else {
                continue;
            };
            if trigger.dormant {
                continue;
            }
            if trigger.update(viewport, previous, scene, &mut plays) && trigger.once {
                spent.push(id);
            }
        }

        if !spent.is_empty() {
            self.order.retain(|id| !spent.contains(id));
        }
        for id in spent {
            self.triggers.remove(id);
            debug!(?id, "once observer fired and detached");
        }
        plays
    }

    /// Re-evaluate media queries after a viewport change
    pub fn on_resize(&mut self, viewport: &Viewport, scene: &mut Scene) {
        for (id, trigger) in self.triggers.iter_mut() {
            let Some(query) = trigger.media else {
                continue;
            };
            let matches = query.matches(viewport);
            if !matches && !trigger.dormant {
                trigger.dormant = true;
                trigger.active = false;
                if let TriggerAction::Scrub(scrub) = &mut trigger.action {
                    scrub.revert(scene);
                }
                debug!(?id, "observer dormant, media no longer matches");
            } else if matches && trigger.dormant {
                trigger.dormant = false;
                debug!(?id, "observer resumed, media matches again");
            }
        }
    }

    /// Advance lagging scrubs toward their scroll position
    pub fn tick(&mut self, dt_ms: f32, scene: &mut Scene) {
        for trigger in self.triggers.values_mut() {
            if trigger.dormant {
                continue;
            }
            if let TriggerAction::Scrub(scrub) = &mut trigger.action {
                scrub.advance(dt_ms, scene);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}
