//! Ritual overlay
//!
//! A modal panel listing a product's ritual steps. The overlay is mounted
//! into the scene when opened and removed once its closing animation has
//! finished. While it is showing, body scroll is locked and Tab cycles
//! through the panel's controls only.
//!
//! State transitions:
//!
//! ```text
//! Closed --open--> Open --close--> Closing --(timeline done)--> Closed
//! ```
//!
//! Open requests outside `Closed` and close requests outside `Open` are
//! ignored.

use crate::content::Product;
use crate::error::{Result, SiteError};
use crate::links;
use ruhora_animation::{
    Easing, EasePreset, MotionRuntime, Position, Props, Stagger, Teardown, Timeline,
    TimelineStep, TweenId,
};
use ruhora_core::{ElementId, KeyCode, Modifiers, Rect, Scene};
use tracing::debug;
use url::Url;

const PANEL_OFFSET: f32 = 20.0;
const STEP_OFFSET: f32 = 8.0;
const PANEL_MARGIN: f32 = 48.0;
const STEP_HEIGHT: f32 = 72.0;

/// Where the overlay is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayState {
    Closed,
    Open(&'static Product),
    Closing(&'static Product),
}

/// What a click inside the overlay resolved to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlayClick {
    /// Click landed outside the overlay
    Outside,
    /// Click landed on the panel without hitting a control
    Inert,
    /// A close was requested
    Close,
    /// The order link was followed
    Order(Url),
}

/// Elements of a mounted overlay
struct Mounted {
    backdrop: ElementId,
    panel: ElementId,
    close_button: ElementId,
    steps: Vec<ElementId>,
    order: ElementId,
    /// Focus to restore after removal
    return_focus: Option<ElementId>,
    intro: Teardown,
    closing: Vec<TweenId>,
}

impl Mounted {
    fn mount(scene: &mut Scene, product: &Product, top: f32, viewport_height: f32) -> Self {
        let backdrop = scene.insert("ritual-overlay-backdrop", Rect::new(top, viewport_height));
        let panel_top = top + PANEL_MARGIN;
        let panel = scene.insert_child(
            backdrop,
            "ritual-overlay-panel",
            Rect::new(panel_top, (viewport_height - 2.0 * PANEL_MARGIN).max(0.0)),
        );

        let close_button = scene.insert_child(panel, "ritual-overlay-close", Rect::new(panel_top + 16.0, 40.0));
        scene.set_focusable(close_button, true);
        scene.insert_child(panel, "ritual-overlay-title", Rect::new(panel_top + 72.0, 48.0));

        let mut cursor = panel_top + 144.0;
        let steps = (1..=product.ritual.steps.len())
            .map(|n| {
                let id = scene.insert_child(panel, format!("ritual-overlay-step-{n}"), Rect::new(cursor, STEP_HEIGHT));
                cursor += STEP_HEIGHT + 16.0;
                id
            })
            .collect();

        let order = scene.insert_child(panel, "ritual-overlay-order", Rect::new(cursor + 16.0, 56.0));
        scene.set_focusable(order, true);

        Self {
            backdrop,
            panel,
            close_button,
            steps,
            order,
            return_focus: scene.focused(),
            intro: Teardown::noop(),
            closing: Vec::new(),
        }
    }

    /// Focusable controls of the panel in document order
    fn focusables(&self, scene: &Scene) -> Vec<ElementId> {
        scene
            .focusables()
            .into_iter()
            .filter(|&id| self.contains(scene, id))
            .collect()
    }

    fn contains(&self, scene: &Scene, mut id: ElementId) -> bool {
        loop {
            if id == self.panel {
                return true;
            }
            match scene.get(id).and_then(|el| el.parent) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    fn intro_timeline(&self) -> Timeline {
        Timeline::new()
            .step(
                TimelineStep::from_to([self.backdrop], Props::opacity(0.0), Props::opacity(1.0))
                    .duration(400)
                    .ease(EasePreset::Gentle),
            )
            .step_at(
                TimelineStep::from_to(
                    [self.panel],
                    Props::translate_y(PANEL_OFFSET),
                    Props::translate_y(0.0),
                )
                .duration(600)
                .ease(EasePreset::Gentle),
                Position::Overlap(200),
            )
            .step_at(
                TimelineStep::from_to(
                    self.steps.iter().copied(),
                    Props::concealed(STEP_OFFSET),
                    Props::revealed(),
                )
                .duration(400)
                .ease(EasePreset::Soft)
                .stagger(Stagger::new(80)),
                Position::Overlap(300),
            )
    }

    fn outro_timeline(&self) -> Timeline {
        Timeline::new()
            .step(
                TimelineStep::to([self.panel], Props::translate_y(PANEL_OFFSET))
                    .duration(400)
                    .ease(Easing::EaseInCubic),
            )
            .step_at(
                TimelineStep::to([self.backdrop], Props::opacity(0.0))
                    .duration(300)
                    .ease(Easing::EaseInCubic),
                Position::Overlap(200),
            )
    }
}

/// The ritual overlay and its lifecycle
pub struct RitualOverlay {
    state: OverlayState,
    mounted: Option<Mounted>,
}

impl Default for RitualOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl RitualOverlay {
    pub fn new() -> Self {
        Self {
            state: OverlayState::Closed,
            mounted: None,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// Open or closing
    pub fn is_showing(&self) -> bool {
        !matches!(self.state, OverlayState::Closed)
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, OverlayState::Open(_))
    }

    /// Product the overlay is showing
    pub fn product(&self) -> Option<&'static Product> {
        match self.state {
            OverlayState::Closed => None,
            OverlayState::Open(product) | OverlayState::Closing(product) => Some(product),
        }
    }

    pub fn close_button(&self) -> Option<ElementId> {
        self.mounted.as_ref().map(|m| m.close_button)
    }

    pub fn backdrop(&self) -> Option<ElementId> {
        self.mounted.as_ref().map(|m| m.backdrop)
    }

    pub fn order_button(&self) -> Option<ElementId> {
        self.mounted.as_ref().map(|m| m.order)
    }

    /// Show the ritual of `product`. Returns false when the overlay is
    /// already showing.
    pub fn open(&mut self, rt: &mut MotionRuntime, product: &'static Product) -> Result<bool> {
        if self.state != OverlayState::Closed {
            debug!(product = product.id, "overlay already showing, open ignored");
            return Ok(false);
        }

        let (top, height) = (rt.viewport().scroll_y, rt.viewport().height);
        let mut mounted = Mounted::mount(rt.scene_mut(), product, top, height);
        rt.lock_scroll();
        rt.focus(mounted.close_button);

        if rt.reduced_motion() {
            let stage = rt.stage_mut();
            stage.set(mounted.backdrop, Props::opacity(1.0));
            stage.set(mounted.panel, Props::revealed());
            for &step in &mounted.steps {
                stage.set(step, Props::revealed());
            }
        } else {
            let timeline = mounted.intro_timeline();
            mounted.intro = rt.scope(|scope| {
                scope.timeline(timeline);
                Ok::<_, SiteError>(())
            })?;
        }

        self.mounted = Some(mounted);
        self.state = OverlayState::Open(product);
        debug!(product = product.id, "overlay opened");
        Ok(true)
    }

    /// Start closing. Returns false unless the overlay is open.
    pub fn close(&mut self, rt: &mut MotionRuntime) -> bool {
        let OverlayState::Open(product) = self.state else {
            debug!(state = ?self.state, "close ignored");
            return false;
        };

        if rt.reduced_motion() {
            self.remove(rt);
            return true;
        }

        let Some(mounted) = self.mounted.as_mut() else {
            self.state = OverlayState::Closed;
            return true;
        };
        let stage = rt.stage_mut();
        mounted.closing = mounted
            .outro_timeline()
            .build()
            .into_iter()
            .map(|spec| stage.tween(spec.overwrite()))
            .collect();
        self.state = OverlayState::Closing(product);
        debug!(product = product.id, "overlay closing");
        true
    }

    /// Remove the overlay once its closing animation has finished
    pub fn tick(&mut self, rt: &mut MotionRuntime) {
        if !matches!(self.state, OverlayState::Closing(_)) {
            return;
        }
        let done = self
            .mounted
            .as_ref()
            .map_or(true, |m| rt.scheduler().all_finished(&m.closing));
        if done {
            self.remove(rt);
        }
    }

    /// Remove the overlay immediately, skipping any closing animation
    pub fn dismiss(&mut self, rt: &mut MotionRuntime) {
        if self.is_showing() {
            self.remove(rt);
        }
    }

    fn remove(&mut self, rt: &mut MotionRuntime) {
        if let Some(mut mounted) = self.mounted.take() {
            for id in mounted.closing.drain(..) {
                rt.stage_mut().scheduler.kill(id);
            }
            let focus_inside = rt
                .scene()
                .focused()
                .is_some_and(|id| mounted.contains(rt.scene(), id));
            rt.scene_mut().remove(mounted.backdrop);
            mounted.intro.dispose(rt);
            if focus_inside {
                rt.scene_mut().blur();
            }
            if let Some(previous) = mounted.return_focus {
                rt.focus(previous);
            }
        }
        rt.unlock_scroll();
        self.state = OverlayState::Closed;
        debug!("overlay removed");
    }

    /// Resolve a click on `target`
    pub fn click(&mut self, rt: &mut MotionRuntime, target: ElementId) -> Result<OverlayClick> {
        let Some(mounted) = self.mounted.as_ref() else {
            return Ok(OverlayClick::Outside);
        };

        if target == mounted.close_button || target == mounted.backdrop {
            self.close(rt);
            return Ok(OverlayClick::Close);
        }
        if target == mounted.order {
            let Some(product) = self.product() else {
                return Ok(OverlayClick::Inert);
            };
            return Ok(OverlayClick::Order(links::order_link(product.order_message)?));
        }
        if mounted.contains(rt.scene(), target) {
            return Ok(OverlayClick::Inert);
        }
        Ok(OverlayClick::Outside)
    }

    /// Handle a key press while the overlay is open. Returns whether the
    /// key was consumed.
    pub fn key(&mut self, rt: &mut MotionRuntime, key: KeyCode, modifiers: Modifiers) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            KeyCode::ESCAPE => self.close(rt),
            KeyCode::TAB => {
                self.cycle_focus(rt, modifiers.shift());
                true
            }
            _ => false,
        }
    }

    /// Move focus within the panel, wrapping at both ends
    fn cycle_focus(&self, rt: &mut MotionRuntime, backwards: bool) {
        let Some(mounted) = self.mounted.as_ref() else {
            return;
        };
        let controls = mounted.focusables(rt.scene());
        let (Some(&first), Some(&last)) = (controls.first(), controls.last()) else {
            return;
        };

        let current = rt
            .scene()
            .focused()
            .and_then(|id| controls.iter().position(|&c| c == id));
        let next = match (current, backwards) {
            (None, false) => first,
            (None, true) => last,
            (Some(0), true) => last,
            (Some(i), true) => controls[i - 1],
            (Some(i), false) if i + 1 == controls.len() => first,
            (Some(i), false) => controls[i + 1],
        };
        rt.focus(next);
    }
}
