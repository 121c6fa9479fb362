//! Animation scheduler
//!
//! Owns every scheduled tween and advances them each frame.

use crate::tween::{Tween, TweenSpec};
use ruhora_core::{ElementId, Scene};
use slotmap::{new_key_type, SlotMap};
use tracing::{debug, trace};

new_key_type! {
    pub struct TweenId;
}

/// The animation scheduler that ticks all scheduled tweens
pub struct AnimationScheduler {
    tweens: SlotMap<TweenId, Tween>,
    frame_count: u64,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            tweens: SlotMap::with_key(),
            frame_count: 0,
        }
    }

    /// Schedule a tween and start it immediately
    pub fn add(&mut self, spec: TweenSpec, scene: &mut Scene) -> TweenId {
        self.insert(spec, scene, true)
    }

    /// Schedule a tween that waits for [`play`](Self::play)
    pub fn add_paused(&mut self, spec: TweenSpec, scene: &mut Scene) -> TweenId {
        self.insert(spec, scene, false)
    }

    fn insert(&mut self, spec: TweenSpec, scene: &mut Scene, playing: bool) -> TweenId {
        if spec.overwrite {
            self.kill_overlapping(&spec);
        }
        if let Some(from) = spec.from {
            scene.update_style(spec.target, |style| from.apply_to(style));
        }
        self.tweens.insert(Tween::new(spec, playing))
    }

    fn kill_overlapping(&mut self, spec: &TweenSpec) {
        let target = spec.target;
        let before = self.tweens.len();
        self.tweens
            .retain(|_, t| !(t.target() == target && t.spec.to.overlaps(&spec.to)));
        let killed = before - self.tweens.len();
        if killed > 0 {
            trace!(?target, killed, "overwrote running tweens");
        }
    }

    /// Start or resume a tween. Returns `false` for unknown tweens.
    pub fn play(&mut self, id: TweenId) -> bool {
        match self.tweens.get_mut(id) {
            Some(tween) => {
                tween.playing = true;
                true
            }
            None => false,
        }
    }

    /// Freeze a tween where it is
    pub fn pause(&mut self, id: TweenId) -> bool {
        match self.tweens.get_mut(id) {
            Some(tween) => {
                tween.playing = false;
                true
            }
            None => false,
        }
    }

    pub fn resume(&mut self, id: TweenId) -> bool {
        self.play(id)
    }

    /// Drop a tween without running its completion hook
    pub fn kill(&mut self, id: TweenId) -> bool {
        self.tweens.remove(id).is_some()
    }

    /// Drop every tween animating `target`
    pub fn kill_target(&mut self, target: ElementId) -> usize {
        let before = self.tweens.len();
        self.tweens.retain(|_, t| t.target() != target);
        let killed = before - self.tweens.len();
        if killed > 0 {
            debug!(?target, killed, "killed tweens of target");
        }
        killed
    }

    /// Advance every playing tween by `dt_ms`, then run completion hooks
    pub fn tick(&mut self, dt_ms: f32, scene: &mut Scene) {
        self.frame_count += 1;

        let mut finished = Vec::new();
        for (id, tween) in self.tweens.iter_mut() {
            if tween.step(dt_ms, scene) {
                finished.push(id);
            }
        }

        for id in finished {
            if let Some(tween) = self.tweens.remove(id) {
                if let Some(hook) = tween.spec.on_complete {
                    hook(scene);
                }
            }
        }
    }

    /// Scheduled and not yet finished (playing or paused)
    pub fn is_active(&self, id: TweenId) -> bool {
        self.tweens.get(id).is_some_and(|t| !t.finished)
    }

    pub fn is_playing(&self, id: TweenId) -> bool {
        self.tweens.get(id).is_some_and(|t| t.playing && !t.finished)
    }

    /// Whether every tween in `ids` has finished or been killed
    pub fn all_finished(&self, ids: &[TweenId]) -> bool {
        !ids.iter().any(|&id| self.is_active(id))
    }

    /// Number of scheduled tweens
    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    /// Check if any tweens are still moving
    pub fn has_active_animations(&self) -> bool {
        self.tweens.values().any(|t| t.playing && !t.finished)
    }

    /// Number of scheduled tweens animating `target`
    pub fn count_for(&self, target: ElementId) -> usize {
        self.tweens.values().filter(|t| t.target() == target).count()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
