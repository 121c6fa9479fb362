//! Journal card group
//!
//! Each card runs a two-state machine (collapsed, expanded). The group keeps
//! at most one card expanded: expanding a card first collapses whichever
//! card is open.
//!
//! Expanding shows the full text and animates its height from zero to its
//! natural height, then releases the height to `auto` so the text can reflow.
//! Collapsing reverses that and hides the text once it reaches zero. Under
//! reduced motion both directions snap.

use crate::error::{Result, SiteError};
use crate::sections::CardHandles;
use ruhora_animation::{EasePreset, MotionRuntime, Props, TweenSpec};
use ruhora_core::{EventId, FsmId, FsmRuntime, Height, StateId, StateMachine};
use tracing::debug;

pub const COLLAPSED: StateId = 0;
pub const EXPANDED: StateId = 1;

const TOGGLE: EventId = 1;

const EXPAND_MS: u32 = 500;
const COLLAPSE_MS: u32 = 400;
const LIFT_MS: u32 = 400;
const LIFT_PX: f32 = -4.0;

pub const READ_MORE: &str = "Read more";
pub const SHOW_LESS: &str = "Show less";

struct Card {
    handles: CardHandles,
    fsm: FsmId,
}

pub struct JournalGroup {
    machines: FsmRuntime,
    cards: Vec<Card>,
}

fn card_machine() -> StateMachine {
    StateMachine::new(COLLAPSED)
        .on(COLLAPSED, TOGGLE, EXPANDED)
        .on(EXPANDED, TOGGLE, COLLAPSED)
}

impl JournalGroup {
    pub fn new(cards: &[CardHandles]) -> Self {
        let mut machines = FsmRuntime::new();
        let cards = cards
            .iter()
            .map(|&handles| Card {
                handles,
                fsm: machines.create(card_machine()),
            })
            .collect();
        Self { machines, cards }
    }

    fn card(&self, entry: u32) -> Result<&Card> {
        self.cards
            .iter()
            .find(|c| c.handles.entry.id == entry)
            .ok_or(SiteError::UnknownJournalEntry(entry))
    }

    /// Entry of the expanded card, if any
    pub fn expanded(&self) -> Option<u32> {
        let fsm = self.machines.in_state(EXPANDED).next()?;
        self.cards
            .iter()
            .find(|c| c.fsm == fsm)
            .map(|c| c.handles.entry.id)
    }

    pub fn is_expanded(&self, entry: u32) -> bool {
        self.card(entry)
            .ok()
            .and_then(|c| self.machines.current_state(c.fsm))
            == Some(EXPANDED)
    }

    /// Text of the card's toggle control
    pub fn toggle_label(&self, entry: u32) -> &'static str {
        if self.is_expanded(entry) {
            SHOW_LESS
        } else {
            READ_MORE
        }
    }

    /// Handle a click on a card's toggle
    pub fn toggle(&mut self, rt: &mut MotionRuntime, entry: u32) -> Result<()> {
        let card = self.card(entry)?;
        let (target, handles) = (card.fsm, card.handles);

        if self.machines.current_state(target) == Some(EXPANDED) {
            self.machines.send(target, TOGGLE);
            collapse(rt, &handles);
            debug!(entry, "journal card collapsed");
            return Ok(());
        }

        let open: Vec<FsmId> = self.machines.in_state(EXPANDED).collect();
        for fsm in open {
            self.machines.send(fsm, TOGGLE);
            if let Some(other) = self.cards.iter().find(|c| c.fsm == fsm) {
                collapse(rt, &other.handles);
            }
        }

        self.machines.send(target, TOGGLE);
        expand(rt, &handles);
        debug!(entry, "journal card expanded");
        Ok(())
    }
}

fn expand(rt: &mut MotionRuntime, handles: &CardHandles) {
    let full = handles.full_text;
    let natural = rt.scene().get(full).map(|el| el.natural_height);

    if rt.reduced_motion() {
        rt.scene_mut().update_style(full, |s| {
            s.display = true;
            s.opacity = 1.0;
            s.height = Height::Auto;
        });
        return;
    }

    let Some(natural) = natural else {
        return;
    };
    let stage = rt.stage_mut();
    stage.scene.update_style(full, |s| s.display = true);
    stage.tween(
        TweenSpec::from_to(
            full,
            Props::height(0.0).with_opacity(0.0),
            Props::height(natural).with_opacity(1.0),
        )
        .duration(EXPAND_MS)
        .ease(EasePreset::Gentle)
        .overwrite()
        .on_complete(move |scene| {
            scene.update_style(full, |s| s.height = Height::Auto);
        }),
    );
    stage.tween(
        TweenSpec::to(handles.card, Props::translate_y(LIFT_PX))
            .duration(LIFT_MS)
            .ease(EasePreset::Gentle),
    );
}

fn collapse(rt: &mut MotionRuntime, handles: &CardHandles) {
    let full = handles.full_text;

    if rt.reduced_motion() {
        rt.scene_mut().update_style(full, |s| {
            s.display = false;
            s.opacity = 0.0;
        });
        return;
    }

    let stage = rt.stage_mut();
    stage.tween(
        TweenSpec::to(full, Props::height(0.0).with_opacity(0.0))
            .duration(COLLAPSE_MS)
            .ease(EasePreset::Gentle)
            .overwrite()
            .on_complete(move |scene| {
                scene.update_style(full, |s| s.display = false);
            }),
    );
    stage.tween(
        TweenSpec::to(handles.card, Props::translate_y(0.0))
            .duration(LIFT_MS)
            .ease(EasePreset::Gentle),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::JournalSection;
    use ruhora_core::Viewport;

    fn group(reduced: bool) -> (MotionRuntime, JournalSection, JournalGroup) {
        let mut rt = MotionRuntime::new(Viewport::new(1440.0, 900.0), reduced);
        let section = JournalSection::mount(rt.scene_mut(), 0.0);
        let group = JournalGroup::new(section.cards());
        (rt, section, group)
    }

    fn run(rt: &mut MotionRuntime, frames: usize) {
        for _ in 0..frames {
            rt.tick(16.0);
        }
    }

    #[test]
    fn test_expand_then_release_height() {
        let (mut rt, section, mut group) = group(false);
        let full = section.cards()[0].full_text;

        group.toggle(&mut rt, 1).unwrap();
        assert!(rt.scene().style(full).unwrap().display);
        rt.tick(250.0);
        let height = rt.scene().get(full).unwrap().rendered_height();
        assert!(height > 0.0 && height < 168.0);

        run(&mut rt, 40);
        let style = *rt.scene().style(full).unwrap();
        assert_eq!(style.height, Height::Auto);
        assert_eq!(style.opacity, 1.0);
        assert_eq!(
            rt.scene().style(section.cards()[0].card).map(|s| s.translate_y),
            Some(LIFT_PX)
        );
        assert_eq!(group.toggle_label(1), SHOW_LESS);
    }

    #[test]
    fn test_collapse_hides_on_completion() {
        let (mut rt, section, mut group) = group(false);
        let full = section.cards()[2].full_text;

        group.toggle(&mut rt, 3).unwrap();
        run(&mut rt, 40);
        group.toggle(&mut rt, 3).unwrap();
        assert_eq!(group.expanded(), None);
        rt.tick(200.0);
        assert!(rt.scene().style(full).unwrap().display);

        run(&mut rt, 20);
        let el = rt.scene().get(full).unwrap();
        assert!(!el.style.display);
        assert_eq!(el.rendered_height(), 0.0);
        assert_eq!(group.toggle_label(3), READ_MORE);
    }

    #[test]
    fn test_only_one_card_expanded() {
        let (mut rt, _, mut group) = group(false);

        group.toggle(&mut rt, 1).unwrap();
        assert_eq!(group.expanded(), Some(1));
        group.toggle(&mut rt, 2).unwrap();
        assert_eq!(group.expanded(), Some(2));
        assert!(!group.is_expanded(1));
        group.toggle(&mut rt, 2).unwrap();
        assert_eq!(group.expanded(), None);
    }

    #[test]
    fn test_reduced_motion_snaps() {
        let (mut rt, section, mut group) = group(true);
        let full = section.cards()[1].full_text;

        group.toggle(&mut rt, 2).unwrap();
        assert_eq!(rt.scheduler().active_count(), 0);
        let style = *rt.scene().style(full).unwrap();
        assert!(style.display);
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.height, Height::Auto);

        group.toggle(&mut rt, 2).unwrap();
        assert!(!rt.scene().style(full).unwrap().display);
    }

    #[test]
    fn test_unknown_entry() {
        let (mut rt, _, mut group) = group(false);
        assert!(matches!(
            group.toggle(&mut rt, 9),
            Err(SiteError::UnknownJournalEntry(9))
        ));
    }
}
