//! Journal section: header, card grid and card hover

use super::{settle, Column, Section};
use crate::content::{journal_entries, JournalEntry};
use crate::error::{Result, SiteError};
use ruhora_animation::{
    DurationPreset, EasePreset, Edge, MotionRuntime, Props, ScrollDefaults, Stagger, Teardown,
    Timeline, TimelineStep, TriggerPoint, TweenSpec,
};
use ruhora_core::events::event_types;
use ruhora_core::{ElementId, Height, Rect, Scene};

pub const EYEBROW: &str = "JOURNAL";
pub const TITLE: &str = "The Brand Voice";
pub const SUBTITLE: &str = "Essays on wellness as a balance of mind, body, and spirit.";

const CARD_GAP: f32 = 32.0;
const IMAGE_HEIGHT: f32 = 280.0;
const FULL_TEXT_HEIGHT: f32 = 168.0;
const HOVER_MS: u32 = 300;

/// Handles of one journal card
#[derive(Clone, Copy, Debug)]
pub struct CardHandles {
    pub entry: &'static JournalEntry,
    pub card: ElementId,
    pub full_text: ElementId,
    pub toggle: ElementId,
}

pub struct JournalSection {
    root: ElementId,
    header: ElementId,
    grid: ElementId,
    cards: Vec<CardHandles>,
}

impl JournalSection {
    pub fn mount(scene: &mut Scene, top: f32) -> Self {
        let mut column = Column::new(scene, "journal", top, 140.0);
        let header = column.push("journal-header", 140.0);
        column.skip(40.0);

        let grid_top = column.cursor();
        let card_height = IMAGE_HEIGHT + 220.0;
        let grid = column.push("journal-cards", card_height);
        let scene = column.scene();
        let cards = journal_entries()
            .iter()
            .map(|entry| mount_card(scene, grid, grid_top, card_height, entry))
            .collect();
        let root = column.finish(140.0);

        Self {
            root,
            header,
            grid,
            cards,
        }
    }

    pub fn cards(&self) -> &[CardHandles] {
        &self.cards
    }

    /// Card whose toggle control is `id`
    pub fn card_for_toggle(&self, id: ElementId) -> Option<&CardHandles> {
        self.cards.iter().find(|c| c.toggle == id)
    }
}

fn mount_card(
    scene: &mut Scene,
    grid: ElementId,
    top: f32,
    height: f32,
    entry: &'static JournalEntry,
) -> CardHandles {
    let id = entry.id;
    let card = scene.insert_child(grid, format!("journal-card-{id}"), Rect::new(top, height));
    scene.insert_child(card, format!("journal-image-{id}"), Rect::new(top, IMAGE_HEIGHT));
    let body = top + IMAGE_HEIGHT + CARD_GAP;
    scene.insert_child(card, format!("journal-title-{id}"), Rect::new(body, 64.0));
    scene.insert_child(card, format!("journal-preview-{id}"), Rect::new(body + 72.0, 56.0));

    let full_text = scene.insert_child(
        card,
        format!("journal-full-{id}"),
        Rect::new(body + 136.0, FULL_TEXT_HEIGHT),
    );
    scene.set_natural_height(full_text, FULL_TEXT_HEIGHT);
    scene.update_style(full_text, |s| {
        s.display = false;
        s.opacity = 0.0;
        s.height = Height::Px(0.0);
    });

    let toggle = scene.insert_child(
        card,
        format!("journal-toggle-{id}"),
        Rect::new(body + 144.0, 24.0),
    );
    scene.set_focusable(toggle, true);

    CardHandles {
        entry,
        card,
        full_text,
        toggle,
    }
}

impl Section for JournalSection {
    fn root(&self) -> ElementId {
        self.root
    }

    fn controlled(&self) -> Vec<ElementId> {
        let mut ids = vec![self.header, self.grid];
        ids.extend(self.cards.iter().map(|c| c.card));
        ids
    }

    fn animate(&self, rt: &mut MotionRuntime) -> Result<Teardown> {
        if rt.reduced_motion() {
            return Ok(settle(rt, &self.controlled()));
        }

        rt.scope(|scope| {
            scope.reveal_on_scroll(
                self.root,
                ScrollDefaults::START,
                Timeline::new().step(
                    TimelineStep::from_to([self.header], Props::concealed(12.0), Props::revealed())
                        .duration(DurationPreset::Normal.ms())
                        .ease(EasePreset::Gentle),
                ),
            );
            scope.reveal_on_scroll(
                self.grid,
                TriggerPoint::new(Edge::Top, 0.8)?,
                Timeline::new().step(
                    TimelineStep::from_to([self.grid], Props::concealed(12.0), Props::revealed())
                        .duration(DurationPreset::Slow.ms())
                        .ease(EasePreset::Gentle),
                ),
            );
            scope.reveal_on_scroll(
                self.grid,
                ScrollDefaults::START,
                Timeline::new().step(
                    TimelineStep::from_to(
                        self.cards.iter().map(|c| c.card),
                        Props::concealed(12.0),
                        Props::revealed(),
                    )
                    .duration(DurationPreset::Normal.ms())
                    .ease(EasePreset::Gentle)
                    .stagger(Stagger::new(150)),
                ),
            );

            for handles in &self.cards {
                let card = handles.card;
                let lift = move |elevation: f32| {
                    TweenSpec::to(card, Props::elevation(elevation))
                        .duration(HOVER_MS)
                        .ease(EasePreset::Soft)
                        .overwrite()
                };
                scope.listen(card, event_types::POINTER_ENTER, move |_, stage| {
                    stage.tween(lift(1.0));
                });
                scope.listen(card, event_types::POINTER_LEAVE, move |_, stage| {
                    stage.tween(lift(0.0));
                });
            }
            Ok::<_, SiteError>(())
        })
    }
}
