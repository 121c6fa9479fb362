//! Section choreographies
//!
//! Each section mounts its own elements, keeps the handles, and exposes an
//! initializer that returns a [`Teardown`]. Under reduced motion every
//! initializer paints its controlled elements visible and attaches nothing.

mod about;
mod essence;
mod footer;
mod hero;
mod journal;
mod navbar;
mod showcase;

pub use about::About;
pub use essence::Essence;
pub use footer::Footer;
pub use hero::Hero;
pub use journal::{CardHandles, JournalSection};
pub use navbar::{NavItem, Navbar};
pub use showcase::{ProductBlock, RitualShowcase};

use crate::error::Result;
use ruhora_animation::{MotionRuntime, Teardown};
use ruhora_core::{ElementId, Rect, Scene};

/// A page section with a scroll or load choreography
pub trait Section {
    /// Outer element, used as the scroll trigger and nav anchor
    fn root(&self) -> ElementId;

    /// Elements the choreography reveals
    fn controlled(&self) -> Vec<ElementId>;

    /// Attach tweens, observers and listeners
    fn animate(&self, rt: &mut MotionRuntime) -> Result<Teardown>;
}

/// Paint `controlled` visible and attach nothing
pub(crate) fn settle(rt: &mut MotionRuntime, controlled: &[ElementId]) -> Teardown {
    rt.reveal_now(controlled);
    Teardown::noop()
}

/// Stacks children of a section vertically in document space
pub(crate) struct Column<'a> {
    scene: &'a mut Scene,
    root: ElementId,
    top: f32,
    cursor: f32,
    gap: f32,
}

impl<'a> Column<'a> {
    /// Mount a section root at `top`; its height is fixed by [`finish`](Self::finish)
    pub fn new(scene: &'a mut Scene, label: &str, top: f32, padding: f32) -> Self {
        let root = scene.insert(label, Rect::new(top, 0.0));
        Self {
            scene,
            root,
            top,
            cursor: top + padding,
            gap: 24.0,
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn scene(&mut self) -> &mut Scene {
        self.scene
    }

    /// Mount a child of the root below the previous one
    pub fn push(&mut self, label: impl Into<String>, height: f32) -> ElementId {
        let parent = self.root;
        self.push_under(parent, label, height)
    }

    /// Mount a child of `parent` below the previous element
    pub fn push_under(&mut self, parent: ElementId, label: impl Into<String>, height: f32) -> ElementId {
        let id = self
            .scene
            .insert_child(parent, label, Rect::new(self.cursor, height));
        self.cursor += height + self.gap;
        id
    }

    /// Mount a child of `parent` spanning `height` from the current cursor
    /// without advancing it; later children are laid out inside it
    pub fn open(&mut self, parent: ElementId, label: impl Into<String>, height: f32) -> ElementId {
        self.scene
            .insert_child(parent, label, Rect::new(self.cursor, height))
    }

    pub fn skip(&mut self, px: f32) {
        self.cursor += px;
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    /// Fix the root height to enclose its children plus `padding`
    pub fn finish(self, padding: f32) -> ElementId {
        let height = self.cursor - self.gap + padding - self.top;
        self.scene.set_rect(self.root, Rect::new(self.top, height));
        self.root
    }
}
