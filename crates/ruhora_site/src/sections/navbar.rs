//! Navigation bar
//!
//! Tracks which section sits under the middle of the viewport and scrolls
//! to a section when its item is clicked.

use super::Section;
use crate::error::{Result, SiteError};
use ruhora_animation::{EasePreset, MotionRuntime, ScrollTrigger, Teardown, TriggerEvent, TriggerPoint};
use ruhora_core::{ElementId, Rect, Scene};
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

const SCROLL_MS: u32 = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavItem {
    Home,
    Philosophy,
    About,
    Products,
    Journal,
}

impl NavItem {
    pub const ALL: [NavItem; 5] = [
        NavItem::Home,
        NavItem::Philosophy,
        NavItem::About,
        NavItem::Products,
        NavItem::Journal,
    ];

    /// Anchor id of the section this item points at
    pub fn key(self) -> &'static str {
        match self {
            NavItem::Home => "home",
            NavItem::Philosophy => "philosophy",
            NavItem::About => "about",
            NavItem::Products => "products",
            NavItem::Journal => "journal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NavItem::Home => "Home",
            NavItem::Philosophy => "Philosophy",
            NavItem::About => "About",
            NavItem::Products => "Products",
            NavItem::Journal => "Journal",
        }
    }

    pub fn from_key(key: &str) -> Option<NavItem> {
        Self::ALL.into_iter().find(|item| item.key() == key)
    }

    fn index(self) -> usize {
        self as usize
    }
}

pub struct Navbar {
    root: ElementId,
    buttons: [ElementId; 5],
    anchors: [Option<ElementId>; 5],
    active: Rc<Cell<NavItem>>,
    tracking: Cell<bool>,
}

impl Navbar {
    /// Mount the bar. Sections are bound afterwards with [`bind`](Self::bind).
    pub fn mount(scene: &mut Scene) -> Self {
        let root = scene.insert("navbar", Rect::new(0.0, 0.0));
        let buttons = NavItem::ALL.map(|item| {
            let id = scene.insert_child(root, format!("nav-{}", item.key()), Rect::new(0.0, 0.0));
            scene.set_focusable(id, true);
            id
        });
        Self {
            root,
            buttons,
            anchors: [None; 5],
            active: Rc::new(Cell::new(NavItem::Home)),
            tracking: Cell::new(false),
        }
    }

    /// Point `item` at a section root
    pub fn bind(&mut self, item: NavItem, section: ElementId) {
        self.anchors[item.index()] = Some(section);
    }

    pub fn button(&self, item: NavItem) -> ElementId {
        self.buttons[item.index()]
    }

    /// Item whose button is `id`
    pub fn item_for(&self, id: ElementId) -> Option<NavItem> {
        NavItem::ALL
            .into_iter()
            .find(|item| self.buttons[item.index()] == id)
    }

    /// Item of the section under the middle of the viewport
    pub fn active(&self, rt: &MotionRuntime) -> NavItem {
        if self.tracking.get() {
            return self.active.get();
        }
        // Without observers, the same rule evaluated against the current position
        let viewport = rt.viewport();
        let start = TriggerPoint::top(0.5);
        NavItem::ALL
            .into_iter()
            .filter(|item| {
                self.anchors[item.index()]
                    .and_then(|id| rt.scene().rect(id))
                    .is_some_and(|rect| viewport.scroll_y >= start.scroll_position(rect, viewport.height))
            })
            .last()
            .unwrap_or(NavItem::Home)
    }

    /// Scroll to the section behind `item`. Returns whether a scroll started.
    pub fn navigate(&self, rt: &mut MotionRuntime, item: NavItem) -> bool {
        let Some(top) = self.anchors[item.index()]
            .and_then(|id| rt.scene().rect(id))
            .map(|rect| rect.top)
        else {
            debug!(item = item.key(), "navigation target not mounted");
            return false;
        };
        rt.smooth_scroll_to(top, SCROLL_MS, EasePreset::Gentle)
    }
}

impl Section for Navbar {
    fn root(&self) -> ElementId {
        self.root
    }

    fn controlled(&self) -> Vec<ElementId> {
        Vec::new()
    }

    fn animate(&self, rt: &mut MotionRuntime) -> Result<Teardown> {
        if rt.reduced_motion() {
            return Ok(Teardown::noop());
        }

        let teardown = rt.scope(|scope| {
            for item in NavItem::ALL {
                let Some(section) = self.anchors[item.index()] else {
                    continue;
                };
                let active = Rc::clone(&self.active);
                scope.observe(ScrollTrigger::notify(
                    section,
                    TriggerPoint::top(0.5),
                    TriggerPoint::bottom(0.5),
                    move |event| {
                        if matches!(event, TriggerEvent::Enter | TriggerEvent::EnterBack) {
                            active.set(item);
                        }
                    },
                ));
            }
            Ok::<_, SiteError>(())
        })?;
        self.tracking.set(true);
        Ok(teardown)
    }
}
