//! Page root
//!
//! Mounts the navbar and every section in document order, runs their
//! choreographies once, and routes pointer and keyboard input to the
//! journal cards, the ritual overlay and the navbar.

use crate::error::Result;
use crate::journal::JournalGroup;
use crate::overlay::{OverlayClick, OverlayState, RitualOverlay};
use crate::sections::{
    About, Essence, Footer, Hero, JournalSection, NavItem, Navbar, RitualShowcase, Section,
};
use ruhora_animation::{MotionRuntime, Teardown};
use ruhora_core::{ElementId, Event, KeyCode, Modifiers, Scene};
use tracing::{debug, warn};
use url::Url;

/// Outcome of routing a click or key press
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageAction {
    Ignored,
    Navigated(NavItem),
    /// The ritual overlay opened for the product with this id
    OverlayOpened(&'static str),
    /// A close was requested; the overlay is closing or already gone
    OverlayClosed,
    /// The journal card with this entry id was toggled
    JournalToggled(u32),
    /// An outbound link should be opened
    OpenLink(Url),
    FocusMoved(ElementId),
}

pub struct Page {
    navbar: Navbar,
    hero: Hero,
    essence: Essence,
    about: About,
    showcase: RitualShowcase,
    journal_section: JournalSection,
    footer: Footer,
    journal: JournalGroup,
    overlay: RitualOverlay,
    teardown: Teardown,
    animated: bool,
    mounted: bool,
}

/// Document position just below `id`
fn bottom_of(scene: &Scene, id: ElementId) -> f32 {
    scene.rect(id).map_or(0.0, |rect| rect.bottom())
}

impl Page {
    /// Mount every section, stacked from the top of the document
    pub fn mount(rt: &mut MotionRuntime) -> Self {
        let scene = rt.scene_mut();
        let mut navbar = Navbar::mount(scene);

        let hero = Hero::mount(scene, 0.0);
        let top = bottom_of(scene, hero.root());
        let essence = Essence::mount(scene, top);
        let top = bottom_of(scene, essence.root());
        let about = About::mount(scene, top);
        let top = bottom_of(scene, about.root());
        let showcase = RitualShowcase::mount(scene, top);
        let top = bottom_of(scene, showcase.root());
        let journal_section = JournalSection::mount(scene, top);
        let top = bottom_of(scene, journal_section.root());
        let footer = Footer::mount(scene, top);

        navbar.bind(NavItem::Home, hero.root());
        navbar.bind(NavItem::Philosophy, essence.root());
        navbar.bind(NavItem::About, about.root());
        navbar.bind(NavItem::Products, showcase.root());
        navbar.bind(NavItem::Journal, journal_section.root());

        let journal = JournalGroup::new(journal_section.cards());
        rt.refresh();
        debug!(
            elements = rt.scene().len(),
            height = rt.viewport().document_height,
            "page mounted"
        );

        Self {
            navbar,
            hero,
            essence,
            about,
            showcase,
            journal_section,
            footer,
            journal,
            overlay: RitualOverlay::new(),
            teardown: Teardown::noop(),
            animated: false,
            mounted: true,
        }
    }

    fn sections(&self) -> [&dyn Section; 7] {
        [
            &self.hero,
            &self.essence,
            &self.about,
            &self.showcase,
            &self.journal_section,
            &self.footer,
            &self.navbar,
        ]
    }

    /// Run every section choreography. Later calls do nothing.
    ///
    /// If a section fails, whatever the earlier sections attached is
    /// released before the error is returned.
    pub fn animate(&mut self, rt: &mut MotionRuntime) -> Result<()> {
        if self.animated || !self.mounted {
            return Ok(());
        }

        let mut teardown = Teardown::noop();
        for section in self.sections() {
            match section.animate(rt) {
                Ok(part) => teardown = teardown.merge(part),
                Err(err) => {
                    teardown.dispose(rt);
                    return Err(err);
                }
            }
        }

        self.teardown = teardown;
        self.animated = true;
        rt.refresh();
        debug!(
            tweens = rt.scheduler().active_count(),
            observers = rt.observers().len(),
            listeners = rt.listener_count(),
            reduced_motion = rt.reduced_motion(),
            "page animated"
        );
        Ok(())
    }

    /// Release every choreography and remove the page. Calling it again
    /// does nothing.
    pub fn unmount(&mut self, rt: &mut MotionRuntime) {
        self.overlay.dismiss(rt);
        self.teardown.dispose(rt);
        if !self.mounted {
            return;
        }
        let roots: Vec<ElementId> = self.sections().iter().map(|s| s.root()).collect();
        for root in roots {
            rt.scene_mut().remove(root);
        }
        self.mounted = false;
        debug!("page unmounted");
    }

    /// Release the choreographies but keep the elements, leaving each one
    /// with the style it had before [`animate`](Self::animate)
    pub fn teardown(&mut self, rt: &mut MotionRuntime) {
        self.teardown.dispose(rt);
    }

    /// Advance one frame
    pub fn tick(&mut self, rt: &mut MotionRuntime, dt_ms: f32) {
        rt.tick(dt_ms);
        self.overlay.tick(rt);
    }

    pub fn scroll(&mut self, rt: &mut MotionRuntime, y: f32) -> bool {
        rt.scroll_to(y)
    }

    pub fn hover(&mut self, rt: &mut MotionRuntime, target: ElementId) {
        rt.dispatch(Event::pointer_enter(target));
    }

    pub fn leave(&mut self, rt: &mut MotionRuntime, target: ElementId) {
        rt.dispatch(Event::pointer_leave(target));
    }

    pub fn focus(&mut self, rt: &mut MotionRuntime, target: ElementId) -> bool {
        rt.focus(target)
    }

    /// Route a click on `target`
    pub fn click(&mut self, rt: &mut MotionRuntime, target: ElementId) -> Result<PageAction> {
        if !rt.scene().contains(target) {
            warn!(?target, "click on unmounted element ignored");
            return Ok(PageAction::Ignored);
        }
        rt.dispatch(Event::click(target));

        if self.overlay.is_showing() {
            return Ok(match self.overlay.click(rt, target)? {
                OverlayClick::Close => PageAction::OverlayClosed,
                OverlayClick::Order(url) => PageAction::OpenLink(url),
                OverlayClick::Inert | OverlayClick::Outside => PageAction::Ignored,
            });
        }

        if let Some(item) = self.navbar.item_for(target) {
            self.navbar.navigate(rt, item);
            return Ok(PageAction::Navigated(item));
        }
        if target == self.hero.cta() {
            self.navbar.navigate(rt, NavItem::Products);
            return Ok(PageAction::Navigated(NavItem::Products));
        }
        if let Some(block) = self.showcase.block_for_cta(target) {
            let product = block.product();
            self.overlay.open(rt, product)?;
            return Ok(PageAction::OverlayOpened(product.id));
        }
        if let Some(block) = self.showcase.block_for_link(target) {
            let url = crate::links::order_link(block.product().order_message)?;
            return Ok(PageAction::OpenLink(url));
        }
        if let Some(card) = self.journal_section.card_for_toggle(target) {
            let entry = card.entry.id;
            self.journal.toggle(rt, entry)?;
            return Ok(PageAction::JournalToggled(entry));
        }
        if let Some(link) = self.footer.link_for(target) {
            return Ok(PageAction::OpenLink(link.url()?));
        }
        Ok(PageAction::Ignored)
    }

    /// Route a key press to the overlay or the focused element
    pub fn key(
        &mut self,
        rt: &mut MotionRuntime,
        key: KeyCode,
        modifiers: Modifiers,
    ) -> Result<PageAction> {
        let focused = rt.scene().focused();
        let event = rt.dispatch(Event::key_down(focused, key, modifiers));
        if event.default_prevented {
            return Ok(PageAction::Ignored);
        }

        if self.overlay.is_open() {
            if self.overlay.key(rt, key, modifiers) {
                if key == KeyCode::ESCAPE {
                    return Ok(PageAction::OverlayClosed);
                }
                return Ok(rt
                    .scene()
                    .focused()
                    .map_or(PageAction::Ignored, PageAction::FocusMoved));
            }
        } else if self.overlay.is_showing() {
            // Closing: the panel no longer takes input
            return Ok(PageAction::Ignored);
        }

        match key {
            KeyCode::TAB => Ok(rt
                .tab(modifiers.shift())
                .map_or(PageAction::Ignored, PageAction::FocusMoved)),
            KeyCode::ENTER | KeyCode::SPACE => match focused {
                Some(id) => self.click(rt, id),
                None => Ok(PageAction::Ignored),
            },
            _ => Ok(PageAction::Ignored),
        }
    }

    pub fn navbar(&self) -> &Navbar {
        &self.navbar
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn showcase(&self) -> &RitualShowcase {
        &self.showcase
    }

    pub fn journal_section(&self) -> &JournalSection {
        &self.journal_section
    }

    pub fn footer(&self) -> &Footer {
        &self.footer
    }

    pub fn journal(&self) -> &JournalGroup {
        &self.journal
    }

    pub fn overlay(&self) -> &RitualOverlay {
        &self.overlay
    }

    pub fn overlay_state(&self) -> OverlayState {
        self.overlay.state()
    }

    /// Overlay open or closing
    pub fn is_overlay_open(&self) -> bool {
        self.overlay.is_showing()
    }

    pub fn expanded_entry(&self) -> Option<u32> {
        self.journal.expanded()
    }

    pub fn active_nav(&self, rt: &MotionRuntime) -> NavItem {
        self.navbar.active(rt)
    }

    /// Every element a section choreography reveals
    pub fn controlled(&self) -> Vec<ElementId> {
        self.sections()
            .iter()
            .flat_map(|section| section.controlled())
            .collect()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }
}
