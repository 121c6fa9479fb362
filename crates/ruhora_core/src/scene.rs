//! Element scene
//!
//! The scene is the single-writer store of every element on the page. All
//! operations tolerate stale handles: touching an element that has been
//! removed is a no-op, never a panic.

use crate::element::{Element, ElementId, Rect, VisualState};
use crate::error::{CoreError, Result};
use slotmap::SlotMap;
use tracing::debug;

/// Store of all mounted elements in document order
#[derive(Default)]
pub struct Scene {
    elements: SlotMap<ElementId, Element>,
    /// Document order (insertion order)
    order: Vec<ElementId>,
    focused: Option<ElementId>,
    scroll_locked: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a new top-level element
    pub fn insert(&mut self, label: impl Into<String>, rect: Rect) -> ElementId {
        self.insert_element(Element::new(label, rect))
    }

    /// Mount a new element nested under `parent`
    pub fn insert_child(
        &mut self,
        parent: ElementId,
        label: impl Into<String>,
        rect: Rect,
    ) -> ElementId {
        let mut element = Element::new(label, rect);
        element.parent = Some(parent);
        self.insert_element(element)
    }

    /// Mount a fully configured element
    pub fn insert_element(&mut self, mut element: Element) -> ElementId {
        element.children.clear();
        let parent = element.parent.filter(|&p| self.elements.contains_key(p));
        element.parent = parent;
        let id = self.elements.insert(element);
        if let Some(parent) = parent.and_then(|p| self.elements.get_mut(p)) {
            parent.children.push(id);
        }
        self.order.push(id);
        id
    }

    /// Unmount an element and all of its descendants
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let removed = self.elements.remove(id)?;
        if let Some(parent) = removed.parent.and_then(|p| self.elements.get_mut(p)) {
            parent.children.retain(|&mut c| c != id);
        }

        let mut pending: Vec<ElementId> = removed.children.to_vec();
        while let Some(child) = pending.pop() {
            if let Some(el) = self.elements.remove(child) {
                pending.extend_from_slice(&el.children);
            }
        }

        let elements = &self.elements;
        self.order.retain(|&e| elements.contains_key(e));
        if self.focused.is_some_and(|f| !elements.contains_key(f)) {
            self.focused = None;
        }
        Some(removed)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    /// Current visual state of an element
    pub fn style(&self, id: ElementId) -> Option<&VisualState> {
        self.elements.get(id).map(|el| &el.style)
    }

    /// Replace an element's visual state. Returns `false` for unknown elements.
    pub fn set_style(&mut self, id: ElementId, style: VisualState) -> bool {
        self.update_style(id, |s| *s = style)
    }

    /// Mutate an element's visual state in place. Returns `false` for unknown elements.
    pub fn update_style<F: FnOnce(&mut VisualState)>(&mut self, id: ElementId, f: F) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                f(&mut el.style);
                true
            }
            None => {
                debug!(?id, "style update skipped for unmounted element");
                false
            }
        }
    }

    pub fn set_rect(&mut self, id: ElementId, rect: Rect) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                el.rect = rect;
                true
            }
            None => false,
        }
    }

    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        self.elements.get(id).map(|el| el.rect)
    }

    pub fn set_natural_height(&mut self, id: ElementId, height: f32) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                el.natural_height = height;
                true
            }
            None => false,
        }
    }

    pub fn set_focusable(&mut self, id: ElementId, focusable: bool) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                el.focusable = focusable;
                true
            }
            None => false,
        }
    }

    /// Element label, if mounted
    pub fn label(&self, id: ElementId) -> Option<&str> {
        self.elements.get(id).map(|el| el.label.as_str())
    }

    /// First element (in document order) with the given label
    pub fn find(&self, label: &str) -> Option<ElementId> {
        self.order
            .iter()
            .copied()
            .find(|&id| self.elements.get(id).is_some_and(|el| el.label == label))
    }

    /// Like [`find`](Self::find) but reports a missing label as an error
    pub fn require(&self, label: &str) -> Result<ElementId> {
        self.find(label)
            .ok_or_else(|| CoreError::UnknownElement(label.to_string()))
    }

    /// Elements in document order
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.order
            .iter()
            .filter_map(move |&id| self.elements.get(id).map(|el| (id, el)))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Lowest edge of any mounted element
    pub fn document_height(&self) -> f32 {
        self.elements
            .values()
            .map(|el| el.rect.bottom())
            .fold(0.0, f32::max)
    }

    // =========================================================================
    // Focus
    // =========================================================================

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Move focus to a focusable, displayed element. Returns whether focus moved.
    pub fn focus(&mut self, id: ElementId) -> bool {
        let focusable = self
            .elements
            .get(id)
            .is_some_and(|el| el.focusable && el.style.display);
        if focusable {
            self.focused = Some(id);
        }
        focusable
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Focusable, displayed elements in document order
    pub fn focusables(&self) -> Vec<ElementId> {
        self.iter()
            .filter(|(_, el)| el.focusable && el.style.display)
            .map(|(id, _)| id)
            .collect()
    }

    /// Default Tab behaviour: next focusable element, wrapping at the end
    pub fn focus_next(&mut self) -> Option<ElementId> {
        self.step_focus(1)
    }

    /// Default Shift+Tab behaviour: previous focusable element, wrapping at the start
    pub fn focus_previous(&mut self) -> Option<ElementId> {
        self.step_focus(-1)
    }

    fn step_focus(&mut self, step: isize) -> Option<ElementId> {
        let focusables = self.focusables();
        if focusables.is_empty() {
            return None;
        }
        let len = focusables.len() as isize;
        let next = match self
            .focused
            .and_then(|f| focusables.iter().position(|&id| id == f))
        {
            Some(current) => (current as isize + step).rem_euclid(len),
            None if step > 0 => 0,
            None => len - 1,
        };
        let id = focusables[next as usize];
        self.focused = Some(id);
        Some(id)
    }

    // =========================================================================
    // Body scroll lock
    // =========================================================================

    pub fn lock_scroll(&mut self) {
        self.scroll_locked = true;
    }

    pub fn unlock_scroll(&mut self) {
        self.scroll_locked = false;
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }
}
