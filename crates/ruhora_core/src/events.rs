//! Event dispatch system
//!
//! Pointer, focus and keyboard events with per-element listeners.
//! Listeners registered on no element (`None`) receive every event of their
//! type after element listeners have run, the way document listeners see
//! bubbled events.

use crate::element::ElementId;
use rustc_hash::FxHashMap;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    pub const CLICK: EventType = 6;
    pub const FOCUS: EventType = 10;
    pub const BLUR: EventType = 11;
    pub const KEY_DOWN: EventType = 20;
    pub const SCROLL: EventType = 30;
    pub const RESIZE: EventType = 40;
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    /// Element the event is aimed at (`None` = the document)
    pub target: Option<ElementId>,
    pub data: EventData,
    pub propagation_stopped: bool,
    pub default_prevented: bool,
}

impl Event {
    pub fn new(event_type: EventType, target: Option<ElementId>, data: EventData) -> Self {
        Self {
            event_type,
            target,
            data,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    pub fn pointer_enter(target: ElementId) -> Self {
        Self::new(event_types::POINTER_ENTER, Some(target), EventData::None)
    }

    pub fn pointer_leave(target: ElementId) -> Self {
        Self::new(event_types::POINTER_LEAVE, Some(target), EventData::None)
    }

    pub fn click(target: ElementId) -> Self {
        Self::new(event_types::CLICK, Some(target), EventData::None)
    }

    pub fn focus(target: ElementId) -> Self {
        Self::new(event_types::FOCUS, Some(target), EventData::None)
    }

    pub fn blur(target: ElementId) -> Self {
        Self::new(event_types::BLUR, Some(target), EventData::None)
    }

    /// Key press aimed at the focused element (or the document)
    pub fn key_down(target: Option<ElementId>, key: KeyCode, modifiers: Modifiers) -> Self {
        Self::new(
            event_types::KEY_DOWN,
            target,
            EventData::Key {
                key,
                modifiers,
                repeat: false,
            },
        )
    }

    pub fn key(&self) -> Option<(KeyCode, Modifiers)> {
        match self.data {
            EventData::Key { key, modifiers, .. } => Some((key, modifiers)),
            _ => None,
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    Key {
        key: KeyCode,
        modifiers: Modifiers,
        /// Whether this is a repeat event
        repeat: bool,
    },
    Scroll {
        scroll_y: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
    None,
}

/// Virtual key codes (platform-agnostic)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const TAB: KeyCode = KeyCode(0x09);
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);

    pub const LEFT: KeyCode = KeyCode(0x25);
    pub const UP: KeyCode = KeyCode(0x26);
    pub const RIGHT: KeyCode = KeyCode(0x27);
    pub const DOWN: KeyCode = KeyCode(0x28);

    pub const UNKNOWN: KeyCode = KeyCode(0);

    /// Parse a key name as written in scenario scripts (`"Tab"`, `"Escape"`, ...)
    pub fn from_name(name: &str) -> KeyCode {
        match name.to_ascii_lowercase().as_str() {
            "tab" => KeyCode::TAB,
            "enter" | "return" => KeyCode::ENTER,
            "escape" | "esc" => KeyCode::ESCAPE,
            "space" | " " => KeyCode::SPACE,
            "left" | "arrowleft" => KeyCode::LEFT,
            "up" | "arrowup" => KeyCode::UP,
            "right" | "arrowright" => KeyCode::RIGHT,
            "down" | "arrowdown" => KeyCode::DOWN,
            _ => KeyCode::UNKNOWN,
        }
    }
}

/// Keyboard modifier flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { bits: 0 };
    pub const SHIFT: u8 = 0b0001;
    pub const CTRL: u8 = 0b0010;
    pub const ALT: u8 = 0b0100;
    pub const META: u8 = 0b1000;

    pub const fn new(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0;
        if shift {
            bits |= Self::SHIFT;
        }
        if ctrl {
            bits |= Self::CTRL;
        }
        if alt {
            bits |= Self::ALT;
        }
        if meta {
            bits |= Self::META;
        }
        Self { bits }
    }

    /// Only shift held
    pub const fn shift_only() -> Self {
        Self { bits: Self::SHIFT }
    }

    pub const fn shift(&self) -> bool {
        self.bits & Self::SHIFT != 0
    }

    pub const fn ctrl(&self) -> bool {
        self.bits & Self::CTRL != 0
    }

    pub const fn alt(&self) -> bool {
        self.bits & Self::ALT != 0
    }

    pub const fn meta(&self) -> bool {
        self.bits & Self::META != 0
    }

    pub const fn any(&self) -> bool {
        self.bits != 0
    }
}

/// Handle returned when registering a listener, used to detach it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Event handler function type. `C` is the mutable context handed to handlers.
pub type EventHandler<C> = Box<dyn FnMut(&mut Event, &mut C)>;

type ListenerKey = (Option<ElementId>, EventType);

/// Dispatches events to registered handlers
pub struct EventDispatcher<C> {
    handlers: FxHashMap<ListenerKey, Vec<(ListenerId, EventHandler<C>)>>,
    index: FxHashMap<ListenerId, ListenerKey>,
    next_id: u64,
}

impl<C> EventDispatcher<C> {
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
            index: FxHashMap::default(),
            next_id: 0,
        }
    }

    /// Register a handler for an element (or the document) and event type
    pub fn register<F>(
        &mut self,
        target: Option<ElementId>,
        event_type: EventType,
        handler: F,
    ) -> ListenerId
    where
        F: FnMut(&mut Event, &mut C) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;

        let key = (target, event_type);
        self.handlers
            .entry(key)
            .or_default()
            .push((id, Box::new(handler)));
        self.index.insert(id, key);
        id
    }

    /// Detach a listener. Removing an already-removed listener is a no-op.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let Some(key) = self.index.remove(&id) else {
            return false;
        };
        if let Some(list) = self.handlers.get_mut(&key) {
            list.retain(|(lid, _)| *lid != id);
            if list.is_empty() {
                self.handlers.remove(&key);
            }
        }
        true
    }

    /// Detach every listener registered on an element
    pub fn remove_target(&mut self, target: ElementId) {
        let ids: Vec<ListenerId> = self
            .index
            .iter()
            .filter(|(_, (t, _))| *t == Some(target))
            .map(|(id, _)| *id)
            .collect();
        for id in ids {
            self.remove(id);
        }
    }

    /// Dispatch an event: target listeners first, then document listeners
    pub fn dispatch(&mut self, event: &mut Event, ctx: &mut C) {
        let mut keys: Vec<ListenerKey> = Vec::with_capacity(2);
        if event.target.is_some() {
            keys.push((event.target, event.event_type));
        }
        keys.push((None, event.event_type));

        for key in keys {
            if let Some(handlers) = self.handlers.get_mut(&key) {
                for (_, handler) in handlers.iter_mut() {
                    if event.propagation_stopped {
                        return;
                    }
                    handler(event, ctx);
                }
            }
        }
    }

    /// Number of attached listeners
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl<C> Default for EventDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}
