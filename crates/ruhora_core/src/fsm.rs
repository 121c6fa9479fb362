//! State machines for interactive components
//!
//! A machine is a flat transition table keyed by (state, event). Events with
//! no matching row leave the machine where it is. [`FsmRuntime`] owns a set
//! of machines so a component group can ask which members sit in a state.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tracing::trace;

new_key_type! {
    /// Handle to a machine owned by an [`FsmRuntime`]
    pub struct FsmId;
}

pub type StateId = u32;

pub type EventId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Transition {
    from: StateId,
    event: EventId,
    to: StateId,
}

#[derive(Clone, Debug)]
pub struct StateMachine {
    current: StateId,
    transitions: SmallVec<[Transition; 4]>,
}

impl StateMachine {
    pub fn new(initial: StateId) -> Self {
        Self {
            current: initial,
            transitions: SmallVec::new(),
        }
    }

    /// Add a row: `event` in `from` moves to `to`. The first matching row wins.
    pub fn on(mut self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transitions.push(Transition { from, event, to });
        self
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.current == state
    }

    fn target(&self, event: EventId) -> Option<StateId> {
        self.transitions
            .iter()
            .find(|t| t.from == self.current && t.event == event)
            .map(|t| t.to)
    }

    pub fn can_send(&self, event: EventId) -> bool {
        self.target(event).is_some()
    }

    /// Apply `event`; returns the resulting state
    pub fn send(&mut self, event: EventId) -> StateId {
        match self.target(event) {
            Some(to) => {
                trace!(from = self.current, event, to, "transition");
                self.current = to;
            }
            None => trace!(state = self.current, event, "event ignored"),
        }
        self.current
    }
}

/// A group of machines
#[derive(Default)]
pub struct FsmRuntime {
    machines: SlotMap<FsmId, StateMachine>,
}

impl FsmRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, machine: StateMachine) -> FsmId {
        self.machines.insert(machine)
    }

    /// Send an event to one machine. `None` for unknown handles.
    pub fn send(&mut self, id: FsmId, event: EventId) -> Option<StateId> {
        self.machines.get_mut(id).map(|fsm| fsm.send(event))
    }

    pub fn current_state(&self, id: FsmId) -> Option<StateId> {
        self.machines.get(id).map(StateMachine::current_state)
    }

    /// Machines currently in `state`
    pub fn in_state(&self, state: StateId) -> impl Iterator<Item = FsmId> + '_ {
        self.machines
            .iter()
            .filter(move |(_, fsm)| fsm.is_in(state))
            .map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }
}
