//! In-memory navigation host.
//!
//! Stands in for a real browser document: a fragment string plus a stack of
//! history entries with a cursor. Tests and non-browser embeddings drive it
//! directly; `back`/`forward` emit the popstate analog.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::debug;

use super::host::{Listener, ListenerId, NavEvent, NavigationHost};

struct AddressState {
    /// Raw fragment including `#`, `""` when unset.
    fragment: String,
    /// History entry paths; never empty.
    entries: Vec<String>,
    /// Index of the current entry.
    index: usize,
}

/// An in-memory [`NavigationHost`].
///
/// Starts at path `/` with an empty fragment. Listener delivery is
/// synchronous and tolerates re-entrant subscribe/unsubscribe/navigation
/// from inside a listener (events are delivered to a snapshot of the
/// listener list taken when `notify` is entered).
pub struct MemoryHost {
    state: RefCell<AddressState>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_listener: Cell<u64>,
    history_supported: bool,
}

impl MemoryHost {
    /// Create a host with history-state support.
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::build(true))
    }

    /// Create a host without history-state support, modeling a runtime that
    /// lacks the history API. Routers mounted on it always run in fragment
    /// mode regardless of the process-wide flag.
    #[must_use]
    pub fn without_history() -> Rc<Self> {
        Rc::new(Self::build(false))
    }

    fn build(history_supported: bool) -> Self {
        Self {
            state: RefCell::new(AddressState {
                fragment: String::new(),
                entries: vec!["/".to_string()],
                index: 0,
            }),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
            history_supported,
        }
    }

    /// Move one entry back in history, like the platform's back button.
    /// Emits [`NavEvent::StateChanged`] when the cursor actually moves.
    pub fn back(&self) {
        let moved = {
            let mut state = self.state.borrow_mut();
            if state.index > 0 {
                state.index -= 1;
                true
            } else {
                false
            }
        };
        if moved {
            debug!(path = %self.path(), "History back");
            self.notify(NavEvent::StateChanged);
        }
    }

    /// Move one entry forward in history. Emits [`NavEvent::StateChanged`]
    /// when the cursor actually moves.
    pub fn forward(&self) {
        let moved = {
            let mut state = self.state.borrow_mut();
            if state.index + 1 < state.entries.len() {
                state.index += 1;
                true
            } else {
                false
            }
        };
        if moved {
            debug!(path = %self.path(), "History forward");
            self.notify(NavEvent::StateChanged);
        }
    }

    /// Number of history entries currently held.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.state.borrow().entries.len()
    }
}

impl NavigationHost for MemoryHost {
    fn fragment(&self) -> String {
        self.state.borrow().fragment.clone()
    }

    fn set_fragment(&self, path: &str) {
        let stored = format!("#{path}");
        let changed = {
            let mut state = self.state.borrow_mut();
            if state.fragment == stored {
                false
            } else {
                state.fragment = stored;
                true
            }
        };
        if changed {
            debug!(fragment = %path, "Fragment changed");
            self.notify(NavEvent::FragmentChanged);
        }
    }

    fn path(&self) -> String {
        let state = self.state.borrow();
        state.entries[state.index].clone()
    }

    fn push_path(&self, path: &str) {
        let mut state = self.state.borrow_mut();
        let index = state.index;
        // Pushing from mid-history discards the forward entries.
        state.entries.truncate(index + 1);
        state.entries.push(path.to_string());
        state.index += 1;
    }

    fn history_supported(&self) -> bool {
        self.history_supported
    }

    fn subscribe(&self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }

    fn notify(&self, event: NavEvent) {
        // Snapshot so listeners can subscribe/unsubscribe or navigate while
        // we deliver. A listener removed mid-delivery may still observe the
        // in-flight event; subscribers guard with their own disposed flag.
        let snapshot: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in snapshot {
            (*listener)(event);
        }
    }
}
