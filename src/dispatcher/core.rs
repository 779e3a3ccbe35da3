//! Dispatcher core module - the navigation dispatch loop.
//!
//! A mounted router is a small state machine: **idle** (no subscription) or
//! **active** (subscribed, zero-or-one active resource). While active, every
//! distinct path from the navigation source is matched and, on success,
//! dispatched: the previous handler's resource is dropped first, then the
//! handler runs, then its return value (if any) becomes the new active
//! resource. Unmatched paths leave the slot untouched.
//!
//! Re-entrancy: a handler may itself trigger navigation (a redirect). The
//! host notifies synchronously, so the controller queues paths that arrive
//! while a dispatch is in flight and drains them, in arrival order, after
//! the current handler returns. No `RefCell` borrow is ever held across a
//! handler invocation.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::{debug, info};

use crate::history::{resolve_mode, NavigationHost, NavigationMode, NavigationSource, SourceSubscription};
use crate::router::{Resource, RouteTable, Router};

struct ControllerState {
    router: Router,
    /// The serial active-resource slot: at most one handler-owned resource
    /// exists at a time, and reassignment drops the previous occupant first.
    active: Option<Resource>,
    /// Last path seen, for consecutive-duplicate suppression.
    last_path: Option<String>,
    /// Paths that arrived while a dispatch was in flight.
    queue: VecDeque<String>,
    dispatching: bool,
    disposed: bool,
    subscription: Option<SourceSubscription>,
}

/// The composite lifecycle handle for a mounted router.
///
/// Covers both the navigation subscription and the active-resource slot:
/// disposing the handle cancels future dispatch and releases whatever
/// resource is currently active. Dropping the handle disposes it.
#[must_use = "dropping the handle unmounts the router"]
pub struct RouterHandle {
    state: Rc<RefCell<ControllerState>>,
}

/// Mount a route table on a host, resolving the navigation mode from the
/// process-wide preference (fragment mode unless history was requested and
/// the host supports it).
///
/// Subscribing emits the current path immediately, so a handler matching the
/// current location runs before this returns.
pub fn mount(host: Rc<dyn NavigationHost>, table: RouteTable) -> RouterHandle {
    let mode = resolve_mode(host.as_ref());
    mount_with_mode(host, table, mode)
}

/// Mount with an explicit navigation mode, bypassing the process-wide flag.
pub fn mount_with_mode(
    host: Rc<dyn NavigationHost>,
    table: RouteTable,
    mode: NavigationMode,
) -> RouterHandle {
    let router = Router::new(table);
    info!(mode = ?mode, routes_count = router.patterns().len(), "Router mounted");

    let state = Rc::new(RefCell::new(ControllerState {
        router,
        active: None,
        last_path: None,
        queue: VecDeque::new(),
        dispatching: false,
        disposed: false,
        subscription: None,
    }));

    // The host holds the listener; a weak reference back to the controller
    // keeps host → listener → controller from forming a cycle.
    let weak = Rc::downgrade(&state);
    let source = NavigationSource::new(host, mode);
    let subscription = source.subscribe(move |path| {
        if let Some(state) = weak.upgrade() {
            on_path(&state, path);
        }
    });

    {
        let mut st = state.borrow_mut();
        if st.disposed {
            // A handler disposed the router during the initial emission.
            subscription.dispose();
        } else {
            st.subscription = Some(subscription);
        }
    }

    RouterHandle { state }
}

impl RouterHandle {
    /// Unmount: cancel the navigation subscription, release the active
    /// resource, and stop all further dispatch. Idempotent, and safe to call
    /// from inside a route handler (a resource returned by the in-flight
    /// handler is then dropped instead of installed).
    pub fn dispose(&self) {
        let (subscription, active) = {
            let mut st = self.state.borrow_mut();
            if st.disposed {
                return;
            }
            st.disposed = true;
            st.queue.clear();
            (st.subscription.take(), st.active.take())
        };
        if let Some(subscription) = subscription {
            subscription.dispose();
        }
        drop(active);
        info!("Router disposed");
    }

    /// Whether the handle has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.state.borrow().disposed
    }

    /// Whether a handler-owned resource currently occupies the active slot.
    #[must_use]
    pub fn has_active_resource(&self) -> bool {
        self.state.borrow().active.is_some()
    }
}

impl Drop for RouterHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Entry point for every path emission from the navigation source.
///
/// Queues the path, then drains unless a drain is already running higher up
/// the call stack (the re-entrant redirect case - the outer loop will pick
/// the path up in order).
fn on_path(state: &Rc<RefCell<ControllerState>>, path: String) {
    {
        let mut st = state.borrow_mut();
        if st.disposed {
            return;
        }
        if st.dispatching {
            debug!(path = %path, "Navigation queued during dispatch");
            st.queue.push_back(path);
            return;
        }
        st.queue.push_back(path);
        st.dispatching = true;
    }
    drain(state);
}

fn drain(state: &Rc<RefCell<ControllerState>>) {
    loop {
        let path = {
            let mut st = state.borrow_mut();
            if st.disposed {
                st.dispatching = false;
                return;
            }
            match st.queue.pop_front() {
                Some(path) => path,
                None => {
                    st.dispatching = false;
                    return;
                }
            }
        };

        // Consecutive-duplicate suppression: an unchanged path never
        // re-dispatches, matched or not.
        let duplicate = {
            let mut st = state.borrow_mut();
            if st.last_path.as_deref() == Some(path.as_str()) {
                true
            } else {
                st.last_path = Some(path.clone());
                false
            }
        };
        if duplicate {
            debug!(path = %path, "Duplicate path suppressed");
            continue;
        }

        let Some(matched) = state.borrow().router.match_route(&path) else {
            // No match leaves the active resource untouched.
            continue;
        };

        // Retire the previous handler's resource before the new handler runs.
        let previous = state.borrow_mut().active.take();
        drop(previous);

        info!(path = %path, pattern = %matched.pattern, "Dispatching handler");
        let resource = (*matched.handler)(&matched.params);

        let mut st = state.borrow_mut();
        if st.disposed {
            // Disposed from inside the handler: never install into a dead slot.
            drop(resource);
        } else {
            st.active = resource;
        }
    }
}
