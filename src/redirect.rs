//! Programmatic navigation: write a target path back into the host's
//! navigation state so the navigation source observes it.
//!
//! Mode-aware, using the same resolution as mounting. In history mode a
//! redirect to the current path is a complete no-op (no state change, no
//! notification); in fragment mode the fragment is written unconditionally
//! and the host's own change detection suppresses duplicates.
//!
//! [`deferred`] packages a redirect as a zero-argument trigger, and [`to`]
//! shapes that trigger as a route handler, enabling "navigate here on match"
//! routes:
//!
//! ```rust,ignore
//! let table = RouteTable::new()
//!     .route("/old-home", redirect::to(Rc::clone(&host), "/"))
//!     .route("/", |_| ());
//! ```

use std::rc::Rc;
use tracing::debug;

use crate::history::{location_path, resolve_mode, NavEvent, NavigationHost, NavigationMode};
use crate::router::ParamVec;

/// Navigate the host to `path` now.
///
/// History mode pushes a new entry and synthesizes the state-change
/// notification the platform omits for programmatic pushes - unless the
/// target equals the current path, in which case nothing happens at all.
pub fn redirect(host: &Rc<dyn NavigationHost>, path: &str) {
    match resolve_mode(host.as_ref()) {
        NavigationMode::History => {
            let target = location_path(path);
            if location_path(&host.path()) == target {
                debug!(path = %target, "Redirect to current path ignored");
                return;
            }
            debug!(path = %target, "Redirect (history)");
            host.push_path(&target);
            host.notify(NavEvent::StateChanged);
        }
        NavigationMode::Fragment => {
            debug!(path = %path, "Redirect (fragment)");
            host.set_fragment(path);
        }
    }
}

/// Package a redirect as a zero-argument trigger for later invocation.
#[must_use]
pub fn deferred(host: Rc<dyn NavigationHost>, path: &str) -> impl Fn() {
    let path = path.to_string();
    move || redirect(&host, &path)
}

/// A deferred redirect shaped as a route handler: parameters are ignored and
/// nothing is kept in the active slot.
#[must_use]
pub fn to(host: Rc<dyn NavigationHost>, path: &str) -> impl Fn(&ParamVec) {
    let trigger = deferred(host, path);
    move |_params: &ParamVec| trigger()
}
