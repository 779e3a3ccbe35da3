//! Navigation source: a continuous stream of current-path strings.
//!
//! One abstraction over two platform mechanisms. In fragment mode the
//! observed path is derived from the URL fragment; in history mode it is the
//! history entry's path component. Either way a subscription emits the
//! current value immediately, then re-emits on every relevant notification.

use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

use super::host::{Listener, ListenerId, NavEvent, NavigationHost};
use super::mode::NavigationMode;

/// Derive the observed path from a raw fragment.
///
/// Strips the hash-mode prefix (`#`, optionally followed by `!` and any
/// number of slashes) and collapses it to a single leading slash; an empty
/// fragment normalizes to `/`.
///
/// ```rust
/// use navroute::history::fragment_path;
///
/// assert_eq!(fragment_path("#!/foo/123"), "/foo/123");
/// assert_eq!(fragment_path("#//bar/123"), "/bar/123");
/// assert_eq!(fragment_path("#quux/123"), "/quux/123");
/// assert_eq!(fragment_path(""), "/");
/// ```
#[must_use]
pub fn fragment_path(raw: &str) -> String {
    let rest = match raw.strip_prefix('#') {
        Some(after_hash) => after_hash.strip_prefix('!').unwrap_or(after_hash),
        None => raw,
    };
    let rest = rest.trim_start_matches('/');
    format!("/{rest}")
}

/// Normalize a history path component to a leading single slash.
#[must_use]
pub fn location_path(raw: &str) -> String {
    let rest = raw.trim_start_matches('/');
    format!("/{rest}")
}

/// A mode-bound view of a host's current path, with change subscription.
///
/// The mode is explicit configuration: callers that want the process-wide
/// preference resolve it first with [`resolve_mode`].
///
/// [`resolve_mode`]: crate::history::resolve_mode
pub struct NavigationSource {
    host: Rc<dyn NavigationHost>,
    mode: NavigationMode,
}

impl NavigationSource {
    /// Bind a source to a host in the given mode.
    #[must_use]
    pub fn new(host: Rc<dyn NavigationHost>, mode: NavigationMode) -> Self {
        Self { host, mode }
    }

    /// The mode this source observes.
    #[must_use]
    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    /// Read the current path for this source's mode.
    #[must_use]
    pub fn current_path(&self) -> String {
        current_path_for(self.host.as_ref(), self.mode)
    }

    /// Subscribe to the path stream.
    ///
    /// `emit` is called once with the current path before this returns, then
    /// again for every relevant host notification. The stream is infinite;
    /// duplicate suppression is the subscriber's concern. Dropping (or
    /// disposing) the returned subscription stops further emissions.
    pub fn subscribe<F>(&self, emit: F) -> SourceSubscription
    where
        F: Fn(String) + 'static,
    {
        let emit = Rc::new(emit);
        let host = Rc::clone(&self.host);
        let mode = self.mode;
        let wanted = match mode {
            NavigationMode::Fragment => NavEvent::FragmentChanged,
            NavigationMode::History => NavEvent::StateChanged,
        };

        let listener: Listener = {
            let emit = Rc::clone(&emit);
            Rc::new(move |event| {
                if event == wanted {
                    (*emit)(current_path_for(host.as_ref(), mode));
                }
            })
        };
        let id = self.host.subscribe(listener);
        debug!(mode = ?mode, "Navigation source subscribed");

        // The subscriber sees the current state before any change arrives.
        (*emit)(self.current_path());

        SourceSubscription {
            host: Rc::clone(&self.host),
            id,
            cancelled: Cell::new(false),
        }
    }
}

fn current_path_for(host: &dyn NavigationHost, mode: NavigationMode) -> String {
    match mode {
        NavigationMode::Fragment => fragment_path(&host.fragment()),
        NavigationMode::History => location_path(&host.path()),
    }
}

/// Cancels a [`NavigationSource`] subscription on dispose or drop.
pub struct SourceSubscription {
    host: Rc<dyn NavigationHost>,
    id: ListenerId,
    cancelled: Cell<bool>,
}

impl SourceSubscription {
    /// Stop further emissions. Idempotent.
    pub fn dispose(&self) {
        if !self.cancelled.replace(true) {
            self.host.unsubscribe(self.id);
            debug!("Navigation source unsubscribed");
        }
    }
}

impl Drop for SourceSubscription {
    fn drop(&mut self) {
        self.dispose();
    }
}
