//! The navigation platform seam: address state plus change notifications.

use std::rc::Rc;

/// A change notification from the navigation platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// The URL fragment changed (the platform's `hashchange`).
    FragmentChanged,
    /// A history entry became current: back/forward navigation, or the
    /// synthesized notification after a programmatic push (the platform does
    /// not natively notify on pushes).
    StateChanged,
}

/// Opaque identity of a registered listener, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// A navigation change listener. Invoked synchronously, in registration
/// order, on the platform's event loop.
pub type Listener = Rc<dyn Fn(NavEvent)>;

/// The host environment's navigation surface.
///
/// This is the single seam between the router and whatever actually owns the
/// address bar: a browser binding in production, [`MemoryHost`] in tests and
/// embedded use. All methods are synchronous; notification delivery happens
/// inline in the mutating call.
///
/// [`MemoryHost`]: crate::history::MemoryHost
pub trait NavigationHost {
    /// The raw fragment, including its leading `#`, or `""` when unset.
    fn fragment(&self) -> String;

    /// Write `path` into the fragment (stored as `#path`).
    ///
    /// Fires [`NavEvent::FragmentChanged`] only when the stored fragment
    /// actually changes - this is the platform's own duplicate suppression.
    fn set_fragment(&self, path: &str);

    /// The current history entry's path component.
    fn path(&self) -> String;

    /// Push a new history entry with the given path.
    ///
    /// Does NOT notify: platforms never notify on programmatic pushes. A
    /// caller that wants observers to see the change follows up with
    /// [`NavigationHost::notify`] - see the redirect helper.
    fn push_path(&self, path: &str);

    /// Whether this host exposes history-state navigation at all.
    fn history_supported(&self) -> bool;

    /// Register a change listener; the returned id unsubscribes it.
    fn subscribe(&self, listener: Listener) -> ListenerId;

    /// Remove a previously registered listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: ListenerId);

    /// Deliver an event to every registered listener, synchronously and in
    /// registration order. Used by the host itself and to synthesize the
    /// push-state notification.
    fn notify(&self, event: NavEvent);
}
