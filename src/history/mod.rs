//! # History Module
//!
//! The navigation platform seam and the path stream built on top of it.
//!
//! ## Overview
//!
//! Navigation state lives outside the router, in the host environment's
//! address bar. This module models that environment as the
//! [`NavigationHost`] trait (fragment + history entries + change events) and
//! layers [`NavigationSource`] on top: a mode-bound, emit-current-then-follow
//! stream of path strings.
//!
//! Two mechanisms, one stream:
//!
//! - **Fragment mode** observes the URL fragment, normalized by
//!   [`fragment_path`] (`#!/foo` → `/foo`, empty → `/`).
//! - **History mode** observes the history entry's path component. Back and
//!   forward navigation notify natively; programmatic pushes do not, so the
//!   redirect helper synthesizes the notification through
//!   [`NavigationHost::notify`].
//!
//! The process-wide mode preference ([`use_history`]) is resolved against a
//! host's actual capabilities by [`resolve_mode`]; the default is fragment
//! mode.
//!
//! [`MemoryHost`] is the in-memory host used by tests and non-browser
//! embeddings.

mod host;
mod memory;
mod mode;
mod source;

pub use host::{Listener, ListenerId, NavEvent, NavigationHost};
pub use memory::MemoryHost;
pub use mode::{history_requested, resolve_mode, use_history, NavigationMode};
pub use source::{fragment_path, location_path, NavigationSource, SourceSubscription};
