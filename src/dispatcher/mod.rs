//! # Dispatcher Module
//!
//! The router controller: subscribes to the navigation source, feeds each
//! distinct path through the matcher, and invokes the winning handler while
//! guaranteeing exactly one handler-owned resource at a time.
//!
//! ## Overview
//!
//! Mounting compiles the route table, resolves the navigation mode, and
//! subscribes to the path stream. The returned [`RouterHandle`] is the
//! composite lifecycle handle: disposing it cancels the subscription and
//! releases the currently active resource.
//!
//! ## Dispatch Flow
//!
//! 1. Navigation source emits a path (current path first, then on change)
//! 2. Consecutive duplicates are suppressed
//! 3. The matcher scans compiled routes in registration order
//! 4. On a match: previous active resource dropped, handler invoked,
//!    return value installed as the new active resource
//! 5. On no match: nothing happens - the active resource keeps running
//!
//! ## Error Handling
//!
//! There is no error taxonomy. Unmatched paths are normal silence. A handler
//! that panics propagates out of the host's notification callback; the
//! active slot was already emptied before the handler ran, and the handle
//! stays disposable.

mod core;

pub use core::{mount, mount_with_mode, RouterHandle};
