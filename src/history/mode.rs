//! Navigation mode selection.
//!
//! A single document tracks navigation through exactly one mechanism, so the
//! mode preference is process-wide: set it once with [`use_history`] before
//! mounting a router (or export `NAVROUTE_USE_HISTORY=1`). Changing it only
//! affects routers mounted afterwards. The preference is just that - a host
//! without history support always resolves to fragment mode.
//!
//! Code that wants no global state at all can bypass the flag entirely and
//! pass a [`NavigationMode`] explicitly (`NavigationSource::new`,
//! `mount_with_mode`).

use once_cell::sync::Lazy;
use std::env;
use std::sync::atomic::{AtomicBool, Ordering};

use super::host::NavigationHost;

/// Which address component a router observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationMode {
    /// Track the URL fragment (`#/...`). The default.
    #[default]
    Fragment,
    /// Track the history path via the platform's history API.
    History,
}

/// Process-wide preference, bootstrapped from `NAVROUTE_USE_HISTORY`.
static USE_HISTORY: Lazy<AtomicBool> = Lazy::new(|| AtomicBool::new(env_flag()));

fn env_flag() -> bool {
    match env::var("NAVROUTE_USE_HISTORY") {
        Ok(val) => matches!(val.trim(), "1" | "true" | "yes"),
        Err(_) => false,
    }
}

/// Prefer history-state navigation for routers mounted from now on.
///
/// A no-op in effect on hosts that lack history support: [`resolve_mode`]
/// falls back to fragment mode there.
pub fn use_history(enabled: bool) {
    USE_HISTORY.store(enabled, Ordering::Relaxed);
}

/// Current value of the process-wide history preference.
#[must_use]
pub fn history_requested() -> bool {
    USE_HISTORY.load(Ordering::Relaxed)
}

/// Resolve the effective mode for a host: history only when it is both
/// requested and supported.
#[must_use]
pub fn resolve_mode(host: &dyn NavigationHost) -> NavigationMode {
    if history_requested() && host.history_supported() {
        NavigationMode::History
    } else {
        NavigationMode::Fragment
    }
}
