//! # navroute
//!
//! **navroute** is a client-side navigation router: it observes changes to a
//! host environment's address state (URL fragment or history path), matches
//! the current path against registered route templates, and invokes the
//! handler bound to the first matching template.
//!
//! ## Overview
//!
//! Route templates are plain strings with `:name` markers for named
//! parameter segments. Handlers are functions from extracted parameters to
//! an optional disposable resource; the router guarantees that at most one
//! handler-owned resource is alive at any time, dropping the previous one
//! before each new dispatch.
//!
//! ## Architecture
//!
//! The library is organized into four modules:
//!
//! - **[`router`]** - route-template compilation and first-match path
//!   matching with parameter extraction
//! - **[`history`]** - the navigation platform seam ([`history::NavigationHost`])
//!   and the unified path stream over fragment-change and history-state
//!   events ([`history::NavigationSource`])
//! - **[`dispatcher`]** - the dispatch loop: duplicate suppression, the
//!   serial active-resource slot, and the composite [`RouterHandle`]
//! - **[`redirect`]** - programmatic navigation, immediate or packaged as a
//!   route handler
//!
//! Data flows one direction: navigation source → matcher → dispatcher →
//! handler. The redirect helper writes back into the host's navigation
//! state, which the source observes, closing the loop.
//!
//! ## Quick Start
//!
//! ```rust
//! use navroute::history::{MemoryHost, NavigationHost};
//! use navroute::{mount, RouteTable};
//! use std::rc::Rc;
//!
//! let host: Rc<dyn NavigationHost> = MemoryHost::new();
//!
//! let table = RouteTable::new()
//!     .route("/", |_| ())
//!     .route("/pets/:id", |params| {
//!         println!("showing pet {:?}", params.first());
//!     });
//!
//! // Mounting dispatches the current path ("/") immediately.
//! let router = navroute::mount(Rc::clone(&host), table);
//!
//! // Writing the fragment re-emits through the source and dispatches.
//! navroute::redirect::redirect(&host, "/pets/123");
//!
//! // Unmount: cancels the subscription, releases the active resource.
//! router.dispose();
//! ```
//!
//! ## Navigation Modes
//!
//! A single document tracks navigation through one mechanism, selected
//! process-wide before mounting (default: fragment):
//!
//! ```rust
//! navroute::history::use_history(true); // no-op on hosts without history support
//! ```
//!
//! Embedders that prefer explicit configuration over the global flag use
//! [`mount_with_mode`] or construct a [`history::NavigationSource`] directly.
//!
//! ## Concurrency Model
//!
//! Single-threaded and cooperative: all work happens synchronously inside
//! the host's notification callbacks. Handlers may themselves redirect; the
//! dispatcher queues re-entrant navigation and processes it strictly in
//! arrival order.

pub mod dispatcher;
pub mod history;
pub mod redirect;
pub mod router;

pub use dispatcher::{mount, mount_with_mode, RouterHandle};
pub use history::{use_history, NavigationMode};
pub use router::{Handler, ParamVec, Resource, RouteMatch, RouteTable, Router};
