//! # Router Module
//!
//! Path matching and route resolution. Route templates (e.g. `/users/:id`)
//! are compiled into regex-based matchers that recognize paths and extract
//! named parameters.
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Compilation**: at mount time, templates are converted into anchored
//!    regex patterns, one capture group per `:name` segment. Literal segments
//!    are escaped, so compilation is total - there are no error conditions.
//!
//! 2. **Matching**: for each navigation path, the router tests the compiled
//!    patterns in registration order until one matches, returning the bound
//!    handler and the extracted parameters. Earlier templates shadow later
//!    ones that would also match.
//!
//! ## Example
//!
//! ```rust
//! use navroute::router::{RouteTable, Router};
//!
//! let table = RouteTable::new()
//!     .route("/", |_| ())
//!     .route("/pets/:id", |params| {
//!         println!("pet {:?}", params.first());
//!     });
//!
//! let router = Router::new(table);
//! let matched = router.match_route("/pets/123").unwrap();
//! assert_eq!(matched.pattern.as_ref(), "/pets/:id");
//! ```

mod core;

pub use core::{
    Handler, IntoActiveResource, ParamVec, Resource, RouteMatch, RouteTable, Router,
    MAX_INLINE_PARAMS,
};
