//! Router core module - route compilation and path matching.
//!
//! Route templates are compiled once, at registration, into anchored regex
//! patterns. Matching scans the compiled list in registration order and stops
//! at the first success, so earlier templates shadow later ones.

use regex::Regex;
use serde_json::Value;
use smallvec::SmallVec;
use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, info};

/// Maximum number of path parameters before heap allocation.
/// Client-side routes rarely carry more than a couple of segments
/// (e.g. `/users/:id/posts/:post_id`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the dispatch hot path.
///
/// Param names use `Arc<str>` instead of `String` because:
/// - Names come from the static route table (known at mount time)
/// - `Arc::clone()` is O(1) atomic increment vs O(n) string copy
/// - Values are per-navigation data extracted from the path
pub type ParamVec = SmallVec<[(Arc<str>, Value); MAX_INLINE_PARAMS]>;

/// A type-erased resource owned by the router until the next dispatch.
///
/// Disposal is `Drop`: the controller drops the previous occupant of the
/// active slot before invoking the next handler. A resource whose `Drop`
/// panics violates the handler contract.
pub type Resource = Box<dyn Any>;

/// A route handler: given extracted parameters, optionally returns a
/// resource the controller keeps alive until the next dispatch.
pub type Handler = Rc<dyn Fn(&ParamVec) -> Option<Resource>>;

/// Conversion from a handler's return value into the active-resource slot.
///
/// Lets route handlers return `()` (nothing to keep alive), a bare
/// [`Resource`], or `Option<Resource>` without ceremony at the call site.
pub trait IntoActiveResource {
    /// Convert the handler return value into the slot representation.
    fn into_active_resource(self) -> Option<Resource>;
}

impl IntoActiveResource for () {
    fn into_active_resource(self) -> Option<Resource> {
        None
    }
}

impl IntoActiveResource for Resource {
    fn into_active_resource(self) -> Option<Resource> {
        Some(self)
    }
}

impl IntoActiveResource for Option<Resource> {
    fn into_active_resource(self) -> Option<Resource> {
        self
    }
}

/// Ordered route registrations: path template → handler.
///
/// Registration order is the match order. Templates use `:name` markers for
/// named parameter segments:
///
/// ```rust,ignore
/// let table = RouteTable::new()
///     .route("/", |_| ())
///     .route("/users/:id", |params| show_user(params));
/// ```
#[derive(Default)]
pub struct RouteTable {
    entries: Vec<(String, Handler)>,
}

impl RouteTable {
    /// Create an empty route table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a handler for a path template.
    ///
    /// Templates are matched in registration order; the first match wins.
    /// Handlers may return `()`, a [`Resource`], or `Option<Resource>`.
    #[must_use]
    pub fn route<F, R>(mut self, pattern: &str, handler: F) -> Self
    where
        F: Fn(&ParamVec) -> R + 'static,
        R: IntoActiveResource,
    {
        let handler: Handler = Rc::new(move |params| handler(params).into_active_resource());
        self.entries.push((pattern.to_string(), handler));
        self
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no registrations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A compiled route: anchored matcher, parameter names in template order,
/// and the bound handler.
struct CompiledRoute {
    pattern: Arc<str>,
    regex: Regex,
    param_names: Vec<Arc<str>>,
    handler: Handler,
}

/// Result of successfully matching a navigation path to a route.
#[derive(Clone)]
pub struct RouteMatch {
    /// The template the path matched, as registered.
    pub pattern: Arc<str>,
    /// The handler bound to the matched template.
    pub handler: Handler,
    /// Parameters extracted from the path, in template order.
    pub params: ParamVec,
}

impl RouteMatch {
    /// Get an extracted parameter by name.
    ///
    /// Uses "last write wins" semantics: if duplicate parameter names exist
    /// at different path depths (e.g. `/org/:id/user/:id`), returns the last
    /// occurrence.
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v)
    }

    /// Convert params to a HashMap.
    /// Note: this allocates - use `param()` in hot paths instead.
    #[must_use]
    pub fn params_map(&self) -> HashMap<String, Value> {
        self.params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

impl std::fmt::Debug for RouteMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteMatch")
            .field("pattern", &self.pattern)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Router that matches navigation paths against compiled route templates.
///
/// Compilation happens once in [`Router::new`]; matching is a linear scan of
/// the compiled patterns in registration order.
pub struct Router {
    routes: Vec<CompiledRoute>,
}

impl Router {
    /// Compile a route table into a router.
    ///
    /// Compilation cannot fail: literal segments are regex-escaped, so every
    /// template produces a valid pattern. A template containing characters
    /// that never occur in real paths simply compiles into a pattern that
    /// never matches - that is accepted behavior, not an error.
    #[must_use]
    pub fn new(table: RouteTable) -> Self {
        let routes: Vec<CompiledRoute> = table
            .entries
            .into_iter()
            .map(|(pattern, handler)| {
                let (regex, param_names) = Self::compile_pattern(&pattern);
                CompiledRoute {
                    pattern: Arc::from(pattern.as_str()),
                    regex,
                    param_names,
                    handler,
                }
            })
            .collect();

        let routes_summary: Vec<&str> = routes
            .iter()
            .take(10)
            .map(|r| r.pattern.as_ref())
            .collect();

        info!(
            routes_count = routes.len(),
            routes_summary = ?routes_summary,
            "Route table compiled"
        );

        Self { routes }
    }

    /// Match a navigation path against the compiled routes.
    ///
    /// Scans in registration order and returns the first match together with
    /// the extracted parameters, or `None` when nothing matches. An unmatched
    /// path is normal no-dispatch behavior, not a failure.
    ///
    /// # Parameter coercion
    ///
    /// A captured segment that parses entirely as an integer or finite float
    /// is delivered as a JSON number; every other segment is delivered as a
    /// JSON string. `/users/123` therefore yields the number `123`, while
    /// `/users/abc` yields the string `"abc"`.
    #[must_use]
    pub fn match_route(&self, path: &str) -> Option<RouteMatch> {
        for route in &self.routes {
            let Some(captures) = route.regex.captures(path) else {
                continue;
            };

            let mut params = ParamVec::new();
            for (i, name) in route.param_names.iter().enumerate() {
                if let Some(capture) = captures.get(i + 1) {
                    params.push((Arc::clone(name), coerce_param(capture.as_str())));
                }
            }

            debug!(
                path = %path,
                pattern = %route.pattern,
                params = ?params,
                "Route matched"
            );

            return Some(RouteMatch {
                pattern: Arc::clone(&route.pattern),
                handler: Rc::clone(&route.handler),
                params,
            });
        }

        debug!(path = %path, "No route matched");
        None
    }

    /// Get all registered path templates, in match order.
    #[must_use]
    pub fn patterns(&self) -> Vec<&str> {
        self.routes.iter().map(|r| r.pattern.as_ref()).collect()
    }

    /// Compile a path template into an anchored regex and the ordered list
    /// of parameter names.
    ///
    /// `:name` segments become `([^/]+)` captures (one or more non-slash
    /// characters); literal segments are escaped and matched verbatim; a run
    /// of trailing slashes in the template collapses into the `/*` suffix,
    /// so `/foo`, `/foo/` and `/foo///` all match the same compiled route.
    pub(crate) fn compile_pattern(pattern: &str) -> (Regex, Vec<Arc<str>>) {
        let trimmed = pattern.trim_end_matches('/');

        let mut source = String::with_capacity(pattern.len() + 8);
        source.push('^');
        let mut param_names = Vec::new();

        for segment in trimmed.split('/') {
            if segment.is_empty() {
                continue;
            }
            source.push('/');
            if let Some(name) = segment.strip_prefix(':') {
                source.push_str("([^/]+)");
                param_names.push(Arc::from(name));
            } else {
                source.push_str(&regex::escape(segment));
            }
        }

        source.push_str("/*$");
        let regex = Regex::new(&source).expect("escaped route pattern is always a valid regex");

        (regex, param_names)
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("patterns", &self.patterns())
            .finish()
    }
}

/// Coerce a captured path segment into a parameter value.
///
/// Segments that parse entirely as numbers become JSON numbers, everything
/// else stays text. `is_finite` filters the `inf`/`NaN` spellings the float
/// parser would otherwise accept.
fn coerce_param(raw: &str) -> Value {
    if let Ok(int) = raw.parse::<i64>() {
        return Value::from(int);
    }
    if let Ok(float) = raw.parse::<f64>() {
        if float.is_finite() {
            if let Some(number) = serde_json::Number::from_f64(float) {
                return Value::Number(number);
            }
        }
    }
    Value::String(raw.to_string())
}
