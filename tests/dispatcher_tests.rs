//! Tests for the dispatch loop and the router lifecycle handle
//!
//! # Test Coverage
//!
//! Validates the controller's core responsibilities:
//! - Dispatch of the current path at mount time
//! - The worked end-to-end example: overlapping templates, unmatched paths
//! - Consecutive-duplicate suppression
//! - Exclusive active resource (previous dropped before the next handler runs)
//! - No-match leaving the active resource untouched
//! - Idempotent disposal, including from inside a handler
//!
//! # Test Strategy
//!
//! All tests run in fragment mode against `MemoryHost`, driving navigation
//! through the redirect helper or the host directly. Resource lifetimes are
//! observed with drop-tracking guards.

use navroute::history::{MemoryHost, NavigationHost, NavigationMode};
use navroute::router::Resource;
use navroute::{mount_with_mode, redirect, RouteTable, RouterHandle};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

mod common;
use common::TestTracing;

/// Records handler invocations as (tag, first param) pairs.
type Spy = Rc<RefCell<Vec<(&'static str, Option<Value>)>>>;

fn spying<R, F>(spy: &Spy, tag: &'static str, result: F) -> impl Fn(&navroute::ParamVec) -> R
where
    F: Fn() -> R + 'static,
{
    let spy = Rc::clone(spy);
    move |params| {
        let first = params.first().map(|(_, v)| v.clone());
        spy.borrow_mut().push((tag, first));
        result()
    }
}

/// Drop-tracking resource guard.
struct Guard(Rc<Cell<bool>>);

impl Drop for Guard {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

fn guard(flag: &Rc<Cell<bool>>) -> Option<Resource> {
    Some(Box::new(Guard(Rc::clone(flag))) as Resource)
}

#[test]
fn test_mount_dispatches_current_path() {
    let _t = TestTracing::init();
    let host: Rc<dyn NavigationHost> = MemoryHost::new();
    let spy: Spy = Rc::new(RefCell::new(Vec::new()));

    let table = RouteTable::new().route("/", spying(&spy, "root", || ()));
    let router = mount_with_mode(host, table, NavigationMode::Fragment);

    assert_eq!(spy.borrow().as_slice(), &[("root", None)]);
    router.dispose();
}

#[test]
fn test_worked_example() {
    let _t = TestTracing::init();
    let host: Rc<dyn NavigationHost> = MemoryHost::new();
    let spy: Spy = Rc::new(RefCell::new(Vec::new()));
    let b_dropped = Rc::new(Cell::new(false));

    let table = RouteTable::new()
        .route("/", spying(&spy, "A", || ()))
        .route("/foo/:id", {
            let spy = Rc::clone(&spy);
            let b_dropped = Rc::clone(&b_dropped);
            move |params: &navroute::ParamVec| {
                let first = params.first().map(|(_, v)| v.clone());
                spy.borrow_mut().push(("B", first));
                guard(&b_dropped)
            }
        })
        .route("/bar/:id", spying(&spy, "C", || ()));

    let router = mount_with_mode(Rc::clone(&host), table, NavigationMode::Fragment);

    redirect::redirect(&host, "/foo/123");
    redirect::redirect(&host, "/unknown");
    assert!(
        !b_dropped.get(),
        "an unmatched path must not tear down the active resource"
    );
    redirect::redirect(&host, "/bar/456");

    assert_eq!(
        spy.borrow().as_slice(),
        &[
            ("A", None),
            ("B", Some(Value::from(123))),
            ("C", Some(Value::from(456))),
        ]
    );
    assert!(b_dropped.get(), "dispatching C must dispose B's resource");
    router.dispose();
}

#[test]
fn test_consecutive_duplicate_paths_dispatch_once() {
    let _t = TestTracing::init();
    let mem = MemoryHost::new();
    let host: Rc<dyn NavigationHost> = Rc::clone(&mem) as Rc<dyn NavigationHost>;
    let spy: Spy = Rc::new(RefCell::new(Vec::new()));

    let table = RouteTable::new().route("/a", spying(&spy, "a", || ()));
    let router = mount_with_mode(host, table, NavigationMode::Fragment);

    // Distinct fragments normalizing to the same path: two notifications,
    // one dispatch.
    mem.set_fragment("/a");
    mem.set_fragment("//a");

    assert_eq!(spy.borrow().len(), 1);
    router.dispose();
}

#[test]
fn test_previous_resource_dropped_before_next_handler_runs() {
    let _t = TestTracing::init();
    let host: Rc<dyn NavigationHost> = MemoryHost::new();
    let first_dropped = Rc::new(Cell::new(false));
    let observed_dropped_on_entry = Rc::new(Cell::new(false));

    let table = RouteTable::new()
        .route("/first", {
            let first_dropped = Rc::clone(&first_dropped);
            move |_: &navroute::ParamVec| guard(&first_dropped)
        })
        .route("/second", {
            let first_dropped = Rc::clone(&first_dropped);
            let observed = Rc::clone(&observed_dropped_on_entry);
            move |_: &navroute::ParamVec| {
                observed.set(first_dropped.get());
            }
        });

    let router = mount_with_mode(Rc::clone(&host), table, NavigationMode::Fragment);
    redirect::redirect(&host, "/first");
    assert!(router.has_active_resource());

    redirect::redirect(&host, "/second");
    assert!(
        observed_dropped_on_entry.get(),
        "the old resource must already be gone when the new handler starts"
    );
    assert!(!router.has_active_resource(), "second handler returned ()");
    router.dispose();
}

#[test]
fn test_dispose_releases_resource_and_stops_dispatch() {
    let _t = TestTracing::init();
    let host: Rc<dyn NavigationHost> = MemoryHost::new();
    let spy: Spy = Rc::new(RefCell::new(Vec::new()));
    let dropped = Rc::new(Cell::new(false));

    let table = RouteTable::new()
        .route("/", |_| ())
        .route("/keep", {
            let dropped = Rc::clone(&dropped);
            move |_: &navroute::ParamVec| guard(&dropped)
        })
        .route("/later", spying(&spy, "later", || ()));

    let router = mount_with_mode(Rc::clone(&host), table, NavigationMode::Fragment);
    redirect::redirect(&host, "/keep");
    assert!(router.has_active_resource());

    router.dispose();
    assert!(dropped.get(), "disposal must release the active resource");
    assert!(router.is_disposed());

    redirect::redirect(&host, "/later");
    assert!(spy.borrow().is_empty(), "no dispatch after disposal");

    // Idempotent.
    router.dispose();
}

#[test]
fn test_drop_unmounts() {
    let _t = TestTracing::init();
    let host: Rc<dyn NavigationHost> = MemoryHost::new();
    let dropped = Rc::new(Cell::new(false));

    let table = RouteTable::new().route("/", {
        let dropped = Rc::clone(&dropped);
        move |_: &navroute::ParamVec| guard(&dropped)
    });

    let router = mount_with_mode(Rc::clone(&host), table, NavigationMode::Fragment);
    assert!(router.has_active_resource());
    drop(router);
    assert!(dropped.get(), "dropping the handle releases the resource");
}

#[test]
fn test_dispose_from_inside_handler() {
    let _t = TestTracing::init();
    let host: Rc<dyn NavigationHost> = MemoryHost::new();
    let spy: Spy = Rc::new(RefCell::new(Vec::new()));
    let returned_dropped = Rc::new(Cell::new(false));
    let handle: Rc<RefCell<Option<RouterHandle>>> = Rc::new(RefCell::new(None));

    let table = RouteTable::new()
        .route("/die", {
            let handle = Rc::clone(&handle);
            let returned_dropped = Rc::clone(&returned_dropped);
            move |_: &navroute::ParamVec| {
                if let Some(h) = handle.borrow().as_ref() {
                    h.dispose();
                }
                // Returned while disposed: must be dropped, never installed.
                guard(&returned_dropped)
            }
        })
        .route("/after", spying(&spy, "after", || ()));

    let router = mount_with_mode(Rc::clone(&host), table, NavigationMode::Fragment);
    *handle.borrow_mut() = Some(router);

    redirect::redirect(&host, "/die");

    let slot = handle.borrow();
    let router = slot.as_ref().expect("handle stored");
    assert!(router.is_disposed());
    assert!(returned_dropped.get());
    assert!(!router.has_active_resource());

    redirect::redirect(&host, "/after");
    assert!(spy.borrow().is_empty());
}
