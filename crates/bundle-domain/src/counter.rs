use std::cell::RefCell;
use std::rc::Rc;

use bundle_object::{CallError, Method, Object, Result, State};
use serde_json::{json, Value};

use crate::args;

/// Private state of a counter.
#[derive(Debug)]
struct CounterState {
    count: i64,
    start: i64,
}

/// `count + delta`, or a rejection when the result leaves the `i64` range.
fn shift(method: &str, count: i64, delta: i64) -> Result<i64> {
    count
        .checked_add(delta)
        .ok_or_else(|| CallError::Rejected(format!("{method}: count would overflow")))
}

/// A counter starting at `start`.
///
/// `increment`, `decrement`, `add(n)` and `reset` return the new count.
pub fn counter(start: i64) -> Object {
    let state = Rc::new(RefCell::new(CounterState { count: start, start }));

    Object::builder()
        .method("increment", {
            let state = Rc::clone(&state);
            Method::nullary(move || {
                let mut s = state.borrow_mut();
                s.count = shift("increment", s.count, 1)?;
                Ok(json!(s.count))
            })
        })
        .method("decrement", {
            let state = Rc::clone(&state);
            Method::nullary(move || {
                let mut s = state.borrow_mut();
                s.count = shift("decrement", s.count, -1)?;
                Ok(json!(s.count))
            })
        })
        .method("add", {
            let state = Rc::clone(&state);
            Method::unary(move |n: Value| {
                let n = args::integer("add", &n)?;
                let mut s = state.borrow_mut();
                s.count = shift("add", s.count, n)?;
                Ok(json!(s.count))
            })
        })
        .method("getCount", {
            let state = Rc::clone(&state);
            Method::nullary(move || Ok(json!(state.borrow().count)))
        })
        .method("reset", {
            let state = Rc::clone(&state);
            Method::nullary(move || {
                let mut s = state.borrow_mut();
                s.count = s.start;
                Ok(json!(s.count))
            })
        })
        .attributes(move || State::from([("count".to_string(), json!(state.borrow().count))]))
        .build()
}
