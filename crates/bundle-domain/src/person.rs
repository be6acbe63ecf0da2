use std::cell::RefCell;
use std::rc::Rc;

use bundle_object::{CallError, Method, Object, State};
use serde_json::{json, Value};

use crate::args;

#[derive(Debug)]
struct PersonState {
    name: String,
    age: u32,
}

/// A person with a mutable name and an age that only grows.
pub fn person(name: &str, age: u32) -> Object {
    let state = Rc::new(RefCell::new(PersonState {
        name: name.to_string(),
        age,
    }));

    Object::builder()
        .method("getName", {
            let state = Rc::clone(&state);
            Method::nullary(move || Ok(json!(state.borrow().name)))
        })
        .method("setName", {
            let state = Rc::clone(&state);
            Method::unary(move |name: Value| {
                let name = args::text("setName", &name)?;
                state.borrow_mut().name = name.clone();
                Ok(json!(name))
            })
        })
        .method("getAge", {
            let state = Rc::clone(&state);
            Method::nullary(move || Ok(json!(state.borrow().age)))
        })
        .method("birthday", {
            let state = Rc::clone(&state);
            Method::nullary(move || {
                let mut s = state.borrow_mut();
                s.age = s
                    .age
                    .checked_add(1)
                    .ok_or_else(|| CallError::Rejected("birthday: age would overflow".into()))?;
                Ok(json!(s.age))
            })
        })
        .method("greet", {
            let state = Rc::clone(&state);
            Method::unary(move |other: Value| {
                let s = state.borrow();
                let greeting = match other.as_str() {
                    Some(other) => format!("Hello, {other}, I am {}", s.name),
                    None => format!("Hello, I am {}", s.name),
                };
                Ok(json!(greeting))
            })
        })
        .attributes(move || {
            let s = state.borrow();
            State::from([
                ("name".to_string(), json!(s.name)),
                ("age".to_string(), json!(s.age)),
            ])
        })
        .build()
}
