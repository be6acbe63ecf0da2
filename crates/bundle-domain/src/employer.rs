use std::cell::RefCell;
use std::rc::Rc;

use bundle_object::{CallError, Method, Object, State};
use serde_json::{json, Value};

use crate::args;

#[derive(Debug)]
struct EmployerState {
    company: String,
    salary: f64,
}

/// Employment details: a company name and a salary that can be raised.
pub fn employer(company: &str, salary: f64) -> Object {
    let state = Rc::new(RefCell::new(EmployerState {
        company: company.to_string(),
        salary,
    }));

    Object::builder()
        .method("getCompany", {
            let state = Rc::clone(&state);
            Method::nullary(move || Ok(json!(state.borrow().company)))
        })
        .method("getSalary", {
            let state = Rc::clone(&state);
            Method::nullary(move || Ok(json!(state.borrow().salary)))
        })
        .method("raise", {
            let state = Rc::clone(&state);
            Method::unary(move |percent: Value| {
                let percent = args::number("raise", &percent)?;
                if percent < 0.0 {
                    return Err(CallError::invalid_argument(
                        "raise",
                        format!("percent must not be negative, got {percent}"),
                    ));
                }
                let mut s = state.borrow_mut();
                let bonus = s.salary * percent / 100.0;
                s.salary += bonus;
                Ok(json!(s.salary))
            })
        })
        .method("describe", {
            let state = Rc::clone(&state);
            Method::nullary(move || {
                let s = state.borrow();
                Ok(json!(format!("{} pays {:.2}", s.company, s.salary)))
            })
        })
        .attributes(move || {
            let s = state.borrow();
            State::from([
                ("company".to_string(), json!(s.company)),
                ("salary".to_string(), json!(s.salary)),
            ])
        })
        .build()
}
