//! Stateless objects with fixed answers, used to demonstrate clashes.

use bundle_object::{Method, Object};
use serde_json::json;

/// Exposes `getAttribute1 -> 500`.
pub fn attribute_source_one() -> Object {
    Object::builder()
        .method("getAttribute1", Method::constant(json!(500)))
        .build()
}

/// Exposes `getAttribute1 -> 600` and `getAttribute2 -> 700`.
pub fn attribute_source_two() -> Object {
    Object::builder()
        .method("getAttribute1", Method::constant(json!(600)))
        .method("getAttribute2", Method::constant(json!(700)))
        .build()
}
