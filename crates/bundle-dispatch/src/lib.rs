//! Dispatcher for Bundle.
//!
//! Resolves a method name on an [`Object`](bundle_object::Object) and invokes
//! it with the arity-capped calling convention. Plain dispatch runs the head
//! of a clash chain; indexed dispatch reaches any chain member and reports
//! [`ChainStep::End`] past the last one.
//!
//! ```
//! use bundle_dispatch::{dispatch, dispatch_at, ChainStep};
//! use bundle_object::{Method, MethodEntry, Object};
//! use serde_json::json;
//!
//! let chain = MethodEntry::chain(vec![
//!     Method::constant(json!("first")),
//!     Method::constant(json!("second")),
//! ])
//! .unwrap();
//! let obj = Object::builder().entry("greet", chain).build();
//!
//! assert_eq!(dispatch(&obj, "greet", &[]).unwrap(), json!("first"));
//! assert_eq!(
//!     dispatch_at(&obj, "greet", &[], 2).unwrap(),
//!     ChainStep::Value(json!("second"))
//! );
//! assert!(dispatch_at(&obj, "greet", &[], 3).unwrap().is_end());
//! ```

pub mod dispatcher;

pub use dispatcher::{call_chain, dispatch, dispatch_at, next, ChainStep};
