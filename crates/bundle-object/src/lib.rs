//! Object model for Bundle.
//!
//! An object is nothing more than a table mapping method names to callables.
//! There are no classes: behaviour is assembled at runtime by composing tables
//! (see `bundle-compose` and `bundle-delegate`) and invoked by name (see
//! `bundle-dispatch`). Every other Bundle crate depends on `bundle-object`.
//!
//! # Key Types
//!
//! - [`Object`] — Immutable method table; every edit produces a new table
//! - [`MethodEntry`] — A single callable, or a [`Chain`] of clashing callables
//! - [`Method`] — Shared handle to a callable; cloning never copies its state
//! - [`CallArgs`] — Arity-capped argument shape (0, 1, 2, or an aggregate)
//! - [`State`] — Snapshot returned by the reserved `attributes` method
//! - [`CallError`] — Structured failure of a call or lookup

pub mod entry;
pub mod error;
pub mod method;
pub mod object;

pub use entry::{Chain, MethodEntry};
pub use error::{CallError, MethodResult, Result};
pub use method::{CallArgs, Method};
pub use object::{Object, ObjectBuilder, State, ATTRIBUTES};
