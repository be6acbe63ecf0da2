//! Delegating compositor for Bundle.
//!
//! A delegating composite copies no callables. It keeps the original objects
//! as an ordered delegate list and, for each method name any of them exposes,
//! installs a dispatcher closure that rescans the list at call time and
//! forwards to the first delegate owning that name.
//!
//! Forwarded calls are always nullary: arguments handed to the composite are
//! not threaded through to the delegate.
//!
//! # Key Types
//!
//! - [`DelegatingObject`] -- The composite plus its delegate list
//! - [`compose_by_delegation`] -- Build one from a list of objects

pub mod delegation;

pub use delegation::{compose_by_delegation, DelegatingObject};
