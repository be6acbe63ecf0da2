//! Compositors for Bundle.
//!
//! Both compositors merge method tables without ever copying state: the
//! result holds the same [`Method`](bundle_object::Method) handles as its
//! inputs, so a mutator reached through a composite updates the object that
//! defined it.
//!
//! # Key Functions
//!
//! - [`compose_two`] -- Merge two objects; the primary's entries always win
//! - [`compose_list`] -- Left fold of [`compose_two`]; earlier objects win
//! - [`compose_pairwise`] -- Right-recursive fold with the same outcome
//! - [`compose_with_clashes`] -- Keep every colliding implementation as a chain
//! - [`merge_with_clashes`] -- The pairwise step of [`compose_with_clashes`]

pub mod clash;
pub mod overlay;

pub use clash::{compose_with_clashes, merge_with_clashes};
pub use overlay::{compose_list, compose_pairwise, compose_two};
