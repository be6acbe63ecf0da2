//! Demonstration objects for Bundle.
//!
//! Each factory closes a fresh method table over a private state handle
//! (`Rc<RefCell<..>>`). The handle is owned by that one object; composites
//! built from it share the handle, so their mutators and accessors all see the
//! same state.
//!
//! # Factories
//!
//! - [`counter`] -- `increment`, `decrement`, `add`, `getCount`, `reset`
//! - [`bank_account`] -- `deposit`, `withdraw`, `transfer`, `getBalance`, `getOwner`, `history`
//! - [`person`] -- `getName`, `setName`, `getAge`, `birthday`, `greet`
//! - [`employer`] -- `getCompany`, `getSalary`, `raise`, `describe`
//! - [`attribute_source_one`] / [`attribute_source_two`] -- Fixed-value objects for clash demos
//!
//! Every stateful factory also registers `attributes`.

mod args;
pub mod account;
pub mod counter;
pub mod employer;
pub mod fixtures;
pub mod person;

pub use account::bank_account;
pub use counter::counter;
pub use employer::employer;
pub use fixtures::{attribute_source_one, attribute_source_two};
pub use person::person;
