//! Objects as method tables.
//!
//! An [`Object`] is immutable: adding or removing a method yields a new table
//! that shares every untouched entry with the original. Mutable state lives
//! only inside the closures a factory registers.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde_json::Value;

use crate::entry::MethodEntry;
use crate::error::{CallError, Result};
use crate::method::{CallArgs, Method};

/// Reserved name of the nullary state-snapshot method.
pub const ATTRIBUTES: &str = "attributes";

/// Snapshot of an object's externally observable state.
pub type State = BTreeMap<String, Value>;

/// A table from method name to [`MethodEntry`].
#[derive(Clone, Default)]
pub struct Object {
    table: BTreeMap<String, MethodEntry>,
}

impl Object {
    /// An object with no methods.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building an object method by method.
    pub fn builder() -> ObjectBuilder {
        ObjectBuilder::default()
    }

    /// Wrap the given entries verbatim. Later duplicates replace earlier ones.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, MethodEntry)>,
        S: Into<String>,
    {
        Self {
            table: entries
                .into_iter()
                .map(|(name, entry)| (name.into(), entry))
                .collect(),
        }
    }

    /// A copy of this object with `name` added or overridden.
    pub fn with_method(&self, name: impl Into<String>, method: Method) -> Self {
        self.with_entry(name, MethodEntry::Single(method))
    }

    /// A copy of this object with `name` bound to `entry`.
    pub fn with_entry(&self, name: impl Into<String>, entry: MethodEntry) -> Self {
        let mut table = self.table.clone();
        table.insert(name.into(), entry);
        Self { table }
    }

    /// A copy of this object without `name`. Removing an absent name is a no-op.
    pub fn without_method(&self, name: &str) -> Self {
        let mut table = self.table.clone();
        table.remove(name);
        Self { table }
    }

    /// Returns `true` if `name` is present.
    pub fn has_method(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Every method name, in sorted order.
    pub fn method_names(&self) -> BTreeSet<String> {
        self.table.keys().cloned().collect()
    }

    /// The entry stored under `name`.
    pub fn entry(&self, name: &str) -> Option<&MethodEntry> {
        self.table.get(name)
    }

    /// Number of method names.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the object has no methods.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Iterate over `(name, entry)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MethodEntry)> {
        self.table.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Snapshot of the object's state via its `attributes` method.
    ///
    /// Objects without `attributes` report an empty snapshot. A clash chain
    /// under that name answers with its head.
    pub fn attributes(&self) -> Result<State> {
        let Some(entry) = self.table.get(ATTRIBUTES) else {
            return Ok(State::new());
        };
        match entry.head().call(CallArgs::None)? {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(CallError::InvalidAttributes(json_kind(&other).into())),
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("methods", &self.table.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<S: Into<String>> FromIterator<(S, MethodEntry)> for Object {
    fn from_iter<I: IntoIterator<Item = (S, MethodEntry)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

/// Fluent construction of an [`Object`].
#[derive(Default)]
pub struct ObjectBuilder {
    table: BTreeMap<String, MethodEntry>,
}

impl ObjectBuilder {
    /// Register a single method.
    pub fn method(mut self, name: impl Into<String>, method: Method) -> Self {
        self.table.insert(name.into(), MethodEntry::Single(method));
        self
    }

    /// Register an arbitrary entry.
    pub fn entry(mut self, name: impl Into<String>, entry: MethodEntry) -> Self {
        self.table.insert(name.into(), entry);
        self
    }

    /// Register the `attributes` snapshot method.
    pub fn attributes<F>(self, snapshot: F) -> Self
    where
        F: Fn() -> State + 'static,
    {
        self.method(
            ATTRIBUTES,
            Method::nullary(move || Ok(Value::Object(snapshot().into_iter().collect()))),
        )
    }

    /// Finish the object.
    pub fn build(self) -> Object {
        Object { table: self.table }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
