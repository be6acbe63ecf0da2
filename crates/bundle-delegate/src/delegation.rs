use std::collections::BTreeSet;
use std::rc::Rc;

use bundle_object::{CallArgs, CallError, Method, MethodResult, Object};
use tracing::{debug, trace};

/// A composite whose methods forward to the first delegate that owns them.
#[derive(Clone, Debug)]
pub struct DelegatingObject {
    delegates: Rc<[Object]>,
    names: Vec<String>,
    table: Object,
}

/// Build a delegating composite over `objects`.
///
/// The method set is the union of every delegate's names, in first-seen order
/// from a left-to-right scan. Each entry is a fresh dispatcher, never a copy of
/// a delegate's callable.
pub fn compose_by_delegation(objects: &[Object]) -> DelegatingObject {
    let delegates: Rc<[Object]> = objects.iter().cloned().collect();

    let mut names: Vec<String> = Vec::new();
    {
        let mut seen = BTreeSet::new();
        for (name, _) in delegates.iter().flat_map(Object::iter) {
            if seen.insert(name) {
                names.push(name.to_string());
            }
        }
    }

    let mut builder = Object::builder();
    for name in &names {
        let delegates = Rc::clone(&delegates);
        let target = name.clone();
        builder = builder.method(
            name.clone(),
            Method::raw(move |_ignored| forward(&delegates, &target)),
        );
    }

    debug!(
        delegates = delegates.len(),
        methods = names.len(),
        "composed by delegation"
    );
    DelegatingObject {
        delegates,
        names,
        table: builder.build(),
    }
}

impl DelegatingObject {
    /// The retained delegate list, in original order.
    pub fn delegates(&self) -> &[Object] {
        &self.delegates
    }

    /// Method names in first-seen order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Index of the delegate that answers `name`.
    pub fn owner_of(&self, name: &str) -> Option<usize> {
        self.delegates.iter().position(|obj| obj.has_method(name))
    }

    /// Forward a nullary call for `name` to its owning delegate.
    pub fn forward(&self, name: &str) -> MethodResult {
        forward(&self.delegates, name)
    }

    /// The table of dispatcher closures.
    pub fn as_object(&self) -> &Object {
        &self.table
    }

    /// Consume the composite, keeping only its table of dispatchers.
    pub fn into_object(self) -> Object {
        self.table
    }
}

impl From<DelegatingObject> for Object {
    fn from(composite: DelegatingObject) -> Self {
        composite.into_object()
    }
}

fn forward(delegates: &[Object], name: &str) -> MethodResult {
    let entry = delegates
        .iter()
        .find_map(|obj| obj.entry(name))
        .ok_or_else(|| CallError::method_not_found(name))?;
    trace!(method = name, "forwarding to delegate");
    entry.head().call(CallArgs::None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundle_domain::{attribute_source_one, attribute_source_two, counter};
    use serde_json::{json, Value};

    fn call(obj: &Object, name: &str, args: CallArgs) -> MethodResult {
        obj.entry(name).unwrap().head().call(args)
    }

    #[test]
    fn first_owner_wins() {
        let d = compose_by_delegation(&[attribute_source_one(), attribute_source_two()]);
        assert_eq!(d.owner_of("getAttribute1"), Some(0));
        assert_eq!(d.owner_of("getAttribute2"), Some(1));
        assert_eq!(d.forward("getAttribute1").unwrap(), json!(500));
        assert_eq!(d.forward("getAttribute2").unwrap(), json!(700));
    }

    #[test]
    fn names_are_first_seen_without_duplicates() {
        let d = compose_by_delegation(&[attribute_source_two(), attribute_source_one()]);
        assert_eq!(d.names(), &["getAttribute1", "getAttribute2"]);
        assert_eq!(d.as_object().len(), 2);
    }

    #[test]
    fn dispatchers_are_not_copies() {
        let one = attribute_source_one();
        let d = compose_by_delegation(std::slice::from_ref(&one));
        let ours = d.as_object().entry("getAttribute1").unwrap();
        assert!(!ours.ptr_eq(one.entry("getAttribute1").unwrap()));
    }

    #[test]
    fn arguments_are_not_threaded_through() {
        let echo = Object::builder().method("echo", Method::unary(Ok)).build();
        let d = compose_by_delegation(&[echo]);
        let out = call(d.as_object(), "echo", CallArgs::One(json!("ignored"))).unwrap();
        assert_eq!(out, Value::Null);
    }

    #[test]
    fn missing_name_is_method_not_found() {
        let d = compose_by_delegation(&[attribute_source_one()]);
        assert_eq!(
            d.forward("getAttribute3").unwrap_err(),
            CallError::MethodNotFound("getAttribute3".into())
        );
    }

    #[test]
    fn state_is_shared_with_delegates() {
        let c = counter(0);
        let d = compose_by_delegation(std::slice::from_ref(&c));
        d.forward("increment").unwrap();
        d.forward("increment").unwrap();
        assert_eq!(call(&c, "getCount", CallArgs::None).unwrap(), json!(2));
    }

    #[test]
    fn empty_delegate_list() {
        let d = compose_by_delegation(&[]);
        assert!(d.as_object().is_empty());
        assert!(d.delegates().is_empty());
        assert!(d.forward("anything").is_err());
    }
}
