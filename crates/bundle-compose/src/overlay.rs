//! Override-style composition.
//!
//! There is exactly one precedence rule: the primary object's entry wins.
//! Folding a list applies it transitively, so the earliest object in the list
//! shadows every later one.

use std::collections::BTreeMap;

use bundle_object::{MethodEntry, Object};
use tracing::{debug, trace};

/// Merge two objects. For every name in either, the result holds `primary`'s
/// entry if it has one, otherwise `secondary`'s.
pub fn compose_two(primary: &Object, secondary: &Object) -> Object {
    let mut merged: BTreeMap<&str, &MethodEntry> = secondary.iter().collect();
    let mut overridden = 0usize;
    for (name, entry) in primary.iter() {
        if merged.insert(name, entry).is_some() {
            overridden += 1;
        }
    }

    let result: Object = merged
        .into_iter()
        .map(|(name, entry)| (name, entry.clone()))
        .collect();
    trace!(methods = result.len(), overridden, "composed two objects");
    result
}

/// Fold [`compose_two`] over `objects` from the head, seeding the accumulator
/// with the first element.
///
/// The empty list yields the empty object. A single element yields a table
/// with the same entries as that element.
pub fn compose_list(objects: &[Object]) -> Object {
    let result = match objects {
        [] => Object::new(),
        [first, rest @ ..] => rest
            .iter()
            .fold(first.clone(), |acc, next| compose_two(&acc, next)),
    };
    debug!(objects = objects.len(), methods = result.len(), "composed object list");
    result
}

/// Right-recursive alternative to [`compose_list`]: the head composed over
/// the composition of the tail. Produces the same method set and the same
/// winners for every input.
pub fn compose_pairwise(objects: &[Object]) -> Object {
    match objects {
        [] => Object::new(),
        [first, rest @ ..] => compose_two(first, &compose_pairwise(rest)),
    }
}
