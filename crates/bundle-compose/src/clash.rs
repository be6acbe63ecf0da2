//! Clash-preserving composition.
//!
//! Where the override compositor keeps only the winner, this one keeps every
//! implementation of a colliding name as a [`Chain`](bundle_object::Chain),
//! ordered as the objects were listed. Indexed dispatch can then reach any of
//! them.

use std::collections::BTreeMap;

use bundle_object::{MethodEntry, Object};
use tracing::debug;

/// Merge two objects, keeping both sides of every clash.
///
/// Names on one side only are copied unchanged. A name on both sides becomes
/// the chain `left ++ right`; chains already present on either side are
/// spliced in, never nested.
pub fn merge_with_clashes(left: &Object, right: &Object) -> Object {
    let mut merged: BTreeMap<&str, MethodEntry> = BTreeMap::new();

    for (name, entry) in left.iter() {
        let combined = match right.entry(name) {
            Some(other) => MethodEntry::join(entry.clone(), other.clone()),
            None => entry.clone(),
        };
        merged.insert(name, combined);
    }

    for (name, entry) in right.iter() {
        merged.entry(name).or_insert_with(|| entry.clone());
    }

    Object::from_entries(merged)
}

/// Merge a list of objects pairwise from the right: object *k* is merged with
/// the already-merged result of objects *k+1..n*.
///
/// A name shared by several objects ends up as one flat chain whose members
/// follow list order, so position *i* in the chain is the *i*-th object (among
/// those defining the name).
pub fn compose_with_clashes(objects: &[Object]) -> Object {
    let result = match objects.split_last() {
        None => Object::new(),
        Some((last, init)) => init
            .iter()
            .rev()
            .fold(last.clone(), |acc, obj| merge_with_clashes(obj, &acc)),
    };

    let chains = result.iter().filter(|(_, entry)| entry.is_chain()).count();
    debug!(
        objects = objects.len(),
        methods = result.len(),
        chains,
        "composed with clashes"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundle_object::{CallArgs, Method};
    use proptest::prelude::*;
    use serde_json::{json, Value};
    use std::collections::BTreeSet;

    fn tagged(index: usize, names: &BTreeSet<String>) -> Object {
        names
            .iter()
            .fold(Object::builder(), |builder, name| {
                builder.method(name.clone(), Method::constant(json!(index)))
            })
            .build()
    }

    fn members(obj: &Object, name: &str) -> Vec<Value> {
        obj.entry(name)
            .unwrap()
            .members()
            .iter()
            .map(|m| m.call(CallArgs::None).unwrap())
            .collect()
    }

    fn names(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_list_yields_empty_object() {
        assert!(compose_with_clashes(&[]).is_empty());
    }

    #[test]
    fn disjoint_names_are_copied() {
        let a = tagged(0, &names(&["x"]));
        let b = tagged(1, &names(&["y"]));
        let merged = compose_with_clashes(&[a.clone(), b.clone()]);
        assert!(!merged.entry("x").unwrap().is_chain());
        assert!(merged.entry("x").unwrap().ptr_eq(a.entry("x").unwrap()));
        assert!(merged.entry("y").unwrap().ptr_eq(b.entry("y").unwrap()));
    }

    #[test]
    fn two_way_clash_is_left_then_right() {
        let a = tagged(0, &names(&["shared"]));
        let b = tagged(1, &names(&["shared", "extra"]));
        let merged = compose_with_clashes(&[a, b]);

        let entry = merged.entry("shared").unwrap();
        assert!(entry.is_chain());
        assert_eq!(members(&merged, "shared"), vec![json!(0), json!(1)]);
        assert_eq!(members(&merged, "extra"), vec![json!(1)]);
    }

    #[test]
    fn three_way_clash_is_flat_and_ordered() {
        let list: Vec<Object> = (0..3).map(|i| tagged(i, &names(&["n"]))).collect();
        let merged = compose_with_clashes(&list);
        assert_eq!(merged.entry("n").unwrap().len(), 3);
        assert_eq!(members(&merged, "n"), vec![json!(0), json!(1), json!(2)]);
    }

    #[test]
    fn merging_existing_chains_splices_them() {
        let left = compose_with_clashes(&[tagged(0, &names(&["n"])), tagged(1, &names(&["n"]))]);
        let right = compose_with_clashes(&[tagged(2, &names(&["n"])), tagged(3, &names(&["n"]))]);
        let merged = merge_with_clashes(&left, &right);
        assert_eq!(
            members(&merged, "n"),
            vec![json!(0), json!(1), json!(2), json!(3)]
        );
    }

    #[test]
    fn single_object_is_unchanged() {
        let a = tagged(0, &names(&["x", "y"]));
        let merged = compose_with_clashes(std::slice::from_ref(&a));
        assert_eq!(merged.method_names(), a.method_names());
        assert!(merged.iter().all(|(_, e)| !e.is_chain()));
    }

    proptest! {
        #[test]
        fn chains_follow_list_order(
            sets in prop::collection::vec(prop::collection::btree_set("[a-e]", 0..5), 1..6)
        ) {
            let objects: Vec<Object> = sets.iter().enumerate().map(|(i, s)| tagged(i, s)).collect();
            let merged = compose_with_clashes(&objects);

            let all: BTreeSet<String> = sets.iter().flatten().cloned().collect();
            prop_assert_eq!(merged.method_names(), all);

            for name in merged.method_names() {
                let expected: Vec<Value> = sets
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.contains(&name))
                    .map(|(i, _)| json!(i))
                    .collect();
                prop_assert_eq!(members(&merged, &name), expected);
            }
        }
    }
}
