use bundle_object::{CallArgs, CallError, MethodEntry, MethodResult, Object, Result};
use serde_json::Value;
use tracing::trace;

// ---------------------------------------------------------------------------
// ChainStep
// ---------------------------------------------------------------------------

/// Result of indexed dispatch.
///
/// `End` is the "nothing at this index" sentinel. It is a normal outcome,
/// kept apart from [`CallError::MethodNotFound`], which is a hard failure.
#[derive(Clone, Debug, PartialEq)]
pub enum ChainStep {
    /// The member at the requested index ran and returned this value.
    Value(Value),
    /// The index lies past the end of the chain.
    End,
}

impl ChainStep {
    /// Returns `true` for the end-of-chain sentinel.
    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }

    /// The returned value, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::End => None,
        }
    }

    /// Consume the step, keeping the returned value.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::End => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

fn resolve<'a>(obj: &'a Object, name: &str) -> Result<&'a MethodEntry> {
    obj.entry(name)
        .ok_or_else(|| CallError::method_not_found(name))
}

/// Invoke `name` on `obj`.
///
/// A clash chain answers with its first member; the others are reachable only
/// through [`dispatch_at`] and [`next`].
pub fn dispatch(obj: &Object, name: &str, args: &[Value]) -> MethodResult {
    let entry = resolve(obj, name)?;
    trace!(
        method = name,
        arity = args.len(),
        chain = entry.is_chain(),
        "dispatch"
    );
    entry.head().call(CallArgs::from_values(args))
}

/// Invoke the member at 1-based `index` of the chain under `name`.
///
/// An index past the end (or `0`) yields [`ChainStep::End`]. For a
/// non-clashing method the index is ignored and the method runs as usual.
pub fn dispatch_at(obj: &Object, name: &str, args: &[Value], index: usize) -> Result<ChainStep> {
    let method = match resolve(obj, name)? {
        MethodEntry::Single(method) => method,
        MethodEntry::Chain(chain) => match chain.get(index) {
            Some(method) => method,
            None => {
                trace!(method = name, index, len = chain.len(), "chain exhausted");
                return Ok(ChainStep::End);
            }
        },
    };
    trace!(method = name, index, arity = args.len(), "indexed dispatch");
    method.call(CallArgs::from_values(args)).map(ChainStep::Value)
}

/// Call-next: [`dispatch_at`] with `current + 1`.
///
/// There is no end-of-chain check here beyond the sentinel; chain-aware
/// callers test [`ChainStep::is_end`] themselves.
pub fn next(obj: &Object, name: &str, args: &[Value], current: usize) -> Result<ChainStep> {
    dispatch_at(obj, name, args, current.saturating_add(1))
}

/// Run every implementation under `name` in chain order, collecting results.
///
/// Starts at index 1 and follows [`next`] until the sentinel. A non-clashing
/// method runs exactly once.
pub fn call_chain(obj: &Object, name: &str, args: &[Value]) -> Result<Vec<Value>> {
    if !resolve(obj, name)?.is_chain() {
        return dispatch(obj, name, args).map(|value| vec![value]);
    }

    let mut results = Vec::new();
    let mut index = 1;
    let mut step = dispatch_at(obj, name, args, index)?;
    while let ChainStep::Value(value) = step {
        results.push(value);
        step = next(obj, name, args, index)?;
        index += 1;
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundle_compose::{compose_list, compose_two, compose_with_clashes};
    use bundle_delegate::compose_by_delegation;
    use bundle_domain::{attribute_source_one, attribute_source_two, bank_account, counter, person};
    use bundle_object::Method;
    use serde_json::json;

    fn clashing() -> Object {
        compose_with_clashes(&[attribute_source_one(), attribute_source_two()])
    }

    // -----------------------------------------------------------------------
    // Plain dispatch
    // -----------------------------------------------------------------------

    #[test]
    fn absent_name_is_method_not_found() {
        let err = dispatch(&counter(0), "fly", &[]).unwrap_err();
        assert_eq!(err, CallError::MethodNotFound("fly".into()));
    }

    #[test]
    fn chain_answers_with_head() {
        assert_eq!(dispatch(&clashing(), "getAttribute1", &[]).unwrap(), json!(500));
    }

    #[test]
    fn arguments_follow_the_convention() {
        let obj = Object::builder()
            .method("first", Method::unary(Ok))
            .method("pair", Method::binary(|a, b| Ok(json!([a, b]))))
            .build();

        assert_eq!(dispatch(&obj, "first", &[json!(1)]).unwrap(), json!(1));
        assert_eq!(
            dispatch(&obj, "pair", &[json!(1), json!(2)]).unwrap(),
            json!([1, 2])
        );
        assert_eq!(
            dispatch(&obj, "first", &[json!(1), json!(2), json!(3)]).unwrap(),
            json!([1, 2, 3])
        );
    }

    #[test]
    fn method_errors_propagate() {
        let account = bank_account("ada", 10.0);
        let err = dispatch(&account, "withdraw", &[json!(50.0)]).unwrap_err();
        assert!(matches!(err, CallError::Rejected(_)));
    }

    // -----------------------------------------------------------------------
    // Indexed dispatch and call-next
    // -----------------------------------------------------------------------

    #[test]
    fn two_object_clash_scenario() {
        let c = clashing();
        assert_eq!(dispatch(&c, "getAttribute1", &[]).unwrap(), json!(500));
        assert_eq!(
            dispatch_at(&c, "getAttribute1", &[], 2).unwrap(),
            ChainStep::Value(json!(600))
        );
        assert_eq!(dispatch_at(&c, "getAttribute1", &[], 3).unwrap(), ChainStep::End);
        assert_eq!(dispatch(&c, "getAttribute2", &[]).unwrap(), json!(700));
        assert_eq!(
            next(&c, "getAttribute1", &[], 1).unwrap(),
            ChainStep::Value(json!(600))
        );
    }

    #[test]
    fn index_is_ignored_for_single_methods() {
        let c = clashing();
        for index in [0, 1, 2, 99] {
            assert_eq!(
                dispatch_at(&c, "getAttribute2", &[], index).unwrap(),
                ChainStep::Value(json!(700))
            );
        }
    }

    #[test]
    fn index_zero_is_the_sentinel_on_chains() {
        assert!(dispatch_at(&clashing(), "getAttribute1", &[], 0)
            .unwrap()
            .is_end());
    }

    #[test]
    fn sentinel_and_missing_method_stay_distinct() {
        let c = clashing();
        assert!(dispatch_at(&c, "getAttribute1", &[], 3).is_ok());
        assert!(dispatch_at(&c, "getAttribute9", &[], 3).is_err());
        assert!(next(&c, "getAttribute9", &[], 1).is_err());
    }

    #[test]
    fn next_past_the_end_is_sentinel() {
        assert_eq!(
            next(&clashing(), "getAttribute1", &[], 2).unwrap(),
            ChainStep::End
        );
        assert_eq!(
            next(&clashing(), "getAttribute1", &[], usize::MAX).unwrap(),
            ChainStep::End
        );
    }

    #[test]
    fn call_chain_visits_every_member() {
        assert_eq!(
            call_chain(&clashing(), "getAttribute1", &[]).unwrap(),
            vec![json!(500), json!(600)]
        );
        assert_eq!(
            call_chain(&clashing(), "getAttribute2", &[]).unwrap(),
            vec![json!(700)]
        );
    }

    #[test]
    fn three_way_chain_is_fully_indexable() {
        let third = Object::builder()
            .method("getAttribute1", Method::constant(json!(800)))
            .build();
        let c = compose_with_clashes(&[attribute_source_one(), attribute_source_two(), third]);
        assert_eq!(
            call_chain(&c, "getAttribute1", &[]).unwrap(),
            vec![json!(500), json!(600), json!(800)]
        );
        assert!(dispatch_at(&c, "getAttribute1", &[], 4).unwrap().is_end());
    }

    #[test]
    fn chain_members_receive_arguments() {
        let a = Object::builder().method("f", Method::unary(Ok)).build();
        let b = Object::builder()
            .method("f", Method::binary(|x, y| Ok(json!([y, x]))))
            .build();
        let c = compose_with_clashes(&[a, b]);
        assert_eq!(
            dispatch_at(&c, "f", &[json!(1), json!(2)], 2).unwrap(),
            ChainStep::Value(json!([2, 1]))
        );
    }

    // -----------------------------------------------------------------------
    // Composed forms
    // -----------------------------------------------------------------------

    #[test]
    fn method_not_found_on_every_composed_form() {
        let a = counter(0);
        let b = person("Ada", 36);
        let forms = [
            compose_two(&a, &b),
            compose_list(&[a.clone(), b.clone()]),
            compose_with_clashes(&[a.clone(), b.clone()]),
            compose_by_delegation(&[a, b]).into_object(),
        ];
        for form in &forms {
            assert_eq!(
                dispatch(form, "nope", &[]).unwrap_err(),
                CallError::MethodNotFound("nope".into())
            );
            assert_eq!(
                dispatch_at(form, "nope", &[], 1).unwrap_err(),
                CallError::MethodNotFound("nope".into())
            );
        }
    }

    #[test]
    fn delegation_resolves_first_owner_and_drops_arguments() {
        let d = compose_by_delegation(&[attribute_source_one(), attribute_source_two()]);
        let obj = d.as_object();
        assert_eq!(
            dispatch(obj, "getAttribute1", &[json!("x"), json!("y")]).unwrap(),
            json!(500)
        );
        assert_eq!(dispatch(obj, "getAttribute2", &[json!(1)]).unwrap(), json!(700));
    }

    #[test]
    fn mutation_through_composite_is_visible_on_source() {
        let account = bank_account("ada", 100.0);
        let composite = compose_two(&person("Ada", 36), &account);

        dispatch(&composite, "deposit", &[json!(25.0)]).unwrap();
        assert_eq!(dispatch(&account, "getBalance", &[]).unwrap(), json!(125.0));
    }
}
