//! Callables and the arity-capped calling convention.
//!
//! Callers never hand a method an arbitrary parameter list. Zero, one, or two
//! arguments are passed positionally; three or more are packed into a single
//! aggregate. [`CallArgs`] is that shape, and the [`Method`] adapters explain
//! what each shape means to a function of fixed arity.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::error::MethodResult;

/// Arguments as seen by a callable after the calling convention is applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CallArgs {
    /// Nullary call.
    #[default]
    None,
    /// Unary call.
    One(Value),
    /// Binary call.
    Two(Value, Value),
    /// Three or more arguments, passed as one aggregate.
    Many(Vec<Value>),
}

impl CallArgs {
    /// Apply the calling convention to a caller-supplied argument list.
    pub fn from_values(values: &[Value]) -> Self {
        match values {
            [] => Self::None,
            [a] => Self::One(a.clone()),
            [a, b] => Self::Two(a.clone(), b.clone()),
            _ => Self::Many(values.to_vec()),
        }
    }

    /// Number of caller-supplied arguments.
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::One(_) => 1,
            Self::Two(..) => 2,
            Self::Many(values) => values.len(),
        }
    }

    /// Returns `true` for a nullary call.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The argument list in positional order.
    pub fn into_values(self) -> Vec<Value> {
        match self {
            Self::None => Vec::new(),
            Self::One(a) => vec![a],
            Self::Two(a, b) => vec![a, b],
            Self::Many(values) => values,
        }
    }

    /// What a one-parameter function receives. The aggregate of a 3+ call
    /// arrives as a single array.
    fn into_unary(self) -> Value {
        match self {
            Self::None => Value::Null,
            Self::One(a) | Self::Two(a, _) => a,
            Self::Many(values) => Value::Array(values),
        }
    }

    /// What a two-parameter function receives.
    fn into_binary(self) -> (Value, Value) {
        match self {
            Self::None => (Value::Null, Value::Null),
            Self::One(a) => (a, Value::Null),
            Self::Two(a, b) => (a, b),
            Self::Many(values) => (Value::Array(values), Value::Null),
        }
    }
}

impl From<Vec<Value>> for CallArgs {
    fn from(values: Vec<Value>) -> Self {
        Self::from_values(&values)
    }
}

type Callable = dyn Fn(CallArgs) -> MethodResult;

/// Shared handle to a callable.
///
/// Cloning a `Method` clones the handle, not the closure: every clone closes
/// over the same state, so a mutator reached through any composite updates
/// the object that defined it.
#[derive(Clone)]
pub struct Method {
    inner: Rc<Callable>,
}

impl Method {
    /// Wrap a callable that sees the raw [`CallArgs`].
    pub fn raw<F>(f: F) -> Self
    where
        F: Fn(CallArgs) -> MethodResult + 'static,
    {
        Self { inner: Rc::new(f) }
    }

    /// A method that takes no arguments; anything passed is ignored.
    pub fn nullary<F>(f: F) -> Self
    where
        F: Fn() -> MethodResult + 'static,
    {
        Self::raw(move |_| f())
    }

    /// A one-parameter method. A missing argument is `null`.
    pub fn unary<F>(f: F) -> Self
    where
        F: Fn(Value) -> MethodResult + 'static,
    {
        Self::raw(move |args| f(args.into_unary()))
    }

    /// A two-parameter method. Missing arguments are `null`.
    pub fn binary<F>(f: F) -> Self
    where
        F: Fn(Value, Value) -> MethodResult + 'static,
    {
        Self::raw(move |args| {
            let (a, b) = args.into_binary();
            f(a, b)
        })
    }

    /// A method that always receives the full positional list.
    pub fn variadic<F>(f: F) -> Self
    where
        F: Fn(Vec<Value>) -> MethodResult + 'static,
    {
        Self::raw(move |args| f(args.into_values()))
    }

    /// A nullary method that always returns `value`.
    pub fn constant(value: Value) -> Self {
        Self::nullary(move || Ok(value.clone()))
    }

    /// Invoke the callable.
    pub fn call(&self, args: CallArgs) -> MethodResult {
        (self.inner)(args)
    }

    /// Returns `true` if both handles point at the same callable.
    pub fn ptr_eq(&self, other: &Method) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Method({:p})", Rc::as_ptr(&self.inner) as *const ())
    }
}
