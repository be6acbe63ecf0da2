use crate::error::{CallError, Result};
use crate::method::Method;

/// An ordered run of clashing implementations for one method name.
///
/// A chain always holds at least two members. Positions are 1-based, matching
/// indexed dispatch.
#[derive(Clone, Debug)]
pub struct Chain {
    members: Vec<Method>,
}

impl Chain {
    /// Build a chain, rejecting fewer than two members.
    pub fn new(members: Vec<Method>) -> Result<Self> {
        if members.len() < 2 {
            return Err(CallError::ChainTooShort(members.len()));
        }
        Ok(Self { members })
    }

    /// The implementation that plain dispatch invokes.
    pub fn head(&self) -> &Method {
        &self.members[0]
    }

    /// The member at 1-based `index`, or `None` past the end (and at 0).
    pub fn get(&self, index: usize) -> Option<&Method> {
        index.checked_sub(1).and_then(|i| self.members.get(i))
    }

    /// Number of members (always at least two).
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The members in order.
    pub fn members(&self) -> &[Method] {
        &self.members
    }
}

/// What a method table stores under a name.
#[derive(Clone, Debug)]
pub enum MethodEntry {
    /// One implementation.
    Single(Method),
    /// Several implementations kept by clash-preserving composition.
    Chain(Chain),
}

impl MethodEntry {
    /// Wrap a single method.
    pub fn single(method: Method) -> Self {
        Self::Single(method)
    }

    /// Build a chain entry from explicit members.
    pub fn chain(members: Vec<Method>) -> Result<Self> {
        Chain::new(members).map(Self::Chain)
    }

    /// Join two clashing entries into one chain, `left` first.
    ///
    /// Chains on either side are spliced in member by member, so the result
    /// is always flat no matter how many merges fed into it.
    pub fn join(left: MethodEntry, right: MethodEntry) -> Self {
        let mut members = left.into_members();
        members.extend(right.into_members());
        Self::Chain(Chain { members })
    }

    /// The implementation invoked by plain (non-indexed) dispatch.
    pub fn head(&self) -> &Method {
        match self {
            Self::Single(method) => method,
            Self::Chain(chain) => chain.head(),
        }
    }

    /// Returns `true` for a chain.
    pub fn is_chain(&self) -> bool {
        matches!(self, Self::Chain(_))
    }

    /// Number of implementations held (1 for a single).
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Chain(chain) => chain.len(),
        }
    }

    /// Always `false`: an entry holds at least one implementation.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// All implementations in order.
    pub fn members(&self) -> &[Method] {
        match self {
            Self::Single(method) => std::slice::from_ref(method),
            Self::Chain(chain) => chain.members(),
        }
    }

    /// Returns `true` if both entries hold the very same callables in the
    /// same shape.
    pub fn ptr_eq(&self, other: &MethodEntry) -> bool {
        self.is_chain() == other.is_chain()
            && self.len() == other.len()
            && self
                .members()
                .iter()
                .zip(other.members())
                .all(|(a, b)| a.ptr_eq(b))
    }

    fn into_members(self) -> Vec<Method> {
        match self {
            Self::Single(method) => vec![method],
            Self::Chain(chain) => chain.members,
        }
    }
}

impl From<Method> for MethodEntry {
    fn from(method: Method) -> Self {
        Self::Single(method)
    }
}
