//! Argument packs.
//!
//! An [`ArgPack`] is the ordered list of arguments bound so far in one curry
//! chain. Packs are persistent: `push` and `pop` return new packs and leave the
//! receiver untouched. Internally a pack is a singly linked list pointing from
//! the newest binding back to the oldest, so two packs that branched from a
//! common ancestor share every node of that ancestor.

use std::fmt;
use std::sync::Arc;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::error::{CurryError, CurryResult};
use crate::value::Value;

#[derive(Debug)]
struct Node {
    value: Value,
    prev: Option<Arc<Node>>,
}

impl Drop for Node {
    // Unlink iteratively so long chains don't recurse on drop.
    fn drop(&mut self) {
        let mut prev = self.prev.take();
        while let Some(node) = prev {
            match Arc::try_unwrap(node) {
                Ok(mut node) => prev = node.prev.take(),
                Err(_) => break,
            }
        }
    }
}

/// Ordered, persistent sequence of bound arguments.
///
/// # Examples
///
/// ```
/// use curryq::{ArgPack, Value};
///
/// let empty = ArgPack::new();
/// let one = empty.push(Value::Int(1));
/// let two = one.push(Value::Int(2));
///
/// assert!(empty.is_empty());
/// assert_eq!(two.to_call_arguments(), vec![Value::Int(1), Value::Int(2)]);
/// assert_eq!(two.pop().unwrap(), one);
/// ```
#[derive(Clone, Default)]
pub struct ArgPack {
    last: Option<Arc<Node>>,
    len: usize,
}

impl ArgPack {
    /// Creates an empty pack.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None, len: 0 }
    }

    /// Number of bound arguments.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The most recently bound argument.
    #[must_use]
    pub fn last(&self) -> Option<&Value> {
        self.last.as_deref().map(|node| &node.value)
    }

    /// Returns a new pack with `arg` bound after every existing argument.
    #[must_use]
    pub fn push(&self, arg: Value) -> Self {
        Self {
            last: Some(Arc::new(Node {
                value: arg,
                prev: self.last.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Returns a new pack with `args` bound in order.
    #[must_use]
    pub fn extend(&self, args: impl IntoIterator<Item = Value>) -> Self {
        args.into_iter().fold(self.clone(), |pack, arg| pack.push(arg))
    }

    /// Returns a new pack without the most recent binding.
    ///
    /// Fails with `CurryError::InvalidOperation` on an empty pack.
    pub fn pop(&self) -> CurryResult<Self> {
        let node = self
            .last
            .as_ref()
            .ok_or_else(|| CurryError::invalid_operation("cannot pop from an empty argument pack"))?;

        Ok(Self {
            last: node.prev.clone(),
            len: self.len - 1,
        })
    }

    /// Iterates over the bound arguments in binding order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Value> + ExactSizeIterator {
        let mut newest_first = Vec::with_capacity(self.len);
        let mut cursor = self.last.as_deref();
        while let Some(node) = cursor {
            newest_first.push(&node.value);
            cursor = node.prev.as_deref();
        }
        newest_first.into_iter().rev()
    }

    /// Materializes the pack as the argument list for a call.
    #[must_use]
    pub fn to_call_arguments(&self) -> Vec<Value> {
        self.iter().cloned().collect()
    }

    /// Returns true if both packs end in the same shared node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.last, &other.last) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl PartialEq for ArgPack {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && (self.ptr_eq(other) || self.iter().eq(other.iter()))
    }
}

impl fmt::Debug for ArgPack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl FromIterator<Value> for ArgPack {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new().extend(iter)
    }
}

impl Serialize for ArgPack {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len))?;
        for value in self.iter() {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}
