//! Arguments as the dispatch loop sees them.
//!
//! Besides ordinary values, a step may carry a final-argument marker
//! ([`final_argument`]) or the uncurry sentinel ([`UNCURRY`]).

use crate::value::Value;

/// The uncurry sentinel type. Its only value is [`UNCURRY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Uncurry;

/// Pass as the sole argument of a step to undo the most recent binding.
pub const UNCURRY: Uncurry = Uncurry;

/// One argument of a dispatch step.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// An ordinary value to bind.
    Value(Value),
    /// A value that should complete the call if a call with it is well-formed.
    Final(Value),
    /// Undo the most recent binding.
    Uncurry,
}

impl Arg {
    /// Returns true for a final-argument marker.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(self, Self::Final(_))
    }

    /// Returns true for the uncurry sentinel.
    #[must_use]
    pub const fn is_uncurry(&self) -> bool {
        matches!(self, Self::Uncurry)
    }

    /// The carried value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) | Self::Final(v) => Some(v),
            Self::Uncurry => None,
        }
    }
}

/// Wraps `value` as a final-argument marker.
///
/// # Examples
///
/// ```
/// use curryq::{final_argument, Arg, Value};
///
/// assert_eq!(final_argument(3), Arg::Final(Value::Int(3)));
/// ```
#[must_use]
pub fn final_argument(value: impl Into<Value>) -> Arg {
    Arg::Final(value.into())
}

impl From<Uncurry> for Arg {
    fn from(_: Uncurry) -> Self {
        Self::Uncurry
    }
}

macro_rules! impl_arg_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::Value(value.into())
                }
            }
        )*
    };
}

impl_arg_from!(Value, bool, i32, i64, f32, f64, String, &str, Vec<Value>, serde_json::Value);
