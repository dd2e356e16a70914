//! Parameter type tables.
//!
//! A [`Signature`] is how a callable tells the engine which argument lists it
//! can be invoked with. A callable may declare several (an overload set), and a
//! signature may end in a variadic tail.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::{Value, ValueType};

/// The type a single parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    /// Accepts every value.
    Any,
    Null,
    Bool,
    Int,
    Float,
    /// Accepts `int` or `float`.
    Number,
    String,
    List,
    Structured,
}

impl ParamType {
    /// Returns true if a value of type `ty` may be passed for this parameter.
    #[must_use]
    pub const fn accepts_type(self, ty: ValueType) -> bool {
        matches!(
            (self, ty),
            (Self::Any, _)
                | (Self::Null, ValueType::Null)
                | (Self::Bool, ValueType::Bool)
                | (Self::Int, ValueType::Int)
                | (Self::Float, ValueType::Float)
                | (Self::Number, ValueType::Int | ValueType::Float)
                | (Self::String, ValueType::String)
                | (Self::List, ValueType::List)
                | (Self::Structured, ValueType::Structured)
        )
    }

    /// Returns true if `value` may be passed for this parameter.
    #[must_use]
    pub const fn accepts(self, value: &Value) -> bool {
        self.accepts_type(value.value_type())
    }

    /// Returns a human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Number => "number",
            Self::String => "string",
            Self::List => "list",
            Self::Structured => "structured",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One way of calling a callable.
///
/// # Examples
///
/// ```
/// use curryq::{ParamType, Signature, Value};
///
/// let sig = Signature::new([ParamType::Int, ParamType::Int]);
/// assert!(sig.accepts(&[Value::Int(1), Value::Int(2)]));
/// assert!(!sig.accepts(&[Value::Int(1)]));
///
/// let sum = Signature::rest(ParamType::Number);
/// assert!(sum.accepts(&[Value::Int(1), Value::Float(2.5), Value::Int(3)]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Signature {
    /// Fixed leading parameters.
    pub params: Vec<ParamType>,
    /// Type of the variadic tail, if the signature has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<ParamType>,
}

impl Signature {
    /// Creates a fixed-arity signature.
    #[must_use]
    pub fn new(params: impl IntoIterator<Item = ParamType>) -> Self {
        Self {
            params: params.into_iter().collect(),
            rest: None,
        }
    }

    /// Creates a signature with a variadic tail of type `rest`.
    #[must_use]
    pub fn variadic(params: impl IntoIterator<Item = ParamType>, rest: ParamType) -> Self {
        Self {
            params: params.into_iter().collect(),
            rest: Some(rest),
        }
    }

    /// Creates a signature that takes no arguments.
    #[must_use]
    pub fn nullary() -> Self {
        Self::default()
    }

    /// Creates a signature made of nothing but a variadic tail.
    #[must_use]
    pub fn rest(rest: ParamType) -> Self {
        Self {
            params: Vec::new(),
            rest: Some(rest),
        }
    }

    /// Creates a fixed signature of `arity` parameters that accept anything.
    #[must_use]
    pub fn any(arity: usize) -> Self {
        Self::new(std::iter::repeat(ParamType::Any).take(arity))
    }

    /// Number of fixed parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Returns true if this signature has a rest parameter.
    #[must_use]
    pub const fn is_variadic(&self) -> bool {
        self.rest.is_some()
    }

    /// Parameter type expected at `position`, following the variadic tail.
    #[must_use]
    pub fn param_at(&self, position: usize) -> Option<ParamType> {
        self.params.get(position).copied().or(self.rest)
    }

    /// Returns true if calling with exactly `args` is well-formed.
    #[must_use]
    pub fn accepts(&self, args: &[Value]) -> bool {
        self.accepts_types(args.iter().map(Value::value_type))
    }

    /// Like [`Signature::accepts`], over argument types only.
    #[must_use]
    pub fn accepts_types(&self, types: impl IntoIterator<Item = ValueType>) -> bool {
        let mut count = 0;
        for ty in types {
            match self.param_at(count) {
                Some(param) if param.accepts_type(ty) => count += 1,
                _ => return false,
            }
        }
        count >= self.params.len() && (self.rest.is_some() || count == self.params.len())
    }

    /// Returns true if `args` exactly fills the fixed parameters.
    ///
    /// Variadic signatures are never saturated this way.
    #[must_use]
    pub fn is_saturated_by(&self, args: &[Value]) -> bool {
        self.rest.is_none() && self.accepts(args)
    }

    /// Returns true if some continuation of `args` could still be accepted.
    #[must_use]
    pub fn accepts_prefix(&self, args: &[Value]) -> bool {
        if self.rest.is_none() && args.len() > self.params.len() {
            return false;
        }
        args.iter()
            .enumerate()
            .all(|(i, arg)| self.param_at(i).is_some_and(|param| param.accepts(arg)))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        if let Some(rest) = self.rest {
            if !self.params.is_empty() {
                write!(f, ", ")?;
            }
            write!(f, "{rest}...")?;
        }
        write!(f, ")")
    }
}
