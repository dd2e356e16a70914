//! The callable seam.
//!
//! Anything that declares its signatures and can be invoked with a list of
//! [`Value`]s can be curried. [`Function`] covers the common case of wrapping a
//! closure; implement [`Callable`] directly for anything richer.

use std::fmt;
use std::sync::Arc;

use crate::error::{CallError, DefinitionError};
use crate::signature::{ParamType, Signature};
use crate::value::Value;

/// An operation that can be curried.
///
/// Implementations must report every argument list they accept through
/// [`Callable::signatures`]; the engine never calls them with a list that no
/// signature accepts.
pub trait Callable: Send + Sync {
    /// Name used in errors and log records.
    fn name(&self) -> &str;

    /// The overload set. Must not be empty.
    fn signatures(&self) -> &[Signature];

    /// Invoke with a complete argument list.
    fn call(&self, args: Vec<Value>) -> Result<Value, CallError>;
}

impl<C: Callable + ?Sized> Callable for Arc<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn signatures(&self) -> &[Signature] {
        (**self).signatures()
    }

    fn call(&self, args: Vec<Value>) -> Result<Value, CallError> {
        (**self).call(args)
    }
}

type Body = dyn Fn(Vec<Value>) -> Result<Value, CallError> + Send + Sync;

/// A closure together with the signatures it accepts.
///
/// # Example
/// ```
/// use curryq::{Callable, Function, ParamType, Signature, Value};
///
/// let add = Function::new(
///     "add",
///     Signature::new([ParamType::Int, ParamType::Int]),
///     |args| Ok(Value::Int(args[0].as_int().unwrap_or(0) + args[1].as_int().unwrap_or(0))),
/// );
///
/// assert_eq!(add.call(vec![Value::Int(2), Value::Int(3)]).unwrap(), Value::Int(5));
/// ```
#[derive(Clone)]
pub struct Function {
    name: String,
    signatures: Vec<Signature>,
    body: Arc<Body>,
}

impl Function {
    /// Creates a function with a single signature.
    pub fn new<F>(name: impl Into<String>, signature: Signature, body: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            signatures: vec![signature],
            body: Arc::new(body),
        }
    }

    /// Starts building a function, possibly with several overloads.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> FunctionBuilder {
        FunctionBuilder::new(name)
    }

    /// Finds the first signature that accepts `args`.
    #[must_use]
    pub fn resolve(&self, args: &[Value]) -> Option<&Signature> {
        self.signatures.iter().find(|sig| sig.accepts(args))
    }

    /// Explains why no signature accepts `args`.
    fn mismatch(&self, args: &[Value]) -> CallError {
        let candidate = self
            .signatures
            .iter()
            .find(|sig| sig.arity() == args.len() || (sig.is_variadic() && args.len() >= sig.arity()));

        let Some(sig) = candidate else {
            return CallError::ArgumentCount {
                function: self.name.clone(),
                expected: self.signatures.first().map_or(0, Signature::arity),
                got: args.len(),
            };
        };

        for (position, arg) in args.iter().enumerate() {
            if let Some(param) = sig.param_at(position) {
                if !param.accepts(arg) {
                    return CallError::ArgumentType {
                        function: self.name.clone(),
                        position,
                        expected: param.to_string(),
                        got: arg.value_type(),
                    };
                }
            }
        }

        CallError::ArgumentCount {
            function: self.name.clone(),
            expected: sig.arity(),
            got: args.len(),
        }
    }
}

impl Callable for Function {
    fn name(&self) -> &str {
        &self.name
    }

    fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    fn call(&self, args: Vec<Value>) -> Result<Value, CallError> {
        if self.resolve(&args).is_none() {
            return Err(self.mismatch(&args));
        }
        (self.body)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("signatures", &self.signatures)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Function`].
///
/// # Example
/// ```rust,ignore
/// let describe = Function::builder("describe")
///     .params([ParamType::Int])
///     .params([ParamType::Int, ParamType::String])
///     .body(|args| Ok(Value::from(format!("{} args", args.len()))))
///     .build()?;
/// ```
#[derive(Default)]
pub struct FunctionBuilder {
    name: String,
    signatures: Vec<Signature>,
    body: Option<Arc<Body>>,
}

impl FunctionBuilder {
    /// Creates a builder for a function called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add an overload.
    #[must_use]
    pub fn signature(mut self, signature: Signature) -> Self {
        self.signatures.push(signature);
        self
    }

    /// Add a fixed-arity overload.
    #[must_use]
    pub fn params(self, params: impl IntoIterator<Item = ParamType>) -> Self {
        self.signature(Signature::new(params))
    }

    /// Add a variadic overload.
    #[must_use]
    pub fn variadic(self, params: impl IntoIterator<Item = ParamType>, rest: ParamType) -> Self {
        self.signature(Signature::variadic(params, rest))
    }

    /// Set the closure run on every call (required).
    #[must_use]
    pub fn body<F>(mut self, body: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        self.body = Some(Arc::new(body));
        self
    }

    /// Build the function.
    ///
    /// Returns `DefinitionError::EmptyName` if the name is blank,
    /// `DefinitionError::NoSignatures` if no overload was added and
    /// `DefinitionError::MissingBody` if no body was set.
    pub fn build(self) -> Result<Function, DefinitionError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(DefinitionError::EmptyName);
        }
        if self.signatures.is_empty() {
            return Err(DefinitionError::NoSignatures { function: name });
        }
        let body = self
            .body
            .ok_or_else(|| DefinitionError::MissingBody {
                function: name.clone(),
            })?;

        Ok(Function {
            name,
            signatures: self.signatures,
            body,
        })
    }
}
