//! The curry engine.
//!
//! [`curry`] turns a [`Callable`] into an [`Accumulator`]. Each `apply` on an
//! accumulator is one dispatch step (see [`dispatch`]) and yields either a new
//! accumulator or the callable's result, wrapped in [`Curried`].

mod dispatch;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::arg::Arg;
use crate::callable::Callable;
use crate::config::CurryConfig;
use crate::error::{CurryError, CurryResult};
use crate::invocable;
use crate::pack::ArgPack;
use crate::value::Value;

/// Identifier shared by every accumulator descending from one `curry` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(Uuid);

impl ChainId {
    /// Creates a new random chain ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChainId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Curries `callable` with the default configuration.
///
/// # Example
/// ```
/// use curryq::{curry, Function, ParamType, Signature, Value};
///
/// let add3 = Function::new("add3", Signature::new([ParamType::Int; 3]), |args| {
///     Ok(Value::Int(args.iter().filter_map(Value::as_int).sum()))
/// });
///
/// let result = curry(add3)
///     .apply1(1)?
///     .apply1(2)?
///     .apply1(3)?;
/// assert_eq!(result.into_result(), Some(Value::Int(6)));
/// # Ok::<(), curryq::CurryError>(())
/// ```
pub fn curry<C: Callable + 'static>(callable: C) -> Accumulator {
    curry_with(callable, CurryConfig::default())
}

/// Curries `callable` with an explicit configuration.
pub fn curry_with<C: Callable + 'static>(callable: C, config: CurryConfig) -> Accumulator {
    Accumulator::new(Arc::new(callable), config)
}

/// A partially applied callable waiting for more arguments.
///
/// Accumulators are immutable. `apply` never changes the receiver, so the same
/// accumulator can be continued along several independent branches.
#[derive(Clone)]
pub struct Accumulator {
    callable: Arc<dyn Callable>,
    pack: ArgPack,
    config: CurryConfig,
    chain_id: ChainId,
}

impl Accumulator {
    /// Starts a new chain over an already shared callable with nothing bound.
    #[must_use]
    pub fn new(callable: Arc<dyn Callable>, config: CurryConfig) -> Self {
        let chain_id = ChainId::new();
        debug!(
            chain = %chain_id,
            function = callable.name(),
            overloads = callable.signatures().len(),
            "curry chain created"
        );
        Self {
            callable,
            pack: ArgPack::new(),
            config,
            chain_id,
        }
    }

    /// A descendant of this accumulator holding `pack`.
    fn with_pack(&self, pack: ArgPack) -> Self {
        Self {
            callable: Arc::clone(&self.callable),
            pack,
            config: self.config,
            chain_id: self.chain_id,
        }
    }

    /// Runs one dispatch step with `args`, bound in order.
    ///
    /// # Errors
    ///
    /// `CurryError::InvalidOperation` if the step asks to uncurry with nothing
    /// bound, mixes the uncurry sentinel with other arguments, or places a
    /// final-argument marker anywhere but last. `CurryError::Call` if the
    /// callable was invoked and failed.
    pub fn apply<I>(&self, args: I) -> CurryResult<Curried>
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        dispatch::dispatch(self, args.into_iter().map(Into::into).collect())
    }

    /// Runs one dispatch step with a single argument.
    pub fn apply1(&self, arg: impl Into<Arg>) -> CurryResult<Curried> {
        dispatch::dispatch(self, vec![arg.into()])
    }

    /// Arguments bound so far.
    #[must_use]
    pub const fn bound(&self) -> &ArgPack {
        &self.pack
    }

    /// Number of arguments bound so far.
    #[must_use]
    pub const fn arity_bound(&self) -> usize {
        self.pack.len()
    }

    /// The curried callable.
    #[must_use]
    pub fn callable(&self) -> &Arc<dyn Callable> {
        &self.callable
    }

    /// Configuration this chain was created with.
    #[must_use]
    pub const fn config(&self) -> CurryConfig {
        self.config
    }

    /// Identifier shared by every accumulator derived from the same `curry` call.
    #[must_use]
    pub const fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Drops the bound arguments and returns the callable itself.
    #[must_use]
    pub fn into_callable(self) -> Arc<dyn Callable> {
        self.callable
    }

    /// Would `final_argument(value)` complete the chain right now?
    #[must_use]
    pub fn is_callable_with(&self, value: &Value) -> bool {
        invocable::is_invocable_with_type(&*self.callable, &self.pack, value.value_type())
    }

    /// Would binding `args` as ordinary arguments complete the chain?
    #[must_use]
    pub fn would_complete(&self, args: &[Value]) -> bool {
        let mut all = self.pack.to_call_arguments();
        all.extend_from_slice(args);
        invocable::is_invocable(&*self.callable, &all, self.config.variadic)
    }

    /// Can any continuation of the bound arguments still be called?
    ///
    /// A chain fed an argument no signature accepts at that position keeps
    /// accumulating forever; this reports that.
    #[must_use]
    pub fn is_viable(&self) -> bool {
        invocable::may_accept_prefix(&*self.callable, &self.pack.to_call_arguments())
    }
}

impl fmt::Debug for Accumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accumulator")
            .field("function", &self.callable.name())
            .field("bound", &self.pack)
            .field("config", &self.config)
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

/// Outcome of a dispatch step.
#[derive(Debug, Clone)]
pub enum Curried {
    /// Not yet satisfied.
    Accumulator(Accumulator),
    /// The callable ran and returned this.
    Result(Value),
}

impl Curried {
    /// Runs one more dispatch step.
    ///
    /// # Errors
    ///
    /// `CurryError::InvalidOperation` on a `Result`, otherwise as
    /// [`Accumulator::apply`].
    pub fn apply<I>(&self, args: I) -> CurryResult<Curried>
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        self.accumulator()?.apply(args)
    }

    /// Runs one more dispatch step with a single argument.
    pub fn apply1(&self, arg: impl Into<Arg>) -> CurryResult<Curried> {
        self.accumulator()?.apply1(arg)
    }

    fn accumulator(&self) -> CurryResult<&Accumulator> {
        match self {
            Self::Accumulator(acc) => Ok(acc),
            Self::Result(_) => Err(CurryError::invalid_operation(
                "cannot apply arguments: the chain has already been invoked",
            )),
        }
    }

    /// Returns true if the callable has run.
    #[must_use]
    pub const fn is_result(&self) -> bool {
        matches!(self, Self::Result(_))
    }

    /// Returns true if the chain is still accumulating.
    #[must_use]
    pub const fn is_accumulator(&self) -> bool {
        matches!(self, Self::Accumulator(_))
    }

    /// Returns the callable's result, if it has run.
    #[must_use]
    pub const fn as_result(&self) -> Option<&Value> {
        match self {
            Self::Result(v) => Some(v),
            Self::Accumulator(_) => None,
        }
    }

    /// Consumes this, returning the callable's result if it has run.
    #[must_use]
    pub fn into_result(self) -> Option<Value> {
        match self {
            Self::Result(v) => Some(v),
            Self::Accumulator(_) => None,
        }
    }

    /// Returns the accumulator, if the chain has not completed.
    #[must_use]
    pub const fn as_accumulator(&self) -> Option<&Accumulator> {
        match self {
            Self::Accumulator(acc) => Some(acc),
            Self::Result(_) => None,
        }
    }

    /// Consumes this, returning the accumulator if the chain has not completed.
    #[must_use]
    pub fn into_accumulator(self) -> Option<Accumulator> {
        match self {
            Self::Accumulator(acc) => Some(acc),
            Self::Result(_) => None,
        }
    }
}

impl From<Accumulator> for Curried {
    fn from(acc: Accumulator) -> Self {
        Self::Accumulator(acc)
    }
}
