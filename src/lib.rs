//! # curryq - Progressive Partial Application
//!
//! curryq curries dynamically typed callables. A curried callable is fed
//! arguments one or a few at a time; each step either returns a new
//! accumulator or, once the bound arguments satisfy one of the callable's
//! signatures, the callable's result.
//!
//! ## Core Concepts
//!
//! - **Callable**: anything that declares its [`Signature`]s and can be called
//!   with a list of [`Value`]s
//! - **Argument Pack**: the persistent, ordered list of arguments bound so far
//! - **Accumulator**: an immutable, branchable partially applied callable
//! - **Final argument**: a marker that completes a call as soon as it is
//!   well-formed, needed for variadic and overloaded callables
//! - **Uncurry**: the [`UNCURRY`] sentinel, which undoes the last binding
//!
//! ## Usage
//!
//! ```rust
//! use curryq::{curry, final_argument, Function, ParamType, Signature, Value, UNCURRY};
//!
//! let sum = Function::new("sum", Signature::rest(ParamType::Int), |args| {
//!     Ok(Value::Int(args.iter().filter_map(Value::as_int).sum()))
//! });
//!
//! let acc = curry(sum).apply([1, 2, 99])?;
//! let acc = acc.apply1(UNCURRY)?;
//! let total = acc.apply1(final_argument(3))?;
//!
//! assert_eq!(total.into_result(), Some(Value::Int(6)));
//! # Ok::<(), curryq::CurryError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod arg;
pub mod callable;
pub mod config;
pub mod engine;
pub mod error;
pub mod invocable;
pub mod pack;
pub mod signature;
pub mod value;

// Re-export primary types at crate root for convenience
pub use arg::{final_argument, Arg, Uncurry, UNCURRY};
pub use callable::{Callable, Function, FunctionBuilder};
pub use config::{CurryConfig, VariadicPolicy};
pub use engine::{curry, curry_with, Accumulator, ChainId, Curried};
pub use error::{CallError, CurryError, CurryResult, DefinitionError};
pub use pack::ArgPack;
pub use signature::{ParamType, Signature};
pub use value::{Value, ValueType};
