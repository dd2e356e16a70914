//! The dispatch loop.
//!
//! One step takes the arguments of a single `apply` and moves a chain from
//! `Accumulating(pack)` either to a longer or shorter pack, or to the terminal
//! result. Steps are pure with respect to the accumulator they start from.

use tracing::{debug, trace};

use super::{Accumulator, Curried};
use crate::arg::Arg;
use crate::error::{CurryError, CurryResult};
use crate::invocable;
use crate::value::Value;

/// What a step asks for, after validating where markers appear.
#[derive(Debug, PartialEq)]
enum Step {
    Uncurry,
    Bind {
        values: Vec<Value>,
        last: Option<Value>,
    },
}

/// How a call was reached, for logging.
#[derive(Debug, Clone, Copy)]
enum CallPath {
    Saturated,
    Forced,
}

impl Step {
    fn parse(args: Vec<Arg>) -> CurryResult<Self> {
        if let [Arg::Uncurry] = args.as_slice() {
            return Ok(Self::Uncurry);
        }

        let count = args.len();
        let mut values = Vec::with_capacity(count);
        let mut last = None;
        for (i, arg) in args.into_iter().enumerate() {
            match arg {
                Arg::Value(v) => values.push(v),
                Arg::Final(v) if i + 1 == count => last = Some(v),
                Arg::Final(_) => {
                    return Err(CurryError::invalid_operation(
                        "a final argument must be the last argument of its step",
                    ))
                }
                Arg::Uncurry => {
                    return Err(CurryError::invalid_operation(
                        "the uncurry sentinel must be the only argument of its step",
                    ))
                }
            }
        }
        Ok(Self::Bind { values, last })
    }
}

pub(super) fn dispatch(acc: &Accumulator, args: Vec<Arg>) -> CurryResult<Curried> {
    trace!(
        chain = %acc.chain_id,
        function = acc.callable.name(),
        bound = acc.pack.len(),
        incoming = args.len(),
        has_final = args.iter().any(Arg::is_final),
        has_uncurry = args.iter().any(Arg::is_uncurry),
        "dispatch step"
    );

    match Step::parse(args)? {
        Step::Uncurry => uncurry(acc),
        Step::Bind { values, last } => bind(acc, values, last),
    }
}

fn uncurry(acc: &Accumulator) -> CurryResult<Curried> {
    if acc.pack.is_empty() {
        return Err(CurryError::invalid_operation(format!(
            "cannot uncurry '{}': no arguments are bound",
            acc.callable.name()
        )));
    }
    let pack = acc.pack.pop()?;
    Ok(Curried::Accumulator(acc.with_pack(pack)))
}

fn bind(acc: &Accumulator, values: Vec<Value>, last: Option<Value>) -> CurryResult<Curried> {
    let mut pack = acc.pack.extend(values);

    if let Some(value) = last {
        if invocable::is_invocable_with_type(&*acc.callable, &pack, value.value_type()) {
            return call(acc, pack.push(value).to_call_arguments(), CallPath::Forced);
        }
        debug!(
            chain = %acc.chain_id,
            function = acc.callable.name(),
            value_type = %value.value_type(),
            "final argument not accepted, binding it as an ordinary argument"
        );
        pack = pack.push(value);
    }

    let args = pack.to_call_arguments();
    if invocable::is_invocable(&*acc.callable, &args, acc.config.variadic) {
        return call(acc, args, CallPath::Saturated);
    }
    Ok(Curried::Accumulator(acc.with_pack(pack)))
}

fn call(acc: &Accumulator, args: Vec<Value>, path: CallPath) -> CurryResult<Curried> {
    debug!(
        chain = %acc.chain_id,
        function = acc.callable.name(),
        args = args.len(),
        path = ?path,
        "invoking callable"
    );
    let result = acc.callable.call(args)?;
    Ok(Curried::Result(result))
}
