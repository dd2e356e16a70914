//! Invocability checks.
//!
//! These answer "would this call be well-formed?" by comparing argument types
//! against a callable's declared signatures. None of them call anything.

use crate::callable::Callable;
use crate::config::VariadicPolicy;
use crate::pack::ArgPack;
use crate::signature::Signature;
use crate::value::{Value, ValueType};

/// Whole-pack check: does some signature consider `args` complete?
///
/// Fixed signatures are complete when `args` fills them exactly. Variadic
/// signatures count as complete only under [`VariadicPolicy::Eager`].
#[must_use]
pub fn is_invocable<C: Callable + ?Sized>(callable: &C, args: &[Value], policy: VariadicPolicy) -> bool {
    saturating_signature(callable, args, policy).is_some()
}

/// Single-argument-type check: would calling with `pack` plus one more
/// argument of type `ty` be well-formed under any signature, variadic tails
/// included?
#[must_use]
pub fn is_invocable_with_type<C: Callable + ?Sized>(callable: &C, pack: &ArgPack, ty: ValueType) -> bool {
    let types = || pack.iter().map(Value::value_type).chain(std::iter::once(ty));
    callable
        .signatures()
        .iter()
        .any(|sig| sig.accepts_types(types()))
}

/// Would calling with exactly `args` be well-formed under any signature?
#[must_use]
pub fn accepts<C: Callable + ?Sized>(callable: &C, args: &[Value]) -> bool {
    callable.signatures().iter().any(|sig| sig.accepts(args))
}

/// Could some continuation of `args` ever be accepted?
#[must_use]
pub fn may_accept_prefix<C: Callable + ?Sized>(callable: &C, args: &[Value]) -> bool {
    callable
        .signatures()
        .iter()
        .any(|sig| sig.accepts_prefix(args))
}

/// The signature a whole-pack check would complete on, if any.
#[must_use]
pub fn saturating_signature<'a, C: Callable + ?Sized>(
    callable: &'a C,
    args: &[Value],
    policy: VariadicPolicy,
) -> Option<&'a Signature> {
    callable.signatures().iter().find(|sig| match policy {
        VariadicPolicy::Deferred => sig.is_saturated_by(args),
        VariadicPolicy::Eager => sig.accepts(args),
    })
}
