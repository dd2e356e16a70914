use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use curryq::{
    curry, curry_with, final_argument, Accumulator, Arg, CallError, Callable, Curried,
    CurryConfig, CurryError, Function, ParamType, Signature, Value, UNCURRY,
};

fn add3() -> Function {
    Function::new("add3", Signature::new([ParamType::Int; 3]), |args| {
        Ok(Value::Int(args.iter().filter_map(Value::as_int).sum()))
    })
}

/// (a, b, c, d) -> a*1000 + b*100 + c*10 + d, so argument order shows in the result.
fn digits4() -> Function {
    Function::new("digits4", Signature::new([ParamType::Int; 4]), |args| {
        Ok(Value::Int(
            args.iter()
                .filter_map(Value::as_int)
                .fold(0, |acc, d| acc * 10 + d),
        ))
    })
}

/// `add3` that counts how many times its body runs.
fn counting_add3(calls: Arc<AtomicUsize>) -> Function {
    Function::new("add3", Signature::new([ParamType::Int; 3]), move |args| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Int(args.iter().filter_map(Value::as_int).sum()))
    })
}

fn assert_send_sync<T: Send + Sync>() {}

fn result_of(curried: Curried) -> Value {
    match curried {
        Curried::Result(v) => v,
        Curried::Accumulator(acc) => panic!("expected a result, chain still accumulating: {acc:?}"),
    }
}

#[test]
fn arity_saturation_matches_direct_call() {
    let direct = add3()
        .call(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        .unwrap();

    let curried = curry(add3())
        .apply1(1)
        .unwrap()
        .apply1(2)
        .unwrap()
        .apply1(3)
        .unwrap();

    assert_eq!(result_of(curried), direct);
    assert_eq!(direct, Value::Int(6));
}

#[test]
fn grouping_does_not_change_result() {
    let one_at_a_time = curry(digits4())
        .apply1(1)
        .unwrap()
        .apply1(2)
        .unwrap()
        .apply1(3)
        .unwrap()
        .apply1(4)
        .unwrap();
    let pairs = curry(digits4()).apply([1, 2]).unwrap().apply([3, 4]).unwrap();
    let all = curry(digits4()).apply([1, 2, 3, 4]).unwrap();
    let uneven = curry(digits4()).apply([1]).unwrap().apply([2, 3, 4]).unwrap();

    let expected = Value::Int(1234);
    assert_eq!(result_of(one_at_a_time), expected);
    assert_eq!(result_of(pairs), expected);
    assert_eq!(result_of(all), expected);
    assert_eq!(result_of(uneven), expected);
}

#[test]
fn uncurry_reverts_exactly_one_binding() {
    let reverted = curry(digits4()).apply1(1).unwrap().apply1(UNCURRY).unwrap();
    let fresh = curry(digits4());

    let via_revert = reverted.apply([2, 3, 4, 5]).unwrap();
    let via_fresh = fresh.apply([2, 3, 4, 5]).unwrap();
    assert_eq!(result_of(via_revert), Value::Int(2345));
    assert_eq!(result_of(via_fresh), Value::Int(2345));
}

#[test]
fn uncurry_in_the_middle_of_a_chain() {
    let result = curry(digits4())
        .apply([1, 2])
        .unwrap()
        .apply1(UNCURRY)
        .unwrap()
        .apply([7, 8, 9])
        .unwrap();
    assert_eq!(result_of(result), Value::Int(1789));
}

#[test]
fn uncurry_on_empty_pack_is_invalid() {
    let err = curry(add3()).apply1(UNCURRY).unwrap_err();
    assert!(err.is_invalid_operation());

    let emptied = curry(add3()).apply1(1).unwrap().apply1(UNCURRY).unwrap();
    assert!(emptied.apply1(UNCURRY).unwrap_err().is_invalid_operation());
}

#[test]
fn apply_after_result_is_invalid() {
    let done = curry(add3()).apply([1, 2, 3]).unwrap();
    assert!(done.is_result());

    let err = done.apply1(4).unwrap_err();
    assert!(matches!(err, CurryError::InvalidOperation { .. }));
    assert!(done.apply1(UNCURRY).unwrap_err().is_invalid_operation());
}

#[test]
fn final_argument_calls_single_value_callable_immediately() {
    // Accepts one value or any longer list, so counting alone never decides.
    let show = Function::builder("show")
        .variadic([ParamType::Any], ParamType::Any)
        .body(|args| Ok(Value::from(args.iter().map(ToString::to_string).collect::<Vec<_>>().join(" "))))
        .build()
        .unwrap();

    let acc = curry(show);
    let without_marker = acc.apply1("hi").unwrap();
    assert!(without_marker.is_accumulator());

    let with_marker = acc.apply1(final_argument("hi")).unwrap();
    assert_eq!(result_of(with_marker), Value::from("\"hi\""));
}

#[test]
fn final_argument_of_wrong_type_keeps_accumulating() {
    let sum = Function::new("sum", Signature::rest(ParamType::Int), |args| {
        Ok(Value::Int(args.iter().filter_map(Value::as_int).sum()))
    });

    let acc = curry(sum).apply([1, 2]).unwrap();
    let still = acc.apply1(final_argument("three")).unwrap();
    let still = still.as_accumulator().unwrap();
    assert_eq!(still.arity_bound(), 3);
    assert!(!still.is_viable());

    // Undo the bad binding and finish properly.
    let total = still
        .apply1(UNCURRY)
        .unwrap()
        .apply1(final_argument(3))
        .unwrap();
    assert_eq!(result_of(total), Value::Int(6));
}

#[test]
fn overloads_complete_on_the_first_satisfied_signature() {
    let area = Function::builder("area")
        .params([ParamType::Number])
        .params([ParamType::Number, ParamType::Number])
        .body(|args| {
            let w = args[0].as_float().unwrap_or(0.0);
            let h = args.get(1).and_then(Value::as_float).unwrap_or(w);
            Ok(Value::Float(w * h))
        })
        .build()
        .unwrap();

    let square = curry(area).apply1(3).unwrap();
    assert_eq!(result_of(square), Value::Float(9.0));
}

#[test]
fn eager_config_completes_variadic_without_marker() {
    let list = Function::new("list", Signature::variadic([ParamType::Any], ParamType::Any), |args| {
        Ok(Value::List(args))
    });
    let config: CurryConfig = serde_json::from_str(r#"{"variadic": "eager"}"#).unwrap();

    let result = curry_with(list, config).apply([1, 2]).unwrap();
    assert_eq!(result_of(result), Value::List(vec![Value::Int(1), Value::Int(2)]));
}

#[test]
fn construction_is_idempotent() {
    let f = Arc::new(digits4());
    let a = curry(Arc::clone(&f));
    let b = curry(f);

    let ra = a.apply([4, 3]).unwrap().apply([2, 1]).unwrap();
    let rb = b.apply([4, 3]).unwrap().apply([2, 1]).unwrap();
    assert_eq!(result_of(ra), result_of(rb));
    assert_ne!(a.chain_id(), b.chain_id());
    assert_eq!(a.arity_bound(), 0);
    assert_eq!(b.arity_bound(), 0);
}

#[test]
fn invocability_checks_never_call_the_callable() {
    let calls = Arc::new(AtomicUsize::new(0));
    let acc = curry(counting_add3(Arc::clone(&calls)));

    // [1] plus an int is not a full (int, int, int) call, so the marker binds.
    let step = acc.apply1(1).unwrap().apply1(final_argument(2)).unwrap();
    assert_eq!(step.as_accumulator().unwrap().arity_bound(), 2);

    let step = step.apply1(UNCURRY).unwrap().apply1(2).unwrap();
    let pending = step.as_accumulator().unwrap();
    assert!(pending.is_callable_with(&Value::Int(3)));
    assert!(pending.would_complete(&[Value::Int(3)]));
    assert!(!pending.would_complete(&[]));
    assert!(pending.is_viable());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let done = pending.apply1(3).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(result_of(done), Value::Int(6));

    // The pending accumulator is untouched and can complete again.
    let again = pending.apply1(final_argument(4)).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(result_of(again), Value::Int(7));
}

#[test]
fn accumulators_are_send_and_sync() {
    assert_send_sync::<Accumulator>();
    assert_send_sync::<Curried>();
    assert_send_sync::<CurryError>();
}

#[test]
fn accumulator_branches_across_threads() {
    let pair = Function::new("pair", Signature::new([ParamType::Any; 2]), |args| {
        Ok(Value::List(args))
    });
    let base = curry(pair).apply1(1).unwrap().into_accumulator().unwrap();

    let handles: Vec<_> = (0..4_i64)
        .map(|i| {
            let branch = base.clone();
            thread::spawn(move || (i, branch.apply1(i).unwrap().into_result()))
        })
        .collect();

    for handle in handles {
        let (i, result) = handle.join().unwrap();
        assert_eq!(result, Some(Value::List(vec![Value::Int(1), Value::Int(i)])));
    }
    assert_eq!(base.bound().to_call_arguments(), vec![Value::Int(1)]);
}

#[test]
fn accumulators_branch_independently() {
    let base = curry(digits4()).apply([1, 2]).unwrap();
    let base = base.as_accumulator().unwrap();

    let left = base.apply([3, 4]).unwrap();
    let right = base.apply([5, 6]).unwrap();
    let popped = base.apply1(UNCURRY).unwrap();

    assert_eq!(result_of(left), Value::Int(1234));
    assert_eq!(result_of(right), Value::Int(1256));
    assert_eq!(popped.as_accumulator().unwrap().arity_bound(), 1);
    assert_eq!(base.bound().to_call_arguments(), vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn callable_failure_propagates_verbatim() {
    let checked_div = Function::new(
        "checked_div",
        Signature::new([ParamType::Int, ParamType::Int]),
        |args| match (args[0].as_int(), args[1].as_int()) {
            (Some(a), Some(b)) if b != 0 => Ok(Value::Int(a / b)),
            _ => Err(CallError::failed("checked_div", "division by zero")),
        },
    );

    let acc = curry(checked_div).apply1(10).unwrap();
    assert_eq!(result_of(acc.apply1(2).unwrap()), Value::Int(5));

    let err = acc.apply1(0).unwrap_err();
    assert_eq!(
        err.as_call(),
        Some(&CallError::failed("checked_div", "division by zero"))
    );
}

#[test]
fn mixed_directives_are_rejected() {
    let acc = curry(add3());
    let err = acc.apply([Arg::from(1), Arg::from(UNCURRY)]).unwrap_err();
    assert!(err.is_invalid_operation());

    let err = acc.apply([final_argument(1), Arg::from(2)]).unwrap_err();
    assert!(err.is_invalid_operation());
}

#[test]
fn custom_callable_implementation() {
    struct Concat {
        signatures: Vec<Signature>,
    }

    impl Callable for Concat {
        fn name(&self) -> &str {
            "concat"
        }

        fn signatures(&self) -> &[Signature] {
            &self.signatures
        }

        fn call(&self, args: Vec<Value>) -> Result<Value, CallError> {
            Ok(Value::from(
                args.iter().filter_map(Value::as_string).collect::<String>(),
            ))
        }
    }

    let concat = Concat {
        signatures: vec![Signature::new([ParamType::String; 3])],
    };
    let result = curry(concat).apply(["a", "b"]).unwrap().apply1("c").unwrap();
    assert_eq!(result_of(result), Value::from("abc"));
}
