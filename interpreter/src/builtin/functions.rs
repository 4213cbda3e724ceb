// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use lilt::SourceLocation;

use crate::{EvalResult, Interpreter, RuntimeError, Value, ValueKind};

pub(super) fn len(
    _: &mut Interpreter,
    location: SourceLocation,
    args: Vec<Value>,
) -> EvalResult {
    if args.len() != 1 {
        return Err(RuntimeError::new(
            location,
            format!("expected 1 arguments, got {}", args.len()),
        )
        .into());
    }

    match &args[0] {
        Value::List(elements) => Ok(Value::Integer(elements.len() as i64)),
        Value::Str(value) => Ok(Value::Integer(value.len() as i64)),
        Value::Map(pairs) => Ok(Value::Integer(pairs.len() as i64)),
        other => Err(RuntimeError::new(
            location,
            format!(
                "built-in function `len` is not defined on {}s",
                other.kind()
            ),
        )
        .into()),
    }
}

pub(super) fn max(
    interpreter: &mut Interpreter,
    location: SourceLocation,
    args: Vec<Value>,
) -> EvalResult {
    max_of(interpreter, location, args)
}

/// Scans for the maximum of a homogeneous integer or float argument list; a
/// list argument restarts the scan over its elements. Shared with the list
/// `max` method.
pub(super) fn max_of(
    interpreter: &mut Interpreter,
    location: SourceLocation,
    args: Vec<Value>,
) -> EvalResult {
    if args.is_empty() {
        return Err(RuntimeError::new(
            location,
            format!("max expected at least 1 argument, got={}", args.len()),
        )
        .into());
    }

    let current_kind = args[0].kind();
    let mut max_value = f64::NEG_INFINITY;

    for arg in &args {
        match arg {
            Value::Integer(value) => {
                if arg.kind() != current_kind {
                    return Err(same_type_error(location, current_kind, arg.kind()).into());
                }
                if *value > max_value as i64 {
                    max_value = *value as f64;
                }
            }

            Value::Float(value) => {
                if arg.kind() != current_kind {
                    return Err(same_type_error(location, current_kind, arg.kind()).into());
                }
                if *value > max_value {
                    max_value = *value;
                }
            }

            Value::List(elements) => {
                return max_of(interpreter, location, elements.clone());
            }

            other => {
                return Err(RuntimeError::new(
                    location,
                    format!(
                        "max expected arguments to be of type INTEGER or FLOAT, found {}",
                        other.kind()
                    ),
                )
                .into())
            }
        }
    }

    if current_kind == ValueKind::Integer {
        Ok(Value::Integer(max_value as i64))
    } else {
        Ok(Value::Float(max_value))
    }
}

fn same_type_error(
    location: SourceLocation,
    expected: ValueKind,
    found: ValueKind,
) -> RuntimeError {
    RuntimeError::new(
        location,
        format!("max expected all arguments to be of same type, found {expected} and {found}"),
    )
}

pub(super) fn print(
    interpreter: &mut Interpreter,
    _: SourceLocation,
    args: Vec<Value>,
) -> EvalResult {
    for arg in args {
        interpreter.write(&arg);
    }

    Ok(Value::Null)
}

pub(super) fn println(
    interpreter: &mut Interpreter,
    location: SourceLocation,
    args: Vec<Value>,
) -> EvalResult {
    print(interpreter, location, args)?;
    interpreter.write(&'\n');
    Ok(Value::Null)
}

pub(super) fn range(
    _: &mut Interpreter,
    location: SourceLocation,
    args: Vec<Value>,
) -> EvalResult {
    if args.len() != 2 {
        return Err(RuntimeError::new(
            location,
            format!("range expected 2 arguments, got={}", args.len()),
        )
        .into());
    }

    match (&args[0], &args[1]) {
        (Value::Integer(start), Value::Integer(end)) => {
            Ok(Value::List((*start..=*end).map(Value::Integer).collect()))
        }
        (first, second) => Err(RuntimeError::new(
            location,
            format!(
                "range expected arguments to be of type INTEGER, got={} and {}",
                first.kind(),
                second.kind()
            ),
        )
        .into()),
    }
}

pub(super) fn string(
    _: &mut Interpreter,
    location: SourceLocation,
    args: Vec<Value>,
) -> EvalResult {
    if args.len() != 1 {
        return Err(RuntimeError::new(
            location,
            format!("string expected 1 argument, got {}", args.len()),
        )
        .into());
    }

    match &args[0] {
        Value::Integer(value) => Ok(Value::Str(value.to_string())),
        Value::Float(value) => Ok(Value::Str(format!("{value:.6}"))),
        Value::Bool(value) => Ok(Value::Str(value.to_string())),
        other => Err(RuntimeError::new(
            location,
            format!("string can't convert value of type {}", other.kind()),
        )
        .into()),
    }
}
