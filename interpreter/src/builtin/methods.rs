// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use lilt::{SourceLocation, TypeName};

use crate::{EvalResult, Interpreter, RuntimeError, Value};

use super::functions::max_of;

fn into_list(
    receiver: Value,
    method: &str,
    location: SourceLocation,
) -> Result<Vec<Value>, RuntimeError> {
    match receiver {
        Value::List(elements) => Ok(elements),
        other => Err(RuntimeError::new(
            location,
            format!("type {} has no method {method}", other.kind()),
        )),
    }
}

pub(super) fn list_len(
    _: &mut Interpreter,
    location: SourceLocation,
    receiver: Value,
    args: Vec<Value>,
) -> EvalResult {
    let elements = into_list(receiver, "len", location)?;

    if !args.is_empty() {
        return Err(RuntimeError::new(
            location,
            format!("len expected 0 arguments, got {}", args.len()),
        )
        .into());
    }

    Ok(Value::Integer(elements.len() as i64))
}

pub(super) fn list_max(
    interpreter: &mut Interpreter,
    location: SourceLocation,
    receiver: Value,
    _: Vec<Value>,
) -> EvalResult {
    let elements = into_list(receiver, "max", location)?;
    max_of(interpreter, location, elements)
}

pub(super) fn list_reverse(
    _: &mut Interpreter,
    location: SourceLocation,
    receiver: Value,
    args: Vec<Value>,
) -> EvalResult {
    let elements = into_list(receiver, "reverse", location)?;

    if !args.is_empty() {
        return Err(RuntimeError::new(
            location,
            format!("reverse expected 0 arguments, got {}", args.len()),
        )
        .into());
    }

    Ok(Value::List(elements.into_iter().rev().collect()))
}

/// `slice(i, j)` copies the elements from `i` through `j`, both inclusive.
pub(super) fn list_slice(
    _: &mut Interpreter,
    location: SourceLocation,
    receiver: Value,
    args: Vec<Value>,
) -> EvalResult {
    let elements = into_list(receiver, "slice", location)?;

    if args.len() != 2 {
        return Err(RuntimeError::new(
            location,
            format!("slice expected 2 arguments, got {}", args.len()),
        )
        .into());
    }

    match (&args[0], &args[1]) {
        (Value::Integer(start), Value::Integer(end)) => Ok(Value::List(
            (*start..=*end)
                .map(|idx| elements[idx as usize].clone())
                .collect(),
        )),
        (first, second) => Err(RuntimeError::new(
            location,
            format!(
                "slice expected arguments to be of type INTEGER, got={} and {}",
                first.kind(),
                second.kind()
            ),
        )
        .into()),
    }
}

pub(super) fn list_map(
    interpreter: &mut Interpreter,
    location: SourceLocation,
    receiver: Value,
    args: Vec<Value>,
) -> EvalResult {
    let elements = into_list(receiver, "map", location)?;

    if args.len() != 1 {
        return Err(RuntimeError::new(
            location,
            format!("map expected 1 argument, got={}", args.len()),
        )
        .into());
    }

    match &args[0] {
        Value::Function(function) => {
            if function.parameters.len() != 1 {
                return Err(RuntimeError::new(
                    location,
                    format!(
                        "map expected its argument to have a single argument, got={}",
                        function.parameters.len()
                    ),
                )
                .into());
            }
        }
        Value::Builtin(..) => {}
        other => {
            return Err(RuntimeError::new(
                location,
                format!("map expected its argument to be a function, got={}", other.kind()),
            )
            .into())
        }
    }

    let mut new_elements = Vec::with_capacity(elements.len());
    for element in elements {
        new_elements.push(interpreter.call_value(args[0].clone(), vec![element], location)?);
    }

    Ok(Value::List(new_elements))
}

pub(super) fn list_filter(
    interpreter: &mut Interpreter,
    location: SourceLocation,
    receiver: Value,
    args: Vec<Value>,
) -> EvalResult {
    let elements = into_list(receiver, "filter", location)?;

    if args.len() != 1 {
        return Err(RuntimeError::new(
            location,
            format!("filter expected 1 argument, got={}", args.len()),
        )
        .into());
    }

    match &args[0] {
        Value::Function(function) => {
            if function.parameters.len() != 1 {
                return Err(RuntimeError::new(
                    location,
                    format!(
                        "filter expected its argument to have a single argument, got={}",
                        function.parameters.len()
                    ),
                )
                .into());
            }

            if function.return_type != TypeName::Bool {
                return Err(RuntimeError::new(
                    location,
                    format!(
                        "filter expected its argument to return a Boolean, got={}",
                        function.return_type
                    ),
                )
                .into());
            }
        }
        Value::Builtin(..) => {}
        other => {
            return Err(RuntimeError::new(
                location,
                format!(
                    "filter expected its argument to be a function, got={}",
                    other.kind()
                ),
            )
            .into())
        }
    }

    let mut new_elements = Vec::new();
    for element in elements {
        let keep = interpreter.call_value(args[0].clone(), vec![element.clone()], location)?;
        match keep {
            Value::Bool(true) => new_elements.push(element),
            Value::Bool(false) => {}
            other => {
                return Err(RuntimeError::new(
                    location,
                    format!(
                        "filter expected its argument to return a Boolean, got={}",
                        other.kind()
                    ),
                )
                .into())
            }
        }
    }

    Ok(Value::List(new_elements))
}

/// `update(i, v)` yields a fresh list with index `i` replaced; an index out
/// of range yields the list unchanged.
pub(super) fn list_update(
    _: &mut Interpreter,
    location: SourceLocation,
    receiver: Value,
    args: Vec<Value>,
) -> EvalResult {
    let mut elements = into_list(receiver, "update", location)?;

    if args.len() != 2 {
        return Err(RuntimeError::new(
            location,
            format!("update expected 2 arguments, got {}", args.len()),
        )
        .into());
    }

    let Value::Integer(index) = &args[0] else {
        return Err(RuntimeError::new(
            location,
            format!(
                "update expected first argument to be of type INTEGER, got={}",
                args[0].kind()
            ),
        )
        .into());
    };

    if let Some(slot) = usize::try_from(*index).ok().and_then(|idx| elements.get_mut(idx)) {
        *slot = args[1].clone();
    }

    Ok(Value::List(elements))
}

/// The receiver when it is non-empty, the argument otherwise.
pub(super) fn string_otherwise(
    _: &mut Interpreter,
    location: SourceLocation,
    receiver: Value,
    args: Vec<Value>,
) -> EvalResult {
    let value = match receiver {
        Value::Str(value) => value,
        other => {
            return Err(RuntimeError::new(
                location,
                format!("type {} has no method otherwise", other.kind()),
            )
            .into())
        }
    };

    if args.len() != 1 {
        return Err(RuntimeError::new(
            location,
            format!("otherwise expected 1, got={}", args.len()),
        )
        .into());
    }

    let Value::Str(fallback) = &args[0] else {
        return Err(RuntimeError::new(
            location,
            format!(
                "otherwise expected its argument to be a STRING, got={}",
                args[0].kind()
            ),
        )
        .into());
    };

    if value.is_empty() {
        Ok(Value::Str(fallback.clone()))
    } else {
        Ok(Value::Str(value))
    }
}
