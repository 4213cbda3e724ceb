// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

mod functions;
mod methods;

use lilt::SourceLocation;

use crate::{EvalResult, Interpreter, Value, ValueKind};

pub type BuiltinFunctionSignature =
    fn(&mut Interpreter, SourceLocation, Vec<Value>) -> EvalResult;

pub type BuiltinMethodSignature =
    fn(&mut Interpreter, SourceLocation, Value, Vec<Value>) -> EvalResult;

#[derive(Debug, PartialEq, Eq)]
pub struct BuiltinFunction {
    pub name: &'static str,
    pub function: BuiltinFunctionSignature,
}

/// A method on a built-in type; the receiver is bound by an access
/// expression and passed back in when the bound method is called.
#[derive(Debug, PartialEq, Eq)]
pub struct BuiltinMethod {
    pub name: &'static str,
    pub function: BuiltinMethodSignature,
}

/// The process-wide registry. The tables are read-only statics; nothing is
/// registered at runtime.
pub struct Builtin;

impl Builtin {
    pub const FUNCTIONS: &'static [BuiltinFunction] = &[
        BuiltinFunction {
            name: "len",
            function: functions::len,
        },
        BuiltinFunction {
            name: "max",
            function: functions::max,
        },
        BuiltinFunction {
            name: "print",
            function: functions::print,
        },
        BuiltinFunction {
            name: "println",
            function: functions::println,
        },
        BuiltinFunction {
            name: "range",
            function: functions::range,
        },
        BuiltinFunction {
            name: "string",
            function: functions::string,
        },
    ];

    const LIST_METHODS: &'static [BuiltinMethod] = &[
        BuiltinMethod {
            name: "len",
            function: methods::list_len,
        },
        BuiltinMethod {
            name: "max",
            function: methods::list_max,
        },
        BuiltinMethod {
            name: "reverse",
            function: methods::list_reverse,
        },
        BuiltinMethod {
            name: "slice",
            function: methods::list_slice,
        },
        BuiltinMethod {
            name: "map",
            function: methods::list_map,
        },
        BuiltinMethod {
            name: "filter",
            function: methods::list_filter,
        },
        BuiltinMethod {
            name: "update",
            function: methods::list_update,
        },
    ];

    const STRING_METHODS: &'static [BuiltinMethod] = &[BuiltinMethod {
        name: "otherwise",
        function: methods::string_otherwise,
    }];

    pub fn function(name: &str) -> Option<&'static BuiltinFunction> {
        Self::FUNCTIONS.iter().find(|function| function.name == name)
    }

    pub fn method(kind: ValueKind, name: &str) -> Option<&'static BuiltinMethod> {
        let table = match kind {
            ValueKind::List => Self::LIST_METHODS,
            ValueKind::Str => Self::STRING_METHODS,
            _ => return None,
        };

        table.iter().find(|method| method.name == name)
    }
}
