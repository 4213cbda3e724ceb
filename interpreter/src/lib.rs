// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

#![deny(elided_lifetimes_in_paths)]

pub use lilt::*;

mod builtin;
mod error;
mod interpreter;
mod logger;
pub mod repl;
mod scope;
mod value;

pub use self::{
    builtin::{
        Builtin,
        BuiltinFunction,
        BuiltinMethod,
    },
    error::{
        EvalResult,
        Interrupt,
        RuntimeError,
    },
    interpreter::Interpreter,
    logger::Logger,
    repl::ReplStage,
    scope::Scope,
    value::{
        FunctionValue,
        MapEntry,
        MapKey,
        Value,
        ValueKind,
    },
};
