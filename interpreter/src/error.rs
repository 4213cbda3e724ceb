// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::Display;

use lilt::SourceLocation;

use crate::Value;

/// A runtime defect, reported with the position of the token it arose at.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    location: SourceLocation,
    message: String,
}

impl RuntimeError {
    #[must_use]
    pub fn new(location: SourceLocation, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn location(&self) -> SourceLocation {
        self.location
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("[{}] {}", self.location, self.message))
    }
}

/// What unwinds an evaluation early: a `return` travels up to the nearest
/// function boundary, an error travels all the way out. Neither is ever
/// stored in a binding.
#[derive(Debug)]
pub enum Interrupt {
    Return(Value),
    Error(RuntimeError),
}

impl From<RuntimeError> for Interrupt {
    fn from(value: RuntimeError) -> Self {
        Self::Error(value)
    }
}

pub type EvalResult = Result<Value, Interrupt>;
