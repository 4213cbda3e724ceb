// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::{Display, Formatter};

use crate::Token;

use super::{Expression, Identifier};

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Let(stmt) => Display::fmt(stmt, f),
            Self::Return(stmt) => Display::fmt(stmt, f),
            Self::Expression(stmt) => Display::fmt(stmt, f),
        }
    }
}

/// `let name: Type = value;` — the one place a declared type is mandatory.
#[derive(Clone, Debug, PartialEq)]
pub struct LetStatement {
    pub token: Token,
    pub name: Identifier,
    pub value: Expression,
}

impl Display for LetStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let type_name = self.name.type_name.map(|t| t.as_str()).unwrap_or_default();
        f.write_fmt(format_args!(
            "{} {}: {} = {};",
            self.token.literal, self.name, type_name, self.value
        ))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReturnStatement {
    pub token: Token,
    pub value: Option<Expression>,
}

impl Display for ReturnStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{} ", self.token.literal))?;

        if let Some(value) = &self.value {
            Display::fmt(value, f)?;
        }

        f.write_str(";")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExpressionStatement {
    pub token: Token,
    pub expression: Expression,
}

impl Display for ExpressionStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.expression, f)
    }
}

/// A brace-delimited statement sequence; evaluated in a fresh inner scope.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for statement in &self.statements {
            Display::fmt(statement, f)?;
        }

        Ok(())
    }
}
