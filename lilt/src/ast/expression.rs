// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::{Display, Formatter, Write};

use crate::{SourceLocation, Token, TypeName};

use super::BlockStatement;

#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Float(FloatLiteral),
    Str(StringLiteral),
    Boolean(BooleanLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    If(IfExpression),
    FunctionLiteral(FunctionLiteral),
    Function(NamedFunction),
    Call(CallExpression),
    List(ListLiteral),
    Map(MapLiteral),
    Index(IndexExpression),
    Access(AccessExpression),
}

impl Expression {
    /// Position of the token this expression hangs off, for diagnostics.
    #[must_use]
    pub fn location(&self) -> SourceLocation {
        match self {
            Self::Identifier(expr) => expr.token.location,
            Self::Integer(expr) => expr.token.location,
            Self::Float(expr) => expr.token.location,
            Self::Str(expr) => expr.token.location,
            Self::Boolean(expr) => expr.token.location,
            Self::Prefix(expr) => expr.token.location,
            Self::Infix(expr) => expr.token.location,
            Self::If(expr) => expr.token.location,
            Self::FunctionLiteral(expr) => expr.token.location,
            Self::Function(expr) => expr.literal.token.location,
            Self::Call(expr) => expr.token.location,
            Self::List(expr) => expr.token.location,
            Self::Map(expr) => expr.token.location,
            Self::Index(expr) => expr.token.location,
            Self::Access(expr) => expr.token.location,
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(expr) => Display::fmt(expr, f),
            Self::Integer(expr) => Display::fmt(expr, f),
            Self::Float(expr) => Display::fmt(expr, f),
            Self::Str(expr) => Display::fmt(expr, f),
            Self::Boolean(expr) => Display::fmt(expr, f),
            Self::Prefix(expr) => Display::fmt(expr, f),
            Self::Infix(expr) => Display::fmt(expr, f),
            Self::If(expr) => Display::fmt(expr, f),
            Self::FunctionLiteral(expr) => Display::fmt(expr, f),
            Self::Function(expr) => Display::fmt(expr, f),
            Self::Call(expr) => Display::fmt(expr, f),
            Self::List(expr) => Display::fmt(expr, f),
            Self::Map(expr) => Display::fmt(expr, f),
            Self::Index(expr) => Display::fmt(expr, f),
            Self::Access(expr) => Display::fmt(expr, f),
        }
    }
}

/// A name reference. The type slot is only filled where the grammar carries
/// an annotation, i.e. in `let` statements.
#[derive(Clone, Debug, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
    pub type_name: Option<TypeName>,
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

impl Display for IntegerLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.token.literal)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FloatLiteral {
    pub token: Token,
    pub value: f64,
}

impl Display for FloatLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.token.literal)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
}

impl Display for StringLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

impl Display for BooleanLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.token.literal)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrefixOperator {
    Not,
    Negate,
}

impl PrefixOperator {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Negate => "-",
        }
    }
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PrefixExpression {
    pub token: Token,
    pub operator: PrefixOperator,
    pub right: Box<Expression>,
}

impl Display for PrefixExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("({}{})", self.operator, self.right))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InfixOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    And,
    Or,
}

impl InfixOperator {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Power => "^",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThanOrEqual => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

impl Display for InfixOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InfixExpression {
    pub token: Token,
    pub operator: InfixOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

impl Display for InfixExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("({} {} {})", self.left, self.operator, self.right))
    }
}

/// `if (cond) { … }` with either an `else if` chain in `others` or a plain
/// `else` block in `alternative`, never both.
#[derive(Clone, Debug, PartialEq)]
pub struct IfExpression {
    pub token: Token,
    pub condition: Box<Expression>,
    pub consequence: BlockStatement,
    pub others: Option<Box<Expression>>,
    pub alternative: Option<BlockStatement>,
}

impl Display for IfExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("if{} {}", self.condition, self.consequence))?;

        if let Some(alternative) = &self.alternative {
            f.write_fmt(format_args!(" else {alternative}"))?;
        }

        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub type_name: TypeName,
}

impl Display for Parameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}: {}", self.name, self.type_name))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionLiteral {
    pub token: Token,
    pub parameters: Vec<Parameter>,
    pub return_type: TypeName,
    pub body: BlockStatement,
}

impl FunctionLiteral {
    fn fmt_signature(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_char('(')?;
        for (idx, parameter) in self.parameters.iter().enumerate() {
            if idx != 0 {
                f.write_str(", ")?;
            }
            Display::fmt(parameter, f)?;
        }
        f.write_fmt(format_args!(") {} ", self.return_type))
    }
}

impl Display for FunctionLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.token.literal)?;
        self.fmt_signature(f)?;
        Display::fmt(&self.body, f)
    }
}

/// `fn name(…) { … }`: a function literal that additionally binds its own
/// name into the enclosing scope when evaluated.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedFunction {
    pub name: Identifier,
    pub literal: FunctionLiteral,
}

impl Display for NamedFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{} {}", self.literal.token.literal, self.name))?;
        self.literal.fmt_signature(f)?;
        Display::fmt(&self.literal.body, f)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CallExpression {
    /// The `(` token, which is where call-site errors point.
    pub token: Token,
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}

impl Display for CallExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.function, f)?;
        f.write_char('(')?;
        for (idx, argument) in self.arguments.iter().enumerate() {
            if idx != 0 {
                f.write_str(", ")?;
            }
            Display::fmt(argument, f)?;
        }
        f.write_char(')')
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListLiteral {
    pub token: Token,
    pub elements: Vec<Expression>,
}

impl Display for ListLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_char('[')?;
        for (idx, element) in self.elements.iter().enumerate() {
            if idx != 0 {
                f.write_str(", ")?;
            }
            Display::fmt(element, f)?;
        }
        f.write_char(']')
    }
}

/// Key/value uniformity is not checked at parse time; keys are arbitrary
/// expressions hashed at evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct MapLiteral {
    pub token: Token,
    pub pairs: Vec<(Expression, Expression)>,
}

impl Display for MapLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_char('{')?;
        for (idx, (key, value)) in self.pairs.iter().enumerate() {
            if idx != 0 {
                f.write_str(", ")?;
            }
            f.write_fmt(format_args!("{key}:{value}"))?;
        }
        f.write_char('}')
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IndexExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub index: Box<Expression>,
}

impl Display for IndexExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("({}[{}])", self.left, self.index))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AccessExpression {
    pub token: Token,
    pub target: Box<Expression>,
    pub attribute: String,
}

impl Display for AccessExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}.{}", self.target, self.attribute))
    }
}
