// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{
    cell::RefCell,
    collections::HashMap,
    fmt::Display,
    io::Write,
    rc::Rc,
};

use lilt::{
    AccessExpression, BlockStatement, Expression, FunctionLiteral, IfExpression, InfixOperator,
    LetStatement, MapLiteral, PrefixExpression, PrefixOperator, Program, SourceLocation,
    Statement,
};

use crate::{
    Builtin, EvalResult, FunctionValue, Interrupt, MapEntry, RuntimeError, Scope, Value,
    ValueKind,
};

/// The tree walk. Holds nothing but the output sink `print`/`println` write
/// to; all bindings live in the scope chain the caller passes in.
pub struct Interpreter {
    out: Rc<RefCell<dyn Write>>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Rc::new(RefCell::new(std::io::stdout())))
    }
}

impl Interpreter {
    pub fn new(out: Rc<RefCell<dyn Write>>) -> Self {
        Self {
            out,
        }
    }

    /// Evaluates a whole program. A top-level `return` yields its value, an
    /// error aborts with the first defect encountered.
    pub fn run(
        &mut self,
        program: &Program,
        scope: &Rc<RefCell<Scope>>,
    ) -> Result<Value, RuntimeError> {
        match self.eval_program(program, scope) {
            Ok(value) => Ok(value),
            Err(Interrupt::Return(value)) => Ok(value),
            Err(Interrupt::Error(error)) => Err(error),
        }
    }

    pub(crate) fn write(&mut self, value: &impl Display) {
        _ = write!(self.out.borrow_mut(), "{value}");
    }

    fn eval_program(&mut self, program: &Program, scope: &Rc<RefCell<Scope>>) -> EvalResult {
        let mut result = Value::Null;

        for statement in &program.statements {
            result = self.eval_statement(statement, scope)?;
        }

        Ok(result)
    }

    fn eval_statement(
        &mut self,
        statement: &Statement,
        scope: &Rc<RefCell<Scope>>,
    ) -> EvalResult {
        match statement {
            Statement::Let(stmt) => self.eval_let_statement(stmt, scope),

            Statement::Return(stmt) => {
                let value = match &stmt.value {
                    Some(expression) => self.eval_expression(expression, scope)?,
                    None => Value::Null,
                };
                Err(Interrupt::Return(value))
            }

            Statement::Expression(stmt) => self.eval_expression(&stmt.expression, scope),
        }
    }

    fn eval_let_statement(
        &mut self,
        stmt: &LetStatement,
        scope: &Rc<RefCell<Scope>>,
    ) -> EvalResult {
        let value = self.eval_expression(&stmt.value, scope)?;

        let expected = ValueKind::of_declared(stmt.name.type_name);
        if expected != value.kind() {
            return Err(RuntimeError::new(
                stmt.token.location,
                format!(
                    "type mismatch, expected value of type {} to be of type {}",
                    value.kind(),
                    expected
                ),
            )
            .into());
        }

        scope.borrow_mut().set(stmt.name.value.clone(), value);
        Ok(Value::Null)
    }

    /// Blocks run their statements in a fresh frame; the first `return` or
    /// error unwinds out of the whole block.
    fn eval_block(&mut self, block: &BlockStatement, parent: &Rc<RefCell<Scope>>) -> EvalResult {
        let scope = Scope::nested(parent.clone());
        let mut result = Value::Null;

        for statement in &block.statements {
            result = self.eval_statement(statement, &scope)?;
        }

        Ok(result)
    }

    fn eval_expression(
        &mut self,
        expression: &Expression,
        scope: &Rc<RefCell<Scope>>,
    ) -> EvalResult {
        match expression {
            Expression::Identifier(expr) => {
                if let Some(value) = scope.borrow().get(&expr.value) {
                    return Ok(value);
                }

                if let Some(builtin) = Builtin::function(&expr.value) {
                    return Ok(Value::Builtin(builtin));
                }

                Err(RuntimeError::new(
                    expr.token.location,
                    format!("{} is not defined", expr.value),
                )
                .into())
            }

            Expression::Integer(expr) => Ok(Value::Integer(expr.value)),
            Expression::Float(expr) => Ok(Value::Float(expr.value)),
            Expression::Str(expr) => Ok(Value::Str(expr.value.clone())),
            Expression::Boolean(expr) => Ok(Value::Bool(expr.value)),

            Expression::Prefix(expr) => {
                let right = self.eval_expression(&expr.right, scope)?;
                eval_prefix_expression(expr, right)
            }

            Expression::Infix(expr) => {
                let left = self.eval_expression(&expr.left, scope)?;
                let right = self.eval_expression(&expr.right, scope)?;
                eval_infix_expression(expr.operator, left, right, expr.token.location)
            }

            Expression::If(expr) => self.eval_if_expression(expr, scope),

            Expression::FunctionLiteral(expr) => Ok(function_value(None, expr, scope)),

            Expression::Function(expr) => {
                let value = function_value(Some(expr.name.value.clone()), &expr.literal, scope);
                scope.borrow_mut().set(expr.name.value.clone(), value.clone());
                Ok(value)
            }

            Expression::Call(expr) => {
                let callee = self.eval_expression(&expr.function, scope)?;

                let mut arguments = Vec::with_capacity(expr.arguments.len());
                for argument in &expr.arguments {
                    arguments.push(self.eval_expression(argument, scope)?);
                }

                self.call_value(callee, arguments, expr.token.location)
            }

            Expression::List(expr) => {
                let mut elements = Vec::with_capacity(expr.elements.len());
                for element in &expr.elements {
                    elements.push(self.eval_expression(element, scope)?);
                }
                Ok(Value::List(elements))
            }

            Expression::Map(expr) => self.eval_map_literal(expr, scope),

            Expression::Index(expr) => {
                let left = self.eval_expression(&expr.left, scope)?;
                let index = self.eval_expression(&expr.index, scope)?;
                eval_index_expression(left, index, expr.token.location)
            }

            Expression::Access(expr) => {
                let target = self.eval_expression(&expr.target, scope)?;
                eval_access_expression(target, expr)
            }
        }
    }

    fn eval_if_expression(
        &mut self,
        expr: &IfExpression,
        scope: &Rc<RefCell<Scope>>,
    ) -> EvalResult {
        let condition = self.eval_expression(&expr.condition, scope)?;

        if condition.is_truthy() {
            self.eval_block(&expr.consequence, scope)
        } else if let Some(others) = &expr.others {
            self.eval_expression(others, scope)
        } else if let Some(alternative) = &expr.alternative {
            self.eval_block(alternative, scope)
        } else {
            Ok(Value::Null)
        }
    }

    /// Keys are evaluated left to right and must be hashable; a duplicate
    /// key overwrites the earlier entry.
    fn eval_map_literal(&mut self, expr: &MapLiteral, scope: &Rc<RefCell<Scope>>) -> EvalResult {
        let mut pairs = HashMap::new();

        for (key_expression, value_expression) in &expr.pairs {
            let key = self.eval_expression(key_expression, scope)?;

            let Some(map_key) = key.map_key() else {
                return Err(RuntimeError::new(
                    expr.token.location,
                    format!("can't use {} as hash key", key.kind()),
                )
                .into());
            };

            let value = self.eval_expression(value_expression, scope)?;
            pairs.insert(map_key, MapEntry {
                key,
                value,
            });
        }

        Ok(Value::Map(pairs))
    }

    /// Calls any callable value. Built-ins get the call site position passed
    /// through; bound methods additionally get their receiver back.
    pub(crate) fn call_value(
        &mut self,
        callee: Value,
        arguments: Vec<Value>,
        location: SourceLocation,
    ) -> EvalResult {
        match callee {
            Value::Function(function) => self.call_function(&function, arguments, location),
            Value::Builtin(builtin) => (builtin.function)(self, location, arguments),
            Value::BoundMethod { receiver, method } => {
                (method.function)(self, location, *receiver, arguments)
            }
            other => Err(RuntimeError::new(
                location,
                format!("not a function: {}", other.kind()),
            )
            .into()),
        }
    }

    fn call_function(
        &mut self,
        function: &FunctionValue,
        arguments: Vec<Value>,
        location: SourceLocation,
    ) -> EvalResult {
        if function.parameters.len() != arguments.len() {
            return Err(RuntimeError::new(
                location,
                format!(
                    "function {} expected {} arguments, got {}",
                    function.name.as_deref().unwrap_or_default(),
                    function.parameters.len(),
                    arguments.len()
                ),
            )
            .into());
        }

        for (idx, (parameter, argument)) in
            function.parameters.iter().zip(&arguments).enumerate()
        {
            let expected = ValueKind::of_declared(Some(parameter.type_name));
            if expected != argument.kind() {
                return Err(RuntimeError::new(
                    location,
                    format!(
                        "expected argument {idx} ({}) to be of type {expected}, got {}",
                        parameter.name,
                        argument.kind()
                    ),
                )
                .into());
            }
        }

        let scope = Scope::nested(function.scope.clone());
        {
            let mut frame = scope.borrow_mut();
            for (parameter, argument) in function.parameters.iter().zip(arguments) {
                frame.set(parameter.name.clone(), argument);
            }
        }

        // A `return` stops here; errors keep going up.
        let result = match self.eval_block(&function.body, &scope) {
            Ok(value) => value,
            Err(Interrupt::Return(value)) => value,
            Err(error) => return Err(error),
        };

        let expected = ValueKind::of_declared(Some(function.return_type));
        if expected != result.kind() {
            return Err(RuntimeError::new(
                location,
                format!(
                    "expected return to be of type {expected}, found {}",
                    result.kind()
                ),
            )
            .into());
        }

        Ok(result)
    }
}

fn function_value(
    name: Option<String>,
    literal: &FunctionLiteral,
    scope: &Rc<RefCell<Scope>>,
) -> Value {
    Value::Function(Rc::new(FunctionValue {
        name,
        parameters: literal.parameters.clone(),
        return_type: literal.return_type,
        body: literal.body.clone(),
        scope: scope.clone(),
    }))
}

fn eval_prefix_expression(expr: &PrefixExpression, right: Value) -> EvalResult {
    match expr.operator {
        PrefixOperator::Not => Ok(Value::Bool(matches!(
            right,
            Value::Bool(false) | Value::Null
        ))),

        PrefixOperator::Negate => match right {
            Value::Integer(value) => Ok(Value::Integer(-value)),
            Value::Float(value) => Ok(Value::Float(-value)),
            other => Err(RuntimeError::new(
                expr.token.location,
                format!("operator - is not defined over {}", other.kind()),
            )
            .into()),
        },
    }
}

/// The big `(left kind, right kind)` dispatch. A mixed integer/float pair
/// promotes the integer before re-dispatching.
fn eval_infix_expression(
    operator: InfixOperator,
    left: Value,
    right: Value,
    location: SourceLocation,
) -> EvalResult {
    match (left, right) {
        (Value::Integer(left), Value::Integer(right)) => {
            eval_integer_infix(operator, left, right, location)
        }

        (Value::Integer(left), Value::Float(right)) => {
            eval_float_infix(operator, left as f64, right, location)
        }
        (Value::Float(left), Value::Integer(right)) => {
            eval_float_infix(operator, left, right as f64, location)
        }
        (Value::Float(left), Value::Float(right)) => {
            eval_float_infix(operator, left, right, location)
        }

        (Value::Bool(left), Value::Bool(right)) => {
            eval_boolean_infix(operator, left, right, location)
        }

        (Value::Str(left), Value::Str(right)) => {
            eval_string_infix(operator, left, right, location)
        }

        (Value::Str(value), Value::Integer(count)) => eval_string_repeat(
            operator,
            value,
            count,
            ValueKind::Str,
            ValueKind::Integer,
            location,
        ),
        (Value::Integer(count), Value::Str(value)) => eval_string_repeat(
            operator,
            value,
            count,
            ValueKind::Integer,
            ValueKind::Str,
            location,
        ),

        (Value::Str(value), Value::Bool(keep)) => eval_string_select(
            operator,
            value,
            keep,
            ValueKind::Str,
            ValueKind::Boolean,
            location,
        ),
        (Value::Bool(keep), Value::Str(value)) => eval_string_select(
            operator,
            value,
            keep,
            ValueKind::Boolean,
            ValueKind::Str,
            location,
        ),

        (Value::List(left), Value::List(right)) => {
            eval_list_infix(operator, left, right, location)
        }

        (left, right) => Err(RuntimeError::new(
            location,
            format!(
                "operator {operator} is not defined over {} and {}",
                left.kind(),
                right.kind()
            ),
        )
        .into()),
    }
}

fn eval_integer_infix(
    operator: InfixOperator,
    left: i64,
    right: i64,
    location: SourceLocation,
) -> EvalResult {
    match operator {
        InfixOperator::Add => Ok(Value::Integer(left + right)),
        InfixOperator::Subtract => Ok(Value::Integer(left - right)),
        InfixOperator::Multiply => Ok(Value::Integer(left * right)),
        InfixOperator::Divide => Ok(Value::Integer(left / right)),
        InfixOperator::Modulo => Ok(Value::Integer(left % right)),
        InfixOperator::Power => Ok(Value::Integer(integer_power(left, right))),
        InfixOperator::Equal => Ok(Value::Bool(left == right)),
        InfixOperator::NotEqual => Ok(Value::Bool(left != right)),
        InfixOperator::LessThan => Ok(Value::Bool(left < right)),
        InfixOperator::GreaterThan => Ok(Value::Bool(left > right)),
        InfixOperator::LessThanOrEqual => Ok(Value::Bool(left <= right)),
        InfixOperator::GreaterThanOrEqual => Ok(Value::Bool(left >= right)),

        InfixOperator::And | InfixOperator::Or => Err(RuntimeError::new(
            location,
            format!("operator {operator} is not defined over INTEGERs"),
        )
        .into()),
    }
}

// Exponentiation goes through floating point, like the integer case does.
fn integer_power(base: i64, exponent: i64) -> i64 {
    (base as f64).powf(exponent as f64) as i64
}

fn eval_float_infix(
    operator: InfixOperator,
    left: f64,
    right: f64,
    location: SourceLocation,
) -> EvalResult {
    match operator {
        InfixOperator::Add => Ok(Value::Float(left + right)),
        InfixOperator::Subtract => Ok(Value::Float(left - right)),
        InfixOperator::Multiply => Ok(Value::Float(left * right)),
        InfixOperator::Divide => Ok(Value::Float(left / right)),
        InfixOperator::Power => Ok(Value::Float(left.powf(right))),
        InfixOperator::Equal => Ok(Value::Bool(left == right)),
        InfixOperator::NotEqual => Ok(Value::Bool(left != right)),
        InfixOperator::LessThan => Ok(Value::Bool(left < right)),
        InfixOperator::GreaterThan => Ok(Value::Bool(left > right)),
        InfixOperator::LessThanOrEqual => Ok(Value::Bool(left <= right)),
        InfixOperator::GreaterThanOrEqual => Ok(Value::Bool(left >= right)),

        InfixOperator::Modulo | InfixOperator::And | InfixOperator::Or => {
            Err(RuntimeError::new(
                location,
                format!("operator {operator} is not defined over FLOATs"),
            )
            .into())
        }
    }
}

fn eval_boolean_infix(
    operator: InfixOperator,
    left: bool,
    right: bool,
    location: SourceLocation,
) -> EvalResult {
    match operator {
        InfixOperator::Or => Ok(Value::Bool(left || right)),
        InfixOperator::And => Ok(Value::Bool(left && right)),
        InfixOperator::Equal => Ok(Value::Bool(left == right)),
        InfixOperator::NotEqual => Ok(Value::Bool(left != right)),

        _ => Err(RuntimeError::new(
            location,
            format!("{operator} is not defined over BOOLEANs"),
        )
        .into()),
    }
}

fn eval_string_infix(
    operator: InfixOperator,
    left: String,
    right: String,
    location: SourceLocation,
) -> EvalResult {
    match operator {
        InfixOperator::Add => Ok(Value::Str(format!("{left}{right}"))),
        InfixOperator::Equal => Ok(Value::Bool(left == right)),
        InfixOperator::NotEqual => Ok(Value::Bool(left != right)),

        _ => Err(RuntimeError::new(
            location,
            format!("{operator} is not defined over STRINGs"),
        )
        .into()),
    }
}

fn eval_string_repeat(
    operator: InfixOperator,
    value: String,
    count: i64,
    left: ValueKind,
    right: ValueKind,
    location: SourceLocation,
) -> EvalResult {
    if count < 0 {
        return Err(RuntimeError::new(location, "integer can't be less than 0").into());
    }

    if operator != InfixOperator::Multiply {
        return Err(operator_not_defined(operator, left, right, location).into());
    }

    Ok(Value::Str(value.repeat(count as usize)))
}

fn eval_string_select(
    operator: InfixOperator,
    value: String,
    keep: bool,
    left: ValueKind,
    right: ValueKind,
    location: SourceLocation,
) -> EvalResult {
    if operator != InfixOperator::Multiply {
        return Err(operator_not_defined(operator, left, right, location).into());
    }

    if keep {
        Ok(Value::Str(value))
    } else {
        Ok(Value::Str(String::new()))
    }
}

fn eval_list_infix(
    operator: InfixOperator,
    mut left: Vec<Value>,
    right: Vec<Value>,
    location: SourceLocation,
) -> EvalResult {
    match operator {
        InfixOperator::Add => {
            left.extend(right);
            Ok(Value::List(left))
        }

        _ => Err(RuntimeError::new(
            location,
            format!("{operator} is not defined over LISTs"),
        )
        .into()),
    }
}

fn operator_not_defined(
    operator: InfixOperator,
    left: ValueKind,
    right: ValueKind,
    location: SourceLocation,
) -> RuntimeError {
    RuntimeError::new(
        location,
        format!("operator {operator} is not defined over {left} and {right}"),
    )
}

fn eval_index_expression(left: Value, index: Value, location: SourceLocation) -> EvalResult {
    match (left, index) {
        (Value::List(elements), Value::Integer(index)) => {
            let max = elements.len() as i64 - 1;
            if index < 0 || index > max {
                return Err(RuntimeError::new(
                    location,
                    format!("index {index} out of range, len = {max}"),
                )
                .into());
            }

            Ok(elements[index as usize].clone())
        }

        (Value::Map(pairs), index) => {
            let Some(key) = index.map_key() else {
                return Err(RuntimeError::new(
                    location,
                    format!("can't use {} as hash key", index.kind()),
                )
                .into());
            };

            Ok(pairs
                .get(&key)
                .map(|entry| entry.value.clone())
                .unwrap_or(Value::Null))
        }

        (left, _) => Err(RuntimeError::new(
            location,
            format!("index operator is not defined over {}s", left.kind()),
        )
        .into()),
    }
}

fn eval_access_expression(target: Value, expr: &AccessExpression) -> EvalResult {
    match Builtin::method(target.kind(), &expr.attribute) {
        Some(method) => Ok(Value::BoundMethod {
            receiver: Box::new(target),
            method,
        }),
        None => Err(RuntimeError::new(
            expr.token.location,
            format!("type {} has no method {}", target.kind(), expr.attribute),
        )
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn eval_source(input: &str) -> Result<Value, RuntimeError> {
        let (program, diagnostics) = lilt::parse_source(input);
        assert!(
            diagnostics.is_empty(),
            "parse diagnostics for {input:?}: {diagnostics:?}"
        );

        let mut interpreter = Interpreter::new(Rc::new(RefCell::new(Vec::new())));
        interpreter.run(&program, &Scope::new())
    }

    fn eval_value(input: &str) -> Value {
        match eval_source(input) {
            Ok(value) => value,
            Err(error) => panic!("evaluation of {input:?} failed: {error}"),
        }
    }

    fn eval_error(input: &str) -> String {
        match eval_source(input) {
            Ok(value) => panic!("expected an error for {input:?}, got {value:?}"),
            Err(error) => error.to_string(),
        }
    }

    fn eval_with_stdout(input: &str) -> (Value, String) {
        let (program, diagnostics) = lilt::parse_source(input);
        assert!(
            diagnostics.is_empty(),
            "parse diagnostics for {input:?}: {diagnostics:?}"
        );

        let output: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
        let mut interpreter = Interpreter::new(output.clone());
        let value = interpreter
            .run(&program, &Scope::new())
            .expect("evaluation failed");

        let stdout = String::from_utf8_lossy(&output.borrow()).into_owned();
        (value, stdout)
    }

    #[track_caller]
    fn assert_integer(value: &Value, expected: i64) {
        assert!(
            matches!(value, Value::Integer(actual) if *actual == expected),
            "expected Integer({expected}), got {value:?}"
        );
    }

    #[rstest]
    #[case("5", 5)]
    #[case("10", 10)]
    #[case("-10", -10)]
    #[case("10 + 30", 40)]
    #[case("10 + 30 * 2", 70)]
    #[case("30 * 2 / 2 + 10", 40)]
    #[case("(1+1)^10 - 1 * 4", 1020)]
    #[case("20 + -10", 10)]
    #[case("7 % 4", 3)]
    fn integer_expressions(#[case] input: &str, #[case] expected: i64) {
        assert_integer(&eval_value(input), expected);
    }

    #[rstest]
    #[case("true", true)]
    #[case("!true", false)]
    #[case("!!true", true)]
    #[case("false", false)]
    #[case("false != true", true)]
    #[case("false || false", false)]
    #[case("!false || false", true)]
    #[case("!false && true", true)]
    #[case("1 == 1", true)]
    #[case("1^(-1*-1) == 4*1/4", true)]
    #[case("8 >= 2 ^ 3 + 1", false)]
    #[case("1.5 <= 2.5", true)]
    #[case("2.5 <= 1.5", false)]
    #[case("\"Hello\" != \"world!\"", true)]
    #[case("\"Hello\" == \"Hel\"+\"lo\"", true)]
    fn boolean_expressions(#[case] input: &str, #[case] expected: bool) {
        let value = eval_value(input);
        assert!(
            matches!(value, Value::Bool(actual) if actual == expected),
            "expected Bool({expected}), got {value:?}"
        );
    }

    #[rstest]
    #[case("1.0 + 1.0", 2.0)]
    #[case("1.23 * 2.0", 2.46)]
    #[case("(1 + 1.00) ^ 2.0", 4.0)]
    #[case("2.00 * 4", 8.0)]
    #[case("30 + 1.1", 31.1)]
    #[case("10 - 0.0", 10.0)]
    #[case("(10 + 20) ^ --1.0 / 1.0", 30.0)]
    fn float_expressions(#[case] input: &str, #[case] expected: f64) {
        let value = eval_value(input);
        assert!(
            matches!(value, Value::Float(actual) if actual == expected),
            "expected Float({expected}), got {value:?}"
        );
    }

    #[rstest]
    #[case("\"Hello\" + \" \" + \"world!\"", "Hello world!")]
    #[case("\"ab\" * 3", "ababab")]
    #[case("3 * \"ab\"", "ababab")]
    #[case("\"ab\" * 0", "")]
    #[case("\"ab\" * true", "ab")]
    #[case("false * \"ab\"", "")]
    #[case("\"\".otherwise(\"fallback\")", "fallback")]
    #[case("\"value\".otherwise(\"fallback\")", "value")]
    fn string_expressions(#[case] input: &str, #[case] expected: &str) {
        let value = eval_value(input);
        assert!(
            matches!(&value, Value::Str(actual) if actual == expected),
            "expected Str({expected:?}), got {value:?}"
        );
    }

    #[rstest]
    #[case("if (10 < 20) {10} else {0}", "10")]
    #[case("if (10 == 20) {10} else {0}", "0")]
    #[case("if (10 < 20) {.10}", "0.100000")]
    #[case("if (31 <= 30) {0}", "")]
    #[case("if (\"Hello\") {\"world!\"}", "world!")]
    #[case("if (true) {true} else {false}", "true")]
    #[case("if (false) {true} else {false}", "false")]
    #[case("if (1) {true} else {false}", "true")]
    #[case("if (1 == 2) {1} else if (2 == 2) {2} else {3}", "2")]
    #[case("if (1 == 2) {1} else if (2 == 3) {2} else {3}", "3")]
    fn if_expressions(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(eval_value(input).to_string(), expected);
    }

    #[rstest]
    #[case("return 10;", "10")]
    #[case("return .8; 9 + 2;", "0.800000")]
    #[case("3+2; return 10; 9 + 2;", "10")]
    #[case("3+2; return \"Hello\"; 9 + 2;", "Hello")]
    #[case("3*20; return; 20", "")]
    #[case("if (10 == 20) {10; return 0; 3;} else {1; return 20; 4;}", "20")]
    #[case("if (10 != 20) {if (2 > 0) {return 3;} return 1;}", "3")]
    fn return_statements(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(eval_value(input).to_string(), expected);
    }

    #[rstest]
    #[case("\"Hello\"+3", "[1,8] operator + is not defined over STRING and INTEGER")]
    #[case("\"Hello\"*.7", "[1,8] operator * is not defined over STRING and FLOAT")]
    #[case("3 || 8", "[1,3] operator || is not defined over INTEGERs")]
    #[case(".7 && 100.0", "[1,4] operator && is not defined over FLOATs")]
    #[case("3 || 8; return 0;", "[1,3] operator || is not defined over INTEGERs")]
    #[case("true + false", "[1,6] + is not defined over BOOLEANs")]
    #[case("\"a\" - \"b\"", "[1,5] - is not defined over STRINGs")]
    #[case("[1] * [2]", "[1,5] * is not defined over LISTs")]
    #[case("[1] + 1", "[1,5] operator + is not defined over LIST and INTEGER")]
    #[case("\"ab\" * -1", "[1,6] integer can't be less than 0")]
    #[case("-true", "[1,1] operator - is not defined over BOOLEAN")]
    #[case("someVar;", "[1,1] someVar is not defined")]
    #[case("len(4)", "[1,4] built-in function `len` is not defined on INTEGERs")]
    #[case("len()", "[1,4] expected 1 arguments, got 0")]
    #[case("true()", "[1,5] not a function: BOOLEAN")]
    #[case("true.len()", "[1,5] type BOOLEAN has no method len")]
    #[case("\"abc\".foo()", "[1,6] type STRING has no method foo")]
    #[case("[1,2][5]", "[1,6] index 5 out of range, len = 1")]
    #[case("[1,2][-1]", "[1,6] index -1 out of range, len = 1")]
    #[case("1[0]", "[1,2] index operator is not defined over INTEGERs")]
    #[case("{[1]: 2}", "[1,1] can't use LIST as hash key")]
    #[case("{1: 2}[[1]]", "[1,7] can't use LIST as hash key")]
    fn error_messages(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(eval_error(input), expected);
    }

    #[rstest]
    #[case("let x: Int = 5; return x;", "5")]
    #[case("let x: Float = .75; x;", "0.750000")]
    #[case("let x: String = \"Hello\"; x;", "Hello")]
    #[case("let _someValue: Int = (3+2)^2; _someValue;", "25")]
    #[case("let l: List = [1, 2]; l[1];", "2")]
    #[case("let m: Map = {1: 2}; m[1];", "2")]
    fn let_statements(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(eval_value(input).to_string(), expected);
    }

    #[rstest]
    #[case(
        "let x: Int = \"s\";",
        "[1,1] type mismatch, expected value of type STRING to be of type INTEGER"
    )]
    #[case(
        "let x: Void = 1;",
        "[1,1] type mismatch, expected value of type INTEGER to be of type NULL"
    )]
    #[case(
        "let b: Bool = 1.0;",
        "[1,1] type mismatch, expected value of type FLOAT to be of type BOOLEAN"
    )]
    fn let_type_mismatch(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(eval_error(input), expected);
    }

    #[rstest]
    #[case("let identity: Func = fn(x: Int) Int {return x;}; identity(5);", "5")]
    #[case("let double: Func = fn(x: Int) Int {return x*2;}; double(5);", "10")]
    #[case(
        "let add: Func = fn(x: Int, y: Int) Int {return x*2;}; add(5, add(2, 3));",
        "10"
    )]
    #[case("fn(x:Int)Int{return x;}(5)", "5")]
    #[case("fn adder(x:Int) Int {return x + 10;}; adder(20);", "30")]
    #[case(
        "fn greeter(x: String) String {return \"Hello \" + x + \"!\";}; greeter(\"Jack\");",
        "Hello Jack!"
    )]
    #[case("fn isTrue(x: Bool) Bool {return x == true;}; isTrue(false);", "false")]
    #[case("fn implicit(x: Int) Int {x + 2;}; implicit(3);", "5")]
    #[case("let p: Func = len; p(\"four\");", "4")]
    fn function_application(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(eval_value(input).to_string(), expected);
    }

    #[rstest]
    #[case(
        "fn f(x: Int) Int {return x;} f(\"s\")",
        "[1,31] expected argument 0 (x) to be of type INTEGER, got STRING"
    )]
    #[case(
        "fn g() Int {return 1;} g(2)",
        "[1,25] function g expected 0 arguments, got 1"
    )]
    #[case(
        "fn h() Int {return \"s\";} h()",
        "[1,27] expected return to be of type INTEGER, found STRING"
    )]
    #[case(
        "fn v() {return 1;} v()",
        "[1,21] expected return to be of type NULL, found INTEGER"
    )]
    fn function_call_checks(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(eval_error(input), expected);
    }

    #[test]
    fn function_values_render_their_signature() {
        let value = eval_value("let addr: Func = fn (x: Int) {x + 2;}; addr;");
        assert_eq!(value.to_string(), "fn (x: Int) Void");

        let value = eval_value("fn add(x: Int, y: Int) Int {return x + y;}");
        assert_eq!(value.to_string(), "fn add(x: Int, y: Int) Int");
    }

    #[test]
    fn closures_capture_their_defining_scope() {
        assert_eq!(
            eval_value("let a: Int = 10; let f: Func = fn() Int { return a; }; f()").to_string(),
            "10"
        );

        // The captured frame outlives the block that created it.
        let value = eval_value(
            "let f: Func = if (true) { let a: Int = 42; fn() Int { return a; } } \
             else { fn() Int { return 0; } }; f()",
        );
        assert_integer(&value, 42);

        let value = eval_value(
            "fn multiply(m: Int) Func { return fn(x: Int) Int { return x * m; }; } \
             multiply(4)(10)",
        );
        assert_integer(&value, 40);
    }

    #[test]
    fn named_functions_can_recurse() {
        let value = eval_value(
            "fn fib(n: Int) Int { if (n < 2) { return n; } return fib(n-1) + fib(n-2); } fib(10)",
        );
        assert_integer(&value, 55);
    }

    #[rstest]
    #[case("len(\"\")", 0)]
    #[case("len(\"four\")", 4)]
    #[case("len([1, 2, 3])", 3)]
    #[case("len({1: 2, 3: 4})", 2)]
    #[case("max(1, 5, 3)", 5)]
    #[case("max([1, 5, 3])", 5)]
    #[case("[1, 5, 3].max()", 5)]
    #[case("[1, 5, 3].len()", 3)]
    fn builtin_integers(#[case] input: &str, #[case] expected: i64) {
        assert_integer(&eval_value(input), expected);
    }

    #[rstest]
    #[case("range(2, 5)", "[2, 3, 4, 5]")]
    #[case("range(1, 1)", "[1]")]
    #[case("[1, 2, 3].reverse()", "[3, 2, 1]")]
    #[case("[1, 2, 3].reverse().reverse()", "[1, 2, 3]")]
    #[case("[1, 2, 3, 4].slice(1, 2)", "[2, 3]")]
    #[case("[1, 2, 3].update(1, 9)", "[1, 9, 3]")]
    #[case("[1, 2, 3].update(7, 9)", "[1, 2, 3]")]
    #[case("[1] + [2, 3]", "[1, 2, 3]")]
    #[case("[1, 2, 3].map(fn(x: Int) Int {return x * 2;})", "[2, 4, 6]")]
    #[case("range(0, 6).filter(fn(x: Int) Bool {x % 2 == 0})", "[0, 2, 4, 6]")]
    #[case("[\"\", \"b\"].map(len)", "[0, 1]")]
    fn list_operations(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(eval_value(input).to_string(), expected);
    }

    #[rstest]
    #[case("string(42)", "42")]
    #[case("string(-7)", "-7")]
    #[case("string(1.5)", "1.500000")]
    #[case("string(true)", "true")]
    fn string_conversion(#[case] input: &str, #[case] expected: &str) {
        let value = eval_value(input);
        assert!(
            matches!(&value, Value::Str(actual) if actual == expected),
            "expected Str({expected:?}), got {value:?}"
        );
    }

    #[rstest]
    #[case("string([1])", "string can't convert value of type LIST")]
    #[case("max(1, 2.0)", "max expected all arguments to be of same type, found INTEGER and FLOAT")]
    #[case("max(\"a\")", "max expected arguments to be of type INTEGER or FLOAT, found STRING")]
    #[case("range(1, 2.0)", "range expected arguments to be of type INTEGER, got=INTEGER and FLOAT")]
    #[case("[1].map(3)", "map expected its argument to be a function, got=INTEGER")]
    #[case(
        "[1].map(fn(x: Int, y: Int) Int {return x;})",
        "map expected its argument to have a single argument, got=2"
    )]
    #[case(
        "[1].filter(fn(x: Int) Int {return x;})",
        "filter expected its argument to return a Boolean, got=Int"
    )]
    #[case("\"a\".otherwise(1)", "otherwise expected its argument to be a STRING, got=INTEGER")]
    fn builtin_errors(#[case] input: &str, #[case] expected: &str) {
        let message = eval_error(input);
        let message = message.split_once("] ").map(|(_, m)| m).unwrap_or(&message);
        assert_eq!(message, expected);
    }

    #[test]
    fn map_literal_holds_five_entries() {
        let value = eval_value(
            "let two: String = \"two\";\n\
             {\"one\": 10-9, two: 2+0, \"thr\"+\"ee\": 6/2, 4: 5, false: 6}",
        );
        let Value::Map(pairs) = &value else {
            panic!("expected a map, got {value:?}");
        };

        assert_eq!(pairs.len(), 5);

        let lookup = |key: Value| {
            let entry = pairs
                .get(&key.map_key().expect("key should be hashable"))
                .unwrap_or_else(|| panic!("missing entry for {key:?}"));
            entry.value.clone()
        };

        assert_integer(&lookup(Value::Str("one".to_string())), 1);
        assert_integer(&lookup(Value::Str("two".to_string())), 2);
        assert_integer(&lookup(Value::Str("three".to_string())), 3);
        assert_integer(&lookup(Value::Integer(4)), 5);
        assert_integer(&lookup(Value::Bool(false)), 6);
    }

    #[test]
    fn map_misses_yield_null() {
        assert!(matches!(eval_value("{1: 2}[3]"), Value::Null));
    }

    #[test]
    fn duplicate_map_keys_overwrite() {
        assert_integer(&eval_value("{1: 2, 1: 3}[1]"), 3);
    }

    #[test]
    fn float_map_keys_use_the_bit_pattern() {
        assert_integer(&eval_value("{0.0: 1, -0.0: 2}[0.0]"), 1);
        assert_integer(&eval_value("{0.0: 1, -0.0: 2}[-0.0]"), 2);
    }

    #[test]
    fn print_builtins_write_to_the_sink() {
        let (value, stdout) = eval_with_stdout("print(\"a\"); println(\"b\"); print(1, 2)");
        assert!(matches!(value, Value::Null));
        assert_eq!(stdout, "ab\n12");
    }

    #[test]
    fn blocks_do_not_leak_bindings() {
        assert_eq!(
            eval_error("if (true) { let a: Int = 1; a; } a"),
            "[1,34] a is not defined"
        );
    }
}
