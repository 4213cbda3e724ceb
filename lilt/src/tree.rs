// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::Write;

use crate::{BlockStatement, Expression, FunctionLiteral, Program, Statement};

/// Renders a program as an indented tree, for the `--tree` flag and the
/// REPL's `tree` stage.
#[must_use]
pub fn draw_tree(program: &Program) -> String {
    let mut root = Node::new("Program");
    for statement in &program.statements {
        add_statement(statement, &mut root);
    }

    let mut out = String::new();
    _ = writeln!(out, "{}", root.label);
    render_children(&root, "", &mut out);
    out
}

struct Node {
    label: String,
    children: Vec<Node>,
}

impl Node {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    fn add(&mut self, child: Node) -> &mut Node {
        self.children.push(child);
        self.children.last_mut().expect("child was just pushed")
    }
}

fn add_statement(statement: &Statement, parent: &mut Node) {
    match statement {
        Statement::Let(stmt) => {
            let node = parent.add(Node::new("let"));
            node.add(Node::new(stmt.name.value.clone()));
            add_expression(&stmt.value, node);
        }

        Statement::Return(stmt) => {
            let node = parent.add(Node::new("return"));
            if let Some(value) = &stmt.value {
                add_expression(value, node);
            }
        }

        Statement::Expression(stmt) => add_expression(&stmt.expression, parent),
    }
}

fn add_block(block: &BlockStatement, parent: &mut Node) {
    for statement in &block.statements {
        add_statement(statement, parent);
    }
}

fn add_expression(expression: &Expression, parent: &mut Node) {
    match expression {
        Expression::Identifier(expr) => {
            parent.add(Node::new(expr.value.clone()));
        }

        Expression::Integer(expr) => {
            parent.add(Node::new(expr.value.to_string()));
        }

        Expression::Float(expr) => {
            parent.add(Node::new(expr.value.to_string()));
        }

        Expression::Str(expr) => {
            parent.add(Node::new(format!("\"{}\"", expr.value)));
        }

        Expression::Boolean(expr) => {
            parent.add(Node::new(expr.token.literal.clone()));
        }

        Expression::Prefix(expr) => {
            let node = parent.add(Node::new(expr.operator.as_str()));
            add_expression(&expr.right, node);
        }

        Expression::Infix(expr) => {
            let node = parent.add(Node::new(expr.operator.as_str()));
            add_expression(&expr.left, node);
            add_expression(&expr.right, node);
        }

        Expression::If(expr) => {
            let node = parent.add(Node::new("if"));
            add_expression(&expr.condition, node);

            let then_node = node.add(Node::new("then"));
            add_block(&expr.consequence, then_node);

            if let Some(others) = &expr.others {
                let else_node = node.add(Node::new("else"));
                add_expression(others, else_node);
            }

            if let Some(alternative) = &expr.alternative {
                let else_node = node.add(Node::new("else"));
                add_block(alternative, else_node);
            }
        }

        Expression::FunctionLiteral(expr) => {
            let node = parent.add(Node::new("define"));
            add_function_body(expr, node);
        }

        Expression::Function(expr) => {
            let node = parent.add(Node::new(format!("define {}", expr.name.value)));
            add_function_body(&expr.literal, node);
        }

        Expression::Call(expr) => {
            let node = parent.add(Node::new("call"));
            add_expression(&expr.function, node);
            for argument in &expr.arguments {
                add_expression(argument, node);
            }
        }

        Expression::List(expr) => {
            let node = parent.add(Node::new("list"));
            for element in &expr.elements {
                add_expression(element, node);
            }
        }

        Expression::Map(expr) => {
            let node = parent.add(Node::new("map"));
            for (key, value) in &expr.pairs {
                let pair_node = node.add(Node::new(":"));
                add_expression(key, pair_node);
                add_expression(value, pair_node);
            }
        }

        Expression::Index(expr) => {
            let node = parent.add(Node::new("index"));
            add_expression(&expr.left, node);
            add_expression(&expr.index, node);
        }

        Expression::Access(expr) => {
            let node = parent.add(Node::new(format!(".{}", expr.attribute)));
            add_expression(&expr.target, node);
        }
    }
}

fn add_function_body(literal: &FunctionLiteral, node: &mut Node) {
    if !literal.parameters.is_empty() {
        let parameters: Vec<String> = literal.parameters.iter().map(|p| p.to_string()).collect();
        node.add(Node::new(parameters.join(", ")));
    }

    add_block(&literal.body, node);
}

fn render_children(node: &Node, prefix: &str, out: &mut String) {
    for (idx, child) in node.children.iter().enumerate() {
        let last = idx == node.children.len() - 1;
        let connector = if last { "└── " } else { "├── " };
        _ = writeln!(out, "{prefix}{connector}{}", child.label);

        let child_prefix = if last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };
        render_children(child, &child_prefix, out);
    }
}
