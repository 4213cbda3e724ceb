// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::io::{stdin, stdout, Write};

use lilt::{draw_tree, Lexer, Parser};

use crate::{Interpreter, Scope};

/// How far the REPL takes each line through the pipeline.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReplStage {
    /// Dump the token stream.
    Tokens,
    /// Print the canonical string form of the parse.
    Parse,
    /// Draw the parsed program as a tree.
    Tree,
    /// Evaluate, with bindings persisting across lines.
    #[default]
    Eval,
}

const PROMPT: &str = ">> ";

pub fn start(stage: ReplStage) {
    let scope = Scope::new();
    let mut interpreter = Interpreter::default();

    loop {
        print!("{PROMPT}");
        _ = stdout().flush();

        let mut line = String::new();
        match stdin().read_line(&mut line) {
            Ok(0) | Err(..) => return,
            Ok(..) => {}
        }

        if stage == ReplStage::Tokens {
            for token in Lexer::new(&line) {
                println!("{token:?}");
            }
            continue;
        }

        let mut parser = Parser::new(Lexer::new(&line));
        let program = parser.parse();

        let diagnostics = parser.into_diagnostics();
        if !diagnostics.is_empty() {
            for diagnostic in diagnostics {
                println!("\t{diagnostic}");
            }
            continue;
        }

        match stage {
            ReplStage::Parse => println!("{program}"),
            ReplStage::Tree => print!("{}", draw_tree(&program)),
            _ => match interpreter.run(&program, &scope) {
                Ok(value) => println!("{value}"),
                Err(error) => println!("\t{error}"),
            },
        }
    }
}
