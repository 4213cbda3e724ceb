// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{
    cell::RefCell,
    path::{Path, PathBuf},
    process::exit,
    rc::Rc,
};

use colored::Colorize;

use lilt_interpreter::{
    draw_tree, parse_source, repl, Interpreter, Logger, ReplStage, Scope, SourceLocation,
};

#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Source file to run; starts the REPL when omitted.
    file: Option<PathBuf>,

    /// Print the parsed program as a tree instead of evaluating it.
    #[arg(long)]
    tree: bool,

    /// Pipeline stage the REPL runs each line through.
    #[arg(long, value_enum, default_value_t = ReplStage::Eval)]
    stage: ReplStage,

    /// Emit pipeline diagnostics on stderr; repeat for trace detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    pub fn parse_args() -> Self {
        use clap::Parser;
        Self::parse()
    }
}

fn main() {
    let args = Args::parse_args();

    if args.verbose > 0 {
        Logger::initialize(Logger::level_for(args.verbose));
    }

    match &args.file {
        Some(file) => run_file(file, args.tree),
        None => repl::start(args.stage),
    }
}

/// Runs a source file. Programs are expected to define a nullary `main`,
/// which gets called by the `main();` line appended to the file's contents.
/// Program output is buffered so that a failing run prints a diagnostic and
/// nothing else.
fn run_file(path: &Path, tree: bool) {
    let Ok(source) = std::fs::read_to_string(path) else {
        eprintln!("file not found {}", path.display());
        exit(1);
    };

    let code = format!("{source}\nmain();");

    log::debug!("parsing {}", path.display());
    let (program, diagnostics) = parse_source(&code);
    log::trace!(
        "parsed {} statements, {} diagnostics",
        program.statements.len(),
        diagnostics.len()
    );

    if let Some(diagnostic) = diagnostics.first() {
        let text = diagnostic.to_string();
        let message = text
            .split_once("] ")
            .map(|(_, message)| message.to_string())
            .unwrap_or(text);
        report(&code, diagnostic.location(), &message);
        exit(1);
    }

    if tree {
        print!("{}", draw_tree(&program));
        return;
    }

    let output: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
    let mut interpreter = Interpreter::new(output.clone());
    let scope = Scope::new();

    log::debug!("evaluating {}", path.display());
    match interpreter.run(&program, &scope) {
        Ok(value) => {
            print!("{}", String::from_utf8_lossy(&output.borrow()));
            print!("{value}");
        }

        Err(error) => {
            report(&code, Some(error.location()), error.message());
            exit(1);
        }
    }
}

/// Prints the offending source line with a caret under the reported column.
fn report(code: &str, location: Option<SourceLocation>, message: &str) {
    let Some(location) = location else {
        eprintln!("{}: {}", "error".red().bold(), message);
        return;
    };

    let line = code.lines().nth(location.row() - 1).unwrap_or_default();
    let row_number = format!("{}: ", location.row());

    eprintln!();
    eprintln!("{row_number}{line}");
    eprintln!(
        "{}{} {}",
        " ".repeat(row_number.len() + location.column().saturating_sub(1)),
        "^".red().bold(),
        message.red()
    );
}
