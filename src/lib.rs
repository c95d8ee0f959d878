//! # keel
//!
//! keel is a small scripting language written in Rust. It parses `.k`
//! source into an abstract syntax tree with an operator-precedence (Pratt)
//! parser and executes it with a recursive tree-walking evaluator over a
//! lexically-scoped environment.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use std::{cell::RefCell, rc::Rc};

use crate::{
    error::parse_error::ParseErrors,
    interpreter::{
        environment::Environment, evaluator::core::Evaluator, lexer::Lexer, object::Object,
        parser::core::Parser,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the statement and expression enums that represent
/// the syntactic structure of source code as a tree. The AST is built by the
/// parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines statement and expression types for all language constructs.
/// - Attaches the originating token (and so the source line) to every node.
/// - Provides the canonical string form the formatter relies on.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during parsing or
/// evaluating code. Parse errors are tolerant and accumulate; runtime errors
/// are fail-fast and abort the evaluation.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, the runtime value
/// model, the environment chain and the builtin registry to provide a
/// complete runtime for keel source code.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator.
/// - Provides the scope chain and runtime object model.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// Parses and evaluates a complete source string.
///
/// The source is tokenized and parsed first. If the parser collected any
/// diagnostics they are returned as a single batched [`ParseErrors`] value
/// and evaluation does not start. Otherwise the program is evaluated in a
/// fresh root environment with the default builtin registry, and the final
/// value of the program is returned. Statements such as `let` produce no
/// value, so a program may legitimately finish with `None`.
///
/// # Errors
/// Returns the batched parse diagnostics, or the first runtime error raised
/// during evaluation.
///
/// # Examples
/// ```
/// use keel::run_source;
///
/// let result = run_source("let x = 1 + 2 * 3\nx\n").unwrap();
/// assert_eq!(result.unwrap().to_string(), "7");
///
/// // 'y' is never defined, so evaluation fails.
/// assert!(run_source("y\n").is_err());
/// ```
pub fn run_source(source: &str) -> Result<Option<Object>, Box<dyn std::error::Error>> {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    if !parser.errors().is_empty() {
        return Err(Box::new(ParseErrors(parser.errors().to_vec())));
    }

    let env = Rc::new(RefCell::new(Environment::new()));
    let evaluator = Evaluator::new();
    Ok(evaluator.eval_program(&program, &env)?)
}

/// Parses a source string and returns its canonical formatting.
///
/// The returned text is the canonical serialization of the parsed tree:
/// stable, reparseable, and idempotent (formatting already-formatted code
/// changes nothing).
///
/// # Errors
/// Returns the batched parse diagnostics if the source is malformed.
///
/// # Examples
/// ```
/// use keel::format_source;
///
/// let formatted = format_source("let   x=1+2\n").unwrap();
/// assert_eq!(formatted, "let x = 1 + 2\n");
/// ```
pub fn format_source(source: &str) -> Result<String, ParseErrors> {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    if !parser.errors().is_empty() {
        return Err(ParseErrors(parser.errors().to_vec()));
    }
    Ok(program.to_string())
}
