/// Parsing errors.
///
/// Defines the diagnostics the parser accumulates while building the AST.
/// Parsing is tolerant: a malformed production yields an absent node and a
/// diagnostic, and parsing of the rest of the input continues.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Runtime
/// errors are fail-fast: the first failure aborts the entire evaluation and
/// propagates to the top-level caller.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
