/// Chained scope frames mapping names to runtime values.
///
/// A frame owns its local bindings and optionally points at an enclosing
/// frame. Lookup walks outward; writes stay local. Frames are shared
/// (reference-counted) because closures keep their definition scope alive.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator recursively visits the syntax tree, reads and writes
/// environment frames, applies the numeric-evaluation policy, and calls out
/// to the builtin registry. It owns no mutable state of its own.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Implements closure semantics over captured environments.
/// - Reports runtime errors such as division by zero fail-fast.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens,
/// each carrying its kind, verbatim text, and source line. This is the
/// first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into line-tagged tokens.
/// - Handles numeric and string literals, identifiers, and operators.
/// - Surfaces unrecognized input as `Illegal` tokens instead of failing.
pub mod lexer;
/// The object module defines the runtime data types for evaluation.
///
/// This module declares the tagged value variants that evaluation produces:
/// numbers (kept as verbatim text), strings, booleans, null, the return
/// propagation sentinel, function closures, and builtins. Numbers and
/// strings additionally expose a content hash for future container types.
pub mod object;
/// The parser module builds the abstract syntax tree from tokens.
///
/// The parser consumes the token stream with two tokens of lookahead and
/// builds the AST by precedence climbing. It is error-tolerant: diagnostics
/// accumulate and parsing continues past malformed productions.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (statements, expressions).
/// - Ranks infix operators with a fixed precedence table.
/// - Collects diagnostics with source lines instead of failing fast.
pub mod parser;
