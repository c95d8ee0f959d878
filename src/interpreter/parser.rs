/// The parser core: lookahead state, the precedence table, and the
/// precedence-climbing expression machinery with its prefix/infix handler
/// tables.
pub mod core;
/// Statement-level productions: `let`, `func`, `return`, blocks, and
/// expression statements.
mod statement;

pub use self::core::Parser;
