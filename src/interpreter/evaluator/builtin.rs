use crate::interpreter::{
    evaluator::core::{BuiltinRegistry, EvalResult},
    object::{BuiltinFn, Object},
};

/// Builds the default builtin registry.
///
/// The registry is handed to the [`Evaluator`](super::core::Evaluator) at
/// construction rather than living in a global table, so independent
/// evaluation contexts cannot interfere. Identifier resolution tries the
/// environment chain first; a `let` binding shadows a builtin.
#[must_use]
pub fn default_registry() -> BuiltinRegistry {
    let mut registry = BuiltinRegistry::new();
    registry.insert("print".to_string(), print as BuiltinFn);
    registry
}

/// Writes each argument's display form to standard output, space-separated
/// and newline-terminated. With no arguments nothing is written, not even
/// the newline. Produces no meaningful value.
pub fn print(args: &[Object], _line: usize) -> EvalResult<Option<Object>> {
    if args.is_empty() {
        return Ok(None);
    }
    let rendered: Vec<String> = args.iter().map(ToString::to_string).collect();
    println!("{}", rendered.join(" "));
    Ok(None)
}
