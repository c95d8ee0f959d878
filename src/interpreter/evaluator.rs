/// The fixed builtin registry and the native functions behind it.
pub mod builtin;
/// The evaluator itself: dispatch over AST nodes, closure calls, and the
/// propagation of early returns.
pub mod core;
/// The numeric evaluation policy: integer versus float is decided per
/// operation from the operands' literal text.
pub mod number;
