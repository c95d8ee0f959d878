#[derive(Debug, Clone)]
/// Represents all errors that can be raised during evaluation.
///
/// Evaluation is fail-fast: the first of these aborts the whole run and
/// propagates unchanged to the top-level caller.
pub enum RuntimeError {
    /// A name resolved neither in the environment chain nor in the builtin
    /// registry.
    UndefinedIdentifier {
        /// The unresolved name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An infix operator was applied to operands it does not support.
    IllegalOperands {
        /// The operator text.
        op: String,
        /// The left operand, in its display form.
        lhs: String,
        /// The right operand, in its display form.
        rhs: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An AST node reached the evaluator without a matching case.
    UnsupportedNode {
        /// The node, in its canonical string form.
        node: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An operator parses but has no numeric evaluation.
    UnsupportedOperator {
        /// The operator text.
        op: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division by zero, on either the integer or the float path.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The callee of a call expression is not a function or a builtin.
    NotCallable {
        /// The callee value, in its display form.
        callee: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A function was called with the wrong number of arguments.
    ArityMismatch {
        /// How many parameters the function declares.
        expected: usize,
        /// How many arguments the call supplied.
        found: usize,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Evaluating a call argument failed.
    Argument {
        /// Zero-based position of the failing argument.
        index: usize,
        /// The underlying failure, rendered.
        details: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An expression that had to produce a value produced none.
    MissingValue {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A number literal's text could not be parsed for an operation.
    InvalidNumber {
        /// The offending literal text.
        literal: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Integer arithmetic overflowed.
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedIdentifier { name, line } => {
                write!(f, "Error on line {line}: undefined identifier '{name}'.")
            },
            Self::IllegalOperands { op, lhs, rhs, line } => {
                write!(f, "Error on line {line}: illegal operands for '{op}': {lhs} and {rhs}.")
            },
            Self::UnsupportedNode { node, line } => {
                write!(f, "Error on line {line}: unsupported node '{node}'.")
            },
            Self::UnsupportedOperator { op, line } => {
                write!(f, "Error on line {line}: operator '{op}' is not supported here.")
            },
            Self::DivisionByZero { line } => {
                write!(f, "Error on line {line}: division by zero.")
            },
            Self::NotCallable { callee, line } => {
                write!(f, "Error on line {line}: {callee} is not callable.")
            },
            Self::ArityMismatch { expected, found, line } => {
                write!(f, "Error on line {line}: expected {expected} arguments, got {found}.")
            },
            Self::Argument { index, details, line } => {
                write!(f, "Error on line {line}: argument {index} failed: {details}")
            },
            Self::MissingValue { line } => {
                write!(f, "Error on line {line}: expression produced no value.")
            },
            Self::InvalidNumber { literal, line } => {
                write!(f, "Error on line {line}: cannot parse number '{literal}'.")
            },
            Self::Overflow { line } => {
                write!(f, "Error on line {line}: integer overflow while computing result.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
