#[derive(Debug, Clone)]
/// Represents a single diagnostic collected while parsing.
///
/// The parser never fails outright; it records these and keeps going, so a
/// single pass reports every problem in the input at once.
pub enum ParseError {
    /// The current token has no prefix parse function, so no expression can
    /// start here.
    NoPrefixHandler {
        /// The offending token kind.
        kind: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The next token was not the one the current production requires.
    UnexpectedToken {
        /// The token kind the production expected.
        expected: String,
        /// The token kind actually found.
        found: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A block was still open when the input ended.
    UnclosedBlock {
        /// The source line of the opening `{`.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPrefixHandler { kind, line } => {
                write!(f, "Error on line {line}: no prefix parse function for {kind}.")
            },
            Self::UnexpectedToken { expected, found, line } => {
                write!(f, "Error on line {line}: expected next token to be {expected}, got {found}.")
            },
            Self::UnclosedBlock { line } => {
                write!(f, "Error on line {line}: block opened here is never closed with '}}'.")
            },
        }
    }
}

impl std::error::Error for ParseError {}

/// The full batch of diagnostics from one parse, as a single error value.
///
/// Callers that treat any diagnostic as fatal (the CLI, the library entry
/// points) wrap the parser's accumulated list in this type so the whole
/// batch travels through ordinary error plumbing and prints as one report.
#[derive(Debug, Clone)]
pub struct ParseErrors(pub Vec<ParseError>);

impl std::fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "parser errors:")?;
        for error in &self.0 {
            writeln!(f, "\t{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}
