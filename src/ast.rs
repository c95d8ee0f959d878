use std::fmt::{self, Write as _};

use crate::interpreter::lexer::Token;

/// A complete parsed program: a non-empty ordered sequence of statements.
///
/// The program exclusively owns its whole tree; nothing in the AST refers
/// back to a parent or is shared between nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    /// The top-level statements, in source order.
    pub statements: Vec<Statement>,
}

impl Program {
    /// The leading literal of the first statement, or `None` for an empty
    /// program.
    #[must_use]
    pub fn token_literal(&self) -> Option<&str> {
        self.statements.first().map(Statement::token_literal)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            statement.write_indented(f, 0)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A statement node.
///
/// Statements do not themselves produce values the way expressions do; the
/// evaluator decides per variant whether anything meaningful comes out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `let <name> = <value>`
    Let {
        /// The `let` token.
        token: Token,
        /// The bound name.
        name: String,
        /// The initializer expression.
        value: Expression,
    },
    /// `func <name>(<parameters>) { <body> }`
    FunctionDefine {
        /// The `func` token.
        token: Token,
        /// The function name.
        name: String,
        /// Parameter names, in declaration order.
        parameters: Vec<String>,
        /// The function body.
        body: Block,
    },
    /// A braced sequence of statements.
    Block(Block),
    /// `return <value>`
    Return {
        /// The `return` token.
        token: Token,
        /// The returned expression.
        value: Expression,
    },
    /// A bare expression used as a statement.
    Expression {
        /// The expression's leading token.
        token: Token,
        /// The expression itself.
        expression: Expression,
    },
}

impl Statement {
    /// The source line the statement starts on.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::Let { token, .. }
            | Self::FunctionDefine { token, .. }
            | Self::Return { token, .. }
            | Self::Expression { token, .. } => token.line,
            Self::Block(block) => block.token.line,
        }
    }

    /// The literal text of the statement's leading token.
    #[must_use]
    pub fn token_literal(&self) -> &str {
        match self {
            Self::Let { token, .. }
            | Self::FunctionDefine { token, .. }
            | Self::Return { token, .. }
            | Self::Expression { token, .. } => &token.literal,
            Self::Block(block) => &block.token.literal,
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        match self {
            Self::Let { name, value, .. } => write!(f, "let {name} = {value}"),
            Self::FunctionDefine { name, parameters, body, .. } => {
                write!(f, "func {name}({}) ", parameters.join(", "))?;
                body.write_indented(f, indent)
            },
            Self::Block(block) => block.write_indented(f, indent),
            Self::Return { value, .. } => write!(f, "return {value}"),
            Self::Expression { expression, .. } => write!(f, "{expression}"),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// A braced, ordered sequence of statements. Used both as a statement in
/// its own right and as the body of a function definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The opening `{` token.
    pub token: Token,
    /// The statements inside the braces, in source order.
    pub statements: Vec<Statement>,
}

impl Block {
    fn write_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        if self.statements.is_empty() {
            return write!(f, "{{}}");
        }
        writeln!(f, "{{")?;
        for statement in &self.statements {
            for _ in 0..indent + 4 {
                f.write_char(' ')?;
            }
            statement.write_indented(f, indent + 4)?;
            writeln!(f)?;
        }
        for _ in 0..indent {
            f.write_char(' ')?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// An expression node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// A name reference, such as `x`.
    Identifier {
        /// The identifier token.
        token: Token,
        /// The referenced name.
        value: String,
    },
    /// A number literal. The digits are kept verbatim as text; the
    /// integer-versus-float decision happens per operation at evaluation
    /// time.
    Number {
        /// The number token.
        token: Token,
        /// The literal digits, untouched.
        value: String,
    },
    /// A string literal (stored without its quotes).
    StringLit {
        /// The string token.
        token: Token,
        /// The text between the quotes.
        value: String,
    },
    /// The `null` literal.
    Null {
        /// The `null` token.
        token: Token,
    },
    /// A prefix operation, such as `!x`.
    Prefix {
        /// The operator token.
        token: Token,
        /// The operator text.
        op: String,
        /// The operand.
        rhs: Box<Expression>,
    },
    /// An infix operation, such as `a + b`.
    Infix {
        /// The operator token.
        token: Token,
        /// The left operand.
        lhs: Box<Expression>,
        /// The operator text.
        op: String,
        /// The right operand.
        rhs: Box<Expression>,
    },
    /// A function call, such as `add(1, 2)`.
    Call {
        /// The `(` token that introduced the argument list.
        token: Token,
        /// The expression being called.
        callee: Box<Expression>,
        /// The arguments, in source order.
        arguments: Vec<Expression>,
    },
}

impl Expression {
    /// The source line the expression starts on.
    #[must_use]
    pub fn line(&self) -> usize {
        self.token().line
    }

    /// The literal text of the expression's leading token.
    #[must_use]
    pub fn token_literal(&self) -> &str {
        &self.token().literal
    }

    fn token(&self) -> &Token {
        match self {
            Self::Identifier { token, .. }
            | Self::Number { token, .. }
            | Self::StringLit { token, .. }
            | Self::Null { token }
            | Self::Prefix { token, .. }
            | Self::Infix { token, .. }
            | Self::Call { token, .. } => token,
        }
    }

    /// The binding strength of an infix operator, for parenthesization
    /// during serialization. Mirrors the parser's precedence table.
    fn binding(op: &str) -> u8 {
        match op {
            "==" | "!=" => 1,
            "<" | "<=" | ">" | ">=" => 2,
            "+" | "-" => 3,
            "*" | "/" => 4,
            _ => 0,
        }
    }

    /// Writes an operand, parenthesized if its own binding is too weak for
    /// the surrounding operator. Equal binding on the right side also needs
    /// parentheses since every operator is left-associative.
    fn write_operand(
        f: &mut fmt::Formatter<'_>,
        operand: &Self,
        parent: u8,
        is_rhs: bool,
    ) -> fmt::Result {
        if let Self::Infix { op, .. } = operand {
            let child = Self::binding(op);
            if child < parent || (is_rhs && child == parent) {
                return write!(f, "({operand})");
            }
        }
        write!(f, "{operand}")
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier { value, .. } | Self::Number { value, .. } => write!(f, "{value}"),
            Self::StringLit { value, .. } => write!(f, "\"{value}\""),
            Self::Null { .. } => write!(f, "null"),
            Self::Prefix { op, rhs, .. } => {
                if matches!(rhs.as_ref(), Self::Infix { .. }) {
                    write!(f, "{op}({rhs})")
                } else {
                    write!(f, "{op}{rhs}")
                }
            },
            Self::Infix { lhs, op, rhs, .. } => {
                let parent = Self::binding(op);
                Self::write_operand(f, lhs, parent, false)?;
                write!(f, " {op} ")?;
                Self::write_operand(f, rhs, parent, true)
            },
            Self::Call { callee, arguments, .. } => {
                // A call binds tighter than any operator, so an operator
                // expression in callee position needs its parentheses back.
                if matches!(callee.as_ref(), Self::Infix { .. } | Self::Prefix { .. }) {
                    write!(f, "({callee})")?;
                } else {
                    write!(f, "{callee}")?;
                }
                write!(f, "(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            },
        }
    }
}
