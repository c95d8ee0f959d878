use std::collections::HashMap;

use crate::{
    ast::{Expression, Program},
    error::ParseError,
    interpreter::lexer::{Lexer, Token, TokenKind},
};

/// Binding strength of an operator position, lowest first.
///
/// `parse_expression` folds an infix operator into the tree only while the
/// operator's precedence exceeds the minimum it was called with, which is
/// what makes `1 + 2 * 3` group the product first and equal-precedence
/// chains associate to the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// The entry level; binds nothing.
    Lowest,
    /// `==` and `!=`.
    Equals,
    /// `<`, `<=`, `>`, `>=`.
    LessGreater,
    /// `+` and `-`.
    Sum,
    /// `*` and `/`.
    Product,
    /// Prefix operators such as `!`.
    Prefix,
    /// Call argument lists, keyed on `(`.
    Call,
    /// Index expressions, keyed on `[`. Ranked but not yet parseable; the
    /// language has no container types.
    Index,
}

/// The fixed precedence table. Token kinds absent from the table rank
/// `Lowest` and therefore never extend an expression.
fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::Le | TokenKind::Gt | TokenKind::Ge => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
        TokenKind::LParen => Precedence::Call,
        TokenKind::LBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

type PrefixHandler<'a> = fn(&mut Parser<'a>) -> Option<Expression>;
type InfixHandler<'a> = fn(&mut Parser<'a>, Expression) -> Option<Expression>;

/// The operator-precedence parser.
///
/// Consumes the token stream with two tokens of lookahead (`cur_token`,
/// `peek_token`) and builds the AST by precedence climbing. Each token kind
/// owns at most one prefix handler and at most one infix handler; both
/// tables are built once at construction.
///
/// Parsing is tolerant: a malformed production records a diagnostic and
/// yields an absent node, and parsing continues with the rest of the input.
/// Callers must check [`Parser::errors`] after [`Parser::parse_program`]
/// before trusting the tree.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    pub(crate) cur_token: Token,
    pub(crate) peek_token: Token,
    prefix_handlers: HashMap<TokenKind, PrefixHandler<'a>>,
    infix_handlers: HashMap<TokenKind, InfixHandler<'a>>,
    pub(crate) errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    /// Creates a parser over the given token stream and primes the two
    /// lookahead slots.
    #[must_use]
    pub fn new(lexer: Lexer<'a>) -> Self {
        let mut prefix_handlers: HashMap<TokenKind, PrefixHandler<'a>> = HashMap::new();
        prefix_handlers.insert(TokenKind::Identifier, Self::parse_identifier);
        prefix_handlers.insert(TokenKind::Number, Self::parse_number_literal);
        prefix_handlers.insert(TokenKind::String, Self::parse_string_literal);
        prefix_handlers.insert(TokenKind::Null, Self::parse_null_literal);
        prefix_handlers.insert(TokenKind::Bang, Self::parse_prefix_expression);
        prefix_handlers.insert(TokenKind::LParen, Self::parse_grouped_expression);

        let mut infix_handlers: HashMap<TokenKind, InfixHandler<'a>> = HashMap::new();
        for kind in [
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Asterisk,
            TokenKind::Slash,
            TokenKind::Eq,
            TokenKind::NotEq,
            TokenKind::Lt,
            TokenKind::Le,
            TokenKind::Gt,
            TokenKind::Ge,
        ] {
            infix_handlers.insert(kind, Self::parse_infix_expression);
        }
        infix_handlers.insert(TokenKind::LParen, Self::parse_call_expression);

        let placeholder = Token { line: 0, kind: TokenKind::Eof, literal: String::new() };
        let mut parser = Self {
            lexer,
            cur_token: placeholder.clone(),
            peek_token: placeholder,
            prefix_handlers,
            infix_handlers,
            errors: Vec::new(),
        };
        parser.next_token();
        parser.next_token();
        parser
    }

    /// Parses the whole input into a [`Program`]. Never fails outright;
    /// check [`Parser::errors`] afterwards.
    ///
    /// Stray statement terminators between statements (blank lines,
    /// doubled semicolons) are skipped.
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();
        while !self.cur_is(TokenKind::Eof) {
            if self.cur_is(TokenKind::Semicolon) {
                self.next_token();
                continue;
            }
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.next_token();
        }
        Program { statements }
    }

    /// The diagnostics collected so far, in source order.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Parses an expression at the given minimum binding strength.
    ///
    /// Looks up the prefix handler for the current token to obtain a left
    /// subtree, then repeatedly folds infix operators into it while the
    /// next token is not a statement terminator, binds tighter than
    /// `min_precedence`, and has an infix handler.
    pub(crate) fn parse_expression(&mut self, min_precedence: Precedence) -> Option<Expression> {
        let Some(prefix) = self.prefix_handlers.get(&self.cur_token.kind).copied() else {
            self.errors.push(ParseError::NoPrefixHandler {
                kind: self.cur_token.kind.to_string(),
                line: self.cur_token.line,
            });
            return None;
        };
        let mut lhs = prefix(self)?;

        while !self.peek_is(TokenKind::Semicolon)
            && min_precedence < precedence_of(self.peek_token.kind)
        {
            let Some(infix) = self.infix_handlers.get(&self.peek_token.kind).copied() else {
                break;
            };
            self.next_token();
            lhs = infix(self, lhs)?;
        }
        Some(lhs)
    }

    fn parse_identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier {
            value: self.cur_token.literal.clone(),
            token: self.cur_token.clone(),
        })
    }

    fn parse_number_literal(&mut self) -> Option<Expression> {
        Some(Expression::Number {
            value: self.cur_token.literal.clone(),
            token: self.cur_token.clone(),
        })
    }

    fn parse_string_literal(&mut self) -> Option<Expression> {
        Some(Expression::StringLit {
            value: self.cur_token.literal.clone(),
            token: self.cur_token.clone(),
        })
    }

    fn parse_null_literal(&mut self) -> Option<Expression> {
        Some(Expression::Null { token: self.cur_token.clone() })
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let op = token.literal.clone();
        self.next_token();
        let rhs = Box::new(self.parse_expression(Precedence::Prefix)?);
        Some(Expression::Prefix { token, op, rhs })
    }

    /// `( <expression> )` — grouping only; the parentheses leave no node
    /// behind, they just override precedence.
    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expression = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(expression)
    }

    fn parse_infix_expression(&mut self, lhs: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        let op = token.literal.clone();
        let precedence = precedence_of(token.kind);
        self.next_token();
        let rhs = Box::new(self.parse_expression(precedence)?);
        Some(Expression::Infix { token, lhs: Box::new(lhs), op, rhs })
    }

    /// The infix handler keyed on `(`: the left subtree becomes the callee
    /// and a comma-separated argument list follows. Empty argument lists
    /// are legal.
    fn parse_call_expression(&mut self, callee: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        let arguments = self.parse_expression_list(TokenKind::RParen)?;
        Some(Expression::Call { token, callee: Box::new(callee), arguments })
    }

    fn parse_expression_list(&mut self, close: TokenKind) -> Option<Vec<Expression>> {
        if self.peek_is(close) {
            self.next_token();
            return Some(Vec::new());
        }
        self.next_token();
        let mut expressions = vec![self.parse_expression(Precedence::Lowest)?];
        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            expressions.push(self.parse_expression(Precedence::Lowest)?);
        }
        if !self.expect_peek(close) {
            return None;
        }
        Some(expressions)
    }

    pub(crate) fn next_token(&mut self) {
        self.cur_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    pub(crate) fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur_token.kind == kind
    }

    pub(crate) fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    /// Advances past the next token if it has the expected kind. Otherwise
    /// records a mismatch diagnostic and leaves the stream alone; the
    /// current production aborts while the parser continues with
    /// subsequent input.
    pub(crate) fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_token.kind == kind {
            self.next_token();
            true
        } else {
            self.errors.push(ParseError::UnexpectedToken {
                expected: kind.to_string(),
                found: self.peek_token.kind.to_string(),
                line: self.peek_token.line,
            });
            false
        }
    }
}
