use crate::{
    ast::{Block, Statement},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{Parser, Precedence},
    },
};

impl Parser<'_> {
    /// Dispatches on the current token: `let`, `func` and `return` start
    /// their dedicated productions, anything else is an expression
    /// statement.
    pub(crate) fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur_token.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Func => self.parse_function_define_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// `let <identifier> = <expression> <terminator>`
    fn parse_let_statement(&mut self) -> Option<Statement> {
        let token = self.cur_token.clone();
        if !self.expect_peek(TokenKind::Identifier) {
            return None;
        }
        let name = self.cur_token.literal.clone();
        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::Semicolon) {
            return None;
        }
        Some(Statement::Let { token, name, value })
    }

    /// `func <identifier>(<parameters>) { <statements> }`
    fn parse_function_define_statement(&mut self) -> Option<Statement> {
        let token = self.cur_token.clone();
        if !self.expect_peek(TokenKind::Identifier) {
            return None;
        }
        let name = self.cur_token.literal.clone();
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block();
        Some(Statement::FunctionDefine { token, name, parameters, body })
    }

    /// A possibly-empty, comma-separated identifier list up to `)`.
    fn parse_function_parameters(&mut self) -> Option<Vec<String>> {
        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Some(Vec::new());
        }
        if !self.expect_peek(TokenKind::Identifier) {
            return None;
        }
        let mut parameters = vec![self.cur_token.literal.clone()];
        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            if !self.expect_peek(TokenKind::Identifier) {
                return None;
            }
            parameters.push(self.cur_token.literal.clone());
        }
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(parameters)
    }

    /// Statements up to the matching `}`. Reaching end-of-input first is a
    /// diagnostic, not a failure: the partial block is still returned so
    /// the rest of the tree stays usable.
    fn parse_block(&mut self) -> Block {
        let token = self.cur_token.clone();
        let mut statements = Vec::new();
        self.next_token();
        while !self.cur_is(TokenKind::RBrace) && !self.cur_is(TokenKind::Eof) {
            if self.cur_is(TokenKind::Semicolon) {
                self.next_token();
                continue;
            }
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.next_token();
        }
        if self.cur_is(TokenKind::Eof) {
            self.errors.push(ParseError::UnclosedBlock { line: token.line });
        }
        Block { token, statements }
    }

    /// `return <expression> <terminator>`
    fn parse_return_statement(&mut self) -> Option<Statement> {
        let token = self.cur_token.clone();
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::Semicolon) {
            return None;
        }
        Some(Statement::Return { token, value })
    }

    /// A bare expression; the trailing terminator is optional so the last
    /// line of a file or block needs no newline.
    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let token = self.cur_token.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
        Some(Statement::Expression { token, expression })
    }
}
