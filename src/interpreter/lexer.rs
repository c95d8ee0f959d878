use logos::Logos;

/// Raw token produced by the generated `logos` lexer.
///
/// Every variant carries a pattern; the pattern-less categories the parser
/// needs (`Eof`, `Illegal`) exist only on [`TokenKind`], which the
/// [`Lexer`] wrapper maps into.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\r\f]+")]
#[logos(skip r"//[^\n]*")]
enum RawToken {
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    #[regex(r#""[^"\n]*""#)]
    String,

    #[token("let")]
    Let,
    #[token("func")]
    Func,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("return")]
    Return,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    #[token("=")]
    Assign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("!")]
    Bang,
    #[token("==")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    // Both `;` and a line break terminate a statement, so a newline lexes
    // to the same kind while also bumping the line counter.
    #[token(";")]
    #[token("\n", |lex| { lex.extras.line += 1; })]
    Semicolon,
}

/// The lexical category of a [`Token`].
///
/// This enum defines every token the language recognizes. Kinds carry no
/// data of their own; the matched text travels separately as the token's
/// literal so that downstream phases (most importantly the numeric
/// evaluation policy) can keep working with the verbatim source text.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    /// Identifier tokens; variable or function names such as `x` or `add`.
    Identifier,
    /// Numeric literal tokens, such as `42` or `3.14`. The digits are kept
    /// verbatim; whether a number is treated as an integer or a float is
    /// decided per operation at evaluation time.
    Number,
    /// Double-quoted, single-line string literal tokens.
    String,

    /// `let`
    Let,
    /// `func`
    Func,
    /// `if`
    If,
    /// `else`
    Else,
    /// `return`
    Return,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,

    /// `=`
    Assign,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Asterisk,
    /// `/`
    Slash,
    /// `!`
    Bang,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,

    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// The statement terminator: `;` or a line break.
    Semicolon,

    /// End of input. Produced by the [`Lexer`] wrapper, never by a pattern.
    Eof,
    /// Unrecognized input. Produced by the [`Lexer`] wrapper for anything
    /// the patterns reject.
    Illegal,
}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Identifier => Self::Identifier,
            RawToken::Number => Self::Number,
            RawToken::String => Self::String,
            RawToken::Let => Self::Let,
            RawToken::Func => Self::Func,
            RawToken::If => Self::If,
            RawToken::Else => Self::Else,
            RawToken::Return => Self::Return,
            RawToken::True => Self::True,
            RawToken::False => Self::False,
            RawToken::Null => Self::Null,
            RawToken::Assign => Self::Assign,
            RawToken::Plus => Self::Plus,
            RawToken::Minus => Self::Minus,
            RawToken::Asterisk => Self::Asterisk,
            RawToken::Slash => Self::Slash,
            RawToken::Bang => Self::Bang,
            RawToken::Eq => Self::Eq,
            RawToken::NotEq => Self::NotEq,
            RawToken::Lt => Self::Lt,
            RawToken::Le => Self::Le,
            RawToken::Gt => Self::Gt,
            RawToken::Ge => Self::Ge,
            RawToken::LParen => Self::LParen,
            RawToken::RParen => Self::RParen,
            RawToken::LBrace => Self::LBrace,
            RawToken::RBrace => Self::RBrace,
            RawToken::LBracket => Self::LBracket,
            RawToken::RBracket => Self::RBracket,
            RawToken::Comma => Self::Comma,
            RawToken::Colon => Self::Colon,
            RawToken::Semicolon => Self::Semicolon,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Identifier => "IDENT",
            Self::Number => "NUMBER",
            Self::String => "STRING",
            Self::Let => "let",
            Self::Func => "func",
            Self::If => "if",
            Self::Else => "else",
            Self::Return => "return",
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
            Self::Assign => "=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Asterisk => "*",
            Self::Slash => "/",
            Self::Bang => "!",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::Eof => "EOF",
            Self::Illegal => "ILLEGAL",
        };
        write!(f, "{s}")
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for diagnostics; the newline token's
/// callback increments it.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// A token produced by the [`Lexer`]: a kind, the matched source text, and
/// the line it came from. Tokens are produced once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The source line the token starts on (1-based).
    pub line: usize,
    /// The lexical category.
    pub kind: TokenKind,
    /// The matched text. String literals are stored without their quotes.
    pub literal: String,
}

impl Token {
    fn eof(line: usize) -> Self {
        Self { line, kind: TokenKind::Eof, literal: String::new() }
    }
}

/// Sequential token producer over a source string.
///
/// Wraps the generated `logos` lexer behind the `next_token` interface the
/// parser consumes: every call yields the next [`Token`], and once the
/// input is exhausted every further call yields an `Eof` token.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, RawToken>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over the given source text.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self { inner: RawToken::lexer_with_extras(source, LexerExtras { line: 1 }) }
    }

    /// Produces the next token in the stream.
    ///
    /// Unrecognized input becomes an `Illegal` token rather than an error;
    /// the parser reports it through its normal diagnostics.
    pub fn next_token(&mut self) -> Token {
        match self.inner.next() {
            Some(Ok(raw)) => {
                let slice = self.inner.slice();
                let kind = TokenKind::from(raw);
                let mut line = self.inner.extras.line;
                // A newline terminator belongs to the line it ends, but its
                // callback has already advanced the counter.
                if kind == TokenKind::Semicolon && slice == "\n" {
                    line -= 1;
                }
                let literal = if kind == TokenKind::String {
                    slice[1..slice.len() - 1].to_string()
                } else {
                    slice.to_string()
                };
                Token { line, kind, literal }
            },
            Some(Err(())) => Token {
                line: self.inner.extras.line,
                kind: TokenKind::Illegal,
                literal: self.inner.slice().to_string(),
            },
            None => Token::eof(self.inner.extras.line),
        }
    }
}
