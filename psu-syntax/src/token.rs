use std::fmt::Display;

use serde::Serialize;
use thiserror::Error;

/// Anomalies found while scanning. They travel through the token stream as
/// `Token::Error` so the front end decides whether to report or drop them.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum ScanError {
    #[error("unterminated string.")]
    UnterminatedString,
    #[error("unexpected character '{0}'.")]
    UnexpectedCharacter(char),
    #[error("malformed number '{0}'.")]
    MalformedNumber(String),
}

#[derive(PartialEq, Debug, Clone, Serialize)]
pub enum Token {
    // Single-character tokens.
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,
    Percent,

    // One or two character tokens.
    Bang,
    BangEqual,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals.
    Identifier(String),
    String(String),
    Number(f64),

    // Keywords.
    And,
    As,
    Assume,
    By,
    Class,
    Decrement,
    Do,
    Else,
    Empty,
    False,
    For,
    If,
    Increment,
    Or,
    Parent,
    Procedure,
    Return,
    Say,
    Set,
    Then,
    This,
    To,
    True,
    While,

    // Other.
    Newline,
    Eof,
    Error(ScanError),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    // Single-character tokens.
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,
    Percent,

    // One or two character tokens.
    Bang,
    BangEqual,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals.
    Identifier,
    String,
    Number,

    // Keywords.
    And,
    As,
    Assume,
    By,
    Class,
    Decrement,
    Do,
    Else,
    Empty,
    False,
    For,
    If,
    Increment,
    Or,
    Parent,
    Procedure,
    Return,
    Say,
    Set,
    Then,
    This,
    To,
    True,
    While,

    // Other.
    Newline,
    Eof,
    Error,
}

impl TokenKind {
    /// Tokens that conventionally begin a statement; panic mode stops here.
    pub fn starts_statement(self) -> bool {
        matches!(
            self,
            TokenKind::Set
                | TokenKind::If
                | TokenKind::Say
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Class
                | TokenKind::Procedure
                | TokenKind::LeftBrace
                | TokenKind::Eof
        )
    }

    /// Keywords that are part of the language but have no implementation.
    pub fn is_reserved(self) -> bool {
        matches!(
            self,
            TokenKind::As
                | TokenKind::Assume
                | TokenKind::Class
                | TokenKind::For
                | TokenKind::Parent
                | TokenKind::Procedure
                | TokenKind::Return
                | TokenKind::This
        )
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind: TokenKind = self.into();
        write!(f, "{}", kind)
    }
}

impl From<&crate::position::WithSpan<Token>> for TokenKind {
    fn from(token_with_span: &crate::position::WithSpan<Token>) -> Self {
        TokenKind::from(&token_with_span.value)
    }
}

impl From<&Token> for TokenKind {
    fn from(token: &Token) -> Self {
        match token {
            Token::LeftParen => TokenKind::LeftParen,
            Token::RightParen => TokenKind::RightParen,
            Token::LeftBrace => TokenKind::LeftBrace,
            Token::RightBrace => TokenKind::RightBrace,
            Token::Comma => TokenKind::Comma,
            Token::Dot => TokenKind::Dot,
            Token::Minus => TokenKind::Minus,
            Token::Plus => TokenKind::Plus,
            Token::Semicolon => TokenKind::Semicolon,
            Token::Slash => TokenKind::Slash,
            Token::Star => TokenKind::Star,
            Token::Percent => TokenKind::Percent,
            Token::Bang => TokenKind::Bang,
            Token::BangEqual => TokenKind::BangEqual,
            Token::EqualEqual => TokenKind::EqualEqual,
            Token::Greater => TokenKind::Greater,
            Token::GreaterEqual => TokenKind::GreaterEqual,
            Token::Less => TokenKind::Less,
            Token::LessEqual => TokenKind::LessEqual,
            Token::Identifier(_) => TokenKind::Identifier,
            Token::String(_) => TokenKind::String,
            Token::Number(_) => TokenKind::Number,
            Token::And => TokenKind::And,
            Token::As => TokenKind::As,
            Token::Assume => TokenKind::Assume,
            Token::By => TokenKind::By,
            Token::Class => TokenKind::Class,
            Token::Decrement => TokenKind::Decrement,
            Token::Do => TokenKind::Do,
            Token::Else => TokenKind::Else,
            Token::Empty => TokenKind::Empty,
            Token::False => TokenKind::False,
            Token::For => TokenKind::For,
            Token::If => TokenKind::If,
            Token::Increment => TokenKind::Increment,
            Token::Or => TokenKind::Or,
            Token::Parent => TokenKind::Parent,
            Token::Procedure => TokenKind::Procedure,
            Token::Return => TokenKind::Return,
            Token::Say => TokenKind::Say,
            Token::Set => TokenKind::Set,
            Token::Then => TokenKind::Then,
            Token::This => TokenKind::This,
            Token::To => TokenKind::To,
            Token::True => TokenKind::True,
            Token::While => TokenKind::While,
            Token::Newline => TokenKind::Newline,
            Token::Eof => TokenKind::Eof,
            Token::Error(_) => TokenKind::Error,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Minus => "'-'",
            TokenKind::Plus => "'+'",
            TokenKind::Semicolon => "';'",
            TokenKind::Slash => "'/'",
            TokenKind::Star => "'*'",
            TokenKind::Percent => "'%'",
            TokenKind::Bang => "'!'",
            TokenKind::BangEqual => "'!='",
            TokenKind::EqualEqual => "'=='",
            TokenKind::Greater => "'>'",
            TokenKind::GreaterEqual => "'>='",
            TokenKind::Less => "'<'",
            TokenKind::LessEqual => "'<='",
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::And => "'and'",
            TokenKind::As => "'as'",
            TokenKind::Assume => "'assume'",
            TokenKind::By => "'by'",
            TokenKind::Class => "'class'",
            TokenKind::Decrement => "'decrement'",
            TokenKind::Do => "'do'",
            TokenKind::Else => "'else'",
            TokenKind::Empty => "'empty'",
            TokenKind::False => "'false'",
            TokenKind::For => "'for'",
            TokenKind::If => "'if'",
            TokenKind::Increment => "'increment'",
            TokenKind::Or => "'or'",
            TokenKind::Parent => "'parent'",
            TokenKind::Procedure => "'procedure'",
            TokenKind::Return => "'return'",
            TokenKind::Say => "'say'",
            TokenKind::Set => "'set'",
            TokenKind::Then => "'then'",
            TokenKind::This => "'this'",
            TokenKind::To => "'to'",
            TokenKind::True => "'true'",
            TokenKind::While => "'while'",
            TokenKind::Newline => "<newline>",
            TokenKind::Eof => "<EOF>",
            TokenKind::Error => "<Error>",
        })
    }
}
