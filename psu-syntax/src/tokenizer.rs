use super::token::{ScanError, Token};
use std::iter::Peekable;
use std::str::Chars;
use crate::position::*;

struct Scanner<'a> {
    current_position: BytePos,
    current_line: Line,
    it: Peekable<Chars<'a>>,
}

impl<'a> Scanner<'a> {
    fn new(buf: &'a str, first_line: Line) -> Scanner<'a> {
        Scanner {
            current_position: BytePos::default(),
            current_line: first_line,
            it: buf.chars().peekable(),
        }
    }

    fn next(&mut self) -> Option<char> {
        let next = self.it.next();
        if let Some(c) = next {
            self.current_position = self.current_position.shift(c);
            if c == '\n' {
                self.current_line += 1;
            }
        }
        next
    }

    fn peek(&mut self) -> Option<&char> {
        self.it.peek()
    }

    // Consume next char if it matches
    fn consume_if<F>(&mut self, x: F) -> bool
    where
        F: Fn(char) -> bool,
    {
        match self.peek() {
            Some(&ch) if x(ch) => {
                self.next();
                true
            }
            _ => false,
        }
    }

    fn consume_while<F>(&mut self, x: F) -> Vec<char>
    where
        F: Fn(char) -> bool,
    {
        let mut chars: Vec<char> = Vec::new();
        while let Some(&ch) = self.peek() {
            if x(ch) {
                self.next();
                chars.push(ch);
            } else {
                break;
            }
        }
        chars
    }
}

struct Lexer<'a> {
    it: Scanner<'a>,
}

impl<'a> Lexer<'a> {
    fn new(buf: &'a str, first_line: Line) -> Lexer<'a> {
        Lexer {
            it: Scanner::new(buf, first_line),
        }
    }

    fn match_token(&mut self, ch: char) -> Option<Token> {
        match ch {
            '=' => Some(self.either('=', Token::EqualEqual, Token::Error(ScanError::UnexpectedCharacter('=')))),
            '!' => Some(self.either('=', Token::BangEqual, Token::Bang)),
            '<' => Some(self.either('=', Token::LessEqual, Token::Less)),
            '>' => Some(self.either('=', Token::GreaterEqual, Token::Greater)),
            ' ' | '\t' | '\r' => None,
            '\n' => Some(Token::Newline),
            '"' => {
                let string: String = self.it.consume_while(|ch| ch != '"').into_iter().collect();
                // Skip last "
                match self.it.next() {
                    None => Some(Token::Error(ScanError::UnterminatedString)),
                    _ => Some(Token::String(string)),
                }
            }
            x if x.is_ascii_digit() => Some(self.number(x)),
            x if x.is_ascii_alphabetic() => Some(self.identifier(x)),
            '.' => Some(Token::Dot),
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            '{' => Some(Token::LeftBrace),
            '}' => Some(Token::RightBrace),
            ',' => Some(Token::Comma),
            '-' => Some(Token::Minus),
            '+' => Some(Token::Plus),
            ';' => Some(Token::Semicolon),
            '*' => Some(Token::Star),
            '/' => Some(Token::Slash),
            '%' => Some(Token::Percent),
            c => Some(Token::Error(ScanError::UnexpectedCharacter(c))),
        }
    }

    fn either(&mut self, to_match: char, matched: Token, unmatched: Token) -> Token {
        if self.it.consume_if(|ch| ch == to_match) {
            matched
        } else {
            unmatched
        }
    }

    fn identifier(&mut self, x: char) -> Token {
        let mut identifier = String::new();
        identifier.push(x);
        let rest: String = self
            .it
            .consume_while(|a| a.is_ascii_alphanumeric())
            .into_iter()
            .collect();
        identifier.push_str(rest.as_str());
        match keyword(&identifier) {
            None => Token::Identifier(identifier),
            Some(token) => token,
        }
    }

    // A decimal point is taken after every digit, so `1.2.3` is consumed whole
    // and only rejected when converted.
    fn number(&mut self, x: char) -> Token {
        let mut number = String::new();
        number.push(x);
        if self.it.consume_if(|ch| ch == '.') {
            number.push('.');
        }
        while let Some(&ch) = self.it.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            self.it.next();
            number.push(ch);
            if self.it.consume_if(|ch| ch == '.') {
                number.push('.');
            }
        }
        match number.parse::<f64>() {
            Ok(value) => Token::Number(value),
            Err(_) => Token::Error(ScanError::MalformedNumber(number)),
        }
    }

    fn tokenize_with_context(&mut self) -> Vec<WithSpan<Token>> {
        let mut tokens: Vec<WithSpan<Token>> = Vec::new();
        loop {
            let initial_position = self.it.current_position;
            let initial_line = self.it.current_line;
            let ch = match self.it.next() {
                None => break,
                Some(c) => c,
            };
            if let Some(token) = self.match_token(ch) {
                let span = Span { start: initial_position, end: self.it.current_position, line: initial_line };
                tokens.push(WithSpan::new(token, span));
            }
        }
        let end = self.it.current_position;
        tokens.push(WithSpan::new(Token::Eof, Span { start: end, end, line: self.it.current_line }));
        tokens
    }
}

fn keyword(identifier: &str) -> Option<Token> {
    let token = match identifier {
        "and" => Token::And,
        "as" => Token::As,
        "assume" => Token::Assume,
        "by" => Token::By,
        "class" => Token::Class,
        "decrement" => Token::Decrement,
        "do" => Token::Do,
        "else" => Token::Else,
        "empty" => Token::Empty,
        "false" => Token::False,
        "for" => Token::For,
        "if" => Token::If,
        "increment" => Token::Increment,
        "or" => Token::Or,
        "parent" => Token::Parent,
        "procedure" => Token::Procedure,
        "return" => Token::Return,
        "say" => Token::Say,
        "set" => Token::Set,
        "then" => Token::Then,
        "this" => Token::This,
        "to" => Token::To,
        "true" => Token::True,
        "while" => Token::While,
        _ => return None,
    };
    Some(token)
}

/// Scan `buf` into a materialized token list ending in a single `Eof`.
/// Lines are numbered from `first_line`.
pub fn tokenize_with_context(buf: &str, first_line: Line) -> Vec<WithSpan<Token>> {
    let mut t = Lexer::new(buf, first_line);
    t.tokenize_with_context()
}
