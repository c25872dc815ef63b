use crate::ast::Identifier;
use crate::position::{Diagnostic, DiagnosticKind, Span, WithSpan};
use crate::token::{Token, TokenKind};

/// Deepest nesting of expressions and statements the parser accepts.
pub const MAX_DEPTH: usize = 256;

/// Cursor over a materialized token list that collects diagnostics.
///
/// Parse functions return `Err(())` once the diagnostic has been recorded
/// here; the statement parser decides where to resume.
pub struct Parser<'a> {
    tokens: &'a [WithSpan<Token>],
    source: &'a str,
    cursor: usize,
    depth: usize,
    abandoned: bool,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    /// `tokens` must end with `Token::Eof`.
    pub fn new(tokens: &'a [WithSpan<Token>], source: &'a str) -> Self {
        debug_assert!(matches!(tokens.last(), Some(WithSpan { value: Token::Eof, .. })));
        Parser {
            tokens,
            source,
            cursor: 0,
            depth: 0,
            abandoned: false,
            diagnostics: Vec::new(),
        }
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Go one level deeper. Past `MAX_DEPTH` the rest of the source is
    /// abandoned: one diagnostic is recorded and the cursor jumps to `Eof`.
    pub fn nest(&mut self) -> Result<(), ()> {
        if self.depth >= MAX_DEPTH {
            let token = self.peek_token();
            self.error(&format!("Nested more than {} levels deep", MAX_DEPTH), token.span);
            self.abandoned = true;
            self.cursor = self.tokens.len() - 1;
            return Err(());
        }
        self.depth += 1;
        Ok(())
    }

    pub fn restore_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    pub fn is_eof(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub fn peek(&self) -> TokenKind {
        self.peek_token().into()
    }

    pub fn peek_token(&self) -> &'a WithSpan<Token> {
        let tokens = self.tokens;
        &tokens[self.cursor.min(tokens.len() - 1)]
    }

    pub fn check(&self, match_token: TokenKind) -> bool {
        self.peek() == match_token
    }

    /// Take the current token. Never moves past `Eof`.
    pub fn advance(&mut self) -> &'a WithSpan<Token> {
        let token = self.peek_token();
        if token.value != Token::Eof {
            self.cursor += 1;
        }
        token
    }

    pub fn error(&mut self, message: &str, span: Span) {
        if self.abandoned {
            return;
        }
        self.diagnostics.push(Diagnostic {
            kind: DiagnosticKind::Parse,
            line: span.line,
            lexeme: span.lexeme(self.source),
            message: message.to_string(),
        });
    }

    /// Consume the current token if it is `expected`. A mismatch is reported
    /// at the current token, which is left in place.
    pub fn expect(&mut self, expected: TokenKind) -> Result<&'a WithSpan<Token>, ()> {
        let token = self.peek_token();
        if TokenKind::from(token) == expected {
            Ok(self.advance())
        } else {
            self.error(&format!("Expected {} got {}", expected, token.value), token.span);
            Err(())
        }
    }

    pub fn expect_identifier(&mut self) -> Result<WithSpan<Identifier>, ()> {
        let token = self.peek_token();
        match &token.value {
            Token::Identifier(name) => {
                self.advance();
                Ok(WithSpan::new(name.clone(), token.span))
            }
            other => {
                self.error(&format!("Expected identifier got {}", other), token.span);
                Err(())
            }
        }
    }

    pub fn optionally(&mut self, expected: TokenKind) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Panic mode: discard tokens until just past a newline, or up to a token
    /// that starts a statement. `start` is where the failed declaration began;
    /// at least one token is dropped when nothing was consumed since.
    pub fn synchronize(&mut self, start: usize) {
        self.recover(start, false);
    }

    /// Like `synchronize`, but also stops in front of the `}` closing the
    /// enclosing block.
    pub fn synchronize_block(&mut self, start: usize) {
        self.recover(start, true);
    }

    fn recover(&mut self, start: usize, in_block: bool) {
        if self.cursor == start && !self.is_eof() && self.advance().value == Token::Newline {
            return;
        }
        loop {
            match self.peek() {
                TokenKind::Newline => {
                    self.advance();
                    return;
                }
                TokenKind::RightBrace if in_block => return,
                kind if kind.starts_statement() => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}
