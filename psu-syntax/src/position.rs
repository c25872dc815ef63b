use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Default, Serialize)]
pub struct BytePos(pub u32);

impl BytePos {
    pub fn shift(self, ch: char) -> Self {
        BytePos(self.0 + ch.len_utf8() as u32)
    }

    pub fn offset(self) -> usize {
        self.0 as usize
    }
}

/// Source line, 1-based.
pub type Line = u32;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Span {
    pub start: BytePos,
    pub end: BytePos,
    pub line: Line,
}

impl Span {
    pub fn new(start: u32, end: u32, line: Line) -> Self {
        Span {
            start: BytePos(start),
            end: BytePos(end),
            line,
        }
    }

    pub fn union_span(a: Self, b: Self) -> Self {
        use std::cmp;

        Span {
            start: cmp::min(a.start, b.start),
            end: cmp::max(a.end, b.end),
            line: cmp::min(a.line, b.line),
        }
    }

    pub fn union<A, B>(a: &WithSpan<A>, b: &WithSpan<B>) -> Self {
        Self::union_span(a.into(), b.into())
    }

    /// The source text under this span, with line breaks escaped.
    pub fn lexeme(&self, source: &str) -> String {
        source
            .get(self.start.offset()..self.end.offset())
            .unwrap_or_default()
            .replace('\n', "\\n")
    }
}

impl<T> From<WithSpan<T>> for Span {
    fn from(with_span: WithSpan<T>) -> Span {
        with_span.span
    }
}

impl<T> From<&WithSpan<T>> for Span {
    fn from(with_span: &WithSpan<T>) -> Span {
        with_span.span
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct WithSpan<T> {
    pub value: T,
    pub span: Span,
}

impl<T> WithSpan<T> {
    pub const fn new(value: T, span: Span) -> Self {
        WithSpan { value, span }
    }

    pub const fn as_ref(&self) -> WithSpan<&T> {
        WithSpan {
            span: self.span,
            value: &self.value,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    Scan,
    Parse,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::Scan => write!(f, "Scan Error"),
            DiagnosticKind::Parse => write!(f, "Parse Error"),
        }
    }
}

/// A front end failure, reported once and already recovered from.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[Line {line}] {kind} at '{lexeme}': {message}")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub line: Line,
    pub lexeme: String,
    pub message: String,
}
