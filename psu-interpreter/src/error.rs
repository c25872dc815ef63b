use psu_syntax::position::{Line, Span};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeErrorKind {
    #[error("undefined variable.")]
    UndefinedVariable,
    #[error("{0}")]
    TypeMismatch(String),
    #[error("cannot divide numbers by 0.")]
    DivisionByZero,
    #[error("cannot modulus non-integers.")]
    NonIntegerModulus,
    #[error("only numbers allowed for increments/decrements.")]
    NonNumericStep,
    #[error("loop exceeded {0} iterations.")]
    IterationLimit(u64),
    #[error("failed to write output: {0}")]
    Output(String),
}

/// A failure while evaluating one line. Aborts the rest of that line only.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[Line {line}] Runtime Error at '{lexeme}': {kind}")]
pub struct RuntimeError {
    pub line: Line,
    pub lexeme: String,
    pub kind: RuntimeErrorKind,
}

impl RuntimeError {
    pub fn new(span: Span, lexeme: impl ToString, kind: RuntimeErrorKind) -> Self {
        Self {
            line: span.line,
            lexeme: lexeme.to_string(),
            kind,
        }
    }

    pub fn undefined_variable(span: Span, name: &str) -> Self {
        Self::new(span, name, RuntimeErrorKind::UndefinedVariable)
    }

    pub fn type_mismatch(span: Span, lexeme: impl ToString, message: String) -> Self {
        Self::new(span, lexeme, RuntimeErrorKind::TypeMismatch(message))
    }
}
