use thiserror::Error;

/// Half-open character range within an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpan {
    pub start: usize,
    pub end: usize,
}

impl SourceSpan {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Closed set of failures an evaluation can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvalErrorKind {
    EmptyExpression,
    InvalidChar,
    InvalidNumber,
    InvalidOperator,
    /// Part of the public taxonomy; no evaluation path produces it today.
    MissingOperand,
    TrailingOperator,
    DivisionByZero,
}

impl EvalErrorKind {
    pub const ALL: [EvalErrorKind; 7] = [
        EvalErrorKind::EmptyExpression,
        EvalErrorKind::InvalidChar,
        EvalErrorKind::InvalidNumber,
        EvalErrorKind::InvalidOperator,
        EvalErrorKind::MissingOperand,
        EvalErrorKind::TrailingOperator,
        EvalErrorKind::DivisionByZero,
    ];
}

/// A failed evaluation: what went wrong and the character offset to point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind:?} at offset {position}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub position: usize,
}

impl EvalError {
    pub const fn new(kind: EvalErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

/// Unified error type for the calculator shell and CLI.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("{0}")]
    Eval(#[from] EvalError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

pub type Result<T> = std::result::Result<T, CalcError>;
