use std::fmt;

use crate::{
    diagnostics::{EvalError, EvalErrorKind},
    lexer::{lex_number, NumericLiteral},
    validator::validate,
};

/// Divisors with a smaller magnitude are treated as zero.
pub const DIVISION_EPSILON: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn from_symbol(byte: u8) -> Option<Self> {
        match byte {
            b'+' => Some(Operator::Add),
            b'-' => Some(Operator::Subtract),
            b'*' => Some(Operator::Multiply),
            b'/' => Some(Operator::Divide),
            _ => None,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// `position` is where a division-by-zero is reported: just past the divisor.
    pub fn apply(self, lhs: f64, rhs: f64, position: usize) -> Result<f64, EvalError> {
        match self {
            Operator::Add => Ok(lhs + rhs),
            Operator::Subtract => Ok(lhs - rhs),
            Operator::Multiply => Ok(lhs * rhs),
            Operator::Divide => {
                if rhs.abs() < DIVISION_EPSILON {
                    Err(EvalError::new(EvalErrorKind::DivisionByZero, position))
                } else {
                    Ok(lhs / rhs)
                }
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug)]
enum State {
    ExpectOperand { pending: Operator },
    ApplyOperator { pending: Operator, literal: NumericLiteral },
    ExpectOperatorOrEnd,
    Done,
}

/// Validates `expression` and folds it left to right, without precedence.
///
/// `2+3*4=` is `(2+3)*4`. Every failure is final and carries the character
/// offset to point at.
#[tracing::instrument(level = "debug", ret, err(level = "debug"))]
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    validate(expression)?;
    fold(expression)
}

fn fold(expression: &str) -> Result<f64, EvalError> {
    let bytes = expression.as_bytes();
    // validated: non-empty, ASCII, single end marker in last position
    let end = bytes.len() - 1;
    let mut cursor = 0;
    let mut accumulator = 0.0;
    let mut operands = 0usize;
    let mut state = State::ExpectOperand {
        pending: Operator::Add,
    };

    loop {
        state = match state {
            State::ExpectOperand { .. } if cursor >= end => State::Done,
            State::ExpectOperand { pending } => {
                cursor = skip_spaces(bytes, cursor);
                if let Some(op) = Operator::from_symbol(bytes[cursor]) {
                    let leading_sign = cursor == 0 && op == Operator::Subtract;
                    if !leading_sign {
                        return Err(EvalError::new(EvalErrorKind::InvalidOperator, cursor));
                    }
                }
                let (literal, next) = lex_number(expression, cursor)?;
                cursor = next;
                State::ApplyOperator { pending, literal }
            }
            State::ApplyOperator { pending, literal } => {
                accumulator = pending.apply(accumulator, literal.value, cursor)?;
                operands += 1;
                tracing::trace!(%pending, value = literal.value, accumulator, "applied operator");
                State::ExpectOperatorOrEnd
            }
            State::ExpectOperatorOrEnd => {
                cursor = skip_spaces(bytes, cursor);
                if cursor >= end {
                    State::Done
                } else {
                    let Some(op) = Operator::from_symbol(bytes[cursor]) else {
                        return Err(EvalError::new(EvalErrorKind::InvalidOperator, cursor));
                    };
                    cursor += 1;
                    State::ExpectOperand { pending: op }
                }
            }
            State::Done => break,
        };
    }

    if operands == 0 {
        return Err(EvalError::new(EvalErrorKind::EmptyExpression, 0));
    }
    if let Some(position) = trailing_operator(bytes, end) {
        return Err(EvalError::new(EvalErrorKind::TrailingOperator, position));
    }
    Ok(accumulator)
}

fn skip_spaces(bytes: &[u8], mut cursor: usize) -> usize {
    while bytes.get(cursor) == Some(&b' ') {
        cursor += 1;
    }
    cursor
}

/// Offset of an operator left dangling before the end marker, if any.
fn trailing_operator(bytes: &[u8], end: usize) -> Option<usize> {
    let last = bytes[..end].iter().rposition(|&b| b != b' ')?;
    Operator::from_symbol(bytes[last]).map(|_| last)
}
