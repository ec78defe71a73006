use crate::diagnostics::{EvalError, EvalErrorKind};

pub const END_MARKER: char = '=';

/// Checks the character set and that exactly one end marker closes the line.
///
/// Offsets are character indices. A missing end marker is reported one past
/// the last character.
pub fn validate(expression: &str) -> Result<(), EvalError> {
    if expression.is_empty() {
        return Err(EvalError::new(EvalErrorKind::EmptyExpression, 0));
    }

    let mut marker: Option<usize> = None;
    let mut len = 0;
    for (idx, ch) in expression.chars().enumerate() {
        len = idx + 1;
        if ch == END_MARKER {
            if marker.is_some() {
                return Err(EvalError::new(EvalErrorKind::InvalidChar, idx));
            }
            marker = Some(idx);
        } else if !is_expression_char(ch) {
            return Err(EvalError::new(EvalErrorKind::InvalidChar, idx));
        }
    }

    match marker {
        None => Err(EvalError::new(EvalErrorKind::InvalidChar, len)),
        Some(idx) if idx + 1 != len => Err(EvalError::new(EvalErrorKind::InvalidChar, idx)),
        Some(_) => Ok(()),
    }
}

fn is_expression_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '*' | '/' | '.' | ' ')
}
