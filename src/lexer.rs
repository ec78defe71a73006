use crate::{
    diagnostics::{EvalError, EvalErrorKind, SourceSpan},
    evaluator::Operator,
    validator::END_MARKER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Decimal,
    Hexadecimal,
}

/// A lexed number together with the span of expression it consumed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericLiteral {
    pub value: f64,
    pub radix: Radix,
    pub span: SourceSpan,
}

/// Lexes one numeric literal starting at `cursor` and returns it with the
/// cursor just past the consumed text.
///
/// Decimal literals take an optional sign, integer digits and an optional
/// fraction. Hexadecimal literals start with `0x`/`0X` and have neither sign
/// nor fraction. Spaces inside a run of digits are skipped. A space at
/// `cursor` itself is not: it defeats sign and hex-prefix detection.
///
/// Failures are reported at `cursor`. The cursor is a byte offset, which
/// equals the character offset for any expression that passed validation.
pub fn lex_number(expression: &str, cursor: usize) -> Result<(NumericLiteral, usize), EvalError> {
    NumberLexer::new(expression, cursor).lex()
}

struct NumberLexer<'a> {
    source: &'a [u8],
    start: usize,
    current: usize,
}

impl<'a> NumberLexer<'a> {
    fn new(source: &'a str, start: usize) -> Self {
        Self {
            source: source.as_bytes(),
            start,
            current: start,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.source.get(self.current).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.source.get(self.current + 1).copied()
    }

    fn bump(&mut self) {
        self.current += 1;
    }

    fn invalid(&self) -> EvalError {
        EvalError::new(EvalErrorKind::InvalidNumber, self.start)
    }

    fn lex(mut self) -> Result<(NumericLiteral, usize), EvalError> {
        let hex_prefix = self.peek() == Some(b'0') && matches!(self.peek_next(), Some(b'x' | b'X'));
        let (value, radix) = if hex_prefix {
            (self.hexadecimal()?, Radix::Hexadecimal)
        } else {
            (self.decimal()?, Radix::Decimal)
        };
        let literal = NumericLiteral {
            value,
            radix,
            span: SourceSpan::new(self.start, self.current),
        };
        Ok((literal, self.current))
    }

    fn hexadecimal(&mut self) -> Result<f64, EvalError> {
        self.bump();
        self.bump();
        if self.peek() == Some(b'.') {
            return Err(self.invalid());
        }

        let mut value = 0.0;
        while let Some(byte) = self.peek() {
            if byte == b' ' {
                self.bump();
                continue;
            }
            let Some(digit) = char::from(byte).to_digit(16) else {
                break;
            };
            value = value * 16.0 + f64::from(digit);
            self.bump();
        }

        // nothing past the prefix
        if self.current <= self.start + 2 {
            return Err(self.invalid());
        }
        Ok(value)
    }

    fn decimal(&mut self) -> Result<f64, EvalError> {
        let negative = match self.peek() {
            Some(b'-') => {
                self.bump();
                true
            }
            Some(b'+') => {
                self.bump();
                false
            }
            _ => false,
        };

        let mut value = 0.0;
        while let Some(byte) = self.peek().filter(|&b| !is_terminator(b) && b != b'.') {
            if let Some(digit) = self.decimal_digit(byte)? {
                value = value * 10.0 + digit;
            }
        }

        if self.peek() == Some(b'.') {
            self.bump();
            let mut place = 0.1;
            while let Some(byte) = self.peek().filter(|&b| !is_terminator(b)) {
                if let Some(digit) = self.decimal_digit(byte)? {
                    value += digit * place;
                    place *= 0.1;
                }
            }
        }

        if self.consumed_nothing() {
            return Err(self.invalid());
        }
        Ok(if negative { -value } else { value })
    }

    /// True when the cursor has not moved, or moved only past a lone sign.
    ///
    /// Spaces and a bare `.` count as consumed text, so `"- ="` and `".="`
    /// lex as zero.
    fn consumed_nothing(&self) -> bool {
        let lone_sign = self.current == self.start + 1
            && matches!(self.source.get(self.start), Some(b'+' | b'-'));
        self.current == self.start || lone_sign
    }

    /// Consumes a digit or a space; anything else ends the literal in error.
    fn decimal_digit(&mut self, byte: u8) -> Result<Option<f64>, EvalError> {
        match byte {
            b' ' => {
                self.bump();
                Ok(None)
            }
            b'0'..=b'9' => {
                self.bump();
                Ok(Some(f64::from(byte - b'0')))
            }
            _ => Err(self.invalid()),
        }
    }
}

fn is_terminator(byte: u8) -> bool {
    char::from(byte) == END_MARKER || Operator::from_symbol(byte).is_some()
}
