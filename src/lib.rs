//! Single-line calculator for decimal and hexadecimal literals.
//! Expressions end with `=`, fold left to right without precedence, and
//! failures point at the offending character.

pub mod diagnostics;
pub mod evaluator;
pub mod lexer;
pub mod repl;
pub mod report;
pub mod validator;

pub use diagnostics::{CalcError, EvalError, EvalErrorKind, SourceSpan};
pub use evaluator::{evaluate, Operator};
pub use lexer::{lex_number, NumericLiteral, Radix};
pub use repl::Repl;
pub use report::{Locale, MessageCatalog, Reporter};
pub use validator::validate;
