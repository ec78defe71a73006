use hexcalc::{
    diagnostics::{EvalError, EvalErrorKind},
    evaluator::evaluate,
    lexer::{lex_number, Radix},
    validator::validate,
    SourceSpan,
};

const TOLERANCE: f64 = 1e-9;

fn eval(source: &str) -> f64 {
    evaluate(source).expect("evaluation should succeed")
}

fn eval_error(source: &str) -> EvalError {
    match evaluate(source) {
        Ok(value) => panic!("expected error for {source:?}, received value {value}"),
        Err(err) => err,
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, found {actual}"
    );
}

fn assert_error(source: &str, kind: EvalErrorKind, position: usize) {
    assert_eq!(eval_error(source), EvalError::new(kind, position), "{source:?}");
}

#[test]
fn folds_left_to_right_without_precedence() {
    assert_close(eval("2+3*4="), 20.0);
    assert_close(eval("10-4/2="), 3.0);
    assert_close(eval("8/3="), 8.0 / 3.0);
}

#[test]
fn leading_minus_is_a_sign() {
    assert_close(eval("-5+3="), -2.0);
    assert_close(eval("- 5="), -5.0);
}

#[test]
fn mixes_hex_and_decimal_literals() {
    assert_close(eval("0xFF+1="), 256.0);
    assert_close(eval("0X1a*0.5="), 13.0);
    assert_close(eval("3.25*4="), 13.0);
    assert_close(eval(".5+.5="), 1.0);
}

#[test]
fn spaces_around_operators_and_inside_literals() {
    assert_close(eval("1 + 2="), 3.0);
    assert_close(eval("1 +2="), 3.0);
    assert_close(eval("1+ 2 ="), 3.0);
    assert_close(eval("1 2 3="), 123.0);
    assert_close(eval("1+2 3="), 24.0);
    assert_close(eval("0x1F 2="), 498.0);
}

#[test]
fn division_by_zero_points_past_divisor() {
    assert_error("10/0=", EvalErrorKind::DivisionByZero, 4);
    assert_error("5 / 0 =", EvalErrorKind::DivisionByZero, 6);
    assert_error("10/0.00000000001=", EvalErrorKind::DivisionByZero, 16);
    assert_close(eval("1/0.001="), 1000.0);
}

#[test]
fn rejects_malformed_lines() {
    assert_error("", EvalErrorKind::EmptyExpression, 0);
    assert_error("1+2", EvalErrorKind::InvalidChar, 3);
    assert_error("1+2&=", EvalErrorKind::InvalidChar, 3);
    assert_error("1=2=", EvalErrorKind::InvalidChar, 3);
    assert_error("1=2", EvalErrorKind::InvalidChar, 1);
    assert_error("1+\u{e9}=", EvalErrorKind::InvalidChar, 2);
}

#[test]
fn end_marker_alone_is_empty() {
    assert_error("=", EvalErrorKind::EmptyExpression, 0);
}

#[test]
fn trailing_operator_is_reported_at_the_operator() {
    assert_error("1+2+=", EvalErrorKind::TrailingOperator, 3);
    assert_error("1+=", EvalErrorKind::TrailingOperator, 1);
}

#[test]
fn space_before_end_marker_after_operator_is_a_bad_number() {
    assert_error("1+ =", EvalErrorKind::InvalidNumber, 3);
    assert_error("   =", EvalErrorKind::InvalidNumber, 3);
}

#[test]
fn misplaced_operators() {
    assert_error("+5=", EvalErrorKind::InvalidOperator, 0);
    assert_error(" -5=", EvalErrorKind::InvalidOperator, 1);
    assert_error("1+-2=", EvalErrorKind::InvalidOperator, 2);
    assert_error("1**2=", EvalErrorKind::InvalidOperator, 2);
    assert_error("0x10g=", EvalErrorKind::InvalidOperator, 4);
}

#[test]
fn bad_numbers_point_at_literal_start() {
    assert_error("0x1.5=", EvalErrorKind::InvalidNumber, 0);
    assert_error("0x=", EvalErrorKind::InvalidNumber, 0);
    assert_error("-0x10=", EvalErrorKind::InvalidNumber, 0);
    assert_error("1..5=", EvalErrorKind::InvalidNumber, 0);
    assert_error("1.5e3=", EvalErrorKind::InvalidNumber, 0);
    assert_error("2*1 2a=", EvalErrorKind::InvalidNumber, 2);
    assert_error("-=", EvalErrorKind::InvalidNumber, 0);
}

#[test]
fn literal_without_digits_counts_as_consumed_text() {
    assert_close(eval("0x ="), 0.0);
    assert_close(eval("-.="), 0.0);
    assert_close(eval(".="), 0.0);
    assert_close(eval("5*.="), 0.0);
    assert_close(eval("1+0x  ="), 1.0);
    assert_error("- =", EvalErrorKind::TrailingOperator, 0);
    assert_error("2*+=", EvalErrorKind::InvalidOperator, 2);
}

#[test]
fn missing_operand_is_never_produced() {
    for source in ["", "=", "+=", "*5=", "1+=", "1+ =", "-=", "1 2=", "0x="] {
        if let Err(err) = evaluate(source) {
            assert_ne!(err.kind, EvalErrorKind::MissingOperand, "{source:?}");
        }
    }
}

#[test]
fn validation_verdict_is_stable() {
    for source in ["1+2=", "0xff =", "1+2", "", "1=2=", "a b c=", "1+2&="] {
        assert_eq!(validate(source), validate(source), "{source:?}");
    }
    assert!(validate("0xff * 2 =").is_ok());
    assert!(validate("abc=").is_ok());
}

#[test]
fn lexes_decimal_literals() {
    for (text, expected) in [
        ("0=", 0.0),
        ("42=", 42.0),
        ("+7.5*", 7.5),
        ("-12.5=", -12.5),
        ("0.125=", 0.125),
        ("3.14159=", 3.14159),
        ("1000000/", 1_000_000.0),
        ("5.=", 5.0),
    ] {
        let (literal, _) = lex_number(text, 0).expect("literal should lex");
        assert_eq!(literal.radix, Radix::Decimal);
        assert_close(literal.value, expected);
    }
}

#[test]
fn lexes_hex_literals() {
    for (text, expected) in [
        ("0x0=", 0.0),
        ("0x1F=", 31.0),
        ("0XdeadBEEF=", 3_735_928_559.0),
        ("0xffffffff=", 4_294_967_295.0),
    ] {
        let (literal, _) = lex_number(text, 0).expect("literal should lex");
        assert_eq!(literal.radix, Radix::Hexadecimal);
        assert_eq!(literal.value, expected);
    }
}

#[test]
fn lexer_returns_span_and_next_cursor() {
    let (literal, cursor) = lex_number("1+0x1F=", 2).expect("hex literal");
    assert_eq!(literal.span, SourceSpan::new(2, 6));
    assert_eq!(cursor, 6);

    let (literal, cursor) = lex_number("+7.5*2=", 0).expect("signed literal");
    assert_eq!(literal.span, SourceSpan::new(0, 4));
    assert_eq!(cursor, 4);

    let (literal, cursor) = lex_number("12", 0).expect("literal at end of input");
    assert_close(literal.value, 12.0);
    assert_eq!(cursor, 2);
}

#[test]
fn lexer_does_not_skip_a_leading_space() {
    let (literal, cursor) = lex_number(" 42=", 0).expect("digits after a space");
    assert_close(literal.value, 42.0);
    assert_eq!(cursor, 3);

    let err = lex_number(" 0x1F=", 0).expect_err("hex prefix hidden by space");
    assert_eq!(err, EvalError::new(EvalErrorKind::InvalidNumber, 0));

    let (literal, cursor) = lex_number(" -5=", 0).expect("space before a sign");
    assert_close(literal.value, 0.0);
    assert_eq!(cursor, 1);
}

#[test]
fn lexer_rejects_a_bare_prefix_or_sign() {
    for (text, start) in [
        ("0x=", 0),
        ("1+0x*", 2),
        ("-=", 0),
        ("+*", 0),
        ("=", 0),
        ("2*/", 2),
    ] {
        let err = lex_number(text, start).expect_err("nothing to lex");
        assert_eq!(err, EvalError::new(EvalErrorKind::InvalidNumber, start), "{text:?}");
    }
}

#[test]
fn lexer_rejects_fractional_hex_at_start() {
    let err = lex_number("2*0x.8=", 2).expect_err("fractional hex");
    assert_eq!(err, EvalError::new(EvalErrorKind::InvalidNumber, 2));
}

#[test]
fn error_display_names_kind_and_offset() {
    let err = eval_error("10/0=");
    assert_eq!(err.to_string(), "DivisionByZero at offset 4");
    assert_eq!(
        EvalError::new(EvalErrorKind::InvalidChar, 3).to_string(),
        "InvalidChar at offset 3"
    );
}
