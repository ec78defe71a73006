//! Presentation of evaluation outcomes: message text, caret diagnostics and
//! result formatting. The evaluation core never sees any of this.

use indexmap::IndexMap;

use crate::diagnostics::{EvalError, EvalErrorKind};

pub const DEFAULT_PRECISION: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    Chinese,
}

impl Locale {
    fn banner(self) -> &'static [&'static str] {
        match self {
            Locale::English => &[
                "=== Hexadecimal Four-Operation Calculator ===",
                "Decimal (integer and fractional) and hexadecimal (0x prefix) numbers",
                "Operators: +, -, *, / (evaluated left to right)",
            ],
            Locale::Chinese => &[
                "=== 十六进制四则运算计算器 ===",
                "支持十进制(整数和小数)和十六进制(0x开头)数字",
                "支持 +, -, *, / 运算",
            ],
        }
    }

    fn usage(self) -> &'static str {
        match self {
            Locale::English => "End the expression with =, enter q to quit",
            Locale::Chinese => "输入表达式以 = 结束，输入 q 退出",
        }
    }

    fn prompt(self) -> &'static str {
        match self {
            Locale::English => "expression: ",
            Locale::Chinese => "请输入表达式: ",
        }
    }

    fn farewell(self) -> &'static str {
        match self {
            Locale::English => "Goodbye!",
            Locale::Chinese => "感谢使用，再见！",
        }
    }

    fn error_label(self) -> &'static str {
        match self {
            Locale::English => "error: ",
            Locale::Chinese => "错误: ",
        }
    }

    /// Label before the decimal value and the column width it occupies.
    fn result_label(self) -> (&'static str, usize) {
        match self {
            Locale::English => ("result: ", 8),
            Locale::Chinese => ("结果: ", 6),
        }
    }

    fn decimal_note(self) -> &'static str {
        match self {
            Locale::English => "(decimal)",
            Locale::Chinese => "(十进制)",
        }
    }

    fn hex_note(self) -> &'static str {
        match self {
            Locale::English => "(hex integer part)",
            Locale::Chinese => "(十六进制整数部分)",
        }
    }
}

/// Message text for every error kind in one locale.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    messages: IndexMap<EvalErrorKind, String>,
}

impl MessageCatalog {
    pub fn new(locale: Locale) -> Self {
        let messages = EvalErrorKind::ALL
            .into_iter()
            .map(|kind| (kind, default_message(locale, kind).to_string()))
            .collect();
        Self { messages }
    }

    pub fn with_message(mut self, kind: EvalErrorKind, text: impl Into<String>) -> Self {
        self.messages.insert(kind, text.into());
        self
    }

    /// Every kind has an entry: `new` fills the table and overrides only replace.
    pub fn message(&self, kind: EvalErrorKind) -> &str {
        &self.messages[&kind]
    }

    pub fn iter(&self) -> impl Iterator<Item = (EvalErrorKind, &str)> {
        self.messages.iter().map(|(kind, text)| (*kind, text.as_str()))
    }
}

fn default_message(locale: Locale, kind: EvalErrorKind) -> &'static str {
    match locale {
        Locale::English => match kind {
            EvalErrorKind::EmptyExpression => "Expression is empty",
            EvalErrorKind::InvalidChar => "Invalid character",
            EvalErrorKind::InvalidNumber => "Invalid number format",
            EvalErrorKind::InvalidOperator => "Operator in an invalid position",
            EvalErrorKind::MissingOperand => "Missing operand",
            EvalErrorKind::TrailingOperator => "Expression cannot end with an operator",
            EvalErrorKind::DivisionByZero => "Division by zero",
        },
        Locale::Chinese => match kind {
            EvalErrorKind::EmptyExpression => "表达式为空",
            EvalErrorKind::InvalidChar => "无效字符",
            EvalErrorKind::InvalidNumber => "无效的数字格式",
            EvalErrorKind::InvalidOperator => "无效的运算符位置",
            EvalErrorKind::MissingOperand => "缺少操作数",
            EvalErrorKind::TrailingOperator => "表达式末尾不能是运算符",
            EvalErrorKind::DivisionByZero => "除以零错误",
        },
    }
}

/// Renders outcomes and shell text for one locale.
#[derive(Debug, Clone)]
pub struct Reporter {
    locale: Locale,
    catalog: MessageCatalog,
    precision: usize,
}

impl Reporter {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            catalog: MessageCatalog::new(locale),
            precision: DEFAULT_PRECISION,
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    pub fn banner(&self) -> String {
        self.locale.banner().join("\n")
    }

    pub fn usage(&self) -> &'static str {
        self.locale.usage()
    }

    pub fn prompt(&self) -> &'static str {
        self.locale.prompt()
    }

    pub fn farewell(&self) -> &'static str {
        self.locale.farewell()
    }

    /// Decimal value on the first line, truncated hexadecimal on the second.
    pub fn render_value(&self, value: f64) -> String {
        let (label, width) = self.locale.result_label();
        format!(
            "{label}{value:.prec$} {decimal}\n{pad}{hex} {hex_note}",
            prec = self.precision,
            decimal = self.locale.decimal_note(),
            pad = " ".repeat(width),
            hex = hex_integer_part(value),
            hex_note = self.locale.hex_note(),
        )
    }

    /// Message, the original line, and a caret under the offending offset.
    pub fn render_error(&self, line: &str, error: &EvalError) -> String {
        format!(
            "{label}{message}\n{line}\n{pad}^",
            label = self.locale.error_label(),
            message = self.catalog.message(error.kind),
            pad = " ".repeat(error.position),
        )
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

/// Integer part of `value` in lowercase hex; negatives print as 64-bit two's complement.
pub fn hex_integer_part(value: f64) -> String {
    format!("0x{:x}", value.trunc() as i64)
}
