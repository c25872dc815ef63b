use std::fmt::Display;

use psu_syntax::ast::Literal;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    String(String),
    Boolean(bool),
    Empty,
}

impl Value {
    /// Only `empty` and `false` are falsy.
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Value::Empty | Value::Boolean(false))
    }

    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Empty => "empty",
        }
    }

    /// Numeric coercion: numbers are themselves, and strings coerce only when
    /// they are shaped like a number literal (digits with embedded dots).
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::String(s) => parse_number_literal(s.trim()),
            Value::Boolean(_) | Value::Empty => None,
        }
    }

    /// A number value with no fractional part.
    pub fn as_integer(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() && n.fract() == 0.0 => Some(*n),
            _ => None,
        }
    }
}

fn parse_number_literal(text: &str) -> Option<f64> {
    let literal = text.starts_with(|c: char| c.is_ascii_digit())
        && text.chars().all(|c| c.is_ascii_digit() || c == '.');
    if literal {
        text.parse().ok()
    } else {
        None
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Empty => f.write_str("empty"),
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Number(n) => Value::Number(*n),
            Literal::String(s) => Value::String(s.clone()),
            Literal::Boolean(b) => Value::Boolean(*b),
            Literal::Empty => Value::Empty,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Empty.is_truthy());
        assert!(!Value::from(false).is_truthy());
        assert!(Value::from(true).is_truthy());
        assert!(Value::from(0.0).is_truthy());
        assert!(Value::from("").is_truthy());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(14.0).to_string(), "14");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from(-3.0).to_string(), "-3");
        assert_eq!(Value::from("hi there").to_string(), "hi there");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::Empty.to_string(), "empty");
    }

    #[test]
    fn test_coercion() {
        assert_eq!(Value::from(4.0).to_number(), Some(4.0));
        assert_eq!(Value::from(" 4.5 ").to_number(), Some(4.5));
        assert_eq!(Value::from("four").to_number(), None);
        assert_eq!(Value::from("99.").to_number(), Some(99.0));
        assert_eq!(Value::from("1.2.3").to_number(), None);
        for text in ["nan", "NaN", "inf", "infinity", "1e3", "+5", "-5", ".5", ""] {
            assert_eq!(Value::from(text).to_number(), None, "{:?}", text);
        }
        assert_eq!(Value::from(true).to_number(), None);
        assert_eq!(Value::Empty.to_number(), None);
    }

    #[test]
    fn test_integer() {
        assert_eq!(Value::from(4.0).as_integer(), Some(4.0));
        assert_eq!(Value::from(4.5).as_integer(), None);
        assert_eq!(Value::from("4").as_integer(), None);
    }
}
