//! Evaluator for `"<left> <op> <right>"` expressions.
//!
//! Operands use a locale-independent format: `.` as decimal separator, optional
//! sign and exponent, and optional `,` digit grouping in the integer part
//! (`"1,000.5"`). Tokens are separated by the space character only; other
//! whitespace around an operand is ignored.

use std::fmt;
use std::str::FromStr;

use crate::arithmetic::{add, divide, multiply, subtract, DivisionByZero};

/// Why an expression could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("Expression is empty")]
    Empty,

    #[error("Expected 3 space-separated tokens, found {0}")]
    TokenCount(usize),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Unsupported operator '{0}'")]
    UnsupportedOperator(String),

    #[error("Division by zero")]
    DivisionByZero,
}

impl From<DivisionByZero> for EvalError {
    fn from(_: DivisionByZero) -> Self {
        EvalError::DivisionByZero
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }

    pub fn apply(self, left: f64, right: f64) -> Result<f64, EvalError> {
        match self {
            Operator::Add => Ok(add(&[left, right])),
            Operator::Subtract => Ok(subtract(left, right)),
            Operator::Multiply => Ok(multiply(&[left, right])),
            Operator::Divide => Ok(divide(left, right)?),
        }
    }
}

impl FromStr for Operator {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            other => Err(EvalError::UnsupportedOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Evaluate `expression`, reporting the failure reason on error.
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return Err(EvalError::Empty);
    }

    let parts: Vec<&str> = trimmed.split(' ').filter(|p| !p.is_empty()).collect();
    let [left, op, right] = parts.as_slice() else {
        return Err(EvalError::TokenCount(parts.len()));
    };

    let left = parse_operand(left)?;
    let right = parse_operand(right)?;
    let op: Operator = op.parse()?;

    op.apply(left, right)
}

/// Evaluate `expression`, collapsing every failure into `None`.
pub fn try_evaluate(expression: &str) -> Option<f64> {
    evaluate(expression).ok()
}

fn parse_operand(token: &str) -> Result<f64, EvalError> {
    let invalid = || EvalError::InvalidNumber(token.to_string());
    // Tabs or newlines next to the separating spaces belong to no token.
    let token = token.trim_matches(|c: char| c.is_ascii_whitespace());

    // Grouping separators are only legal before the fraction/exponent.
    let integral_end = token
        .find(|c: char| c == '.' || c == 'e' || c == 'E')
        .unwrap_or(token.len());
    let (integral, rest) = token.split_at(integral_end);
    if rest.contains(',') {
        return Err(invalid());
    }

    let unsigned = integral
        .strip_prefix('+')
        .or_else(|| integral.strip_prefix('-'))
        .unwrap_or(integral);
    if unsigned.starts_with(',') {
        return Err(invalid());
    }

    let cleaned: String = token.chars().filter(|&c| c != ',').collect();
    if !cleaned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return Err(invalid());
    }

    cleaned.parse::<f64>().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_evaluate_basic_operations() {
        assert_eq!(try_evaluate("3 + 4"), Some(7.0));
        assert_eq!(try_evaluate("-2.5 * 4"), Some(-10.0));
        assert_eq!(try_evaluate("10 - 2.5"), Some(7.5));
        assert_eq!(try_evaluate("9 / 3"), Some(3.0));
    }

    #[test]
    fn test_try_evaluate_failures() {
        assert_eq!(try_evaluate("10 / 0"), None);
        assert_eq!(try_evaluate("3 +4"), None);
        assert_eq!(try_evaluate("3 % 4"), None);
        assert_eq!(try_evaluate(""), None);
        assert_eq!(try_evaluate("   "), None);
        assert_eq!(try_evaluate("a + 4"), None);
    }

    #[test]
    fn test_evaluate_reports_reason() {
        assert_eq!(evaluate("10 / 0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("3 +4"), Err(EvalError::TokenCount(2)));
        assert_eq!(evaluate("1 + 2 + 3"), Err(EvalError::TokenCount(5)));
        assert_eq!(
            evaluate("3 % 4"),
            Err(EvalError::UnsupportedOperator("%".to_string()))
        );
        assert_eq!(
            evaluate("three + 4"),
            Err(EvalError::InvalidNumber("three".to_string()))
        );
        assert_eq!(evaluate(" \n "), Err(EvalError::Empty));
    }

    #[test]
    fn test_extra_spaces_are_ignored() {
        assert_eq!(evaluate("  3    +   4  "), Ok(7.0));
    }

    #[test]
    fn test_only_space_separates_tokens() {
        assert_eq!(evaluate("3\t+ 4"), Err(EvalError::TokenCount(2)));
    }

    #[test]
    fn test_operands_tolerate_surrounding_whitespace() {
        assert_eq!(evaluate("3\t + 4"), Ok(7.0));
        assert_eq!(evaluate("3 * \n4\r"), Ok(12.0));
        assert_eq!(evaluate("3 \t+ 4"), Err(EvalError::UnsupportedOperator("\t+".to_string())));
        assert!(matches!(evaluate("3\t1 + 4"), Err(EvalError::InvalidNumber(_))));
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(evaluate("1,000.5 + 1"), Ok(1001.5));
        assert_eq!(evaluate("-1,234 - 1"), Ok(-1235.0));
        assert!(matches!(
            evaluate("1.0,5 + 1"),
            Err(EvalError::InvalidNumber(_))
        ));
        assert!(matches!(evaluate(",5 + 1"), Err(EvalError::InvalidNumber(_))));
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(evaluate("+3 * .5"), Ok(1.5));
        assert_eq!(evaluate("1e3 / 4."), Ok(250.0));
        assert!(matches!(evaluate("inf + 1"), Err(EvalError::InvalidNumber(_))));
        assert!(matches!(evaluate("NaN + 1"), Err(EvalError::InvalidNumber(_))));
    }

    #[test]
    fn test_operand_errors_take_precedence_over_operator() {
        assert!(matches!(evaluate("x % 4"), Err(EvalError::InvalidNumber(_))));
    }

    #[test]
    fn test_operator_round_trip() {
        for op in [
            Operator::Add,
            Operator::Subtract,
            Operator::Multiply,
            Operator::Divide,
        ] {
            assert_eq!(op.symbol().parse::<Operator>(), Ok(op));
        }
    }
}
