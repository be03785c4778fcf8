/// Returned by [`divide`] when the denominator is zero (either sign).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Denominator is zero.")]
pub struct DivisionByZero;

/// Sum of `values`, accumulated left to right. An empty slice sums to 0.
pub fn add(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |sum, v| sum + v)
}

pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

/// Product of `values`, accumulated left to right from 1.
///
/// An empty slice yields 0 rather than the multiplicative identity.
pub fn multiply(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().fold(1.0, |product, v| product * v)
}

pub fn divide(a: f64, b: f64) -> Result<f64, DivisionByZero> {
    if b == 0.0 {
        return Err(DivisionByZero);
    }
    Ok(a / b)
}

/// Like [`divide`], but `None` instead of an error for a zero denominator.
pub fn try_divide(a: f64, b: f64) -> Option<f64> {
    divide(a, b).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        assert_eq!(add(&[]), 0.0);
        assert_eq!(add(&[2.0, 3.0, -1.0]), 4.0);
        assert_eq!(add(&[1.5]), 1.5);
    }

    #[test]
    fn test_subtract() {
        assert_eq!(subtract(10.0, 4.5), 5.5);
        assert_eq!(subtract(-1.0, -1.0), 0.0);
    }

    #[test]
    fn test_multiply() {
        assert_eq!(multiply(&[]), 0.0);
        assert_eq!(multiply(&[5.0]), 5.0);
        assert_eq!(multiply(&[2.0, 3.0, 4.0]), 24.0);
        assert_eq!(multiply(&[2.0, 0.0, 4.0]), 0.0);
    }

    #[test]
    fn test_divide() {
        assert_eq!(divide(10.0, 4.0), Ok(2.5));
        assert_eq!(divide(10.0, 0.0), Err(DivisionByZero));
        assert_eq!(divide(10.0, -0.0), Err(DivisionByZero));
        assert_eq!(divide(0.0, 5.0), Ok(0.0));
    }

    #[test]
    fn test_try_divide() {
        assert_eq!(try_divide(10.0, 2.0), Some(5.0));
        assert_eq!(try_divide(10.0, 0.0), None);
    }

    #[test]
    fn test_division_by_zero_message() {
        assert_eq!(DivisionByZero.to_string(), "Denominator is zero.");
    }
}
