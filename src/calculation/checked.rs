//! Overflow-checked Decimal arithmetic.
//!
//! `Decimal` operators panic when a result exceeds 96 bits. Every product,
//! quotient and running sum over caller-supplied values goes through these
//! helpers so oversized inputs surface as [`EngineError::CalculationError`].

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

fn overflow(context: &str, lhs: Decimal, op: char, rhs: Decimal) -> EngineError {
    EngineError::CalculationError {
        message: format!("{} overflows: {} {} {}", context, lhs, op, rhs),
    }
}

pub(crate) fn mul(context: &str, lhs: Decimal, rhs: Decimal) -> EngineResult<Decimal> {
    lhs.checked_mul(rhs)
        .ok_or_else(|| overflow(context, lhs, 'x', rhs))
}

/// Divides `lhs` by `rhs`. Callers validate that `rhs` is non-zero; a zero
/// divisor is reported the same way as an overflow.
pub(crate) fn div(context: &str, lhs: Decimal, rhs: Decimal) -> EngineResult<Decimal> {
    lhs.checked_div(rhs)
        .ok_or_else(|| overflow(context, lhs, '/', rhs))
}

pub(crate) fn add(context: &str, lhs: Decimal, rhs: Decimal) -> EngineResult<Decimal> {
    lhs.checked_add(rhs)
        .ok_or_else(|| overflow(context, lhs, '+', rhs))
}

pub(crate) fn sub(context: &str, lhs: Decimal, rhs: Decimal) -> EngineResult<Decimal> {
    lhs.checked_sub(rhs)
        .ok_or_else(|| overflow(context, lhs, '-', rhs))
}

/// Sums `values`, failing on the first overflowing partial sum.
pub(crate) fn sum(
    context: &str,
    values: impl IntoIterator<Item = Decimal>,
) -> EngineResult<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |total, value| add(context, total, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_in_range_results_match_operators() {
        assert_eq!(mul("t", dec("1.5"), dec("4")).unwrap(), dec("6"));
        assert_eq!(div("t", dec("19.2"), dec("1.3")).unwrap(), dec("19.2") / dec("1.3"));
        assert_eq!(add("t", dec("0.1"), dec("0.2")).unwrap(), dec("0.3"));
        assert_eq!(sub("t", dec("1"), dec("0.25")).unwrap(), dec("0.75"));
        assert_eq!(sum("t", [dec("1"), dec("2"), dec("3")]).unwrap(), dec("6"));
    }

    #[test]
    fn test_overflow_is_calculation_error() {
        let err = mul("stump score", Decimal::MAX, dec("2")).unwrap_err();
        match err {
            EngineError::CalculationError { message } => {
                assert!(message.starts_with("stump score overflows"));
            }
            other => panic!("Expected CalculationError, got {:?}", other),
        }
        assert!(div("t", Decimal::MAX, dec("0.1")).is_err());
        assert!(add("t", Decimal::MAX, Decimal::ONE).is_err());
        assert!(sub("t", Decimal::MIN, Decimal::ONE).is_err());
        assert!(sum("t", [Decimal::MAX, Decimal::MAX]).is_err());
    }

    #[test]
    fn test_zero_divisor_is_an_error_not_a_panic() {
        assert!(div("t", Decimal::ONE, Decimal::ZERO).is_err());
    }
}
