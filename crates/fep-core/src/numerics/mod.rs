//! Arbitrary-precision elementary functions on `BigDecimal`.
//!
//! `bigdecimal` provides `exp` but no logarithm; `ln` is refined here against
//! the crate's `exp` at a fixed working precision.

use bigdecimal::{BigDecimal, Context};
use num_traits::{FromPrimitive, ToPrimitive, Zero};
use std::num::NonZeroU64;

/// Significant digits kept in results.
pub const WORKING_PRECISION: u64 = 50;
const GUARD_DIGITS: u64 = 10;
const MAX_LN_REFINEMENTS: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecimalMathError {
    #[error("logarithm requires a positive argument, got {value}")]
    NonPositiveLogarithm { value: String },
    #[error("mean of an empty sample set is undefined")]
    EmptyMean,
}

/// `e^x` to `WORKING_PRECISION` significant digits.
pub fn exp(x: &BigDecimal) -> BigDecimal {
    exp_to(x, WORKING_PRECISION + GUARD_DIGITS).with_prec(WORKING_PRECISION)
}

/// Natural logarithm to `WORKING_PRECISION` significant digits.
pub fn ln(value: &BigDecimal) -> Result<BigDecimal, DecimalMathError> {
    if *value <= BigDecimal::zero() {
        return Err(DecimalMathError::NonPositiveLogarithm {
            value: value.to_string(),
        });
    }

    // value = mantissa * 10^decade with mantissa in [1, 10)
    let (digits, scale) = value.as_bigint_and_exponent();
    let digit_count = value.digits() as i64;
    let decade = digit_count - 1 - scale;
    let mantissa = BigDecimal::new(digits, digit_count - 1);

    let mut result = refine_ln(&mantissa);
    if decade != 0 {
        result = result + refine_ln(&BigDecimal::from(10)) * BigDecimal::from(decade);
    }
    Ok(result.with_prec(WORKING_PRECISION))
}

/// Arithmetic mean of a non-empty sample set.
pub fn mean(values: &[BigDecimal]) -> Result<BigDecimal, DecimalMathError> {
    if values.is_empty() {
        return Err(DecimalMathError::EmptyMean);
    }
    let sum = values
        .iter()
        .fold(BigDecimal::zero(), |sum, value| sum + value);
    Ok(sum / BigDecimal::from(values.len() as u64))
}

fn exp_to(x: &BigDecimal, precision: u64) -> BigDecimal {
    x.exp_with_context(&context(precision))
}

fn context(precision: u64) -> Context {
    Context::default().with_precision(NonZeroU64::MIN.saturating_add(precision - 1))
}

/// Halley iteration `y += 2 (v - e^y) / (v + e^y)` seeded from f64.
fn refine_ln(value: &BigDecimal) -> BigDecimal {
    let precision = WORKING_PRECISION + GUARD_DIGITS;
    let tolerance = BigDecimal::new(1.into(), (WORKING_PRECISION + 5) as i64);
    let two = BigDecimal::from(2);

    let mut estimate = value
        .to_f64()
        .map(f64::ln)
        .and_then(BigDecimal::from_f64)
        .unwrap_or_else(BigDecimal::zero);

    for _ in 0..MAX_LN_REFINEMENTS {
        let exponential = exp_to(&estimate, precision);
        let step = (&two * (value - &exponential) / (value + &exponential)).with_prec(precision);
        estimate = (estimate + &step).with_prec(precision);
        if step.abs() < tolerance {
            break;
        }
    }
    estimate
}

#[cfg(test)]
mod tests {
    use super::{DecimalMathError, exp, ln, mean};
    use bigdecimal::BigDecimal;
    use num_traits::{ToPrimitive, Zero};
    use std::str::FromStr;

    const E: &str = "2.718281828459045235360287471352662497757247093699959574966";
    const LN_10: &str = "2.302585092994045684017991454684364207601101488628772976033";
    const LN_2: &str = "0.693147180559945309417232121458176568075500134360255254120";

    fn decimal(text: &str) -> BigDecimal {
        BigDecimal::from_str(text).expect("decimal literal should parse")
    }

    fn assert_close(actual: &BigDecimal, expected: &BigDecimal, tolerance: &str) {
        let difference = (actual - expected).abs();
        assert!(
            difference <= decimal(tolerance),
            "{actual} differs from {expected} by {difference}"
        );
    }

    #[test]
    fn exp_of_zero_is_exactly_one() {
        assert_eq!(exp(&BigDecimal::zero()), decimal("1"));
    }

    #[test]
    fn exp_matches_reference_digits() {
        assert_close(&exp(&decimal("1")), &decimal(E), "1e-45");
        let root = exp(&decimal("0.5"));
        assert_close(&(&root * &root), &decimal(E), "1e-45");
    }

    #[test]
    fn exp_handles_large_negative_arguments() {
        let value = exp(&decimal("-50")).to_f64().unwrap();
        let expected = (-50.0_f64).exp();
        assert!(((value - expected) / expected).abs() <= 1.0e-13);

        let tiny = exp(&decimal("-700")).to_f64().unwrap();
        assert!(((tiny - (-700.0_f64).exp()) / (-700.0_f64).exp()).abs() <= 1.0e-12);
    }

    #[test]
    fn ln_matches_reference_digits() {
        assert_close(&ln(&decimal("10")).unwrap(), &decimal(LN_10), "1e-45");
        assert_close(&ln(&decimal("2")).unwrap(), &decimal(LN_2), "1e-45");
        assert_close(&ln(&decimal(E)).unwrap(), &decimal("1"), "1e-45");
    }

    #[test]
    fn ln_of_one_is_zero() {
        assert!(ln(&decimal("1")).unwrap().is_zero());
        assert!(ln(&decimal("1.000")).unwrap().is_zero());
    }

    #[test]
    fn ln_spans_decades() {
        let expected = decimal(LN_10) * BigDecimal::from(-30);
        assert_close(&ln(&decimal("1e-30")).unwrap(), &expected, "1e-44");

        let large = ln(&decimal("2e40")).unwrap();
        let expected = decimal(LN_2) + decimal(LN_10) * BigDecimal::from(40);
        assert_close(&large, &expected, "1e-44");
    }

    #[test]
    fn ln_rejects_non_positive_arguments() {
        assert_eq!(
            ln(&decimal("0")),
            Err(DecimalMathError::NonPositiveLogarithm {
                value: "0".to_string()
            })
        );
        assert!(ln(&decimal("-1.5")).is_err());
    }

    #[test]
    fn mean_of_samples() {
        let values = [decimal("1"), decimal("2"), decimal("4")];
        assert_close(&mean(&values).unwrap(), &decimal("2.3333333333"), "1e-10");
        assert_eq!(mean(&[]), Err(DecimalMathError::EmptyMean));
    }
}
