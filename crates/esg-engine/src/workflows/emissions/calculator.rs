use rust_decimal::{Decimal, RoundingStrategy};

/// Digit limits the intake forms enforce; anything wider is rejected before
/// multiplication rather than silently clamped.
pub const ACTIVITY_INTEGER_DIGITS: u32 = 12;
pub const ACTIVITY_FRACTION_DIGITS: u32 = 3;
pub const FACTOR_INTEGER_DIGITS: u32 = 9;
pub const FACTOR_FRACTION_DIGITS: u32 = 6;
pub const RESULT_INTEGER_DIGITS: u32 = 15;
pub const RESULT_FRACTION_DIGITS: u32 = 6;

/// Rejection reasons for a single calculation. Each calculation is
/// independent and feeds one input field, so these are returned per call and
/// never aggregated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalculationError {
    #[error("'{raw}' is not a number")]
    NotANumber { raw: String },
    #[error("value must not be negative, got {value}")]
    Negative { value: Decimal },
    #[error("activity amount exceeds 12 integer digits or 3 decimal places: {value}")]
    ActivityOutOfRange { value: Decimal },
    #[error("emission factor exceeds 9 integer digits or 6 decimal places: {value}")]
    FactorOutOfRange { value: Decimal },
    #[error("total emission exceeds 15 integer digits")]
    ResultOutOfRange,
}

fn integer_digit_limit(digits: u32) -> Decimal {
    Decimal::from_i128_with_scale(10i128.pow(digits), 0)
}

fn within_digit_bounds(value: Decimal, integer_digits: u32, fraction_digits: u32) -> bool {
    let normalized = value.normalize();
    normalized.scale() <= fraction_digits
        && normalized.abs().trunc() < integer_digit_limit(integer_digits)
}

fn parse_amount(raw: &str) -> Result<Decimal, CalculationError> {
    raw.trim()
        .parse::<Decimal>()
        .map_err(|_| CalculationError::NotANumber {
            raw: raw.to_string(),
        })
}

fn validate_input(
    value: Decimal,
    integer_digits: u32,
    fraction_digits: u32,
    out_of_range: fn(Decimal) -> CalculationError,
) -> Result<Decimal, CalculationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CalculationError::Negative { value });
    }
    if !within_digit_bounds(value, integer_digits, fraction_digits) {
        return Err(out_of_range(value));
    }
    Ok(value)
}

/// Multiplies a validated activity amount by an emission factor, rounding the
/// product half-away-from-zero to six decimal places. Products wider than the
/// result limit are rejected.
pub fn calculate(
    activity_amount: Decimal,
    emission_factor: Decimal,
) -> Result<Decimal, CalculationError> {
    let activity = validate_input(
        activity_amount,
        ACTIVITY_INTEGER_DIGITS,
        ACTIVITY_FRACTION_DIGITS,
        |value| CalculationError::ActivityOutOfRange { value },
    )?;
    let factor = validate_input(
        emission_factor,
        FACTOR_INTEGER_DIGITS,
        FACTOR_FRACTION_DIGITS,
        |value| CalculationError::FactorOutOfRange { value },
    )?;

    let product = activity
        .checked_mul(factor)
        .ok_or(CalculationError::ResultOutOfRange)?;
    let mut total =
        product.round_dp_with_strategy(RESULT_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero);

    if total.abs().trunc() >= integer_digit_limit(RESULT_INTEGER_DIGITS) {
        return Err(CalculationError::ResultOutOfRange);
    }

    // results always carry exactly six decimal places
    total.rescale(RESULT_FRACTION_DIGITS);
    Ok(total)
}

/// String-input variant backing form fields: parses both operands, then
/// delegates to [`calculate`].
pub fn calculate_raw(activity_amount: &str, emission_factor: &str) -> Result<Decimal, CalculationError> {
    let activity = parse_amount(activity_amount)?;
    let factor = parse_amount(emission_factor)?;
    calculate(activity, factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(raw: &str) -> Decimal {
        raw.parse::<Decimal>().expect("decimal literal")
    }

    #[test]
    fn simple_product_is_exact_with_six_decimal_places() {
        let total = calculate(dec("1000"), dec("2.5")).expect("calculates");
        assert_eq!(total, dec("2500.000000"));
        assert_eq!(total.scale(), 6);
        assert_eq!(total.to_string(), "2500.000000");
    }

    #[test]
    fn string_inputs_parse_and_calculate() {
        let total = calculate_raw(" 150.5 ", "0.4781").expect("calculates");
        assert_eq!(total, dec("71.954050"));
    }

    #[test]
    fn non_numeric_input_is_rejected() {
        assert_eq!(
            calculate_raw("12a", "1").expect_err("rejects"),
            CalculationError::NotANumber {
                raw: "12a".to_string()
            }
        );
        assert!(matches!(
            calculate_raw("1", "").expect_err("rejects"),
            CalculationError::NotANumber { .. }
        ));
    }

    #[test]
    fn negative_inputs_are_rejected() {
        assert!(matches!(
            calculate(dec("-1"), dec("2")).expect_err("rejects"),
            CalculationError::Negative { .. }
        ));
        assert!(matches!(
            calculate(dec("1"), dec("-0.5")).expect_err("rejects"),
            CalculationError::Negative { .. }
        ));
    }

    #[test]
    fn activity_amount_digit_bounds_are_enforced() {
        // 12 integer digits and 3 decimal places is the widest accepted form
        assert!(calculate(dec("999999999999.999"), dec("1")).is_ok());
        assert!(matches!(
            calculate(dec("1000000000000"), dec("1")).expect_err("13 digits"),
            CalculationError::ActivityOutOfRange { .. }
        ));
        assert!(matches!(
            calculate(dec("1.0001"), dec("1")).expect_err("4 decimal places"),
            CalculationError::ActivityOutOfRange { .. }
        ));
        // trailing zeros are not significant
        assert!(calculate(dec("1.5000"), dec("1")).is_ok());
    }

    #[test]
    fn emission_factor_digit_bounds_are_enforced() {
        assert!(calculate(dec("1"), dec("999999999.999999")).is_ok());
        assert!(matches!(
            calculate(dec("1"), dec("1000000000")).expect_err("10 digits"),
            CalculationError::FactorOutOfRange { .. }
        ));
        assert!(matches!(
            calculate(dec("1"), dec("0.1234567")).expect_err("7 decimal places"),
            CalculationError::FactorOutOfRange { .. }
        ));
    }

    #[test]
    fn oversized_products_are_rejected_not_clamped() {
        let error = calculate(dec("999999999999.999"), dec("999999999.999999"))
            .expect_err("product exceeds 15 integer digits");
        assert_eq!(error, CalculationError::ResultOutOfRange);
    }

    #[test]
    fn rounding_is_half_away_from_zero_at_six_places() {
        // 0.125 * 0.000005 = 0.000000625 -> rounds up, not to even
        let total = calculate(dec("0.125"), dec("0.000005")).expect("calculates");
        assert_eq!(total, dec("0.000001"));
    }

    #[test]
    fn calculation_is_deterministic() {
        let first = calculate(dec("123456.789"), dec("2.680000")).expect("calculates");
        let second = calculate(dec("123456.789"), dec("2.680000")).expect("calculates");
        assert_eq!(first, second);
        assert_eq!(first, dec("330864.194520"));
    }
}
