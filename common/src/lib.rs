use num_bigint::{BigInt as NumBigInt, Sign};
use std::str::FromStr;
use substreams::scalar::{BigDecimal, BigInt};
use substreams::Hex;

/// Number of fractional digits kept by every truncating decimal division
pub const DECIMAL_PRECISION: u32 = 18;

/// Format BigInt as a string, handling potential edge cases
#[inline]
pub fn format_bigint(value: &BigInt) -> String {
    value.to_string()
}

/// Ensure address has 0x prefix
#[inline]
pub fn ensure_0x_prefix(address: &str) -> String {
    if address.starts_with("0x") || address.starts_with("0X") {
        address.to_string()
    } else {
        format!("0x{address}")
    }
}

/// Turn raw address bytes into the lowercase `0x`-prefixed id used as entity key
#[inline]
pub fn address_to_id(address: &[u8]) -> String {
    ensure_0x_prefix(&Hex(address).to_string())
}

/// Parse a base-10 integer string into a BigInt
///
/// Returns `None` for empty or malformed input instead of silently
/// substituting zero, so callers can decide how to report it.
pub fn parse_bigint(value: &str) -> Option<BigInt> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    NumBigInt::from_str(trimmed).ok().map(BigInt::from)
}

/// `10^decimals` as a BigInt, the raw-unit scale of a token
pub fn scale_from_decimals(decimals: u32) -> BigInt {
    BigInt::from(NumBigInt::from(10u32).pow(decimals))
}

/// Divide two integers into a decimal truncated toward zero
///
/// ## Rounding:
/// - The quotient keeps exactly `DECIMAL_PRECISION` fractional digits
/// - Digits beyond that are dropped, never rounded, so results are reproducible
///
/// ## Returns:
/// - `numerator / denominator` as a BigDecimal, or 0 if the denominator is zero
pub fn div_to_decimal(numerator: &BigInt, denominator: &BigInt) -> BigDecimal {
    let num = NumBigInt::try_from(numerator.clone()).unwrap_or_default();
    let den = NumBigInt::try_from(denominator.clone()).unwrap_or_default();

    if den.sign() == Sign::NoSign {
        return BigDecimal::zero();
    }

    let precision = NumBigInt::from(10u32).pow(DECIMAL_PRECISION);
    // num-bigint division truncates toward zero
    let quotient = (num * precision.clone()) / den;

    // Dividing by a power of ten is exact
    BigDecimal::from(BigInt::from(quotient)) / BigDecimal::from(BigInt::from(precision))
}

/// Integer n-th root, rounded down
///
/// ## Parameters:
/// - `value`: radicand, must be non-negative
/// - `n`: root degree, must be at least 1
///
/// ## Returns:
/// - `floor(value^(1/n))`, or 0 for a negative radicand or a zero degree
pub fn nth_root(value: &BigInt, n: u32) -> BigInt {
    if n == 0 {
        return BigInt::zero();
    }

    let radicand = NumBigInt::try_from(value.clone()).unwrap_or_default();
    if radicand.sign() == Sign::Minus {
        return BigInt::zero();
    }

    BigInt::from(radicand.nth_root(n))
}

/// Re-express a raw amount with `DECIMAL_PRECISION` implied decimals
///
/// Computes `floor(value * 10^18 / scale)` so amounts of tokens with different
/// decimals become comparable integers. A zero scale yields 0.
pub fn normalize_to_precision(value: &BigInt, scale: &BigInt) -> BigInt {
    let raw = NumBigInt::try_from(value.clone()).unwrap_or_default();
    let den = NumBigInt::try_from(scale.clone()).unwrap_or_default();

    if den.sign() == Sign::NoSign {
        return BigInt::zero();
    }

    BigInt::from(raw * NumBigInt::from(10u32).pow(DECIMAL_PRECISION) / den)
}

/// Shift a non-negative BigInt left by `bits`
pub fn shift_left(value: &BigInt, bits: usize) -> BigInt {
    let raw = NumBigInt::try_from(value.clone()).unwrap_or_default();
    BigInt::from(raw << bits)
}

/// Format a BigDecimal to a string with at most 18 decimal places
/// Removes trailing zeros and decimal point if unnecessary
#[inline]
pub fn format_bigdecimal(big_decimal: &BigDecimal) -> String {
    let mut decimal_string = big_decimal.to_string();

    if let Some(decimal_point_index) = decimal_string.find('.') {
        let truncate_position = usize::min(
            decimal_point_index + 1 + DECIMAL_PRECISION as usize,
            decimal_string.len(),
        );
        decimal_string.truncate(truncate_position);

        while decimal_string.ends_with('0') {
            decimal_string.pop();
        }

        if decimal_string.ends_with('.') {
            decimal_string.pop();
        }
    }

    if decimal_string.is_empty() {
        "0".into()
    } else {
        decimal_string
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    #[test]
    fn address_id_is_lowercase_and_prefixed() {
        assert_eq!(address_to_id(&[0xAB, 0x01, 0xff]), "0xab01ff");
        assert_eq!(ensure_0x_prefix("0Xabc"), "0Xabc");
        assert_eq!(ensure_0x_prefix("abc"), "0xabc");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_bigint(" 1500 "), Some(BigInt::from(1500u64)));
        assert_eq!(parse_bigint(""), None);
        assert_eq!(parse_bigint("12abc"), None);
    }

    #[test]
    fn scale_is_power_of_ten() {
        assert_eq!(scale_from_decimals(0), BigInt::from(1u64));
        assert_eq!(scale_from_decimals(6), BigInt::from(1_000_000u64));
    }

    #[test]
    fn division_truncates_at_precision() {
        let third = div_to_decimal(&BigInt::from(1u64), &BigInt::from(3u64));
        assert_eq!(format_bigdecimal(&third), "0.333333333333333333");

        let two_thirds = div_to_decimal(&BigInt::from(2u64), &BigInt::from(3u64));
        assert_eq!(format_bigdecimal(&two_thirds), "0.666666666666666666");

        let exact = div_to_decimal(&BigInt::from(1_500_000u64), &scale_from_decimals(6));
        assert_eq!(exact, dec("1.5"));
    }

    #[test]
    fn division_by_zero_yields_zero() {
        assert_eq!(div_to_decimal(&BigInt::from(7u64), &BigInt::zero()), BigDecimal::zero());
    }

    #[test]
    fn nth_root_rounds_down() {
        assert_eq!(nth_root(&BigInt::from(12_600u64), 2), BigInt::from(112u64));
        assert_eq!(nth_root(&BigInt::from(1_000u64), 3), BigInt::from(10u64));
        assert_eq!(nth_root(&BigInt::from(999u64), 3), BigInt::from(9u64));
        assert_eq!(nth_root(&parse_bigint("-4").unwrap(), 2), BigInt::zero());
        assert_eq!(nth_root(&BigInt::from(8u64), 0), BigInt::zero());
    }

    #[test]
    fn normalization_lifts_to_eighteen_decimals() {
        let usdc = normalize_to_precision(&BigInt::from(2_500_000u64), &scale_from_decimals(6));
        assert_eq!(usdc, parse_bigint("2500000000000000000").unwrap());
        assert_eq!(normalize_to_precision(&BigInt::from(5u64), &BigInt::zero()), BigInt::zero());
    }

    #[test]
    fn shift_left_multiplies_by_power_of_two() {
        assert_eq!(shift_left(&BigInt::from(3u64), 4), BigInt::from(48u64));
    }
}
