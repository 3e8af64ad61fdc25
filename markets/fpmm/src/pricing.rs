// ─────────────────────────────────────────────────────────────────────────────
// Constant-product marginal prices and liquidity measure
// ─────────────────────────────────────────────────────────────────────────────

use fpmm_common::{div_to_decimal, nth_root};
use substreams::scalar::{BigDecimal, BigInt};

/// Marginal price of every outcome under the invariant `∏ reserves = k`
///
/// ## Formula:
/// - `weight[i]` is the product of every reserve except reserve `i`
/// - `price[i] = weight[i] / Σ weight`
///
/// ## Returns:
/// - `None` if any reserve is zero, since the price vector is undefined there
/// - Otherwise prices that sum to 1 up to truncation in the last decimal place
pub fn marginal_prices(outcome_token_amounts: &[BigInt]) -> Option<Vec<BigDecimal>> {
    if outcome_token_amounts
        .iter()
        .any(|amount| amount == &BigInt::zero())
    {
        return None;
    }

    let weights: Vec<BigInt> = (0..outcome_token_amounts.len())
        .map(|outcome| {
            outcome_token_amounts
                .iter()
                .enumerate()
                .filter(|(other, _)| *other != outcome)
                .fold(BigInt::from(1u64), |weight, (_, amount)| weight * amount.clone())
        })
        .collect();

    let weight_sum = weights
        .iter()
        .fold(BigInt::zero(), |sum, weight| sum + weight.clone());

    Some(
        weights
            .iter()
            .map(|weight| div_to_decimal(weight, &weight_sum))
            .collect(),
    )
}

/// Geometric-mean size of the reserve set: `floor((∏ reserves)^(1/N))`
pub fn liquidity_parameter(outcome_token_amounts: &[BigInt]) -> BigInt {
    let product = outcome_token_amounts
        .iter()
        .fold(BigInt::from(1u64), |product, amount| product * amount.clone());

    match u32::try_from(outcome_token_amounts.len()) {
        Ok(outcome_count) => nth_root(&product, outcome_count),
        Err(_) => BigInt::zero(),
    }
}
