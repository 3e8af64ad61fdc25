// ─────────────────────────────────────────────────────────────────────────────
// Reserve, price and liquidity updates shared by funding and trade events
// ─────────────────────────────────────────────────────────────────────────────

use crate::entities::Pool;
use crate::error::ProcessingError;
use crate::pricing::{liquidity_parameter, marginal_prices};
use crate::store::TokenLookup;
use fpmm_common::div_to_decimal;
use substreams::scalar::{BigDecimal, BigInt};

/// Scale and USD price of a pool's collateral token at event time
#[derive(Clone, Debug, PartialEq)]
pub struct CollateralPricing {
    pub scale: BigInt,
    /// Zero when either the token's ETH price or the USD/ETH rate is unknown
    pub usd_price: BigDecimal,
}

impl CollateralPricing {
    pub fn resolve<T: TokenLookup + ?Sized>(
        tokens: &T,
        collateral_token: &str,
        usd_per_eth: Option<&BigDecimal>,
    ) -> Self {
        let scale = tokens.collateral_scale(collateral_token);
        let usd_price = match (tokens.eth_per_token(collateral_token), usd_per_eth) {
            (Some(eth_per_collateral), Some(usd_per_eth)) => {
                eth_per_collateral * usd_per_eth.clone()
            }
            _ => BigDecimal::zero(),
        };

        Self { scale, usd_price }
    }

    /// Raw amount expressed in whole collateral tokens
    pub fn scaled(&self, amount: &BigInt) -> BigDecimal {
        div_to_decimal(amount, &self.scale)
    }

    pub fn usd_value(&self, amount: &BigInt) -> BigDecimal {
        self.scaled(amount) * self.usd_price.clone()
    }
}

/// Install new reserves and recompute prices and liquidity fields
///
/// The reserve count is fixed at pool creation; a vector of a different
/// length is rejected before anything is written.
pub fn set_liquidity(
    pool: &mut Pool,
    outcome_token_amounts: Vec<BigInt>,
    pricing: &CollateralPricing,
) -> Result<(), ProcessingError> {
    if outcome_token_amounts.len() != pool.outcome_token_amounts.len() {
        return Err(ProcessingError::OutcomeCountMismatch {
            expected: pool.outcome_token_amounts.len(),
            got: outcome_token_amounts.len(),
        });
    }

    let liquidity = liquidity_parameter(&outcome_token_amounts);
    let scaled_liquidity = pricing.scaled(&liquidity);

    pool.outcome_token_marginal_prices = marginal_prices(&outcome_token_amounts);
    pool.outcome_token_amounts = outcome_token_amounts;
    pool.usd_liquidity_parameter = scaled_liquidity.clone() * pricing.usd_price.clone();
    pool.scaled_liquidity_parameter = scaled_liquidity;
    pool.liquidity_parameter = liquidity;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PoolMetadata;
    use crate::store::TokenRegistry;
    use std::str::FromStr;

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    fn pool(outcomes: usize) -> Pool {
        Pool::new(
            "0xpool",
            PoolMetadata {
                collateral_token: "0xdai".into(),
                fee: BigInt::zero(),
                category: None,
                language: None,
                arbitrator: None,
                opening_timestamp: None,
                timeout: None,
                creation_timestamp: 0,
            },
            outcomes,
        )
    }

    #[test]
    fn usd_price_needs_both_rates() {
        let mut tokens = TokenRegistry::new();
        tokens.register_token("0xdai", Some(18), Some(dec("0.0005")));

        let priced = CollateralPricing::resolve(&tokens, "0xdai", Some(&dec("2000")));
        assert_eq!(priced.usd_price, dec("1"));

        let no_feed = CollateralPricing::resolve(&tokens, "0xdai", None);
        assert_eq!(no_feed.usd_price, BigDecimal::zero());

        let unknown = CollateralPricing::resolve(&tokens, "0xother", Some(&dec("2000")));
        assert_eq!(unknown.usd_price, BigDecimal::zero());
        assert_eq!(unknown.scale, BigInt::from(1u64));
    }

    #[test]
    fn liquidity_fields_follow_reserves() {
        let mut tokens = TokenRegistry::new();
        tokens.register_token("0xdai", Some(2), Some(dec("0.5")));
        let pricing = CollateralPricing::resolve(&tokens, "0xdai", Some(&dec("4")));

        let mut pool = pool(2);
        let reserves = vec![BigInt::from(400u64), BigInt::from(100u64)];
        set_liquidity(&mut pool, reserves, &pricing).unwrap();

        assert_eq!(pool.liquidity_parameter, BigInt::from(200u64));
        assert_eq!(pool.scaled_liquidity_parameter, dec("2"));
        assert_eq!(pool.usd_liquidity_parameter, dec("4"));
        let prices = pool.outcome_token_marginal_prices.clone().unwrap();
        assert_eq!(prices, vec![dec("0.2"), dec("0.8")]);
    }

    #[test]
    fn reserve_count_is_fixed() {
        let pricing = CollateralPricing {
            scale: BigInt::from(1u64),
            usd_price: BigDecimal::zero(),
        };
        let mut pool = pool(2);
        let result = set_liquidity(&mut pool, vec![BigInt::from(1u64); 3], &pricing);

        assert_eq!(
            result,
            Err(ProcessingError::OutcomeCountMismatch {
                expected: 2,
                got: 3
            })
        );
        assert_eq!(pool.outcome_token_amounts.len(), 2);
    }
}
