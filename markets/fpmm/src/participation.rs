// ─────────────────────────────────────────────────────────────────────────────
// Per-account liquidity and trading positions
// ─────────────────────────────────────────────────────────────────────────────

use crate::entities::{participation_id, FpmmParticipation, Pool};
use crate::liquidity::CollateralPricing;
use crate::store::{require_account, EntityStore};
use substreams::scalar::{BigDecimal, BigInt};

/// Which running total an interaction moves
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    /// Pool tokens held as a liquidity provider
    Liquidity,
    /// Outcome shares held as a trader
    Outcome,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Addition,
    Removal,
}

impl FpmmParticipation {
    /// Move one running-total pair by `amount` (whole tokens) and `usd`
    pub fn apply(
        &mut self,
        position: Position,
        direction: Direction,
        amount: BigDecimal,
        usd: BigDecimal,
    ) {
        let (tokens, tokens_usd) = match position {
            Position::Liquidity => (&mut self.pool_tokens, &mut self.pool_tokens_usd),
            Position::Outcome => (&mut self.outcome_shares, &mut self.outcome_shares_usd),
        };

        match direction {
            Direction::Addition => {
                *tokens = tokens.clone() + amount;
                *tokens_usd = tokens_usd.clone() + usd;
            }
            Direction::Removal => {
                *tokens = tokens.clone() - amount;
                *tokens_usd = tokens_usd.clone() - usd;
            }
        }
    }
}

/// Create the participation record on first contact, then apply the move
pub fn record_participation<S: EntityStore + ?Sized>(
    store: &mut S,
    pool: &Pool,
    participant: &str,
    amount: &BigInt,
    pricing: &CollateralPricing,
    position: Position,
    direction: Direction,
) {
    require_account(store, participant);

    let id = participation_id(&pool.id, participant);
    let mut participation = store
        .load_participation(&id)
        .unwrap_or_else(|| FpmmParticipation::new(pool, participant));

    participation.apply(position, direction, pricing.scaled(amount), pricing.usd_value(amount));
    store.save_participation(&participation);
}
