// ─────────────────────────────────────────────────────────────────────────────
// Event dispatch: funding, trades and pool-share transfers
// ─────────────────────────────────────────────────────────────────────────────

use crate::entities::Pool;
use crate::error::ProcessingError;
use crate::liquidity::{set_liquidity, CollateralPricing};
use crate::membership::{record_membership, TransferSide};
use crate::participation::{record_participation, Direction, Position};
use crate::pb::fpmm::types::v1::pool_event;
use crate::pb::fpmm::types::v1::{Buy, Events, FundingAdded, FundingRemoved, Sell, Transfer};
use crate::store::{require_global, EntityStore, TokenLookup};
use crate::volume::increase_volume;
use fpmm_common::{address_to_id, format_bigdecimal, format_bigint, parse_bigint};
use substreams::log;
use substreams::scalar::BigInt;

/// Apply every event in delivery order
///
/// Events are independent: a failing event is logged and skipped, and the
/// rest of the batch is still processed.
pub fn process_events<S, T>(events: Events, store: &mut S, tokens: &T)
where
    S: EntityStore + ?Sized,
    T: TokenLookup + ?Sized,
{
    for event in events.pool_events {
        let pool_id = address_to_id(&event.pool_address);
        let timestamp = event
            .timestamp
            .as_ref()
            .map(|timestamp| u64::try_from(timestamp.seconds).unwrap_or(0))
            .unwrap_or(0);

        let Some(kind) = event.r#type else {
            continue;
        };

        let (label, result) = match kind {
            pool_event::Type::FundingAdded(funding) => (
                "add funding",
                handle_funding_added(store, tokens, &pool_id, &funding),
            ),
            pool_event::Type::FundingRemoved(funding) => (
                "remove funding",
                handle_funding_removed(store, tokens, &pool_id, &funding),
            ),
            pool_event::Type::Buy(buy) => (
                "buy",
                handle_buy(store, tokens, &pool_id, &buy, timestamp),
            ),
            pool_event::Type::Sell(sell) => (
                "sell",
                handle_sell(store, tokens, &pool_id, &sell, timestamp),
            ),
            pool_event::Type::Transfer(transfer) => (
                "transfer pool shares",
                handle_pool_share_transfer(store, tokens, &pool_id, &transfer),
            ),
        };

        if let Err(error) = result {
            log::info!(
                "cannot {}: {} (block {})",
                label,
                error,
                event.block_number
            );
        }
    }
}

pub fn handle_funding_added<S, T>(
    store: &mut S,
    tokens: &T,
    pool_id: &str,
    event: &FundingAdded,
) -> Result<(), ProcessingError>
where
    S: EntityStore + ?Sized,
    T: TokenLookup + ?Sized,
{
    let mut pool = load_pool(store, pool_id)?;
    let amounts_added = parse_amounts(&event.amounts_added)?;
    let shares_minted = parse_amount(&event.shares_minted)?;

    let new_amounts = shift_reserves(&pool, &amounts_added, Direction::Addition)?;
    let pricing = collateral_pricing(store, tokens, &pool);

    set_liquidity(&mut pool, new_amounts, &pricing)?;
    record_participation(
        store,
        &pool,
        &address_to_id(&event.funder),
        &shares_minted,
        &pricing,
        Position::Liquidity,
        Direction::Addition,
    );

    store.save_pool(&pool);
    Ok(())
}

pub fn handle_funding_removed<S, T>(
    store: &mut S,
    tokens: &T,
    pool_id: &str,
    event: &FundingRemoved,
) -> Result<(), ProcessingError>
where
    S: EntityStore + ?Sized,
    T: TokenLookup + ?Sized,
{
    let mut pool = load_pool(store, pool_id)?;
    let amounts_removed = parse_amounts(&event.amounts_removed)?;
    let shares_burnt = parse_amount(&event.shares_burnt)?;

    let new_amounts = shift_reserves(&pool, &amounts_removed, Direction::Removal)?;
    let pricing = collateral_pricing(store, tokens, &pool);

    set_liquidity(&mut pool, new_amounts, &pricing)?;
    record_participation(
        store,
        &pool,
        &address_to_id(&event.funder),
        &shares_burnt,
        &pricing,
        Position::Liquidity,
        Direction::Removal,
    );

    store.save_pool(&pool);
    Ok(())
}

pub fn handle_buy<S, T>(
    store: &mut S,
    tokens: &T,
    pool_id: &str,
    event: &Buy,
    timestamp: u64,
) -> Result<(), ProcessingError>
where
    S: EntityStore + ?Sized,
    T: TokenLookup + ?Sized,
{
    let pool = load_pool(store, pool_id)?;
    let investment_amount = parse_amount(&event.investment_amount)?;
    let fee_amount = parse_amount(&event.fee_amount)?;
    let outcome_tokens_bought = parse_amount(&event.outcome_tokens_bought)?;
    let outcome_index = outcome_slot(&pool, event.outcome_index)?;

    // Net investment is added to every reserve, the bought tokens leave one
    let investment_minus_fees = investment_amount - fee_amount;
    let new_amounts = pool
        .outcome_token_amounts
        .iter()
        .enumerate()
        .map(|(outcome, amount)| {
            let funded = amount.clone() + investment_minus_fees.clone();
            if outcome == outcome_index {
                funded - outcome_tokens_bought.clone()
            } else {
                funded
            }
        })
        .collect();

    trade(
        store,
        tokens,
        pool,
        new_amounts,
        &address_to_id(&event.buyer),
        &investment_minus_fees,
        timestamp,
        Direction::Addition,
    )
}

pub fn handle_sell<S, T>(
    store: &mut S,
    tokens: &T,
    pool_id: &str,
    event: &Sell,
    timestamp: u64,
) -> Result<(), ProcessingError>
where
    S: EntityStore + ?Sized,
    T: TokenLookup + ?Sized,
{
    let pool = load_pool(store, pool_id)?;
    let return_amount = parse_amount(&event.return_amount)?;
    let fee_amount = parse_amount(&event.fee_amount)?;
    let outcome_tokens_sold = parse_amount(&event.outcome_tokens_sold)?;
    let outcome_index = outcome_slot(&pool, event.outcome_index)?;

    // Gross return leaves every reserve, the sold tokens come back into one
    let return_amount_plus_fees = return_amount + fee_amount;
    let new_amounts = pool
        .outcome_token_amounts
        .iter()
        .enumerate()
        .map(|(outcome, amount)| {
            let drained = amount.clone() - return_amount_plus_fees.clone();
            if outcome == outcome_index {
                drained + outcome_tokens_sold.clone()
            } else {
                drained
            }
        })
        .collect();

    trade(
        store,
        tokens,
        pool,
        new_amounts,
        &address_to_id(&event.seller),
        &return_amount_plus_fees,
        timestamp,
        Direction::Removal,
    )
}

pub fn handle_pool_share_transfer<S, T>(
    store: &mut S,
    tokens: &T,
    pool_id: &str,
    event: &Transfer,
) -> Result<(), ProcessingError>
where
    S: EntityStore + ?Sized,
    T: TokenLookup + ?Sized,
{
    let pool = load_pool(store, pool_id)?;
    let value = parse_amount(&event.value)?;
    let from = address_to_id(&event.from);
    let to = address_to_id(&event.to);

    record_membership(store, &pool.id, &from, &value, TransferSide::Sender);
    record_membership(store, &pool.id, &to, &value, TransferSide::Receiver);

    let pricing = collateral_pricing(store, tokens, &pool);
    record_participation(
        store,
        &pool,
        &from,
        &value,
        &pricing,
        Position::Liquidity,
        Direction::Removal,
    );
    record_participation(
        store,
        &pool,
        &to,
        &value,
        &pricing,
        Position::Liquidity,
        Direction::Addition,
    );

    Ok(())
}

/// Shared tail of buy and sell: reserves, volume, trader position, persist
#[allow(clippy::too_many_arguments)]
fn trade<S, T>(
    store: &mut S,
    tokens: &T,
    mut pool: Pool,
    new_amounts: Vec<BigInt>,
    trader: &str,
    volume: &BigInt,
    timestamp: u64,
    direction: Direction,
) -> Result<(), ProcessingError>
where
    S: EntityStore + ?Sized,
    T: TokenLookup + ?Sized,
{
    let mut global = require_global(store);
    let pricing = CollateralPricing::resolve(
        tokens,
        &pool.metadata.collateral_token,
        global.usd_per_eth.as_ref(),
    );

    set_liquidity(&mut pool, new_amounts, &pricing)?;

    match increase_volume(&mut global, &mut pool, volume, timestamp, &pricing) {
        Ok(()) => {
            store.save_global(&global);
            log::debug!(
                "pool {} trailing 24h volume {} ({} USD)",
                pool.id,
                format_bigint(&pool.running_daily_volume),
                format_bigdecimal(&pool.usd_running_daily_volume)
            );
        }
        Err(error) => log::info!("cannot record volume for pool {}: {}", pool.id, error),
    }

    record_participation(store, &pool, trader, volume, &pricing, Position::Outcome, direction);

    store.save_pool(&pool);
    Ok(())
}

fn load_pool<S: EntityStore + ?Sized>(store: &S, pool_id: &str) -> Result<Pool, ProcessingError> {
    store
        .load_pool(pool_id)
        .ok_or_else(|| ProcessingError::PoolNotFound(pool_id.to_string()))
}

fn collateral_pricing<S, T>(store: &mut S, tokens: &T, pool: &Pool) -> CollateralPricing
where
    S: EntityStore + ?Sized,
    T: TokenLookup + ?Sized,
{
    let global = require_global(store);
    CollateralPricing::resolve(tokens, &pool.metadata.collateral_token, global.usd_per_eth.as_ref())
}

fn parse_amount(value: &str) -> Result<BigInt, ProcessingError> {
    parse_bigint(value).ok_or_else(|| ProcessingError::InvalidAmount(value.to_string()))
}

fn parse_amounts(values: &[String]) -> Result<Vec<BigInt>, ProcessingError> {
    values.iter().map(|value| parse_amount(value)).collect()
}

fn outcome_slot(pool: &Pool, outcome_index: u64) -> Result<usize, ProcessingError> {
    let outcome_count = pool.outcome_token_amounts.len();
    usize::try_from(outcome_index)
        .ok()
        .filter(|index| *index < outcome_count)
        .ok_or(ProcessingError::OutcomeIndexOutOfRange {
            index: outcome_index,
            outcome_count,
        })
}

/// Move every reserve by the matching per-outcome funding amount
fn shift_reserves(
    pool: &Pool,
    deltas: &[BigInt],
    direction: Direction,
) -> Result<Vec<BigInt>, ProcessingError> {
    if deltas.len() != pool.outcome_token_amounts.len() {
        return Err(ProcessingError::OutcomeCountMismatch {
            expected: pool.outcome_token_amounts.len(),
            got: deltas.len(),
        });
    }

    Ok(pool
        .outcome_token_amounts
        .iter()
        .zip(deltas)
        .map(|(amount, delta)| match direction {
            Direction::Addition => amount.clone() + delta.clone(),
            Direction::Removal => amount.clone() - delta.clone(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PoolMetadata;
    use crate::store::{MemoryStore, TokenRegistry};

    fn setup() -> (MemoryStore, TokenRegistry) {
        let mut store = MemoryStore::new();
        store.save_pool(&Pool::new(
            "0x01",
            PoolMetadata {
                collateral_token: "0xc0".into(),
                fee: BigInt::zero(),
                category: None,
                language: None,
                arbitrator: None,
                opening_timestamp: None,
                timeout: None,
                creation_timestamp: 0,
            },
            2,
        ));
        (store, TokenRegistry::new())
    }

    fn fund(
        store: &mut MemoryStore,
        tokens: &TokenRegistry,
        amounts: &[&str],
    ) -> Result<(), ProcessingError> {
        handle_funding_added(
            store,
            tokens,
            "0x01",
            &FundingAdded {
                funder: vec![0xf0],
                amounts_added: amounts.iter().map(|amount| amount.to_string()).collect(),
                shares_minted: "100".into(),
            },
        )
    }

    #[test]
    fn funding_moves_all_reserves() {
        let (mut store, tokens) = setup();
        fund(&mut store, &tokens, &["100", "100"]).unwrap();
        handle_funding_removed(
            &mut store,
            &tokens,
            "0x01",
            &FundingRemoved {
                funder: vec![0xf0],
                amounts_removed: vec!["40".into(), "10".into()],
                collateral_removed_from_fee_pool: "0".into(),
                shares_burnt: "25".into(),
            },
        )
        .unwrap();

        let pool = store.load_pool("0x01").unwrap();
        assert_eq!(pool.outcome_token_amounts, vec![BigInt::from(60u64), BigInt::from(90u64)]);
    }

    #[test]
    fn unknown_pool_is_reported() {
        let (mut store, tokens) = setup();
        let result = handle_pool_share_transfer(
            &mut store,
            &tokens,
            "0x02",
            &Transfer {
                from: vec![0xaa],
                to: vec![0xbb],
                value: "1".into(),
            },
        );
        assert_eq!(result, Err(ProcessingError::PoolNotFound("0x02".into())));
        assert_eq!(store.account_count(), 0);
    }

    #[test]
    fn malformed_event_changes_nothing() {
        let (mut store, tokens) = setup();
        let before = store.load_pool("0x01").unwrap();

        assert_eq!(
            fund(&mut store, &tokens, &["100"]),
            Err(ProcessingError::OutcomeCountMismatch { expected: 2, got: 1 })
        );
        assert_eq!(
            fund(&mut store, &tokens, &["100", "1e3"]),
            Err(ProcessingError::InvalidAmount("1e3".into()))
        );
        assert_eq!(store.load_pool("0x01").unwrap(), before);
        assert_eq!(store.participation_count(), 0);
    }

    #[test]
    fn outcome_index_must_exist() {
        let (mut store, tokens) = setup();
        fund(&mut store, &tokens, &["100", "100"]).unwrap();

        let result = handle_buy(
            &mut store,
            &tokens,
            "0x01",
            &Buy {
                buyer: vec![0xb0],
                investment_amount: "10".into(),
                fee_amount: "0".into(),
                outcome_index: 2,
                outcome_tokens_bought: "5".into(),
            },
            0,
        );
        assert_eq!(
            result,
            Err(ProcessingError::OutcomeIndexOutOfRange {
                index: 2,
                outcome_count: 2
            })
        );
    }
}
