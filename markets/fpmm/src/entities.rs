// ─────────────────────────────────────────────────────────────────────────────
// Aggregate records maintained for each market maker
// ─────────────────────────────────────────────────────────────────────────────

use crate::constants::RING_SLOTS;
use crate::error::ProcessingError;
use std::ops::Index;
use substreams::scalar::{BigDecimal, BigInt};

/// Fixed 24-slot buffer indexed by hour of day
#[derive(Clone, Debug, PartialEq)]
pub struct HourRing<T>([T; RING_SLOTS]);

impl<T: Clone> HourRing<T> {
    pub fn filled(value: T) -> Self {
        Self(std::array::from_fn(|_| value.clone()))
    }
}

impl<T> HourRing<T> {
    pub fn from_fn(slot_value: impl FnMut(usize) -> T) -> Self {
        Self(std::array::from_fn(slot_value))
    }

    pub fn slots(&self) -> &[T; RING_SLOTS] {
        &self.0
    }

    /// Overwrite one slot; `slot` must already be reduced modulo 24
    pub(crate) fn set(&mut self, slot: usize, value: T) {
        self.0[slot] = value;
    }
}

impl<T> Index<usize> for HourRing<T> {
    type Output = T;

    fn index(&self, slot: usize) -> &T {
        &self.0[slot]
    }
}

/// Persistence layers that keep the ring as a plain list go through here
impl<T> TryFrom<Vec<T>> for HourRing<T> {
    type Error = ProcessingError;

    fn try_from(values: Vec<T>) -> Result<Self, Self::Error> {
        let len = values.len();
        <[T; RING_SLOTS]>::try_from(values)
            .map(Self)
            .map_err(|_| ProcessingError::RingLength { len })
    }
}

/// Pool attributes fixed when the market maker is deployed
#[derive(Clone, Debug, PartialEq)]
pub struct PoolMetadata {
    pub collateral_token: String,
    pub fee: BigInt,
    pub category: Option<String>,
    pub language: Option<String>,
    pub arbitrator: Option<String>,
    pub opening_timestamp: Option<u64>,
    pub timeout: Option<u64>,
    pub creation_timestamp: u64,
}

/// Aggregate state of one fixed-product market maker
#[derive(Clone, Debug, PartialEq)]
pub struct Pool {
    pub id: String,
    pub metadata: PoolMetadata,

    pub outcome_token_amounts: Vec<BigInt>,
    /// `None` while any reserve is zero
    pub outcome_token_marginal_prices: Option<Vec<BigDecimal>>,

    pub liquidity_parameter: BigInt,
    pub scaled_liquidity_parameter: BigDecimal,
    pub usd_liquidity_parameter: BigDecimal,

    pub collateral_volume: BigInt,
    pub usd_volume: BigDecimal,
    pub scaled_collateral_volume: BigDecimal,

    /// Cumulative volume snapshot taken at the start of each hour slot
    pub collateral_volume_before_last_active_day_by_hour: HourRing<BigInt>,
    pub usd_volume_before_last_active_day_by_hour: HourRing<BigDecimal>,
    pub running_daily_volume_by_hour: HourRing<BigInt>,
    pub usd_running_daily_volume_by_hour: HourRing<BigDecimal>,

    pub running_daily_volume: BigInt,
    pub usd_running_daily_volume: BigDecimal,
    pub scaled_running_daily_volume: BigDecimal,

    pub last_active_hour: u64,
    pub last_active_day: u64,
    pub last_active_day_and_running_daily_volume: BigInt,
    pub last_active_day_and_scaled_running_daily_volume: BigInt,
}

impl Pool {
    /// State of a freshly deployed pool with `outcome_slot_count` empty reserves
    pub fn new(address: &str, metadata: PoolMetadata, outcome_slot_count: usize) -> Self {
        Self {
            id: address.to_string(),
            metadata,
            outcome_token_amounts: vec![BigInt::zero(); outcome_slot_count],
            outcome_token_marginal_prices: None,
            liquidity_parameter: BigInt::zero(),
            scaled_liquidity_parameter: BigDecimal::zero(),
            usd_liquidity_parameter: BigDecimal::zero(),
            collateral_volume: BigInt::zero(),
            usd_volume: BigDecimal::zero(),
            scaled_collateral_volume: BigDecimal::zero(),
            collateral_volume_before_last_active_day_by_hour: HourRing::filled(BigInt::zero()),
            usd_volume_before_last_active_day_by_hour: HourRing::filled(BigDecimal::zero()),
            running_daily_volume_by_hour: HourRing::filled(BigInt::zero()),
            usd_running_daily_volume_by_hour: HourRing::filled(BigDecimal::zero()),
            running_daily_volume: BigInt::zero(),
            usd_running_daily_volume: BigDecimal::zero(),
            scaled_running_daily_volume: BigDecimal::zero(),
            last_active_hour: 0,
            last_active_day: 0,
            last_active_day_and_running_daily_volume: BigInt::zero(),
            last_active_day_and_scaled_running_daily_volume: BigInt::zero(),
        }
    }
}

/// Process-wide totals shared by every pool
#[derive(Clone, Debug, PartialEq)]
pub struct Global {
    pub usd_volume: BigDecimal,
    pub usd_per_eth: Option<BigDecimal>,
}

impl Global {
    pub fn new() -> Self {
        Self {
            usd_volume: BigDecimal::zero(),
            usd_per_eth: None,
        }
    }
}

impl Default for Global {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: String,
}

/// Running position of one account in one pool
#[derive(Clone, Debug, PartialEq)]
pub struct FpmmParticipation {
    pub id: String,
    pub pool: String,
    pub participant: String,
    pub pool_tokens: BigDecimal,
    pub pool_tokens_usd: BigDecimal,
    pub outcome_shares: BigDecimal,
    pub outcome_shares_usd: BigDecimal,
    /// Copy of the pool metadata at the time the record was created
    pub metadata: PoolMetadata,
}

impl FpmmParticipation {
    pub fn new(pool: &Pool, participant: &str) -> Self {
        Self {
            id: participation_id(&pool.id, participant),
            pool: pool.id.clone(),
            participant: participant.to_string(),
            pool_tokens: BigDecimal::zero(),
            pool_tokens_usd: BigDecimal::zero(),
            outcome_shares: BigDecimal::zero(),
            outcome_shares_usd: BigDecimal::zero(),
            metadata: pool.metadata.clone(),
        }
    }
}

/// Signed pool-share balance of one account in one pool
#[derive(Clone, Debug, PartialEq)]
pub struct FpmmPoolMembership {
    pub id: String,
    pub pool: String,
    pub funder: String,
    pub amount: BigInt,
}

pub fn participation_id(pool: &str, account: &str) -> String {
    format!("{pool}{account}")
}

pub fn membership_id(pool: &str, account: &str) -> String {
    format!("{pool}{account}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> PoolMetadata {
        PoolMetadata {
            collateral_token: "0xc0".into(),
            fee: BigInt::from(20_000_000_000_000_000u64),
            category: Some("crypto".into()),
            language: Some("en".into()),
            arbitrator: None,
            opening_timestamp: Some(1_700_000_000),
            timeout: Some(86_400),
            creation_timestamp: 1_699_000_000,
        }
    }

    #[test]
    fn new_pool_starts_empty() {
        let pool = Pool::new("0xpool", metadata(), 3);
        assert_eq!(pool.outcome_token_amounts.len(), 3);
        assert!(pool.outcome_token_marginal_prices.is_none());
        assert_eq!(pool.collateral_volume_before_last_active_day_by_hour.slots().len(), 24);
        assert_eq!(pool.last_active_hour, 0);
    }

    #[test]
    fn ring_from_list_requires_24_slots() {
        let ring = HourRing::try_from(vec![BigInt::from(1u64); 24]).unwrap();
        assert_eq!(ring[23], BigInt::from(1u64));

        let short = HourRing::try_from(vec![BigInt::from(1u64); 23]);
        assert_eq!(short, Err(ProcessingError::RingLength { len: 23 }));
    }

    #[test]
    fn participation_snapshots_metadata() {
        let pool = Pool::new("0xpool", metadata(), 2);
        let participation = FpmmParticipation::new(&pool, "0xabc");
        assert_eq!(participation.id, "0xpool0xabc");
        assert_eq!(participation.metadata, pool.metadata);
    }
}
