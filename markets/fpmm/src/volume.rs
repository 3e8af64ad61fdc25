// ─────────────────────────────────────────────────────────────────────────────
// Trailing 24h volume over an hour-of-day ring of cumulative snapshots
// ─────────────────────────────────────────────────────────────────────────────
//
// Each ring slot holds the pool's cumulative volume as of the start of the
// most recent occurrence of that hour. Subtracting a slot from the current
// cumulative volume gives the volume traded since then, so the slot one hour
// ahead of "now" yields the full trailing day. Work per trade is bounded by
// the ring size no matter how long the pool sat idle.

use crate::constants::{DAY_KEY_SHIFT_BITS, HOURS_PER_DAY, RING_SLOTS, SECONDS_PER_HOUR};
use crate::entities::{Global, HourRing, Pool};
use crate::error::ProcessingError;
use crate::liquidity::CollateralPricing;
use fpmm_common::{normalize_to_precision, shift_left};
use substreams::scalar::BigInt;

/// Position of a timestamp on the hour/day grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HourClock {
    pub hour: u64,
    pub day: u64,
    pub hour_in_day: usize,
}

impl HourClock {
    pub fn from_timestamp(timestamp: u64) -> Result<Self, ProcessingError> {
        let hour = timestamp / SECONDS_PER_HOUR;

        Ok(Self {
            hour,
            day: hour / HOURS_PER_DAY,
            hour_in_day: hour_slot(hour)?,
        })
    }
}

fn hour_slot(hour: u64) -> Result<usize, ProcessingError> {
    let slot = hour % HOURS_PER_DAY;
    usize::try_from(slot)
        .ok()
        .filter(|index| *index < RING_SLOTS)
        .ok_or(ProcessingError::HourOutOfRange { slot })
}

/// Sortable key ordering pools by active day first, then by volume
pub fn join_day_and_volume(day: u64, volume: &BigInt) -> BigInt {
    shift_left(&BigInt::from(day), DAY_KEY_SHIFT_BITS) + volume.clone()
}

/// Same as [`join_day_and_volume`] with the volume lifted to 18 decimals first
pub fn join_day_and_scaled_volume(day: u64, volume: &BigInt, scale: &BigInt) -> BigInt {
    join_day_and_volume(day, &normalize_to_precision(volume, scale))
}

/// Record a trade of `amount` raw collateral units at `timestamp`
///
/// Every precondition is checked before the pool or the global record is
/// touched, so a rejected trade leaves both exactly as they were.
pub fn increase_volume(
    global: &mut Global,
    pool: &mut Pool,
    amount: &BigInt,
    timestamp: u64,
    pricing: &CollateralPricing,
) -> Result<(), ProcessingError> {
    let clock = HourClock::from_timestamp(timestamp)?;

    let mut collateral_by_hour = pool.collateral_volume_before_last_active_day_by_hour.clone();
    let mut usd_by_hour = pool.usd_volume_before_last_active_day_by_hour.clone();
    let mut last_active = (pool.last_active_hour, pool.last_active_day);

    if clock.hour != pool.last_active_hour {
        let last_active_slot = hour_slot(pool.last_active_hour)?;
        let delta_hours = clock
            .hour
            .checked_sub(pool.last_active_hour)
            .filter(|delta| *delta > 0)
            .ok_or(ProcessingError::NonPositiveHourDelta {
                current_hour: clock.hour,
                last_active_hour: pool.last_active_hour,
            })?;

        // Every hour after the last active one up to now starts at the
        // pre-trade total; a gap of a day or more refreshes the whole ring
        let stale_slots = if delta_hours >= HOURS_PER_DAY {
            RING_SLOTS
        } else {
            delta_hours as usize
        };
        for offset in 1..=stale_slots {
            let slot = (last_active_slot + offset) % RING_SLOTS;
            collateral_by_hour.set(slot, pool.collateral_volume.clone());
            usd_by_hour.set(slot, pool.usd_volume.clone());
        }

        last_active = (clock.hour, clock.day);
    }

    let collateral_volume = pool.collateral_volume.clone() + amount.clone();
    let usd_added = pricing.usd_value(amount);
    let usd_volume = pool.usd_volume.clone() + usd_added.clone();

    let running_by_hour =
        HourRing::from_fn(|slot| collateral_volume.clone() - collateral_by_hour[slot].clone());
    let usd_running_by_hour =
        HourRing::from_fn(|slot| usd_volume.clone() - usd_by_hour[slot].clone());

    let window_start = (clock.hour_in_day + 1) % RING_SLOTS;
    let running_daily_volume = running_by_hour[window_start].clone();

    pool.scaled_collateral_volume = pricing.scaled(&collateral_volume);
    pool.scaled_running_daily_volume = pricing.scaled(&running_daily_volume);
    pool.last_active_day_and_running_daily_volume =
        join_day_and_volume(clock.day, &running_daily_volume);
    pool.last_active_day_and_scaled_running_daily_volume =
        join_day_and_scaled_volume(clock.day, &running_daily_volume, &pricing.scale);

    pool.usd_running_daily_volume = usd_running_by_hour[window_start].clone();
    pool.running_daily_volume = running_daily_volume;
    pool.running_daily_volume_by_hour = running_by_hour;
    pool.usd_running_daily_volume_by_hour = usd_running_by_hour;
    pool.collateral_volume_before_last_active_day_by_hour = collateral_by_hour;
    pool.usd_volume_before_last_active_day_by_hour = usd_by_hour;
    pool.collateral_volume = collateral_volume;
    pool.usd_volume = usd_volume;
    (pool.last_active_hour, pool.last_active_day) = last_active;

    global.usd_volume = global.usd_volume.clone() + usd_added;

    Ok(())
}
