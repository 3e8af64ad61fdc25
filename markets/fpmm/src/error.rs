use thiserror::Error;

/// Reasons an event, or one step of it, is skipped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessingError {
    #[error("pool {0} not found")]
    PoolNotFound(String),

    #[error("event carries {got} outcome amounts but pool has {expected}")]
    OutcomeCountMismatch { expected: usize, got: usize },

    #[error("outcome index {index} out of range for {outcome_count} outcomes")]
    OutcomeIndexOutOfRange { index: u64, outcome_count: usize },

    #[error("invalid amount {0:?}")]
    InvalidAmount(String),

    #[error("hourly volume ring has {len} slots, expected 24")]
    RingLength { len: usize },

    #[error("hour in day {slot} out of range")]
    HourOutOfRange { slot: u64 },

    #[error("current hour {current_hour} not after last active hour {last_active_hour}")]
    NonPositiveHourDelta {
        current_hour: u64,
        last_active_hour: u64,
    },
}
