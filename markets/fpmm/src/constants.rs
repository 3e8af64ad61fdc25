// ─────────────────────────────────────────────────────────────────────────────
// Constants for fixed-product market maker aggregation
// ─────────────────────────────────────────────────────────────────────────────

/// Length of one volume bucket in seconds
pub const SECONDS_PER_HOUR: u64 = 3600;

/// Number of hourly buckets in the trailing window
pub const HOURS_PER_DAY: u64 = 24;

/// Slots in every hour-of-day ring buffer
pub const RING_SLOTS: usize = 24;

/// Bits reserved for the volume half of a day/volume ranking key
pub const DAY_KEY_SHIFT_BITS: usize = 128;
