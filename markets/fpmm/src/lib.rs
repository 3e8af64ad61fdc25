// Fixed-Product Market Maker Aggregation
//
// Maintains derived state for conditional-token market makers from their
// decoded event stream: funding added/removed, buys, sells and pool-share
// transfers. Events for a pool must arrive in non-decreasing timestamp order
// and are applied one at a time.
//
// IMPORTANT: Units
// ----------------
// 1. Reserves, volumes and balances are RAW TOKEN UNITS (not decimal-adjusted)
//    Example: 500 USDC (6 decimals) is stored as 500000000
//
// 2. `scaled_*` fields divide by the collateral scale (10^decimals) and
//    `usd_*` fields multiply that by the collateral's USD price, which is
//    zero whenever either the token/ETH or the USD/ETH rate is unknown.

pub mod constants;
pub mod entities;
pub mod error;
pub mod handlers;
pub mod liquidity;
pub mod membership;
pub mod participation;
pub mod pb;
pub mod pricing;
pub mod store;
pub mod volume;

pub use entities::{
    Account, FpmmParticipation, FpmmPoolMembership, Global, HourRing, Pool, PoolMetadata,
};
pub use error::ProcessingError;
pub use handlers::process_events;
pub use store::{EntityStore, MemoryStore, TokenLookup, TokenRegistry};
