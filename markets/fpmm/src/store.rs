// ─────────────────────────────────────────────────────────────────────────────
// Collaborator seams: entity persistence and token metadata
// ─────────────────────────────────────────────────────────────────────────────

use crate::entities::{Account, FpmmParticipation, FpmmPoolMembership, Global, Pool};
use fpmm_common::scale_from_decimals;
use std::collections::HashMap;
use substreams::scalar::{BigDecimal, BigInt};

/// Load/save access to every entity the aggregator maintains.
/// Loads return `None` for records that were never saved.
pub trait EntityStore {
    fn load_pool(&self, id: &str) -> Option<Pool>;
    fn save_pool(&mut self, pool: &Pool);

    fn load_global(&self) -> Option<Global>;
    fn save_global(&mut self, global: &Global);

    fn load_account(&self, id: &str) -> Option<Account>;
    fn save_account(&mut self, account: &Account);

    fn load_participation(&self, id: &str) -> Option<FpmmParticipation>;
    fn save_participation(&mut self, participation: &FpmmParticipation);

    fn load_membership(&self, id: &str) -> Option<FpmmPoolMembership>;
    fn save_membership(&mut self, membership: &FpmmPoolMembership);
}

/// Token facts the aggregator needs but does not own
pub trait TokenLookup {
    fn decimals(&self, token: &str) -> Option<u32>;

    /// ETH-denominated price of one whole token, if a feed knows it
    fn eth_per_token(&self, token: &str) -> Option<BigDecimal>;

    /// Raw-unit scale of `token`; 1 when its decimals are unknown
    fn collateral_scale(&self, token: &str) -> BigInt {
        self.decimals(token)
            .map(scale_from_decimals)
            .unwrap_or_else(|| BigInt::from(1u64))
    }
}

/// Load the global record, creating it on first use
pub fn require_global<S: EntityStore + ?Sized>(store: &mut S) -> Global {
    match store.load_global() {
        Some(global) => global,
        None => {
            let global = Global::new();
            store.save_global(&global);
            global
        }
    }
}

/// Make sure an account record exists for `address`
pub fn require_account<S: EntityStore + ?Sized>(store: &mut S, address: &str) {
    if store.load_account(address).is_none() {
        store.save_account(&Account {
            id: address.to_string(),
        });
    }
}

/// In-process entity store
#[derive(Debug, Default)]
pub struct MemoryStore {
    pools: HashMap<String, Pool>,
    global: Option<Global>,
    accounts: HashMap<String, Account>,
    participations: HashMap<String, FpmmParticipation>,
    memberships: HashMap<String, FpmmPoolMembership>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current USD/ETH rate on the global record
    pub fn set_usd_per_eth(&mut self, usd_per_eth: Option<BigDecimal>) {
        let mut global = require_global(self);
        global.usd_per_eth = usd_per_eth;
        self.save_global(&global);
    }

    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn participation_count(&self) -> usize {
        self.participations.len()
    }
}

impl EntityStore for MemoryStore {
    fn load_pool(&self, id: &str) -> Option<Pool> {
        self.pools.get(id).cloned()
    }

    fn save_pool(&mut self, pool: &Pool) {
        self.pools.insert(pool.id.clone(), pool.clone());
    }

    fn load_global(&self) -> Option<Global> {
        self.global.clone()
    }

    fn save_global(&mut self, global: &Global) {
        self.global = Some(global.clone());
    }

    fn load_account(&self, id: &str) -> Option<Account> {
        self.accounts.get(id).cloned()
    }

    fn save_account(&mut self, account: &Account) {
        self.accounts.insert(account.id.clone(), account.clone());
    }

    fn load_participation(&self, id: &str) -> Option<FpmmParticipation> {
        self.participations.get(id).cloned()
    }

    fn save_participation(&mut self, participation: &FpmmParticipation) {
        self.participations
            .insert(participation.id.clone(), participation.clone());
    }

    fn load_membership(&self, id: &str) -> Option<FpmmPoolMembership> {
        self.memberships.get(id).cloned()
    }

    fn save_membership(&mut self, membership: &FpmmPoolMembership) {
        self.memberships
            .insert(membership.id.clone(), membership.clone());
    }
}

#[derive(Clone, Debug, Default)]
struct TokenInfo {
    decimals: Option<u32>,
    eth_per_token: Option<BigDecimal>,
}

/// In-process token metadata keyed by token address
#[derive(Debug, Default)]
pub struct TokenRegistry {
    tokens: HashMap<String, TokenInfo>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_token(
        &mut self,
        token: &str,
        decimals: Option<u32>,
        eth_per_token: Option<BigDecimal>,
    ) {
        self.tokens.insert(
            token.to_string(),
            TokenInfo {
                decimals,
                eth_per_token,
            },
        );
    }
}

impl TokenLookup for TokenRegistry {
    fn decimals(&self, token: &str) -> Option<u32> {
        self.tokens.get(token).and_then(|info| info.decimals)
    }

    fn eth_per_token(&self, token: &str) -> Option<BigDecimal> {
        self.tokens
            .get(token)
            .and_then(|info| info.eth_per_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn global_is_created_once() {
        let mut store = MemoryStore::new();
        assert!(store.load_global().is_none());

        let mut global = require_global(&mut store);
        global.usd_volume = BigDecimal::from_str("12.5").unwrap();
        store.save_global(&global);

        assert_eq!(require_global(&mut store).usd_volume, global.usd_volume);
    }

    #[test]
    fn accounts_are_created_lazily() {
        let mut store = MemoryStore::new();
        require_account(&mut store, "0xabc");
        require_account(&mut store, "0xabc");
        assert_eq!(store.account_count(), 1);
    }

    #[test]
    fn unknown_token_scale_defaults_to_one() {
        let mut tokens = TokenRegistry::new();
        tokens.register_token("0xusdc", Some(6), None);
        tokens.register_token("0xodd", None, None);

        assert_eq!(tokens.collateral_scale("0xusdc"), BigInt::from(1_000_000u64));
        assert_eq!(tokens.collateral_scale("0xodd"), BigInt::from(1u64));
        assert_eq!(tokens.collateral_scale("0xmissing"), BigInt::from(1u64));
    }
}
