// ─────────────────────────────────────────────────────────────────────────────
// Pool-share balances built from share token transfers
// ─────────────────────────────────────────────────────────────────────────────

use crate::entities::{membership_id, FpmmPoolMembership};
use crate::store::{require_account, EntityStore};
use substreams::scalar::BigInt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferSide {
    Sender,
    Receiver,
}

/// Apply one side of a pool-share transfer to that account's balance
///
/// Sides are processed independently, so a balance may go negative when a
/// transfer out is seen before the matching transfer in.
pub fn record_membership<S: EntityStore + ?Sized>(
    store: &mut S,
    pool_id: &str,
    account: &str,
    value: &BigInt,
    side: TransferSide,
) {
    require_account(store, account);

    let delta = match side {
        TransferSide::Sender => value.clone().neg(),
        TransferSide::Receiver => value.clone(),
    };

    let id = membership_id(pool_id, account);
    let membership = match store.load_membership(&id) {
        Some(mut membership) => {
            membership.amount = membership.amount.clone() + delta;
            membership
        }
        None => FpmmPoolMembership {
            id,
            pool: pool_id.to_string(),
            funder: account.to_string(),
            amount: delta,
        },
    };

    store.save_membership(&membership);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn balance(store: &MemoryStore, account: &str) -> BigInt {
        store
            .load_membership(&membership_id("0xpool", account))
            .unwrap()
            .amount
    }

    fn transfer(store: &mut MemoryStore, from: &str, to: &str, value: u64) {
        let value = BigInt::from(value);
        record_membership(store, "0xpool", from, &value, TransferSide::Sender);
        record_membership(store, "0xpool", to, &value, TransferSide::Receiver);
    }

    #[test]
    fn balances_are_signed() {
        let mut store = MemoryStore::new();
        transfer(&mut store, "0xa", "0xb", 100);
        assert_eq!(balance(&store, "0xa"), BigInt::zero() - BigInt::from(100u64));
        assert_eq!(balance(&store, "0xb"), BigInt::from(100u64));

        transfer(&mut store, "0xb", "0xc", 30);
        assert_eq!(balance(&store, "0xb"), BigInt::from(70u64));
        assert_eq!(balance(&store, "0xc"), BigInt::from(30u64));
        assert_eq!(store.account_count(), 3);
    }
}
