//! Storage allotment ledger
//!
//! Tracks per-principal balances in abstract storage units. The engine
//! charges a proposer when a proposal record is allocated and credits the
//! successor when the record is reclaimed, so abandoned proposals always
//! return their deposit to someone.

use crate::engine::error::MultisigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Storage deposit charged per proposal record
pub const PROPOSAL_ALLOTMENT: u64 = 1_000;

/// Balance book of principal identifier to storage units
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StorageLedger {
    balances: HashMap<String, u64>,
}

impl StorageLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balance of a principal
    pub fn balance(&self, principal: &str) -> u64 {
        self.balances.get(principal).copied().unwrap_or(0)
    }

    /// Credit a principal (host faucet or reclamation payout)
    pub fn credit(&mut self, principal: &str, amount: u64) {
        let balance = self.balances.entry(principal.to_string()).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Deduct from a principal, failing if the balance cannot cover it
    pub fn charge(&mut self, principal: &str, amount: u64) -> Result<(), MultisigError> {
        let have = self.balance(principal);
        if have < amount {
            return Err(MultisigError::InsufficientFunds { need: amount, have });
        }
        self.balances.insert(principal.to_string(), have - amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_and_charge() {
        let mut ledger = StorageLedger::new();
        assert_eq!(ledger.balance("alice"), 0);

        ledger.credit("alice", 5_000);
        assert_eq!(ledger.balance("alice"), 5_000);

        ledger.charge("alice", PROPOSAL_ALLOTMENT).unwrap();
        assert_eq!(ledger.balance("alice"), 4_000);
    }

    #[test]
    fn test_overdraft_rejected() {
        let mut ledger = StorageLedger::new();
        ledger.credit("bob", 10);

        let result = ledger.charge("bob", 11);
        assert!(matches!(
            result,
            Err(MultisigError::InsufficientFunds { need: 11, have: 10 })
        ));
        // Failed charge must not touch the balance
        assert_eq!(ledger.balance("bob"), 10);
    }
}
