//! World state: the map from address to account.
//!
//! No MPT root hashing and no checkpoint/journal machinery — a sub-frame's
//! writes simply stay in the shared map even if that frame later fails.

use std::collections::HashMap;

use ethereum_types::Address;

use crate::word::Word;

/// `σ(a)` in yellow-paper terms: one account's balance, nonce, code, and
/// storage.
#[derive(Debug, Clone, Default)]
pub struct AccountState {
    pub balance: Word,
    pub nonce: Word,
    pub code: Vec<u8>,
    pub storage: HashMap<Word, Word>,
}

impl AccountState {
    pub fn with_code(code: Vec<u8>) -> Self {
        Self {
            code,
            ..Default::default()
        }
    }

    pub fn has_code(&self) -> bool {
        !self.code.is_empty()
    }
}

/// The world state threaded, by shared reference, through every frame and
/// sub-frame of one top-level call.
#[derive(Debug, Clone, Default)]
pub struct WorldState {
    accounts: HashMap<Address, AccountState>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_account(&self, address: &Address) -> Option<&AccountState> {
        self.accounts.get(address)
    }

    /// Accounts are created lazily: any mutation to a not-yet-seen address
    /// materializes a zeroed `AccountState`, mirroring real-EVM "implicit
    /// account creation on first touch" semantics for balance/storage
    /// writes.
    pub fn account_mut(&mut self, address: Address) -> &mut AccountState {
        self.accounts.entry(address).or_default()
    }

    pub fn insert(&mut self, address: Address, account: AccountState) {
        self.accounts.insert(address, account);
    }

    pub fn account_exists(&self, address: &Address) -> bool {
        self.accounts.contains_key(address)
    }

    pub fn get_balance(&self, address: &Address) -> Word {
        self.accounts
            .get(address)
            .map(|a| a.balance)
            .unwrap_or_default()
    }

    pub fn set_balance(&mut self, address: Address, balance: Word) {
        self.account_mut(address).balance = balance;
    }

    pub fn get_nonce(&self, address: &Address) -> Word {
        self.accounts
            .get(address)
            .map(|a| a.nonce)
            .unwrap_or_default()
    }

    pub fn get_code(&self, address: &Address) -> &[u8] {
        self.accounts
            .get(address)
            .map(|a| a.code.as_slice())
            .unwrap_or(&[])
    }

    pub fn set_code(&mut self, address: Address, code: Vec<u8>) {
        self.account_mut(address).code = code;
    }

    /// `SLOAD` semantics: an unset key reads as zero, without creating the
    /// account as a side effect.
    pub fn get_storage(&self, address: &Address, key: Word) -> Word {
        self.accounts
            .get(address)
            .and_then(|a| a.storage.get(&key))
            .copied()
            .unwrap_or_default()
    }

    /// `SSTORE` semantics: persists into the executing contract's storage.
    pub fn set_storage(&mut self, address: Address, key: Word, value: Word) {
        self.account_mut(address).storage.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_storage_key_reads_zero() {
        let state = WorldState::new();
        let addr = Address::zero();
        assert_eq!(state.get_storage(&addr, Word::from(1)), Word::zero());
    }

    #[test]
    fn sstore_then_sload_round_trips() {
        let mut state = WorldState::new();
        let addr = Address::from_low_u64_be(1);
        state.set_storage(addr, Word::from(5), Word::from(42));
        assert_eq!(state.get_storage(&addr, Word::from(5)), Word::from(42));
    }

    #[test]
    fn account_without_code_has_empty_code() {
        let state = WorldState::new();
        let addr = Address::from_low_u64_be(2);
        assert!(state.get_code(&addr).is_empty());
        assert!(!state.account_exists(&addr));
    }
}
