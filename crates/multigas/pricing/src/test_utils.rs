//! In-memory host for gas function tests.

use std::collections::{HashMap, HashSet};

use alloy_primitives::{Address, B256, Bytes, U256};

use crate::{AccessEvents, StateDb};

/// Fixed costs returned by the witness charging methods.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct WitnessCosts {
    pub(crate) slot: u64,
    pub(crate) basic_data: u64,
    pub(crate) basic_data_write: u64,
    pub(crate) code_hash: u64,
    pub(crate) value_transfer: u64,
    pub(crate) message_call: u64,
    pub(crate) add_account: u64,
    pub(crate) code_chunks: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MockAccount {
    pub(crate) balance: U256,
    pub(crate) code: Bytes,
}

#[derive(Debug, Default)]
pub(crate) struct MockHost {
    pub(crate) storage: HashMap<(Address, B256), B256>,
    pub(crate) committed: HashMap<(Address, B256), B256>,
    pub(crate) accounts: HashMap<Address, MockAccount>,
    pub(crate) self_destructed: HashSet<Address>,
    pub(crate) refund: u64,
    pub(crate) warm_addresses: HashSet<Address>,
    pub(crate) warm_slots: HashSet<(Address, B256)>,
    pub(crate) witness: WitnessCosts,
}

impl MockHost {
    /// Sets the slot value both at transaction start and now.
    pub(crate) fn commit_state(&mut self, address: Address, slot: B256, value: B256) {
        self.committed.insert((address, slot), value);
        self.storage.insert((address, slot), value);
    }

    pub(crate) fn set_state(&mut self, address: Address, slot: B256, value: B256) {
        self.storage.insert((address, slot), value);
    }

    pub(crate) fn create_account(&mut self, address: Address) {
        self.accounts.entry(address).or_default();
    }

    pub(crate) fn set_balance(&mut self, address: Address, balance: u64) {
        self.accounts.entry(address).or_default().balance = U256::from(balance);
    }

    pub(crate) fn set_code(&mut self, address: Address, code: impl Into<Bytes>) {
        self.accounts.entry(address).or_default().code = code.into();
    }
}

impl StateDb for MockHost {
    fn state(&self, address: Address, slot: B256) -> B256 {
        self.storage.get(&(address, slot)).copied().unwrap_or_default()
    }

    fn committed_state(&self, address: Address, slot: B256) -> B256 {
        self.committed.get(&(address, slot)).copied().unwrap_or_default()
    }

    fn exists(&self, address: Address) -> bool {
        self.accounts.contains_key(&address)
    }

    fn is_empty(&self, address: Address) -> bool {
        self.accounts.get(&address).is_none_or(|a| a.balance.is_zero() && a.code.is_empty())
    }

    fn balance(&self, address: Address) -> U256 {
        self.accounts.get(&address).map(|a| a.balance).unwrap_or_default()
    }

    fn code(&self, address: Address) -> Bytes {
        self.accounts.get(&address).map(|a| a.code.clone()).unwrap_or_default()
    }

    fn has_self_destructed(&self, address: Address) -> bool {
        self.self_destructed.contains(&address)
    }

    fn add_refund(&mut self, gas: u64) {
        self.refund += gas;
    }

    fn sub_refund(&mut self, gas: u64) {
        self.refund = self.refund.checked_sub(gas).expect("refund counter below zero");
    }

    fn address_in_access_list(&self, address: Address) -> bool {
        self.warm_addresses.contains(&address)
    }

    fn slot_in_access_list(&self, address: Address, slot: B256) -> (bool, bool) {
        (self.warm_addresses.contains(&address), self.warm_slots.contains(&(address, slot)))
    }

    fn add_address_to_access_list(&mut self, address: Address) {
        self.warm_addresses.insert(address);
    }

    fn add_slot_to_access_list(&mut self, address: Address, slot: B256) {
        self.warm_addresses.insert(address);
        self.warm_slots.insert((address, slot));
    }
}

impl AccessEvents for MockHost {
    fn slot_gas(&mut self, _: Address, _: B256, _: bool, _: u64, _: bool) -> u64 {
        self.witness.slot
    }

    fn basic_data_gas(&mut self, _: Address, is_write: bool, _: u64, _: bool) -> u64 {
        if is_write { self.witness.basic_data_write } else { self.witness.basic_data }
    }

    fn code_hash_gas(&mut self, _: Address, _: bool, _: u64, _: bool) -> u64 {
        self.witness.code_hash
    }

    fn value_transfer_gas(&mut self, _: Address, _: Address, _: u64) -> u64 {
        self.witness.value_transfer
    }

    fn message_call_gas(&mut self, _: Address, _: u64) -> u64 {
        self.witness.message_call
    }

    fn add_account(&mut self, _: Address, _: bool, _: u64) -> u64 {
        self.witness.add_account
    }

    fn code_chunks_range_gas(
        &mut self,
        _: Address,
        _: u64,
        _: u64,
        _: u64,
        _: bool,
        _: u64,
    ) -> (u64, u64) {
        (self.witness.code_chunks, self.witness.code_chunks)
    }
}

/// Encodes a small integer as a storage word.
pub(crate) fn word(value: u64) -> B256 {
    B256::from(U256::from(value))
}
