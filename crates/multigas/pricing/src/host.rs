//! Interfaces to the interpreter state read by gas functions.

use alloy_primitives::{Address, B256, Bytes, U256};

use crate::GasError;

/// World state and per-transaction substate.
pub trait StateDb {
    /// Returns the current value of a storage slot.
    fn state(&self, address: Address, slot: B256) -> B256;

    /// Returns the value of a storage slot at the start of the transaction.
    fn committed_state(&self, address: Address, slot: B256) -> B256;

    /// Returns `true` if the account exists.
    fn exists(&self, address: Address) -> bool;

    /// Returns `true` if the account is empty according to EIP-161.
    fn is_empty(&self, address: Address) -> bool;

    /// Returns the balance of the account.
    fn balance(&self, address: Address) -> U256;

    /// Returns the code of the account.
    fn code(&self, address: Address) -> Bytes;

    /// Returns `true` if the account self-destructed in this transaction.
    fn has_self_destructed(&self, address: Address) -> bool;

    /// Adds gas to the refund counter.
    fn add_refund(&mut self, gas: u64);

    /// Removes gas from the refund counter.
    fn sub_refund(&mut self, gas: u64);

    /// Returns `true` if the address is warm.
    fn address_in_access_list(&self, address: Address) -> bool;

    /// Returns whether the address and the slot are warm.
    fn slot_in_access_list(&self, address: Address, slot: B256) -> (bool, bool);

    /// Marks the address as warm.
    fn add_address_to_access_list(&mut self, address: Address);

    /// Marks the slot, and its address, as warm.
    fn add_slot_to_access_list(&mut self, address: Address, slot: B256);
}

/// EIP-4762 witness charging.
///
/// Each method records the access and returns the gas it costs, which may exceed
/// `available_gas`. Callers compare the two.
pub trait AccessEvents {
    /// Access to a storage slot.
    fn slot_gas(
        &mut self,
        address: Address,
        slot: B256,
        is_write: bool,
        available_gas: u64,
        charge_warm_costs: bool,
    ) -> u64;

    /// Access to the basic data leaf of an account.
    fn basic_data_gas(
        &mut self,
        address: Address,
        is_write: bool,
        available_gas: u64,
        charge_warm_costs: bool,
    ) -> u64;

    /// Access to the code hash leaf of an account.
    fn code_hash_gas(
        &mut self,
        address: Address,
        is_write: bool,
        available_gas: u64,
        charge_warm_costs: bool,
    ) -> u64;

    /// Accesses of a value transfer between two accounts.
    fn value_transfer_gas(&mut self, caller: Address, target: Address, available_gas: u64) -> u64;

    /// Accesses of a message call to `target`.
    fn message_call_gas(&mut self, target: Address, available_gas: u64) -> u64;

    /// Accesses of a newly created account.
    fn add_account(&mut self, address: Address, is_write: bool, available_gas: u64) -> u64;

    /// Access to a range of code chunks. Returns the consumed and the wanted gas.
    fn code_chunks_range_gas(
        &mut self,
        address: Address,
        start: u64,
        size: u64,
        code_len: u64,
        is_write: bool,
        available_gas: u64,
    ) -> (u64, u64);
}

/// Everything a gas function may touch.
pub trait Host: StateDb + AccessEvents {}

impl<T: StateDb + AccessEvents> Host for T {}

/// Read-only view of the operand stack. The top of the stack is the last element.
#[derive(Debug, Clone, Copy)]
pub struct Stack<'a> {
    data: &'a [U256],
}

impl<'a> Stack<'a> {
    /// Wraps the stack items, bottom first.
    pub const fn new(data: &'a [U256]) -> Self {
        Self { data }
    }

    /// Returns the `n`-th item from the top.
    pub fn back(&self, n: usize) -> Result<&'a U256, GasError> {
        self.data
            .len()
            .checked_sub(n + 1)
            .map(|i| &self.data[i])
            .ok_or(GasError::StackUnderflow { depth: self.data.len(), required: n + 1 })
    }

    /// Returns the top item.
    pub fn peek(&self) -> Result<&'a U256, GasError> {
        self.back(0)
    }

    /// Returns the stack depth.
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the stack is empty.
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// The executing call frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contract {
    /// Address of the executing account.
    pub address: Address,
    /// Gas left in the frame.
    pub gas: u64,
    /// Code being executed.
    pub code: Bytes,
    /// The frame runs init code.
    pub is_deployment: bool,
    /// The frame was started by the protocol rather than a transaction.
    pub is_system_call: bool,
}

impl Contract {
    /// Creates a frame for `address` with `gas` left.
    pub fn new(address: Address, gas: u64) -> Self {
        Self { address, gas, ..Default::default() }
    }

    /// Sets the executing code.
    pub fn with_code(mut self, code: impl Into<Bytes>) -> Self {
        self.code = code.into();
        self
    }

    /// Deducts `gas`. Returns `false`, leaving the frame untouched, if it cannot be afforded.
    pub const fn use_gas(&mut self, gas: u64) -> bool {
        if self.gas < gas {
            return false;
        }
        self.gas -= gas;
        true
    }
}

/// Interprets a stack word as an address, keeping the low 20 bytes.
pub(crate) fn word_to_address(word: &U256) -> Address {
    Address::from_word(B256::from(*word))
}

/// Interprets a stack word as a storage slot.
pub(crate) fn word_to_slot(word: &U256) -> B256 {
    B256::from(*word)
}

/// Converts a stack word to a `u64`, failing if it does not fit.
pub(crate) fn word_to_u64(word: &U256) -> Result<u64, GasError> {
    u64::try_from(*word).map_err(|_| GasError::GasUintOverflow)
}
