//! Memory expansion pricing.

use base_multigas::MultiGas;

use crate::{
    GasError,
    params::{MAX_MEMORY_SIZE, MEMORY_GAS, QUAD_COEFF_DIV},
};

/// The parts of interpreter memory that expansion pricing reads.
pub trait Memory {
    /// Returns the current size in bytes.
    fn len(&self) -> u64;

    /// Returns `true` if nothing was allocated yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the total expansion cost charged so far.
    fn last_gas_cost(&self) -> u64;

    /// Records the total expansion cost charged so far.
    fn set_last_gas_cost(&mut self, cost: u64);
}

/// Memory bookkeeping without the backing bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryGasState {
    /// Current size in bytes.
    pub len: u64,
    /// Total expansion cost charged so far.
    pub last_gas_cost: u64,
}

impl MemoryGasState {
    /// Creates empty memory.
    pub const fn new() -> Self {
        Self { len: 0, last_gas_cost: 0 }
    }
}

impl Memory for MemoryGasState {
    fn len(&self) -> u64 {
        self.len
    }

    fn last_gas_cost(&self) -> u64 {
        self.last_gas_cost
    }

    fn set_last_gas_cost(&mut self, cost: u64) {
        self.last_gas_cost = cost;
    }
}

/// Rounds a byte size up to 32-byte words.
pub const fn to_word_size(size: u64) -> u64 {
    if size > u64::MAX - 31 {
        return u64::MAX / 32 + 1;
    }
    size.div_ceil(32)
}

/// Prices the expansion of memory to `new_mem_size` bytes. Only the expanded region is charged.
///
/// Expansion is computation.
pub fn memory_gas_cost(mem: &mut dyn Memory, new_mem_size: u64) -> Result<MultiGas, GasError> {
    if new_mem_size == 0 {
        return Ok(MultiGas::ZERO);
    }
    if new_mem_size > MAX_MEMORY_SIZE {
        return Err(GasError::GasUintOverflow);
    }
    let words = to_word_size(new_mem_size);
    if words * 32 <= mem.len() {
        return Ok(MultiGas::ZERO);
    }

    let total = words * MEMORY_GAS + words * words / QUAD_COEFF_DIV;
    let fee = total.saturating_sub(mem.last_gas_cost());
    mem.set_last_gas_cost(total);
    Ok(MultiGas::computation_gas(fee))
}
