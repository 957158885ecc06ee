//! Fork rules and chain parameters.

use alloy_eips::eip2935::HISTORY_STORAGE_ADDRESS;
use alloy_primitives::{Address, map::AddressHashSet};

use crate::params::{MAX_CODE_SIZE, MAX_INIT_CODE_SIZE};

/// Forks active at the block being executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainRules {
    /// Homestead.
    pub is_homestead: bool,
    /// EIP-150 (Tangerine Whistle).
    pub is_eip150: bool,
    /// EIP-158 (Spurious Dragon).
    pub is_eip158: bool,
    /// Byzantium.
    pub is_byzantium: bool,
    /// Constantinople.
    pub is_constantinople: bool,
    /// Petersburg.
    pub is_petersburg: bool,
    /// Istanbul.
    pub is_istanbul: bool,
    /// Berlin.
    pub is_berlin: bool,
    /// London.
    pub is_london: bool,
    /// Shanghai.
    pub is_shanghai: bool,
    /// Cancun.
    pub is_cancun: bool,
    /// Prague.
    pub is_prague: bool,
    /// EIP-4762 (stateless gas costs).
    pub is_eip4762: bool,
}

impl ChainRules {
    /// Every fork up to and including Prague.
    pub const fn prague() -> Self {
        Self {
            is_homestead: true,
            is_eip150: true,
            is_eip158: true,
            is_byzantium: true,
            is_constantinople: true,
            is_petersburg: true,
            is_istanbul: true,
            is_berlin: true,
            is_london: true,
            is_shanghai: true,
            is_cancun: true,
            is_prague: true,
            is_eip4762: false,
        }
    }

    /// Prague with stateless gas costs.
    pub const fn verkle() -> Self {
        Self { is_eip4762: true, ..Self::prague() }
    }
}

/// Chain parameters read by gas functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    /// Maximum init code size accepted by CREATE and CREATE2.
    pub max_init_code_size: u64,
    /// Maximum deployed code size.
    pub max_code_size: u64,
    /// Addresses of the precompiled contracts.
    pub precompiles: AddressHashSet,
    /// Address of the EIP-2935 history storage contract.
    pub history_storage_address: Address,
}

impl ChainConfig {
    /// Replaces the precompile set.
    pub fn with_precompiles(mut self, precompiles: impl IntoIterator<Item = Address>) -> Self {
        self.precompiles = precompiles.into_iter().collect();
        self
    }

    /// Returns `true` if `address` is a precompiled contract.
    pub fn is_precompile(&self, address: &Address) -> bool {
        self.precompiles.contains(address)
    }

    /// Returns `true` if `address` is a precompile or the history storage contract.
    pub fn is_precompile_or_system_contract(&self, address: &Address) -> bool {
        self.is_precompile(address) || *address == self.history_storage_address
    }
}

impl Default for ChainConfig {
    /// Mainnet limits with the Prague precompiles `0x01..=0x11`.
    fn default() -> Self {
        Self {
            max_init_code_size: MAX_INIT_CODE_SIZE,
            max_code_size: MAX_CODE_SIZE,
            precompiles: (1..=0x11).map(Address::with_last_byte).collect(),
            history_storage_address: HISTORY_STORAGE_ADDRESS,
        }
    }
}
