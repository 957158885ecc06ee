//! Dynamic gas functions predating access lists.
//!
//! Classification:
//!
//! - memory expansion, hashing for CREATE2, init code, LOG base cost and the value transfer or
//!   forwarded gas of calls are computation;
//! - LOG topics and data that end up in receipts are history growth;
//! - writing a fresh storage slot or creating an account is storage growth;
//! - any other storage write is storage access;
//! - copy, KECCAK256 and EXP costs are not classified yet.

use alloy_primitives::{Address, B256, U256};
use base_multigas::{MultiGas, ResourceKind};

use crate::{
    CheckedMultiGas, Contract, Evm, GasError, Host, Memory, Stack,
    host::{word_to_address, word_to_slot, word_to_u64},
    memory::{memory_gas_cost, to_word_size},
    params::*,
};

/// Returns the gas forwarded to a callee.
///
/// After EIP-150 the callee receives at most 63/64 of what is left once `base` is paid.
pub fn call_gas(
    is_eip150: bool,
    available_gas: u64,
    base: u64,
    call_cost: &U256,
) -> Result<u64, GasError> {
    if is_eip150 {
        let available = available_gas.saturating_sub(base);
        let gas = available - available / 64;
        match u64::try_from(*call_cost) {
            Ok(requested) if requested <= gas => {}
            _ => return Ok(gas),
        }
    }
    word_to_u64(call_cost)
}

/// Copy opcodes: memory expansion plus [`COPY_GAS`] per word, the size operand being at
/// stack position `POS`.
pub fn memory_copier_gas<H: Host, const POS: usize>(
    _evm: &mut Evm<'_, H>,
    _contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    let gas = memory_gas_cost(mem, memory_size)?;
    let words = word_to_u64(stack.back(POS)?)?;
    let copy = to_word_size(words).checked_mul(COPY_GAS).ok_or(GasError::GasUintOverflow)?;
    // TODO: classify copy costs once the resource split of data copies is settled.
    gas.try_increment(ResourceKind::Unknown, copy)
}

/// CALLDATACOPY, CODECOPY, MCOPY and RETURNDATACOPY.
pub fn gas_copy<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    memory_copier_gas::<H, 2>(evm, contract, stack, mem, memory_size)
}

/// EXTCODECOPY before EIP-2929.
pub fn gas_ext_code_copy<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    memory_copier_gas::<H, 3>(evm, contract, stack, mem, memory_size)
}

/// Operations whose only dynamic cost is memory expansion: RETURN, REVERT, MLOAD, MSTORE,
/// MSTORE8 and CREATE before EIP-3860.
pub fn pure_memory_gas<H: Host>(
    _evm: &mut Evm<'_, H>,
    _contract: &mut Contract,
    _stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    memory_gas_cost(mem, memory_size)
}

/// SSTORE before Istanbul.
///
/// Petersburg, or any block before Constantinople, uses the legacy schedule which only looks at
/// the current value. Constantinople alone uses EIP-1283 net metering.
pub fn gas_sstore<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    _mem: &mut dyn Memory,
    _memory_size: u64,
) -> Result<MultiGas, GasError> {
    let slot = word_to_slot(stack.back(0)?);
    let value = word_to_slot(stack.back(1)?);
    let current = evm.host.state(contract.address, slot);

    if evm.rules.is_petersburg || !evm.rules.is_constantinople {
        return Ok(if current.is_zero() && !value.is_zero() {
            MultiGas::storage_growth_gas(SSTORE_SET_GAS)
        } else if !current.is_zero() && value.is_zero() {
            evm.host.add_refund(SSTORE_REFUND_GAS);
            MultiGas::storage_access_gas(SSTORE_CLEAR_GAS)
        } else {
            MultiGas::storage_access_gas(SSTORE_RESET_GAS)
        });
    }

    Ok(net_sstore_gas(&mut *evm.host, contract.address, slot, current, value, &EIP1283_SCHEDULE))
}

/// SSTORE under EIP-2200 (Istanbul).
pub fn gas_sstore_eip2200<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    _mem: &mut dyn Memory,
    _memory_size: u64,
) -> Result<MultiGas, GasError> {
    if contract.gas <= SSTORE_SENTRY_GAS_EIP2200 {
        return Err(GasError::ReentrancySentry);
    }
    let slot = word_to_slot(stack.back(0)?);
    let value = word_to_slot(stack.back(1)?);
    let current = evm.host.state(contract.address, slot);

    Ok(net_sstore_gas(&mut *evm.host, contract.address, slot, current, value, &EIP2200_SCHEDULE))
}

/// Costs and refunds of net gas metering for SSTORE.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NetSstoreSchedule {
    /// Current value equals the new value, or the slot is dirty.
    pub(crate) noop: u64,
    /// Clean slot from zero to non-zero.
    pub(crate) init: u64,
    /// Clean non-zero slot to something else.
    pub(crate) clean: u64,
    /// Refund for clearing an originally non-zero slot.
    pub(crate) clear_refund: u64,
    /// Refund for resetting an originally zero slot.
    pub(crate) reset_clear_refund: u64,
    /// Refund for resetting an originally non-zero slot.
    pub(crate) reset_refund: u64,
}

const EIP1283_SCHEDULE: NetSstoreSchedule = NetSstoreSchedule {
    noop: NET_SSTORE_NOOP_GAS,
    init: NET_SSTORE_INIT_GAS,
    clean: NET_SSTORE_CLEAN_GAS,
    clear_refund: NET_SSTORE_CLEAR_REFUND,
    reset_clear_refund: NET_SSTORE_RESET_CLEAR_REFUND,
    reset_refund: NET_SSTORE_RESET_REFUND,
};

const EIP2200_SCHEDULE: NetSstoreSchedule = NetSstoreSchedule {
    noop: SLOAD_GAS_EIP2200,
    init: SSTORE_SET_GAS_EIP2200,
    clean: SSTORE_RESET_GAS_EIP2200,
    clear_refund: SSTORE_CLEARS_SCHEDULE_REFUND_EIP2200,
    reset_clear_refund: SSTORE_SET_GAS_EIP2200 - SLOAD_GAS_EIP2200,
    reset_refund: SSTORE_RESET_GAS_EIP2200 - SLOAD_GAS_EIP2200,
};

/// Net gas metering shared by EIP-1283, EIP-2200 and EIP-2929.
///
/// Creating a slot is storage growth, every other outcome is storage access.
pub(crate) fn net_sstore_gas<H: Host>(
    host: &mut H,
    address: Address,
    slot: B256,
    current: B256,
    value: B256,
    schedule: &NetSstoreSchedule,
) -> MultiGas {
    if current == value {
        return MultiGas::storage_access_gas(schedule.noop);
    }
    let original = host.committed_state(address, slot);
    if original == current {
        if original.is_zero() {
            return MultiGas::storage_growth_gas(schedule.init);
        }
        if value.is_zero() {
            host.add_refund(schedule.clear_refund);
        }
        return MultiGas::storage_access_gas(schedule.clean);
    }
    if !original.is_zero() {
        if current.is_zero() {
            host.sub_refund(schedule.clear_refund);
        } else if value.is_zero() {
            host.add_refund(schedule.clear_refund);
        }
    }
    if original == value {
        if original.is_zero() {
            host.add_refund(schedule.reset_clear_refund);
        } else {
            host.add_refund(schedule.reset_refund);
        }
    }
    MultiGas::storage_access_gas(schedule.noop)
}

/// LOG0 to LOG4, `N` being the number of topics.
///
/// Each topic stores [`LOG_TOPIC_BYTES`] in history, charged at [`LOG_DATA_GAS`] per byte as
/// history growth. The rest of [`LOG_TOPIC_GAS`] is computation.
pub fn gas_log<H: Host, const N: u64>(
    _evm: &mut Evm<'_, H>,
    _contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    const TOPIC_HISTORY_GAS: u64 = LOG_TOPIC_BYTES * LOG_DATA_GAS;
    const TOPIC_COMPUTATION_GAS: u64 = LOG_TOPIC_GAS - TOPIC_HISTORY_GAS;

    let requested_size = word_to_u64(stack.back(1)?)?;
    let data_gas = requested_size.checked_mul(LOG_DATA_GAS).ok_or(GasError::GasUintOverflow)?;

    memory_gas_cost(mem, memory_size)?
        .try_increment(ResourceKind::Computation, LOG_GAS)?
        .try_increment(ResourceKind::HistoryGrowth, N * TOPIC_HISTORY_GAS)?
        .try_increment(ResourceKind::Computation, N * TOPIC_COMPUTATION_GAS)?
        .try_increment(ResourceKind::HistoryGrowth, data_gas)
}

/// KECCAK256.
pub fn gas_keccak256<H: Host>(
    _evm: &mut Evm<'_, H>,
    _contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    let gas = memory_gas_cost(mem, memory_size)?;
    let size = word_to_u64(stack.back(1)?)?;
    let word_gas =
        to_word_size(size).checked_mul(KECCAK256_WORD_GAS).ok_or(GasError::GasUintOverflow)?;
    gas.try_increment(ResourceKind::Unknown, word_gas)
}

/// CREATE2 before EIP-3860: memory expansion plus hashing of the init code.
pub fn gas_create2<H: Host>(
    _evm: &mut Evm<'_, H>,
    _contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    let gas = memory_gas_cost(mem, memory_size)?;
    let size = word_to_u64(stack.back(2)?)?;
    let word_gas =
        to_word_size(size).checked_mul(KECCAK256_WORD_GAS).ok_or(GasError::GasUintOverflow)?;
    gas.try_increment(ResourceKind::Computation, word_gas)
}

fn init_code_words<H>(evm: &Evm<'_, H>, stack: &Stack<'_>) -> Result<u64, GasError> {
    let size = word_to_u64(stack.back(2)?)?;
    let limit = evm.config.max_init_code_size;
    if size > limit {
        return Err(GasError::MaxInitCodeSizeExceeded { size, limit });
    }
    Ok(to_word_size(size))
}

/// CREATE under EIP-3860: memory expansion plus [`INIT_CODE_WORD_GAS`] per word.
pub fn gas_create_eip3860<H: Host>(
    evm: &mut Evm<'_, H>,
    _contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    let gas = memory_gas_cost(mem, memory_size)?;
    let words = init_code_words(evm, stack)?;
    gas.try_increment(ResourceKind::Computation, INIT_CODE_WORD_GAS * words)
}

/// CREATE2 under EIP-3860: init code words are charged and hashed.
pub fn gas_create2_eip3860<H: Host>(
    evm: &mut Evm<'_, H>,
    _contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    let gas = memory_gas_cost(mem, memory_size)?;
    let words = init_code_words(evm, stack)?;
    gas.try_increment(ResourceKind::Computation, (INIT_CODE_WORD_GAS + KECCAK256_WORD_GAS) * words)
}

fn exp_gas(stack: &Stack<'_>, byte_gas: u64) -> Result<MultiGas, GasError> {
    let byte_len = stack.back(1)?.bit_len().div_ceil(8) as u64;
    let gas = (byte_len * byte_gas).checked_add(EXP_GAS).ok_or(GasError::GasUintOverflow)?;
    Ok(MultiGas::unknown_gas(gas))
}

/// EXP before EIP-158.
pub fn gas_exp_frontier<H: Host>(
    _evm: &mut Evm<'_, H>,
    _contract: &mut Contract,
    stack: &Stack<'_>,
    _mem: &mut dyn Memory,
    _memory_size: u64,
) -> Result<MultiGas, GasError> {
    exp_gas(stack, EXP_BYTE_FRONTIER)
}

/// EXP under EIP-158.
pub fn gas_exp_eip158<H: Host>(
    _evm: &mut Evm<'_, H>,
    _contract: &mut Contract,
    stack: &Stack<'_>,
    _mem: &mut dyn Memory,
    _memory_size: u64,
) -> Result<MultiGas, GasError> {
    exp_gas(stack, EXP_BYTE_EIP158)
}

/// Adds memory expansion and the forwarded gas to `gas`, storing the forwarded gas in
/// [`Evm::call_gas_temp`].
fn forward_call_gas<H>(
    evm: &mut Evm<'_, H>,
    contract: &Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
    gas: MultiGas,
) -> Result<MultiGas, GasError> {
    let gas = gas.try_add(memory_gas_cost(mem, memory_size)?)?;
    evm.call_gas_temp =
        call_gas(evm.rules.is_eip150, contract.gas, gas.single_gas(), stack.back(0)?)?;
    gas.try_increment(ResourceKind::Computation, evm.call_gas_temp)
}

/// CALL.
///
/// Creating the callee is storage growth. Transferring value and the forwarded gas are
/// computation.
pub fn gas_call<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    let transfers_value = !stack.back(2)?.is_zero();
    let address = word_to_address(stack.back(1)?);

    let mut gas = MultiGas::ZERO;
    let creates_account = if evm.rules.is_eip158 {
        transfers_value && evm.host.is_empty(address)
    } else {
        !evm.host.exists(address)
    };
    if creates_account {
        gas = gas.try_increment(ResourceKind::StorageGrowth, CALL_NEW_ACCOUNT_GAS)?;
    }
    if transfers_value && !evm.rules.is_eip4762 {
        gas = gas.try_increment(ResourceKind::Computation, CALL_VALUE_TRANSFER_GAS)?;
    }
    forward_call_gas(evm, contract, stack, mem, memory_size, gas)
}

/// CALLCODE.
pub fn gas_call_code<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    let mut gas = MultiGas::ZERO;
    if !stack.back(2)?.is_zero() && !evm.rules.is_eip4762 {
        gas = gas.try_increment(ResourceKind::Computation, CALL_VALUE_TRANSFER_GAS)?;
    }
    forward_call_gas(evm, contract, stack, mem, memory_size, gas)
}

/// DELEGATECALL.
pub fn gas_delegate_call<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    forward_call_gas(evm, contract, stack, mem, memory_size, MultiGas::ZERO)
}

/// STATICCALL.
pub fn gas_static_call<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    forward_call_gas(evm, contract, stack, mem, memory_size, MultiGas::ZERO)
}

/// SELFDESTRUCT before EIP-2929.
///
/// The EIP-150 base cost is storage access, creating the beneficiary is storage growth.
pub fn gas_selfdestruct<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    _mem: &mut dyn Memory,
    _memory_size: u64,
) -> Result<MultiGas, GasError> {
    let mut gas = MultiGas::ZERO;
    if evm.rules.is_eip150 {
        gas = gas.try_increment(ResourceKind::StorageAccess, SELFDESTRUCT_GAS_EIP150)?;
        let beneficiary = word_to_address(stack.back(0)?);
        let creates_account = if evm.rules.is_eip158 {
            evm.host.is_empty(beneficiary) && !evm.host.balance(contract.address).is_zero()
        } else {
            !evm.host.exists(beneficiary)
        };
        if creates_account {
            gas = gas.try_increment(ResourceKind::StorageGrowth, CREATE_BY_SELFDESTRUCT_GAS)?;
        }
    }

    if !evm.host.has_self_destructed(contract.address) {
        evm.host.add_refund(SELFDESTRUCT_REFUND_GAS);
    }
    Ok(gas)
}
