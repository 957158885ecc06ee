//! Access list gas functions: EIP-2929, EIP-3529 and EIP-7702.
//!
//! Cold and warm account or slot accesses are storage access, except for the SLOAD, BALANCE,
//! EXTCODESIZE, EXTCODEHASH and EXTCODECOPY surcharges which are not classified yet.

use alloy_primitives::{Address, Bytes};
use base_multigas::{MultiGas, ResourceKind};

use crate::{
    CheckedMultiGas, Contract, Evm, GasError, GasFn, Host, Memory, Stack,
    gas_table::{
        NetSstoreSchedule, gas_call, gas_call_code, gas_delegate_call, gas_ext_code_copy,
        gas_static_call, net_sstore_gas,
    },
    host::{word_to_address, word_to_slot},
    params::*,
};

/// Prefix of an EIP-7702 delegation designator.
pub const DELEGATION_PREFIX: [u8; 3] = [0xef, 0x01, 0x00];

/// Returns the delegation target if `code` is an EIP-7702 delegation designator.
pub fn parse_delegation(code: &Bytes) -> Option<Address> {
    let target = code.strip_prefix(&DELEGATION_PREFIX)?;
    (target.len() == 20).then(|| Address::from_slice(target))
}

const COLD_ACCOUNT_SURCHARGE: u64 =
    COLD_ACCOUNT_ACCESS_COST_EIP2929 - WARM_STORAGE_READ_COST_EIP2929;

const fn eip2929_schedule(clear_refund: u64) -> NetSstoreSchedule {
    NetSstoreSchedule {
        noop: WARM_STORAGE_READ_COST_EIP2929,
        init: SSTORE_SET_GAS_EIP2200,
        clean: SSTORE_RESET_GAS_EIP2200 - COLD_SLOAD_COST_EIP2929,
        clear_refund,
        reset_clear_refund: SSTORE_SET_GAS_EIP2200 - WARM_STORAGE_READ_COST_EIP2929,
        reset_refund: SSTORE_RESET_GAS_EIP2200
            - COLD_SLOAD_COST_EIP2929
            - WARM_STORAGE_READ_COST_EIP2929,
    }
}

fn sstore_eip2929<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &Contract,
    stack: &Stack<'_>,
    schedule: &NetSstoreSchedule,
) -> Result<MultiGas, GasError> {
    if contract.gas <= SSTORE_SENTRY_GAS_EIP2200 {
        return Err(GasError::ReentrancySentry);
    }
    let slot = word_to_slot(stack.back(0)?);
    let value = word_to_slot(stack.back(1)?);
    let current = evm.host.state(contract.address, slot);

    let mut gas = MultiGas::ZERO;
    let (_, slot_warm) = evm.host.slot_in_access_list(contract.address, slot);
    if !slot_warm {
        gas = MultiGas::storage_access_gas(COLD_SLOAD_COST_EIP2929);
        evm.host.add_slot_to_access_list(contract.address, slot);
    }
    gas.try_add(net_sstore_gas(&mut *evm.host, contract.address, slot, current, value, schedule))
}

/// SSTORE under EIP-2929 (Berlin).
pub fn gas_sstore_eip2929<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    _mem: &mut dyn Memory,
    _memory_size: u64,
) -> Result<MultiGas, GasError> {
    const SCHEDULE: NetSstoreSchedule = eip2929_schedule(SSTORE_CLEARS_SCHEDULE_REFUND_EIP2200);
    sstore_eip2929(evm, contract, stack, &SCHEDULE)
}

/// SSTORE under EIP-3529 (London), with the reduced clearing refund.
pub fn gas_sstore_eip3529<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    _mem: &mut dyn Memory,
    _memory_size: u64,
) -> Result<MultiGas, GasError> {
    const SCHEDULE: NetSstoreSchedule = eip2929_schedule(SSTORE_CLEARS_SCHEDULE_REFUND_EIP3529);
    sstore_eip2929(evm, contract, stack, &SCHEDULE)
}

/// SLOAD under EIP-2929.
pub fn gas_sload_eip2929<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    _mem: &mut dyn Memory,
    _memory_size: u64,
) -> Result<MultiGas, GasError> {
    let slot = word_to_slot(stack.peek()?);
    let (_, slot_warm) = evm.host.slot_in_access_list(contract.address, slot);
    if !slot_warm {
        evm.host.add_slot_to_access_list(contract.address, slot);
        return Ok(MultiGas::unknown_gas(COLD_SLOAD_COST_EIP2929));
    }
    Ok(MultiGas::unknown_gas(WARM_STORAGE_READ_COST_EIP2929))
}

/// EXTCODECOPY under EIP-2929.
pub fn gas_ext_code_copy_eip2929<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    let gas = gas_ext_code_copy(evm, contract, stack, mem, memory_size)?;
    let address = word_to_address(stack.peek()?);
    if !evm.host.address_in_access_list(address) {
        evm.host.add_address_to_access_list(address);
        return gas.try_increment(ResourceKind::Unknown, COLD_ACCOUNT_SURCHARGE);
    }
    Ok(gas)
}

/// BALANCE, EXTCODESIZE and EXTCODEHASH under EIP-2929.
///
/// The warm cost is part of the constant gas, only the cold surcharge is dynamic.
pub fn gas_eip2929_account_check<H: Host>(
    evm: &mut Evm<'_, H>,
    _contract: &mut Contract,
    stack: &Stack<'_>,
    _mem: &mut dyn Memory,
    _memory_size: u64,
) -> Result<MultiGas, GasError> {
    let address = word_to_address(stack.peek()?);
    if !evm.host.address_in_access_list(address) {
        evm.host.add_address_to_access_list(address);
        return Ok(MultiGas::unknown_gas(COLD_ACCOUNT_SURCHARGE));
    }
    Ok(MultiGas::ZERO)
}

/// Wraps a CALL-family gas function with the EIP-2929 cold account surcharge.
///
/// The surcharge is taken from the frame before `old` runs so the forwarded gas accounts for
/// it, then given back and returned as storage access.
pub fn call_variant_eip2929<H: Host>(
    old: GasFn<H>,
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    let address = word_to_address(stack.back(1)?);
    let warm = evm.host.address_in_access_list(address);
    if !warm {
        evm.host.add_address_to_access_list(address);
        if !contract.use_gas(COLD_ACCOUNT_SURCHARGE) {
            return Err(GasError::OutOfGas);
        }
    }

    let gas = old(evm, contract, stack, mem, memory_size)?;
    if warm {
        return Ok(gas);
    }
    contract.gas += COLD_ACCOUNT_SURCHARGE;
    gas.try_increment(ResourceKind::StorageAccess, COLD_ACCOUNT_SURCHARGE)
}

/// Wraps a CALL-family gas function with the EIP-2929 surcharge and the EIP-7702 delegation
/// resolution cost. Both are storage access.
pub fn call_variant_eip7702<H: Host>(
    old: GasFn<H>,
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    let address = word_to_address(stack.back(1)?);
    let mut gas = MultiGas::ZERO;

    if !evm.host.address_in_access_list(address) {
        evm.host.add_address_to_access_list(address);
        if !contract.use_gas(COLD_ACCOUNT_SURCHARGE) {
            return Err(GasError::OutOfGas);
        }
        gas = gas.try_increment(ResourceKind::StorageAccess, COLD_ACCOUNT_SURCHARGE)?;
    }

    if let Some(target) = parse_delegation(&evm.host.code(address)) {
        let cost = if evm.host.address_in_access_list(target) {
            WARM_STORAGE_READ_COST_EIP2929
        } else {
            evm.host.add_address_to_access_list(target);
            COLD_ACCOUNT_ACCESS_COST_EIP2929
        };
        if !contract.use_gas(cost) {
            return Err(GasError::OutOfGas);
        }
        gas = gas.try_increment(ResourceKind::StorageAccess, cost)?;
    }

    let old_gas = old(evm, contract, stack, mem, memory_size)?;
    contract.gas += gas.get(ResourceKind::StorageAccess);
    gas.try_add(old_gas)
}

macro_rules! call_variants {
    ($($(#[$meta:meta])* $name:ident => $wrapper:ident($old:ident);)*) => {
        $(
            $(#[$meta])*
            pub fn $name<H: Host>(
                evm: &mut Evm<'_, H>,
                contract: &mut Contract,
                stack: &Stack<'_>,
                mem: &mut dyn Memory,
                memory_size: u64,
            ) -> Result<MultiGas, GasError> {
                $wrapper($old::<H>, evm, contract, stack, mem, memory_size)
            }
        )*
    };
}

call_variants! {
    /// CALL under EIP-2929.
    gas_call_eip2929 => call_variant_eip2929(gas_call);
    /// CALLCODE under EIP-2929.
    gas_call_code_eip2929 => call_variant_eip2929(gas_call_code);
    /// DELEGATECALL under EIP-2929.
    gas_delegate_call_eip2929 => call_variant_eip2929(gas_delegate_call);
    /// STATICCALL under EIP-2929.
    gas_static_call_eip2929 => call_variant_eip2929(gas_static_call);
    /// CALL under EIP-7702.
    gas_call_eip7702 => call_variant_eip7702(gas_call);
    /// CALLCODE under EIP-7702.
    gas_call_code_eip7702 => call_variant_eip7702(gas_call_code);
    /// DELEGATECALL under EIP-7702.
    gas_delegate_call_eip7702 => call_variant_eip7702(gas_delegate_call);
    /// STATICCALL under EIP-7702.
    gas_static_call_eip7702 => call_variant_eip7702(gas_static_call);
}

fn selfdestruct_access_list<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &Contract,
    stack: &Stack<'_>,
    refunds: bool,
) -> Result<MultiGas, GasError> {
    let beneficiary = word_to_address(stack.peek()?);
    let mut gas = MultiGas::ZERO;
    if !evm.host.address_in_access_list(beneficiary) {
        evm.host.add_address_to_access_list(beneficiary);
        gas = gas.try_increment(ResourceKind::StorageAccess, COLD_ACCOUNT_ACCESS_COST_EIP2929)?;
    }
    if evm.host.is_empty(beneficiary) && !evm.host.balance(contract.address).is_zero() {
        gas = gas.try_increment(ResourceKind::StorageGrowth, CREATE_BY_SELFDESTRUCT_GAS)?;
    }
    if refunds && !evm.host.has_self_destructed(contract.address) {
        evm.host.add_refund(SELFDESTRUCT_REFUND_GAS);
    }
    Ok(gas)
}

/// SELFDESTRUCT under EIP-2929.
pub fn gas_selfdestruct_eip2929<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    _mem: &mut dyn Memory,
    _memory_size: u64,
) -> Result<MultiGas, GasError> {
    selfdestruct_access_list(evm, contract, stack, true)
}

/// SELFDESTRUCT under EIP-3529, without refund.
pub fn gas_selfdestruct_eip3529<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    _mem: &mut dyn Memory,
    _memory_size: u64,
) -> Result<MultiGas, GasError> {
    selfdestruct_access_list(evm, contract, stack, false)
}
