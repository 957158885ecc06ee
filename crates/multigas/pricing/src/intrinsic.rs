//! Intrinsic gas of transactions.

use alloy_eips::eip2930::AccessList;
use base_multigas::{MultiGas, ResourceKind};

use crate::{CheckedMultiGas, GasError, memory::to_word_size, params::*};

/// Returns the gas a transaction pays before execution.
///
/// The base cost and init code words are computation, calldata is L2 calldata, the access list
/// is storage access and each EIP-7702 authorization is storage growth.
pub fn intrinsic_multi_gas(
    data: &[u8],
    access_list: &AccessList,
    authorization_count: u64,
    is_creation: bool,
    is_homestead: bool,
    is_eip2028: bool,
    is_eip3860: bool,
) -> Result<MultiGas, GasError> {
    let base = if is_creation && is_homestead { TX_GAS_CONTRACT_CREATION } else { TX_GAS };
    let mut gas = MultiGas::computation_gas(base);

    if !data.is_empty() {
        let (non_zero, zero) = count_bytes(data);
        let non_zero_gas =
            if is_eip2028 { TX_DATA_NON_ZERO_GAS_EIP2028 } else { TX_DATA_NON_ZERO_GAS_FRONTIER };
        let calldata = checked_cost(non_zero, non_zero_gas)?
            .checked_add(checked_cost(zero, TX_DATA_ZERO_GAS)?)
            .ok_or(GasError::GasUintOverflow)?;
        gas = gas.try_increment(ResourceKind::L2Calldata, calldata)?;

        if is_creation && is_eip3860 {
            let words = to_word_size(data.len() as u64);
            gas = gas.try_increment(
                ResourceKind::Computation,
                checked_cost(words, INIT_CODE_WORD_GAS)?,
            )?;
        }
    }

    let addresses = access_list.0.len() as u64;
    let keys = access_list
        .0
        .iter()
        .try_fold(0u64, |keys, item| keys.checked_add(item.storage_keys.len() as u64))
        .ok_or(GasError::GasUintOverflow)?;
    gas = gas.try_increment(
        ResourceKind::StorageAccess,
        checked_cost(addresses, TX_ACCESS_LIST_ADDRESS_GAS)?,
    )?;
    gas = gas.try_increment(
        ResourceKind::StorageAccess,
        checked_cost(keys, TX_ACCESS_LIST_STORAGE_KEY_GAS)?,
    )?;

    gas.try_increment(
        ResourceKind::StorageGrowth,
        checked_cost(authorization_count, CALL_NEW_ACCOUNT_GAS)?,
    )
}

/// Returns the EIP-7623 calldata floor of a transaction.
pub fn floor_data_gas(data: &[u8]) -> Result<u64, GasError> {
    let (non_zero, zero) = count_bytes(data);
    let tokens = checked_cost(non_zero, TX_TOKEN_PER_NON_ZERO_BYTE)?
        .checked_add(zero)
        .ok_or(GasError::GasUintOverflow)?;
    checked_cost(tokens, TX_COST_FLOOR_PER_TOKEN)?
        .checked_add(TX_GAS)
        .ok_or(GasError::GasUintOverflow)
}

/// Splits `data` into its non-zero and zero byte counts.
fn count_bytes(data: &[u8]) -> (u64, u64) {
    let non_zero = data.iter().filter(|b| **b != 0).count() as u64;
    (non_zero, data.len() as u64 - non_zero)
}

fn checked_cost(count: u64, price: u64) -> Result<u64, GasError> {
    count.checked_mul(price).ok_or(GasError::GasUintOverflow)
}
