//! Constant gas of opcodes and precompile execution.

use base_multigas::{MultiGas, ResourceKind};

use crate::{GasError, OpCode, params::WARM_STORAGE_READ_COST_EIP2929};

/// Classifies the constant gas of `op`.
///
/// SELFDESTRUCT pays a warm read as computation and the rest of its EIP-150 base cost as
/// storage access. Every other constant cost is computation.
pub fn constant_multi_gas(cost: u64, op: OpCode) -> MultiGas {
    if op == OpCode::SELFDESTRUCT {
        let computation = cost.min(WARM_STORAGE_READ_COST_EIP2929);
        return MultiGas::computation_gas(computation)
            .saturating_increment(ResourceKind::StorageAccess, cost - computation);
    }
    MultiGas::computation_gas(cost)
}

/// Charges a precompile needing `required` gas out of `supplied`.
///
/// Returns the gas used, classified as computation, together with the gas left. When the
/// precompile cannot be afforded the whole supply is consumed.
pub fn precompile_multi_gas(required: u64, supplied: u64) -> (MultiGas, Result<u64, GasError>) {
    if supplied < required {
        return (MultiGas::computation_gas(supplied), Err(GasError::OutOfGas));
    }
    (MultiGas::computation_gas(required), Ok(supplied - required))
}
