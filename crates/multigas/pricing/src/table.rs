//! Selection of the dynamic gas function of an opcode for the active forks.

use crate::{ChainRules, GasFn, Host, OpCode, acl::*, gas_table::*, stateless::*};

/// Returns the dynamic gas function of `op` under `rules`, or `None` if the opcode has no
/// dynamic gas or is not active.
///
/// Later forks take precedence: EIP-4762 over Prague over London over Berlin over Istanbul.
pub fn dynamic_gas_fn<H: Host>(op: OpCode, rules: &ChainRules) -> Option<GasFn<H>> {
    let f: GasFn<H> = match op {
        OpCode::EXP if rules.is_eip158 => gas_exp_eip158,
        OpCode::EXP => gas_exp_frontier,
        OpCode::KECCAK256 => gas_keccak256,

        OpCode::SSTORE if rules.is_eip4762 => gas_sstore_eip4762,
        OpCode::SSTORE if rules.is_london => gas_sstore_eip3529,
        OpCode::SSTORE if rules.is_berlin => gas_sstore_eip2929,
        OpCode::SSTORE if rules.is_istanbul => gas_sstore_eip2200,
        OpCode::SSTORE => gas_sstore,

        OpCode::SLOAD if rules.is_eip4762 => gas_sload_eip4762,
        OpCode::SLOAD if rules.is_berlin => gas_sload_eip2929,

        OpCode::BALANCE if rules.is_eip4762 => gas_balance_eip4762,
        OpCode::EXTCODESIZE if rules.is_eip4762 => gas_ext_code_size_eip4762,
        OpCode::EXTCODEHASH if rules.is_eip4762 => gas_ext_code_hash_eip4762,
        OpCode::BALANCE | OpCode::EXTCODESIZE if rules.is_berlin => gas_eip2929_account_check,
        OpCode::EXTCODEHASH if rules.is_berlin => gas_eip2929_account_check,

        OpCode::EXTCODECOPY if rules.is_eip4762 => gas_ext_code_copy_eip4762,
        OpCode::EXTCODECOPY if rules.is_berlin => gas_ext_code_copy_eip2929,
        OpCode::EXTCODECOPY => gas_ext_code_copy,
        OpCode::CODECOPY if rules.is_eip4762 => gas_code_copy_eip4762,
        OpCode::CODECOPY | OpCode::CALLDATACOPY => gas_copy,
        OpCode::RETURNDATACOPY if rules.is_byzantium => gas_copy,
        OpCode::MCOPY if rules.is_cancun => gas_copy,

        OpCode::MLOAD | OpCode::MSTORE | OpCode::MSTORE8 | OpCode::RETURN => pure_memory_gas,
        OpCode::REVERT if rules.is_byzantium => pure_memory_gas,

        OpCode::LOG0 => gas_log::<H, 0>,
        OpCode::LOG1 => gas_log::<H, 1>,
        OpCode::LOG2 => gas_log::<H, 2>,
        OpCode::LOG3 => gas_log::<H, 3>,
        OpCode::LOG4 => gas_log::<H, 4>,

        OpCode::CREATE if rules.is_shanghai => gas_create_eip3860,
        OpCode::CREATE => pure_memory_gas,
        OpCode::CREATE2 if rules.is_shanghai => gas_create2_eip3860,
        OpCode::CREATE2 if rules.is_constantinople => gas_create2,

        OpCode::CALL if rules.is_eip4762 => gas_call_eip4762,
        OpCode::CALL if rules.is_prague => gas_call_eip7702,
        OpCode::CALL if rules.is_berlin => gas_call_eip2929,
        OpCode::CALL => gas_call,
        OpCode::CALLCODE if rules.is_eip4762 => gas_call_code_eip4762,
        OpCode::CALLCODE if rules.is_prague => gas_call_code_eip7702,
        OpCode::CALLCODE if rules.is_berlin => gas_call_code_eip2929,
        OpCode::CALLCODE => gas_call_code,
        OpCode::DELEGATECALL if !rules.is_homestead => return None,
        OpCode::DELEGATECALL if rules.is_eip4762 => gas_delegate_call_eip4762,
        OpCode::DELEGATECALL if rules.is_prague => gas_delegate_call_eip7702,
        OpCode::DELEGATECALL if rules.is_berlin => gas_delegate_call_eip2929,
        OpCode::DELEGATECALL => gas_delegate_call,
        OpCode::STATICCALL if !rules.is_byzantium => return None,
        OpCode::STATICCALL if rules.is_eip4762 => gas_static_call_eip4762,
        OpCode::STATICCALL if rules.is_prague => gas_static_call_eip7702,
        OpCode::STATICCALL if rules.is_berlin => gas_static_call_eip2929,
        OpCode::STATICCALL => gas_static_call,

        OpCode::SELFDESTRUCT if rules.is_eip4762 => gas_selfdestruct_eip4762,
        OpCode::SELFDESTRUCT if rules.is_london => gas_selfdestruct_eip3529,
        OpCode::SELFDESTRUCT if rules.is_berlin => gas_selfdestruct_eip2929,
        OpCode::SELFDESTRUCT => gas_selfdestruct,

        _ => return None,
    };
    Some(f)
}
