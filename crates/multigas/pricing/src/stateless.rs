//! EIP-4762 gas functions.
//!
//! Every witness charge is an account or slot lookup and is classified as storage access.

use base_multigas::{MultiGas, ResourceKind};

use crate::{
    CheckedMultiGas, Contract, Evm, GasError, GasFn, Host, Memory, Stack,
    gas_table::{
        gas_call, gas_call_code, gas_copy, gas_delegate_call, gas_ext_code_copy, gas_static_call,
    },
    host::{word_to_address, word_to_slot},
    params::WARM_STORAGE_READ_COST_EIP2929,
};

/// SSTORE under EIP-4762.
pub fn gas_sstore_eip4762<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    _mem: &mut dyn Memory,
    _memory_size: u64,
) -> Result<MultiGas, GasError> {
    let slot = word_to_slot(stack.peek()?);
    let gas = evm.host.slot_gas(contract.address, slot, true, contract.gas, true);
    Ok(MultiGas::storage_access_gas(gas))
}

/// SLOAD under EIP-4762.
pub fn gas_sload_eip4762<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    _mem: &mut dyn Memory,
    _memory_size: u64,
) -> Result<MultiGas, GasError> {
    let slot = word_to_slot(stack.peek()?);
    let gas = evm.host.slot_gas(contract.address, slot, false, contract.gas, true);
    Ok(MultiGas::storage_access_gas(gas))
}

/// BALANCE under EIP-4762.
pub fn gas_balance_eip4762<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    _mem: &mut dyn Memory,
    _memory_size: u64,
) -> Result<MultiGas, GasError> {
    let address = word_to_address(stack.peek()?);
    let gas = evm.host.basic_data_gas(address, false, contract.gas, true);
    Ok(MultiGas::storage_access_gas(gas))
}

/// EXTCODESIZE under EIP-4762. Free for precompiles.
pub fn gas_ext_code_size_eip4762<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    _mem: &mut dyn Memory,
    _memory_size: u64,
) -> Result<MultiGas, GasError> {
    let address = word_to_address(stack.peek()?);
    if evm.config.is_precompile(&address) {
        return Ok(MultiGas::ZERO);
    }
    let gas = evm.host.basic_data_gas(address, false, contract.gas, true);
    Ok(MultiGas::storage_access_gas(gas))
}

/// EXTCODEHASH under EIP-4762. Free for precompiles.
pub fn gas_ext_code_hash_eip4762<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    _mem: &mut dyn Memory,
    _memory_size: u64,
) -> Result<MultiGas, GasError> {
    let address = word_to_address(stack.peek()?);
    if evm.config.is_precompile(&address) {
        return Ok(MultiGas::ZERO);
    }
    let gas = evm.host.code_hash_gas(address, false, contract.gas, true);
    Ok(MultiGas::storage_access_gas(gas))
}

/// Wraps a CALL-family gas function with the EIP-4762 witness charges.
///
/// A value transfer is charged before the 63/64 rule applies, the message call witness after.
/// If the frame cannot afford the witness, only the wanted witness gas is returned and the
/// interpreter fails the charge.
pub fn call_variant_eip4762<H: Host>(
    old: GasFn<H>,
    with_transfer: bool,
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    let target = word_to_address(stack.back(1)?);

    let witness_gas = if with_transfer && !stack.back(2)?.is_zero() {
        let wanted = evm.host.value_transfer_gas(contract.address, target, contract.gas);
        if wanted > contract.gas {
            return Ok(MultiGas::storage_access_gas(wanted));
        }
        wanted
    } else if evm.config.is_precompile_or_system_contract(&target) {
        WARM_STORAGE_READ_COST_EIP2929
    } else {
        let wanted = evm.host.message_call_gas(target, contract.gas);
        if wanted > contract.gas {
            return Ok(MultiGas::storage_access_gas(wanted));
        }
        wanted
    };

    contract.gas -= witness_gas;
    let result = old(evm, contract, stack, mem, memory_size);
    contract.gas += witness_gas;
    result?.try_increment(ResourceKind::StorageAccess, witness_gas)
}

/// CALL under EIP-4762, charging the value transfer witness.
pub fn gas_call_eip4762<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    call_variant_eip4762(gas_call::<H>, true, evm, contract, stack, mem, memory_size)
}

/// CALLCODE under EIP-4762.
pub fn gas_call_code_eip4762<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    call_variant_eip4762(gas_call_code::<H>, false, evm, contract, stack, mem, memory_size)
}

/// DELEGATECALL under EIP-4762.
pub fn gas_delegate_call_eip4762<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    call_variant_eip4762(gas_delegate_call::<H>, false, evm, contract, stack, mem, memory_size)
}

/// STATICCALL under EIP-4762.
pub fn gas_static_call_eip4762<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    call_variant_eip4762(gas_static_call::<H>, false, evm, contract, stack, mem, memory_size)
}

/// SELFDESTRUCT under EIP-4762.
///
/// Reads the basic data of the contract and the beneficiary, then writes both when a balance
/// moves. Stops at the first access the frame cannot afford and returns what was wanted so far.
pub fn gas_selfdestruct_eip4762<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    _mem: &mut dyn Memory,
    _memory_size: u64,
) -> Result<MultiGas, GasError> {
    let beneficiary = word_to_address(stack.peek()?);
    if evm.config.is_precompile(&beneficiary) || contract.is_system_call {
        return Ok(MultiGas::ZERO);
    }
    let address = contract.address;
    let mut charged = 0u64;

    let wanted = evm.host.basic_data_gas(address, false, contract.gas, false);
    if wanted > contract.gas {
        return Ok(MultiGas::storage_access_gas(wanted));
    }
    charged += wanted;

    let balance_is_zero = evm.host.balance(address).is_zero();
    if evm.config.is_precompile_or_system_contract(&beneficiary) && balance_is_zero {
        return Ok(MultiGas::storage_access_gas(charged));
    }

    if address != beneficiary {
        let available = contract.gas - charged;
        let wanted = evm.host.basic_data_gas(beneficiary, false, available, false);
        if wanted > available {
            return Ok(MultiGas::storage_access_gas(charged.saturating_add(wanted)));
        }
        charged += wanted;
    }
    if !balance_is_zero {
        let available = contract.gas - charged;
        let wanted = evm.host.basic_data_gas(address, true, available, false);
        if wanted > available {
            return Ok(MultiGas::storage_access_gas(charged.saturating_add(wanted)));
        }
        charged += wanted;

        if address != beneficiary {
            let available = contract.gas - charged;
            let wanted = if evm.host.exists(beneficiary) {
                evm.host.basic_data_gas(beneficiary, true, available, false)
            } else {
                evm.host.add_account(beneficiary, true, available)
            };
            if wanted > available {
                return Ok(MultiGas::storage_access_gas(charged.saturating_add(wanted)));
            }
            charged += wanted;
        }
    }
    Ok(MultiGas::storage_access_gas(charged))
}

/// Clamps a copy of `size` bytes from `start` to the code bounds. Returns the adjusted start and
/// the length of the part that is not zero padding.
fn adjusted_bounds(code_len: u64, start: u64, size: u64) -> (u64, u64) {
    let start = start.min(code_len);
    let end = start.saturating_add(size).min(code_len);
    (start, end - start)
}

/// CODECOPY under EIP-4762, charging the copied code chunks unless the frame runs init code or
/// a system call.
pub fn gas_code_copy_eip4762<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    let gas = gas_copy(evm, contract, stack, mem, memory_size)?;
    if contract.is_deployment || contract.is_system_call {
        return Ok(gas);
    }

    let offset = stack.back(1)?.saturating_to::<u64>();
    let length = stack.back(2)?.saturating_to::<u64>();
    let code_len = contract.code.len() as u64;
    let (start, copy_len) = adjusted_bounds(code_len, offset, length);
    let available = contract.gas.saturating_sub(gas.single_gas());
    let (_, wanted) = evm.host.code_chunks_range_gas(
        contract.address,
        start,
        copy_len,
        code_len,
        false,
        available,
    );
    gas.try_increment(ResourceKind::StorageAccess, wanted)
}

/// EXTCODECOPY under EIP-4762. Precompiles and the history contract are warm reads.
pub fn gas_ext_code_copy_eip4762<H: Host>(
    evm: &mut Evm<'_, H>,
    contract: &mut Contract,
    stack: &Stack<'_>,
    mem: &mut dyn Memory,
    memory_size: u64,
) -> Result<MultiGas, GasError> {
    let gas = gas_ext_code_copy(evm, contract, stack, mem, memory_size)?;
    let address = word_to_address(stack.peek()?);
    if evm.config.is_precompile_or_system_contract(&address) {
        return gas.try_increment(ResourceKind::StorageAccess, WARM_STORAGE_READ_COST_EIP2929);
    }
    let available = contract.gas.saturating_sub(gas.single_gas());
    let witness = evm.host.basic_data_gas(address, false, available, true);
    gas.try_increment(ResourceKind::StorageAccess, witness)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, U256};
    use rstest::rstest;

    use super::*;
    use crate::{
        ChainConfig, ChainRules, MemoryGasState,
        test_utils::{MockHost, WitnessCosts},
    };

    const CONTRACT_GAS: u64 = 100_000;

    fn contract_address() -> Address {
        Address::with_last_byte(0xaa)
    }

    fn beneficiary() -> Address {
        Address::with_last_byte(0xbb)
    }

    fn address_word(address: Address) -> U256 {
        U256::from_be_slice(address.as_slice())
    }

    fn host_with(witness: WitnessCosts) -> MockHost {
        MockHost { witness, ..Default::default() }
    }

    fn run(
        f: GasFn<MockHost>,
        host: &mut MockHost,
        contract: &mut Contract,
        data: &[U256],
        memory_size: u64,
    ) -> (Result<MultiGas, GasError>, u64) {
        let config = ChainConfig::default();
        let mut evm = Evm::new(host, ChainRules::verkle(), &config);
        let result =
            f(&mut evm, contract, &Stack::new(data), &mut MemoryGasState::new(), memory_size);
        (result, evm.call_gas_temp)
    }

    #[test]
    fn test_slot_and_account_reads() {
        let mut host = host_with(WitnessCosts {
            slot: 2_100,
            basic_data: 2_600,
            code_hash: 2_500,
            ..Default::default()
        });
        let mut contract = Contract::new(contract_address(), CONTRACT_GAS);
        let slot = [U256::from(1), U256::from(1)];
        let account = [address_word(beneficiary())];

        let cases: [(GasFn<MockHost>, &[U256], u64); 6] = [
            (gas_sstore_eip4762, &slot, 2_100),
            (gas_sload_eip4762, &slot, 2_100),
            (gas_balance_eip4762, &account, 2_600),
            (gas_ext_code_size_eip4762, &account, 2_600),
            (gas_ext_code_hash_eip4762, &account, 2_500),
            (gas_balance_eip4762, &[address_word(Address::with_last_byte(1))], 2_600),
        ];
        for (f, data, expected) in cases {
            let (gas, _) = run(f, &mut host, &mut contract, data, 0);
            assert_eq!(gas, Ok(MultiGas::storage_access_gas(expected)));
        }
    }

    #[rstest]
    #[case::ext_code_size(gas_ext_code_size_eip4762 as GasFn<MockHost>)]
    #[case::ext_code_hash(gas_ext_code_hash_eip4762 as GasFn<MockHost>)]
    fn test_precompile_reads_are_free(#[case] f: GasFn<MockHost>) {
        let mut host =
            host_with(WitnessCosts { basic_data: 2_600, code_hash: 2_500, ..Default::default() });
        let mut contract = Contract::new(contract_address(), CONTRACT_GAS);
        let data = [address_word(Address::with_last_byte(2))];
        let (gas, _) = run(f, &mut host, &mut contract, &data, 0);
        assert_eq!(gas, Ok(MultiGas::ZERO));
    }

    fn call_stack(value: u64, target: Address, requested: u64) -> [U256; 3] {
        [U256::from(value), address_word(target), U256::from(requested)]
    }

    #[test]
    fn test_call_value_transfer_witness() {
        let mut host = host_with(WitnessCosts {
            value_transfer: 3_000,
            message_call: 500,
            ..Default::default()
        });
        host.set_balance(beneficiary(), 1);
        let mut contract = Contract::new(contract_address(), CONTRACT_GAS);
        let data = call_stack(1, beneficiary(), 10_000);

        let (gas, forwarded) = run(gas_call_eip4762, &mut host, &mut contract, &data, 0);
        assert_eq!(forwarded, 10_000);
        assert_eq!(contract.gas, CONTRACT_GAS);
        assert_eq!(
            gas,
            Ok(MultiGas::from_pairs([
                (ResourceKind::StorageAccess, 3_000).into(),
                (ResourceKind::Computation, 10_000).into(),
            ]))
        );
    }

    #[test]
    fn test_call_message_call_witness_limits_forwarded_gas() {
        let mut host = host_with(WitnessCosts { message_call: 4_000, ..Default::default() });
        let mut contract = Contract::new(contract_address(), CONTRACT_GAS);
        let data = call_stack(0, beneficiary(), 1 << 40);

        let (gas, forwarded) = run(gas_static_call_eip4762, &mut host, &mut contract, &data, 0);
        let available = CONTRACT_GAS - 4_000;
        assert_eq!(forwarded, available - available / 64);
        assert_eq!(contract.gas, CONTRACT_GAS);
        assert_eq!(gas.unwrap().get(ResourceKind::StorageAccess), 4_000);
    }

    #[rstest]
    #[case::precompile(Address::with_last_byte(4))]
    #[case::history_contract(alloy_eips::eip2935::HISTORY_STORAGE_ADDRESS)]
    fn test_call_system_target_is_warm_read(#[case] target: Address) {
        let mut host = host_with(WitnessCosts { message_call: 4_000, ..Default::default() });
        let mut contract = Contract::new(contract_address(), CONTRACT_GAS);
        let data = call_stack(0, target, 1_000);

        let (gas, _) = run(gas_delegate_call_eip4762, &mut host, &mut contract, &data, 0);
        assert_eq!(
            gas,
            Ok(MultiGas::from_pairs([
                (ResourceKind::StorageAccess, WARM_STORAGE_READ_COST_EIP2929).into(),
                (ResourceKind::Computation, 1_000).into(),
            ]))
        );
    }

    #[test]
    fn test_call_code_ignores_value_witness() {
        let mut host = host_with(WitnessCosts {
            value_transfer: 3_000,
            message_call: 700,
            ..Default::default()
        });
        let mut contract = Contract::new(contract_address(), CONTRACT_GAS);
        let data = call_stack(1, beneficiary(), 1_000);

        let (gas, _) = run(gas_call_code_eip4762, &mut host, &mut contract, &data, 0);
        let gas = gas.unwrap();
        assert_eq!(gas.get(ResourceKind::StorageAccess), 700);
        // no value transfer surcharge under EIP-4762
        assert_eq!(gas.get(ResourceKind::Computation), 1_000);
    }

    #[rstest]
    #[case::value_transfer(
        1,
        WitnessCosts { value_transfer: 200_000, ..Default::default() },
        200_000
    )]
    #[case::message_call(0, WitnessCosts { message_call: 150_000, ..Default::default() }, 150_000)]
    fn test_call_unaffordable_witness(
        #[case] value: u64,
        #[case] witness: WitnessCosts,
        #[case] expected: u64,
    ) {
        let mut host = host_with(witness);
        let mut contract = Contract::new(contract_address(), CONTRACT_GAS);
        let data = call_stack(value, beneficiary(), 1_000);

        let (gas, forwarded) = run(gas_call_eip4762, &mut host, &mut contract, &data, 0);
        assert_eq!(gas, Ok(MultiGas::storage_access_gas(expected)));
        assert_eq!(forwarded, 0);
        assert_eq!(contract.gas, CONTRACT_GAS);
    }

    #[test]
    fn test_call_restores_gas_on_error() {
        let mut host = host_with(WitnessCosts { message_call: 500, ..Default::default() });
        let mut contract = Contract::new(contract_address(), CONTRACT_GAS);
        // requested gas overflows u64 before EIP-150
        let data = [U256::ZERO, address_word(beneficiary()), U256::MAX];
        let config = ChainConfig::default();
        let rules = ChainRules { is_eip150: false, ..ChainRules::verkle() };
        let mut evm = Evm::new(&mut host, rules, &config);

        let result = gas_delegate_call_eip4762(
            &mut evm,
            &mut contract,
            &Stack::new(&data),
            &mut MemoryGasState::new(),
            0,
        );
        assert_eq!(result, Err(GasError::GasUintOverflow));
        assert_eq!(contract.gas, CONTRACT_GAS);
    }

    struct SelfdestructCase {
        beneficiary: Address,
        balance: u64,
        beneficiary_exists: bool,
        contract_gas: u64,
        is_system_call: bool,
    }

    fn run_selfdestruct(case: SelfdestructCase) -> MultiGas {
        let mut host = host_with(WitnessCosts {
            basic_data: 100,
            basic_data_write: 3_000,
            add_account: 25_000,
            ..Default::default()
        });
        host.set_balance(contract_address(), case.balance);
        if case.beneficiary_exists {
            host.create_account(case.beneficiary);
        }
        let mut contract = Contract::new(contract_address(), case.contract_gas);
        contract.is_system_call = case.is_system_call;
        let data = [address_word(case.beneficiary)];
        run(gas_selfdestruct_eip4762, &mut host, &mut contract, &data, 0).0.unwrap()
    }

    #[rstest]
    #[case::precompile_beneficiary(Address::with_last_byte(1), 10, true, CONTRACT_GAS, false, 0)]
    #[case::system_call(beneficiary(), 10, true, CONTRACT_GAS, true, 0)]
    #[case::history_contract_no_balance(
        alloy_eips::eip2935::HISTORY_STORAGE_ADDRESS, 0, true, CONTRACT_GAS, false, 100
    )]
    #[case::no_balance(beneficiary(), 0, true, CONTRACT_GAS, false, 200)]
    #[case::existing_beneficiary(beneficiary(), 10, true, CONTRACT_GAS, false, 200 + 2 * 3_000)]
    #[case::new_beneficiary(beneficiary(), 10, false, CONTRACT_GAS, false, 200 + 3_000 + 25_000)]
    #[case::to_self(contract_address(), 10, true, CONTRACT_GAS, false, 100 + 3_000)]
    #[case::unaffordable_contract_read(beneficiary(), 10, true, 50, false, 100)]
    #[case::unaffordable_account_creation(
        beneficiary(),
        10,
        false,
        10_000,
        false,
        200 + 3_000 + 25_000
    )]
    fn test_selfdestruct_eip4762(
        #[case] beneficiary: Address,
        #[case] balance: u64,
        #[case] beneficiary_exists: bool,
        #[case] contract_gas: u64,
        #[case] is_system_call: bool,
        #[case] expected: u64,
    ) {
        let gas = run_selfdestruct(SelfdestructCase {
            beneficiary,
            balance,
            beneficiary_exists,
            contract_gas,
            is_system_call,
        });
        assert_eq!(gas, MultiGas::storage_access_gas(expected));
    }

    #[rstest]
    #[case::in_bounds(0, 32, 64, 0, 32)]
    #[case::tail(48, 32, 64, 48, 16)]
    #[case::past_end(100, 32, 64, 64, 0)]
    #[case::huge_size(8, u64::MAX, 64, 8, 56)]
    fn test_adjusted_bounds(
        #[case] start: u64,
        #[case] size: u64,
        #[case] code_len: u64,
        #[case] expected_start: u64,
        #[case] expected_len: u64,
    ) {
        assert_eq!(adjusted_bounds(code_len, start, size), (expected_start, expected_len));
    }

    #[rstest]
    #[case::runtime(false, false, 400)]
    #[case::deployment(true, false, 0)]
    #[case::system_call(false, true, 0)]
    fn test_code_copy_eip4762(
        #[case] is_deployment: bool,
        #[case] is_system_call: bool,
        #[case] expected_access: u64,
    ) {
        let mut host = host_with(WitnessCosts { code_chunks: 400, ..Default::default() });
        let mut contract = Contract::new(contract_address(), CONTRACT_GAS).with_code(vec![0u8; 40]);
        contract.is_deployment = is_deployment;
        contract.is_system_call = is_system_call;
        // length 64, code offset 0, memory offset 0
        let data = [U256::from(64), U256::ZERO, U256::ZERO];

        let (gas, _) = run(gas_code_copy_eip4762, &mut host, &mut contract, &data, 64);
        let gas = gas.unwrap();
        assert_eq!(gas.get(ResourceKind::Computation), 6);
        assert_eq!(gas.get(ResourceKind::Unknown), 2 * crate::params::COPY_GAS);
        assert_eq!(gas.get(ResourceKind::StorageAccess), expected_access);
    }

    #[rstest]
    #[case::precompile(Address::with_last_byte(3), WARM_STORAGE_READ_COST_EIP2929)]
    #[case::history_contract(
        alloy_eips::eip2935::HISTORY_STORAGE_ADDRESS,
        WARM_STORAGE_READ_COST_EIP2929
    )]
    #[case::account(Address::with_last_byte(0xcc), 2_600)]
    fn test_ext_code_copy_eip4762(#[case] address: Address, #[case] expected_access: u64) {
        let mut host = host_with(WitnessCosts { basic_data: 2_600, ..Default::default() });
        let mut contract = Contract::new(contract_address(), CONTRACT_GAS);
        let data = [U256::from(32), U256::ZERO, U256::ZERO, address_word(address)];

        let (gas, _) = run(gas_ext_code_copy_eip4762, &mut host, &mut contract, &data, 0);
        let gas = gas.unwrap();
        assert_eq!(gas.get(ResourceKind::Unknown), 3);
        assert_eq!(gas.get(ResourceKind::StorageAccess), expected_access);
    }
}
