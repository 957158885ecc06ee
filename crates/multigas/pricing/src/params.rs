//! Gas schedule constants.

/// Once per SSTORE operation from clean zero to non-zero.
pub const SSTORE_SET_GAS: u64 = 20_000;
/// Once per SSTORE operation from clean non-zero to something else.
pub const SSTORE_RESET_GAS: u64 = 5_000;
/// Once per SSTORE operation that clears a slot.
pub const SSTORE_CLEAR_GAS: u64 = 5_000;
/// Refunded when a slot is cleared.
pub const SSTORE_REFUND_GAS: u64 = 15_000;

/// EIP-1283: SSTORE that leaves the slot unchanged.
pub const NET_SSTORE_NOOP_GAS: u64 = 200;
/// EIP-1283: SSTORE from clean zero to non-zero.
pub const NET_SSTORE_INIT_GAS: u64 = 20_000;
/// EIP-1283: SSTORE from clean non-zero to something else.
pub const NET_SSTORE_CLEAN_GAS: u64 = 5_000;
/// EIP-1283: SSTORE on a dirty slot.
pub const NET_SSTORE_DIRTY_GAS: u64 = 200;
/// EIP-1283: refund for clearing an originally existing slot.
pub const NET_SSTORE_CLEAR_REFUND: u64 = 15_000;
/// EIP-1283: refund for resetting an originally existing slot.
pub const NET_SSTORE_RESET_REFUND: u64 = 4_800;
/// EIP-1283: refund for resetting an originally inexistent slot.
pub const NET_SSTORE_RESET_CLEAR_REFUND: u64 = 19_800;

/// EIP-2200: minimum gas left for an SSTORE to proceed.
pub const SSTORE_SENTRY_GAS_EIP2200: u64 = 2_300;
/// EIP-2200: SSTORE from clean zero to non-zero.
pub const SSTORE_SET_GAS_EIP2200: u64 = 20_000;
/// EIP-2200: SSTORE from clean non-zero to something else.
pub const SSTORE_RESET_GAS_EIP2200: u64 = 5_000;
/// EIP-2200: refund for clearing an originally existing slot.
pub const SSTORE_CLEARS_SCHEDULE_REFUND_EIP2200: u64 = 15_000;
/// EIP-2200: cost of a storage read.
pub const SLOAD_GAS_EIP2200: u64 = 800;

/// EIP-2929: first access of an account in a transaction.
pub const COLD_ACCOUNT_ACCESS_COST_EIP2929: u64 = 2_600;
/// EIP-2929: first access of a storage slot in a transaction.
pub const COLD_SLOAD_COST_EIP2929: u64 = 2_100;
/// EIP-2929: any subsequent access.
pub const WARM_STORAGE_READ_COST_EIP2929: u64 = 100;

/// EIP-3529: `SSTORE_RESET_GAS - COLD_SLOAD_COST + ACCESS_LIST_STORAGE_KEY_COST`.
pub const SSTORE_CLEARS_SCHEDULE_REFUND_EIP3529: u64 =
    SSTORE_RESET_GAS_EIP2200 - COLD_SLOAD_COST_EIP2929 + TX_ACCESS_LIST_STORAGE_KEY_GAS;

/// EIP-150: base cost of SELFDESTRUCT.
pub const SELFDESTRUCT_GAS_EIP150: u64 = 5_000;
/// SELFDESTRUCT to a beneficiary account that must be created.
pub const CREATE_BY_SELFDESTRUCT_GAS: u64 = 25_000;
/// Refunded for the first SELFDESTRUCT of a contract.
pub const SELFDESTRUCT_REFUND_GAS: u64 = 24_000;

/// Paid for a CALL that creates an account.
pub const CALL_NEW_ACCOUNT_GAS: u64 = 25_000;
/// Paid for a CALL that transfers value.
pub const CALL_VALUE_TRANSFER_GAS: u64 = 9_000;

/// Linear coefficient of memory expansion, per word.
pub const MEMORY_GAS: u64 = 3;
/// Divisor of the quadratic coefficient of memory expansion.
pub const QUAD_COEFF_DIV: u64 = 512;
/// Per word copied by the copy opcodes.
pub const COPY_GAS: u64 = 3;
/// Per word hashed by KECCAK256.
pub const KECCAK256_WORD_GAS: u64 = 6;
/// EIP-3860: per word of init code.
pub const INIT_CODE_WORD_GAS: u64 = 2;

/// Base cost of a LOG operation.
pub const LOG_GAS: u64 = 375;
/// Per LOG topic.
pub const LOG_TOPIC_GAS: u64 = 375;
/// Per byte of LOG data.
pub const LOG_DATA_GAS: u64 = 8;
/// Bytes of history stored per LOG topic.
pub const LOG_TOPIC_BYTES: u64 = 32;

/// Base cost of EXP.
pub const EXP_GAS: u64 = 10;
/// Per byte of exponent before EIP-158.
pub const EXP_BYTE_FRONTIER: u64 = 10;
/// EIP-158: per byte of exponent.
pub const EXP_BYTE_EIP158: u64 = 50;

/// Base cost of a transaction.
pub const TX_GAS: u64 = 21_000;
/// Base cost of a contract creation transaction after Homestead.
pub const TX_GAS_CONTRACT_CREATION: u64 = 53_000;
/// Per zero byte of transaction data.
pub const TX_DATA_ZERO_GAS: u64 = 4;
/// Per non-zero byte of transaction data before EIP-2028.
pub const TX_DATA_NON_ZERO_GAS_FRONTIER: u64 = 68;
/// EIP-2028: per non-zero byte of transaction data.
pub const TX_DATA_NON_ZERO_GAS_EIP2028: u64 = 16;
/// EIP-2930: per address in the access list.
pub const TX_ACCESS_LIST_ADDRESS_GAS: u64 = 2_400;
/// EIP-2930: per storage key in the access list.
pub const TX_ACCESS_LIST_STORAGE_KEY_GAS: u64 = 1_900;
/// EIP-7623: tokens counted per non-zero calldata byte.
pub const TX_TOKEN_PER_NON_ZERO_BYTE: u64 = 4;
/// EIP-7623: minimum gas per calldata token.
pub const TX_COST_FLOOR_PER_TOKEN: u64 = 10;

/// EIP-170: maximum deployed code size.
pub const MAX_CODE_SIZE: u64 = 24_576;
/// EIP-3860: maximum init code size.
pub const MAX_INIT_CODE_SIZE: u64 = 2 * MAX_CODE_SIZE;

/// Largest memory size whose expansion cost fits in a `u64`.
pub const MAX_MEMORY_SIZE: u64 = 0x1F_FFFF_FFE0;

const _: () = assert!(LOG_TOPIC_GAS >= LOG_TOPIC_BYTES * LOG_DATA_GAS);
