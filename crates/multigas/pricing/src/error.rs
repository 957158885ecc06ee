//! Errors raised by gas functions.

use base_multigas::{MultiGas, ResourceKind};
use thiserror::Error;

/// Errors raised while pricing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GasError {
    /// An operand or an intermediate cost does not fit in a `u64`.
    #[error("gas uint64 overflow")]
    GasUintOverflow,
    /// The frame cannot afford a charge taken before the call.
    #[error("out of gas")]
    OutOfGas,
    /// SSTORE with at most the sentry stipend left.
    #[error("not enough gas for reentrancy sentry")]
    ReentrancySentry,
    /// CREATE or CREATE2 with init code above the limit.
    #[error("max initcode size exceeded: size {size}, limit {limit}")]
    MaxInitCodeSizeExceeded {
        /// Requested init code size.
        size: u64,
        /// Configured limit.
        limit: u64,
    },
    /// The operation reads more stack items than present.
    #[error("stack underflow ({depth} <=> {required})")]
    StackUnderflow {
        /// Current stack depth.
        depth: usize,
        /// Items the operation needs.
        required: usize,
    },
}

/// Overflow-checked [`MultiGas`] arithmetic reporting [`GasError::GasUintOverflow`].
pub(crate) trait CheckedMultiGas: Sized {
    fn try_increment(self, kind: ResourceKind, amount: u64) -> Result<Self, GasError>;

    fn try_add(self, other: Self) -> Result<Self, GasError>;
}

impl CheckedMultiGas for MultiGas {
    fn try_increment(self, kind: ResourceKind, amount: u64) -> Result<Self, GasError> {
        self.checked_increment(kind, amount).ok_or(GasError::GasUintOverflow)
    }

    fn try_add(self, other: Self) -> Result<Self, GasError> {
        self.checked_add(other).ok_or(GasError::GasUintOverflow)
    }
}
