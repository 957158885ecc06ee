//! Resource dimensions tracked by multi-gas.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::MultiGasError;

/// Number of resource dimensions. Exclusive upper bound of [`ResourceKind`] ordinals.
pub const NUM_RESOURCE_KIND: usize = 8;

/// A dimension of multi-dimensional gas.
///
/// The discriminants are persisted (see the RLP encoding of [`MultiGas`](crate::MultiGas)) and
/// must never be reordered. New dimensions are appended at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ResourceKind {
    /// Gas that has not been classified yet.
    Unknown = 0,
    /// Execution work: arithmetic, hashing, memory expansion, call forwarding.
    Computation = 1,
    /// Data that is appended to chain history, such as event logs.
    HistoryGrowth = 2,
    /// Reads and writes of existing state.
    StorageAccess = 3,
    /// Creation of new state: new slots and new accounts.
    StorageGrowth = 4,
    /// Calldata posted to the parent chain.
    L1Calldata = 5,
    /// Calldata processed on this chain.
    L2Calldata = 6,
    /// Execution work performed by wasm programs.
    WasmComputation = 7,
}

impl ResourceKind {
    /// All resource kinds in ordinal order.
    pub const ALL: [Self; NUM_RESOURCE_KIND] = [
        Self::Unknown,
        Self::Computation,
        Self::HistoryGrowth,
        Self::StorageAccess,
        Self::StorageGrowth,
        Self::L1Calldata,
        Self::L2Calldata,
        Self::WasmComputation,
    ];

    /// Returns the dense array index of this kind.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the snake-case name of this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Computation => "computation",
            Self::HistoryGrowth => "history_growth",
            Self::StorageAccess => "storage_access",
            Self::StorageGrowth => "storage_growth",
            Self::L1Calldata => "l1_calldata",
            Self::L2Calldata => "l2_calldata",
            Self::WasmComputation => "wasm_computation",
        }
    }
}

impl TryFrom<u8> for ResourceKind {
    type Error = MultiGasError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(value as usize).copied().ok_or(MultiGasError::InvalidResourceKind(value))
    }
}

impl From<ResourceKind> for u8 {
    fn from(kind: ResourceKind) -> Self {
        kind as Self
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
