//! Protobuf messages of the batch file format.
//!
//! A batch file holds exactly one [`BlockMultiGasBatch`]. Per-transaction gas omits `unknown`
//! and `refund` when they are zero and never carries `total_gas`; readers treat an absent field
//! as zero. Block-level gas always carries all three.

use base_multigas::{
    BlockMultiGas, BlockTransactionsMultiGas, MultiGas, MultiGasRecord, ResourceKind,
    TransactionMultiGas,
};

/// Gas of one transaction or block, split by resource.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MultiGasData {
    /// Computation gas.
    #[prost(uint64, tag = "1")]
    pub computation: u64,
    /// Storage access gas.
    #[prost(uint64, tag = "2")]
    pub storage_access: u64,
    /// Storage growth gas.
    #[prost(uint64, tag = "3")]
    pub storage_growth: u64,
    /// History growth gas.
    #[prost(uint64, tag = "4")]
    pub history_growth: u64,
    /// L1 calldata gas.
    #[prost(uint64, tag = "5")]
    pub l1_calldata: u64,
    /// L2 calldata gas.
    #[prost(uint64, tag = "6")]
    pub l2_calldata: u64,
    /// Wasm computation gas.
    #[prost(uint64, tag = "7")]
    pub wasm_computation: u64,
    /// Gas not attributed to any resource.
    #[prost(uint64, optional, tag = "8")]
    pub unknown: Option<u64>,
    /// Refund counter.
    #[prost(uint64, optional, tag = "9")]
    pub refund: Option<u64>,
    /// Sum of all resources.
    #[prost(uint64, optional, tag = "10")]
    pub total_gas: Option<u64>,
}

impl MultiGasData {
    /// Encodes the gas of a transaction, leaving zero optional fields out.
    pub fn from_transaction(gas: &MultiGas) -> Self {
        let non_zero = |v: u64| (v != 0).then_some(v);
        Self {
            unknown: non_zero(gas.get(ResourceKind::Unknown)),
            refund: non_zero(gas.refund()),
            total_gas: None,
            ..Self::resources(gas)
        }
    }

    /// Encodes the gas of a block, including its total.
    pub fn from_block(gas: &MultiGas) -> Self {
        Self {
            unknown: Some(gas.get(ResourceKind::Unknown)),
            refund: Some(gas.refund()),
            total_gas: Some(gas.total()),
            ..Self::resources(gas)
        }
    }

    fn resources(gas: &MultiGas) -> Self {
        Self {
            computation: gas.get(ResourceKind::Computation),
            storage_access: gas.get(ResourceKind::StorageAccess),
            storage_growth: gas.get(ResourceKind::StorageGrowth),
            history_growth: gas.get(ResourceKind::HistoryGrowth),
            l1_calldata: gas.get(ResourceKind::L1Calldata),
            l2_calldata: gas.get(ResourceKind::L2Calldata),
            wasm_computation: gas.get(ResourceKind::WasmComputation),
            unknown: None,
            refund: None,
            total_gas: None,
        }
    }

    /// Decodes the message back into a [`MultiGas`].
    ///
    /// The total is recomputed from the resources. Returns `None` if it overflows.
    pub fn to_multi_gas(&self) -> Option<MultiGas> {
        [
            (ResourceKind::Unknown, self.unknown.unwrap_or_default()),
            (ResourceKind::Computation, self.computation),
            (ResourceKind::HistoryGrowth, self.history_growth),
            (ResourceKind::StorageAccess, self.storage_access),
            (ResourceKind::StorageGrowth, self.storage_growth),
            (ResourceKind::L1Calldata, self.l1_calldata),
            (ResourceKind::L2Calldata, self.l2_calldata),
            (ResourceKind::WasmComputation, self.wasm_computation),
        ]
        .into_iter()
        .try_fold(MultiGas::ZERO, |gas, (kind, amount)| gas.checked_increment(kind, amount))
        .map(|gas| gas.with_refund(self.refund.unwrap_or_default()))
    }
}

/// Gas of one transaction within a block.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionMultiGasData {
    /// Transaction hash.
    #[prost(bytes = "vec", tag = "1")]
    pub tx_hash: Vec<u8>,
    /// Position of the transaction in its block.
    #[prost(uint32, tag = "2")]
    pub tx_index: u32,
    /// Gas used by the transaction.
    #[prost(message, optional, tag = "3")]
    pub gas_data: Option<MultiGasData>,
}

impl From<&TransactionMultiGas> for TransactionMultiGasData {
    fn from(tx: &TransactionMultiGas) -> Self {
        Self {
            tx_hash: tx.tx_hash.to_vec(),
            tx_index: tx.tx_index,
            gas_data: Some(MultiGasData::from_transaction(&tx.multi_gas)),
        }
    }
}

/// Gas of one block, either as a block total or per transaction.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockMultiGasData {
    /// Block number.
    #[prost(uint64, tag = "1")]
    pub block_number: u64,
    /// Block hash.
    #[prost(bytes = "vec", tag = "2")]
    pub block_hash: Vec<u8>,
    /// Block timestamp in seconds.
    #[prost(uint64, tag = "3")]
    pub block_timestamp: u64,
    /// Per-transaction gas, in execution order.
    #[prost(message, repeated, tag = "4")]
    pub transactions: Vec<TransactionMultiGasData>,
    /// Block total, set for block-level records only.
    #[prost(message, optional, tag = "5")]
    pub gas_data: Option<MultiGasData>,
}

impl From<&BlockMultiGas> for BlockMultiGasData {
    fn from(block: &BlockMultiGas) -> Self {
        Self {
            block_number: block.block_number,
            block_hash: block.block_hash.to_vec(),
            block_timestamp: block.block_timestamp,
            transactions: Vec::new(),
            gas_data: Some(MultiGasData::from_block(&block.multi_gas)),
        }
    }
}

impl From<&BlockTransactionsMultiGas> for BlockMultiGasData {
    fn from(block: &BlockTransactionsMultiGas) -> Self {
        Self {
            block_number: block.block_number,
            block_hash: block.block_hash.to_vec(),
            block_timestamp: block.block_timestamp,
            transactions: block.transactions.iter().map(Into::into).collect(),
            gas_data: None,
        }
    }
}

impl From<&MultiGasRecord> for BlockMultiGasData {
    fn from(record: &MultiGasRecord) -> Self {
        match record {
            MultiGasRecord::Block(block) => block.into(),
            MultiGasRecord::Transactions(block) => block.into(),
        }
    }
}

/// Contents of one batch file.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockMultiGasBatch {
    /// Unix time the batch was written, in seconds.
    #[prost(uint64, tag = "1")]
    pub batch_timestamp: u64,
    /// Records in arrival order.
    #[prost(message, repeated, tag = "2")]
    pub data: Vec<BlockMultiGasData>,
}
