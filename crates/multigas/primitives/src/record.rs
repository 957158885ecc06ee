//! Per-block and per-transaction multi-gas records.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use crate::MultiGas;

/// Multi-gas used by a single transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionMultiGas {
    /// Transaction hash.
    pub tx_hash: B256,
    /// Position of the transaction in its block.
    pub tx_index: u32,
    /// Gas used by the transaction.
    pub multi_gas: MultiGas,
}

/// Aggregated multi-gas of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockMultiGas {
    /// Block number.
    pub block_number: u64,
    /// Block hash.
    pub block_hash: B256,
    /// Block timestamp, in seconds.
    pub block_timestamp: u64,
    /// Sum over all transactions of the block.
    pub multi_gas: MultiGas,
}

/// A block with the multi-gas of each of its transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTransactionsMultiGas {
    /// Block number.
    pub block_number: u64,
    /// Block hash.
    pub block_hash: B256,
    /// Block timestamp, in seconds.
    pub block_timestamp: u64,
    /// Transactions in execution order.
    pub transactions: Vec<TransactionMultiGas>,
}

impl BlockTransactionsMultiGas {
    /// Returns the saturating sum of the transactions' multi-gas.
    pub fn total(&self) -> MultiGas {
        self.transactions
            .iter()
            .fold(MultiGas::ZERO, |acc, tx| acc.saturating_add(tx.multi_gas))
    }
}

/// A record sent to the collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultiGasRecord {
    /// Block-level aggregate only.
    Block(BlockMultiGas),
    /// Block with per-transaction detail.
    Transactions(BlockTransactionsMultiGas),
}

impl MultiGasRecord {
    /// Returns the block number of the record.
    pub const fn block_number(&self) -> u64 {
        match self {
            Self::Block(block) => block.block_number,
            Self::Transactions(block) => block.block_number,
        }
    }

    /// Returns the block-level multi-gas of the record.
    pub fn multi_gas(&self) -> MultiGas {
        match self {
            Self::Block(block) => block.multi_gas,
            Self::Transactions(block) => block.total(),
        }
    }
}

impl From<BlockMultiGas> for MultiGasRecord {
    fn from(block: BlockMultiGas) -> Self {
        Self::Block(block)
    }
}

impl From<BlockTransactionsMultiGas> for MultiGasRecord {
    fn from(block: BlockTransactionsMultiGas) -> Self {
        Self::Transactions(block)
    }
}

/// Collects transaction multi-gas while a block executes.
///
/// Sums are saturating: telemetry must never abort block processing.
#[derive(Debug, Clone)]
pub struct BlockMultiGasAccumulator {
    block_number: u64,
    block_hash: B256,
    block_timestamp: u64,
    total: MultiGas,
    transactions: Vec<TransactionMultiGas>,
}

impl BlockMultiGasAccumulator {
    /// Starts accumulating for the given block.
    pub const fn new(block_number: u64, block_hash: B256, block_timestamp: u64) -> Self {
        Self {
            block_number,
            block_hash,
            block_timestamp,
            total: MultiGas::ZERO,
            transactions: Vec::new(),
        }
    }

    /// Records the multi-gas of the next transaction. Its index is its position in the block.
    pub fn add_transaction(&mut self, tx_hash: B256, multi_gas: MultiGas) {
        let tx_index = u32::try_from(self.transactions.len()).unwrap_or(u32::MAX);
        self.total.saturating_add_into(multi_gas);
        self.transactions.push(TransactionMultiGas { tx_hash, tx_index, multi_gas });
    }

    /// Returns the running block total.
    pub const fn total(&self) -> MultiGas {
        self.total
    }

    /// Returns the number of transactions recorded so far.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Returns `true` if no transaction was recorded.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Finishes the block, keeping only the aggregate.
    pub fn finish_block(self) -> BlockMultiGas {
        BlockMultiGas {
            block_number: self.block_number,
            block_hash: self.block_hash,
            block_timestamp: self.block_timestamp,
            multi_gas: self.total,
        }
    }

    /// Finishes the block, keeping the per-transaction detail.
    pub fn finish_transactions(self) -> BlockTransactionsMultiGas {
        BlockTransactionsMultiGas {
            block_number: self.block_number,
            block_hash: self.block_hash,
            block_timestamp: self.block_timestamp,
            transactions: self.transactions,
        }
    }
}
