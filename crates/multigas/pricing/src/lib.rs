#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/base/base/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod acl;
pub mod gas_table;
pub mod params;
pub mod stateless;

mod constant;
pub use constant::{constant_multi_gas, precompile_multi_gas};

mod error;
pub(crate) use error::CheckedMultiGas;
pub use error::GasError;

mod evm;
pub use evm::{Evm, GasFn};

mod host;
pub use host::{AccessEvents, Contract, Host, Stack, StateDb};

mod intrinsic;
pub use intrinsic::{floor_data_gas, intrinsic_multi_gas};

mod memory;
pub use memory::{Memory, MemoryGasState, memory_gas_cost, to_word_size};

mod opcode;
pub use opcode::OpCode;

mod rules;
pub use rules::{ChainConfig, ChainRules};

mod table;
pub use table::dynamic_gas_fn;

#[cfg(test)]
mod test_utils;
