//! Execution context handed to gas functions.

use base_multigas::MultiGas;

use crate::{ChainConfig, ChainRules, Contract, GasError, Memory, Stack};

/// Signature shared by every dynamic gas function.
///
/// The last argument is the memory size the operation needs, in bytes.
pub type GasFn<H> = fn(
    &mut Evm<'_, H>,
    &mut Contract,
    &Stack<'_>,
    &mut dyn Memory,
    u64,
) -> Result<MultiGas, GasError>;

/// The interpreter state a gas function may read or update.
#[derive(Debug)]
pub struct Evm<'a, H> {
    /// State and witness access.
    pub host: &'a mut H,
    /// Active forks.
    pub rules: ChainRules,
    /// Chain parameters.
    pub config: &'a ChainConfig,
    /// Gas forwarded to the callee, set by the CALL-family gas functions.
    pub call_gas_temp: u64,
}

impl<'a, H> Evm<'a, H> {
    /// Creates a context over `host`.
    pub const fn new(host: &'a mut H, rules: ChainRules, config: &'a ChainConfig) -> Self {
        Self { host, rules, config, call_gas_temp: 0 }
    }
}
