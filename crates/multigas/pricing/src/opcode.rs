//! Opcodes with dynamic or classified gas.

use core::fmt;

/// An EVM opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpCode(pub u8);

impl OpCode {
    /// `ADD`
    pub const ADD: Self = Self(0x01);
    /// `EXP`
    pub const EXP: Self = Self(0x0a);
    /// `KECCAK256`
    pub const KECCAK256: Self = Self(0x20);
    /// `BALANCE`
    pub const BALANCE: Self = Self(0x31);
    /// `CALLDATACOPY`
    pub const CALLDATACOPY: Self = Self(0x37);
    /// `CODECOPY`
    pub const CODECOPY: Self = Self(0x39);
    /// `EXTCODESIZE`
    pub const EXTCODESIZE: Self = Self(0x3b);
    /// `EXTCODECOPY`
    pub const EXTCODECOPY: Self = Self(0x3c);
    /// `RETURNDATACOPY`
    pub const RETURNDATACOPY: Self = Self(0x3e);
    /// `EXTCODEHASH`
    pub const EXTCODEHASH: Self = Self(0x3f);
    /// `MLOAD`
    pub const MLOAD: Self = Self(0x51);
    /// `MSTORE`
    pub const MSTORE: Self = Self(0x52);
    /// `MSTORE8`
    pub const MSTORE8: Self = Self(0x53);
    /// `SLOAD`
    pub const SLOAD: Self = Self(0x54);
    /// `SSTORE`
    pub const SSTORE: Self = Self(0x55);
    /// `MCOPY`
    pub const MCOPY: Self = Self(0x5e);
    /// `LOG0`
    pub const LOG0: Self = Self(0xa0);
    /// `LOG1`
    pub const LOG1: Self = Self(0xa1);
    /// `LOG2`
    pub const LOG2: Self = Self(0xa2);
    /// `LOG3`
    pub const LOG3: Self = Self(0xa3);
    /// `LOG4`
    pub const LOG4: Self = Self(0xa4);
    /// `CREATE`
    pub const CREATE: Self = Self(0xf0);
    /// `CALL`
    pub const CALL: Self = Self(0xf1);
    /// `CALLCODE`
    pub const CALLCODE: Self = Self(0xf2);
    /// `RETURN`
    pub const RETURN: Self = Self(0xf3);
    /// `DELEGATECALL`
    pub const DELEGATECALL: Self = Self(0xf4);
    /// `CREATE2`
    pub const CREATE2: Self = Self(0xf5);
    /// `STATICCALL`
    pub const STATICCALL: Self = Self(0xfa);
    /// `REVERT`
    pub const REVERT: Self = Self(0xfd);
    /// `SELFDESTRUCT`
    pub const SELFDESTRUCT: Self = Self(0xff);
}

impl From<u8> for OpCode {
    fn from(byte: u8) -> Self {
        Self(byte)
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}", self.0)
    }
}
