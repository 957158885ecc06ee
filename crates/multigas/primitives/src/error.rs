//! Error types for multi-gas primitives.

use thiserror::Error;

use crate::NUM_RESOURCE_KIND;

/// Errors raised when external input is converted into multi-gas types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MultiGasError {
    /// The ordinal does not name a known resource dimension.
    #[error("invalid resource kind {0} (expected < {NUM_RESOURCE_KIND})")]
    InvalidResourceKind(u8),
}

/// Errors raised by [`ResourceConstraints`](crate::ResourceConstraints).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConstraintError {
    /// A constraint period must be at least one second.
    #[error("constraint period must be greater than zero")]
    ZeroPeriod,
}
