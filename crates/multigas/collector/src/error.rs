//! Collector errors.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors returned by the multi-gas collector.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// No output directory was configured.
    #[error("multi-gas output directory is required")]
    OutputDirRequired,
    /// The configured batch size is zero.
    #[error("multi-gas batch size must be greater than zero")]
    BatchSizeRequired,
    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateOutputDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A batch file could not be written.
    #[error("failed to write batch file {path}: {source}")]
    Write {
        /// File that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
