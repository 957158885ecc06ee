use std::path::PathBuf;

use clap::Args;
use serde::{Deserialize, Serialize};

/// Batch size used when none is configured.
pub const DEFAULT_BATCH_SIZE: u64 = 1_000;

/// Configuration of a [`Collector`](crate::Collector).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CollectorConfig {
    /// Directory batch files are written into. Created if missing.
    pub output_dir: PathBuf,
    /// Number of records per batch file.
    #[serde(default = "default_batch_size")]
    pub batch_size: u64,
}

const fn default_batch_size() -> u64 {
    DEFAULT_BATCH_SIZE
}

/// Command line arguments of the multi-gas collector.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CollectorArgs {
    /// Directory multi-gas batch files are written into.
    #[arg(long = "multigas.output-dir", env = "MULTIGAS_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Number of block records per multi-gas batch file.
    #[arg(
        long = "multigas.batch-size",
        env = "MULTIGAS_BATCH_SIZE",
        default_value_t = DEFAULT_BATCH_SIZE
    )]
    pub batch_size: u64,
}

impl From<CollectorArgs> for CollectorConfig {
    fn from(args: CollectorArgs) -> Self {
        Self { output_dir: args.output_dir, batch_size: args.batch_size }
    }
}
