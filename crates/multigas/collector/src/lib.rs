#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/base/base/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod collector;
pub use collector::{BATCH_FILE_EXTENSION, BATCH_FILE_PREFIX, Collector, batch_file_name};

mod config;
pub use config::{CollectorArgs, CollectorConfig, DEFAULT_BATCH_SIZE};

mod error;
pub use error::CollectorError;

mod metrics;

pub mod proto;
