#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/base/base/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod constraint;
pub use constraint::{ResourceConstraint, ResourceConstraints};

mod error;
pub use error::{ConstraintError, MultiGasError};

mod gas;
pub use gas::{MultiGas, Pair};

mod record;
pub use record::{
    BlockMultiGas, BlockMultiGasAccumulator, BlockTransactionsMultiGas, MultiGasRecord,
    TransactionMultiGas,
};

mod resources;
pub use resources::{NUM_RESOURCE_KIND, ResourceKind};

mod rlp;
