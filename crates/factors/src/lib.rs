#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/oriel/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod stddev;
pub use stddev::{StdDevConfig, StdDevFactor};

mod mean_difference;
pub use mean_difference::{MeanDifferenceConfig, MeanDifferenceFactor};

mod momentum;
pub use momentum::{MomentumConfig, MomentumFactor};
