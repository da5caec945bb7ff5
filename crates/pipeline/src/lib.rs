#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/oriel/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod engine;
pub use engine::Pipeline;

mod memory;
pub use memory::MemorySource;

mod error;
pub use error::PipelineError;
