#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/oriel/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod factor;
pub use factor::{
    ConfigurableFactor, FactorError, FnFactor, Masked, WindowedFactor, validate_definition,
    validate_invocation,
};

mod source;
pub use source::{SourceError, WindowSource};
