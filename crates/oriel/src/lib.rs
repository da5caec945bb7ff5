//! # oriel
//!
//! Windowed columnar factor pipeline.
//!
//! This crate provides a unified interface to the oriel workspace. Individual
//! components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Core type definitions
//! - `traits`: The factor contract and engine boundary
//! - `math`: NaN-aware reductions
//! - `factors`: Reference factor implementations
//! - `pipeline`: Reference pipeline driver and in-memory source
//!
//! ## Example
//!
//! ```rust,ignore
//! use oriel::factors::MomentumFactor;
//! use oriel::pipeline::{MemorySource, Pipeline};
//!
//! // Or with specific features only:
//! // [dependencies]
//! // oriel = { version = "0.1", default-features = false, features = ["traits"] }
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use oriel_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use oriel_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use oriel_math as math;
#[cfg(feature = "factors")]
#[doc(inline)]
pub use oriel_factors as factors;
#[cfg(feature = "pipeline")]
#[doc(inline)]
pub use oriel_pipeline as pipeline;
