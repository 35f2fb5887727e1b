//! Core types for splicescan: tools for scanning splice-site motif changes caused by variants.
//!
//! This crate holds what every other splicescan crate shares:
//!
//! - the data model ([`models::Locus`], [`models::Window`], [`models::Strand`], [`models::MotifKind`])
//! - the process-wide [`config::ScanConfig`]
//! - the error taxonomy ([`errors::ScanError`]) and the rejection reasons derived from it
//! - small file helpers (gzip-aware readers and writers)

pub mod config;
pub mod consts;
pub mod errors;
pub mod models;
pub mod utils;

// re-exports
pub use config::{MotifConfig, ScanConfig, ScorerConfig};
pub use errors::{ConfigError, RejectKind, ScanError};
pub use models::{Locus, MotifKind, Strand, Window};
