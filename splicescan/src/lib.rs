//! # splicescan
//!
//! Scan how variants, indels included, create or destroy splice donor and
//! acceptor motifs. Each member crate is re-exported behind a feature of the
//! same name.

#[cfg(feature = "core")]
#[doc(inline)]
pub use splicescan_core as core;

#[cfg(feature = "seq")]
#[doc(inline)]
pub use splicescan_seq as seq;

#[cfg(feature = "motif")]
#[doc(inline)]
pub use splicescan_motif as motif;

#[cfg(feature = "annotate")]
#[doc(inline)]
pub use splicescan_annotate as annotate;
