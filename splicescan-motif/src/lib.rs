//! Indel-aware splice motif scoring.
//!
//! The pieces, in the order a variant flows through them:
//!
//! 1. [`scan::score_windows`] slides a fixed-width [`MotifScorer`] across a
//!    sequence, one score per window start.
//! 2. [`reconcile::reconcile`] aligns the reference and variant score arrays
//!    when an indel made them different lengths.
//! 3. [`delta::extract_delta`] subtracts them and reports the largest gain
//!    and loss with their offsets from the variant.
//!
//! # Example
//!
//! ```
//! use splicescan_motif::{extract_delta, reconcile, score_windows};
//!
//! let gc = |w: &[u8]| w.iter().filter(|&&b| b == b'G' || b == b'C').count() as f64;
//!
//! // a one-base deletion of the 'G' at index 2
//! let reference = score_windows(b"AAGTT", 2, &gc).unwrap();
//! let variant = score_windows(b"AATT", 2, &gc).unwrap();
//!
//! let (reference, variant) = reconcile(reference, variant, 2, -1).unwrap();
//! assert_eq!(reference.len(), variant.len());
//!
//! let delta = extract_delta(&reference, &variant, 2).unwrap();
//! assert_eq!(delta.loss, 1.0);
//! ```

pub mod consts;
pub mod delta;
pub mod pwm;
pub mod reconcile;
pub mod scan;
pub mod scorer;

// re-exports
pub use delta::{DeltaExtremes, MotifDelta, extract_delta, extract_delta_masked};
pub use pwm::PositionWeightMatrix;
pub use reconcile::{AlignedScores, reconcile, reconcile_aligned};
pub use scan::{ScoreArray, score_windows, score_windows_par};
pub use scorer::{MotifScorer, ScorerSet};
