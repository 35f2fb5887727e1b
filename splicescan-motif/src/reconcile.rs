//! Alignment of reference and variant score arrays of different lengths.
//!
//! An indel changes the length of the variant sequence, and with it the number
//! of motif windows. Before the two arrays can be subtracted they are brought
//! back to a common coordinate: position `k` of both outputs refers to the
//! same reference window.

use std::ops::Range;

use log::debug;
use splicescan_core::errors::ScanError;

use crate::consts::PADDING_SCORE;
use crate::scan::ScoreArray;

/// Reference and variant scores of equal length, plus the indices of the
/// variant array that were inserted as padding for deleted bases.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedScores {
    pub reference: ScoreArray,
    pub variant: ScoreArray,
    pub padded: Range<usize>,
}

impl AlignedScores {
    pub fn len(&self) -> usize {
        self.reference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }

    pub fn into_pair(self) -> (ScoreArray, ScoreArray) {
        (self.reference, self.variant)
    }
}

/// Maximum of a run, skipping NaN. A run of only NaN stays NaN.
fn nan_max(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(f64::NAN, |acc, v| if acc.is_nan() || v > acc { v } else { acc })
}

///
/// Align `var_scores` to `ref_scores` around `anchor_index`, the array index of
/// the window starting at the variant.
///
/// - `length_delta == 0`: nothing to do.
/// - deletion (`length_delta < 0`): `|length_delta|` padding entries of
///   [`PADDING_SCORE`] are inserted into the variant at `anchor_index`.
/// - insertion (`length_delta > 0`): the `length_delta + 1` variant entries
///   starting at `anchor_index` collapse into one entry holding their maximum,
///   so the strongest of the windows touching the inserted bases survives.
///
/// `length_delta` must equal `len(var_scores) - len(ref_scores)`. Any
/// inconsistency between that, the anchor and the array bounds fails with
/// [`ScanError::IndelAlignment`] rather than producing a shifted delta.
///
pub fn reconcile_aligned(
    ref_scores: ScoreArray,
    mut var_scores: ScoreArray,
    anchor_index: usize,
    length_delta: isize,
) -> Result<AlignedScores, ScanError> {
    let ref_len = ref_scores.len();
    let var_len = var_scores.len();
    let alignment_error = || ScanError::IndelAlignment {
        ref_len,
        var_len,
        anchor_index,
        length_delta,
    };

    if var_len as isize - ref_len as isize != length_delta {
        debug!(
            "score lengths {} / {} disagree with length delta {}",
            ref_len, var_len, length_delta
        );
        return Err(alignment_error());
    }

    let mut padded = anchor_index..anchor_index;
    if length_delta < 0 {
        // deletion: the variant lost windows
        if anchor_index > var_len {
            return Err(alignment_error());
        }
        let pad = length_delta.unsigned_abs();
        var_scores.splice(
            anchor_index..anchor_index,
            std::iter::repeat_n(PADDING_SCORE, pad),
        );
        padded = anchor_index..anchor_index + pad;
    } else if length_delta > 0 {
        // insertion: the variant gained windows
        let run = length_delta as usize + 1;
        let run_end = anchor_index
            .checked_add(run)
            .filter(|&end| end <= var_len)
            .ok_or_else(alignment_error)?;
        let collapsed = nan_max(&var_scores[anchor_index..run_end]);
        var_scores.splice(anchor_index..run_end, std::iter::once(collapsed));
    }

    if var_scores.len() != ref_len {
        return Err(alignment_error());
    }

    Ok(AlignedScores {
        reference: ref_scores,
        variant: var_scores,
        padded,
    })
}

///
/// Align reference and variant score arrays; see [`reconcile_aligned`].
///
/// Both returned arrays have the length of `ref_scores`.
///
pub fn reconcile(
    ref_scores: ScoreArray,
    var_scores: ScoreArray,
    anchor_index: usize,
    length_delta: isize,
) -> Result<(ScoreArray, ScoreArray), ScanError> {
    reconcile_aligned(ref_scores, var_scores, anchor_index, length_delta).map(AlignedScores::into_pair)
}
