use std::ops::Range;

use splicescan_core::errors::ScanError;
use splicescan_core::models::MotifKind;

///
/// Maximal gain and loss of one motif caused by a variant.
///
/// Offsets are relative to the window starting at the variant (0), positive
/// downstream on the strand the motif was read on. `loss` is reported as a
/// positive magnitude.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotifDelta {
    pub motif: MotifKind,
    pub gain: f64,
    pub gain_offset: i64,
    pub loss: f64,
    pub loss_offset: i64,
}

/// Gain and loss before they are tagged with a motif.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaExtremes {
    pub gain: f64,
    pub gain_offset: i64,
    pub loss: f64,
    pub loss_offset: i64,
}

impl DeltaExtremes {
    pub fn for_motif(self, motif: MotifKind) -> MotifDelta {
        MotifDelta {
            motif,
            gain: self.gain,
            gain_offset: self.gain_offset,
            loss: self.loss,
            loss_offset: self.loss_offset,
        }
    }
}

/// Index of the extreme value, `better(a, b)` meaning `a` beats `b`.
///
/// The first occurrence wins ties, except that a padded index gives way to a
/// non-padded one holding the same value.
fn extreme_index(
    delta: &[f64],
    padded: &Range<usize>,
    better: impl Fn(f64, f64) -> bool,
) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (k, &value) in delta.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        best = match best {
            None => Some(k),
            Some(b) if better(value, delta[b]) => Some(k),
            Some(b) if value == delta[b] && padded.contains(&b) && !padded.contains(&k) => Some(k),
            keep => keep,
        };
    }
    best
}

///
/// Subtract aligned score arrays and locate the largest gain and loss.
///
/// `padded` holds the indices of variant entries that are padding for deleted
/// bases; they never win a tie against a real entry.
///
pub fn extract_delta_masked(
    ref_scores: &[f64],
    var_scores: &[f64],
    anchor_index: usize,
    padded: Range<usize>,
) -> Result<DeltaExtremes, ScanError> {
    if ref_scores.len() != var_scores.len() {
        return Err(ScanError::IndelAlignment {
            ref_len: ref_scores.len(),
            var_len: var_scores.len(),
            anchor_index,
            length_delta: var_scores.len() as isize - ref_scores.len() as isize,
        });
    }

    // NaN on either side propagates, keeping the entry in place but out of the search
    let delta: Vec<f64> = var_scores
        .iter()
        .zip(ref_scores)
        .map(|(v, r)| v - r)
        .collect();

    let gain_index = extreme_index(&delta, &padded, |a, b| a > b).ok_or(ScanError::NoScorableWindow)?;
    let loss_index = extreme_index(&delta, &padded, |a, b| a < b).ok_or(ScanError::NoScorableWindow)?;

    // `+ 0.0` turns -0.0 into 0.0 so it formats as "0.00"
    Ok(DeltaExtremes {
        gain: delta[gain_index] + 0.0,
        gain_offset: gain_index as i64 - anchor_index as i64,
        loss: -delta[loss_index] + 0.0,
        loss_offset: loss_index as i64 - anchor_index as i64,
    })
}

///
/// Subtract aligned score arrays and locate the largest gain and loss.
///
/// `gain = max(var - ref)` and `loss = -min(var - ref)`, each with its offset
/// from `anchor_index`. Entries where either score is NaN are skipped; if
/// nothing is left the call fails with [`ScanError::NoScorableWindow`].
///
pub fn extract_delta(
    ref_scores: &[f64],
    var_scores: &[f64],
    anchor_index: usize,
) -> Result<DeltaExtremes, ScanError> {
    extract_delta_masked(ref_scores, var_scores, anchor_index, 0..0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::reconcile::reconcile_aligned;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[rstest]
    fn test_substitution_gain() {
        let result = extract_delta(&[0.1, 0.5, 0.2], &[0.1, 0.9, 0.2], 0).unwrap();
        assert_close(result.gain, 0.4);
        assert_eq!(result.gain_offset, 1);
        assert_eq!(result.loss, 0.0);
        assert!(result.loss.is_sign_positive());
        assert_eq!(result.loss_offset, 0);
    }

    #[rstest]
    fn test_offsets_are_relative_to_anchor() {
        let result = extract_delta(&[1.0, 1.0, 1.0, 1.0, 1.0], &[1.0, 3.0, 1.0, 1.0, -2.0], 2).unwrap();
        assert_eq!(result.gain, 2.0);
        assert_eq!(result.gain_offset, -1);
        assert_eq!(result.loss, 3.0);
        assert_eq!(result.loss_offset, 2);
    }

    #[rstest]
    fn test_loss_is_negative_when_everything_gains() {
        let result = extract_delta(&[0.0, 0.0], &[1.0, 2.0], 0).unwrap();
        assert_eq!(result.gain, 2.0);
        assert_eq!(result.loss, -1.0);
        assert_eq!(result.loss_offset, 0);
    }

    #[rstest]
    fn test_nan_entries_are_skipped() {
        let result = extract_delta(
            &[f64::NAN, 1.0, 1.0, 1.0],
            &[9.0, 1.5, f64::NAN, 0.5],
            1,
        )
        .unwrap();
        assert_eq!(result.gain, 0.5);
        assert_eq!(result.gain_offset, 0);
        assert_eq!(result.loss, 0.5);
        assert_eq!(result.loss_offset, 2);
    }

    #[rstest]
    fn test_all_nan_is_no_scorable_window() {
        let err = extract_delta(&[f64::NAN, 1.0], &[1.0, f64::NAN], 0).unwrap_err();
        assert_eq!(err, ScanError::NoScorableWindow);
    }

    #[rstest]
    fn test_unequal_lengths() {
        let err = extract_delta(&[1.0, 2.0], &[1.0], 0).unwrap_err();
        assert!(matches!(err, ScanError::IndelAlignment { .. }));
    }

    #[rstest]
    fn test_identical_scores_have_no_delta() {
        let scores = [3.2, -1.0, 7.5, 0.0];
        let result = extract_delta(&scores, &scores, 1).unwrap();
        assert_eq!(result.gain, 0.0);
        assert_eq!(result.loss, 0.0);
        assert!(result.loss.is_sign_positive());
    }

    #[rstest]
    fn test_padding_never_wins_a_tie() {
        // deletion padded at index 1; the real entry at 3 has the same delta
        let reference = vec![0.0, 2.0, 0.0, 2.0, 0.0];
        let variant = vec![0.0, 0.0, 0.0, 0.0];
        let aligned = reconcile_aligned(reference, variant, 1, -1).unwrap();
        assert_eq!(aligned.variant, vec![0.0, 0.0, 0.0, 0.0, 0.0]);

        let result = extract_delta_masked(
            &aligned.reference,
            &aligned.variant,
            1,
            aligned.padded.clone(),
        )
        .unwrap();
        assert_eq!(result.loss, 2.0);
        assert_eq!(result.loss_offset, 2);
        assert!(!aligned.padded.contains(&((result.loss_offset + 1) as usize)));
    }

    #[rstest]
    fn test_padding_with_zero_reference_is_neutral() {
        let reference = vec![0.5, 0.0, 0.0, 0.5];
        let variant = vec![0.5, 0.0, 0.9];
        let aligned = reconcile_aligned(reference, variant, 1, -1).unwrap();
        let result = extract_delta_masked(
            &aligned.reference,
            &aligned.variant,
            1,
            aligned.padded.clone(),
        )
        .unwrap();
        // index 3 carries the only real change
        assert_close(result.gain, 0.4);
        assert_eq!(result.gain_offset, 2);
        // the zero-delta tie for loss resolves to a non-padded index
        assert!(!aligned.padded.contains(&((result.loss_offset + 1) as usize)));
    }

    #[rstest]
    fn test_for_motif() {
        let result = extract_delta(&[0.0], &[1.0], 0).unwrap().for_motif(MotifKind::Donor);
        assert_eq!(result.motif, MotifKind::Donor);
        assert_eq!(result.gain, 1.0);
    }
}
