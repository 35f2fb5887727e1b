use rayon::prelude::*;
use splicescan_core::errors::ScanError;

use crate::scorer::MotifScorer;

/// One score per window start; NaN marks a window the scorer could not score.
pub type ScoreArray = Vec<f64>;

fn check_lengths(len: usize, motif_width: usize) -> Result<(), ScanError> {
    if motif_width == 0 {
        return Err(ScanError::InvalidConfig(
            "motif width must be greater than zero".to_string(),
        ));
    }
    if len < motif_width {
        return Err(ScanError::SequenceTooShort {
            length: len,
            width: motif_width,
        });
    }
    Ok(())
}

#[inline]
fn score_one<S: MotifScorer + ?Sized>(scorer: &S, window: &[u8]) -> f64 {
    let score = scorer.score(window);
    if scorer.is_sentinel(score) {
        f64::NAN
    } else {
        score
    }
}

///
/// Slide a `motif_width` window across `seq` and score every position.
///
/// The result has `len(seq) - motif_width + 1` entries; entry `i` is the
/// score of `seq[i..i + motif_width]`.
///
pub fn score_windows<S: MotifScorer + ?Sized>(
    seq: &[u8],
    motif_width: usize,
    scorer: &S,
) -> Result<ScoreArray, ScanError> {
    check_lengths(seq.len(), motif_width)?;
    Ok(seq
        .windows(motif_width)
        .map(|window| score_one(scorer, window))
        .collect())
}

/// Parallel [`score_windows`]; identical output, worth it for long sequences
/// or expensive scorers.
pub fn score_windows_par<S: MotifScorer + ?Sized>(
    seq: &[u8],
    motif_width: usize,
    scorer: &S,
) -> Result<ScoreArray, ScanError> {
    check_lengths(seq.len(), motif_width)?;
    Ok(seq
        .par_windows(motif_width)
        .map(|window| score_one(scorer, window))
        .collect())
}
