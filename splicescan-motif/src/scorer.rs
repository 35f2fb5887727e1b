use std::sync::Arc;

use splicescan_core::config::ScanConfig;
use splicescan_core::errors::ScanError;
use splicescan_core::models::MotifKind;

///
/// A fixed-width motif scorer: maps a nucleotide window to a splicing-strength
/// score.
///
/// The scanner treats implementations as black boxes. A scorer may flag
/// windows it cannot score by returning a sentinel; [`MotifScorer::is_sentinel`]
/// tells the scanner which values those are, and they are stored as NaN.
///
pub trait MotifScorer: Send + Sync {
    fn score(&self, window: &[u8]) -> f64;

    /// Width of the windows this scorer expects, when it knows it.
    fn width(&self) -> Option<usize> {
        None
    }

    fn is_sentinel(&self, score: f64) -> bool {
        !score.is_finite()
    }
}

impl<F> MotifScorer for F
where
    F: Fn(&[u8]) -> f64 + Send + Sync,
{
    fn score(&self, window: &[u8]) -> f64 {
        self(window)
    }
}

/// The donor and acceptor scorers, constructed once at start-up and shared
/// read-only by every worker.
#[derive(Clone)]
pub struct ScorerSet {
    donor: Arc<dyn MotifScorer>,
    acceptor: Arc<dyn MotifScorer>,
}

impl std::fmt::Debug for ScorerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScorerSet").finish_non_exhaustive()
    }
}

impl ScorerSet {
    pub fn new(donor: Arc<dyn MotifScorer>, acceptor: Arc<dyn MotifScorer>) -> Self {
        ScorerSet { donor, acceptor }
    }

    pub fn get(&self, kind: MotifKind) -> &dyn MotifScorer {
        match kind {
            MotifKind::Donor => self.donor.as_ref(),
            MotifKind::Acceptor => self.acceptor.as_ref(),
        }
    }

    ///
    /// Check that every scorer that knows its width agrees with the configured
    /// width for its motif. A mismatch is a configuration error.
    ///
    pub fn check_widths(&self, config: &ScanConfig) -> Result<(), ScanError> {
        for kind in MotifKind::ALL {
            let expected = config.motif(kind).width;
            if let Some(actual) = self.get(kind).width() {
                if actual != expected {
                    return Err(ScanError::InvalidConfig(format!(
                        "{} scorer has width {} but the configuration expects {}",
                        kind, actual, expected
                    )));
                }
            }
        }
        Ok(())
    }
}
