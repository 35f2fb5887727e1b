use std::collections::BTreeMap;
use std::fmt::{self, Display};

use splicescan_core::errors::{RejectKind, ScanError};

use crate::annotation::StrandAnnotation;

/// What happened to one input record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Annotated(Vec<StrandAnnotation>),
    Rejected(ScanError),
    /// The batch was cancelled before this record was started.
    Cancelled,
}

impl RecordOutcome {
    pub fn annotations(&self) -> Option<&[StrandAnnotation]> {
        match self {
            RecordOutcome::Annotated(annotations) => Some(annotations),
            _ => None,
        }
    }
}

/// End-of-run counts, rejections grouped by reason.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RejectionSummary {
    pub annotated: usize,
    pub rejected: BTreeMap<RejectKind, usize>,
    pub cancelled: usize,
}

impl RejectionSummary {
    pub fn record(&mut self, outcome: &RecordOutcome) {
        match outcome {
            RecordOutcome::Annotated(_) => self.annotated += 1,
            RecordOutcome::Rejected(err) => *self.rejected.entry(err.kind()).or_insert(0) += 1,
            RecordOutcome::Cancelled => self.cancelled += 1,
        }
    }

    pub fn total_rejected(&self) -> usize {
        self.rejected.values().sum()
    }

    pub fn total(&self) -> usize {
        self.annotated + self.total_rejected() + self.cancelled
    }
}

impl<'a> FromIterator<&'a RecordOutcome> for RejectionSummary {
    fn from_iter<I: IntoIterator<Item = &'a RecordOutcome>>(iter: I) -> Self {
        let mut summary = RejectionSummary::default();
        for outcome in iter {
            summary.record(outcome);
        }
        summary
    }
}

impl Display for RejectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Annotated {} of {} records, rejected {}",
            self.annotated,
            self.total(),
            self.total_rejected()
        )?;
        if !self.rejected.is_empty() {
            let reasons: Vec<String> = self
                .rejected
                .iter()
                .map(|(kind, count)| format!("{}: {}", kind, count))
                .collect();
            write!(f, " ({})", reasons.join(", "))?;
        }
        if self.cancelled > 0 {
            write!(f, ", cancelled {}", self.cancelled)?;
        }
        Ok(())
    }
}
