use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::annotator::Annotator;
use crate::summary::{RecordOutcome, RejectionSummary};
use crate::vcf::VariantRecord;

/// Thread count, cancellation and progress reporting for a batch.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Worker threads; 0 lets rayon decide.
    pub threads: usize,
    /// Once set, records not yet started are reported as cancelled.
    pub cancel: Option<Arc<AtomicBool>>,
    pub progress: bool,
}

impl BatchOptions {
    pub fn with_threads(threads: usize) -> Self {
        BatchOptions {
            threads,
            ..Default::default()
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Outcomes in input order, and their summary.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub outcomes: Vec<RecordOutcome>,
    pub summary: RejectionSummary,
}

fn annotate_record(annotator: &Annotator, record: &VariantRecord) -> RecordOutcome {
    match record.locus().and_then(|locus| annotator.annotate(&locus)) {
        Ok(mut annotations) => {
            // report ALT as written in the input, not its canonical form
            for annotation in &mut annotations {
                annotation.allele.clone_from(&record.alt_allele);
            }
            RecordOutcome::Annotated(annotations)
        }
        Err(err) => {
            warn!("Skipping {}: {}", record, err);
            RecordOutcome::Rejected(err)
        }
    }
}

///
/// Annotate every record on a rayon pool, one record per unit of work.
///
/// A failing record is rejected without affecting the others. Outcomes come
/// back in the order of `records` whatever order the workers finished in.
///
pub fn annotate_batch(
    annotator: &Annotator,
    records: &[VariantRecord],
    options: &BatchOptions,
) -> Result<BatchReport> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads)
        .build()
        .context("Failed to build the thread pool")?;
    debug!(
        "Annotating {} records on {} threads",
        records.len(),
        pool.current_num_threads()
    );

    let bar = if options.progress {
        ProgressBar::new(records.len() as u64)
    } else {
        ProgressBar::hidden()
    };

    let mut tagged: Vec<(usize, RecordOutcome)> = pool.install(|| {
        records
            .par_iter()
            .enumerate()
            .map(|(index, record)| {
                if options.is_cancelled() {
                    return (index, RecordOutcome::Cancelled);
                }
                let outcome = annotate_record(annotator, record);
                bar.inc(1);
                (index, outcome)
            })
            .collect()
    });
    bar.finish_and_clear();

    tagged.sort_by_key(|(index, _)| *index);
    let outcomes: Vec<RecordOutcome> = tagged.into_iter().map(|(_, outcome)| outcome).collect();
    let summary: RejectionSummary = outcomes.iter().collect();

    if summary.cancelled > 0 {
        info!("Batch cancelled, {} records not started", summary.cancelled);
    }

    Ok(BatchReport { outcomes, summary })
}
