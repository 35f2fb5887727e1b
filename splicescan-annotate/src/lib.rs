//! Splice motif annotation of VCF variants.
//!
//! For every variant the [`Annotator`] scores the donor and acceptor motifs
//! around the reference and the alternate allele, on both strands, and
//! reports the largest gain and loss of motif strength. [`annotate_vcf`]
//! runs it over a whole VCF in parallel and writes the result into INFO.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use splicescan_annotate::{AnnotateOptions, Annotator, annotate_vcf};
//! use splicescan_core::ScanConfig;
//! use splicescan_motif::{PositionWeightMatrix, ScorerSet};
//! use splicescan_seq::open_genome;
//!
//! let genome = open_genome("hg38.fa").unwrap();
//! let config = ScanConfig::default();
//! let scorers = ScorerSet::new(
//!     Arc::new(PositionWeightMatrix::from_file("donor.json").unwrap()),
//!     Arc::new(PositionWeightMatrix::from_file("acceptor.json").unwrap()),
//! );
//!
//! let annotator = Annotator::new(genome.as_ref(), &config, &scorers).unwrap();
//! let summary = annotate_vcf("input.vcf.gz", "output.vcf", &annotator, &AnnotateOptions::default()).unwrap();
//! println!("{}", summary);
//! ```

pub mod annotation;
pub mod annotator;
pub mod batch;
pub mod summary;
pub mod vcf;

pub use annotation::{StrandAnnotation, info_header_line};
pub use annotator::Annotator;
pub use batch::{BatchOptions, BatchReport, annotate_batch};
pub use summary::{RecordOutcome, RejectionSummary};
pub use vcf::{AnnotateOptions, VariantRecord, VcfReader, VcfWriter, annotate_vcf};
