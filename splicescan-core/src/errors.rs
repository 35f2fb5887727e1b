use std::fmt::{self, Display};

use thiserror::Error;

/// Per-record failures of the scanning pipeline.
///
/// Everything except [`ScanError::InvalidConfig`] is scoped to a single
/// variant: the annotator turns it into a rejection and the batch moves on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    #[error("reference mismatch at {chrom}:{position}: expected {expected}, found {found}")]
    ReferenceMismatch {
        chrom: String,
        position: u64,
        expected: String,
        found: String,
    },

    #[error("sequence of length {length} is shorter than the motif width {width}")]
    SequenceTooShort { length: usize, width: usize },

    #[error(
        "indel alignment failed: ref scores={ref_len}, var scores={var_len}, anchor={anchor_index}, length delta={length_delta}"
    )]
    IndelAlignment {
        ref_len: usize,
        var_len: usize,
        anchor_index: usize,
        length_delta: isize,
    },

    #[error("no scorable window: every delta entry is undefined")]
    NoScorableWindow,

    #[error("unknown chromosome: {0}")]
    UnknownChromosome(String),

    #[error("region {chrom}:{start}-{end} is outside the sequence (length {length})")]
    OutOfRange {
        chrom: String,
        start: i64,
        end: i64,
        length: u64,
    },

    #[error("multi-allelic record at {chrom}:{position} ({alt}); split alleles first")]
    MultiAllelic {
        chrom: String,
        position: u64,
        alt: String,
    },

    #[error("invalid allele '{0}'")]
    InvalidAllele(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ScanError {
    pub fn kind(&self) -> RejectKind {
        match self {
            ScanError::ReferenceMismatch { .. } => RejectKind::ReferenceMismatch,
            ScanError::SequenceTooShort { .. } => RejectKind::SequenceTooShort,
            ScanError::IndelAlignment { .. } => RejectKind::IndelAlignment,
            ScanError::NoScorableWindow => RejectKind::NoScorableWindow,
            ScanError::UnknownChromosome(_) => RejectKind::UnknownChromosome,
            ScanError::OutOfRange { .. } => RejectKind::OutOfRange,
            ScanError::MultiAllelic { .. } => RejectKind::MultiAllelic,
            ScanError::InvalidAllele(_) => RejectKind::InvalidAllele,
            ScanError::InvalidConfig(_) => RejectKind::InvalidConfig,
        }
    }
}

/// Reason a record was rejected, used as the key of the end-of-run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RejectKind {
    ReferenceMismatch,
    SequenceTooShort,
    IndelAlignment,
    NoScorableWindow,
    UnknownChromosome,
    OutOfRange,
    MultiAllelic,
    InvalidAllele,
    InvalidConfig,
}

impl Display for RejectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RejectKind::ReferenceMismatch => "reference mismatch",
            RejectKind::SequenceTooShort => "sequence too short",
            RejectKind::IndelAlignment => "indel alignment",
            RejectKind::NoScorableWindow => "no scorable window",
            RejectKind::UnknownChromosome => "unknown chromosome",
            RejectKind::OutOfRange => "out of range",
            RejectKind::MultiAllelic => "multi-allelic",
            RejectKind::InvalidAllele => "invalid allele",
            RejectKind::InvalidConfig => "invalid configuration",
        };
        write!(f, "{}", name)
    }
}

/// Errors raised while loading configuration. These are fatal at start-up.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Can't read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Can't parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] ScanError),
}
