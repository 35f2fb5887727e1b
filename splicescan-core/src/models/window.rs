use std::fmt::{self, Display};

use crate::errors::ScanError;
use crate::models::Locus;

/// Represent a genomic span from [start, end)
/// 0-based, inclusive start, exclusive of end
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
pub struct Window {
    pub start: u64,
    pub end: u64,
}

impl Window {
    ///
    /// The span `[pos - before, pos + len(ref) + after)` around a variant, where
    /// `pos` is the 0-based start of the reference allele.
    ///
    pub fn around(locus: &Locus, before: usize, after: usize) -> Result<Self, ScanError> {
        let start0 = locus.start0();
        let start = start0
            .checked_sub(before as u64)
            .ok_or_else(|| ScanError::OutOfRange {
                chrom: locus.chrom.clone(),
                start: start0 as i64 - before as i64,
                end: (start0 + locus.reference_allele.len() as u64 + after as u64) as i64,
                length: 0,
            })?;
        let end = start0 + locus.reference_allele.len() as u64 + after as u64;

        Ok(Window { start, end })
    }

    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
