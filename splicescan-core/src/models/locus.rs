use std::fmt::{self, Display};

use crate::errors::ScanError;

///
/// A single bi-allelic variant: the unit of work of the scanner.
///
/// Alleles are stored uppercase and only contain `A`, `C`, `G`, `T` or `N`.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Locus {
    pub chrom: String,
    /// 1-based position of the first reference base.
    pub position: u64,
    pub reference_allele: String,
    pub alternate_allele: String,
}

impl Locus {
    pub fn new(
        chrom: &str,
        position: u64,
        reference_allele: &str,
        alternate_allele: &str,
    ) -> Result<Self, ScanError> {
        if alternate_allele.contains(',') {
            return Err(ScanError::MultiAllelic {
                chrom: chrom.to_string(),
                position,
                alt: alternate_allele.to_string(),
            });
        }
        if position == 0 {
            return Err(ScanError::OutOfRange {
                chrom: chrom.to_string(),
                start: -1,
                end: reference_allele.len() as i64 - 1,
                length: 0,
            });
        }

        Ok(Locus {
            chrom: chrom.to_string(),
            position,
            reference_allele: canonical_allele(reference_allele)?,
            alternate_allele: canonical_allele(alternate_allele)?,
        })
    }

    /// 0-based position of the first reference base.
    pub fn start0(&self) -> u64 {
        self.position - 1
    }

    /// `len(alt) - len(ref)`; negative for deletions, positive for insertions.
    pub fn length_delta(&self) -> isize {
        self.alternate_allele.len() as isize - self.reference_allele.len() as isize
    }

    pub fn is_indel(&self) -> bool {
        self.length_delta() != 0
    }
}

impl Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {}>{}",
            self.chrom, self.position, self.reference_allele, self.alternate_allele
        )
    }
}

fn canonical_allele(allele: &str) -> Result<String, ScanError> {
    if allele.is_empty() {
        return Err(ScanError::InvalidAllele(allele.to_string()));
    }
    let upper = allele.to_ascii_uppercase();
    if upper
        .bytes()
        .all(|b| matches!(b, b'A' | b'C' | b'G' | b'T' | b'N'))
    {
        Ok(upper)
    } else {
        // symbolic (<DEL>), missing (.), spanning (*) and IUPAC alleles
        Err(ScanError::InvalidAllele(allele.to_string()))
    }
}
