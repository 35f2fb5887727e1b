//! Sequence windows around a variant, on either strand, with or without the
//! alternate allele applied.

use splicescan_core::config::MotifConfig;
use splicescan_core::errors::ScanError;
use splicescan_core::models::{Locus, Strand, Window};

use crate::sequence::{Sequence, reverse_complement};
use crate::source::SequenceSource;

///
/// Extract the sequence `[pos - context_before, pos + len(ref) + context_after)`
/// around a variant.
///
/// The reference allele claimed by the locus is checked against the genome;
/// a disagreement means the input coordinates are corrupt and fails with
/// [`ScanError::ReferenceMismatch`]. With `apply_variant` the alternate allele
/// replaces the reference allele, so the result is
/// `len(alt) - len(ref)` bases longer than the reference window.
///
pub fn extract<S: SequenceSource + ?Sized>(
    source: &S,
    locus: &Locus,
    context_before: usize,
    context_after: usize,
    apply_variant: bool,
) -> Result<Sequence, ScanError> {
    let window = Window::around(locus, context_before, context_after)?;
    let mut seq = source.fetch(&locus.chrom, window.start, window.len())?;
    if seq.len() as u64 != window.len() {
        return Err(ScanError::OutOfRange {
            chrom: locus.chrom.clone(),
            start: window.start as i64,
            end: (window.start + seq.len() as u64) as i64,
            length: source.chrom_len(&locus.chrom).unwrap_or_default(),
        });
    }

    let ref_len = locus.reference_allele.len();
    let found = &seq[context_before..context_before + ref_len];
    if found != locus.reference_allele.as_bytes() {
        return Err(ScanError::ReferenceMismatch {
            chrom: locus.chrom.clone(),
            position: locus.position,
            expected: locus.reference_allele.clone(),
            found: String::from_utf8_lossy(found).into_owned(),
        });
    }

    if apply_variant {
        seq.splice(
            context_before..context_before + ref_len,
            locus.alternate_allele.bytes(),
        );
    }

    Ok(seq)
}

///
/// Extract the window a motif is scanned over, read on `strand`.
///
/// On the minus strand the genomic context is swapped before extraction and
/// the result reverse-complemented, so on both strands the variant starts at
/// index `config.context_before` and downstream offsets are positive.
///
pub fn extract_stranded<S: SequenceSource + ?Sized>(
    source: &S,
    locus: &Locus,
    config: &MotifConfig,
    strand: Strand,
    apply_variant: bool,
) -> Result<Sequence, ScanError> {
    if strand.is_reverse() {
        let seq = extract(
            source,
            locus,
            config.context_after,
            config.context_before,
            apply_variant,
        )?;
        Ok(reverse_complement(&seq))
    } else {
        extract(
            source,
            locus,
            config.context_before,
            config.context_after,
            apply_variant,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use crate::source::InMemoryGenome;

    //                         0123456789
    const CHR1: &str = "AACCGGTTACGTTTGA";

    #[fixture]
    fn genome() -> InMemoryGenome {
        vec![("chr1", CHR1)].into_iter().collect()
    }

    #[rstest]
    fn test_reference_window(genome: InMemoryGenome) {
        // 1-based 6 -> 0-based 5 ('G')
        let locus = Locus::new("chr1", 6, "G", "A").unwrap();
        let seq = extract(&genome, &locus, 3, 2, false).unwrap();
        assert_eq!(seq, b"CCGGTT".to_vec());
    }

    #[rstest]
    fn test_substitution_applied(genome: InMemoryGenome) {
        let locus = Locus::new("chr1", 6, "G", "A").unwrap();
        let seq = extract(&genome, &locus, 3, 2, true).unwrap();
        assert_eq!(seq, b"CCGATT".to_vec());
    }

    #[rstest]
    fn test_deletion_shortens_window(genome: InMemoryGenome) {
        let locus = Locus::new("chr1", 6, "GTT", "G").unwrap();
        let reference = extract(&genome, &locus, 2, 2, false).unwrap();
        let variant = extract(&genome, &locus, 2, 2, true).unwrap();
        assert_eq!(reference, b"CGGTTAC".to_vec());
        assert_eq!(variant, b"CGGAC".to_vec());
        assert_eq!(
            variant.len() as isize - reference.len() as isize,
            locus.length_delta()
        );
    }

    #[rstest]
    fn test_insertion_lengthens_window(genome: InMemoryGenome) {
        let locus = Locus::new("chr1", 6, "G", "GAAA").unwrap();
        let variant = extract(&genome, &locus, 1, 1, true).unwrap();
        assert_eq!(variant, b"GGAAAT".to_vec());
    }

    #[rstest]
    fn test_reference_mismatch(genome: InMemoryGenome) {
        let locus = Locus::new("chr1", 6, "A", "G").unwrap();
        let err = extract(&genome, &locus, 3, 2, false).unwrap_err();
        assert_eq!(
            err,
            ScanError::ReferenceMismatch {
                chrom: "chr1".to_string(),
                position: 6,
                expected: "A".to_string(),
                found: "G".to_string(),
            }
        );
    }

    #[rstest]
    fn test_lowercase_reference_matches(genome: InMemoryGenome) {
        let locus = Locus::new("chr1", 6, "g", "a").unwrap();
        assert!(extract(&genome, &locus, 0, 0, false).is_ok());
    }

    #[rstest]
    fn test_window_past_chromosome_end(genome: InMemoryGenome) {
        let locus = Locus::new("chr1", 15, "G", "A").unwrap();
        let err = extract(&genome, &locus, 1, 5, false).unwrap_err();
        assert!(matches!(err, ScanError::OutOfRange { .. }));
    }

    #[rstest]
    fn test_short_fetch_is_out_of_range(genome: InMemoryGenome) {
        // a source that hands back fewer bases than asked for
        struct Truncating(InMemoryGenome);
        impl SequenceSource for Truncating {
            fn fetch(&self, chrom: &str, start: u64, length: u64) -> Result<Sequence, ScanError> {
                let mut seq = self.0.fetch(chrom, start, length)?;
                seq.truncate(2);
                Ok(seq)
            }
            fn chrom_len(&self, chrom: &str) -> Option<u64> {
                self.0.chrom_len(chrom)
            }
        }

        let source = Truncating(genome);
        let locus = Locus::new("chr1", 6, "G", "A").unwrap();
        let err = extract(&source, &locus, 3, 2, false).unwrap_err();
        assert_eq!(
            err,
            ScanError::OutOfRange {
                chrom: "chr1".to_string(),
                start: 2,
                end: 4,
                length: 16,
            }
        );
    }

    #[rstest]
    fn test_minus_strand_anchor(genome: InMemoryGenome) {
        // before=3, after=1 on the minus strand: genomic [5-1, 5+1+3) = "GGTTA"
        let locus = Locus::new("chr1", 6, "G", "T").unwrap();
        let config = MotifConfig::new(2, 3, 1);

        let reference = extract_stranded(&genome, &locus, &config, Strand::Minus, false).unwrap();
        let variant = extract_stranded(&genome, &locus, &config, Strand::Minus, true).unwrap();
        assert_eq!(reference, b"TAACC".to_vec());
        assert_eq!(variant, b"TAAAC".to_vec());
        // the complemented variant base sits at index context_before
        assert_eq!(reference[3], b'C');
        assert_eq!(variant[3], b'A');
    }

    #[rstest]
    fn test_plus_strand_matches_extract(genome: InMemoryGenome) {
        let locus = Locus::new("chr1", 6, "G", "T").unwrap();
        let config = MotifConfig::new(2, 3, 1);
        assert_eq!(
            extract_stranded(&genome, &locus, &config, Strand::Plus, true).unwrap(),
            extract(&genome, &locus, 3, 1, true).unwrap()
        );
    }
}
