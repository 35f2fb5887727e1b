use log::{debug, warn};
use splicescan_core::config::ScanConfig;
use splicescan_core::errors::ScanError;
use splicescan_core::models::{Locus, MotifKind, Strand};
use splicescan_motif::{MotifDelta, ScorerSet, extract_delta_masked, reconcile_aligned, score_windows};
use splicescan_seq::{SequenceSource, extract_stranded};

use crate::annotation::StrandAnnotation;

///
/// Scores one variant against both splice motifs on both strands.
///
/// A variant goes through extraction of its reference and variant windows,
/// motif scoring of each, alignment of the two score arrays and finally
/// delta extraction. The annotator holds only shared, read-only state, so a
/// single instance serves every worker of a batch.
///
pub struct Annotator<'a> {
    source: &'a dyn SequenceSource,
    config: &'a ScanConfig,
    scorers: &'a ScorerSet,
}

impl<'a> Annotator<'a> {
    pub fn new(
        source: &'a dyn SequenceSource,
        config: &'a ScanConfig,
        scorers: &'a ScorerSet,
    ) -> Result<Self, ScanError> {
        config.validate()?;
        scorers.check_widths(config)?;
        Ok(Annotator {
            source,
            config,
            scorers,
        })
    }

    pub fn config(&self) -> &ScanConfig {
        self.config
    }

    ///
    /// Annotate a variant: one entry per strand, plus strand first.
    ///
    /// A motif with no scorable window on a strand is left as a missing
    /// prediction. Any other failure rejects the whole variant.
    ///
    pub fn annotate(&self, locus: &Locus) -> Result<Vec<StrandAnnotation>, ScanError> {
        Strand::BOTH
            .iter()
            .map(|&strand| self.annotate_strand(locus, strand))
            .collect()
    }

    pub fn annotate_strand(
        &self,
        locus: &Locus,
        strand: Strand,
    ) -> Result<StrandAnnotation, ScanError> {
        let mut annotation = StrandAnnotation::new(&locus.alternate_allele, strand);
        for kind in MotifKind::ALL {
            let delta = match self.scan_motif(locus, kind, strand) {
                Ok(delta) => Some(delta),
                Err(ScanError::NoScorableWindow) => {
                    debug!("{}: no scorable {} window on {} strand", locus, kind, strand);
                    None
                }
                Err(e) => return Err(e),
            };
            annotation.set_motif(kind, delta);
        }
        Ok(annotation)
    }

    fn scan_motif(
        &self,
        locus: &Locus,
        kind: MotifKind,
        strand: Strand,
    ) -> Result<MotifDelta, ScanError> {
        let motif = self.config.motif(kind);
        let scorer = self.scorers.get(kind);

        let reference = extract_stranded(self.source, locus, motif, strand, false)?;
        let variant = extract_stranded(self.source, locus, motif, strand, true)?;

        let ref_scores = score_windows(&reference, motif.width, scorer)?;
        let var_scores = score_windows(&variant, motif.width, scorer)?;

        // the window on either side of the alleles is the same length, so the
        // score arrays must differ exactly by the allele length difference
        let length_delta = locus.length_delta();
        let aligned = reconcile_aligned(ref_scores, var_scores, motif.context_before, length_delta)
            .inspect_err(|e| {
                warn!(
                    "{}: {} alignment on {} strand failed (ref={}bp, alt={}bp): {}",
                    locus,
                    kind,
                    strand,
                    locus.reference_allele.len(),
                    locus.alternate_allele.len(),
                    e
                )
            })?;

        let extremes = extract_delta_masked(
            &aligned.reference,
            &aligned.variant,
            motif.context_before,
            aligned.padded,
        )?;
        Ok(extremes.for_motif(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use splicescan_core::config::MotifConfig;
    use splicescan_core::errors::RejectKind;
    use splicescan_motif::MotifScorer;
    use splicescan_seq::InMemoryGenome;

    // 0-based:        0123456789012345678
    const CHR1: &str = "AAAAAGTAAACTAAAAAAA";

    fn gt_score(window: &[u8]) -> f64 {
        if window == b"GT" { 1.0 } else { 0.0 }
    }

    fn ag_score(window: &[u8]) -> f64 {
        if window == b"AG" { 1.0 } else { 0.0 }
    }

    #[fixture]
    fn genome() -> InMemoryGenome {
        [("chr1", CHR1)].into_iter().collect()
    }

    #[fixture]
    fn config() -> ScanConfig {
        ScanConfig::new(MotifConfig::new(2, 1, 1), MotifConfig::new(2, 1, 1))
    }

    #[fixture]
    fn scorers() -> ScorerSet {
        ScorerSet::new(Arc::new(gt_score), Arc::new(ag_score))
    }

    #[rstest]
    fn test_snv_destroys_donor(genome: InMemoryGenome, config: ScanConfig, scorers: ScorerSet) {
        let annotator = Annotator::new(&genome, &config, &scorers).unwrap();
        // G at position 6 (1-based) is the G of the GT
        let locus = Locus::new("chr1", 6, "G", "C").unwrap();
        let annotations = annotator.annotate(&locus).unwrap();

        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].strand, Strand::Plus);
        assert_eq!(annotations[1].strand, Strand::Minus);

        let donor = annotations[0].donor.unwrap();
        assert_eq!(donor.loss, 1.0);
        assert_eq!(donor.loss_offset, 0);
        assert_eq!(annotations[0].to_string(), "C|+|0.00|1.00|0.00|1.00|0|-1|-1|0");
    }

    #[rstest]
    fn test_minus_strand_reads_reverse_complement(
        genome: InMemoryGenome,
        config: ScanConfig,
        scorers: ScorerSet,
    ) {
        // "CT" at 0-based 10..12 reads "AG" on the minus strand
        let annotator = Annotator::new(&genome, &config, &scorers).unwrap();
        let locus = Locus::new("chr1", 11, "C", "A").unwrap();
        let annotations = annotator.annotate(&locus).unwrap();

        let minus = &annotations[1];
        let acceptor = minus.acceptor.unwrap();
        assert_eq!(acceptor.loss, 1.0);
        // on the minus strand the AG starts one base upstream of the variant
        assert_eq!(acceptor.loss_offset, -1);
        assert_eq!(annotations[0].acceptor.unwrap().loss, 0.0);
    }

    #[rstest]
    fn test_deletion_and_insertion(genome: InMemoryGenome, config: ScanConfig, scorers: ScorerSet) {
        let annotator = Annotator::new(&genome, &config, &scorers).unwrap();

        // deleting the T of GT
        let deletion = Locus::new("chr1", 6, "GT", "G").unwrap();
        let plus = &annotator.annotate(&deletion).unwrap()[0];
        assert_eq!(plus.donor.unwrap().loss, 1.0);

        // inserting GT after the A at 0-based 4 creates a second donor
        let insertion = Locus::new("chr1", 5, "A", "AGT").unwrap();
        let plus = &annotator.annotate(&insertion).unwrap()[0];
        assert_eq!(plus.donor.unwrap().gain, 1.0);
    }

    #[rstest]
    fn test_minus_strand_deletion(genome: InMemoryGenome, config: ScanConfig, scorers: ScorerSet) {
        // deleting the C of "CT" (AG on the minus strand)
        let annotator = Annotator::new(&genome, &config, &scorers).unwrap();
        let deletion = Locus::new("chr1", 10, "AC", "A").unwrap();
        let minus = &annotator.annotate(&deletion).unwrap()[1];

        let acceptor = minus.acceptor.unwrap();
        assert_eq!(acceptor.loss, 1.0);
        assert_eq!(acceptor.loss_offset, -1);
        // "AC" reads "GT" on the minus strand, the deleted C is its G
        let donor = minus.donor.unwrap();
        assert_eq!(donor.loss, 1.0);
        assert_eq!(donor.loss_offset, 0);
        assert_eq!(minus.to_string(), "A|-|0.00|1.00|0.00|1.00|1|-1|-1|0");
    }

    #[rstest]
    fn test_minus_strand_insertion(genome: InMemoryGenome, config: ScanConfig, scorers: ScorerSet) {
        // inserted "CT" reads "AG" on the minus strand, followed by a "GT"
        let annotator = Annotator::new(&genome, &config, &scorers).unwrap();
        let insertion = Locus::new("chr1", 15, "A", "ACT").unwrap();
        let annotations = annotator.annotate(&insertion).unwrap();

        assert_eq!(annotations[0].max_delta(), Some(0.0));
        let acceptor = annotations[1].acceptor.unwrap();
        assert_eq!(acceptor.gain, 1.0);
        assert_eq!(acceptor.gain_offset, 0);
        assert_eq!(annotations[1].to_string(), "ACT|-|1.00|0.00|1.00|0.00|0|-1|0|-1");
    }

    #[rstest]
    #[case(MotifConfig::new(9, 3, 8), MotifConfig::new(23, 20, 22), true)]
    #[case(MotifConfig::with_full_context(9), MotifConfig::with_full_context(23), true)]
    #[case(MotifConfig::new(9, 3, 6), MotifConfig::new(23, 20, 22), false)]
    #[case(MotifConfig::new(9, 3, 8), MotifConfig::new(23, 20, 3), false)]
    fn test_indels_align_whenever_config_is_accepted(
        #[case] donor: MotifConfig,
        #[case] acceptor: MotifConfig,
        #[case] accepted: bool,
    ) {
        let genome: InMemoryGenome = [("chr1", "A".repeat(60))].into_iter().collect();
        let config = ScanConfig::new(donor, acceptor);
        let flat = |_: &[u8]| 0.0;
        let scorers = ScorerSet::new(Arc::new(flat), Arc::new(flat));

        let annotator = match Annotator::new(&genome, &config, &scorers) {
            Ok(annotator) => annotator,
            Err(e) => {
                assert!(!accepted, "rejected: {}", e);
                assert!(matches!(e, ScanError::InvalidConfig(_)));
                return;
            }
        };
        assert!(accepted);

        for (reference, alternate) in [("A", "AA"), ("AA", "A"), ("A", "AAAA"), ("AAAA", "A")] {
            let locus = Locus::new("chr1", 30, reference, alternate).unwrap();
            let annotations = annotator.annotate(&locus).unwrap();
            assert_eq!(annotations.len(), 2);
            assert!(annotations.iter().all(|a| a.max_delta() == Some(0.0)));
        }
    }

    #[rstest]
    fn test_no_change_has_zero_deltas(genome: InMemoryGenome, config: ScanConfig, scorers: ScorerSet) {
        let annotator = Annotator::new(&genome, &config, &scorers).unwrap();
        let locus = Locus::new("chr1", 2, "A", "A").unwrap();
        for annotation in annotator.annotate(&locus).unwrap() {
            assert_eq!(annotation.max_delta(), Some(0.0));
        }
    }

    #[rstest]
    fn test_unscorable_motif_is_missing(genome: InMemoryGenome, config: ScanConfig) {
        let nothing = |_: &[u8]| f64::NEG_INFINITY;
        let scorers = ScorerSet::new(Arc::new(gt_score), Arc::new(nothing));
        let annotator = Annotator::new(&genome, &config, &scorers).unwrap();

        let annotations = annotator.annotate(&Locus::new("chr1", 6, "G", "C").unwrap()).unwrap();
        assert!(annotations[0].acceptor.is_none());
        assert!(annotations[0].donor.is_some());
        assert!(annotations[0].to_string().starts_with("C|+|.|.|"));
    }

    #[rstest]
    #[case(Locus::new("chr1", 6, "T", "C").unwrap(), RejectKind::ReferenceMismatch)]
    #[case(Locus::new("chr2", 6, "G", "C").unwrap(), RejectKind::UnknownChromosome)]
    #[case(Locus::new("chr1", 1, "A", "C").unwrap(), RejectKind::OutOfRange)]
    #[case(Locus::new("chr1", 19, "A", "C").unwrap(), RejectKind::OutOfRange)]
    fn test_rejections(
        genome: InMemoryGenome,
        config: ScanConfig,
        scorers: ScorerSet,
        #[case] locus: Locus,
        #[case] kind: RejectKind,
    ) {
        let annotator = Annotator::new(&genome, &config, &scorers).unwrap();
        let err = annotator.annotate(&locus).unwrap_err();
        assert_eq!(err.kind(), kind);
    }

    #[rstest]
    fn test_width_mismatch_is_config_error(genome: InMemoryGenome, scorers: ScorerSet) {
        struct Fixed;
        impl MotifScorer for Fixed {
            fn score(&self, _: &[u8]) -> f64 {
                0.0
            }
            fn width(&self) -> Option<usize> {
                Some(9)
            }
        }
        let config = ScanConfig::new(MotifConfig::new(2, 1, 1), MotifConfig::new(2, 1, 1));
        let mismatched = ScorerSet::new(Arc::new(Fixed), Arc::new(ag_score));

        assert!(Annotator::new(&genome, &config, &scorers).is_ok());
        assert!(matches!(
            Annotator::new(&genome, &config, &mismatched),
            Err(ScanError::InvalidConfig(_))
        ));
    }
}
