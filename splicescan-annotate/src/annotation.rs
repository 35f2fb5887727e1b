//! The per-strand annotation string written to the VCF INFO column.
//!
//! ```text
//! ALT|STRAND|DS_AG|DS_AL|DS_DG|DS_DL|DP_AG|DP_AL|DP_DG|DP_DL
//! ```
//!
//! `DS_*` are delta scores (acceptor gain, acceptor loss, donor gain, donor
//! loss) and `DP_*` the offsets at which they occur. A motif without a
//! prediction has all of its fields set to `.`.

use std::fmt::{self, Display};
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use splicescan_core::consts::{MISSING_VALUE, SCORE_PRECISION};
use splicescan_core::models::{MotifKind, Strand};
use splicescan_motif::MotifDelta;

const FIELD_COUNT: usize = 10;

/// Result of scanning one allele on one strand.
#[derive(Debug, Clone, PartialEq)]
pub struct StrandAnnotation {
    pub allele: String,
    pub strand: Strand,
    pub acceptor: Option<MotifDelta>,
    pub donor: Option<MotifDelta>,
}

impl StrandAnnotation {
    pub fn new(allele: &str, strand: Strand) -> Self {
        StrandAnnotation {
            allele: allele.to_string(),
            strand,
            acceptor: None,
            donor: None,
        }
    }

    pub fn motif(&self, kind: MotifKind) -> Option<&MotifDelta> {
        match kind {
            MotifKind::Acceptor => self.acceptor.as_ref(),
            MotifKind::Donor => self.donor.as_ref(),
        }
    }

    pub fn set_motif(&mut self, kind: MotifKind, delta: Option<MotifDelta>) {
        match kind {
            MotifKind::Acceptor => self.acceptor = delta,
            MotifKind::Donor => self.donor = delta,
        }
    }

    ///
    /// Largest of the gain and loss scores over both motifs, or `None` when
    /// neither motif has a prediction.
    ///
    pub fn max_delta(&self) -> Option<f64> {
        MotifKind::ALL
            .iter()
            .filter_map(|&kind| self.motif(kind))
            .flat_map(|delta| [delta.gain, delta.loss])
            .reduce(f64::max)
    }
}

/// The `##INFO` header line declaring the annotation field.
pub fn info_header_line(key: &str) -> String {
    format!(
        "##INFO=<ID={},Number=.,Type=String,Description=\"Splice motif delta scores. Format: ALT|STRAND|DS_AG|DS_AL|DS_DG|DS_DL|DP_AG|DP_AL|DP_DG|DP_DL\">",
        key
    )
}

fn score_field(delta: Option<&MotifDelta>, loss: bool) -> String {
    match delta {
        Some(d) => format!("{:.*}", SCORE_PRECISION, if loss { d.loss } else { d.gain }),
        None => MISSING_VALUE.to_string(),
    }
}

fn offset_field(delta: Option<&MotifDelta>, loss: bool) -> String {
    match delta {
        Some(d) => (if loss { d.loss_offset } else { d.gain_offset }).to_string(),
        None => MISSING_VALUE.to_string(),
    }
}

impl Display for StrandAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let acceptor = self.acceptor.as_ref();
        let donor = self.donor.as_ref();
        write!(
            f,
            "{}|{}|{}|{}|{}|{}|{}|{}|{}|{}",
            self.allele,
            self.strand,
            score_field(acceptor, false),
            score_field(acceptor, true),
            score_field(donor, false),
            score_field(donor, true),
            offset_field(acceptor, false),
            offset_field(acceptor, true),
            offset_field(donor, false),
            offset_field(donor, true),
        )
    }
}

fn parse_motif(
    motif: MotifKind,
    gain: &str,
    loss: &str,
    gain_offset: &str,
    loss_offset: &str,
) -> Result<Option<MotifDelta>> {
    let fields = [gain, loss, gain_offset, loss_offset];
    if fields.iter().all(|f| *f == MISSING_VALUE) {
        return Ok(None);
    }
    if fields.contains(&MISSING_VALUE) {
        bail!("{} fields are only partly missing", motif);
    }

    Ok(Some(MotifDelta {
        motif,
        gain: gain.parse().context(format!("Invalid {} gain: {}", motif, gain))?,
        gain_offset: gain_offset
            .parse()
            .context(format!("Invalid {} gain offset: {}", motif, gain_offset))?,
        loss: loss.parse().context(format!("Invalid {} loss: {}", motif, loss))?,
        loss_offset: loss_offset
            .parse()
            .context(format!("Invalid {} loss offset: {}", motif, loss_offset))?,
    }))
}

impl FromStr for StrandAnnotation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split('|').collect();
        if fields.len() != FIELD_COUNT {
            bail!(
                "Expected {} '|'-separated fields, found {}: {}",
                FIELD_COUNT,
                fields.len(),
                s
            );
        }

        let strand: Strand = fields[1].parse().map_err(|e: String| anyhow!(e))?;
        let acceptor = parse_motif(MotifKind::Acceptor, fields[2], fields[3], fields[6], fields[7])?;
        let donor = parse_motif(MotifKind::Donor, fields[4], fields[5], fields[8], fields[9])?;

        Ok(StrandAnnotation {
            allele: fields[0].to_string(),
            strand,
            acceptor,
            donor,
        })
    }
}
