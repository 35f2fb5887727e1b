use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ACCEPTOR_WIDTH, DEFAULT_DONOR_WIDTH};
use crate::errors::{ConfigError, ScanError};
use crate::models::MotifKind;

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Width of one motif and the genomic context scanned around a variant for it.
///
/// Contexts are given on the strand the motif is read on: `context_before` is
/// upstream of the first variant base, `context_after` is downstream of the last.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotifConfig {
    pub width: usize,
    pub context_before: usize,
    pub context_after: usize,
}

impl MotifConfig {
    pub fn new(width: usize, context_before: usize, context_after: usize) -> Self {
        MotifConfig {
            width,
            context_before,
            context_after,
        }
    }

    /// Context of `width - 1` on both sides: every window touching a
    /// single-base variant gets scored.
    pub fn with_full_context(width: usize) -> Self {
        let context = width.saturating_sub(1);
        MotifConfig::new(width, context, context)
    }

    fn validate(&self, kind: MotifKind) -> Result<(), ScanError> {
        if self.width == 0 {
            return Err(ScanError::InvalidConfig(format!(
                "{} motif width must be greater than zero",
                kind
            )));
        }
        // indel alignment needs a full motif downstream of the anchor base
        if self.context_after + 1 < self.width {
            return Err(ScanError::InvalidConfig(format!(
                "{} context ({} before, {} after) must extend at least {} bases after the variant",
                kind,
                self.context_before,
                self.context_after,
                self.width - 1
            )));
        }
        Ok(())
    }
}

/// Paths to the scoring matrices, one per motif.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ScorerConfig {
    pub donor_matrix: Option<PathBuf>,
    pub acceptor_matrix: Option<PathBuf>,
}

///
/// Process-wide scanning configuration. Built once at start-up and shared
/// read-only by every worker.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    #[serde(default = "default_donor")]
    pub donor: MotifConfig,
    #[serde(default = "default_acceptor")]
    pub acceptor: MotifConfig,
    #[serde(default)]
    pub scorers: ScorerConfig,
}

fn default_donor() -> MotifConfig {
    MotifConfig::with_full_context(DEFAULT_DONOR_WIDTH)
}

fn default_acceptor() -> MotifConfig {
    MotifConfig::with_full_context(DEFAULT_ACCEPTOR_WIDTH)
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            donor: default_donor(),
            acceptor: default_acceptor(),
            scorers: ScorerConfig::default(),
        }
    }
}

impl ScanConfig {
    pub fn new(donor: MotifConfig, acceptor: MotifConfig) -> Self {
        ScanConfig {
            donor,
            acceptor,
            scorers: ScorerConfig::default(),
        }
    }

    pub fn from_toml_str(toml_str: &str) -> ConfigResult<Self> {
        let config: ScanConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        ScanConfig::try_from(path.as_ref())
    }

    pub fn motif(&self, kind: MotifKind) -> &MotifConfig {
        match kind {
            MotifKind::Donor => &self.donor,
            MotifKind::Acceptor => &self.acceptor,
        }
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        self.donor.validate(MotifKind::Donor)?;
        self.acceptor.validate(MotifKind::Acceptor)?;
        Ok(())
    }

    pub fn donor_width(&self) -> usize {
        self.donor.width
    }

    pub fn acceptor_width(&self) -> usize {
        self.acceptor.width
    }

    pub fn donor_context_before(&self) -> usize {
        self.donor.context_before
    }

    pub fn donor_context_after(&self) -> usize {
        self.donor.context_after
    }

    pub fn acceptor_context_before(&self) -> usize {
        self.acceptor.context_before
    }

    pub fn acceptor_context_after(&self) -> usize {
        self.acceptor.context_after
    }
}

impl TryFrom<&Path> for ScanConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        ScanConfig::from_toml_str(&toml_str)
    }
}
