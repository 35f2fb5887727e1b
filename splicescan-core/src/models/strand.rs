use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Genomic strand a motif is read on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strand {
    Plus,
    Minus,
}

impl Strand {
    pub const BOTH: [Strand; 2] = [Strand::Plus, Strand::Minus];

    pub fn is_reverse(&self) -> bool {
        matches!(self, Strand::Minus)
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Plus => write!(f, "+"),
            Strand::Minus => write!(f, "-"),
        }
    }
}

impl FromStr for Strand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Plus),
            "-" => Ok(Strand::Minus),
            _ => Err(format!("Invalid strand: {}", s)),
        }
    }
}

/// The two ends of an intron, each scored by its own motif.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotifKind {
    Donor,
    Acceptor,
}

impl MotifKind {
    pub const ALL: [MotifKind; 2] = [MotifKind::Acceptor, MotifKind::Donor];
}

impl Display for MotifKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotifKind::Donor => write!(f, "donor"),
            MotifKind::Acceptor => write!(f, "acceptor"),
        }
    }
}

impl FromStr for MotifKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "donor" => Ok(MotifKind::Donor),
            "acceptor" => Ok(MotifKind::Acceptor),
            _ => Err(format!("Invalid motif kind: {}", s)),
        }
    }
}
