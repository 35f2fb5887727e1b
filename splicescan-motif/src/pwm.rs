//! Position weight matrices: the concrete position-weight-style scorer.

use std::fs::read_to_string;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::consts::{MIN_PROBABILITY, SENTINEL_SCORE};
use crate::scorer::MotifScorer;

/// Column of a base in a weight row, `None` for anything but ACGT.
#[inline]
fn base_index(base: u8) -> Option<usize> {
    match base {
        b'A' | b'a' => Some(0),
        b'C' | b'c' => Some(1),
        b'G' | b'g' => Some(2),
        b'T' | b't' => Some(3),
        _ => None,
    }
}

///
/// A log-odds position weight matrix. One `[A, C, G, T]` row per motif position;
/// a window scores the sum of the weights of its bases.
///
/// Windows containing `N` (or any other non-ACGT byte) score [`SENTINEL_SCORE`].
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PositionWeightMatrix {
    #[serde(default)]
    pub name: String,
    pub weights: Vec<[f64; 4]>,
}

impl PositionWeightMatrix {
    pub fn new(name: &str, weights: Vec<[f64; 4]>) -> Result<Self> {
        let pwm = PositionWeightMatrix {
            name: name.to_string(),
            weights,
        };
        pwm.validate()?;
        Ok(pwm)
    }

    /// A matrix of zeros: every ACGT window scores 0.
    pub fn uniform(name: &str, width: usize) -> Self {
        PositionWeightMatrix {
            name: name.to_string(),
            weights: vec![[0.0; 4]; width],
        }
    }

    ///
    /// Build a log-odds matrix from per-position base probabilities:
    /// `ln(p / background)`, with zero probabilities clamped to a pseudocount.
    ///
    pub fn from_probabilities(name: &str, rows: &[[f64; 4]], background: [f64; 4]) -> Result<Self> {
        if background.iter().any(|&b| b <= 0.0) {
            anyhow::bail!("Background frequencies must be positive: {:?}", background);
        }
        let weights = rows
            .iter()
            .map(|row| {
                let mut out = [0.0; 4];
                for i in 0..4 {
                    out[i] = (row[i].max(MIN_PROBABILITY) / background[i]).ln();
                }
                out
            })
            .collect();
        PositionWeightMatrix::new(name, weights)
    }

    fn validate(&self) -> Result<()> {
        if self.weights.is_empty() {
            anyhow::bail!("Position weight matrix '{}' has no positions", self.name);
        }
        if self.weights.iter().flatten().any(|w| w.is_nan()) {
            anyhow::bail!("Position weight matrix '{}' contains NaN weights", self.name);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    ///
    /// Load a matrix from a file.
    ///
    /// `.json` files hold `{"name": .., "weights": [[a, c, g, t], ..]}`; anything
    /// else is read as a whitespace-separated table with one `A C G T` row per
    /// position (`#` starts a comment).
    ///
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = read_to_string(path)
            .with_context(|| format!("Failed to read scoring matrix: {}", path.display()))?;

        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        let mut pwm = if is_json {
            serde_json::from_str::<PositionWeightMatrix>(&content)
                .with_context(|| format!("Invalid JSON scoring matrix: {}", path.display()))?
        } else {
            PositionWeightMatrix::from_table(&content)
                .with_context(|| format!("Invalid scoring matrix table: {}", path.display()))?
        };

        if pwm.name.is_empty() {
            pwm.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
        }
        pwm.validate()?;
        Ok(pwm)
    }

    fn from_table(content: &str) -> Result<Self> {
        let mut weights = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            let line = line.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            let values = line
                .split_whitespace()
                .map(|v| v.parse::<f64>())
                .collect::<Result<Vec<f64>, _>>()
                .with_context(|| format!("Failed to parse weights on line {}", lineno + 1))?;
            let row: [f64; 4] = values.try_into().map_err(|v: Vec<f64>| {
                anyhow::anyhow!("Line {} has {} columns, expected 4", lineno + 1, v.len())
            })?;
            weights.push(row);
        }
        PositionWeightMatrix::new("", weights)
    }
}

impl MotifScorer for PositionWeightMatrix {
    fn score(&self, window: &[u8]) -> f64 {
        if window.len() != self.weights.len() {
            return SENTINEL_SCORE;
        }
        let mut total = 0.0;
        for (row, &base) in self.weights.iter().zip(window) {
            match base_index(base) {
                Some(i) => total += row[i],
                None => return SENTINEL_SCORE,
            }
        }
        total
    }

    fn width(&self) -> Option<usize> {
        Some(self.weights.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use std::io::Write;

    /// Rewards a `GT` dinucleotide, i.e. a toy donor core.
    #[fixture]
    fn gt_matrix() -> PositionWeightMatrix {
        PositionWeightMatrix::new(
            "gt",
            vec![[0.0, 0.0, 2.0, 0.0], [0.0, 0.0, 0.0, 1.5], [0.1, 0.2, 0.3, 0.4]],
        )
        .unwrap()
    }

    #[rstest]
    fn test_score(gt_matrix: PositionWeightMatrix) {
        assert_eq!(gt_matrix.score(b"GTA"), 3.6);
        assert_eq!(gt_matrix.score(b"gtt"), 3.9);
        assert_eq!(gt_matrix.score(b"AAA"), 0.1);
        assert_eq!(gt_matrix.width(), Some(3));
    }

    #[rstest]
    fn test_unscorable_windows(gt_matrix: PositionWeightMatrix) {
        assert!(gt_matrix.is_sentinel(gt_matrix.score(b"GNA")));
        assert!(gt_matrix.is_sentinel(gt_matrix.score(b"GT")));
    }

    #[rstest]
    fn test_from_probabilities() {
        let pwm = PositionWeightMatrix::from_probabilities(
            "p",
            &[[0.25, 0.25, 0.5, 0.0]],
            [0.25; 4],
        )
        .unwrap();
        assert_eq!(pwm.weights[0][0], 0.0);
        assert!((pwm.weights[0][2] - 2f64.ln()).abs() < 1e-12);
        // zero probability is clamped, not -inf
        assert!(pwm.weights[0][3].is_finite());
        assert!(pwm.weights[0][3] < -10.0);
    }

    #[rstest]
    fn test_from_table_file() {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        writeln!(file, "# A C G T").unwrap();
        writeln!(file, "0 0 2 0").unwrap();
        writeln!(file, "0\t0\t0\t1.5  # T").unwrap();
        writeln!(file).unwrap();

        let pwm = PositionWeightMatrix::from_file(file.path()).unwrap();
        assert_eq!(pwm.len(), 2);
        assert_eq!(pwm.score(b"GT"), 3.5);
        assert!(!pwm.name.is_empty());
    }

    #[rstest]
    fn test_from_json_file(gt_matrix: PositionWeightMatrix) {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{}", serde_json::to_string(&gt_matrix).unwrap()).unwrap();

        let loaded = PositionWeightMatrix::from_file(file.path()).unwrap();
        assert_eq!(loaded.name, "gt");
        assert_eq!(loaded.len(), gt_matrix.len());
        for (a, b) in loaded.weights.iter().flatten().zip(gt_matrix.weights.iter().flatten()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[rstest]
    #[case("0 0 2\n")]
    #[case("0 0 x 1\n")]
    #[case("# nothing but comments\n")]
    fn test_bad_tables(#[case] content: &str) {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        assert!(PositionWeightMatrix::from_file(file.path()).is_err());
    }
}
