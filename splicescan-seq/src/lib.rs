//! # Reference sequence access for splicescan
//!
//! This crate turns a variant locus into the nucleotide windows a motif
//! scanner works on:
//!
//! - `source` - the [`SequenceSource`] seam, with a memory-mapped indexed
//!   FASTA ([`IndexedFasta`]) and an in-memory genome ([`InMemoryGenome`])
//! - `fasta` - FASTA index (`.fai`) computation, reading and writing
//! - `sequence` - canonicalization and reverse complement
//! - `extract` - reference / variant windows on either strand
//!
//! # Example
//!
//! ```
//! use splicescan_core::models::Locus;
//! use splicescan_seq::{InMemoryGenome, extract};
//!
//! let genome: InMemoryGenome = vec![("chr1", "AACCGGTTAC")].into_iter().collect();
//! let locus = Locus::new("chr1", 5, "G", "T").unwrap();
//!
//! let reference = extract(&genome, &locus, 2, 2, false).unwrap();
//! let variant = extract(&genome, &locus, 2, 2, true).unwrap();
//! assert_eq!(reference, b"CCGGT".to_vec());
//! assert_eq!(variant, b"CCTGT".to_vec());
//! ```

pub mod extract;
pub mod fasta;
pub mod sequence;
pub mod source;

// re-exports
pub use extract::{extract, extract_stranded};
pub use fasta::{FaiRecord, compute_fai, load_fasta, read_fai, write_fai};
pub use sequence::{Sequence, canonicalize, reverse_complement};
pub use source::{InMemoryGenome, IndexedFasta, SequenceSource, open_genome};
