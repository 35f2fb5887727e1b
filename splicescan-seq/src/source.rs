use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use memmap2::Mmap;
use splicescan_core::errors::ScanError;
use splicescan_core::utils::is_gzipped;

use crate::fasta::{FaiRecord, compute_fai, fai_path, load_fasta, read_fai};
use crate::sequence::{Sequence, canonicalize_in_place};

///
/// Random access to a reference genome.
///
/// Implementations are shared read-only between worker threads, so they must
/// be `Send + Sync` and must not need `&mut self` to serve a fetch.
///
pub trait SequenceSource: Send + Sync {
    /// Fetch `length` bases starting at the 0-based `start`, canonicalized to
    /// uppercase ACGTN.
    fn fetch(&self, chrom: &str, start: u64, length: u64) -> Result<Sequence, ScanError>;

    /// Length of a chromosome, `None` if it is unknown.
    fn chrom_len(&self, chrom: &str) -> Option<u64>;
}

fn check_range(chrom: &str, start: u64, length: u64, chrom_len: u64) -> Result<(), ScanError> {
    match start.checked_add(length) {
        Some(end) if end <= chrom_len => Ok(()),
        _ => Err(ScanError::OutOfRange {
            chrom: chrom.to_string(),
            start: start as i64,
            end: start.saturating_add(length) as i64,
            length: chrom_len,
        }),
    }
}

/// A genome held entirely in memory. Used for gzipped FASTA files and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryGenome {
    sequences: HashMap<String, Sequence>,
}

impl InMemoryGenome {
    pub fn new() -> Self {
        InMemoryGenome::default()
    }

    pub fn from_fasta<P: AsRef<Path>>(path: P) -> Result<Self> {
        info!("Loading FASTA into memory: {}", path.as_ref().display());
        let sequences = load_fasta(path)?;
        Ok(InMemoryGenome {
            sequences: sequences.into_iter().collect(),
        })
    }

    pub fn insert(&mut self, name: &str, sequence: &[u8]) {
        let mut sequence = sequence.to_vec();
        canonicalize_in_place(&mut sequence);
        self.sequences.insert(name.to_string(), sequence);
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

impl<S: AsRef<str>, Q: AsRef<[u8]>> FromIterator<(S, Q)> for InMemoryGenome {
    fn from_iter<I: IntoIterator<Item = (S, Q)>>(iter: I) -> Self {
        let mut genome = InMemoryGenome::new();
        for (name, seq) in iter {
            genome.insert(name.as_ref(), seq.as_ref());
        }
        genome
    }
}

impl SequenceSource for InMemoryGenome {
    fn fetch(&self, chrom: &str, start: u64, length: u64) -> Result<Sequence, ScanError> {
        let seq = self
            .sequences
            .get(chrom)
            .ok_or_else(|| ScanError::UnknownChromosome(chrom.to_string()))?;
        check_range(chrom, start, length, seq.len() as u64)?;
        Ok(seq[start as usize..(start + length) as usize].to_vec())
    }

    fn chrom_len(&self, chrom: &str) -> Option<u64> {
        self.sequences.get(chrom).map(|s| s.len() as u64)
    }
}

///
/// An uncompressed FASTA file, memory-mapped once and indexed by its `.fai`.
///
/// The map stays open for the lifetime of the value, so a batch touching the
/// same chromosome many times never re-opens or re-reads the file.
///
pub struct IndexedFasta {
    mmap: Mmap,
    index: HashMap<String, FaiRecord>,
}

impl IndexedFasta {
    ///
    /// Open a FASTA file for random access. Uses `<path>.fai` when it exists,
    /// otherwise scans the file to build the index.
    ///
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let fai = fai_path(path);
        let records = if fai.exists() {
            debug!("Reading FASTA index {}", fai.display());
            read_fai(&fai)?
        } else {
            info!("No index found for {}, scanning file", path.display());
            compute_fai(path)?
        };

        let file = File::open(path)
            .with_context(|| format!("Failed to open FASTA: {}", path.display()))?;
        // SAFETY: the file is opened read-only and is not expected to change
        // while the scan runs.
        let mmap = unsafe { Mmap::map(&file) }.context("Failed to memory-map FASTA file")?;

        let fasta = IndexedFasta::from_parts(mmap, records);
        debug!(
            "Indexed {} sequences, {} bases",
            fasta.records().count(),
            fasta.records().map(|r| r.length).sum::<u64>()
        );
        Ok(fasta)
    }

    fn from_parts(mmap: Mmap, records: Vec<FaiRecord>) -> Self {
        let index = records
            .into_iter()
            .map(|record| (record.name.clone(), record))
            .collect();
        IndexedFasta { mmap, index }
    }

    pub fn records(&self) -> impl Iterator<Item = &FaiRecord> + '_ {
        self.index.values()
    }
}

impl SequenceSource for IndexedFasta {
    fn fetch(&self, chrom: &str, start: u64, length: u64) -> Result<Sequence, ScanError> {
        let record = self
            .index
            .get(chrom)
            .ok_or_else(|| ScanError::UnknownChromosome(chrom.to_string()))?;
        check_range(chrom, start, length, record.length)?;

        let mut seq = Vec::with_capacity(length as usize);
        let mut pos = start;
        let end = start + length;
        while pos < end {
            // copy the rest of the current line in one go
            let line = pos / record.line_bases;
            let column = pos % record.line_bases;
            let take = (record.line_bases - column).min(end - pos);
            let byte = (record.offset + line * record.line_bytes + column) as usize;
            let chunk = self
                .mmap
                .get(byte..byte + take as usize)
                .ok_or_else(|| ScanError::OutOfRange {
                    chrom: chrom.to_string(),
                    start: start as i64,
                    end: end as i64,
                    length: record.length,
                })?;
            seq.extend_from_slice(chunk);
            pos += take;
        }

        canonicalize_in_place(&mut seq);
        Ok(seq)
    }

    fn chrom_len(&self, chrom: &str) -> Option<u64> {
        self.index.get(chrom).map(|r| r.length)
    }
}

///
/// Open a reference genome: gzipped FASTA files are loaded into memory,
/// plain ones are memory-mapped.
///
pub fn open_genome<P: AsRef<Path>>(path: P) -> Result<Box<dyn SequenceSource>> {
    let path = path.as_ref();
    if is_gzipped(path) {
        Ok(Box::new(InMemoryGenome::from_fasta(path)?))
    } else {
        Ok(Box::new(IndexedFasta::open(path)?))
    }
}
