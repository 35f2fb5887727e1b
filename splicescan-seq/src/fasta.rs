use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use splicescan_core::utils::{get_dynamic_reader, is_gzipped};

use crate::sequence::{Sequence, canonicalize_in_place};

/// One line of a samtools-style FASTA index (`.fai`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaiRecord {
    pub name: String,
    pub length: u64,
    /// Byte offset of the first base of the sequence.
    pub offset: u64,
    /// Bases per full line.
    pub line_bases: u64,
    /// Bytes per full line, including the line terminator.
    pub line_bytes: u64,
}

/// The FASTA record name is the first whitespace-delimited token of the header.
fn header_name(line: &str) -> String {
    line[1..]
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// The conventional location of the index next to a FASTA file.
pub fn fai_path(fasta_path: &Path) -> PathBuf {
    let mut os = fasta_path.as_os_str().to_owned();
    os.push(".fai");
    PathBuf::from(os)
}

///
/// Computes FAI (FASTA index) records by scanning an uncompressed FASTA file.
///
/// Equivalent to `samtools faidx` for well-formed files. Offsets are byte
/// offsets, so gzipped files cannot be indexed this way.
///
/// # Arguments
///
/// * `file_path` - Path to the FASTA file to index
///
pub fn compute_fai<T: AsRef<Path>>(file_path: T) -> Result<Vec<FaiRecord>> {
    let file_path = file_path.as_ref();
    if is_gzipped(file_path) {
        anyhow::bail!(
            "Cannot compute a byte index for a compressed FASTA: {}",
            file_path.display()
        );
    }

    let file = File::open(file_path)
        .with_context(|| format!("Failed to open FASTA: {}", file_path.display()))?;
    let mut reader = BufReader::new(file);
    let mut results = Vec::new();
    let mut line = String::new();

    let mut byte_position: u64 = 0;
    let mut current: Option<FaiRecord> = None;

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line)? as u64;
        if bytes_read == 0 {
            // EOF - finalize the last sequence if any
            if let Some(record) = current.take() {
                results.push(record);
            }
            break;
        }

        if line.starts_with('>') {
            if let Some(record) = current.take() {
                results.push(record);
            }
            byte_position += bytes_read;
            current = Some(FaiRecord {
                name: header_name(&line),
                length: 0,
                offset: byte_position,
                line_bases: 0,
                line_bytes: 0,
            });
            continue;
        }

        byte_position += bytes_read;
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(record) = current.as_mut() {
            // record line dimensions from the first sequence line
            if record.line_bases == 0 {
                record.line_bases = trimmed.len() as u64;
                record.line_bytes = bytes_read;
            }
            record.length += trimmed.len() as u64;
        }
    }

    Ok(results)
}

/// Read a `.fai` file.
pub fn read_fai<T: AsRef<Path>>(fai_path: T) -> Result<Vec<FaiRecord>> {
    let fai_path = fai_path.as_ref();
    let reader = BufReader::new(
        File::open(fai_path)
            .with_context(|| format!("Failed to open FASTA index: {}", fai_path.display()))?,
    );

    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 5 {
            anyhow::bail!("FAI line does not have 5 fields: {}", line);
        }
        let parse = |i: usize, what: &str| -> Result<u64> {
            fields[i]
                .parse::<u64>()
                .with_context(|| format!("Failed to parse {} in FAI line: {}", what, line))
        };
        let record = FaiRecord {
            name: fields[0].to_string(),
            length: parse(1, "length")?,
            offset: parse(2, "offset")?,
            line_bases: parse(3, "line bases")?,
            line_bytes: parse(4, "line bytes")?,
        };
        if record.length > 0 && (record.line_bases == 0 || record.line_bytes < record.line_bases) {
            anyhow::bail!("Invalid line layout in FAI line: {}", line);
        }
        records.push(record);
    }

    Ok(records)
}

/// Write records in the samtools `.fai` layout.
pub fn write_fai<T: AsRef<Path>>(fai_path: T, records: &[FaiRecord]) -> Result<()> {
    let fai_path = fai_path.as_ref();
    let mut writer = BufWriter::new(
        File::create(fai_path)
            .with_context(|| format!("Failed to create FASTA index: {}", fai_path.display()))?,
    );
    for record in records {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}",
            record.name, record.length, record.offset, record.line_bases, record.line_bytes
        )?;
    }
    writer.flush()?;
    Ok(())
}

///
/// Loads every sequence of a FASTA file (plain or gzipped) into memory,
/// canonicalized to uppercase ACGTN.
///
pub fn load_fasta<P: AsRef<Path>>(file_path: P) -> Result<Vec<(String, Sequence)>> {
    let reader = get_dynamic_reader(file_path.as_ref())?;

    let mut results: Vec<(String, Sequence)> = Vec::new();
    let mut current: Option<(String, Sequence)> = None;

    for line in reader.lines() {
        let line = line.with_context(|| {
            format!("Failed reading FASTA: {}", file_path.as_ref().display())
        })?;
        if line.starts_with('>') {
            if let Some(record) = current.take() {
                results.push(record);
            }
            current = Some((header_name(&line), Vec::new()));
        } else if let Some((_, seq)) = current.as_mut() {
            seq.extend_from_slice(line.trim_end().as_bytes());
        }
    }
    if let Some(record) = current.take() {
        results.push(record);
    }

    for (_, seq) in results.iter_mut() {
        canonicalize_in_place(seq);
    }

    Ok(results)
}
