use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::{self, BufReader, BufWriter, Stdout};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;

/// `.gz` and `.bgz` files are read through a gzip decoder.
pub fn is_gzipped(path: &Path) -> bool {
    matches!(
        path.extension().and_then(OsStr::to_str),
        Some("gz") | Some("bgz")
    )
}

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped(path) {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    // 256KB buffer for large VCF / FASTA files
    Ok(BufReader::with_capacity(256 * 1024, file))
}

/// Get a reader for either a gzipped, non-gzipped file, or stdin
///
/// # Arguments
///
/// - file_path: path to the file to read, or '-' for stdin
pub fn get_dynamic_reader_w_stdin(file_path_str: &str) -> Result<BufReader<Box<dyn Read>>> {
    if file_path_str == "-" {
        Ok(BufReader::new(Box::new(std::io::stdin()) as Box<dyn Read>))
    } else {
        get_dynamic_reader(Path::new(file_path_str))
    }
}

/// Output destination behind [`get_dynamic_writer`].
pub enum DynamicWriter {
    Stdout(Stdout),
    Plain(File),
    Gzip(GzEncoder<File>),
}

impl Write for DynamicWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            DynamicWriter::Stdout(w) => w.write(buf),
            DynamicWriter::Plain(w) => w.write(buf),
            DynamicWriter::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            DynamicWriter::Stdout(w) => w.flush(),
            DynamicWriter::Plain(w) => w.flush(),
            DynamicWriter::Gzip(w) => w.flush(),
        }
    }
}

impl DynamicWriter {
    /// Flush, and for gzip output write the stream trailer.
    pub fn finish(self) -> Result<()> {
        match self {
            DynamicWriter::Stdout(mut w) => w.flush()?,
            DynamicWriter::Plain(mut w) => w.flush()?,
            DynamicWriter::Gzip(w) => {
                w.finish().context("Failed to finish gzip stream")?;
            }
        }
        Ok(())
    }
}

///
/// Get a writer for a file, gzip-compressing when the path ends in `.gz`.
/// `-` writes to stdout.
///
/// Close it with [`finish_dynamic_writer`]; dropping it loses any error from
/// the final flush.
///
pub fn get_dynamic_writer(file_path_str: &str) -> Result<BufWriter<DynamicWriter>> {
    if file_path_str == "-" {
        return Ok(BufWriter::new(DynamicWriter::Stdout(std::io::stdout())));
    }

    let path = Path::new(file_path_str);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
    }
    let file = File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;
    let file = match is_gzipped(path) {
        true => DynamicWriter::Gzip(GzEncoder::new(file, Compression::default())),
        false => DynamicWriter::Plain(file),
    };

    Ok(BufWriter::new(file))
}

/// Flush the buffer and finish the underlying stream, reporting any failure.
pub fn finish_dynamic_writer(writer: BufWriter<DynamicWriter>) -> Result<()> {
    writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to flush output")?
        .finish()
}
