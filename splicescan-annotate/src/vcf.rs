//! VCF reading and writing.
//!
//! Reads a VCF file (plain text or gzipped/bgzf), keeps its header, and writes
//! the records back out with the motif annotation appended to INFO.

use std::fmt::{self, Display};
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;
use splicescan_core::consts::{DEFAULT_INFO_KEY, MISSING_VALUE};
use splicescan_core::errors::ScanError;
use splicescan_core::models::Locus;
use splicescan_core::utils::{
    finish_dynamic_writer, get_dynamic_reader_w_stdin, get_dynamic_writer,
};

use crate::annotation::{StrandAnnotation, info_header_line};
use crate::annotator::Annotator;
use crate::batch::{BatchOptions, annotate_batch};
use crate::summary::{RecordOutcome, RejectionSummary};

/// Columns every data line must have: CHROM, POS, ID, REF, ALT.
const REQUIRED_COLUMNS: usize = 5;
const INFO_COLUMN: usize = 7;

/// One VCF data line. Columns after INFO are carried through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub chrom: String,
    pub pos: u64,
    pub id: String,
    pub ref_allele: String,
    pub alt_allele: String,
    pub qual: String,
    pub filter: String,
    pub info: String,
    pub rest: Option<String>,
}

impl VariantRecord {
    pub fn new(chrom: &str, pos: u64, ref_allele: &str, alt_allele: &str) -> Self {
        VariantRecord {
            chrom: chrom.to_string(),
            pos,
            id: MISSING_VALUE.to_string(),
            ref_allele: ref_allele.to_string(),
            alt_allele: alt_allele.to_string(),
            qual: MISSING_VALUE.to_string(),
            filter: MISSING_VALUE.to_string(),
            info: MISSING_VALUE.to_string(),
            rest: None,
        }
    }

    ///
    /// Parse a tab-separated data line.
    ///
    /// Lines with fewer than the five mandatory columns, or a non-numeric POS,
    /// are structural problems with the file and fail. Missing QUAL, FILTER or
    /// INFO columns are filled with `.`.
    ///
    pub fn parse_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.splitn(INFO_COLUMN + 2, '\t').collect();
        if fields.len() < REQUIRED_COLUMNS {
            bail!(
                "VCF line has {} columns, expected at least {}: {}",
                fields.len(),
                REQUIRED_COLUMNS,
                line
            );
        }

        let pos: u64 = fields[1]
            .parse()
            .context(format!("Invalid POS field: {}", fields[1]))?;
        let column = |i: usize| fields.get(i).unwrap_or(&MISSING_VALUE).to_string();

        Ok(VariantRecord {
            chrom: fields[0].to_string(),
            pos,
            id: fields[2].to_string(),
            ref_allele: fields[3].to_string(),
            alt_allele: fields[4].to_string(),
            qual: column(5),
            filter: column(6),
            info: column(INFO_COLUMN),
            rest: fields.get(INFO_COLUMN + 1).map(|s| s.to_string()),
        })
    }

    pub fn locus(&self) -> Result<Locus, ScanError> {
        Locus::new(&self.chrom, self.pos, &self.ref_allele, &self.alt_allele)
    }

    ///
    /// INFO with `key=a1,a2` appended. An existing entry for `key` is
    /// replaced and a `.` INFO is dropped.
    ///
    pub fn annotated_info(&self, key: &str, annotations: &[StrandAnnotation]) -> String {
        let prefix = format!("{}=", key);
        let mut entries: Vec<String> = self
            .info
            .split(';')
            .filter(|entry| {
                !entry.is_empty()
                    && *entry != MISSING_VALUE
                    && *entry != key
                    && !entry.starts_with(&prefix)
            })
            .map(str::to_string)
            .collect();

        let values: Vec<String> = annotations.iter().map(|a| a.to_string()).collect();
        entries.push(format!("{}{}", prefix, values.join(",")));
        entries.join(";")
    }

    pub fn to_line(&self, info: &str) -> String {
        let mut line = format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom,
            self.pos,
            self.id,
            self.ref_allele,
            self.alt_allele,
            self.qual,
            self.filter,
            info
        );
        if let Some(rest) = &self.rest {
            line.push('\t');
            line.push_str(rest);
        }
        line
    }
}

impl Display for VariantRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {}>{}",
            self.chrom, self.pos, self.ref_allele, self.alt_allele
        )
    }
}

/// A VCF file read fully into memory: header lines and data records.
#[derive(Debug, Clone, Default)]
pub struct VcfReader {
    pub header: Vec<String>,
    pub records: Vec<VariantRecord>,
}

impl VcfReader {
    /// Read a VCF, auto-detecting gzip/bgzf compression. `-` reads stdin.
    pub fn open(path: &str) -> Result<Self> {
        let reader =
            get_dynamic_reader_w_stdin(path).context(format!("Failed to open VCF: {}", path))?;
        Self::from_reader(reader).context(format!("Failed to read VCF: {}", path))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut vcf = VcfReader::default();
        for (line_number, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            if line.starts_with('#') {
                vcf.header.push(line.to_string());
                continue;
            }
            let record = VariantRecord::parse_line(line)
                .context(format!("Malformed record on line {}", line_number + 1))?;
            vcf.records.push(record);
        }
        Ok(vcf)
    }
}

/// Writes header and records, declaring the annotation INFO field.
pub struct VcfWriter<W: Write> {
    writer: W,
    info_key: String,
}

impl<W: Write> VcfWriter<W> {
    pub fn new(writer: W, info_key: &str) -> Self {
        VcfWriter {
            writer,
            info_key: info_key.to_string(),
        }
    }

    ///
    /// Write the header with the INFO definition inserted right before the
    /// `#CHROM` line. A header already declaring the key is written as is.
    ///
    pub fn write_header(&mut self, header: &[String]) -> Result<()> {
        let declaration = format!("##INFO=<ID={},", self.info_key);
        let declared = header.iter().any(|line| line.starts_with(&declaration));
        let mut inserted = declared;

        for line in header {
            if !inserted && line.starts_with("#CHROM") {
                writeln!(self.writer, "{}", info_header_line(&self.info_key))?;
                inserted = true;
            }
            writeln!(self.writer, "{}", line)?;
        }
        if !inserted {
            writeln!(self.writer, "{}", info_header_line(&self.info_key))?;
        }
        Ok(())
    }

    pub fn write_record(
        &mut self,
        record: &VariantRecord,
        annotations: Option<&[StrandAnnotation]>,
    ) -> Result<()> {
        let line = match annotations {
            Some(annotations) => record.to_line(&record.annotated_info(&self.info_key, annotations)),
            None => record.to_line(&record.info),
        };
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// How [`annotate_vcf`] writes its output.
#[derive(Debug, Clone)]
pub struct AnnotateOptions {
    pub info_key: String,
    pub drop_rejected: bool,
    pub batch: BatchOptions,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        AnnotateOptions {
            info_key: DEFAULT_INFO_KEY.to_string(),
            drop_rejected: false,
            batch: BatchOptions::default(),
        }
    }
}

///
/// Annotate every record of `input` and write the result to `output`.
///
/// Records that were rejected or cancelled are written without annotation,
/// or left out with `drop_rejected`. `.gz` outputs are gzip-compressed and
/// `-` writes to stdout.
///
pub fn annotate_vcf<P: AsRef<Path>>(
    input: P,
    output: &str,
    annotator: &Annotator,
    options: &AnnotateOptions,
) -> Result<RejectionSummary> {
    let input = input.as_ref().to_string_lossy().into_owned();
    let vcf = VcfReader::open(&input)?;
    info!("Read {} records from {}", vcf.records.len(), input);

    let report = annotate_batch(annotator, &vcf.records, &options.batch)?;

    let writer =
        get_dynamic_writer(output).context(format!("Failed to create output: {}", output))?;
    let mut writer = VcfWriter::new(writer, &options.info_key);
    writer.write_header(&vcf.header)?;

    for (record, outcome) in vcf.records.iter().zip(&report.outcomes) {
        match outcome {
            RecordOutcome::Annotated(annotations) => {
                writer.write_record(record, Some(annotations.as_slice()))?
            }
            _ if options.drop_rejected => {}
            _ => writer.write_record(record, None)?,
        }
    }
    finish_dynamic_writer(writer.finish()?)
        .with_context(|| format!("Failed to write output: {}", output))?;

    info!("{}", report.summary);
    Ok(report.summary)
}
