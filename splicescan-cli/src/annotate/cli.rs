use clap::{Arg, ArgAction, Command, value_parser};

pub use splicescan_core::consts::DEFAULT_INFO_KEY;

pub const ANNOTATE_CMD: &str = "annotate";
pub const DEFAULT_OUT: &str = "-";

pub fn create_annotate_cli() -> Command {
    Command::new(ANNOTATE_CMD)
        .author("Databio")
        .about("Annotate VCF variants with splice donor and acceptor motif gain/loss scores on both strands.")
        .arg(
            Arg::new("vcf")
                .long("vcf")
                .short('i')
                .required(true)
                .help("Input VCF (plain, .gz or .bgz; '-' for stdin)"),
        )
        .arg(
            Arg::new("fasta")
                .long("fasta")
                .short('f')
                .required(true)
                .help("Reference genome FASTA; indexed with .fai when uncompressed"),
        )
        .arg(
            Arg::new("donor-matrix")
                .long("donor-matrix")
                .help("Donor position weight matrix (.json or whitespace table)"),
        )
        .arg(
            Arg::new("acceptor-matrix")
                .long("acceptor-matrix")
                .help("Acceptor position weight matrix (.json or whitespace table)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file with motif widths, contexts and matrix paths"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output VCF; '.gz' is compressed, '-' is stdout (default)"),
        )
        .arg(
            Arg::new("info-key")
                .long("info-key")
                .default_value(DEFAULT_INFO_KEY)
                .help("INFO field the annotation is written to"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .short('t')
                .value_parser(value_parser!(usize))
                .default_value("0")
                .help("Worker threads (0 = all cores)"),
        )
        .arg(
            Arg::new("drop-rejected")
                .long("drop-rejected")
                .action(ArgAction::SetTrue)
                .help("Leave rejected records out of the output instead of passing them through"),
        )
        .arg(
            Arg::new("progress")
                .long("progress")
                .action(ArgAction::SetTrue)
                .help("Show a progress bar"),
        )
}
