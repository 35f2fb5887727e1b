use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use splicescan_annotate::{AnnotateOptions, Annotator, BatchOptions, annotate_vcf};
use splicescan_core::{MotifKind, ScanConfig};
use splicescan_motif::{PositionWeightMatrix, ScorerSet};
use splicescan_seq::open_genome;

use super::cli::DEFAULT_OUT;

fn load_matrix(kind: MotifKind, path: Option<&PathBuf>) -> Result<Arc<PositionWeightMatrix>> {
    let path = path.with_context(|| {
        format!(
            "No {} matrix given; pass --{}-matrix or set it under [scorers] in the config",
            kind, kind
        )
    })?;
    let pwm = PositionWeightMatrix::from_file(path)
        .with_context(|| format!("Failed to load {} matrix: {:?}", kind, path))?;
    info!("Loaded {} matrix '{}' (width {})", kind, pwm.name, pwm.len());
    Ok(Arc::new(pwm))
}

/// Build the scorer set once, from the matrix paths in `config`.
fn load_scorers(config: &ScanConfig) -> Result<ScorerSet> {
    let donor = load_matrix(MotifKind::Donor, config.scorers.donor_matrix.as_ref())?;
    let acceptor = load_matrix(MotifKind::Acceptor, config.scorers.acceptor_matrix.as_ref())?;
    Ok(ScorerSet::new(donor, acceptor))
}

fn load_config(matches: &ArgMatches) -> Result<ScanConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => {
            ScanConfig::from_file(path).with_context(|| format!("Invalid config: {}", path))?
        }
        None => ScanConfig::default(),
    };

    // matrix flags win over the config file
    if let Some(path) = matches.get_one::<String>("donor-matrix") {
        config.scorers.donor_matrix = Some(PathBuf::from(path));
    }
    if let Some(path) = matches.get_one::<String>("acceptor-matrix") {
        config.scorers.acceptor_matrix = Some(PathBuf::from(path));
    }
    Ok(config)
}

pub fn run_annotate(matches: &ArgMatches) -> Result<()> {
    let vcf = matches
        .get_one::<String>("vcf")
        .expect("A path to a VCF file is required.");

    let fasta = matches
        .get_one::<String>("fasta")
        .expect("A path to a reference FASTA is required.");

    let default_out = DEFAULT_OUT.to_string();
    let output = matches.get_one::<String>("output").unwrap_or(&default_out);

    let config = load_config(matches)?;
    let scorers = load_scorers(&config)?;

    let start = Instant::now();
    let genome = open_genome(fasta)?;
    let annotator = Annotator::new(genome.as_ref(), &config, &scorers)?;

    let options = AnnotateOptions {
        info_key: matches
            .get_one::<String>("info-key")
            .cloned()
            .unwrap_or_default(),
        drop_rejected: matches.get_flag("drop-rejected"),
        batch: BatchOptions {
            threads: matches.get_one::<usize>("threads").copied().unwrap_or(0),
            cancel: None,
            progress: matches.get_flag("progress"),
        },
    };

    let summary = annotate_vcf(vcf, output, &annotator, &options)?;
    eprintln!("{}", summary);
    info!("Elapsed time: {:?}", start.elapsed());

    Ok(())
}
