mod annotate;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::Level;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "splicescan";
    pub const BIN_NAME: &str = "splicescan";
    pub const VERBOSE_ARG: &str = "verbose";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Score how variants create or destroy splice donor and acceptor motifs, indels included.")
        .subcommand_required(true)
        .arg(
            Arg::new(consts::VERBOSE_ARG)
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .global(true)
                .help("Increase logging verbosity (-v info, -vv debug)"),
        )
        .subcommand(annotate::cli::create_annotate_cli())
}

fn log_level(matches: &ArgMatches) -> Level {
    match matches.get_count(consts::VERBOSE_ARG) {
        0 => Level::Warn,
        1 => Level::Info,
        _ => Level::Debug,
    }
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    simple_logger::init_with_level(log_level(&matches))?;

    match matches.subcommand() {
        //
        // ANNOTATE
        //
        Some((annotate::cli::ANNOTATE_CMD, matches)) => {
            annotate::handlers::run_annotate(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(&["splicescan", "annotate", "--vcf", "in.vcf", "--fasta", "ref.fa"], Level::Warn)]
    #[case(&["splicescan", "-v", "annotate", "--vcf", "in.vcf", "--fasta", "ref.fa"], Level::Info)]
    #[case(&["splicescan", "annotate", "-vv", "--vcf", "in.vcf", "--fasta", "ref.fa"], Level::Debug)]
    fn test_verbosity(#[case] args: &[&str], #[case] expected: Level) {
        let matches = build_parser().try_get_matches_from(args).unwrap();
        assert_eq!(log_level(&matches), expected);
    }

    #[rstest]
    fn test_parser_is_valid() {
        build_parser().debug_assert();
    }
}
