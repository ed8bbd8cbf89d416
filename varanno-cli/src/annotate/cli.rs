use clap::{Arg, ArgAction, Command, value_parser};

use crate::consts::DEFAULT_OUT;

pub const ANNOTATE_CMD: &str = "annotate";

pub fn create_annotate_cli() -> Command {
    Command::new(ANNOTATE_CMD)
        .about("Annotate every variant of a VCF file using the Ensembl VEP HGVS endpoint.")
        .arg(
            Arg::new("file")
                .long("file")
                .short('f')
                .required(true)
                .help("Path to the VCF file (plain or gzipped)"),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .short('o')
                .default_value(DEFAULT_OUT)
                .help("Output directory"),
        )
        .arg(
            Arg::new("batch-size")
                .long("batch-size")
                .short('b')
                .value_parser(value_parser!(usize))
                .help("Variants per VEP request (1-300, default 50)"),
        )
        .arg(
            Arg::new("api")
                .long("api")
                .help("VEP REST api base url"),
        )
        .arg(
            Arg::new("species")
                .long("species")
                .help("Species name understood by VEP"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file with api, species, batch_size and timeout_secs"),
        )
        .arg(
            Arg::new("collect-errors")
                .long("collect-errors")
                .action(ArgAction::SetTrue)
                .help("Skip malformed lines instead of stopping at the first one"),
        )
}
