use clap::{Arg, ArgAction, Command};

use crate::consts::DEFAULT_OUT;

pub const PARSE_CMD: &str = "parse";

pub fn create_parse_cli() -> Command {
    Command::new(PARSE_CMD)
        .about("Validate a VCF file and dump its meta-information, without annotating.")
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
            Arg::new("collect-errors")
                .long("collect-errors")
                .action(ArgAction::SetTrue)
                .help("Skip malformed lines instead of stopping at the first one"),
        )
}
