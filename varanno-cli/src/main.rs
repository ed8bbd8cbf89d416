mod annotate;
mod output;
mod parse;

use anyhow::Result;
use clap::{Arg, Command};
use tracing_subscriber::{EnvFilter, fmt};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "varanno";
    pub const DEFAULT_OUT: &str = "varanno_output";
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Annotate the variants of a VCF file with gene, consequence and allele frequency data from Ensembl VEP.")
        .subcommand_required(true)
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .default_value(consts::DEFAULT_LOG_LEVEL)
                .help("Logging filter, e.g. `info`, `debug` or `varanno_vep=debug`"),
        )
        .subcommand(annotate::cli::create_annotate_cli())
        .subcommand(parse::cli::create_parse_cli())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    if let Some(level) = matches.get_one::<String>("log-level") {
        init_logging(level);
    }

    match matches.subcommand() {
        //
        // ANNOTATE
        //
        Some((annotate::cli::ANNOTATE_CMD, matches)) => {
            annotate::handlers::run_annotate(matches)?;
        }

        //
        // PARSE
        //
        Some((parse::cli::PARSE_CMD, matches)) => {
            parse::handlers::run_parse(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_parser_is_consistent() {
        build_parser().debug_assert();
    }

    #[rstest]
    fn test_annotate_args() {
        let matches = build_parser()
            .try_get_matches_from([
                "varanno",
                "annotate",
                "-f",
                "calls.vcf",
                "--batch-size",
                "25",
                "--collect-errors",
                "--log-level",
                "debug",
            ])
            .unwrap();

        assert_eq!(
            matches.get_one::<String>("log-level").map(String::as_str),
            Some("debug")
        );
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, annotate::cli::ANNOTATE_CMD);
        assert_eq!(
            sub.get_one::<String>("file").map(String::as_str),
            Some("calls.vcf")
        );
        assert_eq!(
            sub.get_one::<String>("out").map(String::as_str),
            Some(consts::DEFAULT_OUT)
        );
        assert_eq!(sub.get_one::<usize>("batch-size"), Some(&25));
        assert!(sub.get_flag("collect-errors"));
    }

    #[rstest]
    #[case(&["varanno", "annotate"])]
    #[case(&["varanno", "annotate", "-f", "calls.vcf", "--batch-size", "many"])]
    #[case(&["varanno"])]
    fn test_rejected_args(#[case] args: &[&str]) {
        assert!(build_parser().try_get_matches_from(args).is_err());
    }

    fn fixture(name: &str) -> String {
        std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .unwrap()
            .join("tests/data/vcf")
            .join(name)
            .to_string_lossy()
            .into_owned()
    }

    fn run_parse_cmd(file: &str, out: &std::path::Path, collect: bool) -> Result<()> {
        let out = out.to_string_lossy().into_owned();
        let mut args = vec!["varanno", "parse", "-f", file, "-o", out.as_str()];
        if collect {
            args.push("--collect-errors");
        }
        let matches = build_parser().try_get_matches_from(args).unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        parse::handlers::run_parse(sub)
    }

    #[rstest]
    fn test_parse_writes_metadata() {
        let tempdir = tempfile::tempdir().unwrap();
        let out = tempdir.path().join("nested/out");

        run_parse_cmd(&fixture("sample.vcf.gz"), &out, false).unwrap();

        let metadata: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(out.join(output::METADATA_JSON)).unwrap(),
        )
        .unwrap();
        assert_eq!(metadata["source"], "Platypus_Version_0.8.1");
        assert_eq!(metadata["FORMAT"].as_array().unwrap().len(), 4);
        assert_eq!(
            std::fs::read_to_string(out.join(output::ERRORS_LOG)).unwrap(),
            ""
        );
    }

    #[rstest]
    #[case(false, true)]
    #[case(true, false)]
    fn test_parse_error_policies(#[case] collect: bool, #[case] fails: bool) {
        let tempdir = tempfile::tempdir().unwrap();

        let result = run_parse_cmd(&fixture("truncated_record.vcf"), tempdir.path(), collect);
        assert_eq!(result.is_err(), fails);

        let errors = std::fs::read_to_string(tempdir.path().join(output::ERRORS_LOG)).unwrap();
        assert_eq!(errors.lines().count(), 1);
        assert!(errors.starts_with("Invalid record format:"));
    }
}
