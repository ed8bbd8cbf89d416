use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use tracing::info;

use varanno_core::vcf::{ErrorPolicy, Reader};

use crate::output::OutputDir;

/// Read a VCF file without annotating it: reports the header and record count and
/// dumps metadata and parse errors.
pub fn run_parse(matches: &ArgMatches) -> Result<()> {
    let file = matches
        .get_one::<String>("file")
        .expect("A path to a VCF file is required.");
    let out = matches
        .get_one::<String>("out")
        .expect("An output directory is required.");

    let policy = match matches.get_flag("collect-errors") {
        true => ErrorPolicy::Collect,
        false => ErrorPolicy::FailFast,
    };

    let output = OutputDir::create(Path::new(out))?;
    let mut reader = Reader::from_path(file)
        .with_context(|| format!("Failed to open VCF file: {}", file))?
        .with_policy(policy);

    let mut n_records = 0usize;
    let mut failure = None;
    for record in reader.by_ref() {
        match record {
            Ok(_) => n_records += 1,
            Err(err) => {
                failure = Some(err);
                break;
            }
        }
    }

    let state = reader.into_state();
    output.write_metadata(&state.metadata)?;
    output.write_errors(&state.errors)?;

    if let Some(err) = failure {
        return Err(err).with_context(|| format!("Failed to parse {}", file));
    }

    if let Some(header) = &state.header {
        println!("{}", header.columns().join("\t"));
    }
    println!("Number of records: {}", n_records);
    info!(
        "{} records, {} malformed lines in {}",
        n_records,
        state.errors.len(),
        file
    );

    Ok(())
}
