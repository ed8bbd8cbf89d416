use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use varanno_core::vcf::{ErrorPolicy, Reader};
use varanno_vep::{AnnotatorConfig, BatchAnnotator};

use crate::output::{AnnotationWriter, OutputDir};

/// Settings given on the command line; they override the config file.
fn config_from_matches(matches: &ArgMatches) -> AnnotatorConfig {
    AnnotatorConfig {
        api: matches.get_one::<String>("api").cloned(),
        species: matches.get_one::<String>("species").cloned(),
        batch_size: matches.get_one::<usize>("batch-size").copied(),
        timeout_secs: None,
    }
}

fn progress_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg} ({pos} variants)")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

pub fn run_annotate(matches: &ArgMatches) -> Result<()> {
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

    let file_config = match matches.get_one::<String>("config") {
        Some(path) => AnnotatorConfig::from_path(Path::new(path))
            .with_context(|| format!("Failed to read config file: {}", path))?,
        None => AnnotatorConfig::default(),
    };
    let config = file_config.merge(config_from_matches(matches));
    let batch_size = config.batch_size()?;
    let client = config.client()?;
    info!(
        "Annotating {} against {} ({} variants per request)",
        file,
        client.hgvs_url(),
        batch_size
    );

    let output = OutputDir::create(Path::new(out))?;
    let mut reader = Reader::from_path(file)
        .with_context(|| format!("Failed to open VCF file: {}", file))?
        .with_policy(policy);
    let mut writer = AnnotationWriter::create(&output)?;

    let pb = progress_spinner();
    pb.set_message(format!("Annotating {}", file));

    let annotator = BatchAnnotator::new(&client).with_batch_size(batch_size);
    let mut annotations = annotator.annotate(reader.by_ref());
    let mut failure = None;
    for item in annotations.by_ref() {
        match item {
            Ok(annotation) => {
                writer.write(&annotation)?;
                pb.inc(1);
            }
            Err(err) => {
                failure = Some(err);
                break;
            }
        }
    }
    let stats = annotations.stats();
    drop(annotations);
    let written = writer.finish()?;
    info!(
        "Sent {} VEP requests for {} variants",
        stats.batches, stats.records
    );

    let state = reader.into_state();
    output.write_metadata(&state.metadata)?;
    output.write_errors(&state.errors)?;

    if let Some(err) = failure {
        pb.abandon_with_message(format!("Stopped after {} variants", written));
        return Err(err);
    }

    pb.finish_with_message(format!("Annotated {} variants", written));
    if !state.errors.is_empty() {
        info!(
            "Skipped {} malformed lines, see {}",
            state.errors.len(),
            output.join(crate::output::ERRORS_LOG).display()
        );
    }
    info!("Wrote annotations to {}", out);

    Ok(())
}
