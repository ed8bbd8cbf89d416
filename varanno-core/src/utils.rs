use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Parse a `;`-delimited INFO column into a key -> value map.
///
/// Flag entries without `=` map to an empty value; a missing INFO (`.`) yields an
/// empty map.
///
/// # Arguments
/// - info: raw INFO column, e.g. `TC=160;TR=156;Source=Platypus`
pub fn parse_record_info(info: &str) -> HashMap<String, String> {
    if info.is_empty() || info == "." {
        return HashMap::new();
    }

    info.split(';')
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (entry.to_string(), String::new()),
        })
        .collect()
}

///
/// Pair the colon-delimited FORMAT keys with the values of a sample column.
///
/// Returns an empty map unless both columns are present.
pub fn parse_format_sample(format: Option<&str>, sample: Option<&str>) -> HashMap<String, String> {
    match (format, sample) {
        (Some(format), Some(sample)) => format
            .split(':')
            .zip(sample.split(':'))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        _ => HashMap::new(),
    }
}

/// Parse a numeric annotation value; `None` when absent or not a number.
pub fn cast_float(value: Option<&str>) -> Option<f64> {
    value?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
