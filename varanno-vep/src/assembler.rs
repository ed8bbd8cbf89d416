//! Merging a record's own measurements with its VEP result.

use log::warn;

use varanno_core::errors::AlleleError;
use varanno_core::models::{Annotation, Record, Zygosity};
use varanno_core::utils::{cast_float, parse_format_sample, parse_record_info};
use varanno_core::{parse_genotype, variant_type};

use super::result::EnrichmentResult;

/// Total coverage at the variant site (INFO).
const DEPTH_KEY: &str = "TC";
/// Reads supporting the variant (sample column).
const READS_KEY: &str = "NV";
const GENOTYPE_KEY: &str = "GT";

///
/// Build the annotation of `record` from the record itself and the VEP result
/// aligned with it.
///
/// Local metrics (depth, supporting reads, genotype) come from the record; the gene,
/// allele string, consequence and allele frequency come from `result`. A result that
/// only carries an `error` yields an annotation with every service field empty.
///
/// # Errors
/// Fails when VEP returns an allele string that cannot be classified.
pub fn annotation_factory(
    record: &Record,
    result: &EnrichmentResult,
) -> Result<Annotation, AlleleError> {
    let info = parse_record_info(&record.info);
    let sample = parse_format_sample(record.format.as_deref(), record.sample.as_deref());

    let gt = sample.get(GENOTYPE_KEY).map(String::as_str);
    let genotype = parse_genotype(gt).unwrap_or_else(|| {
        warn!(
            "Unknown genotype {:?} at {}:{}",
            gt.unwrap_or_default(),
            record.chrom,
            record.pos
        );
        Zygosity::Unknown
    });

    let depth = cast_float(info.get(DEPTH_KEY).map(String::as_str));
    let reads = cast_float(sample.get(READS_KEY).map(String::as_str));

    if let Some(error) = result.error() {
        warn!("No VEP data for {}: {}", record.hgvs(), error);
    }

    let allele_string = result.allele_string().map(str::to_string);
    let variant_type = allele_string.as_deref().map(variant_type).transpose()?;

    Ok(Annotation {
        chrom: record.chrom.clone(),
        pos: record.pos,
        id: record.id.clone(),
        ref_allele: record.ref_allele.clone(),
        alt_allele: record.alt_allele.clone(),
        hgvs: record.hgvs().to_string(),
        gene_id: result.gene_id().map(str::to_string),
        allele_string,
        variant_type,
        variant_effect: result.most_severe_consequence().map(str::to_string),
        minor_allele_frequency: result.minor_allele_frequency(&record.alt_allele),
        depth_of_sequence_coverage: depth,
        num_reads_supporting_variant: reads,
        pct_reads_supporting_variant: pct_reads_supporting_variant(reads, depth),
        genotype,
    })
}

/// Percentage of reads supporting the variant, rounded to 4 decimals.
///
/// `None` when either count is missing or the depth is zero.
pub fn pct_reads_supporting_variant(reads: Option<f64>, depth: Option<f64>) -> Option<f64> {
    let (reads, depth) = (reads?, depth?);
    if depth == 0.0 {
        return None;
    }
    Some(round4(100.0 * reads / depth))
}

/// Rounds to 4 decimals, ties away from zero.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
