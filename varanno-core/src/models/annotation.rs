use serde::Serialize;

use crate::models::variant::{VariantType, Zygosity};

///
/// A fully annotated variant: the identity of its source record, locally computed
/// coverage metrics and the fields fetched from the consequence service.
///
/// Field order is the column order of the written output.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    #[serde(rename = "CHROM")]
    pub chrom: String,
    #[serde(rename = "POS")]
    pub pos: u64,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "REF")]
    pub ref_allele: String,
    #[serde(rename = "ALT")]
    pub alt_allele: String,
    pub hgvs: String,
    pub gene_id: Option<String>,
    pub allele_string: Option<String>,
    pub variant_type: Option<VariantType>,
    pub variant_effect: Option<String>,
    pub minor_allele_frequency: Option<f64>,
    pub depth_of_sequence_coverage: Option<f64>,
    pub num_reads_supporting_variant: Option<f64>,
    pub pct_reads_supporting_variant: Option<f64>,
    pub genotype: Zygosity,
}

/// Output column names, in serialization order.
pub const ANNOTATION_COLUMNS: [&str; 15] = [
    "CHROM",
    "POS",
    "ID",
    "REF",
    "ALT",
    "hgvs",
    "gene_id",
    "allele_string",
    "variant_type",
    "variant_effect",
    "minor_allele_frequency",
    "depth_of_sequence_coverage",
    "num_reads_supporting_variant",
    "pct_reads_supporting_variant",
    "genotype",
];
