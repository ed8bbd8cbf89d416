//! Accessors over a single VEP result object.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::consts::NO_DATA_ERROR;

/// One element of a VEP HGVS response.
///
/// The payload is kept as received; only the handful of fields the annotator reads
/// get typed accessors. Any of them may be missing, in which case the accessor
/// returns `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrichmentResult(Value);

impl EnrichmentResult {
    pub fn new(value: Value) -> Self {
        EnrichmentResult(value)
    }

    /// Placeholder for a notation the service returned nothing for.
    pub fn no_data() -> Self {
        EnrichmentResult(json!({ "error": NO_DATA_ERROR }))
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// The notation the service echoes back for this result.
    pub fn input(&self) -> Option<&str> {
        self.str_field("input")
    }

    pub fn error(&self) -> Option<&str> {
        self.str_field("error")
    }

    pub fn allele_string(&self) -> Option<&str> {
        self.str_field("allele_string")
    }

    pub fn most_severe_consequence(&self) -> Option<&str> {
        self.str_field("most_severe_consequence")
    }

    /// Gene id of the first transcript consequence that carries one.
    pub fn gene_id(&self) -> Option<&str> {
        self.0
            .get("transcript_consequences")?
            .as_array()?
            .iter()
            .find_map(|consequence| consequence.get("gene_id").and_then(Value::as_str))
    }

    /// Allele frequency of `alt` from the first co-located variant reporting one.
    pub fn minor_allele_frequency(&self, alt: &str) -> Option<f64> {
        self.0
            .get("colocated_variants")?
            .as_array()?
            .iter()
            .find_map(|variant| {
                variant
                    .get("frequencies")?
                    .get(alt)?
                    .get("af")
                    .and_then(Value::as_f64)
            })
    }
}

impl From<Value> for EnrichmentResult {
    fn from(value: Value) -> Self {
        EnrichmentResult(value)
    }
}
