use anyhow::Result;

use super::result::EnrichmentResult;

/// Anything that can enrich an ordered list of HGVS notations.
///
/// Implementations are expected to return one result per notation, but callers do
/// not rely on it: results are realigned against the request using the `input` each
/// result echoes back. Plain closures implement the trait, which keeps test doubles
/// small.
pub trait EnrichmentService {
    fn enrich(&self, notations: &[String]) -> Result<Vec<EnrichmentResult>>;
}

impl<F> EnrichmentService for F
where
    F: Fn(&[String]) -> Result<Vec<EnrichmentResult>>,
{
    fn enrich(&self, notations: &[String]) -> Result<Vec<EnrichmentResult>> {
        self(notations)
    }
}
