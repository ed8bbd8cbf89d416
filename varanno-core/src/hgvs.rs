//! HGVS genomic notation for VCF-style variants.

use crate::errors::HgvsError;

///
/// Build the HGVS genomic notation of a variant.
///
/// A single-base reference yields a substitution (`5:g.33954511T>C`); a longer one
/// yields a deletion-insertion spanning `pos` to `pos + len(ref)`
/// (`1:g.91859795_91859802TATGTGAdelinsCATGTGA,CATGTGG`).
///
/// # Arguments
/// - chrom: chromosome name
/// - pos: 1-based position
/// - ref_allele: reference allele
/// - alt_allele: alternate allele(s), verbatim from the ALT column
pub fn hgvs_string(
    chrom: &str,
    pos: u64,
    ref_allele: &str,
    alt_allele: &str,
) -> Result<String, HgvsError> {
    if chrom.is_empty() {
        return Err(HgvsError::MissingField("chromosome"));
    }
    if pos == 0 {
        return Err(HgvsError::MissingField("position"));
    }
    if ref_allele.is_empty() {
        return Err(HgvsError::MissingField("reference"));
    }
    if alt_allele.is_empty() {
        return Err(HgvsError::MissingField("alternate"));
    }

    if ref_allele.len() > 1 {
        let end = pos + ref_allele.len() as u64;
        return Ok(format!(
            "{}:g.{}_{}{}delins{}",
            chrom, pos, end, ref_allele, alt_allele
        ));
    }

    Ok(format!("{}:g.{}{}>{}", chrom, pos, ref_allele, alt_allele))
}
