//! Allele-change classification and genotype interpretation.

use crate::errors::AlleleError;
use crate::models::{VariantType, Zygosity};

type Predicate = fn(&str, &[&str]) -> bool;

///
/// Ordered classification cascade. The first predicate that accepts the allele
/// string decides its type, so the order is part of the contract: `A/A` is a
/// duplication and never reaches the generic fallback.
///
const VARIANT_TYPES: [(VariantType, Predicate); 8] = [
    (VariantType::SnvSub, is_snv_sub),
    (VariantType::SnvDel, is_snv_del),
    (VariantType::SnvIns, is_snv_ins),
    (VariantType::MnvSub, is_mnv_sub),
    (VariantType::MnvDel, is_mnv_del),
    (VariantType::MnvIns, is_mnv_ins),
    (VariantType::CnvDup, is_cnv_dup),
    (VariantType::CnvMul, is_cnv_mul),
];

/// Most alternates the generic allele grammar accepts.
const MAX_ALTERNATES: usize = 4;

/// Exact-match genotype codes.
const GENOTYPES: [(&str, Zygosity); 4] = [
    ("0/0", Zygosity::HomozygousRef),
    ("0/1", Zygosity::Heterozygous),
    ("1/0", Zygosity::Heterozygous),
    ("1/1", Zygosity::HomozygousAlt),
];

fn is_base(c: char) -> bool {
    matches!(c, 'A' | 'T' | 'C' | 'G')
}

fn is_marker(c: char) -> bool {
    matches!(c, '.' | '-')
}

fn bases(s: &str, min_len: usize) -> bool {
    s.len() >= min_len && s.chars().all(is_base)
}

fn markers(s: &str, min_len: usize) -> bool {
    s.len() >= min_len && s.chars().all(is_marker)
}

fn single_base(s: &str) -> bool {
    s.len() == 1 && bases(s, 1)
}

fn single_marker(s: &str) -> bool {
    s.len() == 1 && markers(s, 1)
}

fn is_snv_sub(reference: &str, alts: &[&str]) -> bool {
    matches!(alts, [alt] if single_base(reference) && single_base(alt) && reference != *alt)
}

fn is_snv_del(reference: &str, alts: &[&str]) -> bool {
    matches!(alts, [alt] if single_base(reference) && single_marker(alt))
}

fn is_snv_ins(reference: &str, alts: &[&str]) -> bool {
    matches!(alts, [alt] if single_marker(reference) && single_base(alt))
}

fn is_mnv_sub(reference: &str, alts: &[&str]) -> bool {
    matches!(alts, [alt] if bases(reference, 2) && bases(alt, 2) && reference != *alt)
}

fn is_mnv_del(reference: &str, alts: &[&str]) -> bool {
    matches!(alts, [alt] if bases(reference, 1) && markers(alt, 1))
}

fn is_mnv_ins(reference: &str, alts: &[&str]) -> bool {
    matches!(alts, [alt] if markers(reference, 1) && bases(alt, 1))
}

fn is_cnv_dup(reference: &str, alts: &[&str]) -> bool {
    matches!(alts, [alt] if single_base(reference) && reference == *alt)
}

fn is_cnv_mul(reference: &str, alts: &[&str]) -> bool {
    alts.len() >= 2 && single_base(reference) && alts.iter().all(|alt| *alt == reference)
}

/// Generic `REF/ALT1[/ALT2..]` grammar: `+` is only legal on the alternate side.
fn is_allele_string(reference: &str, alts: &[&str]) -> bool {
    let ref_ok = !reference.is_empty() && reference.chars().all(|c| is_base(c) || is_marker(c));
    let alts_ok = (1..=MAX_ALTERNATES).contains(&alts.len())
        && alts.iter().all(|alt| {
            !alt.is_empty() && alt.chars().all(|c| is_base(c) || c == '.' || c == '+')
        });
    ref_ok && alts_ok
}

///
/// Determine the variant type of an allele string such as `A/G` or `A/A/A`.
///
/// # Arguments
/// - allele_string: `REF/ALT1[/ALT2...]`
///
/// # Returns
/// - the first matching [VariantType] of the cascade, [VariantType::Complex] for
///   anything else the allele grammar accepts, or an error for strings it rejects
pub fn variant_type(allele_string: &str) -> Result<VariantType, AlleleError> {
    let mut parts = allele_string.split('/');
    let reference = parts.next().unwrap_or_default();
    let alts: Vec<&str> = parts.collect();

    if let Some((vtype, _)) = VARIANT_TYPES
        .iter()
        .find(|(_, accepts)| accepts(reference, &alts))
    {
        return Ok(*vtype);
    }

    if is_allele_string(reference, &alts) {
        return Ok(VariantType::Complex);
    }

    Err(AlleleError::InvalidAlleleString(allele_string.to_string()))
}

///
/// Interpret a sample genotype code (`GT`).
///
/// Returns `None` for anything outside the four diploid biallelic codes; callers
/// substitute [Zygosity::Unknown].
pub fn parse_genotype(gt: Option<&str>) -> Option<Zygosity> {
    let gt = gt?;
    GENOTYPES
        .iter()
        .find(|(code, _)| *code == gt)
        .map(|(_, zygosity)| *zygosity)
}
