use std::fmt::{self, Display};

use serde::Serialize;

///
/// Category of an allele change, as decided by [crate::allele::variant_type].
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariantType {
    /// single base substitution, e.g. `A/G`
    SnvSub,
    /// single base deletion, e.g. `A/-`
    SnvDel,
    /// single base insertion, e.g. `-/A`
    SnvIns,
    /// multi-base substitution, e.g. `AC/GT`
    MnvSub,
    /// multi-base deletion, e.g. `AC/..`
    MnvDel,
    /// multi-base insertion, e.g. `../AG`
    MnvIns,
    /// duplication, e.g. `A/A`
    CnvDup,
    /// multiplication, e.g. `A/A/A`
    CnvMul,
    /// anything else the allele grammar accepts, e.g. `A/CTG`
    Complex,
}

impl VariantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantType::SnvSub => "SNV_SUB",
            VariantType::SnvDel => "SNV_DEL",
            VariantType::SnvIns => "SNV_INS",
            VariantType::MnvSub => "MNV_SUB",
            VariantType::MnvDel => "MNV_DEL",
            VariantType::MnvIns => "MNV_INS",
            VariantType::CnvDup => "CNV_DUP",
            VariantType::CnvMul => "CNV_MUL",
            VariantType::Complex => "COMPLEX",
        }
    }
}

impl Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Zygosity {
    HomozygousRef,
    Heterozygous,
    HomozygousAlt,
    Unknown,
}

impl Zygosity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Zygosity::HomozygousRef => "homozygous_ref",
            Zygosity::Heterozygous => "heterozygous",
            Zygosity::HomozygousAlt => "homozygous_alt",
            Zygosity::Unknown => "unknown",
        }
    }
}

impl Display for Zygosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
