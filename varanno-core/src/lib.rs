//! # varanno core
//!
//! Building blocks for annotating the variants of a VCF file:
//!
//! - [vcf::Reader]: a lazy, line-oriented VCF reader that validates meta-information,
//!   the header line and every data row
//! - [allele]: classification of allele-change strings into variant types, and
//!   genotype interpretation
//! - [hgvs]: HGVS genomic notation for a record
//! - [utils]: INFO / FORMAT+SAMPLE micro-parsers and plain/gzip readers
//!
//! ```rust
//! use varanno_core::allele::variant_type;
//! use varanno_core::models::VariantType;
//!
//! assert_eq!(variant_type("A/A").unwrap(), VariantType::CnvDup);
//! ```
pub mod allele;
pub mod errors;
pub mod hgvs;
pub mod models;
pub mod utils;
pub mod vcf;

// re-expose the most common entry points
pub use allele::{parse_genotype, variant_type};
pub use errors::{AlleleError, HgvsError, ParseError, ParseErrorKind, ReaderError};
pub use hgvs::hgvs_string;
pub use models::{Annotation, Header, Metadata, Record, VariantType, Zygosity};
pub use vcf::{ErrorPolicy, Reader, ReaderState};
