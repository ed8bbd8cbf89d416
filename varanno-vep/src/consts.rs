//! Constants for VEP access and batch annotation.
//!
//! This module defines environment variable names, endpoint defaults and batch limits
//! used throughout the annotation pipeline.

// Environment variable names

/// Environment variable name for setting the VEP REST API base URL.
///
/// When set, this overrides the default endpoint (`https://grch37.rest.ensembl.org`).
///
/// # Example
///
/// ```bash
/// export VARANNO_VEP_API=https://rest.ensembl.org
/// ```
pub const VEP_API_ENV: &str = "VARANNO_VEP_API";

/// Environment variable name for setting the number of variants sent per request.
pub const BATCH_SIZE_ENV: &str = "VARANNO_BATCH_SIZE";

// Endpoint defaults

/// GRCh37 Ensembl REST server; the input calls are on GRCh37 coordinates.
pub const DEFAULT_VEP_API: &str = "https://grch37.rest.ensembl.org";

pub const DEFAULT_SPECIES: &str = "human";

/// Seconds to wait for a VEP response before giving up.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

// Batching

/// Number of HGVS notations sent in one POST request.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Largest batch the VEP HGVS POST endpoint accepts.
pub const MAX_BATCH_SIZE: usize = 300;

/// Error text of the placeholder standing in for a notation VEP returned nothing for.
pub const NO_DATA_ERROR: &str = "no data returned";
