use std::env;

use log::warn;

use super::consts::{BATCH_SIZE_ENV, DEFAULT_BATCH_SIZE, DEFAULT_VEP_API, VEP_API_ENV};

/// Get default VEP api from environment variable
///
/// # Returns
/// - VEP REST api base url
pub fn get_default_vep_api() -> String {
    env::var(VEP_API_ENV).unwrap_or_else(|_| DEFAULT_VEP_API.to_string())
}

/// Get default batch size from environment variable, falling back to [DEFAULT_BATCH_SIZE]
/// when it is unset or not a positive integer.
pub fn get_default_batch_size() -> usize {
    match env::var(BATCH_SIZE_ENV) {
        Ok(val) => match val.parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => {
                warn!(
                    "Ignoring {}={:?}: expected a positive integer",
                    BATCH_SIZE_ENV, val
                );
                DEFAULT_BATCH_SIZE
            }
        },
        Err(_) => DEFAULT_BATCH_SIZE,
    }
}
