//! Realigning service results with the request that produced them.

use std::collections::HashMap;
use std::hash::Hash;

use log::warn;

use super::result::EnrichmentResult;

/// Reorder `results` so that position `i` holds the result whose key equals `keys[i]`.
///
/// Results without a key are dropped. When several results share a key the first one
/// wins, and every request position asking for that key gets a copy. Keys with no
/// result are filled by `placeholder`.
pub fn realign_by_key<K, T, F, P>(keys: &[K], results: Vec<T>, key_of: F, mut placeholder: P) -> Vec<T>
where
    K: Eq + Hash + Clone,
    T: Clone,
    F: Fn(&T) -> Option<K>,
    P: FnMut(&K) -> T,
{
    let mut by_key: HashMap<K, T> = HashMap::with_capacity(results.len());
    for result in results {
        if let Some(key) = key_of(&result) {
            by_key.entry(key).or_insert(result);
        }
    }

    keys.iter()
        .map(|key| match by_key.get(key) {
            Some(result) => result.clone(),
            None => placeholder(key),
        })
        .collect()
}

/// True when `results` already lines up with `notations` one to one.
///
/// A result that does not echo its input is trusted to sit in the right place.
pub fn is_aligned(notations: &[String], results: &[EnrichmentResult]) -> bool {
    results.len() == notations.len()
        && results
            .iter()
            .zip(notations)
            .all(|(result, notation)| result.input().is_none_or(|input| input == notation))
}

/// Line VEP results up with the notations sent, filling gaps with a no-data placeholder.
///
/// VEP silently drops notations it cannot resolve and may reorder what it returns, so
/// the response is matched back to the request through each result's `input`.
pub fn realign_results(
    notations: &[String],
    results: Vec<EnrichmentResult>,
) -> Vec<EnrichmentResult> {
    if is_aligned(notations, &results) {
        return results;
    }

    if results.len() != notations.len() {
        warn!(
            "VEP returned {} results for {} notations",
            results.len(),
            notations.len()
        );
    }

    realign_by_key(
        notations,
        results,
        |result| result.input().map(str::to_string),
        |notation| {
            warn!("VEP returned no data for HGVS notation {}", notation);
            EnrichmentResult::no_data()
        },
    )
}
