use std::collections::BTreeMap;

use serde::Serialize;

/// Meta-information keys that hold an ordered list of structured entries.
pub const MULTI_VALUED_KEYS: [&str; 4] = ["INFO", "FILTER", "FORMAT", "ALT"];

///
/// One structured meta-information line, e.g.
/// `##INFO=<ID=QD,Number=1,Type=Float,Description="...">`.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaEntry {
    pub id: String,
    pub number: Option<String>,
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub description: String,
    pub source: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    Scalar(String),
    Entries(Vec<MetaEntry>),
}

///
/// Meta-information collected from the `##` lines of a VCF file.
///
/// The four multi-valued keys always exist (possibly empty); every other key is a
/// scalar overwritten by the latest `##KEY=VALUE` line.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Metadata {
    values: BTreeMap<String, MetaValue>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new()
    }
}

impl Metadata {
    pub fn new() -> Self {
        let values = MULTI_VALUED_KEYS
            .iter()
            .map(|k| (k.to_string(), MetaValue::Entries(Vec::new())))
            .collect();
        Metadata { values }
    }

    pub fn is_multi_valued(key: &str) -> bool {
        MULTI_VALUED_KEYS.contains(&key)
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.values.get(key)
    }

    pub fn scalar(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(MetaValue::Scalar(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Structured entries stored under `key`; empty when there are none.
    pub fn entries(&self, key: &str) -> &[MetaEntry] {
        match self.values.get(key) {
            Some(MetaValue::Entries(entries)) => entries,
            _ => &[],
        }
    }

    ///
    /// Append a structured entry under `key`. Keys outside [MULTI_VALUED_KEYS] are
    /// accepted too; a scalar previously stored under the key is replaced.
    ///
    pub fn push_entry(&mut self, key: &str, entry: MetaEntry) {
        match self.values.get_mut(key) {
            Some(MetaValue::Entries(entries)) => entries.push(entry),
            _ => {
                self.values
                    .insert(key.to_string(), MetaValue::Entries(vec![entry]));
            }
        }
    }

    ///
    /// Overwrite `key` with a scalar value.
    ///
    /// # Returns
    /// - false (leaving the store untouched) when `key` is one of the multi-valued keys
    pub fn set_scalar(&mut self, key: &str, value: &str) -> bool {
        if Self::is_multi_valued(key) {
            return false;
        }
        self.values
            .insert(key.to_string(), MetaValue::Scalar(value.to_string()));
        true
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Every structured entry of the multi-valued keys, paired with its key.
    pub fn meta_structs(&self) -> impl Iterator<Item = (&'static str, &MetaEntry)> {
        MULTI_VALUED_KEYS
            .iter()
            .flat_map(move |key| self.entries(key).iter().map(move |entry| (*key, entry)))
    }
}
