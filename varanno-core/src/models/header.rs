use serde::Serialize;

/// Columns every VCF header line must declare.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER", "INFO",
];

///
/// The ordered column names declared by the `#CHROM ...` line of a VCF file.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    pub fn new(columns: Vec<String>) -> Self {
        Header { columns }
    }

    ///
    /// Build a header from the raw `#`-prefixed line. The leading marker is stripped
    /// from the first column and the rest is split on tabs.
    ///
    pub fn from_line(line: &str) -> Self {
        let line = line.strip_prefix('#').unwrap_or(line);
        Header {
            columns: line.split('\t').map(|s| s.to_string()).collect(),
        }
    }

    /// Required columns absent from this header, in canonical order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|required| !self.columns.iter().any(|c| c == *required))
            .copied()
            .collect()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}
