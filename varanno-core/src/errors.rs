use std::fmt::{self, Display};

use thiserror::Error;

///
/// The grammar rule a malformed input line broke.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    DuplicateHeader,
    MissingRequiredFields,
    LineFormatInvalid,
    InvalidMetadata,
    InvalidRecordFormat,
    InvalidHgvs,
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseErrorKind::DuplicateHeader => "Duplicate header found",
            ParseErrorKind::MissingRequiredFields => "Missing required header fields",
            ParseErrorKind::LineFormatInvalid => "Line format invalid",
            ParseErrorKind::InvalidMetadata => "Invalid metadata",
            ParseErrorKind::InvalidRecordFormat => "Invalid record format",
            ParseErrorKind::InvalidHgvs => "Unable to build HGVS notation",
        };
        write!(f, "{}", name)
    }
}

///
/// A single malformed line: what went wrong, the offending text and its 1-based line number.
///
/// The `Display` form is the error-log line written next to the annotation output.
///
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {text} [{line_no}]")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub text: String,
    pub line_no: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, text: &str, line_no: usize) -> Self {
        ParseError {
            kind,
            text: text.to_string(),
            line_no,
        }
    }
}

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("Input file missing")]
    InputMissing,

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Open(#[from] anyhow::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HgvsError {
    #[error("Cannot build HGVS notation: {0} is missing")]
    MissingField(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlleleError {
    #[error("Invalid allele string: {0}")]
    InvalidAlleleString(String),
}
