//! VCF reading.
//!
//! A [Reader] walks a VCF text stream line by line. Until the `#CHROM` header line has
//! been seen it accepts meta-information (`##`) lines and the header; afterwards it
//! accepts meta-information and data rows. Records are produced lazily through the
//! [Iterator] implementation, while metadata, header and the parse-error log are kept
//! in an explicit [ReaderState].

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;

use crate::errors::{ParseError, ParseErrorKind, ReaderError};
use crate::models::{Header, MetaEntry, Metadata, Record};
use crate::utils::get_dynamic_reader;

static META_STRUCT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"^##(?P<key>\w+)=<ID=(?P<id>[^,>]+),"#,
        r#"(?:Number=(?P<number>\d+|\.|[A-Z]),)?"#,
        r#"(?:Type=(?P<type>Integer|Float|Flag|Character|String),)?"#,
        r#"Description="(?P<description>[^"]*)""#,
        r#"(?:,Source="(?P<source>[^"]*)")?"#,
        r#"(?:,Version="(?P<version>[^"]*)")?>$"#,
    ))
    .expect("structured metadata pattern is valid")
});

static META_KEYVAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^##(?P<key>.+?)=(?P<value>.*)$").expect("key/value metadata pattern is valid")
});

/// What a reader does when it meets a malformed line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Record the error, yield it, and stop reading.
    #[default]
    FailFast,
    /// Record the error, skip the line and keep reading.
    Collect,
}

///
/// Everything a read pass accumulates besides the records themselves.
///
#[derive(Debug, Clone, Default)]
pub struct ReaderState {
    pub metadata: Metadata,
    pub header: Option<Header>,
    pub errors: Vec<ParseError>,
}

impl ReaderState {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Dispatch one trimmed line according to its prefix and the current state.
    ///
    /// # Returns
    /// - a record for data rows, `None` for metadata and header lines
    pub fn parse_line(&mut self, line: &str, line_no: usize) -> Result<Option<Record>, ParseError> {
        if line.starts_with("##") {
            self.parse_metadata(line, line_no)?;
            Ok(None)
        } else if line.starts_with('#') {
            self.validate_head(line, line_no)?;
            Ok(None)
        } else if self.header.is_some() {
            self.build_record(line, line_no).map(Some)
        } else {
            Err(ParseError::new(ParseErrorKind::LineFormatInvalid, line, line_no))
        }
    }

    ///
    /// Parse a `##` meta-information line into the metadata store.
    ///
    /// Structured `##KEY=<ID=..,Description="..">` lines are appended under their key;
    /// anything else of the form `##KEY=VALUE` overwrites a scalar.
    pub fn parse_metadata(&mut self, line: &str, line_no: usize) -> Result<(), ParseError> {
        if let Some(caps) = META_STRUCT.captures(line) {
            let text = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
            let entry = MetaEntry {
                id: text("id").unwrap_or_default(),
                number: text("number"),
                field_type: text("type"),
                description: text("description").unwrap_or_default(),
                source: text("source"),
                version: text("version"),
            };
            self.metadata.push_entry(&caps["key"], entry);
            return Ok(());
        }

        if let Some(caps) = META_KEYVAL.captures(line)
            && self.metadata.set_scalar(&caps["key"], &caps["value"])
        {
            return Ok(());
        }

        Err(ParseError::new(ParseErrorKind::InvalidMetadata, line, line_no))
    }

    ///
    /// Validate the `#CHROM ...` header line and make it the header of this pass.
    pub fn validate_head(&mut self, line: &str, line_no: usize) -> Result<(), ParseError> {
        if self.header.is_some() {
            return Err(ParseError::new(ParseErrorKind::DuplicateHeader, line, line_no));
        }

        let header = Header::from_line(line);
        let missing = header.missing_required();
        if !missing.is_empty() {
            debug!("Header on line {} lacks {:?}", line_no, missing);
            return Err(ParseError::new(
                ParseErrorKind::MissingRequiredFields,
                line,
                line_no,
            ));
        }

        self.header = Some(header);
        Ok(())
    }

    /// Build a record from a data row; requires a header.
    pub fn build_record(&self, line: &str, line_no: usize) -> Result<Record, ParseError> {
        match &self.header {
            Some(header) => Record::from_row(header, line, line_no),
            None => Err(ParseError::new(ParseErrorKind::LineFormatInvalid, line, line_no)),
        }
    }
}

///
/// Lazy VCF reader: an iterator of records over any buffered text source.
///
/// # Examples
///
/// ```rust
/// use varanno_core::vcf::Reader;
///
/// let text = "##fileformat=VCFv4.0\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n1\t100\t.\tA\tG\t50\tPASS\tTC=10\n";
/// let mut reader = Reader::new(text.as_bytes());
/// let records = reader.read_all().unwrap();
///
/// assert_eq!(records[0].hgvs(), "1:g.100A>G");
/// assert_eq!(reader.state().metadata.scalar("fileformat"), Some("VCFv4.0"));
/// ```
pub struct Reader<R: BufRead> {
    inner: R,
    buf: String,
    line_no: usize,
    policy: ErrorPolicy,
    state: ReaderState,
    finished: bool,
}

impl Reader<BufReader<Box<dyn Read>>> {
    /// Open a plain or gzipped VCF file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ReaderError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ReaderError::InputMissing);
        }
        Ok(Reader::new(get_dynamic_reader(path)?))
    }
}

impl<R: BufRead> Reader<R> {
    pub fn new(inner: R) -> Self {
        Reader {
            inner,
            buf: String::new(),
            line_no: 0,
            policy: ErrorPolicy::default(),
            state: ReaderState::new(),
            finished: false,
        }
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> &ReaderState {
        &self.state
    }

    pub fn into_state(self) -> ReaderState {
        self.state
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.state.errors
    }

    ///
    /// Read the remaining input into memory.
    ///
    /// With [ErrorPolicy::FailFast] the first malformed line aborts the read; with
    /// [ErrorPolicy::Collect] bad lines only show up in [Reader::errors].
    pub fn read_all(&mut self) -> Result<Vec<Record>, ReaderError> {
        self.by_ref().collect()
    }
}

impl<R: BufRead> Iterator for Reader<R> {
    type Item = Result<Record, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            self.buf.clear();
            match self.inner.read_line(&mut self.buf) {
                Ok(0) => self.finished = true,
                Ok(_) => {
                    self.line_no += 1;
                    let line = self.buf.trim();
                    match self.state.parse_line(line, self.line_no) {
                        Ok(Some(record)) => return Some(Ok(record)),
                        Ok(None) => {}
                        Err(err) => {
                            warn!("{}", err);
                            self.state.errors.push(err.clone());
                            if self.policy == ErrorPolicy::FailFast {
                                self.finished = true;
                                return Some(Err(err.into()));
                            }
                        }
                    }
                }
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err.into()));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MetaValue;
    use pretty_assertions::assert_eq;
    use rstest::*;

    const HEAD: &str = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tsample";

    #[fixture]
    fn vcf_text() -> String {
        [
            "##fileformat=VCFv4.0",
            "##fileDate=2016-06-21",
            "##source=Platypus_Version_0.8.1",
            r#"##INFO=<ID=TC,Number=1,Type=Integer,Description="Total coverage at this locus">"#,
            r#"##FILTER=<ID=PASS,Description="All filters passed">"#,
            r#"##FORMAT=<ID=NV,Number=.,Type=Integer,Description="Number of reads containing variant in this sample">"#,
            HEAD,
            "1\t1158631\t.\tA\tG\t2965\tPASS\tTC=160\tGT:NV\t1/1:156",
            "5\t33954511\t.\tT\tC\t2965\tPASS\tTC=106\tGT:NV\t1/1:105",
            "",
        ]
        .join("\n")
    }

    #[rstest]
    fn test_read_all(vcf_text: String) {
        let mut reader = Reader::new(vcf_text.as_bytes());
        let records = reader.read_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].hgvs(), "5:g.33954511T>C");
        assert_eq!(records[1].line_no, 9);

        let state = reader.into_state();
        assert_eq!(state.metadata.scalar("fileDate"), Some("2016-06-21"));
        assert_eq!(state.metadata.entries("INFO").len(), 1);
        assert_eq!(state.metadata.entries("FILTER")[0].number, None);
        assert_eq!(state.metadata.entries("FORMAT")[0].number.as_deref(), Some("."));
        assert!(state.metadata.entries("ALT").is_empty());
        assert_eq!(state.header.unwrap().len(), 10);
        assert!(state.errors.is_empty());
    }

    #[rstest]
    #[case(
        r#"##INFO=<ID=QD,Number=1,Type=Float,Description="Variant-quality/read-depth for this variant">"#,
        "QD", Some("1"), Some("Float"), "Variant-quality/read-depth for this variant"
    )]
    #[case(
        r#"##INFO=<ID=Size,Number=.,Type=Integer,Description="Size of reference call block">"#,
        "Size", Some("."), Some("Integer"), "Size of reference call block"
    )]
    #[case(
        r#"##FILTER=<ID=badReads,Description="Variant supported only by reads with low quality bases">"#,
        "badReads", None, None, "Variant supported only by reads with low quality bases"
    )]
    fn test_parse_structured_metadata(
        #[case] line: &str,
        #[case] id: &str,
        #[case] number: Option<&str>,
        #[case] field_type: Option<&str>,
        #[case] description: &str,
    ) {
        let mut state = ReaderState::new();
        state.parse_metadata(line, 1).unwrap();

        let key = if line.starts_with("##INFO") { "INFO" } else { "FILTER" };
        let expected = MetaEntry {
            id: id.to_string(),
            number: number.map(str::to_string),
            field_type: field_type.map(str::to_string),
            description: description.to_string(),
            source: None,
            version: None,
        };
        assert_eq!(state.metadata.entries(key), &[expected]);
    }

    #[rstest]
    fn test_parse_structured_metadata_with_source_and_version() {
        let mut state = ReaderState::new();
        state
            .parse_metadata(
                r#"##INFO=<ID=AF,Number=A,Type=Float,Description="Allele Frequency",Source="dbsnp",Version="138">"#,
                3,
            )
            .unwrap();
        let entry = &state.metadata.entries("INFO")[0];
        assert_eq!(entry.number.as_deref(), Some("A"));
        assert_eq!(entry.source.as_deref(), Some("dbsnp"));
        assert_eq!(entry.version.as_deref(), Some("138"));
    }

    #[rstest]
    fn test_parse_scalar_metadata_overwrites() {
        let mut state = ReaderState::new();
        state.parse_metadata("##fileDate=2016-06-21", 1).unwrap();
        state.parse_metadata("##fileDate=2016-06-22", 2).unwrap();
        assert_eq!(
            state.metadata.get("fileDate"),
            Some(&MetaValue::Scalar("2016-06-22".to_string()))
        );
        assert_eq!(state.metadata.len(), 5);
    }

    #[rstest]
    fn test_structured_metadata_under_unexpected_key_is_kept() {
        let mut state = ReaderState::new();
        state
            .parse_metadata(r#"##SAMPLE=<ID=NA12878,Description="Reference sample">"#, 1)
            .unwrap();
        assert_eq!(state.metadata.entries("SAMPLE")[0].id, "NA12878");
    }

    #[rstest]
    #[case("##INFO=not a structured entry")]
    #[case("##no equals sign")]
    #[case("##=")]
    fn test_parse_metadata_rejects(#[case] line: &str) {
        let mut state = ReaderState::new();
        let err = state.parse_metadata(line, 4).unwrap_err();
        assert_eq!(err, ParseError::new(ParseErrorKind::InvalidMetadata, line, 4));
    }

    #[rstest]
    fn test_validate_head() {
        let mut state = ReaderState::new();
        state.validate_head(HEAD, 1).unwrap();
        assert_eq!(
            state.header.as_ref().unwrap().columns(),
            &["CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER", "INFO", "FORMAT", "sample"]
        );

        let err = state.validate_head(HEAD, 2).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::DuplicateHeader);
        assert_eq!(err.line_no, 2);
    }

    #[rstest]
    fn test_validate_head_missing_fields() {
        let mut state = ReaderState::new();
        let err = state.validate_head("#CHROM\tPOS\tREF\tALT", 3).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingRequiredFields);
        assert!(state.header.is_none());
    }

    #[rstest]
    fn test_non_vcf_fails_on_first_line() {
        let mut reader = Reader::new("this is not a vcf file\nneither is this\n".as_bytes());
        let err = reader.read_all().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Line format invalid: this is not a vcf file [1]"
        );
        assert_eq!(reader.errors().len(), 1);
        assert_eq!(reader.errors()[0].line_no, 1);
    }

    #[rstest]
    fn test_fail_fast_stops_after_first_error(vcf_text: String) {
        let text = vcf_text.replace("5\t33954511", "5\t33954511\textra");
        let mut reader = Reader::new(text.as_bytes());

        assert!(reader.next().unwrap().is_ok());
        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            ReaderError::Parse(ParseError { kind: ParseErrorKind::InvalidRecordFormat, line_no: 9, .. })
        ));
        assert!(reader.next().is_none());
        assert_eq!(reader.errors().len(), 1);
    }

    #[rstest]
    fn test_collect_policy_skips_bad_lines(vcf_text: String) {
        let text = format!("{}{}\nX\t1\t.\tA\n2\t500\t.\tG\tT\t10\tPASS\tTC=5\tGT:NV\t0/1:2\n", vcf_text, HEAD);
        let mut reader = Reader::new(text.as_bytes()).with_policy(ErrorPolicy::Collect);
        let records = reader.read_all().unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[2].chrom, "2");
        let kinds: Vec<_> = reader.errors().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![ParseErrorKind::DuplicateHeader, ParseErrorKind::InvalidRecordFormat]
        );
        assert_eq!(reader.errors()[1].to_string(), "Invalid record format: X\t1\t.\tA [11]");
    }

    #[rstest]
    fn test_reader_state_is_fresh_per_pass(vcf_text: String) {
        let first = Reader::new(vcf_text.as_bytes()).into_state();
        assert!(first.header.is_none());

        let mut second = Reader::new(vcf_text.as_bytes());
        assert_eq!(second.read_all().unwrap().len(), 2);
        assert!(second.state().header.is_some());
    }

    #[rstest]
    fn test_blank_line_before_header_is_rejected() {
        let text = format!("\n##fileformat=VCFv4.0\n{}\n1\t100\t.\tA\tG\t50\tPASS\tTC=10\tGT\t0/1\n", HEAD);
        let mut reader = Reader::new(text.as_bytes());

        match reader.read_all() {
            Err(ReaderError::Parse(err)) => {
                assert_eq!(err.kind, ParseErrorKind::LineFormatInvalid);
                assert_eq!(err.line_no, 1);
            }
            other => panic!("expected a line format error, got {:?}", other),
        }
        assert_eq!(reader.errors().len(), 1);
    }

    #[rstest]
    fn test_blank_line_in_body_is_rejected(vcf_text: String) {
        let text = format!("{}\n5\t33954512\t.\tT\tC\t10\tPASS\tTC=6\tGT:NV\t0/1:3\n", vcf_text);
        let mut reader = Reader::new(text.as_bytes());

        assert_eq!(reader.next().unwrap().unwrap().pos, 1158631);
        assert_eq!(reader.next().unwrap().unwrap().pos, 33954511);
        match reader.next() {
            Some(Err(ReaderError::Parse(err))) => {
                assert_eq!(err.kind, ParseErrorKind::InvalidRecordFormat);
                assert_eq!(err.line_no, 10);
            }
            other => panic!("expected an invalid record error, got {:?}", other),
        }
        assert!(reader.next().is_none());
        assert_eq!(reader.errors().len(), 1);
    }
}
