use crate::errors::{HgvsError, ParseError, ParseErrorKind};
use crate::hgvs::hgvs_string;
use crate::models::header::Header;

///
/// The unvalidated columns of one VCF data row.
///
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRecord {
    pub chrom: String,
    pub pos: u64,
    pub id: String,
    pub ref_allele: String,
    pub alt_allele: String,
    pub qual: String,
    pub filter: String,
    pub info: String,
    pub format: Option<String>,
    pub sample: Option<String>,
    pub line_no: usize,
}

///
/// One variant call. The HGVS notation is derived when the record is built, so a
/// `Record` always carries a valid one.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub chrom: String,
    pub pos: u64,
    pub id: String,
    pub ref_allele: String,
    pub alt_allele: String,
    pub qual: String,
    pub filter: String,
    pub info: String,
    pub format: Option<String>,
    pub sample: Option<String>,
    pub line_no: usize,
    hgvs: String,
}

impl TryFrom<RawRecord> for Record {
    type Error = HgvsError;

    fn try_from(raw: RawRecord) -> Result<Self, HgvsError> {
        let hgvs = hgvs_string(&raw.chrom, raw.pos, &raw.ref_allele, &raw.alt_allele)?;

        Ok(Record {
            chrom: raw.chrom,
            pos: raw.pos,
            id: raw.id,
            ref_allele: raw.ref_allele,
            alt_allele: raw.alt_allele,
            qual: raw.qual,
            filter: raw.filter,
            info: raw.info,
            format: raw.format,
            sample: raw.sample,
            line_no: raw.line_no,
            hgvs,
        })
    }
}

impl Record {
    ///
    /// Build a record from a tab-delimited data row, taking each column from the
    /// position the header declares for it.
    ///
    /// # Arguments
    /// - header: the validated header of the file
    /// - line: the trimmed data row
    /// - line_no: 1-based line number of the row
    ///
    /// The first column after FORMAT is taken as the sample.
    pub fn from_row(header: &Header, line: &str, line_no: usize) -> Result<Record, ParseError> {
        let fields: Vec<&str> = line.split('\t').collect();
        let invalid = |kind| ParseError::new(kind, line, line_no);

        if fields.len() != header.len() {
            return Err(invalid(ParseErrorKind::InvalidRecordFormat));
        }

        let column = |name: &str| -> Result<String, ParseError> {
            header
                .index_of(name)
                .map(|i| fields[i].to_string())
                .ok_or_else(|| invalid(ParseErrorKind::InvalidRecordFormat))
        };

        let pos = column("POS")?
            .parse::<u64>()
            .map_err(|_| invalid(ParseErrorKind::InvalidRecordFormat))?;

        let format_idx = header.index_of("FORMAT");
        let format = format_idx.map(|i| fields[i].to_string());
        let sample = format_idx
            .and_then(|i| fields.get(i + 1))
            .map(|s| s.to_string());

        let raw = RawRecord {
            chrom: column("CHROM")?,
            pos,
            id: column("ID")?,
            ref_allele: column("REF")?,
            alt_allele: column("ALT")?,
            qual: column("QUAL")?,
            filter: column("FILTER")?,
            info: column("INFO")?,
            format,
            sample,
            line_no,
        };

        Record::try_from(raw).map_err(|_| invalid(ParseErrorKind::InvalidHgvs))
    }

    /// HGVS genomic notation of this variant, e.g. `5:g.33954511T>C`.
    pub fn hgvs(&self) -> &str {
        &self.hgvs
    }
}
