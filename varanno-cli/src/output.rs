//! Files written into the output directory of a run.

use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use varanno_core::errors::ParseError;
use varanno_core::models::{ANNOTATION_COLUMNS, Annotation, Metadata};

pub const ANNOTATIONS_CSV: &str = "annotations.csv";
pub const ANNOTATIONS_JSON: &str = "annotations.json";
pub const METADATA_JSON: &str = "metadata.json";
pub const ERRORS_LOG: &str = "errors.log";

/// An output directory; created, with its parents, when opened.
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    pub fn create(root: &Path) -> Result<Self> {
        create_dir_all(root)
            .with_context(|| format!("Failed to create output directory: {}", root.display()))?;
        Ok(OutputDir {
            root: root.to_path_buf(),
        })
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn create_file(&self, name: &str) -> Result<File> {
        let path = self.join(name);
        File::create(&path).with_context(|| format!("Failed to create file: {}", path.display()))
    }

    /// Dump the meta-information of the input as JSON.
    pub fn write_metadata(&self, metadata: &Metadata) -> Result<()> {
        let mut writer = BufWriter::new(self.create_file(METADATA_JSON)?);
        serde_json::to_writer_pretty(&mut writer, metadata)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    /// One line per parse error, as displayed.
    pub fn write_errors(&self, errors: &[ParseError]) -> Result<()> {
        let mut writer = BufWriter::new(self.create_file(ERRORS_LOG)?);
        for err in errors {
            writeln!(writer, "{}", err)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Streams annotations into the CSV and JSON outputs.
pub struct AnnotationWriter {
    csv: csv::Writer<File>,
    json: BufWriter<File>,
    count: usize,
}

impl AnnotationWriter {
    pub fn create(dir: &OutputDir) -> Result<Self> {
        let mut csv = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(dir.create_file(ANNOTATIONS_CSV)?);
        csv.write_record(ANNOTATION_COLUMNS)?;

        let mut json = BufWriter::new(dir.create_file(ANNOTATIONS_JSON)?);
        write!(json, "[")?;

        Ok(AnnotationWriter {
            csv,
            json,
            count: 0,
        })
    }

    pub fn write(&mut self, annotation: &Annotation) -> Result<()> {
        self.csv.serialize(annotation)?;

        if self.count > 0 {
            write!(self.json, ",")?;
        }
        writeln!(self.json)?;
        serde_json::to_writer(&mut self.json, annotation)?;

        self.count += 1;
        Ok(())
    }

    /// Close both outputs; returns the number of annotations written.
    pub fn finish(mut self) -> Result<usize> {
        self.csv.flush()?;
        writeln!(self.json, "\n]")?;
        self.json.flush()?;
        Ok(self.count)
    }
}
