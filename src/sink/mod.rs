//! Report sinks
//!
//! A sink receives the finished [`AuditReport`] once per run and owns its
//! persistence and formatting. Every sink renders the same columns: check
//! timestamp, campaign, ad id, ad type, URL, status code, error and paused.

pub mod csv;
pub mod json;
pub mod text;

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::Config;
use crate::core::constants::output_formats;
use crate::core::error::{AuditError, Result};
use crate::core::types::AuditReport;

pub use self::csv::CsvSink;
pub use self::json::JsonSink;
pub use self::text::TextSink;

pub trait ReportSink: Send {
    fn submit(&mut self, report: &AuditReport) -> Result<()>;
}

/// Timestamp format shared by the human-readable sinks
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

pub(crate) fn sink_error(err: std::io::Error) -> AuditError {
    AuditError::Sink(err.to_string())
}

/// A report file that is created, replacing any previous report, on the
/// first write. A run that aborts before submitting leaves the old file as
/// it was.
#[derive(Debug)]
pub struct ReportFile {
    path: PathBuf,
    file: Option<File>,
}

impl ReportFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    fn open(&mut self) -> io::Result<&mut File> {
        let file = match self.file.take() {
            Some(file) => file,
            None => File::create(&self.path).map_err(|e| {
                io::Error::new(
                    e.kind(),
                    format!("Could not create report file '{}': {e}", self.path.display()),
                )
            })?,
        };
        Ok(self.file.insert(file))
    }
}

impl Write for ReportFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.open()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// Build the sink selected by `output_format`, writing to `output_path`
/// when set and to stdout otherwise.
pub fn from_config(config: &Config) -> Result<Box<dyn ReportSink>> {
    let path = config.output_path.as_deref();
    match (config.output_format(), path) {
        (output_formats::CSV, Some(path)) => Ok(Box::new(CsvSink::new(ReportFile::new(path)))),
        (output_formats::CSV, None) => Err(AuditError::Config(
            "CSV output requires an output path.".to_string(),
        )),
        (output_formats::JSON, Some(path)) => {
            Ok(Box::new(JsonSink::new(ReportFile::new(path))))
        }
        (output_formats::JSON, None) => Ok(Box::new(JsonSink::new(std::io::stdout()))),
        (output_formats::TEXT, Some(path)) => {
            Ok(Box::new(TextSink::new(ReportFile::new(path), false)))
        }
        (output_formats::TEXT, None) => Ok(Box::new(TextSink::stdout())),
        (other, _) => Err(AuditError::Config(format!(
            "Invalid output format '{other}'. Expected one of: {}.",
            output_formats::ALL.join(", ")
        ))),
    }
}
