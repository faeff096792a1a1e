use std::borrow::Cow;
use std::io::Write;

use super::{ReportSink, TIMESTAMP_FORMAT, sink_error};
use crate::core::constants::report_columns;
use crate::core::error::Result;
use crate::core::types::AuditReport;

/// Writes the report as CSV: a header row, then one row per finding.
///
/// The header is written even when there are no findings so a re-run always
/// replaces the previous sheet.
pub struct CsvSink<W> {
    writer: W,
}

impl<W: Write + Send> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_row<'a, I>(&mut self, fields: I) -> std::io::Result<()>
    where
        I: IntoIterator<Item = Cow<'a, str>>,
    {
        let row: Vec<Cow<'a, str>> = fields.into_iter().map(escape_field).collect();
        writeln!(self.writer, "{}", row.join(","))
    }
}

/// Quote a field when it contains a delimiter, quote or line break.
fn escape_field(field: Cow<'_, str>) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        field
    }
}

impl<W: Write + Send> ReportSink for CsvSink<W> {
    fn submit(&mut self, report: &AuditReport) -> Result<()> {
        self.write_row(report_columns::HEADERS.iter().map(|h| Cow::Borrowed(*h)))
            .map_err(sink_error)?;

        let checked_at = report.checked_at.format(TIMESTAMP_FORMAT).to_string();
        for record in &report.records {
            self.write_row([
                Cow::Borrowed(checked_at.as_str()),
                Cow::Borrowed(record.campaign_name.as_str()),
                Cow::Borrowed(record.ad_id.as_str()),
                Cow::Borrowed(record.ad_type.as_str()),
                Cow::Borrowed(record.url.as_str()),
                Cow::Owned(record.status.to_string()),
                Cow::Borrowed(record.error_message.as_deref().unwrap_or("")),
                Cow::Borrowed(if record.was_paused { "yes" } else { "no" }),
            ])
            .map_err(sink_error)?;
        }

        self.writer.flush().map_err(sink_error)
    }
}
