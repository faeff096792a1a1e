use std::io::{Stdout, Write};

use super::{ReportSink, TIMESTAMP_FORMAT, sink_error};
use crate::core::error::Result;
use crate::core::types::{AuditReport, StatusCode};
use crate::ui::color::{Colors, paint, supports_formatting};

/// Human-readable report, numbered in enumeration order.
pub struct TextSink<W> {
    writer: W,
    color: bool,
}

impl TextSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout(), supports_formatting())
    }
}

impl<W: Write + Send> TextSink<W> {
    pub fn new(writer: W, color: bool) -> Self {
        Self { writer, color }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_report(&mut self, report: &AuditReport) -> std::io::Result<()> {
        let summary = &report.summary;

        if report.records.is_empty() {
            writeln!(
                self.writer,
                "{}",
                paint("✅ No broken links found!", Colors::BRIGHT_GREEN, self.color)
            )?;
        } else {
            writeln!(
                self.writer,
                "{}",
                paint(
                    &format!("⚠️ Broken links ({})", report.records.len()),
                    Colors::BRIGHT_RED,
                    self.color
                )
            )?;
            for (i, record) in report.records.iter().enumerate() {
                let status_color = match record.status {
                    StatusCode::Http(500..=599) | StatusCode::Error => Colors::BRIGHT_RED,
                    _ => Colors::BRIGHT_YELLOW,
                };
                let line = paint(&record.to_string(), status_color, self.color);
                writeln!(self.writer, "{:4}. {}", i + 1, line)?;
            }
        }

        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} {} ads scanned, {} unique URLs checked ({} cached), {} broken, {} paused",
            paint("Checked", Colors::BRIGHT_CYAN, self.color),
            summary.ads_scanned,
            summary.unique_urls_checked,
            summary.cache_hits,
            summary.broken_found,
            summary.paused_count
        )?;
        writeln!(
            self.writer,
            "{}",
            paint(
                &report.checked_at.format(TIMESTAMP_FORMAT).to_string(),
                Colors::DIM,
                self.color
            )
        )
    }
}

impl<W: Write + Send> ReportSink for TextSink<W> {
    fn submit(&mut self, report: &AuditReport) -> Result<()> {
        self.write_report(report).map_err(sink_error)?;
        self.writer.flush().map_err(sink_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Ad, BrokenLinkRecord, CheckResult};
    use chrono::{TimeZone, Utc};

    fn render(report: &AuditReport) -> Result<String> {
        let mut sink = TextSink::new(Vec::new(), false);
        sink.submit(report)?;
        Ok(String::from_utf8(sink.into_inner()).unwrap())
    }

    #[test]
    fn test_submit_without_findings() -> Result<()> {
        let mut report = AuditReport::new(Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap());
        report.summary.ads_scanned = 3;
        report.summary.unique_urls_checked = 3;

        let output = render(&report)?;

        assert!(output.starts_with("✅ No broken links found!\n"));
        assert!(output.contains(
            "Checked 3 ads scanned, 3 unique URLs checked (0 cached), 0 broken, 0 paused"
        ));
        assert!(output.ends_with("2025-01-02 03:04:05 UTC\n"));
        Ok(())
    }

    #[test]
    fn test_submit_with_findings_is_numbered() -> Result<()> {
        let mut report = AuditReport::new(Utc::now());
        let ad = Ad::new("Brand", "1", "99", "IMAGE_AD", None);
        report.records.push(BrokenLinkRecord::new(
            &ad,
            "https://x.test/a",
            &CheckResult::from_status(404),
            false,
        ));
        report.records.push(BrokenLinkRecord::new(
            &ad,
            "https://x.test/b",
            &CheckResult::from_status(500),
            true,
        ));

        let output = render(&report)?;

        assert!(output.contains("⚠️ Broken links (2)"));
        assert!(output.contains("   1. 404 - https://x.test/a - Brand / 99 (IMAGE_AD)\n"));
        assert!(output.contains("   2. 500 - https://x.test/b - Brand / 99 (IMAGE_AD) [paused]\n"));
        Ok(())
    }

    #[test]
    fn test_submit_with_color() -> Result<()> {
        let mut sink = TextSink::new(Vec::new(), true);
        sink.submit(&AuditReport::new(Utc::now()))?;
        let output = String::from_utf8(sink.into_inner()).unwrap();

        assert!(output.contains(Colors::BRIGHT_GREEN));
        Ok(())
    }
}
