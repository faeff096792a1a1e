use std::io::Write;

use super::{ReportSink, sink_error};
use crate::core::error::{AuditError, Result};
use crate::core::types::AuditReport;

/// Writes the report as a pretty-printed JSON document.
pub struct JsonSink<W> {
    writer: W,
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> ReportSink for JsonSink<W> {
    fn submit(&mut self, report: &AuditReport) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, report)
            .map_err(|e| AuditError::Sink(e.to_string()))?;
        writeln!(self.writer).map_err(sink_error)?;
        self.writer.flush().map_err(sink_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Ad, AuditSummary, BrokenLinkRecord, CheckResult};
    use chrono::Utc;
    use serde_json::Value;

    #[test]
    fn test_submit_report_document() -> Result<()> {
        let mut report = AuditReport::new(Utc::now());
        let ad = Ad::new("Brand", "7", "70", "RESPONSIVE_SEARCH_AD", None);
        report.records.push(BrokenLinkRecord::new(
            &ad,
            "https://x.test/a",
            &CheckResult::network_fault("dns error"),
            true,
        ));
        report.summary = AuditSummary {
            ads_scanned: 3,
            broken_found: 1,
            paused_count: 1,
            unique_urls_checked: 2,
            cache_hits: 1,
        };

        let mut sink = JsonSink::new(Vec::new());
        sink.submit(&report)?;
        let document: Value = serde_json::from_slice(&sink.into_inner())?;

        assert_eq!(document["summary"]["adsScanned"], 3);
        assert_eq!(document["summary"]["pausedCount"], 1);
        assert_eq!(document["records"][0]["status"], "ERROR");
        assert_eq!(document["records"][0]["errorMessage"], "dns error");
        assert_eq!(document["records"][0]["wasPaused"], true);
        assert!(document["checkedAt"].is_string());
        Ok(())
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("no space left on device"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_submit_write_failure_is_sink_error() {
        let mut sink = JsonSink::new(FullDisk);
        let err = sink.submit(&AuditReport::new(Utc::now())).unwrap_err();

        assert!(matches!(err, AuditError::Sink(_)));
        assert!(err.to_string().contains("no space left"));
    }

    #[test]
    fn test_submit_empty_report() -> Result<()> {
        let mut sink = JsonSink::new(Vec::new());
        sink.submit(&AuditReport::new(Utc::now()))?;
        let document: Value = serde_json::from_slice(&sink.into_inner())?;

        assert_eq!(document["records"], Value::Array(vec![]));
        assert_eq!(document["summary"]["brokenFound"], 0);
        Ok(())
    }
}
