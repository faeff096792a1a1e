use chrono::Utc;
use regex::Regex;
use std::time::Instant;

use crate::audit::cache::UrlCache;
use crate::audit::probe::{HttpProber, Probe};
use crate::audit::remediate::Remediator;
use crate::config::Config;
use crate::core::error::Result;
use crate::core::types::{AuditReport, BrokenLinkRecord};
use crate::reporting::logging;
use crate::sink::ReportSink;
use crate::source::AdSource;
use crate::ui::ProgressReporter;

/// Drives one audit run: pulls ads from a source, checks each distinct
/// destination URL once, pauses ads with broken URLs when configured and
/// collects the findings in enumeration order.
///
/// Ads are processed strictly one after another; there is never more than
/// one outstanding request.
pub struct Auditor {
    config: Config,
    prober: Box<dyn Probe>,
    remediator: Remediator,
    exclude_patterns: Vec<Regex>,
}

impl Auditor {
    pub fn new(config: Config, prober: Box<dyn Probe>, remediator: Remediator) -> Result<Self> {
        let exclude_patterns = config.compile_exclude_patterns()?;
        Ok(Self {
            config,
            prober,
            remediator,
            exclude_patterns,
        })
    }

    /// Wire the HTTP prober and remediator described by `config`.
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        let prober = HttpProber::from_config(&config)?;
        let remediator = Remediator::from_config(&config)?;
        Self::new(config, Box::new(prober), remediator)
    }

    fn is_excluded(&self, url: &str) -> bool {
        self.exclude_patterns.iter().any(|pattern| pattern.is_match(url))
    }

    /// Audit every ad the source yields. Each call starts from an empty
    /// cache, so repeated runs never share results.
    ///
    /// Fails only when the source fails; the findings collected up to that
    /// point are dropped.
    pub async fn run(
        &self,
        source: &mut dyn AdSource,
        mut progress: Option<&mut ProgressReporter>,
    ) -> Result<AuditReport> {
        let auto_pause = self.config.auto_pause_enabled();
        let started = Instant::now();
        let mut cache = UrlCache::new();
        let mut report = AuditReport::new(Utc::now());

        logging::log_run_start(auto_pause);
        if let Some(ref mut prog) = progress {
            prog.start_audit();
        }

        while let Some(ad) = source.next_ad().await? {
            let Some(url) = ad.checkable_url() else {
                logging::log_skipped_ad(&ad.ad_id, "no destination URL");
                continue;
            };
            if self.is_excluded(url) {
                logging::log_skipped_ad(&ad.ad_id, "URL matches an exclude pattern");
                continue;
            }

            report.summary.ads_scanned += 1;
            let check = cache.lookup_or_compute(url, self.prober.as_ref()).await;

            if check.is_broken {
                let was_paused = self.remediator.remediate(&ad, auto_pause).await;
                if auto_pause && !was_paused
                    && let Some(ref prog) = progress
                {
                    prog.log_warning(&format!("Could not pause ad {}", ad.ad_id));
                }

                let record = BrokenLinkRecord::new(&ad, url, &check, was_paused);
                logging::log_broken_link(&record);
                report.summary.broken_found += 1;
                if was_paused {
                    report.summary.paused_count += 1;
                }
                report.records.push(record);
            }

            if let Some(ref prog) = progress {
                prog.update_audit_progress(report.summary.ads_scanned, report.summary.broken_found);
            }
        }

        report.summary.unique_urls_checked = cache.misses();
        report.summary.cache_hits = cache.hits();

        if let Some(ref prog) = progress {
            prog.finish_audit(report.summary.ads_scanned, report.summary.broken_found);
        }
        logging::log_run_summary(&report.summary, started.elapsed().as_millis());

        Ok(report)
    }

    /// Run the audit and hand the finished report to `sink`.
    pub async fn run_and_submit(
        &self,
        source: &mut dyn AdSource,
        sink: &mut dyn ReportSink,
        progress: Option<&mut ProgressReporter>,
    ) -> Result<AuditReport> {
        let report = self.run(source, progress).await?;
        sink.submit(&report)?;
        Ok(report)
    }
}
