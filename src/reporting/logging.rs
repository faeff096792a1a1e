use crate::config::Config;
use crate::core::types::{AuditSummary, BrokenLinkRecord, CheckResult};
use log::{debug, error, info, warn};

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let timeout = config.timeout_duration().as_secs();
    let auto_pause = config.auto_pause_enabled();
    let enabled_only = config.enabled_only();
    let exclude_count = config.exclude_patterns.as_ref().map_or(0, Vec::len);

    info!("Configuration: timeout={timeout}s, auto_pause={auto_pause}, enabled_only={enabled_only}");
    info!("Filtering: exclude_patterns={exclude_count}");
}

pub fn log_run_start(auto_pause: bool) {
    info!("Starting broken link check (auto_pause={auto_pause})");
}

/// Log individual URL check results for debugging
pub fn log_check_result(url: &str, result: &CheckResult, cached: bool) {
    let origin = if cached { "cached" } else { "fetched" };
    match (result.is_broken, result.error_message.as_deref()) {
        (false, _) => debug!("✓ {url} -> {} ({origin})", result.status),
        (true, Some(message)) => debug!("✗ {url} -> {} {message} ({origin})", result.status),
        (true, None) => debug!("✗ {url} -> {} ({origin})", result.status),
    }
}

pub fn log_skipped_ad(ad_id: &str, reason: &str) {
    debug!("Skipping ad {ad_id}: {reason}");
}

pub fn log_broken_link(record: &BrokenLinkRecord) {
    warn!(
        "Broken link found: {} (Status: {}) in campaign '{}', ad {}",
        record.url, record.status, record.campaign_name, record.ad_id
    );
}

pub fn log_pause_attempt(ad_id: &str) {
    info!("Pausing ad {ad_id}");
}

pub fn log_pause_outcome(ad_id: &str, outcome: Result<(), &dyn std::error::Error>) {
    match outcome {
        Ok(()) => info!("Paused ad {ad_id}"),
        Err(err) => warn!("Could not pause ad {ad_id}: {err}"),
    }
}

/// Log the run summary
pub fn log_run_summary(summary: &AuditSummary, duration_ms: u128) {
    if summary.broken_found == 0 {
        info!(
            "✅ No broken links found: {} ads scanned, {} unique URLs checked ({}ms)",
            summary.ads_scanned, summary.unique_urls_checked, duration_ms
        );
    } else {
        warn!(
            "❌ Found {} broken links: {} ads scanned, {} unique URLs checked, {} ads paused ({}ms)",
            summary.broken_found,
            summary.ads_scanned,
            summary.unique_urls_checked,
            summary.paused_count,
            duration_ms
        );
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}
